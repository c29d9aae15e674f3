//! Address book wire types.
//!
//! This crate contains the types exchanged over the HTTP boundary:
//! - Request bodies and query parameters
//! - Response bodies
//! - Error classification codes
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde
//! 2. **No business logic** - Pure data types and serialization
//! 3. **No domain IDs** - ids travel as plain strings

pub mod requests;
pub mod responses;

pub use requests::{CreateAddressData, NearbyQuery, UpdateAddressData};
pub use responses::{AddressData, ErrorCode, ErrorResponse, HealthStatus, NearbyAddressData, RootMessage};
