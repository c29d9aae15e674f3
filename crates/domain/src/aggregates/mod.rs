//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Has a unique identity
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//!
//! | Concern | Rustic Equivalent |
//! |------------------|-------------------|
//! | Private fields + getters | Newtypes valid by construction |
//! | Partial updates | Per-field `Option` patch, merged by `apply` |
//! | Factory pattern | `::new()` from a validated draft |

pub mod address;

pub use address::{Address, AddressChanges, AddressDraft, AddressPatch, UniqueKey};
