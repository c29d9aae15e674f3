//! Address book domain.
//!
//! Pure domain layer: identifiers, validated value objects, the `Address`
//! aggregate with its partial-update patch, great-circle distance and the
//! proximity filter. Nothing in this crate performs I/O.

pub mod aggregates;
pub mod distance;
pub mod error;
pub mod ids;
pub mod proximity;
pub mod value_objects;

pub use aggregates::{Address, AddressChanges, AddressDraft, AddressPatch, UniqueKey};
pub use distance::{haversine_km, EARTH_RADIUS_KM};
pub use error::{DomainError, ValidationError};
pub use ids::AddressId;
pub use proximity::{find_within, NearbyAddress};
pub use value_objects::{
    AddressLine, AddressName, Coordinates, Latitude, Longitude, SearchRadius,
    MAX_ADDRESS_NAME_LENGTH,
};
