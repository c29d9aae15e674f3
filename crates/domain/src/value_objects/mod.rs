//! Value objects - Immutable objects defined by their attributes

mod coordinates;
mod names;

pub use coordinates::{Coordinates, Latitude, Longitude, SearchRadius};
pub use names::{AddressLine, AddressName, MAX_ADDRESS_NAME_LENGTH};
