//! Address aggregate - a physical address anchored to geographic coordinates
//!
//! # Invariants
//!
//! - Every field is present and valid (enforced by the value objects)
//! - `id` is assigned once and never changes, including across `apply`
//! - `(name, latitude, longitude)` is the uniqueness key, exposed as [`UniqueKey`]

use crate::error::ValidationError;
use crate::ids::AddressId;
use crate::value_objects::{AddressLine, AddressName, Coordinates, Latitude, Longitude};

// ============================================================================
// Draft (validated create input)
// ============================================================================

/// The full, validated field set of an address that has no identity yet.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressDraft {
    name: AddressName,
    street: AddressLine,
    city: AddressLine,
    state: AddressLine,
    country: AddressLine,
    coordinates: Coordinates,
}

impl AddressDraft {
    /// Validate raw input.
    ///
    /// Fields are checked in the order `name, street, city, state, country,
    /// latitude, longitude`; the first failure is returned.
    pub fn new(
        name: impl Into<String>,
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        country: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name: AddressName::new(name)?,
            street: AddressLine::new(street, "street")?,
            city: AddressLine::new(city, "city")?,
            state: AddressLine::new(state, "state")?,
            country: AddressLine::new(country, "country")?,
            coordinates: Coordinates::new(latitude, longitude)?,
        })
    }

    pub fn name(&self) -> &AddressName {
        &self.name
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn unique_key(&self) -> UniqueKey {
        UniqueKey {
            name: self.name.clone(),
            coordinates: self.coordinates,
        }
    }
}

// ============================================================================
// Address
// ============================================================================

/// A stored address.
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    id: AddressId,
    name: AddressName,
    street: AddressLine,
    city: AddressLine,
    state: AddressLine,
    country: AddressLine,
    coordinates: Coordinates,
}

impl Address {
    /// Create a new address with a freshly generated id.
    pub fn new(draft: AddressDraft) -> Self {
        Self::with_id(AddressId::new(), draft)
    }

    /// Rebuild an address with a known id (e.g. when loading from storage).
    pub fn with_id(id: AddressId, draft: AddressDraft) -> Self {
        let AddressDraft {
            name,
            street,
            city,
            state,
            country,
            coordinates,
        } = draft;
        Self {
            id,
            name,
            street,
            city,
            state,
            country,
            coordinates,
        }
    }

    #[inline]
    pub fn id(&self) -> AddressId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &AddressName {
        &self.name
    }

    #[inline]
    pub fn street(&self) -> &AddressLine {
        &self.street
    }

    #[inline]
    pub fn city(&self) -> &AddressLine {
        &self.city
    }

    #[inline]
    pub fn state(&self) -> &AddressLine {
        &self.state
    }

    #[inline]
    pub fn country(&self) -> &AddressLine {
        &self.country
    }

    #[inline]
    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.coordinates.latitude().degrees()
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.coordinates.longitude().degrees()
    }

    pub fn unique_key(&self) -> UniqueKey {
        UniqueKey {
            name: self.name.clone(),
            coordinates: self.coordinates,
        }
    }

    /// Merge validated changes into a copy of this address.
    ///
    /// Supplied fields overwrite, everything else keeps its current value.
    /// The id is never part of a change set.
    pub fn apply(&self, changes: &AddressChanges) -> Address {
        let latitude = changes
            .latitude
            .unwrap_or_else(|| self.coordinates.latitude());
        let longitude = changes
            .longitude
            .unwrap_or_else(|| self.coordinates.longitude());

        Address {
            id: self.id,
            name: changes.name.clone().unwrap_or_else(|| self.name.clone()),
            street: changes.street.clone().unwrap_or_else(|| self.street.clone()),
            city: changes.city.clone().unwrap_or_else(|| self.city.clone()),
            state: changes.state.clone().unwrap_or_else(|| self.state.clone()),
            country: changes.country.clone().unwrap_or_else(|| self.country.clone()),
            coordinates: Coordinates::from_parts(latitude, longitude),
        }
    }
}

// ============================================================================
// Uniqueness key
// ============================================================================

/// The `(name, latitude, longitude)` triple that must be unique across live
/// addresses.
#[derive(Debug, Clone, PartialEq)]
pub struct UniqueKey {
    pub name: AddressName,
    pub coordinates: Coordinates,
}

impl UniqueKey {
    pub fn latitude(&self) -> f64 {
        self.coordinates.latitude().degrees()
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates.longitude().degrees()
    }
}

// ============================================================================
// Partial updates
// ============================================================================

/// A raw partial update: `Some` means "overwrite this field", `None` means
/// "keep the current value".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressPatch {
    pub name: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl AddressPatch {
    /// Validate every supplied field with the same rules used on create.
    ///
    /// Because every rule is per-field, a record built from valid stored
    /// values and valid changes is itself valid.
    pub fn validate(&self) -> Result<AddressChanges, ValidationError> {
        Ok(AddressChanges {
            name: self.name.clone().map(AddressName::new).transpose()?,
            street: line(&self.street, "street")?,
            city: line(&self.city, "city")?,
            state: line(&self.state, "state")?,
            country: line(&self.country, "country")?,
            latitude: self.latitude.map(Latitude::new).transpose()?,
            longitude: self.longitude.map(Longitude::new).transpose()?,
        })
    }
}

fn line(value: &Option<String>, field: &'static str) -> Result<Option<AddressLine>, ValidationError> {
    value
        .as_ref()
        .map(|v| AddressLine::new(v.as_str(), field))
        .transpose()
}

/// A validated partial update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressChanges {
    pub name: Option<AddressName>,
    pub street: Option<AddressLine>,
    pub city: Option<AddressLine>,
    pub state: Option<AddressLine>,
    pub country: Option<AddressLine>,
    pub latitude: Option<Latitude>,
    pub longitude: Option<Longitude>,
}

impl AddressChanges {
    /// Whether the change set touches any part of the uniqueness key.
    pub fn touches_unique_key(&self) -> bool {
        self.name.is_some() || self.latitude.is_some() || self.longitude.is_some()
    }
}
