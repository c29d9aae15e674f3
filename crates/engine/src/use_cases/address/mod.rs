//! Address use cases - create, read, update and delete stored addresses.
//!
//! Uniqueness of `(name, latitude, longitude)` is checked twice: a lookup
//! before the write gives callers a fast conflict, and the storage constraint
//! catches whatever slips past the lookup under concurrency.

use std::sync::Arc;

use addrbook_domain::{
    Address as AddressRecord, AddressDraft, AddressId, AddressPatch, UniqueKey, ValidationError,
};

use crate::entities::Address;
use crate::infrastructure::ports::RepoError;

/// Errors shared by the address use cases.
#[derive(Debug, thiserror::Error)]
pub enum AddressError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("An address named '{name}' already exists at ({latitude}, {longitude})")]
    Conflict {
        name: String,
        latitude: f64,
        longitude: f64,
    },
    #[error("Address not found: {0}")]
    NotFound(String),
    #[error("Storage error: {0}")]
    Storage(RepoError),
}

impl AddressError {
    fn conflict(key: &UniqueKey) -> Self {
        Self::Conflict {
            name: key.name.to_string(),
            latitude: key.latitude(),
            longitude: key.longitude(),
        }
    }

    /// Translate a write failure, attributing a constraint violation to `key`.
    fn from_write(err: RepoError, key: &UniqueKey) -> Self {
        match err {
            RepoError::ConstraintViolation(_) => Self::conflict(key),
            other => other.into(),
        }
    }
}

impl From<RepoError> for AddressError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound { id, .. } => Self::NotFound(id),
            other => Self::Storage(other),
        }
    }
}

/// Raw field set for a new address.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAddress {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Container for address use cases.
pub struct AddressUseCases {
    pub create: Arc<CreateAddress>,
    pub list: Arc<ListAddresses>,
    pub get: Arc<GetAddress>,
    pub update: Arc<UpdateAddress>,
    pub delete: Arc<DeleteAddress>,
}

impl AddressUseCases {
    pub fn new(address: Arc<Address>) -> Self {
        Self {
            create: Arc::new(CreateAddress::new(address.clone())),
            list: Arc::new(ListAddresses::new(address.clone())),
            get: Arc::new(GetAddress::new(address.clone())),
            update: Arc::new(UpdateAddress::new(address.clone())),
            delete: Arc::new(DeleteAddress::new(address)),
        }
    }
}

// =============================================================================
// Create
// =============================================================================

pub struct CreateAddress {
    address: Arc<Address>,
}

impl CreateAddress {
    pub fn new(address: Arc<Address>) -> Self {
        Self { address }
    }

    pub async fn execute(&self, input: NewAddress) -> Result<AddressRecord, AddressError> {
        let draft = AddressDraft::new(
            input.name,
            input.street,
            input.city,
            input.state,
            input.country,
            input.latitude,
            input.longitude,
        )?;
        let key = draft.unique_key();

        if self.address.find_by_key(&key).await?.is_some() {
            tracing::info!(
                name = %key.name,
                latitude = key.latitude(),
                longitude = key.longitude(),
                "Rejected duplicate address"
            );
            return Err(AddressError::conflict(&key));
        }

        let record = AddressRecord::new(draft);
        self.address
            .insert(&record)
            .await
            .map_err(|e| AddressError::from_write(e, &key))?;

        tracing::info!(address_id = %record.id(), name = %record.name(), "Created address");
        Ok(record)
    }
}

// =============================================================================
// List / Get
// =============================================================================

pub struct ListAddresses {
    address: Arc<Address>,
}

impl ListAddresses {
    pub fn new(address: Arc<Address>) -> Self {
        Self { address }
    }

    pub async fn execute(&self) -> Result<Vec<AddressRecord>, AddressError> {
        Ok(self.address.list().await?)
    }
}

pub struct GetAddress {
    address: Arc<Address>,
}

impl GetAddress {
    pub fn new(address: Arc<Address>) -> Self {
        Self { address }
    }

    pub async fn execute(&self, id: AddressId) -> Result<AddressRecord, AddressError> {
        self.address
            .get(id)
            .await?
            .ok_or_else(|| AddressError::NotFound(id.to_string()))
    }
}

// =============================================================================
// Update
// =============================================================================

pub struct UpdateAddress {
    address: Arc<Address>,
}

impl UpdateAddress {
    pub fn new(address: Arc<Address>) -> Self {
        Self { address }
    }

    /// Overwrite the supplied fields of an existing address.
    ///
    /// Unsupplied fields keep their stored values. An update that would give
    /// the address the same `(name, latitude, longitude)` as another live
    /// address fails with `Conflict`.
    pub async fn execute(
        &self,
        id: AddressId,
        patch: AddressPatch,
    ) -> Result<AddressRecord, AddressError> {
        let Some(current) = self.address.get(id).await? else {
            tracing::warn!(address_id = %id, "Update of unknown address");
            return Err(AddressError::NotFound(id.to_string()));
        };

        let changes = patch.validate()?;
        let key = current.apply(&changes).unique_key();

        if changes.touches_unique_key() {
            if let Some(holder) = self.address.find_by_key(&key).await? {
                if holder.id() != id {
                    return Err(AddressError::conflict(&key));
                }
            }
        }

        let updated = self
            .address
            .update(id, &changes)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    tracing::warn!(address_id = %id, "Address vanished before update");
                }
                AddressError::from_write(e, &key)
            })?;

        tracing::info!(address_id = %id, "Updated address");
        Ok(updated)
    }
}

// =============================================================================
// Delete
// =============================================================================

pub struct DeleteAddress {
    address: Arc<Address>,
}

impl DeleteAddress {
    pub fn new(address: Arc<Address>) -> Self {
        Self { address }
    }

    /// Permanently remove an address, returning what was removed.
    pub async fn execute(&self, id: AddressId) -> Result<AddressRecord, AddressError> {
        match self.address.delete(id).await {
            Ok(removed) => {
                tracing::info!(address_id = %id, "Deleted address");
                Ok(removed)
            }
            Err(e) if e.is_not_found() => {
                tracing::warn!(address_id = %id, "Delete of unknown address");
                Err(AddressError::NotFound(id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}
