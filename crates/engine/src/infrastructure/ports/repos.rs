//! Repository port traits for database access.

use addrbook_domain::{Address, AddressChanges, AddressId, UniqueKey};
use async_trait::async_trait;

use super::error::RepoError;

// =============================================================================
// Address Storage
// =============================================================================

/// Durable storage for addresses.
///
/// Implementations must enforce uniqueness of `(name, latitude, longitude)`
/// themselves and report a violation as `RepoError::ConstraintViolation`,
/// whatever checks the caller performed beforehand.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressRepo: Send + Sync {
    /// Persist a new address.
    async fn insert(&self, address: &Address) -> Result<(), RepoError>;

    async fn get(&self, id: AddressId) -> Result<Option<Address>, RepoError>;

    /// Look up the live address holding `key`, if any.
    async fn find_by_key(&self, key: &UniqueKey) -> Result<Option<Address>, RepoError>;

    /// All live addresses, in insertion order.
    async fn list(&self) -> Result<Vec<Address>, RepoError>;

    /// Atomically merge `changes` into the stored address and return the result.
    ///
    /// Returns `RepoError::NotFound` if no live address has `id`.
    async fn update(&self, id: AddressId, changes: &AddressChanges) -> Result<Address, RepoError>;

    /// Remove an address permanently and return what was removed.
    ///
    /// Returns `RepoError::NotFound` if no live address has `id`.
    async fn delete(&self, id: AddressId) -> Result<Address, RepoError>;

    /// Round-trip to the storage backend.
    async fn ping(&self) -> Result<(), RepoError>;
}
