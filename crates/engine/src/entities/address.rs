//! Address entity module.
//!
//! Wraps the address repository port for use cases.

use std::sync::Arc;

use addrbook_domain::{
    find_within, Address as AddressRecord, AddressChanges, AddressId, Coordinates, NearbyAddress,
    SearchRadius, UniqueKey,
};

use crate::infrastructure::ports::{AddressRepo, RepoError};

/// Address entity - storage-backed address operations.
pub struct Address {
    repo: Arc<dyn AddressRepo>,
}

impl Address {
    pub fn new(repo: Arc<dyn AddressRepo>) -> Self {
        Self { repo }
    }

    pub async fn insert(&self, address: &AddressRecord) -> Result<(), RepoError> {
        self.repo.insert(address).await
    }

    pub async fn get(&self, id: AddressId) -> Result<Option<AddressRecord>, RepoError> {
        self.repo.get(id).await
    }

    /// Find the live address holding the given `(name, latitude, longitude)`.
    pub async fn find_by_key(&self, key: &UniqueKey) -> Result<Option<AddressRecord>, RepoError> {
        self.repo.find_by_key(key).await
    }

    pub async fn list(&self) -> Result<Vec<AddressRecord>, RepoError> {
        self.repo.list().await
    }

    pub async fn update(
        &self,
        id: AddressId,
        changes: &AddressChanges,
    ) -> Result<AddressRecord, RepoError> {
        self.repo.update(id, changes).await
    }

    pub async fn delete(&self, id: AddressId) -> Result<AddressRecord, RepoError> {
        self.repo.delete(id).await
    }

    /// Every live address within `radius` of `center`, nearest first.
    ///
    /// Reads a snapshot of the store and filters it in memory.
    pub async fn within(
        &self,
        center: Coordinates,
        radius: SearchRadius,
    ) -> Result<Vec<NearbyAddress>, RepoError> {
        let all = self.repo.list().await?;
        Ok(find_within(all, center, radius))
    }
}
