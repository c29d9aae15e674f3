//! Proximity search - addresses within a great-circle radius of a point.

use std::sync::Arc;

use addrbook_domain::{Coordinates, NearbyAddress, SearchRadius, ValidationError};

use crate::entities::Address;
use crate::infrastructure::ports::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum ProximityError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
    #[error("Storage error: {0}")]
    Storage(#[from] RepoError),
}

/// Container for proximity use cases.
pub struct ProximityUseCases {
    pub find_nearby: Arc<FindNearby>,
}

impl ProximityUseCases {
    pub fn new(find_nearby: Arc<FindNearby>) -> Self {
        Self { find_nearby }
    }
}

pub struct FindNearby {
    address: Arc<Address>,
}

impl FindNearby {
    pub fn new(address: Arc<Address>) -> Self {
        Self { address }
    }

    /// Addresses no further than `distance_km` from the center, nearest first.
    ///
    /// The center is validated like any stored coordinate pair and the radius
    /// must not be negative. An address exactly on the boundary is included.
    pub async fn execute(
        &self,
        latitude: f64,
        longitude: f64,
        distance_km: f64,
    ) -> Result<Vec<NearbyAddress>, ProximityError> {
        let center = Coordinates::new(latitude, longitude)?;
        let radius = SearchRadius::new(distance_km)?;

        let hits = self.address.within(center, radius).await?;
        tracing::debug!(
            latitude,
            longitude,
            distance_km,
            hits = hits.len(),
            "Proximity search"
        );
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockAddressRepo;
    use addrbook_domain::{haversine_km, Address as AddressRecord, AddressDraft};

    fn record(name: &str, latitude: f64, longitude: f64) -> AddressRecord {
        AddressRecord::new(
            AddressDraft::new(name, "street", "city", "state", "country", latitude, longitude)
                .expect("valid draft"),
        )
    }

    fn use_case(records: Vec<AddressRecord>) -> FindNearby {
        let mut repo = MockAddressRepo::new();
        repo.expect_list().returning(move || Ok(records.clone()));
        FindNearby::new(Arc::new(Address::new(Arc::new(repo))))
    }

    #[tokio::test]
    async fn returns_hits_nearest_first_with_distances() {
        let near = record("near", 0.0, 0.5);
        let far = record("far", 0.0, 1.0);
        let outside = record("outside", 0.0, 3.0);
        let find = use_case(vec![far.clone(), outside, near.clone()]);

        let hits = find.execute(0.0, 0.0, 200.0).await.expect("search");

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].address, near);
        assert_eq!(hits[1].address, far);
        assert_eq!(hits[1].distance_km, haversine_km(0.0, 0.0, 0.0, 1.0));
    }

    #[tokio::test]
    async fn empty_store_yields_empty_result() {
        let hits = use_case(Vec::new())
            .execute(45.0, 45.0, 10_000.0)
            .await
            .expect("search");
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn negative_radius_is_rejected_without_touching_storage() {
        let find = FindNearby::new(Arc::new(Address::new(Arc::new(MockAddressRepo::new()))));

        let err = find.execute(0.0, 0.0, -1.0).await.expect_err("negative");
        assert!(matches!(err, ProximityError::Validation(ref v) if v.field() == "distance_km"));
    }

    #[tokio::test]
    async fn out_of_range_center_is_rejected() {
        let find = FindNearby::new(Arc::new(Address::new(Arc::new(MockAddressRepo::new()))));

        let err = find.execute(-90.0001, 0.0, 1.0).await.expect_err("bad latitude");
        assert!(matches!(err, ProximityError::Validation(ref v) if v.field() == "latitude"));

        let err = find.execute(0.0, 180.5, 1.0).await.expect_err("bad longitude");
        assert!(matches!(err, ProximityError::Validation(ref v) if v.field() == "longitude"));
    }

    #[tokio::test]
    async fn storage_failure_propagates() {
        let mut repo = MockAddressRepo::new();
        repo.expect_list()
            .returning(|| Err(RepoError::database("address.list", "locked")));
        let find = FindNearby::new(Arc::new(Address::new(Arc::new(repo))));

        let err = find.execute(0.0, 0.0, 1.0).await.expect_err("storage");
        assert!(matches!(err, ProximityError::Storage(_)));
    }
}
