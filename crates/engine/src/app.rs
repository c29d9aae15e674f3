//! Application state and composition.

use std::sync::Arc;

use crate::entities;
use crate::infrastructure::ports::AddressRepo;
use crate::use_cases;

/// Main application state.
///
/// Holds the repository ports and use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for repository ports, injected directly.
pub struct Repositories {
    pub address: Arc<dyn AddressRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub address: use_cases::AddressUseCases,
    pub proximity: use_cases::ProximityUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(address_repo: Arc<dyn AddressRepo>) -> Self {
        let address = Arc::new(entities::Address::new(address_repo.clone()));

        let use_cases = UseCases {
            address: use_cases::AddressUseCases::new(address.clone()),
            proximity: use_cases::ProximityUseCases::new(Arc::new(
                use_cases::proximity::FindNearby::new(address),
            )),
        };

        Self {
            repositories: Repositories {
                address: address_repo,
            },
            use_cases,
        }
    }
}
