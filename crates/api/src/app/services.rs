use std::sync::Arc;

use sebo_catalog::demo_catalog;
use sebo_core::DomainResult;
use sebo_infra::{CatalogService, CatalogStore, InMemoryCatalogStore, TransactionEngine};

/// Application services shared by both protocol façades.
///
/// Both hold the same store, so a sale made over RPC is visible over REST
/// and vice versa.
#[derive(Clone)]
pub struct AppServices {
    pub catalog: CatalogService,
    pub engine: TransactionEngine,
}

impl AppServices {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            catalog: CatalogService::new(store.clone()),
            engine: TransactionEngine::new(store),
        }
    }

    /// In-memory wiring, optionally preloaded with the demo catalog.
    pub fn in_memory(seed: bool) -> DomainResult<Self> {
        let store = if seed {
            InMemoryCatalogStore::seeded(demo_catalog()?)?
        } else {
            InMemoryCatalogStore::new()
        };
        Ok(Self::new(Arc::new(store)))
    }
}
