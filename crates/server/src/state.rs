use planner::{config::PlannerConfig, services::catalog::CatalogCache};
use log::warn;
use std::sync::{Arc, Mutex, MutexGuard};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<PlannerConfig>,
    /// Last catalog uploaded with an import, reused by later imports
    pub catalog: Arc<Mutex<CatalogCache>>,
}

impl AppState {
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(Mutex::new(CatalogCache::new())),
        }
    }

    /// Locks the catalog cache, recovering it from a poisoned lock
    pub fn catalog_cache(&self) -> MutexGuard<'_, CatalogCache> {
        match self.catalog.lock() {
            Ok(cache) => cache,
            Err(poisoned) => {
                warn!("Catalog cache lock was poisoned");
                poisoned.into_inner()
            }
        }
    }
}
