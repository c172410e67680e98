//! Application root handles shared by every view.

use std::sync::Arc;

use crate::cache::QueryCache;
use crate::client::CoffeeApi;

/// API client plus the query cache, constructed once and cloned into views.
#[derive(Clone)]
pub struct DashboardContext {
    api: Arc<dyn CoffeeApi>,
    cache: Arc<QueryCache>,
}

impl DashboardContext {
    /// Context with a fresh, empty cache.
    pub fn new(api: Arc<dyn CoffeeApi>) -> Self {
        Self::with_cache(api, Arc::new(QueryCache::new()))
    }

    /// Context sharing an existing cache.
    pub fn with_cache(api: Arc<dyn CoffeeApi>, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    /// API client.
    #[must_use]
    pub fn api(&self) -> &dyn CoffeeApi {
        self.api.as_ref()
    }

    /// Shared query cache.
    #[must_use]
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }
}
