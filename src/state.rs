//! Application State
//!
//! Explicit composition root: the host platform, the storage backend, the
//! prompt store, and the catalog source, wired once and injected into the
//! surfaces. Surfaces are created on open and dropped on close; the state
//! itself is the only process-wide stateful object.

use std::sync::Arc;

use crate::host::{DetachedHost, HostPlatform};
use crate::services::catalog::{CatalogSource, HttpCatalogSource};
use crate::services::context::ContextResolver;
use crate::services::prompt::PromptStore;
use crate::storage::{self, KeyValueStore};

pub struct AppState {
    host: Arc<dyn HostPlatform>,
    storage: Arc<dyn KeyValueStore>,
    prompts: PromptStore,
    catalog: Arc<dyn CatalogSource>,
}

impl AppState {
    /// Wire the state from explicit capabilities.
    pub fn new(
        host: Arc<dyn HostPlatform>,
        storage: Arc<dyn KeyValueStore>,
        catalog: Arc<dyn CatalogSource>,
    ) -> Self {
        let prompts = PromptStore::new(storage.clone());
        Self {
            host,
            storage,
            prompts,
            catalog,
        }
    }

    /// Environment-default wiring: detached host, the default storage
    /// backend for this environment, the real catalog endpoint.
    pub fn detect() -> Self {
        Self::new(
            Arc::new(DetachedHost::new()),
            storage::open_default(),
            Arc::new(HttpCatalogSource::new()),
        )
    }

    pub fn host(&self) -> Arc<dyn HostPlatform> {
        self.host.clone()
    }

    pub fn storage(&self) -> Arc<dyn KeyValueStore> {
        self.storage.clone()
    }

    /// A handle to the prompt store. Handles share the same backing
    /// storage and event channel.
    pub fn prompts(&self) -> PromptStore {
        self.prompts.clone()
    }

    pub fn catalog(&self) -> Arc<dyn CatalogSource> {
        self.catalog.clone()
    }

    pub fn resolver(&self) -> ContextResolver {
        ContextResolver::new(self.host.clone())
    }
}
