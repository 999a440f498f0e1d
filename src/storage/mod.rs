//! Storage Layer
//!
//! Key-value persistence behind the `KeyValueStore` capability trait.
//! Two implementations: a JSON file store for a real installation and an
//! in-memory store used as the test double and as the fallback when no
//! home directory is resolvable. The implementation is selected once at
//! startup and injected; call sites never probe for backend availability.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::utils::error::AppResult;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Fixed storage keys. The whole persisted state is three values.
pub mod keys {
    /// Array of prompt records, insertion order.
    pub const PROMPTS: &str = "prompts";
    /// Boolean first-run seeding flag.
    pub const SEEDED: &str = "seeded";
    /// Transient draft slot: a captured page selection, or absent.
    pub const DRAFT_SELECTION: &str = "draft_selection";
}

/// Asynchronous key-value storage capability.
///
/// Each call is atomic from the caller's point of view; there is no
/// cross-call transaction. Reads always go to the backing store, so a
/// surface observes its own prior writes.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<Value>>;
    async fn set(&self, key: &str, value: Value) -> AppResult<()>;
    async fn remove(&self, key: &str) -> AppResult<()>;
}

/// Select a storage backend for this environment: the file store under the
/// user's home directory when one is resolvable, the in-memory store
/// otherwise.
pub fn open_default() -> Arc<dyn KeyValueStore> {
    match FileStore::open_default() {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::warn!("falling back to in-memory storage: {}", e);
            Arc::new(MemoryStore::new())
        }
    }
}
