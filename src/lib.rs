//! Promptuary - Prompt Manager Backend Library
//!
//! This library provides the backend for the Promptuary prompt manager.
//! It includes:
//! - The template engine substituting page context into prompt templates
//! - The prompt store over key-value storage, with first-run seeding,
//!   catalog import, and change notifications
//! - The CSV catalog parser and HTTP catalog source
//! - Surface orchestrators for the popup and the background task
//! - Host platform and storage capability traits with their adapters

pub mod host;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod surfaces;
pub mod utils;

// Re-export commonly used items
pub use host::{DetachedHost, HostPlatform, ScriptedHost};
pub use models::context::{PromptContext, TabInfo};
pub use models::menu::{MenuContext, MenuEntry};
pub use models::prompt::{CatalogEntry, Prompt, PromptInput};
pub use services::catalog::{parse_catalog, CatalogService, CatalogSource, HttpCatalogSource};
pub use services::context::ContextResolver;
pub use services::prompt::{demo_prompts, PromptStore, StoreEvent};
pub use services::template::render;
pub use state::AppState;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use surfaces::{BackgroundTask, MenuClick, PopupSession};
pub use utils::error::{AppError, AppResult};
