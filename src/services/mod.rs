//! Services
//!
//! Business logic services for the application.
//! Services handle the core functionality and are called by the surfaces.

pub mod catalog;
pub mod context;
pub mod menu;
pub mod prompt;
pub mod template;

pub use catalog::{CatalogService, CatalogSource, HttpCatalogSource};
pub use context::ContextResolver;
pub use prompt::{demo_prompts, PromptStore, StoreEvent};
