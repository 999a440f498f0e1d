//! Prompt Models
//!
//! Data structures for the stored prompt collection.

use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, AppResult};

/// A stored prompt: a titled text template with optional context-targeting
/// metadata. The sole persisted entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prompt {
    /// Opaque stable identifier, unique within the collection.
    /// Identity, not a content hash: it survives edits.
    pub id: String,
    pub title: String,
    /// Raw template text; may contain zero or more recognized markers.
    pub content: String,
    /// Free-form labels, order-insensitive.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Hostname substrings; when non-empty the prompt only surfaces on
    /// matching pages. Empty means general-purpose, always shown.
    #[serde(default)]
    pub target_domains: Vec<String>,
    /// Creation time in epoch milliseconds. Ordering/display only.
    pub created_at: i64,
}

impl Prompt {
    /// Build a new record from validated input with a fresh uuid id.
    pub fn from_input(input: PromptInput) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: input.title,
            content: input.content,
            tags: input.tags,
            target_domains: input.target_domains,
            created_at: now_millis(),
        }
    }

    /// Whether this prompt is restricted to specific domains.
    pub fn is_contextual(&self) -> bool {
        !self.target_domains.is_empty()
    }

    /// Whether this prompt should surface for the given active hostname.
    ///
    /// General-purpose prompts are always visible. Contextual prompts
    /// require a hostname containing one of their target domains.
    pub fn visible_on(&self, hostname: Option<&str>) -> bool {
        if !self.is_contextual() {
            return true;
        }
        match hostname {
            Some(host) => self.target_domains.iter().any(|d| host.contains(d.as_str())),
            None => false,
        }
    }
}

/// Validated create/edit payload. An update fully replaces title, content,
/// tags, and domains for a given id; partial patches are not supported.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptInput {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub target_domains: Vec<String>,
}

impl PromptInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    /// Reject empty title or content (after trimming) before any store
    /// mutation.
    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::validation("Title must not be empty"));
        }
        if self.content.trim().is_empty() {
            return Err(AppError::validation("Content must not be empty"));
        }
        Ok(())
    }
}

/// One row of the remote catalog, as produced by the CSV parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub title: String,
    pub content: String,
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
