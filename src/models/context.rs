//! Context Models
//!
//! Ambient page context gathered for template rendering.

use serde::{Deserialize, Serialize};

/// Context values substituted into template markers at render time.
/// Absent values render as the empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptContext {
    pub selection: Option<String>,
    pub url: Option<String>,
    pub clipboard: Option<String>,
}

impl PromptContext {
    pub fn selection(&self) -> &str {
        self.selection.as_deref().unwrap_or("")
    }

    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or("")
    }

    pub fn clipboard(&self) -> &str {
        self.clipboard.as_deref().unwrap_or("")
    }
}

/// The host's description of the currently active page tab.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TabInfo {
    pub id: u32,
    pub url: String,
}

impl TabInfo {
    pub fn new(id: u32, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
        }
    }
}
