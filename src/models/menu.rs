//! Context Menu Models
//!
//! The page context-menu tree the host installs atomically. Installing a
//! tree replaces whatever tree was installed before.

use serde::{Deserialize, Serialize};

/// Page contexts a menu entry is shown in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MenuContext {
    /// Shown when the user has a text selection.
    Selection,
    /// Shown when the click target is an editable element.
    Editable,
}

/// One entry in the context-menu tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuEntry {
    pub id: String,
    pub title: String,
    pub contexts: Vec<MenuContext>,
    pub enabled: bool,
    pub children: Vec<MenuEntry>,
}

impl MenuEntry {
    pub fn new(id: impl Into<String>, title: impl Into<String>, contexts: &[MenuContext]) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            contexts: contexts.to_vec(),
            enabled: true,
            children: Vec::new(),
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn with_children(mut self, children: Vec<MenuEntry>) -> Self {
        self.children = children;
        self
    }

    /// Depth-first lookup by entry id.
    pub fn find(&self, id: &str) -> Option<&MenuEntry> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }
}
