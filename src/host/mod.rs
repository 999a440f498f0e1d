//! Host Platform Layer
//!
//! Capability trait over the embedding host: active-tab query, page script
//! evaluation, context-menu registration, and clipboard access. The
//! implementation is chosen once at startup and injected into services;
//! call sites never probe for host availability.

use async_trait::async_trait;

use crate::models::context::TabInfo;
use crate::models::menu::MenuEntry;
use crate::utils::error::AppResult;

pub mod detached;
pub mod scripted;

pub use detached::DetachedHost;
pub use scripted::ScriptedHost;

/// Capabilities the host environment provides to the surfaces.
#[async_trait]
pub trait HostPlatform: Send + Sync {
    /// The currently active page tab, if any.
    async fn active_tab(&self) -> AppResult<Option<TabInfo>>;

    /// Evaluate "return the current text selection" in the page.
    async fn read_selection(&self, tab_id: u32) -> AppResult<String>;

    /// Insert text at the page's focused editable element. Form fields are
    /// spliced at the cursor (cursor position preserved, input event
    /// dispatched so page scripts observe the change); rich editable
    /// regions go through the host's caret-insertion capability.
    async fn insert_at_cursor(&self, tab_id: u32, text: &str) -> AppResult<()>;

    /// Show a transient, auto-dismissing confirmation indicator on the page.
    async fn show_page_notice(&self, tab_id: u32, message: &str) -> AppResult<()>;

    /// Install a context-menu tree, replacing any previously installed tree.
    async fn install_menu(&self, root: &MenuEntry) -> AppResult<()>;

    /// Write text to the system clipboard.
    async fn write_clipboard(&self, text: &str) -> AppResult<()>;
}

/// Pages the host will not evaluate scripts on: browser-internal and
/// extension pages, local files, view-source, and the web stores. An
/// unknown URL counts as restricted.
pub fn is_restricted_url(url: &str) -> bool {
    if url.is_empty() {
        return true;
    }
    const RESTRICTED_SCHEMES: [&str; 8] = [
        "chrome:",
        "edge:",
        "brave:",
        "about:",
        "file:",
        "chrome-extension:",
        "moz-extension:",
        "view-source:",
    ];
    if RESTRICTED_SCHEMES.iter().any(|s| url.starts_with(s)) {
        return true;
    }
    url.contains("chrome.google.com/webstore") || url.contains("microsoftedge.microsoft.com/addons")
}
