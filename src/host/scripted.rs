//! Scripted Host
//!
//! Programmable `HostPlatform` double: the active tab, page selection,
//! and failure modes are configured up front, and every outbound call is
//! recorded for inspection. This is the test/local adapter selectable at
//! startup alongside the real host.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::host::HostPlatform;
use crate::models::context::TabInfo;
use crate::models::menu::MenuEntry;
use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Default)]
struct Inner {
    tab: Option<TabInfo>,
    selection: String,
    fail_selection: bool,
    fail_clipboard: bool,
    selection_reads: u32,
    clipboard_writes: Vec<String>,
    insertions: Vec<(u32, String)>,
    notices: Vec<(u32, String)>,
    installed_menus: Vec<MenuEntry>,
}

#[derive(Debug, Default)]
pub struct ScriptedHost {
    inner: Mutex<Inner>,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script an active tab with id 1 at the given URL.
    pub fn with_tab(self, url: impl Into<String>) -> Self {
        self.lock().tab = Some(TabInfo::new(1, url));
        self
    }

    /// Script the page selection returned by `read_selection`.
    pub fn with_selection(self, selection: impl Into<String>) -> Self {
        self.lock().selection = selection.into();
        self
    }

    /// Make every `read_selection` call fail (injection denied).
    pub fn failing_selection(self) -> Self {
        self.lock().fail_selection = true;
        self
    }

    /// Make every `write_clipboard` call fail.
    pub fn failing_clipboard(self) -> Self {
        self.lock().fail_clipboard = true;
        self
    }

    pub fn selection_read_count(&self) -> u32 {
        self.lock().selection_reads
    }

    pub fn clipboard_writes(&self) -> Vec<String> {
        self.lock().clipboard_writes.clone()
    }

    pub fn insertions(&self) -> Vec<(u32, String)> {
        self.lock().insertions.clone()
    }

    pub fn notices(&self) -> Vec<(u32, String)> {
        self.lock().notices.clone()
    }

    /// Every tree passed to `install_menu`, in call order.
    pub fn installed_menus(&self) -> Vec<MenuEntry> {
        self.lock().installed_menus.clone()
    }

    /// The most recently installed tree, if any.
    pub fn current_menu(&self) -> Option<MenuEntry> {
        self.lock().installed_menus.last().cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock only means a panicking test; recover the data.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl HostPlatform for ScriptedHost {
    async fn active_tab(&self) -> AppResult<Option<TabInfo>> {
        Ok(self.lock().tab.clone())
    }

    async fn read_selection(&self, _tab_id: u32) -> AppResult<String> {
        let mut inner = self.lock();
        inner.selection_reads += 1;
        if inner.fail_selection {
            return Err(AppError::host("Script injection failed"));
        }
        Ok(inner.selection.clone())
    }

    async fn insert_at_cursor(&self, tab_id: u32, text: &str) -> AppResult<()> {
        self.lock().insertions.push((tab_id, text.to_string()));
        Ok(())
    }

    async fn show_page_notice(&self, tab_id: u32, message: &str) -> AppResult<()> {
        self.lock().notices.push((tab_id, message.to_string()));
        Ok(())
    }

    async fn install_menu(&self, root: &MenuEntry) -> AppResult<()> {
        self.lock().installed_menus.push(root.clone());
        Ok(())
    }

    async fn write_clipboard(&self, text: &str) -> AppResult<()> {
        let mut inner = self.lock();
        if inner.fail_clipboard {
            return Err(AppError::host("Clipboard write denied"));
        }
        inner.clipboard_writes.push(text.to_string());
        Ok(())
    }
}
