//! Detached Host
//!
//! `HostPlatform` implementation for environments with no browser
//! attached (local development, CLI embedding). Page capabilities are
//! unavailable; callers degrade per their own contracts.

use async_trait::async_trait;

use crate::host::HostPlatform;
use crate::models::context::TabInfo;
use crate::models::menu::MenuEntry;
use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Default)]
pub struct DetachedHost;

impl DetachedHost {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl HostPlatform for DetachedHost {
    async fn active_tab(&self) -> AppResult<Option<TabInfo>> {
        Ok(None)
    }

    async fn read_selection(&self, _tab_id: u32) -> AppResult<String> {
        Err(AppError::host("No page access without an attached browser"))
    }

    async fn insert_at_cursor(&self, _tab_id: u32, _text: &str) -> AppResult<()> {
        Err(AppError::host("No page access without an attached browser"))
    }

    async fn show_page_notice(&self, _tab_id: u32, _message: &str) -> AppResult<()> {
        Err(AppError::host("No page access without an attached browser"))
    }

    async fn install_menu(&self, _root: &MenuEntry) -> AppResult<()> {
        // Nothing to install a menu into; accepted as a no-op so the
        // background task can run detached.
        Ok(())
    }

    async fn write_clipboard(&self, _text: &str) -> AppResult<()> {
        Err(AppError::host("Clipboard unavailable without an attached browser"))
    }
}
