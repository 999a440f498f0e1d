//! Background Surface
//!
//! The background task owns the page context menu: it installs the tree,
//! rebuilds it whenever the store broadcasts a change, and dispatches
//! menu clicks. It has no view of its own and must never crash: every
//! failure here is logged and swallowed.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::host::{is_restricted_url, HostPlatform};
use crate::models::context::TabInfo;
use crate::services::menu;
use crate::services::prompt::PromptStore;
use crate::state::AppState;
use crate::utils::error::AppResult;

/// A context-menu click as delivered by the host: the entry id, the tab
/// it happened on, and the selection text when the click came from a
/// selection context.
#[derive(Debug, Clone)]
pub struct MenuClick {
    pub entry_id: String,
    pub tab: Option<TabInfo>,
    pub selection_text: Option<String>,
}

pub struct BackgroundTask {
    store: PromptStore,
    host: Arc<dyn HostPlatform>,
}

impl BackgroundTask {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.prompts(),
            host: state.host(),
        }
    }

    /// Build the menu from the current collection and install it. A
    /// storage failure installs the empty-collection tree rather than
    /// leaving a stale menu up.
    pub async fn rebuild_menu(&self) -> AppResult<()> {
        let prompts = match self.store.list().await {
            Ok(prompts) => prompts,
            Err(e) => {
                tracing::warn!("menu rebuild could not read prompts: {}", e);
                Vec::new()
            }
        };
        self.host.install_menu(&menu::build_menu(&prompts)).await
    }

    /// Install the initial menu, then keep it in sync with the store from
    /// a spawned task. Abort the returned handle to stop the listener.
    pub async fn install(self: Arc<Self>) -> AppResult<JoinHandle<()>> {
        self.rebuild_menu().await?;
        Ok(Self::spawn_menu_listener(self))
    }

    /// Rebuild the menu on every store change event.
    pub fn spawn_menu_listener(task: Arc<Self>) -> JoinHandle<()> {
        let mut events = task.store.subscribe();
        tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(_) => {
                        if let Err(e) = task.rebuild_menu().await {
                            tracing::warn!("menu rebuild failed: {}", e);
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    /// Dispatch a context-menu click.
    ///
    /// Save-selection captures the selected text into the draft slot and
    /// shows a transient on-page confirmation. Paste entries insert the
    /// chosen prompt's raw content at the page cursor; markers are left
    /// unsubstituted because this path has none of the popup's
    /// context-gathering access. Clicks on unknown or stale entries are
    /// no-ops.
    pub async fn handle_menu_click(&self, click: MenuClick) -> AppResult<()> {
        if click.entry_id == menu::ids::SAVE_SELECTION {
            return self.capture_selection(click).await;
        }
        if let Some(prompt_id) = menu::prompt_id_from_paste(&click.entry_id) {
            return self.paste_prompt(prompt_id, click.tab).await;
        }
        Ok(())
    }

    async fn capture_selection(&self, click: MenuClick) -> AppResult<()> {
        let Some(text) = click.selection_text.filter(|t| !t.is_empty()) else {
            return Ok(());
        };
        self.store.set_draft(&text).await?;
        self.confirm_on_page(click.tab.as_ref(), "Selection saved to draft")
            .await;
        Ok(())
    }

    async fn paste_prompt(&self, prompt_id: &str, tab: Option<TabInfo>) -> AppResult<()> {
        let Some(tab) = tab else {
            return Ok(());
        };
        if is_restricted_url(&tab.url) {
            return Ok(());
        }
        let prompts = self.store.list().await?;
        let Some(prompt) = prompts.iter().find(|p| p.id == prompt_id) else {
            return Ok(());
        };
        self.host.insert_at_cursor(tab.id, &prompt.content).await
    }

    /// Best-effort on-page confirmation; skipped on restricted pages and
    /// swallowed on failure.
    async fn confirm_on_page(&self, tab: Option<&TabInfo>, message: &str) {
        let Some(tab) = tab else {
            return;
        };
        if is_restricted_url(&tab.url) {
            return;
        }
        if let Err(e) = self.host.show_page_notice(tab.id, message).await {
            tracing::debug!("page notice failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ScriptedHost;
    use crate::models::prompt::{Prompt, PromptInput};
    use crate::services::catalog::HttpCatalogSource;
    use crate::storage::MemoryStore;

    fn state() -> (AppState, Arc<ScriptedHost>) {
        let host = Arc::new(ScriptedHost::new().with_tab("https://example.com"));
        let state = AppState::new(
            host.clone(),
            Arc::new(MemoryStore::new()),
            Arc::new(HttpCatalogSource::new()),
        );
        (state, host)
    }

    fn click(entry_id: &str, tab: Option<TabInfo>, selection: Option<&str>) -> MenuClick {
        MenuClick {
            entry_id: entry_id.to_string(),
            tab,
            selection_text: selection.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_rebuild_menu_reflects_collection() {
        let (state, host) = state();
        let task = BackgroundTask::new(&state);

        task.rebuild_menu().await.unwrap();
        let tree = host.current_menu().unwrap();
        assert!(tree.find(menu::ids::NO_PROMPTS).is_some());

        let p = Prompt::from_input(PromptInput::new("Mine", "content"));
        let id = p.id.clone();
        state.prompts().add(p).await.unwrap();
        task.rebuild_menu().await.unwrap();

        let tree = host.current_menu().unwrap();
        assert!(tree.find(&menu::paste_id(&id)).is_some());
        assert!(tree.find(menu::ids::NO_PROMPTS).is_none());
    }

    #[tokio::test]
    async fn test_capture_saves_draft_and_confirms() {
        let (state, host) = state();
        let task = BackgroundTask::new(&state);
        let tab = TabInfo::new(1, "https://example.com");

        task.handle_menu_click(click(
            menu::ids::SAVE_SELECTION,
            Some(tab),
            Some("picked text"),
        ))
        .await
        .unwrap();

        assert_eq!(
            state.prompts().take_draft().await.unwrap().as_deref(),
            Some("picked text")
        );
        assert_eq!(
            host.notices(),
            vec![(1, "Selection saved to draft".to_string())]
        );
    }

    #[tokio::test]
    async fn test_capture_without_selection_is_a_noop() {
        let (state, _host) = state();
        let task = BackgroundTask::new(&state);

        task.handle_menu_click(click(menu::ids::SAVE_SELECTION, None, None))
            .await
            .unwrap();
        task.handle_menu_click(click(menu::ids::SAVE_SELECTION, None, Some("")))
            .await
            .unwrap();

        assert!(state.prompts().take_draft().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_capture_on_restricted_page_skips_notice() {
        let (state, host) = state();
        let task = BackgroundTask::new(&state);
        let tab = TabInfo::new(7, "chrome://settings");

        task.handle_menu_click(click(menu::ids::SAVE_SELECTION, Some(tab), Some("text")))
            .await
            .unwrap();

        // Draft still captured, confirmation skipped.
        assert!(state.prompts().take_draft().await.unwrap().is_some());
        assert!(host.notices().is_empty());
    }

    #[tokio::test]
    async fn test_paste_inserts_raw_content() {
        let (state, host) = state();
        let task = BackgroundTask::new(&state);

        let p = Prompt::from_input(PromptInput::new("Tpl", "Raw {{selection}} stays"));
        let id = p.id.clone();
        state.prompts().add(p).await.unwrap();

        let tab = TabInfo::new(3, "https://example.com/form");
        task.handle_menu_click(click(&menu::paste_id(&id), Some(tab), None))
            .await
            .unwrap();

        // Markers are NOT substituted on this path.
        assert_eq!(
            host.insertions(),
            vec![(3, "Raw {{selection}} stays".to_string())]
        );
    }

    #[tokio::test]
    async fn test_paste_unknown_id_or_restricted_page_is_a_noop() {
        let (state, host) = state();
        let task = BackgroundTask::new(&state);

        let tab = TabInfo::new(3, "https://example.com");
        task.handle_menu_click(click(&menu::paste_id("ghost"), Some(tab), None))
            .await
            .unwrap();

        let p = Prompt::from_input(PromptInput::new("Tpl", "content"));
        let id = p.id.clone();
        state.prompts().add(p).await.unwrap();
        let restricted = TabInfo::new(4, "about:blank");
        task.handle_menu_click(click(&menu::paste_id(&id), Some(restricted), None))
            .await
            .unwrap();

        assert!(host.insertions().is_empty());
    }

    #[tokio::test]
    async fn test_listener_rebuilds_on_store_change() {
        let (state, host) = state();
        let task = Arc::new(BackgroundTask::new(&state));
        let handle = task.install().await.unwrap();
        assert_eq!(host.installed_menus().len(), 1);

        state
            .prompts()
            .add(Prompt::from_input(PromptInput::new("New", "n")))
            .await
            .unwrap();

        // Wait for the listener to pick the event up.
        for _ in 0..100 {
            if host.installed_menus().len() >= 2 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        let tree = host.current_menu().unwrap();
        assert!(tree.find(menu::ids::NO_PROMPTS).is_none());
        handle.abort();
    }
}
