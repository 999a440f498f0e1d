//! Capture/consume handoff between the background task and the popup,
//! and the paste-specific-prompt path.

use std::sync::Arc;

use promptuary::services::menu;
use promptuary::surfaces::popup::View;
use promptuary::{
    AppResult, AppState, BackgroundTask, CatalogSource, MemoryStore, MenuClick, PopupSession,
    ScriptedHost, TabInfo,
};

struct EmptyCatalog;

#[async_trait::async_trait]
impl CatalogSource for EmptyCatalog {
    async fn fetch_raw(&self) -> AppResult<String> {
        Ok("act,prompt\n".to_string())
    }
}

fn state() -> (AppState, Arc<ScriptedHost>) {
    let host = Arc::new(ScriptedHost::new().with_tab("https://example.com"));
    let state = AppState::new(
        host.clone(),
        Arc::new(MemoryStore::new()),
        Arc::new(EmptyCatalog),
    );
    (state, host)
}

fn save_click(selection: &str) -> MenuClick {
    MenuClick {
        entry_id: menu::ids::SAVE_SELECTION.to_string(),
        tab: Some(TabInfo::new(1, "https://example.com")),
        selection_text: Some(selection.to_string()),
    }
}

#[tokio::test]
async fn test_capture_then_consume_prefills_create_view() {
    let (state, host) = state();
    let task = BackgroundTask::new(&state);

    task.handle_menu_click(save_click("selected paragraph"))
        .await
        .unwrap();
    assert_eq!(
        host.notices(),
        vec![(1, "Selection saved to draft".to_string())]
    );

    // The popup skips the landing view and prefills the form.
    let mut session = PopupSession::open(&state).await;
    assert_eq!(session.view(), View::Create);
    assert_eq!(session.form().content, "selected paragraph");

    // Completing the form persists a prompt built from the capture.
    session.form_mut().title = "From the page".to_string();
    session.submit_form().await;
    let listed = state.prompts().list().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].content, "selected paragraph");

    // The slot is gone: the next open is an ordinary landing (and seeds
    // nothing, since the collection is non-empty).
    let reopened = PopupSession::open(&state).await;
    assert_eq!(reopened.view(), View::Main);
    assert_eq!(reopened.prompts().len(), 1);
}

#[tokio::test]
async fn test_second_capture_overwrites_first() {
    let (state, _host) = state();
    let task = BackgroundTask::new(&state);

    task.handle_menu_click(save_click("first capture")).await.unwrap();
    task.handle_menu_click(save_click("second capture")).await.unwrap();

    let session = PopupSession::open(&state).await;
    assert_eq!(session.form().content, "second capture");

    // The first capture is unrecoverable.
    assert!(state.prompts().take_draft().await.unwrap().is_none());
}

#[tokio::test]
async fn test_paste_existing_prompt_without_popup() {
    let (state, host) = state();

    // Seed through an ordinary popup open, then close it.
    PopupSession::open(&state).await;
    let prompts = state.prompts().list().await.unwrap();
    let summarize = prompts.iter().find(|p| p.title == "Summarize Page").unwrap();

    // The background task pastes the raw template; markers stay verbatim.
    let task = BackgroundTask::new(&state);
    task.handle_menu_click(MenuClick {
        entry_id: menu::paste_id(&summarize.id),
        tab: Some(TabInfo::new(9, "https://example.com/compose")),
        selection_text: None,
    })
    .await
    .unwrap();

    assert_eq!(
        host.insertions(),
        vec![(
            9,
            "Please summarize the following content from {{url}}:\n\n{{selection}}".to_string()
        )]
    );
}

#[tokio::test]
async fn test_menu_tracks_collection_across_surfaces() {
    let (state, host) = state();
    let task = Arc::new(BackgroundTask::new(&state));
    let handle = task.install().await.unwrap();

    // Popup opens and seeds; the listener rebuilds with both demos.
    PopupSession::open(&state).await;
    let mut paste_entries = 0;
    for _ in 0..100 {
        if let Some(tree) = host.current_menu() {
            if let Some(paste_root) = tree.find(menu::ids::PASTE_ROOT) {
                if tree.find(menu::ids::NO_PROMPTS).is_none() {
                    paste_entries = paste_root.children.len();
                    break;
                }
            }
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert_eq!(paste_entries, 2);
    handle.abort();
}
