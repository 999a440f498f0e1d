//! Lifecycle integration tests: first-run seeding, rendering a demo
//! prompt end-to-end, clear-all, and reseeding, over both memory and file
//! storage.

use std::sync::Arc;

use promptuary::surfaces::popup::{FeedbackKind, View};
use promptuary::{
    AppResult, AppState, CatalogSource, FileStore, MemoryStore, PopupSession, ScriptedHost,
};

struct EmptyCatalog;

#[async_trait::async_trait]
impl CatalogSource for EmptyCatalog {
    async fn fetch_raw(&self) -> AppResult<String> {
        Ok("act,prompt\n".to_string())
    }
}

fn state_with_host(host: ScriptedHost) -> (AppState, Arc<ScriptedHost>) {
    let host = Arc::new(host);
    let state = AppState::new(
        host.clone(),
        Arc::new(MemoryStore::new()),
        Arc::new(EmptyCatalog),
    );
    (state, host)
}

#[tokio::test]
async fn test_end_to_end_seed_render_clear_reseed() {
    let host = ScriptedHost::new()
        .with_tab("http://site")
        .with_selection("abc");
    let (state, host) = state_with_host(host);

    // Empty, unseeded store: the first open seeds the two demo prompts.
    let mut session = PopupSession::open(&state).await;
    assert_eq!(session.view(), View::Main);
    let titles: Vec<&str> = session.prompts().iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Summarize Page", "Explain Like I'm 5"]);

    // Running the "Summarize Page" demo substitutes the gathered context.
    let id = session.prompts()[0].id.clone();
    session.run_prompt(&id).await;
    assert_eq!(session.feedback().unwrap().kind, FeedbackKind::Success);
    assert_eq!(
        host.clipboard_writes(),
        vec!["Please summarize the following content from http://site:\n\nabc".to_string()]
    );

    // Clear-all empties the collection and resets the seed flag...
    session.clear_all().await;
    assert!(session.prompts().is_empty());

    // ...so the next first load reseeds the same two demo prompts.
    let reopened = PopupSession::open(&state).await;
    let titles: Vec<&str> = reopened
        .prompts()
        .iter()
        .map(|p| p.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Summarize Page", "Explain Like I'm 5"]);
}

#[tokio::test]
async fn test_seeding_is_idempotent_across_opens() {
    let (state, _host) = state_with_host(ScriptedHost::new());

    PopupSession::open(&state).await;
    PopupSession::open(&state).await;
    let session = PopupSession::open(&state).await;
    assert_eq!(session.prompts().len(), 2);
}

#[tokio::test]
async fn test_lifecycle_survives_restart_on_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");

    // First launch: seed, then add a prompt of our own.
    {
        let state = AppState::new(
            Arc::new(ScriptedHost::new()),
            Arc::new(FileStore::open(path.clone()).unwrap()),
            Arc::new(EmptyCatalog),
        );
        let mut session = PopupSession::open(&state).await;
        session.begin_create();
        session.form_mut().title = "Mine".to_string();
        session.form_mut().content = "user content".to_string();
        session.submit_form().await;
        assert_eq!(session.prompts().len(), 3);
    }

    // Second launch over the same file: nothing reseeds, everything is
    // still there in insertion order.
    {
        let state = AppState::new(
            Arc::new(ScriptedHost::new()),
            Arc::new(FileStore::open(path).unwrap()),
            Arc::new(EmptyCatalog),
        );
        let session = PopupSession::open(&state).await;
        let titles: Vec<&str> = session.prompts().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Summarize Page", "Explain Like I'm 5", "Mine"]);
    }
}
