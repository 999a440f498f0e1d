//! Catalog import round-trip: fetch through a stub source, parse the
//! quoted CSV, import with de-duplication across repeated sessions.

use std::sync::Arc;

use promptuary::surfaces::popup::View;
use promptuary::{
    AppResult, AppState, CatalogSource, MemoryStore, PopupSession, ScriptedHost,
};

const CATALOG_CSV: &str = concat!(
    "act,prompt\n",
    "\"Linux Terminal\",\"I want you to act as a linux terminal. I will type commands\n",
    "and you will reply with the terminal output.\"\n",
    "\"English Translator, Improver\",\"I want you to act as an English translator.\"\n",
    "malformed-row-without-a-comma\n",
    "Plain Title,Plain content\n",
);

struct StubCatalog;

#[async_trait::async_trait]
impl CatalogSource for StubCatalog {
    async fn fetch_raw(&self) -> AppResult<String> {
        Ok(CATALOG_CSV.to_string())
    }
}

fn state() -> AppState {
    AppState::new(
        Arc::new(ScriptedHost::new()),
        Arc::new(MemoryStore::new()),
        Arc::new(StubCatalog),
    )
}

#[tokio::test]
async fn test_import_view_parses_quoted_and_multiline_rows() {
    let state = state();
    let mut session = PopupSession::open(&state).await;

    session.open_import().await;
    assert_eq!(session.view(), View::Import);

    let titles: Vec<&str> = session
        .import_entries()
        .iter()
        .map(|e| e.prompt.title.as_str())
        .collect();
    // The malformed row is dropped; its neighbors survive.
    assert_eq!(
        titles,
        vec!["Linux Terminal", "English Translator, Improver", "Plain Title"]
    );
    assert_eq!(
        session.import_entries()[0].prompt.content,
        "I want you to act as a linux terminal. I will type commands\nand you will reply with the terminal output."
    );
}

#[tokio::test]
async fn test_import_all_then_reimport_adds_nothing() {
    let state = state();
    let mut session = PopupSession::open(&state).await;

    session.open_import().await;
    session.import_all().await;
    // Two demo prompts + three catalog entries.
    assert_eq!(state.prompts().list().await.unwrap().len(), 5);

    // A later session imports the same catalog again: every entry is
    // already marked, and forcing the import changes nothing.
    let mut second = PopupSession::open(&state).await;
    second.open_import().await;
    assert!(second.import_entries().iter().all(|e| e.imported));

    second.import_all().await;
    assert_eq!(state.prompts().list().await.unwrap().len(), 5);
}

#[tokio::test]
async fn test_imported_prompts_carry_catalog_tags() {
    let state = state();
    let mut session = PopupSession::open(&state).await;

    session.open_import().await;
    session.import_entry(2).await;

    let listed = state.prompts().list().await.unwrap();
    let imported = listed.iter().find(|p| p.title == "Plain Title").unwrap();
    assert_eq!(imported.tags, vec!["github", "awesome-chatgpt-prompts"]);
    assert!(imported.id.starts_with("catalog-"));
    assert!(imported.target_domains.is_empty());
}
