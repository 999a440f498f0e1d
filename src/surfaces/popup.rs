//! Popup Surface
//!
//! State and operations behind the popup / command-palette UI: search and
//! domain-gated listing, run-prompt (resolve context, render, copy),
//! create/edit with validation, catalog import, and clear-all. All state
//! lives on the session object; it is created when the surface opens and
//! dropped when it closes.

use std::sync::Arc;

use crate::host::HostPlatform;
use crate::models::prompt::{Prompt, PromptInput};
use crate::services::catalog::CatalogService;
use crate::services::context::ContextResolver;
use crate::services::prompt::PromptStore;
use crate::services::template;
use crate::state::AppState;

/// Which view the popup is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Main,
    Create,
    Import,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Success,
    Error,
}

/// A dismissible transient notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub kind: FeedbackKind,
}

impl Feedback {
    fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: FeedbackKind::Success,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: FeedbackKind::Error,
        }
    }
}

/// The create/edit form. In edit mode the original record is kept so the
/// update preserves id and creation time.
#[derive(Debug, Clone, Default)]
pub struct CreateForm {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub target_domains: Vec<String>,
    editing: Option<Prompt>,
}

impl CreateForm {
    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn load(&mut self, prompt: &Prompt) {
        self.title = prompt.title.clone();
        self.content = prompt.content.clone();
        self.tags = prompt.tags.clone();
        self.target_domains = prompt.target_domains.clone();
        self.editing = Some(prompt.clone());
    }

    /// Splice a marker chip into the content at the cursor position.
    /// Returns the cursor position after the inserted marker.
    pub fn insert_marker(&mut self, at: usize, marker: &str) -> usize {
        let mut at = at.min(self.content.len());
        while !self.content.is_char_boundary(at) {
            at -= 1;
        }
        self.content.insert_str(at, marker);
        at + marker.len()
    }
}

/// One row of the import view.
#[derive(Debug, Clone)]
pub struct ImportEntry {
    pub prompt: Prompt,
    pub imported: bool,
}

pub struct PopupSession {
    store: PromptStore,
    resolver: ContextResolver,
    host: Arc<dyn HostPlatform>,
    catalog: CatalogService,
    view: View,
    search: String,
    /// Last-known collection snapshot; kept on storage failure so the
    /// list degrades instead of vanishing.
    prompts: Vec<Prompt>,
    active_domain: Option<String>,
    form: CreateForm,
    import_entries: Vec<ImportEntry>,
    feedback: Option<Feedback>,
}

impl PopupSession {
    /// Open the popup. A pending draft wins over everything: the create
    /// form is prefilled with the captured text, the slot is cleared, and
    /// the session lands on the Create view. Otherwise first-run seeding
    /// runs and the session lands on Main.
    pub async fn open(state: &AppState) -> Self {
        let mut session = Self {
            store: state.prompts(),
            resolver: state.resolver(),
            host: state.host(),
            catalog: CatalogService::new(state.catalog()),
            view: View::Main,
            search: String::new(),
            prompts: Vec::new(),
            active_domain: None,
            form: CreateForm::default(),
            import_entries: Vec::new(),
            feedback: None,
        };

        session.active_domain = session.resolver.active_domain().await;

        match session.store.take_draft().await {
            Ok(Some(draft)) => {
                session.form.content = draft;
                session.view = View::Create;
                return session;
            }
            Ok(None) => {}
            Err(e) => session.feedback = Some(Feedback::error(e.to_string())),
        }

        if let Err(e) = session.store.ensure_seeded().await {
            session.feedback = Some(Feedback::error(e.to_string()));
        }
        session.refresh().await;
        session
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn form(&self) -> &CreateForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CreateForm {
        &mut self.form
    }

    pub fn active_domain(&self) -> Option<&str> {
        self.active_domain.as_deref()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn dismiss_feedback(&mut self) {
        self.feedback = None;
    }

    pub fn import_entries(&self) -> &[ImportEntry] {
        &self.import_entries
    }

    /// The full last-known snapshot, insertion order.
    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    /// Prompts matching the search text and the active domain: contextual
    /// prompts only surface when the active hostname contains one of
    /// their target domains.
    pub fn visible_prompts(&self) -> Vec<&Prompt> {
        let needle = self.search.to_lowercase();
        self.prompts
            .iter()
            .filter(|p| p.visible_on(self.active_domain.as_deref()))
            .filter(|p| needle.is_empty() || p.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Visible prompts split into (contextual-for-this-domain, general),
    /// the command-palette grouping.
    pub fn grouped(&self) -> (Vec<&Prompt>, Vec<&Prompt>) {
        self.visible_prompts()
            .into_iter()
            .partition(|p| p.is_contextual())
    }

    /// Reload the snapshot. On storage failure the last-known snapshot is
    /// kept and an error notice is shown.
    pub async fn refresh(&mut self) {
        match self.store.list().await {
            Ok(prompts) => self.prompts = prompts,
            Err(e) => self.feedback = Some(Feedback::error(e.to_string())),
        }
    }

    /// Run a prompt: gather context, render the template, copy the result
    /// to the clipboard. The outcome lands in the feedback notice either
    /// way; the stored record is never touched.
    pub async fn run_prompt(&mut self, id: &str) {
        let Some(prompt) = self.prompts.iter().find(|p| p.id == id) else {
            self.feedback = Some(Feedback::error("Prompt not found"));
            return;
        };

        let context = self.resolver.resolve().await;
        let rendered = template::render(&prompt.content, &context);

        match self.host.write_clipboard(&rendered).await {
            Ok(()) => self.feedback = Some(Feedback::success("Copied to clipboard!")),
            Err(e) => {
                tracing::debug!("clipboard write failed: {}", e);
                self.feedback = Some(Feedback::error("Failed to copy."));
            }
        }
    }

    /// Switch to an empty create form.
    pub fn begin_create(&mut self) {
        self.form.reset();
        self.view = View::Create;
    }

    /// Load an existing record into the form for editing.
    pub fn begin_edit(&mut self, id: &str) {
        match self.prompts.iter().find(|p| p.id == id) {
            Some(prompt) => {
                let prompt = prompt.clone();
                self.form.load(&prompt);
                self.view = View::Create;
            }
            None => self.feedback = Some(Feedback::error("Prompt not found")),
        }
    }

    /// Validate and persist the form: a create appends a fresh record, an
    /// edit replaces the original wholesale (same id, same creation
    /// time). Validation failure shows an inline notice and writes
    /// nothing.
    pub async fn submit_form(&mut self) {
        let input = PromptInput {
            title: self.form.title.trim().to_string(),
            content: self.form.content.trim().to_string(),
            tags: self.form.tags.clone(),
            target_domains: self.form.target_domains.clone(),
        };
        if let Err(e) = input.validate() {
            self.feedback = Some(Feedback::error(e.to_string()));
            return;
        }

        let result = match self.form.editing.clone() {
            Some(original) => {
                let updated = Prompt {
                    id: original.id,
                    title: input.title,
                    content: input.content,
                    tags: input.tags,
                    target_domains: input.target_domains,
                    created_at: original.created_at,
                };
                self.store.update(updated).await
            }
            None => self.store.add(Prompt::from_input(input)).await,
        };

        match result {
            Ok(()) => {
                self.feedback = Some(Feedback::success("Prompt saved!"));
                self.form.reset();
                self.view = View::Main;
                self.refresh().await;
            }
            Err(e) => self.feedback = Some(Feedback::error(e.to_string())),
        }
    }

    pub async fn delete_prompt(&mut self, id: &str) {
        match self.store.delete(id).await {
            Ok(()) => {
                self.feedback = Some(Feedback::success("Prompt deleted."));
                self.refresh().await;
            }
            Err(e) => self.feedback = Some(Feedback::error(e.to_string())),
        }
    }

    pub async fn clear_all(&mut self) {
        match self.store.clear_all().await {
            Ok(()) => {
                self.feedback = Some(Feedback::success("All prompts cleared."));
                self.refresh().await;
            }
            Err(e) => self.feedback = Some(Feedback::error(e.to_string())),
        }
    }

    /// Switch to the import view and fetch the catalog. A fetch failure
    /// leaves the list empty and shows a dismissible notice; nothing is
    /// persisted. Entries already present in the collection (same title
    /// and content) are marked imported up front.
    pub async fn open_import(&mut self) {
        self.view = View::Import;
        self.import_entries.clear();

        match self.catalog.fetch_prompts().await {
            Ok(fetched) => {
                self.import_entries = fetched
                    .into_iter()
                    .map(|prompt| {
                        let imported = self
                            .prompts
                            .iter()
                            .any(|p| p.title == prompt.title && p.content == prompt.content);
                        ImportEntry { prompt, imported }
                    })
                    .collect();
            }
            Err(e) => {
                tracing::debug!("catalog fetch failed: {}", e);
                self.feedback = Some(Feedback::error("Failed to fetch prompts."));
            }
        }
    }

    /// Import a single catalog entry. Already-imported entries are a
    /// no-op; the store suppresses duplicates regardless.
    pub async fn import_entry(&mut self, index: usize) {
        let Some(entry) = self.import_entries.get(index) else {
            return;
        };
        if entry.imported {
            return;
        }
        let prompt = entry.prompt.clone();
        let title = prompt.title.clone();

        match self.store.import_many(vec![prompt]).await {
            Ok(_) => {
                self.import_entries[index].imported = true;
                self.feedback = Some(Feedback::success(format!("Imported \"{}\"", title)));
                self.refresh().await;
            }
            Err(e) => self.feedback = Some(Feedback::error(e.to_string())),
        }
    }

    /// Import every entry not yet imported.
    pub async fn import_all(&mut self) {
        let remaining: Vec<Prompt> = self
            .import_entries
            .iter()
            .filter(|e| !e.imported)
            .map(|e| e.prompt.clone())
            .collect();
        if remaining.is_empty() {
            return;
        }

        match self.store.import_many(remaining).await {
            Ok(inserted) => {
                for entry in &mut self.import_entries {
                    entry.imported = true;
                }
                self.feedback = Some(Feedback::success(format!("Imported {} prompts", inserted)));
                self.refresh().await;
            }
            Err(e) => self.feedback = Some(Feedback::error(e.to_string())),
        }
    }
}
