//! Prompt Store
//!
//! All operations over the persisted prompt collection, composed from one
//! primitive: read the whole collection, mutate in memory, write the whole
//! snapshot back. Calls are individually atomic but there is no
//! cross-operation transaction; two in-flight read-modify-write cycles
//! (say, two open popups) can interleave and the last write wins at
//! collection granularity.
//!
//! The store also owns the first-run seeding flag and the single-slot
//! draft mailbox, and broadcasts a change event after every successful
//! collection mutation so the context-menu builder can rebuild.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::broadcast;

use crate::models::prompt::Prompt;
use crate::storage::{keys, KeyValueStore};
use crate::utils::error::AppResult;

/// Change notification emitted to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    /// The prompt collection changed (add/update/delete/clear/import/seed).
    PromptsChanged,
}

#[derive(Clone)]
pub struct PromptStore {
    store: Arc<dyn KeyValueStore>,
    events: broadcast::Sender<StoreEvent>,
}

impl PromptStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self { store, events }
    }

    /// Subscribe to collection-change events. Draft-slot traffic does not
    /// notify.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    fn notify(&self) {
        // No receivers is fine; the popup runs without the background task.
        let _ = self.events.send(StoreEvent::PromptsChanged);
    }

    /// Current collection in insertion order. A missing key is an empty
    /// collection.
    pub async fn list(&self) -> AppResult<Vec<Prompt>> {
        match self.store.get(keys::PROMPTS).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    /// Overwrite the entire collection. The primitive every mutation
    /// composes from.
    pub async fn replace_all(&self, prompts: Vec<Prompt>) -> AppResult<()> {
        self.store
            .set(keys::PROMPTS, serde_json::to_value(&prompts)?)
            .await?;
        self.notify();
        Ok(())
    }

    /// Insert one record at the end of the collection, keeping insertion
    /// order aligned with `created_at`.
    pub async fn add(&self, prompt: Prompt) -> AppResult<()> {
        let mut prompts = self.list().await?;
        prompts.push(prompt);
        self.replace_all(prompts).await
    }

    /// Replace the record with a matching id wholesale. A missing id is a
    /// silent no-op, so a stale reference cannot fail an edit.
    pub async fn update(&self, updated: Prompt) -> AppResult<()> {
        let mut prompts = self.list().await?;
        match prompts.iter_mut().find(|p| p.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                self.replace_all(prompts).await
            }
            None => Ok(()),
        }
    }

    /// Remove the record with a matching id. Missing id is a no-op.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let prompts = self.list().await?;
        let before = prompts.len();
        let remaining: Vec<Prompt> = prompts.into_iter().filter(|p| p.id != id).collect();
        // Only write (and notify) when something was actually removed.
        if remaining.len() == before {
            return Ok(());
        }
        self.replace_all(remaining).await
    }

    /// Empty the collection and reset the seeding flag, so a subsequent
    /// first load may reseed the demo content.
    pub async fn clear_all(&self) -> AppResult<()> {
        self.replace_all(Vec::new()).await?;
        self.store.set(keys::SEEDED, Value::Bool(false)).await
    }

    /// Append records from a catalog fetch, suppressing any whose
    /// `(title, content)` pair already exists in the collection or earlier
    /// in the same batch. Returns the number actually inserted.
    pub async fn import_many(&self, incoming: Vec<Prompt>) -> AppResult<usize> {
        let mut prompts = self.list().await?;
        let mut seen: HashSet<(String, String)> = prompts
            .iter()
            .map(|p| (p.title.clone(), p.content.clone()))
            .collect();

        let mut inserted = 0;
        for prompt in incoming {
            let key = (prompt.title.clone(), prompt.content.clone());
            if !seen.insert(key) {
                continue;
            }
            prompts.push(prompt);
            inserted += 1;
        }

        if inserted > 0 {
            self.replace_all(prompts).await?;
        }
        Ok(inserted)
    }

    /// First-load seeding. Inserts the demo prompts exactly once: only
    /// when the flag is unset AND the collection is empty. A non-empty
    /// collection just sets the flag, so demo content never reappears over
    /// real user data. Returns whether seeding happened.
    pub async fn ensure_seeded(&self) -> AppResult<bool> {
        if self.is_seeded().await? {
            return Ok(false);
        }
        let seeded = if self.list().await?.is_empty() {
            self.replace_all(demo_prompts()).await?;
            true
        } else {
            false
        };
        self.store.set(keys::SEEDED, Value::Bool(true)).await?;
        Ok(seeded)
    }

    async fn is_seeded(&self) -> AppResult<bool> {
        Ok(self
            .store
            .get(keys::SEEDED)
            .await?
            .and_then(|v| v.as_bool())
            .unwrap_or(false))
    }

    /// Write the draft slot. A second capture before a consume overwrites
    /// the first: this is a single-slot mailbox, not a queue.
    pub async fn set_draft(&self, text: &str) -> AppResult<()> {
        self.store
            .set(keys::DRAFT_SELECTION, Value::String(text.to_string()))
            .await
    }

    /// Read-then-clear the draft slot. Empty captures read as `None`.
    pub async fn take_draft(&self) -> AppResult<Option<String>> {
        match self.store.get(keys::DRAFT_SELECTION).await? {
            Some(value) => {
                self.store.remove(keys::DRAFT_SELECTION).await?;
                Ok(value
                    .as_str()
                    .map(|s| s.to_string())
                    .filter(|s| !s.is_empty()))
            }
            None => Ok(None),
        }
    }
}

/// The fixed demonstration prompts inserted on first run.
pub fn demo_prompts() -> Vec<Prompt> {
    let created_at = crate::models::prompt::now_millis();
    vec![
        Prompt {
            id: "demo-1".to_string(),
            title: "Summarize Page".to_string(),
            content: "Please summarize the following content from {{url}}:\n\n{{selection}}"
                .to_string(),
            tags: vec!["general".to_string(), "summary".to_string()],
            target_domains: Vec::new(),
            created_at,
        },
        Prompt {
            id: "demo-2".to_string(),
            title: "Explain Like I'm 5".to_string(),
            content: "Explain this concept in simple terms:\n\n{{selection}}".to_string(),
            tags: vec!["general".to_string()],
            target_domains: Vec::new(),
            created_at,
        },
    ]
}
