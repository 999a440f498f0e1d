//! Context Menu Builder
//!
//! Builds the page context-menu tree from a prompt collection snapshot.
//! The background task installs the result and rebuilds it whenever the
//! store broadcasts a change.

use crate::models::menu::{MenuContext, MenuEntry};
use crate::models::prompt::Prompt;

/// Fixed menu entry ids.
pub mod ids {
    pub const ROOT: &str = "promptuary-root";
    pub const SAVE_SELECTION: &str = "promptuary-save-selection";
    pub const PASTE_ROOT: &str = "promptuary-paste-root";
    pub const NO_PROMPTS: &str = "promptuary-no-prompts";
    /// Per-prompt paste entries are `paste-prompt-<prompt id>`.
    pub const PASTE_PREFIX: &str = "paste-prompt-";
}

/// Entry id for pasting a specific prompt.
pub fn paste_id(prompt_id: &str) -> String {
    format!("{}{}", ids::PASTE_PREFIX, prompt_id)
}

/// Recover the prompt id from a paste entry id, if it is one.
pub fn prompt_id_from_paste(entry_id: &str) -> Option<&str> {
    entry_id.strip_prefix(ids::PASTE_PREFIX)
}

/// Build the full tree: a root with "save selection" and a paste submenu
/// listing every prompt, or a single disabled placeholder when the
/// collection is empty.
pub fn build_menu(prompts: &[Prompt]) -> MenuEntry {
    let paste_children = if prompts.is_empty() {
        vec![
            MenuEntry::new(ids::NO_PROMPTS, "No prompts available", &[MenuContext::Editable])
                .disabled(),
        ]
    } else {
        prompts
            .iter()
            .map(|p| MenuEntry::new(paste_id(&p.id), &p.title, &[MenuContext::Editable]))
            .collect()
    };

    MenuEntry::new(
        ids::ROOT,
        "Promptuary",
        &[MenuContext::Selection, MenuContext::Editable],
    )
    .with_children(vec![
        MenuEntry::new(
            ids::SAVE_SELECTION,
            "Save selection as New Prompt",
            &[MenuContext::Selection],
        ),
        MenuEntry::new(ids::PASTE_ROOT, "Paste Prompt", &[MenuContext::Editable])
            .with_children(paste_children),
    ])
}
