//! Template Engine
//!
//! Pure substitution of the fixed context markers into a prompt template.
//! The scan is a single left-to-right pass: substituted text is never
//! re-scanned, so a selection that itself contains a marker-like substring
//! survives verbatim instead of being expanded again. Anything that is not
//! one of the three known markers, including unknown `{{...}}` tokens,
//! passes through unchanged.

use crate::models::context::PromptContext;

/// Replaced with the current page selection.
pub const SELECTION_MARKER: &str = "{{selection}}";
/// Replaced with the active page URL.
pub const URL_MARKER: &str = "{{url}}";
/// Replaced with the clipboard text.
pub const CLIPBOARD_MARKER: &str = "{{clipboard}}";

/// All recognized markers, in the order the create-form chips offer them.
pub const MARKERS: [&str; 3] = [SELECTION_MARKER, URL_MARKER, CLIPBOARD_MARKER];

/// Render a template against the given context. Absent context values
/// substitute as the empty string. Never fails.
pub fn render(template: &str, context: &PromptContext) -> String {
    let bindings = [
        (SELECTION_MARKER, context.selection()),
        (URL_MARKER, context.url()),
        (CLIPBOARD_MARKER, context.clipboard()),
    ];

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    loop {
        let next = bindings
            .iter()
            .filter_map(|(marker, value)| rest.find(marker).map(|at| (at, *marker, *value)))
            .min_by_key(|(at, ..)| *at);
        match next {
            Some((at, marker, value)) => {
                out.push_str(&rest[..at]);
                out.push_str(value);
                rest = &rest[at + marker.len()..];
            }
            None => {
                out.push_str(rest);
                break;
            }
        }
    }
    out
}
