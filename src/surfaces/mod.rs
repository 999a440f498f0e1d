//! UI Surfaces
//!
//! Orchestrators behind the user-facing surfaces: the popup /
//! command-palette session and the background context-menu task. All
//! rendering chrome stays host-side; these own the state and flows.

pub mod background;
pub mod popup;

pub use background::{BackgroundTask, MenuClick};
pub use popup::{CreateForm, Feedback, FeedbackKind, ImportEntry, PopupSession, View};
