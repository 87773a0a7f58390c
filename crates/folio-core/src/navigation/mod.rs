//! Client-side notes browser: view state, drill-down stack, history sync and search.
//!
//! [`Browser`] is the driver. Every transition goes through [`reduce`], and every
//! user-visible transition is mirrored into a [`HistoryPlatform`] as a
//! [`NavigationState`] so back/forward can restore it later.

mod browser;
mod history;
mod search;
mod stack;
mod state;


pub use browser::Browser;
pub use history::{HistoryPlatform, HistorySync, MemoryHistory};
pub use search::{SearchDebouncer, SearchOutcome};
pub use stack::NoteStack;
pub use state::{reduce, Action, BrowserState, Notice, Panel, SearchState};

use serde::{Deserialize, Serialize};

use crate::model::NoteId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewLevel {
    #[default]
    Categories,
    Books,
    Note,
}

/// One platform history entry. Never mutated after it has been pushed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavigationState {
    pub view: ViewLevel,
    #[serde(default)]
    pub selected_category: Option<String>,
    #[serde(default)]
    pub selected_book: Option<String>,
    #[serde(default)]
    pub current_note_id: Option<NoteId>,
    /// Drill-down path that led to the current note, oldest first
    #[serde(default)]
    pub history_ids: Vec<NoteId>,
}

impl NavigationState {
    pub fn categories() -> Self {
        Self::default()
    }

    pub fn books(category: &str) -> Self {
        Self {
            view: ViewLevel::Books,
            selected_category: Some(category.to_string()),
            ..Self::default()
        }
    }
}
