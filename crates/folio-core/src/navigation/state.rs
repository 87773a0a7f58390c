use std::sync::Arc;

use super::{NavigationState, NoteStack, ViewLevel};
use crate::error::ApiError;
use crate::model::{Note, NoteMetadata, VaultStructure};

/// Message shown above the current panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    NotFound(String),
    Error(String),
}

/// What is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Search,
    Categories,
    Books,
    Note,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<NoteMetadata>,
    pub searching: bool,
    /// Bumped on every query change; outcomes from older generations are dropped
    pub generation: u64,
    pub min_query_len: usize,
}

impl SearchState {
    pub fn new(min_query_len: usize) -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            searching: false,
            generation: 0,
            min_query_len,
        }
    }

    /// Long enough to replace the browsing panels
    pub fn is_active(&self) -> bool {
        self.query.trim().chars().count() >= self.min_query_len
    }
}

/// Everything the browser shows. Replaced wholesale by [`reduce`], never edited in place.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowserState {
    pub view: ViewLevel,
    pub selected_category: Option<String>,
    pub selected_book: Option<String>,
    pub structure: Option<Arc<VaultStructure>>,
    pub current_note: Option<Note>,
    pub stack: NoteStack,
    pub loading_structure: bool,
    pub loading_note: bool,
    pub search: SearchState,
    pub notice: Option<Notice>,
}

impl BrowserState {
    pub fn new(min_query_len: usize) -> Self {
        Self {
            view: ViewLevel::Categories,
            selected_category: None,
            selected_book: None,
            structure: None,
            current_note: None,
            stack: NoteStack::new(),
            loading_structure: false,
            loading_note: false,
            search: SearchState::new(min_query_len),
            notice: None,
        }
    }

    /// The history entry describing this state
    pub fn navigation(&self) -> NavigationState {
        NavigationState {
            view: self.view,
            selected_category: self.selected_category.clone(),
            selected_book: self.selected_book.clone(),
            current_note_id: self.current_note.as_ref().map(|note| note.id.clone()),
            history_ids: self.stack.ids(),
        }
    }

    pub fn panel(&self) -> Panel {
        if self.search.is_active() {
            return Panel::Search;
        }
        match self.view {
            ViewLevel::Categories => Panel::Categories,
            ViewLevel::Books => Panel::Books,
            ViewLevel::Note => Panel::Note,
        }
    }

    fn clear_note(&mut self) {
        self.current_note = None;
        self.stack.clear();
        self.loading_note = false;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    StructureRequested,
    StructureLoaded(Arc<VaultStructure>),
    StructureFailed(ApiError),
    /// Back to the category grid
    Reset,
    CategorySelected(String),
    /// Back to the book list of the selected category
    BooksShown,
    /// Entering a book; its entry note is fetched next
    BookSelected(String),
    NoteRequested,
    /// Entry note of the selected book
    NoteLoaded(Note),
    /// Link or child click: the current note goes onto the stack
    NoteFollowed(Note),
    SearchResultOpened(Note),
    NoteFailed {
        error: ApiError,
        /// Not-found from a link click is not worth a notice
        quiet_not_found: bool,
    },
    RestoreStarted(NavigationState),
    Restored {
        note: Option<Note>,
        stack: Vec<Note>,
    },
    RestoreFailed(ApiError),
    QueryChanged(String),
    SearchCompleted {
        generation: u64,
        result: Result<Vec<NoteMetadata>, ApiError>,
    },
    NoticeDismissed,
}

fn error_notice(error: &ApiError) -> Notice {
    match error {
        ApiError::NotFound(_) => Notice::NotFound(error.banner()),
        _ => Notice::Error(error.banner()),
    }
}

pub fn reduce(state: &BrowserState, action: Action) -> BrowserState {
    let mut next = state.clone();

    match action {
        Action::StructureRequested => {
            next.loading_structure = true;
        }
        Action::StructureLoaded(structure) => {
            next.structure = Some(structure);
            next.loading_structure = false;
        }
        Action::StructureFailed(error) => {
            log::warn!("Failed to load vault structure: {}", error);
            next.loading_structure = false;
            next.notice = Some(Notice::Error(error.banner()));
        }
        Action::Reset => {
            next.view = ViewLevel::Categories;
            next.selected_category = None;
            next.selected_book = None;
            next.clear_note();
            next.notice = None;
        }
        Action::CategorySelected(category) => {
            next.view = ViewLevel::Books;
            next.selected_category = Some(category);
            next.selected_book = None;
            next.clear_note();
            next.notice = None;
        }
        Action::BooksShown => {
            next.view = if next.selected_category.is_some() {
                ViewLevel::Books
            } else {
                ViewLevel::Categories
            };
            next.selected_book = None;
            next.clear_note();
        }
        Action::BookSelected(book) => {
            next.view = ViewLevel::Note;
            next.selected_book = Some(book);
            next.clear_note();
            next.loading_note = true;
            next.notice = None;
        }
        Action::NoteRequested => {
            next.loading_note = true;
            next.notice = None;
        }
        Action::NoteLoaded(note) => {
            next.view = ViewLevel::Note;
            next.current_note = Some(note);
            next.loading_note = false;
        }
        Action::NoteFollowed(note) => {
            if let Some(previous) = next.current_note.take() {
                next.stack.push(previous);
            }
            next.view = ViewLevel::Note;
            next.current_note = Some(note);
            next.loading_note = false;
        }
        Action::SearchResultOpened(note) => {
            next.view = ViewLevel::Note;
            next.selected_category = Some(note.category.clone());
            next.selected_book = note.book.clone();
            next.stack.clear();
            next.current_note = Some(note);
            next.loading_note = false;
            next.search.query.clear();
            next.search.results.clear();
            next.search.searching = false;
            next.search.generation += 1;
        }
        Action::NoteFailed {
            error,
            quiet_not_found,
        } => {
            next.loading_note = false;
            if quiet_not_found && error.is_not_found() {
                log::info!("Link target vanished: {}", error);
            } else {
                log::warn!("Failed to load note: {}", error);
                next.notice = Some(error_notice(&error));
            }
        }
        Action::RestoreStarted(restored) => {
            next.view = restored.view;
            next.selected_category = restored.selected_category;
            next.selected_book = restored.selected_book;
            next.notice = None;
            next.loading_note = restored.current_note_id.is_some();
        }
        Action::Restored { note, stack } => {
            next.current_note = note;
            next.stack = NoteStack::from_notes(stack);
            next.loading_note = false;
            next.loading_structure = false;
        }
        Action::RestoreFailed(error) => {
            log::warn!("Failed to restore history entry: {}", error);
            next.clear_note();
            next.notice = Some(error_notice(&error));
        }
        Action::QueryChanged(query) => {
            next.search.query = query;
            next.search.generation += 1;
            next.search.searching = next.search.is_active();
            if !next.search.is_active() {
                next.search.results.clear();
            }
        }
        Action::SearchCompleted { generation, result } => {
            if generation != next.search.generation {
                log::debug!(
                    "Dropping search results of generation {} (now {})",
                    generation,
                    next.search.generation
                );
                return next;
            }
            next.search.searching = false;
            match result {
                Ok(results) => next.search.results = results,
                Err(error) => {
                    next.search.results.clear();
                    next.notice = Some(Notice::Error(error.banner()));
                }
            }
        }
        Action::NoticeDismissed => {
            next.notice = None;
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: &str) -> Note {
        Note {
            id: id.into(),
            title: id.into(),
            content: String::new(),
            category: "Science".into(),
            book: Some("Sapiens".into()),
            file_path: String::new(),
            links: vec![],
            word_count: 0,
            navigation: None,
        }
    }

    #[test]
    fn test_reduce_does_not_touch_previous_state() {
        let before = BrowserState::new(2);
        let after = reduce(&before, Action::CategorySelected("Science".into()));

        assert_eq!(before.view, ViewLevel::Categories);
        assert_eq!(after.view, ViewLevel::Books);
        assert_eq!(after.navigation(), NavigationState::books("Science"));
    }

    #[test]
    fn test_follow_pushes_previous_note() {
        let mut state = BrowserState::new(2);
        state = reduce(&state, Action::CategorySelected("Science".into()));
        state = reduce(&state, Action::BookSelected("Sapiens".into()));
        state = reduce(&state, Action::NoteLoaded(note("root")));
        state = reduce(&state, Action::NoteFollowed(note("c1")));
        state = reduce(&state, Action::NoteFollowed(note("c2")));

        let nav = state.navigation();
        assert_eq!(nav.current_note_id.as_deref(), Some("c2"));
        assert_eq!(nav.history_ids, vec!["root", "c1"]);

        let reset = reduce(&state, Action::BooksShown);
        assert!(reset.stack.is_empty());
        assert!(reset.current_note.is_none());
        assert_eq!(reset.view, ViewLevel::Books);
    }

    #[test]
    fn test_stale_search_results_are_dropped() {
        let mut state = BrowserState::new(2);
        state = reduce(&state, Action::QueryChanged("sap".into()));
        let stale_generation = state.search.generation;
        state = reduce(&state, Action::QueryChanged("sapi".into()));

        let stale = reduce(
            &state,
            Action::SearchCompleted {
                generation: stale_generation,
                result: Ok(vec![note("old").metadata()]),
            },
        );
        assert!(stale.search.results.is_empty());
        assert!(stale.search.searching);

        let fresh = reduce(
            &state,
            Action::SearchCompleted {
                generation: state.search.generation,
                result: Ok(vec![note("new").metadata()]),
            },
        );
        assert_eq!(fresh.search.results[0].id, "new");
        assert_eq!(fresh.panel(), Panel::Search);
    }

    #[test]
    fn test_short_query_leaves_search_mode() {
        let mut state = BrowserState::new(2);
        state = reduce(&state, Action::QueryChanged("sa".into()));
        assert_eq!(state.panel(), Panel::Search);

        state = reduce(&state, Action::QueryChanged("s".into()));
        assert_eq!(state.panel(), Panel::Categories);
        assert!(!state.search.searching);
    }

    #[test]
    fn test_quiet_not_found_sets_no_notice() {
        let state = BrowserState::new(2);
        let quiet = reduce(
            &state,
            Action::NoteFailed {
                error: ApiError::NotFound("x".into()),
                quiet_not_found: true,
            },
        );
        assert!(quiet.notice.is_none());

        let loud = reduce(
            &state,
            Action::NoteFailed {
                error: ApiError::Network("refused".into()),
                quiet_not_found: true,
            },
        );
        assert!(matches!(loud.notice, Some(Notice::Error(_))));
    }
}
