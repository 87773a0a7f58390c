use std::sync::Arc;

use futures::future::try_join_all;

use super::{
    reduce, Action, BrowserState, HistoryPlatform, HistorySync, NavigationState, SearchDebouncer,
    SearchOutcome,
};
use crate::api::NotesApi;
use crate::config::BrowserConfig;
use crate::error::ApiError;
use crate::model::{Note, NoteId};
use crate::resolver::resolve_link;

/// Drives the notes browser against a [`NotesApi`].
///
/// Every transition is an [`Action`] run through [`reduce`]. Transitions the user would
/// expect "back" to undo push the resulting [`NavigationState`] onto the platform history;
/// [`Browser::back`] and [`Browser::forward`] restore entries verbatim, refetching notes.
pub struct Browser<H> {
    api: Arc<dyn NotesApi>,
    history: HistorySync<H>,
    search: SearchDebouncer,
    search_limit: usize,
    state: BrowserState,
}

impl<H: HistoryPlatform> Browser<H> {
    pub fn new(api: Arc<dyn NotesApi>, platform: H, config: &BrowserConfig) -> Self {
        Self {
            api,
            history: HistorySync::new(platform),
            search: SearchDebouncer::new(config.debounce(), config.search_limit),
            search_limit: config.search_limit,
            state: BrowserState::new(config.min_query_len),
        }
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn history(&self) -> &H {
        self.history.platform()
    }

    fn dispatch(&mut self, action: Action) {
        self.state = reduce(&self.state, action);
    }

    fn push_history(&mut self) {
        self.history.push(self.state.navigation());
    }

    /// First paint: load the structure and replace the initial history entry
    pub async fn start(&mut self) {
        self.load_structure().await;
        self.history.initialize(self.state.navigation());
    }

    pub async fn load_structure(&mut self) {
        self.dispatch(Action::StructureRequested);
        match self.api.structure().await {
            Ok(structure) => self.dispatch(Action::StructureLoaded(Arc::new(structure))),
            Err(error) => self.dispatch(Action::StructureFailed(error)),
        }
    }

    // ------------------------------------------------------------------------
    // User transitions
    // ------------------------------------------------------------------------

    /// Back to the category grid. Not recorded in history.
    pub fn reset(&mut self) {
        self.search.cancel();
        self.dispatch(Action::QueryChanged(String::new()));
        self.dispatch(Action::Reset);
    }

    pub fn select_category(&mut self, category: &str) {
        self.dispatch(Action::CategorySelected(category.to_string()));
        self.push_history();
    }

    /// Back to the books of the selected category
    pub fn show_books(&mut self) {
        self.dispatch(Action::BooksShown);
        self.push_history();
    }

    /// Enter a book at its first root note, or its first note when it has no tree
    pub async fn select_book(&mut self, book: &str) {
        if self.state.selected_category.is_none() {
            log::warn!("Book {} selected without a category", book);
            return;
        }
        self.dispatch(Action::BookSelected(book.to_string()));

        let entry = match self.entry_note(book).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                self.dispatch(Action::NoteFailed {
                    error: ApiError::NotFound(format!("Book has no notes: {}", book)),
                    quiet_not_found: false,
                });
                return;
            }
            Err(error) => {
                self.dispatch(Action::NoteFailed {
                    error,
                    quiet_not_found: false,
                });
                return;
            }
        };

        match self.api.note(&entry).await {
            Ok(note) => {
                self.dispatch(Action::NoteLoaded(note));
                self.push_history();
            }
            Err(error) => self.dispatch(Action::NoteFailed {
                error,
                quiet_not_found: false,
            }),
        }
    }

    async fn entry_note(&self, book: &str) -> Result<Option<NoteId>, ApiError> {
        let from_structure = self.state.structure.as_ref().and_then(|structure| {
            let category = self.state.selected_category.as_deref()?;
            structure.get(category)?.books.get(book)?.entry_note().cloned()
        });
        if from_structure.is_some() {
            return Ok(from_structure);
        }

        let tree = self.api.book_tree(book).await?;
        Ok(tree.entry_note().cloned())
    }

    /// Click on a child in the current note's tree
    pub async fn open_child(&mut self, id: &str) {
        self.follow(id).await;
    }

    /// Click on `[[target]]` in the current note; a target with no match does nothing
    pub async fn follow_link(&mut self, target: &str) {
        let current_book = self
            .state
            .current_note
            .as_ref()
            .and_then(|note| note.book.clone());

        let resolved = resolve_link(
            &*self.api,
            target,
            current_book.as_deref(),
            self.search_limit,
            self.state.search.min_query_len,
        )
        .await;
        match resolved {
            Ok(Some(id)) => self.follow(&id).await,
            Ok(None) => {}
            Err(error) => self.dispatch(Action::NoteFailed {
                error,
                quiet_not_found: true,
            }),
        }
    }

    async fn follow(&mut self, id: &str) {
        self.dispatch(Action::NoteRequested);
        match self.api.note(id).await {
            Ok(note) => {
                self.dispatch(Action::NoteFollowed(note));
                self.push_history();
            }
            Err(error) => self.dispatch(Action::NoteFailed {
                error,
                quiet_not_found: true,
            }),
        }
    }

    /// Jump straight to a note (search result), starting a fresh drill-down path
    pub async fn open_note(&mut self, id: &str) {
        self.search.cancel();
        self.dispatch(Action::NoteRequested);
        match self.api.note(id).await {
            Ok(note) => {
                self.dispatch(Action::SearchResultOpened(note));
                self.push_history();
            }
            Err(error) => self.dispatch(Action::NoteFailed {
                error,
                quiet_not_found: false,
            }),
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.dispatch(Action::NoticeDismissed);
    }

    // ------------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------------

    /// Platform back. `false` when there is nothing to go back to inside the notes section.
    pub async fn back(&mut self) -> bool {
        match self.history.back() {
            Some(entry) => {
                self.restore(entry).await;
                true
            }
            None => false,
        }
    }

    pub async fn forward(&mut self) -> bool {
        match self.history.forward() {
            Some(entry) => {
                self.restore(entry).await;
                true
            }
            None => false,
        }
    }

    /// Apply a history entry verbatim.
    ///
    /// The note and every history id are refetched together; if any fetch fails the note
    /// and the stack are both cleared.
    pub async fn restore(&mut self, entry: NavigationState) {
        self.history.begin_restore();
        self.dispatch(Action::RestoreStarted(entry.clone()));

        match entry.current_note_id {
            None => self.dispatch(Action::Restored {
                note: None,
                stack: vec![],
            }),
            Some(note_id) => match self.fetch_path(&note_id, &entry.history_ids).await {
                Ok((note, stack)) => self.dispatch(Action::Restored {
                    note: Some(note),
                    stack,
                }),
                Err(error) => self.dispatch(Action::RestoreFailed(error)),
            },
        }

        self.history.end_restore();
    }

    async fn fetch_path(
        &self,
        note_id: &str,
        history_ids: &[NoteId],
    ) -> Result<(Note, Vec<Note>), ApiError> {
        let api = &self.api;
        let fetches = history_ids
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(note_id))
            .map(|id| api.note(id));

        let mut notes = try_join_all(fetches).await?;
        let Some(note) = notes.pop() else {
            return Err(ApiError::NotFound(note_id.to_string()));
        };
        Ok((note, notes))
    }

    // ------------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------------

    /// Keystroke in the search box. Queries shorter than the minimum never reach the service.
    pub fn set_query(&mut self, query: &str) {
        self.dispatch(Action::QueryChanged(query.to_string()));

        if self.state.search.is_active() {
            self.search.schedule(
                Arc::clone(&self.api),
                query.trim().to_string(),
                self.state.search.generation,
            );
        } else {
            self.search.cancel();
        }
    }

    pub fn clear_query(&mut self) {
        self.set_query("");
    }

    /// Apply any search outcome that has already arrived
    pub fn poll_search(&mut self) {
        while let Some(outcome) = self.search.try_next() {
            self.apply_search(outcome);
        }
    }

    /// Wait for the scheduled search, if any, and apply it
    pub async fn settle_search(&mut self) {
        while self.search.is_pending() {
            let Some(outcome) = self.search.next().await else {
                break;
            };
            let current = outcome.generation == self.state.search.generation;
            self.apply_search(outcome);
            if current {
                break;
            }
        }
        self.poll_search();
    }

    fn apply_search(&mut self, outcome: SearchOutcome) {
        self.dispatch(Action::SearchCompleted {
            generation: outcome.generation,
            result: outcome.result,
        });
    }
}
