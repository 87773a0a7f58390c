use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::NotesApi;
use crate::error::ApiError;
use crate::model::NoteMetadata;

/// Result of one debounced search, tagged with the query generation that started it
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub generation: u64,
    pub query: String,
    pub result: Result<Vec<NoteMetadata>, ApiError>,
}

/// Fires a search `delay` after the last keystroke.
///
/// Scheduling again aborts the pending timer (and its request, if it already started).
/// Outcomes arrive on an internal channel and are drained with [`SearchDebouncer::try_next`]
/// or awaited with [`SearchDebouncer::next`].
pub struct SearchDebouncer {
    delay: Duration,
    limit: usize,
    pending: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<SearchOutcome>,
    rx: mpsc::UnboundedReceiver<SearchOutcome>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration, limit: usize) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            limit,
            pending: None,
            tx,
            rx,
        }
    }

    pub fn schedule(&mut self, api: Arc<dyn NotesApi>, query: String, generation: u64) {
        self.cancel();

        let delay = self.delay;
        let limit = self.limit;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            log::debug!("Searching for {:?} (generation {})", query, generation);
            let result = api.search(&query, limit).await;
            // Receiver gone means the browser was dropped
            let _ = tx.send(SearchOutcome {
                generation,
                query,
                result,
            });
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// Whether a scheduled search is still sleeping or waiting on the service
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub fn try_next(&mut self) -> Option<SearchOutcome> {
        self.rx.try_recv().ok()
    }

    pub async fn next(&mut self) -> Option<SearchOutcome> {
        self.rx.recv().await
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
