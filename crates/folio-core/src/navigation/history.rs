use super::NavigationState;

/// The host's session history (a browser's `history`, a terminal's own list).
pub trait HistoryPlatform {
    /// Add an entry after the current one, dropping any forward entries
    fn push_state(&mut self, state: NavigationState);

    /// Overwrite the current entry
    fn replace_state(&mut self, state: NavigationState);

    /// Step back; `None` when already at the first entry
    fn back(&mut self) -> Option<NavigationState>;

    fn forward(&mut self) -> Option<NavigationState>;

    fn current(&self) -> Option<&NavigationState>;
}

/// In-process history with a cursor
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    entries: Vec<NavigationState>,
    cursor: usize,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[NavigationState] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl HistoryPlatform for MemoryHistory {
    fn push_state(&mut self, state: NavigationState) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(state);
        self.cursor = self.entries.len() - 1;
    }

    fn replace_state(&mut self, state: NavigationState) {
        match self.entries.get_mut(self.cursor) {
            Some(entry) => *entry = state,
            None => self.push_state(state),
        }
    }

    fn back(&mut self) -> Option<NavigationState> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).cloned()
    }

    fn forward(&mut self) -> Option<NavigationState> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor).cloned()
    }

    fn current(&self) -> Option<&NavigationState> {
        self.entries.get(self.cursor)
    }
}

/// Mirrors navigation into a [`HistoryPlatform`].
///
/// The first recorded state replaces the platform's initial entry, so one "back" from a
/// fresh session leaves the notes section. Pushes are ignored while a restore runs.
#[derive(Debug)]
pub struct HistorySync<H> {
    platform: H,
    initialized: bool,
    restoring: bool,
}

impl<H: HistoryPlatform> HistorySync<H> {
    pub fn new(platform: H) -> Self {
        Self {
            platform,
            initialized: false,
            restoring: false,
        }
    }

    pub fn initialize(&mut self, state: NavigationState) {
        self.platform.replace_state(state);
        self.initialized = true;
    }

    pub fn push(&mut self, state: NavigationState) {
        if self.restoring {
            log::debug!("Skipping history push during restore");
            return;
        }
        if !self.initialized {
            self.initialize(state);
            return;
        }
        self.platform.push_state(state);
    }

    pub fn begin_restore(&mut self) {
        self.restoring = true;
    }

    pub fn end_restore(&mut self) {
        self.restoring = false;
    }

    pub fn is_restoring(&self) -> bool {
        self.restoring
    }

    pub fn back(&mut self) -> Option<NavigationState> {
        self.platform.back()
    }

    pub fn forward(&mut self) -> Option<NavigationState> {
        self.platform.forward()
    }

    pub fn platform(&self) -> &H {
        &self.platform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_drops_forward_entries() {
        let mut history = MemoryHistory::new();
        history.push_state(NavigationState::categories());
        history.push_state(NavigationState::books("Science"));
        history.push_state(NavigationState::books("Spiritual"));

        assert_eq!(history.back(), Some(NavigationState::books("Science")));
        history.push_state(NavigationState::books("Poetry"));

        assert_eq!(history.len(), 3);
        assert_eq!(history.forward(), None);
        assert_eq!(history.current(), Some(&NavigationState::books("Poetry")));
    }

    #[test]
    fn test_back_stops_at_first_entry() {
        let mut history = MemoryHistory::new();
        history.replace_state(NavigationState::categories());
        assert_eq!(history.back(), None);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_sync_replaces_first_then_pushes() {
        let mut sync = HistorySync::new(MemoryHistory::new());
        sync.initialize(NavigationState::categories());
        sync.initialize(NavigationState::categories());
        assert_eq!(sync.platform().len(), 1, "initial paint must not push");

        sync.push(NavigationState::books("Science"));
        assert_eq!(sync.platform().len(), 2);
    }

    #[test]
    fn test_sync_ignores_pushes_while_restoring() {
        let mut sync = HistorySync::new(MemoryHistory::new());
        sync.initialize(NavigationState::categories());

        sync.begin_restore();
        sync.push(NavigationState::books("Science"));
        sync.end_restore();
        assert_eq!(sync.platform().len(), 1);

        sync.push(NavigationState::books("Science"));
        assert_eq!(sync.platform().len(), 2);
    }
}
