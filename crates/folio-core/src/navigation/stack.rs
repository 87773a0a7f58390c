use crate::model::{Note, NoteId};

/// Notes visited on the way to the current one, oldest first.
///
/// Holds full snapshots so the "came from" trail can be shown without refetching.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteStack {
    notes: Vec<Note>,
}

impl NoteStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_notes(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    pub fn push(&mut self, note: Note) {
        self.notes.push(note);
    }

    pub fn clear(&mut self) {
        self.notes.clear();
    }

    pub fn ids(&self) -> Vec<NoteId> {
        self.notes.iter().map(|note| note.id.clone()).collect()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn last(&self) -> Option<&Note> {
        self.notes.last()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
