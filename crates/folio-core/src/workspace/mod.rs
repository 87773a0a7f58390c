use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::model::Note;

mod hierarchy;
mod indexer;
mod queries;
mod vault;


pub use hierarchy::{is_root_note, TreeBuilder};
pub use indexer::{Indexer, IndexingStats};
pub use vault::Vault;

/// Immutable snapshot of every parsed note in a vault, in path order.
///
/// Built by the [`Indexer`]; cached and handed out as `Arc<Workspace>` by the [`Vault`].
#[derive(Debug, Default, Clone)]
pub struct Workspace {
    notes: Vec<Note>,
    by_id: HashMap<String, usize>,
}

impl Workspace {
    pub fn new(notes: Vec<Note>) -> Self {
        let mut by_id = HashMap::with_capacity(notes.len());
        for (idx, note) in notes.iter().enumerate() {
            match by_id.entry(note.id.clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(idx);
                }
                Entry::Occupied(entry) => {
                    let kept: &Note = &notes[*entry.get()];
                    log::warn!(
                        "Note id {} collides: keeping {}, {} is unreachable by id",
                        note.id,
                        kept.file_path,
                        note.file_path
                    );
                }
            }
        }
        Self { notes, by_id }
    }

    pub fn all_notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
