use std::collections::{BTreeMap, BTreeSet};

use crate::model::{Note, NoteMetadata, NoteStats};

use super::Workspace;

/// Case-insensitive name comparison used for categories and books
pub(crate) fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl Workspace {
    pub fn note_by_id(&self, id: &str) -> Option<&Note> {
        self.by_id.get(id).map(|&idx| &self.notes[idx])
    }

    /// Case-insensitive substring search over title and content.
    ///
    /// Ranked: exact title, then title substring, then content-only matches;
    /// vault order within each rank.
    pub fn search(&self, query: &str) -> Vec<&Note> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return vec![];
        }

        let mut ranked: Vec<(u8, &Note)> = self
            .notes
            .iter()
            .filter_map(|note| {
                let title = note.title.to_lowercase();
                if title == needle {
                    Some((0, note))
                } else if title.contains(&needle) {
                    Some((1, note))
                } else if note.content.to_lowercase().contains(&needle) {
                    Some((2, note))
                } else {
                    None
                }
            })
            .collect();

        // Stable sort keeps vault order inside a rank
        ranked.sort_by_key(|(rank, _)| *rank);
        ranked.into_iter().map(|(_, note)| note).collect()
    }

    /// Notes filtered by category and/or book (both case-insensitive)
    pub fn filter(&self, category: Option<&str>, book: Option<&str>) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|note| category.map_or(true, |c| same_name(&note.category, c)))
            .filter(|note| {
                book.map_or(true, |b| note.book.as_deref().is_some_and(|nb| same_name(nb, b)))
            })
            .collect()
    }

    pub fn metadata(&self, category: Option<&str>, book: Option<&str>) -> Vec<NoteMetadata> {
        self.filter(category, book)
            .into_iter()
            .map(Note::metadata)
            .collect()
    }

    /// Notes of a book, matched case-insensitively
    pub fn book_notes(&self, book: &str) -> Vec<&Note> {
        self.filter(None, Some(book))
    }

    pub fn categories(&self) -> Vec<String> {
        self.notes
            .iter()
            .map(|note| note.category.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sorted book names, optionally limited to one category
    pub fn books(&self, category: Option<&str>) -> Vec<String> {
        self.filter(category, None)
            .into_iter()
            .filter_map(|note| note.book.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn statistics(&self) -> NoteStats {
        let mut categories: BTreeMap<String, usize> = BTreeMap::new();
        let mut books: BTreeMap<String, usize> = BTreeMap::new();
        let mut total_words = 0;

        for note in &self.notes {
            *categories.entry(note.category.clone()).or_default() += 1;
            if let Some(book) = &note.book {
                *books.entry(book.clone()).or_default() += 1;
            }
            total_words += note.word_count;
        }

        NoteStats {
            total_notes: self.notes.len(),
            categories,
            books,
            total_words,
            avg_words_per_note: total_words.checked_div(self.notes.len()).unwrap_or(0),
        }
    }
}
