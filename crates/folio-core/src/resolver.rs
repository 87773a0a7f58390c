//! Turning wiki-link text into a note id on the client side.

use crate::api::NotesApi;
use crate::error::ApiError;
use crate::model::{NoteId, NoteMetadata};

/// Best search hit for a link target.
///
/// 1. title equals the target (case-insensitive) inside the current book
/// 2. title equals the target anywhere
/// 3. the first hit in service order
pub fn pick_match<'r>(
    target: &str,
    current_book: Option<&str>,
    results: &'r [NoteMetadata],
) -> Option<&'r NoteMetadata> {
    let wanted = target.trim().to_lowercase();
    let title_matches = |hit: &&NoteMetadata| hit.title.to_lowercase() == wanted;

    results
        .iter()
        .filter(title_matches)
        .find(|hit| current_book.is_some() && hit.book.as_deref() == current_book)
        .or_else(|| results.iter().find(title_matches))
        .or_else(|| results.first())
}

/// Search for `target` and pick a note id; `Ok(None)` when nothing matches.
///
/// Targets shorter than `min_len` are never sent, the service would reject them.
pub async fn resolve_link(
    api: &dyn NotesApi,
    target: &str,
    current_book: Option<&str>,
    limit: usize,
    min_len: usize,
) -> Result<Option<NoteId>, ApiError> {
    if target.trim().chars().count() < min_len {
        log::info!("Link [[{}]] is too short to look up", target);
        return Ok(None);
    }

    let results = api.search(target, limit).await?;
    let picked = pick_match(target, current_book, &results).map(|hit| hit.id.clone());
    if picked.is_none() {
        log::info!("No note found for link [[{}]]", target);
    }
    Ok(picked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: &str, title: &str, book: Option<&str>) -> NoteMetadata {
        NoteMetadata {
            id: id.into(),
            title: title.into(),
            category: "Self-Help".into(),
            book: book.map(String::from),
            file_path: String::new(),
            word_count: 0,
        }
    }

    #[test]
    fn test_same_book_wins_over_service_order() {
        let results = vec![
            hit("other", "Habits", Some("Other Book")),
            hit("mine", "habits", Some("Atomic Habits")),
        ];
        let picked = pick_match("Habits", Some("Atomic Habits"), &results).unwrap();
        assert_eq!(picked.id, "mine");
    }

    #[test]
    fn test_exact_title_then_first() {
        let results = vec![
            hit("partial", "Habits of Mind", None),
            hit("exact", "Habits", Some("Other Book")),
        ];
        assert_eq!(pick_match("habits", Some("Atomic Habits"), &results).unwrap().id, "exact");
        assert_eq!(pick_match("habit", None, &results).unwrap().id, "partial");
        assert!(pick_match("habits", None, &[]).is_none());
    }
}
