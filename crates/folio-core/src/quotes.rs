//! Quote extraction for the "random quote" feature.

use std::sync::LazyLock;

use rand::seq::SliceRandom;
use regex::Regex;

use crate::model::{Note, Quote};
use crate::workspace::Workspace;

const MIN_QUOTE_CHARS: usize = 30;
const MAX_QUOTE_CHARS: usize = 500;

static BLOCKQUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^>\s*(.+)$").expect("valid blockquote regex"));
static DOUBLE_QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]{20,200})""#).expect("valid double-quote regex"));
static SINGLE_QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"'([^']{20,200})'").expect("valid single-quote regex"));

/// Quote-worthy passages of one note: blockquote lines, then double-quoted runs,
/// then single-quoted runs.
pub fn extract_quotes(note: &Note) -> Vec<Quote> {
    let patterns: [&Regex; 3] = [&BLOCKQUOTE_RE, &DOUBLE_QUOTED_RE, &SINGLE_QUOTED_RE];

    patterns
        .iter()
        .flat_map(|re| re.captures_iter(&note.content))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|text| is_quotable(text))
        .map(|text| Quote {
            text: text.to_string(),
            source: note.title.clone(),
            book: note.book.clone(),
            category: note.category.clone(),
        })
        .collect()
}

fn is_quotable(text: &str) -> bool {
    let len = text.chars().count();
    if !(MIN_QUOTE_CHARS..=MAX_QUOTE_CHARS).contains(&len) {
        return false;
    }
    !(text.starts_with("http") || text.contains("```") || text.contains("[["))
}

pub fn extract_all(workspace: &Workspace) -> Vec<Quote> {
    let quotes: Vec<Quote> = workspace.all_notes().iter().flat_map(extract_quotes).collect();
    log::info!(
        "Extracted {} quotes from {} notes",
        quotes.len(),
        workspace.len()
    );
    quotes
}

/// Quotes whose category matches case-insensitively; all quotes when `category` is `None`
pub fn in_category<'q>(quotes: &'q [Quote], category: Option<&str>) -> Vec<&'q Quote> {
    let wanted = category.map(str::to_lowercase);
    quotes
        .iter()
        .filter(|quote| {
            wanted
                .as_deref()
                .map_or(true, |c| quote.category.to_lowercase() == c)
        })
        .collect()
}

pub fn categories(quotes: &[Quote]) -> Vec<String> {
    let mut names: Vec<String> = quotes.iter().map(|q| q.category.clone()).collect();
    names.sort();
    names.dedup();
    names
}

pub fn pick_random(quotes: &[Quote], category: Option<&str>) -> Option<Quote> {
    in_category(quotes, category)
        .choose(&mut rand::thread_rng())
        .map(|quote| (*quote).clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_note;
    use std::path::Path;

    fn note(path: &str, content: &str) -> Note {
        parse_note(Path::new(path), content).unwrap()
    }

    #[test]
    fn test_extracts_each_pattern() {
        let n = note(
            "Spiritual/A New Earth/Presence.md",
            "> You are not your thoughts, you are the awareness behind them.\n\
             He said \"the present moment is all you ever have, truly\" once.\n\
             And 'stillness speaks louder than any words could ever manage' too.",
        );
        let quotes = extract_quotes(&n);

        assert_eq!(quotes.len(), 3);
        assert_eq!(
            quotes[0].text,
            "You are not your thoughts, you are the awareness behind them."
        );
        assert_eq!(quotes[1].text, "the present moment is all you ever have, truly");
        assert_eq!(quotes[0].source, "Presence");
        assert_eq!(quotes[0].book.as_deref(), Some("A New Earth"));
        assert_eq!(quotes[0].category, "Spiritual");
    }

    #[test]
    fn test_filters_short_links_and_urls() {
        let n = note(
            "Science/Sapiens/x.md",
            "> too short\n\
             > https://example.com/a/very/long/link/that/goes/on/forever\n\
             > this line references [[Another Note]] and is long enough",
        );
        assert!(extract_quotes(&n).is_empty());
    }

    #[test]
    fn test_random_respects_category() {
        let quotes = vec![
            Quote {
                text: "a".repeat(40),
                source: "s".into(),
                book: None,
                category: "Science".into(),
            },
            Quote {
                text: "b".repeat(40),
                source: "s".into(),
                book: None,
                category: "Spiritual".into(),
            },
        ];

        for _ in 0..10 {
            let picked = pick_random(&quotes, Some("science")).unwrap();
            assert_eq!(picked.category, "Science");
        }
        assert!(pick_random(&quotes, Some("Poetry")).is_none());
        assert!(pick_random(&[], None).is_none());
        assert_eq!(categories(&quotes), vec!["Science", "Spiritual"]);
    }
}
