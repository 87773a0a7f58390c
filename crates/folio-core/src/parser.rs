use crate::model::Note;
use crate::utils::{display_path, slugify, word_count};
use pulldown_cmark::{Event, LinkType, Options, Parser, Tag};
use sha2::{Digest, Sha256};
use std::path::{Component, Path};

/// Category used for files sitting directly in the vault root
pub const DEFAULT_CATEGORY: &str = "General";

const TITLE_PREFIX: &str = "Notes - ";
const MAX_ID_LEN: usize = 100;
const TRUNCATED_ID_LEN: usize = 80;

/// Extract the targets of `[[target]]` / `[[target|alias]]` links, first-seen order, no duplicates.
///
/// Links inside code spans and fenced blocks are ignored. Anchors (`#section`) are stripped.
pub fn extract_wiki_links(text: &str) -> Vec<String> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_WIKILINKS);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut links: Vec<String> = Vec::new();

    for event in Parser::new_ext(text, options) {
        let Event::Start(Tag::Link {
            link_type: LinkType::WikiLink { .. },
            dest_url,
            ..
        }) = event
        else {
            continue;
        };

        // Obsidian order: [[target#anchor|alias]], pulldown reports the left side as dest
        let mut target = dest_url.trim().to_string();
        if let Some(pos) = target.find('#') {
            target.truncate(pos);
        }
        let target = target.trim().to_string();

        if !target.is_empty() && !links.contains(&target) {
            links.push(target);
        }
    }

    links
}

/// Count every wiki-link occurrence, duplicates included
pub fn wiki_link_occurrences(text: &str) -> usize {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_WIKILINKS);

    Parser::new_ext(text, options)
        .filter(|event| {
            matches!(
                event,
                Event::Start(Tag::Link {
                    link_type: LinkType::WikiLink { .. },
                    ..
                })
            )
        })
        .count()
}

/// Build a note from a vault-relative path and its content.
///
/// Returns `None` for blank files.
pub fn parse_note(relative_path: &Path, content: &str) -> Option<Note> {
    if content.trim().is_empty() {
        return None;
    }

    let title = note_title(relative_path);
    let category = category_of(relative_path);
    let book = book_of(relative_path);
    let id = note_id(&category, book.as_deref(), &title);

    Some(Note {
        id,
        title,
        content: content.to_string(),
        category,
        book,
        file_path: display_path(relative_path),
        links: extract_wiki_links(content),
        word_count: word_count(content),
        navigation: None,
    })
}

/// File stem with a leading "Notes - " removed
pub fn note_title(relative_path: &Path) -> String {
    let stem = relative_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    match stem.strip_prefix(TITLE_PREFIX) {
        Some(rest) => rest.to_string(),
        None => stem,
    }
}

fn folders(relative_path: &Path) -> Vec<String> {
    let Some(parent) = relative_path.parent() else {
        return vec![];
    };
    parent
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().to_string()),
            _ => None,
        })
        .collect()
}

/// Top-level folder, or "General" for root files
pub fn category_of(relative_path: &Path) -> String {
    folders(relative_path)
        .into_iter()
        .next()
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string())
}

/// Second-level folder, if the file is nested that deep
pub fn book_of(relative_path: &Path) -> Option<String> {
    folders(relative_path).into_iter().nth(1)
}

/// `category_book_title` slug, shortened with a digest suffix when longer than 100 chars
pub fn note_id(category: &str, book: Option<&str>, title: &str) -> String {
    let parts = [
        slugify(category),
        book.map(slugify).unwrap_or_default(),
        slugify(title),
    ];
    let slug = parts
        .iter()
        .filter(|part| !part.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("_");

    if slug.chars().count() <= MAX_ID_LEN {
        return slug;
    }

    let mut hasher = Sha256::new();
    hasher.update(slug.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    let head: String = slug.chars().take(TRUNCATED_ID_LEN).collect();
    format!("{}_{}", head, &digest[..8])
}
