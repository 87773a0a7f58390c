//! Plain-text rendering of the browser state.
//!
//! Everything the user can act on gets a number; the REPL maps the number back
//! through [`Screen::choice`].

use std::fmt::Write;

use folio_core::model::{Note, NoteId};
use folio_core::navigation::{BrowserState, Notice, Panel};
use folio_core::render::{render, Block, Inline};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Category(String),
    Book(String),
    /// Child in the current note's tree
    Child(NoteId),
    /// `[[target]]` inside the note text
    Link(String),
    SearchResult(NoteId),
}

#[derive(Debug, Default)]
pub struct Screen {
    pub text: String,
    pub choices: Vec<Choice>,
}

impl Screen {
    /// 1-based, as printed
    pub fn choice(&self, number: usize) -> Option<&Choice> {
        number.checked_sub(1).and_then(|i| self.choices.get(i))
    }

    fn line(&mut self, text: impl AsRef<str>) {
        self.text.push_str(text.as_ref());
        self.text.push('\n');
    }

    fn numbered(&mut self, choice: Choice, label: impl AsRef<str>) {
        self.choices.push(choice);
        let n = self.choices.len();
        self.line(format!("  [{}] {}", n, label.as_ref()));
    }
}

pub fn screen(state: &BrowserState) -> Screen {
    let mut screen = Screen::default();

    match &state.notice {
        Some(Notice::NotFound(message)) | Some(Notice::Error(message)) => {
            screen.line(format!("! {}", message));
            screen.line("");
        }
        None => {}
    }

    match state.panel() {
        Panel::Search => search_panel(&mut screen, state),
        Panel::Categories => categories_panel(&mut screen, state),
        Panel::Books => books_panel(&mut screen, state),
        Panel::Note => note_panel(&mut screen, state),
    }
    screen
}

fn search_panel(screen: &mut Screen, state: &BrowserState) {
    screen.line(format!("Search: {}", state.search.query.trim()));
    if state.search.searching {
        screen.line("  searching...");
    } else if state.search.results.is_empty() {
        screen.line("  no matching notes");
    }
    for result in &state.search.results {
        let place = match &result.book {
            Some(book) => format!("{} / {}", result.category, book),
            None => result.category.clone(),
        };
        screen.numbered(
            Choice::SearchResult(result.id.clone()),
            format!("{}  ({})", result.title, place),
        );
    }
}

fn categories_panel(screen: &mut Screen, state: &BrowserState) {
    let Some(structure) = &state.structure else {
        if state.loading_structure {
            screen.line("Loading vault...");
        } else {
            screen.line("Vault unavailable. Type 'r' to retry.");
        }
        return;
    };

    screen.line("Categories");
    if structure.is_empty() {
        screen.line("  (empty vault)");
    }
    for (name, data) in structure.iter() {
        screen.numbered(
            Choice::Category(name.clone()),
            format!("{}  ({} books, {} notes)", name, data.book_count, data.note_count),
        );
    }
}

fn books_panel(screen: &mut Screen, state: &BrowserState) {
    let Some(category) = state.selected_category.as_deref() else {
        return;
    };
    screen.line(category);

    let books = state
        .structure
        .as_ref()
        .and_then(|structure| structure.get(category));
    let Some(data) = books else {
        screen.line("  (no books)");
        return;
    };
    for (name, book) in &data.books {
        screen.numbered(
            Choice::Book(name.clone()),
            format!("{}  ({} notes)", name, book.note_count),
        );
    }
}

fn note_panel(screen: &mut Screen, state: &BrowserState) {
    let Some(note) = &state.current_note else {
        if state.loading_note {
            screen.line("Loading note...");
        }
        return;
    };

    let mut path: Vec<&str> = state.stack.notes().iter().map(|n| n.title.as_str()).collect();
    path.push(&note.title);
    screen.line(path.join(" > "));
    screen.line("");

    note_body(screen, note);

    let children = note
        .navigation
        .as_ref()
        .map(|nav| nav.children.as_slice())
        .unwrap_or_default();
    if !children.is_empty() {
        screen.line("");
        screen.line("Continue reading");
        for child in children {
            screen.numbered(Choice::Child(child.id.clone()), &child.title);
        }
    }
}

fn note_body(screen: &mut Screen, note: &Note) {
    let mut number = 0;
    for block in render(&note.content) {
        if !matches!(block, Block::Numbered { .. }) {
            number = 0;
        }
        let text = match &block {
            Block::Heading { level, content } => {
                let title = inline_text(screen, content);
                match level {
                    1 => format!("{}\n{}", title, "=".repeat(title.chars().count())),
                    2 => format!("{}\n{}", title, "-".repeat(title.chars().count())),
                    _ => format!("### {}", title),
                }
            }
            Block::Quote { content } => format!("  | {}", inline_text(screen, content)),
            Block::Bullet { content } => format!("  - {}", inline_text(screen, content)),
            Block::Numbered { content } => {
                number += 1;
                format!("  {}. {}", number, inline_text(screen, content))
            }
            Block::Paragraph { content } => inline_text(screen, content),
            Block::Code { text, .. } => text
                .lines()
                .map(|line| format!("    {}", line))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::Spacer => String::new(),
        };
        screen.line(text);
    }
}

/// Wiki-links become numbered choices in reading order
fn inline_text(screen: &mut Screen, inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(text) => out.push_str(text),
            Inline::Bold(text) => {
                let _ = write!(out, "**{}**", text);
            }
            Inline::Italic(text) => {
                let _ = write!(out, "_{}_", text);
            }
            Inline::Code(text) => {
                let _ = write!(out, "`{}`", text);
            }
            Inline::WikiLink { target, display } => {
                screen.choices.push(Choice::Link(target.clone()));
                let _ = write!(out, "{}[{}]", display, screen.choices.len());
            }
        }
    }
    out
}
