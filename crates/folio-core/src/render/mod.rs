//! Renderer for the markdown subset used in vault notes.
//!
//! Only fenced code, `#`..`###` headings, `> ` quotes, bullet and numbered
//! items, blank lines and paragraphs are recognised. Inline: wiki-links, then
//! `**bold**`, `*italic*` and `` `code` ``. No nesting.

mod block;
mod inline;

pub use block::{classify, LineKind};
pub use inline::parse_inline;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Bold(String),
    Italic(String),
    Code(String),
    /// `[[target]]` or `[[target|display]]`
    WikiLink { target: String, display: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, content: Vec<Inline> },
    Quote { content: Vec<Inline> },
    Bullet { content: Vec<Inline> },
    /// The source number is dropped
    Numbered { content: Vec<Inline> },
    Paragraph { content: Vec<Inline> },
    Code { language: Option<String>, text: String },
    Spacer,
}

impl Inline {
    /// Text as it reads on screen
    pub fn plain_text(&self) -> &str {
        match self {
            Inline::Text(s) | Inline::Bold(s) | Inline::Italic(s) | Inline::Code(s) => s,
            Inline::WikiLink { display, .. } => display,
        }
    }
}

impl Block {
    pub fn inlines(&self) -> &[Inline] {
        match self {
            Block::Heading { content, .. }
            | Block::Quote { content }
            | Block::Bullet { content }
            | Block::Numbered { content }
            | Block::Paragraph { content } => content,
            Block::Code { .. } | Block::Spacer => &[],
        }
    }

    pub fn plain_text(&self) -> String {
        match self {
            Block::Code { text, .. } => text.clone(),
            Block::Spacer => String::new(),
            _ => self.inlines().iter().map(Inline::plain_text).collect(),
        }
    }
}

/// Render raw note text into blocks, one per line outside code fences.
///
/// A fence left open at the end of input still yields a code block holding
/// everything after it.
pub fn render(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut code: Option<(Option<String>, Vec<&str>)> = None;

    for line in text.lines() {
        if let Some((language, lines)) = code.as_mut() {
            if block::fence(line).is_some() {
                blocks.push(Block::Code {
                    language: language.take(),
                    text: lines.join("\n"),
                });
                code = None;
            } else {
                lines.push(line);
            }
            continue;
        }

        let block = match classify(line) {
            LineKind::Fence(info) => {
                let language = (!info.is_empty()).then(|| info.to_string());
                code = Some((language, Vec::new()));
                continue;
            }
            LineKind::Heading(level, rest) => Block::Heading {
                level,
                content: parse_inline(rest),
            },
            LineKind::Quote(rest) => Block::Quote {
                content: parse_inline(rest),
            },
            LineKind::Bullet(rest) => Block::Bullet {
                content: parse_inline(rest),
            },
            LineKind::Numbered(rest) => Block::Numbered {
                content: parse_inline(rest),
            },
            LineKind::Blank => Block::Spacer,
            LineKind::Paragraph(line) => Block::Paragraph {
                content: parse_inline(line),
            },
        };
        blocks.push(block);
    }

    if let Some((language, lines)) = code {
        log::debug!("Unterminated code fence, flushing {} lines", lines.len());
        blocks.push(Block::Code {
            language,
            text: lines.join("\n"),
        });
    }

    blocks
}

/// Every wiki-link in document order, duplicates included
pub fn wiki_links(blocks: &[Block]) -> Vec<(&str, &str)> {
    blocks
        .iter()
        .flat_map(Block::inlines)
        .filter_map(|inline| match inline {
            Inline::WikiLink { target, display } => Some((target.as_str(), display.as_str())),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_link_becomes_one_unit() {
        let text = "# [[Sapiens]]\n\
                    - [[Cognitive Revolution|the revolution]]\n\
                    > see [[Fiction]] and [[Fiction]]\n\
                    ```\n[[inside code]]\n```\n\
                    1. [[Gossip]] **bold**";
        let blocks = render(text);
        assert_eq!(
            wiki_links(&blocks),
            vec![
                ("Sapiens", "Sapiens"),
                ("Cognitive Revolution", "the revolution"),
                ("Fiction", "Fiction"),
                ("Fiction", "Fiction"),
                ("Gossip", "Gossip"),
            ]
        );
    }

    #[test]
    fn test_plain_text_is_identity() {
        let text = "Just some words\n\nacross a few lines, with punctuation!";
        let blocks = render(text);
        let lines: Vec<String> = blocks.iter().map(Block::plain_text).collect();
        assert_eq!(lines.join("\n"), text);
        assert_eq!(blocks[1], Block::Spacer);
    }

    #[test]
    fn test_code_block_is_verbatim() {
        let blocks = render("```rust\nlet x = **y**;\n# not a heading\n```\nafter");
        assert_eq!(
            blocks[0],
            Block::Code {
                language: Some("rust".into()),
                text: "let x = **y**;\n# not a heading".into(),
            }
        );
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_unterminated_fence_flushes_at_end() {
        let blocks = render("intro\n```\nline one\n- line two");
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[1],
            Block::Code {
                language: None,
                text: "line one\n- line two".into(),
            }
        );
    }

    #[test]
    fn test_numbered_items_keep_no_number() {
        let blocks = render("7. seventh");
        assert_eq!(
            blocks,
            vec![Block::Numbered {
                content: vec![Inline::Text("seventh".into())]
            }]
        );
    }
}
