use super::Inline;

const LINK_OPEN: &str = "[[";
const LINK_CLOSE: &str = "]]";

/// Parse one line of text into inline units.
///
/// Stage 1 cuts out wiki-links. Stage 2 runs over the text between links only:
/// bold, then italic, then inline code, each pass seeing just the plain text the
/// previous pass left behind.
pub fn parse_inline(text: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    for piece in extract_links(text) {
        match piece {
            Inline::Text(plain) => out.extend(style(&plain)),
            link => out.push(link),
        }
    }
    merge_text(out)
}

fn extract_links(text: &str) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while let Some(open) = rest.find(LINK_OPEN) {
        let after_open = &rest[open + LINK_OPEN.len()..];
        let Some(close) = after_open.find(LINK_CLOSE) else {
            break;
        };

        let inner = &after_open[..close];
        let Some(link) = wiki_link(inner) else {
            plain.push_str(&rest[..open + LINK_OPEN.len()]);
            rest = after_open;
            continue;
        };

        plain.push_str(&rest[..open]);
        if !plain.is_empty() {
            out.push(Inline::Text(std::mem::take(&mut plain)));
        }
        out.push(link);
        rest = &after_open[close + LINK_CLOSE.len()..];
    }

    plain.push_str(rest);
    if !plain.is_empty() {
        out.push(Inline::Text(plain));
    }
    out
}

/// `target`, `target#heading` or either with `|alias`.
///
/// The heading anchor is dropped from the target but kept in the fallback display.
fn wiki_link(inner: &str) -> Option<Inline> {
    if inner.is_empty() || inner.contains(']') {
        return None;
    }

    let (raw, alias) = match inner.split_once('|') {
        Some((raw, alias)) => (raw.trim(), Some(alias.trim())),
        None => (inner.trim(), None),
    };
    let target = match raw.split_once('#') {
        Some((note, _anchor)) => note.trim(),
        None => raw,
    };
    if target.is_empty() {
        return None;
    }

    let display = match alias {
        Some(alias) if !alias.is_empty() => alias,
        _ => raw,
    };
    Some(Inline::WikiLink {
        target: target.to_string(),
        display: display.to_string(),
    })
}

fn style(text: &str) -> Vec<Inline> {
    let passes: [(&str, fn(String) -> Inline); 3] = [
        ("**", Inline::Bold),
        ("*", Inline::Italic),
        ("`", Inline::Code),
    ];

    let mut pieces = vec![Inline::Text(text.to_string())];
    for (delimiter, wrap) in passes {
        pieces = pieces
            .into_iter()
            .flat_map(|piece| match piece {
                Inline::Text(plain) => split_delimited(&plain, delimiter, wrap),
                other => vec![other],
            })
            .collect();
    }
    pieces
}

/// Wrap every `<d>text<d>` run (non-empty, shortest match) and keep the rest as text
fn split_delimited(text: &str, delimiter: &str, wrap: fn(String) -> Inline) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut plain = String::new();
    let mut rest = text;

    while let Some(open) = rest.find(delimiter) {
        let after_open = &rest[open + delimiter.len()..];
        // At least one character between the delimiters
        let Some(first) = after_open.chars().next() else {
            break;
        };
        let Some(close) = after_open[first.len_utf8()..]
            .find(delimiter)
            .map(|idx| idx + first.len_utf8())
        else {
            break;
        };

        plain.push_str(&rest[..open]);
        if !plain.is_empty() {
            out.push(Inline::Text(std::mem::take(&mut plain)));
        }
        out.push(wrap(after_open[..close].to_string()));
        rest = &after_open[close + delimiter.len()..];
    }

    plain.push_str(rest);
    if !plain.is_empty() {
        out.push(Inline::Text(plain));
    }
    out
}

fn merge_text(pieces: Vec<Inline>) -> Vec<Inline> {
    let mut out: Vec<Inline> = Vec::with_capacity(pieces.len());
    for piece in pieces {
        match (out.last_mut(), piece) {
            (Some(Inline::Text(prev)), Inline::Text(next)) => prev.push_str(&next),
            (_, piece) => out.push(piece),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    fn link(target: &str, display: &str) -> Inline {
        Inline::WikiLink {
            target: target.to_string(),
            display: display.to_string(),
        }
    }

    #[test]
    fn test_links_with_and_without_alias() {
        assert_eq!(
            parse_inline("Read [[Atomic Habits|this book]] and [[Deep Work]]."),
            vec![
                text("Read "),
                link("Atomic Habits", "this book"),
                text(" and "),
                link("Deep Work", "Deep Work"),
                text("."),
            ]
        );
    }

    #[test]
    fn test_heading_anchor_is_not_part_of_target() {
        assert_eq!(
            parse_inline("See [[Sapiens#Cognitive Revolution]] and [[Sapiens#Fiction|myths]]."),
            vec![
                text("See "),
                link("Sapiens", "Sapiens#Cognitive Revolution"),
                text(" and "),
                link("Sapiens", "myths"),
                text("."),
            ]
        );
        assert_eq!(parse_inline("[[#Only a heading]]"), vec![text("[[#Only a heading]]")]);
    }

    #[test]
    fn test_blank_alias_falls_back_to_target() {
        assert_eq!(parse_inline("[[Ego| ]]"), vec![link("Ego", "Ego")]);
    }

    #[test]
    fn test_emphasis_does_not_break_link_boundaries() {
        assert_eq!(
            parse_inline("**bold** [[a*b*c]] *it*"),
            vec![
                Inline::Bold("bold".into()),
                text(" "),
                link("a*b*c", "a*b*c"),
                text(" "),
                Inline::Italic("it".into()),
            ]
        );
    }

    #[test]
    fn test_styles_in_fixed_order() {
        assert_eq!(
            parse_inline("a **b** *c* `d`"),
            vec![
                text("a "),
                Inline::Bold("b".into()),
                text(" "),
                Inline::Italic("c".into()),
                text(" "),
                Inline::Code("d".into()),
            ]
        );
    }

    #[test]
    fn test_unmatched_delimiters_stay_literal() {
        assert_eq!(parse_inline("2 * 3 = 6 and [[open"), vec![text("2 * 3 = 6 and [[open")]);
        assert_eq!(parse_inline("[[]] ** `"), vec![text("[[]] ** `")]);
    }
}
