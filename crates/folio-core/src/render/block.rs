/// What a single line of note text is, before inline parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// ```` ``` ```` with the text after it (language tag on an opening fence)
    Fence(&'a str),
    Heading(u8, &'a str),
    Quote(&'a str),
    Bullet(&'a str),
    Numbered(&'a str),
    Blank,
    Paragraph(&'a str),
}

const FENCE: &str = "```";

/// Classify a line outside a code block. Checks run in precedence order.
pub fn classify(line: &str) -> LineKind<'_> {
    if let Some(info) = fence(line) {
        return LineKind::Fence(info);
    }

    for (level, prefix) in [(3, "### "), (2, "## "), (1, "# ")] {
        if let Some(rest) = line.strip_prefix(prefix) {
            return LineKind::Heading(level, rest);
        }
    }

    if let Some(rest) = line.strip_prefix("> ") {
        return LineKind::Quote(rest);
    }

    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return LineKind::Bullet(rest);
    }

    if let Some(rest) = numbered(line) {
        return LineKind::Numbered(rest);
    }

    if line.trim().is_empty() {
        return LineKind::Blank;
    }

    LineKind::Paragraph(line)
}

/// Info string of a fence line, `None` when the line is not a fence
pub fn fence(line: &str) -> Option<&str> {
    line.trim_start().strip_prefix(FENCE).map(str::trim)
}

/// Text after `12. `
fn numbered(line: &str) -> Option<&str> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix(". ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        assert_eq!(classify("```rust"), LineKind::Fence("rust"));
        assert_eq!(classify("  ```"), LineKind::Fence(""));
        assert_eq!(classify("### Deep"), LineKind::Heading(3, "Deep"));
        assert_eq!(classify("# Top"), LineKind::Heading(1, "Top"));
        assert_eq!(classify("> said"), LineKind::Quote("said"));
        assert_eq!(classify("- item"), LineKind::Bullet("item"));
        assert_eq!(classify("* item"), LineKind::Bullet("item"));
        assert_eq!(classify("12. twelfth"), LineKind::Numbered("twelfth"));
        assert_eq!(classify("   "), LineKind::Blank);
    }

    #[test]
    fn test_near_misses_are_paragraphs() {
        for line in ["#### four", "#no space", "-dash", "1.no space", ">quote", "**bold**"] {
            assert_eq!(classify(line), LineKind::Paragraph(line), "{}", line);
        }
    }
}
