pub mod id;
pub mod time;

use std::path::Path;

/// Render a vault-relative path with forward slashes.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use folio_core::utils::display_path;
///
/// assert_eq!(display_path(Path::new("Science/Sapiens/Notes.md")), "Science/Sapiens/Notes.md");
/// # if cfg!(windows) {
/// #     assert_eq!(display_path(Path::new("a\\b.md")), "a/b.md");
/// # }
/// ```
pub fn display_path(path: &Path) -> String {
    let mut s = path.to_string_lossy().to_string();
    if std::path::MAIN_SEPARATOR == '\\' {
        s = s.replace('\\', "/");
    }
    s
}

/// Convert text to a URL-safe slug.
///
/// Rules:
/// - Convert to lowercase
/// - Keep word characters (Unicode letters, digits, `_`), whitespace and hyphens
/// - Collapse every run of whitespace and hyphens into a single hyphen
/// - Trim leading/trailing hyphens
///
/// # Examples
///
/// ```
/// use folio_core::slugify;
///
/// assert_eq!(slugify("A New Earth"), "a-new-earth");
/// assert_eq!(slugify("Hello (World)!"), "hello-world");
/// assert_eq!(slugify("A  -  B"), "a-b");
/// assert_eq!(slugify("snake_case"), "snake_case");
/// assert_eq!(slugify("!!!"), "");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;

    for c in text.to_lowercase().chars() {
        if c.is_whitespace() || c == '-' {
            pending_dash = true;
        } else if c.is_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        }
    }

    slug
}

/// Whitespace-separated token count
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
