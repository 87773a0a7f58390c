use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use crate::model::{
    BookData, BookTree, CategoryData, NavigationContext, Note, NoteTree, VaultStructure,
};
use crate::parser::wiki_link_occurrences;

use super::queries::same_name;
use super::Workspace;

const ROOT_MAX_CONTENT_CHARS: usize = 1000;
const ROOT_MIN_LINKS: usize = 2;
const ATTACHMENT_DIRS: [&str; 3] = ["files", "zfiles", "file"];

/// Whether a note is a book's table of contents.
///
/// The filename must mention "notes", must not live in an attachment folder, and the
/// note must either be a short link hub or be named like "Notes - ..." / "A ...".
pub fn is_root_note(note: &Note) -> bool {
    let path = Path::new(&note.file_path);
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let parent_dir = path
        .parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    if !filename.contains("notes") {
        return false;
    }
    if ATTACHMENT_DIRS.contains(&parent_dir.as_str()) {
        return false;
    }

    let short_hub = wiki_link_occurrences(&note.content) >= ROOT_MIN_LINKS
        && note.content.chars().count() < ROOT_MAX_CONTENT_CHARS;
    short_hub
        || filename.starts_with("notes ")
        || filename.starts_with("notes-")
        || filename.starts_with("a ")
}

pub fn find_root_notes<'n>(notes: &[&'n Note]) -> Vec<&'n Note> {
    notes.iter().copied().filter(|note| is_root_note(note)).collect()
}

/// Builds note trees by following wiki-links from root notes.
pub struct TreeBuilder<'a> {
    workspace: &'a Workspace,
    by_title: HashMap<&'a str, Vec<&'a Note>>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(workspace: &'a Workspace) -> Self {
        let mut by_title: HashMap<&'a str, Vec<&'a Note>> = HashMap::new();
        for note in workspace.all_notes() {
            by_title.entry(note.title.as_str()).or_default().push(note);
        }
        Self {
            workspace,
            by_title,
        }
    }

    /// Resolve `[[link]]` text written in `source` to a note.
    ///
    /// 1. exact title anywhere, same book preferred
    /// 2. case-insensitive title within the source's category
    /// 3. title containing the link text within the source's category
    pub fn find_note_by_link_text(&self, link_text: &str, source: &Note) -> Option<&'a Note> {
        let link = link_text.trim();
        let link_lower = link.to_lowercase();

        if let Some(candidates) = self.by_title.get(link) {
            let same_book = candidates
                .iter()
                .find(|note| note.book.is_some() && note.book == source.book);
            if let Some(note) = same_book.or_else(|| candidates.first()) {
                return Some(note);
            }
        }

        let in_category = || {
            self.workspace
                .all_notes()
                .iter()
                .filter(|note| note.category == source.category)
        };

        if let Some(note) = in_category().find(|note| note.title.to_lowercase() == link_lower) {
            return Some(note);
        }

        in_category().find(|note| note.title.to_lowercase().contains(&link_lower))
    }

    /// Depth-first tree from `root`; a note appears at most once per tree
    pub fn build_tree(&self, root: &Note) -> NoteTree {
        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(root.id.as_str());

        let mut tree = Self::node(root, 0);
        tree.is_root = true;
        self.grow(&mut tree, root, &mut visited);
        tree
    }

    fn node(note: &Note, depth: u32) -> NoteTree {
        NoteTree {
            id: note.id.clone(),
            title: note.title.clone(),
            file_path: note.file_path.clone(),
            depth,
            is_root: false,
            is_leaf: false,
            child_count: 0,
            links: note.links.clone(),
            children: Vec::new(),
        }
    }

    fn grow(&self, parent: &mut NoteTree, parent_note: &'a Note, visited: &mut HashSet<&'a str>) {
        for link in &parent_note.links {
            let Some(child_note) = self.find_note_by_link_text(link, parent_note) else {
                continue;
            };
            if !visited.insert(child_note.id.as_str()) {
                continue;
            }

            let mut child = Self::node(child_note, parent.depth + 1);
            self.grow(&mut child, child_note, visited);
            parent.children.push(child);
        }

        parent.child_count = parent.children.len();
        parent.is_leaf = parent.children.is_empty();
    }

    /// Category -> book -> trees, the grid shown on the notes landing page
    pub fn build_category_structure(&self) -> VaultStructure {
        let mut grouped: BTreeMap<&str, Vec<&Note>> = BTreeMap::new();
        for note in self.workspace.all_notes() {
            grouped.entry(note.category.as_str()).or_default().push(note);
        }

        let mut structure = VaultStructure::new();
        for (category, notes) in grouped {
            let mut by_book: BTreeMap<&str, Vec<&Note>> = BTreeMap::new();
            for note in &notes {
                if let Some(book) = note.book.as_deref() {
                    by_book.entry(book).or_default().push(note);
                }
            }

            let books: BTreeMap<String, BookData> = by_book
                .into_iter()
                .map(|(book, book_notes)| (book.to_string(), self.book_data(&book_notes)))
                .collect();

            structure.insert(
                category.to_string(),
                CategoryData {
                    note_count: notes.len(),
                    book_count: books.len(),
                    books,
                },
            );
        }

        structure
    }

    fn book_data(&self, book_notes: &[&Note]) -> BookData {
        let trees: Vec<NoteTree> = find_root_notes(book_notes)
            .into_iter()
            .map(|root| self.build_tree(root))
            .collect();
        let has_tree = !trees.is_empty();
        let notes = if has_tree {
            vec![]
        } else {
            book_notes.iter().map(|note| note.to_ref()).collect()
        };

        BookData {
            note_count: book_notes.len(),
            has_tree: Some(has_tree),
            trees,
            notes,
        }
    }

    /// Tree of the book's first root note, or its flat note list.
    /// `None` when no note belongs to the book.
    pub fn book_tree(&self, book: &str) -> Option<BookTree> {
        let book_notes = self.workspace.book_notes(book);
        if book_notes.is_empty() {
            return None;
        }

        let roots = find_root_notes(&book_notes);
        let Some(root) = roots.first() else {
            return Some(BookTree {
                book: book.to_string(),
                has_tree: false,
                tree: None,
                notes: Some(book_notes.iter().map(|note| note.to_ref()).collect()),
            });
        };

        Some(BookTree {
            book: book.to_string(),
            has_tree: true,
            tree: Some(self.build_tree(root)),
            notes: None,
        })
    }

    /// Position of `note` in the first of its book's trees that contains it
    pub fn navigation_context(&self, note: &Note) -> Option<NavigationContext> {
        let book = note.book.as_deref()?;
        let book_notes: Vec<&Note> = self
            .workspace
            .all_notes()
            .iter()
            .filter(|candidate| candidate.book.as_deref().is_some_and(|b| same_name(b, book)))
            .collect();

        find_root_notes(&book_notes).into_iter().find_map(|root| {
            let tree = self.build_tree(root);
            context_in_tree(&tree, &note.id)
        })
    }
}

fn context_in_tree(tree: &NoteTree, id: &str) -> Option<NavigationContext> {
    let path = tree.path_to(id)?;
    let node = *path.last()?;
    let parent = path.len().checked_sub(2).map(|idx| path[idx]);

    let siblings = parent
        .map(|p| {
            p.children
                .iter()
                .filter(|child| child.id != node.id)
                .map(NoteTree::to_ref)
                .collect()
        })
        .unwrap_or_default();

    Some(NavigationContext {
        breadcrumbs: path.iter().map(|n| n.to_ref()).collect(),
        siblings,
        children: node.children.iter().map(NoteTree::to_ref).collect(),
        parent: parent.map(NoteTree::to_ref),
        is_leaf: node.children.is_empty(),
        depth: node.depth,
    })
}
