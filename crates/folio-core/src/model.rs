use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque note identifier, stable across sessions
/// e.g. "science_sapiens_cognitive-revolution"
pub type NoteId = String;

/// Lightweight reference used by navigation contexts and flat book listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRef {
    pub id: NoteId,
    #[serde(default)]
    pub title: String,
}

/// A parsed vault note as served by `GET /api/notes/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub book: Option<String>,
    #[serde(default)]
    pub file_path: String,
    /// Outbound wiki-link targets, unresolved
    #[serde(default)]
    pub links: Vec<String>,
    #[serde(default)]
    pub word_count: usize,
    #[serde(default)]
    pub navigation: Option<NavigationContext>,
}

impl Note {
    pub fn metadata(&self) -> NoteMetadata {
        NoteMetadata {
            id: self.id.clone(),
            title: self.title.clone(),
            category: self.category.clone(),
            book: self.book.clone(),
            file_path: self.file_path.clone(),
            word_count: self.word_count,
        }
    }

    pub fn to_ref(&self) -> NoteRef {
        NoteRef {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }
}

/// Where a note sits inside its book's tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationContext {
    /// Root first, the note itself last
    pub breadcrumbs: Vec<NoteRef>,
    pub siblings: Vec<NoteRef>,
    pub children: Vec<NoteRef>,
    #[serde(default)]
    pub parent: Option<NoteRef>,
    pub is_leaf: bool,
    pub depth: u32,
}

/// Note without content, as returned by listings and search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteMetadata {
    pub id: NoteId,
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub book: Option<String>,
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub word_count: usize,
}

/// Recursive node of a book's note tree.
/// Depth increases by exactly one from parent to child.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteTree {
    pub id: NoteId,
    pub title: String,
    pub file_path: String,
    pub depth: u32,
    pub is_root: bool,
    pub is_leaf: bool,
    pub child_count: usize,
    pub links: Vec<String>,
    pub children: Vec<NoteTree>,
}

impl NoteTree {
    /// Depth-first search for a node by id
    pub fn find(&self, id: &str) -> Option<&NoteTree> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Path of nodes from this node down to `id`, inclusive on both ends
    pub fn path_to(&self, id: &str) -> Option<Vec<&NoteTree>> {
        if self.id == id {
            return Some(vec![self]);
        }
        for child in &self.children {
            if let Some(mut path) = child.path_to(id) {
                path.insert(0, self);
                return Some(path);
            }
        }
        None
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(NoteTree::node_count).sum::<usize>()
    }

    pub fn to_ref(&self) -> NoteRef {
        NoteRef {
            id: self.id.clone(),
            title: self.title.clone(),
        }
    }
}

/// Category name -> category data
pub type VaultStructure = BTreeMap<String, CategoryData>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryData {
    pub note_count: usize,
    pub book_count: usize,
    pub books: BTreeMap<String, BookData>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookData {
    #[serde(default)]
    pub note_count: usize,
    #[serde(default)]
    pub has_tree: Option<bool>,
    #[serde(default)]
    pub trees: Vec<NoteTree>,
    /// Flat listing used when the book has no tree
    #[serde(default)]
    pub notes: Vec<NoteRef>,
}

impl BookData {
    pub fn has_tree(&self) -> bool {
        self.has_tree.unwrap_or(!self.trees.is_empty())
    }

    /// Note shown when the book is opened: first root tree note, else first flat note
    pub fn entry_note(&self) -> Option<&NoteId> {
        self.trees
            .first()
            .map(|tree| &tree.id)
            .or_else(|| self.notes.first().map(|note| &note.id))
    }
}

/// Response of `GET /api/notes/tree/{book}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookTree {
    pub book: String,
    pub has_tree: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree: Option<NoteTree>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<NoteRef>>,
}

impl BookTree {
    pub fn entry_note(&self) -> Option<&NoteId> {
        self.tree.as_ref().map(|tree| &tree.id).or_else(|| {
            self.notes
                .as_ref()
                .and_then(|notes| notes.first())
                .map(|note| &note.id)
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteStats {
    pub total_notes: usize,
    pub categories: BTreeMap<String, usize>,
    pub books: BTreeMap<String, usize>,
    pub total_words: usize,
    pub avg_words_per_note: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub source: String,
    #[serde(default)]
    pub book: Option<String>,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactReceipt {
    pub success: bool,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_accepts_sparse_json() {
        let json = r#"{ "Science": { "book_count": 1, "books": { "Sapiens": {
            "note_count": 3,
            "trees": [{ "id": "root", "children": [{ "id": "c1" }, { "id": "c2" }] }]
        } } } }"#;
        let structure: VaultStructure = serde_json::from_str(json).unwrap();

        let book = &structure["Science"].books["Sapiens"];
        assert!(book.has_tree());
        assert_eq!(book.entry_note().map(String::as_str), Some("root"));
        assert_eq!(book.trees[0].children.len(), 2);
    }

    #[test]
    fn test_tree_path_to() {
        let tree = NoteTree {
            id: "root".into(),
            children: vec![NoteTree {
                id: "a".into(),
                depth: 1,
                children: vec![NoteTree {
                    id: "b".into(),
                    depth: 2,
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        };

        let path: Vec<&str> = tree
            .path_to("b")
            .unwrap()
            .iter()
            .map(|n| n.id.as_str())
            .collect();
        assert_eq!(path, vec!["root", "a", "b"]);
        assert!(tree.path_to("missing").is_none());
        assert_eq!(tree.node_count(), 3);
    }

    #[test]
    fn test_flat_book_entry_note() {
        let book = BookData {
            note_count: 2,
            has_tree: Some(false),
            trees: vec![],
            notes: vec![NoteRef {
                id: "first".into(),
                title: "First".into(),
            }],
        };
        assert!(!book.has_tree());
        assert_eq!(book.entry_note().map(String::as_str), Some("first"));
    }
}
