use super::Workspace;
use crate::parser::parse_note;
use crate::vfs::FileSystem;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IndexingStats {
    pub total_files: usize,
    pub excluded: usize,
    pub empty: usize,
    pub failed: usize,
    pub parsed: usize,
}

/// Indexer responsible for orchestrating the indexing process.
/// It bridges I/O (FileSystem) and the Workspace snapshot.
pub struct Indexer<'a> {
    fs: &'a dyn FileSystem,
    root: &'a Path,
    exclude_patterns: &'a [String],
    stats: IndexingStats,
}

impl<'a> Indexer<'a> {
    pub fn new(fs: &'a dyn FileSystem, root: &'a Path, exclude_patterns: &'a [String]) -> Self {
        Self {
            fs,
            root,
            exclude_patterns,
            stats: IndexingStats::default(),
        }
    }

    /// Performs a full index of the vault.
    pub fn full_index(mut self) -> (Workspace, IndexingStats) {
        if !self.fs.is_dir(self.root) {
            log::error!("Vault path does not exist: {}", self.root.display());
            return (Workspace::default(), self.stats);
        }

        let files = self.fs.markdown_files(self.root);
        self.stats.total_files = files.len();
        log::info!("Found {} markdown files", files.len());

        let mut notes = Vec::with_capacity(files.len());
        for path in files {
            if self.is_excluded(&path) {
                self.stats.excluded += 1;
                continue;
            }
            if let Some(note) = self.index_file(&path) {
                notes.push(note);
            }
        }

        self.stats.parsed = notes.len();
        log::info!("Successfully parsed {} notes", notes.len());

        (Workspace::new(notes), self.stats)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let relative = self.relative(path);
        let text = relative.to_string_lossy();
        self.exclude_patterns
            .iter()
            .any(|pattern| text.contains(pattern.as_str()))
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }

    fn index_file(&mut self, path: &Path) -> Option<crate::model::Note> {
        let content = match self.fs.read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                log::error!("Failed to parse {}: {}", path.display(), e);
                self.stats.failed += 1;
                return None;
            }
        };

        let note = parse_note(&self.relative(path), &content);
        if note.is_none() {
            self.stats.empty += 1;
        }
        note
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vfs::MemoryFileSystem;

    #[test]
    fn test_full_index_counts_every_outcome() {
        let mut fs = MemoryFileSystem::new();
        fs.insert("/vault/Science/Sapiens/Sapiens.md", "# Sapiens\n\n[[Fiction]]");
        fs.insert("/vault/Science/Sapiens/Fiction.md", "Shared myths.");
        fs.insert("/vault/Science/Sapiens/Blank.md", "  \n");
        fs.insert("/vault/templates/Daily.md", "# {{date}}");
        fs.insert_unreadable("/vault/Science/Locked.md");

        let patterns = vec!["templates".to_string()];
        let (workspace, stats) =
            Indexer::new(&fs, Path::new("/vault"), &patterns).full_index();

        assert_eq!(
            stats,
            IndexingStats {
                total_files: 5,
                excluded: 1,
                empty: 1,
                failed: 1,
                parsed: 2,
            }
        );
        assert_eq!(workspace.len(), 2);
    }

    #[test]
    fn test_exclusion_matches_relative_path_only() {
        let mut fs = MemoryFileSystem::new();
        // The vault itself lives under a directory named like a pattern
        fs.insert("/home/Archive/vault/Ideas/Note.md", "Kept.");

        let patterns = vec!["Archive".to_string()];
        let (workspace, stats) =
            Indexer::new(&fs, Path::new("/home/Archive/vault"), &patterns).full_index();

        assert_eq!(stats.excluded, 0);
        assert_eq!(workspace.len(), 1);
    }

    #[test]
    fn test_missing_root_yields_empty_workspace() {
        let fs = MemoryFileSystem::new();
        let (workspace, stats) = Indexer::new(&fs, Path::new("/nowhere"), &[]).full_index();
        assert!(workspace.is_empty());
        assert_eq!(stats, IndexingStats::default());
    }
}
