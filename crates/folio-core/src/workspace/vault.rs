use super::{Indexer, TreeBuilder, Workspace};
use crate::cache::{CacheStats, TtlCache};
use crate::config::FolioConfig;
use crate::error::ApiError;
use crate::model::{BookTree, Note, NoteMetadata, NoteStats, Quote, VaultStructure};
use crate::quotes;
use crate::vfs::{FileSystem, PhysicalFileSystem};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

const NOTES_KEY: &str = "all_notes";
const STRUCTURE_KEY: &str = "full_structure";
const QUOTES_KEY: &str = "all_quotes";

pub const MIN_QUERY_LEN: usize = 2;
pub const DEFAULT_SEARCH_LIMIT: usize = 20;
pub const MAX_SEARCH_LIMIT: usize = 50;

/// The Vault is the facade the HTTP layer and the in-process API talk to.
///
/// # Caching
///
/// The parsed [`Workspace`], the category structure and the extracted quotes are each
/// held in a [`TtlCache`] and rebuilt from disk on the first request after expiry or
/// after [`Vault::invalidate_cache`]. Callers never see a partially built snapshot.
///
/// # Actions vs Queries
///
/// *   **Queries**: everything here except cache invalidation is read-only and returns
///     owned values, so handlers can drop the vault borrow before serializing.
/// *   **Actions**: [`Vault::invalidate_cache`] is the only state change; the vault never
///     writes to disk.
pub struct Vault {
    root: PathBuf,
    fs: Arc<dyn FileSystem>,
    exclude_patterns: Vec<String>,
    show_indexing_stats: bool,
    notes: TtlCache<Arc<Workspace>>,
    structure: TtlCache<Arc<VaultStructure>>,
    quotes: TtlCache<Arc<Vec<Quote>>>,
}

impl Vault {
    pub fn new(root: PathBuf, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            root,
            fs,
            exclude_patterns: Vec::new(),
            show_indexing_stats: true,
            notes: TtlCache::default(),
            structure: TtlCache::default(),
            quotes: TtlCache::default(),
        }
    }

    pub fn from_config(config: &FolioConfig) -> Self {
        Self::new(config.vault.path.clone(), Arc::new(PhysicalFileSystem))
            .with_exclude_patterns(config.vault.exclude_patterns.clone())
            .with_ttl(config.cache.ttl())
            .with_indexing_stats(config.logging.show_indexing_stats)
    }

    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.notes = TtlCache::new(ttl);
        self.structure = TtlCache::new(ttl);
        self.quotes = TtlCache::new(ttl);
        self
    }

    pub fn with_indexing_stats(mut self, show: bool) -> Self {
        self.show_indexing_stats = show;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // ------------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------------

    /// Parsed notes, scanning the vault when the cached snapshot is missing or stale
    pub fn workspace(&self) -> Arc<Workspace> {
        self.notes.get_or_insert_with(NOTES_KEY, || {
            let indexer = Indexer::new(&*self.fs, &self.root, &self.exclude_patterns);
            let (workspace, stats) = indexer.full_index();
            if self.show_indexing_stats {
                log::info!("Indexing stats for {}: {:?}", self.root.display(), stats);
            }
            Arc::new(workspace)
        })
    }

    pub fn structure(&self) -> Arc<VaultStructure> {
        self.structure.get_or_insert_with(STRUCTURE_KEY, || {
            let workspace = self.workspace();
            Arc::new(TreeBuilder::new(&workspace).build_category_structure())
        })
    }

    pub fn quotes(&self) -> Arc<Vec<Quote>> {
        self.quotes.get_or_insert_with(QUOTES_KEY, || {
            Arc::new(quotes::extract_all(&self.workspace()))
        })
    }

    // ------------------------------------------------------------------------
    // Notes
    // ------------------------------------------------------------------------

    /// A note with its navigation context filled in when it sits in a book tree
    pub fn note(&self, id: &str) -> Result<Note, ApiError> {
        let workspace = self.workspace();
        let Some(found) = workspace.note_by_id(id) else {
            return Err(ApiError::NotFound(format!("Note not found: {}", id)));
        };

        let mut note = found.clone();
        note.navigation = TreeBuilder::new(&workspace).navigation_context(found);
        Ok(note)
    }

    pub fn book_tree(&self, book: &str) -> Result<BookTree, ApiError> {
        let workspace = self.workspace();
        TreeBuilder::new(&workspace)
            .book_tree(book)
            .ok_or_else(|| ApiError::NotFound(format!("Book not found: {}", book)))
    }

    /// Ranked search; `limit` defaults to 20 and must be within 1..=50
    pub fn search(&self, query: &str, limit: Option<usize>) -> Result<Vec<NoteMetadata>, ApiError> {
        if query.trim().chars().count() < MIN_QUERY_LEN {
            return Err(ApiError::Invalid(format!(
                "Search query must be at least {} characters",
                MIN_QUERY_LEN
            )));
        }
        let limit = checked_limit(limit, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT)?;

        Ok(self
            .workspace()
            .search(query)
            .into_iter()
            .take(limit)
            .map(Note::metadata)
            .collect())
    }

    pub fn list(
        &self,
        category: Option<&str>,
        book: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<NoteMetadata>, ApiError> {
        let limit = checked_limit(limit, 100, 500)?;
        let mut notes = self.workspace().metadata(category, book);
        notes.truncate(limit);
        Ok(notes)
    }

    pub fn stats(&self) -> NoteStats {
        self.workspace().statistics()
    }

    pub fn categories(&self) -> Vec<String> {
        self.workspace().categories()
    }

    pub fn books(&self, category: Option<&str>) -> Vec<String> {
        self.workspace().books(category)
    }

    // ------------------------------------------------------------------------
    // Quotes
    // ------------------------------------------------------------------------

    pub fn quote_categories(&self) -> Vec<String> {
        quotes::categories(&self.quotes())
    }

    pub fn random_quote(&self, category: Option<&str>) -> Result<Quote, ApiError> {
        quotes::pick_random(&self.quotes(), category).ok_or_else(|| {
            ApiError::NotFound(match category {
                Some(c) => format!("No quotes found in category: {}", c),
                None => "No quotes found".to_string(),
            })
        })
    }

    pub fn quotes_by_category(
        &self,
        category: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<Quote>, ApiError> {
        let limit = checked_limit(limit, 20, 100)?;
        let all = self.quotes();
        Ok(quotes::in_category(&all, category)
            .into_iter()
            .take(limit)
            .cloned()
            .collect())
    }

    // ------------------------------------------------------------------------
    // Cache
    // ------------------------------------------------------------------------

    /// Drop every cached snapshot; returns how many entries were cleared
    pub fn invalidate_cache(&self) -> usize {
        let cleared = self.notes.invalidate_all()
            + self.structure.invalidate_all()
            + self.quotes.invalidate_all();
        log::info!("Cache invalidated, {} entries cleared", cleared);
        cleared
    }

    pub fn cache_stats(&self) -> CacheStats {
        let mut stats = self.notes.stats();
        for other in [self.structure.stats(), self.quotes.stats()] {
            stats.total_entries += other.total_entries;
            stats.valid_entries += other.valid_entries;
            stats.keys.extend(other.keys);
        }
        stats.keys.sort();
        stats
    }
}

fn checked_limit(limit: Option<usize>, default: usize, max: usize) -> Result<usize, ApiError> {
    match limit {
        None => Ok(default),
        Some(n) if (1..=max).contains(&n) => Ok(n),
        Some(n) => Err(ApiError::Invalid(format!(
            "limit must be between 1 and {}, got {}",
            max, n
        ))),
    }
}
