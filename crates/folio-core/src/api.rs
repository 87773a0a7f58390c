//! The notes service as seen by the browser.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::contact::ContactInbox;
use crate::error::ApiError;
use crate::model::{
    BookTree, ContactMessage, ContactReceipt, Note, NoteMetadata, Quote, VaultStructure,
};
use crate::workspace::Vault;

/// Read access to a vault plus the contact form, wherever the vault lives.
///
/// `folio-bin` talks to a `folio-server` over HTTP; tests and `--vault` mode use [`LocalApi`].
#[async_trait]
pub trait NotesApi: Send + Sync {
    async fn structure(&self) -> Result<VaultStructure, ApiError>;

    /// A fresh snapshot of one note, navigation context included
    async fn note(&self, id: &str) -> Result<Note, ApiError>;

    async fn book_tree(&self, book: &str) -> Result<BookTree, ApiError>;

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<NoteMetadata>, ApiError>;

    async fn quote_categories(&self) -> Result<Vec<String>, ApiError>;

    async fn random_quote(&self, category: Option<&str>) -> Result<Quote, ApiError>;

    async fn submit_contact(&self, message: ContactMessage) -> Result<ContactReceipt, ApiError>;
}

/// In-process [`NotesApi`] over a [`Vault`]; vault scans run on the blocking pool
#[derive(Clone)]
pub struct LocalApi {
    vault: Arc<Vault>,
    inbox: Arc<RwLock<ContactInbox>>,
}

impl LocalApi {
    pub fn new(vault: Arc<Vault>) -> Self {
        Self {
            vault,
            inbox: Arc::new(RwLock::new(ContactInbox::new())),
        }
    }

    pub fn vault(&self) -> &Arc<Vault> {
        &self.vault
    }

    pub fn inbox(&self) -> &Arc<RwLock<ContactInbox>> {
        &self.inbox
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&Vault) -> Result<T, ApiError> + Send + 'static,
    {
        let vault = Arc::clone(&self.vault);
        tokio::task::spawn_blocking(move || f(&vault))
            .await
            .map_err(|e| ApiError::Io(format!("vault task failed: {}", e)))?
    }
}

#[async_trait]
impl NotesApi for LocalApi {
    async fn structure(&self) -> Result<VaultStructure, ApiError> {
        self.blocking(|vault| Ok(vault.structure().as_ref().clone()))
            .await
    }

    async fn note(&self, id: &str) -> Result<Note, ApiError> {
        let id = id.to_string();
        self.blocking(move |vault| vault.note(&id)).await
    }

    async fn book_tree(&self, book: &str) -> Result<BookTree, ApiError> {
        let book = book.to_string();
        self.blocking(move |vault| vault.book_tree(&book)).await
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<NoteMetadata>, ApiError> {
        let query = query.to_string();
        self.blocking(move |vault| vault.search(&query, Some(limit)))
            .await
    }

    async fn quote_categories(&self) -> Result<Vec<String>, ApiError> {
        self.blocking(|vault| Ok(vault.quote_categories())).await
    }

    async fn random_quote(&self, category: Option<&str>) -> Result<Quote, ApiError> {
        let category = category.map(String::from);
        self.blocking(move |vault| vault.random_quote(category.as_deref()))
            .await
    }

    async fn submit_contact(&self, message: ContactMessage) -> Result<ContactReceipt, ApiError> {
        self.inbox
            .write()
            .await
            .submit(message)
            .map_err(|e| ApiError::Invalid(e.to_string()))
    }
}
