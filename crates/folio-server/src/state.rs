use folio_core::contact::ContactInbox;
use folio_core::Vault;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared state handed to every route handler
/// Must be Send + Sync
#[derive(Clone)]
pub struct GlobalState {
    /// Read-only apart from its internal caches
    pub vault: Arc<Vault>,
    /// Submissions are exclusive, the admin listing is concurrent
    pub inbox: Arc<RwLock<ContactInbox>>,
}

impl GlobalState {
    pub fn new(vault: Vault) -> Self {
        Self {
            vault: Arc::new(vault),
            inbox: Arc::new(RwLock::new(ContactInbox::new())),
        }
    }
}
