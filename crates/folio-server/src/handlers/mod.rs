mod contact;
mod lifecycle;
mod notes;
mod quotes;

pub use contact::*;
pub use lifecycle::*;
pub use notes::*;
pub use quotes::*;

use folio_core::{ApiError, Vault};

use crate::error::AppError;
use crate::state::GlobalState;

/// Run a vault query on the blocking pool; a cold cache means a full vault scan
async fn with_vault<T, F>(state: &GlobalState, f: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&Vault) -> Result<T, ApiError> + Send + 'static,
{
    let vault = state.vault.clone();
    tokio::task::spawn_blocking(move || f(&vault))
        .await
        .map_err(|e| AppError::internal(format!("Vault task failed: {}", e)))?
        .map_err(AppError::from)
}
