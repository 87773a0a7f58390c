//! Folio HTTP Library
//!
//! JSON layer over `folio_core::Vault`: notes, quotes and the contact inbox.

use axum::routing::{get, post};
use axum::Router;
use folio_core::{FolioConfig, Vault};

pub use crate::state::GlobalState;

pub mod config;
mod error;
mod handlers;
pub mod protocol;
mod state;

#[cfg(test)]
mod tests;

/// Build the router; literal segments are registered ahead of `/{id}`
pub fn create_router(state: GlobalState, cors_origins: &[String]) -> Router {
    let notes = Router::new()
        .route("/", get(handlers::handle_list_notes))
        .route("/structure", get(handlers::handle_structure))
        .route("/stats", get(handlers::handle_stats))
        .route("/categories", get(handlers::handle_categories))
        .route("/books", get(handlers::handle_books))
        .route("/search", get(handlers::handle_search))
        .route("/tree/{book}", get(handlers::handle_book_tree))
        .route("/cache/invalidate", post(handlers::handle_invalidate_cache))
        .route("/{id}", get(handlers::handle_note));

    let quotes = Router::new()
        .route("/", get(handlers::handle_list_quotes))
        .route("/categories", get(handlers::handle_quote_categories))
        .route("/random", get(handlers::handle_random_quote));

    let contact = Router::new()
        .route("/", post(handlers::handle_submit_contact))
        .route("/messages", get(handlers::handle_contact_messages));

    Router::new()
        .route("/", get(handlers::handle_root))
        .route("/health", get(handlers::handle_health))
        .nest("/api/notes", notes)
        .nest("/api/quotes", quotes)
        .nest("/api/contact", contact)
        .layer(config::cors_layer(cors_origins))
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C
pub async fn run_server(config: FolioConfig) -> anyhow::Result<()> {
    if !config.vault.path.is_dir() {
        log::warn!(
            "Vault path {:?} does not exist, serving an empty vault",
            config.vault.path
        );
    }

    let state = GlobalState::new(Vault::from_config(&config));
    let app = create_router(state, &config.server.cors_origins);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    log::info!("Folio API listening on http://{}", listener.local_addr()?);
    log::info!("Serving vault at {:?}", config.vault.path);

    axum::serve(listener, app)
        .with_graceful_shutdown(handlers::shutdown_signal())
        .await?;
    Ok(())
}
