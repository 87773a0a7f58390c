use axum::extract::{Path, Query, State};
use axum::Json;
use folio_core::model::{BookTree, Note, NoteMetadata, NoteStats, VaultStructure};

use super::with_vault;
use crate::error::AppError;
use crate::protocol::{CategoryParams, ListNotesParams, MessageResponse, SearchParams};
use crate::state::GlobalState;

/// `GET /api/notes`
pub async fn handle_list_notes(
    State(state): State<GlobalState>,
    Query(params): Query<ListNotesParams>,
) -> Result<Json<Vec<NoteMetadata>>, AppError> {
    let notes = with_vault(&state, move |vault| {
        vault.list(
            params.category.as_deref(),
            params.book.as_deref(),
            params.limit,
        )
    })
    .await?;
    Ok(Json(notes))
}

/// `GET /api/notes/structure`, the category -> book -> tree grid
pub async fn handle_structure(
    State(state): State<GlobalState>,
) -> Result<Json<VaultStructure>, AppError> {
    let structure = with_vault(&state, |vault| Ok(vault.structure())).await?;
    Ok(Json(structure.as_ref().clone()))
}

pub async fn handle_stats(State(state): State<GlobalState>) -> Result<Json<NoteStats>, AppError> {
    Ok(Json(with_vault(&state, |vault| Ok(vault.stats())).await?))
}

pub async fn handle_categories(
    State(state): State<GlobalState>,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(with_vault(&state, |vault| Ok(vault.categories())).await?))
}

pub async fn handle_books(
    State(state): State<GlobalState>,
    Query(params): Query<CategoryParams>,
) -> Result<Json<Vec<String>>, AppError> {
    let books = with_vault(&state, move |vault| {
        Ok(vault.books(params.category.as_deref()))
    })
    .await?;
    Ok(Json(books))
}

/// `GET /api/notes/tree/{book}`
pub async fn handle_book_tree(
    State(state): State<GlobalState>,
    Path(book): Path<String>,
) -> Result<Json<BookTree>, AppError> {
    Ok(Json(
        with_vault(&state, move |vault| vault.book_tree(&book)).await?,
    ))
}

/// `GET /api/notes/search?q=&limit=`
pub async fn handle_search(
    State(state): State<GlobalState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<NoteMetadata>>, AppError> {
    let results = with_vault(&state, move |vault| vault.search(&params.q, params.limit)).await?;
    log::debug!("Search returned {} results", results.len());
    Ok(Json(results))
}

/// `GET /api/notes/{id}` with navigation context
pub async fn handle_note(
    State(state): State<GlobalState>,
    Path(id): Path<String>,
) -> Result<Json<Note>, AppError> {
    Ok(Json(with_vault(&state, move |vault| vault.note(&id)).await?))
}

/// `POST /api/notes/cache/invalidate`
pub async fn handle_invalidate_cache(
    State(state): State<GlobalState>,
) -> Result<Json<MessageResponse>, AppError> {
    let cleared = with_vault(&state, |vault| Ok(vault.invalidate_cache())).await?;
    Ok(Json(MessageResponse {
        message: format!("Cache invalidated, {} entries cleared", cleared),
    }))
}
