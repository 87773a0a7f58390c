use axum::extract::{Query, State};
use axum::Json;
use folio_core::model::Quote;

use super::with_vault;
use crate::error::AppError;
use crate::protocol::{CategoryParams, ListQuotesParams};
use crate::state::GlobalState;

pub async fn handle_quote_categories(
    State(state): State<GlobalState>,
) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(
        with_vault(&state, |vault| Ok(vault.quote_categories())).await?,
    ))
}

/// `GET /api/quotes/random?category=`, 404 when the category has no quotes
pub async fn handle_random_quote(
    State(state): State<GlobalState>,
    Query(params): Query<CategoryParams>,
) -> Result<Json<Quote>, AppError> {
    let quote = with_vault(&state, move |vault| {
        vault.random_quote(params.category.as_deref())
    })
    .await?;
    Ok(Json(quote))
}

pub async fn handle_list_quotes(
    State(state): State<GlobalState>,
    Query(params): Query<ListQuotesParams>,
) -> Result<Json<Vec<Quote>>, AppError> {
    let quotes = with_vault(&state, move |vault| {
        vault.quotes_by_category(params.category.as_deref(), params.limit)
    })
    .await?;
    Ok(Json(quotes))
}
