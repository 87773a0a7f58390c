use axum::extract::State;
use axum::Json;
use folio_core::model::{ContactMessage, ContactReceipt};

use crate::error::AppError;
use crate::protocol::ContactMessages;
use crate::state::GlobalState;

/// `POST /api/contact`, 422 when validation fails
pub async fn handle_submit_contact(
    State(state): State<GlobalState>,
    Json(message): Json<ContactMessage>,
) -> Result<Json<ContactReceipt>, AppError> {
    let receipt = state.inbox.write().await.submit(message)?;
    Ok(Json(receipt))
}

/// `GET /api/contact/messages`
pub async fn handle_contact_messages(State(state): State<GlobalState>) -> Json<ContactMessages> {
    let inbox = state.inbox.read().await;
    Json(ContactMessages {
        total: inbox.len(),
        messages: inbox.messages().to_vec(),
    })
}
