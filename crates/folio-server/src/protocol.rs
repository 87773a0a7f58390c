use folio_core::contact::StoredMessage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub limit: Option<usize>,
}

/// `GET /api/notes?category=&book=&limit=`
#[derive(Debug, Default, Deserialize)]
pub struct ListNotesParams {
    pub category: Option<String>,
    pub book: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryParams {
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuotesParams {
    pub category: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// `GET /api/contact/messages`
#[derive(Debug, Serialize, Deserialize)]
pub struct ContactMessages {
    pub total: usize,
    pub messages: Vec<StoredMessage>,
}
