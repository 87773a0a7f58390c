//! [`NotesApi`] over HTTP, talking to a `folio-server`.

use std::time::Duration;

use async_trait::async_trait;
use folio_core::model::{
    BookTree, ContactMessage, ContactReceipt, Note, NoteMetadata, Quote, VaultStructure,
};
use folio_core::{ApiError, NotesApi};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

pub struct HttpNotesApi {
    client: Client,
    base: Url,
}

impl HttpNotesApi {
    pub fn new(base: &str) -> anyhow::Result<Self> {
        let base = Url::parse(base)?;
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `segments` are percent-encoded, so note ids and book names may hold spaces or slashes
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Invalid(format!("Not a base URL: {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()));
        }

        let text = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.detail)
            .unwrap_or(text);
        log::debug!("Request failed with {}: {}", status, detail);

        Err(match status {
            StatusCode::NOT_FOUND => ApiError::NotFound(detail),
            StatusCode::UNPROCESSABLE_ENTITY | StatusCode::BAD_REQUEST => {
                ApiError::Invalid(detail)
            }
            other => ApiError::Status {
                status: other.as_u16(),
                detail,
            },
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        self.send(self.client.get(url).query(query)).await
    }
}

#[async_trait]
impl NotesApi for HttpNotesApi {
    async fn structure(&self) -> Result<VaultStructure, ApiError> {
        self.get(&["api", "notes", "structure"], &[]).await
    }

    async fn note(&self, id: &str) -> Result<Note, ApiError> {
        self.get(&["api", "notes", id], &[]).await
    }

    async fn book_tree(&self, book: &str) -> Result<BookTree, ApiError> {
        self.get(&["api", "notes", "tree", book], &[]).await
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<NoteMetadata>, ApiError> {
        self.get(
            &["api", "notes", "search"],
            &[("q", query.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    async fn quote_categories(&self) -> Result<Vec<String>, ApiError> {
        self.get(&["api", "quotes", "categories"], &[]).await
    }

    async fn random_quote(&self, category: Option<&str>) -> Result<Quote, ApiError> {
        let query: Vec<(&str, String)> = category
            .map(|c| vec![("category", c.to_string())])
            .unwrap_or_default();
        self.get(&["api", "quotes", "random"], &query).await
    }

    async fn submit_contact(&self, message: ContactMessage) -> Result<ContactReceipt, ApiError> {
        let url = self.endpoint(&["api", "contact"])?;
        self.send(self.client.post(url).json(&message)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_encodes_segments() {
        let api = HttpNotesApi::new("http://127.0.0.1:8000").unwrap();
        let url = api.endpoint(&["api", "notes", "tree", "Atomic Habits"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8000/api/notes/tree/Atomic%20Habits"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let api = HttpNotesApi::new("https://example.com/folio").unwrap();
        let url = api.endpoint(&["api", "notes", "structure"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/folio/api/notes/structure");
    }

    #[test]
    fn test_rejects_non_url() {
        assert!(HttpNotesApi::new("not a url").is_err());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        // Port 9 (discard) is closed on test machines
        let api = HttpNotesApi::new("http://127.0.0.1:9").unwrap();
        let err = api.structure().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
