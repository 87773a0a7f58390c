use thiserror::Error;

/// Failure of a call against the notes service.
///
/// The browser maps these onto user-facing notices; none of them is fatal.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected status {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("invalid request: {0}")]
    Invalid(String),

    #[error("vault i/o error: {0}")]
    Io(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    /// Short message suitable for a banner.
    pub fn banner(&self) -> String {
        match self {
            ApiError::NotFound(_) => "That note could not be found.".to_string(),
            ApiError::Network(_) => "Could not reach the notes service.".to_string(),
            ApiError::Status { status, .. } => {
                format!("The notes service returned an error ({}).", status)
            }
            ApiError::Decode(_) => "The notes service sent an unexpected response.".to_string(),
            ApiError::Invalid(detail) => detail.clone(),
            ApiError::Io(_) => "The vault could not be read.".to_string(),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::Io(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_yaml::Error),
}
