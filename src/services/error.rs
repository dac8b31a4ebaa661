use thiserror::Error;

/// Failures at the boundary with an external collaborator.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("deserialization failed: {0}")]
    Deserialization(#[from] serde_json::Error),
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServiceError>;

impl ServiceError {
    /// Drop request URLs from the error, for endpoints that embed credentials.
    pub fn without_url(self) -> Self {
        match self {
            ServiceError::Request(e) => ServiceError::Request(e.without_url()),
            ServiceError::Status { status, .. } => ServiceError::Status {
                status,
                url: "<redacted>".to_string(),
            },
            other => other,
        }
    }
}
