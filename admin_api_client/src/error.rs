use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The remote rejected the bearer token (HTTP 401).
    #[error("remote API rejected the access token")]
    Unauthorized,

    #[error("remote API responded with status {0}")]
    Status(u16),

    #[error("request to remote API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid API URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("access token is not a valid header value")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}
