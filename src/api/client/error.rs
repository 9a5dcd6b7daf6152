/// Failures while putting together a client. These are fatal to client creation.
#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("bearer credential must be a non-empty header-safe token")]
    InvalidCredential,

    #[error("provided URL wasn't valid: {0}")]
    BadUrl(#[from] url::ParseError),

    #[error("provided URL can't be used as a base for API routes: {0}")]
    UnsupportedUrl(String),

    #[error("underlying HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Network level failure. A request that produced any HTTP status, including 4xx and 5xx ones,
/// never ends up here.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP request failed to complete: {0}")]
    Http(#[from] reqwest::Error),

    #[error("body stream failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request was rejected before being sent: {0}")]
    InvalidArgument(&'static str),

    #[error("request URL is invalid: {0}")]
    InvalidUrl(String),

    #[error("failed to read local file: {0}")]
    LocalFile(#[source] std::io::Error),

    #[error("no file exists with id '{id}': {reason}")]
    NotFound { id: String, reason: String },

    #[error("streamed request body was already consumed")]
    RequestReused,

    #[error("API returned {status_code} response: {reason}")]
    Status { status_code: u16, reason: String },

    #[error("failed to decode API response body ({body}): {cause:?}")]
    Decode {
        body: String,
        #[source]
        cause: Option<serde_json::Error>,
    },

    #[error("failed to encode request payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    /// The HTTP status the service responded with, if the failure came from a non-success
    /// response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status_code, .. } => Some(*status_code),
            ApiError::NotFound { .. } => Some(404),
            _ => None,
        }
    }

    pub(crate) fn empty_body() -> Self {
        ApiError::Decode {
            body: "empty body".to_string(),
            cause: None,
        }
    }

    /// Used for operations targeting a single file, a 404 there means the file itself is missing.
    pub(crate) fn for_file_id(self, id: &str) -> Self {
        match self {
            ApiError::Status {
                status_code: 404,
                reason,
            } => ApiError::NotFound {
                id: id.to_string(),
                reason,
            },
            other => other,
        }
    }
}
