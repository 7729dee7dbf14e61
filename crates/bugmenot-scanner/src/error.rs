use thiserror::Error;

/// Failures reported by a [`Transport`](crate::transport::Transport).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("network unreachable: {0}")]
    Unreachable(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("failed to read response body: {0}")]
    Body(String),
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("response is not valid UTF-8: {0}")]
    Decode(String),

    /// The page had no `#content` container or no account entries in it.
    #[error("response contained no account listings")]
    EmptyResponse,

    #[error("invalid search term: {0}")]
    InvalidTerm(String),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// Listing markers that don't form a CSS selector.
    #[error("invalid listing selector: {0}")]
    InvalidSelector(String),
}

impl From<std::string::FromUtf8Error> for FetchError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
