use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] rquest::Error),

    #[error("Unexpected status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse {url}: {reason}")]
    Parse { url: String, reason: String },

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Forbidden - Access denied")]
    Forbidden,

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to persist report: {0}")]
    Persist(#[from] tempfile::PersistError),
}

impl Error {
    pub fn parse(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Parse {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error came from configuration rather than fetching or writing.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_) | Error::InvalidConfig(_))
    }

    /// Transport hiccups and throttling are worth another attempt; a missing
    /// page or a page we cannot parse is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::RateLimit | Error::Forbidden => true,
            Error::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
