use thiserror::Error;

/// Failures inside a single lookup.
///
/// None of these escape [`crate::lookup`]; their `Display` form becomes
/// `QueryResult::error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    #[error("http_error:{0}")]
    Transport(String),

    #[error("http_status:{0}")]
    HttpStatus(u16),

    #[error("invalid_url:{0}")]
    InvalidUrl(String),

    #[error("invalid_date:{0}")]
    InvalidDate(String),

    #[error("http_error:client setup failed: {0}")]
    Client(String),
}

pub type Result<T> = std::result::Result<T, ScanError>;
