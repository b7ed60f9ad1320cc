use thiserror::Error;

/// Errors that can occur while parsing release names.
#[derive(Debug, Error)]
pub enum CinefileError {
    /// The input string is empty or contains only whitespace.
    #[error("input is empty or whitespace-only")]
    EmptyInput,

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    Regex(#[from] regex::Error),
}

/// Errors raised by a metadata lookup backend.
///
/// Missing fields inside a successful response are not errors; they are
/// absorbed during enrichment. These variants cover the request itself.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The backend is missing required configuration (API key, base URL).
    #[error("lookup not configured: {0}")]
    NotConfigured(String),

    /// The HTTP request could not be sent or completed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The service answered with a non-success status code.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The response body was not a valid lookup document.
    #[error("failed to decode lookup response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, CinefileError>;
