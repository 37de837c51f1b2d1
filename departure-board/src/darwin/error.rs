//! Darwin client error types.

/// Errors from fetching a departure board.
#[derive(Debug, thiserror::Error)]
pub enum DarwinError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by Darwin API")]
    RateLimited,

    /// Invalid API key or unauthorized
    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// The API token can't be sent as a header
    #[error("invalid API token")]
    InvalidToken,

    /// Mock data couldn't be loaded or has no board for a station
    #[error("mock data: {0}")]
    Mock(String),
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_ref()
        .map(|b| format!(" (body: {b})"))
        .unwrap_or_default()
}
