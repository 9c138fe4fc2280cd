//! Generator transport errors.

/// Errors from calling a trip generator.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by generator API")]
    RateLimited,

    /// Invalid API key or unauthorized
    #[error("unauthorized (invalid API key)")]
    Unauthorized,

    /// The response envelope carried no generated text
    #[error("generator returned no content")]
    EmptyResponse,

    /// The response envelope itself could not be decoded
    #[error("could not decode generator envelope: {0}")]
    Envelope(String),

    /// Local setup problem (missing fixture, bad API key format)
    #[error("not configured: {0}")]
    NotConfigured(String),
}
