//! Client error types.

/// Errors that can occur when using the z-commerce client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the request body.
    #[error("wrong input: {message}")]
    WrongInput {
        /// Server explanation.
        message: String,
        /// HTTP status code (400 for validation, 422 for missing references).
        status: u16,
    },

    /// The request path was missing an identifier.
    #[error("bad url: {0}")]
    BadUrl(String),

    /// No record exists with the requested identifier.
    #[error("not found: {0}")]
    NotFound(String),

    /// The requested state change is not allowed.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The server failed to reach its store.
    #[error("server error: {0}")]
    Server(String),

    /// Server returned an error response of an unknown kind.
    #[error("API error: {kind} - {message}")]
    Api {
        /// Envelope `type`.
        kind: String,
        /// Envelope `details`.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
