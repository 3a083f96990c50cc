//! Error types for the Quantcast adapter.

/// Errors that can occur when configuring the adapter or loading the tag.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request for the tag script failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The tag URL answered with a non-success status.
    #[error("Tag load failed with HTTP {status}")]
    TagLoad { status: u16 },

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
