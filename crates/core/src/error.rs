//! Errors surfaced by the model transport.

/// Failures that end a turn.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The endpoint answered with a non-success status
    #[error("request failed with status {status}: {body}")]
    Status {
        /// The HTTP status code
        status: u16,
        /// The response body
        body: String,
    },

    /// The endpoint answered without a usable message
    #[error("no response from the model")]
    NoResponse,

    /// The caller cancelled the turn
    #[error("request cancelled")]
    Cancelled,

    /// The response body could not be decoded
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Connection-level failure
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

/// Result alias for transport operations
pub type Result<T> = std::result::Result<T, Error>;
