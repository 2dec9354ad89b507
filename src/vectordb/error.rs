use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by vector database operations.
pub enum VectorDbError {
    /// Could not connect to the Qdrant endpoint.
    #[error("failed to connect to Qdrant at '{url}': {message}")]
    ConnectionFailed {
        /// Endpoint URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// Scroll (filtered point listing) failed.
    #[error("failed to scroll '{collection}': {message}")]
    ScrollFailed {
        /// Collection name.
        collection: String,
        /// Error message.
        message: String,
    },

    /// A point's payload did not have the expected document shape.
    #[error("malformed payload in '{collection}': {message}")]
    MalformedPayload {
        /// Collection name.
        collection: String,
        /// What was wrong.
        message: String,
    },
}
