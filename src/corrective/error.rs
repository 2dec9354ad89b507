use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by a [`RelevanceOracle`](super::RelevanceOracle).
///
/// The filter never propagates these; each one becomes a lenient verdict.
pub enum OracleError {
    /// The completion request failed.
    #[error("oracle request to '{model}' failed: {reason}")]
    RequestFailed {
        /// Model name.
        model: String,
        /// Error message.
        reason: String,
    },

    /// The model answered with no text.
    #[error("oracle '{model}' returned an empty reply")]
    EmptyReply {
        /// Model name.
        model: String,
    },

    /// The oracle is not configured or reachable.
    #[error("oracle unavailable: {reason}")]
    Unavailable {
        /// Error message.
        reason: String,
    },
}

#[derive(Debug, Error, PartialEq)]
/// Invalid [`FilterPolicy`](super::FilterPolicy) values.
pub enum FilterPolicyError {
    #[error("threshold multiplier must be finite and non-negative, got {value}")]
    InvalidMultiplier { value: f64 },

    #[error("{field} must be between 0 and 100, got {value}")]
    ScoreOutOfRange { field: &'static str, value: u32 },
}
