//! Error types shared across the pawfect crates.
//!
//! `GatewayError` is defined here rather than in `pawfect-gateway` so the
//! save action can downcast and classify remote failures without string
//! matching.

use thiserror::Error;

/// Validation and domain errors raised by the evaluation stores.
///
/// The `Display` text is written for end users and doubles as the notice
/// description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error("Please fill in participant and time fields")]
    EmptyParticipant,

    #[error("Please fill in participant and time fields")]
    EmptyTimeToComplete,

    #[error("unknown heuristic: {0} (expected 1-10)")]
    UnknownHeuristic(String),

    #[error("unknown walkthrough step: {0} (expected task1-1 .. task3-4)")]
    UnknownStep(String),

    #[error("unknown rating: {0}")]
    UnknownRating(String),

    #[error("unknown scenario: {0}")]
    UnknownScenario(String),

    /// A loaded document is missing a heuristic entry.
    #[error("heuristic {0} is missing from the document")]
    MissingHeuristic(u8),

    /// A loaded document is missing a walkthrough step entry.
    #[error("walkthrough step {0} is missing from the document")]
    MissingStep(String),

    /// An entry's embedded id disagrees with the key it is stored under.
    #[error("entry stored under key {key} carries id {id}")]
    MismatchedKey { key: String, id: String },

    #[error("duplicate usability test id: {0}")]
    DuplicateTestId(String),
}

/// Errors reported by a persistence gateway.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The backend refused the caller's credentials.
    #[error("not authorized: {0}")]
    Unauthorized(String),

    /// The backend rejected the insert.
    #[error("insert into {table} rejected (HTTP {status}): {message}")]
    Rejected {
        table: String,
        status: u16,
        message: String,
    },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),
}

impl GatewayError {
    /// The message reported by the backend itself, if there is one worth
    /// showing to the user.
    pub fn sink_message(&self) -> Option<&str> {
        match self {
            GatewayError::Unauthorized(message) | GatewayError::Rejected { message, .. }
                if !message.trim().is_empty() =>
            {
                Some(message.as_str())
            }
            _ => None,
        }
    }
}
