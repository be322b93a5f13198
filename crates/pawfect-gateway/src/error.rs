//! Identity client error types.

use thiserror::Error;

/// Errors that can occur when talking to the identity service.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong email or password, or an unconfirmed account.
    #[error("{0}")]
    InvalidCredentials(String),

    /// The service refused the request for another reason.
    #[error("auth error (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// The service answered with a body we could not read.
    #[error("unexpected auth response: {0}")]
    MalformedResponse(String),

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),
}
