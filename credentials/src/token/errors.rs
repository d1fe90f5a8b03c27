use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures are terminal outcomes of a single decode
/// attempt; there is no retry state. The gate collapses all of them to
/// an unauthorized response, keeping the distinction for diagnostics.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("No token was presented")]
    Missing,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,

    #[error("Failed to sign token: {0}")]
    SigningFailed(String),
}
