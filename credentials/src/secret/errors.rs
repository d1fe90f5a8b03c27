use thiserror::Error;

/// Error type for secret hashing operations.
///
/// A mismatched secret is NOT an error; `verify` reports it as a normal
/// `false` outcome. These variants cover genuine operational failures.
#[derive(Debug, Clone, Error)]
pub enum SecretError {
    #[error("Invalid hashing cost factor: {0}")]
    InvalidCost(String),

    #[error("Secret hashing failed: {0}")]
    HashingFailed(String),

    #[error("Secret verification failed: {0}")]
    VerificationFailed(String),
}
