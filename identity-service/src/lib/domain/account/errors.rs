use credentials::SecretError;
use credentials::TokenError;
use thiserror::Error;

/// Error for AccountId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for PlanTier parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlanTierError {
    #[error("Unknown plan tier: {0}")]
    UnknownTier(String),
}

/// Top-level error for all account operations.
///
/// Expected failures (bad credentials, duplicates, expired tokens) are
/// variants here, never panics. No variant's message ever carries a
/// plaintext secret, a verifier, or the signing key.
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid account ID: {0}")]
    InvalidAccountId(#[from] AccountIdError),

    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid plan tier: {0}")]
    InvalidPlanTier(#[from] PlanTierError),

    // Domain-level errors
    #[error("Username already registered: {0}")]
    UsernameTaken(String),

    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is disabled")]
    AccountDisabled,

    #[error("Account not found: {0}")]
    NotFound(String),

    // Dependency failures
    #[error("Secret hashing error: {0}")]
    Secret(#[from] SecretError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Database error: {0}")]
    Database(String),
}
