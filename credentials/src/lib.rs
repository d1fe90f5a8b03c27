//! Credential-and-session engine
//!
//! Provides the security-sensitive core of the identity service:
//! - Secret hashing (Argon2id, salted, tunable cost)
//! - Session token issuance (HS256, fixed TTL)
//! - Session token verification with terminal outcomes
//!
//! Everything here is pure computation over its own inputs: no I/O, no
//! store access, no shared mutable state. The engine is constructed once
//! at startup from an immutable [`CredentialConfig`] and shared across
//! in-flight requests.
//!
//! # Examples
//!
//! ## Hashing and verifying a secret
//! ```
//! use chrono::Duration;
//! use credentials::CredentialConfig;
//! use credentials::CredentialEngine;
//!
//! let config = CredentialConfig {
//!     signing_key: "a_signing_key_of_at_least_32_bytes!".to_string(),
//!     token_ttl: Duration::minutes(30),
//!     hash_cost: 1,
//! };
//! let engine = CredentialEngine::new(&config).unwrap();
//!
//! let verifier = engine.hash_secret("hunter2").unwrap();
//! assert!(engine.verify_secret("hunter2", &verifier).unwrap());
//! assert!(!engine.verify_secret("wrong", &verifier).unwrap());
//! ```
//!
//! ## Issuing and verifying a session token
//! ```
//! use chrono::Duration;
//! use credentials::CredentialConfig;
//! use credentials::CredentialEngine;
//!
//! let config = CredentialConfig {
//!     signing_key: "a_signing_key_of_at_least_32_bytes!".to_string(),
//!     token_ttl: Duration::minutes(30),
//!     hash_cost: 1,
//! };
//! let engine = CredentialEngine::new(&config).unwrap();
//!
//! let token = engine.issue_token("account-1", "amy", "amy@example.com").unwrap();
//! let claims = engine.verify_token(Some(&token)).unwrap();
//! assert_eq!(claims.sub, "account-1");
//! assert_eq!(claims.username, "amy");
//! ```

pub mod engine;
pub mod secret;
pub mod token;

// Re-export commonly used items
pub use engine::CredentialConfig;
pub use engine::CredentialEngine;
pub use secret::SecretError;
pub use secret::SecretHasher;
pub use token::SessionClaims;
pub use token::TokenError;
pub use token::TokenIssuer;
pub use token::TokenVerifier;
