use chrono::Duration;

use crate::secret::SecretError;
use crate::secret::SecretHasher;
use crate::token::SessionClaims;
use crate::token::TokenError;
use crate::token::TokenIssuer;
use crate::token::TokenVerifier;

/// Immutable engine configuration, built once at startup.
///
/// Supplied by the surrounding process (the engine never loads
/// configuration itself) and passed by reference into the constructors;
/// there is no ambient global lookup.
#[derive(Debug, Clone)]
pub struct CredentialConfig {
    /// Symmetric signing key shared by token issuance and verification
    pub signing_key: String,

    /// Lifetime stamped into every issued token
    pub token_ttl: Duration,

    /// Argon2 time-cost applied when hashing new secrets
    pub hash_cost: u32,
}

/// The credential-and-session engine.
///
/// Combines the secret hasher, token issuer, and token verifier behind
/// one handle. Immutable after construction; safe to share across
/// concurrent requests without locking, since every call operates on
/// its own inputs.
pub struct CredentialEngine {
    hasher: SecretHasher,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
}

impl CredentialEngine {
    /// Build the engine from its configuration.
    ///
    /// # Errors
    /// * `InvalidCost` - The hashing cost factor is unusable; fatal at
    ///   startup
    pub fn new(config: &CredentialConfig) -> Result<Self, SecretError> {
        let key = config.signing_key.as_bytes();

        Ok(Self {
            hasher: SecretHasher::new(config.hash_cost)?,
            issuer: TokenIssuer::new(key, config.token_ttl),
            verifier: TokenVerifier::new(key),
        })
    }

    /// Hash a plaintext secret into a storable verifier.
    pub fn hash_secret(&self, plaintext: &str) -> Result<String, SecretError> {
        self.hasher.hash(plaintext)
    }

    /// Verify a plaintext secret against a stored verifier.
    ///
    /// Mismatch is the normal `false` outcome, not an error.
    pub fn verify_secret(&self, plaintext: &str, verifier: &str) -> Result<bool, SecretError> {
        self.hasher.verify(plaintext, verifier)
    }

    /// Issue a session token for an authenticated identity.
    pub fn issue_token(
        &self,
        subject: &str,
        username: &str,
        email: &str,
    ) -> Result<String, TokenError> {
        self.issuer.issue(subject, username, email)
    }

    /// Verify a presented token, returning decoded claims or the
    /// terminal failure reason.
    pub fn verify_token(&self, token: Option<&str>) -> Result<SessionClaims, TokenError> {
        self.verifier.verify(token)
    }
}
