use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;

use super::claims::SessionClaims;
use super::errors::TokenError;

/// Issues signed, time-bounded session tokens.
///
/// The TTL is fixed at construction and stamped into every token; callers
/// cannot mint longer-lived tokens per issuance. Issuance is stateless:
/// no record is kept, and one account may hold any number of
/// simultaneously valid tokens.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenIssuer {
    /// Create an issuer signing with HS256.
    ///
    /// # Arguments
    /// * `signing_key` - Symmetric key shared with the verifier; at least
    ///   256 bits, supplied by configuration and never logged
    /// * `ttl` - Lifetime stamped into every issued token
    pub fn new(signing_key: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(signing_key),
            algorithm: Algorithm::HS256,
            ttl,
        }
    }

    /// Issue a token for an authenticated identity.
    ///
    /// Stamps `iat` with the current time and `exp` with `iat + ttl`,
    /// then signs the claims. The output is a compact, printable string
    /// with no embedded whitespace, safe to transmit in a header.
    ///
    /// # Errors
    /// * `SigningFailed` - Claims serialization or signing failed
    pub fn issue(
        &self,
        subject: &str,
        username: &str,
        email: &str,
    ) -> Result<String, TokenError> {
        let claims = SessionClaims::new(subject, username, email, Utc::now(), self.ttl);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }
}
