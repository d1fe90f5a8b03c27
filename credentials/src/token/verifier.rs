use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::SessionClaims;
use super::errors::TokenError;

/// Verifies session tokens, returning decoded claims or a terminal
/// failure reason.
///
/// The signature is checked before any claim (including the expiry
/// timestamp) is trusted, so a forged `exp` can never survive to the
/// expiry comparison. Expiry is evaluated with zero leeway: a token is
/// rejected the instant `exp` is reached.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier for HS256 tokens.
    ///
    /// # Arguments
    /// * `signing_key` - Symmetric key shared with the issuer
    pub fn new(signing_key: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(signing_key),
            validation,
        }
    }

    /// Verify a presented token.
    ///
    /// # Arguments
    /// * `token` - Token string, or `None` when no token was presented
    ///
    /// # Returns
    /// Decoded claims when the signature is valid and the token unexpired
    ///
    /// # Errors
    /// * `Missing` - No token was presented
    /// * `Malformed` - Not a decodable token string
    /// * `InvalidSignature` - Signature mismatch, covering any tampering
    ///   with the claims; an algorithm-confused header lands here too
    /// * `Expired` - Signature valid but the expiry has passed
    pub fn verify(&self, token: Option<&str>) -> Result<SessionClaims, TokenError> {
        let token = token.ok_or(TokenError::Missing)?;

        decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                _ => TokenError::Malformed(e.to_string()),
            })
    }
}
