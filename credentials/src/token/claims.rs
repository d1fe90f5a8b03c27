use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set embedded in a session token.
///
/// Every field is required; a token missing any of them does not decode.
/// The claims are a snapshot taken at issuance; renaming an account
/// does not rewrite tokens already in flight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject: the account identifier
    pub sub: String,

    /// Username at issuance time
    pub username: String,

    /// Email at issuance time
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Build claims for an authenticated account.
    ///
    /// # Arguments
    /// * `subject` - Account identifier
    /// * `username` - Account username
    /// * `email` - Account email
    /// * `issued_at` - Issuance instant, stamped as `iat`
    /// * `ttl` - Token lifetime; `exp` is `issued_at + ttl`
    pub fn new(
        subject: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            sub: subject.into(),
            username: username.into(),
            email: email.into(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    /// Check whether the claims are expired at the given instant.
    ///
    /// A token becomes unusable the instant its expiry is reached.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }
}
