use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::account::errors::AccountIdError;
use crate::account::errors::EmailError;
use crate::account::errors::PlanTierError;
use crate::account::errors::UsernameError;

/// Account aggregate entity.
///
/// Immutable once created; the service reads and writes it only through
/// the store port and never holds it beyond a single operation. The
/// `password_hash` field carries the one-way verifier, never a
/// plaintext secret.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub username: Username,
    pub email: EmailAddress,
    pub password_hash: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub plan: PlanTier,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an account ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        Uuid::parse_str(s)
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric, underscore, and hyphen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.len();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    /// Get username as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Subscription tier attached to an account.
///
/// New registrations start on the free tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    Free,
    Premium,
}

impl PlanTier {
    /// Get the tier as its stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Free => "free",
            PlanTier::Premium => "premium",
        }
    }
}

impl FromStr for PlanTier {
    type Err = PlanTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(PlanTier::Free),
            "premium" => Ok(PlanTier::Premium),
            other => Err(PlanTierError::UnknownTier(other.to_string())),
        }
    }
}

impl fmt::Display for PlanTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: String,
    pub display_name: Option<String>,
}

impl RegisterCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `username` - Validated username
    /// * `email` - Validated email address
    /// * `password` - Plain text secret (hashed by the flow, never stored)
    /// * `display_name` - Optional display name
    pub fn new(
        username: Username,
        email: EmailAddress,
        password: String,
        display_name: Option<String>,
    ) -> Self {
        Self {
            username,
            email,
            password,
            display_name,
        }
    }
}

/// Command to authenticate an existing account.
///
/// The identifier is matched against username or email, so it stays an
/// unvalidated string; a malformed identifier simply matches nothing.
#[derive(Debug)]
pub struct LoginCommand {
    pub identifier: String,
    pub password: String,
}

/// Outcome of a successful register or login: the account together with
/// its freshly issued session token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub account: Account,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_validation() {
        assert!(Username::new("amy".to_string()).is_ok());
        assert!(Username::new("a-b_c3".to_string()).is_ok());

        assert!(matches!(
            Username::new("ab".to_string()),
            Err(UsernameError::TooShort { .. })
        ));
        assert!(matches!(
            Username::new("x".repeat(33)),
            Err(UsernameError::TooLong { .. })
        ));
        assert!(matches!(
            Username::new("amy!".to_string()),
            Err(UsernameError::InvalidCharacters)
        ));
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("amy@x.com".to_string()).is_ok());
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_plan_tier_round_trip() {
        assert_eq!("free".parse::<PlanTier>().unwrap(), PlanTier::Free);
        assert_eq!("premium".parse::<PlanTier>().unwrap(), PlanTier::Premium);
        assert_eq!(PlanTier::Free.as_str(), "free");
        assert!(matches!(
            "gold".parse::<PlanTier>(),
            Err(PlanTierError::UnknownTier(_))
        ));
    }
}
