use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AuthSession;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::Username;

/// Port for the credential flow operations.
#[async_trait]
pub trait AccountFlowPort: Send + Sync + 'static {
    /// Register a new account and issue its first session token.
    ///
    /// # Arguments
    /// * `command` - Validated command with username, email, secret, and
    ///   optional display name
    ///
    /// # Returns
    /// The created account plus a session token
    ///
    /// # Errors
    /// * `UsernameTaken` / `EmailTaken` - An account with the same
    ///   username or email already exists
    /// * `Secret` - Hashing primitive failed; registration cannot proceed
    /// * `Database` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AccountError>;

    /// Authenticate credentials and issue a session token.
    ///
    /// # Arguments
    /// * `command` - Identifier (username or email) and plaintext secret
    ///
    /// # Returns
    /// The authenticated account plus a session token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown identifier or wrong secret;
    ///   deliberately indistinguishable
    /// * `AccountDisabled` - Account exists but is inactive
    /// * `Database` - Store operation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AccountError>;

    /// Re-read the public profile of an already-gated identity.
    ///
    /// # Arguments
    /// * `id` - Account ID from the verified identity context
    ///
    /// # Errors
    /// * `NotFound` - Account vanished behind a still-valid token
    /// * `Database` - Store operation failed
    async fn profile(&self, id: &AccountId) -> Result<Account, AccountError>;
}

/// Persistence operations for the account aggregate.
///
/// The store is an opaque asynchronous dependency: each call may block
/// or fail independently, no transaction spans two calls, and failures
/// surface immediately without retry.
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `UsernameTaken` / `EmailTaken` - Uniqueness constraint violated
    ///   (the register race window losing side lands here)
    /// * `Database` - Store operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve an account by identifier.
    ///
    /// # Returns
    /// Optional account (None if not found)
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Retrieve an account whose username or email equals `identifier`.
    ///
    /// # Returns
    /// Optional account (None if not found)
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, AccountError>;

    /// Probe for an existing account with the given username or email.
    ///
    /// Used by the register duplicate check before insert.
    ///
    /// # Returns
    /// Optional conflicting account (None if both are free)
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn find_by_username_or_email(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountError>;
}
