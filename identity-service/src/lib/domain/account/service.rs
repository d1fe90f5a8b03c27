use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use credentials::CredentialEngine;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AuthSession;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::PlanTier;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::ports::AccountFlowPort;
use crate::domain::account::ports::AccountStore;

/// Credential flow orchestrator.
///
/// Coordinates the secret hasher, the account store, and the token
/// issuer to implement register, login, and profile as sequences of
/// steps with defined short-circuit conditions.
pub struct AccountFlow<S>
where
    S: AccountStore,
{
    store: Arc<S>,
    engine: Arc<CredentialEngine>,
}

impl<S> AccountFlow<S>
where
    S: AccountStore,
{
    /// Create a new flow with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Account persistence implementation
    /// * `engine` - Credential-and-session engine
    pub fn new(store: Arc<S>, engine: Arc<CredentialEngine>) -> Self {
        Self { store, engine }
    }

    fn issue_session(&self, account: Account) -> Result<AuthSession, AccountError> {
        let token = self.engine.issue_token(
            &account.id.to_string(),
            account.username.as_str(),
            account.email.as_str(),
        )?;

        Ok(AuthSession { account, token })
    }
}

#[async_trait]
impl<S> AccountFlowPort for AccountFlow<S>
where
    S: AccountStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AccountError> {
        // Duplicate probe before insert. The window between this check
        // and the insert is accepted; a lost race surfaces from the
        // store as the same conflict outcome.
        if let Some(existing) = self
            .store
            .find_by_username_or_email(&command.username, &command.email)
            .await?
        {
            return Err(if existing.username == command.username {
                AccountError::UsernameTaken(command.username.to_string())
            } else {
                AccountError::EmailTaken(command.email.as_str().to_string())
            });
        }

        let password_hash = self.engine.hash_secret(&command.password)?;

        let account = Account {
            id: AccountId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            display_name: command.display_name,
            avatar_url: None,
            plan: PlanTier::Free,
            is_active: true,
            created_at: Utc::now(),
        };

        let account = self.store.create(account).await?;
        tracing::info!(account_id = %account.id, "Account registered");

        self.issue_session(account)
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AccountError> {
        // Unknown identifier and wrong secret must be indistinguishable
        // to the caller.
        let account = self
            .store
            .find_by_identifier(&command.identifier)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !account.is_active {
            return Err(AccountError::AccountDisabled);
        }

        let secret_matches = self
            .engine
            .verify_secret(&command.password, &account.password_hash)?;

        if !secret_matches {
            return Err(AccountError::InvalidCredentials);
        }

        tracing::info!(account_id = %account.id, "Login succeeded");

        self.issue_session(account)
    }

    async fn profile(&self, id: &AccountId) -> Result<Account, AccountError> {
        // A miss here means the account vanished behind a still-valid
        // token.
        self.store
            .find_by_id(id)
            .await?
            .ok_or(AccountError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use credentials::CredentialConfig;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::account::models::EmailAddress;
    use crate::domain::account::models::Username;

    mock! {
        pub TestAccountStore {}

        #[async_trait]
        impl AccountStore for TestAccountStore {
            async fn create(&self, account: Account) -> Result<Account, AccountError>;
            async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;
            async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, AccountError>;
            async fn find_by_username_or_email(
                &self,
                username: &Username,
                email: &EmailAddress,
            ) -> Result<Option<Account>, AccountError>;
        }
    }

    fn engine() -> Arc<CredentialEngine> {
        Arc::new(
            CredentialEngine::new(&CredentialConfig {
                signing_key: "test_signing_key_at_least_32_bytes!".to_string(),
                token_ttl: Duration::minutes(30),
                hash_cost: 1,
            })
            .expect("Failed to build engine"),
        )
    }

    fn stored_account(engine: &CredentialEngine, username: &str, password: &str) -> Account {
        Account {
            id: AccountId::new(),
            username: Username::new(username.to_string()).unwrap(),
            email: EmailAddress::new(format!("{}@example.com", username)).unwrap(),
            password_hash: engine.hash_secret(password).unwrap(),
            display_name: None,
            avatar_url: None,
            plan: PlanTier::Free,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn register_command(username: &str, email: &str) -> RegisterCommand {
        RegisterCommand::new(
            Username::new(username.to_string()).unwrap(),
            EmailAddress::new(email.to_string()).unwrap(),
            "pass_word!".to_string(),
            None,
        )
    }

    #[tokio::test]
    async fn test_register_success() {
        let engine = engine();
        let mut store = MockTestAccountStore::new();

        store
            .expect_find_by_username_or_email()
            .times(1)
            .returning(|_, _| Ok(None));

        store
            .expect_create()
            .withf(|account| {
                account.username.as_str() == "amy"
                    && account.password_hash.starts_with("$argon2")
                    && account.is_active
                    && account.plan == PlanTier::Free
            })
            .times(1)
            .returning(Ok);

        let flow = AccountFlow::new(Arc::new(store), Arc::clone(&engine));

        let session = flow
            .register(register_command("amy", "amy@x.com"))
            .await
            .expect("Registration failed");

        // The issued token decodes back to the new account's claims
        let claims = engine.verify_token(Some(&session.token)).unwrap();
        assert_eq!(claims.sub, session.account.id.to_string());
        assert_eq!(claims.username, "amy");
        assert_eq!(claims.email, "amy@x.com");
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let engine = engine();
        let mut store = MockTestAccountStore::new();

        let existing = stored_account(&engine, "amy", "other_password");
        store
            .expect_find_by_username_or_email()
            .times(1)
            .returning(move |_, _| Ok(Some(existing.clone())));
        store.expect_create().times(0);

        let flow = AccountFlow::new(Arc::new(store), engine);

        let result = flow.register(register_command("amy", "new@x.com")).await;
        assert!(matches!(
            result.unwrap_err(),
            AccountError::UsernameTaken(_)
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let engine = engine();
        let mut store = MockTestAccountStore::new();

        let mut existing = stored_account(&engine, "someone_else", "other_password");
        existing.email = EmailAddress::new("amy@x.com".to_string()).unwrap();
        store
            .expect_find_by_username_or_email()
            .times(1)
            .returning(move |_, _| Ok(Some(existing.clone())));
        store.expect_create().times(0);

        let flow = AccountFlow::new(Arc::new(store), engine);

        let result = flow.register(register_command("amy", "amy@x.com")).await;
        assert!(matches!(result.unwrap_err(), AccountError::EmailTaken(_)));
    }

    #[tokio::test]
    async fn test_register_lost_race_surfaces_store_conflict() {
        let engine = engine();
        let mut store = MockTestAccountStore::new();

        store
            .expect_find_by_username_or_email()
            .times(1)
            .returning(|_, _| Ok(None));
        store
            .expect_create()
            .times(1)
            .returning(|account| Err(AccountError::UsernameTaken(account.username.to_string())));

        let flow = AccountFlow::new(Arc::new(store), engine);

        let result = flow.register(register_command("amy", "amy@x.com")).await;
        assert!(matches!(
            result.unwrap_err(),
            AccountError::UsernameTaken(_)
        ));
    }

    #[tokio::test]
    async fn test_login_success() {
        let engine = engine();
        let account = stored_account(&engine, "amy", "pass_word!");
        let account_id = account.id;

        let mut store = MockTestAccountStore::new();
        store
            .expect_find_by_identifier()
            .withf(|identifier| identifier == "amy")
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let flow = AccountFlow::new(Arc::new(store), Arc::clone(&engine));

        let session = flow
            .login(LoginCommand {
                identifier: "amy".to_string(),
                password: "pass_word!".to_string(),
            })
            .await
            .expect("Login failed");

        assert_eq!(session.account.id, account_id);
        assert!(engine.verify_token(Some(&session.token)).is_ok());
    }

    #[tokio::test]
    async fn test_login_unknown_and_wrong_password_are_indistinguishable() {
        let engine = engine();
        let account = stored_account(&engine, "amy", "Correct_Password!");

        let mut store = MockTestAccountStore::new();
        store
            .expect_find_by_identifier()
            .withf(|identifier| identifier == "nobody")
            .times(1)
            .returning(|_| Ok(None));
        store
            .expect_find_by_identifier()
            .withf(|identifier| identifier == "amy")
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let flow = AccountFlow::new(Arc::new(store), engine);

        let unknown = flow
            .login(LoginCommand {
                identifier: "nobody".to_string(),
                password: "whatever".to_string(),
            })
            .await
            .unwrap_err();
        let wrong_password = flow
            .login(LoginCommand {
                identifier: "amy".to_string(),
                password: "Wrong_Password!".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(unknown, AccountError::InvalidCredentials));
        assert!(matches!(wrong_password, AccountError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong_password.to_string());
    }

    #[tokio::test]
    async fn test_login_disabled_account() {
        let engine = engine();
        let mut account = stored_account(&engine, "amy", "pass_word!");
        account.is_active = false;

        let mut store = MockTestAccountStore::new();
        store
            .expect_find_by_identifier()
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let flow = AccountFlow::new(Arc::new(store), engine);

        // Correct password, but the account is disabled: a distinct
        // outcome from bad credentials.
        let result = flow
            .login(LoginCommand {
                identifier: "amy".to_string(),
                password: "pass_word!".to_string(),
            })
            .await;
        assert!(matches!(result.unwrap_err(), AccountError::AccountDisabled));
    }

    #[tokio::test]
    async fn test_profile_success() {
        let engine = engine();
        let account = stored_account(&engine, "amy", "pass_word!");
        let account_id = account.id;

        let mut store = MockTestAccountStore::new();
        store
            .expect_find_by_id()
            .withf(move |id| *id == account_id)
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));

        let flow = AccountFlow::new(Arc::new(store), engine);

        let profile = flow.profile(&account_id).await.expect("Profile failed");
        assert_eq!(profile.id, account_id);
        assert_eq!(profile.username.as_str(), "amy");
    }

    #[tokio::test]
    async fn test_profile_vanished_account() {
        let mut store = MockTestAccountStore::new();
        store.expect_find_by_id().times(1).returning(|_| Ok(None));

        let flow = AccountFlow::new(Arc::new(store), engine());

        let result = flow.profile(&AccountId::new()).await;
        assert!(matches!(result.unwrap_err(), AccountError::NotFound(_)));
    }
}
