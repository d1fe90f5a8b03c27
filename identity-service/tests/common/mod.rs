use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Duration;
use credentials::CredentialConfig;
use credentials::CredentialEngine;
use credentials::TokenIssuer;
use identity_service::domain::account::errors::AccountError;
use identity_service::domain::account::models::Account;
use identity_service::domain::account::models::AccountId;
use identity_service::domain::account::models::EmailAddress;
use identity_service::domain::account::models::Username;
use identity_service::domain::account::ports::AccountFlowPort;
use identity_service::domain::account::ports::AccountStore;
use identity_service::domain::account::service::AccountFlow;
use identity_service::inbound::http::router::create_router;

pub const SIGNING_KEY: &str = "test-signing-key-at-least-32-bytes!!";

/// Test application that spawns a real server on a random port, wired
/// to an in-memory account store.
pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryAccountStore>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryAccountStore::new());

        let engine = Arc::new(
            CredentialEngine::new(&CredentialConfig {
                signing_key: SIGNING_KEY.to_string(),
                token_ttl: Duration::minutes(60),
                hash_cost: 1,
            })
            .expect("Failed to build credential engine"),
        );

        let account_flow: Arc<dyn AccountFlowPort> =
            Arc::new(AccountFlow::new(Arc::clone(&store), Arc::clone(&engine)));

        let router = create_router(account_flow, engine);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            store,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make GET request with a raw Authorization header value
    pub fn get_with_credential_header(&self, path: &str, value: &str) -> reqwest::RequestBuilder {
        self.get(path).header(reqwest::header::AUTHORIZATION, value)
    }

    /// Mint a token for the given identity that was expired at issuance.
    pub fn expired_token(&self, id: &str, username: &str, email: &str) -> String {
        TokenIssuer::new(SIGNING_KEY.as_bytes(), Duration::minutes(-5))
            .issue(id, username, email)
            .expect("Failed to issue expired token")
    }
}

/// In-memory account store standing in for Postgres in the API tests.
///
/// Mirrors the store's uniqueness behavior so conflict outcomes surface
/// the same way.
pub struct InMemoryAccountStore {
    accounts: Mutex<Vec<Account>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(Vec::new()),
        }
    }

    /// Flip an account inactive, the way an operator would in the
    /// database.
    pub fn deactivate(&self, username: &str) {
        let mut accounts = self.accounts.lock().unwrap();
        let account = accounts
            .iter_mut()
            .find(|a| a.username.as_str() == username)
            .expect("No such account");
        account.is_active = false;
    }

    /// Drop an account, leaving any issued tokens dangling.
    pub fn remove(&self, username: &str) {
        self.accounts
            .lock()
            .unwrap()
            .retain(|a| a.username.as_str() != username);
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.lock().unwrap();

        if accounts.iter().any(|a| a.username == account.username) {
            return Err(AccountError::UsernameTaken(account.username.to_string()));
        }
        if accounts.iter().any(|a| a.email == account.email) {
            return Err(AccountError::EmailTaken(account.email.as_str().to_string()));
        }

        accounts.push(account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == *id)
            .cloned())
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, AccountError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.username.as_str() == identifier || a.email.as_str() == identifier)
            .cloned())
    }

    async fn find_by_username_or_email(
        &self,
        username: &Username,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.username == *username || a.email == *email)
            .cloned())
    }
}
