use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::EmailError;
use crate::account::errors::UsernameError;
use crate::domain::account::models::AuthSession;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountFlowPort;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    state
        .account_flow
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::CREATED, session.into()))
}

/// HTTP request body for registering an account (raw JSON).
///
/// Required fields are optional here so their absence surfaces as a
/// validation outcome rather than a deserialization rejection.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    display_name: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Username, email and password are required")]
    MissingFields,

    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let (Some(username), Some(email), Some(password)) =
            (self.username, self.email, self.password)
        else {
            return Err(ParseRegisterRequestError::MissingFields);
        };

        let username = Username::new(username)?;
        let email = EmailAddress::new(email)?;
        Ok(RegisterCommand::new(
            username,
            email,
            password,
            self.display_name,
        ))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub token: String,
}

impl From<&AuthSession> for RegisterResponseData {
    fn from(session: &AuthSession) -> Self {
        Self {
            id: session.account.id.to_string(),
            username: session.account.username.as_str().to_string(),
            email: session.account.email.as_str().to_string(),
            token: session.token.clone(),
        }
    }
}
