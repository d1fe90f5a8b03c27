use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::AuthSession;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::PlanTier;
use crate::domain::account::ports::AccountFlowPort;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    state
        .account_flow
        .login(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}

/// HTTP request body for logging in (raw JSON).
///
/// The username field also accepts an email address; the flow matches
/// it against both columns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    username: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseLoginRequestError {
    #[error("Username and password are required")]
    MissingFields,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, ParseLoginRequestError> {
        let (Some(identifier), Some(password)) = (self.username, self.password) else {
            return Err(ParseLoginRequestError::MissingFields);
        };

        Ok(LoginCommand {
            identifier,
            password,
        })
    }
}

impl From<ParseLoginRequestError> for ApiError {
    fn from(err: ParseLoginRequestError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub plan: PlanTier,
    pub token: String,
}

impl From<&AuthSession> for LoginResponseData {
    fn from(session: &AuthSession) -> Self {
        Self {
            id: session.account.id.to_string(),
            username: session.account.username.as_str().to_string(),
            email: session.account.email.as_str().to_string(),
            display_name: session.account.display_name.clone(),
            avatar_url: session.account.avatar_url.clone(),
            plan: session.account.plan,
            token: session.token.clone(),
        }
    }
}
