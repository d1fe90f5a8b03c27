use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::Account;
use crate::domain::account::models::PlanTier;
use crate::domain::account::ports::AccountFlowPort;
use crate::inbound::http::middleware::VerifiedIdentity;
use crate::inbound::http::router::AppState;

/// Profile fetch for an already-gated request.
///
/// The identity context comes from the gate; the handler re-reads the
/// account so the response reflects the store, not the token snapshot.
pub async fn profile(
    State(state): State<AppState>,
    Extension(identity): Extension<VerifiedIdentity>,
) -> Result<ApiSuccess<ProfileResponseData>, ApiError> {
    state
        .account_flow
        .profile(&identity.account_id)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileResponseData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub plan: PlanTier,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for ProfileResponseData {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            username: account.username.as_str().to_string(),
            email: account.email.as_str().to_string(),
            display_name: account.display_name.clone(),
            avatar_url: account.avatar_url.clone(),
            plan: account.plan,
            created_at: account.created_at,
        }
    }
}
