use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use credentials::TokenError;

use crate::domain::account::models::AccountId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Verified identity context attached to a single in-flight request.
///
/// Populated only here, from signature-checked claims; scoped to the
/// request's lifetime. Downstream logic must treat its absence as
/// "never authenticate", never as "assume public".
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    pub account_id: AccountId,
    pub username: String,
    pub email: String,
}

/// Authentication gate for protected operations.
///
/// Extracts the bearer token, delegates to the token verifier, and
/// either attaches a [`VerifiedIdentity`] to the request or rejects it
/// before the handler runs. All token failures collapse to 401; only
/// the expired case gets a distinct message so clients can prompt
/// re-login. The precise reason is logged for diagnostics.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = bearer_token(&req);

    let claims = state.engine.verify_token(token).map_err(|e| {
        tracing::warn!(reason = %e, "Rejected unauthenticated request");
        let message = match e {
            TokenError::Missing => "Authentication required",
            TokenError::Expired => "Token expired",
            _ => "Invalid token",
        };
        ApiError::Unauthorized(message.to_string()).into_response()
    })?;

    let account_id = AccountId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(reason = %e, "Token subject is not an account ID");
        ApiError::Unauthorized("Invalid token".to_string()).into_response()
    })?;

    req.extensions_mut().insert(VerifiedIdentity {
        account_id,
        username: claims.username,
        email: claims.email,
    });

    Ok(next.run(req).await)
}

/// Extract the token from the credential header.
///
/// The expected shape is exactly two whitespace-separated segments
/// ("scheme value"); only the second is used. An absent header or any
/// other shape counts as no token presented.
fn bearer_token(req: &Request) -> Option<&str> {
    let header = req
        .headers()
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;

    let mut segments = header.split_whitespace();
    let token = match (segments.next(), segments.next(), segments.next()) {
        (Some(_scheme), Some(token), None) => token,
        _ => return None,
    };

    Some(token)
}
