use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Json;
use axum::Router;
use credentials::CredentialEngine;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::profile::profile;
use super::handlers::register::register;
use super::middleware::require_session;
use crate::domain::account::ports::AccountFlowPort;

#[derive(Clone)]
pub struct AppState {
    pub account_flow: Arc<dyn AccountFlowPort>,
    pub engine: Arc<CredentialEngine>,
}

pub fn create_router(
    account_flow: Arc<dyn AccountFlowPort>,
    engine: Arc<CredentialEngine>,
) -> Router {
    let state = AppState {
        account_flow,
        engine,
    };

    let public_routes = Router::new()
        .route("/", get(service_info))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login));

    let protected_routes = Router::new()
        .route("/api/auth/profile", get(profile))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    // The credential header stays out of the span: bearer tokens must
    // not end up in logs.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn service_info() -> Json<serde_json::Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
