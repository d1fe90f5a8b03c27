use std::sync::Arc;

use chrono::Duration;
use credentials::CredentialConfig;
use credentials::CredentialEngine;
use identity_service::config::Config;
use identity_service::domain::account::ports::AccountFlowPort;
use identity_service::domain::account::service::AccountFlow;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::PostgresAccountStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "identity_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "identity-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    // The signing key and database credentials stay out of the logs.
    tracing::info!(
        port = config.server.port,
        token_ttl_minutes = config.auth.token_ttl_minutes,
        hash_cost = config.auth.hash_cost,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let engine = Arc::new(CredentialEngine::new(&CredentialConfig {
        signing_key: config.auth.signing_key.clone(),
        token_ttl: Duration::minutes(config.auth.token_ttl_minutes),
        hash_cost: config.auth.hash_cost,
    })?);

    let store = Arc::new(PostgresAccountStore::new(pg_pool));
    let account_flow: Arc<dyn AccountFlowPort> =
        Arc::new(AccountFlow::new(store, Arc::clone(&engine)));

    let address = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(
        address = %address,
        port = config.server.port,
        protocol = "http",
        "Http server listening"
    );

    let application = create_router(account_flow, engine);
    axum::serve(listener, application).await?;

    Ok(())
}
