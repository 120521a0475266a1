//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors.

use account::{
    AccountConfig, InMemoryAccountRepository, JwtConfig, PgAccountRepository, account_router,
    account_router_generic,
};
use anyhow::Context;
use axum::{
    Router, http,
    http::{Method, header},
};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PORT: u16 = 31113;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,account=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let account_config = load_account_config()?;

    let accounts = match env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await?;

            tracing::info!("Connected to database");

            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            account_router(PgAccountRepository::new(pool), account_config)
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, accounts are kept in memory");
            account_router_generic(InMemoryAccountRepository::new(), account_config)
        }
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let cors = CorsLayer::new()
        .allow_origin(parse_origins(&frontend_origins))
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest("/api/authentication", accounts)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port = match env::var("API_PORT") {
        Ok(port) => port.parse().context("API_PORT must be a port number")?,
        Err(_) => DEFAULT_PORT,
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Account settings from the environment.
/// Debug builds fall back to a random signing key; release builds require one.
fn load_account_config() -> anyhow::Result<AccountConfig> {
    let mut config = match env::var("JWT_KEY") {
        Ok(key) => AccountConfig {
            jwt: JwtConfig {
                key: key.into_bytes(),
                ..JwtConfig::default()
            },
            ..AccountConfig::default()
        },
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("JWT_KEY not set, using a random development key");
            AccountConfig::development()
        }
        Err(_) => anyhow::bail!("JWT_KEY must be set in production"),
    };

    if let Ok(issuer) = env::var("JWT_ISSUER") {
        config.jwt.issuer = issuer;
    }
    if let Ok(audience) = env::var("JWT_AUDIENCE") {
        config.jwt.audience = audience;
    }
    config.password_pepper = env::var("PASSWORD_PEPPER").ok().map(String::into_bytes);
    config.enforce_input_policy = env::var("ENFORCE_INPUT_POLICY")
        .map(|v| matches!(v.trim(), "1" | "true"))
        .unwrap_or(false);

    Ok(config)
}

fn parse_origins(origins: &str) -> Vec<http::HeaderValue> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| origin.parse().ok())
        .collect()
}
