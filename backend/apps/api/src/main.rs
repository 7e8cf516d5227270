//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level failures are
//! rendered as problem JSON by the auth crate's error types.

use anyhow::Context;
use auth::{AuthConfig, CognitoConfig, CognitoUserPool, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use std::env;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Hosted user pool connection
    let region =
        env::var("USER_POOL_REGION").context("USER_POOL_REGION must be set in environment")?;
    let user_pool_id =
        env::var("USER_POOL_ID").context("USER_POOL_ID must be set in environment")?;
    let client_id =
        env::var("USER_POOL_CLIENT_ID").context("USER_POOL_CLIENT_ID must be set in environment")?;

    let mut pool_config = CognitoConfig::new(region, user_pool_id, client_id);
    pool_config.client_secret = env::var("USER_POOL_CLIENT_SECRET").ok();
    pool_config.endpoint = env::var("USER_POOL_ENDPOINT").ok();

    tracing::info!(
        region = %pool_config.region,
        user_pool_id = %pool_config.user_pool_id,
        confidential_client = pool_config.client_secret.is_some(),
        "Using hosted user pool"
    );

    let pool = CognitoUserPool::new(pool_config);

    // Cookie configuration
    let auth_config = if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        AuthConfig::default()
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173,http://127.0.0.1:5173".to_string());

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins(&frontend_origins))
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
        .nest("/api/auth", auth_router(pool, auth_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = bind_addr(env::var("BIND_ADDR").ok().as_deref())?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Parse a comma-separated origin list into CORS header values
fn allowed_origins(raw: &str) -> Vec<http::HeaderValue> {
    raw.split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect()
}

/// Parse BIND_ADDR, defaulting to port 31144 on all interfaces
fn bind_addr(raw: Option<&str>) -> anyhow::Result<SocketAddr> {
    match raw {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("BIND_ADDR is not a valid socket address: {raw}")),
        None => Ok(SocketAddr::from(([0, 0, 0, 0], 31144))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_origins_splits_and_trims() {
        let origins = allowed_origins("http://localhost:5173, http://127.0.0.1:5173");
        assert_eq!(origins.len(), 2);
        assert_eq!(origins[0], "http://localhost:5173");
        assert_eq!(origins[1], "http://127.0.0.1:5173");
    }

    #[test]
    fn test_bind_addr_default() {
        let addr = bind_addr(None).unwrap();
        assert_eq!(addr.port(), 31144);
    }

    #[test]
    fn test_bind_addr_override() {
        let addr = bind_addr(Some("127.0.0.1:8080")).unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:8080");

        assert!(bind_addr(Some("not-an-address")).is_err());
    }
}
