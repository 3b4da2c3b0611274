//! HTTP API application wiring (Axum router + service wiring).
//!
//! Folder layout:
//! - `services.rs`: infrastructure wiring (directories, log store, bus, SSE bridge)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::{routing::get, Extension, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};

use rollcall_auth::Hs256TokenCodec;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Deployment knobs read from the environment by `main.rs`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,

    /// Whether scan recording and log queries sit behind the auth
    /// middleware. Off by default: the observed deployment drives scans from
    /// an unauthenticated kiosk scanner.
    pub require_auth_for_scan: bool,

    /// Browser origins allowed to call the API cross-origin.
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "dev-secret".to_string(),
            require_auth_for_scan: false,
            allowed_origins: Vec::new(),
        }
    }
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: AppConfig) -> Router {
    let tokens = Arc::new(Hs256TokenCodec::new(config.jwt_secret.as_bytes()));
    let auth_state = middleware::AuthState {
        jwt: tokens.clone(),
    };

    let services = Arc::new(services::build_services(tokens));

    // Protected routes: require an authenticated principal.
    let protected = routes::protected_router().layer(axum::middleware::from_fn_with_state(
        auth_state.clone(),
        middleware::auth_middleware,
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/auth", routes::auth::router())
        .nest(
            "/attendance",
            routes::attendance::router(config.require_auth_for_scan, auth_state),
        )
        .merge(protected)
        .layer(Extension(services))
        .layer(cors_layer(&config.allowed_origins))
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
