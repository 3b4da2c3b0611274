use axum::{routing::get, Router};

pub mod attendance;
pub mod auth;
pub mod common;
pub mod groups;
pub mod members;
pub mod system;

/// Router for all authenticated endpoints.
pub fn protected_router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/members", members::router())
        .nest("/groups", groups::router())
}
