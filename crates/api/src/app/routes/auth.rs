//! Registration and login (token issuance).

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use chrono::{Duration, Utc};

use rollcall_auth::{CredentialStore, JwtClaims, Role};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

/// Token lifetime matches the original deployment's 7-day sessions.
const TOKEN_TTL_DAYS: i64 = 7;

pub fn router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::RegisterUserRequest>,
) -> axum::response::Response {
    if body.username.trim().is_empty() || body.password.is_empty() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "username and password are required",
        );
    }

    let roles: Vec<Role> = body.roles.into_iter().map(Role::new).collect();

    let account = match services
        .credentials
        .register(&body.username, &body.password, roles)
    {
        Ok(a) => a,
        Err(e) => return errors::credential_error_to_response(e),
    };

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "id": account.principal_id.to_string(),
            "username": account.username,
            "roles": account.roles.iter().map(|r| r.as_str()).collect::<Vec<_>>(),
        })),
    )
        .into_response()
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let account = match services.credentials.verify(&body.username, &body.password) {
        Ok(a) => a,
        Err(e) => return errors::credential_error_to_response(e),
    };

    let now = Utc::now();
    let claims = JwtClaims {
        sub: account.principal_id,
        roles: account.roles.clone(),
        issued_at: now,
        expires_at: now + Duration::days(TOKEN_TTL_DAYS),
    };

    let token = match services.tokens.encode(&claims) {
        Ok(t) => t,
        Err(e) => {
            tracing::error!("token encoding failed: {e}");
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "token_error",
                "could not issue token",
            );
        }
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "token": token,
            "principal": {
                "id": account.principal_id.to_string(),
                "username": account.username,
                "roles": account.roles.iter().map(|r| r.as_str()).collect::<Vec<_>>(),
            },
        })),
    )
        .into_response()
}
