//! Member directory CRUD (management surface; not part of the scan path).

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use rollcall_core::MemberId;
use rollcall_directory::{Member, MemberDirectory, MemberUpdate};

use crate::app::{dto, errors};
use crate::app::routes::common::OpAuth;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_member).get(list_members))
        .route(
            "/:id",
            get(get_member).patch(update_member).delete(delete_member),
        )
}

pub async fn create_member(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::CreateMemberRequest>,
) -> axum::response::Response {
    if let Err(e) = crate::authz::authorize_operation(&principal, &OpAuth::one("members.create")) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    if body.full_name.trim().is_empty() || body.card_number.trim().is_empty() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "full_name and card_number are required",
        );
    }

    let mut member = Member::new(body.full_name, body.card_number);
    member.email = body.email;
    member.phone_number = body.phone_number;
    if let Some(role) = body.role {
        member.role = role;
    }

    match services.members.insert(member) {
        Ok(m) => (StatusCode::CREATED, Json(m)).into_response(),
        Err(e) => errors::directory_error_to_response(e),
    }
}

pub async fn list_members(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(e) = crate::authz::authorize_operation(&principal, &OpAuth::one("members.read")) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    match services.members.list() {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response(),
        Err(e) => errors::directory_error_to_response(e),
    }
}

pub async fn get_member(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = crate::authz::authorize_operation(&principal, &OpAuth::one("members.read")) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    let id: MemberId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid member id"),
    };

    match services.members.get(id) {
        Ok(Some(m)) => (StatusCode::OK, Json(m)).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "member not found"),
        Err(e) => errors::directory_error_to_response(e),
    }
}

pub async fn update_member(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<MemberUpdate>,
) -> axum::response::Response {
    if let Err(e) = crate::authz::authorize_operation(&principal, &OpAuth::one("members.update")) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    let id: MemberId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid member id"),
    };

    match services.members.update(id, body) {
        Ok(m) => (StatusCode::OK, Json(m)).into_response(),
        Err(e) => errors::directory_error_to_response(e),
    }
}

pub async fn delete_member(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = crate::authz::authorize_operation(&principal, &OpAuth::one("members.delete")) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    let id: MemberId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid member id"),
    };

    match services.members.remove(id) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "member deleted" })),
        )
            .into_response(),
        Err(e) => errors::directory_error_to_response(e),
    }
}
