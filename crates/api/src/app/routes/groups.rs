//! Group directory CRUD (management surface).

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use rollcall_core::GroupId;
use rollcall_directory::{Group, GroupDirectory, GroupUpdate};

use crate::app::{dto, errors};
use crate::app::routes::common::OpAuth;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_group).get(list_groups))
        .route(
            "/:id",
            get(get_group).patch(update_group).delete(delete_group),
        )
}

pub async fn create_group(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::CreateGroupRequest>,
) -> axum::response::Response {
    if let Err(e) = crate::authz::authorize_operation(&principal, &OpAuth::one("groups.create")) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    if body.name.trim().is_empty() {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "name is required");
    }

    let mut group = Group::new(body.name);
    group.description = body.description;
    group.leader_id = body.leader_id;

    match services.groups.insert(group) {
        Ok(g) => (StatusCode::CREATED, Json(g)).into_response(),
        Err(e) => errors::directory_error_to_response(e),
    }
}

pub async fn list_groups(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
) -> axum::response::Response {
    if let Err(e) = crate::authz::authorize_operation(&principal, &OpAuth::one("groups.read")) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    match services.groups.list() {
        Ok(items) => (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response(),
        Err(e) => errors::directory_error_to_response(e),
    }
}

pub async fn get_group(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = crate::authz::authorize_operation(&principal, &OpAuth::one("groups.read")) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    let id: GroupId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid group id"),
    };

    match services.groups.get(id) {
        Ok(Some(g)) => (StatusCode::OK, Json(g)).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "group not found"),
        Err(e) => errors::directory_error_to_response(e),
    }
}

pub async fn update_group(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<GroupUpdate>,
) -> axum::response::Response {
    if let Err(e) = crate::authz::authorize_operation(&principal, &OpAuth::one("groups.update")) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    let id: GroupId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid group id"),
    };

    match services.groups.update(id, body) {
        Ok(g) => (StatusCode::OK, Json(g)).into_response(),
        Err(e) => errors::directory_error_to_response(e),
    }
}

pub async fn delete_group(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = crate::authz::authorize_operation(&principal, &OpAuth::one("groups.delete")) {
        return errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string());
    }

    let id: GroupId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid group id"),
    };

    match services.groups.remove(id) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "group deleted" })),
        )
            .into_response(),
        Err(e) => errors::directory_error_to_response(e),
    }
}
