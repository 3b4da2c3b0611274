//! Scan recording, history queries, and the live observer stream.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use rollcall_attendance::AttendanceStatus;

use crate::app::{dto, errors};
use crate::app::routes::system;
use crate::app::services::AppServices;
use crate::middleware::{self, AuthState};

/// Attendance router.
///
/// The observer stream is always open (dashboards and kiosks are
/// unauthenticated); scan recording and history move behind the auth
/// middleware when `require_auth` is set.
pub fn router(require_auth: bool, auth_state: AuthState) -> Router {
    let scans = Router::new()
        .route("/:card_number/present", post(mark_present))
        .route("/:card_number/dismiss", post(mark_dismissed))
        .route("/logs", get(list_logs))
        .route("/logs/search", get(search_logs));

    let scans = if require_auth {
        scans.layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ))
    } else {
        scans
    };

    Router::new()
        .route("/stream", get(system::stream))
        .merge(scans)
}

pub async fn mark_present(
    Extension(services): Extension<Arc<AppServices>>,
    Path(card_number): Path<String>,
) -> axum::response::Response {
    record_scan(services, card_number, AttendanceStatus::Present).await
}

pub async fn mark_dismissed(
    Extension(services): Extension<Arc<AppServices>>,
    Path(card_number): Path<String>,
) -> axum::response::Response {
    record_scan(services, card_number, AttendanceStatus::Dismissed).await
}

async fn record_scan(
    services: Arc<AppServices>,
    card_number: String,
    kind: AttendanceStatus,
) -> axum::response::Response {
    match services.attendance.record_scan(&card_number, kind) {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(e) => errors::attendance_error_to_response(e),
    }
}

pub async fn list_logs(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.query.list_all() {
        Ok(entries) => {
            (StatusCode::OK, Json(serde_json::json!({ "items": entries }))).into_response()
        }
        Err(e) => errors::attendance_error_to_response(e),
    }
}

pub async fn search_logs(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::SearchLogsParams>,
) -> axum::response::Response {
    match services.query.search_by_member_name(&params.member_name) {
        Ok(entries) => {
            (StatusCode::OK, Json(serde_json::json!({ "items": entries }))).into_response()
        }
        Err(e) => errors::attendance_error_to_response(e),
    }
}
