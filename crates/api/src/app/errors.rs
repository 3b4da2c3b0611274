use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use rollcall_attendance::AttendanceError;
use rollcall_auth::CredentialError;
use rollcall_directory::DirectoryError;

pub fn attendance_error_to_response(err: AttendanceError) -> axum::response::Response {
    match err {
        AttendanceError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        AttendanceError::MemberNotFound => {
            json_error(StatusCode::NOT_FOUND, "member_not_found", "member not found")
        }
        AttendanceError::NoMatchFound => {
            json_error(StatusCode::NOT_FOUND, "no_match", "no matching log entries")
        }
        AttendanceError::Storage(e) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_unavailable", e.to_string())
        }
        AttendanceError::DirectoryUnavailable => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "directory_unavailable",
            "member directory unavailable",
        ),
    }
}

pub fn directory_error_to_response(err: DirectoryError) -> axum::response::Response {
    match err {
        DirectoryError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DirectoryError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        DirectoryError::Unavailable => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "directory_unavailable",
            "directory unavailable",
        ),
    }
}

pub fn credential_error_to_response(err: CredentialError) -> axum::response::Response {
    match err {
        CredentialError::AlreadyRegistered => {
            json_error(StatusCode::CONFLICT, "already_registered", "username already registered")
        }
        CredentialError::InvalidCredentials => json_error(
            StatusCode::BAD_REQUEST,
            "invalid_credentials",
            "invalid username or password",
        ),
        CredentialError::Unavailable => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "credentials_unavailable",
            "credential store unavailable",
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
