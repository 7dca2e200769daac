use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kiosk_core::CoreError;
use serde_json::json;

/// Maps domain errors onto HTTP responses. One `thiserror`/`IntoResponse`
/// pair per crate boundary, same split the teacher keeps between its core
/// error enum and its axum-facing error type.
pub struct AppError(pub CoreError);

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            CoreError::DeviceNotFound(_)
            | CoreError::ContentNotFound(_)
            | CoreError::PlaylistNotFound(_)
            | CoreError::PlaylistItemNotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            CoreError::DeviceOffline(_) => (StatusCode::CONFLICT, "device_offline"),
            CoreError::BroadcastAlreadyActive => (StatusCode::CONFLICT, "broadcast_already_active"),
            CoreError::NoBroadcastActive => (StatusCode::CONFLICT, "no_broadcast_active"),
            CoreError::InvalidToken(_) | CoreError::TokenExpired => (StatusCode::UNAUTHORIZED, "invalid_token"),
            CoreError::RoleMismatch { .. } => (StatusCode::FORBIDDEN, "role_mismatch"),
            CoreError::Database(_) | CoreError::Serde(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };
        let body = Json(json!({ "error": code, "message": self.0.to_string() }));
        (status, body).into_response()
    }
}
