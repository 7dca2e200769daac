use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::StatusCode;
use kiosk_core::models::{DeviceId, UserId};

use crate::server::AppState;

/// Extracts and validates a device bearer token from `Authorization`
/// (spec §4.1). Rejects with 401 before the handler runs.
pub struct AuthedDevice(pub DeviceId);

/// Extracts and validates an admin bearer token.
pub struct AuthedAdmin(pub UserId);

fn bearer_header(parts: &Parts) -> Result<&str, (StatusCode, &'static str)> {
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or((StatusCode::UNAUTHORIZED, "missing Authorization header"))
}

impl<S> FromRequestParts<S> for AuthedDevice
where
    AppState: FromRef<S>,
    S: Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let header = bearer_header(parts)?;
        app_state
            .ctx
            .bearer_validator
            .validate_device(header)
            .map(AuthedDevice)
            .map_err(|_| (StatusCode::UNAUTHORIZED, "invalid device token"))
    }
}

impl<S> FromRequestParts<S> for AuthedAdmin
where
    AppState: FromRef<S>,
    S: Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let header = bearer_header(parts)?;
        app_state
            .ctx
            .bearer_validator
            .validate_admin(header)
            .map(AuthedAdmin)
            .map_err(|_| (StatusCode::UNAUTHORIZED, "invalid admin token"))
    }
}
