use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::http::error::AppError;
use crate::server::AppState;

/// Credential storage and MFA are explicitly out of scope (spec §1
/// Non-goals). This issues a device token for any device already registered
/// via the device CRUD API, and an admin token for any non-empty username —
/// standing in for whatever identity provider a real deployment fronts this
/// with.
#[derive(Debug, Deserialize)]
pub struct DeviceTokenRequest {
    pub device_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AdminTokenRequest {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub expires_in_secs: u64,
}

pub async fn issue_device_token(
    State(state): State<AppState>,
    Json(req): Json<DeviceTokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let device = state
        .ctx
        .devices
        .get_by_device_id(&req.device_id)
        .await?
        .ok_or_else(|| kiosk_core::CoreError::DeviceNotFound(req.device_id.clone()))?;

    let ttl = state.ctx.config.auth.token_ttl_secs;
    let token = state
        .ctx
        .jwt
        .issue(&device.device_id.to_string(), kiosk_core::service::auth::Role::Device, Some(device.device_id.as_str()), ttl)?;

    Ok(Json(TokenResponse {
        token,
        expires_in_secs: ttl,
    }))
}

pub async fn issue_admin_token(
    State(state): State<AppState>,
    Json(req): Json<AdminTokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    if req.username.trim().is_empty() {
        return Err(AppError(kiosk_core::CoreError::InvalidToken("empty username".into())));
    }
    let ttl = state.ctx.config.auth.token_ttl_secs;
    let token = state
        .ctx
        .jwt
        .issue(&req.username, kiosk_core::service::auth::Role::Admin, None, ttl)?;

    Ok(Json(TokenResponse {
        token,
        expires_in_secs: ttl,
    }))
}
