use axum::extract::{Path, State};
use axum::Json;
use kiosk_core::models::{CreateDeviceRequest, Device, DeviceId, UpdateDeviceRequest};
use kiosk_proto::events::server_to_device as ev;
use kiosk_proto::server::{
    ConfigUpdatePayload, DisplayNavigatePayload, RemoteClickPayload, RemoteKeyPayload,
    RemoteScrollPayload, RemoteTypePayload,
};
use kiosk_proto::Frame;
use serde_json::Value;

use crate::http::error::AppError;
use crate::server::AppState;

pub async fn create_device(
    State(state): State<AppState>,
    Json(req): Json<CreateDeviceRequest>,
) -> Result<Json<Device>, AppError> {
    let device = state.ctx.devices.create(req).await?;
    Ok(Json(device))
}

pub async fn list_devices(State(state): State<AppState>) -> Result<Json<Vec<Device>>, AppError> {
    Ok(Json(state.ctx.devices.list().await?))
}

pub async fn get_device(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Device>, AppError> {
    let device = state
        .ctx
        .devices
        .get_by_surrogate_id(id)
        .await?
        .ok_or_else(|| kiosk_core::CoreError::DeviceNotFound(id.to_string()))?;
    Ok(Json(device))
}

pub async fn update_device(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateDeviceRequest>,
) -> Result<Json<Device>, AppError> {
    let device = state.ctx.devices.update(id, req).await?;
    Ok(Json(device))
}

pub async fn delete_device(State(state): State<AppState>, Path(id): Path<i64>) -> Result<(), AppError> {
    state.ctx.devices.delete(id).await?;
    Ok(())
}

/// Every handler below is a 1:1 Control-Event Ingress mapping (spec §4.9):
/// a REST call that sends exactly one frame to one device, 409 when the
/// device is offline. None of these touch persistence.
fn send(state: &AppState, device_id: &str, frame: Frame) -> Result<(), AppError> {
    state
        .ctx
        .registry
        .send_to_device(&DeviceId::from(device_id), frame)
        .map_err(AppError)
}

pub async fn navigate(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Json(req): Json<DisplayNavigatePayload>,
) -> Result<(), AppError> {
    let frame = Frame::new(ev::DISPLAY_NAVIGATE, req).map_err(kiosk_core::CoreError::Serde)?;
    send(&state, &device_id, frame)
}

pub async fn refresh(State(state): State<AppState>, Path(device_id): Path<String>) -> Result<(), AppError> {
    send(&state, &device_id, Frame::bare(ev::DISPLAY_REFRESH))
}

pub async fn request_screenshot(State(state): State<AppState>, Path(device_id): Path<String>) -> Result<(), AppError> {
    send(&state, &device_id, Frame::bare(ev::SCREENSHOT_REQUEST))
}

pub async fn update_config(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Json(config): Json<Value>,
) -> Result<(), AppError> {
    let frame = Frame::new(ev::CONFIG_UPDATE, ConfigUpdatePayload { config }).map_err(kiosk_core::CoreError::Serde)?;
    send(&state, &device_id, frame)
}

pub async fn restart(State(state): State<AppState>, Path(device_id): Path<String>) -> Result<(), AppError> {
    send(&state, &device_id, Frame::bare(ev::DEVICE_RESTART))
}

pub async fn screencast_start(State(state): State<AppState>, Path(device_id): Path<String>) -> Result<(), AppError> {
    send(&state, &device_id, Frame::bare(ev::SCREENCAST_START))
}

pub async fn screencast_stop(State(state): State<AppState>, Path(device_id): Path<String>) -> Result<(), AppError> {
    send(&state, &device_id, Frame::bare(ev::SCREENCAST_STOP))
}

pub async fn remote_click(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Json(req): Json<RemoteClickPayload>,
) -> Result<(), AppError> {
    let frame = Frame::new(ev::REMOTE_CLICK, req).map_err(kiosk_core::CoreError::Serde)?;
    send(&state, &device_id, frame)
}

pub async fn remote_type(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Json(req): Json<RemoteTypePayload>,
) -> Result<(), AppError> {
    let frame = Frame::new(ev::REMOTE_TYPE, req).map_err(kiosk_core::CoreError::Serde)?;
    send(&state, &device_id, frame)
}

pub async fn remote_key(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Json(req): Json<RemoteKeyPayload>,
) -> Result<(), AppError> {
    let frame = Frame::new(ev::REMOTE_KEY, req).map_err(kiosk_core::CoreError::Serde)?;
    send(&state, &device_id, frame)
}

pub async fn remote_scroll(
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Json(req): Json<RemoteScrollPayload>,
) -> Result<(), AppError> {
    let frame = Frame::new(ev::REMOTE_SCROLL, req).map_err(kiosk_core::CoreError::Serde)?;
    send(&state, &device_id, frame)
}

pub async fn playlist_pause(State(state): State<AppState>, Path(device_id): Path<String>) -> Result<(), AppError> {
    send(&state, &device_id, Frame::bare(ev::PLAYLIST_PAUSE))
}

pub async fn playlist_resume(State(state): State<AppState>, Path(device_id): Path<String>) -> Result<(), AppError> {
    send(&state, &device_id, Frame::bare(ev::PLAYLIST_RESUME))
}

pub async fn playlist_next(State(state): State<AppState>, Path(device_id): Path<String>) -> Result<(), AppError> {
    send(&state, &device_id, Frame::bare(ev::PLAYLIST_NEXT))
}

pub async fn playlist_previous(State(state): State<AppState>, Path(device_id): Path<String>) -> Result<(), AppError> {
    send(&state, &device_id, Frame::bare(ev::PLAYLIST_PREVIOUS))
}
