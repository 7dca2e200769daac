use axum::extract::{Path, State};
use axum::Json;
use kiosk_core::repository::screenshot::Screenshot;

use crate::http::error::AppError;
use crate::server::AppState;

pub async fn latest_screenshot(
    State(state): State<AppState>,
    Path(device_surrogate_id): Path<i64>,
) -> Result<Json<Screenshot>, AppError> {
    let screenshot = state
        .ctx
        .screenshots
        .latest_for_device(device_surrogate_id)
        .await?
        .ok_or_else(|| kiosk_core::CoreError::DeviceNotFound(device_surrogate_id.to_string()))?;
    Ok(Json(screenshot))
}
