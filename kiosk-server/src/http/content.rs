use axum::extract::{Path, State};
use axum::Json;
use kiosk_core::models::{Content, CreateContentRequest, UpdateContentRequest};

use crate::http::error::AppError;
use crate::server::AppState;

pub async fn create_content(
    State(state): State<AppState>,
    Json(req): Json<CreateContentRequest>,
) -> Result<Json<Content>, AppError> {
    Ok(Json(state.ctx.content.create(req).await?))
}

pub async fn list_content(State(state): State<AppState>) -> Result<Json<Vec<Content>>, AppError> {
    Ok(Json(state.ctx.content.list().await?))
}

pub async fn get_content(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Content>, AppError> {
    let content = state
        .ctx
        .content
        .get(id)
        .await?
        .ok_or(kiosk_core::CoreError::ContentNotFound(id))?;
    Ok(Json(content))
}

pub async fn update_content(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateContentRequest>,
) -> Result<Json<Content>, AppError> {
    Ok(Json(state.ctx.content.update(id, req).await?))
}

pub async fn delete_content(State(state): State<AppState>, Path(id): Path<i64>) -> Result<(), AppError> {
    state.ctx.content.delete(id).await?;
    Ok(())
}
