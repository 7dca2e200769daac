use axum::extract::{Path, State};
use axum::Json;
use kiosk_core::models::{
    CreateAssignmentRequest, CreatePlaylistItemRequest, CreatePlaylistRequest,
    DevicePlaylistAssignment, Playlist, PlaylistItem, UpdatePlaylistItemRequest, UpdatePlaylistRequest,
};
use tracing::warn;

use crate::http::error::AppError;
use crate::server::AppState;

pub async fn create_playlist(
    State(state): State<AppState>,
    Json(req): Json<CreatePlaylistRequest>,
) -> Result<Json<Playlist>, AppError> {
    Ok(Json(state.ctx.playlists.create(req).await?))
}

pub async fn list_playlists(State(state): State<AppState>) -> Result<Json<Vec<Playlist>>, AppError> {
    Ok(Json(state.ctx.playlists.list().await?))
}

pub async fn get_playlist(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Playlist>, AppError> {
    let playlist = state
        .ctx
        .playlists
        .get(id)
        .await?
        .ok_or(kiosk_core::CoreError::PlaylistNotFound(id))?;
    Ok(Json(playlist))
}

pub async fn update_playlist(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdatePlaylistRequest>,
) -> Result<Json<Playlist>, AppError> {
    let playlist = state.ctx.playlists.update(id, req).await?;
    propagate(&state, id).await;
    Ok(Json(playlist))
}

pub async fn delete_playlist(State(state): State<AppState>, Path(id): Path<i64>) -> Result<(), AppError> {
    state.ctx.playlists.delete(id).await?;
    propagate(&state, id).await;
    Ok(())
}

pub async fn list_items(
    State(state): State<AppState>,
    Path(playlist_id): Path<i64>,
) -> Result<Json<Vec<PlaylistItem>>, AppError> {
    Ok(Json(state.ctx.playlists.items_for_playlist(playlist_id).await?))
}

pub async fn add_item(
    State(state): State<AppState>,
    Json(req): Json<CreatePlaylistItemRequest>,
) -> Result<Json<PlaylistItem>, AppError> {
    let playlist_id = req.playlist_id;
    let item = state.ctx.playlists.add_item(req).await?;
    propagate(&state, playlist_id).await;
    Ok(Json(item))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path((playlist_id, item_id)): Path<(i64, i64)>,
    Json(req): Json<UpdatePlaylistItemRequest>,
) -> Result<Json<PlaylistItem>, AppError> {
    let item = state.ctx.playlists.update_item(item_id, req).await?;
    propagate(&state, playlist_id).await;
    Ok(Json(item))
}

pub async fn remove_item(
    State(state): State<AppState>,
    Path((playlist_id, item_id)): Path<(i64, i64)>,
) -> Result<(), AppError> {
    state.ctx.playlists.remove_item(item_id).await?;
    propagate(&state, playlist_id).await;
    Ok(())
}

pub async fn create_assignment(
    State(state): State<AppState>,
    Json(req): Json<CreateAssignmentRequest>,
) -> Result<Json<DevicePlaylistAssignment>, AppError> {
    let playlist_id = req.playlist_id;
    let assignment = state.ctx.assignments.create(req).await?;
    propagate(&state, playlist_id).await;
    Ok(Json(assignment))
}

pub async fn delete_assignment(
    State(state): State<AppState>,
    Path((playlist_id, assignment_id)): Path<(i64, i64)>,
) -> Result<(), AppError> {
    state.ctx.assignments.delete(assignment_id).await?;
    propagate(&state, playlist_id).await;
    Ok(())
}

/// Fires the Assignment Propagator (spec §4.5) after any mutation that can
/// change a device's effective playlist. Failures are logged, not
/// surfaced — the REST call already committed the mutation; propagation is
/// a best-effort push to whichever devices are online right now.
async fn propagate(state: &AppState, playlist_id: i64) {
    if let Err(err) = state.ctx.propagator.propagate_for_playlist(playlist_id).await {
        warn!(playlist_id, error = %err, "assignment propagation failed");
    }
}
