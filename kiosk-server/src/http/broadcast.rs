use axum::extract::State;
use axum::Json;
use kiosk_core::models::{Broadcast, StartBroadcastRequest};

use crate::http::error::AppError;
use crate::http::middleware::AuthedAdmin;
use crate::server::AppState;

pub async fn start_broadcast(
    State(state): State<AppState>,
    AuthedAdmin(user_id): AuthedAdmin,
    Json(req): Json<StartBroadcastRequest>,
) -> Result<Json<Broadcast>, AppError> {
    Ok(Json(state.ctx.broadcast.start(req, user_id)?))
}

pub async fn end_broadcast(State(state): State<AppState>, _admin: AuthedAdmin) -> Result<(), AppError> {
    state.ctx.broadcast.end()?;
    Ok(())
}

pub async fn broadcast_status(State(state): State<AppState>) -> Json<Option<Broadcast>> {
    Json(state.ctx.broadcast.active())
}
