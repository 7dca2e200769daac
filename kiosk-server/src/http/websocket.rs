use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use kiosk_core::models::{
    outbound_channel, AdminSession, DeviceId, DeviceSession, DeviceStatus, PlaybackState,
};
use kiosk_proto::admin::{
    DeviceConnectedPayload, DeviceDisconnectedPayload, DeviceHealthPayload, DeviceStatusPayload as AdminDeviceStatusPayload,
    PlaybackStatePayload, ScreenshotReceivedPayload,
};
use kiosk_proto::device::{DeviceStatusValue, HealthReportPayload, PlaybackStateUpdatePayload, ScreenshotUploadPayload};
use kiosk_proto::events::{device_to_server as dev_ev, server_to_admin as admin_ev};
use kiosk_proto::Frame;
use nanoid::nanoid;
use tracing::{info, warn};

use crate::http::middleware::{AuthedAdmin, AuthedDevice};
use crate::server::AppState;

const MISSED_PONGS_BEFORE_CLOSE: u32 = 2;

pub async fn device_ws(
    State(state): State<AppState>,
    AuthedDevice(device_id): AuthedDevice,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| handle_device_socket(state, device_id, socket))
}

pub async fn admin_ws(
    State(state): State<AppState>,
    AuthedAdmin(user_id): AuthedAdmin,
    ws: WebSocketUpgrade,
) -> Response {
    ws.on_upgrade(move |socket| handle_admin_socket(state, user_id, socket))
}

async fn handle_device_socket(state: AppState, device_id: DeviceId, socket: WebSocket) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = outbound_channel();

    let evicted = state.ctx.registry.add_device(DeviceSession {
        device_id: device_id.clone(),
        connected_at: Utc::now(),
        outbound: tx,
        last_playback_state: None,
    });
    if evicted.is_some() {
        info!(device_id = %device_id, "evicted prior session on reconnect");
    }

    if let Err(err) = state.ctx.devices.set_status(device_id.as_str(), DeviceStatus::Online).await {
        warn!(device_id = %device_id, error = %err, "failed to mark device online");
    }
    notify_admins_device_connected(&state, &device_id);

    let heartbeat_interval = state.ctx.config.session.heartbeat_interval();
    let misses_allowed = state.ctx.config.session.heartbeat_misses_allowed;
    let missed_pongs = Arc::new(AtomicU32::new(0));
    let writer_missed = missed_pongs.clone();

    let writer = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(heartbeat_interval);
        ticker.tick().await;
        loop {
            tokio::select! {
                frame = rx.recv() => {
                    match frame {
                        Some(frame) => {
                            let Ok(text) = serde_json::to_string(&frame) else { continue };
                            if sink.send(Message::Text(text.into())).await.is_err() {
                                break;
                            }
                        }
                        None => break,
                    }
                }
                _ = ticker.tick() => {
                    if writer_missed.fetch_add(1, Ordering::SeqCst) > misses_allowed {
                        break;
                    }
                    if sink.send(Message::Ping(Vec::new().into())).await.is_err() {
                        break;
                    }
                }
            }
        }
        let _ = sink.close().await;
    });

    while let Some(Ok(msg)) = stream.next().await {
        match msg {
            Message::Text(text) => {
                missed_pongs.store(0, Ordering::SeqCst);
                match serde_json::from_str::<Frame>(&text) {
                    Ok(frame) => route_device_frame(&state, &device_id, frame).await,
                    Err(err) => warn!(device_id = %device_id, error = %err, "malformed frame from device"),
                }
            }
            Message::Pong(_) => {
                missed_pongs.store(0, Ordering::SeqCst);
            }
            Message::Close(_) => break,
            _ => {}
        }
        if writer.is_finished() {
            warn!(device_id = %device_id, "missed too many heartbeats, closing");
            break;
        }
    }

    writer.abort();
    state.ctx.registry.remove_device(&device_id);
    if let Err(err) = state.ctx.devices.set_status(device_id.as_str(), DeviceStatus::Offline).await {
        warn!(device_id = %device_id, error = %err, "failed to mark device offline");
    }
    notify_admins_device_disconnected(&state, &device_id);
}

async fn handle_admin_socket(state: AppState, user_id: kiosk_core::models::id::UserId, socket: WebSocket) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = outbound_channel();
    let connection_id = nanoid!();

    state.ctx.registry.add_admin(AdminSession {
        user_id: user_id.clone(),
        connection_id: connection_id.clone(),
        connected_at: Utc::now(),
        outbound: tx,
    });

    let device_ids = state.ctx.registry.connected_device_ids();
    let sync = Frame::new(
        admin_ev::DEVICES_SYNC,
        kiosk_proto::admin::DevicesSyncPayload {
            device_ids: device_ids.iter().map(ToString::to_string).collect(),
        },
    );
    if let Ok(sync) = sync {
        if let Ok(text) = serde_json::to_string(&sync) {
            let _ = sink.send(Message::Text(text.into())).await;
        }
    }

    let heartbeat_interval = state.ctx.config.session.heartbeat_interval();
    let misses_allowed = state.ctx.config.session.heartbeat_misses_allowed;
    let missed_pongs = Arc::new(AtomicU32::new(0));
    let writer_missed = missed_pongs.clone();

    let writer = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(heartbeat_interval);
        ticker.tick().await;
        loop {
            tokio::select! {
                frame = rx.recv() => {
                    match frame {
                        Some(frame) => {
                            let Ok(text) = serde_json::to_string(&frame) else { continue };
                            if sink.send(Message::Text(text.into())).await.is_err() {
                                break;
                            }
                        }
                        None => break,
                    }
                }
                _ = ticker.tick() => {
                    if writer_missed.fetch_add(1, Ordering::SeqCst) > misses_allowed {
                        break;
                    }
                    if sink.send(Message::Ping(Vec::new().into())).await.is_err() {
                        break;
                    }
                }
            }
        }
        let _ = sink.close().await;
    });

    while let Some(Ok(msg)) = stream.next().await {
        match msg {
            Message::Text(text) => {
                missed_pongs.store(0, Ordering::SeqCst);
                match serde_json::from_str::<Frame>(&text) {
                    Ok(frame) => route_admin_frame(&state, frame).await,
                    Err(err) => warn!(error = %err, "malformed frame from admin"),
                }
            }
            Message::Pong(_) => missed_pongs.store(0, Ordering::SeqCst),
            Message::Close(_) => break,
            _ => {}
        }
        if writer.is_finished() {
            break;
        }
    }

    writer.abort();
    state.ctx.registry.remove_admin(&connection_id);
}

/// Event Router, device → server direction (spec §4.4).
async fn route_device_frame(state: &AppState, device_id: &DeviceId, frame: Frame) {
    match frame.event.as_str() {
        dev_ev::REGISTER => {
            info!(device_id = %device_id, "device registered");
        }
        dev_ev::HEALTH_REPORT => {
            if let Ok(payload) = frame.payload_as::<HealthReportPayload>() {
                let fanout = Frame::new(
                    admin_ev::DEVICE_HEALTH,
                    DeviceHealthPayload {
                        device_id: device_id.to_string(),
                        health: payload,
                    },
                );
                if let Ok(fanout) = fanout {
                    state.ctx.registry.broadcast_to_admins(fanout);
                }
            }
        }
        dev_ev::STATUS => {
            if let Ok(payload) = frame.payload_as::<kiosk_proto::device::DeviceStatusPayload>() {
                let status = match payload.status {
                    DeviceStatusValue::Online => DeviceStatus::Online,
                    DeviceStatusValue::Offline => DeviceStatus::Offline,
                    DeviceStatusValue::Error => DeviceStatus::Error,
                };
                let _ = state.ctx.devices.set_status(device_id.as_str(), status).await;
                let fanout = Frame::new(
                    admin_ev::DEVICE_STATUS,
                    AdminDeviceStatusPayload {
                        device_id: device_id.to_string(),
                        status: payload.status,
                        last_seen: Utc::now(),
                    },
                );
                if let Ok(fanout) = fanout {
                    state.ctx.registry.broadcast_to_admins(fanout);
                }
            }
        }
        dev_ev::ERROR_REPORT => {
            if let Ok(payload) = frame.payload_as::<kiosk_proto::device::ErrorReportPayload>() {
                warn!(device_id = %device_id, code = %payload.code, message = %payload.message, "device reported error");
                let fanout = Frame::new(
                    admin_ev::ERROR,
                    kiosk_proto::admin::AdminErrorPayload {
                        device_id: device_id.to_string(),
                        code: payload.code,
                        message: payload.message,
                    },
                );
                if let Ok(fanout) = fanout {
                    state.ctx.registry.broadcast_to_admins(fanout);
                }
            }
        }
        dev_ev::SCREENSHOT_UPLOAD => {
            if let Ok(payload) = frame.payload_as::<ScreenshotUploadPayload>() {
                handle_screenshot_upload(state, device_id, payload).await;
            }
        }
        dev_ev::PLAYBACK_STATE_UPDATE => {
            if let Ok(payload) = frame.payload_as::<PlaybackStateUpdatePayload>() {
                let state_snapshot = PlaybackState {
                    is_playing: payload.is_playing,
                    is_paused: payload.is_paused,
                    is_broadcasting: payload.is_broadcasting,
                    current_item_id: payload.current_item_id.as_deref().and_then(|s| s.parse().ok()),
                    current_item_index: payload.current_item_index,
                    playlist_id: payload.playlist_id,
                    total_items: payload.total_items,
                    current_url: payload.current_url.clone(),
                    time_remaining_ms: payload.time_remaining_ms,
                    reported_at: Utc::now(),
                };
                state.ctx.registry.record_playback_state(device_id, state_snapshot);
                let fanout = Frame::new(
                    admin_ev::PLAYBACK_STATE,
                    PlaybackStatePayload {
                        device_id: device_id.to_string(),
                        state: payload,
                    },
                );
                if let Ok(fanout) = fanout {
                    state.ctx.registry.broadcast_to_admins(fanout);
                }
            }
        }
        dev_ev::SCREENCAST_FRAME => {
            if let Ok(payload) = frame.payload_as::<kiosk_proto::device::ScreencastFramePayload>() {
                let fanout = Frame::new(
                    admin_ev::SCREENCAST_FRAME,
                    kiosk_proto::admin::ScreencastFramePayload {
                        device_id: device_id.to_string(),
                        frame_data: payload.frame_data,
                        sequence: payload.sequence,
                    },
                );
                if let Ok(fanout) = fanout {
                    state.ctx.registry.broadcast_to_admins(fanout);
                }
            }
        }
        other => {
            warn!(device_id = %device_id, event = other, "unknown device event, dropping");
        }
    }
}

async fn handle_screenshot_upload(state: &AppState, device_id: &DeviceId, payload: ScreenshotUploadPayload) {
    let Ok(Some(device)) = state.ctx.devices.get_by_device_id(device_id.as_str()).await else {
        return;
    };
    let Ok(screenshot) = state
        .ctx
        .screenshots
        .record(device.id.get(), Some(payload.image_data), payload.url, payload.timestamp)
        .await
    else {
        return;
    };
    let fanout = Frame::new(
        admin_ev::SCREENSHOT_RECEIVED,
        ScreenshotReceivedPayload {
            device_id: device_id.to_string(),
            screenshot_id: screenshot.id.get(),
        },
    );
    if let Ok(fanout) = fanout {
        state.ctx.registry.broadcast_to_admins(fanout);
    }
}

/// Event Router, admin → server direction. Admins don't currently send
/// control frames over the socket (all control is REST, spec §4.9); any
/// inbound admin frame is logged and dropped.
async fn route_admin_frame(_state: &AppState, frame: Frame) {
    warn!(event = %frame.event, "unexpected frame from admin socket, dropping");
}

fn notify_admins_device_connected(state: &AppState, device_id: &DeviceId) {
    if let Ok(frame) = Frame::new(
        admin_ev::DEVICE_CONNECTED,
        DeviceConnectedPayload {
            device_id: device_id.to_string(),
        },
    ) {
        state.ctx.registry.broadcast_to_admins(frame);
    }
}

fn notify_admins_device_disconnected(state: &AppState, device_id: &DeviceId) {
    if let Ok(frame) = Frame::new(
        admin_ev::DEVICE_DISCONNECTED,
        DeviceDisconnectedPayload {
            device_id: device_id.to_string(),
        },
    ) {
        state.ctx.registry.broadcast_to_admins(frame);
    }
}
