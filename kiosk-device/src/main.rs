mod cache;
mod config;
mod display;
mod executor;
mod transport;

use std::sync::Arc;
use std::time::Duration;

use cache::NoopContentCache;
use chrono::Utc;
use config::DeviceConfig;
use display::{DisplayDriver, LoggingDisplayDriver};
use executor::PlaylistExecutor;
use kiosk_proto::device::{
    HealthReportPayload, PlaybackStateUpdatePayload, RegisterPayload, ScreenshotUploadPayload,
};
use kiosk_proto::events::{device_to_server as dev_ev, server_to_device as srv_ev};
use kiosk_proto::server::{BroadcastStartPayload, ConfigUpdatePayload, ContentUpdatePayload, DisplayNavigatePayload};
use kiosk_proto::Frame;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = DeviceConfig::load()?;
    init_logging(config.log_filter.as_deref());

    let display = Arc::new(LoggingDisplayDriver);
    let cache = Arc::new(NoopContentCache);
    let executor = Arc::new(PlaylistExecutor::new(display.clone(), cache));

    loop {
        if let Err(err) = run_session(&config, &executor, display.clone()).await {
            error!(error = %err, "session ended, reconnecting");
        }
        tokio::time::sleep(Duration::from_secs(config.reconnect_backoff_secs)).await;
    }
}

fn init_logging(filter: Option<&str>) {
    let filter = EnvFilter::try_new(filter.unwrap_or("info")).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run_session(
    config: &DeviceConfig,
    executor: &Arc<PlaylistExecutor>,
    display: Arc<LoggingDisplayDriver>,
) -> anyhow::Result<()> {
    let transport = transport::connect(&config.server_url, &config.token).await?;
    info!(device_id = %config.device_id, "connected");

    let register = Frame::new(
        dev_ev::REGISTER,
        RegisterPayload {
            client_version: Some(env!("CARGO_PKG_VERSION").to_string()),
        },
    )?;
    transport.outbound.send(register).await.ok();

    let mut tick = tokio::time::interval(Duration::from_millis(config.tick_interval_ms));
    let mut health = tokio::time::interval(Duration::from_secs(config.health_report_interval_secs));
    let mut state_report = tokio::time::interval(Duration::from_secs(config.state_report_interval_secs));

    let mut inbound = transport.inbound;
    let outbound = transport.outbound;

    loop {
        tokio::select! {
            frame = inbound.recv() => {
                match frame {
                    Some(frame) => handle_frame(frame, executor, &display, &outbound).await,
                    None => return Ok(()),
                }
            }
            _ = tick.tick() => {
                executor.tick().await;
            }
            _ = health.tick() => {
                let payload = HealthReportPayload {
                    cpu_percent: None,
                    memory_percent: None,
                    disk_percent: None,
                    uptime_seconds: None,
                };
                if let Ok(frame) = Frame::new(dev_ev::HEALTH_REPORT, payload) {
                    let _ = outbound.send(frame).await;
                }
            }
            _ = state_report.tick() => {
                let snapshot = executor.snapshot().await;
                let payload = PlaybackStateUpdatePayload {
                    is_playing: snapshot.is_playing,
                    is_paused: snapshot.is_paused,
                    is_broadcasting: snapshot.is_broadcasting,
                    current_item_id: snapshot.current_item_id.map(|id| id.to_string()),
                    current_item_index: snapshot.current_item_index,
                    playlist_id: (snapshot.playlist_id != 0).then_some(snapshot.playlist_id),
                    total_items: snapshot.total_items,
                    current_url: snapshot.current_url,
                    time_remaining_ms: None,
                };
                if let Ok(frame) = Frame::new(dev_ev::PLAYBACK_STATE_UPDATE, payload) {
                    let _ = outbound.send(frame).await;
                }
            }
        }
    }
}

async fn handle_frame(
    frame: Frame,
    executor: &Arc<PlaylistExecutor>,
    display: &Arc<LoggingDisplayDriver>,
    outbound: &mpsc::Sender<Frame>,
) {
    match frame.event.as_str() {
        srv_ev::CONTENT_UPDATE => {
            if let Ok(payload) = frame.payload_as::<ContentUpdatePayload>() {
                executor.load_playlist(payload.playlist_id, payload.items).await;
                executor.start().await;
            }
        }
        srv_ev::PLAYLIST_PAUSE => executor.pause().await,
        srv_ev::PLAYLIST_RESUME => executor.resume().await,
        srv_ev::PLAYLIST_NEXT => executor.next().await,
        srv_ev::PLAYLIST_PREVIOUS => executor.previous().await,
        srv_ev::DISPLAY_NAVIGATE => {
            if let Ok(payload) = frame.payload_as::<DisplayNavigatePayload>() {
                display.navigate(&payload.url).await;
            }
        }
        srv_ev::DISPLAY_REFRESH => {
            info!("display refresh requested");
        }
        srv_ev::CONFIG_UPDATE => {
            if let Ok(payload) = frame.payload_as::<ConfigUpdatePayload>() {
                info!(config = %payload.config, "config update received");
            }
        }
        srv_ev::DEVICE_RESTART => {
            warn!("restart requested, exiting process");
            std::process::exit(0);
        }
        srv_ev::SCREENSHOT_REQUEST => {
            if let Some(image_data) = display.capture_screenshot().await {
                let payload = ScreenshotUploadPayload {
                    image_data,
                    url: None,
                    timestamp: Utc::now(),
                };
                if let Ok(frame) = Frame::new(dev_ev::SCREENSHOT_UPLOAD, payload) {
                    let _ = outbound.send(frame).await;
                }
            }
        }
        srv_ev::BROADCAST_START => {
            if let Ok(payload) = frame.payload_as::<BroadcastStartPayload>() {
                executor.start_broadcast().await;
                use kiosk_proto::server::BroadcastKind;
                match payload.kind {
                    BroadcastKind::Url => display.navigate(&payload.content).await,
                    BroadcastKind::Message => display.show_message(&payload.content).await,
                }
            }
        }
        srv_ev::BROADCAST_END => {
            executor.end_broadcast().await;
        }
        srv_ev::REMOTE_CLICK | srv_ev::REMOTE_TYPE | srv_ev::REMOTE_KEY | srv_ev::REMOTE_SCROLL => {
            match frame.event.as_str() {
                srv_ev::REMOTE_CLICK => {
                    if let Ok(p) = frame.payload_as::<kiosk_proto::server::RemoteClickPayload>() {
                        display.click(p.x, p.y).await;
                    }
                }
                srv_ev::REMOTE_TYPE => {
                    if let Ok(p) = frame.payload_as::<kiosk_proto::server::RemoteTypePayload>() {
                        display.type_text(&p.text).await;
                    }
                }
                srv_ev::REMOTE_KEY => {
                    if let Ok(p) = frame.payload_as::<kiosk_proto::server::RemoteKeyPayload>() {
                        display.press_key(&p.key).await;
                    }
                }
                srv_ev::REMOTE_SCROLL => {
                    if let Ok(p) = frame.payload_as::<kiosk_proto::server::RemoteScrollPayload>() {
                        display.scroll(p.delta_x, p.delta_y).await;
                    }
                }
                _ => unreachable!(),
            }
        }
        srv_ev::SCREENCAST_START | srv_ev::SCREENCAST_STOP => {
            debug_log_unhandled(&frame.event);
        }
        other => warn!(event = other, "unknown server event, dropping"),
    }
}

fn debug_log_unhandled(event: &str) {
    tracing::debug!(event, "screencast control received, no capture driver wired in");
}
