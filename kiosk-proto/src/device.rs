//! Payloads for device -> server events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sent once after connecting; the server attributes the connection from the
/// bearer token, not from this payload (see spec §4.4, §9 on the injection bug).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPayload {
    pub client_version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReportPayload {
    pub cpu_percent: Option<f64>,
    pub memory_percent: Option<f64>,
    pub disk_percent: Option<f64>,
    pub uptime_seconds: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatusValue {
    Online,
    Offline,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceStatusPayload {
    pub status: DeviceStatusValue,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReportPayload {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenshotUploadPayload {
    /// Base64-encoded image data.
    pub image_data: String,
    pub url: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackStateUpdatePayload {
    pub is_playing: bool,
    pub is_paused: bool,
    pub is_broadcasting: bool,
    pub current_item_id: Option<String>,
    pub current_item_index: Option<usize>,
    pub playlist_id: Option<i64>,
    pub total_items: usize,
    pub current_url: Option<String>,
    pub time_remaining_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreencastFramePayload {
    /// Base64-encoded JPEG/PNG frame.
    pub frame_data: String,
    pub sequence: u64,
}
