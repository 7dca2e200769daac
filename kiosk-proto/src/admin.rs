//! Payloads for server -> admin events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::device::{DeviceStatusValue, HealthReportPayload, PlaybackStateUpdatePayload};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicesSyncPayload {
    pub device_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConnectedPayload {
    pub device_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceDisconnectedPayload {
    pub device_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceStatusPayload {
    pub device_id: String,
    pub status: DeviceStatusValue,
    pub last_seen: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceHealthPayload {
    pub device_id: String,
    #[serde(flatten)]
    pub health: HealthReportPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenshotReceivedPayload {
    pub device_id: String,
    pub screenshot_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminErrorPayload {
    pub device_id: String,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreencastFramePayload {
    pub device_id: String,
    pub frame_data: String,
    pub sequence: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackStatePayload {
    pub device_id: String,
    #[serde(flatten)]
    pub state: PlaybackStateUpdatePayload,
}
