//! Payloads for server -> device events.

use serde::{Deserialize, Serialize};

/// A single playlist item as pushed to a device. Carries everything the
/// executor needs to rotate without a second round trip: resolved content
/// URL, duration, ordering, and constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistItemWire {
    pub item_id: i64,
    pub content_id: i64,
    pub url: String,
    pub display_duration_ms: u64,
    pub order_index: i32,
    pub time_window_start: Option<String>,
    pub time_window_end: Option<String>,
    /// 0 = Sunday .. 6 = Saturday. Empty or absent means "no day restriction".
    #[serde(default)]
    pub days_of_week: Vec<u8>,
}

/// A full-state replacement of the device's effective playlist (spec §4.5, I5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentUpdatePayload {
    /// 0 when the device has no effective playlist.
    pub playlist_id: i64,
    pub items: Vec<PlaylistItemWire>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayNavigatePayload {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigUpdatePayload {
    pub config: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteClickPayload {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteTypePayload {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteKeyPayload {
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteScrollPayload {
    pub delta_x: f64,
    pub delta_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastKind {
    Url,
    Message,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastStartPayload {
    #[serde(rename = "type")]
    pub kind: BroadcastKind,
    /// The URL when `kind == Url`, or the message text when `kind == Message`.
    pub content: String,
    /// 0 means no auto-end; the device is responsible for the auto-end timer.
    #[serde(default)]
    pub duration_ms: u64,
}
