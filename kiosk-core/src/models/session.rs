use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use kiosk_proto::Frame;

use super::id::{DeviceId, UserId};

/// Bounded outbound mailbox for one session (spec §4.3: "backpressure: 256
/// frame outbound queue; on overflow, close the session"). `kiosk-server`
/// owns the receiving half; the registry only ever holds the sender.
pub const OUTBOUND_QUEUE_CAPACITY: usize = 256;

pub type OutboundSender = mpsc::Sender<Frame>;
pub type OutboundReceiver = mpsc::Receiver<Frame>;

#[must_use]
pub fn outbound_channel() -> (OutboundSender, OutboundReceiver) {
    mpsc::channel(OUTBOUND_QUEUE_CAPACITY)
}

/// The last playback snapshot a device reported (spec §3, fed by
/// `playback:state:update`). Held in the registry so admins connecting
/// later can be caught up without replaying history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub is_paused: bool,
    pub is_broadcasting: bool,
    pub current_item_id: Option<i64>,
    pub current_item_index: Option<usize>,
    pub playlist_id: Option<i64>,
    pub total_items: usize,
    pub current_url: Option<String>,
    pub time_remaining_ms: Option<u64>,
    pub reported_at: DateTime<Utc>,
}

/// A live device connection, as tracked by the Session Registry (spec §4.2).
#[derive(Clone)]
pub struct DeviceSession {
    pub device_id: DeviceId,
    pub connected_at: DateTime<Utc>,
    pub outbound: OutboundSender,
    pub last_playback_state: Option<PlaybackState>,
}

/// A live admin connection. Many may exist per `UserId`.
#[derive(Clone)]
pub struct AdminSession {
    pub user_id: UserId,
    pub connection_id: String,
    pub connected_at: DateTime<Utc>,
    pub outbound: OutboundSender,
}
