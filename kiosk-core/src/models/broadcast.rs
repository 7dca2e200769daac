use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::UserId;

/// Kind of fleet-wide override the Broadcast Coordinator (spec §4.8) can push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadcastKind {
    Url,
    Message,
}

/// At most one of these is active at a time, fleet-wide (invariant I4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Broadcast {
    pub kind: BroadcastKind,
    pub content: String,
    pub duration_ms: u64,
    pub started_by: UserId,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StartBroadcastRequest {
    #[serde(rename = "type")]
    pub kind: BroadcastKind,
    pub content: String,
    #[serde(default)]
    pub duration_ms: u64,
}
