use serde::{Deserialize, Serialize};

use super::id::{ContentId, PlaylistId, PlaylistItemId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePlaylistRequest {
    pub name: Option<String>,
    pub is_active: Option<bool>,
}

/// A single slot in a playlist (spec §3). `display_duration_ms == 0` means
/// "permanent / no rotation trigger from this item alone" (see §4.7 step 4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub id: PlaylistItemId,
    pub playlist_id: PlaylistId,
    pub content_id: ContentId,
    pub display_duration_ms: u64,
    pub order_index: i32,
    pub time_window_start: Option<String>,
    pub time_window_end: Option<String>,
    /// Empty means "no day restriction" (§9 open question, resolved that way).
    pub days_of_week: Vec<u8>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistItemRequest {
    pub playlist_id: i64,
    pub content_id: i64,
    #[serde(default)]
    pub display_duration_ms: u64,
    pub order_index: i32,
    pub time_window_start: Option<String>,
    pub time_window_end: Option<String>,
    #[serde(default)]
    pub days_of_week: Vec<u8>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePlaylistItemRequest {
    pub display_duration_ms: Option<u64>,
    pub order_index: Option<i32>,
    pub time_window_start: Option<Option<String>>,
    pub time_window_end: Option<Option<String>>,
    pub days_of_week: Option<Vec<u8>>,
}

/// A playlist item joined with its content, the shape the resolver produces
/// (spec §4.6: "return its items sorted by orderIndex ascending, with Content
/// joined").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedItem {
    pub item_id: PlaylistItemId,
    pub content_id: ContentId,
    pub url: String,
    pub display_duration_ms: u64,
    pub order_index: i32,
    pub time_window_start: Option<String>,
    pub time_window_end: Option<String>,
    pub days_of_week: Vec<u8>,
}
