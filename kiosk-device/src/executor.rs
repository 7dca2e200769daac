use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, NaiveTime, Timelike, Weekday};
use kiosk_proto::server::PlaylistItemWire;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::cache::ContentCache;
use crate::display::DisplayDriver;

/// Fallback rotation period when an item's `display_duration_ms` is zero.
/// Zero means "permanent" only when it is the sole valid item (the
/// single-item-loop case, spec §4.7 step 4); otherwise it rotates on this
/// default so one misconfigured item can't stall the whole playlist.
pub const DEFAULT_ROTATION_MS: u64 = 15_000;

/// ISO weekday number, Monday = 1 .. Sunday = 7, matching `chrono::Weekday::number_from_monday`.
#[must_use]
pub fn iso_weekday(weekday: Weekday) -> u8 {
    weekday.number_from_monday() as u8
}

/// Whether an item is eligible to display right now, per its optional
/// day-of-week and time-window constraints (spec §4.7, §3). An item with no
/// `days_of_week` entries has no day restriction; a missing window bound on
/// either side means that side is unconstrained.
#[must_use]
pub fn is_item_valid_at(item: &PlaylistItemWire, weekday_iso: u8, time_of_day: NaiveTime) -> bool {
    if !item.days_of_week.is_empty() && !item.days_of_week.contains(&weekday_iso) {
        return false;
    }
    let start = item.time_window_start.as_deref().and_then(parse_hhmm);
    let end = item.time_window_end.as_deref().and_then(parse_hhmm);
    match (start, end) {
        (Some(start), Some(end)) if start <= end => time_of_day >= start && time_of_day <= end,
        (Some(start), Some(end)) => time_of_day >= start || time_of_day <= end, // window wraps midnight
        (Some(start), None) => time_of_day >= start,
        (None, Some(end)) => time_of_day <= end,
        (None, None) => true,
    }
}

fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

/// Picks the next valid index after `from`, wrapping around once. Returns
/// `None` if no item is valid right now.
#[must_use]
pub fn next_valid_index(items: &[PlaylistItemWire], from: usize, weekday_iso: u8, time_of_day: NaiveTime) -> Option<usize> {
    if items.is_empty() {
        return None;
    }
    for step in 1..=items.len() {
        let candidate = (from + step) % items.len();
        if is_item_valid_at(&items[candidate], weekday_iso, time_of_day) {
            return Some(candidate);
        }
    }
    None
}

#[must_use]
pub fn valid_indices(items: &[PlaylistItemWire], weekday_iso: u8, time_of_day: NaiveTime) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| is_item_valid_at(item, weekday_iso, time_of_day))
        .map(|(i, _)| i)
        .collect()
}

#[derive(Debug, Clone, Copy)]
struct BroadcastSnapshot {
    index: usize,
    running: bool,
    paused: bool,
}

struct ExecutorState {
    playlist_id: i64,
    items: Vec<PlaylistItemWire>,
    index: usize,
    running: bool,
    paused: bool,
    broadcasting: bool,
    broadcast_snapshot: Option<BroadcastSnapshot>,
    last_rotation: Instant,
}

impl ExecutorState {
    fn new() -> Self {
        Self {
            playlist_id: 0,
            items: Vec::new(),
            index: 0,
            running: false,
            paused: false,
            broadcasting: false,
            broadcast_snapshot: None,
            last_rotation: Instant::now(),
        }
    }

    fn current(&self) -> Option<&PlaylistItemWire> {
        self.items.get(self.index)
    }
}

/// The rotation state machine a kiosk runs locally (spec §4.7): loads an
/// effective playlist pushed by `content:update`, advances through it on a
/// timer honoring per-item day/time constraints, and can be paused,
/// resumed, or momentarily replaced by a fleet broadcast.
pub struct PlaylistExecutor {
    state: Mutex<ExecutorState>,
    display: Arc<dyn DisplayDriver>,
    cache: Arc<dyn ContentCache>,
}

impl PlaylistExecutor {
    #[must_use]
    pub fn new(display: Arc<dyn DisplayDriver>, cache: Arc<dyn ContentCache>) -> Self {
        Self {
            state: Mutex::new(ExecutorState::new()),
            display,
            cache,
        }
    }

    pub async fn load_playlist(&self, playlist_id: i64, items: Vec<PlaylistItemWire>) {
        let mut sorted = items;
        sorted.sort_by_key(|i| i.order_index);
        let mut state = self.state.lock().await;
        state.playlist_id = playlist_id;
        state.items = sorted;
        state.index = 0;
        info!(playlist_id, item_count = state.items.len(), "loaded playlist");
        drop(state);
        self.show_current().await;
    }

    pub async fn start(&self) {
        let mut state = self.state.lock().await;
        state.running = true;
        state.paused = false;
        state.last_rotation = Instant::now();
        drop(state);
        self.show_current().await;
    }

    pub async fn stop(&self) {
        let mut state = self.state.lock().await;
        state.running = false;
    }

    pub async fn pause(&self) {
        let mut state = self.state.lock().await;
        state.paused = true;
    }

    pub async fn resume(&self) {
        let mut state = self.state.lock().await;
        state.paused = false;
        state.last_rotation = Instant::now();
    }

    pub async fn next(&self) {
        self.advance().await;
    }

    pub async fn previous(&self) {
        self.advance_back().await;
    }

    async fn advance(&self) {
        let moved = {
            let mut state = self.state.lock().await;
            if state.items.is_empty() {
                false
            } else {
                let (weekday, time_of_day) = now_parts();
                if let Some(next) = next_valid_index(&state.items, state.index, weekday, time_of_day) {
                    state.index = next;
                    state.last_rotation = Instant::now();
                    true
                } else {
                    false
                }
            }
        };
        if moved {
            self.show_current().await;
        }
    }

    async fn advance_back(&self) {
        let moved = {
            let mut state = self.state.lock().await;
            if state.items.is_empty() {
                false
            } else {
                let len = state.items.len();
                let (weekday, time_of_day) = now_parts();
                let mut candidate = (state.index + len - 1) % len;
                let mut found = false;
                for _ in 0..len {
                    if is_item_valid_at(&state.items[candidate], weekday, time_of_day) {
                        found = true;
                        break;
                    }
                    candidate = (candidate + len - 1) % len;
                }
                if found {
                    state.index = candidate;
                    state.last_rotation = Instant::now();
                }
                found
            }
        };
        if moved {
            self.show_current().await;
        }
    }

    /// Called on a regular tick by the caller's event loop. Advances to the
    /// next item if the current one's display duration has elapsed.
    pub async fn tick(&self) {
        let due = {
            let state = self.state.lock().await;
            if !state.running || state.paused || state.broadcasting {
                return;
            }
            if state.items.len() <= 1 {
                return; // single-item-loop: nothing to rotate to
            }
            let Some(item) = state.current() else { return };
            let duration_ms = if item.display_duration_ms == 0 {
                DEFAULT_ROTATION_MS
            } else {
                item.display_duration_ms
            };
            state.last_rotation.elapsed() >= Duration::from_millis(duration_ms)
        };
        if due {
            self.advance().await;
        }
    }

    pub async fn start_broadcast(&self) {
        let mut state = self.state.lock().await;
        if state.broadcasting {
            return;
        }
        state.broadcast_snapshot = Some(BroadcastSnapshot {
            index: state.index,
            running: state.running,
            paused: state.paused,
        });
        state.broadcasting = true;
    }

    pub async fn end_broadcast(&self) {
        let snapshot = {
            let mut state = self.state.lock().await;
            state.broadcasting = false;
            state.broadcast_snapshot.take()
        };
        if let Some(snapshot) = snapshot {
            let mut state = self.state.lock().await;
            state.index = snapshot.index;
            state.running = snapshot.running;
            state.paused = snapshot.paused;
            state.last_rotation = Instant::now();
            drop(state);
            self.show_current().await;
        }
    }

    async fn show_current(&self) {
        let (url, cacheable) = {
            let state = self.state.lock().await;
            if state.broadcasting {
                return;
            }
            match state.current() {
                Some(item) => (item.url.clone(), true),
                None => return,
            }
        };
        if cacheable && self.cache.is_cacheable(&url) {
            self.cache.wait_for_cache(&url).await;
            if let Some(local) = self.cache.local_path(&url) {
                self.display.navigate(&local).await;
                return;
            }
        }
        self.display.navigate(&url).await;
    }

    pub async fn snapshot(&self) -> PlaybackSnapshot {
        let state = self.state.lock().await;
        PlaybackSnapshot {
            is_playing: state.running && !state.paused && !state.broadcasting,
            is_paused: state.paused,
            is_broadcasting: state.broadcasting,
            current_item_id: state.current().map(|i| i.item_id),
            current_item_index: (!state.items.is_empty()).then_some(state.index),
            playlist_id: state.playlist_id,
            total_items: state.items.len(),
            current_url: state.current().map(|i| i.url.clone()),
        }
    }
}

pub struct PlaybackSnapshot {
    pub is_playing: bool,
    pub is_paused: bool,
    pub is_broadcasting: bool,
    pub current_item_id: Option<i64>,
    pub current_item_index: Option<usize>,
    pub playlist_id: i64,
    pub total_items: usize,
    pub current_url: Option<String>,
}

fn now_parts() -> (u8, NaiveTime) {
    let now = chrono::Local::now();
    let weekday = iso_weekday(now.weekday());
    let time = NaiveTime::from_hms_opt(now.hour(), now.minute(), now.second()).unwrap_or_default();
    (weekday, time)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, order_index: i32, duration_ms: u64) -> PlaylistItemWire {
        PlaylistItemWire {
            item_id: id,
            content_id: id,
            url: format!("https://example.test/{id}"),
            display_duration_ms: duration_ms,
            order_index,
            time_window_start: None,
            time_window_end: None,
            days_of_week: Vec::new(),
        }
    }

    #[test]
    fn unconstrained_item_is_always_valid() {
        let item = item(1, 0, 1000);
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert!(is_item_valid_at(&item, 3, noon));
    }

    #[test]
    fn day_restricted_item_invalid_on_other_days() {
        let mut item = item(1, 0, 1000);
        item.days_of_week = vec![6, 7]; // Saturday, Sunday
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert!(!is_item_valid_at(&item, 3, noon)); // Wednesday
        assert!(is_item_valid_at(&item, 6, noon));
    }

    #[test]
    fn time_window_excludes_outside_hours() {
        let mut item = item(1, 0, 1000);
        item.time_window_start = Some("09:00".to_string());
        item.time_window_end = Some("17:00".to_string());
        assert!(is_item_valid_at(&item, 1, NaiveTime::from_hms_opt(10, 0, 0).unwrap()));
        assert!(!is_item_valid_at(&item, 1, NaiveTime::from_hms_opt(20, 0, 0).unwrap()));
    }

    #[test]
    fn overnight_window_wraps_midnight() {
        let mut item = item(1, 0, 1000);
        item.time_window_start = Some("22:00".to_string());
        item.time_window_end = Some("06:00".to_string());
        assert!(is_item_valid_at(&item, 1, NaiveTime::from_hms_opt(23, 30, 0).unwrap()));
        assert!(is_item_valid_at(&item, 1, NaiveTime::from_hms_opt(2, 0, 0).unwrap()));
        assert!(!is_item_valid_at(&item, 1, NaiveTime::from_hms_opt(12, 0, 0).unwrap()));
    }

    #[test]
    fn next_valid_index_skips_invalid_and_wraps() {
        let mut a = item(1, 0, 1000);
        let b = item(2, 1, 1000);
        let mut c = item(3, 2, 1000);
        a.time_window_start = Some("00:00".to_string());
        a.time_window_end = Some("00:01".to_string());
        c.time_window_start = Some("00:00".to_string());
        c.time_window_end = Some("00:01".to_string());
        let items = vec![a, b, c];
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        // a and c are constrained out of the noon window; only b (index 1) is
        // valid, so advancing from b wraps all the way around back to itself.
        assert_eq!(next_valid_index(&items, 1, 1, noon), Some(1));
    }

    #[test]
    fn no_valid_items_returns_none() {
        let mut a = item(1, 0, 1000);
        a.time_window_start = Some("00:00".to_string());
        a.time_window_end = Some("00:01".to_string());
        let items = vec![a];
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap();
        assert_eq!(next_valid_index(&items, 0, 1, noon), None);
    }

    #[tokio::test]
    async fn load_playlist_sorts_by_order_index() {
        let executor = PlaylistExecutor::new(
            Arc::new(crate::display::LoggingDisplayDriver),
            Arc::new(crate::cache::NoopContentCache),
        );
        executor
            .load_playlist(1, vec![item(2, 1, 1000), item(1, 0, 1000)])
            .await;
        let snapshot = executor.snapshot().await;
        assert_eq!(snapshot.current_item_id, Some(1));
        assert_eq!(snapshot.total_items, 2);
    }

    #[tokio::test]
    async fn start_broadcast_then_end_restores_position() {
        let executor = PlaylistExecutor::new(
            Arc::new(crate::display::LoggingDisplayDriver),
            Arc::new(crate::cache::NoopContentCache),
        );
        executor
            .load_playlist(1, vec![item(1, 0, 1000), item(2, 1, 1000)])
            .await;
        executor.start().await;
        executor.next().await;
        let before = executor.snapshot().await;
        assert_eq!(before.current_item_id, Some(2));

        executor.start_broadcast().await;
        assert!(executor.snapshot().await.is_broadcasting);

        executor.end_broadcast().await;
        let after = executor.snapshot().await;
        assert!(!after.is_broadcasting);
        assert_eq!(after.current_item_id, Some(2));
    }
}
