use crate::models::{Content, PlaylistItem, ResolvedItem};

/// Resolves a device's effective playlist (spec §4.6): given the playlist
/// assigned to a device and its items joined with content, returns the
/// items sorted by `order_index` ascending. Pure and side-effect free so it
/// can be unit tested without a database or any running session.
///
/// Callers are expected to have already picked the single active playlist
/// for a device (lowest-id-wins, spec §9) before calling this — this
/// function only orders and joins, it does not pick among playlists.
#[must_use]
pub fn resolve_items(items: &[PlaylistItem], content_by_id: &dyn Fn(i64) -> Option<Content>) -> Vec<ResolvedItem> {
    let mut resolved: Vec<ResolvedItem> = items
        .iter()
        .filter_map(|item| {
            let content = content_by_id(item.content_id.get())?;
            Some(ResolvedItem {
                item_id: item.id,
                content_id: item.content_id,
                url: content.url,
                display_duration_ms: item.display_duration_ms,
                order_index: item.order_index,
                time_window_start: item.time_window_start.clone(),
                time_window_end: item.time_window_end.clone(),
                days_of_week: item.days_of_week.clone(),
            })
        })
        .collect();
    resolved.sort_by_key(|i| i.order_index);
    resolved
}

/// Picks the active playlist to resolve among several assigned to the same
/// device. Spec §9 left tie-break unspecified when a device somehow has more
/// than one active assignment; resolved here as lowest-id-wins, matching the
/// teacher's convention of treating primary keys as natural total order for
/// deterministic tie-breaks.
#[must_use]
pub fn pick_active_playlist_id(candidate_playlist_ids: &[i64]) -> Option<i64> {
    candidate_playlist_ids.iter().copied().min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentId, PlaylistId, PlaylistItemId};

    fn item(id: i64, content_id: i64, order_index: i32) -> PlaylistItem {
        PlaylistItem {
            id: PlaylistItemId(id),
            playlist_id: PlaylistId(1),
            content_id: ContentId(content_id),
            display_duration_ms: 5000,
            order_index,
            time_window_start: None,
            time_window_end: None,
            days_of_week: Vec::new(),
        }
    }

    fn content(id: i64) -> Content {
        Content {
            id: ContentId(id),
            name: format!("content-{id}"),
            url: format!("https://example.test/{id}"),
            description: None,
            interactive: false,
            thumbnail_url: None,
        }
    }

    #[test]
    fn sorts_by_order_index_regardless_of_input_order() {
        let items = vec![item(3, 30, 2), item(1, 10, 0), item(2, 20, 1)];
        let resolved = resolve_items(&items, &|id| Some(content(id)));
        let ids: Vec<i32> = resolved.iter().map(|i| i.order_index).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        assert_eq!(resolved[0].content_id.get(), 10);
    }

    #[test]
    fn items_with_missing_content_are_dropped() {
        let items = vec![item(1, 10, 0), item(2, 999, 1)];
        let resolved = resolve_items(&items, &|id| if id == 10 { Some(content(10)) } else { None });
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].content_id.get(), 10);
    }

    #[test]
    fn no_matching_items_returns_empty() {
        let resolved = resolve_items(&[], &|_| None);
        assert!(resolved.is_empty());
    }

    #[test]
    fn lowest_id_wins_among_active_candidates() {
        assert_eq!(pick_active_playlist_id(&[5, 2, 9]), Some(2));
        assert_eq!(pick_active_playlist_id(&[]), None);
    }
}
