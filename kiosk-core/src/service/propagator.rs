use std::sync::Arc;

use kiosk_proto::events::server_to_device::CONTENT_UPDATE;
use kiosk_proto::server::{ContentUpdatePayload, PlaylistItemWire};
use kiosk_proto::Frame;
use tracing::{info, warn};

use crate::error::CoreResult;
use crate::models::DeviceId;
use crate::repository::{AssignmentRepository, ContentRepository, DeviceRepository, PlaylistRepository};
use crate::service::registry::SessionRegistry;
use crate::service::resolver::{pick_active_playlist_id, resolve_items};

/// Recomputes and pushes `content:update` frames after a playlist, item, or
/// assignment mutation (spec §4.5). Only devices currently online receive a
/// push; offline devices simply pick up the new state on next connect via
/// whatever bootstrap the caller wires in (not this type's concern).
pub struct AssignmentPropagator {
    devices: Arc<dyn DeviceRepository>,
    playlists: Arc<dyn PlaylistRepository>,
    assignments: Arc<dyn AssignmentRepository>,
    content: Arc<dyn ContentRepository>,
    registry: Arc<SessionRegistry>,
}

impl AssignmentPropagator {
    #[must_use]
    pub const fn new(
        devices: Arc<dyn DeviceRepository>,
        playlists: Arc<dyn PlaylistRepository>,
        assignments: Arc<dyn AssignmentRepository>,
        content: Arc<dyn ContentRepository>,
        registry: Arc<SessionRegistry>,
    ) -> Self {
        Self {
            devices,
            playlists,
            assignments,
            content,
            registry,
        }
    }

    /// Recomputes and pushes the effective playlist for a single device,
    /// identified by its surrogate id. No-op if the device isn't connected.
    pub async fn propagate_to_device(&self, device_surrogate_id: i64, device_id: &DeviceId) -> CoreResult<()> {
        if !self.registry.is_connected(device_id) {
            return Ok(());
        }

        let playlist_ids = self.assignments.playlist_ids_for_device(device_surrogate_id).await?;
        let Some(active_playlist_id) = pick_active_playlist_id(&playlist_ids) else {
            let payload = ContentUpdatePayload {
                playlist_id: 0,
                items: Vec::new(),
            };
            self.push(device_id, payload)?;
            return Ok(());
        };

        let items = self.playlists.items_for_playlist(active_playlist_id).await?;
        let content = self.content.clone();
        let mut resolved_with_content = Vec::with_capacity(items.len());
        for item in &items {
            if let Some(c) = content.get(item.content_id.get()).await? {
                resolved_with_content.push((item.clone(), c));
            }
        }
        let wire_items: Vec<PlaylistItemWire> = {
            let by_id = |id: i64| resolved_with_content.iter().find(|(i, _)| i.content_id.get() == id).map(|(_, c)| c.clone());
            resolve_items(&items, &by_id)
                .into_iter()
                .map(|r| PlaylistItemWire {
                    item_id: r.item_id.get(),
                    content_id: r.content_id.get(),
                    url: r.url,
                    display_duration_ms: r.display_duration_ms,
                    order_index: r.order_index,
                    time_window_start: r.time_window_start,
                    time_window_end: r.time_window_end,
                    days_of_week: r.days_of_week,
                })
                .collect()
        };

        let payload = ContentUpdatePayload {
            playlist_id: active_playlist_id,
            items: wire_items,
        };
        self.push(device_id, payload)
    }

    /// Propagates to every device assigned the given playlist. Called after
    /// a playlist or playlist-item mutation (spec §4.5: "the server must
    /// recompute the effective playlist for every affected device").
    pub async fn propagate_for_playlist(&self, playlist_id: i64) -> CoreResult<()> {
        let device_surrogate_ids = self.assignments.device_ids_for_playlist(playlist_id).await?;
        for surrogate_id in device_surrogate_ids {
            let Some(device) = self.devices.get_by_surrogate_id(surrogate_id).await? else {
                continue;
            };
            if let Err(err) = self.propagate_to_device(surrogate_id, &device.device_id).await {
                warn!(device_id = %device.device_id, error = %err, "propagation failed");
            }
        }
        Ok(())
    }

    fn push(&self, device_id: &DeviceId, payload: ContentUpdatePayload) -> CoreResult<()> {
        let frame = Frame::new(CONTENT_UPDATE, payload).map_err(crate::error::CoreError::Serde)?;
        info!(device_id = %device_id, "pushing content:update");
        self.registry.send_to_device(device_id, frame)
    }
}
