use dashmap::DashMap;
use kiosk_proto::Frame;
use tracing::warn;

use crate::error::{CoreError, CoreResult};
use crate::models::{AdminSession, DeviceId, DeviceSession, PlaybackState, UserId};

/// Tracks every live device and admin websocket connection (spec §4.2).
///
/// Invariant I1: at most one device session per `DeviceId` — `add_device`
/// evicts and returns any prior session for the same id so the caller can
/// close its socket. Many admin sessions may exist per `UserId`, keyed
/// independently by a per-connection id.
#[derive(Default)]
pub struct SessionRegistry {
    devices: DashMap<DeviceId, DeviceSession>,
    admins: DashMap<String, AdminSession>,
}

impl SessionRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a device session, evicting any prior session for the same
    /// `DeviceId`. The caller is responsible for closing the evicted
    /// session's socket (its outbound sender is dropped here, which alone
    /// causes its writer task to end).
    pub fn add_device(&self, session: DeviceSession) -> Option<DeviceSession> {
        self.devices.insert(session.device_id.clone(), session)
    }

    pub fn remove_device(&self, device_id: &DeviceId) -> Option<DeviceSession> {
        self.devices.remove(device_id).map(|(_, s)| s)
    }

    pub fn add_admin(&self, session: AdminSession) {
        self.admins.insert(session.connection_id.clone(), session);
    }

    pub fn remove_admin(&self, connection_id: &str) -> Option<AdminSession> {
        self.admins.remove(connection_id).map(|(_, s)| s)
    }

    #[must_use]
    pub fn is_connected(&self, device_id: &DeviceId) -> bool {
        self.devices.contains_key(device_id)
    }

    #[must_use]
    pub fn connected_device_ids(&self) -> Vec<DeviceId> {
        self.devices.iter().map(|e| e.key().clone()).collect()
    }

    #[must_use]
    pub fn admin_count_for(&self, user_id: &UserId) -> usize {
        self.admins.iter().filter(|e| &e.value().user_id == user_id).count()
    }

    /// Sends a frame to one device. Fails with `DeviceOffline` if the device
    /// isn't connected or its outbound queue is full (spec §4.3:
    /// backpressure closes the session rather than blocking the router).
    pub fn send_to_device(&self, device_id: &DeviceId, frame: Frame) -> CoreResult<()> {
        let session = self
            .devices
            .get(device_id)
            .ok_or_else(|| CoreError::DeviceOffline(device_id.to_string()))?;
        session.outbound.try_send(frame).map_err(|err| {
            warn!(device_id = %device_id, "outbound queue full, dropping session");
            drop(err);
            self.devices.remove(device_id);
            CoreError::DeviceOffline(device_id.to_string())
        })
    }

    /// Fans a frame out to every connected admin. Individual full queues are
    /// logged and the admin session is dropped; this never fails the caller
    /// (spec §4.4: admin fan-out is best-effort, no delivery guarantee).
    pub fn broadcast_to_admins(&self, frame: Frame) {
        let mut dead = Vec::new();
        for entry in self.admins.iter() {
            if entry.value().outbound.try_send(frame.clone()).is_err() {
                dead.push(entry.key().clone());
            }
        }
        for connection_id in dead {
            warn!(%connection_id, "admin outbound queue full, dropping session");
            self.admins.remove(&connection_id);
        }
    }

    /// Broadcasts a frame to every currently connected device (used by the
    /// Broadcast Coordinator, spec §4.8).
    pub fn broadcast_to_devices(&self, frame: Frame) -> Vec<DeviceId> {
        let mut dropped = Vec::new();
        for entry in self.devices.iter() {
            if entry.value().outbound.try_send(frame.clone()).is_err() {
                dropped.push(entry.key().clone());
            }
        }
        for device_id in &dropped {
            warn!(device_id = %device_id, "outbound queue full during broadcast, dropping session");
            self.devices.remove(device_id);
        }
        dropped
    }

    pub fn record_playback_state(&self, device_id: &DeviceId, state: PlaybackState) {
        if let Some(mut session) = self.devices.get_mut(device_id) {
            session.last_playback_state = Some(state);
        }
    }

    #[must_use]
    pub fn playback_state(&self, device_id: &DeviceId) -> Option<PlaybackState> {
        self.devices.get(device_id).and_then(|s| s.last_playback_state.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::outbound_channel;
    use chrono::Utc;

    fn device_session(id: &str) -> (DeviceSession, tokio::sync::mpsc::Receiver<Frame>) {
        let (tx, rx) = outbound_channel();
        (
            DeviceSession {
                device_id: DeviceId::from(id),
                connected_at: Utc::now(),
                outbound: tx,
                last_playback_state: None,
            },
            rx,
        )
    }

    #[test]
    fn reconnect_evicts_prior_session() {
        let registry = SessionRegistry::new();
        let (first, _rx1) = device_session("lobby-1");
        let (second, _rx2) = device_session("lobby-1");
        assert!(registry.add_device(first).is_none());
        let evicted = registry.add_device(second);
        assert!(evicted.is_some());
        assert_eq!(registry.connected_device_ids().len(), 1);
    }

    #[test]
    fn send_to_unknown_device_is_offline() {
        let registry = SessionRegistry::new();
        let err = registry
            .send_to_device(&DeviceId::from("ghost"), Frame::bare("display:refresh"))
            .unwrap_err();
        assert!(matches!(err, CoreError::DeviceOffline(_)));
    }

    #[test]
    fn send_to_connected_device_delivers_frame() {
        let registry = SessionRegistry::new();
        let (session, mut rx) = device_session("lobby-1");
        registry.add_device(session);
        registry
            .send_to_device(&DeviceId::from("lobby-1"), Frame::bare("display:refresh"))
            .unwrap();
        let frame = rx.try_recv().unwrap();
        assert_eq!(frame.event, "display:refresh");
    }
}
