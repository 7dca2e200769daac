use std::sync::{Arc, Mutex};

use chrono::Utc;
use kiosk_proto::events::server_to_device::{BROADCAST_END, BROADCAST_START};
use kiosk_proto::server::{BroadcastKind as WireBroadcastKind, BroadcastStartPayload};
use kiosk_proto::Frame;
use tracing::info;

use crate::error::{CoreError, CoreResult};
use crate::models::{Broadcast, BroadcastKind, StartBroadcastRequest, UserId};
use crate::service::registry::SessionRegistry;

/// Enforces "at most one active broadcast fleet-wide" (spec §4.8, invariant
/// I4) and fans out `broadcast:start` / `broadcast:end` to every connected
/// device.
pub struct BroadcastCoordinator {
    registry: Arc<SessionRegistry>,
    active: Mutex<Option<Broadcast>>,
}

impl BroadcastCoordinator {
    #[must_use]
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self {
            registry,
            active: Mutex::new(None),
        }
    }

    pub fn start(&self, req: StartBroadcastRequest, started_by: UserId) -> CoreResult<Broadcast> {
        let mut guard = self.active.lock().expect("broadcast mutex poisoned");
        if guard.is_some() {
            return Err(CoreError::BroadcastAlreadyActive);
        }

        let broadcast = Broadcast {
            kind: req.kind,
            content: req.content.clone(),
            duration_ms: req.duration_ms,
            started_by,
            started_at: Utc::now(),
        };

        let wire_kind = match req.kind {
            BroadcastKind::Url => WireBroadcastKind::Url,
            BroadcastKind::Message => WireBroadcastKind::Message,
        };
        let payload = BroadcastStartPayload {
            kind: wire_kind,
            content: req.content,
            duration_ms: req.duration_ms,
        };
        let frame = Frame::new(BROADCAST_START, payload).map_err(CoreError::Serde)?;
        info!("starting fleet broadcast");
        self.registry.broadcast_to_devices(frame);

        *guard = Some(broadcast.clone());
        Ok(broadcast)
    }

    pub fn end(&self) -> CoreResult<()> {
        let mut guard = self.active.lock().expect("broadcast mutex poisoned");
        if guard.take().is_none() {
            return Err(CoreError::NoBroadcastActive);
        }
        drop(guard);
        info!("ending fleet broadcast");
        self.registry.broadcast_to_devices(Frame::bare(BROADCAST_END));
        Ok(())
    }

    #[must_use]
    pub fn active(&self) -> Option<Broadcast> {
        self.active.lock().expect("broadcast mutex poisoned").clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> StartBroadcastRequest {
        StartBroadcastRequest {
            kind: BroadcastKind::Message,
            content: "evacuate the building".to_string(),
            duration_ms: 0,
        }
    }

    #[test]
    fn second_start_while_active_is_rejected() {
        let coordinator = BroadcastCoordinator::new(Arc::new(SessionRegistry::new()));
        coordinator.start(request(), UserId::from("alice")).unwrap();
        let err = coordinator.start(request(), UserId::from("bob")).unwrap_err();
        assert!(matches!(err, CoreError::BroadcastAlreadyActive));
    }

    #[test]
    fn end_without_active_broadcast_errors() {
        let coordinator = BroadcastCoordinator::new(Arc::new(SessionRegistry::new()));
        assert!(matches!(coordinator.end(), Err(CoreError::NoBroadcastActive)));
    }

    #[test]
    fn end_clears_active_state() {
        let coordinator = BroadcastCoordinator::new(Arc::new(SessionRegistry::new()));
        coordinator.start(request(), UserId::from("alice")).unwrap();
        coordinator.end().unwrap();
        assert!(coordinator.active().is_none());
        coordinator.start(request(), UserId::from("alice")).unwrap();
    }
}
