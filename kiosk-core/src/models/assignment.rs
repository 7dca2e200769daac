use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{AssignmentId, DeviceSurrogateId, PlaylistId};

/// Links a device to a playlist it should run (spec §3, many-to-many via
/// this join relation). Propagation (§4.5) reacts to rows changing here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicePlaylistAssignment {
    pub id: AssignmentId,
    pub device_id: DeviceSurrogateId,
    pub playlist_id: PlaylistId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignmentRequest {
    pub device_id: i64,
    pub playlist_id: i64,
}
