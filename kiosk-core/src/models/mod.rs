pub mod assignment;
pub mod broadcast;
pub mod content;
pub mod device;
pub mod id;
pub mod playlist;
pub mod session;

pub use assignment::{CreateAssignmentRequest, DevicePlaylistAssignment};
pub use broadcast::{Broadcast, BroadcastKind, StartBroadcastRequest};
pub use content::{Content, CreateContentRequest, UpdateContentRequest};
pub use device::{CreateDeviceRequest, Device, DeviceMetadata, DeviceStatus, UpdateDeviceRequest};
pub use id::{
    AssignmentId, ContentId, DeviceId, DeviceSurrogateId, PlaylistId, PlaylistItemId,
    ScreenshotId, UserId,
};
pub use playlist::{
    CreatePlaylistItemRequest, CreatePlaylistRequest, Playlist, PlaylistItem, ResolvedItem,
    UpdatePlaylistItemRequest, UpdatePlaylistRequest,
};
pub use session::{
    outbound_channel, AdminSession, DeviceSession, OutboundReceiver, OutboundSender,
    PlaybackState, OUTBOUND_QUEUE_CAPACITY,
};
