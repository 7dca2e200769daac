//! Persistence Adapter (spec §4.10). One `sqlx`-backed repository per
//! entity, behind a small trait so the service layer and tests can swap in
//! fakes without a database (see `mockall` derives used in service tests).

pub mod assignment;
pub mod content;
pub mod device;
pub mod playlist;
pub mod screenshot;

pub use assignment::{AssignmentRepository, PgAssignmentRepository};
pub use content::{ContentRepository, PgContentRepository};
pub use device::{DeviceRepository, PgDeviceRepository};
pub use playlist::{PgPlaylistRepository, PlaylistRepository};
pub use screenshot::{PgScreenshotRepository, ScreenshotRepository};
