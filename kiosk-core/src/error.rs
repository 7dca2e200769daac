use thiserror::Error;

/// Domain-level failures, matching the teacher's pattern of one `thiserror`
/// enum per crate with an HTTP-status mapping left to the server crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    #[error("content not found: {0}")]
    ContentNotFound(i64),

    #[error("playlist not found: {0}")]
    PlaylistNotFound(i64),

    #[error("playlist item not found: {0}")]
    PlaylistItemNotFound(i64),

    #[error("device is offline: {0}")]
    DeviceOffline(String),

    #[error("a broadcast is already active")]
    BroadcastAlreadyActive,

    #[error("no broadcast is active")]
    NoBroadcastActive,

    #[error("invalid bearer token: {0}")]
    InvalidToken(String),

    #[error("token expired")]
    TokenExpired,

    #[error("role mismatch: expected {expected}, got {actual}")]
    RoleMismatch { expected: String, actual: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;
