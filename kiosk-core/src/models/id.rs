//! Strongly-typed identifiers.
//!
//! `DeviceId` is the stable, human-chosen string a device authenticates as
//! (spec §3: "human-chosen and unique"). Every other entity uses a database
//! surrogate integer id. Keeping them as distinct wrapper types stops a raw
//! `i64` playlist id from being passed where a content id is expected.

use serde::{Deserialize, Serialize};

macro_rules! int_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(v: i64) -> Self {
                Self(v)
            }
        }
    };
}

int_id!(DeviceSurrogateId);
int_id!(ContentId);
int_id!(PlaylistId);
int_id!(PlaylistItemId);
int_id!(AssignmentId);
int_id!(ScreenshotId);

/// The stable string identity a device connects with (spec §3, §4.1).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(pub String);

impl DeviceId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DeviceId {
    fn from(v: String) -> Self {
        Self(v)
    }
}

impl From<&str> for DeviceId {
    fn from(v: &str) -> Self {
        Self(v.to_string())
    }
}

/// Admin user identity, extracted from an admin bearer token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for UserId {
    fn from(v: String) -> Self {
        Self(v)
    }
}
