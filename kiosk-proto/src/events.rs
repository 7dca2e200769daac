//! Event name constants, grouped by direction (see spec §6).
//!
//! Kept as plain `&str` constants rather than an enum: the router treats
//! unrecognized names as a log-and-drop case, not a decode failure, so a
//! closed enum would fight that design rather than help it.

pub mod device_to_server {
    pub const REGISTER: &str = "device:register";
    pub const HEALTH_REPORT: &str = "health:report";
    pub const STATUS: &str = "device:status";
    pub const ERROR_REPORT: &str = "error:report";
    pub const SCREENSHOT_UPLOAD: &str = "screenshot:upload";
    pub const PLAYBACK_STATE_UPDATE: &str = "playback:state:update";
    pub const SCREENCAST_FRAME: &str = "screencast:frame";
}

pub mod server_to_device {
    pub const CONTENT_UPDATE: &str = "content:update";
    pub const DISPLAY_NAVIGATE: &str = "display:navigate";
    pub const DISPLAY_REFRESH: &str = "display:refresh";
    pub const SCREENSHOT_REQUEST: &str = "screenshot:request";
    pub const CONFIG_UPDATE: &str = "config:update";
    pub const DEVICE_RESTART: &str = "device:restart";
    pub const SCREENCAST_START: &str = "screencast:start";
    pub const SCREENCAST_STOP: &str = "screencast:stop";
    pub const REMOTE_CLICK: &str = "remote:click";
    pub const REMOTE_TYPE: &str = "remote:type";
    pub const REMOTE_KEY: &str = "remote:key";
    pub const REMOTE_SCROLL: &str = "remote:scroll";
    pub const PLAYLIST_PAUSE: &str = "playlist:pause";
    pub const PLAYLIST_RESUME: &str = "playlist:resume";
    pub const PLAYLIST_NEXT: &str = "playlist:next";
    pub const PLAYLIST_PREVIOUS: &str = "playlist:previous";
    pub const BROADCAST_START: &str = "broadcast:start";
    pub const BROADCAST_END: &str = "broadcast:end";
}

pub mod server_to_admin {
    pub const DEVICES_SYNC: &str = "admin:devices:sync";
    pub const DEVICE_CONNECTED: &str = "admin:device:connected";
    pub const DEVICE_DISCONNECTED: &str = "admin:device:disconnected";
    pub const DEVICE_STATUS: &str = "admin:device:status";
    pub const DEVICE_HEALTH: &str = "admin:device:health";
    pub const SCREENSHOT_RECEIVED: &str = "admin:screenshot:received";
    pub const ERROR: &str = "admin:error";
    pub const SCREENCAST_FRAME: &str = "admin:screencast:frame";
    pub const PLAYBACK_STATE: &str = "admin:playback:state";
}
