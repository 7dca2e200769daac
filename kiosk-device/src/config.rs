use serde::Deserialize;

/// Device-side configuration, layered the same way as the server's
/// `AppConfig` (defaults, optional file, `KIOSK_DEVICE_*` env vars).
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    pub server_url: String,
    pub device_id: String,
    pub token: String,
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    #[serde(default = "default_reconnect_backoff_secs")]
    pub reconnect_backoff_secs: u64,
    #[serde(default = "default_health_report_interval_secs")]
    pub health_report_interval_secs: u64,
    #[serde(default = "default_state_report_interval_secs")]
    pub state_report_interval_secs: u64,
    #[serde(default)]
    pub log_filter: Option<String>,
}

const fn default_tick_interval_ms() -> u64 {
    1_000
}

const fn default_reconnect_backoff_secs() -> u64 {
    5
}

const fn default_health_report_interval_secs() -> u64 {
    60
}

/// Spec §4.7: the device emits its playback state on this cadence.
const fn default_state_report_interval_secs() -> u64 {
    5
}

impl DeviceConfig {
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/device").required(false))
            .add_source(
                config::Environment::with_prefix("KIOSK_DEVICE")
                    .separator("__")
                    .try_parsing(true),
            );
        let cfg = builder.build()?;
        Ok(cfg.try_deserialize()?)
    }
}
