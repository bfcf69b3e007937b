use std::path::PathBuf;
use std::time::Duration;

pub const PRODUCTION_API_URL: &str = "https://gw2tp-production.up.railway.app/api";
pub const DEV_API_URL: &str = "http://127.0.0.1:8000/api";

pub const ADDON_NAME: &str = "GW2TP";
pub const SETTINGS_FILE: &str = "settings.json";

/// Fraction of a sale the seller keeps after the trading-post fees.
pub const TAX_RATE: f64 = 0.85;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_COMPLETIONS_PER_POLL: usize = 1;

// Overlay layout breakpoints, in pixels of window content width.
pub const LARGE_WINDOW_PX: f32 = 450.0;
pub const VERY_LARGE_WINDOW_PX: f32 = 750.0;

pub fn default_addon_dir() -> PathBuf {
    if let Some(config) = dirs::config_dir() {
        config.join("gw2tp")
    } else {
        PathBuf::from(".gw2tp")
    }
}

pub fn default_settings_path() -> PathBuf {
    default_addon_dir().join(SETTINGS_FILE)
}
