//! Configuration for the bot, read once from the environment.

use once_cell::sync::Lazy;
use secrecy::SecretString;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Bot token
/// Read from BOT_TOKEN, TELOXIDE_TOKEN or TOKEN environment variable (first non-empty wins)
/// Kept behind `SecretString` so it never shows up in Debug output or logs
pub static BOT_TOKEN: Lazy<Option<SecretString>> = Lazy::new(|| {
    ["BOT_TOKEN", "TELOXIDE_TOKEN", "TOKEN"]
        .iter()
        .filter_map(|key| env::var(key).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .map(SecretString::from)
});

/// Custom Bot API server URL (local telegram-bot-api)
/// Read from BOT_API_URL environment variable
pub static BOT_API_URL: Lazy<Option<String>> = Lazy::new(|| non_empty_var("BOT_API_URL"));

/// Temporary files directory for downloaded photos and composed collages
/// Read from TEMP_FILES_DIR environment variable
/// Defaults to `<system temp>/passport-collage`
pub static TEMP_FILES_DIR: Lazy<PathBuf> = Lazy::new(|| {
    non_empty_var("TEMP_FILES_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join("passport-collage"))
});

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: photobot.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| non_empty_var("LOG_FILE_PATH").unwrap_or_else(|| "photobot.log".to_string()));

/// Send the collage as a document instead of a compressed photo
/// Read from COLLAGE_AS_DOCUMENT environment variable ("1", "true", "yes")
/// Default: false
pub static COLLAGE_AS_DOCUMENT: Lazy<bool> = Lazy::new(|| {
    non_empty_var("COLLAGE_AS_DOCUMENT")
        .map(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
});

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Print geometry of a single passport photo
pub mod print {
    /// Physical width of one photo (inches)
    pub const WIDTH_INCH: f64 = 3.5;

    /// Physical height of one photo (inches)
    pub const HEIGHT_INCH: f64 = 4.5;

    /// Print resolution, also written into the output file
    pub const DPI: u16 = 300;

    /// Rows in every collage
    pub const ROWS: u32 = 2;

    /// JPEG quality of the composed collage
    pub const JPEG_QUALITY: u8 = 95;

    fn to_pixels(inches: f64) -> u32 {
        (inches * f64::from(DPI)).round() as u32
    }

    /// Cell width in pixels (1050)
    pub fn cell_width() -> u32 {
        to_pixels(WIDTH_INCH)
    }

    /// Cell height in pixels (1350)
    pub fn cell_height() -> u32 {
        to_pixels(HEIGHT_INCH)
    }
}

/// Pending photo retention
pub mod session {
    use super::{env, Duration, Lazy};

    /// Default idle time after which an unanswered photo is dropped (seconds)
    pub const DEFAULT_TTL_SECS: u64 = 3600;

    /// Default interval between eviction sweeps (seconds)
    pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 300;

    fn secs_var(key: &str, default: u64) -> u64 {
        env::var(key)
            .ok()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(default)
    }

    /// Read from SESSION_TTL_SECS environment variable
    pub static TTL_SECS: Lazy<u64> = Lazy::new(|| secs_var("SESSION_TTL_SECS", DEFAULT_TTL_SECS));

    /// Read from SESSION_CLEANUP_INTERVAL_SECS environment variable
    pub static CLEANUP_INTERVAL_SECS: Lazy<u64> =
        Lazy::new(|| secs_var("SESSION_CLEANUP_INTERVAL_SECS", DEFAULT_CLEANUP_INTERVAL_SECS));

    pub fn ttl() -> Duration {
        Duration::from_secs(*TTL_SECS)
    }

    pub fn cleanup_interval() -> Duration {
        Duration::from_secs(*CLEANUP_INTERVAL_SECS)
    }
}

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API calls (in seconds)
    /// Collage uploads can reach a few megabytes
    pub const REQUEST_TIMEOUT_SECS: u64 = 120;

    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}
