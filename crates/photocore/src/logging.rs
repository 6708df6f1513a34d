//! Logging initialization and startup diagnostics
//!
//! This module provides:
//! - Logger initialization (console + file)
//! - A one-time summary of the effective configuration

use anyhow::Result;
use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};
use std::fs::File;

use crate::config;

/// Initialize logger for both console and file output
///
/// # Arguments
/// * `log_file_path` - Path to the log file
///
/// # Returns
/// * `Ok(())` - Logger initialized successfully
/// * `Err(anyhow::Error)` - Failed to create the file or a logger was already set
pub fn init_logger(log_file_path: &str) -> Result<()> {
    let log_file = File::create(log_file_path).map_err(|e| anyhow::anyhow!("Failed to create log file: {}", e))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])
    .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

/// Logs the effective configuration at startup. Never prints the token itself.
pub fn log_startup_configuration() {
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    log::info!("Passport collage bot configuration");
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if config::BOT_TOKEN.is_some() {
        log::info!("✅ Bot token: set");
    } else {
        log::error!("❌ Bot token: not set (BOT_TOKEN / TELOXIDE_TOKEN / TOKEN)");
    }

    match config::BOT_API_URL.as_deref() {
        Some(url) => log::info!("Bot API URL: {}", url),
        None => log::info!("Bot API URL: default (api.telegram.org)"),
    }

    log::info!("Temp files: {}", config::TEMP_FILES_DIR.display());
    log::info!(
        "Collage delivery: {}",
        if *config::COLLAGE_AS_DOCUMENT { "document" } else { "photo" }
    );
    log::info!(
        "Print cell: {}x{} px at {} DPI",
        config::print::cell_width(),
        config::print::cell_height(),
        config::print::DPI
    );
    log::info!(
        "Pending photo TTL: {:?}, sweep every {:?}",
        config::session::ttl(),
        config::session::cleanup_interval()
    );
    log::info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}
