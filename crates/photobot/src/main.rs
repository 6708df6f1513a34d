use anyhow::Result;
use dotenvy::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::update_listeners::Polling;

use photobot::cli::{Cli, Commands};
use photobot::{create_bot, schema, setup_bot_commands, HandlerDeps};
use photocore::{
    composer, config, init_logger, log_startup_configuration, CollageWorkflow, CopyCount, SessionStore, TempWorkspace,
};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, token, temp directory, Bot API).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present (before any config is read)
    let _ = dotenv();

    // Log panics from handler tasks instead of losing them on stderr only
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
    }));

    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        Some(Commands::Run) | None => run_bot().await,
        Some(Commands::Compose { input, copies, output }) => run_compose(input, &copies, output).await,
    }
}

async fn run_bot() -> Result<()> {
    log::info!("Starting bot...");
    log_startup_configuration();

    let bot = create_bot()?;

    let me = bot
        .get_me()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to Bot API: {}", e))?;
    let bot_username = me.username.clone();
    log::info!("Bot username: {:?}, Bot ID: {}", bot_username, me.id);

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let workspace = TempWorkspace::from_config()?;
    let sessions = Arc::new(SessionStore::from_config());
    let cleanup_handle = Arc::clone(&sessions).spawn_cleanup_task(config::session::cleanup_interval());

    let workflow = CollageWorkflow::new(Arc::clone(&sessions), workspace);
    let deps = HandlerDeps::new(workflow, bot_username, me.id);

    // Pending photos from before a restart are gone, so stale counts would only confuse users
    let listener = Polling::builder(bot.clone()).drop_pending_updates().build();

    Dispatcher::builder(bot, schema(deps))
        .enable_ctrlc_handler()
        .build()
        .dispatch_with_listener(
            listener,
            LoggingErrorHandler::with_custom_text("An error from the update listener"),
        )
        .await;

    cleanup_handle.abort();
    log::info!("Dispatcher shutdown gracefully ({} pending photo(s) dropped)", sessions.len());
    Ok(())
}

/// Offline collage: same composer as the bot, local files only
async fn run_compose(input: PathBuf, copies: &str, output: PathBuf) -> Result<()> {
    let copies = CopyCount::parse(copies)
        .map_err(|e| anyhow::anyhow!("{} (accepted: {})", e, CopyCount::accepted_list()))?;

    let output_path = output.clone();
    let layout = tokio::task::spawn_blocking(move || composer::compose_file(&input, copies, &output)).await??;

    log::info!(
        "Wrote {} ({}x{} px, {} copies)",
        output_path.display(),
        layout.canvas_width,
        layout.canvas_height,
        layout.copies
    );
    println!("{}", output_path.display());
    Ok(())
}
