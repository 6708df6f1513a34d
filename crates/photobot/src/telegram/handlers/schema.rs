//! Dispatcher schema and handler chain builders

use teloxide::dispatching::{HandlerExt, UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;
use teloxide::types::Message;

use photocore::workflow::GENERIC_FAILURE;
use photocore::{AppError, AppResult, TextOutcome, UserKey};

use super::types::{HandlerDeps, HandlerError};
use crate::telegram::bot::{is_message_addressed_to_bot, strip_bot_mention, Command};
use crate::telegram::download::{download_photo, photo_file_id, user_key};
use crate::telegram::sink::TelegramReply;

/// Creates the main dispatcher schema for the Telegram bot.
///
/// Order matters: commands first, then photos, then plain text (copy counts).
pub fn schema(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_commands = deps.clone();
    let deps_photos = deps.clone();
    let deps_text = deps;

    dptree::entry()
        .branch(command_handler(deps_commands))
        .branch(photo_handler(deps_photos))
        .branch(text_handler(deps_text))
}

/// /start and /help
fn command_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    Update::filter_message().branch(dptree::entry().filter_command::<Command>().endpoint(
        move |bot: Bot, msg: Message, cmd: Command| {
            let deps = deps.clone();
            async move {
                log::info!("🎯 Received command: {:?} from chat {}", cmd, msg.chat.id);
                let sink = TelegramReply::new(bot, msg.chat.id);
                match cmd {
                    Command::Start | Command::Help => deps.workflow.on_start(&sink).await?,
                }
                Ok(())
            }
        },
    ))
}

/// Photo (or image document) uploads
fn photo_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_filter = deps.clone();

    Update::filter_message()
        .filter(|msg: Message| photo_file_id(&msg).is_some())
        .filter(move |msg: Message| {
            is_message_addressed_to_bot(&msg, deps_filter.bot_username.as_deref(), deps_filter.bot_id)
        })
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                let (Some(user), Some(file_id)) = (user_key(&msg), photo_file_id(&msg)) else {
                    log::debug!("Ignoring photo without a sender in chat {}", msg.chat.id);
                    return Ok(());
                };

                let sink = TelegramReply::new(bot.clone(), msg.chat.id);
                let result: AppResult<()> = async {
                    let photo = download_photo(&bot, deps.workflow.workspace(), user, file_id).await?;
                    deps.workflow.on_photo(user, photo, &sink).await
                }
                .await;

                if let Err(e) = result {
                    report_failure(&bot, msg.chat.id, user, &e).await;
                }
                Ok(())
            }
        })
}

/// Plain text: the copy count
fn text_handler(deps: HandlerDeps) -> UpdateHandler<HandlerError> {
    let deps_filter = deps.clone();

    Update::filter_message()
        .filter(|msg: Message| msg.text().is_some_and(|text| !text.starts_with('/')))
        .filter(move |msg: Message| {
            is_message_addressed_to_bot(&msg, deps_filter.bot_username.as_deref(), deps_filter.bot_id)
        })
        .endpoint(move |bot: Bot, msg: Message| {
            let deps = deps.clone();
            async move {
                let Some(user) = user_key(&msg) else {
                    log::debug!("Ignoring text without a sender in chat {}", msg.chat.id);
                    return Ok(());
                };
                let text = strip_bot_mention(msg.text().unwrap_or_default(), deps.bot_username.as_deref());
                log::debug!("Text from user {}: {:?}", user, text);

                let sink = TelegramReply::new(bot.clone(), msg.chat.id);
                match deps.workflow.on_text(user, &text, &sink).await {
                    Ok(TextOutcome::Delivered(layout)) => {
                        log::info!("✅ Delivered {} copies to user {}", layout.copies, user);
                    }
                    Ok(TextOutcome::Rejected) => {}
                    Err(e) => report_failure(&bot, msg.chat.id, user, &e).await,
                }
                Ok(())
            }
        })
}

/// Last stop for composition and transport failures: log, then tell the user
/// once if the transport still works.
async fn report_failure(bot: &Bot, chat_id: ChatId, user: UserKey, err: &AppError) {
    log::error!("❌ Collage request from user {} failed: {}", user, err);
    if let Err(e) = bot.send_message(chat_id, GENERIC_FAILURE).await {
        log::warn!("Failed to notify user {} about the failure: {}", user, e);
    }
}
