//! Bot initialization and message routing utilities
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Message addressing logic (private chats, mentions, replies)

use reqwest::ClientBuilder;
use secrecy::ExposeSecret;
use teloxide::prelude::*;
use teloxide::types::{ChatKind, Message, MessageEntityKind, UserId};
use teloxide::utils::command::BotCommands;

use photocore::config;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    #[command(description = "how to make a passport photo collage")]
    Start,
    #[command(description = "same as /start")]
    Help,
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - No token configured, invalid URL, or HTTP client failure
pub fn create_bot() -> anyhow::Result<Bot> {
    let token = config::BOT_TOKEN
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("Bot token not set (BOT_TOKEN, TELOXIDE_TOKEN or TOKEN)"))?;

    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    let bot = Bot::with_client(token.expose_secret(), client);

    let bot = if let Some(bot_api_url) = config::BOT_API_URL.as_deref() {
        log::info!("Using custom Bot API URL: {}", bot_api_url);
        let url = url::Url::parse(bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
        bot.set_api_url(url)
    } else {
        bot
    };

    Ok(bot)
}

/// Sets up bot commands in Telegram UI
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}

/// Checks if a message is addressed to the bot
///
/// # Returns
/// * `true` if message is addressed to bot (private chat, bot mention, reply to bot message)
/// * `false` otherwise
pub fn is_message_addressed_to_bot(msg: &Message, bot_username: Option<&str>, bot_id: UserId) -> bool {
    // In private chats, all messages are addressed to the bot
    if matches!(msg.chat.kind, ChatKind::Private(_)) {
        return true;
    }

    if let Some(reply_to) = msg.reply_to_message() {
        if reply_to.from.as_ref().is_some_and(|from| from.id == bot_id) {
            return true;
        }
    }

    let (Some(text), Some(username)) = (msg.text().or_else(|| msg.caption()), bot_username) else {
        return false;
    };

    let mentioned_in_entities = msg.entities().or_else(|| msg.caption_entities()).is_some_and(|entities| {
        entities.iter().any(|entity| {
            matches!(entity.kind, MessageEntityKind::Mention)
                && utf16_slice(text, entity.offset, entity.length)
                    .as_deref()
                    .and_then(|mention| mention.strip_prefix('@'))
                    .is_some_and(|mention| mention.eq_ignore_ascii_case(username))
        })
    });

    mentioned_in_entities || text.contains(&format!("@{}", username))
}

/// Removes `@bot_username` from a text, so "@bot 4" parses as "4"
pub fn strip_bot_mention(text: &str, bot_username: Option<&str>) -> String {
    match bot_username {
        Some(username) => text.replace(&format!("@{}", username), "").trim().to_string(),
        None => text.trim().to_string(),
    }
}

/// Entity offsets are UTF-16 code units
fn utf16_slice(text: &str, offset: usize, length: usize) -> Option<String> {
    let units: Vec<u16> = text.encode_utf16().collect();
    let slice = units.get(offset..offset.checked_add(length)?)?;
    String::from_utf16(slice).ok()
}
