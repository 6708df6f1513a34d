//! Bot API implementation of the workflow reply sink

use std::path::Path;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::InputFile;

use photocore::{config, AppResult, ReplySink};

/// Replies into one chat
#[derive(Clone)]
pub struct TelegramReply {
    bot: Bot,
    chat_id: ChatId,
    as_document: bool,
}

impl TelegramReply {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self {
            bot,
            chat_id,
            as_document: *config::COLLAGE_AS_DOCUMENT,
        }
    }
}

#[async_trait]
impl ReplySink for TelegramReply {
    async fn send_text(&self, text: &str) -> AppResult<()> {
        self.bot.send_message(self.chat_id, text).await?;
        Ok(())
    }

    async fn send_photo(&self, path: &Path) -> AppResult<()> {
        let file = InputFile::file(path.to_path_buf()).file_name("collage.jpg");
        if self.as_document {
            // documents keep the full resolution and the DPI tag
            self.bot.send_document(self.chat_id, file).await?;
        } else {
            self.bot.send_photo(self.chat_id, file).await?;
        }
        Ok(())
    }
}
