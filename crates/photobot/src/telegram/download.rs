//! Downloading user photos from Telegram into the temp workspace

use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{FileId, Message};
use tempfile::TempPath;

use photocore::{AppResult, TempWorkspace, UserKey};

/// File to fetch for a photo-bearing message: the largest `PhotoSize`, or an
/// image sent as a document (uncompressed).
pub fn photo_file_id(msg: &Message) -> Option<FileId> {
    if let Some(photos) = msg.photo() {
        return photos
            .iter()
            .max_by_key(|p| u64::from(p.width) * u64::from(p.height))
            .map(|p| p.file.id.clone());
    }

    msg.document()
        .filter(|doc| {
            doc.mime_type
                .as_ref()
                .is_some_and(|mime| mime.type_().as_str() == "image")
        })
        .map(|doc| doc.file.id.clone())
}

/// Sender used as the session key
pub fn user_key(msg: &Message) -> Option<UserKey> {
    msg.from.as_ref().map(|user| UserKey(user.id.0))
}

/// Downloads `file_id` into a fresh workspace file.
///
/// The returned path is deleted when dropped, so a failed download leaves
/// nothing behind.
pub async fn download_photo(bot: &Bot, workspace: &TempWorkspace, user: UserKey, file_id: FileId) -> AppResult<TempPath> {
    let file = bot.get_file(file_id).await?;
    let dest = workspace.photo_file(user)?;
    log::info!("📥 Downloading photo for user {} ({} bytes)", user, file.size);

    let mut dst = tokio::fs::File::create(&dest).await?;
    bot.download_file(&file.path, &mut dst).await?;
    dst.sync_all().await?;

    Ok(dest)
}
