//! Conversation workflow: photo in, copy count in, collage out
//!
//! Transport-agnostic. The bot implements [`ReplySink`] on top of the Bot API;
//! tests use a recording sink.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use indoc::indoc;
use tempfile::TempPath;

use crate::composer;
use crate::copies::CopyCount;
use crate::error::{AppError, AppResult};
use crate::layout::CollageLayout;
use crate::session::{PendingPhoto, SessionStore, UserKey};
use crate::tempfiles::TempWorkspace;

pub const GREETING: &str = indoc! {"
    Hi! Send me a passport-size photo, and then send me an even number (2, 4, 6, 8).
    I'll make a collage for you!"};

pub const PHOTO_RECEIVED: &str = "Got your photo! Now send me an even number (2, 4, 6, 8) to make a collage.";

pub const GENERIC_FAILURE: &str = "Something went wrong while making your collage. Please try again.";

/// Outgoing side of one conversation
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send_text(&self, text: &str) -> AppResult<()>;

    async fn send_photo(&self, path: &Path) -> AppResult<()>;
}

/// Outcome of a text message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextOutcome {
    /// Collage sent, session cleared
    Delivered(CollageLayout),
    /// A corrective reply was sent, state unchanged (or photo dropped if unreadable)
    Rejected,
}

#[derive(Clone)]
pub struct CollageWorkflow {
    sessions: Arc<SessionStore>,
    workspace: TempWorkspace,
}

impl CollageWorkflow {
    pub fn new(sessions: Arc<SessionStore>, workspace: TempWorkspace) -> Self {
        Self { sessions, workspace }
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    pub fn workspace(&self) -> &TempWorkspace {
        &self.workspace
    }

    pub async fn on_start(&self, sink: &dyn ReplySink) -> AppResult<()> {
        sink.send_text(GREETING).await
    }

    /// Stores a freshly downloaded photo, replacing any earlier one
    pub async fn on_photo(&self, user: UserKey, photo: TempPath, sink: &dyn ReplySink) -> AppResult<()> {
        log::info!("Photo stored for user {}: {}", user, photo.display());
        self.sessions.put(user, PendingPhoto::new(photo));
        sink.send_text(PHOTO_RECEIVED).await
    }

    /// Handles a text message that should carry a copy count.
    ///
    /// Recoverable errors are answered with exactly one reply and reported as
    /// [`TextOutcome::Rejected`]; composition and transport failures propagate.
    pub async fn on_text(&self, user: UserKey, text: &str, sink: &dyn ReplySink) -> AppResult<TextOutcome> {
        match self.make_collage(user, text, sink).await {
            Ok(layout) => Ok(TextOutcome::Delivered(layout)),
            Err(err) => match err.user_message() {
                Some(reply) => {
                    log::info!("Rejected request from user {}: {}", user, err);
                    if matches!(err, AppError::SourceImageUnavailable { .. }) {
                        self.sessions.clear(user);
                    }
                    sink.send_text(&reply).await?;
                    Ok(TextOutcome::Rejected)
                }
                None => Err(err),
            },
        }
    }

    async fn make_collage(&self, user: UserKey, text: &str, sink: &dyn ReplySink) -> AppResult<CollageLayout> {
        // count first: "3" without a photo gets the count hint only
        let copies = CopyCount::parse(text)?;
        let photo = self.sessions.get(user).ok_or(AppError::PhotoMissing)?;

        let output = self.workspace.collage_file(user)?;
        let layout = {
            let photo = Arc::clone(&photo);
            let file = output.reopen()?;
            tokio::task::spawn_blocking(move || composer::compose_into(photo.path(), copies, file))
                .await
                .map_err(|e| AppError::CompositionFailed(format!("composer task failed: {}", e)))??
        };

        sink.send_photo(output.path()).await?;
        log::info!(
            "Collage of {} copies ({}x{}) sent to user {}",
            copies,
            layout.canvas_width,
            layout.canvas_height,
            user
        );

        self.sessions.clear(user);
        Ok(layout)
    }
}
