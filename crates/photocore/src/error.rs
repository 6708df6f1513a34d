use std::path::PathBuf;
use thiserror::Error;

use crate::copies::{CopyCount, CopyCountError};

/// Centralized error type for the collage workflow
///
/// The first three variants are recovered locally: the user gets exactly one
/// reply telling them what to do next. The rest propagate to the dispatcher
/// endpoint, where they are logged.
///
/// # Example
///
/// ```no_run
/// use photocore::error::AppError;
///
/// fn report(err: &AppError) {
///     if let Some(reply) = err.user_message() {
///         println!("{}", reply);
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Non-numeric or unsupported copy count
    #[error("Invalid copy count: {0}")]
    InvalidInput(#[from] CopyCountError),

    /// Count received with no pending photo
    #[error("No pending photo for this user")]
    PhotoMissing,

    /// Stored photo cannot be opened or decoded
    #[error("Source image unavailable at {path}: {source}")]
    SourceImageUnavailable {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Resize/paste/encode failure
    #[error("Composition failed: {0}")]
    CompositionFailed(String),

    /// Download/upload failure at the messaging boundary
    #[error("Transport error: {0}")]
    Transport(String),

    /// IO errors (temp directory, temp files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// True for errors answered with a corrective reply instead of propagating
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AppError::InvalidInput(_) | AppError::PhotoMissing | AppError::SourceImageUnavailable { .. }
        )
    }

    /// Reply text for recoverable errors
    pub fn user_message(&self) -> Option<String> {
        match self {
            AppError::InvalidInput(CopyCountError::InvalidFormat(_)) => Some("Please send a valid number.".to_string()),
            AppError::InvalidInput(CopyCountError::OutOfRange(_)) => {
                Some(format!("Please send an even number: {}.", CopyCount::accepted_list()))
            }
            AppError::PhotoMissing => Some("Please send a photo first.".to_string()),
            AppError::SourceImageUnavailable { .. } => {
                Some("I couldn't read your photo. Please send it again.".to_string())
            }
            _ => None,
        }
    }
}

#[cfg(feature = "telegram")]
impl From<teloxide::RequestError> for AppError {
    fn from(err: teloxide::RequestError) -> Self {
        AppError::Transport(err.to_string())
    }
}

#[cfg(feature = "telegram")]
impl From<teloxide::DownloadError> for AppError {
    fn from(err: teloxide::DownloadError) -> Self {
        AppError::Transport(err.to_string())
    }
}

impl From<image::ImageError> for AppError {
    fn from(err: image::ImageError) -> Self {
        AppError::CompositionFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_kinds() {
        assert!(AppError::PhotoMissing.is_recoverable());
        assert!(AppError::InvalidInput(CopyCountError::OutOfRange(3)).is_recoverable());
        assert!(!AppError::CompositionFailed("boom".into()).is_recoverable());
        assert!(!AppError::Transport("timeout".into()).is_recoverable());
    }

    #[test]
    fn test_user_message_only_for_recoverable() {
        assert_eq!(
            AppError::PhotoMissing.user_message().as_deref(),
            Some("Please send a photo first.")
        );
        assert_eq!(
            AppError::InvalidInput(CopyCountError::OutOfRange(3)).user_message().as_deref(),
            Some("Please send an even number: 2, 4, 6, or 8.")
        );
        assert_eq!(
            AppError::InvalidInput(CopyCountError::InvalidFormat("abc".into()))
                .user_message()
                .as_deref(),
            Some("Please send a valid number.")
        );
        assert!(AppError::CompositionFailed("boom".into()).user_message().is_none());
        assert!(AppError::Config("no token".into()).user_message().is_none());
    }

    #[test]
    fn test_display_includes_cause() {
        let err = AppError::InvalidInput(CopyCountError::OutOfRange(10));
        assert!(err.to_string().contains("10"));
    }
}
