//! Core library for the passport collage bot
//!
//! Everything except the Telegram plumbing lives here, so it can be tested
//! without a bot token.
//!
//! # Module Structure
//!
//! - `config`: environment configuration and print geometry
//! - `copies`, `layout`, `composer`: copy count parsing and collage rendering
//! - `session`, `tempfiles`: pending photos and their files on disk
//! - `workflow`: the photo → count → collage conversation

pub mod composer;
pub mod config;
pub mod copies;
pub mod error;
pub mod layout;
pub mod logging;
pub mod session;
pub mod tempfiles;
pub mod workflow;

// Re-export commonly used types for convenience
pub use copies::{CopyCount, CopyCountError};
pub use error::{AppError, AppResult};
pub use layout::CollageLayout;
pub use logging::{init_logger, log_startup_configuration};
pub use session::{PendingPhoto, SessionStore, UserKey};
pub use tempfiles::TempWorkspace;
pub use workflow::{CollageWorkflow, ReplySink, TextOutcome};
