//! Passport collage bot: Telegram side
//!
//! Collage logic, sessions and configuration live in `photocore`; this crate
//! wires them to the Bot API.
//!
//! # Module Structure
//!
//! - `cli`: command line interface
//! - `telegram`: bot creation, dispatcher schema, reply sink, photo download

pub mod cli;
pub mod telegram;

pub use telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};
