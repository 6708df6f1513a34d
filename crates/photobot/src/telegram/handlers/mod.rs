//! Telegram bot handler tree configuration
//!
//! The handlers are organized in a testable way: the schema takes all its
//! dependencies through `HandlerDeps`, and the conversation logic itself lives
//! in `photocore::workflow`.

mod schema;
mod types;

pub use schema::schema;
pub use types::{HandlerDeps, HandlerError};
