//! Handler types and dependencies

use teloxide::types::UserId;

use photocore::CollageWorkflow;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub workflow: CollageWorkflow,
    pub bot_username: Option<String>,
    pub bot_id: UserId,
}

impl HandlerDeps {
    pub fn new(workflow: CollageWorkflow, bot_username: Option<String>, bot_id: UserId) -> Self {
        Self {
            workflow,
            bot_username,
            bot_id,
        }
    }
}
