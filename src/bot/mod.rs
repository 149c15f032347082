// Public API - what other modules can use
pub use commands::{Command, QuoteAction, QuoteCommand};
pub use handlers::{handle_message, preview_reminder};
pub use service::BotService;
pub use types::{BotReply, ChatUser, InboundMessage};

// Internal modules
mod commands;
pub mod format;
mod handlers;
mod service;
mod types;
