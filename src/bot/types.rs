use serde::{Deserialize, Serialize};

/// Author or mentioned user of a chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatUser {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub bot: bool,
}

/// Chat message forwarded by the gateway
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    pub guild_id: String,
    pub channel_id: String,
    pub author: ChatUser,
    #[serde(default)]
    pub mentions: Vec<ChatUser>,
    pub content: String,
}

impl InboundMessage {
    /// First mentioned user, falling back to the author
    pub fn target_user(&self) -> &ChatUser {
        self.mentions.first().unwrap_or(&self.author)
    }
}

/// What the gateway should do in response to a message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotReply {
    /// Text to post in the channel
    pub reply: Option<String>,
    /// Emoji to react to the message with
    pub reaction: Option<String>,
}

impl BotReply {
    pub fn text(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            reaction: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reply.is_none() && self.reaction.is_none()
    }
}
