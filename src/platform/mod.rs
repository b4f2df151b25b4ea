#[cfg(test)]
pub mod fake;
pub mod telegram;

use anyhow::Result;
use async_trait::async_trait;

/// One raw notification from the provider's update feed.
#[derive(Debug, Clone)]
pub struct Update {
    pub id: i64,
    /// Absent for update kinds the bot does not handle (edits, callbacks, ...)
    pub message: Option<IncomingMessage>,
}

/// A message received in a chat
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub chat: Chat,
    pub from: Option<User>,
    /// Empty for photos, stickers and other non-text messages
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone)]
pub struct User {
    pub username: Option<String>,
}

impl IncomingMessage {
    pub fn username(&self) -> &str {
        self.from
            .as_ref()
            .and_then(|u| u.username.as_deref())
            .unwrap_or_default()
    }
}

/// The messaging side of the bot: pulling updates and sending replies.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch at most `limit` updates with `update_id >= offset`.
    async fn updates(&self, offset: i64, limit: u32) -> Result<Vec<Update>>;

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()>;

    async fn send_photo(&self, chat_id: i64, photo_url: &str, caption: &str) -> Result<()>;
}
