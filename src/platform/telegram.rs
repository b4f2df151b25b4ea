use anyhow::{Context, Result};
use async_trait::async_trait;
use teloxide::payloads::{GetUpdatesSetters, SendPhotoSetters};
use teloxide::requests::Requester;
use teloxide::types::{self as tg, ChatId, InputFile, UpdateKind};
use teloxide::Bot;
use tracing::debug;

use crate::platform::{Chat, IncomingMessage, Transport, Update, User};

/// Telegram transport. Updates are pulled with explicit offsets so the
/// dispatcher keeps ownership of the cursor.
pub struct TelegramClient {
    bot: Bot,
}

impl TelegramClient {
    /// `api_url` is the Bot API root, e.g. `https://api.telegram.org`.
    pub fn new(api_url: &str, token: &str) -> Result<Self> {
        let api_url = url::Url::parse(api_url)
            .with_context(|| format!("Invalid Telegram API url '{}'", api_url))?;

        Ok(Self {
            bot: Bot::new(token).set_api_url(api_url),
        })
    }
}

/// Only plain messages are kept; every other update kind maps to an
/// update without a message.
fn convert_update(update: tg::Update) -> Update {
    let id = i64::from(update.id.0);
    let message = match update.kind {
        UpdateKind::Message(msg) => Some(IncomingMessage {
            chat: Chat { id: msg.chat.id.0 },
            from: msg.from.as_ref().map(|user| User {
                username: user.username.clone(),
            }),
            text: msg.text().unwrap_or_default().to_string(),
        }),
        _ => None,
    };

    Update { id, message }
}

#[async_trait]
impl Transport for TelegramClient {
    async fn updates(&self, offset: i64, limit: u32) -> Result<Vec<Update>> {
        let offset = i32::try_from(offset).context("Update offset out of range")?;
        let limit = u8::try_from(limit).context("Update limit out of range")?;

        debug!("Polling Telegram updates from offset {}", offset);

        let updates = self
            .bot
            .get_updates()
            .offset(offset)
            .limit(limit)
            .await
            .context("getUpdates request failed")?;

        Ok(updates.into_iter().map(convert_update).collect())
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .await
            .context("sendMessage request failed")?;
        Ok(())
    }

    async fn send_photo(&self, chat_id: i64, photo_url: &str, caption: &str) -> Result<()> {
        let url = url::Url::parse(photo_url)
            .with_context(|| format!("Invalid photo url '{}'", photo_url))?;

        let mut request = self.bot.send_photo(ChatId(chat_id), InputFile::url(url));
        if !caption.is_empty() {
            request = request.caption(caption);
        }
        request.await.context("sendPhoto request failed")?;
        Ok(())
    }
}
