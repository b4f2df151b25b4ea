use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, error, info};

use crate::events::{Event, EventError, Meta};
use crate::platform::Transport;
use crate::storage::MealStore;

/// Turns Telegram updates into events and answers them.
///
/// Owns the update cursor: after every non-empty fetch it points one past the
/// last update seen, so each update is handed out at most once.
pub struct EventProcessor<T, S> {
    pub(crate) transport: T,
    pub(crate) store: S,
    offset: i64,
}

impl<T: Transport, S: MealStore> EventProcessor<T, S> {
    pub fn new(transport: T, store: S) -> Self {
        Self {
            transport,
            store,
            offset: 0,
        }
    }

    /// Id of the next update to request
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Pull up to `limit` new updates and convert them into events.
    pub async fn fetch(&mut self, limit: u32) -> Result<Vec<Event>> {
        let updates = self
            .transport
            .updates(self.offset, limit)
            .await
            .context("error getting updates from Telegram")?;

        let Some(last) = updates.last() else {
            return Ok(Vec::new());
        };
        let next_offset = last.id + 1;

        let events: Vec<Event> = updates.into_iter().map(Event::from).collect();

        self.offset = self.offset.max(next_offset);
        debug!("Fetched {} events, next offset {}", events.len(), self.offset);

        Ok(events)
    }

    /// Handle one event. Only message events are supported.
    pub async fn process(&self, event: Event) -> Result<()> {
        debug!("Processing {:?} event: '{}'", event.kind(), event.text());

        match event {
            Event::Message { text, meta } => self.process_message(&text, &meta).await,
            Event::Unknown => Err(EventError::UnknownEventType.into()),
        }
    }

    async fn process_message(&self, text: &str, meta: &Meta) -> Result<()> {
        let result = self.reply_to_command(text, meta).await;

        self.handle_client_errors(result, meta.chat_id)
            .await
            .context("reply to command")
    }
}

/// Fetch-then-process loop. Runs until `shutdown` resolves; a fetch in
/// flight at that moment is dropped without moving the cursor.
pub async fn run<T, S, F>(
    mut processor: EventProcessor<T, S>,
    batch_size: u32,
    poll_interval: Duration,
    shutdown: F,
) -> Result<()>
where
    T: Transport,
    S: MealStore,
    F: Future<Output = ()>,
{
    info!("Polling for updates (batch size {})", batch_size);

    tokio::pin!(shutdown);

    loop {
        let fetched = tokio::select! {
            _ = &mut shutdown => break,
            fetched = processor.fetch(batch_size) => fetched,
        };

        let idle = match fetched {
            Ok(events) if events.is_empty() => true,
            Ok(events) => {
                for event in events {
                    if let Err(e) = processor.process(event).await {
                        error!("Failed to handle event: {:#}", e);
                    }
                }
                false
            }
            Err(e) => {
                error!("{:#}", e);
                true
            }
        };

        if idle {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(poll_interval) => {}
            }
        }
    }

    info!("Shutting down at offset {}", processor.offset());
    Ok(())
}
