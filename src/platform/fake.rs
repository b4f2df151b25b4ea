//! In-process transport for tests: serves queued update batches and records
//! every reply.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use super::{Chat, IncomingMessage, Transport, Update, User};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text { chat_id: i64, text: String },
    Photo { chat_id: i64, photo_url: String, caption: String },
}

#[derive(Clone, Default)]
pub struct FakeTransport {
    batches: Arc<Mutex<VecDeque<Result<Vec<Update>, String>>>>,
    offsets: Arc<Mutex<Vec<i64>>>,
    sent: Arc<Mutex<Vec<Sent>>>,
    /// Sends still allowed to succeed; `None` means unlimited
    send_budget: Arc<Mutex<Option<usize>>>,
}

impl FakeTransport {
    pub fn push_batch(&self, updates: Vec<Update>) {
        self.batches.lock().unwrap().push_back(Ok(updates));
    }

    pub fn push_failure(&self, message: &str) {
        self.batches
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    pub fn fail_sends(&self) {
        self.fail_sends_after(0);
    }

    /// Let the next `count` sends through, then fail every one after them.
    pub fn fail_sends_after(&self, count: usize) {
        *self.send_budget.lock().unwrap() = Some(count);
    }

    /// Offsets passed to every `updates` call, in order
    pub fn requested_offsets(&self) -> Vec<i64> {
        self.offsets.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    fn record(&self, sent: Sent) -> Result<()> {
        if let Some(budget) = self.send_budget.lock().unwrap().as_mut() {
            if *budget == 0 {
                anyhow::bail!("connection reset");
            }
            *budget -= 1;
        }
        self.sent.lock().unwrap().push(sent);
        Ok(())
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn updates(&self, offset: i64, limit: u32) -> Result<Vec<Update>> {
        self.offsets.lock().unwrap().push(offset);
        match self.batches.lock().unwrap().pop_front() {
            Some(Ok(mut updates)) => {
                updates.truncate(limit as usize);
                Ok(updates)
            }
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => Ok(Vec::new()),
        }
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        self.record(Sent::Text {
            chat_id,
            text: text.to_string(),
        })
    }

    async fn send_photo(&self, chat_id: i64, photo_url: &str, caption: &str) -> Result<()> {
        self.record(Sent::Photo {
            chat_id,
            photo_url: photo_url.to_string(),
            caption: caption.to_string(),
        })
    }
}

pub fn text_update(id: i64, chat_id: i64, text: &str) -> Update {
    Update {
        id,
        message: Some(IncomingMessage {
            chat: Chat { id: chat_id },
            from: Some(User {
                username: Some("tester".to_string()),
            }),
            text: text.to_string(),
        }),
    }
}

pub fn unknown_update(id: i64) -> Update {
    Update { id, message: None }
}
