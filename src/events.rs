use thiserror::Error;

use crate::platform::Update;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EventError {
    #[error("unknown event type")]
    UnknownEventType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Message,
    Unknown,
}

/// Who sent a message and where to answer it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    pub chat_id: i64,
    pub username: String,
}

/// A unit of work derived from one [`Update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Message { text: String, meta: Meta },
    Unknown,
}

impl Event {
    pub fn kind(&self) -> EventType {
        match self {
            Event::Message { .. } => EventType::Message,
            Event::Unknown => EventType::Unknown,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Event::Message { text, .. } => text.as_str(),
            Event::Unknown => "",
        }
    }
}

impl From<Update> for Event {
    fn from(update: Update) -> Self {
        match update.message {
            Some(message) => {
                let meta = Meta {
                    chat_id: message.chat.id,
                    username: message.username().to_string(),
                };
                Event::Message {
                    text: message.text,
                    meta,
                }
            }
            None => Event::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{Chat, IncomingMessage, User};

    #[test]
    fn test_update_with_message() {
        let update = Update {
            id: 1,
            message: Some(IncomingMessage {
                chat: Chat { id: 55 },
                from: Some(User {
                    username: Some("cook".to_string()),
                }),
                text: "/meal".to_string(),
            }),
        };

        let event = Event::from(update);
        assert_eq!(event.kind(), EventType::Message);
        assert_eq!(event.text(), "/meal");
        assert_eq!(
            event,
            Event::Message {
                text: "/meal".to_string(),
                meta: Meta {
                    chat_id: 55,
                    username: "cook".to_string(),
                },
            }
        );
    }

    #[test]
    fn test_update_without_message() {
        let event = Event::from(Update { id: 2, message: None });
        assert_eq!(event.kind(), EventType::Unknown);
        assert_eq!(event.text(), "");
    }
}
