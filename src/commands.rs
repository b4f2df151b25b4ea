use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::bot::EventProcessor;
use crate::events::Meta;
use crate::meal::{self, MealError};
use crate::messages::{
    MSG_ADD_SAMPLE, MSG_HELLO, MSG_HELP, MSG_NO_MEALS, MSG_SAVED, MSG_UNKNOWN_COMMAND,
};
use crate::platform::Transport;
use crate::storage::{MealStore, StoreError};

const ADD_MEAL_CMD: &str = "/add";
const ADD_SAMPLE_CMD: &str = "/add_sample";
const MEAL_CMD: &str = "/meal";
const HELP_CMD: &str = "/help";
const START_CMD: &str = "/start";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Meal,
    Help,
    Start,
    AddSample,
    AddMeal,
    Unknown,
}

impl Command {
    /// Exact commands win over `/add`, which matches anywhere in the text.
    pub fn parse(text: &str) -> Self {
        match text.trim() {
            MEAL_CMD => Command::Meal,
            HELP_CMD => Command::Help,
            START_CMD => Command::Start,
            ADD_SAMPLE_CMD => Command::AddSample,
            other if other.contains(ADD_MEAL_CMD) => Command::AddMeal,
            _ => Command::Unknown,
        }
    }
}

impl<T: Transport, S: MealStore> EventProcessor<T, S> {
    pub(crate) async fn reply_to_command(&self, text: &str, meta: &Meta) -> Result<()> {
        let text = text.trim();
        let chat_id = meta.chat_id;

        info!("Got new command '{}' from '{}'", text, meta.username);

        match Command::parse(text) {
            Command::Meal => self.send_random_meal(chat_id).await,
            Command::Help => self.transport.send_message(chat_id, MSG_HELP).await,
            Command::Start => self.transport.send_message(chat_id, MSG_HELLO).await,
            Command::AddSample => self.transport.send_message(chat_id, MSG_ADD_SAMPLE).await,
            Command::AddMeal => self.add_meal(chat_id, text).await,
            Command::Unknown => {
                self.transport
                    .send_message(chat_id, MSG_UNKNOWN_COMMAND)
                    .await
            }
        }
    }

    /// Answer errors the user caused with a reply instead of failing.
    /// Anything else is returned unchanged.
    pub(crate) async fn handle_client_errors(&self, result: Result<()>, chat_id: i64) -> Result<()> {
        let err = match result {
            Ok(()) => return Ok(()),
            Err(err) => err,
        };

        match client_reply(&err) {
            Some(reply) => {
                warn!("Rejected request from chat {}: {:#}", chat_id, err);
                self.transport.send_message(chat_id, &reply).await
            }
            None => Err(err),
        }
    }

    async fn add_meal(&self, chat_id: i64, text: &str) -> Result<()> {
        let meal = meal::parse_text(text).context("error parsing text to meal")?;

        self.store.create(&meal).await.context("save meal")?;

        self.transport.send_message(chat_id, MSG_SAVED).await?;

        info!("Meal '{}' saved", meal.name);
        Ok(())
    }

    async fn send_random_meal(&self, chat_id: i64) -> Result<()> {
        let meal = self
            .store
            .get_random()
            .await
            .context("get random meal")?;

        self.transport
            .send_photo(chat_id, &meal.photo_url, &meal.name)
            .await
            .context("can't send photo")?;

        if !meal.description.is_empty() {
            self.transport
                .send_message(chat_id, &meal.description)
                .await
                .context("can't send description")?;
        }
        if !meal.instructions.is_empty() {
            self.transport
                .send_message(chat_id, &meal.instructions)
                .await
                .context("can't send instructions")?;
        }

        Ok(())
    }
}

/// The reply for errors a user can act on, found by type anywhere in the chain.
fn client_reply(err: &anyhow::Error) -> Option<String> {
    err.chain().find_map(|cause| {
        if let Some(meal_err) = cause.downcast_ref::<MealError>() {
            return Some(meal_err.to_string());
        }
        match cause.downcast_ref::<StoreError>() {
            Some(StoreError::NotFound) => Some(MSG_NO_MEALS.to_string()),
            None => None,
        }
    })
}
