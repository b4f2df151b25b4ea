pub mod parser;

use thiserror::Error;

pub use parser::parse_text;

/// Validation failures the user can fix by resending the submission.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MealError {
    #[error("name not provided")]
    NameEmpty,
    #[error("photo url empty or invalid")]
    PhotoEmpty,
}

/// A meal as submitted by a user and stored in the database.
///
/// `id` and `created_at` stay at 0 until the store assigns them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Meal {
    pub id: i64,
    pub name: String,
    pub photo_url: String,
    pub description: String,
    pub instructions: String,
    /// Unix timestamp (seconds)
    pub created_at: i64,
}

impl Meal {
    /// Name is checked before the photo, so a submission missing both
    /// reports `NameEmpty`.
    pub fn validate(&self) -> Result<(), MealError> {
        if self.name.is_empty() {
            return Err(MealError::NameEmpty);
        }
        if self.photo_url.is_empty() || !is_url(&self.photo_url) {
            return Err(MealError::PhotoEmpty);
        }
        Ok(())
    }
}

fn is_url(text: &str) -> bool {
    url::Url::parse(text)
        .map(|u| u.host_str().is_some_and(|h| !h.is_empty()))
        .unwrap_or(false)
}
