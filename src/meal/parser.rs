use super::{Meal, MealError};

const SECTION_PHOTO: &str = "photo:";
const SECTION_NAME: &str = "name:";
const SECTION_INSTRUCTIONS: &str = "instructions:";
const SECTION_DESCRIPTION: &str = "description:";

const SECTION_DELIM: &str = "===";

const SECTIONS: [&str; 4] = [
    SECTION_PHOTO,
    SECTION_NAME,
    SECTION_INSTRUCTIONS,
    SECTION_DESCRIPTION,
];

/// Parse a meal submission into a validated [`Meal`].
///
/// The text is expected to look like:
///
/// ```text
/// photo: <photo url>
/// ===
/// name: <meal name>
/// ===
/// instructions: <cooking instructions>
/// ===
/// description: <description>
/// ```
///
/// Sections may come in any order and any of them may be missing; `===` goes
/// between sections. Each paragraph fills at most one section, picked by the
/// unmatched label that occurs first in it. Only `name` and `photo` are
/// enforced, via [`Meal::validate`].
pub fn parse_text(text: &str) -> Result<Meal, MealError> {
    let mut meal = Meal::default();
    let mut processed = [false; SECTIONS.len()];

    for paragraph in text.split(SECTION_DELIM) {
        if processed.iter().all(|done| *done) {
            break;
        }

        let found = SECTIONS
            .iter()
            .enumerate()
            .filter(|(i, _)| !processed[*i])
            .filter_map(|(i, label)| paragraph.find(label).map(|pos| (pos, i, *label)))
            .min_by_key(|(pos, _, _)| *pos);

        let Some((pos, i, label)) = found else {
            continue;
        };

        let value = paragraph[pos + label.len()..].trim().to_string();
        match label {
            SECTION_PHOTO => meal.photo_url = value,
            SECTION_NAME => meal.name = value,
            SECTION_INSTRUCTIONS => meal.instructions = value,
            _ => meal.description = value,
        }
        processed[i] = true;
    }

    meal.validate()?;
    Ok(meal)
}
