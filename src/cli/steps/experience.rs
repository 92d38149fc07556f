use kyc_domain::{tags, DraftPatch, ExperiencePreferences, PhotographyLevel};

use super::{ask_tags, tag_list, StepContext};
use crate::cli::prompter::Prompter;
use crate::errors::AppError;

const NOT_SPECIFIED: &str = "Not specified";

pub fn prompt(prompter: &mut dyn Prompter, ctx: &StepContext<'_>) -> Result<DraftPatch, AppError> {
    let current = ctx
        .draft
        .experience_preferences
        .clone()
        .unwrap_or_default();

    let activities = ask_tags(
        prompter,
        "Which activities interest you?",
        tags::ACTIVITIES,
        &current.activities,
    )?;
    let wildlife_interests = ask_tags(
        prompter,
        "Which wildlife would you most like to see?",
        tags::WILDLIFE_INTERESTS,
        &current.wildlife_interests,
    )?;

    let mut items = vec![NOT_SPECIFIED.to_string()];
    items.extend(PhotographyLevel::ALL.iter().map(PhotographyLevel::to_string));
    let default = current
        .photography_level
        .and_then(|level| PhotographyLevel::ALL.iter().position(|l| *l == level))
        .map_or(0, |index| index + 1);
    let choice = prompter.select("Photography level", &items, default)?;
    let photography_level = choice
        .checked_sub(1)
        .and_then(|index| PhotographyLevel::ALL.get(index).copied());

    Ok(DraftPatch::experience_preferences(ExperiencePreferences {
        activities,
        wildlife_interests,
        photography_level,
    }))
}

pub fn summary(preferences: &ExperiencePreferences) -> Vec<String> {
    vec![
        format!("Activities  : {}", tag_list(&preferences.activities)),
        format!("Wildlife    : {}", tag_list(&preferences.wildlife_interests)),
        format!(
            "Photography : {}",
            preferences
                .photography_level
                .map_or_else(|| NOT_SPECIFIED.to_string(), |level| level.to_string())
        ),
    ]
}
