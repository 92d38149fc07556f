//! One prompt sequence per wizard step.
//!
//! Each view reads the current draft slice as defaults, shows any error
//! recorded for a field right before asking it again, and returns the
//! replacement slice as a [`DraftPatch`]. Views never touch storage.

pub mod camps;
pub mod emergency;
pub mod experience;
pub mod personal;
pub mod review;
pub mod special;
pub mod travel;

use std::collections::BTreeSet;

use kyc_core::{CampCatalog, FieldErrors};
use kyc_domain::{tags, ApplicationDraft, DraftPatch, WizardStep};

use crate::cli::{output, prompter::Prompter};
use crate::errors::AppError;

/// What a view needs to render and prompt.
pub struct StepContext<'a> {
    pub draft: &'a ApplicationDraft,
    pub errors: &'a FieldErrors,
    pub catalog: &'a dyn CampCatalog,
}

/// Runs the view of `step` and returns the slice it produced.
pub fn prompt_step(
    step: WizardStep,
    prompter: &mut dyn Prompter,
    ctx: &StepContext<'_>,
) -> Result<DraftPatch, AppError> {
    match step {
        WizardStep::PersonalInfo => personal::prompt(prompter, ctx),
        WizardStep::TravelDetails => travel::prompt(prompter, ctx),
        WizardStep::CampSelection => camps::prompt(prompter, ctx),
        WizardStep::ExperiencePreferences => experience::prompt(prompter, ctx),
        WizardStep::SpecialRequirements => special::prompt(prompter, ctx),
        WizardStep::EmergencyContact => emergency::prompt(prompter, ctx),
        WizardStep::Review => review::prompt(prompter, ctx),
    }
}

/// Text field with its previous value as default and its error, if any,
/// printed just above the prompt.
pub(crate) fn ask_text(
    prompter: &mut dyn Prompter,
    errors: &FieldErrors,
    key: &str,
    label: &str,
    current: &str,
) -> Result<String, AppError> {
    if let Some(message) = errors.get(key) {
        output::error(message);
    }
    let default = (!current.is_empty()).then_some(current);
    Ok(prompter.text(label, default)?.trim().to_string())
}

/// Tag picker over a fixed vocabulary; returns the chosen slugs.
pub(crate) fn ask_tags(
    prompter: &mut dyn Prompter,
    label: &str,
    vocabulary: &[&str],
    current: &BTreeSet<String>,
) -> Result<BTreeSet<String>, AppError> {
    let items: Vec<String> = vocabulary.iter().map(|tag| tags::label(tag)).collect();
    let checked: Vec<bool> = vocabulary.iter().map(|tag| current.contains(*tag)).collect();
    let picked = prompter.multi_select(label, &items, &checked)?;
    Ok(picked
        .into_iter()
        .map(|index| vocabulary[index].to_string())
        .collect())
}

/// Joins tag slugs into a readable list for summaries.
pub(crate) fn tag_list<'a, I>(slugs: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    let labels: Vec<String> = slugs.into_iter().map(|slug| tags::label(slug)).collect();
    if labels.is_empty() {
        "None".to_string()
    } else {
        labels.join(", ")
    }
}
