use kyc_core::validation::fields;
use kyc_domain::{DraftPatch, TravelDetails, MAX_CHILDREN};

use super::{ask_text, StepContext};
use crate::cli::{
    output,
    prompter::{number, Prompter},
};
use crate::errors::AppError;

const DEFAULT_ADULTS: u32 = 2;

pub fn prompt(prompter: &mut dyn Prompter, ctx: &StepContext<'_>) -> Result<DraftPatch, AppError> {
    let current = ctx.draft.travel_details.clone().unwrap_or_default();
    let errors = ctx.errors;

    let mut details = TravelDetails {
        start_date: ask_text(
            prompter,
            errors,
            fields::START_DATE,
            "Arrival date (YYYY-MM-DD)",
            &current.start_date,
        )?,
        end_date: ask_text(
            prompter,
            errors,
            fields::END_DATE,
            "Departure date (YYYY-MM-DD)",
            &current.end_date,
        )?,
        flexible_dates: prompter.confirm("Are your dates flexible?", current.flexible_dates)?,
        ..current.clone()
    };

    if let Some(message) = errors.get(fields::NUMBER_OF_ADULTS) {
        output::error(message);
    }
    let adults_default = if ctx.draft.travel_details.is_some() {
        current.number_of_adults
    } else {
        DEFAULT_ADULTS
    };
    details.number_of_adults = number(prompter, "Number of adults", adults_default, 0..)?;

    if let Some(message) = errors.get(fields::NUMBER_OF_CHILDREN) {
        output::error(message);
    }
    let children = number(
        prompter,
        "Number of children",
        current.number_of_children.min(MAX_CHILDREN),
        0..=MAX_CHILDREN,
    )?;
    details.set_children(children);

    if let Some(message) = errors.get(fields::CHILDREN_AGES) {
        output::error(message);
    }
    for index in 0..details.children_ages.len() {
        let label = format!("Age of child {}", index + 1);
        details.children_ages[index] = number(prompter, &label, details.children_ages[index], 0..)?;
    }

    Ok(DraftPatch::travel_details(details))
}

pub fn summary(details: &TravelDetails) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Dates       : {} to {}{}",
            details.start_date,
            details.end_date,
            if details.flexible_dates { " (flexible)" } else { "" }
        ),
        format!(
            "Guests      : {} adult(s), {} child(ren)",
            details.number_of_adults, details.number_of_children
        ),
    ];
    if !details.children_ages.is_empty() {
        let ages: Vec<String> = details.children_ages.iter().map(u32::to_string).collect();
        lines.push(format!("Child ages  : {}", ages.join(", ")));
    }
    lines
}
