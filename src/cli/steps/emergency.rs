use kyc_core::validation::fields;
use kyc_domain::{DraftPatch, EmergencyContact};

use super::{ask_text, StepContext};
use crate::cli::prompter::Prompter;
use crate::errors::AppError;

pub fn prompt(prompter: &mut dyn Prompter, ctx: &StepContext<'_>) -> Result<DraftPatch, AppError> {
    let current = ctx.draft.emergency_contact.clone().unwrap_or_default();
    let errors = ctx.errors;

    let contact = EmergencyContact {
        name: ask_text(prompter, errors, fields::EMERGENCY_NAME, "Contact name", &current.name)?,
        relationship: ask_text(
            prompter,
            errors,
            fields::EMERGENCY_RELATIONSHIP,
            "Relationship to you",
            &current.relationship,
        )?,
        phone: ask_text(prompter, errors, fields::EMERGENCY_PHONE, "Contact phone", &current.phone)?,
        email: ask_text(prompter, errors, fields::EMERGENCY_EMAIL, "Contact email", &current.email)?,
    };

    Ok(DraftPatch::emergency_contact(contact))
}

pub fn summary(contact: &EmergencyContact) -> Vec<String> {
    vec![
        format!("Emergency   : {} ({})", contact.name, contact.relationship),
        format!("Reach at    : {} / {}", contact.phone, contact.email),
    ]
}
