//! Final step: read-only summary of every slice, then consent.

use kyc_core::validation::fields;
use kyc_domain::{ApplicationDraft, Consent, DraftPatch, WizardStep};

use super::{camps, emergency, experience, personal, special, travel, StepContext};
use crate::cli::{output, prompter::Prompter};
use crate::errors::AppError;

pub fn prompt(prompter: &mut dyn Prompter, ctx: &StepContext<'_>) -> Result<DraftPatch, AppError> {
    for (step, lines) in summary(ctx.draft) {
        output::line(format!("{}. {}", step.number(), step.label()));
        for line in lines {
            output::line(format!("   {line}"));
        }
    }
    output::blank_line();

    let current = ctx.draft.consent.unwrap_or_default();
    if let Some(message) = ctx.errors.get(fields::AGREED_TO_TERMS) {
        output::error(message);
    }
    let agreed_to_terms = prompter.confirm(
        "I confirm the information is accurate and agree to the terms and conditions",
        current.agreed_to_terms,
    )?;
    let marketing_consent = prompter.confirm(
        "Send me news and offers about future journeys",
        current.marketing_consent,
    )?;

    Ok(DraftPatch::consent(Consent {
        agreed_to_terms,
        marketing_consent,
    }))
}

/// Summary lines per editable step; steps never filled in say so.
pub fn summary(draft: &ApplicationDraft) -> Vec<(WizardStep, Vec<String>)> {
    fn or_missing<T>(slice: Option<&T>, render: fn(&T) -> Vec<String>) -> Vec<String> {
        slice
            .map(render)
            .unwrap_or_else(|| vec!["Not provided".to_string()])
    }

    vec![
        (
            WizardStep::PersonalInfo,
            or_missing(draft.personal_info.as_ref(), personal::summary),
        ),
        (
            WizardStep::TravelDetails,
            or_missing(draft.travel_details.as_ref(), travel::summary),
        ),
        (
            WizardStep::CampSelection,
            or_missing(draft.camp_selection.as_ref(), camps::summary),
        ),
        (
            WizardStep::ExperiencePreferences,
            or_missing(draft.experience_preferences.as_ref(), experience::summary),
        ),
        (
            WizardStep::SpecialRequirements,
            or_missing(draft.special_requirements.as_ref(), special::summary),
        ),
        (
            WizardStep::EmergencyContact,
            or_missing(draft.emergency_contact.as_ref(), emergency::summary),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::prompter::mock::MockPrompter;
    use kyc_core::{FieldErrors, StaticCampCatalog};

    #[test]
    fn consent_answers_become_a_patch() {
        let catalog = StaticCampCatalog::default();
        let draft = ApplicationDraft::default();
        let errors = FieldErrors::new();
        let ctx = StepContext {
            draft: &draft,
            errors: &errors,
            catalog: &catalog,
        };
        let mut prompter = MockPrompter::new(&["y", "n"]);

        let consent = prompt(&mut prompter, &ctx)
            .expect("prompt")
            .consent
            .expect("consent");
        assert!(consent.agreed_to_terms);
        assert!(!consent.marketing_consent);
    }

    #[test]
    fn missing_slices_are_flagged() {
        let sections = summary(&ApplicationDraft::default());
        assert_eq!(sections.len(), 6);
        assert!(sections
            .iter()
            .all(|(_, lines)| lines == &vec!["Not provided".to_string()]));
    }
}
