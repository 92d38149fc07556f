use kyc_domain::{tags, DraftPatch, SpecialRequirements};

use super::{ask_tags, tag_list, StepContext};
use crate::cli::prompter::Prompter;
use crate::errors::AppError;

pub fn prompt(prompter: &mut dyn Prompter, ctx: &StepContext<'_>) -> Result<DraftPatch, AppError> {
    let current = ctx.draft.special_requirements.clone().unwrap_or_default();

    let dietary_restrictions = ask_tags(
        prompter,
        "Dietary restrictions",
        tags::DIETARY_RESTRICTIONS,
        &current.dietary_restrictions,
    )?;
    let other_dietary = free_text(prompter, "Other dietary needs", &current.other_dietary)?;
    let medical_conditions = free_text(
        prompter,
        "Medical conditions we should know about",
        &current.medical_conditions,
    )?;
    let mobility_needs = ask_tags(
        prompter,
        "Mobility needs",
        tags::MOBILITY_NEEDS,
        &current.mobility_needs,
    )?;
    let special_requests = free_text(
        prompter,
        "Anything else we should arrange?",
        &current.special_requests,
    )?;

    Ok(DraftPatch::special_requirements(SpecialRequirements {
        dietary_restrictions,
        other_dietary,
        medical_conditions,
        mobility_needs,
        special_requests,
    }))
}

fn free_text(prompter: &mut dyn Prompter, label: &str, current: &str) -> Result<String, AppError> {
    let default = (!current.is_empty()).then_some(current);
    Ok(prompter.text(label, default)?.trim().to_string())
}

pub fn summary(requirements: &SpecialRequirements) -> Vec<String> {
    let mut lines = vec![
        format!("Dietary     : {}", tag_list(&requirements.dietary_restrictions)),
        format!("Mobility    : {}", tag_list(&requirements.mobility_needs)),
    ];
    for (label, value) in [
        ("Other diet  ", &requirements.other_dietary),
        ("Medical     ", &requirements.medical_conditions),
        ("Requests    ", &requirements.special_requests),
    ] {
        if !value.is_empty() {
            lines.push(format!("{label}: {value}"));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::prompter::mock::MockPrompter;
    use kyc_core::{FieldErrors, StaticCampCatalog};
    use kyc_domain::ApplicationDraft;

    #[test]
    fn every_field_is_optional() {
        let catalog = StaticCampCatalog::default();
        let draft = ApplicationDraft::default();
        let errors = FieldErrors::new();
        let ctx = StepContext {
            draft: &draft,
            errors: &errors,
            catalog: &catalog,
        };
        let mut prompter =
            MockPrompter::new(&["<NONE>", "<BLANK>", "<BLANK>", "<NONE>", "<BLANK>"]);

        let requirements = prompt(&mut prompter, &ctx)
            .expect("prompt")
            .special_requirements
            .expect("special slice");
        assert_eq!(requirements, SpecialRequirements::default());
        assert_eq!(summary(&requirements).len(), 2);
    }

    #[test]
    fn keeps_tags_and_notes() {
        let catalog = StaticCampCatalog::default();
        let draft = ApplicationDraft::default();
        let errors = FieldErrors::new();
        let ctx = StepContext {
            draft: &draft,
            errors: &errors,
            catalog: &catalog,
        };
        let mut prompter = MockPrompter::new(&[
            "Vegan,Nut allergy",
            "No mushrooms",
            "<BLANK>",
            "Limited walking",
            "Late check-out",
        ]);

        let requirements = prompt(&mut prompter, &ctx)
            .expect("prompt")
            .special_requirements
            .expect("special slice");
        assert!(requirements.dietary_restrictions.contains("vegan"));
        assert!(requirements.dietary_restrictions.contains("nut-allergy"));
        assert!(requirements.mobility_needs.contains("limited-walking"));
        assert_eq!(requirements.other_dietary, "No mushrooms");
        assert_eq!(requirements.special_requests, "Late check-out");
    }
}
