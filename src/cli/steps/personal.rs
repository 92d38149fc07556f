use kyc_core::validation::fields;
use kyc_domain::{DraftPatch, PersonalInfo};

use super::{ask_text, StepContext};
use crate::cli::prompter::Prompter;
use crate::errors::AppError;

pub fn prompt(prompter: &mut dyn Prompter, ctx: &StepContext<'_>) -> Result<DraftPatch, AppError> {
    let current = ctx.draft.personal_info.clone().unwrap_or_default();
    let errors = ctx.errors;

    let info = PersonalInfo {
        first_name: ask_text(prompter, errors, fields::FIRST_NAME, "First name", &current.first_name)?,
        last_name: ask_text(prompter, errors, fields::LAST_NAME, "Last name", &current.last_name)?,
        email: ask_text(prompter, errors, fields::EMAIL, "Email address", &current.email)?,
        phone: ask_text(prompter, errors, fields::PHONE, "Phone number", &current.phone)?,
        date_of_birth: ask_text(
            prompter,
            errors,
            fields::DATE_OF_BIRTH,
            "Date of birth (YYYY-MM-DD)",
            &current.date_of_birth,
        )?,
        nationality: ask_text(prompter, errors, fields::NATIONALITY, "Nationality", &current.nationality)?,
        passport_number: ask_text(
            prompter,
            errors,
            fields::PASSPORT_NUMBER,
            "Passport number",
            &current.passport_number,
        )?,
        passport_expiry: ask_text(
            prompter,
            errors,
            fields::PASSPORT_EXPIRY,
            "Passport expiry (YYYY-MM-DD)",
            &current.passport_expiry,
        )?,
    };
    Ok(DraftPatch::personal_info(info))
}

pub fn summary(info: &PersonalInfo) -> Vec<String> {
    vec![
        format!("Name        : {}", info.full_name()),
        format!("Email       : {}", info.email),
        format!("Phone       : {}", info.phone),
        format!("Born        : {}", info.date_of_birth),
        format!("Nationality : {}", info.nationality),
        format!(
            "Passport    : {} (expires {})",
            info.passport_number, info.passport_expiry
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::prompter::mock::MockPrompter;
    use kyc_core::{FieldErrors, StaticCampCatalog};
    use kyc_domain::ApplicationDraft;

    #[test]
    fn collects_all_eight_fields() {
        let catalog = StaticCampCatalog::default();
        let draft = ApplicationDraft::default();
        let errors = FieldErrors::new();
        let ctx = StepContext {
            draft: &draft,
            errors: &errors,
            catalog: &catalog,
        };
        let mut prompter = MockPrompter::new(&[
            "Jane", "Doe", "j@x.io", "+1", "1990-01-01", "US", "P1", "2030-01-01",
        ]);

        let patch = prompt(&mut prompter, &ctx).expect("prompt");
        let info = patch.personal_info.expect("personal slice");
        assert_eq!(info.full_name(), "Jane Doe");
        assert_eq!(info.passport_expiry, "2030-01-01");
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn keeps_previous_answers_as_defaults() {
        let catalog = StaticCampCatalog::default();
        let mut draft = ApplicationDraft::default();
        draft.merge(DraftPatch::personal_info(PersonalInfo {
            first_name: "Jane".into(),
            nationality: "US".into(),
            ..PersonalInfo::default()
        }));
        let errors = FieldErrors::new();
        let ctx = StepContext {
            draft: &draft,
            errors: &errors,
            catalog: &catalog,
        };
        let mut prompter = MockPrompter::new(&[
            "<KEEP>", "Doe", "<BLANK>", "<BLANK>", "<BLANK>", "<KEEP>", "<BLANK>", "<BLANK>",
        ]);

        let info = prompt(&mut prompter, &ctx)
            .expect("prompt")
            .personal_info
            .expect("personal slice");
        assert_eq!(info.first_name, "Jane");
        assert_eq!(info.nationality, "US");
        assert_eq!(info.email, "");
    }
}
