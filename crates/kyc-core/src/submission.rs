//! Submission contract shared by the wizard and the intake adapters.

use kyc_domain::{
    ApplicationDraft, CampSelection, EmergencyContact, ExperiencePreferences, PersonalInfo,
    SpecialRequirements, TravelDetails,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shown when the request fails before the server could answer.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "We couldn't submit your application right now. Please check your connection and try again.";

/// Shown when the server rejects the application without saying why.
pub const REJECTED_FALLBACK_MESSAGE: &str =
    "Your application could not be accepted. Please review your details and try again.";

/// Body sent to the intake endpoint: every draft slice plus consent flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPayload {
    pub personal_info: PersonalInfo,
    pub travel_details: TravelDetails,
    pub camp_selection: CampSelection,
    pub experience_preferences: ExperiencePreferences,
    pub special_requirements: SpecialRequirements,
    pub emergency_contact: EmergencyContact,
    pub agreed_to_terms: bool,
    pub marketing_consent: bool,
}

impl From<&ApplicationDraft> for ApplicationPayload {
    fn from(draft: &ApplicationDraft) -> Self {
        let consent = draft.consent.unwrap_or_default();
        Self {
            personal_info: draft.personal_info.clone().unwrap_or_default(),
            travel_details: draft.travel_details.clone().unwrap_or_default(),
            camp_selection: draft.camp_selection.clone().unwrap_or_default(),
            experience_preferences: draft.experience_preferences.clone().unwrap_or_default(),
            special_requirements: draft.special_requirements.clone().unwrap_or_default(),
            emergency_contact: draft.emergency_contact.clone().unwrap_or_default(),
            agreed_to_terms: consent.agreed_to_terms,
            marketing_consent: consent.marketing_consent,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl IntakeResponse {
    pub fn accepted(application_id: impl Into<String>) -> Self {
        Self {
            success: true,
            application_id: Some(application_id.into()),
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            application_id: None,
            message: Some(message.into()),
        }
    }
}

/// Transport-level failure. Application-level rejection is an
/// [`IntakeResponse`] with `success: false`.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid response from intake endpoint: {0}")]
    InvalidResponse(String),
}

/// Anything that can accept an application.
pub trait IntakeGateway {
    fn submit(&self, payload: &ApplicationPayload) -> Result<IntakeResponse, SubmissionError>;
}

impl<T: IntakeGateway + ?Sized> IntakeGateway for &T {
    fn submit(&self, payload: &ApplicationPayload) -> Result<IntakeResponse, SubmissionError> {
        (**self).submit(payload)
    }
}

impl<T: IntakeGateway + ?Sized> IntakeGateway for Box<T> {
    fn submit(&self, payload: &ApplicationPayload) -> Result<IntakeResponse, SubmissionError> {
        (**self).submit(payload)
    }
}

/// Where the review step stands with respect to submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Editing,
    Submitting,
    Submitted {
        application_id: String,
    },
    SubmitError {
        message: String,
    },
}

impl SubmissionPhase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionPhase::Submitting)
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmissionPhase::Submitted { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmissionPhase::SubmitError { message } => Some(message),
            _ => None,
        }
    }
}
