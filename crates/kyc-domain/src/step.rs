//! The seven screens of the application wizard.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Total number of steps in the wizard.
pub const TOTAL_STEPS: u8 = 7;

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 7;

/// One wizard screen. Each step owns a disjoint slice of the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum WizardStep {
    PersonalInfo,
    TravelDetails,
    CampSelection,
    ExperiencePreferences,
    SpecialRequirements,
    EmergencyContact,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; TOTAL_STEPS as usize] = [
        WizardStep::PersonalInfo,
        WizardStep::TravelDetails,
        WizardStep::CampSelection,
        WizardStep::ExperiencePreferences,
        WizardStep::SpecialRequirements,
        WizardStep::EmergencyContact,
        WizardStep::Review,
    ];

    /// Converts a 1-based step number, returning `None` outside `1..=7`.
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::PersonalInfo),
            2 => Some(Self::TravelDetails),
            3 => Some(Self::CampSelection),
            4 => Some(Self::ExperiencePreferences),
            5 => Some(Self::SpecialRequirements),
            6 => Some(Self::EmergencyContact),
            7 => Some(Self::Review),
            _ => None,
        }
    }

    /// 1-based step number.
    pub fn number(self) -> u8 {
        match self {
            Self::PersonalInfo => 1,
            Self::TravelDetails => 2,
            Self::CampSelection => 3,
            Self::ExperiencePreferences => 4,
            Self::SpecialRequirements => 5,
            Self::EmergencyContact => 6,
            Self::Review => 7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PersonalInfo => "Personal Information",
            Self::TravelDetails => "Travel Details",
            Self::CampSelection => "Camp Selection",
            Self::ExperiencePreferences => "Experience Preferences",
            Self::SpecialRequirements => "Special Requirements",
            Self::EmergencyContact => "Emergency Contact",
            Self::Review => "Review & Submit",
        }
    }

    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }

    pub fn is_first(self) -> bool {
        self == Self::PersonalInfo
    }

    pub fn is_last(self) -> bool {
        self == Self::Review
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::PersonalInfo
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of {} – {}", self.number(), TOTAL_STEPS, self.label())
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step.number()
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_number(value).ok_or_else(|| {
            format!("invalid step number {value}, expected {MIN_STEP}..={MAX_STEP}")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_roundtrip_covers_every_step() {
        for n in MIN_STEP..=MAX_STEP {
            let step = WizardStep::from_number(n).expect("valid step");
            assert_eq!(step.number(), n);
            assert!(!step.label().is_empty());
        }
        assert_eq!(WizardStep::ALL.len(), TOTAL_STEPS as usize);
    }

    #[test]
    fn out_of_range_numbers_are_rejected() {
        assert!(WizardStep::from_number(0).is_none());
        assert!(WizardStep::from_number(8).is_none());
        assert!(WizardStep::try_from(42u8).is_err());
    }

    #[test]
    fn next_and_previous_stop_at_the_edges() {
        assert_eq!(WizardStep::PersonalInfo.previous(), None);
        assert_eq!(WizardStep::Review.next(), None);
        assert_eq!(
            WizardStep::TravelDetails.next(),
            Some(WizardStep::CampSelection)
        );
        assert_eq!(
            WizardStep::TravelDetails.previous(),
            Some(WizardStep::PersonalInfo)
        );
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&WizardStep::CampSelection).unwrap();
        assert_eq!(json, "3");
        let back: WizardStep = serde_json::from_str("6").unwrap();
        assert_eq!(back, WizardStep::EmergencyContact);
        assert!(serde_json::from_str::<WizardStep>("9").is_err());
    }
}
