//! The application draft the wizard builds up step by step.
//!
//! Every slice is optional: a slice stays `None` until the step that owns it
//! writes it. Wire names are camelCase because the intake endpoint and the
//! persisted snapshot share this shape.

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

/// Nights seeded into a freshly selected camp booking.
pub const DEFAULT_NIGHTS: u32 = 3;

/// Rooms seeded into a freshly selected camp booking.
pub const DEFAULT_ROOMS: u32 = 1;

/// Accumulated, not-yet-submitted application data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personal_info: Option<PersonalInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_details: Option<TravelDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camp_selection: Option<CampSelection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_preferences: Option<ExperiencePreferences>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requirements: Option<SpecialRequirements>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consent: Option<Consent>,
}

impl ApplicationDraft {
    /// True while no step has written its slice yet.
    pub fn is_empty(&self) -> bool {
        self.personal_info.is_none()
            && self.travel_details.is_none()
            && self.camp_selection.is_none()
            && self.experience_preferences.is_none()
            && self.special_requirements.is_none()
            && self.emergency_contact.is_none()
            && self.consent.is_none()
    }

    /// Shallow merge: every slice present in `patch` replaces the current one,
    /// absent slices are left untouched.
    pub fn merge(&mut self, patch: DraftPatch) {
        let DraftPatch {
            personal_info,
            travel_details,
            camp_selection,
            experience_preferences,
            special_requirements,
            emergency_contact,
            consent,
        } = patch;

        if personal_info.is_some() {
            self.personal_info = personal_info;
        }
        if travel_details.is_some() {
            self.travel_details = travel_details;
        }
        if camp_selection.is_some() {
            self.camp_selection = camp_selection;
        }
        if experience_preferences.is_some() {
            self.experience_preferences = experience_preferences;
        }
        if special_requirements.is_some() {
            self.special_requirements = special_requirements;
        }
        if emergency_contact.is_some() {
            self.emergency_contact = emergency_contact;
        }
        if consent.is_some() {
            self.consent = consent;
        }
    }

    /// Travel start date, if step 2 has been filled.
    pub fn start_date(&self) -> Option<&str> {
        self.travel_details
            .as_ref()
            .map(|details| details.start_date.as_str())
            .filter(|date| !date.trim().is_empty())
    }

    pub fn bookings(&self) -> &[CampBooking] {
        self.camp_selection
            .as_ref()
            .map(|selection| selection.selected_camps.as_slice())
            .unwrap_or(&[])
    }
}

/// Partial draft carried by an `UpdateData` action. Callers fill only the
/// slice their step owns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftPatch {
    pub personal_info: Option<PersonalInfo>,
    pub travel_details: Option<TravelDetails>,
    pub camp_selection: Option<CampSelection>,
    pub experience_preferences: Option<ExperiencePreferences>,
    pub special_requirements: Option<SpecialRequirements>,
    pub emergency_contact: Option<EmergencyContact>,
    pub consent: Option<Consent>,
}

impl DraftPatch {
    pub fn personal_info(value: PersonalInfo) -> Self {
        Self {
            personal_info: Some(value),
            ..Self::default()
        }
    }

    pub fn travel_details(value: TravelDetails) -> Self {
        Self {
            travel_details: Some(value),
            ..Self::default()
        }
    }

    pub fn camp_selection(value: CampSelection) -> Self {
        Self {
            camp_selection: Some(value),
            ..Self::default()
        }
    }

    pub fn experience_preferences(value: ExperiencePreferences) -> Self {
        Self {
            experience_preferences: Some(value),
            ..Self::default()
        }
    }

    pub fn special_requirements(value: SpecialRequirements) -> Self {
        Self {
            special_requirements: Some(value),
            ..Self::default()
        }
    }

    pub fn emergency_contact(value: EmergencyContact) -> Self {
        Self {
            emergency_contact: Some(value),
            ..Self::default()
        }
    }

    pub fn consent(value: Consent) -> Self {
        Self {
            consent: Some(value),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_birth: String,
    pub nationality: String,
    pub passport_number: String,
    pub passport_expiry: String,
}

impl PersonalInfo {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TravelDetails {
    pub start_date: String,
    pub end_date: String,
    pub flexible_dates: bool,
    pub number_of_adults: u32,
    pub number_of_children: u32,
    pub children_ages: Vec<u32>,
}

/// Most children one application may list.
pub const MAX_CHILDREN: u32 = 20;

impl TravelDetails {
    /// Sets the child count, capped at [`MAX_CHILDREN`], and resizes the age
    /// list to match, keeping already entered ages.
    pub fn set_children(&mut self, count: u32) {
        let count = count.min(MAX_CHILDREN);
        self.number_of_children = count;
        self.children_ages.resize(count as usize, 0);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CampSelection {
    pub selected_camps: Vec<CampBooking>,
}

/// Per-camp reservation nested in the camp-selection slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampBooking {
    pub camp_id: String,
    #[serde(default)]
    pub camp_name: String,
    #[serde(default)]
    pub check_in: String,
    #[serde(default)]
    pub check_out: String,
    pub number_of_nights: u32,
    pub room_type: RoomType,
    pub number_of_rooms: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

impl CampBooking {
    /// Booking seeded on first selection: 3 nights, standard room, 1 room.
    pub fn with_defaults(camp_id: impl Into<String>, camp_name: impl Into<String>) -> Self {
        Self {
            camp_id: camp_id.into(),
            camp_name: camp_name.into(),
            check_in: String::new(),
            check_out: String::new(),
            number_of_nights: DEFAULT_NIGHTS,
            room_type: RoomType::Standard,
            number_of_rooms: DEFAULT_ROOMS,
            special_requests: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    #[default]
    Standard,
    Suite,
    Family,
}

impl RoomType {
    pub const ALL: [RoomType; 3] = [RoomType::Standard, RoomType::Suite, RoomType::Family];

    pub fn as_str(self) -> &'static str {
        match self {
            RoomType::Standard => "standard",
            RoomType::Suite => "suite",
            RoomType::Family => "family",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RoomType::Standard => "Standard",
            RoomType::Suite => "Suite",
            RoomType::Family => "Family",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperiencePreferences {
    pub activities: BTreeSet<String>,
    pub wildlife_interests: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photography_level: Option<PhotographyLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhotographyLevel {
    Casual,
    Enthusiast,
    Professional,
}

impl PhotographyLevel {
    pub const ALL: [PhotographyLevel; 3] = [
        PhotographyLevel::Casual,
        PhotographyLevel::Enthusiast,
        PhotographyLevel::Professional,
    ];
}

impl fmt::Display for PhotographyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PhotographyLevel::Casual => "Casual",
            PhotographyLevel::Enthusiast => "Enthusiast",
            PhotographyLevel::Professional => "Professional",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpecialRequirements {
    pub dietary_restrictions: BTreeSet<String>,
    pub other_dietary: String,
    pub medical_conditions: String,
    pub mobility_needs: BTreeSet<String>,
    pub special_requests: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmergencyContact {
    pub name: String,
    pub relationship: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Consent {
    pub agreed_to_terms: bool,
    pub marketing_consent: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn personal(first: &str) -> PersonalInfo {
        PersonalInfo {
            first_name: first.into(),
            ..PersonalInfo::default()
        }
    }

    #[test]
    fn child_count_is_capped() {
        let mut details = TravelDetails {
            children_ages: vec![6],
            ..TravelDetails::default()
        };
        details.set_children(4_000_000_000);
        assert_eq!(details.number_of_children, MAX_CHILDREN);
        assert_eq!(details.children_ages.len(), MAX_CHILDREN as usize);
        assert_eq!(details.children_ages[0], 6);

        details.set_children(0);
        assert!(details.children_ages.is_empty());
    }

    #[test]
    fn new_draft_is_empty() {
        assert!(ApplicationDraft::default().is_empty());
        assert!(DraftPatch::default().is_empty());
    }

    #[test]
    fn merge_replaces_only_the_patched_slice() {
        let mut draft = ApplicationDraft::default();
        let travel = TravelDetails {
            start_date: "2026-05-01".into(),
            number_of_adults: 2,
            ..TravelDetails::default()
        };
        draft.merge(DraftPatch::travel_details(travel.clone()));
        draft.merge(DraftPatch::personal_info(personal("Jane")));

        assert_eq!(draft.travel_details.as_ref(), Some(&travel));
        assert_eq!(
            draft.personal_info.as_ref().map(|p| p.first_name.as_str()),
            Some("Jane")
        );
        assert!(!draft.is_empty());
    }

    #[test]
    fn merge_is_shallow_per_slice() {
        let mut draft = ApplicationDraft::default();
        let mut full = personal("Jane");
        full.last_name = "Doe".into();
        draft.merge(DraftPatch::personal_info(full));
        draft.merge(DraftPatch::personal_info(personal("Ann")));

        let info = draft.personal_info.expect("personal info");
        assert_eq!(info.first_name, "Ann");
        assert!(info.last_name.is_empty());
    }

    #[test]
    fn set_children_keeps_ages_in_sync() {
        let mut travel = TravelDetails::default();
        travel.set_children(2);
        travel.children_ages[0] = 7;
        assert_eq!(travel.children_ages, vec![7, 0]);
        travel.set_children(1);
        assert_eq!(travel.children_ages, vec![7]);
        travel.set_children(0);
        assert!(travel.children_ages.is_empty());
    }

    #[test]
    fn booking_defaults_match_first_selection_rules() {
        let booking = CampBooking::with_defaults("doro-nawas", "Doro Nawas");
        assert_eq!(booking.number_of_nights, 3);
        assert_eq!(booking.room_type, RoomType::Standard);
        assert_eq!(booking.number_of_rooms, 1);
        assert!(booking.special_requests.is_none());
    }

    #[test]
    fn draft_serializes_with_camel_case_names() {
        let mut draft = ApplicationDraft::default();
        draft.merge(DraftPatch::camp_selection(CampSelection {
            selected_camps: vec![CampBooking::with_defaults("doro-nawas", "Doro Nawas")],
        }));
        let json = serde_json::to_value(&draft).unwrap();
        let booking = &json["campSelection"]["selectedCamps"][0];
        assert_eq!(booking["campId"], "doro-nawas");
        assert_eq!(booking["numberOfNights"], 3);
        assert_eq!(booking["roomType"], "standard");
        assert_eq!(booking["numberOfRooms"], 1);
        assert!(json.get("personalInfo").is_none());
    }

    #[test]
    fn partial_slices_deserialize_with_defaults() {
        let draft: ApplicationDraft =
            serde_json::from_str(r#"{"personalInfo":{"firstName":"A"}}"#).unwrap();
        let info = draft.personal_info.unwrap();
        assert_eq!(info.first_name, "A");
        assert!(info.passport_number.is_empty());
    }
}
