//! Whole-step validators.
//!
//! Validation runs only when the applicant tries to leave a step (Next or
//! Submit), never per keystroke. A validator returns every problem it finds
//! for its step, keyed by the wire field name; an empty map means the step
//! may be left.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use kyc_domain::{
    ApplicationDraft, CampSelection, Consent, EmergencyContact, PersonalInfo, TravelDetails,
    WizardStep, MAX_CHILDREN,
};

use crate::catalog::CampCatalog;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

/// Error keys used in [`FieldErrors`].
pub mod fields {
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const DATE_OF_BIRTH: &str = "dateOfBirth";
    pub const NATIONALITY: &str = "nationality";
    pub const PASSPORT_NUMBER: &str = "passportNumber";
    pub const PASSPORT_EXPIRY: &str = "passportExpiry";

    pub const START_DATE: &str = "startDate";
    pub const END_DATE: &str = "endDate";
    pub const NUMBER_OF_ADULTS: &str = "numberOfAdults";
    pub const NUMBER_OF_CHILDREN: &str = "numberOfChildren";
    pub const CHILDREN_AGES: &str = "childrenAges";

    pub const SELECTED_CAMPS: &str = "selectedCamps";

    pub const EMERGENCY_NAME: &str = "emergencyName";
    pub const EMERGENCY_RELATIONSHIP: &str = "emergencyRelationship";
    pub const EMERGENCY_PHONE: &str = "emergencyPhone";
    pub const EMERGENCY_EMAIL: &str = "emergencyEmail";

    pub const AGREED_TO_TERMS: &str = "agreedToTerms";

    /// Key for a field of the booking at `index` (`selectedCamps.0.numberOfNights`).
    pub fn booking(index: usize, field: &str) -> String {
        format!("{SELECTED_CAMPS}.{index}.{field}")
    }
}

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Field-name → message map produced by the most recent validation attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Errors whose key starts with `prefix`, e.g. every problem of one booking.
    pub fn with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.iter().filter(move |(key, _)| key.starts_with(prefix))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldErrors {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// How much checking happens beyond presence of required fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Presence checks only.
    #[default]
    Relaxed,
    /// Presence plus formats and cross-field rules (dates, email shape,
    /// date ordering, passport validity, room availability).
    Strict,
}

/// Runs the validator for one step against the accumulated draft.
pub struct StepValidator<'a> {
    mode: ValidationMode,
    catalog: &'a dyn CampCatalog,
}

impl<'a> StepValidator<'a> {
    pub fn new(mode: ValidationMode, catalog: &'a dyn CampCatalog) -> Self {
        Self { mode, catalog }
    }

    pub fn validate(&self, step: WizardStep, draft: &ApplicationDraft) -> FieldErrors {
        let mut errors = FieldErrors::new();
        match step {
            WizardStep::PersonalInfo => {
                self.personal_info(draft.personal_info.as_ref(), &mut errors)
            }
            WizardStep::TravelDetails => self.travel_details(draft, &mut errors),
            WizardStep::CampSelection => {
                self.camp_selection(draft.camp_selection.as_ref(), &mut errors)
            }
            WizardStep::ExperiencePreferences | WizardStep::SpecialRequirements => {}
            WizardStep::EmergencyContact => {
                self.emergency_contact(draft.emergency_contact.as_ref(), &mut errors)
            }
            WizardStep::Review => self.consent(draft.consent.as_ref(), &mut errors),
        }
        errors
    }

    fn strict(&self) -> bool {
        self.mode == ValidationMode::Strict
    }

    fn personal_info(&self, info: Option<&PersonalInfo>, errors: &mut FieldErrors) {
        let empty = PersonalInfo::default();
        let info = info.unwrap_or(&empty);

        require(errors, fields::FIRST_NAME, &info.first_name, "First name is required");
        require(errors, fields::LAST_NAME, &info.last_name, "Last name is required");
        require(errors, fields::EMAIL, &info.email, "Email address is required");
        require(errors, fields::PHONE, &info.phone, "Phone number is required");
        require(
            errors,
            fields::DATE_OF_BIRTH,
            &info.date_of_birth,
            "Date of birth is required",
        );
        require(errors, fields::NATIONALITY, &info.nationality, "Nationality is required");
        require(
            errors,
            fields::PASSPORT_NUMBER,
            &info.passport_number,
            "Passport number is required",
        );
        require(
            errors,
            fields::PASSPORT_EXPIRY,
            &info.passport_expiry,
            "Passport expiry date is required",
        );

        if self.strict() {
            check_email(errors, fields::EMAIL, &info.email);
            check_date(errors, fields::DATE_OF_BIRTH, &info.date_of_birth);
            check_date(errors, fields::PASSPORT_EXPIRY, &info.passport_expiry);
        }
    }

    fn travel_details(&self, draft: &ApplicationDraft, errors: &mut FieldErrors) {
        let empty = TravelDetails::default();
        let travel = draft.travel_details.as_ref().unwrap_or(&empty);

        require(errors, fields::START_DATE, &travel.start_date, "Start date is required");
        require(errors, fields::END_DATE, &travel.end_date, "End date is required");
        if travel.number_of_adults < 1 {
            errors.insert(fields::NUMBER_OF_ADULTS, "At least one adult is required");
        }
        if travel.number_of_children > MAX_CHILDREN {
            errors.insert(
                fields::NUMBER_OF_CHILDREN,
                format!("At most {MAX_CHILDREN} children per application"),
            );
        }

        if !self.strict() {
            return;
        }

        check_date(errors, fields::START_DATE, &travel.start_date);
        check_date(errors, fields::END_DATE, &travel.end_date);
        if let (Some(start), Some(end)) = (parse_date(&travel.start_date), parse_date(&travel.end_date)) {
            if end < start {
                errors.insert(fields::END_DATE, "End date must be on or after the start date");
            } else if let Some(expiry) = draft
                .personal_info
                .as_ref()
                .and_then(|info| parse_date(&info.passport_expiry))
            {
                if expiry <= end {
                    errors.insert(
                        fields::END_DATE,
                        format!("Travel must end before your passport expires ({expiry})"),
                    );
                }
            }
        }
        if travel.children_ages.len() != travel.number_of_children as usize {
            errors.insert(fields::CHILDREN_AGES, "Enter an age for each child");
        }
    }

    fn camp_selection(&self, selection: Option<&CampSelection>, errors: &mut FieldErrors) {
        let bookings = selection
            .map(|s| s.selected_camps.as_slice())
            .unwrap_or(&[]);
        if bookings.is_empty() {
            errors.insert(fields::SELECTED_CAMPS, "Please select at least one camp");
            return;
        }

        for (index, booking) in bookings.iter().enumerate() {
            let camp = self.catalog.find(&booking.camp_id);
            let name = camp
                .map(|c| c.name.as_str())
                .unwrap_or(booking.camp_id.as_str());

            if camp.is_none() {
                errors.insert(
                    fields::booking(index, "campId"),
                    format!("Unknown camp `{}`", booking.camp_id),
                );
            }
            if booking.number_of_nights < 1 {
                errors.insert(
                    fields::booking(index, "numberOfNights"),
                    format!("Stay at {name} must be at least one night"),
                );
            }
            if booking.number_of_rooms < 1 {
                errors.insert(
                    fields::booking(index, "numberOfRooms"),
                    format!("Book at least one room at {name}"),
                );
            }
            if self.strict() {
                if let Some(camp) = camp {
                    if !camp.offers(booking.room_type) {
                        errors.insert(
                            fields::booking(index, "roomType"),
                            format!("{} does not offer {} rooms", camp.name, booking.room_type),
                        );
                    }
                }
            }
        }
    }

    fn emergency_contact(&self, contact: Option<&EmergencyContact>, errors: &mut FieldErrors) {
        let empty = EmergencyContact::default();
        let contact = contact.unwrap_or(&empty);

        require(
            errors,
            fields::EMERGENCY_NAME,
            &contact.name,
            "Emergency contact name is required",
        );
        require(
            errors,
            fields::EMERGENCY_RELATIONSHIP,
            &contact.relationship,
            "Relationship is required",
        );
        require(
            errors,
            fields::EMERGENCY_PHONE,
            &contact.phone,
            "Emergency contact phone is required",
        );
        require(
            errors,
            fields::EMERGENCY_EMAIL,
            &contact.email,
            "Emergency contact email is required",
        );

        if self.strict() {
            check_email(errors, fields::EMERGENCY_EMAIL, &contact.email);
        }
    }

    fn consent(&self, consent: Option<&Consent>, errors: &mut FieldErrors) {
        if !consent.map(|c| c.agreed_to_terms).unwrap_or(false) {
            errors.insert(
                fields::AGREED_TO_TERMS,
                "You must accept the terms and conditions to submit",
            );
        }
    }
}

fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message);
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

// Format checks only report on non-empty values; presence is reported by `require`.
fn check_date(errors: &mut FieldErrors, field: &str, value: &str) {
    if !value.trim().is_empty() && parse_date(value).is_none() {
        errors.insert(field, "Use YYYY-MM-DD format");
    }
}

fn check_email(errors: &mut FieldErrors, field: &str, value: &str) {
    if !value.trim().is_empty() && !looks_like_email(value.trim()) {
        errors.insert(field, "Enter a valid email address");
    }
}

fn looks_like_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}
