//! Local state of the camp-selection step.
//!
//! Bookings are held here while the applicant toggles cards and edits
//! per-camp options; the draft only sees them when the step commits.

use kyc_domain::{ApplicationDraft, Camp, CampBooking, CampSelection, DraftPatch};

use crate::{catalog::CampCatalog, CoreError};

pub struct CampSelectionWidget<'a> {
    catalog: &'a dyn CampCatalog,
    bookings: Vec<CampBooking>,
}

impl<'a> CampSelectionWidget<'a> {
    pub fn new(catalog: &'a dyn CampCatalog) -> Self {
        Self {
            catalog,
            bookings: Vec::new(),
        }
    }

    /// Seeds the widget with bookings already in the draft. Bookings for
    /// camps the catalog no longer lists are dropped.
    pub fn from_draft(catalog: &'a dyn CampCatalog, draft: &ApplicationDraft) -> Self {
        let bookings = draft
            .bookings()
            .iter()
            .filter(|booking| {
                let listed = catalog.contains(&booking.camp_id);
                if !listed {
                    tracing::warn!(
                        camp_id = %booking.camp_id,
                        "Dropping booking for a camp missing from the catalog"
                    );
                }
                listed
            })
            .cloned()
            .collect();
        Self { catalog, bookings }
    }

    pub fn camps(&self) -> &[Camp] {
        self.catalog.camps()
    }

    pub fn bookings(&self) -> &[CampBooking] {
        &self.bookings
    }

    pub fn booking(&self, camp_id: &str) -> Option<&CampBooking> {
        self.bookings.iter().find(|booking| booking.camp_id == camp_id)
    }

    pub fn is_selected(&self, camp_id: &str) -> bool {
        self.booking(camp_id).is_some()
    }

    /// Selects or deselects a camp. Returns whether it is now selected.
    pub fn toggle(&mut self, camp_id: &str) -> Result<bool, CoreError> {
        if let Some(index) = self
            .bookings
            .iter()
            .position(|booking| booking.camp_id == camp_id)
        {
            self.bookings.remove(index);
            return Ok(false);
        }

        let camp = self
            .catalog
            .find(camp_id)
            .ok_or_else(|| CoreError::UnknownCamp(camp_id.to_string()))?;
        self.bookings
            .push(CampBooking::with_defaults(&camp.id, &camp.name));
        Ok(true)
    }

    /// Edits the booking of an already selected camp.
    pub fn update_booking<F>(&mut self, camp_id: &str, edit: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut CampBooking),
    {
        let booking = self
            .bookings
            .iter_mut()
            .find(|booking| booking.camp_id == camp_id)
            .ok_or_else(|| CoreError::UnknownCamp(camp_id.to_string()))?;
        edit(booking);
        Ok(())
    }

    /// Flattens the bookings in selection order. Check-in and check-out both
    /// take the travel start date.
    pub fn into_selection(self, start_date: Option<&str>) -> CampSelection {
        let date = start_date.unwrap_or_default().to_string();
        let selected_camps = self
            .bookings
            .into_iter()
            .map(|mut booking| {
                booking.check_in = date.clone();
                booking.check_out = date.clone();
                booking
            })
            .collect();
        CampSelection { selected_camps }
    }

    pub fn into_patch(self, start_date: Option<&str>) -> DraftPatch {
        DraftPatch::camp_selection(self.into_selection(start_date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCampCatalog;
    use kyc_domain::RoomType;

    #[test]
    fn first_toggle_seeds_default_booking() {
        let catalog = StaticCampCatalog::default();
        let mut widget = CampSelectionWidget::new(&catalog);
        assert!(widget.toggle("doro-nawas").unwrap());

        let booking = widget.booking("doro-nawas").unwrap();
        assert_eq!(booking.camp_name, "Doro Nawas");
        assert_eq!(booking.number_of_nights, 3);
        assert_eq!(booking.room_type, RoomType::Standard);
        assert_eq!(booking.number_of_rooms, 1);
    }

    #[test]
    fn second_toggle_removes_booking() {
        let catalog = StaticCampCatalog::default();
        let mut widget = CampSelectionWidget::new(&catalog);
        widget.toggle("little-kulala").unwrap();
        assert!(!widget.toggle("little-kulala").unwrap());
        assert!(widget.bookings().is_empty());
    }

    #[test]
    fn unknown_camp_is_rejected() {
        let catalog = StaticCampCatalog::default();
        let mut widget = CampSelectionWidget::new(&catalog);
        let err = widget.toggle("atlantis").unwrap_err();
        assert!(matches!(err, CoreError::UnknownCamp(id) if id == "atlantis"));
        assert!(widget
            .update_booking("doro-nawas", |b| b.number_of_nights = 5)
            .is_err());
    }

    #[test]
    fn flatten_keeps_selection_order_and_stamps_dates() {
        let catalog = StaticCampCatalog::default();
        let mut widget = CampSelectionWidget::new(&catalog);
        widget.toggle("serra-cafema").unwrap();
        widget.toggle("doro-nawas").unwrap();
        widget
            .update_booking("serra-cafema", |b| {
                b.number_of_nights = 2;
                b.room_type = RoomType::Family;
            })
            .unwrap();

        let selection = widget.into_selection(Some("2026-06-01"));
        let ids: Vec<_> = selection
            .selected_camps
            .iter()
            .map(|b| b.camp_id.as_str())
            .collect();
        assert_eq!(ids, ["serra-cafema", "doro-nawas"]);
        assert_eq!(selection.selected_camps[0].number_of_nights, 2);
        assert!(selection
            .selected_camps
            .iter()
            .all(|b| b.check_in == "2026-06-01" && b.check_out == "2026-06-01"));
    }

    #[test]
    fn reentering_step_restores_bookings() {
        let catalog = StaticCampCatalog::default();
        let mut draft = ApplicationDraft::default();
        draft.merge(DraftPatch::camp_selection(CampSelection {
            selected_camps: vec![CampBooking::with_defaults("ongava-lodge", "Ongava Lodge")],
        }));
        let widget = CampSelectionWidget::from_draft(&catalog, &draft);
        assert!(widget.is_selected("ongava-lodge"));
        assert!(!widget.is_selected("doro-nawas"));
    }

    #[test]
    fn bookings_for_retired_camps_are_dropped() {
        let catalog = StaticCampCatalog::default();
        let mut draft = ApplicationDraft::default();
        draft.merge(DraftPatch::camp_selection(CampSelection {
            selected_camps: vec![
                CampBooking::with_defaults("retired-camp", "Retired Camp"),
                CampBooking::with_defaults("doro-nawas", "Doro Nawas"),
            ],
        }));
        let widget = CampSelectionWidget::from_draft(&catalog, &draft);
        let ids: Vec<_> = widget.bookings().iter().map(|b| b.camp_id.as_str()).collect();
        assert_eq!(ids, ["doro-nawas"]);
    }
}
