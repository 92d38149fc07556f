//! Wizard state and its reducer.
//!
//! `reduce` is the only place state changes. It is a pure function so the
//! transition table can be tested without storage; persisting the result is
//! the caller's job (see [`crate::wizard::Wizard::dispatch`]).

use std::collections::BTreeSet;

use kyc_domain::{ApplicationDraft, DraftPatch, WizardStep};

use crate::validation::FieldErrors;

/// Ephemeral control state plus the accumulated draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardState {
    pub current_step: WizardStep,
    pub form_data: ApplicationDraft,
    pub completed_steps: BTreeSet<WizardStep>,
    pub errors: FieldErrors,
}

impl WizardState {
    /// State seeded from a persisted snapshot.
    pub fn restored(form_data: ApplicationDraft, current_step: WizardStep) -> Self {
        Self {
            current_step,
            form_data,
            ..Self::default()
        }
    }

    pub fn is_completed(&self, step: WizardStep) -> bool {
        self.completed_steps.contains(&step)
    }

    pub fn completed_numbers(&self) -> Vec<u8> {
        self.completed_steps.iter().map(|step| step.number()).collect()
    }
}

/// The constrained set of transitions the store accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    SetStep(WizardStep),
    UpdateData(DraftPatch),
    MarkComplete(WizardStep),
    SetErrors(FieldErrors),
    Reset,
}

impl WizardAction {
    pub fn name(&self) -> &'static str {
        match self {
            WizardAction::SetStep(_) => "SET_STEP",
            WizardAction::UpdateData(_) => "UPDATE_DATA",
            WizardAction::MarkComplete(_) => "MARK_COMPLETE",
            WizardAction::SetErrors(_) => "SET_ERRORS",
            WizardAction::Reset => "RESET",
        }
    }
}

pub fn reduce(mut state: WizardState, action: WizardAction) -> WizardState {
    match action {
        WizardAction::SetStep(step) => {
            state.current_step = step;
            state
        }
        WizardAction::UpdateData(patch) => {
            state.form_data.merge(patch);
            state
        }
        WizardAction::MarkComplete(step) => {
            state.completed_steps.insert(step);
            state
        }
        WizardAction::SetErrors(errors) => {
            state.errors = errors;
            state
        }
        WizardAction::Reset => WizardState::default(),
    }
}
