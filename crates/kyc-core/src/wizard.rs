//! Wizard controller: the single owner of [`WizardState`].
//!
//! Every mutation goes through [`Wizard::dispatch`], which runs the reducer
//! and then mirrors the draft to storage. Storage failures never interrupt
//! the applicant; they are logged and the in-memory state stays
//! authoritative.

use std::{mem, sync::Arc};

use kyc_domain::{DraftPatch, WizardStep};

use crate::{
    catalog::CampCatalog,
    navigation::NavigationControls,
    persistence::{DraftPersistence, KeyValueStore},
    progress::ProgressView,
    state::{reduce, WizardAction, WizardState},
    submission::{
        ApplicationPayload, IntakeGateway, SubmissionPhase, GENERIC_FAILURE_MESSAGE,
        REJECTED_FALLBACK_MESSAGE,
    },
    validation::{FieldErrors, StepValidator, ValidationMode},
    CoreError,
};

/// Shown when the intake service reports success without a reference.
pub const MISSING_ID_MESSAGE: &str =
    "The application service did not return a reference number. Please try again.";

/// Result of pressing Next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextOutcome {
    Advanced(WizardStep),
    /// Validation failed; the errors are in [`WizardState::errors`].
    Blocked,
    /// Review is the last step; it is left through submission.
    AtLastStep,
}

pub struct Wizard<S: KeyValueStore> {
    state: WizardState,
    persistence: DraftPersistence<S>,
    catalog: Arc<dyn CampCatalog>,
    mode: ValidationMode,
    phase: SubmissionPhase,
    resumed: bool,
}

impl<S: KeyValueStore> Wizard<S> {
    /// Hydrates from storage before any step is shown. Never fails.
    pub fn mount(
        persistence: DraftPersistence<S>,
        catalog: Arc<dyn CampCatalog>,
        mode: ValidationMode,
    ) -> Self {
        let restored = persistence.restore();
        let state = WizardState::restored(restored.form_data, restored.current_step);
        tracing::debug!(
            step = state.current_step.number(),
            resumed = restored.recovered,
            "Wizard mounted"
        );
        Self {
            state,
            persistence,
            catalog,
            mode,
            phase: SubmissionPhase::Editing,
            resumed: restored.recovered,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.current_step
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.state.errors
    }

    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    /// True when the session picked up a previously saved draft.
    pub fn resumed(&self) -> bool {
        self.resumed
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn catalog(&self) -> &dyn CampCatalog {
        self.catalog.as_ref()
    }

    pub fn persistence(&self) -> &DraftPersistence<S> {
        &self.persistence
    }

    pub fn validator(&self) -> StepValidator<'_> {
        StepValidator::new(self.mode, self.catalog.as_ref())
    }

    pub fn progress(&self) -> ProgressView {
        ProgressView::from_state(&self.state)
    }

    pub fn controls(&self) -> NavigationControls {
        NavigationControls::derive(&self.state, &self.phase)
    }

    /// Applies one action and persists the resulting draft.
    pub fn dispatch(&mut self, action: WizardAction) {
        tracing::debug!(action = action.name(), "Dispatching wizard action");
        let state = mem::take(&mut self.state);
        self.state = reduce(state, action);
        if self.state.form_data.is_empty() {
            return;
        }
        if let Err(err) = self.persistence.save(&self.state) {
            tracing::warn!(error = %err, "Failed to persist application draft");
        }
    }

    pub fn update(&mut self, patch: DraftPatch) {
        if patch.is_empty() {
            return;
        }
        self.dispatch(WizardAction::UpdateData(patch));
    }

    /// Validates the current step and moves forward when it passes.
    pub fn next(&mut self) -> NextOutcome {
        let current = self.state.current_step;
        let Some(target) = current.next() else {
            return NextOutcome::AtLastStep;
        };

        let errors = self.validator().validate(current, &self.state.form_data);
        if !errors.is_empty() {
            tracing::info!(
                step = current.number(),
                errors = errors.len(),
                "Step validation failed"
            );
            self.dispatch(WizardAction::SetErrors(errors));
            return NextOutcome::Blocked;
        }

        self.dispatch(WizardAction::MarkComplete(current));
        self.dispatch(WizardAction::SetErrors(FieldErrors::new()));
        self.dispatch(WizardAction::SetStep(target));
        self.leave_review_error();
        tracing::info!(from = current.number(), to = target.number(), "Advanced step");
        NextOutcome::Advanced(target)
    }

    /// Moves one step back. Returns false on the first step.
    pub fn back(&mut self) -> bool {
        match self.state.current_step.previous() {
            Some(previous) => {
                self.dispatch(WizardAction::SetStep(previous));
                self.leave_review_error();
                true
            }
            None => false,
        }
    }

    /// Jumps to an earlier (or the current) step, as the review page's edit
    /// links do. Forward jumps would skip validation and are refused.
    pub fn edit_step(&mut self, number: u8) -> Result<WizardStep, CoreError> {
        let target = WizardStep::from_number(number).ok_or(CoreError::InvalidStep(number))?;
        let current = self.state.current_step;
        if target > current {
            return Err(CoreError::ForwardJump {
                from: current.number(),
                to: number,
            });
        }
        self.dispatch(WizardAction::SetStep(target));
        self.leave_review_error();
        Ok(target)
    }

    /// Runs the submission transaction from the review step.
    ///
    /// Validation failures leave the phase untouched and populate the
    /// errors. Gateway outcomes are reported through the returned phase.
    pub fn submit<G>(&mut self, gateway: &G) -> Result<&SubmissionPhase, CoreError>
    where
        G: IntakeGateway + ?Sized,
    {
        match self.phase {
            SubmissionPhase::Submitting => return Err(CoreError::SubmissionInFlight),
            SubmissionPhase::Submitted { .. } => return Err(CoreError::AlreadySubmitted),
            _ => {}
        }
        let current = self.state.current_step;
        if !current.is_last() {
            return Err(CoreError::InvalidStep(current.number()));
        }

        let errors = self.validator().validate(current, &self.state.form_data);
        if !errors.is_empty() {
            self.dispatch(WizardAction::SetErrors(errors));
            return Ok(&self.phase);
        }
        self.dispatch(WizardAction::SetErrors(FieldErrors::new()));

        self.phase = SubmissionPhase::Submitting;
        let payload = ApplicationPayload::from(&self.state.form_data);
        tracing::info!(
            camps = payload.camp_selection.selected_camps.len(),
            "Submitting application"
        );

        self.phase = match gateway.submit(&payload) {
            Err(err) => {
                tracing::warn!(error = %err, "Application submission failed");
                SubmissionPhase::SubmitError {
                    message: GENERIC_FAILURE_MESSAGE.to_string(),
                }
            }
            Ok(response) if !response.success => {
                let message = response
                    .message
                    .filter(|message| !message.trim().is_empty())
                    .unwrap_or_else(|| REJECTED_FALLBACK_MESSAGE.to_string());
                tracing::warn!(%message, "Application rejected by intake service");
                SubmissionPhase::SubmitError { message }
            }
            Ok(response) => match response.application_id.filter(|id| !id.is_empty()) {
                Some(application_id) => {
                    self.finish(&application_id);
                    SubmissionPhase::Submitted { application_id }
                }
                None => {
                    tracing::warn!("Intake service accepted application without an id");
                    SubmissionPhase::SubmitError {
                        message: MISSING_ID_MESSAGE.to_string(),
                    }
                }
            },
        };
        Ok(&self.phase)
    }

    /// Throws the draft away at the applicant's request.
    pub fn discard_draft(&mut self) -> Result<(), CoreError> {
        self.persistence.clear()?;
        self.dispatch(WizardAction::Reset);
        self.phase = SubmissionPhase::Editing;
        self.resumed = false;
        tracing::info!("Discarded saved application draft");
        Ok(())
    }

    fn finish(&mut self, application_id: &str) {
        if let Err(err) = self.persistence.clear() {
            tracing::warn!(error = %err, "Failed to clear submitted application draft");
        }
        self.dispatch(WizardAction::Reset);
        tracing::info!(application_id, "Application submitted");
    }

    fn leave_review_error(&mut self) {
        if self.phase.error_message().is_some() {
            self.phase = SubmissionPhase::Editing;
        }
    }
}
