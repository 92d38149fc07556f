//! Which navigation controls are available on the current step.

use kyc_domain::WizardStep;

use crate::{state::WizardState, submission::SubmissionPhase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Back,
    Next,
    Submit,
    /// Review-page link back to an earlier step.
    EditStep(WizardStep),
}

impl NavAction {
    pub fn label(&self) -> String {
        match self {
            NavAction::Back => "Back".to_string(),
            NavAction::Next => "Next".to_string(),
            NavAction::Submit => "Submit application".to_string(),
            NavAction::EditStep(step) => format!("Edit {}", step.label()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationControls {
    pub can_go_back: bool,
    pub show_next: bool,
    pub show_submit: bool,
    pub submit_enabled: bool,
    pub edit_targets: Vec<WizardStep>,
}

impl NavigationControls {
    pub fn derive(state: &WizardState, phase: &SubmissionPhase) -> Self {
        let step = state.current_step;
        let busy = phase.is_submitting() || phase.is_submitted();
        let edit_targets = if step.is_last() {
            WizardStep::ALL
                .iter()
                .copied()
                .filter(|candidate| *candidate < step)
                .collect()
        } else {
            Vec::new()
        };
        Self {
            can_go_back: !step.is_first() && !busy,
            show_next: !step.is_last(),
            show_submit: step.is_last(),
            submit_enabled: step.is_last() && !busy,
            edit_targets,
        }
    }

    /// Actions offered to the user, primary action first.
    pub fn actions(&self) -> Vec<NavAction> {
        let mut actions = Vec::new();
        if self.show_next {
            actions.push(NavAction::Next);
        }
        if self.submit_enabled {
            actions.push(NavAction::Submit);
        }
        if self.can_go_back {
            actions.push(NavAction::Back);
        }
        if self.submit_enabled {
            actions.extend(self.edit_targets.iter().copied().map(NavAction::EditStep));
        }
        actions
    }
}
