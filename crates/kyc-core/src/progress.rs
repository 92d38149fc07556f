use kyc_domain::{WizardStep, TOTAL_STEPS};

use crate::state::WizardState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Current,
    Completed,
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepProgress {
    pub step: WizardStep,
    pub status: StepStatus,
}

/// Read-only projection of the wizard used by the progress indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressView {
    pub current: WizardStep,
    pub steps: Vec<StepProgress>,
}

impl ProgressView {
    pub fn from_state(state: &WizardState) -> Self {
        let steps = WizardStep::ALL
            .iter()
            .map(|&step| {
                let status = if step == state.current_step {
                    StepStatus::Current
                } else if state.is_completed(step) {
                    StepStatus::Completed
                } else {
                    StepStatus::Upcoming
                };
                StepProgress { step, status }
            })
            .collect();
        Self {
            current: state.current_step,
            steps,
        }
    }

    /// Position-based completion, 0 on the first step and 100 on review.
    pub fn percent(&self) -> u8 {
        let done = u32::from(self.current.number() - 1);
        let span = u32::from(TOTAL_STEPS - 1);
        (done * 100 / span) as u8
    }

    pub fn headline(&self) -> String {
        self.current.to_string()
    }
}
