use kyc_core::{NavAction, NavigationControls};

use crate::cli::prompter::Prompter;
use crate::errors::AppError;

/// What the user picked at the bottom of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Nav(NavAction),
    SaveAndExit,
}

impl Choice {
    fn label(&self) -> String {
        match self {
            Choice::Nav(action) => action.label(),
            Choice::SaveAndExit => "Save and exit".to_string(),
        }
    }
}

/// Available choices in display order; the first is the default.
pub fn choices(controls: &NavigationControls) -> Vec<Choice> {
    controls
        .actions()
        .into_iter()
        .map(Choice::Nav)
        .chain(std::iter::once(Choice::SaveAndExit))
        .collect()
}

pub fn choose(
    prompter: &mut dyn Prompter,
    controls: &NavigationControls,
) -> Result<Choice, AppError> {
    let choices = choices(controls);
    let items: Vec<String> = choices.iter().map(Choice::label).collect();
    let index = prompter.select("What next?", &items, 0)?;
    Ok(choices.get(index).copied().unwrap_or(Choice::SaveAndExit))
}
