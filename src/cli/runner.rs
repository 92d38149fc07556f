//! Drives a [`Wizard`] through the terminal: one step view per iteration,
//! then a navigation choice.

use std::io::{self, Write};

use crossterm::{
    cursor,
    terminal::{self, ClearType},
    ExecutableCommand,
};
use kyc_core::{
    IntakeGateway, KeyValueStore, NavAction, NextOutcome, SubmissionPhase, Wizard,
};

use crate::cli::{
    navigation::{self, Choice},
    output, progress,
    prompter::Prompter,
    steps::{self, StepContext},
};
use crate::errors::AppError;

/// How a wizard session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Submitted { application_id: String },
    SavedForLater,
}

pub fn run<S, G>(
    wizard: &mut Wizard<S>,
    gateway: &G,
    prompter: &mut dyn Prompter,
    clear_screen: bool,
) -> Result<RunOutcome, AppError>
where
    S: KeyValueStore,
    G: IntakeGateway + ?Sized,
{
    if wizard.resumed() {
        output::info("Welcome back! Your saved application has been restored.");
    }

    loop {
        if clear_screen {
            clear()?;
        }
        let step = wizard.current_step();
        progress::render(&wizard.progress());
        output::section(step.label());

        if !wizard.errors().is_empty() {
            output::warning(format!(
                "Please correct {} field(s) before continuing.",
                wizard.errors().len()
            ));
        }
        if let Some(message) = wizard.phase().error_message() {
            output::error(message);
        }

        let patch = {
            let ctx = StepContext {
                draft: &wizard.state().form_data,
                errors: wizard.errors(),
                catalog: wizard.catalog(),
            };
            steps::prompt_step(step, prompter, &ctx)?
        };
        wizard.update(patch);

        match navigation::choose(prompter, &wizard.controls())? {
            Choice::SaveAndExit => {
                output::info("Your progress is saved. Run safari-kyc again to pick up where you left off.");
                return Ok(RunOutcome::SavedForLater);
            }
            Choice::Nav(NavAction::Next) => {
                if let NextOutcome::Blocked = wizard.next() {
                    output::warning("Some answers need attention.");
                }
            }
            Choice::Nav(NavAction::Back) => {
                wizard.back();
            }
            Choice::Nav(NavAction::EditStep(target)) => {
                wizard.edit_step(target.number())?;
            }
            Choice::Nav(NavAction::Submit) => {
                output::info("Submitting your application...");
                if let SubmissionPhase::Submitted { application_id } = wizard.submit(gateway)? {
                    let application_id = application_id.clone();
                    confirm_submitted(&application_id);
                    return Ok(RunOutcome::Submitted { application_id });
                }
            }
        }
    }
}

fn confirm_submitted(application_id: &str) {
    output::success("Application submitted!");
    output::line(format!("Your application reference is {application_id}."));
    output::line("Our reservations team will be in touch within two business days.");
}

fn clear() -> Result<(), AppError> {
    let mut stdout = io::stdout();
    stdout.execute(terminal::Clear(ClearType::All))?;
    stdout.execute(cursor::MoveTo(0, 0))?;
    stdout.flush()?;
    Ok(())
}
