use thiserror::Error;

use kyc_config::ConfigError;
use kyc_core::{CoreError, SubmissionError};

/// Failures surfaced by the `safari-kyc` binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("Intake setup failed: {0}")]
    Intake(#[from] SubmissionError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Prompt failed: {0}")]
    Prompt(String),
}

impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::Prompt(err.to_string())
    }
}
