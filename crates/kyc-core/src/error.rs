use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Invalid step number: {0}")]
    InvalidStep(u8),
    #[error("Cannot jump forward from step {from} to step {to} without validation")]
    ForwardJump { from: u8, to: u8 },
    #[error("Unknown camp: {0}")]
    UnknownCamp(String),
    #[error("A submission is already in progress")]
    SubmissionInFlight,
    #[error("The application has already been submitted")]
    AlreadySubmitted,
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serde(err.to_string())
    }
}
