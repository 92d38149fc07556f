//! kyc-core
//!
//! Wizard logic for the safari application flow: the reducer-driven state
//! store, step validators, draft persistence contract, camp selection, progress
//! and navigation derivation, and the submission gateway contract.
//! Depends on kyc-domain. No terminal I/O, no concrete storage or HTTP.

pub mod camp_selection;
pub mod catalog;
pub mod error;
pub mod navigation;
pub mod persistence;
pub mod progress;
pub mod state;
pub mod submission;
pub mod validation;
pub mod wizard;

pub use camp_selection::CampSelectionWidget;
pub use catalog::{CampCatalog, StaticCampCatalog};
pub use error::CoreError;
pub use navigation::{NavAction, NavigationControls};
pub use persistence::{DraftPersistence, KeyValueStore, MemoryStore, DRAFT_KEY, STEP_KEY};
pub use progress::{ProgressView, StepProgress, StepStatus};
pub use state::{reduce, WizardAction, WizardState};
pub use submission::{
    ApplicationPayload, IntakeGateway, IntakeResponse, SubmissionError, SubmissionPhase,
};
pub use validation::{FieldErrors, StepValidator, ValidationMode};
pub use wizard::{NextOutcome, Wizard};
