pub mod navigation;
pub mod output;
pub mod progress;
pub mod prompter;
pub mod runner;
pub mod steps;
pub mod test_mode;

pub use runner::{run, RunOutcome};
