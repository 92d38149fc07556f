//! kyc-config
//!
//! User configuration for the application wizard: intake endpoint, storage
//! locations, validation strictness and output preferences, plus disk
//! persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{AccessibilitySettings, Config};
