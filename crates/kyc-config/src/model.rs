use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_DIR_NAME: &str = "safari-kyc";

/// Settings for the application wizard. Every field has a default so older
/// or hand-edited files keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_intake_endpoint")]
    pub intake_endpoint: String,
    #[serde(default = "Config::default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Where drafts are kept. Defaults to the platform data directory.
    pub data_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Where offline submissions are written. Defaults to `<data_dir>/outbox`.
    pub outbox_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// JSON camp list replacing the built-in catalog.
    pub camp_catalog: Option<PathBuf>,

    #[serde(default)]
    pub strict_validation: bool,
    #[serde(default)]
    pub offline: bool,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub accessibility: AccessibilitySettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            intake_endpoint: Self::default_intake_endpoint(),
            request_timeout_secs: Self::default_request_timeout_secs(),
            data_dir: None,
            outbox_dir: None,
            camp_catalog: None,
            strict_validation: false,
            offline: false,
            ui_color_enabled: Self::default_ui_color_enabled(),
            accessibility: AccessibilitySettings::default(),
        }
    }
}

impl Config {
    pub fn default_intake_endpoint() -> String {
        "http://localhost:3000/api/applications".into()
    }

    pub fn default_request_timeout_secs() -> u64 {
        30
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Directory holding the draft store and, by default, the outbox.
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(path) = &self.data_dir {
            return path.clone();
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        base.join(APP_DIR_NAME)
    }

    pub fn resolve_outbox_dir(&self) -> PathBuf {
        match &self.outbox_dir {
            Some(path) => path.clone(),
            None => self.resolve_data_dir().join("outbox"),
        }
    }

    /// Default location of the config file itself.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
    }

    /// Colored output is used only when enabled and not in plain mode.
    pub fn use_color(&self) -> bool {
        self.ui_color_enabled && !self.accessibility.plain_output
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilitySettings {
    #[serde(default)]
    pub plain_output: bool,
}
