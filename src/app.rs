//! Command-line entry: resolves configuration, wires storage, catalog and
//! intake together, then hands the wizard to the terminal runner.

use std::{
    env, fs,
    io::{self, IsTerminal},
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use clap::Parser;
use kyc_config::{manager::CONFIG_FILE_NAME, Config, ConfigManager};
use kyc_core::{
    CampCatalog, DraftPersistence, IntakeGateway, KeyValueStore, MemoryStore, StaticCampCatalog,
    ValidationMode, Wizard,
};
use kyc_intake::{HttpIntakeClient, OutboxIntake};
use kyc_storage_json::JsonFileStore;

use crate::cli::{
    output::{self, OutputPreferences},
    prompter::TerminalPrompter,
    runner::{self, RunOutcome},
    test_mode,
};
use crate::errors::AppError;
use crate::utils::build_info;

pub const HOME_ENV: &str = "SAFARI_KYC_HOME";
pub const ENDPOINT_ENV: &str = "SAFARI_KYC_ENDPOINT";

#[derive(Parser, Debug, Default)]
#[command(name = "safari-kyc", about = "Apply for a guided safari, one step at a time", long_about = None)]
#[command(disable_version_flag = true)]
#[command(
    after_help = "Environment:\n  SAFARI_KYC_HOME         Base directory for config and drafts\n  SAFARI_KYC_ENDPOINT     Intake endpoint override\n  SAFARI_KYC_TEST_INPUTS  Scripted answers separated by `|`\n  RUST_LOG                Log filter"
)]
pub struct Cli {
    /// Config file to load instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Directory holding the saved draft.
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
    /// Intake endpoint receiving finished applications.
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,
    /// Write finished applications to the local outbox instead of posting them.
    #[arg(long)]
    pub offline: bool,
    /// Directory used by --offline.
    #[arg(long, value_name = "DIR")]
    pub outbox: Option<PathBuf>,
    /// Check formats, date order and room availability, not only presence.
    #[arg(long)]
    pub strict: bool,
    /// Throw away any saved draft and start over.
    #[arg(long)]
    pub discard_draft: bool,
    /// JSON camp list replacing the built-in catalog.
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,
    /// ASCII-only output without color.
    #[arg(long)]
    pub plain: bool,
    /// Print version and build details.
    #[arg(short = 'V', long)]
    pub version: bool,
}

/// Values read from the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub home: Option<PathBuf>,
    pub endpoint: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self {
            home: env::var_os(HOME_ENV)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from),
            endpoint: env::var(ENDPOINT_ENV).ok().filter(|value| !value.is_empty()),
        }
    }
}

/// Loads the config file and layers environment and flags on top.
pub fn resolve_config(cli: &Cli, env: &EnvOverrides) -> Result<Config, AppError> {
    let manager = match (&cli.config, &env.home) {
        (Some(path), _) => ConfigManager::new(path.clone()),
        (None, Some(home)) => ConfigManager::new(home.join(CONFIG_FILE_NAME)),
        (None, None) => ConfigManager::new(Config::default_config_dir().join(CONFIG_FILE_NAME)),
    };
    tracing::debug!(path = %manager.config_path().display(), "Loading configuration");
    let mut config = manager.load()?;

    if config.data_dir.is_none() {
        config.data_dir = env.home.clone();
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(endpoint) = cli.endpoint.clone().or_else(|| env.endpoint.clone()) {
        config.intake_endpoint = endpoint;
    }
    if let Some(dir) = &cli.outbox {
        config.outbox_dir = Some(dir.clone());
    }
    if let Some(path) = &cli.catalog {
        config.camp_catalog = Some(path.clone());
    }
    config.offline |= cli.offline;
    config.strict_validation |= cli.strict;
    config.accessibility.plain_output |= cli.plain;
    Ok(config)
}

pub fn load_catalog(config: &Config) -> Result<Arc<dyn CampCatalog>, AppError> {
    match &config.camp_catalog {
        Some(path) => {
            let data = fs::read_to_string(path)?;
            let catalog = StaticCampCatalog::from_json(&data)?;
            tracing::info!(
                path = %path.display(),
                camps = catalog.camps().len(),
                "Loaded camp catalog"
            );
            Ok(Arc::new(catalog))
        }
        None => Ok(Arc::new(StaticCampCatalog::default())),
    }
}

pub fn build_gateway(config: &Config) -> Result<Box<dyn IntakeGateway>, AppError> {
    if config.offline {
        let dir = config.resolve_outbox_dir();
        tracing::info!(outbox = %dir.display(), "Offline mode, applications go to the outbox");
        return Ok(Box::new(OutboxIntake::new(dir)));
    }
    let client = HttpIntakeClient::new(
        config.intake_endpoint.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?;
    Ok(Box::new(client))
}

/// Opens the draft file store. An unusable directory falls back to an
/// in-memory store so the session can still go on.
pub fn open_draft_store(data_dir: &Path) -> Box<dyn KeyValueStore> {
    match JsonFileStore::in_dir(data_dir) {
        Ok(store) => {
            tracing::debug!(store = %store.path().display(), "Draft store ready");
            Box::new(store)
        }
        Err(err) => {
            tracing::warn!(
                dir = %data_dir.display(),
                error = %err,
                "Draft directory unusable, progress will not survive this session"
            );
            output::warning("Your progress can't be saved on this device for now.");
            Box::new(MemoryStore::new())
        }
    }
}

pub fn run(cli: Cli) -> Result<(), AppError> {
    if cli.version {
        println!("{}", build_info::current().report());
        return Ok(());
    }

    let config = resolve_config(&cli, &EnvOverrides::from_env())?;
    let preferences = OutputPreferences {
        plain: config.accessibility.plain_output,
        color: config.use_color(),
    };
    output::set_preferences(preferences);

    let store = open_draft_store(&config.resolve_data_dir());

    let mode = if config.strict_validation {
        ValidationMode::Strict
    } else {
        ValidationMode::Relaxed
    };
    let mut wizard = Wizard::mount(DraftPersistence::new(store), load_catalog(&config)?, mode);
    if cli.discard_draft {
        wizard.discard_draft()?;
        output::info("Saved draft discarded. Starting a new application.");
    }

    let gateway = build_gateway(&config)?;
    let clear_screen =
        io::stdout().is_terminal() && !test_mode::is_enabled() && !preferences.plain;
    let mut prompter = TerminalPrompter::new();

    match runner::run(&mut wizard, gateway.as_ref(), &mut prompter, clear_screen)? {
        RunOutcome::Submitted { application_id } if config.offline => {
            output::info(format!(
                "Offline mode: {application_id} is waiting in {}",
                config.resolve_outbox_dir().display()
            ));
        }
        RunOutcome::Submitted { .. } | RunOutcome::SavedForLater => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn flags_override_file_and_environment() {
        let dir = tempdir().expect("tempdir");
        let config_path = dir.path().join("custom.json");
        let manager = ConfigManager::new(config_path.clone());
        manager
            .save(&Config {
                intake_endpoint: "https://file.example/api".into(),
                ..Config::default()
            })
            .expect("save config");

        let env = EnvOverrides {
            home: Some(dir.path().join("home")),
            endpoint: Some("https://env.example/api".into()),
        };
        let cli = Cli {
            config: Some(config_path),
            strict: true,
            ..Cli::default()
        };
        let config = resolve_config(&cli, &env).expect("config");
        assert_eq!(config.intake_endpoint, "https://env.example/api");
        assert_eq!(config.data_dir, Some(dir.path().join("home")));
        assert!(config.strict_validation);

        let cli = Cli {
            endpoint: Some("https://flag.example/api".into()),
            data_dir: Some(dir.path().join("drafts")),
            ..cli
        };
        let config = resolve_config(&cli, &env).expect("config");
        assert_eq!(config.intake_endpoint, "https://flag.example/api");
        assert_eq!(config.data_dir, Some(dir.path().join("drafts")));
    }

    #[test]
    fn home_directory_holds_the_config_file() {
        let home = tempdir().expect("tempdir");
        ConfigManager::new(home.path().join(CONFIG_FILE_NAME))
            .save(&Config {
                offline: true,
                ..Config::default()
            })
            .expect("save config");
        let env = EnvOverrides {
            home: Some(home.path().to_path_buf()),
            endpoint: None,
        };
        let config = resolve_config(&Cli::default(), &env).expect("config");
        assert!(config.offline);
        assert_eq!(config.resolve_data_dir(), home.path().to_path_buf());
    }

    #[test]
    fn unusable_data_dir_falls_back_to_memory() {
        let dir = tempdir().expect("tempdir");
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").expect("write blocker file");

        let store = open_draft_store(&blocker.join("drafts"));
        store.set("kycCurrentStep", "2").expect("memory set");
        assert_eq!(
            store.get("kycCurrentStep").expect("memory get").as_deref(),
            Some("2")
        );
        assert!(!blocker.join("drafts").exists());
    }

    #[test]
    fn catalog_file_replaces_builtin_camps() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("camps.json");
        fs::write(
            &path,
            r#"[{"id":"kulala-desert","name":"Kulala Desert Lodge","region":"Sossusvlei",
                "description":"Dune views","image":"","features":[],"roomTypes":["standard"],
                "priceTier":"classic"}]"#,
        )
        .expect("write catalog");
        let config = Config {
            camp_catalog: Some(path),
            ..Config::default()
        };
        let catalog = load_catalog(&config).expect("catalog");
        assert_eq!(catalog.camps().len(), 1);
        assert!(catalog.contains("kulala-desert"));
    }
}
