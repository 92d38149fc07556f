use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

pub struct CliOutput {
    pub stdout: String,
    #[allow(dead_code)]
    pub stderr: String,
}

/// Runs the binary against an isolated home directory with scripted answers.
pub struct WizardHarness {
    home: TempDir,
}

impl WizardHarness {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn home(&self) -> &Path {
        self.home.path()
    }

    pub fn draft_store(&self) -> PathBuf {
        self.home().join("draft-store.json")
    }

    #[allow(dead_code)]
    pub fn outbox(&self) -> PathBuf {
        self.home().join("outbox")
    }

    pub fn command(&self, inputs: &[&str], args: &[&str]) -> Command {
        let mut cmd = Command::cargo_bin("safari-kyc").expect("binary exists");
        cmd.env("SAFARI_KYC_HOME", self.home())
            .env_remove("SAFARI_KYC_ENDPOINT")
            .env("SAFARI_KYC_TEST_INPUTS", join_inputs(inputs))
            .arg("--offline")
            .arg("--plain")
            .args(args);
        cmd
    }

    pub fn run(&self, inputs: &[&str], args: &[&str]) -> CliOutput {
        let output = self
            .command(inputs, args)
            .output()
            .expect("run safari-kyc");
        if !output.status.success() {
            panic!(
                "safari-kyc failed: status={}\nstdout:\n{}\nstderr:\n{}",
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        CliOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

#[allow(dead_code)]
pub const PERSONAL: &[&str] = &[
    "Jane",
    "Doe",
    "jane@example.com",
    "+264 81 123 4567",
    "1990-04-12",
    "Namibian",
    "P1234567",
    "2031-01-01",
];

#[allow(dead_code)]
pub const TRAVEL: &[&str] = &["2026-06-01", "2026-06-10", "n", "<KEEP>", "0"];

fn join_inputs(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("|")
}
