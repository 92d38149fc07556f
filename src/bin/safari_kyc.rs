use std::process::ExitCode;

use clap::Parser;
use safari_kyc::app::{self, Cli};

fn main() -> ExitCode {
    safari_kyc::init();
    let cli = Cli::parse();
    match app::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "safari-kyc failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
