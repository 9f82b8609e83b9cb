use clap::Parser;
use std::process::ExitCode;

use moneyrepo_client::cli::{self, Cli};
use moneyrepo_client::{logging, App, ClientConfig};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env when present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = match logging::init(&config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: {}", e);
            None
        }
    };

    let app = App::new(config);
    match cli::run(cli, &app).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
