//! Story Generator Launcher
//!
//! Creates the project's virtual environment on first run and then replaces
//! itself with `.venv/bin/python main.py`, so signals and the exit code of
//! the application reach the caller unchanged.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use storylaunch::config::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};
use storylaunch::{LaunchConfig, LaunchError, Launcher};

#[derive(Parser, Debug)]
#[command(version, about = "Bootstrap the virtual environment and start the story generator")]
struct Cli {
    /// Use this project directory instead of the launcher's own directory
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let log_level = std::env::var(LOG_ENV_VAR).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = LaunchConfig::default();

    let launcher = match cli.base_dir {
        Some(dir) => dir
            .canonicalize()
            .map(|dir| Launcher::new(dir, config))
            .map_err(LaunchError::BaseDir),
        None => Launcher::from_current_exe(config),
    };

    let result = launcher.and_then(|launcher| launcher.launch(&mut std::io::stdout()));
    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
