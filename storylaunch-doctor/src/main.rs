//! Story Generator Doctor
//!
//! Verifies that the project's virtual environment is set up correctly
//! without touching it. Run it next to the launcher after `uv sync`.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use storylaunch::LaunchConfig;
use storylaunch::config::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};
use storylaunch::doctor::{self, DEFAULT_MODULES};
use storylaunch::environment::resolve_base_dir;

#[derive(Parser, Debug)]
#[command(version, about = "Check the story generator environment setup")]
struct Cli {
    /// Project directory to check. Defaults to the doctor's own directory.
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// Python module that must be importable. Repeat for several.
    #[arg(long = "module", value_name = "NAME")]
    modules: Vec<String>,
}

fn main() -> ExitCode {
    let log_level = std::env::var(LOG_ENV_VAR).unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let base = match cli.base_dir {
        Some(dir) => dir
            .canonicalize()
            .with_context(|| format!("cannot access {}", dir.display()))?,
        None => resolve_base_dir()?,
    };
    let modules = if cli.modules.is_empty() {
        DEFAULT_MODULES.iter().map(|m| m.to_string()).collect()
    } else {
        cli.modules
    };
    let config = LaunchConfig::default();

    println!("Story Generator Setup Check");
    println!("===========================\n");
    println!("Checking {}\n", base.display());

    let report = doctor::run_checks(&base, &config, &modules);
    for result in &report.results {
        println!("{}", result);
    }

    if report.all_passed() {
        println!("\n✓ Setup complete!");
        println!("Run the launcher to start the story generator");
        Ok(true)
    } else {
        println!("\n✗ Setup failed!");
        println!(
            "Check the messages above and try '{}'",
            config.sync_command_line()
        );
        Ok(false)
    }
}
