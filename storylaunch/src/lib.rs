//! Story Generator Launcher
//!
//! Makes sure the project's virtual environment exists, creating it with
//! `uv sync` when it is missing, then hands the process over to the
//! environment's interpreter running `main.py`.
//!
//! All paths are anchored to the directory holding the launcher executable,
//! so it can be started from anywhere.

pub mod config;
pub mod doctor;
pub mod environment;
pub mod error;
pub mod handoff;

pub use config::LaunchConfig;
pub use error::LaunchError;
pub use handoff::Handoff;

use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Bootstraps the environment under a fixed base directory.
#[derive(Debug, Clone)]
pub struct Launcher {
    base_dir: PathBuf,
    config: LaunchConfig,
}

impl Launcher {
    pub fn new(base_dir: PathBuf, config: LaunchConfig) -> Self {
        Self { base_dir, config }
    }

    /// Launcher anchored to the directory of the running executable.
    pub fn from_current_exe(config: LaunchConfig) -> Result<Self, LaunchError> {
        let base_dir = environment::resolve_base_dir()?;
        Ok(Self::new(base_dir, config))
    }

    /// Runs every step up to the handoff.
    ///
    /// Checks for the environment directory, syncs it when absent, and
    /// prints the banner to `out`. A failed sync returns before anything
    /// else is printed.
    pub fn prepare(&self, out: &mut dyn Write) -> Result<Handoff, LaunchError> {
        if !environment::environment_present(&self.base_dir, &self.config) {
            info!("Environment missing, running setup");
            print_line(out, &self.config.setup_notice);
            environment::sync_environment(&self.base_dir, &self.config)?;
        }

        print_line(out, &self.config.banner);
        print_line(out, "");

        Ok(Handoff::new(
            self.config.interpreter_path(&self.base_dir),
            self.config.entry_point.clone(),
            self.base_dir.clone(),
        ))
    }

    /// Prepares and hands off. See [`Handoff::run`].
    pub fn launch(&self, out: &mut dyn Write) -> Result<u8, LaunchError> {
        self.prepare(out)?.run()
    }
}

/// Writes and flushes one status line. Write errors are ignored.
fn print_line(out: &mut dyn Write, line: &str) {
    let _ = writeln!(out, "{}", line).and_then(|()| out.flush());
}
