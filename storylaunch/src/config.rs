//! Launcher configuration.
//!
//! The launcher works with a handful of fixed names: the environment
//! directory, the sync command that creates it, and the entry point handed
//! to the environment's interpreter. They live here so embedders and tests
//! can point the launcher at stubs.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable holding the `tracing` filter for both binaries.
pub const LOG_ENV_VAR: &str = "STORYLAUNCH_LOG";

/// Filter used when [`LOG_ENV_VAR`] is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Names and messages the launcher operates with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchConfig {
    /// Environment directory, relative to the base directory.
    pub env_dir: PathBuf,
    /// Program that creates and populates the environment directory.
    pub sync_program: OsString,
    pub sync_args: Vec<OsString>,
    /// File handed to the interpreter, relative to the base directory.
    pub entry_point: PathBuf,
    /// Printed before running the sync command.
    pub setup_notice: String,
    /// Printed, followed by a blank line, right before the handoff.
    pub banner: String,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            env_dir: PathBuf::from(".venv"),
            sync_program: OsString::from("uv"),
            sync_args: vec![OsString::from("sync")],
            entry_point: PathBuf::from("main.py"),
            setup_notice: "Setting up virtual environment...".to_string(),
            banner: "Starting Magical Story Generator...".to_string(),
        }
    }
}

impl LaunchConfig {
    /// Absolute location of the environment directory under `base`.
    pub fn env_path(&self, base: &Path) -> PathBuf {
        base.join(&self.env_dir)
    }

    /// Interpreter inside the environment directory.
    ///
    /// Follows the virtualenv layout: `bin/python` on Unix,
    /// `Scripts\python.exe` on Windows.
    pub fn interpreter_path(&self, base: &Path) -> PathBuf {
        let env = self.env_path(base);
        if cfg!(windows) {
            env.join("Scripts").join("python.exe")
        } else {
            env.join("bin").join("python")
        }
    }

    /// Human-readable sync command line, used in messages.
    pub fn sync_command_line(&self) -> String {
        std::iter::once(&self.sync_program)
            .chain(&self.sync_args)
            .map(|arg| arg.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
