//! Final handoff to the environment's interpreter.

use crate::error::{LaunchError, status_code};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;

/// A prepared `<interpreter> <entry point>` invocation rooted at the base
/// directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handoff {
    interpreter: PathBuf,
    entry_point: PathBuf,
    base_dir: PathBuf,
}

impl Handoff {
    pub fn new(interpreter: PathBuf, entry_point: PathBuf, base_dir: PathBuf) -> Self {
        Self {
            interpreter,
            entry_point,
            base_dir,
        }
    }

    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    pub fn entry_point(&self) -> &Path {
        &self.entry_point
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.interpreter);
        cmd.arg(&self.entry_point).current_dir(&self.base_dir);
        cmd
    }

    fn launch_failure(&self, source: std::io::Error) -> LaunchError {
        LaunchError::LaunchFailure {
            interpreter: self.interpreter.clone(),
            source,
        }
    }

    /// Replaces the current process with the interpreter.
    ///
    /// Only returns if the replacement could not happen.
    #[cfg(unix)]
    pub fn exec(self) -> LaunchError {
        use std::os::unix::process::CommandExt;

        info!(
            "Executing {} {}",
            self.interpreter.display(),
            self.entry_point.display()
        );
        let err = self.command().exec();
        self.launch_failure(err)
    }

    /// Spawns the interpreter, waits for it, and returns its exit code.
    pub fn wait(self) -> Result<u8, LaunchError> {
        info!(
            "Spawning {} {}",
            self.interpreter.display(),
            self.entry_point.display()
        );
        let status = self
            .command()
            .status()
            .map_err(|err| self.launch_failure(err))?;
        info!("Application exited with {}", status);
        Ok(status_code(status))
    }

    /// Hands control to the interpreter the best way the platform allows.
    ///
    /// On Unix this is [`Handoff::exec`] and only returns on failure.
    /// Elsewhere it is [`Handoff::wait`].
    pub fn run(self) -> Result<u8, LaunchError> {
        #[cfg(unix)]
        {
            Err(self.exec())
        }
        #[cfg(not(unix))]
        {
            self.wait()
        }
    }
}
