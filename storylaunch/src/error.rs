//! Launcher failures and their process exit codes.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Shell convention for "command found but not executable".
pub const EXIT_NOT_EXECUTABLE: u8 = 126;
/// Shell convention for "command not found".
pub const EXIT_NOT_FOUND: u8 = 127;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("cannot resolve launcher directory: {0}")]
    BaseDir(#[source] io::Error),

    #[error("cannot run `{command}`: {source}")]
    SyncSpawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` failed with {status}")]
    SetupFailure { command: String, status: ExitStatus },

    #[error("cannot launch {path}: {source}", path = .interpreter.display())]
    LaunchFailure {
        interpreter: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LaunchError {
    /// Exit code the launcher terminates with for this failure. Never 0.
    pub fn exit_code(&self) -> u8 {
        match self {
            LaunchError::BaseDir(_) => 1,
            LaunchError::SyncSpawn { source, .. } | LaunchError::LaunchFailure { source, .. } => {
                spawn_error_code(source)
            }
            LaunchError::SetupFailure { status, .. } => match status_code(*status) {
                0 => 1,
                code => code,
            },
        }
    }
}

/// Maps a failed spawn to the code a shell would report.
pub fn spawn_error_code(err: &io::Error) -> u8 {
    match err.kind() {
        io::ErrorKind::NotFound => EXIT_NOT_FOUND,
        _ => EXIT_NOT_EXECUTABLE,
    }
}

/// Exit code a shell would report for a finished child.
///
/// Codes are truncated to the low byte, see [`exit_code_byte`]. On Unix a
/// child killed by a signal maps to `128 + signal`.
pub fn status_code(status: ExitStatus) -> u8 {
    if let Some(code) = status.code() {
        return exit_code_byte(code);
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128u8.wrapping_add((signal & 0x7f) as u8);
        }
    }
    1
}

/// Low byte of a child's exit code. A non-zero code whose low byte is zero
/// maps to 1 so failure never turns into success.
pub fn exit_code_byte(code: i32) -> u8 {
    match (code & 0xff) as u8 {
        0 if code != 0 => 1,
        byte => byte,
    }
}
