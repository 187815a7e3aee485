//! Base directory resolution and environment bootstrap.

use crate::config::LaunchConfig;
use crate::error::LaunchError;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

/// Directory containing the running executable, symlinks resolved.
///
/// This is what every relative path is anchored to, regardless of the
/// caller's working directory.
pub fn resolve_base_dir() -> Result<PathBuf, LaunchError> {
    let exe = std::env::current_exe()
        .and_then(|p| p.canonicalize())
        .map_err(LaunchError::BaseDir)?;
    let base = exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        LaunchError::BaseDir(std::io::Error::other(format!(
            "{} has no parent directory",
            exe.display()
        )))
    })?;
    debug!("Resolved base directory: {}", base.display());
    Ok(base)
}

/// Whether the environment directory exists under `base`.
pub fn environment_present(base: &Path, config: &LaunchConfig) -> bool {
    let env = config.env_path(base);
    let present = env.is_dir();
    debug!("Environment {} present: {}", env.display(), present);
    present
}

/// Runs the sync command in `base` and waits for it.
///
/// Output is inherited. Any non-zero exit is a [`LaunchError::SetupFailure`].
pub fn sync_environment(base: &Path, config: &LaunchConfig) -> Result<(), LaunchError> {
    let command = config.sync_command_line();
    info!("Running `{}` in {}", command, base.display());

    let status = Command::new(&config.sync_program)
        .args(&config.sync_args)
        .current_dir(base)
        .status()
        .map_err(|source| LaunchError::SyncSpawn {
            command: command.clone(),
            source,
        })?;

    if !status.success() {
        return Err(LaunchError::SetupFailure { command, status });
    }
    info!("`{}` completed", command);
    Ok(())
}
