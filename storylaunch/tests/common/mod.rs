//! Common test utilities: a scratch project holding a copy of the launcher,
//! plus shell stubs standing in for `uv` and the environment interpreter.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::{Mutex, MutexGuard, OnceLock};
use tempfile::TempDir;

static SPAWN_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Serializes tests that write executables and then run them, so a
/// concurrent fork never holds a stub open for writing ("text file busy").
pub fn spawn_lock() -> MutexGuard<'static, ()> {
    SPAWN_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub struct Project {
    _root: TempDir,
    /// Directory holding the copied launcher; the expected base directory.
    pub app_dir: PathBuf,
    pub launcher: PathBuf,
    stub_dir: PathBuf,
    log_dir: PathBuf,
}

impl Project {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let base = root.path().canonicalize().unwrap();
        let app_dir = base.join("app");
        let stub_dir = base.join("stubs");
        let log_dir = base.join("logs");
        for dir in [&app_dir, &stub_dir, &log_dir] {
            fs::create_dir(dir).unwrap();
        }

        let launcher = app_dir.join("storylaunch");
        fs::copy(env!("CARGO_BIN_EXE_storylaunch"), &launcher).unwrap();
        fs::write(app_dir.join("main.py"), "print('once upon a time')\n").unwrap();

        let project = Self {
            _root: root,
            app_dir,
            launcher,
            stub_dir,
            log_dir,
        };
        project.write_interpreter_template(0);
        project
    }

    fn interpreter_template(&self) -> PathBuf {
        self.stub_dir.join("python-template")
    }

    /// Interpreter stub that records its arguments and working directory.
    pub fn write_interpreter_template(&self, exit_code: i32) {
        let script = format!(
            "#!/bin/sh\n\
             for arg in \"$@\"; do echo \"$arg\"; done > '{log}/python.args'\n\
             pwd -P > '{log}/python.cwd'\n\
             exit {exit_code}\n",
            log = self.log_dir.display(),
        );
        write_executable(&self.interpreter_template(), &script);
    }

    /// Installs a `uv` stub on the test PATH.
    ///
    /// The stub logs each invocation, optionally materializes `.venv` with
    /// the interpreter stub inside, and exits with `exit_code`.
    pub fn install_sync_stub(&self, exit_code: i32, creates_env: bool) {
        let create = if creates_env {
            format!(
                "mkdir -p .venv/bin && cp '{}' .venv/bin/python && chmod +x .venv/bin/python\n",
                self.interpreter_template().display()
            )
        } else {
            String::new()
        };
        let script = format!(
            "#!/bin/sh\n\
             echo \"$*\" >> '{log}/sync.log'\n\
             {create}\
             exit {exit_code}\n",
            log = self.log_dir.display(),
        );
        write_executable(&self.stub_dir.join("uv"), &script);
    }

    /// Creates `.venv` directly, as if a previous run had synced it.
    pub fn create_environment(&self) {
        let bin = self.app_dir.join(".venv").join("bin");
        fs::create_dir_all(&bin).unwrap();
        fs::copy(self.interpreter_template(), bin.join("python")).unwrap();
    }

    pub fn command_from(&self, program: &Path, cwd: &Path) -> Command {
        let path = std::env::var_os("PATH").unwrap_or_default();
        let mut dirs = vec![self.stub_dir.clone()];
        dirs.extend(std::env::split_paths(&path));

        let mut cmd = Command::new(program);
        cmd.current_dir(cwd)
            .env("PATH", std::env::join_paths(dirs).unwrap())
            .env_remove("STORYLAUNCH_LOG");
        cmd
    }

    /// Runs the launcher from `cwd` with the stubs first on PATH.
    pub fn run_from(&self, cwd: &Path) -> Output {
        self.command_from(&self.launcher, cwd).output().unwrap()
    }

    pub fn sync_invocations(&self) -> Vec<String> {
        read_lines(&self.log_dir.join("sync.log")).unwrap_or_default()
    }

    /// Arguments the interpreter stub received, or `None` if it never ran.
    pub fn interpreter_args(&self) -> Option<Vec<String>> {
        read_lines(&self.log_dir.join("python.args"))
    }

    pub fn interpreter_cwd(&self) -> Option<PathBuf> {
        read_lines(&self.log_dir.join("python.cwd"))
            .and_then(|lines| lines.into_iter().next())
            .map(PathBuf::from)
    }
}

pub fn write_executable(path: &Path, contents: &str) {
    fs::write(path, contents).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

fn read_lines(path: &Path) -> Option<Vec<String>> {
    fs::read_to_string(path)
        .ok()
        .map(|s| s.lines().map(str::to_string).collect())
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
