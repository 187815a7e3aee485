//! Setup verification.
//!
//! Inspects the project directory without modifying it: the sync tool, the
//! environment directory, the interpreter, the entry point, and whether the
//! application's Python modules import. Later checks depend on earlier ones
//! and are skipped when a prerequisite fails.

use crate::config::LaunchConfig;
use anyhow::{Context, Result, bail, ensure};
use std::fmt;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Modules the story generator needs importable from its environment.
pub const DEFAULT_MODULES: &[&str] = &["torch", "transformers", "rich"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Passed,
    Failed(String),
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub label: String,
    pub outcome: CheckOutcome,
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            CheckOutcome::Passed => write!(f, "✓ {}", self.label),
            CheckOutcome::Failed(detail) => write!(f, "✗ {}: {}", self.label, detail),
            CheckOutcome::Skipped => write!(f, "○ {} (skipped)", self.label),
        }
    }
}

#[derive(Debug, Default)]
pub struct DoctorReport {
    pub results: Vec<CheckResult>,
}

impl DoctorReport {
    pub fn all_passed(&self) -> bool {
        self.results
            .iter()
            .all(|r| r.outcome == CheckOutcome::Passed)
    }

    fn record(&mut self, label: String, result: Result<()>) -> bool {
        let outcome = match result {
            Ok(()) => CheckOutcome::Passed,
            Err(e) => CheckOutcome::Failed(format!("{:#}", e)),
        };
        debug!("Check '{}': {:?}", label, outcome);
        let passed = outcome == CheckOutcome::Passed;
        self.results.push(CheckResult { label, outcome });
        passed
    }

    fn skip(&mut self, label: String) {
        self.results.push(CheckResult {
            label,
            outcome: CheckOutcome::Skipped,
        });
    }
}

/// Runs every check against `base`.
pub fn run_checks(base: &Path, config: &LaunchConfig, modules: &[String]) -> DoctorReport {
    let mut report = DoctorReport::default();

    let sync_label = format!("{} available", config.sync_program.to_string_lossy());
    report.record(sync_label, check_sync_tool(config));

    let env_label = format!("environment {}", config.env_dir.display());
    let interpreter_label = "interpreter".to_string();
    let entry_label = format!("entry point {}", config.entry_point.display());
    let imports_label = format!("imports: {}", modules.join(", "));

    let env_ok = report.record(env_label, check_environment(base, config));
    let interpreter_ok = if env_ok {
        report.record(interpreter_label, check_interpreter(base, config))
    } else {
        report.skip(interpreter_label);
        false
    };

    report.record(entry_label, check_entry_point(base, config));

    if !interpreter_ok {
        report.skip(imports_label);
    } else if !modules.is_empty() {
        report.record(imports_label, check_imports(base, config, modules));
    }
    report
}

fn check_sync_tool(config: &LaunchConfig) -> Result<()> {
    let output = Command::new(&config.sync_program)
        .arg("--version")
        .output()
        .with_context(|| format!("cannot run {}", config.sync_program.to_string_lossy()))?;
    ensure!(
        output.status.success(),
        "`{} --version` failed with {}",
        config.sync_program.to_string_lossy(),
        output.status
    );
    Ok(())
}

fn check_environment(base: &Path, config: &LaunchConfig) -> Result<()> {
    let env = config.env_path(base);
    if !env.is_dir() {
        bail!("{} not found", env.display());
    }
    Ok(())
}

fn check_interpreter(base: &Path, config: &LaunchConfig) -> Result<()> {
    let interpreter = config.interpreter_path(base);
    if !interpreter.is_file() {
        bail!("{} not found", interpreter.display());
    }
    Ok(())
}

fn check_entry_point(base: &Path, config: &LaunchConfig) -> Result<()> {
    let entry = base.join(&config.entry_point);
    if !entry.is_file() {
        bail!("{} not found", entry.display());
    }
    Ok(())
}

fn check_imports(base: &Path, config: &LaunchConfig, modules: &[String]) -> Result<()> {
    let interpreter = config.interpreter_path(base);
    let script = format!("import {}", modules.join(", "));
    let output = Command::new(&interpreter)
        .arg("-c")
        .arg(&script)
        .current_dir(base)
        .output()
        .with_context(|| format!("cannot run {}", interpreter.display()))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let last_line = stderr.lines().last().unwrap_or("").trim();
        bail!("{}", if last_line.is_empty() { "import failed" } else { last_line });
    }
    Ok(())
}
