//! The engine's [`Log`] implementation.
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::subscriber::{DRY_RUN, STAGE, SUMMARY};
use super::types::{Log, StepEntry, StepStatus};
use super::utils::log_file_path;

/// Emits through `tracing` and remembers each step's status for the summary.
#[derive(Debug)]
pub struct Logger {
    steps: Mutex<Vec<StepEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Logger for `command`; the summary points at its log file.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self::with_log_file(log_file_path(command))
    }

    /// Logger reporting `log_file` (if any) in the summary.
    #[must_use]
    pub const fn with_log_file(log_file: Option<PathBuf>) -> Self {
        Self {
            steps: Mutex::new(Vec::new()),
            log_file,
        }
    }

    /// Where this run's log is written.
    #[must_use]
    pub fn log_path(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    fn steps(&self) -> MutexGuard<'_, Vec<StepEntry>> {
        self.steps.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the recorded steps, in execution order.
    #[must_use]
    pub fn step_entries(&self) -> Vec<StepEntry> {
        self.steps().clone()
    }

    /// Number of steps with at least one failed target.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.steps()
            .iter()
            .filter(|s| s.status == StepStatus::Failed)
            .count()
    }

    /// Whether any step failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Totals line, e.g. `17 steps: 5 ok, 11 off, 1 skipped`.
    #[must_use]
    pub fn totals(&self) -> String {
        let steps = self.steps();
        let parts: Vec<String> = StepStatus::ALL
            .into_iter()
            .filter_map(|status| {
                let n = steps.iter().filter(|s| s.status == status).count();
                (n > 0).then(|| format!("{n} {}", status.label()))
            })
            .collect();
        format!("{} steps: {}", steps.len(), parts.join(", "))
    }

    /// Print one line per recorded step, the totals and the log location.
    pub fn print_summary(&self) {
        let entries = self.step_entries();
        if entries.is_empty() {
            return;
        }
        self.stage("Summary");
        for entry in &entries {
            let detail = entry
                .message
                .as_deref()
                .map(|m| format!(" ({m})"))
                .unwrap_or_default();
            tracing::info!(
                target: SUMMARY,
                status = entry.status.label(),
                "{} {}{detail}",
                entry.status.marker(),
                entry.name
            );
        }
        self.info(&self.totals());
        if let Some(path) = self.log_path() {
            self.info(&format!("log: {}", path.display()));
        }
    }
}

impl Log for Logger {
    fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE, "{msg}");
    }

    fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN, "{msg}");
    }

    fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>) {
        self.steps().push(StepEntry {
            name: name.to_string(),
            status,
            message: message.map(str::to_string),
        });
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::isolated_logger;
    use std::fs;

    fn read_log(log: &Logger) -> String {
        fs::read_to_string(log.log_path().unwrap()).unwrap()
    }

    #[test]
    fn records_steps_in_order() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record_step("Install packages", StepStatus::Skipped, Some("apt-get not found"));
        log.record_step("Apply themes", StepStatus::Ok, None);
        let entries = log.step_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message.as_deref(), Some("apt-get not found"));
        assert_eq!(entries[1].name, "Apply themes");
    }

    #[test]
    fn counts_failed_steps() {
        let (log, _tmp, _guard) = isolated_logger();
        assert!(!log.has_failures());
        log.record_step("a", StepStatus::Ok, None);
        log.record_step("b", StepStatus::Failed, Some("1 failed"));
        log.record_step("c", StepStatus::Failed, Some("2 failed"));
        assert_eq!(log.failure_count(), 2);
        assert!(log.has_failures());
    }

    #[test]
    fn totals_omit_empty_classes() {
        let log = Logger::with_log_file(None);
        log.record_step("a", StepStatus::Ok, None);
        log.record_step("b", StepStatus::Disabled, None);
        log.record_step("c", StepStatus::Disabled, None);
        assert_eq!(log.totals(), "3 steps: 1 ok, 2 off");
    }

    #[test]
    fn levels_are_marked_in_file() {
        let (log, _tmp, _guard) = isolated_logger();
        log.warn("org.example key: schema missing");
        log.debug("debug-marker");
        log.stage("Apply core defaults");
        log.dry_run("would set org.gnome.mutter center-new-windows = true");
        let contents = read_log(&log);
        assert!(contents.contains("warning: org.example key: schema missing"));
        assert!(contents.contains("debug: debug-marker"));
        assert!(contents.contains("== Apply core defaults"));
        assert!(contents.contains("dry-run: would set"));
    }

    #[test]
    fn summary_lines_carry_status_without_ansi() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record_step("Apply themes", StepStatus::Ok, Some("4 applied"));
        log.record_step("Tune dock", StepStatus::Disabled, None);
        log.print_summary();
        let contents = read_log(&log);
        assert!(contents.contains("[ok] ✓ Apply themes (4 applied)"), "{contents}");
        assert!(contents.contains("[off] · Tune dock"));
        assert!(contents.contains("2 steps: 1 ok, 1 off"));
        assert!(!contents.contains('\x1b'));
    }

    #[test]
    fn empty_summary_prints_nothing() {
        let (log, _tmp, _guard) = isolated_logger();
        log.print_summary();
        assert!(!read_log(&log).contains("Summary"));
    }
}
