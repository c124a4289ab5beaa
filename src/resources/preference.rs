//! Preference store writes gated on schema and key availability.
use crate::config::profile::PreferenceAssignment;
use crate::error::ProbeError;
use crate::exec::Executor;
use crate::logging::Log;
use crate::probe::Capabilities;

use super::ApplicationResult;

/// Applies [`PreferenceAssignment`]s through `gsettings set`.
///
/// Failures never escape: a missing schema or key becomes
/// [`ApplicationResult::SkippedCapabilityMissing`] and a failing tool becomes
/// [`ApplicationResult::FailedExternalTool`] after a one-line warning.
#[derive(Clone, Copy)]
pub struct PreferenceApplier<'a> {
    probe: &'a dyn Capabilities,
    executor: &'a dyn Executor,
    log: &'a dyn Log,
    dry_run: bool,
}

impl std::fmt::Debug for PreferenceApplier<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceApplier")
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

impl<'a> PreferenceApplier<'a> {
    /// Create an applier.
    #[must_use]
    pub fn new(
        probe: &'a dyn Capabilities,
        executor: &'a dyn Executor,
        log: &'a dyn Log,
        dry_run: bool,
    ) -> Self {
        Self {
            probe,
            executor,
            log,
            dry_run,
        }
    }

    /// Apply `assignment`, honouring its `always` marker.
    pub fn apply_assignment(&self, assignment: &PreferenceAssignment) -> ApplicationResult {
        if assignment.always {
            self.apply_unconditional(assignment)
        } else {
            self.apply(assignment)
        }
    }

    /// Apply `assignment` only if its schema and key exist.
    pub fn apply(&self, assignment: &PreferenceAssignment) -> ApplicationResult {
        match self.missing_capability(assignment) {
            Ok(None) => self.apply_unconditional(assignment),
            Ok(Some(reason)) => {
                self.log
                    .info(&format!("skipping {}: {reason}", assignment.target()));
                ApplicationResult::skipped(reason)
            }
            Err(e) => {
                self.log
                    .warn(&format!("cannot check {}: {e}", assignment.target()));
                ApplicationResult::failed(e.to_string())
            }
        }
    }

    /// Apply `assignment` without probing; tool failure is still absorbed.
    pub fn apply_unconditional(&self, assignment: &PreferenceAssignment) -> ApplicationResult {
        let value = assignment.value.to_string();
        if self.dry_run {
            self.log
                .dry_run(&format!("would set {} = {value}", assignment.target()));
            return ApplicationResult::Applied;
        }
        match self.executor.run(
            "gsettings",
            &["set", &assignment.schema, &assignment.key, &value],
        ) {
            Ok(_) => {
                self.log
                    .debug(&format!("set {} = {value}", assignment.target()));
                ApplicationResult::Applied
            }
            Err(e) => {
                self.log
                    .warn(&format!("failed to set {}: {e:#}", assignment.target()));
                ApplicationResult::failed(format!("{e:#}"))
            }
        }
    }

    fn missing_capability(
        &self,
        assignment: &PreferenceAssignment,
    ) -> Result<Option<String>, ProbeError> {
        if !self.probe.has_schema(&assignment.schema)? {
            return Ok(Some(format!("schema {} not installed", assignment.schema)));
        }
        if !self.probe.has_key(&assignment.schema, &assignment.key)? {
            return Ok(Some(format!(
                "key {} not in schema {}",
                assignment.key, assignment.schema
            )));
        }
        Ok(None)
    }
}
