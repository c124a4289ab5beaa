//! Step summary records and the [`Log`] trait.

/// One line of the end-of-run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEntry {
    /// Step name.
    pub name: String,
    /// Final status.
    pub status: StepStatus,
    /// Skip reason, failure reason or outcome tally.
    pub message: Option<String>,
}

/// Final status of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StepStatus {
    /// Every target was applied or skipped for a missing capability.
    Ok,
    /// Turned off by configuration.
    Disabled,
    /// Not run at all (missing tool, invalid input, nothing to do).
    Skipped,
    /// Previewed only.
    DryRun,
    /// At least one target failed.
    Failed,
}

impl StepStatus {
    /// Every status, in summary order.
    pub const ALL: [Self; 5] = [
        Self::Ok,
        Self::Disabled,
        Self::Skipped,
        Self::DryRun,
        Self::Failed,
    ];

    /// Short label used in the summary and as the `status` log field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Disabled => "off",
            Self::Skipped => "skipped",
            Self::DryRun => "dry-run",
            Self::Failed => "failed",
        }
    }

    /// Single-character marker shown before the step name.
    #[must_use]
    pub const fn marker(self) -> char {
        match self {
            Self::Ok => '✓',
            Self::Disabled => '·',
            Self::Skipped => '○',
            Self::DryRun => '~',
            Self::Failed => '✗',
        }
    }

    /// Parse a [`label`](Self::label) back into a status.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

/// Logging backend used by the engine.
///
/// Steps log through this trait so tests can use a logger that is not tied
/// to the global subscriber.
pub trait Log: Send + Sync {
    /// Section header.
    fn stage(&self, msg: &str);
    /// Progress message.
    fn info(&self, msg: &str);
    /// Detail, shown on the console only with `--verbose`.
    fn debug(&self, msg: &str);
    /// Non-fatal problem with context (schema, key, path).
    fn warn(&self, msg: &str);
    /// Fatal problem.
    fn error(&self, msg: &str);
    /// A change that would have been made outside dry-run mode.
    fn dry_run(&self, msg: &str);
    /// Record a step's final status for the summary.
    fn record_step(&self, name: &str, status: StepStatus, message: Option<&str>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip() {
        for status in StepStatus::ALL {
            assert_eq!(StepStatus::from_label(status.label()), Some(status));
        }
        assert_eq!(StepStatus::from_label("bogus"), None);
    }

    #[test]
    fn markers_are_distinct() {
        let mut markers: Vec<char> = StepStatus::ALL.iter().map(|s| s.marker()).collect();
        markers.sort_unstable();
        markers.dedup();
        assert_eq!(markers.len(), StepStatus::ALL.len());
    }
}
