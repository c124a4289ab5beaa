//! Idempotent desktop primitives (probe, then apply).
//!
//! Every primitive consults [`Capabilities`](crate::probe::Capabilities)
//! before touching external state and reports an [`ApplicationResult`]
//! instead of an error: a missing schema or extension and a failing tool are
//! both ordinary outcomes that the calling step logs and moves past.
pub mod error;
pub mod extension;
pub mod file;
pub mod package;
pub mod preference;
pub mod selector;
pub mod source;

#[cfg(test)]
pub mod fake;

use std::fmt;

/// Outcome of one applied target.
///
/// # Examples
///
/// ```
/// use macify_cli::resources::ApplicationResult;
///
/// let skipped = ApplicationResult::skipped("schema org.example missing");
/// assert!(!skipped.is_failure());
/// assert!(ApplicationResult::failed("exit 1").is_failure());
/// assert_eq!(ApplicationResult::Applied.to_string(), "applied");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationResult {
    /// The external state now matches the desired state.
    Applied,
    /// A schema, key, extension, file or command was absent; nothing changed.
    SkippedCapabilityMissing {
        /// What was missing.
        reason: String,
    },
    /// The external tool ran and failed, or could not be queried.
    FailedExternalTool {
        /// Failure detail.
        reason: String,
    },
}

impl ApplicationResult {
    /// Shorthand for [`ApplicationResult::SkippedCapabilityMissing`].
    #[must_use]
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::SkippedCapabilityMissing {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`ApplicationResult::FailedExternalTool`].
    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::FailedExternalTool {
            reason: reason.into(),
        }
    }

    /// Whether this outcome represents an external tool failure.
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::FailedExternalTool { .. })
    }

    /// Whether this outcome was skipped for a missing capability.
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        matches!(self, Self::SkippedCapabilityMissing { .. })
    }
}

impl fmt::Display for ApplicationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied => f.write_str("applied"),
            Self::SkippedCapabilityMissing { reason } => write!(f, "skipped: {reason}"),
            Self::FailedExternalTool { reason } => write!(f, "failed: {reason}"),
        }
    }
}

/// A classified result for a named target (a preference, an extension id,
/// a file, a package set).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// What was applied, e.g. `org.gnome.mutter center-new-windows`.
    pub target: String,
    /// How it went.
    pub result: ApplicationResult,
}

impl Outcome {
    /// Pair a target with its result.
    #[must_use]
    pub fn new(target: impl Into<String>, result: ApplicationResult) -> Self {
        Self {
            target: target.into(),
            result,
        }
    }
}

/// Shared test helpers for resource unit tests.
///
/// Provides a configurable [`MockExecutor`] so individual resource test
/// modules do not have to duplicate the boilerplate.
#[cfg(test)]
pub mod test_helpers {
    use crate::exec::{ExecResult, Executor};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// A configurable mock executor for resource unit tests.
    ///
    /// Maintains a queue of `(success, stdout)` responses consumed in FIFO
    /// order.  When the queue is empty any call returns a failed response
    /// (`success = false`, stdout = `"unexpected call"`).
    ///
    /// [`spawn_error`](Self::spawn_error) builds a mock whose every call
    /// fails to spawn, as if the program were not installed.
    #[derive(Debug)]
    pub struct MockExecutor {
        responses: Mutex<VecDeque<(bool, String)>>,
        which_result: bool,
        spawn_fails: bool,
        call_count: AtomicUsize,
        checked_calls: AtomicUsize,
        calls: Mutex<Vec<String>>,
    }

    impl MockExecutor {
        /// Create a mock with a single successful response.
        #[must_use]
        pub fn ok(stdout: &str) -> Self {
            Self::with_responses(vec![(true, stdout.to_string())])
        }

        /// Create a mock with a single failed response (empty stdout).
        #[must_use]
        pub fn fail() -> Self {
            Self::with_responses(vec![(false, String::new())])
        }

        /// Create a mock whose every call fails to spawn.
        #[must_use]
        pub fn spawn_error() -> Self {
            let mut mock = Self::with_responses(vec![]);
            mock.spawn_fails = true;
            mock
        }

        /// Create a mock from an ordered list of `(success, stdout)` pairs.
        #[must_use]
        pub fn with_responses(responses: Vec<(bool, String)>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                which_result: false,
                spawn_fails: false,
                call_count: AtomicUsize::new(0),
                checked_calls: AtomicUsize::new(0),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Set the value returned by every [`Executor::which`] call.
        #[must_use]
        pub const fn with_which(mut self, result: bool) -> Self {
            self.which_result = result;
            self
        }

        /// Total number of executor calls made so far.
        #[must_use]
        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        /// Number of [`Executor::run`] calls (the checked, mutating kind).
        #[must_use]
        pub fn checked_call_count(&self) -> usize {
            self.checked_calls.load(Ordering::SeqCst)
        }

        /// Every command line seen so far, as `program arg arg`.
        #[must_use]
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().map_or_else(|_| vec![], |g| g.clone())
        }

        fn next(&self, program: &str, args: &[&str]) -> anyhow::Result<(bool, String)> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut calls) = self.calls.lock() {
                let mut line = program.to_string();
                for arg in args {
                    line.push(' ');
                    line.push_str(arg);
                }
                calls.push(line);
            }
            if self.spawn_fails {
                anyhow::bail!("failed to execute: {program}");
            }
            Ok(self.responses.lock().map_or_else(
                |_| (false, "mutex poisoned".to_string()),
                |mut guard| {
                    guard
                        .pop_front()
                        .unwrap_or_else(|| (false, "unexpected call".to_string()))
                },
            ))
        }
    }

    impl Executor for MockExecutor {
        fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
            self.checked_calls.fetch_add(1, Ordering::SeqCst);
            let (success, stdout) = self.next(program, args)?;
            if success {
                Ok(ExecResult {
                    stdout,
                    stderr: String::new(),
                    success: true,
                    code: Some(0),
                })
            } else {
                anyhow::bail!("mock command failed")
            }
        }

        fn run_unchecked(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
            let (success, stdout) = self.next(program, args)?;
            Ok(ExecResult {
                stdout,
                stderr: String::new(),
                success,
                code: Some(i32::from(!success)),
            })
        }

        fn which(&self, _: &str) -> bool {
            self.which_result
        }
    }
}
