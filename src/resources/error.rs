//! Typed error variants for resource operations.
//!
//! This module provides [`ResourceError`], a structured error type for
//! checked external invocations and file writes.  Callers convert to
//! [`anyhow::Error`] via `?`; the engine later classifies any such error as
//! [`ApplicationResult::FailedExternalTool`](super::ApplicationResult).

use thiserror::Error;

/// Errors that arise from resource apply operations.
#[derive(Error, Debug)]
pub enum ResourceError {
    /// A command invoked by a resource failed with a non-zero exit code.
    #[error("command '{program}' failed (exit {exit_code}): {stderr}")]
    ExecutionFailed {
        /// Name of the program that was invoked.
        program: String,
        /// Exit code returned by the process.
        exit_code: i32,
        /// Captured standard error output.
        stderr: String,
    },

    /// A generated file could not be written or backed up.
    #[error("cannot write {path}: {source}")]
    Write {
        /// Path that could not be written.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
