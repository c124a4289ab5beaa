//! Domain-specific error types for the macify engine.
//!
//! Internal modules return typed errors (e.g. [`ConfigError`], [`ProbeError`])
//! while command handlers at the CLI boundary convert them to
//! [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! MacifyError
//! ├── Config(ConfigError)        : profile parsing, invariant violations
//! └── Precondition(String)       : required tool absent; aborts before mutation
//! ```
//!
//! A [`ProbeError`] never reaches the top level: primitives classify it as a
//! failed outcome and the `probe` command reports the query as unknown.
//!
//! Missing capabilities and failed external tools are *not* errors: they are
//! classified as [`ApplicationResult`](crate::resources::ApplicationResult)
//! variants and absorbed at the step boundary.

use thiserror::Error;

/// Top-level error type for the macify engine.
#[derive(Error, Debug)]
pub enum MacifyError {
    /// Configuration-related error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A required external tool is entirely absent.
    #[error("Required tool '{0}' not found; nothing was changed")]
    Precondition(String),
}

/// Errors that arise from building the immutable configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading a profile file.
    #[error("IO error reading profile {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The profile is not valid TOML or does not match the expected shape.
    #[error("Invalid profile {file}: {message}")]
    InvalidSyntax {
        /// File (or `<embedded>`) that failed to parse.
        file: String,
        /// Parser message.
        message: String,
    },

    /// An extension id appears in both the enable and the disable list.
    #[error("Extension '{0}' is listed in both enable and disable")]
    OverlappingExtension(String),

    /// A resource candidate list has no entries, so no fallback exists.
    #[error("Candidate list for {0} is empty; the last entry must be a fallback")]
    EmptyCandidates(String),
}

/// Errors that arise when the capability query mechanism itself is unusable.
///
/// "Not found" is never a [`ProbeError`]; it is an ordinary `Ok(false)`.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The tool used to answer the query could not be executed.
    #[error("cannot query {tool}: {reason}")]
    Unavailable {
        /// Program that could not be run (e.g. `"gsettings"`).
        tool: String,
        /// Human-readable reason.
        reason: String,
    },
}
