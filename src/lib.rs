//! Idempotent macOS-style settings engine for Ubuntu GNOME.
//!
//! Applies a desired-state profile (`conf/macify.toml`) to the running
//! desktop through `gsettings`, `gnome-extensions` and a few helper tools.
//! Every change is probed first: a missing schema, key, extension or theme
//! is skipped and reported, never fatal.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: parse the TOML profile and merge command-line options
//! - **[`probe`]**: read-only capability queries
//! - **[`resources`]**: probe-then-apply primitives (preferences, extensions, files)
//! - **[`tasks`]**: the ordered steps wired to resources
//! - **[`commands`]**: subcommand orchestration (`apply`, `probe`, `version`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod operations;
pub mod probe;
pub mod resources;
pub mod tasks;
