//! Log file location and timestamps.
use std::path::PathBuf;

use chrono::{SecondsFormat, Utc};

/// Directory holding per-command log files: `$XDG_CACHE_HOME/macify`, or
/// `~/.cache/macify` when `XDG_CACHE_HOME` is unset or empty.
fn log_dir() -> Option<PathBuf> {
    let cache = match std::env::var_os("XDG_CACHE_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(std::env::var_os("HOME")?).join(".cache"),
    };
    Some(cache.join("macify"))
}

/// Path of the log file for `command`, creating its directory.
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    let dir = log_dir()?;
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{command}.log")))
}

/// Current UTC time in RFC 3339 with second precision.
pub(super) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
