//! Read-only capability queries against the preference store, the
//! extension manager, the filesystem and `PATH`.
//!
//! Absence is an ordinary `Ok(false)`.  A [`ProbeError`] means the query
//! mechanism itself could not run (for example `gsettings` is not
//! installed), which callers must not confuse with "key not found".
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::ProbeError;
use crate::exec::Executor;
use crate::operations::FileSystemOps;

/// Filesystem search category for directory-backed resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchCategory {
    /// GTK and shell themes.
    Theme,
    /// Icon and cursor sets.
    Icon,
}

/// Narrow query interface consulted before any external mutation.
#[cfg_attr(test, mockall::automock)]
pub trait Capabilities: Send + Sync + std::fmt::Debug {
    /// Whether the preference store knows `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] only if the preference store cannot be queried.
    fn has_schema(&self, schema: &str) -> Result<bool, ProbeError>;

    /// Whether `key` exists within `schema`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] only if the preference store cannot be queried.
    fn has_key(&self, schema: &str, key: &str) -> Result<bool, ProbeError>;

    /// Whether a resource directory `name` exists under any search root.
    ///
    /// # Errors
    ///
    /// The filesystem implementation never fails; the signature keeps the
    /// contract uniform.
    fn has_directory(&self, category: SearchCategory, name: &str) -> Result<bool, ProbeError>;

    /// Whether the extension `id` is installed.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] only if the extension manager cannot be queried.
    fn has_extension(&self, id: &str) -> Result<bool, ProbeError>;

    /// Whether `name` resolves to an executable on `PATH`.
    ///
    /// # Errors
    ///
    /// Never fails for the system implementation.
    fn has_command(&self, name: &str) -> Result<bool, ProbeError>;
}

/// Production prober that shells out through an [`Executor`].
#[derive(Debug)]
pub struct SystemProber {
    executor: Arc<dyn Executor>,
    fs_ops: Arc<dyn FileSystemOps>,
    home: PathBuf,
}

impl SystemProber {
    /// Create a prober rooted at `home` for user-level search paths.
    #[must_use]
    pub fn new(executor: Arc<dyn Executor>, fs_ops: Arc<dyn FileSystemOps>, home: PathBuf) -> Self {
        Self {
            executor,
            fs_ops,
            home,
        }
    }

    /// Directories searched for `category`, user locations first.
    #[must_use]
    pub fn search_roots(&self, category: SearchCategory) -> Vec<PathBuf> {
        match category {
            SearchCategory::Theme => vec![
                self.home.join(".themes"),
                self.home.join(".local/share/themes"),
                PathBuf::from("/usr/share/themes"),
            ],
            SearchCategory::Icon => vec![
                self.home.join(".icons"),
                self.home.join(".local/share/icons"),
                PathBuf::from("/usr/share/icons"),
            ],
        }
    }

    /// Run a query command and return its stdout lines, or `None` on a
    /// non-zero exit.
    fn query_lines(&self, program: &str, args: &[&str]) -> Result<Option<String>, ProbeError> {
        let result =
            self.executor
                .run_unchecked(program, args)
                .map_err(|e| ProbeError::Unavailable {
                    tool: program.to_string(),
                    reason: format!("{e:#}"),
                })?;
        Ok(result.success.then_some(result.stdout))
    }
}

fn contains_line(output: Option<String>, needle: &str) -> bool {
    output.is_some_and(|out| out.lines().any(|line| line.trim() == needle))
}

impl Capabilities for SystemProber {
    fn has_schema(&self, schema: &str) -> Result<bool, ProbeError> {
        let out = self.query_lines("gsettings", &["list-schemas"])?;
        Ok(contains_line(out, schema))
    }

    fn has_key(&self, schema: &str, key: &str) -> Result<bool, ProbeError> {
        // list-keys exits non-zero for an unknown schema; that is absence.
        let out = self.query_lines("gsettings", &["list-keys", schema])?;
        Ok(contains_line(out, key))
    }

    fn has_directory(&self, category: SearchCategory, name: &str) -> Result<bool, ProbeError> {
        if name.is_empty() || Path::new(name).components().count() != 1 {
            return Ok(false);
        }
        Ok(self
            .search_roots(category)
            .iter()
            .any(|root| self.fs_ops.is_dir(&root.join(name))))
    }

    fn has_extension(&self, id: &str) -> Result<bool, ProbeError> {
        let out = self.query_lines("gnome-extensions", &["list"])?;
        Ok(contains_line(out, id))
    }

    fn has_command(&self, name: &str) -> Result<bool, ProbeError> {
        Ok(self.executor.which(name))
    }
}
