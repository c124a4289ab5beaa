//! Shallow clone of an extension repository into its install path.
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::exec::Executor;
use crate::operations::FileSystemOps;

/// A git checkout that exists once and is never updated afterwards.
#[derive(Debug)]
pub struct SourceCheckout<'a> {
    url: &'a str,
    dest: PathBuf,
    executor: &'a dyn Executor,
    fs_ops: &'a dyn FileSystemOps,
}

impl<'a> SourceCheckout<'a> {
    /// Create a checkout of `url` at `dest`.
    #[must_use]
    pub const fn new(
        url: &'a str,
        dest: PathBuf,
        executor: &'a dyn Executor,
        fs_ops: &'a dyn FileSystemOps,
    ) -> Self {
        Self {
            url,
            dest,
            executor,
            fs_ops,
        }
    }

    /// Destination directory.
    #[must_use]
    pub fn dest(&self) -> &Path {
        &self.dest
    }

    /// Whether anything already occupies the destination.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.fs_ops.exists(&self.dest)
    }

    /// Run `git clone --depth 1`, creating the parent directory first.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent cannot be created or the clone fails.
    pub fn fetch(&self) -> Result<()> {
        if let Some(parent) = self.dest.parent() {
            self.fs_ops.create_dir_all(parent)?;
        }
        let dest = self.dest.to_string_lossy();
        self.executor
            .run("git", &["clone", "--depth", "1", self.url, &dest])?;
        Ok(())
    }
}

/// Resolve a leading `~/` against `home`.
#[must_use]
pub fn expand_home(path: &str, home: &Path) -> PathBuf {
    path.strip_prefix("~/")
        .map_or_else(|| PathBuf::from(path), |rest| home.join(rest))
}
