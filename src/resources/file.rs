//! Generated files written with a one-deep backup of differing content.
use std::path::{Path, PathBuf};

use super::error::ResourceError;
use crate::operations::FileSystemOps;

/// State of a generated file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    /// Nothing at the path.
    Missing,
    /// The file already holds the desired contents.
    Current,
    /// The file exists with other contents.
    Differs,
}

/// A file whose full contents are owned by this tool.
#[derive(Debug)]
pub struct GeneratedFile<'a> {
    path: PathBuf,
    contents: &'a str,
    fs_ops: &'a dyn FileSystemOps,
}

impl<'a> GeneratedFile<'a> {
    /// Describe a file at `path` that should contain `contents`.
    #[must_use]
    pub const fn new(path: PathBuf, contents: &'a str, fs_ops: &'a dyn FileSystemOps) -> Self {
        Self {
            path,
            contents,
            fs_ops,
        }
    }

    /// Target path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Compare the file on disk with the desired contents.
    #[must_use]
    pub fn state(&self) -> FileState {
        if !self.fs_ops.is_file(&self.path) {
            return FileState::Missing;
        }
        match self.fs_ops.read_to_string(&self.path) {
            Ok(existing) if existing == self.contents => FileState::Current,
            _ => FileState::Differs,
        }
    }

    /// Path the previous contents are copied to before an overwrite.
    #[must_use]
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }

    /// Write the desired contents, backing up differing content first.
    ///
    /// Returns the backup path when one was made.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Write`] if the parent directory, the backup
    /// or the file itself cannot be written.
    pub fn write(&self) -> Result<Option<PathBuf>, ResourceError> {
        let state = self.state();
        if state == FileState::Current {
            return Ok(None);
        }
        if let Some(parent) = self.path.parent() {
            self.fs_ops
                .create_dir_all(parent)
                .map_err(|source| write_error(parent, source))?;
        }
        let backup = if state == FileState::Differs {
            let backup = self.backup_path();
            self.fs_ops
                .copy(&self.path, &backup)
                .map_err(|source| write_error(&backup, source))?;
            Some(backup)
        } else {
            None
        };
        self.fs_ops
            .write(&self.path, self.contents)
            .map_err(|source| write_error(&self.path, source))?;
        Ok(backup)
    }
}

fn write_error(path: &Path, source: std::io::Error) -> ResourceError {
    ResourceError::Write {
        path: path.display().to_string(),
        source,
    }
}
