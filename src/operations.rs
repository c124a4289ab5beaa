//! Filesystem operation abstractions for dependency injection.
//!
//! Provides the [`FileSystemOps`] trait so that probes and tasks can be
//! unit-tested without touching the real filesystem.  Production code uses
//! [`SystemFileSystemOps`]; tests use `MockFileSystemOps`.

use std::path::Path;

/// Abstraction over the filesystem queries and writes used by the engine.
pub trait FileSystemOps: Send + Sync + std::fmt::Debug {
    /// Returns `true` if `path` exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is a regular file.
    fn is_file(&self, path: &Path) -> bool;

    /// Read a file into a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    /// Write `contents` to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()>;

    /// Copy the file at `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or the target written.
    fn copy(&self, from: &Path, to: &Path) -> std::io::Result<()>;

    /// Create `path` and all missing parents.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;
}

/// Production [`FileSystemOps`] implementation that delegates to [`std::fs`].
#[derive(Debug, Default)]
pub struct SystemFileSystemOps;

impl FileSystemOps for SystemFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        std::fs::write(path, contents)
    }

    fn copy(&self, from: &Path, to: &Path) -> std::io::Result<()> {
        std::fs::copy(from, to).map(|_| ())
    }

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

/// In-memory [`FileSystemOps`] for unit tests.
///
/// Directories and files are tracked in a single map; writes and copies
/// mutate it so tests can assert on the resulting tree.
///
/// ```ignore
/// let fs = MockFileSystemOps::new()
///     .with_dir("/usr/share/themes/Yaru-dark")
///     .with_file("/home/test/wall.png", "");
/// ```
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockFileSystemOps {
    entries: std::sync::Mutex<std::collections::BTreeMap<std::path::PathBuf, MockEntry>>,
    fail_writes: bool,
}

#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
enum MockEntry {
    Dir,
    File(String),
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl MockFileSystemOps {
    /// Create an empty mock with nothing configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` (and its ancestors) as directories.
    #[must_use]
    pub fn with_dir(self, path: impl Into<std::path::PathBuf>) -> Self {
        self.insert_dir_all(&path.into());
        self
    }

    /// Register `path` as a regular file with `contents`.
    #[must_use]
    pub fn with_file(self, path: impl Into<std::path::PathBuf>, contents: &str) -> Self {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.insert_dir_all(parent);
        }
        self.lock().insert(path, MockEntry::File(contents.to_string()));
        self
    }

    /// Make every `write` and `copy` fail with `PermissionDenied`.
    #[must_use]
    pub const fn with_failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Return the contents of the file at `path`, if any.
    #[must_use]
    pub fn file_contents(&self, path: &Path) -> Option<String> {
        match self.lock().get(path) {
            Some(MockEntry::File(contents)) => Some(contents.clone()),
            _ => None,
        }
    }

    fn lock(
        &self,
    ) -> std::sync::MutexGuard<'_, std::collections::BTreeMap<std::path::PathBuf, MockEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn insert_dir_all(&self, path: &Path) {
        let mut entries = self.lock();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            entries
                .entry(ancestor.to_path_buf())
                .or_insert(MockEntry::Dir);
        }
    }

    fn denied() -> std::io::Error {
        std::io::Error::from(std::io::ErrorKind::PermissionDenied)
    }
}

#[cfg(test)]
impl FileSystemOps for MockFileSystemOps {
    fn exists(&self, path: &Path) -> bool {
        self.lock().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.lock().get(path) == Some(&MockEntry::Dir)
    }

    fn is_file(&self, path: &Path) -> bool {
        matches!(self.lock().get(path), Some(MockEntry::File(_)))
    }

    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        self.file_contents(path)
            .ok_or_else(|| std::io::Error::from(std::io::ErrorKind::NotFound))
    }

    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        if self.fail_writes {
            return Err(Self::denied());
        }
        let parent_ok = path.parent().is_none_or(|p| self.is_dir(p));
        if !parent_ok {
            return Err(std::io::Error::from(std::io::ErrorKind::NotFound));
        }
        self.lock()
            .insert(path.to_path_buf(), MockEntry::File(contents.to_string()));
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> std::io::Result<()> {
        let contents = self.read_to_string(from)?;
        self.write(to, &contents)
    }

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        if self.fail_writes {
            return Err(Self::denied());
        }
        self.insert_dir_all(path);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn system_ops_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("file.txt");
        let ops = SystemFileSystemOps;
        ops.create_dir_all(path.parent().unwrap()).unwrap();
        ops.write(&path, "hello").unwrap();
        assert!(ops.is_file(&path));
        assert!(ops.is_dir(dir.path()));
        assert_eq!(ops.read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn system_ops_copy() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("a");
        let to = dir.path().join("b");
        std::fs::write(&from, "data").unwrap();
        SystemFileSystemOps.copy(&from, &to).unwrap();
        assert_eq!(std::fs::read_to_string(to).unwrap(), "data");
    }

    #[test]
    fn mock_with_dir_registers_ancestors() {
        let fs = MockFileSystemOps::new().with_dir("/usr/share/themes/Yaru");
        assert!(fs.is_dir(Path::new("/usr/share/themes")));
        assert!(fs.is_dir(Path::new("/usr/share/themes/Yaru")));
        assert!(!fs.is_file(Path::new("/usr/share/themes/Yaru")));
    }

    #[test]
    fn mock_write_requires_parent() {
        let fs = MockFileSystemOps::new();
        let path = PathBuf::from("/missing/parent/file");
        assert!(fs.write(&path, "x").is_err());
        fs.create_dir_all(path.parent().unwrap()).unwrap();
        fs.write(&path, "x").unwrap();
        assert_eq!(fs.file_contents(&path).as_deref(), Some("x"));
    }

    #[test]
    fn mock_failing_writes() {
        let fs = MockFileSystemOps::new().with_dir("/tmp").with_failing_writes();
        assert!(fs.write(Path::new("/tmp/x"), "x").is_err());
        assert!(fs.create_dir_all(Path::new("/tmp/y")).is_err());
    }
}
