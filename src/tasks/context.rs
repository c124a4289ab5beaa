//! Shared state handed to every step.
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::exec::Executor;
use crate::logging::Log;
use crate::operations::{FileSystemOps, SystemFileSystemOps};
use crate::probe::{Capabilities, SystemProber};
use crate::resources::extension::ExtensionToggler;
use crate::resources::preference::PreferenceApplier;

/// Shared context for step execution.
pub struct Context {
    /// Immutable run configuration.
    pub config: Arc<Config>,
    /// Logger for output and step recording.
    pub log: Arc<dyn Log>,
    /// Whether to preview changes without applying them.
    pub dry_run: bool,
    /// User's home directory path.
    pub home: PathBuf,
    /// Command executor (for testing or real system calls).
    pub executor: Arc<dyn Executor>,
    /// Read-only capability queries.
    pub probe: Arc<dyn Capabilities>,
    /// Filesystem operation abstraction (injectable for testing).
    pub fs_ops: Arc<dyn FileSystemOps>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("config", &"<Config>")
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .field("home", &self.home)
            .field("executor", &"<dyn Executor>")
            .field("probe", &"<dyn Capabilities>")
            .field("fs_ops", &"<dyn FileSystemOps>")
            .finish()
    }
}

impl Context {
    /// Creates a context backed by the real filesystem and a
    /// [`SystemProber`] over `executor`.
    ///
    /// # Errors
    ///
    /// Returns an error if the `HOME` environment variable is not set.
    pub fn new(
        config: Arc<Config>,
        log: Arc<dyn Log>,
        dry_run: bool,
        executor: Arc<dyn Executor>,
    ) -> Result<Self> {
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .ok_or_else(|| anyhow::anyhow!("HOME environment variable is not set"))?;
        let fs_ops: Arc<dyn FileSystemOps> = Arc::new(SystemFileSystemOps);
        let probe: Arc<dyn Capabilities> = Arc::new(SystemProber::new(
            Arc::clone(&executor),
            Arc::clone(&fs_ops),
            home.clone(),
        ));
        Ok(Self {
            config,
            log,
            dry_run,
            home,
            executor,
            probe,
            fs_ops,
        })
    }

    /// A preference applier bound to this context.
    #[must_use]
    pub fn preferences(&self) -> PreferenceApplier<'_> {
        PreferenceApplier::new(
            self.probe.as_ref(),
            self.executor.as_ref(),
            self.log.as_ref(),
            self.dry_run,
        )
    }

    /// An extension toggler bound to this context.
    #[must_use]
    pub fn extensions(&self) -> ExtensionToggler<'_> {
        ExtensionToggler::new(
            self.probe.as_ref(),
            self.executor.as_ref(),
            self.log.as_ref(),
            self.dry_run,
        )
    }

    /// Whether `name` is on `PATH`; a probe error counts as absent.
    #[must_use]
    pub fn has_command(&self, name: &str) -> bool {
        self.probe.has_command(name).unwrap_or(false)
    }
}
