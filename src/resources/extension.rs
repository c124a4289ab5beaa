//! Shell extension enable/disable toggles.
use std::collections::BTreeMap;

use crate::config::extensions::ExtensionToggleSet;
use crate::exec::Executor;
use crate::logging::Log;
use crate::probe::Capabilities;

use super::ApplicationResult;

/// Enable or disable a single extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// `gnome-extensions enable`.
    Enable,
    /// `gnome-extensions disable`.
    Disable,
}

impl Toggle {
    const fn verb(self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Disable => "disable",
        }
    }
}

/// Applies an [`ExtensionToggleSet`] through `gnome-extensions`.
pub struct ExtensionToggler<'a> {
    probe: &'a dyn Capabilities,
    executor: &'a dyn Executor,
    log: &'a dyn Log,
    dry_run: bool,
}

impl std::fmt::Debug for ExtensionToggler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionToggler")
            .field("dry_run", &self.dry_run)
            .finish_non_exhaustive()
    }
}

impl<'a> ExtensionToggler<'a> {
    /// Create a toggler.
    #[must_use]
    pub fn new(
        probe: &'a dyn Capabilities,
        executor: &'a dyn Executor,
        log: &'a dyn Log,
        dry_run: bool,
    ) -> Self {
        Self {
            probe,
            executor,
            log,
            dry_run,
        }
    }

    /// Toggle every id in `set` and report the outcome per id.
    ///
    /// Ids that are not installed are skipped.  The two lists are disjoint,
    /// so processing order cannot affect the final state.
    pub fn toggle(&self, set: &ExtensionToggleSet) -> BTreeMap<String, ApplicationResult> {
        let mut results = BTreeMap::new();

        let manager_present = self.probe.has_command("gnome-extensions").unwrap_or(false);
        if !manager_present {
            self.log
                .warn("gnome-extensions not found; leaving extensions untouched");
        }

        let work = set
            .to_enable()
            .iter()
            .map(|id| (id, Toggle::Enable))
            .chain(set.to_disable().iter().map(|id| (id, Toggle::Disable)));
        for (id, toggle) in work {
            let result = if manager_present {
                self.toggle_one(id, toggle)
            } else {
                ApplicationResult::skipped("gnome-extensions not installed")
            };
            results.insert(id.clone(), result);
        }
        results
    }

    fn toggle_one(&self, id: &str, toggle: Toggle) -> ApplicationResult {
        match self.probe.has_extension(id) {
            Ok(true) => {}
            Ok(false) => {
                self.log
                    .info(&format!("skipping {} {id}: not installed", toggle.verb()));
                return ApplicationResult::skipped(format!("extension {id} not installed"));
            }
            Err(e) => {
                self.log.warn(&format!("cannot check extension {id}: {e}"));
                return ApplicationResult::failed(e.to_string());
            }
        }

        if self.dry_run {
            self.log
                .dry_run(&format!("would {} extension {id}", toggle.verb()));
            return ApplicationResult::Applied;
        }

        match self.executor.run("gnome-extensions", &[toggle.verb(), id]) {
            Ok(_) => {
                self.log.debug(&format!("{}d {id}", toggle.verb()));
                ApplicationResult::Applied
            }
            Err(e) => {
                self.log
                    .warn(&format!("failed to {} {id}: {e:#}", toggle.verb()));
                ApplicationResult::failed(format!("{e:#}"))
            }
        }
    }
}
