//! Preference group steps: core defaults and the optional tweak groups.
use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::config::profile::{PreferenceAssignment, PreferenceValue};
use crate::config::{Config, Features};
use crate::resources::Outcome;

/// Schema holding the interface keys set outside the profile tables.
pub const INTERFACE_SCHEMA: &str = "org.gnome.desktop.interface";

/// A table of preferences applied as one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingGroup {
    /// Color scheme plus the profile's core table.
    Core,
    /// Fonts.
    Typography,
    /// File manager.
    FileManager,
    /// Top bar.
    TopBar,
    /// Touchpad.
    Touchpad,
    /// Keyboard shortcuts.
    Shortcuts,
    /// Notifications.
    Notifications,
    /// Dock extension tuning.
    Dock,
}

impl SettingGroup {
    const fn describe(self) -> (&'static str, &'static str) {
        match self {
            Self::Core => ("Apply core defaults", "defaults"),
            Self::Typography => ("Apply typography", "typography"),
            Self::FileManager => ("Configure file manager", "file-manager"),
            Self::TopBar => ("Configure top bar", "top-bar"),
            Self::Touchpad => ("Configure touchpad", "touchpad"),
            Self::Shortcuts => ("Configure keyboard shortcuts", "shortcuts"),
            Self::Notifications => ("Configure notifications", "notifications"),
            Self::Dock => ("Tune dock", "dock"),
        }
    }

    const fn enabled(self, features: &Features) -> bool {
        match self {
            Self::Core => features.defaults,
            Self::Typography => features.typography,
            Self::FileManager => features.file_manager,
            Self::TopBar => features.top_bar,
            Self::Touchpad => features.touchpad,
            Self::Shortcuts => features.shortcuts,
            Self::Notifications => features.notifications,
            Self::Dock => features.dock,
        }
    }

    /// Assignments applied by this group, in order.
    #[must_use]
    pub fn assignments(self, config: &Config) -> Vec<PreferenceAssignment> {
        let groups = &config.settings;
        let table = match self {
            Self::Core => {
                let mut core = vec![PreferenceAssignment::new(
                    INTERFACE_SCHEMA,
                    "color-scheme",
                    PreferenceValue::Str(config.color_scheme.preference().to_string()),
                )];
                core.extend(groups.core.iter().cloned());
                return core;
            }
            Self::Typography => &groups.typography,
            Self::FileManager => &groups.file_manager,
            Self::TopBar => &groups.top_bar,
            Self::Touchpad => &groups.touchpad,
            Self::Shortcuts => &groups.shortcuts,
            Self::Notifications => &groups.notifications,
            Self::Dock => &groups.dock,
        };
        table.clone()
    }
}

/// Applies one [`SettingGroup`].
#[derive(Debug)]
pub struct ApplySettings {
    group: SettingGroup,
}

impl ApplySettings {
    /// Create the step for `group`.
    #[must_use]
    pub const fn new(group: SettingGroup) -> Self {
        Self { group }
    }
}

impl Task for ApplySettings {
    fn name(&self) -> &str {
        self.group.describe().0
    }

    fn id(&self) -> &str {
        self.group.describe().1
    }

    fn should_run(&self, ctx: &Context) -> bool {
        self.group.enabled(&ctx.config.features)
            && !self.group.assignments(&ctx.config).is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let applier = ctx.preferences();
        let outcomes = self
            .group
            .assignments(&ctx.config)
            .iter()
            .map(|a| Outcome::new(a.target(), applier.apply_assignment(a)))
            .collect();
        Ok(TaskResult::Ok(outcomes))
    }
}
