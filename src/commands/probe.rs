//! Command: report what the profile depends on, without changing anything.
use std::fmt;
use std::sync::Arc;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::{Config, Options};
use crate::error::ProbeError;
use crate::exec::{Executor, SystemExecutor};
use crate::logging::{Log, Logger};
use crate::probe::Capabilities;
use crate::resources::selector::{self, ResourceCategory};
use crate::tasks::Context;
use crate::tasks::settings::{INTERFACE_SCHEMA, SettingGroup};

use super::load_config;

/// External programs the steps may call.
const TOOLS: &[&str] = &[
    "gsettings",
    "gnome-extensions",
    "dpkg-query",
    "apt-get",
    "sudo",
    "git",
    "gtk-update-icon-cache",
    "powerprofilesctl",
];

const GROUPS: [SettingGroup; 8] = [
    SettingGroup::Core,
    SettingGroup::Typography,
    SettingGroup::FileManager,
    SettingGroup::TopBar,
    SettingGroup::Touchpad,
    SettingGroup::Shortcuts,
    SettingGroup::Notifications,
    SettingGroup::Dock,
];

/// Result of one availability query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// Present.
    Available,
    /// Absent.
    Missing,
    /// The query itself could not run.
    Unknown(String),
}

impl From<Result<bool, ProbeError>> for Availability {
    fn from(result: Result<bool, ProbeError>) -> Self {
        match result {
            Ok(true) => Self::Available,
            Ok(false) => Self::Missing,
            Err(e) => Self::Unknown(e.to_string()),
        }
    }
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => f.write_str("available"),
            Self::Missing => f.write_str("missing"),
            Self::Unknown(reason) => write!(f, "unknown ({reason})"),
        }
    }
}

/// Everything the probe command found.
#[derive(Debug, Default)]
pub struct ProbeReport {
    /// Programs on `PATH`.
    pub tools: Vec<(String, Availability)>,
    /// Preference keys (`schema key`), deduplicated, in profile order.
    pub keys: Vec<(String, Availability)>,
    /// Extensions named in the toggle lists.
    pub extensions: Vec<(String, Availability)>,
    /// What each resource category would resolve to.
    pub selections: Vec<(ResourceCategory, String)>,
}

impl ProbeReport {
    /// Query `probe` for everything `config` refers to.
    #[must_use]
    pub fn collect(config: &Config, probe: &dyn Capabilities) -> Self {
        let tools: Vec<(String, Availability)> = TOOLS
            .iter()
            .map(|t| ((*t).to_string(), probe.has_command(t).into()))
            .collect();

        let mut targets: Vec<(String, String)> = GROUPS
            .iter()
            .flat_map(|g| g.assignments(config))
            .map(|a| (a.schema, a.key))
            .collect();
        for key in ["gtk-theme", "icon-theme", "cursor-theme", "cursor-size"] {
            targets.push((INTERFACE_SCHEMA.to_string(), key.to_string()));
        }
        targets.push((
            "org.gnome.shell.extensions.user-theme".to_string(),
            "name".to_string(),
        ));
        let mut seen = std::collections::BTreeSet::new();
        targets.retain(|t| seen.insert(t.clone()));
        let keys: Vec<(String, Availability)> = targets
            .into_iter()
            .map(|(schema, key)| {
                let found = probe.has_key(&schema, &key).into();
                (format!("{schema} {key}"), found)
            })
            .collect();

        let extensions: Vec<(String, Availability)> = config
            .extensions
            .to_enable()
            .iter()
            .chain(config.extensions.to_disable())
            .map(|id| (id.clone(), probe.has_extension(id).into()))
            .collect();

        let themes = &config.themes;
        let selections: Vec<(ResourceCategory, String)> = [
            (ResourceCategory::GtkTheme, &themes.gtk),
            (ResourceCategory::ShellTheme, &themes.shell),
            (ResourceCategory::IconSet, &themes.icons),
            (ResourceCategory::CursorSet, &themes.cursor),
        ]
        .into_iter()
        .map(|(category, list)| (category, selector::select(probe, category, list)))
        .collect();

        Self {
            tools,
            keys,
            extensions,
            selections,
        }
    }

    /// Print the report through `log`.
    pub fn print(&self, log: &dyn Log) {
        let section = |title: &str, rows: &[(String, Availability)]| {
            log.stage(title);
            for (name, availability) in rows {
                log.info(&format!("{name}: {availability}"));
            }
        };
        section("Tools", &self.tools);
        section("Preference keys", &self.keys);
        section("Extensions", &self.extensions);
        log.stage("Resource selection");
        for (category, chosen) in &self.selections {
            log.info(&format!("{category}: {chosen}"));
        }
    }
}

/// Run the probe command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or `HOME` is unset.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let config = load_config(global, Options::default(), log.as_ref())?;
    let executor: Arc<dyn Executor> = Arc::new(SystemExecutor);
    let ctx = Context::new(
        Arc::new(config),
        Arc::clone(log) as Arc<dyn Log>,
        true,
        executor,
    )?;
    ProbeReport::collect(&ctx.config, ctx.probe.as_ref()).print(log.as_ref());
    log.info("done");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::resources::fake::FakeDesktop;
    use crate::tasks::test_helpers::{desktop_context, stock_desktop, test_config};

    fn lookup<'a>(rows: &'a [(String, Availability)], name: &str) -> &'a Availability {
        &rows.iter().find(|(n, _)| n == name).unwrap().1
    }

    #[test]
    fn stock_desktop_reports_keys_and_extensions() {
        let config = test_config();
        let desktop = stock_desktop(&config);
        let (ctx, _log, desktop, _fs) = desktop_context(config, desktop);

        let report = ProbeReport::collect(&ctx.config, ctx.probe.as_ref());
        assert_eq!(lookup(&report.tools, "gsettings"), &Availability::Available);
        assert_eq!(lookup(&report.tools, "git"), &Availability::Missing);
        assert_eq!(
            lookup(&report.keys, "org.gnome.desktop.interface color-scheme"),
            &Availability::Available
        );
        assert_eq!(
            lookup(&report.extensions, "ubuntu-dock@ubuntu.com"),
            &Availability::Available
        );
        assert!(desktop.mutations().is_empty());
    }

    #[test]
    fn keys_are_deduplicated() {
        let config = test_config();
        let (ctx, _log, _desktop, _fs) = desktop_context(config, FakeDesktop::new());
        let report = ProbeReport::collect(&ctx.config, ctx.probe.as_ref());
        let mut names: Vec<_> = report.keys.iter().map(|(n, _)| n.clone()).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn missing_gsettings_is_unknown_not_missing() {
        let desktop = FakeDesktop::new().without_command("gsettings");
        let (ctx, _log, _desktop, _fs) = desktop_context(test_config(), desktop);
        let report = ProbeReport::collect(&ctx.config, ctx.probe.as_ref());
        assert!(matches!(
            lookup(&report.keys, "org.gnome.mutter center-new-windows"),
            Availability::Unknown(_)
        ));
    }

    #[test]
    fn selections_fall_back_without_theme_dirs() {
        let (ctx, _log, _desktop, _fs) = desktop_context(test_config(), FakeDesktop::new());
        let report = ProbeReport::collect(&ctx.config, ctx.probe.as_ref());
        assert_eq!(
            report.selections.first(),
            Some(&(ResourceCategory::GtkTheme, "Adwaita-dark".to_string()))
        );
    }
}
