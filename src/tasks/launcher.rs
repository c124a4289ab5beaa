//! Launcher desktop entry and its icon asset.
use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::resources::file::{FileState, GeneratedFile};
use crate::resources::{ApplicationResult, Outcome};

const LAUNCHER_ICON: &str = include_str!("../../conf/launchpad.svg");

/// Write `file` unless it is current, honoring dry-run.
fn install(ctx: &Context, file: &GeneratedFile<'_>) -> ApplicationResult {
    let path = file.path().display();
    match file.state() {
        FileState::Current => {
            ctx.log.debug(&format!("{path} is up to date"));
            return ApplicationResult::Applied;
        }
        state if ctx.dry_run => {
            let verb = if state == FileState::Missing {
                "create"
            } else {
                "replace"
            };
            ctx.log.dry_run(&format!("would {verb} {path}"));
            return ApplicationResult::Applied;
        }
        _ => {}
    }
    match file.write() {
        Ok(Some(backup)) => {
            ctx.log.info(&format!(
                "replaced {path} (previous saved to {})",
                backup.display()
            ));
            ApplicationResult::Applied
        }
        Ok(None) => {
            ctx.log.info(&format!("wrote {path}"));
            ApplicationResult::Applied
        }
        Err(e) => {
            ctx.log.warn(&e.to_string());
            ApplicationResult::failed(e.to_string())
        }
    }
}

fn applications_dir(home: &Path) -> PathBuf {
    home.join(".local/share/applications")
}

fn icon_theme_dir(home: &Path) -> PathBuf {
    home.join(".local/share/icons/hicolor")
}

/// Writes the launcher `.desktop` entry.
#[derive(Debug)]
pub struct InstallLauncher;

impl Task for InstallLauncher {
    fn name(&self) -> &'static str {
        "Install launcher"
    }

    fn id(&self) -> &'static str {
        "launcher"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.config.features.launcher
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let entry = &ctx.config.launcher;
        let contents = entry.render();
        let path = applications_dir(&ctx.home).join(&entry.file_name);
        let file = GeneratedFile::new(path, &contents, ctx.fs_ops.as_ref());
        let result = install(ctx, &file);
        Ok(TaskResult::Ok(vec![Outcome::new(
            file.path().display().to_string(),
            result,
        )]))
    }
}

/// Installs the launcher's scalable icon and refreshes the icon cache.
#[derive(Debug)]
pub struct InstallLauncherIcon;

impl InstallLauncherIcon {
    fn refresh_cache(ctx: &Context) -> Option<Outcome> {
        if !ctx.has_command("gtk-update-icon-cache") {
            ctx.log
                .debug("gtk-update-icon-cache not found; skipping cache refresh");
            return None;
        }
        let theme = icon_theme_dir(&ctx.home);
        let theme_arg = theme.to_string_lossy();
        let result = match ctx
            .executor
            .run("gtk-update-icon-cache", &["-f", "-t", &theme_arg])
        {
            Ok(_) => ApplicationResult::Applied,
            Err(e) => {
                ctx.log.warn(&format!("icon cache refresh failed: {e:#}"));
                ApplicationResult::failed(format!("{e:#}"))
            }
        };
        Some(Outcome::new("icon cache", result))
    }
}

impl Task for InstallLauncherIcon {
    fn name(&self) -> &'static str {
        "Install launcher icon"
    }

    fn id(&self) -> &'static str {
        "icons"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.config.features.icons
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let path = icon_theme_dir(&ctx.home)
            .join("scalable/apps")
            .join(format!("{}.svg", ctx.config.launcher.icon));
        let file = GeneratedFile::new(path, LAUNCHER_ICON, ctx.fs_ops.as_ref());
        let changed = file.state() != FileState::Current;
        let mut outcomes = vec![Outcome::new(
            file.path().display().to_string(),
            install(ctx, &file),
        )];
        if changed && !ctx.dry_run && outcomes.iter().all(|o| !o.result.is_failure()) {
            outcomes.extend(Self::refresh_cache(ctx));
        }
        Ok(TaskResult::Ok(outcomes))
    }
}
