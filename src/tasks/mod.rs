//! Named steps that wire configuration to desktop primitives.
pub mod context;
pub mod cursor;
pub mod extension_source;
pub mod extensions;
pub mod launcher;
pub mod packages;
pub mod power;
pub mod settings;
pub mod themes;
pub mod wallpaper;

pub use context::Context;

use anyhow::Result;

use crate::logging::StepStatus;
use crate::resources::{ApplicationResult, Outcome};

use self::settings::{ApplySettings, SettingGroup};

/// What a step produced when it ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    /// The step processed its targets; each carries its own classification.
    Ok(Vec<Outcome>),
    /// The step did not touch anything (missing tool, invalid input).
    Skipped(String),
}

/// A named, executable step.
pub trait Task: Send + Sync {
    /// Human-readable step name.
    fn name(&self) -> &str;

    /// Short identifier accepted by `--skip` and `--only`.
    fn id(&self) -> &str;

    /// Whether the configuration enables this step.
    fn should_run(&self, ctx: &Context) -> bool;

    /// Execute the step.
    ///
    /// # Errors
    ///
    /// Returns an error only for unexpected failures (for example a query
    /// tool that cannot be spawned); [`execute`] absorbs it.
    fn run(&self, ctx: &Context) -> Result<TaskResult>;
}

/// Per-step entry of the run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    /// Step name.
    pub name: String,
    /// Overall status.
    pub status: StepStatus,
    /// Per-target outcomes; empty for steps that did not run.
    pub outcomes: Vec<Outcome>,
}

/// Every step in execution order.
#[must_use]
pub fn all_steps() -> Vec<Box<dyn Task>> {
    vec![
        Box::new(packages::InstallPackages),
        Box::new(extension_source::FetchExtensionSource),
        Box::new(ApplySettings::new(SettingGroup::Core)),
        Box::new(ApplySettings::new(SettingGroup::Typography)),
        Box::new(cursor::SetCursorSize),
        Box::new(ApplySettings::new(SettingGroup::FileManager)),
        Box::new(ApplySettings::new(SettingGroup::TopBar)),
        Box::new(wallpaper::SetWallpaper),
        Box::new(ApplySettings::new(SettingGroup::Touchpad)),
        Box::new(ApplySettings::new(SettingGroup::Shortcuts)),
        Box::new(ApplySettings::new(SettingGroup::Notifications)),
        Box::new(extensions::ToggleExtensions),
        Box::new(themes::ApplyThemes),
        Box::new(ApplySettings::new(SettingGroup::Dock)),
        Box::new(launcher::InstallLauncher),
        Box::new(launcher::InstallLauncherIcon),
        Box::new(power::EnsurePowerProfile),
    ]
}

/// Count outcomes by classification, e.g. `3 applied, 1 skipped`.
fn tally(outcomes: &[Outcome]) -> Option<String> {
    let applied = outcomes
        .iter()
        .filter(|o| o.result == ApplicationResult::Applied)
        .count();
    let skipped = outcomes.iter().filter(|o| o.result.is_skipped()).count();
    let failed = outcomes.iter().filter(|o| o.result.is_failure()).count();
    let parts: Vec<String> = [(applied, "applied"), (skipped, "skipped"), (failed, "failed")]
        .into_iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, label)| format!("{n} {label}"))
        .collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}

/// Execute a step, recording the result in the logger.
///
/// Never fails: errors from [`Task::run`] become a
/// [`ApplicationResult::FailedExternalTool`] outcome.
pub fn execute(task: &dyn Task, ctx: &Context) -> StepReport {
    let report = |status, outcomes| StepReport {
        name: task.name().to_string(),
        status,
        outcomes,
    };

    if !task.should_run(ctx) {
        ctx.log
            .debug(&format!("skipping step: {} (not enabled)", task.name()));
        ctx.log
            .record_step(task.name(), StepStatus::Disabled, None);
        return report(StepStatus::Disabled, vec![]);
    }

    ctx.log.stage(task.name());

    match task.run(ctx) {
        Ok(TaskResult::Ok(outcomes)) => {
            let status = if outcomes.iter().any(|o| o.result.is_failure()) {
                StepStatus::Failed
            } else if ctx.dry_run {
                StepStatus::DryRun
            } else {
                StepStatus::Ok
            };
            ctx.log
                .record_step(task.name(), status, tally(&outcomes).as_deref());
            report(status, outcomes)
        }
        Ok(TaskResult::Skipped(reason)) => {
            ctx.log.info(&format!("skipped: {reason}"));
            ctx.log
                .record_step(task.name(), StepStatus::Skipped, Some(&reason));
            report(StepStatus::Skipped, vec![])
        }
        Err(e) => {
            let reason = format!("{e:#}");
            ctx.log.warn(&format!("{}: {reason}", task.name()));
            ctx.log
                .record_step(task.name(), StepStatus::Failed, Some(&reason));
            report(
                StepStatus::Failed,
                vec![Outcome::new(task.name(), ApplicationResult::failed(reason))],
            )
        }
    }
}
