//! Power profile step.
use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult};
use crate::config::PowerProfile;
use crate::resources::{ApplicationResult, Outcome};

/// Switch the active power profile when it differs from the requested one.
#[derive(Debug)]
pub struct EnsurePowerProfile;

impl Task for EnsurePowerProfile {
    fn name(&self) -> &'static str {
        "Ensure power profile"
    }

    fn id(&self) -> &'static str {
        "power"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.config.power_profile.is_some()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let Some(wanted) = ctx.config.power_profile.map(PowerProfile::as_str) else {
            return Ok(TaskResult::Skipped("no power profile requested".to_string()));
        };
        if !ctx.has_command("powerprofilesctl") {
            return Ok(TaskResult::Skipped("powerprofilesctl not found".to_string()));
        }

        let current = ctx
            .executor
            .run("powerprofilesctl", &["get"])
            .context("reading active power profile")?;
        let current = current.stdout.trim();
        let target = format!("power profile {wanted}");

        if current == wanted {
            ctx.log.debug(&format!("power profile already {wanted}"));
            return Ok(TaskResult::Ok(vec![Outcome::new(
                target,
                ApplicationResult::Applied,
            )]));
        }
        if ctx.dry_run {
            ctx.log
                .dry_run(&format!("would switch power profile {current} -> {wanted}"));
            return Ok(TaskResult::Ok(vec![Outcome::new(
                target,
                ApplicationResult::Applied,
            )]));
        }

        let result = match ctx.executor.run("powerprofilesctl", &["set", wanted]) {
            Ok(_) => {
                ctx.log
                    .info(&format!("power profile {current} -> {wanted}"));
                ApplicationResult::Applied
            }
            Err(e) => {
                ctx.log.warn(&format!("cannot set power profile: {e:#}"));
                ApplicationResult::failed(format!("{e:#}"))
            }
        };
        Ok(TaskResult::Ok(vec![Outcome::new(target, result)]))
    }
}
