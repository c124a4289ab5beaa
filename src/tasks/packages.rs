//! Package install step.
use anyhow::{Context as _, Result};

use super::{Context, Task, TaskResult};
use crate::resources::package::PackageSet;
use crate::resources::{ApplicationResult, Outcome};

/// Install the profile's packages via apt-get.
#[derive(Debug)]
pub struct InstallPackages;

impl Task for InstallPackages {
    fn name(&self) -> &'static str {
        "Install packages"
    }

    fn id(&self) -> &'static str {
        "packages"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.config.features.packages && !ctx.config.packages.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        for tool in ["dpkg-query", "apt-get", "sudo"] {
            if !ctx.has_command(tool) {
                return Ok(TaskResult::Skipped(format!("{tool} not found")));
            }
        }

        let set = PackageSet::new(&ctx.config.packages, ctx.executor.as_ref());
        ctx.log.debug(&format!(
            "batch-checking {} packages with a single query",
            ctx.config.packages.len()
        ));
        let missing = set.missing().context("querying installed packages")?;

        if missing.is_empty() {
            ctx.log.info("all packages already installed");
            return Ok(TaskResult::Ok(vec![Outcome::new(
                "packages",
                ApplicationResult::Applied,
            )]));
        }

        let target = missing.join(" ");
        if ctx.dry_run {
            ctx.log.dry_run(&format!("would install {target}"));
            return Ok(TaskResult::Ok(vec![Outcome::new(
                target,
                ApplicationResult::Applied,
            )]));
        }

        ctx.log.info(&format!("installing {target}"));
        let result = match set.install(&missing) {
            Ok(()) => ApplicationResult::Applied,
            Err(e) => {
                ctx.log.warn(&format!("package install failed: {e:#}"));
                ApplicationResult::failed(format!("{e:#}"))
            }
        };
        Ok(TaskResult::Ok(vec![Outcome::new(target, result)]))
    }
}
