//! Extension source fetch step.
use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::resources::source::{SourceCheckout, expand_home};
use crate::resources::{ApplicationResult, Outcome};

/// Shallow-clone the configured extension into its install path.
///
/// An existing destination is left alone; the checkout is never updated.
#[derive(Debug)]
pub struct FetchExtensionSource;

impl Task for FetchExtensionSource {
    fn name(&self) -> &'static str {
        "Fetch extension source"
    }

    fn id(&self) -> &'static str {
        "extension-source"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.config.features.fetch_extension && ctx.config.extension_source.is_some()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let Some(source) = ctx.config.extension_source.as_ref() else {
            return Ok(TaskResult::Skipped("no extension source configured".to_string()));
        };
        let checkout = SourceCheckout::new(
            &source.url,
            expand_home(&source.path, &ctx.home),
            ctx.executor.as_ref(),
            ctx.fs_ops.as_ref(),
        );
        let dest = checkout.dest().display().to_string();

        if checkout.is_present() {
            return Ok(TaskResult::Skipped(format!("{dest} already present")));
        }
        if !ctx.has_command("git") {
            return Ok(TaskResult::Skipped("git not found".to_string()));
        }
        if ctx.dry_run {
            ctx.log
                .dry_run(&format!("would clone {} into {dest}", source.url));
            return Ok(TaskResult::Ok(vec![Outcome::new(
                dest,
                ApplicationResult::Applied,
            )]));
        }

        ctx.log.info(&format!("cloning {} into {dest}", source.url));
        let result = match checkout.fetch() {
            Ok(()) => ApplicationResult::Applied,
            Err(e) => {
                ctx.log.warn(&format!("clone failed: {e:#}"));
                ApplicationResult::failed(format!("{e:#}"))
            }
        };
        Ok(TaskResult::Ok(vec![Outcome::new(dest, result)]))
    }
}
