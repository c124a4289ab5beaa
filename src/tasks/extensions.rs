//! Extension toggle step.
use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::resources::Outcome;

/// Enables and disables the profile's shell extensions.
#[derive(Debug)]
pub struct ToggleExtensions;

impl Task for ToggleExtensions {
    fn name(&self) -> &'static str {
        "Toggle extensions"
    }

    fn id(&self) -> &'static str {
        "extensions"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.config.features.extensions && !ctx.config.extensions.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let outcomes = ctx
            .extensions()
            .toggle(&ctx.config.extensions)
            .into_iter()
            .map(|(id, result)| Outcome::new(id, result))
            .collect();
        Ok(TaskResult::Ok(outcomes))
    }
}
