//! Cursor size step.
use anyhow::Result;

use super::settings::INTERFACE_SCHEMA;
use super::{Context, Task, TaskResult};
use crate::config::profile::{PreferenceAssignment, PreferenceValue};
use crate::resources::Outcome;

/// Parse a cursor size; it must be a positive integer.
fn parse_size(raw: &str) -> Option<i64> {
    raw.trim().parse::<u16>().ok().filter(|n| *n > 0).map(i64::from)
}

/// Sets `cursor-size` from the command line.
#[derive(Debug)]
pub struct SetCursorSize;

impl Task for SetCursorSize {
    fn name(&self) -> &'static str {
        "Set cursor size"
    }

    fn id(&self) -> &'static str {
        "cursor"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.config.cursor_size.is_some()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let raw = ctx.config.cursor_size.as_deref().unwrap_or_default();
        let Some(size) = parse_size(raw) else {
            ctx.log.warn(&format!(
                "invalid cursor size '{raw}': expected a positive integer"
            ));
            return Ok(TaskResult::Skipped(format!("invalid cursor size '{raw}'")));
        };
        let assignment =
            PreferenceAssignment::new(INTERFACE_SCHEMA, "cursor-size", PreferenceValue::Int(size));
        let result = ctx.preferences().apply(&assignment);
        Ok(TaskResult::Ok(vec![Outcome::new(assignment.target(), result)]))
    }
}
