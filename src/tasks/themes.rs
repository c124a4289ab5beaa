//! Theme, icon and cursor selection step.
use anyhow::Result;

use super::settings::INTERFACE_SCHEMA;
use super::{Context, Task, TaskResult};
use crate::config::profile::{PreferenceAssignment, PreferenceValue};
use crate::config::themes::ResourceCandidateList;
use crate::resources::Outcome;
use crate::resources::selector::{self, ResourceCategory};

const USER_THEME_SCHEMA: &str = "org.gnome.shell.extensions.user-theme";

/// Picks the first installed candidate of each kind and applies it.
#[derive(Debug)]
pub struct ApplyThemes;

impl ApplyThemes {
    fn targets(ctx: &Context) -> [(ResourceCategory, &ResourceCandidateList, &'static str, &'static str); 4] {
        let themes = &ctx.config.themes;
        [
            (ResourceCategory::GtkTheme, &themes.gtk, INTERFACE_SCHEMA, "gtk-theme"),
            (ResourceCategory::IconSet, &themes.icons, INTERFACE_SCHEMA, "icon-theme"),
            (ResourceCategory::CursorSet, &themes.cursor, INTERFACE_SCHEMA, "cursor-theme"),
            (ResourceCategory::ShellTheme, &themes.shell, USER_THEME_SCHEMA, "name"),
        ]
    }
}

impl Task for ApplyThemes {
    fn name(&self) -> &'static str {
        "Apply themes"
    }

    fn id(&self) -> &'static str {
        "themes"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.config.features.themes
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let applier = ctx.preferences();
        let outcomes = Self::targets(ctx)
            .into_iter()
            .map(|(category, candidates, schema, key)| {
                let chosen = selector::select(ctx.probe.as_ref(), category, candidates);
                ctx.log.info(&format!("{category}: {chosen}"));
                let assignment =
                    PreferenceAssignment::new(schema, key, PreferenceValue::Str(chosen));
                Outcome::new(assignment.target(), applier.apply(&assignment))
            })
            .collect();
        Ok(TaskResult::Ok(outcomes))
    }
}
