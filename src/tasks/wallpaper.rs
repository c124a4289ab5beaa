//! Light and dark wallpaper step.
use std::fmt::Write as _;
use std::path::Path;

use anyhow::Result;

use super::{Context, Task, TaskResult};
use crate::config::profile::{PreferenceAssignment, PreferenceValue};
use crate::resources::{ApplicationResult, Outcome};

const BACKGROUND_SCHEMA: &str = "org.gnome.desktop.background";

/// Render `path` as a `file://` URI, percent-encoding reserved bytes.
fn file_uri(path: &Path) -> String {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut uri = String::from("file://");
    for byte in absolute.to_string_lossy().bytes() {
        if byte.is_ascii_alphanumeric() || b"/-._~".contains(&byte) {
            uri.push(char::from(byte));
        } else {
            let _ = write!(uri, "%{byte:02X}");
        }
    }
    uri
}

/// Sets `picture-uri` and `picture-uri-dark` independently.
#[derive(Debug)]
pub struct SetWallpaper;

impl SetWallpaper {
    fn apply_one(ctx: &Context, key: &str, path: &Path) -> Outcome {
        let target = format!("{BACKGROUND_SCHEMA} {key}");
        if !ctx.fs_ops.is_file(path) {
            ctx.log.warn(&format!(
                "wallpaper {} not found; leaving {key} unchanged",
                path.display()
            ));
            return Outcome::new(
                target,
                ApplicationResult::skipped(format!("{} not found", path.display())),
            );
        }
        let assignment = PreferenceAssignment::new(
            BACKGROUND_SCHEMA,
            key,
            PreferenceValue::Str(file_uri(path)),
        );
        Outcome::new(target, ctx.preferences().apply(&assignment))
    }
}

impl Task for SetWallpaper {
    fn name(&self) -> &'static str {
        "Set wallpaper"
    }

    fn id(&self) -> &'static str {
        "wallpaper"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        ctx.config.wallpaper.is_some() || ctx.config.wallpaper_dark.is_some()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        let halves = [
            ("picture-uri", ctx.config.wallpaper.as_ref()),
            ("picture-uri-dark", ctx.config.wallpaper_dark.as_ref()),
        ];
        let outcomes = halves
            .into_iter()
            .filter_map(|(key, path)| path.map(|p| Self::apply_one(ctx, key, p)))
            .collect();
        Ok(TaskResult::Ok(outcomes))
    }
}
