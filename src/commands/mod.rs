//! Subcommand handlers and the step filter they share.
pub mod apply;
pub mod probe;
pub mod version;

use std::process::ExitCode;

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::config::{Config, Options};
use crate::error::MacifyError;
use crate::logging::Log;
use crate::tasks::{self, Context, StepReport, Task};

/// Load the profile and merge command-line options.
///
/// # Errors
///
/// Returns an error if the profile cannot be read, parsed or validated.
pub fn load_config(global: &GlobalOpts, options: Options, log: &dyn Log) -> Result<Config> {
    log.stage("Loading configuration");
    let origin = global
        .config
        .as_ref()
        .map_or_else(|| "embedded profile".to_string(), |p| p.display().to_string());
    let config = Config::load(global.config.as_deref(), options).map_err(MacifyError::from)?;
    log.info(&format!("profile: {origin}"));
    log.debug(&format!("{} packages", config.packages.len()));
    log.debug(&format!(
        "{} extensions to enable, {} to disable",
        config.extensions.to_enable().len(),
        config.extensions.to_disable().len()
    ));
    Ok(config)
}

/// Keep the steps selected by `--only` and not excluded by `--skip`.
///
/// A filter that equals some step's id selects that step alone; any other
/// filter matches a substring of the lowercase step names.
#[must_use]
pub fn filter_steps<'a>(
    steps: &'a [Box<dyn Task>],
    only: &[String],
    skip: &[String],
) -> Vec<&'a dyn Task> {
    let matches = |task: &dyn Task, filter: &str| {
        let filter = filter.to_lowercase();
        if steps.iter().any(|s| s.id() == filter) {
            task.id() == filter
        } else {
            task.name().to_lowercase().contains(&filter)
        }
    };
    steps
        .iter()
        .map(AsRef::as_ref)
        .filter(|t| only.is_empty() || only.iter().any(|o| matches(*t, o)))
        .filter(|t| !skip.iter().any(|s| matches(*t, s)))
        .collect()
}

/// Execute every step in order. Never fails; each step's outcome is in its
/// report and in the logger's summary.
pub fn run_steps<'a>(
    steps: impl IntoIterator<Item = &'a dyn Task>,
    ctx: &Context,
) -> Vec<StepReport> {
    steps
        .into_iter()
        .map(|task| tasks::execute(task, ctx))
        .collect()
}

/// Turn a command's result into the process exit status, logging a fatal
/// error first.
#[must_use]
pub fn finish(result: &Result<()>, log: &dyn Log) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
