//! Command: apply the desired-state profile to the running desktop.
use std::sync::Arc;

use anyhow::Result;

use crate::cli::{ApplyOpts, GlobalOpts};
use crate::error::MacifyError;
use crate::exec::{Executor, SystemExecutor};
use crate::logging::{Log, Logger};
use crate::tasks::{self, Context, StepReport};

use super::{filter_steps, load_config, run_steps};

/// Run the apply command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, `HOME` is unset, or
/// `gsettings` is not installed.  Step failures are reported in the summary
/// and do not make the command fail.
pub fn run(global: &GlobalOpts, opts: &ApplyOpts, log: &Arc<Logger>) -> Result<()> {
    log.info(&format!("macify {}", super::version::version()));

    let config = load_config(global, opts.options(), log.as_ref())?;
    let executor: Arc<dyn Executor> = Arc::new(SystemExecutor);
    let ctx = Context::new(
        Arc::new(config),
        Arc::clone(log) as Arc<dyn Log>,
        global.dry_run,
        executor,
    )?;

    apply(&ctx, opts)?;
    log.print_summary();
    let failures = log.failure_count();
    if failures > 0 {
        log.warn(&format!("{failures} step(s) reported failures; see the log for details"));
    }
    log.info("done");
    Ok(())
}

/// Check preconditions, then run the selected steps against `ctx`.
///
/// # Errors
///
/// Returns [`MacifyError::Precondition`] before touching anything when
/// `gsettings` is not available.
pub fn apply(ctx: &Context, opts: &ApplyOpts) -> Result<Vec<StepReport>> {
    if !ctx.has_command("gsettings") {
        return Err(MacifyError::Precondition("gsettings".to_string()).into());
    }
    if ctx.dry_run {
        ctx.log.info("dry run: no changes will be made");
    }

    let steps = tasks::all_steps();
    let selected = filter_steps(&steps, &opts.only, &opts.skip);
    ctx.log.debug(&format!(
        "{} of {} steps selected",
        selected.len(),
        steps.len()
    ));
    Ok(run_steps(selected, ctx))
}
