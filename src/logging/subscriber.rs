//! `tracing` subscriber: coloured console output plus a plain-text log file.
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write as _;
use std::path::Path;
use std::sync::Mutex;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use super::types::StepStatus;
use super::utils::{log_file_path, timestamp};

/// Target of section headers.
pub(super) const STAGE: &str = "macify::stage";
/// Target of dry-run previews.
pub(super) const DRY_RUN: &str = "macify::dry_run";
/// Target of summary lines; these carry a `status` field.
pub(super) const SUMMARY: &str = "macify::summary";

/// The `message` and `status` fields of an event.
#[derive(Default)]
struct Fields {
    message: String,
    status: Option<StepStatus>,
}

impl Fields {
    fn of(event: &Event<'_>) -> Self {
        let mut fields = Self::default();
        event.record(&mut fields);
        fields
    }
}

impl Visit for Fields {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "status" => self.status = StepStatus::from_label(value),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message.clear();
            let _ = write!(self.message, "{value:?}");
        }
    }
}

/// Appends every event to the command's log file, one timestamped line each.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<File>,
}

impl FileLayer {
    /// Open the log file for `command`.
    pub(super) fn new(command: &str) -> Option<Self> {
        Self::at(&log_file_path(command)?, command)
    }

    /// Start a fresh log at `path` with a one-line run header.
    pub(super) fn at(path: &Path, command: &str) -> Option<Self> {
        let version = option_env!("MACIFY_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
        fs::write(
            path,
            format!("# macify {version} {command} started {}\n", timestamp()),
        )
        .ok()?;
        let file = fs::OpenOptions::new().append(true).open(path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }

    fn render(level: Level, target: &str, fields: &Fields) -> String {
        let msg = &fields.message;
        match (level, target) {
            (Level::INFO, STAGE) => format!("== {msg}"),
            (Level::INFO, DRY_RUN) => format!("   dry-run: {msg}"),
            (Level::INFO, SUMMARY) => {
                let label = fields.status.map_or("?", StepStatus::label);
                format!("   [{label}] {msg}")
            }
            (Level::ERROR, _) => format!("   error: {msg}"),
            (Level::WARN, _) => format!("   warning: {msg}"),
            (Level::DEBUG | Level::TRACE, _) => format!("   debug: {msg}"),
            _ => format!("   {msg}"),
        }
    }
}

impl<S: Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let meta = event.metadata();
        let line = Self::render(*meta.level(), meta.target(), &Fields::of(event));
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{} {line}", timestamp());
        }
    }
}

const fn status_color(status: Option<StepStatus>) -> &'static str {
    match status {
        Some(StepStatus::Ok) => "\x1b[32m",
        Some(StepStatus::Skipped | StepStatus::DryRun) => "\x1b[33m",
        Some(StepStatus::Failed) => "\x1b[31m",
        Some(StepStatus::Disabled) | None => "\x1b[2m",
    }
}

/// Console layout: bold stage headers, indented messages, coloured levels.
struct ConsoleFormat;

impl<S, N> FormatEvent<S, N> for ConsoleFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let fields = Fields::of(event);
        let msg = &fields.message;
        match (*meta.level(), meta.target()) {
            (Level::ERROR, _) => writeln!(writer, "\x1b[1;31merror:\x1b[0m {msg}"),
            (Level::WARN, _) => writeln!(writer, "\x1b[33mwarning:\x1b[0m {msg}"),
            (Level::INFO, STAGE) => writeln!(writer, "\x1b[1;35m::\x1b[0m \x1b[1m{msg}\x1b[0m"),
            (Level::INFO, DRY_RUN) => writeln!(writer, "   \x1b[36m(dry run)\x1b[0m {msg}"),
            (Level::INFO, SUMMARY) => {
                writeln!(writer, "   {}{msg}\x1b[0m", status_color(fields.status))
            }
            (Level::INFO, _) => writeln!(writer, "   {msg}"),
            _ => writeln!(writer, "   \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Install the global subscriber. Call once, before logging anything.
///
/// The console shows `info` and above (`debug` with `verbose`, or whatever
/// `RUST_LOG` selects); warnings and errors go to stderr.  The log file at
/// `$XDG_CACHE_HOME/macify/<command>.log` always receives `debug` and above.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        EnvFilter, Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let console_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    let writer = std::io::stderr
        .with_max_level(Level::WARN)
        .or_else(std::io::stdout);
    let console = fmt::layer()
        .event_format(ConsoleFormat)
        .with_writer(writer)
        .with_filter(console_filter);

    let file = FileLayer::new(command).map(|layer| layer.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .init();
}
