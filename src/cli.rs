//! Command-line surface.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{ColorScheme, Features, Options, PowerProfile};

/// Top-level CLI entry point for the desktop settings engine.
#[derive(Parser, Debug)]
#[command(
    name = "macify",
    about = "Idempotent macOS-style settings for Ubuntu GNOME",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Read the desired-state profile from this TOML file
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply the desktop profile
    Apply(ApplyOpts),
    /// Report which settings, extensions and tools are available
    Probe,
    /// Print version information
    Version,
}

/// Options for the `apply` subcommand.
#[derive(Args, Debug, Clone, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct ApplyOpts {
    /// Install the profile's packages with apt-get
    #[arg(long)]
    pub packages: bool,

    /// Clone the extension source if it is not present
    #[arg(long)]
    pub fetch_extension: bool,

    /// Do not apply core defaults
    #[arg(long)]
    pub no_defaults: bool,

    /// Interface color scheme
    #[arg(long, value_enum, default_value_t = ColorScheme::Dark)]
    pub color_scheme: ColorScheme,

    /// Apply font settings
    #[arg(long)]
    pub typography: bool,

    /// Cursor size in pixels
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub cursor_size: Option<String>,

    /// Apply file manager settings
    #[arg(long)]
    pub file_manager: bool,

    /// Apply top bar settings
    #[arg(long)]
    pub top_bar: bool,

    /// Wallpaper for the light appearance
    #[arg(long, value_name = "FILE")]
    pub wallpaper: Option<PathBuf>,

    /// Wallpaper for the dark appearance
    #[arg(long, value_name = "FILE")]
    pub wallpaper_dark: Option<PathBuf>,

    /// Apply touchpad settings
    #[arg(long)]
    pub touchpad: bool,

    /// Apply keyboard shortcuts
    #[arg(long)]
    pub shortcuts: bool,

    /// Apply notification settings
    #[arg(long)]
    pub notifications: bool,

    /// Do not enable or disable extensions
    #[arg(long)]
    pub no_extensions: bool,

    /// Do not select themes, icons and cursors
    #[arg(long)]
    pub no_themes: bool,

    /// Apply dock fine-tuning
    #[arg(long)]
    pub dock: bool,

    /// Write the launcher desktop entry
    #[arg(long)]
    pub launcher: bool,

    /// Install the launcher icon
    #[arg(long)]
    pub icons: bool,

    /// Power profile to switch to
    #[arg(long, value_enum, value_name = "NAME")]
    pub power_profile: Option<PowerProfile>,

    /// Skip specific steps
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Run only specific steps
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}

impl ApplyOpts {
    /// Convert the flags into configuration options.
    #[must_use]
    pub fn options(&self) -> Options {
        Options {
            features: Features {
                packages: self.packages,
                fetch_extension: self.fetch_extension,
                defaults: !self.no_defaults,
                typography: self.typography,
                file_manager: self.file_manager,
                top_bar: self.top_bar,
                touchpad: self.touchpad,
                shortcuts: self.shortcuts,
                notifications: self.notifications,
                extensions: !self.no_extensions,
                themes: !self.no_themes,
                dock: self.dock,
                launcher: self.launcher,
                icons: self.icons,
            },
            color_scheme: self.color_scheme,
            cursor_size: self.cursor_size.clone(),
            wallpaper: self.wallpaper.clone(),
            wallpaper_dark: self.wallpaper_dark.clone(),
            power_profile: self.power_profile,
        }
    }
}
