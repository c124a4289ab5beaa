//! Immutable run configuration: CLI options merged with the TOML profile.
pub mod extensions;
pub mod profile;
pub mod themes;
pub mod toml_loader;

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use self::extensions::ExtensionToggleSet;
use self::profile::{ExtensionSource, LauncherEntry, Profile, SettingGroups};
use self::themes::ThemeSelection;

/// Preferred interface color scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorScheme {
    /// `prefer-dark`.
    #[default]
    Dark,
    /// The stock light appearance.
    Light,
}

impl ColorScheme {
    /// Value of `org.gnome.desktop.interface color-scheme` for this scheme.
    #[must_use]
    pub const fn preference(self) -> &'static str {
        match self {
            Self::Dark => "prefer-dark",
            Self::Light => "default",
        }
    }
}

/// Power profile enforced by the power step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PowerProfile {
    /// `performance`.
    Performance,
    /// `balanced`.
    Balanced,
    /// `power-saver`.
    PowerSaver,
}

impl PowerProfile {
    /// Name as understood by `powerprofilesctl`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Performance => "performance",
            Self::Balanced => "balanced",
            Self::PowerSaver => "power-saver",
        }
    }
}

/// Per-step feature toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Features {
    /// Install the profile's package list.
    pub packages: bool,
    /// Shallow-clone the extension source.
    pub fetch_extension: bool,
    /// Apply core defaults (including color scheme).
    pub defaults: bool,
    /// Apply font settings.
    pub typography: bool,
    /// Apply file manager settings.
    pub file_manager: bool,
    /// Apply top bar settings.
    pub top_bar: bool,
    /// Apply touchpad settings.
    pub touchpad: bool,
    /// Apply keyboard shortcuts.
    pub shortcuts: bool,
    /// Apply notification settings.
    pub notifications: bool,
    /// Enable/disable extensions.
    pub extensions: bool,
    /// Select and apply themes, icons and cursors.
    pub themes: bool,
    /// Apply dock fine-tuning.
    pub dock: bool,
    /// Write the launcher desktop entry.
    pub launcher: bool,
    /// Install the launcher icon asset.
    pub icons: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            packages: false,
            fetch_extension: false,
            defaults: true,
            typography: false,
            file_manager: false,
            top_bar: false,
            touchpad: false,
            shortcuts: false,
            notifications: false,
            extensions: true,
            themes: true,
            dock: false,
            launcher: false,
            icons: false,
        }
    }
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Per-step toggles.
    pub features: Features,
    /// Color scheme.
    pub color_scheme: ColorScheme,
    /// Raw cursor size; validated by the cursor step, not here.
    pub cursor_size: Option<String>,
    /// Light wallpaper.
    pub wallpaper: Option<PathBuf>,
    /// Dark wallpaper.
    pub wallpaper_dark: Option<PathBuf>,
    /// Power profile to ensure.
    pub power_profile: Option<PowerProfile>,
}

/// All configuration for one run. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    /// Per-step toggles.
    pub features: Features,
    /// Color scheme.
    pub color_scheme: ColorScheme,
    /// Raw cursor size as typed by the user.
    pub cursor_size: Option<String>,
    /// Light wallpaper.
    pub wallpaper: Option<PathBuf>,
    /// Dark wallpaper.
    pub wallpaper_dark: Option<PathBuf>,
    /// Power profile to ensure.
    pub power_profile: Option<PowerProfile>,
    /// Packages to install.
    pub packages: Vec<String>,
    /// Extension fetched from source.
    pub extension_source: Option<ExtensionSource>,
    /// Preference groups.
    pub settings: SettingGroups,
    /// Extension toggles.
    pub extensions: ExtensionToggleSet,
    /// Theme candidates for the chosen color scheme.
    pub themes: ThemeSelection,
    /// Launcher desktop entry.
    pub launcher: LauncherEntry,
}

impl Config {
    /// Load the profile (embedded or from `profile_path`) and merge `options`.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile cannot be read or parsed, or if it
    /// violates an invariant (overlapping extension ids, empty candidates).
    pub fn load(profile_path: Option<&Path>, options: Options) -> Result<Self, ConfigError> {
        let profile: Profile = toml_loader::load_config(profile_path)?;
        Self::build(profile, options)
    }

    /// Merge an already-parsed profile with `options`.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile violates an invariant.
    pub fn build(profile: Profile, options: Options) -> Result<Self, ConfigError> {
        let extensions =
            ExtensionToggleSet::new(profile.extensions.enable, profile.extensions.disable)?;
        let candidates = match options.color_scheme {
            ColorScheme::Dark => &profile.themes.dark,
            ColorScheme::Light => &profile.themes.light,
        };
        let themes = ThemeSelection::from_candidates(candidates)?;

        Ok(Self {
            features: options.features,
            color_scheme: options.color_scheme,
            cursor_size: options.cursor_size,
            wallpaper: options.wallpaper,
            wallpaper_dark: options.wallpaper_dark,
            power_profile: options.power_profile,
            packages: profile.packages,
            extension_source: profile.extension_source,
            settings: profile.settings,
            extensions,
            themes,
            launcher: profile.launcher,
        })
    }
}
