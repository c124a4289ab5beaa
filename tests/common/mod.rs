// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed profile file and a fluent builder so
// each integration test can load configuration from an isolated TOML file.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use macify_cli::config::{Config, Options};
use macify_cli::error::ConfigError;

/// A small profile exercising every top-level table.
pub const MINIMAL_PROFILE: &str = r#"
packages = ["git"]

[extensions]
enable = ["dash-to-dock@micxgx.gmail.com"]
disable = ["ubuntu-dock@ubuntu.com"]

[themes.dark]
gtk = ["WhiteSur-Dark", "Adwaita-dark"]
shell = ["Yaru-dark"]
icons = ["Adwaita"]
cursor = ["Adwaita"]

[themes.light]
gtk = ["Adwaita"]
shell = ["Yaru"]
icons = ["Adwaita"]
cursor = ["Adwaita"]

[launcher]
file_name = "launchpad.desktop"
name = "Launchpad"
exec = "true"
icon = "launchpad"

[[settings.core]]
schema = "org.gnome.mutter"
key = "center-new-windows"
value = true

[[settings.dock]]
schema = "org.gnome.shell.extensions.dash-to-dock"
key = "dash-max-icon-size"
value = 48
"#;

/// An isolated profile file backed by a [`tempfile::TempDir`].
pub struct IntegrationTestContext {
    /// Temporary directory holding the profile.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a context whose profile is [`MINIMAL_PROFILE`].
    pub fn new() -> Self {
        TestContextBuilder::new().build()
    }

    /// Path to the profile file.
    pub fn profile_path(&self) -> PathBuf {
        self.root.path().join("macify.toml")
    }

    /// Load configuration from the profile with default options.
    pub fn load_config(&self) -> Config {
        self.try_load(Options::default()).expect("load config")
    }

    /// Load configuration from the profile with `options`.
    pub fn try_load(&self, options: Options) -> Result<Config, ConfigError> {
        Config::load(Some(&self.profile_path()), options)
    }

    /// Directory containing the profile.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    profile: String,
}

impl TestContextBuilder {
    /// Begin building a context around [`MINIMAL_PROFILE`].
    pub fn new() -> Self {
        Self {
            profile: MINIMAL_PROFILE.to_string(),
        }
    }

    /// Replace the profile text entirely.
    pub fn with_profile(mut self, content: &str) -> Self {
        self.profile = content.to_string();
        self
    }

    /// Append raw TOML to the profile.
    pub fn with_extra(mut self, content: &str) -> Self {
        self.profile.push_str(content);
        self
    }

    /// Write the profile and return the context.
    pub fn build(self) -> IntegrationTestContext {
        let root = tempfile::tempdir().expect("create temp dir");
        std::fs::write(root.path().join("macify.toml"), self.profile).expect("write profile");
        IntegrationTestContext { root }
    }
}
