//! In-memory GNOME desktop for engine tests.
//!
//! [`FakeDesktop`] answers the same command lines the engine issues against
//! a real session (`gsettings`, `gnome-extensions`, `dpkg-query`,
//! `sudo apt-get`, `git clone`, `powerprofilesctl`,
//! `gtk-update-icon-cache`) and keeps the resulting state so tests can
//! assert on it.  Programs not registered as installed fail to spawn, just
//! like [`SystemExecutor`](crate::exec::SystemExecutor) on a missing binary.
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;

use super::error::ResourceError;
use crate::exec::{ExecResult, Executor};
use crate::operations::{FileSystemOps, MockFileSystemOps};

#[derive(Debug, Default)]
struct DesktopState {
    commands: BTreeSet<String>,
    schemas: BTreeMap<String, BTreeMap<String, String>>,
    extensions: BTreeMap<String, bool>,
    packages: BTreeSet<String>,
    power_profile: String,
    failing_keys: BTreeSet<String>,
    mutations: Vec<String>,
}

/// A scriptable stand-in for the desktop session.
#[derive(Debug)]
pub struct FakeDesktop {
    state: Mutex<DesktopState>,
    fs: Arc<MockFileSystemOps>,
}

impl Default for FakeDesktop {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeDesktop {
    /// A desktop with `gsettings` and `gnome-extensions` installed and no
    /// schemas, extensions or packages.
    #[must_use]
    pub fn new() -> Self {
        let state = DesktopState {
            commands: ["gsettings", "gnome-extensions"]
                .into_iter()
                .map(String::from)
                .collect(),
            power_profile: "balanced".to_string(),
            ..DesktopState::default()
        };
        Self {
            state: Mutex::new(state),
            fs: Arc::new(MockFileSystemOps::new()),
        }
    }

    /// Share `fs` with the engine so `git clone` creates directories in it.
    #[must_use]
    pub fn with_fs(mut self, fs: Arc<MockFileSystemOps>) -> Self {
        self.fs = fs;
        self
    }

    /// Register `name` as an installed program.
    #[must_use]
    pub fn with_command(self, name: &str) -> Self {
        self.lock().commands.insert(name.to_string());
        self
    }

    /// Remove `name` from the installed programs.
    #[must_use]
    pub fn without_command(self, name: &str) -> Self {
        self.lock().commands.remove(name);
        self
    }

    /// Add `key` to `schema` (creating the schema) with an empty value.
    #[must_use]
    pub fn with_key(self, schema: &str, key: &str) -> Self {
        self.lock()
            .schemas
            .entry(schema.to_string())
            .or_default()
            .insert(key.to_string(), String::new());
        self
    }

    /// Install extension `id` in the given enabled state.
    #[must_use]
    pub fn with_extension(self, id: &str, enabled: bool) -> Self {
        self.lock().extensions.insert(id.to_string(), enabled);
        self
    }

    /// Mark `package` as installed.
    #[must_use]
    pub fn with_package(self, package: &str) -> Self {
        self.lock().packages.insert(package.to_string());
        self
    }

    /// Make `gsettings set schema key` fail.
    #[must_use]
    pub fn with_failing_key(self, schema: &str, key: &str) -> Self {
        self.lock().failing_keys.insert(format!("{schema} {key}"));
        self
    }

    /// Current value text of `schema key`, if the key exists.
    #[must_use]
    pub fn value(&self, schema: &str, key: &str) -> Option<String> {
        self.lock().schemas.get(schema)?.get(key).cloned()
    }

    /// Enabled state of extension `id`, if installed.
    #[must_use]
    pub fn extension_enabled(&self, id: &str) -> Option<bool> {
        self.lock().extensions.get(id).copied()
    }

    /// Whether `package` is installed.
    #[must_use]
    pub fn has_package(&self, package: &str) -> bool {
        self.lock().packages.contains(package)
    }

    /// The active power profile.
    #[must_use]
    pub fn power_profile(&self) -> String {
        self.lock().power_profile.clone()
    }

    /// Every state-changing command line, in order.
    #[must_use]
    pub fn mutations(&self) -> Vec<String> {
        self.lock().mutations.clone()
    }

    /// A comparable rendering of all observable state.
    #[must_use]
    pub fn snapshot(&self) -> String {
        let state = self.lock();
        format!(
            "{:?}\n{:?}\n{:?}\n{}",
            state.schemas, state.extensions, state.packages, state.power_profile
        )
    }

    fn lock(&self) -> MutexGuard<'_, DesktopState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn gsettings(state: &mut DesktopState, args: &[&str]) -> (bool, String) {
        match args {
            ["list-schemas"] => (true, lines(state.schemas.keys())),
            ["list-keys", schema] => state
                .schemas
                .get(*schema)
                .map_or((false, String::new()), |keys| (true, lines(keys.keys()))),
            ["get", schema, key] => state
                .schemas
                .get(*schema)
                .and_then(|keys| keys.get(*key))
                .map_or((false, String::new()), |v| (true, format!("{v}\n"))),
            ["set", schema, key, value] => {
                if state.failing_keys.contains(&format!("{schema} {key}")) {
                    return (false, String::new());
                }
                let Some(slot) = state
                    .schemas
                    .get_mut(*schema)
                    .and_then(|keys| keys.get_mut(*key))
                else {
                    return (false, String::new());
                };
                *slot = (*value).to_string();
                state
                    .mutations
                    .push(format!("gsettings set {schema} {key} {value}"));
                (true, String::new())
            }
            _ => (false, String::new()),
        }
    }

    fn extensions(state: &mut DesktopState, args: &[&str]) -> (bool, String) {
        match args {
            ["list"] => (true, lines(state.extensions.keys())),
            [verb @ ("enable" | "disable"), id] => {
                let Some(enabled) = state.extensions.get_mut(*id) else {
                    return (false, String::new());
                };
                *enabled = *verb == "enable";
                state.mutations.push(format!("gnome-extensions {verb} {id}"));
                (true, String::new())
            }
            _ => (false, String::new()),
        }
    }

    fn dispatch(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let mut state = self.lock();
        if !state.commands.contains(program) {
            anyhow::bail!("failed to execute: {program}");
        }
        let (success, stdout) = match (program, args) {
            ("gsettings", _) => Self::gsettings(&mut state, args),
            ("gnome-extensions", _) => Self::extensions(&mut state, args),
            ("dpkg-query", ["-W", _]) => {
                let out = state
                    .packages
                    .iter()
                    .map(|p| format!("installed {p}\n"))
                    .collect();
                (true, out)
            }
            ("sudo", ["apt-get", "install", "-y", packages @ ..]) => {
                state.packages.extend(packages.iter().map(|p| (*p).to_string()));
                state
                    .mutations
                    .push(format!("apt-get install {}", packages.join(" ")));
                (true, String::new())
            }
            ("git", ["clone", "--depth", "1", _url, dest]) => {
                drop(state);
                let created = self.fs.create_dir_all(Path::new(dest)).is_ok();
                self.lock().mutations.push(format!("git clone {dest}"));
                (created, String::new())
            }
            ("powerprofilesctl", ["get"]) => (true, format!("{}\n", state.power_profile)),
            ("powerprofilesctl", ["set", profile]) => {
                state.power_profile = (*profile).to_string();
                state.mutations.push(format!("powerprofilesctl set {profile}"));
                (true, String::new())
            }
            ("gtk-update-icon-cache", _) => {
                state.mutations.push("gtk-update-icon-cache".to_string());
                (true, String::new())
            }
            _ => (false, String::new()),
        };
        Ok(ExecResult {
            stdout,
            stderr: String::new(),
            success,
            code: Some(i32::from(!success)),
        })
    }
}

fn lines<'a>(items: impl Iterator<Item = &'a String>) -> String {
    items.map(|s| format!("{s}\n")).collect()
}

impl Executor for FakeDesktop {
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let result = self.dispatch(program, args)?;
        if !result.success {
            return Err(ResourceError::ExecutionFailed {
                program: program.to_string(),
                exit_code: result.code.unwrap_or(-1),
                stderr: result.stderr,
            }
            .into());
        }
        Ok(result)
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        self.dispatch(program, args)
    }

    fn which(&self, program: &str) -> bool {
        self.lock().commands.contains(program)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_changes_existing_key_only() {
        let desktop = FakeDesktop::new().with_key("org.gnome.mutter", "center-new-windows");
        assert!(
            desktop
                .run("gsettings", &["set", "org.gnome.mutter", "center-new-windows", "true"])
                .is_ok()
        );
        assert!(
            desktop
                .run("gsettings", &["set", "org.gnome.mutter", "missing", "true"])
                .is_err()
        );
        assert_eq!(
            desktop.value("org.gnome.mutter", "center-new-windows").as_deref(),
            Some("true")
        );
        assert_eq!(desktop.mutations().len(), 1);
    }

    #[test]
    fn uninstalled_program_fails_to_spawn() {
        let desktop = FakeDesktop::new().without_command("gsettings");
        assert!(desktop.run_unchecked("gsettings", &["list-schemas"]).is_err());
        assert!(!desktop.which("gsettings"));
    }

    #[test]
    fn clone_creates_destination_in_shared_fs() {
        let fs = Arc::new(MockFileSystemOps::new());
        let desktop = FakeDesktop::new()
            .with_command("git")
            .with_fs(Arc::clone(&fs));
        desktop
            .run("git", &["clone", "--depth", "1", "https://x", "/home/test/ext"])
            .unwrap();
        assert!(fs.is_dir(Path::new("/home/test/ext")));
    }
}
