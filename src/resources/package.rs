//! Debian package installation through `apt-get`.
use std::collections::BTreeSet;

use anyhow::Result;

use crate::exec::Executor;

/// Query the set of installed package names with a single `dpkg-query` call.
///
/// Packages that are known to dpkg but not fully installed (removed with
/// config files left behind, half-configured) are excluded.
///
/// # Errors
///
/// Returns an error if `dpkg-query` cannot be executed.
pub fn installed_packages(executor: &dyn Executor) -> Result<BTreeSet<String>> {
    let result = executor.run_unchecked("dpkg-query", &["-W", "-f=${db:Status-Status} ${Package}\n"])?;
    let mut set = BTreeSet::new();
    if result.success {
        for line in result.stdout.lines() {
            if let Some(name) = line.strip_prefix("installed ") {
                set.insert(name.trim().to_string());
            }
        }
    }
    Ok(set)
}

/// The configured package list, checked against what is installed.
#[derive(Debug)]
pub struct PackageSet<'a> {
    names: &'a [String],
    executor: &'a dyn Executor,
}

impl<'a> PackageSet<'a> {
    /// Create a set over `names`.
    #[must_use]
    pub const fn new(names: &'a [String], executor: &'a dyn Executor) -> Self {
        Self { names, executor }
    }

    /// Names not currently installed, in configured order.
    ///
    /// # Errors
    ///
    /// Returns an error if the installed set cannot be queried.
    pub fn missing(&self) -> Result<Vec<String>> {
        let installed = installed_packages(self.executor)?;
        Ok(self
            .names
            .iter()
            .filter(|n| !installed.contains(*n))
            .cloned()
            .collect())
    }

    /// Install `missing` with one `sudo apt-get install -y` call.
    ///
    /// # Errors
    ///
    /// Returns an error if the install command fails.
    pub fn install(&self, missing: &[String]) -> Result<()> {
        let mut args = vec!["apt-get", "install", "-y"];
        args.extend(missing.iter().map(String::as_str));
        self.executor.run("sudo", &args)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::resources::test_helpers::MockExecutor;

    #[test]
    fn installed_packages_keeps_only_installed_status() {
        let executor = MockExecutor::ok("installed git\nconfig-files sassc\ninstalled gnome-tweaks\n");
        let set = installed_packages(&executor).unwrap();
        assert!(set.contains("git"));
        assert!(set.contains("gnome-tweaks"));
        assert!(!set.contains("sassc"));
    }

    #[test]
    fn installed_packages_empty_on_query_failure() {
        let executor = MockExecutor::fail();
        assert!(installed_packages(&executor).unwrap().is_empty());
    }

    #[test]
    fn missing_preserves_configured_order() {
        let names = vec!["sassc".to_string(), "git".to_string(), "fonts-inter".to_string()];
        let executor = MockExecutor::ok("installed git\n");
        let missing = PackageSet::new(&names, &executor).missing().unwrap();
        assert_eq!(missing, vec!["sassc", "fonts-inter"]);
    }

    #[test]
    fn install_issues_single_call() {
        let names = vec!["sassc".to_string(), "git".to_string()];
        let executor = MockExecutor::ok("");
        PackageSet::new(&names, &executor).install(&names).unwrap();
        assert_eq!(executor.calls(), vec!["sudo apt-get install -y sassc git"]);
    }

    #[test]
    fn install_failure_propagates() {
        let names = vec!["sassc".to_string()];
        let executor = MockExecutor::fail();
        assert!(PackageSet::new(&names, &executor).install(&names).is_err());
    }
}
