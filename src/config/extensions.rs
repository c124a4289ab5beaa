//! Disjoint extension enable/disable sets.
use std::collections::BTreeSet;

use crate::error::ConfigError;

/// Two disjoint sets of extension ids.
///
/// # Examples
///
/// ```
/// use macify_cli::config::extensions::ExtensionToggleSet;
///
/// let set = ExtensionToggleSet::new(["a@x".to_string()], ["b@x".to_string()]).unwrap();
/// assert!(set.to_enable().contains("a@x"));
///
/// let overlap = ExtensionToggleSet::new(["a@x".to_string()], ["a@x".to_string()]);
/// assert!(overlap.is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionToggleSet {
    to_enable: BTreeSet<String>,
    to_disable: BTreeSet<String>,
}

impl ExtensionToggleSet {
    /// Build the set, rejecting any id present in both lists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OverlappingExtension`] naming the first shared id.
    pub fn new(
        enable: impl IntoIterator<Item = String>,
        disable: impl IntoIterator<Item = String>,
    ) -> Result<Self, ConfigError> {
        let to_enable: BTreeSet<String> = enable.into_iter().collect();
        let to_disable: BTreeSet<String> = disable.into_iter().collect();
        if let Some(shared) = to_enable.intersection(&to_disable).next() {
            return Err(ConfigError::OverlappingExtension(shared.clone()));
        }
        Ok(Self {
            to_enable,
            to_disable,
        })
    }

    /// Ids to enable.
    #[must_use]
    pub const fn to_enable(&self) -> &BTreeSet<String> {
        &self.to_enable
    }

    /// Ids to disable.
    #[must_use]
    pub const fn to_disable(&self) -> &BTreeSet<String> {
        &self.to_disable
    }

    /// `true` when there is nothing to toggle.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_enable.is_empty() && self.to_disable.is_empty()
    }
}
