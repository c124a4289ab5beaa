//! Fallback-terminated resource candidate lists.
use crate::error::ConfigError;

use super::profile::ThemeCandidates;

/// Ordered resource names considered in priority order.
///
/// The last element is the fallback: a resource every stock installation
/// ships, so selection always terminates with a name.  Construction rejects
/// an empty list.
///
/// # Examples
///
/// ```
/// use macify_cli::config::themes::ResourceCandidateList;
///
/// let list = ResourceCandidateList::new("icon set", vec!["WhiteSur".into(), "Adwaita".into()]).unwrap();
/// assert_eq!(list.fallback(), "Adwaita");
/// assert!(ResourceCandidateList::new("icon set", vec![]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceCandidateList {
    names: Vec<String>,
    fallback: String,
}

impl ResourceCandidateList {
    /// Build a list; `what` names the category in the error message.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCandidates`] if `names` is empty.
    pub fn new(what: &str, names: Vec<String>) -> Result<Self, ConfigError> {
        let fallback = names
            .last()
            .cloned()
            .ok_or_else(|| ConfigError::EmptyCandidates(what.to_string()))?;
        Ok(Self { names, fallback })
    }

    /// All candidates in priority order, fallback last.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// The guaranteed-present final candidate.
    #[must_use]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }
}

/// Candidate lists for every themed resource category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSelection {
    /// GTK application theme.
    pub gtk: ResourceCandidateList,
    /// Shell theme.
    pub shell: ResourceCandidateList,
    /// Icon set.
    pub icons: ResourceCandidateList,
    /// Cursor set.
    pub cursor: ResourceCandidateList,
}

impl ThemeSelection {
    /// Validate the raw candidates from the profile.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyCandidates`] for the first empty list.
    pub fn from_candidates(raw: &ThemeCandidates) -> Result<Self, ConfigError> {
        Ok(Self {
            gtk: ResourceCandidateList::new("GTK theme", raw.gtk.clone())?,
            shell: ResourceCandidateList::new("shell theme", raw.shell.clone())?,
            icons: ResourceCandidateList::new("icon set", raw.icons.clone())?,
            cursor: ResourceCandidateList::new("cursor set", raw.cursor.clone())?,
        })
    }
}
