//! First-available selection over fallback-terminated candidate lists.
use std::fmt;

use crate::config::themes::ResourceCandidateList;
use crate::probe::{Capabilities, SearchCategory};

/// Directory-backed visual resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceCategory {
    /// GTK application theme.
    GtkTheme,
    /// Shell theme.
    ShellTheme,
    /// Icon set.
    IconSet,
    /// Cursor set.
    CursorSet,
}

impl ResourceCategory {
    /// Filesystem search roots used to locate this kind.
    #[must_use]
    pub const fn search_category(self) -> SearchCategory {
        match self {
            Self::GtkTheme | Self::ShellTheme => SearchCategory::Theme,
            Self::IconSet | Self::CursorSet => SearchCategory::Icon,
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::GtkTheme => "GTK theme",
            Self::ShellTheme => "shell theme",
            Self::IconSet => "icon set",
            Self::CursorSet => "cursor set",
        })
    }
}

/// Return the first candidate whose directory exists, else the fallback.
///
/// A probe error counts as "absent" for that candidate.  The result is never
/// empty because [`ResourceCandidateList`] cannot be built empty.
#[must_use]
pub fn select(
    probe: &dyn Capabilities,
    category: ResourceCategory,
    candidates: &ResourceCandidateList,
) -> String {
    candidates
        .iter()
        .find(|name| {
            probe
                .has_directory(category.search_category(), name)
                .unwrap_or(false)
        })
        .unwrap_or_else(|| candidates.fallback())
        .to_string()
}
