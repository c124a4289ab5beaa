//! Desired-state profile: the TOML tables describing what to apply.
use serde::Deserialize;
use std::fmt;

/// A typed preference value as understood by the preference store.
///
/// Deserializes from the natural TOML type: booleans, integers, floats,
/// strings and arrays of strings.
///
/// # Examples
///
/// ```
/// use macify_cli::config::profile::PreferenceValue;
///
/// assert_eq!(PreferenceValue::Bool(true).to_string(), "true");
/// assert_eq!(PreferenceValue::Str("it's".into()).to_string(), r"'it\'s'");
/// assert_eq!(PreferenceValue::StrList(vec![]).to_string(), "@as []");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PreferenceValue {
    /// Boolean (`b`).
    Bool(bool),
    /// Integer (`i`/`u`).
    Int(i64),
    /// Floating point (`d`).
    Double(f64),
    /// String or enum nick (`s`).
    Str(String),
    /// String array (`as`).
    StrList(Vec<String>),
}

/// Render a string as a single-quoted GVariant literal.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// Formats the value in GVariant text syntax, as `gsettings set` expects.
impl fmt::Display for PreferenceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Double(d) => write!(f, "{d:?}"),
            Self::Str(s) => f.write_str(&quote(s)),
            Self::StrList(items) if items.is_empty() => f.write_str("@as []"),
            Self::StrList(items) => {
                let quoted: Vec<String> = items.iter().map(|s| quote(s)).collect();
                write!(f, "[{}]", quoted.join(", "))
            }
        }
    }
}

/// One desired external setting: `schema key = value`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PreferenceAssignment {
    /// Schema id (e.g. `"org.gnome.desktop.interface"`).
    pub schema: String,
    /// Key within the schema.
    pub key: String,
    /// Desired value.
    pub value: PreferenceValue,
    /// Apply without probing schema and key first.
    #[serde(default)]
    pub always: bool,
}

impl PreferenceAssignment {
    /// Create a checked assignment.
    #[must_use]
    pub fn new(schema: &str, key: &str, value: PreferenceValue) -> Self {
        Self {
            schema: schema.to_string(),
            key: key.to_string(),
            value,
            always: false,
        }
    }

    /// Human-readable description (`schema key`).
    #[must_use]
    pub fn target(&self) -> String {
        format!("{} {}", self.schema, self.key)
    }
}

/// Shallow-clone source for one external shell extension.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionSource {
    /// Git URL.
    pub url: String,
    /// Destination; a leading `~/` is resolved against the home directory.
    pub path: String,
}

/// Extension ids to enable and disable, as written in the profile.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtensionLists {
    /// Ids to enable.
    #[serde(default)]
    pub enable: Vec<String>,
    /// Ids to disable.
    #[serde(default)]
    pub disable: Vec<String>,
}

/// Ordered theme candidates for one color scheme.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeCandidates {
    /// GTK application themes.
    pub gtk: Vec<String>,
    /// Shell themes (applied through the user-theme extension).
    pub shell: Vec<String>,
    /// Icon sets.
    pub icons: Vec<String>,
    /// Cursor sets.
    pub cursor: Vec<String>,
}

/// Theme candidates per color scheme.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeProfiles {
    /// Used with the dark color scheme.
    pub dark: ThemeCandidates,
    /// Used with the light color scheme.
    pub light: ThemeCandidates,
}

/// Desktop entry written by the launcher step.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LauncherEntry {
    /// File name under `~/.local/share/applications`.
    pub file_name: String,
    /// `Name=` field.
    pub name: String,
    /// `Comment=` field.
    #[serde(default)]
    pub comment: String,
    /// `Exec=` field.
    pub exec: String,
    /// `Icon=` field; also the base name of the installed icon asset.
    pub icon: String,
}

impl LauncherEntry {
    /// Render the `.desktop` file contents.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("[Desktop Entry]\nType=Application\n");
        out.push_str(&format!("Name={}\n", self.name));
        if !self.comment.is_empty() {
            out.push_str(&format!("Comment={}\n", self.comment));
        }
        out.push_str(&format!("Exec={}\n", self.exec));
        out.push_str(&format!("Icon={}\n", self.icon));
        out.push_str("Terminal=false\nCategories=Utility;\n");
        out
    }
}

/// Preference groups, one per optional tweak step.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingGroups {
    /// Core interface defaults.
    #[serde(default)]
    pub core: Vec<PreferenceAssignment>,
    /// Fonts.
    #[serde(default)]
    pub typography: Vec<PreferenceAssignment>,
    /// File manager preferences.
    #[serde(default)]
    pub file_manager: Vec<PreferenceAssignment>,
    /// Top bar clock, battery and hot corner.
    #[serde(default)]
    pub top_bar: Vec<PreferenceAssignment>,
    /// Touchpad behaviour.
    #[serde(default)]
    pub touchpad: Vec<PreferenceAssignment>,
    /// Keyboard shortcuts.
    #[serde(default)]
    pub shortcuts: Vec<PreferenceAssignment>,
    /// Notification banners.
    #[serde(default)]
    pub notifications: Vec<PreferenceAssignment>,
    /// Dock fine-tuning; values belong to the dock extension's schema.
    #[serde(default)]
    pub dock: Vec<PreferenceAssignment>,
}

/// The complete desired-state profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    /// Packages installed by the package step.
    #[serde(default)]
    pub packages: Vec<String>,
    /// Optional extension fetched from source.
    pub extension_source: Option<ExtensionSource>,
    /// Extension toggles.
    #[serde(default)]
    pub extensions: ExtensionLists,
    /// Theme candidates.
    pub themes: ThemeProfiles,
    /// Launcher desktop entry.
    pub launcher: LauncherEntry,
    /// Preference groups.
    #[serde(default)]
    pub settings: SettingGroups,
}
