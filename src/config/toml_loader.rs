//! TOML profile loading.
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::ConfigError;

/// The profile compiled into the binary.
pub const EMBEDDED_PROFILE: &str = include_str!("../../conf/macify.toml");

/// Parse TOML text, labelling errors with `origin`.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidSyntax`] if the text does not parse into `T`.
pub fn parse<T: DeserializeOwned>(content: &str, origin: &str) -> Result<T, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::InvalidSyntax {
        file: origin.to_string(),
        message: e.message().to_string(),
    })
}

/// Load a TOML file from `path`, or the embedded profile when `path` is `None`.
///
/// An explicitly named file must exist; there is no silent fallback to the
/// embedded profile.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config<T: DeserializeOwned>(path: Option<&Path>) -> Result<T, ConfigError> {
    let Some(path) = path else {
        return parse(EMBEDDED_PROFILE, "<embedded>");
    };
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse(&content, &path.display().to_string())
}
