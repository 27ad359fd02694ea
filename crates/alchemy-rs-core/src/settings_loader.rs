//! Settings loading from configuration files and the environment.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! | Env Var | Setting |
//! |---|---|
//! | `ALCHEMY_DEBUG` | `debug` |
//! | `ALCHEMY_LOG_LEVEL` | `log_level` |
//! | `ALCHEMY_DEFAULT_BACKEND` | `default_backend` |

use std::path::Path;

use crate::error::OrmError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Keys missing from the TOML keep their default values.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or a key has the wrong type.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, OrmError> {
    toml::from_str(toml_str)
        .map_err(|e| OrmError::ConfigurationError(format!("Failed to load settings TOML: {e}")))
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, OrmError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        OrmError::ConfigurationError(format!(
            "Failed to read TOML file '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    from_toml_str(&content)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies `ALCHEMY_*` environment variable overrides to a settings struct.
pub fn apply_env_overrides(settings: &mut Settings) {
    apply_overrides(settings, |key| std::env::var(key).ok());
}

/// Applies `ALCHEMY_*` overrides read through `lookup`.
pub fn apply_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(val) = lookup("ALCHEMY_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Some(val) = lookup("ALCHEMY_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Some(val) = lookup("ALCHEMY_DEFAULT_BACKEND") {
        settings.default_backend = val.to_lowercase();
    }
}
