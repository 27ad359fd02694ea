//! Settings for alchemy-rs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The complete set of settings.
///
/// # Examples
///
/// ```
/// use alchemy_rs_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.default_backend, "postgresql");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether debug mode is enabled. Selects the pretty log format.
    pub debug: bool,
    /// The log level filter (e.g. "info", "alchemy_rs_orm=trace").
    pub log_level: String,
    /// The SQL dialect used when none is given explicitly
    /// ("postgresql", "sqlite" or "mysql").
    pub default_backend: String,
    /// Custom settings that don't fit into the above categories.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            default_backend: "postgresql".to_string(),
            extra: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert!(s.debug);
        assert_eq!(s.log_level, "info");
        assert_eq!(s.default_backend, "postgresql");
        assert!(s.extra.is_empty());
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let s: Settings = serde_json::from_value(serde_json::json!({"debug": false})).unwrap();
        assert!(!s.debug);
        assert_eq!(s.log_level, "info");
        assert_eq!(s.default_backend, "postgresql");
    }
}
