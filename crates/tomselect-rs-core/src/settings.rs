//! Package-level settings and configuration file loading.
//!
//! [`Settings`] carries the handful of process-wide knobs the toolkit needs:
//! debug mode, log level, the default autocomplete page size, and whether
//! the permission cache is enabled. Settings load from a TOML file with
//! environment variable overrides applied last.
//!
//! ## Loading Order
//!
//! 1. Defaults.
//! 2. A TOML file (fields not present keep their defaults).
//! 3. `TOMSELECT_*` environment variables (highest priority).
//!
//! | Env Var | Setting |
//! |---|---|
//! | `TOMSELECT_DEBUG` | `debug` |
//! | `TOMSELECT_LOG_LEVEL` | `log_level` |
//! | `TOMSELECT_DEFAULT_PAGE_SIZE` | `default_page_size` |
//! | `TOMSELECT_PERMISSION_CACHE` | `permission_cache_enabled` |

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{TomSelectError, TomSelectResult};

/// Process-wide settings for the toolkit.
///
/// # Examples
///
/// ```
/// use tomselect_rs_core::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.default_page_size, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether debug mode is enabled. Controls log formatting.
    pub debug: bool,
    /// The log level filter (e.g. "info", "debug", "warn").
    pub log_level: String,
    /// Page size used by views that do not set their own.
    pub default_page_size: u64,
    /// Whether permission check results are memoized.
    pub permission_cache_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            default_page_size: 20,
            permission_cache_enabled: true,
        }
    }
}

impl Settings {
    /// Loads settings from a TOML string.
    ///
    /// Fields not present in the TOML keep their default values.
    ///
    /// # Errors
    ///
    /// Returns [`TomSelectError::ImproperlyConfigured`] if the TOML is
    /// malformed or a field has the wrong type.
    pub fn from_toml_str(toml_str: &str) -> TomSelectResult<Self> {
        toml::from_str(toml_str)
            .map_err(|e| TomSelectError::ImproperlyConfigured(format!("invalid settings TOML: {e}")))
    }

    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be read, or
    /// [`TomSelectError::ImproperlyConfigured`] if it cannot be parsed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> TomSelectResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Applies `TOMSELECT_*` environment variable overrides to this settings
    /// value and returns the result.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(debug) = std::env::var("TOMSELECT_DEBUG") {
            self.debug = matches!(debug.as_str(), "1" | "true" | "yes");
        }
        if let Ok(level) = std::env::var("TOMSELECT_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Ok(size) = std::env::var("TOMSELECT_DEFAULT_PAGE_SIZE") {
            if let Ok(parsed) = size.parse() {
                self.default_page_size = parsed;
            }
        }
        if let Ok(cache) = std::env::var("TOMSELECT_PERMISSION_CACHE") {
            self.permission_cache_enabled = matches!(cache.as_str(), "1" | "true" | "yes");
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.debug);
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.default_page_size, 20);
        assert!(settings.permission_cache_enabled);
    }

    #[test]
    fn test_from_toml_str() {
        let settings = Settings::from_toml_str(
            r#"
            debug = false
            log_level = "warn"
            default_page_size = 50
            "#,
        )
        .unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.default_page_size, 50);
        // Not in the TOML, keeps its default.
        assert!(settings.permission_cache_enabled);
    }

    #[test]
    fn test_from_toml_str_empty_uses_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_from_toml_str_malformed() {
        let result = Settings::from_toml_str("debug = ");
        assert!(matches!(
            result,
            Err(TomSelectError::ImproperlyConfigured(_))
        ));
    }

    #[test]
    fn test_from_toml_str_wrong_type() {
        let result = Settings::from_toml_str("default_page_size = \"lots\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_toml_file_missing() {
        let result = Settings::from_toml_file("/nonexistent/settings.toml");
        assert!(matches!(result, Err(TomSelectError::IoError(_))));
    }

    #[test]
    fn test_roundtrip_serialization() {
        let settings = Settings {
            debug: false,
            log_level: "debug".to_string(),
            default_page_size: 10,
            permission_cache_enabled: false,
        };
        let toml_str = toml::to_string(&settings).unwrap();
        let parsed = Settings::from_toml_str(&toml_str).unwrap();
        assert_eq!(parsed, settings);
    }
}
