//! Sort configuration via `scave.toml`
//!
//! All fields have defaults, so an empty or missing file is a valid
//! configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use scave_core::{Error, Result};

/// Config file name looked up by embedding applications.
pub const CONFIG_FILE_NAME: &str = "scave.toml";

/// Sort configuration loaded from `scave.toml`.
///
/// # Example
///
/// ```toml
/// # Reverse lists sorted the other way round before sorting
/// reverse_presorted = true
///
/// # Log sorts slower than this at warn level
/// slow_sort_threshold_ms = 250
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    /// Reverse the list first when its ends are in the opposite order.
    #[serde(default = "default_reverse_presorted")]
    pub reverse_presorted: bool,
    /// Sorts taking longer than this many milliseconds are logged as slow.
    #[serde(default = "default_slow_sort_threshold_ms")]
    pub slow_sort_threshold_ms: u64,
}

fn default_reverse_presorted() -> bool {
    true
}

fn default_slow_sort_threshold_ms() -> u64 {
    250
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            reverse_presorted: default_reverse_presorted(),
            slow_sort_threshold_ms: default_slow_sort_threshold_ms(),
        }
    }
}

impl SortConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Scave sort configuration
#
# Reverse a list whose first element sorts after its last before sorting.
# Turns reverse-sorted input into an O(n) pass. Disable only for debugging.
reverse_presorted = true

# Sorts slower than this (milliseconds) are logged at warn level.
slow_sort_threshold_ms = 250
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml())?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = SortConfig::default();
        assert!(config.reverse_presorted);
        assert_eq!(config.slow_sort_threshold_ms, 250);
    }

    #[test]
    fn default_toml_parses_correctly() {
        let config: SortConfig = toml::from_str(SortConfig::default_toml()).unwrap();
        assert_eq!(config, SortConfig::default());
    }

    #[test]
    fn parse_partial() {
        let config: SortConfig = toml::from_str("reverse_presorted = false").unwrap();
        assert!(!config.reverse_presorted);
        assert_eq!(config.slow_sort_threshold_ms, 250);
    }

    #[test]
    fn parse_invalid_type_returns_error() {
        let result: std::result::Result<SortConfig, _> =
            toml::from_str("slow_sort_threshold_ms = \"fast\"");
        assert!(result.is_err());
    }

    #[test]
    fn write_default_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        assert!(!path.exists());

        SortConfig::write_default_if_missing(&path).unwrap();
        assert!(path.exists());

        let config = SortConfig::from_file(&path).unwrap();
        assert_eq!(config, SortConfig::default());
    }

    #[test]
    fn write_default_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        std::fs::write(&path, "reverse_presorted = false\n").unwrap();
        SortConfig::write_default_if_missing(&path).unwrap();

        let config = SortConfig::from_file(&path).unwrap();
        assert!(!config.reverse_presorted);
    }

    #[test]
    fn from_file_empty_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "").unwrap();

        let config = SortConfig::from_file(&path).unwrap();
        assert_eq!(config, SortConfig::default());
    }

    #[test]
    fn from_file_missing_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(SortConfig::from_file(&path), Err(Error::Io(_))));
    }

    #[test]
    fn from_file_malformed_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "reverse_presorted = = true").unwrap();
        assert!(matches!(SortConfig::from_file(&path), Err(Error::Config(_))));
    }

    #[test]
    fn write_to_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let config = SortConfig {
            reverse_presorted: false,
            slow_sort_threshold_ms: 10,
        };
        config.write_to_file(&path).unwrap();
        assert_eq!(SortConfig::from_file(&path).unwrap(), config);
    }
}
