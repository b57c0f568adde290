//! Loading [`TrackerConfig`] from TOML files.
//!
//! ```toml
//! max_disappeared = 30
//! dist_thresh = 75.0
//! ```
//!
//! Missing keys keep their defaults (`max_disappeared = 50`, `dist_thresh = 50.0`).

use std::path::Path;

use crate::error::TrackingError;
use crate::tracker::TrackerConfig;

impl TrackerConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, TrackingError> {
        let config: TrackerConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::Io`] if the file cannot be read,
    /// [`TrackingError::ConfigParse`] if the TOML is malformed and
    /// [`TrackingError::InvalidConfig`] if a value is out of range.
    pub fn from_toml_file(path: &Path) -> Result<Self, TrackingError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = TrackerConfig::from_toml_str("dist_thresh = 12.5\n").unwrap();
        assert_eq!(config.max_disappeared, 50);
        assert_eq!(config.dist_thresh, 12.5);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(TrackerConfig::from_toml_str("").unwrap(), TrackerConfig::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = TrackerConfig::from_toml_str("max_missing = 3\n").unwrap_err();
        assert!(matches!(err, TrackingError::ConfigParse(_)));
    }

    #[test]
    fn test_negative_max_disappeared_is_rejected() {
        let err = TrackerConfig::from_toml_str("max_disappeared = -1\n").unwrap_err();
        assert!(matches!(err, TrackingError::ConfigParse(_)));
    }

    #[test]
    fn test_negative_threshold_is_rejected() {
        let err = TrackerConfig::from_toml_str("dist_thresh = -4.0\n").unwrap_err();
        assert!(matches!(err, TrackingError::InvalidConfig(_)));
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("tracker.toml");
        std::fs::write(&path, "max_disappeared = 3\ndist_thresh = 20.0\n").unwrap();

        let config = TrackerConfig::from_toml_file(&path).unwrap();
        assert_eq!(config, TrackerConfig::new(3, 20.0));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let tmp = tempdir().unwrap();
        let err = TrackerConfig::from_toml_file(&tmp.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, TrackingError::Io(_)));
    }
}
