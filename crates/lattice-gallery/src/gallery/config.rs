//! Gallery configuration.
//!
//! [`GalleryConfig`] holds the host-tunable settings of a gallery. It can be
//! built in code or loaded from TOML; every field has a default, so a
//! configuration file only needs to name what it changes:
//!
//! ```toml
//! value_path = "name"
//! synchronized_with_current_item = true
//! all_filter_label = "Everything"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::GalleryResult;

/// Settings for a [`Gallery`](super::Gallery).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Path used to derive an item's value. `None` makes each item its own
    /// value; an empty path resolves markup items to their text content.
    pub value_path: Option<String>,
    /// Whether selection is kept in step with the current-item cursors.
    pub synchronized_with_current_item: bool,
    /// Display label of the "show all" filter.
    pub all_filter_label: String,
    /// Whether a user selection executes the gallery command.
    pub execute_command_on_select: bool,
    /// Whether a highlight schedules a command preview.
    pub preview_on_highlight: bool,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            value_path: None,
            synchronized_with_current_item: false,
            all_filter_label: "All".to_string(),
            execute_command_on_select: true,
            preview_on_highlight: true,
        }
    }
}

impl GalleryConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> GalleryResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> GalleryResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Sets the value path using builder pattern.
    pub fn with_value_path(mut self, path: impl Into<String>) -> Self {
        self.value_path = Some(path.into());
        self
    }

    /// Enables or disables currency synchronization using builder pattern.
    pub fn with_synchronization(mut self, enabled: bool) -> Self {
        self.synchronized_with_current_item = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::GalleryError;

    #[test]
    fn test_defaults() {
        let config = GalleryConfig::default();
        assert_eq!(config.value_path, None);
        assert!(!config.synchronized_with_current_item);
        assert_eq!(config.all_filter_label, "All");
        assert!(config.execute_command_on_select);
        assert!(config.preview_on_highlight);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GalleryConfig::from_toml_str(
            r#"
            value_path = "name"
            synchronized_with_current_item = true
            "#,
        )
        .unwrap();

        assert_eq!(config.value_path.as_deref(), Some("name"));
        assert!(config.synchronized_with_current_item);
        assert_eq!(config.all_filter_label, "All");
    }

    #[test]
    fn test_empty_value_path_survives_parsing() {
        let config = GalleryConfig::from_toml_str(r#"value_path = """#).unwrap();
        assert_eq!(config.value_path.as_deref(), Some(""));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = GalleryConfig::from_toml_str("synchronized_with_current_item = 3").unwrap_err();
        assert!(matches!(err, GalleryError::Config(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GalleryConfig::load("/nonexistent/gallery.toml").unwrap_err();
        assert!(matches!(err, GalleryError::Io(_)));
    }
}
