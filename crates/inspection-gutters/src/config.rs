//! Gutter naming and default filtering.

use serde::{Deserialize, Serialize};

use crate::error::GutterError;
use crate::filter::FilterOptions;

/// Names the gutter engine uses when talking to the editor widget.
///
/// Every field is optional in serialized form and falls back to [`GutterConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GutterConfig {
    /// Name of the diagnostic gutter column.
    pub gutter_name: String,
    /// Class attached to every marker.
    pub marker_class: String,
    /// Severity class for error markers.
    pub error_class: String,
    /// Severity class for every other marker.
    pub warning_class: String,
    /// Name of the host's line-number gutter; the diagnostic gutter is inserted right before it.
    pub line_number_gutter: String,
    /// Filter used when a producer does not pass one.
    pub default_filter: FilterOptions,
}

impl Default for GutterConfig {
    fn default() -> Self {
        Self {
            gutter_name: "inspection-gutter".to_string(),
            marker_class: "inspection-gutter-marker".to_string(),
            error_class: "inspection-gutter-error".to_string(),
            warning_class: "inspection-gutter-warning".to_string(),
            line_number_gutter: "linenumbers".to_string(),
            default_filter: FilterOptions::ALL,
        }
    }
}

impl GutterConfig {
    /// Parse a config from JSON and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, GutterError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs the engine cannot work with.
    pub fn validate(&self) -> Result<(), GutterError> {
        if self.gutter_name.is_empty() {
            return Err(GutterError::Config(
                "gutter_name must not be empty".to_string(),
            ));
        }
        if self.gutter_name == self.line_number_gutter {
            return Err(GutterError::Config(format!(
                "gutter_name '{}' collides with the line-number gutter",
                self.gutter_name
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::KindFilter;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GutterConfig::from_json_str(
            r#"{"gutter_name":"lint-gutter","default_filter":{"error":true}}"#,
        )
        .unwrap();
        assert_eq!(config.gutter_name, "lint-gutter");
        assert_eq!(config.line_number_gutter, "linenumbers");
        assert_eq!(
            config.default_filter,
            FilterOptions::Kinds(KindFilter::ERRORS_ONLY)
        );
    }

    #[test]
    fn test_rejects_colliding_gutter_name() {
        let err = GutterConfig::from_json_str(r#"{"gutter_name":"linenumbers"}"#).unwrap_err();
        assert!(matches!(err, GutterError::Config(_)));
    }
}
