//! Display settings owned by an editing session.
//!
//! The scale factor and the geometry tuning values are carried explicitly in
//! [`DisplaySettings`] and passed into every call that needs them.

use crate::constants;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Pixels-per-meter must be a finite, positive number
    #[error("Invalid scale factor: {0} px/m")]
    InvalidScale(f32),

    /// A geometry setting is negative or not a finite number
    #[error("Invalid value for {name}: {value}")]
    InvalidSetting {
        /// Field that failed validation
        name: &'static str,
        /// Rejected value
        value: f32,
    },

    /// IO error while reading a settings file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON
    #[error("Deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Conversion rate between diagram pixels and real-world meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct ScaleFactor(f32);

impl ScaleFactor {
    /// Creates a scale factor, rejecting zero, negative and non-finite values.
    pub fn new(px_per_meter: f32) -> Result<Self, ConfigError> {
        if px_per_meter.is_finite() && px_per_meter > 0.0 {
            Ok(Self(px_per_meter))
        } else {
            Err(ConfigError::InvalidScale(px_per_meter))
        }
    }

    /// Pixels per meter.
    pub fn px_per_meter(self) -> f32 {
        self.0
    }
}

impl Default for ScaleFactor {
    fn default() -> Self {
        Self(constants::DEFAULT_PX_PER_METER)
    }
}

impl TryFrom<f32> for ScaleFactor {
    type Error = ConfigError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ScaleFactor> for f32 {
    fn from(scale: ScaleFactor) -> Self {
        scale.0
    }
}

/// Settings that shape how measurements are computed and labelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Pixels per meter used for axis-snapped labels
    pub px_per_meter: ScaleFactor,
    /// Perpendicular offset an anchor must exceed before a connector is drawn (finite, >= 0)
    pub connector_threshold: f32,
    /// How far dimension lines are pushed off the node-to-node axis.
    ///
    /// Any finite value; a negative distance puts the line on the opposite side.
    pub offset_distance: f32,
    /// Arrowhead length for dimension lines (finite, >= 0)
    pub arrow_size: f32,
    /// Whether connector stubs are drawn at all for axis-snapped measurements
    pub show_connectors: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            px_per_meter: ScaleFactor::default(),
            connector_threshold: constants::CONNECTOR_THRESHOLD,
            offset_distance: constants::DIMENSION_OFFSET_DISTANCE,
            arrow_size: constants::ARROW_SIZE,
            show_connectors: true,
        }
    }
}

impl DisplaySettings {
    /// Deserialize settings from a JSON string; missing fields keep their defaults.
    ///
    /// Out-of-range values are reported as [`ConfigError::InvalidScale`] or
    /// [`ConfigError::InvalidSetting`] rather than as JSON errors.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        // Check the scale before serde folds its rejection into a JSON error
        if let Some(raw) = value.get("px_per_meter").and_then(serde_json::Value::as_f64) {
            ScaleFactor::new(raw as f32)?;
        }
        let settings: Self = serde_json::from_value(value)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Checks the geometry values that the type system does not constrain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("connector_threshold", self.connector_threshold, true),
            ("offset_distance", self.offset_distance, false),
            ("arrow_size", self.arrow_size, true),
        ];
        for (name, value, non_negative) in checks {
            if !value.is_finite() || (non_negative && value < 0.0) {
                return Err(ConfigError::InvalidSetting { name, value });
            }
        }
        Ok(())
    }

    /// Serialize settings to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&content)?;
        log::debug!(
            "Loaded display settings from {} ({} px/m)",
            path.as_ref().display(),
            settings.px_per_meter.px_per_meter()
        );
        Ok(settings)
    }

    /// Replaces the scale factor after validating it.
    pub fn set_px_per_meter(&mut self, px_per_meter: f32) -> Result<(), ConfigError> {
        self.px_per_meter = ScaleFactor::new(px_per_meter)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = DisplaySettings::default();
        assert_eq!(settings.px_per_meter.px_per_meter(), 50.0);
        assert_eq!(settings.connector_threshold, 20.0);
        assert_eq!(settings.offset_distance, 80.0);
        assert_eq!(settings.arrow_size, 12.0);
        assert!(settings.show_connectors);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = DisplaySettings::from_json(r#"{"px_per_meter": 25.0}"#).unwrap();

        assert_eq!(settings.px_per_meter.px_per_meter(), 25.0);
        assert_eq!(settings.offset_distance, 80.0);
    }

    #[test]
    fn test_invalid_scale_rejected() {
        assert!(matches!(
            ScaleFactor::new(0.0),
            Err(ConfigError::InvalidScale(v)) if v == 0.0
        ));
        assert!(ScaleFactor::new(-3.0).is_err());
        assert!(ScaleFactor::new(f32::NAN).is_err());
        assert!(ScaleFactor::new(f32::INFINITY).is_err());

        let result = DisplaySettings::from_json(r#"{"px_per_meter": -1.0}"#);
        assert!(matches!(result, Err(ConfigError::InvalidScale(v)) if v == -1.0));

        let result = DisplaySettings::from_json(r#"{"px_per_meter": 0.0}"#);
        assert!(matches!(result, Err(ConfigError::InvalidScale(v)) if v == 0.0));
    }

    #[test]
    fn test_malformed_json_is_a_json_error() {
        let result = DisplaySettings::from_json(r#"{"px_per_meter": "fifty"}"#);
        assert!(matches!(result, Err(ConfigError::Json(_))));

        assert!(matches!(
            DisplaySettings::from_json("{"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_negative_geometry_settings_rejected() {
        let result = DisplaySettings::from_json(r#"{"arrow_size": -12.0}"#);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidSetting { name: "arrow_size", .. })
        ));

        let result = DisplaySettings::from_json(r#"{"connector_threshold": -1.0}"#);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidSetting { name: "connector_threshold", .. })
        ));

        // A negative offset only flips the side the dimension line sits on
        let settings = DisplaySettings::from_json(r#"{"offset_distance": -80.0}"#).unwrap();
        assert_eq!(settings.offset_distance, -80.0);

        let mut settings = DisplaySettings::default();
        settings.offset_distance = f32::NAN;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidSetting { name: "offset_distance", .. })
        ));
    }

    #[test]
    fn test_set_px_per_meter() {
        let mut settings = DisplaySettings::default();

        settings.set_px_per_meter(100.0).unwrap();
        assert_eq!(settings.px_per_meter.px_per_meter(), 100.0);

        assert!(settings.set_px_per_meter(0.0).is_err());
        assert_eq!(settings.px_per_meter.px_per_meter(), 100.0);
    }

    #[test]
    fn test_settings_roundtrip() {
        let mut settings = DisplaySettings::default();
        settings.show_connectors = false;
        settings.set_px_per_meter(40.0).unwrap();

        let json = settings.to_json().unwrap();
        assert!(json.contains("40.0"));
        assert_eq!(DisplaySettings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_load_missing_file() {
        let result = DisplaySettings::load("/nonexistent/stage-measure/settings.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
