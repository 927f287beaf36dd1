//! Board configuration with defaults, JSON loading, and validation.
//!
//! Every field has a default, so `{}` is a valid config. `from_json` parses
//! and validates in one step; `validate` can be called on a config built in
//! code.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{DEFAULT_COORDINATE_GRID, MIN_RECT_SIZE};
use crate::error::ConfigError;
use crate::plugins::canvas_rotate::Shortcut;

/// What `rotate` turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotateTarget {
    /// Re-angle and re-fit the background image; the viewport stays put.
    #[default]
    Image,
    /// Rotate the whole viewport about the canvas center.
    Viewport,
}

/// Style applied to shapes created without explicit colors.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShapeDefaults {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub min_rect_size: f64,
}

impl Default for ShapeDefaults {
    fn default() -> Self {
        Self {
            fill: "rgba(255, 0, 0, 0.5)".into(),
            stroke: "red".into(),
            stroke_width: 2.0,
            min_rect_size: MIN_RECT_SIZE,
        }
    }
}

/// Look of vertex handles, in screen pixels at any zoom.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VertexStyle {
    pub radius: f64,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub hover_fill: String,
    pub hover_stroke: String,
}

impl Default for VertexStyle {
    fn default() -> Self {
        Self {
            radius: 7.0,
            fill: "red".into(),
            stroke: "darkred".into(),
            stroke_width: 2.0,
            hover_fill: "orange".into(),
            hover_stroke: "darkorange".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct WheelZoomOptions {
    /// Fractional zoom change per wheel unit.
    pub step: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for WheelZoomOptions {
    fn default() -> Self {
        Self { step: 0.01, min_zoom: 0.1, max_zoom: 15.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RotateOptions {
    /// Shortcut such as `"r"` or `"Shift+R"`.
    pub shortcut: String,
    /// Degrees per key press.
    pub step: f64,
    pub target: RotateTarget,
}

impl Default for RotateOptions {
    fn default() -> Self {
        Self { shortcut: "r".into(), step: 90.0, target: RotateTarget::Image }
    }
}

/// Top-level board configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Canvas width in CSS pixels.
    pub width: f64,
    /// Canvas height in CSS pixels.
    pub height: f64,
    /// Granularity every committed shape coordinate snaps to.
    pub coordinate_grid: f64,
    pub shapes: ShapeDefaults,
    pub vertex: VertexStyle,
    pub wheel: WheelZoomOptions,
    pub rotate: RotateOptions,
    /// Register wheel zoom, canvas drag, and rotate shortcut on construction.
    pub default_plugins: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
            coordinate_grid: DEFAULT_COORDINATE_GRID,
            shapes: ShapeDefaults::default(),
            vertex: VertexStyle::default(),
            wheel: WheelZoomOptions::default(),
            rotate: RotateOptions::default(),
            default_plugins: true,
        }
    }
}

impl BoardConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or the first
    /// validation failure from [`BoardConfig::validate`].
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(is_positive(self.width) && is_positive(self.height)) {
            return Err(ConfigError::InvalidSize { width: self.width, height: self.height });
        }
        if !is_positive(self.coordinate_grid) {
            return Err(ConfigError::InvalidGrid(self.coordinate_grid));
        }
        let WheelZoomOptions { min_zoom, max_zoom, .. } = self.wheel;
        if !is_positive(min_zoom) || max_zoom < min_zoom {
            return Err(ConfigError::InvalidZoomRange { min: min_zoom, max: max_zoom });
        }
        Shortcut::parse(&self.rotate.shortcut)?;
        Ok(())
    }
}

/// Finite and strictly greater than zero. NaN is not positive.
pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
