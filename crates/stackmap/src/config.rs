//! Configuration types for stackmap diagram rendering.
//!
//! This module provides configuration structures that control how diagrams
//! are laid out and styled. All types implement [`serde::Deserialize`] for
//! loading from external sources; every field has a default, so a partial
//! configuration file only overrides what it names.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining layout and style settings.
//! - [`LayoutConfig`] - Node sizes, spacing, placement and connector curvature.
//! - [`CurveConfig`] - Control point lift and jitter of curved connectors.
//! - [`StyleConfig`] - Background color and the icon/color [`Theme`].
//!
//! # Example
//!
//! ```
//! # use stackmap::config::AppConfig;
//! // Use default configuration
//! let config = AppConfig::default();
//! assert!(config.style().background_color().is_ok());
//! assert!(config.validate().is_ok());
//! ```

use serde::Deserialize;

use stackmap_core::{color::Color, geometry::Size};

use crate::{error::StackmapError, theme::Theme};

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Checks values that deserialize fine but cannot be laid out.
    ///
    /// # Errors
    ///
    /// Returns [`StackmapError::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<(), StackmapError> {
        self.layout.validate()?;
        self.style
            .background_color()
            .map_err(StackmapError::Config)?;
        Ok(())
    }
}

/// What happens when two nodes of a diagram share an id.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateIdPolicy {
    /// Keep the first node, drop later ones with a warning.
    #[default]
    FirstWins,
    /// Fail the render.
    Reject,
}

/// How nodes without an explicit position are placed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementKind {
    /// One column per layer, items stacked downwards.
    #[default]
    Layered,
    /// Row-major grid with `grid_columns` columns.
    Grid,
}

/// Curvature of quadratic connectors.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    /// Upward offset of the control point from the midpoint.
    lift: f32,
    /// Width of the horizontal jitter range, centered on the midpoint.
    jitter: f32,
    /// Seed for reproducible jitter; unseeded jitter varies between runs.
    seed: Option<u64>,
}

impl CurveConfig {
    pub fn new(lift: f32, jitter: f32) -> Self {
        Self {
            lift,
            jitter,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn lift(&self) -> f32 {
        self.lift
    }

    pub fn jitter(&self) -> f32 {
        self.jitter
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            lift: 50.0,
            jitter: 100.0,
            seed: None,
        }
    }
}

/// Layout configuration shared by all renderers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    node_width: f32,
    node_height: f32,
    /// Gap between adjacent columns.
    horizontal_spacing: f32,
    /// Gap between adjacent rows.
    vertical_spacing: f32,
    grid_columns: usize,
    /// Margin around the diagram content.
    padding: f32,
    placement: PlacementKind,
    curve: CurveConfig,
    duplicate_ids: DuplicateIdPolicy,
}

impl LayoutConfig {
    pub fn with_curve(mut self, curve: CurveConfig) -> Self {
        self.curve = curve;
        self
    }

    pub fn with_duplicate_ids(mut self, policy: DuplicateIdPolicy) -> Self {
        self.duplicate_ids = policy;
        self
    }

    pub fn with_placement(mut self, placement: PlacementKind) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_grid_columns(mut self, columns: usize) -> Self {
        self.grid_columns = columns;
        self
    }

    /// Default size of a node card.
    pub fn node_size(&self) -> Size {
        Size::new(self.node_width, self.node_height)
    }

    pub fn horizontal_spacing(&self) -> f32 {
        self.horizontal_spacing
    }

    pub fn vertical_spacing(&self) -> f32 {
        self.vertical_spacing
    }

    pub fn grid_columns(&self) -> usize {
        self.grid_columns
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn placement(&self) -> PlacementKind {
        self.placement
    }

    pub fn curve(&self) -> &CurveConfig {
        &self.curve
    }

    pub fn duplicate_ids(&self) -> DuplicateIdPolicy {
        self.duplicate_ids
    }

    fn validate(&self) -> Result<(), StackmapError> {
        for (name, value) in [
            ("node_width", self.node_width),
            ("node_height", self.node_height),
            ("horizontal_spacing", self.horizontal_spacing),
            ("vertical_spacing", self.vertical_spacing),
            ("padding", self.padding),
            ("curve lift", self.curve.lift),
            ("curve jitter", self.curve.jitter),
        ] {
            if !value.is_finite() {
                return Err(StackmapError::Config(format!(
                    "{name} must be a finite number, got {value}"
                )));
            }
        }
        if self.node_width <= 0.0 || self.node_height <= 0.0 {
            return Err(StackmapError::Config(format!(
                "node size must be positive, got {}x{}",
                self.node_width, self.node_height
            )));
        }
        if self.grid_columns == 0 {
            return Err(StackmapError::Config(
                "grid_columns must be at least 1".to_string(),
            ));
        }
        for (name, value) in [
            ("horizontal_spacing", self.horizontal_spacing),
            ("vertical_spacing", self.vertical_spacing),
            ("padding", self.padding),
            ("curve jitter", self.curve.jitter),
        ] {
            if value < 0.0 {
                return Err(StackmapError::Config(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_width: 160.0,
            node_height: 90.0,
            horizontal_spacing: 60.0,
            vertical_spacing: 40.0,
            grid_columns: 4,
            padding: 40.0,
            placement: PlacementKind::default(),
            curve: CurveConfig::default(),
            duplicate_ids: DuplicateIdPolicy::default(),
        }
    }
}

/// Visual styling configuration for rendered diagrams.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] for diagrams, as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Icon and color tables.
    #[serde(default)]
    theme: Theme,
}

impl StyleConfig {
    pub fn with_background_color(mut self, color: &str) -> Self {
        self.background_color = Some(color.to_string());
        self
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        let layout = config.layout();
        assert_eq!(layout.node_size(), Size::new(160.0, 90.0));
        assert_eq!(layout.grid_columns(), 4);
        assert_eq!(layout.curve().lift(), 50.0);
        assert_eq!(layout.curve().jitter(), 100.0);
        assert_eq!(layout.curve().seed(), None);
        assert_eq!(layout.duplicate_ids(), DuplicateIdPolicy::FirstWins);
        assert_eq!(layout.placement(), PlacementKind::Layered);
        assert!(config.style().background_color().unwrap().is_none());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = AppConfig::new(
            LayoutConfig::default().with_grid_columns(0),
            StyleConfig::default(),
        );
        assert!(matches!(config.validate(), Err(StackmapError::Config(_))));

        let config = AppConfig::new(
            LayoutConfig::default().with_curve(CurveConfig::new(50.0, -1.0)),
            StyleConfig::default(),
        );
        assert!(config.validate().is_err());

        let config = AppConfig::new(
            LayoutConfig::default(),
            StyleConfig::default().with_background_color("not a color"),
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite_values() {
        for curve in [
            CurveConfig::new(50.0, f32::INFINITY),
            CurveConfig::new(50.0, f32::NAN),
            CurveConfig::new(f32::NEG_INFINITY, 100.0),
        ] {
            let config = AppConfig::new(
                LayoutConfig::default().with_curve(curve),
                StyleConfig::default(),
            );
            assert!(matches!(config.validate(), Err(StackmapError::Config(_))));
        }

        let layout: LayoutConfig = serde_json::from_str(r#"{"padding": 1e39}"#).unwrap();
        assert!(!layout.padding().is_finite());
        let config = AppConfig::new(layout, StyleConfig::default());
        assert!(matches!(config.validate(), Err(StackmapError::Config(_))));
    }

    #[test]
    fn test_background_color() {
        let style = StyleConfig::default().with_background_color("#f8f9ff");
        assert!(style.background_color().unwrap().is_some());
    }
}
