//! Stroke and line-style definitions.
//!
//! Exported types:
//! - [`StrokeDefinition`]: color, width and style of a line or border
//! - [`StrokeStyle`]: line pattern (solid or dashed)
//!
//! Terminology follows SVG/CSS so adapters can map each property to a single
//! attribute.

use crate::color::Color;

/// Defines the visual style of a stroke, including dash patterns.
///
/// | Variant | dasharray |
/// |---------|-----------|
/// | `Solid` | none |
/// | `Dashed` | `5,5` |
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
}

impl StrokeStyle {
    /// Returns the dasharray value for this style, or None for solid lines
    pub fn dasharray(&self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5"),
        }
    }
}

/// A stroke definition for rendering lines and borders.
///
/// # Examples
///
/// ```
/// use stackmap_core::scene::{StrokeDefinition, StrokeStyle};
/// use stackmap_core::color::Color;
///
/// let border = StrokeDefinition::dashed(Color::new("#666").unwrap(), 2.0);
/// assert_eq!(border.style(), StrokeStyle::Dashed);
/// assert_eq!(border.width(), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
}

impl StrokeDefinition {
    /// Creates a new solid stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
        }
    }

    /// Creates a solid stroke.
    pub fn solid(color: Color, width: f32) -> Self {
        Self::new(color, width)
    }

    /// Creates a dashed stroke.
    pub fn dashed(color: Color, width: f32) -> Self {
        Self {
            style: StrokeStyle::Dashed,
            ..Self::new(color, width)
        }
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Returns the stroke style.
    pub fn style(&self) -> StrokeStyle {
        self.style
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}
