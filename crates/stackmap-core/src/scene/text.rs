//! Text styling for scene labels.
//!
//! Label sizes are estimated from the character count and font size rather
//! than measured against real fonts, so layout is identical on every machine.

use crate::color::Color;

/// Average glyph advance as a fraction of the font size.
const GLYPH_WIDTH_FACTOR: f32 = 0.6;

/// Horizontal alignment of a label relative to its anchor point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    /// Returns the CSS/SVG `text-anchor` keyword
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Font weight of a label.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Medium,
    Bold,
}

impl FontWeight {
    /// Returns the CSS/SVG `font-weight` keyword
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Medium => "500",
            Self::Bold => "bold",
        }
    }
}

/// Visual style of a label.
///
/// # Examples
///
/// ```
/// # use stackmap_core::scene::{FontWeight, TextAnchor, TextStyle};
/// let title = TextStyle::new(20.0)
///     .with_weight(FontWeight::Bold)
///     .with_anchor(TextAnchor::Middle);
/// assert_eq!(title.font_size(), 20.0);
/// assert!(title.estimate_width("Services") > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    font_family: String,
    font_size: f32,
    weight: FontWeight,
    color: Option<Color>,
    anchor: TextAnchor,
}

impl TextStyle {
    /// Creates a normal-weight, start-anchored style with the default font family.
    pub fn new(font_size: f32) -> Self {
        Self {
            font_size,
            ..Self::default()
        }
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    /// Text color, `None` leaves the surface default (usually black).
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn anchor(&self) -> TextAnchor {
        self.anchor
    }

    /// Estimated rendered width of `content` in this style.
    pub fn estimate_width(&self, content: &str) -> f32 {
        content.chars().count() as f32 * self.font_size * GLYPH_WIDTH_FACTOR
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: String::from("sans-serif"),
            font_size: 12.0,
            weight: FontWeight::default(),
            color: None,
            anchor: TextAnchor::default(),
        }
    }
}
