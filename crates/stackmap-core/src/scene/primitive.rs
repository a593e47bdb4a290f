//! Typed visual primitives.
//!
//! A [`Primitive`] is the leaf of the scene graph: a rectangle, a circle, a
//! text label or a curve. Primitives carry absolute coordinates and resolved
//! colors; they know nothing about the surface they will be drawn on.

use crate::{
    color::Color,
    geometry::{Bounds, Point, Size},
    scene::{StrokeDefinition, TextStyle, text::TextAnchor},
};

/// A filled and/or stroked rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    bounds: Bounds,
    fill: Option<Color>,
    stroke: Option<StrokeDefinition>,
    corner_radius: f32,
}

impl Rect {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            fill: None,
            stroke: None,
            corner_radius: 0.0,
        }
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_stroke(mut self, stroke: StrokeDefinition) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn with_corner_radius(mut self, radius: f32) -> Self {
        self.corner_radius = radius;
        self
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn stroke(&self) -> Option<&StrokeDefinition> {
        self.stroke.as_ref()
    }

    pub fn corner_radius(&self) -> f32 {
        self.corner_radius
    }
}

/// A filled and/or stroked circle.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    center: Point,
    radius: f32,
    fill: Option<Color>,
    stroke: Option<StrokeDefinition>,
}

impl Circle {
    pub fn new(center: Point, radius: f32) -> Self {
        Self {
            center,
            radius,
            fill: None,
            stroke: None,
        }
    }

    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_stroke(mut self, stroke: StrokeDefinition) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn stroke(&self) -> Option<&StrokeDefinition> {
        self.stroke.as_ref()
    }
}

/// A single line of text anchored at a baseline point.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    position: Point,
    content: String,
    style: TextStyle,
}

impl Label {
    /// Creates a label whose baseline anchor sits at `position`.
    pub fn new(position: Point, content: impl Into<String>, style: TextStyle) -> Self {
        Self {
            position,
            content: content.into(),
            style,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Estimated bounds of the rendered text.
    pub fn bounds(&self) -> Bounds {
        let width = self.style.estimate_width(&self.content);
        let height = self.style.font_size();
        let min_x = match self.style.anchor() {
            TextAnchor::Start => self.position.x(),
            TextAnchor::Middle => self.position.x() - width / 2.0,
            TextAnchor::End => self.position.x() - width,
        };
        Bounds::new_from_top_left(
            Point::new(min_x, self.position.y() - height),
            Size::new(width, height),
        )
    }
}

/// A connector from `start` to `end`.
///
/// With a control point the connector is a quadratic Bézier curve, without
/// one it is a straight segment. `marker_end` requests an arrowhead in the
/// given color at `end`.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    start: Point,
    end: Point,
    control: Option<Point>,
    stroke: StrokeDefinition,
    marker_end: Option<Color>,
}

impl Curve {
    /// Creates a straight connector.
    pub fn straight(start: Point, end: Point, stroke: StrokeDefinition) -> Self {
        Self {
            start,
            end,
            control: None,
            stroke,
            marker_end: None,
        }
    }

    /// Creates a quadratic connector bent towards `control`.
    pub fn quadratic(start: Point, control: Point, end: Point, stroke: StrokeDefinition) -> Self {
        Self {
            control: Some(control),
            ..Self::straight(start, end, stroke)
        }
    }

    /// Adds an arrowhead at the end of the connector.
    pub fn with_arrowhead(mut self, color: Color) -> Self {
        self.marker_end = Some(color);
        self
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn control(&self) -> Option<Point> {
        self.control
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    pub fn marker_end(&self) -> Option<Color> {
        self.marker_end
    }

    /// Bounds of the curve's control polygon, which contains the curve.
    pub fn bounds(&self) -> Bounds {
        let ends = Bounds::new_from_top_left(self.start, Size::default())
            .merge(&Bounds::new_from_top_left(self.end, Size::default()));
        match self.control {
            Some(control) => ends.merge(&Bounds::new_from_top_left(control, Size::default())),
            None => ends,
        }
    }
}

/// Leaf node of the scene graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect(Rect),
    Circle(Circle),
    Label(Label),
    Curve(Curve),
}

impl Primitive {
    /// Axis-aligned bounds of the primitive.
    pub fn bounds(&self) -> Bounds {
        match self {
            Self::Rect(rect) => rect.bounds(),
            Self::Circle(circle) => {
                let diameter = circle.radius() * 2.0;
                circle.center().to_bounds(Size::new(diameter, diameter))
            }
            Self::Label(label) => label.bounds(),
            Self::Curve(curve) => curve.bounds(),
        }
    }

    /// Returns the label if this primitive is one.
    pub fn as_label(&self) -> Option<&Label> {
        match self {
            Self::Label(label) => Some(label),
            _ => None,
        }
    }

    /// Returns the curve if this primitive is one.
    pub fn as_curve(&self) -> Option<&Curve> {
        match self {
            Self::Curve(curve) => Some(curve),
            _ => None,
        }
    }
}

impl From<Rect> for Primitive {
    fn from(value: Rect) -> Self {
        Self::Rect(value)
    }
}

impl From<Circle> for Primitive {
    fn from(value: Circle) -> Self {
        Self::Circle(value)
    }
}

impl From<Label> for Primitive {
    fn from(value: Label) -> Self {
        Self::Label(value)
    }
}

impl From<Curve> for Primitive {
    fn from(value: Curve) -> Self {
        Self::Curve(value)
    }
}
