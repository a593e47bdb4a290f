//! Building blocks shared by the renderers.

use stackmap_core::{
    color::Color,
    geometry::{Bounds, Point, Size},
    scene::{
        Circle, Element, FontWeight, Label, Rect, RenderLayer, Role, StrokeDefinition, TextAnchor,
        TextStyle,
    },
};

use crate::{layout::PositionedNode, theme::hex};

/// Height of a label pill.
const PILL_HEIGHT: f32 = 20.0;

pub(super) fn dark_text() -> Color {
    hex(0x2c, 0x3e, 0x50)
}

pub(super) fn muted_text() -> Color {
    hex(0x66, 0x66, 0x66)
}

/// Centered text.
pub(super) fn centered(size: f32) -> TextStyle {
    TextStyle::new(size).with_anchor(TextAnchor::Middle)
}

/// Centered bold text.
pub(super) fn centered_bold(size: f32) -> TextStyle {
    centered(size).with_weight(FontWeight::Bold)
}

/// Width of a label pill for `text`: six units per character plus margins.
pub(super) fn pill_width(text: &str) -> f32 {
    text.chars().count() as f32 * 6.0 + 10.0
}

/// Capitalizes the first letter of every word.
pub(super) fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text content of a node card.
pub(super) struct Card<'a> {
    pub icon: &'a str,
    pub name: &'a str,
    pub caption: Option<&'a str>,
    pub border: Color,
    pub name_color: Color,
}

/// Draws a node as a rounded card with icon, name and caption, stacked
/// top to bottom inside the node bounds.
pub(super) fn node_card(positioned: &PositionedNode<'_>, card: Card<'_>) -> Element {
    let bounds = positioned.bounds();
    let x = bounds.center().x();
    let top = bounds.min_y();
    let height = bounds.height();

    let mut element = Element::new(Role::Node(positioned.id()))
        .with(
            RenderLayer::Node,
            Rect::new(bounds)
                .with_fill(Color::white())
                .with_stroke(StrokeDefinition::solid(card.border, 2.0))
                .with_corner_radius(8.0),
        )
        .with(
            RenderLayer::Text,
            Label::new(Point::new(x, top + height * 0.36), card.icon, centered(24.0)),
        )
        .with(
            RenderLayer::Text,
            Label::new(
                Point::new(x, top + height * 0.62),
                card.name,
                centered_bold(14.0).with_color(card.name_color),
            ),
        );

    if let Some(caption) = card.caption.filter(|caption| !caption.is_empty()) {
        element.push(
            RenderLayer::Text,
            Label::new(
                Point::new(x, top + height * 0.82),
                caption,
                centered(11.0).with_color(muted_text()),
            ),
        );
    }

    element
}

/// Adds a numbered circle centered at `center`.
pub(super) fn step_badge(
    element: &mut Element,
    center: Point,
    radius: f32,
    fill: Color,
    number: u32,
) {
    element.push(
        RenderLayer::Annotation,
        Circle::new(center, radius).with_fill(fill),
    );
    element.push(
        RenderLayer::Text,
        Label::new(
            center.add_point(Point::new(0.0, 4.0)),
            number.to_string(),
            centered_bold(12.0).with_color(Color::white()),
        ),
    );
}

/// Adds a white pill with centered text; the pill is centered at `center`.
pub(super) fn label_pill(
    element: &mut Element,
    center: Point,
    text: &str,
    accent: Color,
    style: TextStyle,
) {
    let bounds = Bounds::new_from_center(center, Size::new(pill_width(text), PILL_HEIGHT));
    element.push(
        RenderLayer::Annotation,
        Rect::new(bounds)
            .with_fill(Color::white())
            .with_stroke(StrokeDefinition::solid(accent, 1.0))
            .with_corner_radius(PILL_HEIGHT / 2.0),
    );
    element.push(
        RenderLayer::Text,
        Label::new(center.add_point(Point::new(0.0, 4.0)), text, style),
    );
}

/// A centered heading.
pub(super) fn heading(text: &str, center_x: f32, baseline: f32, size: f32) -> Element {
    Element::new(Role::Decoration).with(
        RenderLayer::Text,
        Label::new(
            Point::new(center_x, baseline),
            text,
            centered_bold(size).with_color(dark_text()),
        ),
    )
}
