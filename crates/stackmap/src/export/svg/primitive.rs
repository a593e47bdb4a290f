//! Conversion of scene primitives into SVG elements.

use svg::node::{
    Node,
    element::{Circle as SvgCircle, Path, Rectangle, Text},
};

use stackmap_core::{
    geometry::Point,
    scene::{Circle, Curve, Label, Primitive, Rect, Role, StrokeDefinition},
};

use super::markers;

/// Converts one primitive, tagging it with the role of its element.
pub(super) fn to_node(primitive: &Primitive, role: Role) -> Box<dyn Node> {
    match primitive {
        Primitive::Rect(rect) => Box::new(tag(rectangle(rect), role)),
        Primitive::Circle(circle) => Box::new(tag(circle_node(circle), role)),
        Primitive::Label(label) => Box::new(tag(text(label), role)),
        Primitive::Curve(curve) => Box::new(tag(path(curve), role)),
    }
}

fn tag<T: Node>(mut node: T, role: Role) -> T {
    node.assign("class", role.class_name());
    match role {
        Role::Node(id) => node.assign("data-node-id", id.as_string()),
        Role::Edge { source, target } => {
            node.assign("data-source", source.as_string());
            node.assign("data-target", target.as_string());
        }
        Role::Container | Role::Legend | Role::Decoration => {}
    }
    node
}

fn stroked<T: Node>(mut node: T, stroke: &StrokeDefinition) -> T {
    node.assign("stroke", stroke.color().to_string());
    node.assign("stroke-width", stroke.width());
    if let Some(dasharray) = stroke.style().dasharray() {
        node.assign("stroke-dasharray", dasharray);
    }
    node
}

fn rectangle(rect: &Rect) -> Rectangle {
    let bounds = rect.bounds();
    let mut node = Rectangle::new()
        .set("x", bounds.min_x())
        .set("y", bounds.min_y())
        .set("width", bounds.width())
        .set("height", bounds.height())
        .set(
            "fill",
            rect.fill().map_or_else(|| "none".to_string(), |fill| fill.to_string()),
        );
    if rect.corner_radius() > 0.0 {
        node = node.set("rx", rect.corner_radius());
    }
    match rect.stroke() {
        Some(stroke) => stroked(node, stroke),
        None => node,
    }
}

fn circle_node(circle: &Circle) -> SvgCircle {
    let node = SvgCircle::new()
        .set("cx", circle.center().x())
        .set("cy", circle.center().y())
        .set("r", circle.radius())
        .set(
            "fill",
            circle.fill().map_or_else(|| "none".to_string(), |fill| fill.to_string()),
        );
    match circle.stroke() {
        Some(stroke) => stroked(node, stroke),
        None => node,
    }
}

fn text(label: &Label) -> Text {
    let style = label.style();
    let mut node = Text::new(label.content())
        .set("x", label.position().x())
        .set("y", label.position().y())
        .set("font-family", style.font_family())
        .set("font-size", style.font_size())
        .set("font-weight", style.weight().keyword())
        .set("text-anchor", style.anchor().keyword());
    if let Some(color) = style.color() {
        node = node.set("fill", color.to_string());
    }
    node
}

/// Path data of a connector: a line, or a quadratic curve through its
/// control point.
pub(super) fn path_data(start: Point, control: Option<Point>, end: Point) -> String {
    match control {
        Some(control) => format!(
            "M {} {} Q {} {} {} {}",
            start.x(),
            start.y(),
            control.x(),
            control.y(),
            end.x(),
            end.y()
        ),
        None => format!("M {} {} L {} {}", start.x(), start.y(), end.x(), end.y()),
    }
}

fn path(curve: &Curve) -> Path {
    let mut node = stroked(
        Path::new()
            .set("d", path_data(curve.start(), curve.control(), curve.end()))
            .set("fill", "none"),
        curve.stroke(),
    );
    if let Some(color) = curve.marker_end() {
        node = node.set("marker-end", markers::marker_url(color));
    }
    node
}
