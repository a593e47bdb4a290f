//! Retained scene graph.
//!
//! A [`Scene`] is the surface-independent output of every renderer:
//!
//! ```text
//! Scene
//!  ├── Element (role: Node "api")
//!  │    ├── (Node layer)  Rect
//!  │    └── (Text layer)  Label
//!  ├── Element (role: Edge "api" -> "db")
//!  │    ├── (Edge layer)       Curve
//!  │    └── (Annotation layer) Circle
//!  └── ...
//! ```
//!
//! Elements group the primitives that visualize one thing (a node, an edge,
//! a legend). Each primitive carries its own [`RenderLayer`], so a node's box
//! and its caption can sit on different layers while still belonging to the
//! same element. Adapters (see the `stackmap` crate's SVG exporter) walk
//! [`Scene::layered`] to materialize the scene.

mod diagnostic;
mod layer;
mod primitive;
mod stroke;
mod text;

pub use diagnostic::Diagnostic;
pub use layer::RenderLayer;
pub use primitive::{Circle, Curve, Label, Primitive, Rect};
pub use stroke::{StrokeDefinition, StrokeStyle};
pub use text::{FontWeight, TextAnchor, TextStyle};

use crate::{
    color::Color,
    geometry::{Bounds, Insets, Point, Size},
    identifier::Id,
};

/// What an [`Element`] visualizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A diagram node with its id
    Node(Id),
    /// A connector between two resolved nodes
    Edge { source: Id, target: Id },
    /// A panel grouping nodes (layer, column, account boundary)
    Container,
    /// A legend or summary panel
    Legend,
    /// Titles, headers and other decoration
    Decoration,
}

impl Role {
    /// Short class name used by adapters.
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Node(_) => "node",
            Self::Edge { .. } => "edge",
            Self::Container => "container",
            Self::Legend => "legend",
            Self::Decoration => "decoration",
        }
    }
}

/// A group of primitives visualizing one thing.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    role: Role,
    items: Vec<(RenderLayer, Primitive)>,
}

impl Element {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            items: Vec::new(),
        }
    }

    /// Appends a primitive on the given layer.
    pub fn push(&mut self, layer: RenderLayer, primitive: impl Into<Primitive>) {
        self.items.push((layer, primitive.into()));
    }

    /// Builder form of [`Element::push`].
    pub fn with(mut self, layer: RenderLayer, primitive: impl Into<Primitive>) -> Self {
        self.push(layer, primitive);
        self
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn items(&self) -> &[(RenderLayer, Primitive)] {
        &self.items
    }

    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.items.iter().map(|(_, primitive)| primitive)
    }

    /// Text of every label in this element, in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.primitives()
            .filter_map(Primitive::as_label)
            .map(Label::content)
    }

    /// Bounds enclosing all primitives, `None` for an empty element.
    pub fn bounds(&self) -> Option<Bounds> {
        self.primitives()
            .map(Primitive::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
    }
}

/// Primitives of one layer, in insertion order, paired with their element role.
pub type LayerItems<'a> = Vec<(Role, &'a Primitive)>;

/// The complete visual output of a render call.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    title: Option<String>,
    /// Top-left corner of the visible canvas.
    origin: Point,
    size: Size,
    background: Option<Color>,
    elements: Vec<Element>,
    diagnostics: Vec<Diagnostic>,
}

impl Scene {
    /// Creates an empty scene with the given canvas size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn set_background(&mut self, background: Option<Color>) {
        self.background = background;
    }

    pub fn add(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn add_diagnostics(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// The visible canvas: `size` starting at `origin`.
    pub fn viewport(&self) -> Bounds {
        Bounds::new_from_top_left(self.origin, self.size)
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Inputs that were skipped while building this scene.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of node elements.
    pub fn node_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|element| matches!(element.role(), Role::Node(_)))
            .count()
    }

    /// Number of edge elements.
    pub fn edge_count(&self) -> usize {
        self.elements
            .iter()
            .filter(|element| matches!(element.role(), Role::Edge { .. }))
            .count()
    }

    /// Finds the element drawing node `id`.
    pub fn node(&self, id: Id) -> Option<&Element> {
        self.elements
            .iter()
            .find(|element| element.role() == Role::Node(id))
    }

    /// Every label in the scene, in element order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().flat_map(Element::labels)
    }

    /// Bounds enclosing every primitive, `None` for an empty scene.
    pub fn content_bounds(&self) -> Option<Bounds> {
        self.elements
            .iter()
            .filter_map(Element::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
    }

    /// Grows the canvas so that all content plus `padding` fits.
    ///
    /// The canvas never shrinks. Content left of or above the canvas moves
    /// the origin into negative coordinates instead of being clipped.
    pub fn fit_to_content(&mut self, padding: Insets) {
        if let Some(bounds) = self.content_bounds() {
            let viewport = self.viewport();
            let min_x = viewport.min_x().min(bounds.min_x() - padding.left());
            let min_y = viewport.min_y().min(bounds.min_y() - padding.top());
            let max_x = viewport.max_x().max(bounds.max_x() + padding.right());
            let max_y = viewport.max_y().max(bounds.max_y() + padding.bottom());

            self.origin = Point::new(min_x, min_y);
            self.size = Size::new(max_x - min_x, max_y - min_y);
        }
    }

    /// Groups all primitives by layer, bottom layer first.
    ///
    /// Within a layer, primitives keep element order and then insertion
    /// order. Empty layers are omitted.
    pub fn layered(&self) -> Vec<(RenderLayer, LayerItems<'_>)> {
        let mut items: Vec<(RenderLayer, Role, &Primitive)> = self
            .elements
            .iter()
            .flat_map(|element| {
                element
                    .items()
                    .iter()
                    .map(move |(layer, primitive)| (*layer, element.role(), primitive))
            })
            .collect();

        // Stable sort keeps insertion order within a layer
        items.sort_by_key(|(layer, _, _)| *layer);

        let mut result: Vec<(RenderLayer, LayerItems<'_>)> = Vec::new();
        for (layer, role, primitive) in items {
            match result.last_mut() {
                Some((current, group)) if *current == layer => group.push((role, primitive)),
                _ => result.push((layer, vec![(role, primitive)])),
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_element(id: &str, center: Point) -> Element {
        Element::new(Role::Node(Id::new(id)))
            .with(
                RenderLayer::Node,
                Rect::new(center.to_bounds(Size::new(20.0, 10.0))),
            )
            .with(
                RenderLayer::Text,
                Label::new(center, id, TextStyle::new(10.0)),
            )
    }

    #[test]
    fn test_empty_scene() {
        let scene = Scene::new(Size::new(100.0, 100.0));
        assert_eq!(scene.node_count(), 0);
        assert_eq!(scene.edge_count(), 0);
        assert!(scene.content_bounds().is_none());
        assert!(scene.layered().is_empty());
    }

    #[test]
    fn test_counts_by_role() {
        let mut scene = Scene::new(Size::new(100.0, 100.0));
        scene.add(node_element("a", Point::new(10.0, 10.0)));
        scene.add(node_element("b", Point::new(50.0, 50.0)));
        scene.add(
            Element::new(Role::Edge {
                source: Id::new("a"),
                target: Id::new("b"),
            })
            .with(
                RenderLayer::Edge,
                Curve::straight(
                    Point::new(10.0, 10.0),
                    Point::new(50.0, 50.0),
                    StrokeDefinition::default(),
                ),
            ),
        );
        scene.add(Element::new(Role::Legend));

        assert_eq!(scene.node_count(), 2);
        assert_eq!(scene.edge_count(), 1);
        assert!(scene.node(Id::new("a")).is_some());
        assert!(scene.node(Id::new("zzz")).is_none());
        assert_eq!(scene.labels().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_layered_orders_layers_and_keeps_insertion_order() {
        let mut scene = Scene::new(Size::new(100.0, 100.0));
        scene.add(node_element("first", Point::new(10.0, 10.0)));
        scene.add(node_element("second", Point::new(50.0, 50.0)));

        let layered = scene.layered();
        let layers: Vec<RenderLayer> = layered.iter().map(|(layer, _)| *layer).collect();
        assert_eq!(layers, vec![RenderLayer::Node, RenderLayer::Text]);

        let text_roles: Vec<Role> = layered[1].1.iter().map(|(role, _)| *role).collect();
        assert_eq!(
            text_roles,
            vec![Role::Node(Id::new("first")), Role::Node(Id::new("second"))]
        );
    }

    #[test]
    fn test_fit_to_content_only_grows() {
        let mut scene = Scene::new(Size::new(10.0, 10.0));
        scene.add(node_element("a", Point::new(100.0, 40.0)));
        scene.fit_to_content(Insets::uniform(5.0));

        assert_eq!(scene.size().width(), 115.0);
        assert_eq!(scene.size().height(), 50.0);

        let mut large = Scene::new(Size::new(1000.0, 1000.0));
        large.add(node_element("a", Point::new(100.0, 40.0)));
        large.fit_to_content(Insets::uniform(5.0));
        assert_eq!(large.size(), Size::new(1000.0, 1000.0));
        assert_eq!(large.origin(), Point::default());
    }

    #[test]
    fn test_fit_to_content_extends_to_negative_coordinates() {
        let mut scene = Scene::new(Size::new(200.0, 200.0));
        scene.add(node_element("a", Point::new(0.0, 0.0)));
        scene.fit_to_content(Insets::uniform(5.0));

        // Box reaches (-10, -5), the caption baseline at y = 0 reaches y = -10
        assert_eq!(scene.origin(), Point::new(-15.0, -15.0));
        assert_eq!(scene.size(), Size::new(215.0, 215.0));

        let viewport = scene.viewport();
        let content = scene.content_bounds().unwrap();
        assert!(viewport.min_x() <= content.min_x() && viewport.min_y() <= content.min_y());
        assert!(viewport.max_x() >= content.max_x() && viewport.max_y() >= content.max_y());
    }
}
