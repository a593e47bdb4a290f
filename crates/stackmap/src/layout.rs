//! Diagram layout engine.
//!
//! Layout runs in two phases:
//!
//! 1. [`Engine::layout_nodes`] places every node and commits its center and
//!    bounds into a [`NodeLayout`].
//! 2. [`Engine::layout_edges`] resolves every edge against that committed
//!    layout and computes its [`EdgeGeometry`].
//!
//! Edges therefore never observe a node whose position may still change.
//! An edge whose endpoint is not part of the layout is skipped and recorded
//! as a [`Diagnostic::MissingReference`].
//!
//! All positions are node **centers**: two nodes centered at (0, 0) and
//! (100, 100) are connected through the midpoint (50, 50).

mod curve;
mod placement;

pub use placement::Placement;

use std::collections::HashMap;

use indexmap::IndexMap;
use log::{debug, trace, warn};

use stackmap_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
    scene::Diagnostic,
    semantic::{Edge, Node},
};

use crate::{
    config::{DuplicateIdPolicy, LayoutConfig, PlacementKind},
    error::StackmapError,
};
use curve::ControlPoints;

/// A node with its committed center and bounds.
#[derive(Debug, Clone)]
pub struct PositionedNode<'a> {
    node: &'a Node,
    center: Point,
    bounds: Bounds,
    layer: usize,
}

impl<'a> PositionedNode<'a> {
    pub fn node(&self) -> &'a Node {
        self.node
    }

    pub fn id(&self) -> Id {
        self.node.id()
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Layer index (layered placement) or row index (grid placement).
    pub fn layer(&self) -> usize {
        self.layer
    }
}

/// Result of phase 1: every kept node with its final geometry, in input order.
#[derive(Debug, Clone, Default)]
pub struct NodeLayout<'a> {
    nodes: IndexMap<Id, PositionedNode<'a>>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> NodeLayout<'a> {
    pub fn get(&self, id: Id) -> Option<&PositionedNode<'a>> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: Id) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PositionedNode<'a>> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Duplicate ids dropped while laying out.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Bounds enclosing every node, `None` when the layout is empty.
    pub fn bounds(&self) -> Option<Bounds> {
        self.iter()
            .map(PositionedNode::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
    }
}

/// Geometry of a connector between two node centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeGeometry {
    start: Point,
    end: Point,
    mid: Point,
    control: Point,
}

impl EdgeGeometry {
    /// Center of the source node.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Center of the target node.
    pub fn end(&self) -> Point {
        self.end
    }

    /// Arithmetic midpoint of start and end; labels and badges anchor here.
    pub fn mid(&self) -> Point {
        self.mid
    }

    /// Control point of the quadratic curve.
    pub fn control(&self) -> Point {
        self.control
    }
}

/// A resolved edge with its geometry.
#[derive(Debug, Clone)]
pub struct EdgeRoute<'a> {
    edge: &'a Edge,
    geometry: EdgeGeometry,
}

impl<'a> EdgeRoute<'a> {
    pub fn edge(&self) -> &'a Edge {
        self.edge
    }

    pub fn geometry(&self) -> &EdgeGeometry {
        &self.geometry
    }
}

/// Result of phase 2: the drawable edges in input order plus the skipped ones.
#[derive(Debug, Clone, Default)]
pub struct EdgeLayout<'a> {
    routes: Vec<EdgeRoute<'a>>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> EdgeLayout<'a> {
    pub fn routes(&self) -> &[EdgeRoute<'a>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Edges skipped because an endpoint was missing.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// Looks up both endpoints of `edge`.
///
/// Returns `None` when either endpoint is not part of `layout`; the caller
/// skips such an edge.
pub fn resolve_edge<'n, 'a>(
    edge: &Edge,
    layout: &'n NodeLayout<'a>,
) -> Option<(&'n PositionedNode<'a>, &'n PositionedNode<'a>)> {
    Some((layout.get(edge.source())?, layout.get(edge.target())?))
}

/// Layout engine shared by all renderers.
pub struct Engine {
    placement: Placement,
    origin: Point,
    node_size: Size,
    horizontal_spacing: f32,
    vertical_spacing: f32,
    duplicate_ids: DuplicateIdPolicy,
    curves: ControlPoints,
}

impl Engine {
    /// Creates an engine from the layout configuration.
    ///
    /// The first slot is placed so that its node touches the configured
    /// padding.
    pub fn new(config: &LayoutConfig) -> Self {
        let node_size = config.node_size();
        let placement = match config.placement() {
            PlacementKind::Layered => Placement::Layered,
            PlacementKind::Grid => Placement::Grid {
                columns: config.grid_columns(),
            },
        };
        Self {
            placement,
            origin: Point::new(
                config.padding() + node_size.width() / 2.0,
                config.padding() + node_size.height() / 2.0,
            ),
            node_size,
            horizontal_spacing: config.horizontal_spacing(),
            vertical_spacing: config.vertical_spacing(),
            duplicate_ids: config.duplicate_ids(),
            curves: ControlPoints::new(config.curve()),
        }
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    /// Sets the center of the first placement slot.
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_node_size(mut self, size: Size) -> Self {
        self.node_size = size;
        self
    }

    /// Sets the gaps between adjacent columns and rows.
    pub fn with_spacing(mut self, horizontal: f32, vertical: f32) -> Self {
        self.horizontal_spacing = horizontal;
        self.vertical_spacing = vertical;
        self
    }

    pub fn node_size(&self) -> Size {
        self.node_size
    }

    /// Phase 1: places every node and commits its bounds.
    ///
    /// Nodes with an explicit position keep it. The others are placed by the
    /// configured [`Placement`]; `edges` only feed layer assignment.
    /// Collisions between explicit and computed positions are not resolved.
    ///
    /// # Errors
    ///
    /// Returns [`StackmapError::DuplicateId`] when two nodes share an id and
    /// the duplicate policy is [`DuplicateIdPolicy::Reject`].
    pub fn layout_nodes<'a>(
        &self,
        nodes: &'a [Node],
        edges: &[Edge],
    ) -> Result<NodeLayout<'a>, StackmapError> {
        let mut diagnostics = Vec::new();
        let mut unique: IndexMap<Id, &'a Node> = IndexMap::with_capacity(nodes.len());

        for node in nodes {
            if unique.contains_key(&node.id()) {
                match self.duplicate_ids {
                    DuplicateIdPolicy::Reject => {
                        return Err(StackmapError::DuplicateId(node.id().as_string()));
                    }
                    DuplicateIdPolicy::FirstWins => {
                        warn!(
                            id = node.id().as_string();
                            "Duplicate node id, keeping the first definition"
                        );
                        diagnostics.push(Diagnostic::DuplicateId { id: node.id() });
                        continue;
                    }
                }
            }
            unique.insert(node.id(), node);
        }

        let kept: Vec<&'a Node> = unique.into_values().collect();
        let centers = self.assign_centers(&kept, edges);

        let nodes: IndexMap<Id, PositionedNode<'a>> = kept
            .into_iter()
            .zip(centers)
            .map(|(node, (center, layer))| {
                let positioned = PositionedNode {
                    node,
                    center,
                    bounds: center.to_bounds(self.node_size),
                    layer,
                };
                (node.id(), positioned)
            })
            .collect();

        debug!(
            nodes_count = nodes.len(),
            dropped_count = diagnostics.len();
            "Node layout committed"
        );

        Ok(NodeLayout { nodes, diagnostics })
    }

    /// Phase 2: resolves every edge against the committed node layout.
    ///
    /// Unresolvable edges are logged and reported as diagnostics; they never
    /// fail the layout.
    pub fn layout_edges<'a>(
        &mut self,
        edges: &'a [Edge],
        nodes: &NodeLayout<'_>,
    ) -> EdgeLayout<'a> {
        let mut routes = Vec::with_capacity(edges.len());
        let mut diagnostics = Vec::new();

        for edge in edges {
            match resolve_edge(edge, nodes) {
                Some((source, target)) => {
                    let geometry = self.compute_edge_geometry(source, target);
                    routes.push(EdgeRoute { edge, geometry });
                }
                None => {
                    let missing = if nodes.contains(edge.source()) {
                        edge.target()
                    } else {
                        edge.source()
                    };
                    warn!(
                        source = edge.source().as_string(),
                        target = edge.target().as_string(),
                        missing = missing.as_string();
                        "Skipping edge with unknown endpoint"
                    );
                    diagnostics.push(Diagnostic::MissingReference {
                        source: edge.source(),
                        target: edge.target(),
                        missing,
                    });
                }
            }
        }

        debug!(
            edges_count = routes.len(),
            skipped_count = diagnostics.len();
            "Edge layout computed"
        );

        EdgeLayout {
            routes,
            diagnostics,
        }
    }

    /// Computes start, end, midpoint and control point between two nodes.
    ///
    /// Start and end are the node centers and never vary. The control point
    /// is the midpoint lifted upwards and shifted by horizontal jitter.
    pub fn compute_edge_geometry(
        &mut self,
        source: &PositionedNode<'_>,
        target: &PositionedNode<'_>,
    ) -> EdgeGeometry {
        let start = source.center();
        let end = target.center();
        let mid = start.midpoint(end);
        let control = self.curves.control_for(mid);
        trace!(
            source = source.id().as_string(),
            target = target.id().as_string(),
            mid:? = mid,
            control:? = control;
            "Edge geometry"
        );

        EdgeGeometry {
            start,
            end,
            mid,
            control,
        }
    }

    /// Center and layer of every node, explicit positions first.
    fn assign_centers(&self, nodes: &[&Node], edges: &[Edge]) -> Vec<(Point, usize)> {
        let layers = match self.placement {
            Placement::Layered => placement::assign_layers(nodes, edges),
            Placement::Grid { .. } => vec![0; nodes.len()],
        };

        let step_x = self.node_size.width() + self.horizontal_spacing;
        let step_y = self.node_size.height() + self.vertical_spacing;

        // Next free row per layer; only nodes without an explicit position
        // take a slot
        let mut next_row: HashMap<usize, usize> = HashMap::new();
        let mut auto_index = 0;

        nodes
            .iter()
            .zip(layers)
            .map(|(node, layer)| {
                let (column, row) = match self.placement {
                    Placement::Layered => {
                        let row = next_row.entry(layer).or_default();
                        let slot = (layer, *row);
                        if node.position().is_none() {
                            *row += 1;
                        }
                        slot
                    }
                    Placement::Grid { columns } => {
                        let slot = placement::grid_slot(auto_index, columns);
                        if node.position().is_none() {
                            auto_index += 1;
                        }
                        slot
                    }
                };

                let center = node.position().unwrap_or_else(|| {
                    self.origin.add_point(Point::new(
                        column as f32 * step_x,
                        row as f32 * step_y,
                    ))
                });
                let layer = match self.placement {
                    Placement::Layered => layer,
                    Placement::Grid { .. } => row,
                };
                (center, layer)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use stackmap_core::semantic::Category;

    use super::*;
    use crate::config::CurveConfig;

    fn seeded_config() -> LayoutConfig {
        LayoutConfig::default().with_curve(CurveConfig::default().with_seed(7))
    }

    fn node_at(id: &str, x: f32, y: f32) -> Node {
        Node::new(id, id.to_uppercase(), Category::Service).with_position(Point::new(x, y))
    }

    #[test]
    fn test_midpoint_of_centers() {
        let nodes = vec![node_at("a", 0.0, 0.0), node_at("b", 100.0, 100.0)];
        let edges = vec![Edge::new("a", "b")];
        let mut engine = Engine::new(&seeded_config());

        let node_layout = engine.layout_nodes(&nodes, &edges).unwrap();
        let edge_layout = engine.layout_edges(&edges, &node_layout);

        let geometry = edge_layout.routes()[0].geometry();
        assert_eq!(geometry.start(), Point::new(0.0, 0.0));
        assert_eq!(geometry.end(), Point::new(100.0, 100.0));
        assert_approx_eq!(f32, geometry.mid().x(), 50.0);
        assert_approx_eq!(f32, geometry.mid().y(), 50.0);
    }

    #[test]
    fn test_control_point_is_lifted_and_jittered_within_range() {
        let nodes = vec![node_at("a", 0.0, 0.0), node_at("b", 100.0, 100.0)];
        let edges = vec![Edge::new("a", "b")];
        let mut engine = Engine::new(&LayoutConfig::default());
        let node_layout = engine.layout_nodes(&nodes, &edges).unwrap();

        for _ in 0..50 {
            let edge_layout = engine.layout_edges(&edges, &node_layout);
            let control = edge_layout.routes()[0].geometry().control();
            assert_approx_eq!(f32, control.y(), 0.0);
            assert!((0.0..=100.0).contains(&control.x()), "x = {}", control.x());
        }
    }

    #[test]
    fn test_zero_jitter_is_deterministic() {
        let config = LayoutConfig::default().with_curve(CurveConfig::new(30.0, 0.0));
        let nodes = vec![node_at("a", 0.0, 0.0), node_at("b", 100.0, 0.0)];
        let edges = vec![Edge::new("a", "b")];
        let mut engine = Engine::new(&config);
        let node_layout = engine.layout_nodes(&nodes, &edges).unwrap();
        let edge_layout = engine.layout_edges(&edges, &node_layout);

        assert_eq!(
            edge_layout.routes()[0].geometry().control(),
            Point::new(50.0, -30.0)
        );
    }

    #[test]
    fn test_seeded_jitter_is_reproducible() {
        let nodes = vec![node_at("a", 0.0, 0.0), node_at("b", 300.0, 40.0)];
        let edges = vec![Edge::new("a", "b"), Edge::new("b", "a")];

        let controls = || {
            let mut engine = Engine::new(&seeded_config());
            let node_layout = engine.layout_nodes(&nodes, &edges).unwrap();
            engine
                .layout_edges(&edges, &node_layout)
                .routes()
                .iter()
                .map(|route| route.geometry().control())
                .collect::<Vec<_>>()
        };

        assert_eq!(controls(), controls());
    }

    #[test]
    fn test_missing_endpoint_is_skipped_with_diagnostic() {
        let nodes = vec![node_at("a", 0.0, 0.0), node_at("b", 10.0, 10.0)];
        let edges = vec![
            Edge::new("a", "b"),
            Edge::new("a", "ghost"),
            Edge::new("phantom", "b"),
        ];
        let mut engine = Engine::new(&seeded_config());
        let node_layout = engine.layout_nodes(&nodes, &edges).unwrap();
        let edge_layout = engine.layout_edges(&edges, &node_layout);

        assert_eq!(edge_layout.len(), 1);
        assert_eq!(
            edge_layout.diagnostics(),
            &[
                Diagnostic::MissingReference {
                    source: Id::new("a"),
                    target: Id::new("ghost"),
                    missing: Id::new("ghost"),
                },
                Diagnostic::MissingReference {
                    source: Id::new("phantom"),
                    target: Id::new("b"),
                    missing: Id::new("phantom"),
                },
            ]
        );
    }

    #[test]
    fn test_resolve_edge() {
        let nodes = vec![node_at("a", 0.0, 0.0)];
        let engine = Engine::new(&seeded_config());
        let layout = engine.layout_nodes(&nodes, &[]).unwrap();

        assert!(resolve_edge(&Edge::new("a", "a"), &layout).is_some());
        assert!(resolve_edge(&Edge::new("a", "b"), &layout).is_none());
        assert!(resolve_edge(&Edge::new("b", "a"), &layout).is_none());
    }

    #[test]
    fn test_empty_layout() {
        let mut engine = Engine::new(&seeded_config());
        let node_layout = engine.layout_nodes(&[], &[]).unwrap();
        let edge_layout = engine.layout_edges(&[], &node_layout);

        assert!(node_layout.is_empty());
        assert!(node_layout.bounds().is_none());
        assert!(edge_layout.is_empty());
    }

    #[test]
    fn test_duplicate_ids_first_wins() {
        let nodes = vec![
            node_at("a", 0.0, 0.0),
            node_at("b", 100.0, 0.0),
            node_at("a", 500.0, 500.0),
        ];
        let edges = vec![Edge::new("b", "a")];
        let mut engine = Engine::new(&seeded_config());
        let node_layout = engine.layout_nodes(&nodes, &edges).unwrap();

        assert_eq!(node_layout.len(), 2);
        assert_eq!(
            node_layout.diagnostics(),
            &[Diagnostic::DuplicateId { id: Id::new("a") }]
        );

        let edge_layout = engine.layout_edges(&edges, &node_layout);
        assert_eq!(
            edge_layout.routes()[0].geometry().end(),
            Point::new(0.0, 0.0)
        );
    }

    #[test]
    fn test_duplicate_ids_reject() {
        let nodes = vec![node_at("a", 0.0, 0.0), node_at("a", 1.0, 1.0)];
        let config = seeded_config().with_duplicate_ids(DuplicateIdPolicy::Reject);
        let engine = Engine::new(&config);

        let result = engine.layout_nodes(&nodes, &[]);
        assert!(matches!(result, Err(StackmapError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn test_layered_placement_follows_edges() {
        let nodes = vec![
            Node::new("web", "Web", Category::Frontend),
            Node::new("api", "API", Category::Api),
            Node::new("db", "DB", Category::Database),
            Node::new("cache", "Cache", Category::Storage),
        ];
        let edges = vec![
            Edge::new("web", "api"),
            Edge::new("api", "db"),
            Edge::new("api", "cache"),
        ];
        let engine = Engine::new(&seeded_config())
            .with_origin(Point::new(0.0, 0.0))
            .with_node_size(Size::new(100.0, 50.0))
            .with_spacing(20.0, 10.0);
        let layout = engine.layout_nodes(&nodes, &edges).unwrap();

        let center = |id: &str| layout.get(Id::new(id)).unwrap().center();
        assert_eq!(center("web"), Point::new(0.0, 0.0));
        assert_eq!(center("api"), Point::new(120.0, 0.0));
        assert_eq!(center("db"), Point::new(240.0, 0.0));
        assert_eq!(center("cache"), Point::new(240.0, 60.0));
        assert_eq!(layout.get(Id::new("cache")).unwrap().layer(), 2);
    }

    #[test]
    fn test_layered_placement_cycle_falls_back_to_one_layer() {
        let nodes = vec![
            Node::new("a", "A", Category::Service),
            Node::new("b", "B", Category::Service),
        ];
        let edges = vec![Edge::new("a", "b"), Edge::new("b", "a")];
        let engine = Engine::new(&seeded_config())
            .with_origin(Point::new(0.0, 0.0))
            .with_node_size(Size::new(100.0, 50.0))
            .with_spacing(20.0, 10.0);
        let layout = engine.layout_nodes(&nodes, &edges).unwrap();

        assert_eq!(layout.get(Id::new("a")).unwrap().center(), Point::new(0.0, 0.0));
        assert_eq!(layout.get(Id::new("b")).unwrap().center(), Point::new(0.0, 60.0));
    }

    #[test]
    fn test_explicit_layer_and_position_are_kept() {
        let nodes = vec![
            Node::new("a", "A", Category::Service).with_layer(3),
            node_at("pinned", 999.0, 999.0),
            Node::new("b", "B", Category::Service),
        ];
        let engine = Engine::new(&seeded_config())
            .with_origin(Point::new(0.0, 0.0))
            .with_node_size(Size::new(100.0, 50.0))
            .with_spacing(20.0, 10.0);
        let layout = engine.layout_nodes(&nodes, &[]).unwrap();

        assert_eq!(layout.get(Id::new("a")).unwrap().center(), Point::new(360.0, 0.0));
        assert_eq!(
            layout.get(Id::new("pinned")).unwrap().center(),
            Point::new(999.0, 999.0)
        );
        // The pinned node does not consume a slot in layer 0
        assert_eq!(layout.get(Id::new("b")).unwrap().center(), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_grid_placement_is_row_major() {
        let nodes: Vec<Node> = (0..5)
            .map(|i| Node::new(&format!("n{i}"), format!("N{i}"), Category::Service))
            .collect();
        let engine = Engine::new(&seeded_config())
            .with_placement(Placement::Grid { columns: 2 })
            .with_origin(Point::new(10.0, 10.0))
            .with_node_size(Size::new(100.0, 50.0))
            .with_spacing(20.0, 10.0);
        let layout = engine.layout_nodes(&nodes, &[]).unwrap();

        let centers: Vec<Point> = layout.iter().map(PositionedNode::center).collect();
        assert_eq!(
            centers,
            vec![
                Point::new(10.0, 10.0),
                Point::new(130.0, 10.0),
                Point::new(10.0, 70.0),
                Point::new(130.0, 70.0),
                Point::new(10.0, 130.0),
            ]
        );
        assert_eq!(layout.get(Id::new("n4")).unwrap().layer(), 2);
    }

    #[test]
    fn test_bounds_are_centered_on_nodes() {
        let nodes = vec![node_at("a", 100.0, 100.0)];
        let engine = Engine::new(&seeded_config()).with_node_size(Size::new(40.0, 20.0));
        let layout = engine.layout_nodes(&nodes, &[]).unwrap();

        let bounds = layout.get(Id::new("a")).unwrap().bounds();
        assert_eq!(bounds.min_x(), 80.0);
        assert_eq!(bounds.max_y(), 110.0);
    }
}
