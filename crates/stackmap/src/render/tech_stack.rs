//! Technology stack renderer: languages and services in two columns.

use indexmap::IndexMap;
use log::info;

use stackmap_core::{
    color::Color,
    geometry::{Bounds, Point, Size},
    identifier::Id,
    scene::{
        Circle, Curve, Element, FontWeight, Label, Rect, RenderLayer, Role, Scene,
        StrokeDefinition, TextStyle,
    },
    semantic::{Category, Node, TechStack},
};

use super::common;
use crate::{
    config::AppConfig,
    error::StackmapError,
    layout::{EdgeRoute, Engine, PositionedNode},
    theme::{Theme, hex},
};

/// Title used when the descriptor has none.
pub const DEFAULT_TITLE: &str = "Technology Stack";

const PANEL_WIDTH: f32 = 400.0;
const PANEL_TOP: f32 = 50.0;
const MIN_PANEL_HEIGHT: f32 = 500.0;
const ITEM_SIZE: Size = Size::new(360.0, 60.0);
const ITEM_STEP: f32 = 80.0;
/// Offset from the panel top to the first item.
const ITEMS_TOP: f32 = 60.0;

/// One column of the diagram.
struct Column {
    title: &'static str,
    left: f32,
    id_prefix: &'static str,
    category: Category,
    accent: Color,
}

impl Column {
    fn languages() -> Self {
        Self {
            title: "Languages",
            left: 50.0,
            id_prefix: "lang",
            category: Category::Language,
            accent: hex(0x66, 0x7e, 0xea),
        }
    }

    fn services() -> Self {
        Self {
            title: "Services",
            left: 550.0,
            id_prefix: "service",
            category: Category::Cloud,
            accent: hex(0x76, 0x4b, 0xa2),
        }
    }

    fn panel_height(&self, items: usize) -> f32 {
        MIN_PANEL_HEIGHT.max(ITEMS_TOP + items as f32 * ITEM_STEP + 20.0)
    }

    /// Nodes for the column entries, in input order.
    fn nodes(&self, entries: &IndexMap<String, u64>) -> Vec<Node> {
        entries
            .keys()
            .enumerate()
            .map(|(index, name)| {
                let id = item_id(self.id_prefix, name);
                let center = Point::new(
                    self.left + PANEL_WIDTH / 2.0,
                    PANEL_TOP + ITEMS_TOP + index as f32 * ITEM_STEP + ITEM_SIZE.height() / 2.0,
                );
                Node::new(&id, name.as_str(), self.category.clone())
                    .with_position(center)
                    .with_color(self.accent)
            })
            .collect()
    }
}

/// Node id of a stack entry: `<prefix>_<name>` with spaces replaced.
pub fn item_id(prefix: &str, name: &str) -> String {
    format!("{prefix}_{}", name.replace(' ', "_"))
}

/// Count caption of an entry.
fn count_caption(name: &str, count: u64) -> String {
    if name.contains("AWS") {
        format!("{count} references")
    } else {
        format!("{count} files")
    }
}

/// Renders a technology stack.
///
/// # Errors
///
/// Fails only when the duplicate id policy rejects the input or the
/// configuration is unusable.
pub fn render(stack: &TechStack, config: &AppConfig) -> Result<Scene, StackmapError> {
    let theme = config.style().theme();
    let languages = Column::languages();
    let services = Column::services();

    info!(
        languages_count = stack.languages().len(),
        services_count = stack.services().len(),
        edges_count = stack.edges().len();
        "Rendering technology stack"
    );

    let mut nodes = languages.nodes(stack.languages());
    nodes.extend(services.nodes(stack.services()));
    let counts: Vec<u64> = stack
        .languages()
        .values()
        .chain(stack.services().values())
        .copied()
        .collect();

    let mut engine = Engine::new(config.layout()).with_node_size(ITEM_SIZE);
    let node_layout = engine.layout_nodes(&nodes, stack.edges())?;
    let edge_layout = engine.layout_edges(stack.edges(), &node_layout);

    let height = PANEL_TOP
        + languages
            .panel_height(stack.languages().len())
            .max(services.panel_height(stack.services().len()))
        + PANEL_TOP;
    let width = services.left + PANEL_WIDTH + 50.0;
    let mut scene = Scene::new(Size::new(width, height))
        .with_title(stack.title().unwrap_or(DEFAULT_TITLE));

    scene.add(column_panel(&languages, stack.languages().len()));
    scene.add(column_panel(&services, stack.services().len()));

    // Duplicate names collapse to one node; counts follow input order
    let count_of = |id: Id| {
        nodes
            .iter()
            .position(|node| node.id() == id)
            .and_then(|index| counts.get(index).copied())
            .unwrap_or_default()
    };
    for positioned in node_layout.iter() {
        scene.add(item(positioned, count_of(positioned.id()), theme));
    }

    for route in edge_layout.routes() {
        scene.add(stack_edge(route));
    }

    let diagnostics = node_layout
        .diagnostics()
        .iter()
        .chain(edge_layout.diagnostics())
        .copied()
        .collect::<Vec<_>>();
    super::finish(scene, config, diagnostics)
}

fn column_panel(column: &Column, items: usize) -> Element {
    let bounds = Bounds::new_from_top_left(
        Point::new(column.left, PANEL_TOP),
        Size::new(PANEL_WIDTH, column.panel_height(items)),
    );
    Element::new(Role::Container)
        .with(
            RenderLayer::Container,
            Rect::new(bounds)
                .with_fill(Color::white().with_alpha(0.95))
                .with_stroke(StrokeDefinition::solid(column.accent, 2.0))
                .with_corner_radius(15.0),
        )
        .with(
            RenderLayer::Text,
            Label::new(
                Point::new(column.left + PANEL_WIDTH / 2.0, PANEL_TOP + 30.0),
                column.title,
                common::centered_bold(20.0).with_color(common::dark_text()),
            ),
        )
}

fn item(positioned: &PositionedNode<'_>, count: u64, theme: &Theme) -> Element {
    let node = positioned.node();
    let bounds = positioned.bounds();
    let accent = theme.node_color(node);
    let center_y = bounds.center().y();
    let icon_center = Point::new(bounds.min_x() + 40.0, center_y);
    let text_x = bounds.min_x() + 75.0;

    Element::new(Role::Node(positioned.id()))
        .with(
            RenderLayer::Node,
            Rect::new(bounds)
                .with_fill(accent.with_alpha(0.1))
                .with_corner_radius(10.0),
        )
        .with(
            RenderLayer::Node,
            Circle::new(icon_center, 20.0).with_fill(accent.with_alpha(0.2)),
        )
        .with(
            RenderLayer::Text,
            Label::new(
                icon_center.add_point(Point::new(0.0, 4.0)),
                theme.icon_for(node.label()),
                common::centered_bold(11.0).with_color(accent),
            ),
        )
        .with(
            RenderLayer::Text,
            Label::new(
                Point::new(text_x, center_y - 2.0),
                node.label(),
                TextStyle::new(16.0)
                    .with_weight(FontWeight::Bold)
                    .with_color(common::dark_text()),
            ),
        )
        .with(
            RenderLayer::Text,
            Label::new(
                Point::new(text_x, center_y + 16.0),
                count_caption(node.label(), count),
                TextStyle::new(12.0).with_color(common::muted_text()),
            ),
        )
}

fn stack_edge(route: &EdgeRoute<'_>) -> Element {
    let edge = route.edge();
    let geometry = route.geometry();
    let color = hex(0x66, 0x7e, 0xea);

    Element::new(Role::Edge {
        source: edge.source(),
        target: edge.target(),
    })
    .with(
        RenderLayer::Edge,
        Curve::quadratic(
            geometry.start(),
            geometry.control(),
            geometry.end(),
            StrokeDefinition::solid(color, 2.0),
        )
        .with_arrowhead(color),
    )
}
