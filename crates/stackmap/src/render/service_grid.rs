//! Service grid renderer.
//!
//! Draws a provider-styled account: a dark header bar, a dashed container
//! holding the services in a grid, a user node on the left and, when the
//! descriptor has connections, straight colored lines between services plus
//! a legend of the connection kinds in use.

use indexmap::IndexSet;
use log::info;

use stackmap_core::{
    color::Color,
    geometry::{Bounds, Insets, Point, Size},
    scene::{
        Circle, Curve, Element, FontWeight, Label, Rect, RenderLayer, Role, Scene,
        StrokeDefinition, TextStyle,
    },
    semantic::{EdgeKind, ServiceGrid},
};

use super::common::{self, Card};
use crate::{
    config::AppConfig,
    error::StackmapError,
    layout::{EdgeRoute, Engine, Placement},
    theme::{Theme, hex},
};

const HEADER_HEIGHT: f32 = 50.0;
const CONTAINER_LEFT: f32 = 130.0;
const CONTAINER_TOP: f32 = 80.0;
/// Space inside the container above the first row, for its heading.
const CONTAINER_HEADING: f32 = 70.0;
const CARD_SIZE: Size = Size::new(200.0, 120.0);
const CARD_GAP: f32 = 20.0;
const BADGE_RADIUS: f32 = 12.5;
const LEGEND_WIDTH: f32 = 150.0;
const LEGEND_ROW: f32 = 20.0;
const MIN_WIDTH: f32 = 1000.0;

fn ink() -> Color {
    hex(0x23, 0x2f, 0x3e)
}

fn provider_orange() -> Color {
    hex(0xff, 0x99, 0x00)
}

/// Renders a service grid.
///
/// # Errors
///
/// Fails only when the duplicate id policy rejects the input or the
/// configuration is unusable.
pub fn render(grid: &ServiceGrid, config: &AppConfig) -> Result<Scene, StackmapError> {
    let theme = config.style().theme();
    let columns = config.layout().grid_columns();

    info!(
        services_count = grid.nodes().len(),
        connections_count = grid.edges().len(),
        columns;
        "Rendering service grid"
    );

    let first_slot = Point::new(
        CONTAINER_LEFT + CARD_GAP + CARD_SIZE.width() / 2.0,
        CONTAINER_TOP + CONTAINER_HEADING + CARD_SIZE.height() / 2.0,
    );
    let mut engine = Engine::new(config.layout())
        .with_placement(Placement::Grid { columns })
        .with_node_size(CARD_SIZE)
        .with_spacing(CARD_GAP, CARD_GAP)
        .with_origin(first_slot);

    let node_layout = engine.layout_nodes(grid.nodes(), grid.edges())?;
    let edge_layout = engine.layout_edges(grid.edges(), &node_layout);

    let container = node_layout
        .bounds()
        .unwrap_or_else(|| first_slot.to_bounds(CARD_SIZE))
        .add_padding(Insets::new(CONTAINER_HEADING, CARD_GAP, CARD_GAP, CARD_GAP));

    let kinds: IndexSet<&EdgeKind> = grid
        .edges()
        .iter()
        .map(|edge| edge.kind())
        .filter(|kind| !kind.is_unspecified())
        .collect();

    let legend_left = container.max_x() + CARD_GAP;
    let width = if kinds.is_empty() {
        container.max_x() + 30.0
    } else {
        legend_left + LEGEND_WIDTH + 30.0
    }
    .max(MIN_WIDTH);
    let height = container.max_y() + 30.0;

    let title = grid.title().unwrap_or("Technology Stack");
    let mut scene = Scene::new(Size::new(width, height)).with_title(title);

    scene.add(header(title, width));
    scene.add(account(container));
    scene.add(user_node(container.center().y()));

    for (index, positioned) in node_layout.iter().enumerate() {
        let node = positioned.node();
        let caption = common::capitalize_words(&node.category().caption());
        let mut card = common::node_card(
            positioned,
            Card {
                icon: theme.node_icon(node),
                name: node.label(),
                caption: Some(caption.as_str()),
                border: node.color().unwrap_or_else(|| hex(0xcc, 0xcc, 0xcc)),
                name_color: ink(),
            },
        );
        let corner = positioned.bounds().min_point();
        common::step_badge(
            &mut card,
            corner.add_point(Point::new(2.5, 2.5)),
            BADGE_RADIUS,
            ink(),
            index as u32 + 1,
        );
        scene.add(card);
    }

    for route in edge_layout.routes() {
        scene.add(connection(route, theme));
    }

    if !kinds.is_empty() {
        scene.add(legend(&kinds, Point::new(legend_left, CONTAINER_TOP), theme));
    }

    let diagnostics = node_layout
        .diagnostics()
        .iter()
        .chain(edge_layout.diagnostics())
        .copied()
        .collect::<Vec<_>>();
    super::finish(scene, config, diagnostics)
}

fn header(title: &str, width: f32) -> Element {
    let bar = Bounds::new_from_top_left(Point::default(), Size::new(width, HEADER_HEIGHT));
    let badge = Bounds::new_from_top_left(Point::new(20.0, 13.0), Size::new(36.0, 24.0));
    Element::new(Role::Decoration)
        .with(RenderLayer::Background, Rect::new(bar).with_fill(ink()))
        .with(
            RenderLayer::Background,
            Rect::new(badge)
                .with_fill(provider_orange())
                .with_corner_radius(4.0),
        )
        .with(
            RenderLayer::Text,
            Label::new(
                Point::new(badge.center().x(), 30.0),
                "aws",
                common::centered_bold(12.0).with_color(ink()),
            ),
        )
        .with(
            RenderLayer::Text,
            Label::new(
                Point::new(66.0, 31.0),
                title,
                TextStyle::new(16.0)
                    .with_weight(FontWeight::Bold)
                    .with_color(Color::white()),
            ),
        )
}

fn account(bounds: Bounds) -> Element {
    let gray = hex(0x66, 0x66, 0x66);
    let icon = Bounds::new_from_top_left(
        bounds.min_point().add_point(Point::new(20.0, 20.0)),
        Size::new(30.0, 30.0),
    );
    Element::new(Role::Container)
        .with(
            RenderLayer::Container,
            Rect::new(bounds)
                .with_fill(Color::white())
                .with_stroke(StrokeDefinition::dashed(gray, 2.0))
                .with_corner_radius(8.0),
        )
        .with(
            RenderLayer::Container,
            Rect::new(icon).with_fill(gray).with_corner_radius(4.0),
        )
        .with(
            RenderLayer::Text,
            Label::new(
                icon.center().add_point(Point::new(0.0, 6.0)),
                "☁️",
                common::centered(16.0),
            ),
        )
        .with(
            RenderLayer::Text,
            Label::new(
                Point::new(icon.max_x() + 10.0, icon.center().y() + 5.0),
                "Application Architecture",
                TextStyle::new(14.0)
                    .with_weight(FontWeight::Bold)
                    .with_color(ink()),
            ),
        )
}

fn user_node(center_y: f32) -> Element {
    let center = Point::new(60.0, center_y);
    Element::new(Role::Decoration)
        .with(
            RenderLayer::Node,
            Circle::new(center, 30.0)
                .with_fill(Color::white())
                .with_stroke(StrokeDefinition::solid(ink(), 2.0)),
        )
        .with(
            RenderLayer::Text,
            Label::new(
                center.add_point(Point::new(0.0, 7.0)),
                "👤",
                common::centered(20.0),
            ),
        )
        .with(
            RenderLayer::Text,
            Label::new(
                center.add_point(Point::new(0.0, 50.0)),
                "User",
                common::centered_bold(12.0).with_color(ink()),
            ),
        )
}

fn connection(route: &EdgeRoute<'_>, theme: &Theme) -> Element {
    let edge = route.edge();
    let geometry = route.geometry();
    let color = theme.edge_color(edge.kind());

    let mut element = Element::new(Role::Edge {
        source: edge.source(),
        target: edge.target(),
    })
    .with(
        RenderLayer::Edge,
        Curve::straight(
            geometry.start(),
            geometry.end(),
            StrokeDefinition::solid(color, 3.0),
        )
        .with_arrowhead(color),
    );

    if !edge.kind().is_unspecified() {
        common::label_pill(
            &mut element,
            geometry.mid().add_point(Point::new(0.0, -15.0)),
            edge.kind().name(),
            color,
            common::centered_bold(10.0).with_color(color),
        );
    }

    element
}

fn legend(kinds: &IndexSet<&EdgeKind>, top_left: Point, theme: &Theme) -> Element {
    let height = 30.0 + kinds.len() as f32 * LEGEND_ROW;
    let panel = Bounds::new_from_top_left(top_left, Size::new(LEGEND_WIDTH, height));
    let mut element = Element::new(Role::Legend)
        .with(
            RenderLayer::Container,
            Rect::new(panel)
                .with_fill(Color::white())
                .with_stroke(StrokeDefinition::solid(hex(0xdd, 0xdd, 0xdd), 1.0))
                .with_corner_radius(6.0),
        )
        .with(
            RenderLayer::Text,
            Label::new(
                top_left.add_point(Point::new(10.0, 20.0)),
                "Connections",
                TextStyle::new(12.0)
                    .with_weight(FontWeight::Bold)
                    .with_color(hex(0x33, 0x33, 0x33)),
            ),
        );

    for (row, kind) in kinds.iter().enumerate() {
        let y = top_left.y() + 30.0 + row as f32 * LEGEND_ROW;
        let swatch = Bounds::new_from_top_left(
            Point::new(top_left.x() + 10.0, y + 7.0),
            Size::new(16.0, 3.0),
        );
        element.push(
            RenderLayer::Annotation,
            Rect::new(swatch)
                .with_fill(theme.edge_color(kind))
                .with_corner_radius(1.5),
        );
        element.push(
            RenderLayer::Text,
            Label::new(
                Point::new(top_left.x() + 34.0, y + 12.0),
                kind.name(),
                TextStyle::new(12.0).with_color(common::muted_text()),
            ),
        );
    }

    element
}
