//! Layered architecture renderer.
//!
//! Layers are stacked top to bottom as colored panels holding a row of
//! service cards. Consecutive rendered layers are joined by a down arrow
//! listing the connections that cross between them. Service lines are drawn
//! once every layer has been placed, and a workflow panel closes the
//! diagram.

use std::collections::HashMap;

use log::{debug, info};

use stackmap_core::{
    color::Color,
    geometry::{Bounds, Point, Size},
    identifier::Id,
    scene::{
        Curve, Element, FontWeight, Label, Rect, RenderLayer, Role, Scene, StrokeDefinition,
        TextStyle,
    },
    semantic::{Edge, Layer, LayeredArchitecture, Node, WorkflowStep},
};

use super::common::{self, Card};
use crate::{
    config::AppConfig,
    error::StackmapError,
    layout::{EdgeRoute, Engine},
    theme::{Theme, hex},
};

/// Title used when the descriptor has none.
pub const DEFAULT_TITLE: &str = "Layered Architecture";
const SUBTITLE: &str = "Connected Architecture Layers with Processing Flow";

const CANVAS_WIDTH: f32 = 1200.0;
/// Initial canvas height; the final height follows the content.
const CANVAS_HEIGHT_HINT: f32 = 600.0;
const MARGIN: f32 = 40.0;
const FIRST_PANEL_TOP: f32 = 100.0;
/// Height of the panel strip above the service row.
const PANEL_HEADER: f32 = 60.0;
const PANEL_HEIGHT: f32 = 160.0;
/// Vertical room between panels for the connector arrow.
const CONNECTOR_GAP: f32 = 70.0;
const CARD_SIZE: Size = Size::new(150.0, 80.0);
const CARD_STEP: f32 = 170.0;
const CARDS_LEFT: f32 = 60.0;
const WORKFLOW_ROW: f32 = 80.0;

fn palette(index: usize) -> Color {
    const PALETTE: [(u8, u8, u8); 5] = [
        (0xe3, 0xf2, 0xfd),
        (0xf3, 0xe5, 0xf5),
        (0xe8, 0xf5, 0xe9),
        (0xff, 0xf3, 0xe0),
        (0xfc, 0xe4, 0xec),
    ];
    let (r, g, b) = PALETTE[index % PALETTE.len()];
    hex(r, g, b)
}

fn connector_color() -> Color {
    hex(0x00, 0x7b, 0xff)
}

/// Renders a layered architecture.
///
/// # Errors
///
/// Fails only when the duplicate id policy rejects the input or the
/// configuration is unusable.
pub fn render(layered: &LayeredArchitecture, config: &AppConfig) -> Result<Scene, StackmapError> {
    let theme = config.style().theme();

    let rendered: Vec<&Layer> = layered
        .layers()
        .iter()
        .filter(|layer| !layer.is_empty())
        .collect();

    info!(
        layers_count = layered.layers().len(),
        rendered_layers = rendered.len(),
        connections_count = layered.edges().len(),
        workflow_steps = layered.workflow_steps().len();
        "Rendering layered architecture"
    );

    // Phase one: every service gets its slot in its layer's row
    let placed = place_services(&rendered);
    let mut engine = Engine::new(config.layout()).with_node_size(CARD_SIZE);
    let node_layout = engine.layout_nodes(&placed, layered.edges())?;

    let widest_row = rendered
        .iter()
        .map(|layer| CARDS_LEFT + layer.services().len() as f32 * CARD_STEP)
        .fold(0.0_f32, f32::max);
    let width = CANVAS_WIDTH.max(widest_row + MARGIN * 2.0);
    let panel_width = width - MARGIN * 2.0;

    let title = layered.title().unwrap_or(DEFAULT_TITLE);
    let mut scene = Scene::new(Size::new(width, CANVAS_HEIGHT_HINT)).with_title(title);
    scene.add(common::heading(title, width / 2.0, 40.0, 24.0));
    scene.add(subtitle(width / 2.0));

    let membership = layer_membership(&placed, &rendered);

    for (index, layer) in rendered.iter().enumerate() {
        let top = panel_top(index);
        scene.add(layer_panel(layer, index, top, panel_width));

        if index + 1 < rendered.len() {
            let crossing = crossing_labels(layered.edges(), &membership, index);
            scene.add(connector(width / 2.0, top + PANEL_HEIGHT, &crossing));
        }
    }

    for positioned in node_layout.iter() {
        let node = positioned.node();
        let caption = common::capitalize_words(&node.category().caption());
        scene.add(common::node_card(
            positioned,
            Card {
                icon: theme.node_icon(node),
                name: node.label(),
                caption: Some(caption.as_str()),
                border: theme.node_color(node),
                name_color: common::dark_text(),
            },
        ));
    }

    // Phase two: lines between committed services
    let edge_layout = engine.layout_edges(layered.edges(), &node_layout);
    for route in edge_layout.routes() {
        scene.add(service_line(route, theme));
    }

    let workflow_top = if rendered.is_empty() {
        FIRST_PANEL_TOP
    } else {
        panel_top(rendered.len() - 1) + PANEL_HEIGHT + MARGIN
    };
    scene.add(workflow_panel(
        layered.workflow_steps(),
        Point::new(MARGIN, workflow_top),
        panel_width,
        theme,
    ));

    debug!(
        services_count = node_layout.len(),
        lines_count = edge_layout.len();
        "Layered architecture laid out"
    );

    let diagnostics = node_layout
        .diagnostics()
        .iter()
        .chain(edge_layout.diagnostics())
        .copied()
        .collect::<Vec<_>>();
    super::finish(scene, config, diagnostics)
}

fn panel_top(index: usize) -> f32 {
    FIRST_PANEL_TOP + index as f32 * (PANEL_HEIGHT + CONNECTOR_GAP)
}

/// Clones every service of the rendered layers with its slot position.
fn place_services(rendered: &[&Layer]) -> Vec<Node> {
    rendered
        .iter()
        .enumerate()
        .flat_map(|(index, layer)| {
            let row_center = panel_top(index) + PANEL_HEADER + CARD_SIZE.height() / 2.0;
            layer
                .services()
                .iter()
                .enumerate()
                .map(move |(slot, service)| {
                    let x =
                        MARGIN + CARDS_LEFT + CARD_SIZE.width() / 2.0 + slot as f32 * CARD_STEP;
                    service.clone().with_position(Point::new(x, row_center))
                })
        })
        .collect()
}

/// Rendered layer index of every service id, first occurrence wins.
fn layer_membership(placed: &[Node], rendered: &[&Layer]) -> HashMap<Id, usize> {
    let mut membership = HashMap::new();
    let layer_of = rendered
        .iter()
        .enumerate()
        .flat_map(|(index, layer)| std::iter::repeat_n(index, layer.services().len()));
    for (node, index) in placed.iter().zip(layer_of) {
        membership.entry(node.id()).or_insert(index);
    }
    membership
}

/// Labels of the connections leading from rendered layer `upper` into the
/// next one.
fn crossing_labels(edges: &[Edge], membership: &HashMap<Id, usize>, upper: usize) -> Vec<String> {
    edges
        .iter()
        .filter(|edge| {
            membership.get(&edge.source()) == Some(&upper)
                && membership.get(&edge.target()) == Some(&(upper + 1))
        })
        .map(|edge| {
            format!("{} {}", edge.kind().name(), edge.description().unwrap_or_default())
                .trim()
                .to_string()
        })
        .filter(|label| !label.is_empty())
        .collect()
}

fn subtitle(center_x: f32) -> Element {
    Element::new(Role::Decoration).with(
        RenderLayer::Text,
        Label::new(
            Point::new(center_x, 68.0),
            SUBTITLE,
            common::centered(14.0).with_color(common::muted_text()),
        ),
    )
}

fn layer_panel(layer: &Layer, index: usize, top: f32, width: f32) -> Element {
    let bounds = Bounds::new_from_top_left(Point::new(MARGIN, top), Size::new(width, PANEL_HEIGHT));
    let fill = layer.color().unwrap_or_else(|| palette(index));
    let order = layer.order().unwrap_or(index as u32 + 1);

    let mut element = Element::new(Role::Container).with(
        RenderLayer::Container,
        Rect::new(bounds)
            .with_fill(fill)
            .with_stroke(StrokeDefinition::solid(hex(0xdd, 0xdd, 0xdd), 1.0))
            .with_corner_radius(10.0),
    );
    common::step_badge(
        &mut element,
        Point::new(MARGIN + 25.0, top + 25.0),
        15.0,
        common::dark_text(),
        order,
    );
    element.push(
        RenderLayer::Text,
        Label::new(
            Point::new(MARGIN + 50.0, top + 25.0),
            layer.name(),
            TextStyle::new(16.0)
                .with_weight(FontWeight::Bold)
                .with_color(common::dark_text()),
        ),
    );
    if !layer.description().is_empty() {
        element.push(
            RenderLayer::Text,
            Label::new(
                Point::new(MARGIN + 50.0, top + 45.0),
                layer.description(),
                TextStyle::new(12.0).with_color(common::muted_text()),
            ),
        );
    }
    element
}

fn connector(center_x: f32, top: f32, labels: &[String]) -> Element {
    let color = connector_color();
    let mut element = Element::new(Role::Decoration).with(
        RenderLayer::Edge,
        Curve::straight(
            Point::new(center_x, top + 5.0),
            Point::new(center_x, top + CONNECTOR_GAP - 5.0),
            StrokeDefinition::solid(color, 3.0),
        )
        .with_arrowhead(color),
    );
    for (row, label) in labels.iter().enumerate() {
        element.push(
            RenderLayer::Text,
            Label::new(
                Point::new(center_x + 15.0, top + 25.0 + row as f32 * 14.0),
                label.as_str(),
                TextStyle::new(11.0).with_color(color),
            ),
        );
    }
    element
}

fn service_line(route: &EdgeRoute<'_>, theme: &Theme) -> Element {
    let edge = route.edge();
    let geometry = route.geometry();
    let color = connector_color();

    let mut element = Element::new(Role::Edge {
        source: edge.source(),
        target: edge.target(),
    })
    .with(
        RenderLayer::Edge,
        Curve::straight(
            geometry.start(),
            geometry.end(),
            StrokeDefinition::solid(color, 2.0),
        ),
    );

    if !edge.kind().is_unspecified() {
        let accent = theme.edge_color(edge.kind());
        common::label_pill(
            &mut element,
            geometry.mid(),
            edge.kind().name(),
            accent,
            common::centered(10.0).with_color(accent),
        );
    }

    element
}

fn workflow_panel(steps: &[WorkflowStep], top_left: Point, width: f32, theme: &Theme) -> Element {
    let rows = steps.len().max(1) as f32;
    let bounds = Bounds::new_from_top_left(top_left, Size::new(width, 50.0 + rows * WORKFLOW_ROW));
    let x = top_left.x();
    let dark = common::dark_text();
    let muted = common::muted_text();

    let mut element = Element::new(Role::Decoration)
        .with(
            RenderLayer::Container,
            Rect::new(bounds)
                .with_fill(hex(0xf8, 0xf9, 0xfa))
                .with_stroke(StrokeDefinition::solid(hex(0xdd, 0xdd, 0xdd), 1.0))
                .with_corner_radius(10.0),
        )
        .with(
            RenderLayer::Text,
            Label::new(
                top_left.add_point(Point::new(20.0, 30.0)),
                "Processing Workflow",
                TextStyle::new(18.0)
                    .with_weight(FontWeight::Bold)
                    .with_color(dark),
            ),
        );

    if steps.is_empty() {
        element.push(
            RenderLayer::Text,
            Label::new(
                top_left.add_point(Point::new(20.0, 80.0)),
                "No processing workflow available",
                TextStyle::new(13.0).with_color(muted),
            ),
        );
        return element;
    }

    for (row, step) in steps.iter().enumerate() {
        let y = top_left.y() + 50.0 + row as f32 * WORKFLOW_ROW;
        common::step_badge(
            &mut element,
            Point::new(x + 35.0, y + 20.0),
            15.0,
            theme.badge_color(),
            step.step(),
        );

        let text_x = x + 60.0;
        let mut lines = vec![(
            step.title().to_string(),
            TextStyle::new(14.0).with_weight(FontWeight::Bold).with_color(dark),
        )];
        if !step.description().is_empty() {
            lines.push((step.description().to_string(), TextStyle::new(12.0).with_color(muted)));
        }
        if !step.services().is_empty() {
            lines.push((
                format!("Services: {}", step.services().join(", ")),
                TextStyle::new(11.0).with_color(connector_color()),
            ));
        }
        if !step.details().is_empty() {
            lines.push((step.details().to_string(), TextStyle::new(11.0).with_color(muted)));
        }

        for (line, (text, style)) in lines.into_iter().enumerate() {
            element.push(
                RenderLayer::Text,
                Label::new(Point::new(text_x, y + 18.0 + line as f32 * 15.0), text, style),
            );
        }
    }

    element
}

#[cfg(test)]
mod tests {
    use stackmap_core::{
        scene::Primitive,
        semantic::{Category, EdgeKind},
    };

    use super::*;

    fn pipeline() -> LayeredArchitecture {
        LayeredArchitecture::new(
            vec![
                Layer::new(
                    "Ingestion",
                    vec![
                        Node::new("api", "API", Category::Api),
                        Node::new("queue", "Queue", Category::Other("message_queue".into())),
                    ],
                )
                .with_description("Receives requests"),
                Layer::new("Unused", vec![]),
                Layer::new("Storage", vec![Node::new("db", "Orders DB", Category::Database)]),
            ],
            vec![
                Edge::new("api", "db")
                    .with_kind(EdgeKind::Query)
                    .with_description("reads orders"),
                Edge::new("api", "queue").with_kind(EdgeKind::DataFlow),
                Edge::new("queue", "cache"),
            ],
        )
    }

    fn containers(scene: &Scene) -> Vec<&Element> {
        scene
            .elements()
            .iter()
            .filter(|element| element.role() == Role::Container)
            .collect()
    }

    #[test]
    fn test_empty_layers_are_skipped_and_numbered() {
        let scene = render(&pipeline(), &AppConfig::default()).unwrap();
        let panels = containers(&scene);

        assert_eq!(panels.len(), 2);
        assert_eq!(
            panels[0].labels().collect::<Vec<_>>(),
            vec!["1", "Ingestion", "Receives requests"]
        );
        assert_eq!(panels[1].labels().collect::<Vec<_>>(), vec!["2", "Storage"]);
        assert!(!scene.labels().any(|label| label == "Unused"));
    }

    #[test]
    fn test_explicit_order_and_color() {
        let layered = LayeredArchitecture::new(
            vec![
                Layer::new("Edge", vec![Node::new("cdn", "CDN", Category::Cloud)])
                    .with_order(7)
                    .with_color(hex(0x11, 0x22, 0x33)),
            ],
            vec![],
        );
        let scene = render(&layered, &AppConfig::default()).unwrap();
        let panel = containers(&scene)[0];

        assert_eq!(panel.labels().next(), Some("7"));
        match &panel.items()[0].1 {
            Primitive::Rect(rect) => assert_eq!(rect.fill(), Some(hex(0x11, 0x22, 0x33))),
            other => panic!("expected panel rect, got {other:?}"),
        }
    }

    #[test]
    fn test_connector_lists_crossing_connections() {
        let scene = render(&pipeline(), &AppConfig::default()).unwrap();
        let connectors: Vec<&Element> = scene
            .elements()
            .iter()
            .filter(|element| {
                element.role() == Role::Decoration
                    && element.primitives().any(|primitive| primitive.as_curve().is_some())
            })
            .collect();

        assert_eq!(connectors.len(), 1);
        assert_eq!(
            connectors[0].labels().collect::<Vec<_>>(),
            vec!["query reads orders"]
        );
    }

    #[test]
    fn test_service_lines_and_cards() {
        let scene = render(&pipeline(), &AppConfig::default()).unwrap();

        assert_eq!(scene.node_count(), 3);
        assert_eq!(scene.edge_count(), 2);
        assert_eq!(scene.diagnostics().len(), 1);
        assert!(scene.labels().any(|label| label == "Message Queue"));

        let api = scene.node(Id::new("api")).unwrap().bounds().unwrap();
        let db = scene.node(Id::new("db")).unwrap().bounds().unwrap();
        assert!(db.min_y() > api.max_y());
    }

    #[test]
    fn test_workflow_panel() {
        let empty = render(&pipeline(), &AppConfig::default()).unwrap();
        assert!(
            empty
                .labels()
                .any(|label| label == "No processing workflow available")
        );

        let layered = pipeline().with_workflow(vec![
            WorkflowStep::new(1, "Accept order").with_services(vec!["api".into(), "queue".into()]),
        ]);
        let scene = render(&layered, &AppConfig::default()).unwrap();
        let labels: Vec<&str> = scene.labels().collect();

        assert!(labels.contains(&"Processing Workflow"));
        assert!(labels.contains(&"Accept order"));
        assert!(labels.contains(&"Services: api, queue"));
        assert!(!labels.contains(&"No processing workflow available"));
    }

    #[test]
    fn test_default_titles() {
        let scene = render(&LayeredArchitecture::default(), &AppConfig::default()).unwrap();
        assert_eq!(scene.title(), Some(DEFAULT_TITLE));
        assert!(scene.labels().any(|label| label == SUBTITLE));
    }
}
