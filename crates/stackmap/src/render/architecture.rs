//! Architecture flow renderer.
//!
//! Components are drawn as cards at their positions; flows are quadratic
//! curves from card center to card center with an arrowhead, a step badge
//! and a label pill anchored at the midpoint.

use log::{debug, info};

use stackmap_core::{
    color::Color,
    geometry::{Bounds, Point, Size},
    scene::{Curve, Element, Label, Rect, RenderLayer, Role, Scene, StrokeDefinition, TextStyle},
    semantic::Diagram,
};

use super::common::{self, Card};
use crate::{
    config::AppConfig,
    error::StackmapError,
    layout::{EdgeRoute, Engine},
    theme::Theme,
};

/// Title used when the diagram has none.
pub const DEFAULT_TITLE: &str = "Project Architecture";

const CANVAS_WIDTH: f32 = 1000.0;
const CANVAS_HEIGHT: f32 = 500.0;
/// Space reserved above the components for the title.
const TITLE_AREA: f32 = 70.0;
const TITLE_BASELINE: f32 = 40.0;
/// Minimum distance between the title baseline and the topmost component.
const TITLE_GAP: f32 = 30.0;
const BADGE_RADIUS: f32 = 15.0;
/// Vertical distance from the midpoint to the center of the label pill.
const PILL_RISE: f32 = 25.0;

/// Renders an architecture flow diagram.
///
/// # Errors
///
/// Fails only when the duplicate id policy rejects the input or the
/// configuration is unusable.
pub fn render(diagram: &Diagram, config: &AppConfig) -> Result<Scene, StackmapError> {
    let layout_config = config.layout();
    let theme = config.style().theme();
    let node_size = layout_config.node_size();
    let padding = layout_config.padding();

    info!(
        nodes_count = diagram.nodes().len(),
        edges_count = diagram.edges().len();
        "Rendering architecture diagram"
    );

    let mut engine = Engine::new(layout_config).with_origin(Point::new(
        padding + node_size.width() / 2.0,
        TITLE_AREA + padding + node_size.height() / 2.0,
    ));

    let node_layout = engine.layout_nodes(diagram.nodes(), diagram.edges())?;
    let edge_layout = engine.layout_edges(diagram.edges(), &node_layout);

    let width = node_layout
        .bounds()
        .map_or(CANVAS_WIDTH, |bounds| CANVAS_WIDTH.max(bounds.max_x() + padding));
    let title = diagram.title().unwrap_or(DEFAULT_TITLE);
    let mut scene = Scene::new(Size::new(width, CANVAS_HEIGHT)).with_title(title);

    let title_baseline = node_layout.bounds().map_or(TITLE_BASELINE, |bounds| {
        TITLE_BASELINE.min(bounds.min_y() - TITLE_GAP)
    });
    scene.add(common::heading(title, width / 2.0, title_baseline, 24.0));

    for positioned in node_layout.iter() {
        let node = positioned.node();
        let color = theme.node_color(node);
        scene.add(common::node_card(
            positioned,
            Card {
                icon: theme.node_icon(node),
                name: node.label(),
                caption: node.description(),
                border: color,
                name_color: color,
            },
        ));
    }

    for route in edge_layout.routes() {
        scene.add(flow_element(route, theme));
    }

    if let Some(description) = diagram.description() {
        let top = scene
            .content_bounds()
            .map_or(TITLE_AREA, |bounds| bounds.max_y() + 20.0);
        scene.add(description_panel(description, top, width));
    }

    debug!(
        nodes_count = node_layout.len(),
        edges_count = edge_layout.len();
        "Architecture diagram laid out"
    );

    let diagnostics = node_layout
        .diagnostics()
        .iter()
        .chain(edge_layout.diagnostics())
        .copied()
        .collect::<Vec<_>>();
    super::finish(scene, config, diagnostics)
}

fn flow_element(route: &EdgeRoute<'_>, theme: &Theme) -> Element {
    let edge = route.edge();
    let geometry = route.geometry();
    let color = theme.flow_color();

    let mut element = Element::new(Role::Edge {
        source: edge.source(),
        target: edge.target(),
    })
    .with(
        RenderLayer::Edge,
        Curve::quadratic(
            geometry.start(),
            geometry.control(),
            geometry.end(),
            StrokeDefinition::solid(color, 3.0),
        )
        .with_arrowhead(color),
    );

    if let Some(step) = edge.step() {
        common::step_badge(
            &mut element,
            geometry.mid(),
            BADGE_RADIUS,
            theme.badge_color(),
            step,
        );
    }

    if !edge.label().is_empty() {
        common::label_pill(
            &mut element,
            geometry.mid().add_point(Point::new(0.0, -PILL_RISE)),
            edge.label(),
            color,
            common::centered(11.0).with_color(common::dark_text()),
        );
    }

    element
}

fn description_panel(description: &str, top: f32, width: f32) -> Element {
    let bounds = Bounds::new_from_top_left(Point::new(20.0, top), Size::new(width - 40.0, 50.0));
    Element::new(Role::Decoration)
        .with(
            RenderLayer::Container,
            Rect::new(bounds)
                .with_fill(Color::white().with_alpha(0.9))
                .with_corner_radius(10.0),
        )
        .with(
            RenderLayer::Text,
            Label::new(
                Point::new(35.0, top + 30.0),
                description,
                TextStyle::new(14.0).with_color(common::muted_text()),
            ),
        )
}

#[cfg(test)]
mod tests {
    use stackmap_core::{
        identifier::Id,
        scene::{Diagnostic, Primitive},
        semantic::{Category, Edge, Node},
    };

    use super::*;
    use crate::config::{CurveConfig, LayoutConfig, StyleConfig};

    fn config() -> AppConfig {
        AppConfig::new(
            LayoutConfig::default().with_curve(CurveConfig::default().with_seed(1)),
            StyleConfig::default(),
        )
    }

    fn shop() -> Diagram {
        Diagram::new(
            vec![
                Node::new("user", "Customer", Category::User)
                    .with_position(Point::new(100.0, 150.0)),
                Node::new("web", "Storefront", Category::Frontend)
                    .with_position(Point::new(350.0, 150.0))
                    .with_description("React SPA"),
                Node::new("db", "Orders", Category::Database)
                    .with_position(Point::new(600.0, 150.0)),
            ],
            vec![
                Edge::new("user", "web").with_label("browses").with_step(1),
                Edge::new("web", "db").with_label("stores").with_step(2),
                Edge::new("web", "payments").with_label("charges"),
            ],
        )
    }

    #[test]
    fn test_counts_and_skipped_edge() {
        let scene = render(&shop(), &config()).unwrap();

        assert_eq!(scene.node_count(), 3);
        assert_eq!(scene.edge_count(), 2);
        assert_eq!(
            scene.diagnostics(),
            &[Diagnostic::MissingReference {
                source: Id::new("web"),
                target: Id::new("payments"),
                missing: Id::new("payments"),
            }]
        );
        assert!(!scene.labels().any(|label| label == "charges"));
    }

    #[test]
    fn test_default_title_and_description() {
        let diagram = shop().with_description("A small shop");
        let scene = render(&diagram, &config()).unwrap();

        assert_eq!(scene.title(), Some(DEFAULT_TITLE));
        assert!(scene.labels().any(|label| label == DEFAULT_TITLE));
        assert!(scene.labels().any(|label| label == "A small shop"));
        assert!(scene.labels().any(|label| label == "React SPA"));
    }

    #[test]
    fn test_flow_decorations_anchor_at_midpoint() {
        let scene = render(&shop(), &config()).unwrap();
        let flow = scene
            .elements()
            .iter()
            .find(|element| {
                element.role()
                    == Role::Edge {
                        source: Id::new("user"),
                        target: Id::new("web"),
                    }
            })
            .unwrap();

        let curve = flow.primitives().find_map(Primitive::as_curve).unwrap();
        assert_eq!(curve.start(), Point::new(100.0, 150.0));
        assert_eq!(curve.end(), Point::new(350.0, 150.0));
        assert!(curve.marker_end().is_some());

        let badge = flow
            .primitives()
            .find_map(|primitive| match primitive {
                Primitive::Circle(circle) => Some(circle.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(badge.center(), Point::new(225.0, 150.0));
        assert_eq!(badge.radius(), BADGE_RADIUS);

        let labels: Vec<&str> = flow.labels().collect();
        assert_eq!(labels, vec!["1", "browses"]);
    }

    #[test]
    fn test_unpositioned_nodes_are_placed() {
        let diagram = Diagram::new(
            vec![
                Node::new("a", "A", Category::Service),
                Node::new("b", "B", Category::Service),
            ],
            vec![Edge::new("a", "b")],
        );
        let scene = render(&diagram, &config()).unwrap();
        let a = scene.node(Id::new("a")).unwrap().bounds().unwrap();
        let b = scene.node(Id::new("b")).unwrap().bounds().unwrap();

        assert!(b.min_x() > a.max_x());
        assert!(a.min_y() >= TITLE_AREA);
    }

    #[test]
    fn test_nodes_at_negative_extent_stay_visible() {
        let diagram = Diagram::new(
            vec![
                Node::new("a", "A", Category::Api).with_position(Point::new(0.0, 0.0)),
                Node::new("b", "B", Category::Database).with_position(Point::new(100.0, 100.0)),
            ],
            vec![Edge::new("a", "b").with_step(1)],
        );
        let scene = render(&diagram, &config()).unwrap();
        let viewport = scene.viewport();

        let a = scene.node(Id::new("a")).unwrap().bounds().unwrap();
        assert!(a.min_x() < 0.0 && a.min_y() < 0.0);
        assert!(viewport.min_x() <= a.min_x() && viewport.min_y() <= a.min_y());
        assert!(viewport.max_x() >= a.max_x() && viewport.max_y() >= a.max_y());

        let title = scene
            .elements()
            .iter()
            .find(|element| element.labels().any(|label| label == DEFAULT_TITLE))
            .and_then(Element::bounds)
            .unwrap();
        assert!(title.max_y() < a.min_y());
        assert!(viewport.min_y() <= title.min_y());
    }

    #[test]
    fn test_empty_diagram() {
        let scene = render(&Diagram::default(), &config()).unwrap();
        assert_eq!(scene.node_count(), 0);
        assert_eq!(scene.edge_count(), 0);
        assert!(scene.diagnostics().is_empty());
    }
}
