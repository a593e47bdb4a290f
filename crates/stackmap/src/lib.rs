//! Stackmap - architecture and technology stack diagrams from JSON.
//!
//! A descriptor names its `style` and carries the nodes and edges to draw.
//! Stackmap lays the nodes out, routes the edges between the committed node
//! positions and renders the result to SVG.

pub mod config;
pub mod layout;
pub mod render;
pub mod theme;

mod error;
mod export;

pub use stackmap_core::{color, geometry, identifier, scene, semantic};

pub use error::StackmapError;

use log::{debug, info, trace};

use config::AppConfig;
use export::Exporter;
use scene::Scene;
use semantic::Descriptor;

/// Builder for parsing and rendering stackmap diagrams.
///
/// # Examples
///
/// ```rust
/// use stackmap::{DiagramBuilder, config::AppConfig};
///
/// let source = r#"{
///     "style": "architecture",
///     "components": [
///         {"id": "web", "name": "Web", "type": "frontend", "position": {"x": 100, "y": 150}},
///         {"id": "db", "name": "DB", "type": "database", "position": {"x": 350, "y": 150}}
///     ],
///     "flows": [{"from": "web", "to": "db", "label": "queries", "step": 1}]
/// }"#;
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let descriptor = builder.parse(source).expect("Failed to parse");
/// let svg = builder.render_svg(&descriptor).expect("Failed to render");
/// assert!(svg.contains("queries"));
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Parse a JSON descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`StackmapError::Json`] for malformed JSON, an unknown
    /// `style`, or fields of the wrong type.
    pub fn parse(&self, source: &str) -> Result<Descriptor, StackmapError> {
        info!(source_len = source.len(); "Parsing descriptor");

        let descriptor: Descriptor = serde_json::from_str(source)?;

        debug!(style = descriptor.style(); "Descriptor parsed successfully");
        trace!(descriptor:?; "Parsed descriptor");

        Ok(descriptor)
    }

    /// Lay out and render a descriptor into a scene.
    ///
    /// # Errors
    ///
    /// Returns [`StackmapError::Config`] for an unusable configuration and
    /// [`StackmapError::DuplicateId`] when duplicate ids are rejected.
    pub fn render_scene(&self, descriptor: &Descriptor) -> Result<Scene, StackmapError> {
        info!(style = descriptor.style(); "Rendering scene");
        let scene = render::render(descriptor, &self.config)?;

        for diagnostic in scene.diagnostics() {
            debug!(diagnostic:% = diagnostic; "Scene diagnostic");
        }
        info!(
            nodes_count = scene.node_count(),
            edges_count = scene.edge_count();
            "Scene rendered"
        );

        Ok(scene)
    }

    /// Render a descriptor to an SVG string.
    ///
    /// # Errors
    ///
    /// Everything [`DiagramBuilder::render_scene`] returns, plus
    /// [`StackmapError::Export`] if the document cannot be produced.
    pub fn render_svg(&self, descriptor: &Descriptor) -> Result<String, StackmapError> {
        let scene = self.render_scene(descriptor)?;
        self.export_svg(&scene)
    }

    /// Export an already rendered scene to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`StackmapError::Export`] if the document cannot be produced.
    pub fn export_svg(&self, scene: &Scene) -> Result<String, StackmapError> {
        let mut exporter = export::svg::Svg::new(Vec::new());
        exporter.export_scene(scene)?;
        let svg = String::from_utf8(exporter.into_inner())
            .map_err(|err| export::Error::Render(err.to_string()))?;

        info!(svg_len = svg.len(); "SVG rendered successfully");
        Ok(svg)
    }
}
