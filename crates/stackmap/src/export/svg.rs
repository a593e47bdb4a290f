//! SVG backend.
//!
//! The document mirrors the scene: one `<g data-layer="...">` per render
//! layer, bottom first, and one SVG element per primitive carrying the
//! class and ids of the element it belongs to.

mod markers;
mod primitive;

use std::io::Write;

use log::{debug, error, info};
use svg::{Document, Node, node::element as svg_element};

use stackmap_core::scene::{Curve, Primitive, Scene};

use crate::export::{self, Exporter};

/// SVG exporter writing into any [`Write`] sink.
pub struct Svg<W: Write> {
    writer: W,
}

impl<W: Write> Svg<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the sink, e.g. the buffer the document was written into.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Builds the SVG document for a scene.
    pub fn render_scene(&self, scene: &Scene) -> Document {
        let origin = scene.origin();
        let size = scene.size();
        let mut doc = Document::new()
            .set(
                "viewBox",
                format!(
                    "{} {} {} {}",
                    origin.x(),
                    origin.y(),
                    size.width(),
                    size.height()
                ),
            )
            .set("width", size.width())
            .set("height", size.height());

        if let Some(title) = scene.title() {
            let mut heading = svg_element::Element::new("title");
            heading.append(svg::node::Text::new(title));
            doc = doc.add(heading);
        }

        let curves: Vec<&Curve> = scene
            .elements()
            .iter()
            .flat_map(|element| element.primitives())
            .filter_map(Primitive::as_curve)
            .collect();
        if let Some(defs) = markers::marker_definitions(curves) {
            doc = doc.add(defs);
        }

        if let Some(background) = scene.background() {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("x", origin.x())
                    .set("y", origin.y())
                    .set("width", size.width())
                    .set("height", size.height())
                    .set("fill", background.to_string()),
            );
        }

        for (layer, items) in scene.layered() {
            let mut group = svg_element::Group::new().set("data-layer", layer.name());
            for (role, primitive) in items {
                group = group.add(primitive::to_node(primitive, role));
            }
            doc = doc.add(group);
        }

        doc
    }
}

impl<W: Write> Exporter for Svg<W> {
    fn export_scene(&mut self, scene: &Scene) -> Result<(), export::Error> {
        let doc = self.render_scene(scene);
        debug!(
            width = scene.size().width(),
            height = scene.size().height();
            "SVG document rendered"
        );

        if let Err(err) = write!(self.writer, "{doc}") {
            error!(err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        info!("SVG written");
        Ok(())
    }
}
