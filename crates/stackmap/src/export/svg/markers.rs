//! Arrowhead markers, one per color in use.

use svg::node::element::{Definitions, Marker, Path};

use stackmap_core::{color::Color, scene::Curve};

/// Id of the arrowhead marker for `color`.
pub(super) fn marker_id(color: Color) -> String {
    format!("arrow-right-{}", color.to_id_safe_string())
}

/// Marker reference for a curve's `marker-end` attribute.
pub(super) fn marker_url(color: Color) -> String {
    format!("url(#{})", marker_id(color))
}

/// Definitions for every distinct arrowhead color, or `None` when no curve
/// asks for an arrowhead.
pub(super) fn marker_definitions<'a>(
    curves: impl IntoIterator<Item = &'a Curve>,
) -> Option<Definitions> {
    let mut colors: Vec<Color> = Vec::new();
    for color in curves.into_iter().filter_map(Curve::marker_end) {
        if !colors.contains(&color) {
            colors.push(color);
        }
    }
    if colors.is_empty() {
        return None;
    }

    let defs = colors.into_iter().fold(Definitions::new(), |defs, color| {
        defs.add(
            Marker::new()
                .set("id", marker_id(color))
                .set("viewBox", "0 0 10 10")
                .set("refX", 9)
                .set("refY", 5)
                .set("markerWidth", 6)
                .set("markerHeight", 6)
                .set("orient", "auto")
                .add(
                    Path::new()
                        .set("d", "M 0 0 L 10 5 L 0 10 z")
                        .set("fill", color.to_string()),
                ),
        )
    });
    Some(defs)
}
