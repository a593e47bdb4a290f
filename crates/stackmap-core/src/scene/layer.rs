//! Z-order layers of the scene.
//!
//! Every primitive is tagged with a [`RenderLayer`]. Adapters emit layers
//! bottom to top in declaration order and keep insertion order inside a
//! layer, so a renderer never has to sort its output by hand.

/// Rendering layers, bottom first.
///
/// The `Ord` derive uses declaration order, so the first variant renders
/// first (bottom) and the last variant renders last (top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RenderLayer {
    /// Diagram background and header bars
    Background,
    /// Panels grouping nodes (layers, columns, account boundaries)
    Container,
    /// Node boxes and icons
    Node,
    /// Connectors between nodes
    Edge,
    /// Step badges and label pills drawn over connectors
    Annotation,
    /// Text labels
    Text,
}

impl RenderLayer {
    /// Returns a human-readable name for this layer.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Container => "container",
            Self::Node => "node",
            Self::Edge => "edge",
            Self::Annotation => "annotation",
            Self::Text => "text",
        }
    }
}
