//! Descriptor types for stackmap diagrams.
//!
//! This module contains the input model consumed by the renderers:
//! - [`Node`] and [`Edge`] - the building blocks shared by every style
//! - [`Category`] and [`EdgeKind`] - open enumerations selecting colors and icons
//! - [`Diagram`] - a free-form architecture flow
//! - [`Descriptor`] - any supported diagram, tagged by its `style` field
//!
//! Descriptors are plain data. Renderers never mutate them; they only derive
//! a [`Scene`](crate::scene::Scene) from them.

mod descriptor;

pub use descriptor::{
    Descriptor, Layer, LayeredArchitecture, ServiceGrid, TechStack, WorkflowStep,
};

use std::{convert::Infallible, fmt, str::FromStr};

use serde::{Deserialize, Deserializer, de};

use crate::{color::Color, geometry::Point, identifier::Id};

/// Component category, selecting the default icon and color of a node.
///
/// Parsing is case-insensitive and never fails: unknown names become
/// [`Category::Other`] and keep their original spelling for captions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Category {
    User,
    Database,
    Api,
    #[default]
    Service,
    Frontend,
    Backend,
    Cloud,
    Code,
    Language,
    Storage,
    Other(String),
}

impl Category {
    /// Returns the configuration key of this category.
    pub fn name(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Database => "database",
            Self::Api => "api",
            Self::Service => "service",
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Cloud => "cloud",
            Self::Code => "code",
            Self::Language => "language",
            Self::Storage => "storage",
            Self::Other(name) => name,
        }
    }

    /// Human-readable caption, with underscores shown as spaces.
    pub fn caption(&self) -> String {
        self.name().replace('_', " ")
    }
}

impl FromStr for Category {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "user" => Self::User,
            "database" => Self::Database,
            "api" => Self::Api,
            "service" => Self::Service,
            "frontend" => Self::Frontend,
            "backend" => Self::Backend,
            "cloud" => Self::Cloud,
            "code" => Self::Code,
            "language" => Self::Language,
            "storage" => Self::Storage,
            _ => Self::Other(s.to_string()),
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(category) = s.parse();
        Ok(category)
    }
}

/// Kind of a connection. Only affects the connector color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum EdgeKind {
    Invoke,
    Query,
    ReadWrite,
    DataFlow,
    Origin,
    #[default]
    Unspecified,
    Other(String),
}

impl EdgeKind {
    /// Returns the configuration key of this kind.
    pub fn name(&self) -> &str {
        match self {
            Self::Invoke => "invoke",
            Self::Query => "query",
            Self::ReadWrite => "read/write",
            Self::DataFlow => "data_flow",
            Self::Origin => "origin",
            Self::Unspecified => "",
            Self::Other(name) => name,
        }
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, Self::Unspecified)
    }
}

impl FromStr for EdgeKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "invoke" => Self::Invoke,
            "query" => Self::Query,
            "read/write" => Self::ReadWrite,
            "data_flow" => Self::DataFlow,
            "origin" => Self::Origin,
            "" => Self::Unspecified,
            _ => Self::Other(s.to_string()),
        })
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl<'de> Deserialize<'de> for EdgeKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(kind) = s.parse();
        Ok(kind)
    }
}

/// A box in a diagram.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Node {
    id: Id,
    #[serde(alias = "name")]
    label: String,
    #[serde(default, alias = "type")]
    category: Category,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    icon: Option<String>,
    #[serde(default)]
    color: Option<Color>,
    #[serde(default)]
    position: Option<Point>,
    #[serde(default)]
    layer: Option<usize>,
}

impl Node {
    pub fn new(id: &str, label: impl Into<String>, category: Category) -> Self {
        Self {
            id: Id::new(id),
            label: label.into(),
            category,
            description: None,
            icon: None,
            color: None,
            position: None,
            layer: None,
        }
    }

    /// Pins the node center at `position`.
    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    /// Pins the node to a layer for layered placement.
    pub fn with_layer(mut self, layer: usize) -> Self {
        self.layer = Some(layer);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Explicit icon, overriding the category default.
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Explicit color, overriding the category default.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Explicit center position, if any.
    pub fn position(&self) -> Option<Point> {
        self.position
    }

    pub fn layer(&self) -> Option<usize> {
        self.layer
    }
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Edge {
    #[serde(alias = "from")]
    source: Id,
    #[serde(alias = "to")]
    target: Id,
    #[serde(default)]
    label: String,
    #[serde(default, deserialize_with = "deserialize_step")]
    step: Option<u32>,
    #[serde(default, alias = "type")]
    kind: EdgeKind,
    #[serde(default)]
    description: Option<String>,
}

impl Edge {
    pub fn new(source: &str, target: &str) -> Self {
        Self {
            source: Id::new(source),
            target: Id::new(target),
            label: String::new(),
            step: None,
            kind: EdgeKind::default(),
            description: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_step(mut self, step: u32) -> Self {
        self.step = Some(step);
        self
    }

    pub fn with_kind(mut self, kind: EdgeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Ordinal used for step numbering.
    pub fn step(&self) -> Option<u32> {
        self.step
    }

    pub fn kind(&self) -> &EdgeKind {
        &self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// A free-form architecture flow: components at (mostly) explicit positions
/// connected by numbered flows.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Diagram {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, alias = "components")]
    nodes: Vec<Node>,
    #[serde(default, alias = "flows")]
    edges: Vec<Edge>,
}

impl Diagram {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            nodes,
            edges,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// Accepts a step ordinal given as an integer or a numeric string.
fn deserialize_step<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StepVisitor;

    impl<'de> de::Visitor<'de> for StepVisitor {
        type Value = Option<u32>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a non-negative step number or numeric string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            u32::try_from(v)
                .map(Some)
                .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            u32::try_from(v)
                .map(Some)
                .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse()
                .map(Some)
                .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(StepVisitor)
}
