//! Style-specific descriptors and the [`Descriptor`] wrapper.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::{
    color::Color,
    semantic::{Diagram, Edge, Node},
};

/// Services of one provider account laid out in a grid.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceGrid {
    #[serde(default)]
    title: Option<String>,
    #[serde(default, alias = "services")]
    nodes: Vec<Node>,
    #[serde(default, alias = "connections")]
    edges: Vec<Edge>,
}

impl ServiceGrid {
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            title: None,
            nodes,
            edges,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// One processing stage of a layered architecture.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Layer {
    name: String,
    #[serde(default)]
    order: Option<u32>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    color: Option<Color>,
    #[serde(default)]
    services: Vec<Node>,
}

impl Layer {
    pub fn new(name: impl Into<String>, services: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            order: None,
            description: String::new(),
            color: None,
            services,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Order badge; `None` lets the renderer number layers itself.
    pub fn order(&self) -> Option<u32> {
        self.order
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn services(&self) -> &[Node] {
        &self.services
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

/// One entry of a processing workflow.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WorkflowStep {
    #[serde(default)]
    step: u32,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    services: Vec<String>,
    #[serde(default, alias = "processing_details")]
    details: String,
}

impl WorkflowStep {
    pub fn new(step: u32, title: impl Into<String>) -> Self {
        Self {
            step,
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_services(mut self, services: Vec<String>) -> Self {
        self.services = services;
        self
    }

    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn services(&self) -> &[String] {
        &self.services
    }

    pub fn details(&self) -> &str {
        &self.details
    }
}

/// Layers stacked in processing order, connected service to service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LayeredArchitecture {
    #[serde(default)]
    title: Option<String>,
    #[serde(default, alias = "processing_order")]
    layers: Vec<Layer>,
    #[serde(default, alias = "connections")]
    edges: Vec<Edge>,
    #[serde(default)]
    workflow_steps: Vec<WorkflowStep>,
}

impl LayeredArchitecture {
    pub fn new(layers: Vec<Layer>, edges: Vec<Edge>) -> Self {
        Self {
            layers,
            edges,
            ..Self::default()
        }
    }

    pub fn with_workflow(mut self, steps: Vec<WorkflowStep>) -> Self {
        self.workflow_steps = steps;
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn workflow_steps(&self) -> &[WorkflowStep] {
        &self.workflow_steps
    }
}

/// Languages and services found in a project, with usage counts.
///
/// Counts keep the input order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TechStack {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    languages: IndexMap<String, u64>,
    #[serde(default)]
    services: IndexMap<String, u64>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl TechStack {
    pub fn new(languages: IndexMap<String, u64>, services: IndexMap<String, u64>) -> Self {
        Self {
            languages,
            services,
            ..Self::default()
        }
    }

    pub fn with_edges(mut self, edges: Vec<Edge>) -> Self {
        self.edges = edges;
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn languages(&self) -> &IndexMap<String, u64> {
        &self.languages
    }

    pub fn services(&self) -> &IndexMap<String, u64> {
        &self.services
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

/// Any supported diagram, selected by the `style` field of the input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "style", rename_all = "snake_case")]
pub enum Descriptor {
    Architecture(Diagram),
    ServiceGrid(ServiceGrid),
    LayeredArchitecture(LayeredArchitecture),
    TechStack(TechStack),
}

impl Descriptor {
    /// The `style` tag of this descriptor.
    pub fn style(&self) -> &'static str {
        match self {
            Self::Architecture(_) => "architecture",
            Self::ServiceGrid(_) => "service_grid",
            Self::LayeredArchitecture(_) => "layered_architecture",
            Self::TechStack(_) => "tech_stack",
        }
    }
}

impl From<Diagram> for Descriptor {
    fn from(value: Diagram) -> Self {
        Self::Architecture(value)
    }
}
