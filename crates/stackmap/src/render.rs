//! Renderers turning descriptors into scenes.
//!
//! Every renderer is a pure function of a descriptor and the configuration:
//!
//! - [`architecture`] - free-form component flows with numbered steps
//! - [`service_grid`] - provider services in a grid with typed connections
//! - [`layered`] - stacked processing layers with a workflow panel
//! - [`tech_stack`] - languages and services side by side
//!
//! All of them lay out nodes first and draw edges from the committed node
//! layout afterwards (see [`crate::layout`]).

pub mod architecture;
pub mod layered;
pub mod service_grid;
pub mod tech_stack;

mod common;

use log::debug;

use stackmap_core::{
    geometry::Insets,
    scene::{Diagnostic, Scene},
    semantic::Descriptor,
};

use crate::{config::AppConfig, error::StackmapError};

/// Renders any descriptor into a scene.
///
/// # Errors
///
/// Returns [`StackmapError::Config`] for an unusable configuration and
/// [`StackmapError::DuplicateId`] when duplicate ids are rejected.
pub fn render(descriptor: &Descriptor, config: &AppConfig) -> Result<Scene, StackmapError> {
    config.validate()?;

    let scene = match descriptor {
        Descriptor::Architecture(diagram) => architecture::render(diagram, config),
        Descriptor::ServiceGrid(grid) => service_grid::render(grid, config),
        Descriptor::LayeredArchitecture(layered) => layered::render(layered, config),
        Descriptor::TechStack(stack) => tech_stack::render(stack, config),
    }?;

    debug!(
        style = descriptor.style(),
        nodes_count = scene.node_count(),
        edges_count = scene.edge_count(),
        diagnostics_count = scene.diagnostics().len();
        "Scene rendered"
    );

    Ok(scene)
}

/// Applies the background, grows the canvas around the content and attaches
/// the diagnostics collected during layout.
fn finish(
    mut scene: Scene,
    config: &AppConfig,
    diagnostics: impl IntoIterator<Item = Diagnostic>,
) -> Result<Scene, StackmapError> {
    let background = config
        .style()
        .background_color()
        .map_err(StackmapError::Config)?;
    scene.set_background(background);
    scene.fit_to_content(Insets::uniform(config.layout().padding()));
    scene.add_diagnostics(diagnostics);
    Ok(scene)
}
