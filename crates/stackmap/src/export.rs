//! Export of rendered scenes.
//!
//! This is the last stage of the pipeline:
//!
//! ```text
//! JSON descriptor
//!     ↓ parse
//! Descriptor
//!     ↓ layout + render
//! Scene
//!     ↓ export (this module)
//! SVG text
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - SVG output via [`svg::Svg`]
//!
//! Export operations return [`Error`], which converts into
//! [`StackmapError::Export`](crate::StackmapError::Export) at the crate
//! boundary.

/// SVG export backend.
pub mod svg;

use stackmap_core::scene::Scene;

/// Abstraction for scene export backends.
pub trait Exporter {
    /// Writes `scene` in the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the scene cannot be converted, or
    /// [`Error::Io`] if writing the output fails.
    fn export_scene(&mut self, scene: &Scene) -> Result<(), Error>;
}

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// A conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}
