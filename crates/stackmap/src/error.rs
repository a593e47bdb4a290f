//! Error types for stackmap operations.
//!
//! This module provides the main error type [`StackmapError`] which wraps
//! the hard failures of the pipeline. Edges pointing at unknown nodes are
//! not errors; they are reported as
//! [`Diagnostic`](stackmap_core::scene::Diagnostic)s on the scene.

use std::io;

use thiserror::Error;

/// The main error type for stackmap operations.
#[derive(Debug, Error)]
pub enum StackmapError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid descriptor: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Duplicate node id `{0}`")]
    DuplicateId(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for StackmapError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
