//! Non-fatal findings collected while building a scene.

use std::fmt;

use crate::identifier::Id;

/// Something in the input that was skipped instead of failing the render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// An edge named a node id that is not part of the diagram; the edge
    /// was not drawn.
    MissingReference { source: Id, target: Id, missing: Id },
    /// A node id appeared more than once; only the first node was kept.
    DuplicateId { id: Id },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingReference {
                source,
                target,
                missing,
            } => write!(
                f,
                "edge `{source}` -> `{target}` skipped: unknown node `{missing}`"
            ),
            Self::DuplicateId { id } => {
                write!(f, "duplicate node id `{id}`: later definitions ignored")
            }
        }
    }
}
