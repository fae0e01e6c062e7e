//! Tree-scoped errors of the processing pipeline.

use crate::model::NodeIndex;
use crate::parser::ParseError;
use thiserror::Error;

/// Errors that abort the processing of a single tree (or the loading of a
/// search result). Other trees of the same search are not affected.
#[derive(Debug, Error)]
pub enum TreeError {
    /// The Newick string of the tree at position `tree` of the search
    /// result is malformed.
    #[error("could not parse tree {tree}: {source}")]
    Parse { tree: usize, source: ParseError },

    /// Pruning produced a leaf out of an internal node of the source tree.
    /// This is a defect in the pruning code, never a property of the input.
    #[error("internal node {node} has no children after pruning")]
    PruneInconsistency { node: NodeIndex },

    /// A search result could not be deserialised.
    #[error("invalid search result: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
