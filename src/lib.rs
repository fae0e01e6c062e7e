//! Langtree is a library to draw language family trees coloured by the
//! results of a search over cultural and linguistic variables.
//!
//! Core functionality provided:
//! - Newick: Parse phylogenetic trees from Newick strings (and write them back).
//! - Pruning: Restrict a tree to the leaves (languages) that have a search
//!   result, dropping every clade left without leaves.
//! - Layout: Place nodes by distance from the root (horizontal) and by a
//!   cluster layout (vertical), independent of any drawing surface.
//! - Colouring: Map the score of each leaf onto a hue between red and blue.
//! - Rendering: Project a laid-out tree into edges, markers and labels,
//!   and write them as SVG.
//! - Pipeline: Process every tree of a search result; a tree that fails does
//!   not affect the others.
//!
//! The tree model uses the arena pattern, so no direct node references are
//! stored, only node indices. See [crate::model] for more details.
//!
//! # Usage patterns
//! 1. Process a whole search result with [pipeline::process_search].
//! 2. Use the single stages ([newick::parse_str], [prune::prune],
//!    [layout::layout], [render::render]) directly.
//!
//! ## Example
//! ```
//! use langtree::parse_newick_str;
//! use langtree::color::{LeafResult, Scores};
//! use langtree::layout::{layout, LayoutConfig};
//! use langtree::render::{render, RenderConfig};
//!
//! let tree = parse_newick_str("((deu:1,nld:1):1,eng:2);")?;
//! let scores = Scores::from_results(&[LeafResult::new("deu", 1.0), LeafResult::new("eng", 2.0)], 2.0);
//!
//! let pruned = tree.pruned(&scores.keep_set())?;
//! assert_eq!(pruned.to_newick(), "((deu:1):1,eng:2);");
//!
//! let layout = layout(&pruned, &LayoutConfig::default());
//! let rendered = render(&pruned, &layout, &scores, &RenderConfig::default());
//! assert_eq!(rendered.markers.len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod color;
pub mod error;
pub mod layout;
pub mod model;
pub mod newick;
pub mod parser;
pub mod pipeline;
pub mod prune;
pub mod render;
pub mod view;

pub use error::TreeError;

use crate::model::Tree;
use crate::parser::ParseError;

// ============================================================================
// Quick Newick API
// ============================================================================
/// Parse a Newick string using default settings, returning a [Tree].
///
/// See [`newick::parse_str`] for full documentation of this convenience function.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParseError> {
    newick::parse_str(newick)
}
