//! Data model for phylogenetic trees.
//!
//! Trees are represented by [Tree], which uses the arena pattern to store
//! [Node]s referenced by [NodeIndex]. Nodes may have any number of
//! children and store the index of their parent.
//!
//! Trees are built bottom-up, by the [Newick parser](crate::newick) or by
//! [pruning](crate::prune), and are never edited in place afterwards.

pub mod node;
pub mod tree;

pub use node::{BranchLength, Node, NodeIndex};
pub use tree::{PostOrderIter, PreOrderIter, Tree};
