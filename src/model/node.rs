//! Node module for phylogenetic tree representation.

use std::fmt;
use std::ops::Deref;

/// Index of a node in a tree (arena).
pub type NodeIndex = usize;

// =#========================================================================#=
// NODE
// =#========================================================================#=
/// Represents a node in a phylogenetic tree.
///
/// A node is a *leaf* iff it has no children. Internal nodes may carry a
/// name too (Newick allows labelled clades), but usually it is empty.
///
/// # Invariants
/// - `index` is the position of this node in the tree arena
/// - `parent` is `None` only for the root
/// - `children` are kept in parse order
/// - `length` is non-negative and finite if set (enforced by [BranchLength])
#[derive(PartialEq, Debug, Clone)]
pub struct Node {
    index: NodeIndex,
    name: String,
    length: Option<BranchLength>,
    parent: Option<NodeIndex>,
    children: Vec<NodeIndex>,
}

impl Node {
    pub(crate) fn new(
        index: NodeIndex,
        name: String,
        length: Option<BranchLength>,
        children: Vec<NodeIndex>,
    ) -> Self {
        Node {
            index,
            name,
            length,
            parent: None,
            children,
        }
    }

    /// Returns the index of this node.
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Returns the name (label) of this node, possibly empty.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the branch length to the parent, `0.0` if unspecified.
    pub fn length(&self) -> f64 {
        self.length.map_or(0.0, |length| *length)
    }

    /// Returns the branch length as given in the input, if any.
    pub fn branch_length(&self) -> Option<BranchLength> {
        self.length
    }

    /// Returns the index of the parent, `None` for the root.
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: NodeIndex) {
        self.parent = Some(parent);
    }

    pub(crate) fn set_branch_length(&mut self, length: Option<BranchLength>) {
        self.length = length;
    }

    /// Returns the children in parse order.
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    /// Returns `true` if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if this node has at least one child.
    pub fn is_internal(&self) -> bool {
        !self.children.is_empty()
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length.
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    pub fn new(length: f64) -> Self {
        Self::try_new(length)
            .unwrap_or_else(|| panic!("Branch length must be non-negative and finite, got {length}"))
    }

    /// Creates a new branch length, or `None` if `length` is negative or not finite.
    ///
    /// `-0.0` is stored as `0.0`.
    pub fn try_new(length: f64) -> Option<Self> {
        (length >= 0.0 && length.is_finite()).then_some(BranchLength(length + 0.0))
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl fmt::Display for BranchLength {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
