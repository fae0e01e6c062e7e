//! Provides the arena-based tree representation.
//!
//! * [Tree] - phylogenetic tree with arbitrary branching, nodes stored in
//!   an arena and referenced by [NodeIndex]
//! * [PreOrderIter] / [PostOrderIter] - stack-based traversals, so deep
//!   trees never exhaust the call stack

use crate::model::node::{BranchLength, Node, NodeIndex};
use crate::newick;
use std::collections::HashSet;
use std::fmt;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: NodeIndex = usize::MAX;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// A phylogenetic tree represented using the arena pattern on [Node].
///
/// Nodes are stored in a contiguous vector and referenced by [NodeIndex].
/// Every node knows its parent, so upward traversal needs no search and
/// there is no cyclic ownership.
///
/// # Structure
/// - All nodes are stored in the arena and are reachable from the root
///   (trees are built fresh by the parser and by pruning).
/// - No assumption on order of indices (the parser adds children before
///   their parent, so the root usually comes last).
/// - Branch lengths are optional; if provided they are non-negative.
///
/// # Empty tree
/// [Tree::empty()] is a single unnamed node without children. It is what
/// pruning returns when no leaf survives; [Tree::is_empty()] detects it and
/// it has no leaves.
///
/// # Construction
/// Add nodes bottom-up with [add_leaf](Self::add_leaf) and
/// [add_internal](Self::add_internal), then mark the root with
/// [set_root](Self::set_root). Test validity with [Tree::is_valid()].
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    /// Nodes of this tree (arena pattern)
    nodes: Vec<Node>,

    /// Index of the root of this tree
    root_index: NodeIndex,

    /// Name of tree; optional, e.g. from the search result
    name: Option<String>,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl Tree {
    /// Creates a new tree under construction with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Tree {
            nodes: Vec::with_capacity(capacity),
            root_index: NO_ROOT_SET_INDEX,
            name: None,
        }
    }

    /// Returns the empty tree: a single unnamed root without children.
    pub fn empty() -> Self {
        let mut tree = Tree::with_capacity(1);
        let root = tree.add_leaf(String::new(), None);
        tree.set_root(root);
        tree
    }

    /// Attaches a name to this tree.
    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    /// Adds a leaf to the tree and returns its index.
    pub fn add_leaf(&mut self, name: String, length: Option<BranchLength>) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes.push(Node::new(index, name, length, Vec::new()));
        index
    }

    /// Adds an internal node with the given (already added) children and
    /// returns its index. The children's parent is set to the new node.
    pub fn add_internal(
        &mut self,
        name: String,
        children: Vec<NodeIndex>,
        length: Option<BranchLength>,
    ) -> NodeIndex {
        let index = self.nodes.len();
        for &child in &children {
            self.nodes[child].set_parent(index);
        }
        self.nodes.push(Node::new(index, name, length, children));
        index
    }

    /// Marks the node at `index` as root of the tree.
    pub fn set_root(&mut self, index: NodeIndex) {
        self.root_index = index;
    }

    /// Returns reference to name of this tree, or `None` if not set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set a name for this tree.
    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Returns whether root of tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns a reference to the root node.
    ///
    /// # Panics
    /// Panics if the root hasn't been set yet.
    pub fn root(&self) -> &Node {
        &self[self.root_index]
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> NodeIndex {
        self.root_index
    }

    /// Returns a reference to the node at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self[index]
    }

    pub(crate) fn node_mut(&mut self, index: NodeIndex) -> &mut Node {
        &mut self.nodes[index]
    }

    /// Returns the index of the parent of `index`, `None` for the root.
    pub fn parent(&self, index: NodeIndex) -> Option<NodeIndex> {
        self[index].parent()
    }

    /// Returns the number of nodes in this tree.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if this is the [empty tree](Tree::empty).
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1 && self.is_root_set() && self.root().name().is_empty()
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.leaves().count()
    }

    /// Returns an iterator over the leaves in traversal (pre-order) order.
    pub fn leaves(&self) -> impl Iterator<Item = &Node> {
        let empty = self.is_empty();
        self.pre_order_iter()
            .filter(move |node| !empty && node.is_leaf())
    }

    /// Returns the names of all leaves in traversal order.
    pub fn leaf_names(&self) -> Vec<&str> {
        self.leaves().map(Node::name).collect()
    }

    /// Returns the set of leaf names.
    pub fn leaf_name_set(&self) -> HashSet<&str> {
        self.leaves().map(Node::name).collect()
    }

    /// Returns the index of the first leaf (in traversal order) with the given name.
    pub fn find_leaf(&self, name: &str) -> Option<NodeIndex> {
        self.leaves()
            .find(|node| node.name() == name)
            .map(Node::index)
    }

    /// Returns the indices on the path from `index` up to the root (both included).
    pub fn ancestors(&self, index: NodeIndex) -> Vec<NodeIndex> {
        let mut path = vec![index];
        let mut current = index;
        while let Some(parent) = self.parent(current) {
            path.push(parent);
            current = parent;
        }
        path
    }

    /// Converts this tree to a Newick string.
    pub fn to_newick(&self) -> String {
        newick::to_newick(self)
    }
}

impl Tree {
    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is set and in bounds, and the root has no parent
    /// - All node indices match their position in the arena
    /// - All child indices are in bounds and point back to their parent
    /// - Every non-root node has a parent listing it as a child
    /// - Every node is reachable from the root exactly once
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        if !self.is_root_set() || self.root_index >= self.nodes.len() {
            return false;
        }

        if self.root().parent().is_some() {
            return false;
        }

        for (index, node) in self.nodes.iter().enumerate() {
            if node.index() != index {
                return false;
            }

            for &child in node.children() {
                if child >= self.nodes.len() || self.nodes[child].parent() != Some(index) {
                    return false;
                }
            }

            if index != self.root_index {
                match node.parent() {
                    None => return false,
                    Some(parent) => {
                        if parent >= self.nodes.len()
                            || !self.nodes[parent].children().contains(&index)
                        {
                            return false;
                        }
                    }
                }
            }
        }

        // Reachability: a pre-order walk must visit every arena entry once
        let mut seen = vec![false; self.nodes.len()];
        for node in self.pre_order_iter() {
            if seen[node.index()] {
                return false;
            }
            seen[node.index()] = true;
        }

        seen.into_iter().all(|visited| visited)
    }
}

impl std::ops::Index<NodeIndex> for Tree {
    type Output = Node;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_newick())
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
impl Tree {
    /// Returns an iterator over the tree in post-order (children before parents).
    ///
    /// Children are visited in stored order. This is the traversal used to
    /// aggregate information from the leaves upward, e.g. during pruning.
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self)
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    ///
    /// Children are visited in stored order.
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// Uses an explicit stack instead of recursion.
pub struct PostOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<(NodeIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push((tree.root_index, false));
        }
        PostOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let node = &self.tree[index];

            if children_visited || node.is_leaf() {
                return Some(node);
            }

            self.stack.push((index, true));
            // Push in reverse, so first child is processed first
            for &child in node.children().iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// Uses an explicit stack instead of recursion.
pub struct PreOrderIter<'a> {
    tree: &'a Tree,
    stack: Vec<NodeIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a Tree) -> Self {
        let mut stack = Vec::new();
        if tree.is_root_set() {
            stack.push(tree.root_index);
        }
        PreOrderIter { tree, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let node = &self.tree[index];

        for &child in node.children().iter().rev() {
            self.stack.push(child);
        }

        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds `(A:1,(B:2,C:3):1);` by hand.
    fn small_tree() -> Tree {
        let mut tree = Tree::with_capacity(5);
        let a = tree.add_leaf("A".to_string(), Some(BranchLength::new(1.0)));
        let b = tree.add_leaf("B".to_string(), Some(BranchLength::new(2.0)));
        let c = tree.add_leaf("C".to_string(), Some(BranchLength::new(3.0)));
        let bc = tree.add_internal(String::new(), vec![b, c], Some(BranchLength::new(1.0)));
        let root = tree.add_internal(String::new(), vec![a, bc], None);
        tree.set_root(root);
        tree
    }

    #[test]
    fn test_counts_and_leaves() {
        let tree = small_tree();
        assert!(tree.is_valid());
        assert!(!tree.is_empty());
        assert_eq!(tree.num_nodes(), 5);
        assert_eq!(tree.num_leaves(), 3);
        assert_eq!(tree.leaf_names(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_parent_links() {
        let tree = small_tree();
        let c = tree.find_leaf("C").unwrap();
        let path = tree.ancestors(c);
        assert_eq!(path.len(), 3);
        assert_eq!(*path.last().unwrap(), tree.root_index());
        assert_eq!(tree.parent(tree.root_index()), None);
    }

    #[test]
    fn test_traversal_orders() {
        let tree = small_tree();
        let pre: Vec<_> = tree.pre_order_iter().map(|n| n.name().to_string()).collect();
        assert_eq!(pre, vec!["", "A", "", "B", "C"]);

        let post: Vec<_> = tree.post_order_iter().map(|n| n.index()).collect();
        assert_eq!(post, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_empty_tree() {
        let tree = Tree::empty();
        assert!(tree.is_valid());
        assert!(tree.is_empty());
        assert_eq!(tree.num_nodes(), 1);
        assert_eq!(tree.num_leaves(), 0);
        assert!(tree.leaf_names().is_empty());
    }

    #[test]
    fn test_single_named_leaf_is_not_empty() {
        let mut tree = Tree::with_capacity(1);
        let a = tree.add_leaf("A".to_string(), None);
        tree.set_root(a);
        assert!(!tree.is_empty());
        assert_eq!(tree.leaf_names(), vec!["A"]);
    }

    #[test]
    fn test_invalid_without_root() {
        let mut tree = Tree::with_capacity(1);
        tree.add_leaf("A".to_string(), None);
        assert!(!tree.is_valid());
    }

    #[test]
    fn test_invalid_with_unreachable_node() {
        let mut tree = small_tree();
        tree.add_leaf("D".to_string(), None);
        assert!(!tree.is_valid());
    }
}
