//! Restricting trees to the leaves of interest.
//!
//! [prune] keeps exactly the leaves whose name is in a keep-set and drops
//! every internal node left without children. It makes a single post-order
//! pass: a node is only copied into the result once all of its children
//! have been decided, so chains of emptied ancestors of any depth disappear
//! together with their last leaf.
//!
//! [collapse_unary] additionally removes internal nodes with a single child,
//! adding their branch length to the child.

use crate::error::TreeError;
use crate::model::{BranchLength, NodeIndex, Tree};
use log::{debug, error};
use std::collections::HashSet;

/// Returns the subtree of `tree` spanned by the leaves named in `keep`.
///
/// - The leaf set of the result is `leaf_names(tree) ∩ keep`.
/// - No internal node of the result is without children.
/// - Sibling order, names and branch lengths are preserved; unary nodes are
///   kept (see [collapse_unary]).
/// - If no leaf survives, the result is [Tree::empty()] (carrying the
///   tree's name); this is not an error.
///
/// # Errors
/// [TreeError::PruneInconsistency] if a node that was internal in `tree`
/// ends up as a leaf of the result. This never happens for a correct
/// implementation; debug builds panic instead.
///
/// # Example
/// ```
/// use langtree::newick::parse_str;
/// use langtree::prune::prune;
/// use std::collections::HashSet;
///
/// let tree = parse_str("(A:1,(B:2,C:3):1);")?;
/// let keep: HashSet<String> = ["A", "C"].iter().map(|s| s.to_string()).collect();
/// let pruned = prune(&tree, &keep)?;
/// assert_eq!(pruned.to_newick(), "(A:1,(C:3):1);");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn prune(tree: &Tree, keep: &HashSet<String>) -> Result<Tree, TreeError> {
    let mut pruned = Tree::with_capacity(tree.num_nodes());
    // Index in `pruned` of each surviving node of `tree`
    let mut mapped: Vec<Option<NodeIndex>> = vec![None; tree.num_nodes()];
    // Index in `tree` of each node of `pruned`
    let mut origin: Vec<NodeIndex> = Vec::with_capacity(tree.num_nodes());

    for node in tree.post_order_iter() {
        let new_index = if node.is_leaf() {
            if !keep.contains(node.name()) {
                continue;
            }
            pruned.add_leaf(node.name().to_string(), node.branch_length())
        } else {
            let children: Vec<NodeIndex> = node
                .children()
                .iter()
                .filter_map(|&child| mapped[child])
                .collect();
            // Emptied clade: drop it right away, its parent sees no survivor
            if children.is_empty() {
                continue;
            }
            pruned.add_internal(node.name().to_string(), children, node.branch_length())
        };
        mapped[node.index()] = Some(new_index);
        origin.push(node.index());
    }

    let Some(root) = mapped[tree.root_index()] else {
        debug!("No leaf of {} left after pruning", tree_label(tree));
        return Ok(with_name_of(Tree::empty(), tree));
    };
    pruned.set_root(root);

    if let Some(node) = find_emptied_clade(&pruned, tree, &origin) {
        error!(
            "Pruning {} left internal node {} without children",
            tree_label(tree),
            node
        );
        debug_assert!(false, "internal node {node} has no children after pruning");
        return Err(TreeError::PruneInconsistency { node });
    }

    debug!(
        "Pruned {} from {} to {} leaves",
        tree_label(tree),
        tree.num_leaves(),
        pruned.num_leaves()
    );
    Ok(with_name_of(pruned, tree))
}

/// Returns a copy of `tree` in which every non-root node with exactly one
/// child is replaced by that child.
///
/// The child's branch length becomes the sum of both lengths, so root
/// distances of the remaining nodes stay the same. The root is kept even if
/// it has a single child.
///
/// # Example
/// ```
/// use langtree::newick::parse_str;
/// use langtree::prune::collapse_unary;
///
/// let tree = parse_str("(((A:1):1):1,B:1);")?;
/// assert_eq!(collapse_unary(&tree).to_newick(), "(A:3,B:1);");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn collapse_unary(tree: &Tree) -> Tree {
    if tree.is_empty() {
        return tree.clone();
    }

    let mut collapsed = Tree::with_capacity(tree.num_nodes());
    let mut mapped: Vec<NodeIndex> = vec![usize::MAX; tree.num_nodes()];

    for node in tree.post_order_iter() {
        let new_index = match node.children() {
            [] => collapsed.add_leaf(node.name().to_string(), node.branch_length()),
            [only_child] if node.index() != tree.root_index() => {
                let child = mapped[*only_child];
                let length = sum_lengths(
                    collapsed[child].branch_length(),
                    node.branch_length(),
                );
                collapsed.node_mut(child).set_branch_length(length);
                child
            }
            children => {
                let children = children.iter().map(|&child| mapped[child]).collect();
                collapsed.add_internal(node.name().to_string(), children, node.branch_length())
            }
        };
        mapped[node.index()] = new_index;
    }

    collapsed.set_root(mapped[tree.root_index()]);
    with_name_of(collapsed, tree)
}

impl Tree {
    /// Method form of [prune].
    pub fn pruned(&self, keep: &HashSet<String>) -> Result<Tree, TreeError> {
        prune(self, keep)
    }
}

/// Finds a leaf of `pruned` whose origin in `source` is an internal node.
fn find_emptied_clade(pruned: &Tree, source: &Tree, origin: &[NodeIndex]) -> Option<NodeIndex> {
    pruned
        .leaves()
        .map(|leaf| origin[leaf.index()])
        .find(|&index| source[index].is_internal())
}

fn sum_lengths(a: Option<BranchLength>, b: Option<BranchLength>) -> Option<BranchLength> {
    match (a, b) {
        (None, None) => None,
        (a, b) => {
            let sum = a.map_or(0.0, |l| *l) + b.map_or(0.0, |l| *l);
            Some(BranchLength::new(sum.min(f64::MAX)))
        }
    }
}

fn with_name_of(mut tree: Tree, source: &Tree) -> Tree {
    if let Some(name) = source.name() {
        tree.set_name(name.to_string());
    }
    tree
}

fn tree_label(tree: &Tree) -> &str {
    tree.name().unwrap_or("unnamed tree")
}
