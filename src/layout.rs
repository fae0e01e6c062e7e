//! Node placement for rectangular tree drawings.
//!
//! Horizontal position is proportional to the distance from the root
//! (cumulative branch length), scaled to the configured width. Vertical
//! position comes from a cluster layout: leaves are spread evenly in
//! traversal order, every internal node sits at the mean of its children.
//! Siblings are visited in ascending order of their branch length.
//!
//! The layout knows nothing about drawing surfaces; see [crate::render].

use crate::model::{NodeIndex, Tree};
use serde::{Deserialize, Serialize};

// =#========================================================================#=
// LAYOUT CONFIG
// =#========================================================================#=
/// Configuration of [layout].
///
/// Defaults reproduce the original tree viewer: 700 px wide, 7 px of height
/// per node, a separation of 5 between adjacent leaves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal extent the largest root distance is scaled to
    pub width: f64,
    /// Height per node of the tree; total height is `num_nodes * px_per_node`
    pub px_per_node: f64,
    /// Spacing between adjacent leaves before normalisation to the height.
    /// With a constant separation the leaves end up evenly spaced.
    pub separation: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            width: 700.0,
            px_per_node: 7.0,
            separation: 5.0,
        }
    }
}

impl LayoutConfig {
    /// Sets the width of the layout.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Sets the height per node of the tree.
    pub fn with_px_per_node(mut self, px_per_node: f64) -> Self {
        self.px_per_node = px_per_node;
        self
    }

    /// Sets the separation between adjacent leaves.
    pub fn with_separation(mut self, separation: f64) -> Self {
        self.separation = separation;
        self
    }
}

// =#========================================================================#=
// TREE LAYOUT
// =#========================================================================#=
/// Position of a single node.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NodePosition {
    /// Sum of branch lengths from the root (root: 0)
    pub root_distance: f64,
    /// Horizontal position, `root_distance` scaled to the layout width
    pub x: f64,
    /// Vertical position from the cluster layout
    pub y: f64,
}

/// Result of [layout]: a position for every node of the tree, indexed by
/// [NodeIndex].
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLayout {
    positions: Vec<NodePosition>,
    ordered_children: Vec<Vec<NodeIndex>>,
    width: f64,
    height: f64,
    max_root_distance: f64,
}

impl TreeLayout {
    /// Returns the position of the node at `index`.
    pub fn position(&self, index: NodeIndex) -> NodePosition {
        self.positions[index]
    }

    /// Returns all positions, indexed by [NodeIndex].
    pub fn positions(&self) -> &[NodePosition] {
        &self.positions
    }

    /// Returns the children of `index` in the order the layout visited them.
    pub fn ordered_children(&self, index: NodeIndex) -> &[NodeIndex] {
        &self.ordered_children[index]
    }

    /// Returns the horizontal extent.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the vertical extent.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the largest distance of any node from the root.
    pub fn max_root_distance(&self) -> f64 {
        self.max_root_distance
    }
}

// ============================================================================
// Layout
// ============================================================================
/// Computes the position of every node of `tree`.
///
/// # Example
/// ```
/// use langtree::layout::{layout, LayoutConfig};
/// use langtree::newick::parse_str;
///
/// let tree = parse_str("(A:1,(B:2,C:3):1);")?;
/// let layout = layout(&tree, &LayoutConfig::default());
/// let c = tree.find_leaf("C").unwrap();
/// assert_eq!(layout.position(c).root_distance, 4.0);
/// assert_eq!(layout.position(c).x, 700.0);
/// assert_eq!(layout.height(), 35.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn layout(tree: &Tree, config: &LayoutConfig) -> TreeLayout {
    let num_nodes = tree.num_nodes();
    let height = num_nodes as f64 * config.px_per_node;

    // Siblings by ascending branch length; sort_by is stable, ties keep parse order
    let mut ordered_children: Vec<Vec<NodeIndex>> = Vec::with_capacity(num_nodes);
    for index in 0..num_nodes {
        let mut children = tree[index].children().to_vec();
        children.sort_by(|&a, &b| tree[a].length().total_cmp(&tree[b].length()));
        ordered_children.push(children);
    }

    let mut positions = vec![NodePosition::default(); num_nodes];
    let max_root_distance = assign_root_distances(tree, &mut positions);
    assign_x(&mut positions, max_root_distance, config.width);
    assign_y(tree, &ordered_children, &mut positions, config.separation, height);

    TreeLayout {
        positions,
        ordered_children,
        width: config.width,
        height,
        max_root_distance,
    }
}

/// Sets `root_distance` top-down and returns the maximum.
///
/// Sums saturate at `f64::MAX`, so huge lengths still give finite x.
fn assign_root_distances(tree: &Tree, positions: &mut [NodePosition]) -> f64 {
    let mut max_root_distance: f64 = 0.0;
    for node in tree.pre_order_iter() {
        let root_distance = match node.parent() {
            Some(parent) => (positions[parent].root_distance + node.length()).min(f64::MAX),
            None => 0.0,
        };
        positions[node.index()].root_distance = root_distance;
        max_root_distance = max_root_distance.max(root_distance);
    }
    max_root_distance
}

/// Linear scale from `[0, max_root_distance]` to `[0, width]`.
fn assign_x(positions: &mut [NodePosition], max_root_distance: f64, width: f64) {
    for position in positions.iter_mut() {
        position.x = if max_root_distance > 0.0 {
            position.root_distance / max_root_distance * width
        } else {
            0.0
        };
    }
}

/// Cluster layout along the vertical axis.
///
/// Leaves are placed `separation` apart in visiting order, internal nodes at
/// the mean of their children. The axis is then normalised to
/// `[0, height]`, leaving half a separation of padding at both ends.
fn assign_y(
    tree: &Tree,
    ordered_children: &[Vec<NodeIndex>],
    positions: &mut [NodePosition],
    separation: f64,
    height: f64,
) {
    let mut first_leaf: Option<f64> = None;
    let mut last_leaf: Option<f64> = None;

    // Post-order over the sorted children, with an explicit stack
    let mut stack: Vec<(NodeIndex, bool)> = vec![(tree.root_index(), false)];
    while let Some((index, children_visited)) = stack.pop() {
        let children = &ordered_children[index];
        if children.is_empty() {
            let y = last_leaf.map_or(0.0, |previous| previous + separation);
            positions[index].y = y;
            first_leaf.get_or_insert(y);
            last_leaf = Some(y);
        } else if children_visited {
            let sum: f64 = children.iter().map(|&child| positions[child].y).sum();
            positions[index].y = sum / children.len() as f64;
        } else {
            stack.push((index, true));
            for &child in children.iter().rev() {
                stack.push((child, false));
            }
        }
    }

    let (Some(first), Some(last)) = (first_leaf, last_leaf) else {
        return;
    };
    let y0 = first - separation / 2.0;
    let y1 = last + separation / 2.0;
    let span = y1 - y0;

    for position in positions.iter_mut() {
        position.y = if span > 0.0 {
            (position.y - y0) / span * height
        } else {
            height / 2.0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newick::parse_str;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_root_distances_ignore_root_length() {
        let tree = parse_str("(A:1,(B:2,C:3):1):10;").unwrap();
        let layout = layout(&tree, &LayoutConfig::default());
        assert_eq!(layout.position(tree.root_index()).root_distance, 0.0);
        assert_eq!(layout.max_root_distance(), 4.0);
        let b = tree.find_leaf("B").unwrap();
        assert_close(layout.position(b).root_distance, 3.0);
        assert_close(layout.position(b).x, 3.0 / 4.0 * 700.0);
    }

    #[test]
    fn test_leaves_evenly_spaced_with_padding() {
        // 4 nodes: height 28; 3 leaves at (i + 0.5) / 3 * 28
        let tree = parse_str("(A:1,B:1,C:1);").unwrap();
        let layout = layout(&tree, &LayoutConfig::default());
        assert_eq!(layout.height(), 28.0);
        for (i, name) in ["A", "B", "C"].iter().enumerate() {
            let leaf = tree.find_leaf(name).unwrap();
            assert_close(layout.position(leaf).y, (i as f64 + 0.5) / 3.0 * 28.0);
        }
        assert_close(layout.position(tree.root_index()).y, 14.0);
    }

    #[test]
    fn test_siblings_sorted_by_branch_length() {
        let tree = parse_str("(A:3,B:1,C:2,D:1);").unwrap();
        let layout = layout(&tree, &LayoutConfig::default());
        let order: Vec<_> = layout
            .ordered_children(tree.root_index())
            .iter()
            .map(|&child| tree[child].name())
            .collect();
        assert_eq!(order, vec!["B", "D", "C", "A"]);

        let b = tree.find_leaf("B").unwrap();
        let a = tree.find_leaf("A").unwrap();
        assert!(layout.position(b).y < layout.position(a).y);
    }

    #[test]
    fn test_internal_node_at_mean_of_children() {
        let tree = parse_str("(A:1,(B:1,C:1,D:1):1);").unwrap();
        let layout = layout(&tree, &LayoutConfig::default());
        let clade = tree.parent(tree.find_leaf("B").unwrap()).unwrap();
        let mean = ["B", "C", "D"]
            .iter()
            .map(|name| layout.position(tree.find_leaf(name).unwrap()).y)
            .sum::<f64>()
            / 3.0;
        assert_close(layout.position(clade).y, mean);
    }

    #[test]
    fn test_separation_cancels_out() {
        let tree = parse_str("((A:1,B:2):1,C:1);").unwrap();
        let narrow = layout(&tree, &LayoutConfig::default().with_separation(1.0));
        let wide = layout(&tree, &LayoutConfig::default().with_separation(20.0));
        for (a, b) in narrow.positions().iter().zip(wide.positions()) {
            assert_close(a.y, b.y);
        }
    }

    #[test]
    fn test_zero_lengths_put_everything_at_origin() {
        let tree = parse_str("(A,(B,C));").unwrap();
        let layout = layout(&tree, &LayoutConfig::default());
        assert!(layout.positions().iter().all(|p| p.x == 0.0));
    }

    #[test]
    fn test_single_leaf_is_centered() {
        let tree = parse_str("A;").unwrap();
        let layout = layout(&tree, &LayoutConfig::default().with_px_per_node(10.0));
        assert_eq!(layout.height(), 10.0);
        assert_close(layout.position(tree.root_index()).y, 5.0);
    }

    #[test]
    fn test_huge_lengths_stay_finite() {
        let tree = parse_str("(A:1e308,(B:1e308):1e308);").unwrap();
        let layout = layout(&tree, &LayoutConfig::default());
        assert_eq!(layout.max_root_distance(), f64::MAX);
        for node in tree.pre_order_iter() {
            let x = layout.position(node.index()).x;
            assert!(x.is_finite(), "x of {:?} is {x}", node.name());
            if let Some(parent) = node.parent() {
                assert!(layout.position(parent).x <= x);
            }
        }
        assert_eq!(layout.position(tree.find_leaf("B").unwrap()).x, 700.0);
    }

    #[test]
    fn test_custom_width() {
        let tree = parse_str("(A:2,B:1);").unwrap();
        let layout = layout(&tree, &LayoutConfig::default().with_width(100.0));
        assert_close(layout.position(tree.find_leaf("A").unwrap()).x, 100.0);
        assert_close(layout.position(tree.find_leaf("B").unwrap()).x, 50.0);
    }
}
