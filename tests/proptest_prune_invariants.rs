//! Property tests of pruning and layout over random trees and keep-sets.

use langtree::layout::{layout, LayoutConfig};
use langtree::newick::parse_str;
use langtree::prune::{collapse_unary, prune};
use proptest::prelude::*;
use std::collections::HashSet;

/// Shape of a random tree; leaves are named `L0`, `L1`, ... in order.
#[derive(Debug, Clone)]
enum Shape {
    Leaf(u8),
    Clade(Vec<Shape>, u8),
}

fn shape_strategy() -> impl Strategy<Value = Shape> {
    let leaf = (0u8..20).prop_map(Shape::Leaf);
    leaf.prop_recursive(6, 64, 4, |inner| {
        (prop::collection::vec(inner, 1..5), 0u8..20)
            .prop_map(|(children, length)| Shape::Clade(children, length))
    })
}

fn keep_strategy() -> impl Strategy<Value = HashSet<String>> {
    prop::collection::hash_set(0usize..40, 0..24)
        .prop_map(|indices| indices.into_iter().map(|i| format!("L{i}")).collect())
}

fn write_shape(shape: &Shape, next_leaf: &mut usize, out: &mut String) {
    match shape {
        Shape::Leaf(length) => {
            out.push_str(&format!("L{}:{}", next_leaf, f64::from(*length) / 10.0));
            *next_leaf += 1;
        }
        Shape::Clade(children, length) => {
            out.push('(');
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_shape(child, next_leaf, out);
            }
            out.push_str(&format!("):{}", f64::from(*length) / 10.0));
        }
    }
}

fn newick_of(shape: &Shape) -> String {
    let mut out = String::new();
    write_shape(shape, &mut 0, &mut out);
    out.push(';');
    out
}

proptest! {
    #[test]
    fn pruned_leaves_are_intersection(shape in shape_strategy(), keep in keep_strategy()) {
        let tree = parse_str(newick_of(&shape)).unwrap();
        let pruned = prune(&tree, &keep).unwrap();

        let expected: HashSet<&str> = tree
            .leaf_name_set()
            .into_iter()
            .filter(|name| keep.contains(*name))
            .collect();
        prop_assert_eq!(pruned.leaf_name_set(), expected);
    }

    #[test]
    fn pruned_tree_has_no_empty_clades(shape in shape_strategy(), keep in keep_strategy()) {
        let tree = parse_str(newick_of(&shape)).unwrap();
        let pruned = prune(&tree, &keep).unwrap();
        prop_assert!(pruned.is_valid());

        if !pruned.is_empty() {
            // Every leaf of the result was a leaf before
            for leaf in pruned.leaves() {
                prop_assert!(tree.find_leaf(leaf.name()).is_some());
            }
        }
    }

    #[test]
    fn prune_is_idempotent(shape in shape_strategy(), keep in keep_strategy()) {
        let tree = parse_str(newick_of(&shape)).unwrap();
        let once = prune(&tree, &keep).unwrap();
        let twice = prune(&once, &keep).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn collapse_keeps_leaves_and_root_distances(shape in shape_strategy(), keep in keep_strategy()) {
        let tree = parse_str(newick_of(&shape)).unwrap();
        let pruned = prune(&tree, &keep).unwrap();
        let collapsed = collapse_unary(&pruned);
        prop_assert!(collapsed.is_valid());
        prop_assert_eq!(collapsed.leaf_names(), pruned.leaf_names());

        let config = LayoutConfig::default();
        let before = layout(&pruned, &config);
        let after = layout(&collapsed, &config);
        for leaf in collapsed.leaves() {
            let original = pruned.find_leaf(leaf.name()).unwrap();
            let delta = after.position(leaf.index()).root_distance
                - before.position(original).root_distance;
            prop_assert!(delta.abs() < 1e-9);
        }
    }

    #[test]
    fn x_is_monotone_along_root_paths(shape in shape_strategy()) {
        let tree = parse_str(newick_of(&shape)).unwrap();
        let layout = layout(&tree, &LayoutConfig::default());
        for node in tree.pre_order_iter() {
            if let Some(parent) = node.parent() {
                prop_assert!(layout.position(parent).x <= layout.position(node.index()).x);
            }
            let y = layout.position(node.index()).y;
            prop_assert!(y >= 0.0 && y <= layout.height());
        }
    }

    #[test]
    fn newick_round_trip(shape in shape_strategy()) {
        let tree = parse_str(newick_of(&shape)).unwrap();
        let reparsed = parse_str(tree.to_newick()).unwrap();
        prop_assert_eq!(reparsed, tree);
    }
}
