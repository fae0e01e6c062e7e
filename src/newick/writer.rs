//! Newick format writing.
//!
//! Pruned trees are handed on as Newick text again, so every tree can be
//! turned back into a string that the [parser](super::parser) reads into an
//! equal tree (the [empty tree](crate::model::Tree::empty) excepted, which
//! is written as `;`).

use crate::model::{Node, NodeIndex, Tree};
use crate::newick::defs::BUFFER_CHARS;
use crate::parser::utils::escape_label;
use std::io::{self, Write};

/// Writes the given trees in Newick format, one tree per line.
///
/// # Errors
/// Returns an I/O error if writing fails.
pub fn write_newick<W: Write>(writer: &mut W, trees: &[Tree]) -> io::Result<()> {
    for tree in trees {
        writer.write_all(to_newick(tree).as_bytes())?;
        writer.write_all(b"\n")?;
    }

    writer.flush()
}

/// Returns the Newick representation of this tree with closing semicolon.
///
/// Labels are quoted where necessary; branch lengths are written only if
/// they were set.
///
/// # Example
/// ```
/// use langtree::newick::{parse_str, to_newick};
///
/// let tree = parse_str("( A:1 , (B:2,'C c':3):1 ) ;").unwrap();
/// assert_eq!(to_newick(&tree), "(A:1,(B:2,'C c':3):1);");
/// ```
pub fn to_newick(tree: &Tree) -> String {
    /// Pending output steps of the explicit-stack traversal
    enum Step {
        Enter(NodeIndex),
        Separator,
        Close(NodeIndex),
    }

    fn push_label_and_length(newick: &mut String, node: &Node) {
        newick.push_str(&escape_label(node.name()));
        if let Some(length) = node.branch_length() {
            newick.push(':');
            newick.push_str(&length.to_string());
        }
    }

    let mut newick = String::with_capacity(estimate_newick_len(tree));
    if tree.is_empty() {
        newick.push(';');
        return newick;
    }

    let mut stack = vec![Step::Enter(tree.root_index())];
    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(index) => {
                let node = &tree[index];
                if node.is_leaf() {
                    push_label_and_length(&mut newick, node);
                } else {
                    newick.push('(');
                    stack.push(Step::Close(index));
                    for (position, &child) in node.children().iter().enumerate().rev() {
                        stack.push(Step::Enter(child));
                        if position > 0 {
                            stack.push(Step::Separator);
                        }
                    }
                }
            }
            Step::Separator => newick.push(','),
            Step::Close(index) => {
                newick.push(')');
                push_label_and_length(&mut newick, &tree[index]);
            }
        }
    }

    newick.push(';');
    newick
}

/// Rough estimate of the Newick string length, to pre-allocate once.
fn estimate_newick_len(tree: &Tree) -> usize {
    let label_chars: usize = tree.pre_order_iter().map(|node| node.name().len()).sum();
    // Per node: separator or parenthesis, colon and a short branch length
    label_chars + tree.num_nodes() * 8 + BUFFER_CHARS
}
