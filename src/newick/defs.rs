//! Constants for the Newick parser and writer.

/// Newick label delimiters: parentheses, comma, colon, semicolon, comment start, whitespace
pub(crate) const NEWICK_LABEL_DELIMITERS: &[u8] = b"(),:;[ \t\r\n";

/// Default guess for number of nodes of a tree, when unknown
pub(crate) const DEFAULT_NUM_NODES_GUESS: usize = 32;

/// Extra buffer in Newick string length/capacity estimate
pub(crate) const BUFFER_CHARS: usize = 10;
