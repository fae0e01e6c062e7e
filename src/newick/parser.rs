//! Structs and logic to parse Newick strings.
//!
//! This module provides the [NewickParser] struct, which parses single
//! trees or all trees of a `;`-separated list.

use crate::model::{BranchLength, NodeIndex, Tree};
use crate::newick::defs::{DEFAULT_NUM_NODES_GUESS, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parse_error::ParseError;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================#=
/// Parser (configuration) for Newick format phylogenetic trees.
///
/// Clades may have any number of children and be nested arbitrarily deep:
/// open clades are kept on an explicit stack rather than the call stack.
///
/// # Configuration
/// * [`with_num_nodes(num_nodes)`](Self::with_num_nodes)
///     - Expected number of nodes per tree, used to pre-allocate the arena.
///       Otherwise the size of the previously parsed tree is used.
///
/// # Parsing
/// * [`parse_tree`](Self::parse_tree) — Parse a single tree
/// * [`parse_all`](Self::parse_all) — Parse all trees until EOF
///
/// # Example
/// ```
/// use langtree::newick::NewickParser;
/// use langtree::parser::ByteParser;
///
/// let mut byte_parser = ByteParser::for_str("(deu:1,(nld:0.5,fry:0.5):0.5);");
/// let tree = NewickParser::new().parse_tree(&mut byte_parser).unwrap();
/// assert_eq!(tree.leaf_names(), vec!["deu", "nld", "fry"]);
/// ```
#[derive(Debug, Clone)]
pub struct NewickParser {
    num_nodes: usize,
}

impl Default for NewickParser {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl NewickParser {
    /// Creates a new [NewickParser] with default settings.
    pub fn new() -> Self {
        Self {
            num_nodes: DEFAULT_NUM_NODES_GUESS,
        }
    }

    /// Sets the expected number of nodes in each parsed tree.
    pub fn with_num_nodes(mut self, num_nodes: usize) -> Self {
        self.num_nodes = num_nodes;
        self
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Parses all Newick trees from the byte source until EOF.
    ///
    /// # Returns
    /// * `Ok(Vec<Tree>)` - All parsed trees (empty if the input is blank)
    /// * `Err(ParseError)` - If any tree fails to parse
    pub fn parse_all<B: ByteSource>(
        &mut self,
        mut byte_parser: ByteParser<B>,
    ) -> Result<Vec<Tree>, ParseError> {
        let mut trees = Vec::new();
        loop {
            byte_parser.skip_comment_and_whitespace()?;
            if byte_parser.is_eof() {
                break;
            }
            trees.push(self.parse_tree(&mut byte_parser)?);
        }
        Ok(trees)
    }

    /// Parses a single Newick tree, including its terminating `;`.
    ///
    /// # Returns
    /// * `Ok(Tree)` - The parsed phylogenetic tree
    /// * `Err(ParseError)` - If the input is empty or not valid Newick;
    ///   no partial tree is returned
    pub fn parse_tree<B: ByteSource>(
        &mut self,
        parser: &mut ByteParser<B>,
    ) -> Result<Tree, ParseError> {
        parser.skip_comment_and_whitespace()?;
        if parser.is_eof() {
            return Err(ParseError::empty_input(parser));
        }

        let mut tree = Tree::with_capacity(self.num_nodes);
        // Children collected so far for every clade whose '(' is still open
        let mut open_clades: Vec<Vec<NodeIndex>> = Vec::new();

        let root = 'vertex: loop {
            // Descend into any number of opening clades
            parser.skip_comment_and_whitespace()?;
            while parser.consume_if(b'(') {
                open_clades.push(Vec::new());
                parser.skip_comment_and_whitespace()?;
            }

            let name = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
            let length = self.parse_branch_length(parser)?;
            let mut current = tree.add_leaf(name, length);

            // Close clades until a sibling or the end of the tree follows
            loop {
                parser.skip_comment_and_whitespace()?;
                match parser.peek() {
                    Some(b',') => {
                        let Some(siblings) = open_clades.last_mut() else {
                            return Err(ParseError::invalid_newick_string(
                                parser,
                                "Unexpected ',' outside of parentheses".to_string(),
                            ));
                        };
                        siblings.push(current);
                        parser.next_byte();
                        continue 'vertex;
                    }
                    Some(b')') => {
                        let Some(mut children) = open_clades.pop() else {
                            return Err(ParseError::unbalanced_parentheses(
                                parser,
                                "')' without matching '('".to_string(),
                            ));
                        };
                        parser.next_byte();
                        children.push(current);

                        let name = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
                        let length = self.parse_branch_length(parser)?;
                        current = tree.add_internal(name, children, length);
                    }
                    Some(b';') if open_clades.is_empty() => {
                        parser.next_byte();
                        break 'vertex current;
                    }
                    Some(b';') => {
                        return Err(ParseError::unbalanced_parentheses(
                            parser,
                            format!("{} '(' not closed before ';'", open_clades.len()),
                        ));
                    }
                    None if !open_clades.is_empty() => {
                        return Err(ParseError::unbalanced_parentheses(
                            parser,
                            format!("{} '(' not closed at end of input", open_clades.len()),
                        ));
                    }
                    // Tree complete but ';' missing
                    None => return Err(ParseError::unexpected_eof(parser)),
                    Some(other) => {
                        return Err(ParseError::invalid_newick_string(
                            parser,
                            format!("Expected ',', ')' or ';' but found {:?}", char::from(other)),
                        ));
                    }
                }
            }
        };

        // A lone unnamed vertex (e.g. ";") is no tree
        if tree[root].is_leaf() && tree[root].name().is_empty() {
            return Err(ParseError::empty_input(parser));
        }

        tree.set_root(root);
        self.num_nodes = tree.num_nodes();

        Ok(tree)
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl NewickParser {
    /// Parses optional branch length `[:number]`:
    /// - Skips comments/whitespace before and after `:`
    /// - Supports scientific notation (e.g., `1.5e-10`)
    ///
    /// # Returns
    /// - `Ok(Some(branch_length))` if found a valid branch length
    /// - `Ok(None)` if no branch length found
    /// - [ParseError] if the value is missing, malformed, negative or not finite
    fn parse_branch_length<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<BranchLength>, ParseError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        parser.skip_comment_and_whitespace()?;

        let mut branch_length_str = String::new();
        while let Some(b) = parser.peek() {
            // Valid characters for a float: digits, '.', '-', '+', 'e', 'E'
            if b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E') {
                branch_length_str.push(char::from(b));
                parser.next_byte();
            } else {
                break;
            }
        }

        if branch_length_str.is_empty() {
            return Err(ParseError::invalid_branch_length(
                parser,
                "Missing value after ':'".to_string(),
            ));
        }

        let value: f64 = branch_length_str.parse().map_err(|_| {
            ParseError::invalid_branch_length(parser, format!("Not a number: {branch_length_str}"))
        })?;

        BranchLength::try_new(value).map(Some).ok_or_else(|| {
            ParseError::invalid_branch_length(
                parser,
                format!("Must be non-negative and finite: {branch_length_str}"),
            )
        })
    }
}
