//! Newick format parser and writer for phylogenetic trees.
//!
//! # Quick API
//! * [`parse_str`] - parses a single string into a [Tree]
//! * [`to_newick`] - writes a [Tree] back as Newick string
//!
//! # Full API
//! Configure a [NewickParser] and provide data via a [ByteParser]:
//! * [`NewickParser::parse_tree`] - parse a single tree
//! * [`NewickParser::parse_all`] - parse all trees until EOF
//!
//! # Format
//! * `tree ::= vertex ';'`
//! * `vertex ::= clade | leaf`
//! * `clade ::= '(' vertex (',' vertex)* ')' [label] [branch_length]`
//! * `leaf ::= [label] [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a branch length
//! * Comments are square brackets and can occur wherever whitespace can
//! * Labels may be single quoted, with `''` standing for a quote
//! * Branch lengths must be non-negative; scientific notation is accepted

mod defs;
pub mod parser;
pub mod writer;

pub use parser::NewickParser;
pub use writer::{to_newick, write_newick};

use crate::model::Tree;
use crate::parser::ByteParser;
use crate::parser::ParseError;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a single Newick string to obtain a [Tree].
///
/// The string must hold exactly one tree: only whitespace and comments may
/// follow the terminating `;`. Use [NewickParser::parse_all] for lists of
/// trees.
///
/// # Returns
/// * [Tree] - Tree parsed from the string
/// * [ParseError] - If the string is empty, not valid Newick format, or
///   continues after the tree
///
/// # Example
/// ```
/// use langtree::newick::parse_str;
///
/// let tree = parse_str("(A:1,(B:2,C:3):1);")?;
/// assert_eq!(tree.num_leaves(), 3);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParseError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    let tree = NewickParser::new().parse_tree(&mut byte_parser)?;

    byte_parser.skip_comment_and_whitespace()?;
    if !byte_parser.is_eof() {
        return Err(ParseError::invalid_newick_string(
            &byte_parser,
            "Unexpected input after the terminating ';'".to_string(),
        ));
    }
    Ok(tree)
}
