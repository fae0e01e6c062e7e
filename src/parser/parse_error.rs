//! Error types for the Newick parser.
//!
//! This module provides [ParseError] and [ParseErrorKind] for reporting
//! malformed Newick input together with the byte position and the upcoming
//! input as context.

use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use std::error::Error;
use std::fmt;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;

// =#========================================================================#=
// PARSE ERROR KIND
// =#========================================================================#=
/// Error kinds that can occur while parsing Newick strings.
#[derive(PartialEq, Debug, Clone)]
pub enum ParseErrorKind {
    /// Input contained nothing but whitespace/comments, or only `;`
    EmptyInput,
    /// Input ended where `;` was expected
    UnexpectedEof,
    UnclosedComment,
    UnclosedQuote,
    /// A `)` without matching `(`, or a `(` never closed
    UnbalancedParentheses(String),
    InvalidBranchLength(String),
    InvalidNewickString(String),
}

// =#========================================================================#=
// PARSE ERROR
// =#========================================================================#=
/// Parse error with contextual information (position and surrounding bytes).
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    kind: ParseErrorKind,
    position: usize,
    context: String,
}

impl ParseError {
    /// Create a ParseError from an error kind and parser state
    pub fn from_parser<S: ByteSource>(kind: ParseErrorKind, parser: &ByteParser<S>) -> Self {
        Self {
            kind,
            position: parser.position(),
            context: parser.get_context_as_string(DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Convenience constructor for EmptyInput
    pub fn empty_input<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParseErrorKind::EmptyInput, parser)
    }

    /// Convenience constructor for UnexpectedEof
    pub fn unexpected_eof<S: ByteSource>(parser: &ByteParser<S>) -> Self {
        Self::from_parser(ParseErrorKind::UnexpectedEof, parser)
    }

    /// Convenience constructor for UnclosedComment, reported at the opening `[`
    pub fn unclosed_comment<S: ByteSource>(parser: &ByteParser<S>, start: usize) -> Self {
        Self {
            position: start,
            ..Self::from_parser(ParseErrorKind::UnclosedComment, parser)
        }
    }

    /// Convenience constructor for UnclosedQuote, reported at the opening `'`
    pub fn unclosed_quote<S: ByteSource>(parser: &ByteParser<S>, start: usize) -> Self {
        Self {
            position: start,
            ..Self::from_parser(ParseErrorKind::UnclosedQuote, parser)
        }
    }

    /// Convenience constructor for UnbalancedParentheses
    pub fn unbalanced_parentheses<S: ByteSource>(parser: &ByteParser<S>, msg: String) -> Self {
        Self::from_parser(ParseErrorKind::UnbalancedParentheses(msg), parser)
    }

    /// Convenience constructor for InvalidBranchLength
    pub fn invalid_branch_length<S: ByteSource>(parser: &ByteParser<S>, msg: String) -> Self {
        Self::from_parser(ParseErrorKind::InvalidBranchLength(msg), parser)
    }

    /// Convenience constructor for InvalidNewickString
    pub fn invalid_newick_string<S: ByteSource>(parser: &ByteParser<S>, msg: String) -> Self {
        Self::from_parser(ParseErrorKind::InvalidNewickString(msg), parser)
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    /// Get the position where the error occurred
    pub fn position(&self) -> usize {
        self.position
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::EmptyInput => write!(f, "Empty Newick input")?,
            ParseErrorKind::UnexpectedEof => {
                write!(f, "Unexpected end of input, expected ';'")?
            }
            ParseErrorKind::UnclosedComment => write!(f, "Unclosed comment")?,
            ParseErrorKind::UnclosedQuote => write!(f, "Unclosed quoted label")?,
            ParseErrorKind::UnbalancedParentheses(msg) => {
                write!(f, "Unbalanced parentheses - {msg}")?
            }
            ParseErrorKind::InvalidBranchLength(msg) => write!(f, "Invalid branch length - {msg}")?,
            ParseErrorKind::InvalidNewickString(msg) => write!(f, "Invalid newick string: {msg}")?,
        }

        write!(f, " at position {}", self.position)?;

        if !self.context.is_empty() {
            write!(
                f,
                "\n  Context (next {} bytes): {}",
                self.context.len(),
                self.context
            )?;
        }

        Ok(())
    }
}

impl Error for ParseError {}
