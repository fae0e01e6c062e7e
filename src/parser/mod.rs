//! Basic low-level byte parser functionality.
pub mod byte_parser;
pub mod byte_source;
pub mod parse_error;
pub mod utils;

pub use byte_parser::ByteParser;
pub use parse_error::{ParseError, ParseErrorKind};
