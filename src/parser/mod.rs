//! Basic low-level byte parser functionality.
//!
//! The [ByteParser] is the foundation of the [Newick parser](crate::newick)
//! and reports problems as [ParsingError]s carrying position and context.
pub mod byte_parser;
pub mod parsing_error;
pub mod utils;

pub use byte_parser::ByteParser;
pub use parsing_error::{ParsingError, ParsingErrorType};
