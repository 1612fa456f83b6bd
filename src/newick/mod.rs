//! Newick format parser and writer for phylogenetic trees.
//!
//! This module provides [`NewickParser`] to parse Newick format strings
//! into [`PhyloTree`]s and [`to_newick`] to write them back.
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`parse_str`] - parses a single tree
//! * [`parse_forest`] - parses a semicolon separated list of trees (e.g. a covering set)
//!
//! # Full API
//! For more control, configure a [`NewickParser`] and provide a [`ByteParser`]:
//! * [`NewickParser::parse_str`] - parse a single tree
//! * [`NewickParser::parse_all`] - parse all trees until EOF
//!
//! # Format
//! * `tree ::= vertex ';'`
//! * `vertex ::= leaf | internal_vertex`
//! * `internal_vertex ::= '(' vertex (',' vertex)* ')' [label] [branch_length]`
//! * `leaf ::= label [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a branch_length
//! * Comments are square brackets and can occur anywhere where whitespace is allowed
//! * A numeric label of an internal vertex is its support value, see [`InternalLabel`]

mod defs;
mod parser;
mod writer;

pub use self::defs::InternalLabel;
pub use self::parser::NewickParser;
pub use self::writer::{NewickStyle, to_newick};

use crate::model::PhyloTree;
use crate::parser::ByteParser;
use crate::parser::ParsingError;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a single Newick string to obtain a [`PhyloTree`].
///
/// # Arguments
/// * `newick` - The Newick format string to parse
///
/// # Returns
/// * [`PhyloTree`] - Tree parsed from the string
/// * [`ParsingError`] - If the string is not valid Newick format
///
/// # Example
/// ```
/// use labelgtc::newick::parse_str;
///
/// let tree = parse_str("((a_A,x_B)0.8,(b_B,e_C)0.1);").unwrap();
/// assert_eq!(tree.leaf_names(), vec!["a_A", "x_B", "b_B", "e_C"]);
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<PhyloTree, ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    NewickParser::new().parse_str(&mut byte_parser)
}

/// Parses a semicolon separated list of Newick strings.
///
/// # Example
/// ```
/// use labelgtc::newick::parse_forest;
///
/// let covering = parse_forest("(a_A,x_B); y_C;\n(b_B,e_C);").unwrap();
/// assert_eq!(covering.len(), 3);
/// assert_eq!(covering[1].num_leaves(), 1);
/// ```
pub fn parse_forest<S: AsRef<str>>(newicks: S) -> Result<Vec<PhyloTree>, ParsingError> {
    NewickParser::new().parse_all(ByteParser::for_str(newicks.as_ref()))
}
