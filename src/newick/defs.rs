//! Constants and definitions for the Newick parser and writer.

/// Newick label delimiters: parentheses, comma, colon, semicolon, whitespace, comment start
pub(crate) const NEWICK_LABEL_DELIMITERS: &[u8] = b"([,:; \n\t\r)]";

/// Default guess for number of vertices, when unknown
pub(crate) const DEFAULT_NUM_VERTICES_GUESS: usize = 20;

/// How a label following the closing parenthesis of an internal vertex is read.
///
/// Gene trees usually carry support values there (`(a_A,b_B)0.9`), species
/// trees sometimes carry names of ancestral species (`(A,B)AB`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InternalLabel {
    /// A label that parses as a number is the support value of the vertex,
    /// any other label its name.
    #[default]
    SupportOrName,
    /// The label is always the name of the vertex.
    Name,
}
