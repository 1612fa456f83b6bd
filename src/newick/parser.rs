//! Newick parser building [PhyloTree]s.

use crate::model::PhyloTree;
use crate::model::tree::VertexIndex;
use crate::model::vertex::BranchLength;
use crate::newick::defs::{DEFAULT_NUM_VERTICES_GUESS, InternalLabel, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::parsing_error::ParsingError;

/// Parser (configuration) for Newick format phylogenetic trees.
///
/// Supports parsing single or multiple Newick trees into [PhyloTree]s.
/// Vertices may have any number of children, so polytomies and single-leaf
/// trees (`a_A;`) are accepted.
///
/// # Configuration
/// * `with_internal_labels(mode)` - How labels of internal vertices are
///   read, see [InternalLabel]. By default numeric labels are supports.
/// * `with_num_vertices(num_vertices)` - Expected tree size for pre-allocation,
///   otherwise taken from the previously parsed tree.
///
/// # Format
/// * tree ::= vertex ';'
/// * vertex ::= leaf | internal_vertex
/// * internal_vertex ::= '(' vertex (',' vertex)* ')' [label] [branch_length]
/// * leaf ::= label [branch_length]
/// * branch_length ::= ':' number
///
/// Whitespace and `[...]` comments can occur between elements, just not
/// within an unquoted label or a branch length.
///
/// # Example
/// ```
/// use labelgtc::newick::NewickParser;
/// use labelgtc::parser::ByteParser;
///
/// let mut byte_parser = ByteParser::for_str("((a_A,b_B)0.9,c_C,d_C):0.0;");
/// let tree = NewickParser::new().parse_str(&mut byte_parser).unwrap();
/// assert_eq!(tree.num_leaves(), 4);
/// assert!(tree.root().is_polytomy());
/// ```
#[derive(Debug, Clone, Default)]
pub struct NewickParser {
    internal_labels: InternalLabel,
    num_vertices: Option<usize>,
}

impl NewickParser {
    /// Creates a new `NewickParser` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how labels of internal vertices are interpreted.
    pub fn with_internal_labels(mut self, mode: InternalLabel) -> Self {
        self.internal_labels = mode;
        self
    }

    /// Sets the expected number of vertices per tree.
    pub fn with_num_vertices(mut self, num_vertices: usize) -> Self {
        self.num_vertices = Some(num_vertices);
        self
    }

    /// Parses a single Newick tree from the given [ByteParser].
    ///
    /// # Arguments
    /// * `parser` - The byte parser positioned at the start of a Newick tree string
    ///
    /// # Returns
    /// * `Ok(PhyloTree)` - The parsed phylogenetic tree
    /// * `Err(ParsingError)` - If the Newick format is invalid
    pub fn parse_str(
        &mut self,
        parser: &mut ByteParser<'_>,
    ) -> Result<PhyloTree, ParsingError> {
        let capacity = self.num_vertices.unwrap_or(DEFAULT_NUM_VERTICES_GUESS);
        let mut tree = PhyloTree::with_capacity(capacity);

        parser.skip_trivia()?;
        if parser.is_eof() {
            return Err(ParsingError::unexpected_eof(parser));
        }
        let root = self.parse_vertex(parser, &mut tree)?;

        // Consume the terminating semicolon
        parser.skip_trivia()?;
        if !parser.eat(b';') {
            let found = parser.peek().map(|b| b as char);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected ';' at end of tree but found {:?}", found),
            ));
        }

        tree.set_root(root);
        self.num_vertices = Some(tree.num_vertices());
        Ok(tree)
    }

    /// Parses all Newick trees until EOF.
    ///
    /// # Returns
    /// * `Ok(Vec<PhyloTree>)` - All parsed trees (possibly none)
    /// * `Err(ParsingError)` - If any tree is invalid
    pub fn parse_all(
        &mut self,
        mut parser: ByteParser<'_>,
    ) -> Result<Vec<PhyloTree>, ParsingError> {
        let mut trees = Vec::new();
        loop {
            parser.skip_trivia()?;
            if parser.is_eof() {
                return Ok(trees);
            }
            trees.push(self.parse_str(&mut parser)?);
        }
    }

    /// Parses a vertex (either internal vertex or leaf) and returns its index:
    /// - Skips leading comments and whitespace
    /// - Dispatches to `parse_internal_vertex` if starts with `(`, otherwise `parse_leaf`
    fn parse_vertex(
        &mut self,
        parser: &mut ByteParser<'_>,
        tree: &mut PhyloTree,
    ) -> Result<VertexIndex, ParsingError> {
        parser.skip_trivia()?;
        if parser.peek() == Some(b'(') {
            self.parse_internal_vertex(parser, tree)
        } else {
            self.parse_leaf(parser, tree)
        }
    }

    /// Parses internal vertex, adds it to tree, and returns its index:
    /// - `(child, ..., child)[label][:branch_length]`
    fn parse_internal_vertex(
        &mut self,
        parser: &mut ByteParser<'_>,
        tree: &mut PhyloTree,
    ) -> Result<VertexIndex, ParsingError> {
        let children = self.parse_children(parser, tree)?;

        // Optional label directly after ')'
        parser.skip_trivia()?;
        let label = match parser.peek() {
            Some(b) if !NEWICK_LABEL_DELIMITERS.contains(&b) => {
                Some(parser.parse_label(NEWICK_LABEL_DELIMITERS)?)
            }
            _ => None,
        };
        let branch_length = self.parse_branch_length(parser)?;

        let (support, name) = match label {
            Some(label) => self.interpret_internal_label(label),
            None => (None, None),
        };
        let index = tree.add_internal(children, support, branch_length);
        if let Some(name) = name {
            tree[index].set_name(name);
        }

        Ok(index)
    }

    /// Parses children `(child, ..., child)` and returns their indices:
    /// - Expects parser at opening `(`
    fn parse_children(
        &mut self,
        parser: &mut ByteParser<'_>,
        tree: &mut PhyloTree,
    ) -> Result<Vec<VertexIndex>, ParsingError> {
        if !parser.eat(b'(') {
            let found = parser.peek().map(|b| b as char);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected '(' before children but found {:?}", found),
            ));
        }

        let mut children = Vec::with_capacity(2);
        loop {
            children.push(self.parse_vertex(parser, tree)?);

            parser.skip_trivia()?;
            match parser.bump() {
                Some(b',') => continue,
                Some(b')') => return Ok(children),
                None => return Err(ParsingError::unexpected_eof(parser)),
                Some(b) => {
                    return Err(ParsingError::invalid_newick_string(
                        parser,
                        format!(
                            "Expected ',' or ')' after child but found {:?}",
                            b as char
                        ),
                    ));
                }
            }
        }
    }

    /// Parses leaf vertex and adds it to tree:
    /// - `label[:branch_length]`
    /// - Expects parser at start of label
    fn parse_leaf(
        &mut self,
        parser: &mut ByteParser<'_>,
        tree: &mut PhyloTree,
    ) -> Result<VertexIndex, ParsingError> {
        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        if label.is_empty() {
            return Err(ParsingError::invalid_newick_string(
                parser,
                "Leaf without label".to_string(),
            ));
        }
        let branch_length = self.parse_branch_length(parser)?;

        Ok(tree.add_leaf(label, branch_length))
    }

    /// Parses optional branch length `[:number]`:
    /// - Skips comments/whitespace before and after `:`
    /// - Supports scientific notation (e.g., `1.5e-10`)
    ///
    /// # Returns
    /// - [BranchLength] if found branch length and was able to parse it
    /// - `None` if found no branch length
    /// - [ParsingError] if it couldn't parse branch length value
    fn parse_branch_length(
        &mut self,
        parser: &mut ByteParser<'_>,
    ) -> Result<Option<BranchLength>, ParsingError> {
        parser.skip_trivia()?;
        if !parser.eat(b':') {
            return Ok(None);
        }
        parser.skip_trivia()?;

        // Digits, sign, decimal point and exponent of a float
        let raw = parser.take_while(|b| b.is_ascii_digit() || b"+-.eE".contains(&b));
        let branch_length_str = String::from_utf8_lossy(raw);

        let value: f64 = branch_length_str.parse().map_err(|_| {
            ParsingError::invalid_number(
                parser,
                format!("Invalid branch length: '{}'", branch_length_str),
            )
        })?;
        match BranchLength::try_new(value) {
            Some(branch_length) => Ok(Some(branch_length)),
            None => Err(ParsingError::invalid_number(
                parser,
                format!("Branch length must be non-negative and finite, got {}", value),
            )),
        }
    }

    /// Splits a label of an internal vertex into (support, name).
    fn interpret_internal_label(&self, label: String) -> (Option<f64>, Option<String>) {
        match self.internal_labels {
            InternalLabel::SupportOrName => match label.parse::<f64>() {
                Ok(support) if support.is_finite() => (Some(support), None),
                _ => (None, Some(label)),
            },
            InternalLabel::Name => (None, Some(label)),
        }
    }
}
