//! Labels attached to gene tree vertices while an instance is processed.
//!
//! These are derived data, never part of a parsed tree: all fields start in
//! their "unset" state and are filled in by the stages of the
//! [labelgtc](crate::labelgtc) pipeline.

/// Relation of a gene tree vertex to the covering set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CoverageStatus {
    /// Neither matched by a covering-set tree nor below such a match.
    #[default]
    None,
    /// Strictly below a vertex with status [Exact](CoverageStatus::Exact).
    Descendant,
    /// The subtree of this vertex equals a covering-set tree.
    Exact,
}

impl CoverageStatus {
    /// Numeric code (NONE = 0, DESCENDANT = 1, EXACT = 2).
    pub fn code(self) -> u8 {
        match self {
            CoverageStatus::None => 0,
            CoverageStatus::Descendant => 1,
            CoverageStatus::Exact => 2,
        }
    }
}

/// Typed per-vertex record of everything the pipeline attaches to a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VertexLabels {
    /// Coverage status set by the covering-set validation.
    pub coverage: CoverageStatus,
    /// Binarized support; `None` until binarization (and on leaves).
    pub trusted: Option<bool>,
    /// Member of the maximal trusted frontier.
    pub in_frontier: bool,
    /// Root of a subproblem that was (or is being) solved separately.
    pub subproblem_root: bool,
    /// Placeholder leaf standing in for a contracted subtree.
    pub placeholder: bool,
}

impl VertexLabels {
    /// Clears the markers only used during decomposition.
    pub fn clear_decomposition_markers(&mut self) {
        self.in_frontier = false;
        self.subproblem_root = false;
        self.placeholder = false;
    }
}
