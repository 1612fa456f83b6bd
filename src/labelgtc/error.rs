//! Error types of the gene tree correction pipeline.

use crate::labelgtc::instance::Stage;
use crate::parser::ParsingError;
use thiserror::Error;

/// Unified errors of the correction pipeline.
///
/// All variants are fatal for the call that produced them; no partial result
/// is returned. Strategies that are detected but not implemented are *not*
/// errors, see [Outcome::NotImplemented](crate::labelgtc::Outcome::NotImplemented).
#[derive(Debug, Clone, Error)]
pub enum LabelGtcError {
    /// The covering set does not fit the gene tree: not every covering tree
    /// matched a gene subtree, or the leaf sets differ.
    #[error(
        "Covering set mismatch: {matched} of {expected} covering trees matched \
         (missing leaves: {missing:?}, unexpected leaves: {unexpected:?})"
    )]
    CoveringSetMismatch {
        /// Number of successful exact matches
        matched: usize,
        /// Number of covering-set trees
        expected: usize,
        /// Gene tree leaves not covered by any covering-set tree
        missing: Vec<String>,
        /// Covering-set leaves absent from the gene tree
        unexpected: Vec<String>,
    },

    /// A stage was invoked before the stage it depends on.
    #[error("Precondition error: {stage:?} reached, but {required:?} is required")]
    Precondition { stage: Stage, required: Stage },

    /// Placeholders and remembered subtrees got out of step during reattachment.
    #[error(
        "Decomposition invariant violated: {placeholders} placeholders for {subtrees} contracted subtrees"
    )]
    DecompositionInvariantViolation { placeholders: usize, subtrees: usize },

    /// A gene tree leaf belongs to a species missing from the species tree.
    #[error("Species '{species}' of leaf '{leaf}' is not in the species tree")]
    UnknownSpecies { leaf: String, species: String },

    /// The species tree cannot be used (e.g. duplicate species names).
    #[error("Invalid species tree: {0}")]
    InvalidSpeciesTree(String),

    /// Configuration value out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The resolution engine returned no candidate tree.
    #[error("Resolution engine returned no solution")]
    EmptySolution,

    /// The resolution engine failed.
    #[error("Resolution engine error: {0}")]
    Engine(String),

    /// A tree could not be parsed.
    #[error("Parsing error: {0}")]
    Parsing(#[from] ParsingError),
}
