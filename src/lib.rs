//! LabelGTC is a library to correct gene trees with a species tree and a
//! covering set of trusted subtrees.
//!
//! A gene tree reconstructed from sequences is often only partially reliable:
//! some clades have low support. Independently computed, high-confidence
//! subtrees (the *covering set*) together with the species tree are used to
//! resolve the unreliable part. Core functionality provided:
//! - Labelling: coverage statuses from the covering set, trust flags from
//!   support values and a threshold, the maximal trusted frontier.
//! - Strategy selection: leaf cover and polytomy resolution are delegated to
//!   a [ResolutionEngine](solver::ResolutionEngine); minTRS and minSGT are
//!   detected and reported; everything else is decomposed recursively.
//! - Tree model: [PhyloTree](model::PhyloTree), a multifurcating arena tree
//!   with detach/contract/splice/collapse operations.
//! - Newick reading and writing, see [crate::newick].
//! - Species trees and LCA mapping, see [crate::species].
//!
//! # Usage patterns
//! 1. [label_gtc] corrects a gene tree given as Newick strings with default settings.
//! 2. Configure a [LabelGtc](labelgtc::LabelGtc) with a
//!    [LabelGtcConfig](labelgtc::LabelGtcConfig), an engine and an
//!    [EventSink](labelgtc::EventSink) for full control.
//!
//! ## Example Default Configuration
//! ```
//! use labelgtc::label_gtc;
//!
//! let outcome = label_gtc(
//!     "((A,B),C);",
//!     "((a_A,c_C)0.2,b_B,(d_A,e_B)0.9);",
//!     "a_A; b_B; c_C; (d_A,e_B);",
//!     0.5,
//! )
//! .unwrap();
//! assert!(outcome.is_resolved());
//! assert_eq!(outcome.tree().num_leaves(), 5);
//! ```
//!
//! ## Example Custom Configuration
//! ```
//! use labelgtc::labelgtc::{LabelGtc, LabelGtcConfig, RecordingSink};
//! use labelgtc::newick::{parse_forest, parse_str};
//! use labelgtc::solver::CostModel;
//!
//! let config = LabelGtcConfig::new()
//!     .with_threshold(0.6)
//!     .with_costs(CostModel::new(2.0, 1.0))
//!     .with_max_solutions(5);
//! let mut engine = LabelGtc::new(parse_str("((A,B),C);").unwrap(), config)
//!     .unwrap()
//!     .with_sink(RecordingSink::new());
//!
//! let gene = parse_str("((a_A,b_B)0.9,c_C);").unwrap();
//! let covering = parse_forest("a_A; b_B; c_C;").unwrap();
//! let outcome = engine.merge_resolutions(gene, &covering).unwrap();
//! assert!(outcome.is_resolved());
//! assert!(!engine.sink().events().is_empty());
//! ```

pub mod labelgtc;
pub mod model;
pub mod newick;
pub mod parser;
pub mod solver;
pub mod species;

pub use labelgtc::{LabelGtc, LabelGtcConfig, LabelGtcError, Outcome, Strategy};

// ============================================================================
// QUICK API (pub)
// ============================================================================
/// Corrects a gene tree with default settings.
///
/// # Arguments
/// * `species` - Species tree (Newick)
/// * `gene` - Gene tree (Newick) with leaves named `<gene>_<species>` and
///   support values on internal vertices
/// * `covering` - Covering-set trees (semicolon separated Newick strings)
/// * `threshold` - Support threshold for trusting internal vertices
///
/// # Errors
/// Any [LabelGtcError], including parsing errors of the input strings.
pub fn label_gtc(species: &str, gene: &str, covering: &str, threshold: f64) -> Result<Outcome, LabelGtcError> {
    let species = species::SpeciesTree::from_newick(species)?;
    let gene = newick::parse_str(gene)?;
    let covering = newick::parse_forest(covering)?;

    let config = LabelGtcConfig::new().with_threshold(threshold);
    LabelGtc::for_species(species, config)?.merge_resolutions(gene, &covering)
}
