//! Gene tree correction by labelling, strategy selection and recursive
//! decomposition.
//!
//! [LabelGtc] corrects a gene tree against a species tree and a covering set
//! of trusted subtrees. Every [Instance] runs through the stages
//! 1. [validate](validator::validate) - label coverage statuses, check the covering set
//! 2. [binarize](binarizer::binarize) - turn support values into trust flags
//! 3. [classify](classifier::classify) - choose a [Strategy]
//!
//! Directly solvable instances are handed to the
//! [ResolutionEngine](crate::solver::ResolutionEngine); all others are
//! decomposed along the [trusted frontier](frontier::mark_frontier) into
//! sub-instances that re-enter the pipeline.
//!
//! # Example
//! ```
//! use labelgtc::labelgtc::{LabelGtc, LabelGtcConfig, Outcome, Strategy};
//! use labelgtc::newick::{parse_forest, parse_str};
//!
//! let species = parse_str("((A,B),C);").unwrap();
//! let gene = parse_str("(((a_A,c_C)0.2,b_B)0.3,(d_A,e_B)0.9);").unwrap();
//! let covering = parse_forest("a_A; b_B; c_C; (d_A,e_B);").unwrap();
//!
//! let mut engine = LabelGtc::new(species, LabelGtcConfig::new().with_threshold(0.5)).unwrap();
//! let outcome = engine.merge_resolutions(gene, &covering).unwrap();
//! assert_eq!(outcome.strategy(), Strategy::PolyRes);
//! assert!(outcome.tree().is_binary());
//! ```

pub mod binarizer;
pub mod classifier;
pub mod config;
pub(crate) mod contraction;
mod decomposer;
pub mod error;
pub mod events;
pub mod frontier;
pub mod instance;
mod resolution;
pub mod validator;

pub use classifier::Strategy;
pub use config::LabelGtcConfig;
pub use contraction::is_placeholder_name;
pub use error::LabelGtcError;
pub use events::{Event, EventSink, RecordingSink, TracingSink};
pub use instance::{Instance, Stage};

use crate::model::PhyloTree;
use crate::newick::{NewickStyle, to_newick};
use crate::solver::{ResolutionEngine, SpeciesGuidedEngine};
use crate::species::SpeciesTree;
use tracing::info_span;

// =#========================================================================#=
// OUTCOME
// =#========================================================================#=
/// A resolved gene tree.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Best resolved tree
    pub tree: PhyloTree,
    /// All resolved trees (Newick), best first
    pub candidates: Vec<String>,
    /// Strategy applied to the instance
    pub strategy: Strategy,
    /// Unimplemented strategies met by sub-instances, whose subtrees were kept as is
    pub deferred: Vec<Strategy>,
}

/// Result of [LabelGtc::merge_resolutions].
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The instance was resolved.
    Resolved(Resolution),
    /// The selected strategy is detected but not implemented; the labelled
    /// gene tree is returned unchanged.
    NotImplemented { strategy: Strategy, tree: PhyloTree },
}

impl Outcome {
    fn resolved(trees: Vec<PhyloTree>, strategy: Strategy, deferred: Vec<Strategy>) -> Result<Self, LabelGtcError> {
        let candidates: Vec<String> = trees
            .iter()
            .map(|tree| to_newick(tree, NewickStyle::Full))
            .collect();
        let tree = trees.into_iter().next().ok_or(LabelGtcError::EmptySolution)?;
        Ok(Outcome::Resolved(Resolution {
            tree,
            candidates,
            strategy,
            deferred,
        }))
    }

    /// Returns the strategy selected for the instance.
    pub fn strategy(&self) -> Strategy {
        match self {
            Outcome::Resolved(resolution) => resolution.strategy,
            Outcome::NotImplemented { strategy, .. } => *strategy,
        }
    }

    /// Returns the resolved tree, or the unchanged gene tree.
    pub fn tree(&self) -> &PhyloTree {
        match self {
            Outcome::Resolved(resolution) => &resolution.tree,
            Outcome::NotImplemented { tree, .. } => tree,
        }
    }

    /// Consumes the outcome, returning its tree.
    pub fn into_tree(self) -> PhyloTree {
        match self {
            Outcome::Resolved(resolution) => resolution.tree,
            Outcome::NotImplemented { tree, .. } => tree,
        }
    }

    /// Returns whether the instance was resolved.
    pub fn is_resolved(&self) -> bool {
        matches!(self, Outcome::Resolved(_))
    }
}

// =#========================================================================#=
// LABEL GTC
// =#========================================================================#=
/// Gene tree correction engine.
///
/// Owns the species tree, configuration, resolution engine and event sink;
/// processes any number of gene trees with [merge_resolutions](Self::merge_resolutions).
///
/// # Configuration
/// * `with_engine(engine)` - Replace the default [SpeciesGuidedEngine]
/// * `with_sink(sink)` - Replace the default [TracingSink]
pub struct LabelGtc<E = SpeciesGuidedEngine, S = TracingSink> {
    species: SpeciesTree,
    config: LabelGtcConfig,
    engine: E,
    sink: S,
}

impl LabelGtc {
    /// Creates an engine for the given species tree.
    ///
    /// # Errors
    /// [LabelGtcError::InvalidConfig] for an out-of-range configuration and
    /// [LabelGtcError::InvalidSpeciesTree] for an unusable species tree.
    pub fn new(species_tree: PhyloTree, config: LabelGtcConfig) -> Result<Self, LabelGtcError> {
        Self::for_species(SpeciesTree::new(species_tree)?, config)
    }

    /// Creates an engine for an already wrapped species tree.
    pub fn for_species(species: SpeciesTree, config: LabelGtcConfig) -> Result<Self, LabelGtcError> {
        config.validate()?;
        Ok(LabelGtc {
            species,
            config,
            engine: SpeciesGuidedEngine,
            sink: TracingSink,
        })
    }
}

impl<E: ResolutionEngine, S: EventSink> LabelGtc<E, S> {
    /// Uses `engine` to resolve directly solvable instances.
    pub fn with_engine<F: ResolutionEngine>(self, engine: F) -> LabelGtc<F, S> {
        LabelGtc {
            species: self.species,
            config: self.config,
            engine,
            sink: self.sink,
        }
    }

    /// Reports events to `sink`.
    pub fn with_sink<T: EventSink>(self, sink: T) -> LabelGtc<E, T> {
        LabelGtc {
            species: self.species,
            config: self.config,
            engine: self.engine,
            sink,
        }
    }

    /// Returns the species tree.
    pub fn species(&self) -> &SpeciesTree {
        &self.species
    }

    /// Returns the configuration.
    pub fn config(&self) -> &LabelGtcConfig {
        &self.config
    }

    /// Returns the event sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the engine, returning its event sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Corrects `gene` against the species tree and the covering set.
    ///
    /// # Arguments
    /// * `gene` - Gene tree with support values on internal vertices
    /// * `covering` - Covering-set trees, whose leaves together are exactly
    ///   the gene tree's leaves
    ///
    /// # Returns
    /// * [Outcome::Resolved] - the corrected tree and all candidates
    /// * [Outcome::NotImplemented] - the instance needs a strategy that is
    ///   detected but not implemented
    ///
    /// # Errors
    /// [LabelGtcError::CoveringSetMismatch] if the covering set does not fit,
    /// [LabelGtcError::UnknownSpecies] for leaves of unknown species, and
    /// errors of the resolution engine.
    pub fn merge_resolutions(
        &mut self,
        gene: PhyloTree,
        covering: &[PhyloTree],
    ) -> Result<Outcome, LabelGtcError> {
        let instance = Instance::new(gene, covering, self.config.threshold());
        self.process(instance)
    }

    /// Runs one instance through the pipeline.
    pub(crate) fn process(&mut self, mut instance: Instance<'_>) -> Result<Outcome, LabelGtcError> {
        let depth = instance.depth();
        let span = info_span!("instance", depth, leaves = instance.gene().num_leaves());
        let _enter = span.enter();

        self.sink.event(&Event::InstanceStarted {
            depth,
            leaves: instance.gene().num_leaves(),
            covering: instance.covering().len(),
        });

        let coverage = validator::validate(&mut instance)?;
        self.sink.event(&Event::CoverageLabelled {
            depth,
            matched: coverage.matched,
            exact: coverage.exact,
        });
        binarizer::binarize(&mut instance)?;

        let strategy = classifier::classify(&instance)?;
        self.sink.event(&Event::StrategySelected { depth, strategy });

        match strategy {
            Strategy::LeafCover | Strategy::PolyRes => {
                let trees = resolution::resolve_with_engine(
                    instance.into_gene(),
                    &self.species,
                    &self.engine,
                    &self.config,
                    depth,
                )?;
                Outcome::resolved(trees, strategy, Vec::new())
            }
            Strategy::MinTrs | Strategy::MinSgt => {
                self.sink.event(&Event::StrategyUnavailable { depth, strategy });
                let mut tree = instance.into_gene();
                tree.clear_decomposition_markers();
                Ok(Outcome::NotImplemented { strategy, tree })
            }
            Strategy::Decompose => self.decompose(instance),
        }
    }
}
