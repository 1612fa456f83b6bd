//! The unit of recursion: a gene tree with its covering set.

use crate::labelgtc::error::LabelGtcError;
use crate::model::PhyloTree;
use std::collections::HashSet;

/// Pipeline stage an [Instance] has reached.
///
/// Stages are ordered; a stage requires all previous ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Created, no labels assigned
    Constructed,
    /// Coverage statuses assigned, covering set accepted
    Validated,
    /// Trust flags assigned
    Binarized,
    /// Trusted frontier marked
    FrontierMarked,
}

/// A gene tree together with the covering-set trees and threshold it is
/// processed with.
///
/// The instance owns its gene tree; covering-set trees are borrowed from the
/// caller and shared by all sub-instances.
#[derive(Debug, Clone)]
pub struct Instance<'a> {
    gene: PhyloTree,
    covering: Vec<&'a PhyloTree>,
    threshold: f64,
    depth: usize,
    stage: Stage,
}

impl<'a> Instance<'a> {
    /// Creates a top-level instance.
    ///
    /// # Arguments
    /// * `gene` - Gene tree to correct
    /// * `covering` - Covering-set trees, processed in the given order
    /// * `threshold` - Support threshold for trusting internal vertices
    pub fn new(gene: PhyloTree, covering: &'a [PhyloTree], threshold: f64) -> Self {
        Instance {
            gene,
            covering: covering.iter().collect(),
            threshold,
            depth: 0,
            stage: Stage::Constructed,
        }
    }

    /// Creates the instance of a subtree detached from this instance's gene tree.
    ///
    /// Its covering set consists of the covering-set trees whose leaves all
    /// belong to `gene`; threshold is inherited.
    pub(crate) fn child(&self, gene: PhyloTree) -> Instance<'a> {
        let leaves: HashSet<&str> = gene.leaf_names().into_iter().collect();
        let covering = self
            .covering
            .iter()
            .copied()
            .filter(|tree| tree.leaf_names().iter().all(|name| leaves.contains(name)))
            .collect();

        Instance {
            gene,
            covering,
            threshold: self.threshold,
            depth: self.depth + 1,
            stage: Stage::Constructed,
        }
    }

    /// Returns the gene tree.
    pub fn gene(&self) -> &PhyloTree {
        &self.gene
    }

    pub(crate) fn gene_mut(&mut self) -> &mut PhyloTree {
        &mut self.gene
    }

    /// Consumes the instance, returning its gene tree.
    pub fn into_gene(self) -> PhyloTree {
        self.gene
    }

    /// Returns the covering-set trees.
    pub fn covering(&self) -> &[&'a PhyloTree] {
        &self.covering
    }

    /// Returns the support threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the recursion depth (0 for a top-level instance).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the stage reached.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub(crate) fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
    }

    /// Fails with [LabelGtcError::Precondition] unless `required` was reached.
    pub(crate) fn require(&self, required: Stage) -> Result<(), LabelGtcError> {
        if self.stage < required {
            return Err(LabelGtcError::Precondition {
                stage: self.stage,
                required,
            });
        }
        Ok(())
    }
}
