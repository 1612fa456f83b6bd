//! Duplication/loss cost of a reconciled gene tree.

use crate::model::PhyloTree;
use crate::species::{LcaMap, SpeciesTree};

/// Duplication and loss weights of a reconciliation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    /// Cost of a single gene duplication
    pub duplication: f64,
    /// Cost of a single gene loss
    pub loss: f64,
}

impl CostModel {
    /// Creates a cost model with the given weights.
    pub fn new(duplication: f64, loss: f64) -> Self {
        CostModel { duplication, loss }
    }
}

impl Default for CostModel {
    fn default() -> Self {
        CostModel::new(1.0, 1.0)
    }
}

/// Number of duplications and losses implied by the LCA reconciliation of a
/// gene tree.
///
/// # Example
/// ```
/// use labelgtc::newick::parse_str;
/// use labelgtc::solver::{CostModel, ReconciliationCost};
/// use labelgtc::species::SpeciesTree;
///
/// let species = SpeciesTree::from_newick("((A,B),C);").unwrap();
/// let gene = parse_str("((a_A,c_C),b_B);").unwrap();
/// let lca = species.lca_map(&gene).unwrap();
///
/// let cost = ReconciliationCost::of(&gene, &species, &lca);
/// assert_eq!(cost.duplications, 1);
/// assert_eq!(cost.losses, 3);
/// assert_eq!(cost.weighted(&CostModel::new(2.0, 1.0)), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconciliationCost {
    /// Number of duplication vertices
    pub duplications: usize,
    /// Number of gene losses
    pub losses: usize,
}

impl ReconciliationCost {
    /// Counts duplications and losses of `gene` under the mapping `lca`.
    ///
    /// A vertex is a duplication if one of its children maps to the same
    /// species vertex as itself, otherwise a speciation. Every edge loses one
    /// gene per species tree edge skipped; a speciation edge is expected to
    /// span exactly one species tree edge.
    pub fn of(gene: &PhyloTree, species: &SpeciesTree, lca: &LcaMap) -> Self {
        let mut cost = ReconciliationCost::default();

        for vertex in gene.vertices().filter(|v| v.is_internal()) {
            let Some(image) = lca.get(vertex.index()) else {
                continue;
            };
            let images: Vec<_> = vertex
                .children()
                .iter()
                .filter_map(|&c| lca.get(c))
                .collect();
            let is_duplication = images.contains(&image);
            if is_duplication {
                cost.duplications += 1;
            }

            let depth = species.depth(image);
            for child_image in images {
                let gap = species.depth(child_image) - depth;
                cost.losses += if is_duplication {
                    gap
                } else {
                    gap.saturating_sub(1)
                };
            }
        }

        cost
    }

    /// Returns the total cost under the given weights.
    pub fn weighted(&self, costs: &CostModel) -> f64 {
        self.duplications as f64 * costs.duplication + self.losses as f64 * costs.loss
    }
}
