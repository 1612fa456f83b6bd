//! Contraction of subtrees to placeholder leaves and their reattachment.
//!
//! A placeholder is named `#contracted#<scope>#<ordinal>`, so it survives
//! serialization through a resolution engine and is found again even if the
//! engine reorders the tree.

use crate::labelgtc::error::LabelGtcError;
use crate::model::{CoverageStatus, PhyloTree, VertexIndex};
use crate::species::{SpeciesTree, lca_mapping};

/// Prefix of all placeholder names
pub const PLACEHOLDER_PREFIX: &str = "#contracted#";

/// Returns whether a leaf name denotes a placeholder.
pub fn is_placeholder_name(name: &str) -> bool {
    name.starts_with(PLACEHOLDER_PREFIX)
}

/// Subtrees contracted out of one tree, in contraction order.
#[derive(Debug, Clone)]
pub(crate) struct Contraction {
    prefix: String,
    subtrees: Vec<PhyloTree>,
}

impl Contraction {
    /// Creates an empty contraction; `scope` keeps placeholder names of
    /// nested contractions apart.
    pub(crate) fn new(scope: &str) -> Self {
        Contraction {
            prefix: format!("{}{}#", PLACEHOLDER_PREFIX, scope),
            subtrees: Vec::new(),
        }
    }

    /// Returns the number of contracted subtrees.
    pub(crate) fn len(&self) -> usize {
        self.subtrees.len()
    }

    /// Replaces the subtree rooted at `index` by a placeholder leaf and
    /// returns the ordinal of the contraction.
    ///
    /// The placeholder is marked as contracted subproblem root, exact and
    /// trusted, and its species is the LCA of the species of the removed leaves.
    pub(crate) fn contract(
        &mut self,
        tree: &mut PhyloTree,
        index: VertexIndex,
        species: &SpeciesTree,
    ) -> Result<usize, LabelGtcError> {
        let ordinal = self.subtrees.len();
        let name = format!("{}{}", self.prefix, ordinal);
        let (subtree, placeholder) = tree.contract(index, name);

        let image = lca_mapping(&subtree, species)?[subtree.root_index()];
        let vertex = &mut tree[placeholder];
        vertex.set_species(species.name_of(image).to_string());
        let labels = vertex.labels_mut();
        labels.placeholder = true;
        labels.subproblem_root = true;
        labels.coverage = CoverageStatus::Exact;
        labels.trusted = Some(true);

        self.subtrees.push(subtree);
        Ok(ordinal)
    }

    /// Takes the subtree of contraction `ordinal` out, e.g. to resolve it.
    pub(crate) fn take(&mut self, ordinal: usize) -> PhyloTree {
        std::mem::take(&mut self.subtrees[ordinal])
    }

    /// Puts a (resolved) subtree back as contraction `ordinal`.
    pub(crate) fn put(&mut self, ordinal: usize, subtree: PhyloTree) {
        self.subtrees[ordinal] = subtree;
    }

    /// Replaces every placeholder of this contraction in `tree` by a copy of
    /// its subtree and clears the decomposition markers.
    ///
    /// # Errors
    /// [LabelGtcError::DecompositionInvariantViolation] unless the placeholders
    /// of `tree` correspond one-to-one to the contracted subtrees.
    pub(crate) fn reattach(&self, mut tree: PhyloTree) -> Result<PhyloTree, LabelGtcError> {
        let violation = |placeholders: usize| LabelGtcError::DecompositionInvariantViolation {
            placeholders,
            subtrees: self.subtrees.len(),
        };

        let placeholders: Vec<(VertexIndex, Option<usize>)> = tree
            .level_order_iter()
            .filter(|v| v.is_leaf())
            .filter_map(|v| {
                let ordinal = v.name()?.strip_prefix(self.prefix.as_str())?;
                Some((v.index(), ordinal.parse::<usize>().ok()))
            })
            .collect();
        if placeholders.len() != self.subtrees.len() {
            return Err(violation(placeholders.len()));
        }

        let mut seen = vec![false; self.subtrees.len()];
        for &(_, ordinal) in &placeholders {
            match ordinal {
                Some(o) if o < seen.len() && !seen[o] => seen[o] = true,
                _ => return Err(violation(placeholders.len())),
            }
        }

        for (index, ordinal) in placeholders {
            if let Some(o) = ordinal {
                tree.splice(index, self.subtrees[o].clone());
            }
        }
        tree.clear_decomposition_markers();
        Ok(tree.compacted())
    }
}
