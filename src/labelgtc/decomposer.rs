//! Recursive decomposition along the trusted frontier.

use crate::labelgtc::classifier::Strategy;
use crate::labelgtc::contraction::Contraction;
use crate::labelgtc::error::LabelGtcError;
use crate::labelgtc::events::{Event, EventSink};
use crate::labelgtc::frontier::mark_frontier;
use crate::labelgtc::instance::Instance;
use crate::labelgtc::resolution::resolve_with_engine;
use crate::labelgtc::{LabelGtc, Outcome};
use crate::model::{CoverageStatus, VertexIndex};
use crate::solver::ResolutionEngine;
use tracing::trace;

impl<E: ResolutionEngine, S: EventSink> LabelGtc<E, S> {
    /// Decomposes a binarized instance that no single strategy resolves.
    ///
    /// 1. Marks the trusted frontier.
    /// 2. Every frontier subtree justified by trust alone (no exact match) is
    ///    contracted to a placeholder and solved as its own instance.
    /// 3. The remaining non-leaf frontier subtrees are contracted as well.
    /// 4. The contracted skeleton is resolved by the engine.
    /// 5. The remembered subtrees replace their placeholders in every
    ///    resolved skeleton.
    ///
    /// Sub-instances with an unimplemented strategy keep their subtree as is;
    /// their strategies are listed as deferred.
    pub(crate) fn decompose(&mut self, mut instance: Instance<'_>) -> Result<Outcome, LabelGtcError> {
        let depth = instance.depth();
        let frontier = mark_frontier(&mut instance)?;
        let mut contraction = Contraction::new(&format!("d{}", depth));
        let mut deferred = Vec::new();

        let subproblems: Vec<VertexIndex> = frontier
            .iter()
            .copied()
            .filter(|&index| {
                let vertex = &instance.gene()[index];
                !vertex.is_root()
                    && !vertex.labels().subproblem_root
                    && vertex.labels().coverage == CoverageStatus::None
            })
            .collect();
        for index in subproblems {
            let ordinal = contraction.contract(instance.gene_mut(), index, &self.species)?;
            let subtree = contraction.take(ordinal);
            self.sink.event(&Event::SubproblemExtracted {
                depth,
                leaves: subtree.num_leaves(),
            });

            let resolved = match self.process(instance.child(subtree))? {
                Outcome::Resolved(resolution) => {
                    deferred.extend(resolution.deferred);
                    resolution.tree
                }
                Outcome::NotImplemented { strategy, tree } => {
                    deferred.push(strategy);
                    tree
                }
            };
            contraction.put(ordinal, resolved);
        }

        for index in frontier {
            let remaining = instance
                .gene()
                .get(index)
                .is_some_and(|v| v.is_internal() && !v.is_root());
            if remaining {
                contraction.contract(instance.gene_mut(), index, &self.species)?;
            }
        }
        let skeleton = instance.into_gene();
        self.sink.event(&Event::SkeletonContracted {
            depth,
            placeholders: contraction.len(),
            leaves: skeleton.num_leaves(),
        });
        trace!("Contracted tree:\n{}", skeleton.to_ascii());

        let solutions = resolve_with_engine(skeleton, &self.species, &self.engine, &self.config, depth)?;
        let trees = solutions
            .into_iter()
            .map(|solution| contraction.reattach(solution))
            .collect::<Result<Vec<_>, _>>()?;
        if let Some(best) = trees.first() {
            self.sink.event(&Event::TreeRebuilt {
                depth,
                leaves: best.num_leaves(),
                candidates: trees.len(),
            });
            trace!("Rebuilt tree:\n{}", best.to_ascii());
        }

        Outcome::resolved(trees, Strategy::Decompose, deferred)
    }
}
