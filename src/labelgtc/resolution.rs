//! Hands a directly solvable gene tree to the resolution engine.

use crate::labelgtc::config::LabelGtcConfig;
use crate::labelgtc::contraction::Contraction;
use crate::labelgtc::error::LabelGtcError;
use crate::model::{CoverageStatus, PhyloTree, VertexIndex};
use crate::newick::parse_str;
use crate::solver::ResolutionEngine;
use crate::species::SpeciesTree;
use tracing::{debug, trace};

/// Resolves a labelled gene tree with `engine` and returns all candidates,
/// best first.
///
/// Before delegation, untrusted edges without coverage are collapsed and
/// exactly covered subtrees are contracted, so the engine only resolves the
/// uncertain part and covering-set topologies are kept verbatim. If the root
/// itself is exactly covered the tree is returned unchanged.
///
/// # Errors
/// [LabelGtcError::EmptySolution] if the engine returns nothing, any error
/// of the engine, and [LabelGtcError::Parsing] for a malformed candidate.
pub(crate) fn resolve_with_engine<E: ResolutionEngine>(
    mut gene: PhyloTree,
    species: &SpeciesTree,
    engine: &E,
    config: &LabelGtcConfig,
    depth: usize,
) -> Result<Vec<PhyloTree>, LabelGtcError> {
    if gene.root().labels().coverage == CoverageStatus::Exact {
        gene.clear_decomposition_markers();
        return Ok(vec![gene]);
    }

    let collapsible: Vec<VertexIndex> = gene
        .post_order_iter()
        .filter(|v| {
            !v.is_root()
                && v.is_internal()
                && v.labels().coverage == CoverageStatus::None
                && !v.is_trusted()
        })
        .map(|v| v.index())
        .collect();
    for &index in &collapsible {
        gene.collapse(index);
    }

    let exact: Vec<VertexIndex> = gene
        .pre_order_iter()
        .filter(|v| {
            !v.is_root() && v.is_internal() && v.labels().coverage == CoverageStatus::Exact
        })
        .map(|v| v.index())
        .collect();
    let mut contraction = Contraction::new(&format!("r{}", depth));
    for index in exact {
        if gene.get(index).is_some() {
            contraction.contract(&mut gene, index, species)?;
        }
    }
    debug!(
        collapsed = collapsible.len(),
        contracted = contraction.len(),
        leaves = gene.num_leaves(),
        "Prepared tree for resolution"
    );
    trace!("\n{}", gene.to_ascii());

    let lca = species.lca_map(&gene)?;
    let solutions = engine.solve(
        &gene,
        species,
        &lca,
        config.costs(),
        config.max_solutions(),
    )?;
    if solutions.is_empty() {
        return Err(LabelGtcError::EmptySolution);
    }

    solutions
        .iter()
        .map(|newick| contraction.reattach(parse_str(newick)?))
        .collect()
}
