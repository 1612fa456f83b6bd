//! Resolution engine interface and the built-in engines.

use crate::labelgtc::error::LabelGtcError;
use crate::model::{PhyloTree, VertexIndex};
use crate::newick::{NewickStyle, to_newick};
use crate::solver::cost::{CostModel, ReconciliationCost};
use crate::species::{LcaMap, SpeciesTree, lca_mapping};
use std::collections::HashSet;

/// Cost-based solver resolving the polytomies of a gene tree.
///
/// Given a gene tree whose vertices are mapped onto a species tree, returns
/// fully resolved candidate trees in Newick format, best first. Leaf names
/// (including placeholders standing in for contracted subtrees) must be
/// preserved verbatim.
pub trait ResolutionEngine {
    /// Resolves `gene`, returning at most `max_solutions` serialized trees.
    ///
    /// # Arguments
    /// * `gene` - Gene tree, species-labelled via `lca`
    /// * `species` - Species tree
    /// * `lca` - LCA mapping of `gene` onto `species`
    /// * `costs` - Duplication and loss weights
    /// * `max_solutions` - Upper bound on the number of returned trees
    fn solve(
        &self,
        gene: &PhyloTree,
        species: &SpeciesTree,
        lca: &LcaMap,
        costs: &CostModel,
        max_solutions: usize,
    ) -> Result<Vec<String>, LabelGtcError>;
}

// =#========================================================================#=
// PASS THROUGH
// =#========================================================================#=
/// Engine returning its input unchanged.
///
/// Contracting and reattaching around this engine reproduces the input
/// topology, which makes it useful for checking the decomposition bookkeeping.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughEngine;

impl ResolutionEngine for PassThroughEngine {
    fn solve(
        &self,
        gene: &PhyloTree,
        _species: &SpeciesTree,
        _lca: &LcaMap,
        _costs: &CostModel,
        _max_solutions: usize,
    ) -> Result<Vec<String>, LabelGtcError> {
        Ok(vec![to_newick(gene, NewickStyle::Full)])
    }
}

// =#========================================================================#=
// SPECIES GUIDED
// =#========================================================================#=
/// Resolves polytomies along the species tree.
///
/// The children of a polytomy mapped strictly below a species vertex are
/// grouped by the child of that species vertex they descend from; every group
/// is resolved recursively and the groups are joined by speciations. Children
/// mapped to the species vertex itself are then added by duplications. This
/// keeps duplications and losses low; in addition the left-to-right
/// caterpillar resolution is proposed. Candidates are ranked by their
/// weighted [ReconciliationCost].
#[derive(Debug, Clone, Copy, Default)]
pub struct SpeciesGuidedEngine;

/// Vertex of a tree under construction together with its species image.
#[derive(Debug, Clone, Copy)]
struct Mapped {
    index: VertexIndex,
    image: VertexIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resolution {
    SpeciesGuided,
    Caterpillar,
}

impl ResolutionEngine for SpeciesGuidedEngine {
    fn solve(
        &self,
        gene: &PhyloTree,
        species: &SpeciesTree,
        lca: &LcaMap,
        costs: &CostModel,
        max_solutions: usize,
    ) -> Result<Vec<String>, LabelGtcError> {
        if !gene.is_root_set() {
            return Err(LabelGtcError::Engine("gene tree has no root".to_string()));
        }

        let mut seen = HashSet::new();
        let mut ranked: Vec<(f64, String)> = Vec::new();
        for resolution in [Resolution::SpeciesGuided, Resolution::Caterpillar] {
            let resolved = build_resolved(gene, species, lca, resolution)?;
            if !seen.insert(resolved.canonical_form(resolved.root_index())) {
                continue;
            }
            let resolved_lca = lca_mapping(&resolved, species)?;
            let cost = ReconciliationCost::of(&resolved, species, &resolved_lca).weighted(costs);
            ranked.push((cost, to_newick(&resolved, NewickStyle::Full)));
        }

        // Stable, so ties keep the species-guided candidate first
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
        ranked.truncate(max_solutions.max(1));
        Ok(ranked.into_iter().map(|(_, newick)| newick).collect())
    }
}

/// Copies `gene` into a new tree, resolving every polytomy.
fn build_resolved(
    gene: &PhyloTree,
    species: &SpeciesTree,
    lca: &LcaMap,
    resolution: Resolution,
) -> Result<PhyloTree, LabelGtcError> {
    let mut out = PhyloTree::with_capacity(2 * gene.num_leaves());
    let root = copy_vertex(gene, gene.root_index(), species, lca, resolution, &mut out)?;
    out.set_root(root.index);
    Ok(out)
}

fn copy_vertex(
    gene: &PhyloTree,
    index: VertexIndex,
    species: &SpeciesTree,
    lca: &LcaMap,
    resolution: Resolution,
    out: &mut PhyloTree,
) -> Result<Mapped, LabelGtcError> {
    let vertex = &gene[index];
    let image = lca.get(index).ok_or_else(|| {
        LabelGtcError::Engine(format!("gene vertex {} has no species image", index))
    })?;

    if vertex.is_leaf() {
        let leaf = out.add_leaf(vertex.name().unwrap_or_default(), vertex.branch_length());
        if let Some(s) = vertex.species() {
            out[leaf].set_species(s.to_string());
        }
        return Ok(Mapped { index: leaf, image });
    }

    let mut children = Vec::with_capacity(vertex.children().len());
    for &child in vertex.children() {
        children.push(copy_vertex(gene, child, species, lca, resolution, out)?);
    }

    let mapped = if children.len() <= 2 {
        let indices = children.iter().map(|c| c.index).collect();
        Mapped {
            index: out.add_internal(indices, vertex.support(), None),
            image,
        }
    } else {
        match resolution {
            Resolution::SpeciesGuided => join_along_species(children, species, out),
            Resolution::Caterpillar => join_caterpillar(children, species, out),
        }
    };
    out[mapped.index].set_support(vertex.support());
    out[mapped.index].set_branch_length(vertex.branch_length());
    Ok(mapped)
}

/// Joins two subtrees below a new vertex.
fn join(a: Mapped, b: Mapped, species: &SpeciesTree, out: &mut PhyloTree) -> Mapped {
    Mapped {
        index: out.add_internal(vec![a.index, b.index], None, None),
        image: species.lca(a.image, b.image),
    }
}

/// Joins subtrees left to right: `(((x1,x2),x3),x4)`.
fn join_caterpillar(items: Vec<Mapped>, species: &SpeciesTree, out: &mut PhyloTree) -> Mapped {
    let mut iter = items.into_iter();
    let Some(first) = iter.next() else {
        unreachable!("Cannot join an empty set of subtrees")
    };
    iter.fold(first, |acc, item| join(acc, item, species, out))
}

/// Joins subtrees following the species tree below the LCA of their images.
fn join_along_species(items: Vec<Mapped>, species: &SpeciesTree, out: &mut PhyloTree) -> Mapped {
    if items.len() == 1 {
        return items[0];
    }
    let top = species
        .lca_of(items.iter().map(|item| item.image))
        .unwrap_or(items[0].image);

    let top_children = species.tree()[top].children();
    let mut groups: Vec<Vec<Mapped>> = vec![Vec::new(); top_children.len()];
    let mut at_top = Vec::new();
    for item in items {
        match top_children
            .iter()
            .position(|&c| species.is_ancestor(c, item.image))
        {
            Some(group) => groups[group].push(item),
            None => at_top.push(item),
        }
    }

    // Speciations between groups, duplications for subtrees mapped to `top`
    let mut joined: Vec<Mapped> = groups
        .into_iter()
        .filter(|group| !group.is_empty())
        .map(|group| join_along_species(group, species, out))
        .collect();
    joined.extend(at_top);
    join_caterpillar(joined, species, out)
}
