//! Maximal trusted frontier.

use crate::labelgtc::error::LabelGtcError;
use crate::labelgtc::instance::{Instance, Stage};
use crate::model::{CoverageStatus, Vertex, VertexIndex};
use std::collections::{HashSet, VecDeque};

/// Returns whether the edge into `vertex` may belong to the trusted frontier:
/// the vertex is trusted and not below an exact match, or it is an exact
/// match itself (which overrides confidence).
pub fn is_admissible(vertex: &Vertex) -> bool {
    let coverage = vertex.labels().coverage;
    (vertex.is_trusted() && coverage != CoverageStatus::Descendant)
        || coverage == CoverageStatus::Exact
}

/// Marks the maximal trusted frontier of the gene tree and returns its
/// vertices in the order they were admitted (level order).
///
/// Children are tested in level order; an admitted child is marked and not
/// descended into, so the frontier is an antichain. Traversal ends as soon
/// as the frontier covers all leaves.
///
/// # Errors
/// [LabelGtcError::Precondition] if the instance was not binarized.
pub fn mark_frontier(instance: &mut Instance<'_>) -> Result<Vec<VertexIndex>, LabelGtcError> {
    instance.require(Stage::Binarized)?;
    let gene = instance.gene_mut();
    for index in gene.pre_order_iter().map(|v| v.index()).collect::<Vec<_>>() {
        gene[index].labels_mut().in_frontier = false;
    }

    let num_leaves = gene.num_leaves();
    let mut covered: HashSet<VertexIndex> = HashSet::with_capacity(num_leaves);
    let mut frontier = Vec::new();
    let mut queue = VecDeque::from([gene.root_index()]);

    while let Some(index) = queue.pop_front() {
        if covered.len() == num_leaves {
            break;
        }
        let children = gene[index].children().to_vec();
        for child in children {
            if is_admissible(&gene[child]) {
                gene[child].labels_mut().in_frontier = true;
                covered.extend(gene.leaves_of(child));
                frontier.push(child);
            } else {
                queue.push_back(child);
            }
        }
    }

    instance.set_stage(Stage::FrontierMarked);
    Ok(frontier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labelgtc::binarizer::binarize;
    use crate::labelgtc::validator::validate;
    use crate::newick::{parse_forest, parse_str};

    #[test]
    fn test_exact_overrides_low_confidence() {
        let gene = parse_str("((a_A,b_B)0.1,(c_C,d_A)0.1)0.1;").unwrap();
        let covering = parse_forest("(a_A,b_B); c_C; d_A;").unwrap();
        let mut instance = Instance::new(gene, &covering, 0.5);
        validate(&mut instance).unwrap();
        binarize(&mut instance).unwrap();

        let frontier = mark_frontier(&mut instance).unwrap();
        let gene = instance.gene();
        let names: Vec<_> = frontier
            .iter()
            .map(|&v| gene.leaf_names_of(v).join(","))
            .collect();
        assert_eq!(names, vec!["a_A,b_B", "c_C", "d_A"]);
    }

    #[test]
    fn test_requires_binarization() {
        let covering = parse_forest("a_A; b_B;").unwrap();
        let mut instance = Instance::new(parse_str("(a_A,b_B);").unwrap(), &covering, 0.5);
        validate(&mut instance).unwrap();
        assert!(matches!(
            mark_frontier(&mut instance),
            Err(LabelGtcError::Precondition {
                required: Stage::Binarized,
                ..
            })
        ));
    }
}
