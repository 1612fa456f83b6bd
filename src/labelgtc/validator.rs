//! Covering-set validation and coverage labelling.

use crate::labelgtc::error::LabelGtcError;
use crate::labelgtc::instance::{Instance, Stage};
use crate::model::{CoverageStatus, VertexIndex};
use std::collections::BTreeSet;

/// Prefix of the names given to unnamed internal gene tree vertices
pub const INTERNAL_NAME_PREFIX: &str = "n";

/// Result of a successful validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coverage {
    /// Number of (covering tree, gene vertex) topology matches
    pub matched: usize,
    /// Number of gene vertices labelled [CoverageStatus::Exact]
    pub exact: usize,
}

/// Labels every gene tree vertex with its [CoverageStatus] and checks that
/// the covering set fits the gene tree.
///
/// Labels of the gene tree are reset first and unnamed internal vertices are
/// named `n{index}`. Covering-set trees are processed in order; for each,
/// every gene vertex is tested in post-order. On a match
/// the vertex becomes [Exact](CoverageStatus::Exact) unless it already has a
/// status, and all its strict descendants become
/// [Descendant](CoverageStatus::Descendant), overwriting earlier statuses.
///
/// # Errors
/// [LabelGtcError::CoveringSetMismatch] unless every covering-set tree
/// matched and the covering-set leaves equal the gene tree leaves (as sets
/// and in number).
pub fn validate(instance: &mut Instance<'_>) -> Result<Coverage, LabelGtcError> {
    let covering = instance.covering().to_vec();
    let gene = instance.gene_mut();
    gene.reset_labels();
    gene.label_internal_vertices(INTERNAL_NAME_PREFIX);

    // Topology is not changed by labelling, so forms are computed once
    let forms = gene.canonical_forms();
    let post_order: Vec<VertexIndex> = gene.post_order_iter().map(|v| v.index()).collect();

    let mut matched = 0;
    for tree in &covering {
        let form = tree.canonical_form(tree.root_index());
        for &index in &post_order {
            if forms[index].as_deref() != Some(form.as_str()) {
                continue;
            }
            matched += 1;
            let labels = gene[index].labels_mut();
            if labels.coverage == CoverageStatus::None {
                labels.coverage = CoverageStatus::Exact;
            }
            for descendant in gene.descendants(index) {
                gene[descendant].labels_mut().coverage = CoverageStatus::Descendant;
            }
        }
    }

    let gene_leaves: BTreeSet<&str> = gene.leaf_names().into_iter().collect();
    let covering_leaves: Vec<&str> = covering.iter().flat_map(|t| t.leaf_names()).collect();
    let covering_set: BTreeSet<&str> = covering_leaves.iter().copied().collect();

    let missing: Vec<String> = gene_leaves
        .difference(&covering_set)
        .map(|s| s.to_string())
        .collect();
    let unexpected: Vec<String> = covering_set
        .difference(&gene_leaves)
        .map(|s| s.to_string())
        .collect();

    if matched != covering.len()
        || !missing.is_empty()
        || !unexpected.is_empty()
        || covering_leaves.len() != gene.num_leaves()
    {
        return Err(LabelGtcError::CoveringSetMismatch {
            matched,
            expected: covering.len(),
            missing,
            unexpected,
        });
    }

    let exact = gene
        .vertices()
        .filter(|v| v.labels().coverage == CoverageStatus::Exact)
        .count();
    instance.set_stage(Stage::Validated);
    Ok(Coverage { matched, exact })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newick::{parse_forest, parse_str};

    #[test]
    fn test_exact_and_descendant() {
        let gene = parse_str("((a_A,b_B),(c_C,d_A));").unwrap();
        let covering = parse_forest("(a_A,b_B); c_C; d_A;").unwrap();
        let mut instance = Instance::new(gene, &covering, 0.5);

        let coverage = validate(&mut instance).unwrap();
        assert_eq!(coverage.matched, 3);
        assert_eq!(coverage.exact, 3);
        assert_eq!(instance.stage(), Stage::Validated);

        let gene = instance.gene();
        let left = gene.root().children()[0];
        let right = gene.root().children()[1];
        assert_eq!(gene[left].labels().coverage, CoverageStatus::Exact);
        assert_eq!(gene[right].labels().coverage, CoverageStatus::None);
        for &leaf in gene[left].children() {
            assert_eq!(gene[leaf].labels().coverage, CoverageStatus::Descendant);
        }
    }

    #[test]
    fn test_names_unnamed_internal_vertices() {
        let gene = parse_str("((a_A,b_B)AB,(c_C,d_A)0.4);").unwrap();
        let covering = parse_forest("a_A; b_B; c_C; d_A;").unwrap();
        let mut instance = Instance::new(gene, &covering, 0.5);
        validate(&mut instance).unwrap();

        let gene = instance.gene();
        let left = gene.root().children()[0];
        let right = gene.root().children()[1];
        assert_eq!(gene[left].name(), Some("AB"));
        assert_eq!(gene[right].name(), Some(format!("n{}", right).as_str()));
        assert_eq!(gene[right].support(), Some(0.4));
        assert_eq!(gene.root().name(), Some(format!("n{}", gene.root_index()).as_str()));
        assert_eq!(gene.leaf_names(), vec!["a_A", "b_B", "c_C", "d_A"]);
    }

    #[test]
    fn test_enclosing_match_overwrites_descendants() {
        let gene = parse_str("((a_A,b_B),c_C);").unwrap();
        let covering = parse_forest("a_A; ((a_A,b_B),c_C);").unwrap();
        let mut instance = Instance::new(gene, &covering, 0.5);

        // leaf counts differ (a_A twice), so the instance is rejected ...
        assert!(validate(&mut instance).is_err());
        // ... but the labels show the overwrite
        let gene = instance.gene();
        let a = gene.leaves_of(gene.root_index())[0];
        assert_eq!(gene[a].labels().coverage, CoverageStatus::Descendant);
        assert_eq!(gene.root().labels().coverage, CoverageStatus::Exact);
    }

    #[test]
    fn test_unmatched_topology() {
        let gene = parse_str("((a_A,b_B),c_C);").unwrap();
        let covering = parse_forest("(a_A,c_C); b_B;").unwrap();
        let mut instance = Instance::new(gene, &covering, 0.5);

        match validate(&mut instance) {
            Err(LabelGtcError::CoveringSetMismatch {
                matched, expected, ..
            }) => {
                assert_eq!(matched, 1);
                assert_eq!(expected, 2);
            }
            other => panic!("Expected CoveringSetMismatch, got {:?}", other),
        }
    }
}
