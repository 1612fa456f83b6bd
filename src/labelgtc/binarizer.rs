//! Confidence binarization.

use crate::labelgtc::error::LabelGtcError;
use crate::labelgtc::instance::{Instance, Stage};
use crate::model::VertexIndex;

/// Support assumed for internal vertices without a support value
pub const DEFAULT_SUPPORT: f64 = 1.0;

/// Sets the trust flag of every internal vertex: trusted iff its support is
/// at least the instance threshold.
///
/// # Errors
/// [LabelGtcError::Precondition] if the instance was not validated.
pub fn binarize(instance: &mut Instance<'_>) -> Result<(), LabelGtcError> {
    instance.require(Stage::Validated)?;
    let threshold = instance.threshold();

    let gene = instance.gene_mut();
    let internal: Vec<VertexIndex> = gene
        .level_order_iter()
        .filter(|v| v.is_internal())
        .map(|v| v.index())
        .collect();
    for index in internal {
        let support = gene[index].support().unwrap_or(DEFAULT_SUPPORT);
        gene[index].labels_mut().trusted = Some(support >= threshold);
    }

    if instance.stage() < Stage::Binarized {
        instance.set_stage(Stage::Binarized);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labelgtc::validator::validate;
    use crate::newick::{parse_forest, parse_str};

    #[test]
    fn test_threshold_is_inclusive() {
        let gene = parse_str("((a_A,b_B)0.7,(c_C,d_A)0.69)0.1;").unwrap();
        let covering = parse_forest("a_A; b_B; c_C; d_A;").unwrap();
        let mut instance = Instance::new(gene, &covering, 0.7);
        validate(&mut instance).unwrap();
        binarize(&mut instance).unwrap();

        let gene = instance.gene();
        let trusted: Vec<_> = gene
            .level_order_iter()
            .filter(|v| v.is_internal())
            .map(|v| v.labels().trusted)
            .collect();
        assert_eq!(trusted, vec![Some(false), Some(true), Some(false)]);
        assert!(gene.vertices().filter(|v| v.is_leaf()).all(|v| v.labels().trusted.is_none()));
    }

    #[test]
    fn test_requires_validation() {
        let covering = parse_forest("a_A; b_B;").unwrap();
        let mut instance = Instance::new(parse_str("(a_A,b_B);").unwrap(), &covering, 0.5);
        let err = binarize(&mut instance).unwrap_err();
        assert!(matches!(
            err,
            LabelGtcError::Precondition {
                stage: Stage::Constructed,
                required: Stage::Validated
            }
        ));
    }
}
