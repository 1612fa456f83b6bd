//! Selection of the resolution strategy of an instance.

use crate::labelgtc::error::LabelGtcError;
use crate::labelgtc::instance::{Instance, Stage};
use crate::model::{CoverageStatus, PhyloTree};
use std::fmt;

/// Resolution strategy of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Covering set consists of single leaves; resolved by the engine.
    LeafCover,
    /// Compatible with polytomy resolution; resolved by the engine.
    PolyRes,
    /// Compatible with minimum trusted resolution (detected only).
    MinTrs,
    /// Compatible with minimum subtree grafting (detected only).
    MinSgt,
    /// Nothing applies globally; split into subproblems.
    Decompose,
}

impl Strategy {
    /// Returns whether the strategy can be carried out.
    pub fn is_implemented(self) -> bool {
        !matches!(self, Strategy::MinTrs | Strategy::MinSgt)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::LeafCover => "leaf-cover",
            Strategy::PolyRes => "polyres",
            Strategy::MinTrs => "min-trs",
            Strategy::MinSgt => "min-sgt",
            Strategy::Decompose => "decompose",
        };
        f.write_str(name)
    }
}

/// Compatibility flags of a labelled gene tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compatibility {
    pub poly_res: bool,
    pub min_trs: bool,
    pub min_sgt: bool,
    /// Number of edges that updated the flags before the scan ended
    pub contributing_edges: usize,
}

/// Scans the non-root edges of a labelled gene tree in level order and
/// clears the flags every (coverage, trust) pair rules out:
///
/// | coverage   | trusted | clears              |
/// |------------|---------|---------------------|
/// | NONE       | yes     | poly_res, min_sgt   |
/// | NONE       | no      | min_trs             |
/// | EXACT      | no      | poly_res            |
/// | EXACT      | yes     | min_trs, min_sgt    |
///
/// Descendant edges and roots of subproblems are skipped; the scan stops
/// once all flags are cleared.
pub fn compatibility(gene: &PhyloTree) -> Compatibility {
    let mut flags = Compatibility {
        poly_res: true,
        min_trs: true,
        min_sgt: true,
        contributing_edges: 0,
    };

    for vertex in gene.level_order_iter() {
        if vertex.is_root() || vertex.labels().subproblem_root {
            continue;
        }
        let trusted = vertex.is_trusted();
        match (vertex.labels().coverage, trusted) {
            (CoverageStatus::Descendant, _) => continue,
            (CoverageStatus::None, true) => {
                flags.poly_res = false;
                flags.min_sgt = false;
            }
            (CoverageStatus::None, false) => flags.min_trs = false,
            (CoverageStatus::Exact, false) => flags.poly_res = false,
            (CoverageStatus::Exact, true) => {
                flags.min_trs = false;
                flags.min_sgt = false;
            }
        }
        flags.contributing_edges += 1;

        if !(flags.poly_res || flags.min_trs || flags.min_sgt) {
            break;
        }
    }

    flags
}

/// Chooses the strategy of a binarized instance, in priority order
/// leaf cover, polyres, minTRS (more than two contributing edges), minSGT,
/// decomposition.
///
/// # Errors
/// [LabelGtcError::Precondition] if the instance was not binarized.
pub fn classify(instance: &Instance<'_>) -> Result<Strategy, LabelGtcError> {
    instance.require(Stage::Binarized)?;

    if instance.covering().iter().all(|tree| tree.root().is_leaf()) {
        return Ok(Strategy::LeafCover);
    }

    let flags = compatibility(instance.gene());
    let strategy = if flags.poly_res {
        Strategy::PolyRes
    } else if flags.min_trs && flags.contributing_edges > 2 {
        Strategy::MinTrs
    } else if flags.min_sgt {
        Strategy::MinSgt
    } else {
        Strategy::Decompose
    };
    Ok(strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labelgtc::binarizer::binarize;
    use crate::labelgtc::validator::validate;
    use crate::newick::{parse_forest, parse_str};

    fn classify_str(gene: &str, covering: &str, threshold: f64) -> Strategy {
        let covering = parse_forest(covering).unwrap();
        let mut instance = Instance::new(parse_str(gene).unwrap(), &covering, threshold);
        validate(&mut instance).unwrap();
        binarize(&mut instance).unwrap();
        classify(&instance).unwrap()
    }

    #[test]
    fn test_leaf_cover() {
        let strategy = classify_str("((a_A,b_B)0.9,c_C);", "a_A; b_B; c_C;", 0.5);
        assert_eq!(strategy, Strategy::LeafCover);
    }

    #[test]
    fn test_poly_res() {
        // untrusted NONE edge above exact trusted subtrees
        let strategy = classify_str(
            "(((a_A,b_B)0.9,c_C)0.2,d_A);",
            "(a_A,b_B); c_C; d_A;",
            0.5,
        );
        assert_eq!(strategy, Strategy::PolyRes);
    }

    #[test]
    fn test_min_sgt() {
        // only untrusted exact edges
        let strategy = classify_str(
            "((a_A,b_B)0.1,(c_C,d_A)0.1);",
            "(a_A,b_B); (c_C,d_A);",
            0.5,
        );
        assert_eq!(strategy, Strategy::MinSgt);
    }

    #[test]
    fn test_min_trs() {
        // trusted NONE edge, untrusted exact edges
        let strategy = classify_str(
            "(((a_A,b_B)0.1,(c_C,d_A)0.1)0.9,(e_B,f_C)0.1);",
            "(a_A,b_B); (c_C,d_A); (e_B,f_C);",
            0.5,
        );
        assert_eq!(strategy, Strategy::MinTrs);
    }

    #[test]
    fn test_decompose() {
        let strategy = classify_str(
            "(((a_A,b_B)0.9,c_C)0.9,(d_A,e_C)0.1);",
            "(a_A,b_B); c_C; d_A; e_C;",
            0.5,
        );
        assert_eq!(strategy, Strategy::Decompose);
    }
}
