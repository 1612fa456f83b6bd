//! Newick format writing for [PhyloTree]s.

use crate::model::PhyloTree;
use crate::model::tree::VertexIndex;
use crate::model::vertex::BranchLength;
use crate::parser::utils::escape_label;

/// Extra buffer in Newick string length/capacity estimate
const BUFFER_CHARS: usize = 10;

/// Style for serializing a tree to Newick format,
/// controlling which vertex data is written besides the leaf names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewickStyle {
    /// Leaf names only
    Topology,
    /// Leaf names and support values of internal vertices
    Support,
    /// Leaf names, internal labels (support, or name if no support) and branch lengths
    Full,
}

/// Returns the Newick representation of a tree with closing semicolon.
///
/// # Arguments
/// * `tree` - The [PhyloTree] to convert
/// * `style` - The [NewickStyle] selecting the vertex data written
///
/// # Example
/// ```
/// use labelgtc::newick::{parse_str, to_newick, NewickStyle};
///
/// let tree = parse_str("((a_A:1.0,b_B:2.5)0.9:0.5,c_C:1.5);").unwrap();
/// assert_eq!(to_newick(&tree, NewickStyle::Topology), "((a_A,b_B),c_C);");
/// assert_eq!(to_newick(&tree, NewickStyle::Support), "((a_A,b_B)0.9,c_C);");
/// assert_eq!(to_newick(&tree, NewickStyle::Full), "((a_A:1,b_B:2.5)0.9:0.5,c_C:1.5);");
/// ```
pub fn to_newick(tree: &PhyloTree, style: NewickStyle) -> String {
    if !tree.is_root_set() {
        return String::new();
    }

    // Helper for adding branch lengths
    fn build_newick_branch_length(newick: &mut String, branch_length: Option<BranchLength>) {
        if let Some(branch_length) = branch_length {
            newick.push(':');
            newick.push_str(&branch_length.to_string());
        }
    }

    // Recursive helper for building the Newick string
    fn build_newick(tree: &PhyloTree, newick: &mut String, index: VertexIndex, style: NewickStyle) {
        let vertex = &tree[index];

        if vertex.is_leaf() {
            if let Some(name) = vertex.name() {
                newick.push_str(&escape_label(name));
            }
        } else {
            newick.push('(');
            for (i, &child) in vertex.children().iter().enumerate() {
                if i > 0 {
                    newick.push(',');
                }
                build_newick(tree, newick, child, style);
            }
            newick.push(')');

            match (style, vertex.support(), vertex.name()) {
                (NewickStyle::Topology, _, _) => {}
                (_, Some(support), _) => newick.push_str(&support.to_string()),
                (NewickStyle::Full, None, Some(name)) => newick.push_str(&escape_label(name)),
                _ => {}
            }
        }

        if style == NewickStyle::Full && !vertex.is_root() {
            build_newick_branch_length(newick, vertex.branch_length());
        }
    }

    let mut newick = String::with_capacity(estimate_newick_len(tree, style));
    build_newick(tree, &mut newick, tree.root_index(), style);
    newick.push(';');

    newick
}

/// Estimates the length of a Newick string for a given tree.
///
/// Used to pre-allocate string capacity for efficient writing.
pub(crate) fn estimate_newick_len(tree: &PhyloTree, style: NewickStyle) -> usize {
    // Each internal vertex: "()" plus a comma per child ~= 3 chars
    const INTERNAL_VERTEX_CHARS: usize = 3;
    // Support values: ~4 chars each (e.g., "0.95")
    const SUPPORT_CHARS: usize = 4;
    // Branch lengths: ~20 chars each (e.g., ":0.009529961339106089")
    const BRANCH_LENGTH_CHARS: usize = 20;

    let num_internal = tree.num_internal();
    let label_capacity: usize = tree
        .vertices()
        .filter(|v| v.is_leaf())
        .filter_map(|v| v.name())
        .map(|name| name.len() + 1)
        .sum();
    let extra_capacity = match style {
        NewickStyle::Topology => 0,
        NewickStyle::Support => num_internal * SUPPORT_CHARS,
        NewickStyle::Full => num_internal * SUPPORT_CHARS + tree.num_vertices() * BRANCH_LENGTH_CHARS,
    };

    num_internal * INTERNAL_VERTEX_CHARS + label_capacity + extra_capacity + BUFFER_CHARS
}
