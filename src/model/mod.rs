//! Tree data model.
//!
//! * [PhyloTree] - rooted, multifurcating tree stored in an arena, used for
//!   gene trees, covering-set trees and species trees alike
//! * [Vertex] - vertex with optional name, species, support and branch length
//! * [VertexLabels] - typed labels attached while a gene tree is processed

/// Per-vertex processing labels
pub mod labels;
/// Phylogenetic tree structure and operations
pub mod tree;
/// Tree vertex types (root, internal, leaf)
pub mod vertex;

pub use labels::{CoverageStatus, VertexLabels};
pub use tree::{PhyloTree, VertexIndex};
pub use vertex::{BranchLength, Vertex};
