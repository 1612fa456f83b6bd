//! Vertex of a phylogenetic tree and its branch length type.

use crate::model::labels::VertexLabels;
use crate::model::tree::VertexIndex;
use std::ops::Deref;

// =#========================================================================#=
// VERTEX
// =#========================================================================$=
/// Represents a vertex (node) in a [PhyloTree](crate::model::PhyloTree).
///
/// A vertex is
/// - the **root** if it has no parent,
/// - a **leaf** if it has no children,
/// - **internal** otherwise; internal vertices may have any number (≥ 2)
///   of children, more than two representing a polytomy.
///
/// Besides its structural fields, a vertex carries the optional data read from
/// a Newick string (name, support, branch length), an optional explicit
/// species assignment and the [VertexLabels] attached while a gene tree is
/// processed.
///
/// # Invariants
/// - `index` is the slot of this vertex in the tree arena
/// - `branch_length` is non-negative (enforced by [BranchLength])
/// - `children` is ordered; the order is the order of the Newick string
#[derive(PartialEq, Debug, Clone)]
pub struct Vertex {
    index: VertexIndex,
    parent: Option<VertexIndex>,
    children: Vec<VertexIndex>,
    name: Option<String>,
    species: Option<String>,
    support: Option<f64>,
    branch_length: Option<BranchLength>,
    labels: VertexLabels,
}

impl Vertex {
    /// Creates a new leaf vertex.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `name` - Leaf label
    /// * `branch_length` - Distance to parent vertex
    pub fn new_leaf(index: VertexIndex, name: String, branch_length: Option<BranchLength>) -> Self {
        Vertex {
            index,
            parent: None,
            children: Vec::new(),
            name: Some(name),
            species: None,
            support: None,
            branch_length,
            labels: VertexLabels::default(),
        }
    }

    /// Creates a new internal vertex with the given children.
    ///
    /// Parents of the children are set by the tree, not here.
    pub fn new_internal(
        index: VertexIndex,
        children: Vec<VertexIndex>,
        support: Option<f64>,
        branch_length: Option<BranchLength>,
    ) -> Self {
        Vertex {
            index,
            parent: None,
            children,
            name: None,
            species: None,
            support,
            branch_length,
            labels: VertexLabels::default(),
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: VertexIndex) {
        self.index = index;
    }

    /// Returns the index of the parent, or `None` for the root.
    pub fn parent(&self) -> Option<VertexIndex> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<VertexIndex>) {
        self.parent = parent;
    }

    /// Returns the ordered children (empty for a leaf).
    pub fn children(&self) -> &[VertexIndex] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<VertexIndex> {
        &mut self.children
    }

    /// Returns `true` if this vertex has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns `true` if this vertex has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if this vertex has children.
    pub fn is_internal(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns `true` if this vertex has more than two children.
    pub fn is_polytomy(&self) -> bool {
        self.children.len() > 2
    }

    /// Returns the name of this vertex, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Sets the name of this vertex.
    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Returns the explicitly assigned species of this vertex, if any.
    ///
    /// See [SpeciesTree::species_of](crate::species::SpeciesTree::species_of)
    /// for how a species is derived when none is assigned.
    pub fn species(&self) -> Option<&str> {
        self.species.as_deref()
    }

    /// Assigns a species to this vertex, overriding the one encoded in its name.
    pub fn set_species(&mut self, species: String) {
        self.species = Some(species);
    }

    /// Returns the support (confidence) value of this vertex, if any.
    pub fn support(&self) -> Option<f64> {
        self.support
    }

    /// Sets the support (confidence) value of this vertex.
    pub fn set_support(&mut self, support: Option<f64>) {
        self.support = support;
    }

    /// Returns the length of the incoming branch, if any.
    pub fn branch_length(&self) -> Option<BranchLength> {
        self.branch_length
    }

    /// Sets the length of the incoming branch.
    pub fn set_branch_length(&mut self, branch_length: Option<BranchLength>) {
        self.branch_length = branch_length;
    }

    /// Returns the processing labels of this vertex.
    pub fn labels(&self) -> &VertexLabels {
        &self.labels
    }

    /// Returns the processing labels of this vertex mutably.
    pub fn labels_mut(&mut self) -> &mut VertexLabels {
        &mut self.labels
    }

    /// Returns whether the subtree below this vertex is trusted.
    ///
    /// Leaves are fully resolved and hence always trusted; internal vertices
    /// are trusted once binarization set their flag.
    pub fn is_trusted(&self) -> bool {
        self.is_leaf() || self.labels.trusted == Some(true)
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================$=
/// Branch length in a phylogenetic tree, enforced non-negative.
///
/// Represents the evolutionary distance between a vertex and its parent.
/// The value is guaranteed to be non-negative and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length.
    ///
    /// # Panics
    /// Panics if `length` is negative or not finite.
    pub fn new(length: f64) -> Self {
        assert!(
            length >= 0.0,
            "Branch length must be non-negative, got {}",
            length
        );
        assert!(
            length.is_finite(),
            "Branch length must be finite, got {}",
            length
        );
        BranchLength(length)
    }

    /// Creates a new branch length, or `None` if `length` is negative or not finite.
    pub fn try_new(length: f64) -> Option<Self> {
        (length >= 0.0 && length.is_finite()).then_some(BranchLength(length))
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl std::fmt::Display for BranchLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
