//! Species tree and the LCA mapping of gene trees onto it.
//!
//! Gene tree leaves are named `<gene>_<species>`; the suffix after the last
//! underscore names a leaf of the [SpeciesTree]. The [LcaMap] assigns every
//! gene tree vertex the lowest common ancestor (in the species tree) of the
//! species of its leaves.

mod lca;

pub use lca::{LcaMap, lca_mapping};

use crate::labelgtc::error::LabelGtcError;
use crate::model::{PhyloTree, Vertex, VertexIndex};
use crate::newick::{InternalLabel, NewickParser};
use crate::parser::ByteParser;
use std::collections::HashMap;

/// Prefix of names given to unnamed internal species tree vertices
const INTERNAL_SPECIES_PREFIX: &str = "s";

// =#========================================================================#=
// SPECIES TREE
// =#========================================================================#=
/// A species tree with name lookup and constant-time depth queries.
///
/// # Example
/// ```
/// use labelgtc::species::SpeciesTree;
///
/// let species = SpeciesTree::from_newick("((A,B),C);").unwrap();
/// let a = species.index_of("A").unwrap();
/// let b = species.index_of("B").unwrap();
/// let c = species.index_of("C").unwrap();
/// assert_eq!(species.lca(a, b), species.tree()[a].parent().unwrap());
/// assert_eq!(species.lca(a, c), species.tree().root_index());
/// ```
#[derive(Debug, Clone)]
pub struct SpeciesTree {
    tree: PhyloTree,
    by_name: HashMap<String, VertexIndex>,
    depths: Vec<usize>,
}

impl SpeciesTree {
    /// Wraps a tree as species tree.
    ///
    /// Unnamed internal vertices are named `s<index>`.
    ///
    /// # Errors
    /// [LabelGtcError::InvalidSpeciesTree] if the tree has no root or two
    /// vertices share a name.
    pub fn new(mut tree: PhyloTree) -> Result<Self, LabelGtcError> {
        if !tree.is_root_set() {
            return Err(LabelGtcError::InvalidSpeciesTree(
                "tree has no root".to_string(),
            ));
        }
        tree.label_internal_vertices(INTERNAL_SPECIES_PREFIX);

        let mut by_name = HashMap::with_capacity(tree.num_vertices());
        let mut depths = vec![0; tree.capacity()];
        for vertex in tree.pre_order_iter() {
            if let Some(parent) = vertex.parent() {
                depths[vertex.index()] = depths[parent] + 1;
            }
            if let Some(name) = vertex.name() {
                if by_name.insert(name.to_string(), vertex.index()).is_some() {
                    return Err(LabelGtcError::InvalidSpeciesTree(format!(
                        "duplicate species name '{}'",
                        name
                    )));
                }
            }
        }

        Ok(SpeciesTree {
            tree,
            by_name,
            depths,
        })
    }

    /// Parses a species tree from a Newick string.
    ///
    /// Labels of internal vertices are read as names, not as supports.
    pub fn from_newick(newick: &str) -> Result<Self, LabelGtcError> {
        let mut parser = NewickParser::new().with_internal_labels(InternalLabel::Name);
        let tree = parser.parse_str(&mut ByteParser::for_str(newick))?;
        Self::new(tree)
    }

    /// Returns the underlying tree.
    pub fn tree(&self) -> &PhyloTree {
        &self.tree
    }

    /// Returns the index of the vertex with the given (species) name.
    pub fn index_of(&self, name: &str) -> Option<VertexIndex> {
        self.by_name.get(name).copied()
    }

    /// Returns the name of the species vertex at `index`.
    pub fn name_of(&self, index: VertexIndex) -> &str {
        self.tree[index].name().unwrap_or_default()
    }

    /// Returns the depth (number of edges below the root) of a species vertex.
    pub fn depth(&self, index: VertexIndex) -> usize {
        self.depths[index]
    }

    /// Returns the number of species (leaves).
    pub fn num_species(&self) -> usize {
        self.tree.num_leaves()
    }

    /// Returns whether `ancestor` is a (non-strict) ancestor of `index`.
    pub fn is_ancestor(&self, ancestor: VertexIndex, index: VertexIndex) -> bool {
        let mut current = index;
        while self.depths[current] > self.depths[ancestor] {
            match self.tree[current].parent() {
                Some(parent) => current = parent,
                None => return false,
            }
        }
        current == ancestor
    }

    /// Returns the lowest common ancestor of two species vertices.
    pub fn lca(&self, a: VertexIndex, b: VertexIndex) -> VertexIndex {
        let (mut a, mut b) = (a, b);
        while self.depths[a] > self.depths[b] {
            a = self.parent_or_self(a);
        }
        while self.depths[b] > self.depths[a] {
            b = self.parent_or_self(b);
        }
        while a != b {
            a = self.parent_or_self(a);
            b = self.parent_or_self(b);
        }
        a
    }

    /// Returns the lowest common ancestor of all given vertices, or `None`
    /// if there are none.
    pub fn lca_of<I: IntoIterator<Item = VertexIndex>>(&self, indices: I) -> Option<VertexIndex> {
        indices.into_iter().reduce(|a, b| self.lca(a, b))
    }

    /// Returns the species of a gene tree vertex:
    /// its explicitly assigned species, else for a leaf the part of its name
    /// after the last underscore (the whole name if there is none).
    ///
    /// # Example
    /// ```
    /// use labelgtc::model::PhyloTree;
    /// use labelgtc::species::SpeciesTree;
    ///
    /// let tree = PhyloTree::single_leaf("hbb_1_HUMAN");
    /// assert_eq!(SpeciesTree::species_of(tree.root()), Some("HUMAN"));
    /// ```
    pub fn species_of(vertex: &Vertex) -> Option<&str> {
        if let Some(species) = vertex.species() {
            return Some(species);
        }
        if !vertex.is_leaf() {
            return None;
        }
        vertex
            .name()
            .map(|name| name.rsplit_once('_').map_or(name, |(_, species)| species))
    }

    /// Maps every vertex of `gene` onto this species tree.
    ///
    /// See [lca_mapping].
    pub fn lca_map(&self, gene: &PhyloTree) -> Result<LcaMap, LabelGtcError> {
        lca_mapping(gene, self)
    }

    fn parent_or_self(&self, index: VertexIndex) -> VertexIndex {
        self.tree[index].parent().unwrap_or(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newick::parse_str;

    #[test]
    fn test_internal_vertices_get_names() {
        let species = SpeciesTree::from_newick("((A,B),C);").unwrap();
        let ab = species.tree()[species.index_of("A").unwrap()].parent().unwrap();
        assert_eq!(species.name_of(ab), format!("s{}", ab));
        assert_eq!(species.index_of(&format!("s{}", ab)), Some(ab));
    }

    #[test]
    fn test_keeps_given_internal_names() {
        let species = SpeciesTree::from_newick("((A,B)AB,C)ABC;").unwrap();
        assert_eq!(species.index_of("ABC"), Some(species.tree().root_index()));
        assert_eq!(species.depth(species.index_of("A").unwrap()), 2);
    }

    #[test]
    fn test_duplicate_species_rejected() {
        let result = SpeciesTree::from_newick("((A,B),A);");
        assert!(matches!(result, Err(LabelGtcError::InvalidSpeciesTree(_))));
    }

    #[test]
    fn test_species_of_explicit_species_wins() {
        let mut tree = parse_str("(a_A,b_B);").unwrap();
        let root = tree.root_index();
        assert_eq!(SpeciesTree::species_of(tree.root()), None);
        tree[root].set_species("A".to_string());
        assert_eq!(SpeciesTree::species_of(tree.root()), Some("A"));
    }

    #[test]
    fn test_is_ancestor() {
        let species = SpeciesTree::from_newick("((A,B),C);").unwrap();
        let a = species.index_of("A").unwrap();
        let c = species.index_of("C").unwrap();
        let root = species.tree().root_index();
        assert!(species.is_ancestor(root, a));
        assert!(species.is_ancestor(a, a));
        assert!(!species.is_ancestor(c, a));
        assert!(!species.is_ancestor(a, root));
    }
}
