use crate::labelgtc::error::LabelGtcError;
use crate::model::{PhyloTree, VertexIndex};
use crate::species::SpeciesTree;
use std::ops::Index;

/// Mapping of gene tree vertices to species tree vertices.
///
/// Indexed by the gene tree's [VertexIndex]; vacant gene tree slots have no image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LcaMap {
    mapping: Vec<Option<VertexIndex>>,
}

impl LcaMap {
    /// Returns the species vertex the gene vertex `index` maps to.
    pub fn get(&self, index: VertexIndex) -> Option<VertexIndex> {
        self.mapping.get(index).copied().flatten()
    }

    /// Returns the number of mapped gene vertices.
    pub fn len(&self) -> usize {
        self.mapping.iter().flatten().count()
    }

    /// Returns whether no vertex is mapped.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Index<VertexIndex> for LcaMap {
    type Output = VertexIndex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        match &self.mapping[index] {
            Some(species) => species,
            None => panic!("Gene vertex {index} is not mapped"),
        }
    }
}

/// Computes the LCA mapping of `gene` onto `species`.
///
/// A leaf maps to the species vertex named by its species (see
/// [SpeciesTree::species_of]), an internal vertex to the lowest common
/// ancestor of the images of its children.
///
/// # Errors
/// [LabelGtcError::UnknownSpecies] if a leaf's species is not a vertex of
/// the species tree.
///
/// # Example
/// ```
/// use labelgtc::newick::parse_str;
/// use labelgtc::species::{SpeciesTree, lca_mapping};
///
/// let species = SpeciesTree::from_newick("((A,B),C);").unwrap();
/// let gene = parse_str("((a_A,b_B),c_C);").unwrap();
/// let map = lca_mapping(&gene, &species).unwrap();
/// assert_eq!(map[gene.root_index()], species.tree().root_index());
/// ```
pub fn lca_mapping(gene: &PhyloTree, species: &SpeciesTree) -> Result<LcaMap, LabelGtcError> {
    let mut mapping: Vec<Option<VertexIndex>> = vec![None; gene.capacity()];

    for vertex in gene.post_order_iter() {
        let image = if vertex.is_leaf() {
            let leaf = vertex.name().unwrap_or_default();
            let name = SpeciesTree::species_of(vertex).unwrap_or_default();
            species
                .index_of(name)
                .ok_or_else(|| LabelGtcError::UnknownSpecies {
                    leaf: leaf.to_string(),
                    species: name.to_string(),
                })?
        } else {
            let children = vertex.children().iter().filter_map(|&c| mapping[c]);
            match species.lca_of(children) {
                Some(image) => image,
                None => continue,
            }
        };
        mapping[vertex.index()] = Some(image);
    }

    Ok(LcaMap { mapping })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newick::parse_str;

    #[test]
    fn test_unknown_species() {
        let species = SpeciesTree::from_newick("((A,B),C);").unwrap();
        let gene = parse_str("(a_A,z_Z);").unwrap();
        match lca_mapping(&gene, &species) {
            Err(LabelGtcError::UnknownSpecies { leaf, species }) => {
                assert_eq!(leaf, "z_Z");
                assert_eq!(species, "Z");
            }
            other => panic!("Expected UnknownSpecies, got {:?}", other),
        }
    }

    #[test]
    fn test_explicit_species_of_internal_placeholder() {
        let species = SpeciesTree::from_newick("((A,B),C);").unwrap();
        let mut gene = parse_str("(p,c_C);").unwrap();
        let p = gene.root().children()[0];
        let ab = species.tree()[species.index_of("A").unwrap()].parent().unwrap();
        gene[p].set_species(species.name_of(ab).to_string());

        let map = lca_mapping(&gene, &species).unwrap();
        assert_eq!(map[p], ab);
        assert_eq!(map.len(), 3);
    }
}
