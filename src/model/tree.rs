//! Provides the phylogenetic tree representation.
//!
//! Provides core data structures for representing (gene and species) trees:
//! * [PhyloTree] - Rooted, ordered, multifurcating tree using the arena pattern
//! * [VertexIndex] as type used to index vertices in tree
//!
//! Unlike a read-only tree, a [PhyloTree] is rewritten while a gene tree is
//! corrected: subtrees are detached, contracted to placeholders, spliced back
//! and low-confidence vertices are collapsed. Arena slots of removed vertices
//! become vacant instead of being reused, so the index of a live vertex never
//! changes while its tree is mutated. Worklists of indices recorded during a
//! read-only pass thus stay valid during the following mutation pass.

use crate::model::labels::VertexLabels;
use crate::model::vertex::{BranchLength, Vertex};
use crate::newick::{self, NewickStyle};
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

/// *During construction only*, index for unset root.
const NO_ROOT_SET_INDEX: VertexIndex = usize::MAX;

// =#========================================================================#=
// TREE
// =#========================================================================#=
/// A rooted phylogenetic tree represented using the arena pattern on [Vertex].
///
/// Vertices are stored in a vector of slots and referenced by [VertexIndex].
///
/// # Structure
/// - All vertices (root, internal, and leaves) are stored in the arena.
/// - Index of root is maintained.
/// - No assumption on order of indices is maintained.
/// - Vertices may have any number of children (polytomies allowed).
/// - Removed vertices leave vacant slots; accessing them panics.
///
/// # Construction
/// Add vertices bottom-up with [add_leaf](Self::add_leaf) and
/// [add_internal](Self::add_internal), then set the root with
/// [set_root](Self::set_root). Usually trees are obtained by parsing, see
/// [crate::newick].
///
/// # Example
/// ```
/// use labelgtc::model::PhyloTree;
///
/// let mut tree = PhyloTree::new();
/// let a = tree.add_leaf("a_A", None);
/// let b = tree.add_leaf("b_B", None);
/// let c = tree.add_leaf("c_C", None);
/// let ab = tree.add_internal(vec![a, b], Some(0.9), None);
/// let root = tree.add_internal(vec![ab, c], None, None);
/// tree.set_root(root);
///
/// assert_eq!(tree.num_leaves(), 3);
/// assert_eq!(tree.leaf_names(), vec!["a_A", "b_B", "c_C"]);
/// ```
#[derive(Debug, Clone)]
pub struct PhyloTree {
    /// Vertex slots of this tree (arena pattern); `None` for removed vertices
    vertices: Vec<Option<Vertex>>,

    /// Index of the root of this tree
    root_index: VertexIndex,

    /// Name of tree; optional
    name: Option<String>,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl PhyloTree {
    /// Creates a new empty tree.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates a new empty tree with room for `num_vertices` vertices.
    pub fn with_capacity(num_vertices: usize) -> Self {
        PhyloTree {
            vertices: Vec::with_capacity(num_vertices),
            root_index: NO_ROOT_SET_INDEX,
            name: None,
        }
    }

    /// Creates a tree consisting of a single (root) leaf.
    pub fn single_leaf<S: Into<String>>(name: S) -> Self {
        let mut tree = PhyloTree::with_capacity(1);
        let leaf = tree.add_leaf(name, None);
        tree.set_root(leaf);
        tree
    }

    /// Adds a leaf to the tree, returning its index.
    ///
    /// # Arguments
    /// * `name` - Label of the leaf
    /// * `branch_length` - Length of incoming branch
    pub fn add_leaf<S: Into<String>>(
        &mut self,
        name: S,
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices
            .push(Some(Vertex::new_leaf(index, name.into(), branch_length)));
        index
    }

    /// Adds an internal vertex above the given children, returning its index.
    ///
    /// # Arguments
    /// * `children` - Ordered child indices; their parent is set to the new vertex
    /// * `support` - Confidence value of the new vertex
    /// * `branch_length` - Length of incoming branch
    ///
    /// # Panics
    /// Panics if `children` is empty or contains an invalid index.
    pub fn add_internal(
        &mut self,
        children: Vec<VertexIndex>,
        support: Option<f64>,
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        assert!(
            !children.is_empty(),
            "Internal vertex needs at least one child"
        );
        let index = self.vertices.len();
        for &child in &children {
            self[child].set_parent(Some(index));
        }
        self.vertices.push(Some(Vertex::new_internal(
            index,
            children,
            support,
            branch_length,
        )));
        index
    }

    /// Declares the vertex at `index` to be the root.
    pub fn set_root(&mut self, index: VertexIndex) {
        self[index].set_parent(None);
        self.root_index = index;
    }

    /// Returns reference to name of this tree, or `None` if not set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set a name for this tree.
    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Returns whether root of tree has been set.
    pub fn is_root_set(&self) -> bool {
        self.root_index != NO_ROOT_SET_INDEX
    }

    /// Returns the index of the root.
    pub fn root_index(&self) -> VertexIndex {
        self.root_index
    }

    /// Returns a reference to the root vertex.
    ///
    /// # Panics
    /// Panics if the root hasn't been set.
    pub fn root(&self) -> &Vertex {
        &self[self.root_index]
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds or the vertex was removed.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self[index]
    }

    /// Returns a mutable reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds or the vertex was removed.
    pub fn vertex_mut(&mut self, index: VertexIndex) -> &mut Vertex {
        &mut self[index]
    }

    /// Returns the vertex at `index`, or `None` if there is no such (live) vertex.
    pub fn get(&self, index: VertexIndex) -> Option<&Vertex> {
        self.vertices.get(index).and_then(Option::as_ref)
    }

    /// Returns an iterator over all live vertices in arena order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.iter().flatten()
    }

    /// Returns the number of arena slots, including vacant ones.
    ///
    /// Useful to size side tables indexed by [VertexIndex].
    pub fn capacity(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of (live) vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices().count()
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.vertices().filter(|v| v.is_leaf()).count()
    }

    /// Returns the number of internal vertices in this tree (root included).
    pub fn num_internal(&self) -> usize {
        self.vertices().filter(|v| v.is_internal()).count()
    }

    /// Returns whether every internal vertex has exactly two children.
    pub fn is_binary(&self) -> bool {
        self.vertices()
            .filter(|v| v.is_internal())
            .all(|v| v.children().len() == 2)
    }

    /// Returns the leaf names of the whole tree in pre-order.
    ///
    /// Leaves without name are skipped.
    pub fn leaf_names(&self) -> Vec<&str> {
        self.leaf_names_of(self.root_index)
    }

    /// Returns the leaf names of the subtree rooted at `index` in pre-order.
    pub fn leaf_names_of(&self, index: VertexIndex) -> Vec<&str> {
        self.pre_order_from(index)
            .filter(|v| v.is_leaf())
            .filter_map(|v| v.name())
            .collect()
    }

    /// Returns the indices of the leaves in the subtree rooted at `index`.
    pub fn leaves_of(&self, index: VertexIndex) -> Vec<VertexIndex> {
        self.pre_order_from(index)
            .filter(|v| v.is_leaf())
            .map(|v| v.index())
            .collect()
    }

    /// Returns all strict descendants of the vertex at `index` in pre-order.
    pub fn descendants(&self, index: VertexIndex) -> Vec<VertexIndex> {
        self.pre_order_from(index)
            .skip(1)
            .map(|v| v.index())
            .collect()
    }

    /// Returns whether `ancestor` is a (non-strict) ancestor of `index`.
    pub fn is_ancestor(&self, ancestor: VertexIndex, index: VertexIndex) -> bool {
        let mut current = Some(index);
        while let Some(i) = current {
            if i == ancestor {
                return true;
            }
            current = self[i].parent();
        }
        false
    }

    /// Returns the number of edges between the root and the vertex at `index`.
    pub fn depth(&self, index: VertexIndex) -> usize {
        let mut depth = 0;
        let mut current = self[index].parent();
        while let Some(i) = current {
            depth += 1;
            current = self[i].parent();
        }
        depth
    }

    /// Gives every unnamed internal vertex the name `{prefix}{index}`.
    pub fn label_internal_vertices(&mut self, prefix: &str) {
        for vertex in self.vertices.iter_mut().flatten() {
            if vertex.is_internal() && vertex.name().is_none() {
                let name = format!("{}{}", prefix, vertex.index());
                vertex.set_name(name);
            }
        }
    }

    /// Resets the [VertexLabels] of all vertices to their unset state.
    pub fn reset_labels(&mut self) {
        for vertex in self.vertices.iter_mut().flatten() {
            *vertex.labels_mut() = VertexLabels::default();
        }
    }

    /// Clears frontier, subproblem and placeholder markers of all vertices.
    pub fn clear_decomposition_markers(&mut self) {
        for vertex in self.vertices.iter_mut().flatten() {
            vertex.labels_mut().clear_decomposition_markers();
        }
    }
}

impl Default for PhyloTree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<VertexIndex> for PhyloTree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Self::Output {
        match &self.vertices[index] {
            Some(vertex) => vertex,
            None => panic!("Vertex {index} was removed from the tree"),
        }
    }
}

impl std::ops::IndexMut<VertexIndex> for PhyloTree {
    fn index_mut(&mut self, index: VertexIndex) -> &mut Self::Output {
        match &mut self.vertices[index] {
            Some(vertex) => vertex,
            None => panic!("Vertex {index} was removed from the tree"),
        }
    }
}

impl fmt::Display for PhyloTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&newick::to_newick(self, NewickStyle::Support))
    }
}

// =#========================================================================#=
// TOPOLOGY
// =#========================================================================#=
impl PhyloTree {
    /// Returns the canonical form of the subtree of every vertex, indexed by
    /// [VertexIndex] (`None` for vacant slots).
    ///
    /// The canonical form of a leaf is its name, the one of an internal vertex
    /// the sorted canonical forms of its children in parentheses. Two subtrees
    /// thus have equal forms iff they have the same leaf multiset and the same
    /// nested clusters; branch lengths, supports and internal names are ignored.
    pub fn canonical_forms(&self) -> Vec<Option<String>> {
        let mut forms: Vec<Option<String>> = vec![None; self.vertices.len()];
        if !self.is_root_set() {
            return forms;
        }
        for vertex in self.post_order_iter() {
            let form = if vertex.is_leaf() {
                vertex.name().unwrap_or_default().to_string()
            } else {
                let mut parts: Vec<&str> = vertex
                    .children()
                    .iter()
                    .filter_map(|&c| forms[c].as_deref())
                    .collect();
                parts.sort_unstable();
                format!("({})", parts.join(","))
            };
            forms[vertex.index()] = Some(form);
        }
        forms
    }

    /// Returns the canonical form of the subtree rooted at `index`.
    pub fn canonical_form(&self, index: VertexIndex) -> String {
        fn build(tree: &PhyloTree, index: VertexIndex) -> String {
            let vertex = &tree[index];
            if vertex.is_leaf() {
                return vertex.name().unwrap_or_default().to_string();
            }
            let mut parts: Vec<String> = vertex
                .children()
                .iter()
                .map(|&c| build(tree, c))
                .collect();
            parts.sort_unstable();
            format!("({})", parts.join(","))
        }
        build(self, index)
    }

    /// Returns whether the subtree rooted at `index` has the same topology as
    /// the whole tree `other`.
    pub fn same_topology_at(&self, index: VertexIndex, other: &PhyloTree) -> bool {
        self.canonical_form(index) == other.canonical_form(other.root_index)
    }

    /// Returns whether this tree has the same topology as `other`.
    ///
    /// # Example
    /// ```
    /// use labelgtc::newick::parse_str;
    ///
    /// let t1 = parse_str("((a_A,b_B)0.9,c_C);").unwrap();
    /// let t2 = parse_str("(c_C:1.0,(b_B,a_A));").unwrap();
    /// let t3 = parse_str("(a_A,(b_B,c_C));").unwrap();
    /// assert!(t1.same_topology(&t2));
    /// assert!(!t1.same_topology(&t3));
    /// ```
    pub fn same_topology(&self, other: &PhyloTree) -> bool {
        self.same_topology_at(self.root_index, other)
    }
}

// =#========================================================================#=
// MUTATION
// =#========================================================================#=
impl PhyloTree {
    /// Detaches the subtree rooted at `index` and returns it as an independent tree.
    ///
    /// Ownership of the subtree's vertices is transferred to the returned tree
    /// (with fresh, contiguous indices); their slots in this tree become vacant.
    /// Vertex data and labels are kept.
    ///
    /// # Panics
    /// Panics if `index` is the root (a tree cannot detach itself).
    pub fn detach(&mut self, index: VertexIndex) -> PhyloTree {
        let parent = self[index]
            .parent()
            .unwrap_or_else(|| panic!("Cannot detach the root vertex {index}"));
        self[parent].children_mut().retain(|&c| c != index);
        self.extract(index)
    }

    /// Replaces the subtree rooted at `index` by a new placeholder leaf.
    ///
    /// The placeholder takes the position of the subtree among its parent's
    /// children (or becomes the root). Returns the detached subtree together
    /// with the index of the placeholder.
    pub fn contract<S: Into<String>>(
        &mut self,
        index: VertexIndex,
        placeholder_name: S,
    ) -> (PhyloTree, VertexIndex) {
        let parent = self[index].parent();
        let branch_length = self[index].branch_length();
        let subtree = self.extract(index);

        let placeholder = self.add_leaf(placeholder_name, branch_length);
        match parent {
            Some(p) => {
                self[placeholder].set_parent(Some(p));
                if let Some(slot) = self[p].children_mut().iter_mut().find(|c| **c == index) {
                    *slot = placeholder;
                }
            }
            None => self.set_root(placeholder),
        }

        (subtree, placeholder)
    }

    /// Replaces the leaf at `index` by the whole tree `subtree`.
    ///
    /// The root of `subtree` takes the position of the leaf among its parent's
    /// children; if the leaf is the root of this tree, `subtree` becomes the
    /// entire tree. Returns the new index of the spliced root.
    ///
    /// # Panics
    /// Panics if the vertex at `index` is not a leaf.
    pub fn splice(&mut self, index: VertexIndex, subtree: PhyloTree) -> VertexIndex {
        assert!(self[index].is_leaf(), "Can only splice into a leaf");
        let parent = self[index].parent();
        let placeholder_length = self[index].branch_length();
        self.vertices[index] = None;

        let new_root = self.graft(subtree);
        if self[new_root].branch_length().is_none() {
            self[new_root].set_branch_length(placeholder_length);
        }
        match parent {
            Some(p) => {
                self[new_root].set_parent(Some(p));
                if let Some(slot) = self[p].children_mut().iter_mut().find(|c| **c == index) {
                    *slot = new_root;
                }
            }
            None => self.set_root(new_root),
        }
        new_root
    }

    /// Removes the internal vertex at `index`, attaching its children to its
    /// parent at its position.
    ///
    /// Collapsing an edge turns the resolution below it into a polytomy.
    ///
    /// # Panics
    /// Panics if the vertex is the root or a leaf.
    pub fn collapse(&mut self, index: VertexIndex) {
        assert!(self[index].is_internal(), "Cannot collapse a leaf");
        let parent = self[index]
            .parent()
            .unwrap_or_else(|| panic!("Cannot collapse the root vertex {index}"));
        let children = self[index].children().to_vec();
        for &child in &children {
            self[child].set_parent(Some(parent));
        }
        let siblings = self[parent].children_mut();
        if let Some(position) = siblings.iter().position(|&c| c == index) {
            siblings.splice(position..=position, children);
        }
        self.vertices[index] = None;
    }

    /// Returns a copy of this tree with contiguous indices (no vacant slots).
    pub fn compacted(&self) -> PhyloTree {
        let mut copy = self.clone();
        let root = copy.root_index;
        let mut compact = copy.extract(root);
        compact.name = self.name.clone();
        compact
    }

    /// Moves the subtree rooted at `index` out of the arena into a new tree.
    fn extract(&mut self, index: VertexIndex) -> PhyloTree {
        let order: Vec<VertexIndex> = self.pre_order_from(index).map(|v| v.index()).collect();
        let remap: HashMap<VertexIndex, VertexIndex> = order
            .iter()
            .enumerate()
            .map(|(new, &old)| (old, new))
            .collect();

        let mut tree = PhyloTree::with_capacity(order.len());
        for old in order {
            if let Some(mut vertex) = self.vertices[old].take() {
                vertex.set_index(remap[&old]);
                vertex.set_parent(vertex.parent().and_then(|p| remap.get(&p).copied()));
                for child in vertex.children_mut().iter_mut() {
                    *child = remap[child];
                }
                tree.vertices.push(Some(vertex));
            }
        }
        tree.root_index = 0;
        tree
    }

    /// Moves all vertices of `subtree` into this arena and returns the new
    /// index of its root (which has no parent yet).
    fn graft(&mut self, subtree: PhyloTree) -> VertexIndex {
        let offset = self.vertices.len();
        let root = subtree.root_index + offset;
        for slot in subtree.vertices {
            let shifted = slot.map(|mut vertex| {
                vertex.set_index(vertex.index() + offset);
                vertex.set_parent(vertex.parent().map(|p| p + offset));
                for child in vertex.children_mut().iter_mut() {
                    *child += offset;
                }
                vertex
            });
            self.vertices.push(shifted);
        }
        self[root].set_parent(None);
        root
    }
}

// =#========================================================================#=
// PRINTING
// =#========================================================================#=
impl PhyloTree {
    /// Returns a visual representation of the tree.
    ///
    /// # Example Output
    /// ```text
    /// [4] (support: 0.8)
    ///   ├─ [2] (support: 0.9)
    ///   │   ├─ [0] a_A
    ///   │   └─ [1] b_B
    ///   └─ [3] c_C
    /// ```
    pub fn to_ascii(&self) -> String {
        let mut out = String::new();
        if self.is_root_set() {
            self.ascii_vertex(&mut out, self.root_index, "", true);
        } else {
            out.push_str("(No root set)\n");
        }
        out
    }

    /// Helper function to recursively print a vertex and its children.
    fn ascii_vertex(&self, out: &mut String, index: VertexIndex, prefix: &str, is_last: bool) {
        let vertex = &self[index];

        let connector = if prefix.is_empty() {
            ""
        } else if is_last {
            "└─ "
        } else {
            "├─ "
        };

        let mut line = format!("{}{}[{}]", prefix, connector, index);
        if let Some(name) = vertex.name() {
            line.push(' ');
            line.push_str(name);
        }
        if let Some(support) = vertex.support() {
            line.push_str(&format!(" (support: {})", support));
        }
        if vertex.labels().placeholder {
            line.push_str(" <contracted>");
        }
        out.push_str(&line);
        out.push('\n');

        let new_prefix = if prefix.is_empty() {
            "  ".to_string()
        } else {
            format!("{}{}  ", prefix, if is_last { " " } else { "│" })
        };
        let children = vertex.children();
        for (i, &child) in children.iter().enumerate() {
            self.ascii_vertex(out, child, &new_prefix, i + 1 == children.len());
        }
    }
}

// =#========================================================================#=
// ITERATORS
// =#========================================================================#=
impl PhyloTree {
    /// Returns an iterator over the tree in post-order (children before parents).
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self, self.is_root_set().then_some(self.root_index))
    }

    /// Returns an iterator over the subtree rooted at `index` in post-order.
    pub fn post_order_from(&self, index: VertexIndex) -> PostOrderIter<'_> {
        PostOrderIter::new(self, Some(index))
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self, self.is_root_set().then_some(self.root_index))
    }

    /// Returns an iterator over the subtree rooted at `index` in pre-order.
    pub fn pre_order_from(&self, index: VertexIndex) -> PreOrderIter<'_> {
        PreOrderIter::new(self, Some(index))
    }

    /// Returns an iterator over the tree in level-order (breadth first,
    /// children left to right).
    ///
    /// # Example
    /// ```
    /// use labelgtc::newick::parse_str;
    ///
    /// let tree = parse_str("((a_A,b_B),c_C);").unwrap();
    /// let order: Vec<_> = tree.level_order_iter().filter_map(|v| v.name()).collect();
    /// assert_eq!(order, vec!["c_C", "a_A", "b_B"]);
    /// ```
    pub fn level_order_iter(&self) -> LevelOrderIter<'_> {
        LevelOrderIter::new(self, self.is_root_set().then_some(self.root_index))
    }

    /// Returns an iterator over the subtree rooted at `index` in level-order.
    pub fn level_order_from(&self, index: VertexIndex) -> LevelOrderIter<'_> {
        LevelOrderIter::new(self, Some(index))
    }
}

/// Iterator for post-order traversal (children before parents).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
pub struct PostOrderIter<'a> {
    tree: &'a PhyloTree,
    stack: Vec<(VertexIndex, bool)>, // (index, children_visited)
}

impl<'a> PostOrderIter<'a> {
    fn new(tree: &'a PhyloTree, start: Option<VertexIndex>) -> Self {
        PostOrderIter {
            tree,
            stack: start.map(|s| (s, false)).into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let vertex = &self.tree[index];

            if children_visited || vertex.is_leaf() {
                return Some(vertex);
            }

            self.stack.push((index, true));
            // Push children in reverse, so the leftmost is processed first
            for &child in vertex.children().iter().rev() {
                self.stack.push((child, false));
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
pub struct PreOrderIter<'a> {
    tree: &'a PhyloTree,
    stack: Vec<VertexIndex>,
}

impl<'a> PreOrderIter<'a> {
    fn new(tree: &'a PhyloTree, start: Option<VertexIndex>) -> Self {
        PreOrderIter {
            tree,
            stack: start.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let vertex = &self.tree[index];
        self.stack.extend(vertex.children().iter().rev());
        Some(vertex)
    }
}

/// Iterator for level-order traversal (breadth first).
pub struct LevelOrderIter<'a> {
    tree: &'a PhyloTree,
    queue: VecDeque<VertexIndex>,
}

impl<'a> LevelOrderIter<'a> {
    fn new(tree: &'a PhyloTree, start: Option<VertexIndex>) -> Self {
        LevelOrderIter {
            tree,
            queue: start.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for LevelOrderIter<'a> {
    type Item = &'a Vertex;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.queue.pop_front()?;
        let vertex = &self.tree[index];
        self.queue.extend(vertex.children().iter().copied());
        Some(vertex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::newick::parse_str;

    #[test]
    fn test_post_order_visits_children_first() {
        let tree = parse_str("((a_A,b_B,d_B),c_C);").unwrap();
        let names: Vec<_> = tree
            .post_order_iter()
            .map(|v| v.name().unwrap_or("*"))
            .collect();
        assert_eq!(names, vec!["a_A", "b_B", "d_B", "*", "c_C", "*"]);
    }

    #[test]
    fn test_extract_remaps_indices() {
        let mut tree = parse_str("((a_A,b_B),(c_C,d_A));").unwrap();
        let right = tree.root().children()[1];
        let subtree = tree.detach(right);

        assert_eq!(subtree.root_index(), 0);
        assert!(subtree.root().is_root());
        assert_eq!(subtree.num_vertices(), 3);
        for vertex in subtree.vertices() {
            for &child in vertex.children() {
                assert_eq!(subtree[child].parent(), Some(vertex.index()));
            }
        }
    }

    #[test]
    #[should_panic]
    fn test_access_removed_vertex_panics() {
        let mut tree = parse_str("((a_A,b_B),c_C);").unwrap();
        let left = tree.root().children()[0];
        let _ = tree.detach(left);
        let _ = &tree[left];
    }

    #[test]
    fn test_compacted_has_no_vacant_slots() {
        let mut tree = parse_str("((a_A,b_B)0.2,c_C);").unwrap();
        let left = tree.root().children()[0];
        tree.collapse(left);
        assert!(tree.capacity() > tree.num_vertices());

        let compact = tree.compacted();
        assert_eq!(compact.capacity(), compact.num_vertices());
        assert!(compact.same_topology(&tree));
    }
}
