use labelgtc::model::{BranchLength, CoverageStatus, PhyloTree, Vertex};
use labelgtc::newick::parse_str;

fn names<'a>(iter: impl Iterator<Item = &'a Vertex>) -> Vec<&'a str> {
    iter.map(|v| v.name().unwrap_or("?")).collect()
}

#[test]
fn test_building_tree() {
    let mut tree = PhyloTree::with_capacity(5);
    let index_a = tree.add_leaf("a_A", Some(BranchLength::new(1.0)));
    let index_b = tree.add_leaf("b_B", Some(BranchLength::new(1.0)));
    let index_c = tree.add_leaf("c_C", Some(BranchLength::new(0.5)));
    let index_ab = tree.add_internal(vec![index_a, index_b], Some(0.9), Some(BranchLength::new(1.5)));
    let index_root = tree.add_internal(vec![index_c, index_ab], None, None);
    tree.set_root(index_root);

    // Counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 2);
    assert_eq!(tree.num_vertices(), 5);

    // Root
    let root = tree.root();
    assert_eq!(root.index(), index_root);
    assert!(root.is_root());
    assert_eq!(root.children(), &[index_c, index_ab]);

    // Leaf
    let b = &tree[index_b];
    assert!(b.is_leaf());
    assert_eq!(b.name(), Some("b_B"));
    assert_eq!(b.parent(), Some(index_ab));

    // Internal
    let ab = &tree[index_ab];
    assert!(ab.is_internal());
    assert_eq!(ab.support(), Some(0.9));
    assert_eq!(ab.branch_length(), Some(BranchLength::new(1.5)));
    assert_eq!(ab.labels().coverage, CoverageStatus::None);
    assert_eq!(ab.labels().trusted, None);
    assert!(!ab.is_trusted());

    assert_eq!(tree.to_string(), "(c_C,(a_A,b_B)0.9);");
}

#[test]
#[should_panic]
fn test_get_root_panics_on_empty_tree() {
    let tree = PhyloTree::new();
    tree.root(); // Should panic
}

#[test]
#[should_panic]
fn test_get_vertex_out_of_bounds() {
    let tree = parse_str("(a_A,b_B);").unwrap();
    let _ = &tree[55];
}

#[test]
#[should_panic]
fn test_detach_root_panics() {
    let mut tree = parse_str("(a_A,b_B);").unwrap();
    let root = tree.root_index();
    tree.detach(root);
}

// ============= Traversals =============

#[test]
fn test_traversal_orders() {
    let tree = parse_str("((a_A,b_B)ab,(c_C,d_A)cd)root;").unwrap();
    assert_eq!(
        names(tree.pre_order_iter()),
        vec!["root", "ab", "a_A", "b_B", "cd", "c_C", "d_A"]
    );
    assert_eq!(
        names(tree.post_order_iter()),
        vec!["a_A", "b_B", "ab", "c_C", "d_A", "cd", "root"]
    );
    assert_eq!(
        names(tree.level_order_iter()),
        vec!["root", "ab", "cd", "a_A", "b_B", "c_C", "d_A"]
    );

    let cd = tree.root().children()[1];
    assert_eq!(names(tree.pre_order_from(cd)), vec!["cd", "c_C", "d_A"]);
    assert_eq!(tree.leaf_names_of(cd), vec!["c_C", "d_A"]);
    assert_eq!(tree.descendants(cd).len(), 2);
}

#[test]
fn test_ancestry_and_depth() {
    let tree = parse_str("(((a_A,b_B),c_C),d_A);").unwrap();
    let root = tree.root_index();
    let abc = tree.root().children()[0];
    let ab = tree[abc].children()[0];
    let a = tree[ab].children()[0];
    let d = tree.root().children()[1];

    assert!(tree.is_ancestor(root, a));
    assert!(tree.is_ancestor(abc, a));
    assert!(tree.is_ancestor(a, a));
    assert!(!tree.is_ancestor(d, a));
    assert!(!tree.is_ancestor(a, abc));
    assert_eq!(tree.depth(root), 0);
    assert_eq!(tree.depth(a), 3);
    assert_eq!(tree.leaves_of(abc).len(), 3);
}

// ============= Topology =============

#[test]
fn test_same_topology_ignores_order_and_data() {
    let t1 = parse_str("((a_A:1,b_B:2)0.9,(c_C,d_A,e_B)0.1);").unwrap();
    let t2 = parse_str("((e_B,d_A,c_C)x,(b_B,a_A));").unwrap();
    let t3 = parse_str("((a_A,c_C),(b_B,d_A,e_B));").unwrap();
    let t4 = parse_str("((a_A,b_B),(c_C,(d_A,e_B)));").unwrap();

    assert!(t1.same_topology(&t2));
    assert!(!t1.same_topology(&t3));
    assert!(!t1.same_topology(&t4));

    let cde = t1.root().children()[1];
    assert!(t1.same_topology_at(cde, &parse_str("(d_A,c_C,e_B);").unwrap()));
    assert_eq!(t1.canonical_form(cde), t2.canonical_form(t2.root().children()[0]));
}

#[test]
fn test_canonical_forms_cover_live_vertices() {
    let mut tree = parse_str("((a_A,b_B),(c_C,d_A));").unwrap();
    let right = tree.root().children()[1];
    tree.collapse(right);

    let forms = tree.canonical_forms();
    assert_eq!(forms.len(), tree.capacity());
    assert!(forms[right].is_none());
    assert_eq!(forms.iter().flatten().count(), tree.num_vertices());
}

// ============= Mutation =============

#[test]
fn test_detach_returns_independent_tree() {
    let mut tree = parse_str("(((a_A,b_B)0.9,c_C)0.8,d_A);").unwrap();
    let abc = tree.root().children()[0];

    let subtree = tree.detach(abc);
    assert_eq!(subtree.num_leaves(), 3);
    assert_eq!(subtree.root_index(), 0);
    assert!(subtree.root().is_root());
    assert_eq!(subtree.root().support(), Some(0.8));
    assert!(subtree.same_topology(&parse_str("((a_A,b_B),c_C);").unwrap()));

    assert_eq!(tree.num_vertices(), 2);
    assert_eq!(tree.leaf_names(), vec!["d_A"]);
    assert!(tree.get(abc).is_none());
}

#[test]
fn test_contract_keeps_position() {
    let mut tree = parse_str("(x_A,((a_A,b_B),c_C):2,d_A);").unwrap();
    let middle = tree.root().children()[1];

    let (subtree, placeholder) = tree.contract(middle, "P");
    assert_eq!(subtree.num_leaves(), 3);
    assert_eq!(tree.root().children()[1], placeholder);
    assert_eq!(tree[placeholder].name(), Some("P"));
    assert_eq!(tree[placeholder].branch_length(), Some(BranchLength::new(2.0)));
    assert_eq!(tree.leaf_names(), vec!["x_A", "P", "d_A"]);
}

#[test]
fn test_contract_root() {
    let mut tree = parse_str("(a_A,b_B);").unwrap();
    let root = tree.root_index();

    let (subtree, placeholder) = tree.contract(root, "P");
    assert_eq!(tree.root_index(), placeholder);
    assert_eq!(tree.num_vertices(), 1);
    assert_eq!(subtree.num_leaves(), 2);
}

#[test]
fn test_splice_into_leaf_and_root() {
    let mut tree = parse_str("((P:1.5,c_C),d_A);").unwrap();
    let placeholder = tree.leaves_of(tree.root_index())[0];

    let spliced = tree.splice(placeholder, parse_str("(a_A,b_B)0.7;").unwrap());
    assert!(tree.same_topology(&parse_str("(((a_A,b_B),c_C),d_A);").unwrap()));
    assert_eq!(tree[spliced].support(), Some(0.7));
    assert_eq!(tree[spliced].branch_length(), Some(BranchLength::new(1.5)));

    let mut single = PhyloTree::single_leaf("P");
    let root = single.root_index();
    let new_root = single.splice(root, parse_str("(a_A,b_B);").unwrap());
    assert_eq!(single.root_index(), new_root);
    assert_eq!(single.num_leaves(), 2);
}

#[test]
fn test_contract_then_splice_is_identity() {
    let original = parse_str("((a_A,(b_B,e_C)),(c_C,d_A));").unwrap();
    let mut tree = original.clone();
    let left = tree.root().children()[0];
    let inner = tree[left].children()[1];

    let (subtree, placeholder) = tree.contract(inner, "P");
    assert!(!tree.same_topology(&original));
    tree.splice(placeholder, subtree);
    assert!(tree.same_topology(&original));

    let compact = tree.compacted();
    assert_eq!(compact.capacity(), compact.num_vertices());
    assert!(compact.same_topology(&original));
}

#[test]
fn test_collapse_lifts_children_in_place() {
    let mut tree = parse_str("(x_A,(a_A,b_B,c_C)0.1,d_A);").unwrap();
    let middle = tree.root().children()[1];

    tree.collapse(middle);
    assert_eq!(tree.leaf_names(), vec!["x_A", "a_A", "b_B", "c_C", "d_A"]);
    assert_eq!(tree.root().children().len(), 5);
    assert_eq!(tree.num_internal(), 1);
    let root = tree.root_index();
    assert!(tree.vertices().filter(|v| v.is_leaf()).all(|v| v.parent() == Some(root)));
}

// ============= Labels =============

#[test]
fn test_label_internal_vertices_and_reset() {
    let mut tree = parse_str("((a_A,b_B)AB,c_C);").unwrap();
    tree.label_internal_vertices("n");
    let ab = tree.root().children()[0];
    assert_eq!(tree[ab].name(), Some("AB"));
    assert_eq!(tree.root().name(), Some(format!("n{}", tree.root_index()).as_str()));

    let leaf = tree[ab].children()[0];
    tree[leaf].labels_mut().coverage = CoverageStatus::Exact;
    tree[ab].labels_mut().in_frontier = true;
    tree[ab].labels_mut().placeholder = true;
    tree[ab].labels_mut().trusted = Some(true);

    tree.clear_decomposition_markers();
    assert!(!tree[ab].labels().in_frontier);
    assert!(!tree[ab].labels().placeholder);
    assert_eq!(tree[ab].labels().trusted, Some(true));
    assert_eq!(tree[leaf].labels().coverage, CoverageStatus::Exact);

    tree.reset_labels();
    assert_eq!(tree[ab].labels().trusted, None);
    assert_eq!(tree[leaf].labels().coverage, CoverageStatus::None);
}

#[test]
fn test_ascii_rendering() {
    let tree = parse_str("((a_A,b_B)0.9,c_C);").unwrap();
    let ascii = tree.to_ascii();
    assert!(ascii.contains("a_A"));
    assert!(ascii.contains("c_C"));
    assert!(ascii.contains("0.9"));
    assert_eq!(ascii.lines().count(), 5);
    assert!(PhyloTree::new().to_ascii().contains("No root set"));
}

#[test]
fn test_branch_length_rejects_invalid_values() {
    assert!(BranchLength::try_new(-0.5).is_none());
    assert!(BranchLength::try_new(f64::NAN).is_none());
    assert!(BranchLength::try_new(f64::INFINITY).is_none());
    assert_eq!(BranchLength::try_new(0.0), Some(BranchLength::new(0.0)));
}
