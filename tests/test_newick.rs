use labelgtc::model::BranchLength;
use labelgtc::newick::{InternalLabel, NewickParser, NewickStyle, parse_forest, parse_str, to_newick};
use labelgtc::parser::ParsingErrorType;
use labelgtc::parser::byte_parser::ByteParser;

// --- TESTS NEWICK STRING PARSING ---
#[test]
fn test_basic_tree() {
    let newick = "((a_A:1.0,b_B:2.0)0.9:3.0,c_C:4.0):0.5;";
    let mut parser = ByteParser::for_str(newick);
    let tree = NewickParser::new()
        .with_num_vertices(5)
        .parse_str(&mut parser)
        .unwrap();

    // Test counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 2);
    assert_eq!(tree.num_vertices(), 5);
    assert!(tree.is_binary());

    // Test relationships
    // - Root has children (internal, c_C)
    let root = tree.root();
    let root_index = root.index();
    let (root_left, root_right) = (root.children()[0], root.children()[1]);

    // - Internal vertex has children (a_A, b_B) and support
    let internal = tree.vertex(root_left);
    assert!(internal.is_internal());
    assert_eq!(internal.support(), Some(0.9));
    assert_eq!(internal.branch_length(), Some(BranchLength::new(3.0)));
    let (internal_left, internal_right) = (internal.children()[0], internal.children()[1]);

    // - Three leaves
    let leaf_a = tree.vertex(internal_left);
    let leaf_b = tree.vertex(internal_right);
    let leaf_c = tree.vertex(root_right);
    assert_eq!(leaf_a.name(), Some("a_A"));
    assert_eq!(leaf_b.name(), Some("b_B"));
    assert_eq!(leaf_c.name(), Some("c_C"));
    assert_eq!(leaf_c.branch_length(), Some(BranchLength::new(4.0)));

    // - Parent relationships
    assert_eq!(internal.parent(), Some(root_index));
    assert_eq!(leaf_a.parent(), Some(root_left));
    assert_eq!(leaf_b.parent(), Some(root_left));
    assert_eq!(leaf_c.parent(), Some(root_index));
}

#[test]
fn test_polytomy_and_single_leaf() {
    let tree = parse_str("(a_A,b_B,c_C,(d_A,e_B));").unwrap();
    assert_eq!(tree.root().children().len(), 4);
    assert!(tree.root().is_polytomy());
    assert!(!tree.is_binary());

    let leaf = parse_str("a_A;").unwrap();
    assert_eq!(leaf.num_vertices(), 1);
    assert!(leaf.root().is_leaf());
    assert!(leaf.root().is_root());
}

#[test]
fn test_whitespace_comments_and_quotes() {
    let newick = "( [first] 'gene (1)_A' : 1.5 ,\n\t'it''s_B' ) [support next] 0.4 ;";
    let tree = parse_str(newick).unwrap();
    assert_eq!(tree.leaf_names(), vec!["gene (1)_A", "it's_B"]);
    assert_eq!(tree.root().support(), Some(0.4));
    assert_eq!(tree[tree.root().children()[0]].branch_length(), Some(BranchLength::new(1.5)));
}

#[test]
fn test_internal_names() {
    let tree = parse_str("((a_A,b_B)AB,c_C)0.5;").unwrap();
    let ab = tree.root().children()[0];
    assert_eq!(tree[ab].name(), Some("AB"));
    assert_eq!(tree[ab].support(), None);

    let mut parser = NewickParser::new().with_internal_labels(InternalLabel::Name);
    let tree = parser
        .parse_str(&mut ByteParser::for_str("((a_A,b_B)AB,c_C)0.5;"))
        .unwrap();
    assert_eq!(tree.root().name(), Some("0.5"));
    assert_eq!(tree.root().support(), None);
}

#[test]
fn test_parse_forest() {
    let covering = parse_forest("a_A; x_B;\n(b_B,e_C);\n[comment] ((g_B,h_A),d_C);\n").unwrap();
    assert_eq!(covering.len(), 4);
    assert_eq!(covering[0].leaf_names(), vec!["a_A"]);
    assert_eq!(covering[2].leaf_names(), vec!["b_B", "e_C"]);
    assert_eq!(covering[3].num_leaves(), 3);

    assert!(parse_forest("  \n").unwrap().is_empty());
}

#[test]
fn test_parse_scientific_branch_length() {
    let tree = parse_str("(a_A:1.5e-3,b_B:2E2);").unwrap();
    let children = tree.root().children();
    assert_eq!(tree[children[0]].branch_length(), Some(BranchLength::new(0.0015)));
    assert_eq!(tree[children[1]].branch_length(), Some(BranchLength::new(200.0)));
}

// --- TESTS PARSING ERRORS ---
#[test]
fn test_errors() {
    let cases = [
        ("(a_A,b_B)", "missing semicolon"),
        ("((a_A,b_B);", "unbalanced"),
        ("(a_A,,b_B);", "empty leaf"),
        ("(a_A b_B);", "missing comma"),
    ];
    for (newick, case) in cases {
        let err = parse_str(newick).unwrap_err();
        assert!(
            matches!(err.kind(), ParsingErrorType::InvalidNewickString(_)),
            "{case}: {err:?}"
        );
    }

    let err = parse_str("(a_A:x,b_B);").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidNumber(_)));

    let err = parse_str("(a_A,b_B[unclosed);").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnclosedComment);

    let err = parse_str("('a_A,b_B);").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnexpectedEOF);

    let err = parse_str("").unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnexpectedEOF);
}

#[test]
fn test_error_position() {
    let err = parse_str("((a_A,b_B),c_C)").unwrap_err();
    assert_eq!(err.position(), 15);
}

// --- TESTS NEWICK WRITING ---
#[test]
fn test_write_styles() {
    let tree = parse_str("((a_A:1,b_B:0.25)0.9:2,(c_C,d_A)CD,e_B)0.3:1;").unwrap();
    assert_eq!(to_newick(&tree, NewickStyle::Topology), "((a_A,b_B),(c_C,d_A),e_B);");
    assert_eq!(to_newick(&tree, NewickStyle::Support), "((a_A,b_B)0.9,(c_C,d_A),e_B)0.3;");
    assert_eq!(
        to_newick(&tree, NewickStyle::Full),
        "((a_A:1,b_B:0.25)0.9:2,(c_C,d_A)CD,e_B)0.3;"
    );
    assert_eq!(tree.to_string(), to_newick(&tree, NewickStyle::Support));
}

#[test]
fn test_write_escapes_labels() {
    let tree = parse_str("('gene (1)_A','it''s_B');").unwrap();
    let newick = to_newick(&tree, NewickStyle::Topology);
    assert_eq!(newick, "('gene (1)_A','it''s_B');");

    let reparsed = parse_str(&newick).unwrap();
    assert!(reparsed.same_topology(&tree));
}

#[test]
fn test_write_then_parse_keeps_data() {
    let newick = "(((a_A,x_B)0.8,(b_B,e_C)0.1)0.9,y_C:0.5)1;";
    let tree = parse_str(newick).unwrap();
    let written = to_newick(&tree, NewickStyle::Full);
    let reparsed = parse_str(&written).unwrap();

    assert!(reparsed.same_topology(&tree));
    let supports = |t: &labelgtc::model::PhyloTree| -> Vec<Option<f64>> {
        t.pre_order_iter().map(|v| v.support()).collect()
    };
    assert_eq!(supports(&reparsed), supports(&tree));
}
