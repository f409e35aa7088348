use config::constants::MAX_GEOMETRY_NESTING;
use mcnp_geom::{normalize_geometry, parse_geometry, GeometryNode, GrammarErrorKind};
use proptest::prelude::*;

fn node_strategy() -> impl Strategy<Value = GeometryNode> {
    let leaf = prop_oneof![(1i32..500), (-500i32..-1)].prop_map(GeometryNode::SurfaceRef);
    leaf.prop_recursive(5, 48, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 2..4).prop_map(GeometryNode::Intersection),
            prop::collection::vec(inner.clone(), 2..4).prop_map(GeometryNode::Union),
            inner.prop_map(GeometryNode::complement),
        ]
    })
}

proptest! {
    #[test]
    fn prop_print_then_parse_is_identity(node in node_strategy()) {
        let printed = node.to_string();
        prop_assert_eq!(parse_geometry(&printed).unwrap(), node);
    }

    #[test]
    fn prop_explicit_form_parses_to_same_tree(node in node_strategy()) {
        let printed = node.to_string();
        let explicit = normalize_geometry(&printed).unwrap();
        let respaced = explicit.replace('*', " ").replace('~', "#");
        prop_assert_eq!(parse_geometry(&respaced).unwrap(), node);
    }
}

#[test]
fn whitespace_variants_agree() {
    let reference = parse_geometry("(1:-2) #3 4").unwrap();
    for variant in ["( 1 : -2 )#3 4", "(1:-2)#3   4", "  (1 :-2)  # 3 4 "] {
        assert_eq!(parse_geometry(variant).unwrap(), reference, "{variant}");
    }
}

#[test]
fn deep_nesting_up_to_the_limit() {
    let depth = MAX_GEOMETRY_NESTING;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(parse_geometry(&source).unwrap(), GeometryNode::SurfaceRef(1));

    let source = format!("{}1", "#".repeat(depth));
    let node = parse_geometry(&source).unwrap();
    assert_eq!(node.depth(), depth + 1);
    assert!(node.to_string().ends_with('1'));
    assert_eq!(node.clone(), node);
    drop(node);
}

#[test]
fn nesting_past_the_limit_is_rejected() {
    let depth = MAX_GEOMETRY_NESTING + 1;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let err = parse_geometry(&source).unwrap_err();
    assert_eq!(err.kind, GrammarErrorKind::NestingTooDeep);
    assert_eq!(err.offset, MAX_GEOMETRY_NESTING);

    // A chain long enough to overflow a recursive drop never becomes a tree.
    let source = format!("{}1", "#".repeat(100_000));
    assert_eq!(parse_geometry(&source).unwrap_err().kind, GrammarErrorKind::NestingTooDeep);
}

#[test]
fn error_kinds_survive_through_public_api() {
    assert_eq!(parse_geometry("1 2 :").unwrap_err().kind, GrammarErrorKind::DanglingOperator);
    assert_eq!(parse_geometry("1 (2").unwrap_err().kind, GrammarErrorKind::UnbalancedParen);
}
