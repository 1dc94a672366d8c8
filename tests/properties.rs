use std::rc::Rc;

use parselly::{Node, NodeType, Position};
use proptest::prelude::*;

fn ident() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,6}"
}

/// Builds `"name"`, `"name.c1"`, `"name.c1.c2"`, … — a compound
/// selector with a type selector followed by 0-3 classes.
fn compound_selector() -> impl Strategy<Value = String> {
    (ident(), prop::collection::vec(ident(), 0..3))
        .prop_map(|(type_name, classes)| {
            let mut s = type_name;
            for c in classes {
                s.push('.');
                s.push_str(&c);
            }
            s
        })
}

/// Joins 1-5 compound selectors with a combinator chosen per-join from
/// `{" "," > "," + "," ~ "}`.
fn complex_selector() -> impl Strategy<Value = String> {
    (
        compound_selector(),
        prop::collection::vec((0usize..4, compound_selector()), 0..4),
    )
        .prop_map(|(first, rest)| {
            let mut s = first;
            for (combinator_index, compound) in rest {
                let combinator = [" ", " > ", " + ", " ~ "][combinator_index];
                s.push_str(combinator);
                s.push_str(&compound);
            }
            s
        })
}

fn selector_list() -> impl Strategy<Value = String> {
    prop::collection::vec(complex_selector(), 1..5).prop_map(|items| items.join(", "))
}

/// A syntactically valid An+B value, covering keywords, bare integers,
/// and every signed-coefficient/offset combination.
fn an_plus_b_value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("even".to_string()),
        Just("odd".to_string()),
        (0i32..20).prop_map(|n| n.to_string()),
        Just("n".to_string()),
        Just("-n".to_string()),
        (0i32..10).prop_map(|a| format!("{a}n")),
        (0i32..10, 0i32..10).prop_map(|(a, b)| format!("{a}n+{b}")),
        (0i32..10, 0i32..10).prop_map(|(a, b)| format!("{a}n-{b}")),
        (0i32..10).prop_map(|b| format!("-n+{b}")),
        (0i32..10).prop_map(|b| format!("-n-{b}")),
        (0i32..10).prop_map(|b| format!("n+{b}")),
        (0i32..10).prop_map(|b| format!("n-{b}")),
    ]
}

fn walk(node: &Node, visit: &mut impl FnMut(&Node)) {
    visit(node);
    for child in node.children() {
        walk(&child, visit);
    }
}

proptest! {
    /// Invariant 1: the root of any successful parse is a `selector_list`.
    #[test]
    fn root_is_always_selector_list(input in selector_list()) {
        let ast = parselly::parse(&input).expect("generator only produces valid selectors");
        prop_assert_eq!(ast.node_type(), NodeType::SelectorList);
        prop_assert!(ast.child_count() >= 1);
    }

    /// Invariant 2: every `selector` node has exactly 3 children.
    #[test]
    fn selector_nodes_are_always_ternary(input in selector_list()) {
        let ast = parselly::parse(&input).unwrap();
        walk(&ast, &mut |node| {
            if node.node_type() == NodeType::Selector {
                assert_eq!(node.child_count(), 3);
            }
        });
    }

    /// Invariant 3: every `simple_selector_sequence` has ≥1 children
    /// and never nests another sequence directly inside it.
    #[test]
    fn sequences_are_flat_and_nonempty(input in selector_list()) {
        let ast = parselly::parse(&input).unwrap();
        walk(&ast, &mut |node| {
            if node.node_type() == NodeType::SimpleSelectorSequence {
                assert!(node.child_count() >= 1);
                for child in node.children() {
                    assert_ne!(child.node_type(), NodeType::SimpleSelectorSequence);
                }
            }
        });
    }

    /// Invariant 4: re-parsing a canonical serialization is a no-op
    /// on tree shape.
    #[test]
    fn to_selector_round_trip_is_idempotent(input in selector_list()) {
        let first = parselly::parse(&input).unwrap();
        let rendered = first.to_selector();
        let second = parselly::parse(&rendered).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Invariant 5: a valid An+B argument to any `:nth-*()` pseudo
    /// always ends up as a sole `an_plus_b` child.
    #[test]
    fn nth_pseudo_argument_is_always_an_plus_b(value in an_plus_b_value()) {
        let input = format!(":nth-child({value})");
        let ast = parselly::parse(&input).unwrap();
        let func = &ast.children()[0].children()[0];
        prop_assert_eq!(func.node_type(), NodeType::PseudoFunction);
        prop_assert_eq!(func.child_count(), 1);
        let arg = &func.children()[0];
        prop_assert_eq!(arg.node_type(), NodeType::AnPlusB);
        prop_assert_eq!(arg.value().as_deref(), Some(value.as_str()));
    }
}

/// Invariant 6: after `add_child`/`replace_child` on node `x`, `x` and
/// every ancestor of `x` recompute `descendants` rather than serving a
/// stale cache.
#[test]
fn cache_invalidates_up_to_the_root() {
    let root = Node::new(NodeType::SelectorList, None, Position::start());
    let mid = Node::new(NodeType::Selector, None, Position::start());
    root.add_child(mid.clone());

    let before_root = root.descendants();
    let before_mid = mid.descendants();
    assert_eq!(before_root.len(), 1);
    assert_eq!(before_mid.len(), 0);

    let leaf = Node::new(NodeType::SimpleSelectorSequence, None, Position::start());
    mid.add_child(leaf);

    let after_root = root.descendants();
    let after_mid = mid.descendants();
    assert_eq!(after_mid.len(), 1);
    assert_eq!(after_root.len(), 2);
    assert!(!Rc::ptr_eq(&before_root, &after_root));
    assert!(!Rc::ptr_eq(&before_mid, &after_mid));

    let replacement = Node::new(NodeType::SimpleSelectorSequence, None, Position::start());
    let before_replace = root.descendants();
    mid.replace_child(0, replacement);
    let after_replace = root.descendants();
    assert!(!Rc::ptr_eq(&before_replace, &after_replace));
    assert_eq!(after_replace.len(), 2);
}
