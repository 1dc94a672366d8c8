use parselly::{Error, NodeType};

#[test]
fn seed_scenario_bare_type_selector() {
    let ast = parselly::parse("div").unwrap();
    assert_eq!(ast.node_type(), NodeType::SelectorList);
    assert_eq!(ast.child_count(), 1);
    let sequence = &ast.children()[0];
    assert_eq!(sequence.node_type(), NodeType::SimpleSelectorSequence);
    assert_eq!(sequence.child_count(), 1);
    assert_eq!(sequence.children()[0].node_type(), NodeType::TypeSelector);
    assert_eq!(sequence.children()[0].value().as_deref(), Some("div"));
}

#[test]
fn seed_scenario_compound_selector_order() {
    let ast = parselly::parse("div.foo#bar").unwrap();
    let sequence = &ast.children()[0];
    let kinds: Vec<_> = sequence.children().iter().map(|n| n.node_type()).collect();
    assert_eq!(
        kinds,
        vec![NodeType::TypeSelector, NodeType::ClassSelector, NodeType::IdSelector]
    );
}

#[test]
fn seed_scenario_child_combinator() {
    let ast = parselly::parse("div > p").unwrap();
    let selector = &ast.children()[0];
    assert_eq!(selector.node_type(), NodeType::Selector);
    let kinds: Vec<_> = selector.children().iter().map(|n| n.node_type()).collect();
    assert_eq!(
        kinds,
        vec![
            NodeType::SimpleSelectorSequence,
            NodeType::ChildCombinator,
            NodeType::SimpleSelectorSequence,
        ]
    );
}

#[test]
fn seed_scenario_nth_child_an_plus_b() {
    let ast = parselly::parse(":nth-child(2n+1)").unwrap();
    let func = &ast.children()[0].children()[0];
    assert_eq!(func.node_type(), NodeType::PseudoFunction);
    assert_eq!(func.value().as_deref(), Some("nth-child"));
    let arg = &func.children()[0];
    assert_eq!(arg.node_type(), NodeType::AnPlusB);
    assert_eq!(arg.value().as_deref(), Some("2n+1"));
}

#[test]
fn seed_scenario_attribute_selector_round_trips() {
    let ast = parselly::parse(r#"[type="text"]"#).unwrap();
    let attr = &ast.children()[0].children()[0];
    let kinds: Vec<_> = attr.children().iter().map(|n| n.node_type()).collect();
    assert_eq!(
        kinds,
        vec![NodeType::Attribute, NodeType::EqualOperator, NodeType::Value]
    );
    assert_eq!(ast.to_selector(), r#"[type="text"]"#);
}

#[test]
fn seed_scenario_is_with_three_alternatives() {
    let ast = parselly::parse(":is(h1, h2, h3)").unwrap();
    let func = &ast.children()[0].children()[0];
    let list = &func.children()[0];
    assert_eq!(list.node_type(), NodeType::SelectorList);
    assert_eq!(list.child_count(), 3);
    let names: Vec<_> = list
        .children()
        .iter()
        .map(|sequence| sequence.children()[0].value().unwrap())
        .collect();
    assert_eq!(names, vec!["h1", "h2", "h3"]);
}

#[test]
fn boundary_empty_input_errors() {
    assert!(matches!(parselly::parse(""), Err(Error::Parse(_))));
}

#[test]
fn boundary_whitespace_only_input_errors() {
    assert!(matches!(parselly::parse("   \t  "), Err(Error::Parse(_))));
}

#[test]
fn boundary_lone_combinator_errors() {
    assert!(matches!(parselly::parse(">"), Err(Error::Parse(_))));
    assert!(matches!(parselly::parse("~"), Err(Error::Parse(_))));
}

#[test]
fn boundary_unclosed_bracket_errors() {
    assert!(matches!(parselly::parse("[type=foo"), Err(Error::Parse(_))));
}

#[test]
fn boundary_unclosed_paren_errors() {
    assert!(matches!(parselly::parse(":not(div"), Err(Error::Parse(_))));
}

#[test]
fn boundary_deep_descendant_nesting() {
    let input = "div > ".repeat(100) + "span";
    let ast = parselly::parse(&input).unwrap();
    let mut node = ast.children()[0].clone();
    let mut depth = 0;
    while node.node_type() == NodeType::Selector {
        node = node.children()[0].clone();
        depth += 1;
    }
    assert_eq!(depth, 100);
}

#[test]
fn boundary_many_comma_separated_classes() {
    let classes: Vec<String> = (0..100).map(|i| format!(".c{i}")).collect();
    let input = classes.join(", ");
    let ast = parselly::parse(&input).unwrap();
    assert_eq!(ast.child_count(), 100);
}

#[test]
fn boundary_css_escaped_identifier() {
    let ast = parselly::parse(r".hover\:bg-blue-500:hover").unwrap();
    let sequence = &ast.children()[0];
    let class = &sequence.children()[0];
    assert_eq!(class.node_type(), NodeType::ClassSelector);
    assert_eq!(class.value().as_deref(), Some("hover:bg-blue-500"));
}

#[test]
fn position_reported_in_parse_errors() {
    match parselly::parse("div >> p") {
        Err(Error::Parse(e)) => {
            assert_eq!(e.line, 1);
            assert!(e.column > 1);
        }
        other => panic!("expected a ParseError, got {other:?}"),
    }
}

#[test]
fn attribute_value_with_embedded_double_quote_round_trips() {
    let ast = parselly::parse(r#"[title='say "hi"']"#).unwrap();
    let attrs = ast.attributes();
    assert_eq!(attrs[0].value.as_deref(), Some(r#"say "hi""#));

    let rendered = ast.to_selector();
    assert_eq!(rendered, r#"[title='say "hi"']"#);

    let reparsed = parselly::parse(&rendered).unwrap();
    assert_eq!(ast, reparsed);
}

#[test]
fn to_selector_is_idempotent_under_reparse() {
    let input = ":has(> .item):not([data-disabled]) ~ a#link.primary";
    let first = parselly::parse(input).unwrap();
    let rendered = first.to_selector();
    let second = parselly::parse(&rendered).unwrap();
    assert_eq!(first, second);
}

#[test]
fn sanitize_handles_leading_digit() {
    assert_eq!(parselly::sanitize("123"), "\\31 23");
}
