//! Line classification table for the toy analyzer

use astview::analyzer::{analyze, analyze_line, classify_line, rule_order, LineShape};
use astview::ast::Value;
use rstest::rstest;

#[rstest]
#[case("def add(a, b):", Some(LineShape::FunctionDefinition))]
#[case("def main():", Some(LineShape::FunctionDefinition))]
#[case("class Dog(Animal):", Some(LineShape::ClassDefinition))]
#[case("class Empty:", Some(LineShape::ClassDefinition))]
#[case("if n <= 1:", Some(LineShape::Conditional))]
#[case("if x == y:", Some(LineShape::Conditional))]
#[case("for i in range(10):", Some(LineShape::Loop))]
#[case("total = total + 1", Some(LineShape::Assignment))]
#[case("result = compute(x)", Some(LineShape::Assignment))]
#[case("define = 1", Some(LineShape::Assignment))]
#[case("return n", Some(LineShape::Return))]
#[case("print(item)", Some(LineShape::Call))]
#[case("for_each(items)", Some(LineShape::Call))]
#[case("x == 1", None)]
#[case("else:", None)]
#[case("pass", None)]
#[case("return", None)]
#[case("def add(a: int, b: int) -> int:", None)]
#[case("class Foo(Base) -> x:", None)]
#[case("for (i, j) in pairs:", None)]
fn test_classify_line(#[case] line: &str, #[case] expected: Option<LineShape>) {
    assert_eq!(classify_line(line), expected);
}

#[rstest]
#[case("def add(a, b):", "function-definition")]
#[case("class Dog:", "class-definition")]
#[case("if ready:", "conditional")]
#[case("for x in xs:", "loop")]
#[case("x = 1", "assignment")]
#[case("return x", "return")]
#[case("run()", "call")]
fn test_node_kind_matches_shape(#[case] line: &str, #[case] kind: &str) {
    let node = analyze_line(line).expect("line should classify");
    assert_eq!(node.kind(), kind);
    assert_eq!(classify_line(line).map(|shape| shape.kind()), Some(kind));
}

#[test]
fn test_malformed_headers_are_dropped_not_called() {
    assert!(analyze_line("def add(a: int, b: int) -> int:").is_none());
    assert!(analyze_line("for (i, j) in pairs:").is_none());

    let module = analyze("def add(a: int) -> int:\nfor (i, j) in pairs:\nprint(i)");
    let body = module.attr("body").and_then(Value::as_list).unwrap();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0].as_node().map(|node| node.kind()), Some("call"));
}

#[test]
fn test_conditional_attribute_order() {
    let node = analyze_line("if n <= 1:").expect("conditional");
    let keys: Vec<&str> = node.attributes().keys().collect();
    assert_eq!(keys, vec!["condition", "test", "body", "orelse"]);
}

#[test]
fn test_rule_order_is_first_match_wins() {
    assert_eq!(
        rule_order(),
        vec![
            LineShape::FunctionDefinition,
            LineShape::ClassDefinition,
            LineShape::Conditional,
            LineShape::Loop,
            LineShape::Assignment,
            LineShape::Return,
            LineShape::Call,
        ]
    );
}

#[test]
fn test_analyzed_nodes_carry_no_ranges() {
    let module = analyze("def f():\nx = 1\nf()");
    assert_eq!(module.source_range(), None);
    let body = module.attr("body").and_then(Value::as_list).unwrap();
    assert_eq!(body.len(), 3);
    assert!(body
        .iter()
        .filter_map(Value::as_node)
        .all(|node| node.source_range().is_none()));
}

#[test]
fn test_python_sample_analyzes() {
    let source = astview::host::Language::Python.sample();
    let module = analyze(source);
    let kinds: Vec<String> = module
        .attr("body")
        .and_then(Value::as_list)
        .unwrap()
        .iter()
        .filter_map(Value::as_node)
        .map(|node| node.kind().to_string())
        .collect();
    assert!(kinds.contains(&"function-definition".to_string()));
    assert!(!kinds.is_empty());
}
