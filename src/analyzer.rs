//! Toy source analyzer
//!
//!     A line-local classifier standing in for a parser of the Python demo language. It splits
//!     the source into lines, trims them, skips blanks, and classifies each remaining line with
//!     the first matching rule of [rules::LINE_RULES]. Every classified line contributes one
//!     statement to the `body` of a `module` root.
//!
//!     Limits, all intentional:
//!
//!         - No tokenizer, no grammar, no operator precedence. A rule's regex is all there is.
//!         - No nesting. Compound statements (def, class, if, for) get a single `no-op` body.
//!         - No errors. Lines no rule recognizes are dropped.
//!
//!     Empty input is the caller's concern; see [crate::host::Controller::analyze].

pub mod builders;
pub mod rules;

pub use rules::{rule_order, LineShape};

use crate::ast::TreeNode;
use tracing::{debug, trace};

/// Analyze a whole source text into a `module` node
pub fn analyze(source: &str) -> TreeNode {
    let body: Vec<TreeNode> = source
        .lines()
        .enumerate()
        .filter_map(|(line_number, line)| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            let node = analyze_line(line);
            match &node {
                Some(node) => trace!(line_number, kind = node.kind(), "classified line"),
                None => debug!(line_number, line, "dropped unrecognized line"),
            }
            node
        })
        .collect();

    debug!(statements = body.len(), "analyzed source");
    builders::module(body)
}

/// Classify and build a single trimmed line
pub fn analyze_line(line: &str) -> Option<TreeNode> {
    rules::match_line(line).map(|(shape, caps)| builders::build(shape, &caps))
}

/// Which shape a line would be classified as, if any
pub fn classify_line(line: &str) -> Option<LineShape> {
    rules::match_line(line.trim()).map(|(shape, _)| shape)
}

#[cfg(test)]
mod tests {
    use super::builders::{identifier, no_op};
    use super::*;
    use crate::ast::Value;

    fn body(node: &TreeNode) -> &[Value] {
        node.attr("body").and_then(Value::as_list).unwrap()
    }

    fn single(source: &str) -> TreeNode {
        let module = analyze(source);
        assert_eq!(module.kind(), "module");
        let body = body(&module);
        assert_eq!(body.len(), 1, "expected one statement for {source:?}");
        body[0].as_node().unwrap().clone()
    }

    #[test]
    fn test_function_definition() {
        let expected = TreeNode::new("function-definition")
            .with("name", "add")
            .with("parameters", vec!["a".to_string(), "b".to_string()])
            .with("body", vec![no_op()]);
        assert_eq!(single("def add(a, b):"), expected);
    }

    #[test]
    fn test_assignment() {
        let expected = TreeNode::new("assignment")
            .with("target", "result")
            .with("value", "5");
        assert_eq!(single("result = 5"), expected);
    }

    #[test]
    fn test_class_definition_with_and_without_bases() {
        let with_bases = single("class Dog(Animal, Pet):");
        assert_eq!(with_bases.name(), Some("Dog".to_string()));
        assert_eq!(
            with_bases.attr("bases"),
            Some(&Value::from(vec![identifier("Animal"), identifier("Pet")]))
        );

        let bare = single("class Empty:");
        assert_eq!(bare.attr("bases"), Some(&Value::List(vec![])));
    }

    #[test]
    fn test_conditional() {
        let node = single("if n <= 1:");
        assert_eq!(node.kind(), "conditional");
        assert_eq!(node.attr("condition"), Some(&Value::from("n <= 1")));
        assert_eq!(node.attr("test"), Some(&Value::from(identifier("n"))));
        assert_eq!(node.attr("body"), Some(&Value::from(vec![no_op()])));
    }

    #[test]
    fn test_loop() {
        let node = single("for item in items:");
        assert_eq!(node.kind(), "loop");
        assert_eq!(node.attr("target"), Some(&Value::from(identifier("item"))));
        assert_eq!(node.attr("iterable"), Some(&Value::from(identifier("items"))));
    }

    #[test]
    fn test_return() {
        let node = single("return fibonacci(n - 1) + fibonacci(n - 2)");
        assert_eq!(node.kind(), "return");
        assert_eq!(
            node.attr("value"),
            Some(&Value::from(identifier(
                "fibonacci(n - 1) + fibonacci(n - 2)"
            )))
        );
    }

    #[test]
    fn test_call() {
        let node = single("print(a, b)");
        assert_eq!(node.kind(), "call");
        assert_eq!(node.attr("callee"), Some(&Value::from("print")));
        assert_eq!(
            node.attr("arguments"),
            Some(&Value::from(vec![identifier("a"), identifier("b")]))
        );
    }

    #[test]
    fn test_indentation_and_blank_lines_ignored() {
        let module = analyze("\n\n    return n\n   \n");
        assert_eq!(body(&module).len(), 1);
    }

    #[test]
    fn test_unrecognized_lines_dropped() {
        let module = analyze("pass\nx = 1\nelse:\n");
        let kinds: Vec<&str> = body(&module)
            .iter()
            .filter_map(Value::as_node)
            .map(TreeNode::kind)
            .collect();
        assert_eq!(kinds, vec!["assignment"]);
    }

    #[test]
    fn test_classify_line_trims() {
        assert_eq!(classify_line("   if ready:"), Some(LineShape::Conditional));
        assert_eq!(classify_line("   "), None);
    }
}
