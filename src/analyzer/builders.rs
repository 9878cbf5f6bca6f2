//! Node builders for each recognized line shape
//!
//! Builders only look at the captures of a single line. Compound statements get a single
//! `no-op` placeholder as their body; the analyzer never looks at the indented block below.

use super::rules::LineShape;
use crate::ast::{TreeNode, Value};
use regex::Captures;

pub const MODULE: &str = "module";
pub const NO_OP: &str = "no-op";
pub const IDENTIFIER_REFERENCE: &str = "identifier-reference";

/// Build the node for a matched line
pub fn build(shape: LineShape, caps: &Captures<'_>) -> TreeNode {
    let node = TreeNode::new(shape.kind());
    match shape {
        LineShape::FunctionDefinition => node
            .with("name", capture(caps, "name"))
            .with("parameters", split_list(capture(caps, "params")))
            .with("body", placeholder_body()),
        LineShape::ClassDefinition => node
            .with("name", capture(caps, "name"))
            .with(
                "bases",
                identifier_list(split_list(capture(caps, "bases"))),
            )
            .with("body", placeholder_body()),
        LineShape::Conditional => {
            let condition = condition_text(capture(caps, "condition"));
            let subject = condition.split_whitespace().next().unwrap_or_default();
            node.with("condition", condition.as_str())
                .with("test", identifier(subject))
                .with("body", placeholder_body())
                .with("orelse", Value::List(vec![]))
        }
        LineShape::Loop => node
            .with("target", identifier(capture(caps, "target")))
            .with("iterable", identifier(capture(caps, "iter").trim()))
            .with("body", placeholder_body())
            .with("orelse", Value::List(vec![])),
        LineShape::Assignment => node
            .with("target", capture(caps, "target").trim())
            .with("value", capture(caps, "value").trim()),
        LineShape::Return => node.with("value", identifier(capture(caps, "value").trim())),
        LineShape::Call => node.with("callee", capture(caps, "callee")).with(
            "arguments",
            identifier_list(split_list(capture(caps, "args"))),
        ),
    }
}

/// Root node wrapping the per-line statements
pub fn module(body: Vec<TreeNode>) -> TreeNode {
    TreeNode::new(MODULE).with("body", body)
}

pub fn no_op() -> TreeNode {
    TreeNode::new(NO_OP)
}

pub fn identifier(name: &str) -> TreeNode {
    TreeNode::new(IDENTIFIER_REFERENCE).with("name", name)
}

fn placeholder_body() -> Value {
    Value::from(vec![no_op()])
}

fn capture<'t>(caps: &Captures<'t>, name: &str) -> &'t str {
    caps.name(name).map_or("", |m| m.as_str())
}

/// Comma separated items, trimmed, empty items dropped
fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn identifier_list(names: Vec<String>) -> Vec<TreeNode> {
    names.iter().map(|name| identifier(name)).collect()
}

/// The condition of an `if` header: everything before the first `:`
fn condition_text(rest: &str) -> String {
    rest.split(':').next().unwrap_or_default().trim().to_string()
}
