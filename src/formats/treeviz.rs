//! Treeviz formatter
//!
//! One line per node, nesting drawn with box connectors. Only nodes get lines; primitive
//! attributes are left out except for the label, which is the node's name or, failing that,
//! its primitive `value` (truncated to 30 characters).
//!
//! ```text
//! └─ module
//!   ├─ function-definition: add
//!   │ └─ no-op
//!   └─ assignment: "5"
//! ```
//!
//! Non-node list items appear as bare literals so that lists of mixed values stay visible.

use super::registry::{FormatError, Formatter};
use crate::ast::{TreeNode, Value};

const LABEL_WIDTH: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

pub fn to_treeviz_str(tree: &Value) -> String {
    let mut result = String::new();
    append_value(&mut result, tree, "", true);
    result
}

fn append_value(result: &mut String, value: &Value, prefix: &str, is_last: bool) {
    let connector = if is_last { "└─" } else { "├─" };

    let Value::Node(node) = value else {
        result.push_str(&format!(
            "{}{} {}\n",
            prefix,
            connector,
            truncate(&value.literal(), LABEL_WIDTH)
        ));
        return;
    };

    match display_label(node) {
        Some(label) => result.push_str(&format!(
            "{}{} {}: {}\n",
            prefix,
            connector,
            node.kind(),
            truncate(&label, LABEL_WIDTH)
        )),
        None => result.push_str(&format!("{}{} {}\n", prefix, connector, node.kind())),
    }

    let new_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let children = child_values(node);
    for (i, child) in children.iter().enumerate() {
        append_value(result, child, &new_prefix, i == children.len() - 1);
    }
}

fn display_label(node: &TreeNode) -> Option<String> {
    node.name().or_else(|| {
        node.attr("value")
            .filter(|v| v.is_primitive())
            .map(Value::literal)
    })
}

/// Nested nodes in attribute order, with list items spliced in place
fn child_values(node: &TreeNode) -> Vec<&Value> {
    let mut children = Vec::new();
    for (_, _, value) in node.visible_attributes() {
        match value {
            Value::Node(_) => children.push(value),
            Value::List(items) if items.iter().any(|item| item.as_node().is_some()) => {
                children.extend(items.iter().filter(|item| !matches!(item, Value::Null)));
            }
            _ => {}
        }
    }
    children
}

pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, tree: &Value) -> Result<String, FormatError> {
        Ok(to_treeviz_str(tree))
    }

    fn description(&self) -> &str {
        "One line per node with box-drawing connectors"
    }
}
