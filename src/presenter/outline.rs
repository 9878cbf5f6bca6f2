//! Outline state and row flattening
//!
//! The outline is the tree as the user sees it: a depth-first list of rows where collapsed
//! nodes hide everything below them. [`OutlineState`] remembers which nodes are expanded;
//! [`flatten`] turns a tree plus that state into rows.
//!
//! Attribute values become rows with a fixed precedence:
//!
//! - `Null`: no row
//! - primitive: an inline `key: literal` field
//! - non-empty list: a `key: [N items]` summary, followed by one row group per item
//!   (empty lists produce no row at all)
//! - node: a `key:` label followed by the nested node
//! - opaque object: an inline field with the compact JSON text
//!
//! Bookkeeping keys (see [`crate::ast::RESERVED_KEYS`]) never produce rows. Anything that is not
//! a node, at the root or inside a list, becomes an inert literal row.

use super::node_id::NodeId;
use crate::ast::{TreeNode, Value};
use std::collections::HashSet;

/// Which nodes are expanded. The root is expanded unless the user collapses it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineState {
    expanded_nodes: HashSet<NodeId>,
}

impl OutlineState {
    pub fn new() -> Self {
        let mut expanded_nodes = HashSet::new();
        expanded_nodes.insert(NodeId::root());
        OutlineState { expanded_nodes }
    }

    /// Back to the initial state: only the root expanded
    pub fn reset(&mut self) {
        *self = OutlineState::new();
    }

    pub fn is_expanded(&self, node_id: &NodeId) -> bool {
        self.expanded_nodes.contains(node_id)
    }

    pub fn toggle(&mut self, node_id: &NodeId) {
        if !self.expanded_nodes.remove(node_id) {
            self.expanded_nodes.insert(node_id.clone());
        }
    }

    pub fn expand(&mut self, node_id: &NodeId) {
        self.expanded_nodes.insert(node_id.clone());
    }

    pub fn collapse(&mut self, node_id: &NodeId) {
        self.expanded_nodes.remove(node_id);
    }

    /// Expand every node of a tree
    pub fn expand_all(&mut self, root: &Value) {
        if let Value::Node(node) = root {
            self.expand_all_recursive(node, &NodeId::root());
        }
    }

    fn expand_all_recursive(&mut self, node: &TreeNode, node_id: &NodeId) {
        self.expanded_nodes.insert(node_id.clone());
        for (index, _, value) in node.visible_attributes() {
            match value {
                Value::Node(child) => self.expand_all_recursive(child, &node_id.child(index)),
                Value::List(items) => {
                    for (item_index, item) in items.iter().enumerate() {
                        if let Value::Node(child) = item {
                            let child_id = node_id.child(index).child(item_index);
                            self.expand_all_recursive(child, &child_id);
                        }
                    }
                }
                _ => {}
            }
        }
    }
}

impl Default for OutlineState {
    fn default() -> Self {
        Self::new()
    }
}

/// Header of a node row
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRow {
    pub node_id: NodeId,
    pub kind: String,
    /// The `name` attribute, when it is a primitive
    pub name: Option<String>,
    /// The `value` attribute as a literal, when it is a primitive
    pub value: Option<String>,
    /// Other primitive fields, shown inline on nodes that cannot expand
    pub details: Vec<(String, String)>,
    pub has_children: bool,
    pub is_expanded: bool,
    pub has_range: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowKind {
    Node(NodeRow),
    /// `key: literal`
    Field { key: String, literal: String },
    /// `key: [N items]`
    Summary { key: String, count: usize },
    /// `key:` heading a nested node
    Label { key: String },
    /// A value that is not a node, shown verbatim
    Literal { text: String },
}

/// One line of the outline
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineRow {
    pub depth: usize,
    pub kind: RowKind,
}

impl OutlineRow {
    pub fn node(&self) -> Option<&NodeRow> {
        match &self.kind {
            RowKind::Node(node) => Some(node),
            _ => None,
        }
    }
}

/// Flatten a tree into visible rows
pub fn flatten(root: &Value, state: &OutlineState) -> Vec<OutlineRow> {
    let mut rows = Vec::new();
    push_value(root, &NodeId::root(), 0, state, &mut rows);
    rows
}

fn push_value(
    value: &Value,
    node_id: &NodeId,
    depth: usize,
    state: &OutlineState,
    rows: &mut Vec<OutlineRow>,
) {
    match value {
        Value::Node(node) => push_node(node, node_id, depth, state, rows),
        other => rows.push(OutlineRow {
            depth,
            kind: RowKind::Literal {
                text: other.literal(),
            },
        }),
    }
}

fn push_node(
    node: &TreeNode,
    node_id: &NodeId,
    depth: usize,
    state: &OutlineState,
    rows: &mut Vec<OutlineRow>,
) {
    let has_children = node.has_children();
    let is_expanded = has_children && state.is_expanded(node_id);

    rows.push(OutlineRow {
        depth,
        kind: RowKind::Node(node_header(node, node_id, has_children, is_expanded)),
    });

    if !is_expanded {
        return;
    }

    let attr_depth = depth + 1;
    for (index, key, value) in node.visible_attributes() {
        let child_id = node_id.child(index);
        match value {
            Value::Null => {}
            Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Opaque(_) => {
                rows.push(OutlineRow {
                    depth: attr_depth,
                    kind: RowKind::Field {
                        key: key.to_string(),
                        literal: value.literal(),
                    },
                })
            }
            Value::List(items) if items.is_empty() => {}
            Value::List(items) => {
                rows.push(OutlineRow {
                    depth: attr_depth,
                    kind: RowKind::Summary {
                        key: key.to_string(),
                        count: items.len(),
                    },
                });
                for (item_index, item) in items.iter().enumerate() {
                    push_value(item, &child_id.child(item_index), attr_depth + 1, state, rows);
                }
            }
            Value::Node(child) => {
                rows.push(OutlineRow {
                    depth: attr_depth,
                    kind: RowKind::Label {
                        key: key.to_string(),
                    },
                });
                push_node(child, &child_id, attr_depth + 1, state, rows);
            }
        }
    }
}

fn node_header(
    node: &TreeNode,
    node_id: &NodeId,
    has_children: bool,
    is_expanded: bool,
) -> NodeRow {
    let value = node
        .attr("value")
        .filter(|v| v.is_primitive())
        .map(Value::literal);

    let details = if has_children {
        Vec::new()
    } else {
        node.visible_attributes()
            .filter(|(_, key, value)| *key != "name" && *key != "value" && value.is_primitive())
            .map(|(_, key, value)| (key.to_string(), value.literal()))
            .collect()
    };

    NodeRow {
        node_id: node_id.clone(),
        kind: node.kind().to_string(),
        name: node.name(),
        value,
        details,
        has_children,
        is_expanded,
        has_range: node.source_range().is_some(),
    }
}
