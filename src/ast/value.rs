//! Attribute values
//!
//! [`Value`] is the closed set of shapes an attribute can take. Anything coming from an external
//! parser that is an object but not a valid node ends up as [`Value::Opaque`], which is shown as
//! an inert literal instead of being expanded.

use super::node::TreeNode;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value. Never rendered.
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Node(TreeNode),
    /// Ordered sequence. Items that are not nodes render as literals.
    List(Vec<Value>),
    /// An object that failed node validation, kept verbatim
    Opaque(serde_json::Value),
}

impl Value {
    pub fn is_primitive(&self) -> bool {
        matches!(self, Value::Bool(_) | Value::Number(_) | Value::String(_))
    }

    /// Whether this value makes its owning node expandable
    pub fn is_expandable(&self) -> bool {
        match self {
            Value::Node(_) => true,
            Value::List(items) => !items.is_empty(),
            _ => false,
        }
    }

    pub fn as_node(&self) -> Option<&TreeNode> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Compact JSON text for this value, as shown for inline literals
    pub fn literal(&self) -> String {
        match self {
            Value::Null => "null".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            Value::String(s) => serde_json::Value::String(s.clone()).to_string(),
            Value::Opaque(json) => json.to_string(),
            Value::Node(_) | Value::List(_) => {
                serde_json::to_string(self).unwrap_or_else(|_| "null".to_string())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<TreeNode> for Value {
    fn from(node: TreeNode) -> Self {
        Value::Node(node)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Vec<TreeNode>> for Value {
    fn from(nodes: Vec<TreeNode>) -> Self {
        Value::List(nodes.into_iter().map(Value::Node).collect())
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items.into_iter().map(Value::String).collect())
    }
}
