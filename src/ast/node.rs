//! Tree node definition
//!
//! A [`TreeNode`] is a tagged record: a mandatory, non-empty `kind` plus an ordered list of named
//! attributes. Attribute order is kept for display, but two nodes with the same attributes in a
//! different order compare equal.

use super::range::SourceRange;
use super::value::Value;

/// Keys used for bookkeeping by parsers. They are never shown as attributes.
pub const RESERVED_KEYS: &[&str] = &["type", "start", "end", "loc"];

pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Ordered attribute map, insertion order preserved
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    entries: Vec<(String, Value)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Entry at a given position (positions are what node paths index into)
    pub fn get_index(&self, index: usize) -> Option<(&str, &Value)> {
        self.entries.get(index).map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for Attributes {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|v| v == value))
    }
}

/// A node in a syntax tree
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    kind: String,
    attributes: Attributes,
    source_range: Option<SourceRange>,
}

impl TreeNode {
    /// Create a node with no attributes.
    ///
    /// `kind` must not be empty; use [`TreeNode::try_new`] for untrusted input.
    pub fn new(kind: impl Into<String>) -> Self {
        let kind = kind.into();
        debug_assert!(!kind.is_empty(), "node kind must not be empty");
        TreeNode {
            kind,
            attributes: Attributes::new(),
            source_range: None,
        }
    }

    /// Create a node, or None if `kind` is empty
    pub fn try_new(kind: impl Into<String>) -> Option<Self> {
        let kind = kind.into();
        if kind.is_empty() {
            None
        } else {
            Some(TreeNode::new(kind))
        }
    }

    /// Builder-style attribute insertion
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key, value.into());
        self
    }

    pub fn with_range(mut self, range: SourceRange) -> Self {
        self.source_range = Some(range);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key, value.into());
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn source_range(&self) -> Option<SourceRange> {
        self.source_range
    }

    /// Attributes that are shown to users, with their positions
    pub fn visible_attributes(&self) -> impl Iterator<Item = (usize, &str, &Value)> {
        self.attributes
            .iter()
            .enumerate()
            .filter(|(_, (key, _))| !is_reserved_key(key))
            .map(|(index, (key, value))| (index, key, value))
    }

    /// True iff a visible attribute holds a nested node or a non-empty list
    pub fn has_children(&self) -> bool {
        self.visible_attributes()
            .any(|(_, _, value)| value.is_expandable())
    }

    /// The `name` attribute, when it is a non-empty primitive
    pub fn name(&self) -> Option<String> {
        match self.attr("name")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_new_rejects_empty_kind() {
        assert!(TreeNode::try_new("").is_none());
        assert_eq!(TreeNode::try_new("call").unwrap().kind(), "call");
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut node = TreeNode::new("assignment")
            .with("target", "x")
            .with("value", "1");
        node.insert("target", "y");

        let keys: Vec<&str> = node.attributes().keys().collect();
        assert_eq!(keys, vec!["target", "value"]);
        assert_eq!(node.attr("target"), Some(&Value::from("y")));
    }

    #[test]
    fn test_equality_ignores_attribute_order() {
        let a = TreeNode::new("assignment")
            .with("target", "x")
            .with("value", "1");
        let b = TreeNode::new("assignment")
            .with("value", "1")
            .with("target", "x");
        assert_eq!(a, b);

        let c = TreeNode::new("assignment").with("target", "x");
        assert_ne!(a, c);
    }

    #[test]
    fn test_has_children() {
        let leaf = TreeNode::new("identifier-reference").with("name", "n");
        assert!(!leaf.has_children());

        let empty_body = TreeNode::new("module").with("body", Value::List(vec![]));
        assert!(!empty_body.has_children());

        let with_body =
            TreeNode::new("module").with("body", vec![Value::from(TreeNode::new("no-op"))]);
        assert!(with_body.has_children());

        let nested = TreeNode::new("return").with("value", TreeNode::new("identifier-reference"));
        assert!(nested.has_children());
    }

    #[test]
    fn test_reserved_keys_do_not_count_as_children() {
        let node = TreeNode::new("Identifier").with("loc", TreeNode::new("SourceLocation"));
        assert!(!node.has_children());
        assert_eq!(node.visible_attributes().count(), 0);
    }

    #[test]
    fn test_name_only_for_primitives() {
        assert_eq!(
            TreeNode::new("call").with("name", "print").name(),
            Some("print".to_string())
        );
        assert_eq!(TreeNode::new("call").with("name", "").name(), None);
        assert_eq!(
            TreeNode::new("call")
                .with("name", TreeNode::new("identifier-reference"))
                .name(),
            None
        );
    }
}
