//! Stable node identity
//!
//! A [`NodeId`] is a path of indices from the root. Each step is the position of an attribute
//! in its node; stepping into a list adds one more index for the item. For example, in a
//! `module` whose first attribute is `body`, `[0, 2]` is the third statement of the body.
//!
//! Paths only depend on tree shape, so they survive re-renders. They are not meant to survive a
//! new tree: the outline state is reset whenever the tree is replaced.

use crate::ast::{TreeNode, Value};
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    path: Vec<usize>,
}

impl NodeId {
    pub fn root() -> Self {
        NodeId::default()
    }

    pub fn new(path: &[usize]) -> Self {
        NodeId {
            path: path.to_vec(),
        }
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    pub fn child(&self, index: usize) -> NodeId {
        let mut path = self.path.clone();
        path.push(index);
        NodeId { path }
    }

    pub fn parent(&self) -> Option<NodeId> {
        if self.path.is_empty() {
            None
        } else {
            Some(NodeId {
                path: self.path[..self.path.len() - 1].to_vec(),
            })
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.path.iter().map(|i| i.to_string()).collect();
        write!(f, "[{}]", parts.join("→"))
    }
}

/// Find the value a path points at. The empty path is the root itself.
pub fn resolve<'a>(root: &'a Value, id: &NodeId) -> Option<&'a Value> {
    let mut current = root;
    let mut steps = id.path().iter();

    while let Some(&attr_index) = steps.next() {
        let node = current.as_node()?;
        let (_, value) = node.attributes().get_index(attr_index)?;
        current = match value {
            Value::List(items) => items.get(*steps.next()?)?,
            other => other,
        };
    }

    Some(current)
}

/// Like [`resolve`], but only succeeds on nodes
pub fn resolve_node<'a>(root: &'a Value, id: &NodeId) -> Option<&'a TreeNode> {
    resolve(root, id).and_then(Value::as_node)
}
