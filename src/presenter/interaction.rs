//! Outline interaction
//!
//! Two things can happen to a node row: its disclosure glyph is clicked, which toggles
//! expansion, or the rest of the row is clicked, which selects the node. The two never mix: a
//! toggle does not select, and a selection does not touch expansion.

use super::node_id::{resolve_node, NodeId};
use super::outline::{OutlineRow, OutlineState, RowKind};
use super::render::{indent_columns, DISCLOSURE_WIDTH};
use crate::ast::{TreeNode, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineEvent {
    /// Flip a node between expanded and collapsed
    Toggle(NodeId),
    /// Select a node, usually to highlight its source range
    Select(NodeId),
}

/// Map a click at `column` on row `row_index` to an event.
///
/// Clicks on the disclosure column of an expandable node toggle it; any other click on a node
/// row selects. Clicks on field, summary, label and literal rows do nothing.
pub fn hit_test(rows: &[OutlineRow], row_index: usize, column: usize) -> Option<OutlineEvent> {
    let row = rows.get(row_index)?;
    let RowKind::Node(node) = &row.kind else {
        return None;
    };

    let disclosure_start = indent_columns(row);
    let on_disclosure =
        column >= disclosure_start && column < disclosure_start + DISCLOSURE_WIDTH;

    if on_disclosure && node.has_children {
        Some(OutlineEvent::Toggle(node.node_id.clone()))
    } else {
        Some(OutlineEvent::Select(node.node_id.clone()))
    }
}

/// Applies outline events, reporting selections through a callback
pub struct Presenter<'a> {
    on_select: Box<dyn FnMut(&TreeNode) + 'a>,
}

impl<'a> Presenter<'a> {
    pub fn new(on_select: impl FnMut(&TreeNode) + 'a) -> Self {
        Presenter {
            on_select: Box::new(on_select),
        }
    }

    /// Apply an event. Returns whether anything happened.
    ///
    /// `Toggle` only changes `state`; `Select` only calls the callback. Events pointing at
    /// paths that no longer resolve to a node are ignored.
    pub fn apply(&mut self, event: &OutlineEvent, root: &Value, state: &mut OutlineState) -> bool {
        match event {
            OutlineEvent::Toggle(node_id) => match resolve_node(root, node_id) {
                Some(node) if node.has_children() => {
                    state.toggle(node_id);
                    true
                }
                _ => false,
            },
            OutlineEvent::Select(node_id) => match resolve_node(root, node_id) {
                Some(node) => {
                    (self.on_select)(node);
                    true
                }
                None => false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::SourceRange;
    use crate::presenter::outline::flatten;

    fn sample() -> Value {
        Value::from(
            TreeNode::new("Program")
                .with(
                    "body",
                    vec![TreeNode::new("ExpressionStatement")
                        .with("expression", TreeNode::new("Identifier").with("name", "x"))
                        .with_range(SourceRange::new(0, 2).unwrap())],
                )
                .with_range(SourceRange::new(0, 2).unwrap()),
        )
    }

    #[test]
    fn test_hit_test_disclosure_toggles() {
        let root = sample();
        let rows = flatten(&root, &OutlineState::new());
        // row 2 is the statement at depth 2: disclosure at columns 4..6
        assert_eq!(
            hit_test(&rows, 2, 4),
            Some(OutlineEvent::Toggle(NodeId::new(&[0, 0])))
        );
        assert_eq!(
            hit_test(&rows, 2, 6),
            Some(OutlineEvent::Select(NodeId::new(&[0, 0])))
        );
        assert_eq!(
            hit_test(&rows, 2, 0),
            Some(OutlineEvent::Select(NodeId::new(&[0, 0])))
        );
    }

    #[test]
    fn test_hit_test_non_node_rows() {
        let root = sample();
        let rows = flatten(&root, &OutlineState::new());
        // row 1 is the `body` summary
        assert_eq!(hit_test(&rows, 1, 3), None);
        assert_eq!(hit_test(&rows, 99, 0), None);
    }

    #[test]
    fn test_toggle_never_selects() {
        let root = sample();
        let mut state = OutlineState::new();
        let mut selected = 0;
        let mut presenter = Presenter::new(|_| selected += 1);

        assert!(presenter.apply(
            &OutlineEvent::Toggle(NodeId::new(&[0, 0])),
            &root,
            &mut state
        ));
        drop(presenter);

        assert_eq!(selected, 0);
        assert!(state.is_expanded(&NodeId::new(&[0, 0])));
    }

    #[test]
    fn test_select_never_toggles() {
        let root = sample();
        let mut state = OutlineState::new();
        let before = state.clone();
        let mut picked = Vec::new();
        let mut presenter = Presenter::new(|node: &TreeNode| picked.push(node.kind().to_string()));

        assert!(presenter.apply(
            &OutlineEvent::Select(NodeId::new(&[0, 0])),
            &root,
            &mut state
        ));
        drop(presenter);

        assert_eq!(picked, vec!["ExpressionStatement".to_string()]);
        assert_eq!(state, before);
    }

    #[test]
    fn test_toggle_on_leaf_is_ignored() {
        let root = sample();
        let mut state = OutlineState::new();
        let mut presenter = Presenter::new(|_| {});
        let leaf = NodeId::new(&[0, 0, 0]);
        assert!(!presenter.apply(&OutlineEvent::Toggle(leaf.clone()), &root, &mut state));
        assert!(!state.is_expanded(&leaf));
    }

    #[test]
    fn test_stale_paths_are_ignored() {
        let root = sample();
        let mut state = OutlineState::new();
        let mut presenter = Presenter::new(|_| panic!("nothing to select"));
        assert!(!presenter.apply(
            &OutlineEvent::Select(NodeId::new(&[7])),
            &root,
            &mut state
        ));
    }
}
