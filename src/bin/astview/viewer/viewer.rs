//! Viewer trait and event types
//!
//! The Viewer trait defines a common interface for UI components that:
//! - Render themselves given the controller and an area
//! - Handle keyboard input and return events
//!
//! This abstraction allows the TreeViewer and the FileViewer to be treated uniformly by the
//! main App.

use astview::host::Controller;
use astview::presenter::{NodeId, OutlineEvent};
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;

/// Events that can be emitted by viewers
///
/// These represent controller changes that should be applied after handling input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEvent {
    /// Select a tree node (and highlight its source range)
    SelectNode(NodeId),
    /// Toggle whether a node is expanded
    ToggleNodeExpansion(NodeId),
    /// The source text was edited
    ReplaceSource(String),
    /// No change to the controller
    NoChange,
}

impl From<OutlineEvent> for ViewerEvent {
    fn from(event: OutlineEvent) -> Self {
        match event {
            OutlineEvent::Toggle(node_id) => ViewerEvent::ToggleNodeExpansion(node_id),
            OutlineEvent::Select(node_id) => ViewerEvent::SelectNode(node_id),
        }
    }
}

/// Trait for UI viewers
pub trait Viewer {
    /// Render this viewer to the given area
    fn render(&self, frame: &mut Frame, area: Rect, controller: &Controller, focused: bool);

    /// Handle a keyboard event and return the resulting event
    fn handle_key(&mut self, key: KeyEvent, controller: &Controller) -> Option<ViewerEvent>;
}

/// First visible line so that `cursor` stays inside a viewport of `height` lines
pub fn scroll_offset(cursor: usize, height: usize) -> usize {
    if height == 0 {
        0
    } else {
        cursor.saturating_sub(height - 1)
    }
}
