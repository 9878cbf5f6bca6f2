//! Main application state and event handling
//!
//! The App struct brings together:
//! - Controller (language, source, result, highlight and outline state)
//! - FileViewer and TreeViewer (the UI components)
//! - Focus management (which viewer has keyboard focus)
//! - Global key handling (quit, focus switching, analysis, language cycling)

use super::fileviewer::FileViewer;
use super::treeviewer::TreeViewer;
use super::ui::{pane_layout, LayoutOptions};
use super::viewer::{Viewer, ViewerEvent};
use astview::host::Controller;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::debug;

/// Which viewer has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    TreeViewer,
    FileViewer,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::TreeViewer => Focus::FileViewer,
            Focus::FileViewer => Focus::TreeViewer,
        }
    }
}

pub struct App {
    pub controller: Controller,
    pub file_viewer: FileViewer,
    pub tree_viewer: TreeViewer,
    pub focus: Focus,
    pub should_quit: bool,
    pub layout: LayoutOptions,
    /// Title shown in the title bar (usually the file name)
    pub title: String,
    /// Last drawn terminal area, for mouse hit testing
    viewport: Rect,
}

impl App {
    pub fn new(controller: Controller, layout: LayoutOptions, title: impl Into<String>) -> Self {
        App {
            controller,
            file_viewer: FileViewer::new(),
            tree_viewer: TreeViewer::new(),
            focus: Focus::default(),
            should_quit: false,
            layout,
            title: title.into(),
            viewport: Rect::default(),
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
    }

    pub fn set_viewport(&mut self, area: Rect) {
        self.viewport = area;
    }

    /// Run an analysis of the current source. Failures end up in the controller's message.
    pub fn analyze(&mut self) {
        if let Err(err) = self.controller.analyze() {
            debug!(error = %err, "analysis reported a failure");
        }
        self.tree_viewer.reset();
    }

    pub fn next_language(&mut self) {
        let language = self.controller.language().next();
        self.controller.set_language(language);
        self.tree_viewer.reset();
        self.file_viewer.reset();
    }

    pub fn reset(&mut self) {
        self.controller.reset();
        self.tree_viewer.reset();
        self.file_viewer.reset();
    }

    /// Handle a keyboard event
    ///
    /// Returns whether the state changed (needed for re-rendering)
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return true;
            }
            KeyCode::Tab => {
                self.toggle_focus();
                return true;
            }
            KeyCode::F(5) => {
                self.analyze();
                return true;
            }
            _ => {}
        }

        // Plain letters are commands in the tree pane and text in the source pane
        if self.focus == Focus::TreeViewer && key.modifiers.is_empty() {
            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return true;
                }
                KeyCode::Char('p') => {
                    self.analyze();
                    return true;
                }
                KeyCode::Char('r') => {
                    self.reset();
                    return true;
                }
                KeyCode::Char('l') => {
                    self.next_language();
                    return true;
                }
                _ => {}
            }
        }
        if self.focus == Focus::FileViewer && key.code == KeyCode::Esc {
            self.focus = Focus::TreeViewer;
            return true;
        }

        let event = match self.focus {
            Focus::FileViewer => self.file_viewer.handle_key(key, &self.controller),
            Focus::TreeViewer => self.tree_viewer.handle_key(key, &self.controller),
        };

        match event {
            Some(event) => self.process_viewer_event(event),
            None => false,
        }
    }

    /// Handle a mouse event. Left clicks focus the pane under the pointer; in the tree pane they
    /// also toggle or select.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
            return false;
        };
        let Some(panes) = pane_layout(self.viewport, &self.layout) else {
            return false;
        };

        let inside = |area: Rect| {
            mouse.column >= area.x
                && mouse.column < area.x + area.width
                && mouse.row >= area.y
                && mouse.row < area.y + area.height
        };

        if inside(panes.tree_inner) {
            self.focus = Focus::TreeViewer;
            let row = (mouse.row - panes.tree_inner.y) as usize;
            let column = (mouse.column - panes.tree_inner.x) as usize;
            let height = panes.tree_inner.height as usize;
            if let Some(event) =
                self.tree_viewer
                    .handle_click(row, column, height, &self.controller)
            {
                self.process_viewer_event(event);
            }
            true
        } else if inside(panes.file) {
            self.focus = Focus::FileViewer;
            true
        } else {
            false
        }
    }

    fn process_viewer_event(&mut self, event: ViewerEvent) -> bool {
        match event {
            ViewerEvent::SelectNode(node_id) => {
                self.controller.select(&node_id);
                if let Some(range) = self.controller.highlight() {
                    self.file_viewer
                        .sync_cursor_to_offset(self.controller.source(), range.start);
                }
                true
            }
            ViewerEvent::ToggleNodeExpansion(node_id) => {
                self.controller.toggle(&node_id);
                self.tree_viewer.clamp(self.controller.rows().len());
                true
            }
            ViewerEvent::ReplaceSource(source) => {
                self.controller.set_source(source);
                true
            }
            ViewerEvent::NoChange => false,
        }
    }
}
