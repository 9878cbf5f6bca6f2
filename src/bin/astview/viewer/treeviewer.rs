//! Tree viewer - displays and navigates the outline
//!
//! Shows the controller's outline rows. A cursor moves over node rows only; field, summary and
//! label rows are skipped. Moving the cursor selects the node under it, so the source pane
//! follows along.

use super::viewer::{scroll_offset, Viewer, ViewerEvent};
use astview::host::Controller;
use astview::presenter::{hit_test, render_row, OutlineRow};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

#[derive(Debug, Default)]
pub struct TreeViewer {
    /// Index into the outline rows
    cursor: usize,
}

impl TreeViewer {
    pub fn new() -> Self {
        TreeViewer { cursor: 0 }
    }

    #[cfg(test)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Back to the first row, after a new analysis
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Keep the cursor inside `row_count` rows
    pub fn clamp(&mut self, row_count: usize) {
        self.cursor = self.cursor.min(row_count.saturating_sub(1));
    }

    fn next_node_row(&self, rows: &[OutlineRow]) -> Option<usize> {
        (self.cursor + 1..rows.len()).find(|&i| rows[i].node().is_some())
    }

    fn previous_node_row(&self, rows: &[OutlineRow]) -> Option<usize> {
        (0..self.cursor.min(rows.len())).rev().find(|&i| rows[i].node().is_some())
    }

    fn move_to(&mut self, index: usize, rows: &[OutlineRow]) -> Option<ViewerEvent> {
        self.cursor = index;
        rows[index]
            .node()
            .map(|node| ViewerEvent::SelectNode(node.node_id.clone()))
    }

    /// Handle a click inside the tree area. `row` and `column` are relative to the area.
    pub fn handle_click(
        &mut self,
        row: usize,
        column: usize,
        height: usize,
        controller: &Controller,
    ) -> Option<ViewerEvent> {
        let rows = controller.rows();
        let index = scroll_offset(self.cursor, height) + row;
        let event = hit_test(&rows, index, column)?;
        self.cursor = index;
        Some(event.into())
    }
}

impl Viewer for TreeViewer {
    fn render(&self, frame: &mut Frame, area: Rect, controller: &Controller, focused: bool) {
        if controller.result().is_none() {
            let (text, style) = match controller.message() {
                Some(message) => (message.to_string(), Style::default().fg(Color::Red)),
                None => (
                    controller.placeholder(),
                    Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
                ),
            };
            let paragraph = Paragraph::new(text)
                .style(style)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }

        let rows = controller.rows();
        let height = area.height as usize;
        let width = area.width as usize;
        let first = scroll_offset(self.cursor, height);

        let lines: Vec<Line> = rows
            .iter()
            .enumerate()
            .skip(first)
            .take(height)
            .map(|(index, row)| {
                let text: String = render_row(row).chars().take(width).collect();

                let is_collapsed = row
                    .node()
                    .is_some_and(|node| node.has_children && !node.is_expanded);
                let is_cursor = index == self.cursor;

                if is_cursor && focused {
                    Line::from(text).style(
                        Style::default()
                            .bg(Color::Blue)
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if is_cursor {
                    Line::from(text).style(Style::default().add_modifier(Modifier::UNDERLINED))
                } else if is_collapsed {
                    Line::from(text).style(Style::default().fg(Color::Gray))
                } else if row.node().is_none() {
                    Line::from(text).style(Style::default().fg(Color::DarkGray))
                } else {
                    Line::from(text)
                }
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn handle_key(&mut self, key: KeyEvent, controller: &Controller) -> Option<ViewerEvent> {
        let rows = controller.rows();
        if rows.is_empty() {
            return Some(ViewerEvent::NoChange);
        }
        self.clamp(rows.len());

        let current = rows[self.cursor].node().map(|node| node.node_id.clone());

        match key.code {
            KeyCode::Up => match self.previous_node_row(&rows) {
                Some(index) => self.move_to(index, &rows),
                None => Some(ViewerEvent::NoChange),
            },
            KeyCode::Down => match self.next_node_row(&rows) {
                Some(index) => self.move_to(index, &rows),
                None => Some(ViewerEvent::NoChange),
            },
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
                current.map(ViewerEvent::ToggleNodeExpansion)
            }
            KeyCode::Enter => current.map(ViewerEvent::SelectNode),
            _ => Some(ViewerEvent::NoChange),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use astview::host::Language;
    use astview::presenter::NodeId;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn analyzed(source: &str) -> Controller {
        let mut controller = Controller::new(Language::Python);
        controller.set_source(source);
        controller.analyze().expect("toy analysis never fails on non-blank input");
        controller
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_down_skips_non_node_rows() {
        let controller = analyzed("x = 1\ny = 2");
        let mut viewer = TreeViewer::new();

        // row 1 is the body summary; the first step lands on the first statement
        let event = viewer.handle_key(key(KeyCode::Down), &controller);
        assert_eq!(event, Some(ViewerEvent::SelectNode(NodeId::new(&[0, 0]))));
        assert_eq!(viewer.cursor(), 2);

        let event = viewer.handle_key(key(KeyCode::Up), &controller);
        assert_eq!(event, Some(ViewerEvent::SelectNode(NodeId::root())));
        assert_eq!(viewer.cursor(), 0);
    }

    #[test]
    fn test_right_toggles_current_node() {
        let controller = analyzed("def f(a):");
        let mut viewer = TreeViewer::new();
        viewer.handle_key(key(KeyCode::Down), &controller);

        let event = viewer.handle_key(key(KeyCode::Right), &controller);
        assert_eq!(
            event,
            Some(ViewerEvent::ToggleNodeExpansion(NodeId::new(&[0, 0])))
        );
    }

    #[test]
    fn test_click_on_disclosure() {
        let controller = analyzed("def f(a):");
        let mut viewer = TreeViewer::new();

        let event = viewer.handle_click(2, 4, 10, &controller);
        assert_eq!(
            event,
            Some(ViewerEvent::ToggleNodeExpansion(NodeId::new(&[0, 0])))
        );
        assert_eq!(viewer.cursor(), 2);

        assert_eq!(viewer.handle_click(1, 4, 10, &controller), None);
    }

    #[test]
    fn test_long_rows_are_truncated() {
        let name = "a".repeat(80);
        let controller = analyzed(&format!("def {name}():"));
        let viewer = TreeViewer::new();

        let mut terminal = Terminal::new(TestBackend::new(30, 5)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                viewer.render(frame, area, &controller, true);
            })
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let mut line = String::new();
        for x in 0..30 {
            line.push_str(buffer.cell((x, 2)).unwrap().symbol());
        }
        assert!(line.starts_with("    ▸ [function-definition] aa"));
    }

    #[test]
    fn test_placeholder_without_result() {
        let controller = Controller::new(Language::C);
        let viewer = TreeViewer::new();

        let mut terminal = Terminal::new(TestBackend::new(60, 3)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                viewer.render(frame, area, &controller, false);
            })
            .unwrap();

        let buffer = terminal.backend().buffer().clone();
        let mut line = String::new();
        for x in 0..60 {
            line.push_str(buffer.cell((x, 0)).unwrap().symbol());
        }
        assert!(line.contains("Parse your C code"));
    }
}
