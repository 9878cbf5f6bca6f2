//! UI rendering logic
//!
//! Handles layout and rendering of the application using Ratatui.
//! Layout structure:
//! - Title bar (1 line, fixed)
//! - Middle section (responsive height):
//!   - Tree viewer (configurable width)
//!   - Source viewer (remaining space)
//! - Status line (1 line, fixed)

use super::app::{App, Focus};
use super::viewer::Viewer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// Height of the status line
const STATUS_LINE_HEIGHT: u16 = 1;

const KEY_HINTS: &str = "Tab focus | p parse | r reset | l language | q quit";

/// Pane sizes, taken from the `[viewer]` config section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    pub tree_width: u16,
    pub min_width: u16,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            tree_width: 40,
            min_width: 50,
        }
    }
}

/// Where everything goes for a given terminal area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneLayout {
    pub title: Rect,
    pub tree: Rect,
    /// The tree pane without its border
    pub tree_inner: Rect,
    pub file: Rect,
    pub file_inner: Rect,
    pub status: Rect,
}

/// Split the terminal area into panes. None when the terminal is too narrow.
pub fn pane_layout(area: Rect, options: &LayoutOptions) -> Option<PaneLayout> {
    if area.width < options.min_width {
        return None;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                  // Title bar
            Constraint::Min(1),                     // Middle (tree|file)
            Constraint::Length(STATUS_LINE_HEIGHT), // Status line
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(options.tree_width), Constraint::Min(1)])
        .split(rows[1]);

    let border = Block::default().borders(Borders::ALL);
    Some(PaneLayout {
        title: rows[0],
        tree: columns[0],
        tree_inner: border.inner(columns[0]),
        file: columns[1],
        file_inner: border.inner(columns[1]),
        status: rows[2],
    })
}

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();

    let Some(panes) = pane_layout(size, &app.layout) else {
        render_error_too_narrow(frame, size, app.layout.min_width);
        return;
    };

    render_title_bar(frame, panes.title, app);
    render_tree_viewer(frame, &panes, app);
    render_file_viewer(frame, &panes, app);
    render_status_line(frame, panes.status, app);
}

fn render_error_too_narrow(frame: &mut Frame, area: Rect, min_width: u16) {
    let msg = format!("Terminal too narrow: {} < {} chars", area.width, min_width);
    let paragraph =
        Paragraph::new(msg).style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD));
    frame.render_widget(paragraph, area);
}

fn render_title_bar(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(
        "astview:: {} [{}]",
        app.title,
        app.controller.language().label()
    );
    let paragraph = Paragraph::new(title).style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_widget(paragraph, area);
}

fn pane_block(name: &str, focused: bool) -> Block<'static> {
    let title = if focused {
        format!("{name} [FOCUSED]")
    } else {
        name.to_string()
    };
    Block::default().borders(Borders::ALL).title(title)
}

fn render_tree_viewer(frame: &mut Frame, panes: &PaneLayout, app: &App) {
    let focused = app.focus == Focus::TreeViewer;
    frame.render_widget(pane_block("Tree", focused), panes.tree);
    app.tree_viewer
        .render(frame, panes.tree_inner, &app.controller, focused);
}

fn render_file_viewer(frame: &mut Frame, panes: &PaneLayout, app: &App) {
    let focused = app.focus == Focus::FileViewer;
    frame.render_widget(pane_block("Source", focused), panes.file);
    app.file_viewer
        .render(frame, panes.file_inner, &app.controller, focused);
}

fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let controller = &app.controller;
    let mut spans = vec![Span::styled(
        controller.language().label(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    spans.push(Span::raw(" | "));

    match (controller.message(), controller.highlight()) {
        (Some(message), _) => {
            spans.push(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Red),
            ));
        }
        (None, Some(range)) => {
            spans.push(Span::styled("Range: ", Style::default().fg(Color::Yellow)));
            spans.push(Span::raw(range.to_string()));
        }
        (None, None) => spans.push(Span::raw(KEY_HINTS)),
    }

    let paragraph =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black).fg(Color::White));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_at_80_columns() {
        let panes = pane_layout(Rect::new(0, 0, 80, 24), &LayoutOptions::default()).unwrap();
        assert_eq!(panes.title, Rect::new(0, 0, 80, 1));
        assert_eq!(panes.tree, Rect::new(0, 1, 40, 22));
        assert_eq!(panes.tree_inner, Rect::new(1, 2, 38, 20));
        assert_eq!(panes.file.x, 40);
        assert_eq!(panes.status, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn test_layout_too_narrow() {
        assert!(pane_layout(Rect::new(0, 0, 49, 24), &LayoutOptions::default()).is_none());
    }
}
