//! File viewer - displays and edits the source text
//!
//! The file viewer shows the controller's source with the highlight range marked. When focused
//! it has a cursor; arrow keys move it and printable keys edit the text. Every edit produces the
//! whole new text as a ReplaceSource event, leaving the controller as the single owner of the
//! source.

use super::viewer::{scroll_offset, Viewer, ViewerEvent};
use astview::ast::{SourceLocation, SourceRange};
use astview::host::Controller;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Cursor position and scrolling for the source pane
#[derive(Debug, Default)]
pub struct FileViewer {
    /// Current cursor row (0-indexed)
    cursor_row: usize,
    /// Current cursor column, in chars (0-indexed)
    cursor_col: usize,
}

impl FileViewer {
    pub fn new() -> Self {
        FileViewer {
            cursor_row: 0,
            cursor_col: 0,
        }
    }

    #[cfg(test)]
    pub fn cursor_position(&self) -> (usize, usize) {
        (self.cursor_row, self.cursor_col)
    }

    pub fn reset(&mut self) {
        self.cursor_row = 0;
        self.cursor_col = 0;
    }

    /// Move the cursor to a byte offset, e.g. the start of the highlight
    pub fn sync_cursor_to_offset(&mut self, source: &str, offset: usize) {
        let position = SourceLocation::new(source).byte_to_position(offset);
        let line = source_lines(source)
            .nth(position.line)
            .unwrap_or_default();
        self.cursor_row = position.line;
        self.cursor_col = line
            .get(..position.column)
            .map_or(0, |prefix| prefix.chars().count());
    }

    /// Byte offset of the cursor in `source`
    fn cursor_offset(&self, source: &str) -> usize {
        let location = SourceLocation::new(source);
        let Some(line_start) = location.line_start(self.cursor_row) else {
            return source.len();
        };
        let line = source_lines(source)
            .nth(self.cursor_row)
            .unwrap_or_default();
        let column = line
            .char_indices()
            .nth(self.cursor_col)
            .map_or(line.len(), |(byte, _)| byte);
        line_start + column
    }

    fn clamp_cursor(&mut self, source: &str) {
        let line_count = source_lines(source).count();
        self.cursor_row = self.cursor_row.min(line_count.saturating_sub(1));
        let line_len = source_lines(source)
            .nth(self.cursor_row)
            .map_or(0, |line| line.chars().count());
        self.cursor_col = self.cursor_col.min(line_len);
    }

    fn insert(&mut self, source: &str, text: char) -> String {
        let offset = self.cursor_offset(source);
        let mut edited = String::with_capacity(source.len() + text.len_utf8());
        edited.push_str(&source[..offset]);
        edited.push(text);
        edited.push_str(&source[offset..]);

        if text == '\n' {
            self.cursor_row += 1;
            self.cursor_col = 0;
        } else {
            self.cursor_col += 1;
        }
        edited
    }

    fn delete_backward(&mut self, source: &str) -> Option<String> {
        let offset = self.cursor_offset(source);
        let removed = source[..offset].chars().next_back()?;
        let start = offset - removed.len_utf8();

        if removed == '\n' {
            self.cursor_row -= 1;
            self.cursor_col = source_lines(source)
                .nth(self.cursor_row)
                .map_or(0, |line| line.chars().count());
        } else {
            self.cursor_col -= 1;
        }
        Some(format!("{}{}", &source[..start], &source[offset..]))
    }

    fn delete_forward(&self, source: &str) -> Option<String> {
        let offset = self.cursor_offset(source);
        let removed = source[offset..].chars().next()?;
        let end = offset + removed.len_utf8();
        Some(format!("{}{}", &source[..offset], &source[end..]))
    }
}

/// Lines split on `\n` only, matching how [`SourceLocation`] counts them
fn source_lines(source: &str) -> impl Iterator<Item = &str> {
    source.split('\n')
}

/// Largest char boundary of `text` at or below `index`
fn floor_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Split a line into the text before, inside and after the highlighted byte columns
fn highlighted_line<'a>(
    text: &'a str,
    location: &SourceLocation,
    highlight: Option<&SourceRange>,
    line: usize,
) -> Line<'a> {
    let highlight_style = Style::default().bg(Color::Yellow).fg(Color::Black);

    let Some(columns) = highlight.and_then(|range| location.line_columns(range, line, text.len()))
    else {
        return Line::from(text);
    };

    let start = floor_boundary(text, columns.start);
    let end = floor_boundary(text, columns.end);
    Line::from(vec![
        Span::raw(&text[..start]),
        Span::styled(&text[start..end], highlight_style),
        Span::raw(&text[end..]),
    ])
}

impl Viewer for FileViewer {
    fn render(&self, frame: &mut Frame, area: Rect, controller: &Controller, focused: bool) {
        let source = controller.source();
        let location = SourceLocation::new(source);
        let highlight = controller.highlight();
        let height = area.height as usize;
        let first = scroll_offset(self.cursor_row, height);

        let lines: Vec<Line> = source_lines(source)
            .enumerate()
            .skip(first)
            .take(height)
            .map(|(row, text)| {
                let line = highlighted_line(text, &location, highlight.as_ref(), row);
                if focused && row == self.cursor_row {
                    with_cursor(line, self.cursor_col)
                } else {
                    line
                }
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn handle_key(&mut self, key: KeyEvent, controller: &Controller) -> Option<ViewerEvent> {
        let source = controller.source();
        self.clamp_cursor(source);

        match key.code {
            KeyCode::Up => {
                self.cursor_row = self.cursor_row.saturating_sub(1);
                self.clamp_cursor(source);
                Some(ViewerEvent::NoChange)
            }
            KeyCode::Down => {
                self.cursor_row += 1;
                self.clamp_cursor(source);
                Some(ViewerEvent::NoChange)
            }
            KeyCode::Left => {
                self.cursor_col = self.cursor_col.saturating_sub(1);
                Some(ViewerEvent::NoChange)
            }
            KeyCode::Right => {
                self.cursor_col += 1;
                self.clamp_cursor(source);
                Some(ViewerEvent::NoChange)
            }
            KeyCode::Home => {
                self.cursor_col = 0;
                Some(ViewerEvent::NoChange)
            }
            KeyCode::End => {
                self.cursor_col = usize::MAX;
                self.clamp_cursor(source);
                Some(ViewerEvent::NoChange)
            }
            KeyCode::Enter => Some(ViewerEvent::ReplaceSource(self.insert(source, '\n'))),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(ViewerEvent::ReplaceSource(self.insert(source, c)))
            }
            KeyCode::Backspace => Some(
                self.delete_backward(source)
                    .map_or(ViewerEvent::NoChange, ViewerEvent::ReplaceSource),
            ),
            KeyCode::Delete => Some(
                self.delete_forward(source)
                    .map_or(ViewerEvent::NoChange, ViewerEvent::ReplaceSource),
            ),
            _ => Some(ViewerEvent::NoChange),
        }
    }
}

/// Mark the char at `column` (or the end of the line) as the cursor
fn with_cursor(line: Line<'_>, column: usize) -> Line<'static> {
    let cursor_style = Style::default().add_modifier(Modifier::REVERSED);
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut seen = 0;

    for span in line.spans {
        for ch in span.content.chars() {
            let style = if seen == column {
                span.style.patch(cursor_style)
            } else {
                span.style
            };
            spans.push(Span::styled(ch.to_string(), style));
            seen += 1;
        }
    }
    if column >= seen {
        spans.push(Span::styled(" ", cursor_style));
    }
    Line::from(spans)
}
