//! Source ranges and byte offset to line/column conversion
//!
//! ## Types
//!
//! - [`SourceRange`] - A `{start, end}` pair of byte offsets into the source
//! - [`Position`] - A line:column position in source code
//! - [`SourceLocation`] - Utility for converting byte offsets to positions
//!
//! External parsers report byte offsets; the source view works in lines. `SourceLocation`
//! bridges the two with a binary search over line starts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range as ByteRange;

/// A `{start, end}` pair of byte offsets, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceRange {
    pub start: usize,
    pub end: usize,
}

impl SourceRange {
    /// Build a range, returning None when `start > end`
    pub fn new(start: usize, end: usize) -> Option<Self> {
        if start <= end {
            Some(Self { start, end })
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if a byte offset falls inside the range (end exclusive)
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Clamp both ends to `len`, for ranges reported against a different text
    pub fn clamp(&self, len: usize) -> SourceRange {
        SourceRange {
            start: self.start.min(len),
            end: self.end.min(len),
        }
    }

    /// The covered text, if both ends fall on char boundaries of `source`
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }

    pub fn as_byte_range(&self) -> ByteRange<usize> {
        self.start..self.end
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Represents a position in source code (line and column, both 0-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Provides fast conversion from byte offsets to line/column positions
pub struct SourceLocation {
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
    /// Total source length in bytes
    len: usize,
}

impl SourceLocation {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self {
            line_starts,
            len: source.len(),
        }
    }

    /// Convert a byte offset to a line/column position. Offsets past the end clamp to it.
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let byte_offset = byte_offset.min(self.len);
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);

        Position::new(line, byte_offset - self.line_starts[line])
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// The part of `range` that falls on `line`, as byte columns within that line.
    ///
    /// `line_len` is the length of the line's text without its terminator. Returns None when the
    /// range does not touch the line or covers nothing on it.
    pub fn line_columns(
        &self,
        range: &SourceRange,
        line: usize,
        line_len: usize,
    ) -> Option<ByteRange<usize>> {
        let line_start = self.line_start(line)?;
        let line_end = line_start + line_len;

        let start = range.start.max(line_start);
        let end = range.end.min(line_end);
        if start >= end {
            return None;
        }

        Some(start - line_start..end - line_start)
    }
}
