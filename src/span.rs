//! Source spans and positions for diagnostics

use serde::Serialize;
use std::fmt;

/// Half-open byte range `start..end` into the source text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    /// First byte of the range
    pub start: usize,
    /// One past the last byte of the range
    pub end: usize,
}

impl Span {
    /// Creates a span covering `start..end`
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Number of bytes covered
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True when the span covers no bytes
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Smallest span covering both `self` and `other`
    pub fn to(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Line and column of a byte offset, both 1-based
///
/// Columns count code points, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl Position {
    /// Locates `offset` inside `source`
    ///
    /// Offsets past the end clamp to the end of the source. Offsets that fall
    /// inside a multi-byte code point count that code point as not yet reached.
    pub fn locate(source: &str, offset: usize) -> Self {
        let mut line = 1;
        let mut column = 1;

        for (idx, c) in source.char_indices() {
            if idx >= offset {
                break;
            }
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }

        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
