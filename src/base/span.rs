//! Source positions, occurrences and spans.

use std::fmt;

use super::FileId;
use crate::error::{Error, Result};

/// A line and column position in source text.
///
/// Both line and column are 0-indexed internally, but displayed as 1-indexed.
/// Ordering is document order: line first, then column.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, PartialOrd, Ord)]
pub struct LineCol {
    /// 0-indexed line number
    pub line: u32,
    /// 0-indexed column (in characters)
    pub col: u32,
}

impl LineCol {
    /// Create a new LineCol position.
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }

    /// Create from 1-indexed line and column (as displayed to users).
    #[inline]
    pub const fn from_one_indexed(line: u32, col: u32) -> Self {
        Self {
            line: line.saturating_sub(1),
            col: col.saturating_sub(1),
        }
    }

    /// Get 1-indexed line number (for display).
    #[inline]
    pub const fn line_one_indexed(self) -> u32 {
        self.line + 1
    }

    /// Get 1-indexed column number (for display).
    #[inline]
    pub const fn col_one_indexed(self) -> u32 {
        self.col + 1
    }

    /// The position reached after writing `text` starting here.
    pub fn advance(self, text: &str) -> Self {
        match text.rfind('\n') {
            Some(last) => {
                let newlines = text.matches('\n').count() as u32;
                let tail = text[last + 1..].chars().count() as u32;
                Self::new(self.line + newlines, tail)
            }
            None => Self::new(self.line, self.col + text.chars().count() as u32),
        }
    }
}

impl fmt::Debug for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_one_indexed(), self.col_one_indexed())
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line_one_indexed(), self.col_one_indexed())
    }
}

/// A point in one source file.
///
/// The only notion of "where" used by queries. Ordered by file, then line,
/// then column.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Occurrence {
    pub file: FileId,
    pub position: LineCol,
}

impl Occurrence {
    #[inline]
    pub const fn new(file: FileId, position: LineCol) -> Self {
        Self { file, position }
    }

    /// Shorthand for a 0-indexed line/column in `file`.
    #[inline]
    pub const fn at(file: FileId, line: u32, col: u32) -> Self {
        Self::new(file, LineCol::new(line, col))
    }

    #[inline]
    pub const fn line(&self) -> u32 {
        self.position.line
    }

    #[inline]
    pub const fn col(&self) -> u32 {
        self.position.col
    }
}

impl fmt::Debug for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.file, self.position)
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.position)
    }
}

/// A half-open interval `[start, end)` over line/column positions.
///
/// Invariant: `start <= end` in document order.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Span {
    start: LineCol,
    end: LineCol,
}

impl Span {
    /// Create a span, rejecting an end that precedes its start.
    pub fn new(start: LineCol, end: LineCol) -> Result<Self> {
        if end < start {
            return Err(Error::MalformedSpan { start, end });
        }
        Ok(Self { start, end })
    }

    /// The span covered by `text` written at `start`.
    ///
    /// Returns `None` for empty text: such a node has no extent of its own.
    pub fn of_text(start: LineCol, text: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }
        Some(Self {
            start,
            end: start.advance(text),
        })
    }

    #[inline]
    pub const fn start(&self) -> LineCol {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> LineCol {
        self.end
    }

    /// Whether `point` lies inside the span.
    #[inline]
    pub fn contains(&self, point: LineCol) -> bool {
        self.start <= point && point < self.end
    }

    /// Whether `other` lies entirely inside this span.
    #[inline]
    pub fn contains_span(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Widen this span in place so it also covers `other`.
    pub fn compose(&mut self, other: &Span) {
        self.start = self.start.min(other.start);
        self.end = self.end.max(other.end);
    }

    /// Non-destructive variant of [`Span::compose`].
    pub fn union(mut self, other: &Span) -> Span {
        self.compose(other);
        self
    }

    /// Widen an optional accumulator with an optional span.
    pub fn compose_opt(acc: &mut Option<Span>, other: Option<Span>) {
        match (acc.as_mut(), other) {
            (Some(acc), Some(other)) => acc.compose(&other),
            (None, Some(other)) => *acc = Some(other),
            (_, None) => {}
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}..{:?})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(sl: u32, sc: u32, el: u32, ec: u32) -> Span {
        Span::new(LineCol::new(sl, sc), LineCol::new(el, ec)).unwrap()
    }

    #[test]
    fn test_line_col_display() {
        let pos = LineCol::new(0, 0);
        assert_eq!(format!("{}", pos), "1:1");

        let pos = LineCol::new(5, 10);
        assert_eq!(format!("{}", pos), "6:11");
    }

    #[test]
    fn test_line_col_from_one_indexed() {
        let pos = LineCol::from_one_indexed(1, 1);
        assert_eq!(pos, LineCol::new(0, 0));
    }

    #[test]
    fn test_line_col_ordering() {
        assert!(LineCol::new(0, 9) < LineCol::new(1, 0));
        assert!(LineCol::new(2, 3) < LineCol::new(2, 4));
    }

    #[test]
    fn test_advance_multiline() {
        let pos = LineCol::new(3, 4).advance("ab\ncde");
        assert_eq!(pos, LineCol::new(4, 3));
        assert_eq!(LineCol::new(3, 4).advance("abc"), LineCol::new(3, 7));
    }

    #[test]
    fn test_occurrence_ordering() {
        let a = Occurrence::at(FileId::new(0), 9, 9);
        let b = Occurrence::at(FileId::new(1), 0, 0);
        let c = Occurrence::at(FileId::new(1), 0, 1);
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_malformed_span_rejected() {
        let err = Span::new(LineCol::new(2, 0), LineCol::new(1, 5));
        assert!(matches!(err, Err(Error::MalformedSpan { .. })));
    }

    #[test]
    fn test_contains_is_half_open() {
        let s = Span::of_text(LineCol::new(1, 4), "foo").unwrap();
        assert!(s.contains(LineCol::new(1, 4)));
        assert!(s.contains(LineCol::new(1, 6)));
        assert!(!s.contains(LineCol::new(1, 7)));
        assert!(!s.contains(LineCol::new(1, 3)));
    }

    #[test]
    fn test_contains_span() {
        let outer = span(0, 0, 10, 1);
        let inner = span(2, 4, 3, 0);
        assert!(outer.contains_span(&inner));
        assert!(!inner.contains_span(&outer));
        assert!(outer.contains_span(&outer));
    }

    #[test]
    fn test_compose_widens_both_ends() {
        let mut acc = span(3, 2, 3, 5);
        acc.compose(&span(1, 0, 1, 4));
        acc.compose(&span(5, 0, 5, 1));
        assert_eq!(acc, span(1, 0, 5, 1));
    }

    #[test]
    fn test_empty_text_has_no_span() {
        assert!(Span::of_text(LineCol::new(0, 0), "").is_none());
        let mut acc = None;
        Span::compose_opt(&mut acc, None);
        assert!(acc.is_none());
        Span::compose_opt(&mut acc, Some(span(0, 0, 0, 1)));
        assert_eq!(acc, Some(span(0, 0, 0, 1)));
    }
}
