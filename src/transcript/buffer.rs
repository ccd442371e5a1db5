use std::collections::VecDeque;
use std::ops::Range;

use crate::annotate::Annotation;

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Normalized display text. Heading entries contain newlines.
    pub text: String,
    pub is_heading: bool,
}

impl Line {
    /// Create a plain (non-heading) line.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_heading: false,
        }
    }

    /// Create a heading line from an already decorated block.
    pub fn heading(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_heading: true,
        }
    }

    /// Display rows of this entry, top to bottom.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.text.split('\n')
    }

    /// Number of display rows this entry occupies.
    pub fn row_count(&self) -> usize {
        self.text.bytes().filter(|&b| b == b'\n').count() + 1
    }
}

/// One display row of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row<'a> {
    pub text: &'a str,
    /// The row belongs to a heading block.
    pub is_heading: bool,
}

impl<'a> Row<'a> {
    fn of(line: &'a Line) -> impl DoubleEndedIterator<Item = Row<'a>> {
        let is_heading = line.is_heading;
        line.rows().map(move |text| Row { text, is_heading })
    }
}

impl From<Annotation> for Line {
    fn from(annotation: Annotation) -> Self {
        Self {
            text: annotation.text,
            is_heading: annotation.is_heading,
        }
    }
}

/// Ordered, append-only sequence of transcript lines.
///
/// Entries are only ever appended at the tail or evicted from the head, so
/// insertion order is display order. Rendering never mutates the buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptBuffer {
    lines: VecDeque<Line>,
    /// Display rows across all entries
    total_rows: usize,
    /// Optional retention cap (entries)
    limit: Option<usize>,
}

impl TranscriptBuffer {
    /// Create an empty, unbounded buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` entries in memory, evicting the oldest on append.
    ///
    /// A limit of zero is treated as one so the latest line is always held.
    pub fn with_capacity_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total display rows of every entry.
    pub const fn total_rows(&self) -> usize {
        self.total_rows
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Line> {
        self.lines.iter()
    }

    pub fn last(&self) -> Option<&Line> {
        self.lines.back()
    }

    /// Append a line at the tail.
    pub fn append(&mut self, line: Line) {
        self.total_rows += line.row_count();
        self.lines.push_back(line);
        if self.limit.is_some_and(|limit| self.lines.len() > limit) {
            self.evict_oldest();
        }
    }

    /// Remove and return the oldest entry.
    pub fn evict_oldest(&mut self) -> Option<Line> {
        let line = self.lines.pop_front()?;
        self.total_rows -= line.row_count();
        Some(line)
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.total_rows = 0;
    }

    /// Entries visible in a viewport `height` entries tall.
    ///
    /// Returns every entry when they all fit. Otherwise returns the most
    /// recent `height` entries, oldest first, so the latest lands on the
    /// bottom row.
    pub fn render(&self, height: usize) -> Vec<&Line> {
        let skip = self.lines.len().saturating_sub(height);
        self.lines.iter().skip(skip).collect()
    }

    /// Display rows visible in a viewport `height` rows tall, anchored at the
    /// tail.
    ///
    /// Same windowing rule as [`render`](Self::render) but counted in rows, so
    /// a heading block near the top may be partially shown.
    pub fn render_rows(&self, height: usize) -> Vec<Row<'_>> {
        let mut rows = Vec::with_capacity(height.min(self.total_rows));
        'outer: for line in self.lines.iter().rev() {
            for row in Row::of(line).rev() {
                if rows.len() == height {
                    break 'outer;
                }
                rows.push(row);
            }
        }
        rows.reverse();
        rows
    }

    /// Display rows in `range`, clamped to the rows that exist.
    pub fn rows_in(&self, range: Range<usize>) -> Vec<Row<'_>> {
        let end = range.end.min(self.total_rows);
        let start = range.start.min(end);
        self.lines
            .iter()
            .flat_map(Row::of)
            .skip(start)
            .take(end - start)
            .collect()
    }
}
