//! Line and column computation for byte offsets.
//!
//! Columns are byte-based: source text is raw bytes with no encoding
//! enforced at this layer, so column `n` is the `n`-th byte of its line.
//!
//! ## Performance
//!
//! [`offset_to_line_col`] scans from the start of the text on every call.
//! For repeated lookups on the same source, use [`LineOffsetTable`] which
//! pre-computes line starts for O(log L) lookup. Both produce identical
//! results.

use std::fmt;

/// 1-based line and column.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct LineColumn {
    pub line: u32,
    pub column: u32,
}

impl LineColumn {
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        LineColumn { line, column }
    }
}

impl fmt::Display for LineColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.line, self.column)
    }
}

/// Pre-computed line offset table for efficient line/column lookup.
///
/// # Example
///
/// ```
/// use lyir_diagnostic::span_utils::LineOffsetTable;
/// use lyir_diagnostic::LineColumn;
///
/// let table = LineOffsetTable::build(b"line1\nline2\nline3");
///
/// assert_eq!(table.offset_to_line_col(0), LineColumn::new(1, 1));
/// assert_eq!(table.offset_to_line_col(6), LineColumn::new(2, 1));
/// assert_eq!(table.offset_to_line_col(14), LineColumn::new(3, 3));
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LineOffsetTable {
    /// Byte offset of each line start; `offsets[0] == 0`.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    /// Build the table in one pass over `source`.
    pub fn build(source: &[u8]) -> Self {
        let mut offsets = vec![0u32];
        for (i, &byte) in source.iter().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based (line, column) of `offset`.
    pub fn offset_to_line_col(&self, offset: u32) -> LineColumn {
        let line = self.line_from_offset(offset);
        let line_start = self.line_start_offset(line).unwrap_or(0);
        LineColumn::new(line, offset - line_start + 1)
    }

    /// Byte offset of a line start (1-based line number).
    ///
    /// Returns `None` if the line number is out of range.
    pub fn line_start_offset(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        self.offsets.get((line - 1) as usize).copied()
    }

    /// Number of lines (a trailing newline opens an empty last line).
    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

/// 1-based (line, column) of `offset` by scanning `source` from the start.
///
/// Offsets past the end clamp to the end of the text.
pub fn offset_to_line_col(source: &[u8], offset: u32) -> LineColumn {
    let offset = (offset as usize).min(source.len());
    let mut line = 1u32;
    let mut line_start = 0usize;

    for (i, &byte) in source[..offset].iter().enumerate() {
        if byte == b'\n' {
            line += 1;
            line_start = i + 1;
        }
    }

    let column = u32::try_from(offset - line_start).unwrap_or(u32::MAX - 1) + 1;
    LineColumn::new(line, column)
}
