//! Offset to line/column conversion.

use quire_ir::Position;

/// Byte offsets of every line start in a source text.
///
/// Lookups are a binary search over the line starts. Columns count
/// characters, so conversions need the source text alongside the index.
///
/// ```
/// use quire_diagnostic::LineIndex;
///
/// let source = "ab\ncd";
/// let index = LineIndex::build(source);
/// assert_eq!(index.line_col(source, 4), (2, 2));
/// assert_eq!(index.offset_at(source, 2, 2), Some(4));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineIndex {
    /// `starts[0] == 0`; `starts[n]` is the byte after the n-th `\n`.
    starts: Vec<u32>,
    len: u32,
}

impl LineIndex {
    pub fn build(source: &str) -> Self {
        let mut starts = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                starts.push(to_u32(i + 1));
            }
        }
        LineIndex {
            starts,
            len: to_u32(source.len()),
        }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line_of(&self, offset: u32) -> u32 {
        let idx = match self.starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        to_u32(idx) + 1
    }

    /// 1-based `(line, column)` of `offset`.
    pub fn line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let offset = offset.min(self.len);
        let line = self.line_of(offset);
        let start = self.starts[(line - 1) as usize] as usize;
        let end = floor_char_boundary(source, offset as usize);
        let column = source.get(start..end).map_or(0, |s| s.chars().count());
        (line, to_u32(column) + 1)
    }

    pub fn position(&self, source: &str, offset: u32) -> Position {
        let (line, column) = self.line_col(source, offset);
        Position::new(offset.min(self.len), line, column)
    }

    /// Byte offset of a 1-based line and character column.
    ///
    /// A column past the end of its line resolves to the line's end. Returns
    /// `None` when the line does not exist.
    pub fn offset_at(&self, source: &str, line: u32, column: u32) -> Option<u32> {
        let line_idx = line.checked_sub(1)? as usize;
        let start = *self.starts.get(line_idx)? as usize;
        let end = self
            .starts
            .get(line_idx + 1)
            .map_or(source.len(), |&next| next as usize - 1);
        let text = source.get(start..end)?;
        let skip = column.saturating_sub(1) as usize;
        let within = text
            .char_indices()
            .nth(skip)
            .map_or(text.len(), |(byte, _)| byte);
        Some(to_u32(start + within))
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }
}

fn floor_char_boundary(source: &str, mut offset: usize) -> usize {
    while offset > 0 && !source.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[inline]
fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
