//! Line scanning with source positions

use std::ops::Range;

/// Byte range in source text
pub type Span = Range<usize>;

/// A single line of source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based line number
    pub number: usize,
    /// Byte offset of the first character of the line
    pub offset: usize,
    /// Line text including its terminating newline, if any
    pub raw: &'a str,
}

impl<'a> Line<'a> {
    /// Line text without the line terminator
    pub fn text(&self) -> &'a str {
        self.raw
            .strip_suffix('\n')
            .map(|s| s.strip_suffix('\r').unwrap_or(s))
            .unwrap_or(self.raw)
    }

    /// Span of the line text, excluding the terminator
    pub fn span(&self) -> Span {
        self.offset..self.offset + self.text().len()
    }

    /// Span of `part`, which must be a subslice of this line's text
    pub fn span_of(&self, part: &str) -> Span {
        let base = self.raw.as_ptr() as usize;
        let start = (part.as_ptr() as usize).saturating_sub(base);
        let start = self.offset + start.min(self.raw.len());
        start..start + part.len()
    }
}

/// Iterate over `source` line by line, keeping newlines attached
pub fn lines(source: &str) -> impl Iterator<Item = Line<'_>> {
    let mut offset = 0;
    source
        .split_inclusive('\n')
        .enumerate()
        .map(move |(index, raw)| {
            let line = Line {
                number: index + 1,
                offset,
                raw,
            };
            offset += raw.len();
            line
        })
}
