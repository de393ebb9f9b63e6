//! Position utilities for converting between byte offsets and LSP positions.
//!
//! LSP uses 0-indexed line numbers and UTF-16 code unit offsets for columns.

use tower_lsp::lsp_types::{Position, Range};

use crate::analysis::Span;

/// Line index for efficient line number lookups.
///
/// Pre-computes line start byte offsets for O(log n) line number lookups.
pub struct LineIndex {
    /// Byte offset of the start of each line (0-indexed).
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Build a line index from source text.
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in source.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Get the 0-indexed line number for a byte offset.
    pub fn line_of(&self, byte_offset: usize) -> usize {
        match self.line_starts.binary_search(&byte_offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        }
    }

    /// Get the column (0-indexed byte offset from line start) for a byte offset.
    pub fn column_of(&self, byte_offset: usize) -> usize {
        let line = self.line_of(byte_offset);
        byte_offset - self.line_starts[line]
    }

    /// Convert a byte offset to an LSP Position.
    pub fn to_position(&self, byte_offset: usize, source: &str) -> Position {
        let line = self.line_of(byte_offset);
        let col_byte = self.column_of(byte_offset);

        // Get the line content for UTF-16 conversion
        let line_start = self.line_starts[line];
        let line_end = self
            .line_starts
            .get(line + 1)
            .map(|&s| s.saturating_sub(1))
            .unwrap_or(source.len());
        let line_content = &source[line_start..line_end];

        let utf16_col = byte_offset_to_utf16(line_content, col_byte);

        Position {
            line: line as u32,
            character: utf16_col,
        }
    }

    /// Convert a byte span to an LSP Range.
    pub fn span_to_range(&self, span: Span, source: &str) -> Range {
        Range {
            start: self.to_position(span.start, source),
            end: self.to_position(span.end, source),
        }
    }
}

/// Convert a byte offset within a line to UTF-16 code units.
pub fn byte_offset_to_utf16(line: &str, byte_offset: usize) -> u32 {
    let mut utf16_offset = 0u32;
    let mut current_byte = 0usize;

    for c in line.chars() {
        if current_byte >= byte_offset {
            break;
        }
        utf16_offset += c.len_utf16() as u32;
        current_byte += c.len_utf8();
    }

    utf16_offset
}

/// Convert a UTF-16 column within a line to a byte offset, clamped to the
/// line length.
pub fn utf16_to_byte_offset(line: &str, utf16_col: u32) -> usize {
    let mut utf16_offset = 0u32;
    let mut current_byte = 0usize;

    for c in line.chars() {
        if utf16_offset >= utf16_col {
            break;
        }
        utf16_offset += c.len_utf16() as u32;
        current_byte += c.len_utf8();
    }

    current_byte
}
