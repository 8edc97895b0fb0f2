//! Source buffers and the source map.
//!
//! A [`Source`] is an immutable text buffer with a display name and a
//! process-stable [`SourceId`]. Line starts are computed lazily on the
//! first line/column query; a line begins after each `\n`, `\r`, or
//! `\r\n` (the two-byte sequence counts as one terminator).
//!
//! Columns start at 1 and advance one per byte; a tab advances to the
//! next multiple of eight. Multi-byte UTF-8 sequences therefore count one
//! column per byte, which is a documented approximation.
//!
//! # Examples
//!
//! ```
//! use hdlc_util::source::SourceMap;
//!
//! let mut map = SourceMap::new();
//! let id = map.add_source("main.hdl", "module m {\n}\n");
//! let source = map.get(id).unwrap();
//! assert_eq!(source.location_string(11), "main.hdl:2:1");
//! ```

use std::io::{self, Read};
use std::sync::{Arc, OnceLock};

use crate::span::{SourceId, Span};

const TAB_SIZE: u32 = 8;

/// An immutable source buffer.
pub struct Source {
    id: SourceId,
    name: String,
    text: String,
    /// Offsets of the starts of lines 2..; line 1 starts at 0.
    line_starts: OnceLock<Vec<u32>>,
}

impl Source {
    fn new(id: SourceId, name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            text: text.into(),
            line_starts: OnceLock::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> SourceId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The text covered by `span`. The span must come from this source.
    pub fn span_text(&self, span: Span) -> &str {
        debug_assert_eq!(span.source, self.id);
        &self.text[span.start as usize..span.end() as usize]
    }

    fn line_starts(&self) -> &[u32] {
        self.line_starts.get_or_init(|| {
            let bytes = self.text.as_bytes();
            let mut starts = Vec::new();
            let mut i = 0;
            while i < bytes.len() {
                match bytes[i] {
                    b'\r' => {
                        if bytes.get(i + 1) == Some(&b'\n') {
                            i += 1;
                        }
                        starts.push(i as u32 + 1);
                    }
                    b'\n' => starts.push(i as u32 + 1),
                    _ => {}
                }
                i += 1;
            }
            starts
        })
    }

    /// Convert a byte offset to 1-based (line, column).
    ///
    /// # Examples
    ///
    /// ```
    /// use hdlc_util::source::SourceMap;
    ///
    /// let mut map = SourceMap::new();
    /// let id = map.add_source("t", "ab\ncd");
    /// let source = map.get(id).unwrap();
    /// assert_eq!(source.line_col(4), (2, 2));
    /// ```
    pub fn line_col(&self, offset: u32) -> (u32, u32) {
        let starts = self.line_starts();
        let line_index = starts.partition_point(|&s| s <= offset);
        let line_start = if line_index == 0 {
            0
        } else {
            starts[line_index - 1]
        };
        let mut column = 1u32;
        let end = (offset as usize).min(self.text.len());
        for &byte in &self.text.as_bytes()[line_start as usize..end] {
            if byte == b'\t' {
                column += TAB_SIZE - (column - 1) % TAB_SIZE;
            } else {
                column += 1;
            }
        }
        (line_index as u32 + 1, column)
    }

    /// Render an offset as `name:line:column`.
    pub fn location_string(&self, offset: u32) -> String {
        let (line, column) = self.line_col(offset);
        format!("{}:{}:{}", self.name, line, column)
    }
}

impl std::fmt::Debug for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Source")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("len", &self.text.len())
            .finish()
    }
}

/// Owns every loaded source buffer and hands out stable ids.
///
/// # Examples
///
/// ```
/// use hdlc_util::source::SourceMap;
///
/// let mut map = SourceMap::new();
/// let id = map.add_source("main.hdl", "module m { }");
/// assert_eq!(map.get(id).unwrap().name(), "main.hdl");
/// ```
#[derive(Default)]
pub struct SourceMap {
    sources: Vec<Arc<Source>>,
}

impl SourceMap {
    #[inline]
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a source from in-memory text.
    pub fn add_source(&mut self, name: impl Into<String>, text: impl Into<String>) -> SourceId {
        let id = SourceId::new(self.sources.len() as u32);
        self.sources.push(Arc::new(Source::new(id, name, text)));
        id
    }

    /// Read a whole file into a new source. The literal path `-` selects
    /// standard input.
    pub fn load_file(&mut self, path: &str) -> io::Result<SourceId> {
        if path == "-" {
            return self.load_stdin();
        }
        let text = std::fs::read_to_string(path)?;
        Ok(self.add_source(path, text))
    }

    /// Read standard input to end-of-file into a new source named `-`.
    pub fn load_stdin(&mut self) -> io::Result<SourceId> {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(self.add_source("-", text))
    }

    #[inline]
    pub fn get(&self, id: SourceId) -> Option<Arc<Source>> {
        self.sources.get(id.index()).cloned()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Render a span's start as `name:line:column`, falling back to a
    /// placeholder for spans with no real source.
    pub fn location_string(&self, span: Span) -> String {
        match self.get(span.source) {
            Some(source) => source.location_string(span.start),
            None => format!("<unknown>:{}", span.start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(text: &str) -> (SourceMap, Arc<Source>) {
        let mut map = SourceMap::new();
        let id = map.add_source("test.hdl", text);
        let source = map.get(id).unwrap();
        (map, source)
    }

    #[test]
    fn test_line_col_first_line() {
        let (_, s) = single("abc def");
        assert_eq!(s.line_col(0), (1, 1));
        assert_eq!(s.line_col(4), (1, 5));
    }

    #[test]
    fn test_line_col_newlines() {
        let (_, s) = single("a\nbb\nccc");
        assert_eq!(s.line_col(0), (1, 1));
        assert_eq!(s.line_col(2), (2, 1));
        assert_eq!(s.line_col(3), (2, 2));
        assert_eq!(s.line_col(5), (3, 1));
        assert_eq!(s.line_col(7), (3, 3));
    }

    #[test]
    fn test_line_col_carriage_returns() {
        // \r, \n, and \r\n all end a line; \r\n is one terminator.
        let (_, s) = single("a\rb\r\nc\nd");
        assert_eq!(s.line_col(2), (2, 1)); // b
        assert_eq!(s.line_col(5), (3, 1)); // c
        assert_eq!(s.line_col(7), (4, 1)); // d
    }

    #[test]
    fn test_line_col_tabs() {
        let (_, s) = single("\tx\ta");
        // Tab in column 1 advances to column 9.
        assert_eq!(s.line_col(1), (1, 9));
        // 'x' occupies column 9; the next tab advances to 17.
        assert_eq!(s.line_col(3), (1, 17));
    }

    #[test]
    fn test_location_string() {
        let (_, s) = single("module m {\n}\n");
        assert_eq!(s.location_string(0), "test.hdl:1:1");
        assert_eq!(s.location_string(11), "test.hdl:2:1");
    }

    #[test]
    fn test_span_text() {
        let (_, s) = single("module m { }");
        let span = Span::new(s.id(), 7, 1);
        assert_eq!(s.span_text(span), "m");
    }

    #[test]
    fn test_map_location_string_unknown() {
        let map = SourceMap::new();
        let loc = map.location_string(Span::DUMMY);
        assert!(loc.starts_with("<unknown>"));
    }

    #[test]
    fn test_multiple_sources() {
        let mut map = SourceMap::new();
        let a = map.add_source("a", "aaa");
        let b = map.add_source("b", "bbb");
        assert_ne!(a, b);
        assert_eq!(map.get(a).unwrap().text(), "aaa");
        assert_eq!(map.get(b).unwrap().text(), "bbb");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_empty_source() {
        let (_, s) = single("");
        assert_eq!(s.line_col(0), (1, 1));
        assert!(s.is_empty());
    }
}
