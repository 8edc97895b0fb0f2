//! Diagnostics: error values, the collecting handler, and the fatal
//! short-circuit marker.
//!
//! The front end reports at most one error per invocation: the first
//! diagnostic goes to the [`Handler`] and the reporting phase unwinds with
//! [`FatalError`]. A handler with a custom sink may collect instead of
//! printing, but the parser still stops after the first report.
//!
//! Rendered diagnostics follow `file:line:column: error: message`.
//!
//! # Examples
//!
//! ```
//! use hdlc_util::diagnostic::{Diagnostic, DiagnosticKind, Handler};
//! use hdlc_util::span::Span;
//!
//! let handler = Handler::new();
//! handler.report(Diagnostic::error(
//!     DiagnosticKind::Syntax,
//!     "expected: }",
//!     Span::DUMMY,
//! ));
//! assert!(handler.has_errors());
//! ```

use std::cell::{Ref, RefCell};
use std::fmt;

use crate::source::SourceMap;
use crate::span::Span;

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
            Level::Note => write!(f, "note"),
        }
    }
}

/// Which phase of the front end produced a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Tokenization failures: unterminated comments, bad digits, illegal
    /// characters.
    Lexical,
    /// Grammar failures: expected token or construct, extra input.
    Syntax,
    /// Name binding failures: redefinition, not found, not a scope.
    Resolution,
    /// Shallow semantic checks: widths out of range, non-integer template
    /// parameter types.
    Semantic,
}

/// One reported problem with a source location.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub kind: DiagnosticKind,
    pub message: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(level: Level, kind: DiagnosticKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            level,
            kind,
            message: message.into(),
            span,
        }
    }

    pub fn error(kind: DiagnosticKind, message: impl Into<String>, span: Span) -> Self {
        Self::new(Level::Error, kind, message, span)
    }

    /// Render as `file:line:column: error: message`.
    pub fn render(&self, map: &SourceMap) -> String {
        format!(
            "{}: {}: {}",
            map.location_string(self.span),
            self.level,
            self.message
        )
    }
}

/// Marker returned by reporting phases after the first fatal diagnostic.
///
/// Carries no payload; the diagnostic itself lives in the [`Handler`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("compilation stopped after a reported error")]
pub struct FatalError;

/// Result alias used throughout the lexer and parser.
pub type PResult<T> = Result<T, FatalError>;

/// Collects diagnostics for one front-end invocation.
///
/// The handler never decides control flow; the reporting phase returns
/// [`FatalError`] itself after the first error, which preserves the
/// one-error-per-invocation behavior while letting embedders read every
/// collected diagnostic afterwards.
#[derive(Default)]
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .borrow()
            .iter()
            .any(|d| d.level == Level::Error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    pub fn diagnostics(&self) -> Ref<'_, [Diagnostic]> {
        Ref::map(self.diagnostics.borrow(), |v| v.as_slice())
    }

    /// Render every diagnostic, one per line.
    pub fn render_all(&self, map: &SourceMap) -> String {
        let mut out = String::new();
        for diagnostic in self.diagnostics.borrow().iter() {
            out.push_str(&diagnostic.render(map));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::SourceId;

    #[test]
    fn test_level_display() {
        assert_eq!(Level::Error.to_string(), "error");
        assert_eq!(Level::Warning.to_string(), "warning");
        assert_eq!(Level::Note.to_string(), "note");
    }

    #[test]
    fn test_handler_collects() {
        let handler = Handler::new();
        assert!(!handler.has_errors());
        handler.report(Diagnostic::error(
            DiagnosticKind::Lexical,
            "illegal character",
            Span::DUMMY,
        ));
        assert!(handler.has_errors());
        assert_eq!(handler.error_count(), 1);
        assert_eq!(handler.diagnostics()[0].message, "illegal character");
    }

    #[test]
    fn test_render_format() {
        let mut map = SourceMap::new();
        let id = map.add_source("in.hdl", "module m {\nx\n}");
        let diag = Diagnostic::error(
            DiagnosticKind::Resolution,
            "name not found",
            Span::new(id, 11, 1),
        );
        assert_eq!(diag.render(&map), "in.hdl:2:1: error: name not found");
    }

    #[test]
    fn test_render_all() {
        let mut map = SourceMap::new();
        let id = map.add_source("a", "xy");
        let handler = Handler::new();
        handler.report(Diagnostic::error(
            DiagnosticKind::Syntax,
            "expected: expression",
            Span::new(id, 0, 1),
        ));
        let rendered = handler.render_all(&map);
        assert_eq!(rendered, "a:1:1: error: expected: expression\n");
    }

    #[test]
    fn test_fatal_error_display() {
        let err = FatalError;
        assert!(err.to_string().contains("stopped"));
    }

    #[test]
    fn test_warning_not_counted_as_error() {
        let handler = Handler::new();
        handler.report(Diagnostic::new(
            Level::Warning,
            DiagnosticKind::Semantic,
            "suspicious width",
            Span::empty_at(SourceId(0), 3),
        ));
        assert!(!handler.has_errors());
        assert_eq!(handler.error_count(), 0);
    }
}
