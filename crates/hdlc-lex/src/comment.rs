//! Comment-grouping layer.
//!
//! A pass-through wrapper over the [`Lexer`] that, for every non-comment
//! token, reports the span of the run of consecutive comment tokens
//! immediately preceding it. Parsers consume [`CommentsAndToken`] pairs
//! and attach the comment runs to the AST nodes they build, so the tree
//! preserves concrete syntax without storing any text.

use hdlc_util::diagnostic::{Handler, PResult};
use hdlc_util::source::Source;
use hdlc_util::span::Span;

use crate::lexer::Lexer;
use crate::token::Token;

/// The span of zero or more consecutive comment tokens.
///
/// An empty run is an empty span at the following token's start.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CommentRun {
    pub span: Span,
}

impl CommentRun {
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// The comment text, comments and the whitespace between them.
    pub fn text<'s>(&self, source: &'s Source) -> &'s str {
        source.span_text(self.span)
    }
}

/// A token together with its leading comment run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommentsAndToken {
    pub comments: CommentRun,
    pub token: Token,
}

/// Wraps a [`Lexer`] with one token of lookahead and comment grouping.
/// Cloning snapshots the stream state.
#[derive(Clone)]
pub struct CommentGroupingLexer<'s, 'h> {
    lexer: Lexer<'s, 'h>,
    lookahead: Option<CommentsAndToken>,
}

impl<'s, 'h> CommentGroupingLexer<'s, 'h> {
    pub fn new(source: &'s Source, handler: &'h Handler) -> Self {
        Self {
            lexer: Lexer::new(source, handler),
            lookahead: None,
        }
    }

    pub fn source(&self) -> &'s Source {
        self.lexer.source()
    }

    fn parse_next(&mut self) -> PResult<CommentsAndToken> {
        let mut token = self.lexer.next_token()?;
        let mut comments = Span::empty_at(token.span.source, token.span.start);
        while token.kind.is_comment() {
            comments = comments.with_end(token.span.end());
            token = self.lexer.next_token()?;
        }
        Ok(CommentsAndToken {
            comments: CommentRun { span: comments },
            token,
        })
    }

    /// Look at the next non-comment token without consuming it.
    pub fn peek(&mut self) -> PResult<CommentsAndToken> {
        if let Some(lookahead) = self.lookahead {
            return Ok(lookahead);
        }
        let next = self.parse_next()?;
        self.lookahead = Some(next);
        Ok(next)
    }

    /// Consume and return the next non-comment token.
    pub fn bump(&mut self) -> PResult<CommentsAndToken> {
        let next = self.peek()?;
        self.lookahead = None;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenKind;
    use hdlc_util::source::SourceMap;
    use std::sync::Arc;

    fn setup(text: &str) -> (Arc<Source>, Handler) {
        let mut map = SourceMap::new();
        let id = map.add_source("test.hdl", text);
        (map.get(id).unwrap(), Handler::new())
    }

    #[test]
    fn test_no_comments_empty_run() {
        let (source, handler) = setup("module m");
        let mut lexer = CommentGroupingLexer::new(&source, &handler);
        let first = lexer.bump().unwrap();
        assert_eq!(first.token.kind, TokenKind::KwModule);
        assert!(first.comments.is_empty());
        assert_eq!(first.comments.span.start, first.token.span.start);
    }

    #[test]
    fn test_single_comment_grouped() {
        let (source, handler) = setup("// hello\nmodule");
        let mut lexer = CommentGroupingLexer::new(&source, &handler);
        let first = lexer.bump().unwrap();
        assert_eq!(first.token.kind, TokenKind::KwModule);
        assert!(!first.comments.is_empty());
        assert_eq!(first.comments.text(&source), "// hello");
    }

    #[test]
    fn test_consecutive_comments_one_run() {
        let (source, handler) = setup("// a\n/* b */ // c\nx");
        let mut lexer = CommentGroupingLexer::new(&source, &handler);
        let first = lexer.bump().unwrap();
        assert_eq!(first.token.kind, TokenKind::Ident);
        assert_eq!(first.comments.text(&source), "// a\n/* b */ // c");
    }

    #[test]
    fn test_comment_runs_split_by_tokens() {
        let (source, handler) = setup("/* a */ x /* b */ y");
        let mut lexer = CommentGroupingLexer::new(&source, &handler);
        let x = lexer.bump().unwrap();
        let y = lexer.bump().unwrap();
        assert_eq!(x.comments.text(&source), "/* a */");
        assert_eq!(y.comments.text(&source), "/* b */");
    }

    #[test]
    fn test_peek_preserves_state() {
        let (source, handler) = setup("// c\na b");
        let mut lexer = CommentGroupingLexer::new(&source, &handler);
        let peeked = lexer.peek().unwrap();
        let bumped = lexer.bump().unwrap();
        assert_eq!(peeked, bumped);
        let second = lexer.bump().unwrap();
        assert_eq!(second.token.kind, TokenKind::Ident);
        assert!(second.comments.is_empty());
    }

    #[test]
    fn test_comments_before_eof() {
        let (source, handler) = setup("x // trailing\n// more");
        let mut lexer = CommentGroupingLexer::new(&source, &handler);
        lexer.bump().unwrap();
        let eof = lexer.bump().unwrap();
        assert_eq!(eof.token.kind, TokenKind::Eof);
        assert_eq!(eof.comments.text(&source), "// trailing\n// more");
    }
}
