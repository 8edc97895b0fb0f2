//! hdlc-lex - Lexical analysis for the hdlc front end.
//!
//! A hand-written, single-pass scanner over raw source bytes. The token
//! stream is typed ([`TokenKind`]) and span-carrying; integer and
//! integer-pattern literals decode to `(value, mask)` pairs on demand.
//! The [`CommentGroupingLexer`] layers one-token lookahead on top and
//! folds consecutive comment tokens into leading-comment runs for the
//! parser, which is how the AST stays concrete-syntax-preserving.
//!
//! The first lexical error is fatal: it is reported to the shared
//! diagnostic handler and surfaces as `Err(FatalError)` from
//! [`Lexer::next_token`].

pub mod comment;
pub mod cursor;
pub mod lexer;
pub mod token;

pub use comment::{CommentGroupingLexer, CommentRun, CommentsAndToken};
pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::{Token, TokenKind, KEYWORDS};

#[cfg(test)]
mod proptests {
    use super::*;
    use hdlc_util::diagnostic::Handler;
    use hdlc_util::source::SourceMap;
    use proptest::prelude::*;

    fn lex_kinds(text: &str) -> Option<Vec<TokenKind>> {
        let mut map = SourceMap::new();
        let id = map.add_source("p", text);
        let source = map.get(id).unwrap();
        let handler = Handler::new();
        let mut lexer = Lexer::new(&source, &handler);
        let mut kinds = Vec::new();
        loop {
            match lexer.next_token() {
                Ok(token) if token.kind == TokenKind::Eof => return Some(kinds),
                Ok(token) => kinds.push(token.kind),
                Err(_) => return None,
            }
        }
    }

    proptest! {
        #[test]
        fn prop_identifiers_lex_as_one_token(name in "[a-zA-Z_][a-zA-Z0-9_]{0,20}") {
            let kinds = lex_kinds(&name).unwrap();
            prop_assert_eq!(kinds.len(), 1);
            let kind = kinds[0];
            prop_assert!(kind == TokenKind::Ident || TokenKind::keyword(&name) == Some(kind));
        }

        #[test]
        fn prop_whitespace_between_identifiers_is_invisible(
            a in "[a-z][a-z0-9_]{0,8}",
            b in "[a-z][a-z0-9_]{0,8}",
            ws in "[ \t\r\n]{1,5}",
        ) {
            let text = format!("{a}{ws}{b}");
            let kinds = lex_kinds(&text).unwrap();
            prop_assert_eq!(kinds.len(), 2);
        }

        #[test]
        fn prop_spans_abut_without_whitespace(count in 1usize..6) {
            // Alternating '+' and '~' never fuse, so n operators are n tokens.
            let text: String = (0..count).map(|i| if i % 2 == 0 { '+' } else { '~' }).collect();
            let mut map = SourceMap::new();
            let id = map.add_source("p", text.as_str());
            let source = map.get(id).unwrap();
            let handler = Handler::new();
            let mut lexer = Lexer::new(&source, &handler);
            let mut previous: Option<Token> = None;
            loop {
                let token = lexer.next_token().unwrap();
                if token.kind == TokenKind::Eof {
                    break;
                }
                if let Some(previous) = previous {
                    prop_assert!(previous.span.abuts(&token.span));
                }
                previous = Some(token);
            }
        }

        #[test]
        fn prop_lexer_never_panics(text in "[ -~\t\r\n]{0,60}") {
            let _ = lex_kinds(&text);
        }
    }
}
