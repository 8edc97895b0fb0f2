//! The scanner.
//!
//! Deterministic and single-pass: every call to [`Lexer::next_token`]
//! consumes one token (comments included) or reports a fatal lexical
//! error through the handler and returns [`FatalError`]. Whitespace is
//! consumed between tokens and never surfaced.

use hdlc_util::diagnostic::{Diagnostic, DiagnosticKind, FatalError, Handler, PResult};
use hdlc_util::source::Source;
use hdlc_util::span::Span;

use crate::cursor::{is_ident_continue, is_ident_start, is_whitespace, Cursor};
use crate::token::{Token, TokenKind};

/// Cloning a lexer snapshots its position; parsers use this for the
/// rare spots that need a second token of lookahead.
#[derive(Clone)]
pub struct Lexer<'s, 'h> {
    source: &'s Source,
    cursor: Cursor<'s>,
    handler: &'h Handler,
}

impl<'s, 'h> Lexer<'s, 'h> {
    pub fn new(source: &'s Source, handler: &'h Handler) -> Self {
        Self {
            source,
            cursor: Cursor::new(source.text()),
            handler,
        }
    }

    pub fn source(&self) -> &'s Source {
        self.source
    }

    fn span_from(&self, start: u32) -> Span {
        Span::new(self.source.id(), start, self.cursor.position() - start)
    }

    fn fatal(&self, span: Span, message: impl Into<String>) -> FatalError {
        self.handler
            .report(Diagnostic::error(DiagnosticKind::Lexical, message, span));
        FatalError
    }

    fn fatal_here(&self, message: impl Into<String>) -> FatalError {
        self.fatal(
            Span::empty_at(self.source.id(), self.cursor.position()),
            message,
        )
    }

    /// Scan the next token. Comments are returned as tokens; the
    /// grouping layer folds them into leading-comment runs.
    pub fn next_token(&mut self) -> PResult<Token> {
        loop {
            match self.cursor.peek() {
                Some(byte) if is_whitespace(byte) => {
                    self.cursor.bump();
                }
                Some(b'/') => {
                    let start = self.cursor.position();
                    self.cursor.bump();
                    if self.cursor.eat(b'/') {
                        while !matches!(self.cursor.peek(), None | Some(b'\r') | Some(b'\n')) {
                            self.cursor.bump();
                        }
                        return Ok(Token::new(TokenKind::LineComment, self.span_from(start)));
                    }
                    if self.cursor.eat(b'*') {
                        loop {
                            match self.cursor.bump() {
                                None => {
                                    return Err(self.fatal(
                                        Span::new(self.source.id(), start, 2),
                                        "block comment is missing closing */",
                                    ));
                                }
                                Some(b'*') if self.cursor.eat(b'/') => {
                                    return Ok(Token::new(
                                        TokenKind::BlockComment,
                                        self.span_from(start),
                                    ));
                                }
                                Some(_) => {}
                            }
                        }
                    }
                    return Ok(Token::new(TokenKind::Slash, self.span_from(start)));
                }
                _ => break,
            }
        }

        let start = self.cursor.position();
        let Some(byte) = self.cursor.peek() else {
            return Ok(Token::new(
                TokenKind::Eof,
                Span::empty_at(self.source.id(), start),
            ));
        };

        if is_ident_start(byte) {
            self.cursor.bump();
            while self.cursor.peek().is_some_and(is_ident_continue) {
                self.cursor.bump();
            }
            let span = self.span_from(start);
            let kind =
                TokenKind::keyword(self.source.span_text(span)).unwrap_or(TokenKind::Ident);
            return Ok(Token::new(kind, span));
        }

        if byte.is_ascii_digit() {
            return self.scan_number(start);
        }

        self.scan_punctuation(start)
    }

    fn scan_number(&mut self, start: u32) -> PResult<Token> {
        let mut kind = TokenKind::UnprefixedDecimalInt;
        let mut pattern_kind = None;
        let mut has_digits = true;
        let mut base = 10u32;
        let mut is_pattern = false;

        if self.cursor.peek() == Some(b'0') {
            self.cursor.bump();
            match self.cursor.peek() {
                Some(b'b' | b'B') => {
                    self.cursor.bump();
                    kind = TokenKind::BinaryInt;
                    pattern_kind = Some(TokenKind::BinaryIntPattern);
                    has_digits = false;
                    base = 2;
                }
                Some(b'o' | b'O') => {
                    self.cursor.bump();
                    kind = TokenKind::OctalInt;
                    pattern_kind = Some(TokenKind::OctalIntPattern);
                    has_digits = false;
                    base = 8;
                }
                Some(b'h' | b'H' | b'x' | b'X') => {
                    self.cursor.bump();
                    kind = TokenKind::HexInt;
                    pattern_kind = Some(TokenKind::HexIntPattern);
                    has_digits = false;
                    base = 16;
                }
                Some(b'd' | b'D') => {
                    self.cursor.bump();
                    kind = TokenKind::DecimalInt;
                    has_digits = false;
                }
                Some(byte) if byte.is_ascii_digit() => {
                    return Err(self.fatal_here(
                        "number must not have leading zeros (for octal, use '0o377')",
                    ));
                }
                _ => {
                    // a lone zero
                    return Ok(Token::new(kind, self.span_from(start)));
                }
            }
        }

        loop {
            match self.cursor.peek() {
                Some(b'?') => {
                    if pattern_kind.is_none() {
                        self.cursor.bump();
                        return Err(
                            self.fatal_here("wildcard is not legal in decimal integer")
                        );
                    }
                    self.cursor.bump();
                    is_pattern = true;
                    has_digits = true;
                }
                Some(byte)
                    if hdlc_num::digit_value(byte as char).is_some_and(|v| v < base) =>
                {
                    self.cursor.bump();
                    has_digits = true;
                }
                _ => break,
            }
        }

        if let Some(byte) = self.cursor.peek() {
            if hdlc_num::digit_value(byte as char).is_some_and(|v| v >= base) {
                return Err(self.fatal_here("digit too big for number"));
            }
        }
        if !has_digits {
            return Err(self.fatal_here("number is missing digits after base indicator"));
        }
        if is_pattern {
            kind = pattern_kind.unwrap_or(kind);
        }
        Ok(Token::new(kind, self.span_from(start)))
    }

    fn scan_punctuation(&mut self, start: u32) -> PResult<Token> {
        use TokenKind::*;
        let byte = self.cursor.bump().unwrap_or(0);
        let kind = match byte {
            b'{' => LBrace,
            b'}' => RBrace,
            b'[' => LBracket,
            b']' => RBracket,
            b'(' => LParen,
            b')' => RParen,
            b',' => Comma,
            b';' => Semicolon,
            b'~' => Tilde,
            b'%' => Percent,
            b'^' => Caret,
            b'*' => Star,
            b'-' => Minus,
            b'+' => Plus,
            b'?' => Question,
            b':' => {
                if self.cursor.eat(b':') {
                    ColonColon
                } else {
                    Colon
                }
            }
            b'=' => {
                if self.cursor.eat(b'>') {
                    FatArrow
                } else if self.cursor.eat(b'=') {
                    EqEq
                } else {
                    Eq
                }
            }
            b'!' => {
                if self.cursor.eat(b'=') {
                    Ne
                } else {
                    Bang
                }
            }
            b'&' => {
                if self.cursor.eat(b'&') {
                    AndAnd
                } else {
                    Amp
                }
            }
            b'|' => {
                if self.cursor.eat(b'|') {
                    OrOr
                } else {
                    Pipe
                }
            }
            b'.' => {
                // "..." fuses; ".." backtracks to after the first dot
                if self.cursor.peek() == Some(b'.') {
                    let after_first = self.cursor.position();
                    self.cursor.bump();
                    if self.cursor.eat(b'.') {
                        Ellipsis
                    } else {
                        self.cursor.set_position(after_first);
                        Dot
                    }
                } else {
                    Dot
                }
            }
            b'<' => {
                if self.cursor.eat(b'<') {
                    Shl
                } else if self.cursor.eat(b'=') {
                    Le
                } else if self.cursor.peek() == Some(b'-') {
                    // "<->" fuses; "<-" backtracks to after the '<'
                    let after_langle = self.cursor.position();
                    self.cursor.bump();
                    if self.cursor.eat(b'>') {
                        Connect
                    } else {
                        self.cursor.set_position(after_langle);
                        Lt
                    }
                } else {
                    Lt
                }
            }
            b'>' => {
                if self.cursor.eat(b'>') {
                    Shr
                } else if self.cursor.eat(b'=') {
                    Ge
                } else {
                    Gt
                }
            }
            _ => {
                return Err(self.fatal(
                    Span::new(self.source.id(), start, 1),
                    "illegal character",
                ));
            }
        };
        Ok(Token::new(kind, self.span_from(start)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hdlc_num::BigInt;
    use hdlc_util::source::SourceMap;
    use std::sync::Arc;

    fn lex_all(text: &str) -> (Vec<Token>, Arc<Source>, Handler) {
        let mut map = SourceMap::new();
        let id = map.add_source("test.hdl", text);
        let source = map.get(id).unwrap();
        let handler = Handler::new();
        let mut tokens = Vec::new();
        {
            let mut lexer = Lexer::new(&source, &handler);
            loop {
                let token = lexer.next_token().expect("unexpected lexical error");
                let done = token.kind == TokenKind::Eof;
                tokens.push(token);
                if done {
                    break;
                }
            }
        }
        (tokens, source, handler)
    }

    fn lex_error(text: &str) -> String {
        let mut map = SourceMap::new();
        let id = map.add_source("test.hdl", text);
        let source = map.get(id).unwrap();
        let handler = Handler::new();
        let mut lexer = Lexer::new(&source, &handler);
        loop {
            match lexer.next_token() {
                Ok(token) if token.kind == TokenKind::Eof => {
                    panic!("expected a lexical error in {text:?}")
                }
                Ok(_) => continue,
                Err(_) => break,
            }
        }
        let message = handler.diagnostics()[0].message.clone();
        message
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_input() {
        let (tokens, _, _) = lex_all("");
        assert_eq!(kinds(&tokens), [TokenKind::Eof]);
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let (tokens, source, _) = lex_all("module m typeOf typeof");
        assert_eq!(
            kinds(&tokens),
            [
                TokenKind::KwModule,
                TokenKind::Ident,
                TokenKind::KwTypeOf,
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
        assert_eq!(tokens[1].text(&source), "m");
        assert_eq!(tokens[3].text(&source), "typeof");
    }

    #[test]
    fn test_unicode_identifier() {
        let (tokens, source, _) = lex_all("zähler");
        assert_eq!(tokens[0].kind, TokenKind::Ident);
        assert_eq!(tokens[0].text(&source), "zähler");
    }

    #[test]
    fn test_plain_numbers() {
        let (tokens, _, _) = lex_all("0 42 0d9 0xFF 0o17 0b101");
        assert_eq!(
            kinds(&tokens),
            [
                TokenKind::UnprefixedDecimalInt,
                TokenKind::UnprefixedDecimalInt,
                TokenKind::DecimalInt,
                TokenKind::HexInt,
                TokenKind::OctalInt,
                TokenKind::BinaryInt,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_octal_literal_value() {
        let (tokens, source, _) = lex_all("0o377");
        let value = tokens[0].integer_value(&source);
        assert_eq!(value.value, BigInt::from(255));
        assert_eq!(value.mask, BigInt::from(-1));
        assert!(!value.is_pattern());
    }

    #[test]
    fn test_binary_pattern_value() {
        let (tokens, source, _) = lex_all("0b10?1");
        assert_eq!(tokens[0].kind, TokenKind::BinaryIntPattern);
        let value = tokens[0].integer_value(&source);
        assert_eq!(value.value, BigInt::from(0b1001));
        assert_eq!(value.mask, BigInt::from(0b1101));
    }

    #[test]
    fn test_pattern_kinds() {
        let (tokens, _, _) = lex_all("0x?F 0o?7 0b?1");
        assert_eq!(
            kinds(&tokens),
            [
                TokenKind::HexIntPattern,
                TokenKind::OctalIntPattern,
                TokenKind::BinaryIntPattern,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_decimal_wildcard_is_error() {
        assert_eq!(lex_error("0d5?"), "wildcard is not legal in decimal integer");
        assert_eq!(lex_error("5?"), "wildcard is not legal in decimal integer");
    }

    #[test]
    fn test_leading_zero_rejected() {
        assert_eq!(
            lex_error("0377"),
            "number must not have leading zeros (for octal, use '0o377')"
        );
    }

    #[test]
    fn test_digit_too_big() {
        assert_eq!(lex_error("0b102"), "digit too big for number");
        assert_eq!(lex_error("0o18"), "digit too big for number");
        assert_eq!(lex_error("19a"), "digit too big for number");
    }

    #[test]
    fn test_missing_digits() {
        assert_eq!(
            lex_error("0x"),
            "number is missing digits after base indicator"
        );
        assert_eq!(
            lex_error("0b;"),
            "number is missing digits after base indicator"
        );
    }

    #[test]
    fn test_comments() {
        let (tokens, source, _) = lex_all("a // line\nb /* block */ c");
        assert_eq!(
            kinds(&tokens),
            [
                TokenKind::Ident,
                TokenKind::LineComment,
                TokenKind::Ident,
                TokenKind::BlockComment,
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
        assert_eq!(tokens[1].text(&source), "// line");
        assert_eq!(tokens[3].text(&source), "/* block */");
    }

    #[test]
    fn test_block_comment_does_not_nest() {
        // The first "*/" ends the comment; the tail lexes normally.
        let (tokens, _, _) = lex_all("/* a /* b */ c");
        assert_eq!(
            kinds(&tokens),
            [TokenKind::BlockComment, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_block_comment() {
        assert_eq!(
            lex_error("a /* never ends"),
            "block comment is missing closing */"
        );
    }

    #[test]
    fn test_line_comment_at_eof() {
        let (tokens, _, _) = lex_all("// trailing");
        assert_eq!(kinds(&tokens), [TokenKind::LineComment, TokenKind::Eof]);
    }

    #[test]
    fn test_single_char_punctuation() {
        let (tokens, _, _) = lex_all("/ { } [ ] ( ) , : ; ~ ! % ^ & * - = + | . < > ?");
        use TokenKind::*;
        assert_eq!(
            kinds(&tokens),
            [
                Slash, LBrace, RBrace, LBracket, RBracket, LParen, RParen, Comma, Colon,
                Semicolon, Tilde, Bang, Percent, Caret, Amp, Star, Minus, Eq, Plus, Pipe, Dot,
                Lt, Gt, Question, Eof
            ]
        );
    }

    #[test]
    fn test_fused_punctuation() {
        let (tokens, _, _) = lex_all(":: ... => << >> <= >= == != && || <->");
        use TokenKind::*;
        assert_eq!(
            kinds(&tokens),
            [
                ColonColon, Ellipsis, FatArrow, Shl, Shr, Le, Ge, EqEq, Ne, AndAnd, OrOr,
                Connect, Eof
            ]
        );
    }

    #[test]
    fn test_fused_punctuation_backtracking() {
        let (tokens, _, _) = lex_all("..");
        assert_eq!(kinds(&tokens), [TokenKind::Dot, TokenKind::Dot, TokenKind::Eof]);

        let (tokens, _, _) = lex_all("<-");
        assert_eq!(
            kinds(&tokens),
            [TokenKind::Lt, TokenKind::Minus, TokenKind::Eof]
        );

        let (tokens, _, _) = lex_all("<-x");
        assert_eq!(
            kinds(&tokens),
            [TokenKind::Lt, TokenKind::Minus, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn test_illegal_character() {
        assert_eq!(lex_error("a $ b"), "illegal character");
    }

    #[test]
    fn test_adjacent_tokens_abut() {
        let (tokens, _, _) = lex_all("a+b*(c)");
        for pair in tokens.windows(2) {
            if pair[1].kind == TokenKind::Eof {
                continue;
            }
            assert!(
                pair[0].span.abuts(&pair[1].span),
                "{:?} and {:?} do not abut",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn test_connect_operator_in_context() {
        let (tokens, _, _) = lex_all("a <-> b");
        assert_eq!(
            kinds(&tokens),
            [TokenKind::Ident, TokenKind::Connect, TokenKind::Ident, TokenKind::Eof]
        );
    }
}
