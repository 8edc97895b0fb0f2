//! Token model.
//!
//! A [`Token`] is a kind plus the span of its lexeme; no text is copied
//! out of the source. Integer and integer-pattern tokens decode their
//! `(value, mask)` on demand through [`Token::integer_value`].

use hdlc_num::IntegerValue;
use hdlc_util::source::Source;
use hdlc_util::span::Span;

/// Every lexical category the scanner can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,

    /// A decimal literal with no base marker, e.g. `42`.
    UnprefixedDecimalInt,
    /// `0d`-prefixed decimal literal.
    DecimalInt,
    /// `0x`/`0h`-prefixed hexadecimal literal.
    HexInt,
    /// `0o`-prefixed octal literal.
    OctalInt,
    /// `0b`-prefixed binary literal.
    BinaryInt,
    /// Hexadecimal literal containing `?` wildcard digits.
    HexIntPattern,
    /// Octal literal containing `?` wildcard digits.
    OctalIntPattern,
    /// Binary literal containing `?` wildcard digits.
    BinaryIntPattern,

    KwBit,
    KwBreak,
    KwBundle,
    KwCast,
    KwCat,
    KwConst,
    KwContinue,
    KwElse,
    KwEnum,
    KwFill,
    KwFlip,
    KwFor,
    KwFunction,
    KwIf,
    KwImplements,
    KwImport,
    KwIn,
    KwInput,
    KwInterface,
    KwLet,
    KwMatch,
    KwMemory,
    KwModule,
    KwOutput,
    KwPopCount,
    KwReg,
    KwReturn,
    KwS16,
    KwS32,
    KwS64,
    KwS8,
    KwSInt,
    KwTo,
    KwType,
    KwTypeOf,
    KwU16,
    KwU32,
    KwU64,
    KwU8,
    KwUInt,

    Ident,
    BlockComment,
    LineComment,

    Slash,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LParen,
    RParen,
    Comma,
    Colon,
    Semicolon,
    Tilde,
    Bang,
    Percent,
    Caret,
    Amp,
    Star,
    Minus,
    Eq,
    Plus,
    Pipe,
    Dot,
    Lt,
    Gt,
    Question,

    ColonColon,
    Ellipsis,
    FatArrow,
    Shl,
    Shr,
    Le,
    Ge,
    EqEq,
    Ne,
    AndAnd,
    OrOr,
    Connect,
}

/// Keyword lexemes in sorted order, for binary search after an
/// identifier has been scanned.
pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("bit", TokenKind::KwBit),
    ("break", TokenKind::KwBreak),
    ("bundle", TokenKind::KwBundle),
    ("cast", TokenKind::KwCast),
    ("cat", TokenKind::KwCat),
    ("const", TokenKind::KwConst),
    ("continue", TokenKind::KwContinue),
    ("else", TokenKind::KwElse),
    ("enum", TokenKind::KwEnum),
    ("fill", TokenKind::KwFill),
    ("flip", TokenKind::KwFlip),
    ("for", TokenKind::KwFor),
    ("function", TokenKind::KwFunction),
    ("if", TokenKind::KwIf),
    ("implements", TokenKind::KwImplements),
    ("import", TokenKind::KwImport),
    ("in", TokenKind::KwIn),
    ("input", TokenKind::KwInput),
    ("interface", TokenKind::KwInterface),
    ("let", TokenKind::KwLet),
    ("match", TokenKind::KwMatch),
    ("memory", TokenKind::KwMemory),
    ("module", TokenKind::KwModule),
    ("output", TokenKind::KwOutput),
    ("popCount", TokenKind::KwPopCount),
    ("reg", TokenKind::KwReg),
    ("return", TokenKind::KwReturn),
    ("s16", TokenKind::KwS16),
    ("s32", TokenKind::KwS32),
    ("s64", TokenKind::KwS64),
    ("s8", TokenKind::KwS8),
    ("sint", TokenKind::KwSInt),
    ("to", TokenKind::KwTo),
    ("type", TokenKind::KwType),
    ("typeOf", TokenKind::KwTypeOf),
    ("u16", TokenKind::KwU16),
    ("u32", TokenKind::KwU32),
    ("u64", TokenKind::KwU64),
    ("u8", TokenKind::KwU8),
    ("uint", TokenKind::KwUInt),
];

impl TokenKind {
    /// Look an identifier lexeme up in the keyword table.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        KEYWORDS
            .binary_search_by_key(&text, |&(lexeme, _)| lexeme)
            .ok()
            .map(|index| KEYWORDS[index].1)
    }

    /// Display string: the lexeme for fixed tokens, an angle-bracketed
    /// description otherwise.
    pub fn token_str(self) -> &'static str {
        use TokenKind::*;
        match self {
            Eof => "<end-of-file>",
            UnprefixedDecimalInt => "<unprefixed decimal integer>",
            DecimalInt => "<decimal integer>",
            HexInt => "<hexadecimal integer>",
            OctalInt => "<octal integer>",
            BinaryInt => "<binary integer>",
            HexIntPattern => "<hexadecimal integer pattern>",
            OctalIntPattern => "<octal integer pattern>",
            BinaryIntPattern => "<binary integer pattern>",
            KwBit => "bit",
            KwBreak => "break",
            KwBundle => "bundle",
            KwCast => "cast",
            KwCat => "cat",
            KwConst => "const",
            KwContinue => "continue",
            KwElse => "else",
            KwEnum => "enum",
            KwFill => "fill",
            KwFlip => "flip",
            KwFor => "for",
            KwFunction => "function",
            KwIf => "if",
            KwImplements => "implements",
            KwImport => "import",
            KwIn => "in",
            KwInput => "input",
            KwInterface => "interface",
            KwLet => "let",
            KwMatch => "match",
            KwMemory => "memory",
            KwModule => "module",
            KwOutput => "output",
            KwPopCount => "popCount",
            KwReg => "reg",
            KwReturn => "return",
            KwS16 => "s16",
            KwS32 => "s32",
            KwS64 => "s64",
            KwS8 => "s8",
            KwSInt => "sint",
            KwTo => "to",
            KwType => "type",
            KwTypeOf => "typeOf",
            KwU16 => "u16",
            KwU32 => "u32",
            KwU64 => "u64",
            KwU8 => "u8",
            KwUInt => "uint",
            Ident => "<identifier>",
            BlockComment => "<block comment>",
            LineComment => "<line comment>",
            Slash => "/",
            LBrace => "{",
            RBrace => "}",
            LBracket => "[",
            RBracket => "]",
            LParen => "(",
            RParen => ")",
            Comma => ",",
            Colon => ":",
            Semicolon => ";",
            Tilde => "~",
            Bang => "!",
            Percent => "%",
            Caret => "^",
            Amp => "&",
            Star => "*",
            Minus => "-",
            Eq => "=",
            Plus => "+",
            Pipe => "|",
            Dot => ".",
            Lt => "<",
            Gt => ">",
            Question => "?",
            ColonColon => "::",
            Ellipsis => "...",
            FatArrow => "=>",
            Shl => "<<",
            Shr => ">>",
            Le => "<=",
            Ge => ">=",
            EqEq => "==",
            Ne => "!=",
            AndAnd => "&&",
            OrOr => "||",
            Connect => "<->",
        }
    }

    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::BlockComment | TokenKind::LineComment)
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            TokenKind::UnprefixedDecimalInt
                | TokenKind::DecimalInt
                | TokenKind::HexInt
                | TokenKind::OctalInt
                | TokenKind::BinaryInt
        )
    }

    pub fn is_integer_pattern(self) -> bool {
        matches!(
            self,
            TokenKind::HexIntPattern | TokenKind::OctalIntPattern | TokenKind::BinaryIntPattern
        )
    }

    /// The numeric base of an integer or integer-pattern kind.
    pub fn integer_base(self) -> Option<u32> {
        use TokenKind::*;
        match self {
            UnprefixedDecimalInt | DecimalInt => Some(10),
            HexInt | HexIntPattern => Some(16),
            OctalInt | OctalIntPattern => Some(8),
            BinaryInt | BinaryIntPattern => Some(2),
            _ => None,
        }
    }
}

/// One lexed token: a kind and the byte range of its lexeme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The lexeme text. `source` must be the buffer the token came from.
    pub fn text<'s>(&self, source: &'s Source) -> &'s str {
        source.span_text(self.span)
    }

    /// Decode an integer or integer-pattern token into `(value, mask)`.
    ///
    /// Must only be called on kinds where
    /// [`TokenKind::is_integer`] or [`TokenKind::is_integer_pattern`]
    /// holds.
    pub fn integer_value(&self, source: &Source) -> IntegerValue {
        let base = self
            .kind
            .integer_base()
            .unwrap_or_else(|| panic!("integer_value on {:?}", self.kind));
        let text = self.text(source);
        let digits = if self.kind == TokenKind::UnprefixedDecimalInt {
            text
        } else {
            // strip the two-byte base prefix, e.g. "0x"
            &text[2..]
        };
        IntegerValue::parse_digits(digits, base, self.kind.is_integer_pattern())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert_eq!(TokenKind::keyword("module"), Some(TokenKind::KwModule));
        assert_eq!(TokenKind::keyword("popCount"), Some(TokenKind::KwPopCount));
        assert_eq!(TokenKind::keyword("uint"), Some(TokenKind::KwUInt));
        assert_eq!(TokenKind::keyword("bit"), Some(TokenKind::KwBit));
        assert_eq!(TokenKind::keyword("modules"), None);
        assert_eq!(TokenKind::keyword("popcount"), None);
    }

    #[test]
    fn test_keyword_table_sorted() {
        for pair in KEYWORDS.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{:?} out of order", pair);
        }
    }

    #[test]
    fn test_keyword_strings_round_trip() {
        for &(lexeme, kind) in KEYWORDS {
            assert_eq!(kind.token_str(), lexeme);
        }
    }

    #[test]
    fn test_classification() {
        assert!(TokenKind::LineComment.is_comment());
        assert!(TokenKind::BlockComment.is_comment());
        assert!(!TokenKind::Slash.is_comment());
        assert!(TokenKind::OctalInt.is_integer());
        assert!(!TokenKind::OctalIntPattern.is_integer());
        assert!(TokenKind::OctalIntPattern.is_integer_pattern());
        assert!(!TokenKind::Ident.is_integer_pattern());
    }

    #[test]
    fn test_integer_base() {
        assert_eq!(TokenKind::UnprefixedDecimalInt.integer_base(), Some(10));
        assert_eq!(TokenKind::HexIntPattern.integer_base(), Some(16));
        assert_eq!(TokenKind::BinaryInt.integer_base(), Some(2));
        assert_eq!(TokenKind::Ident.integer_base(), None);
    }
}
