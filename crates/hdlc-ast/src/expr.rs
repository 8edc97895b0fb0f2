//! Expression nodes.
//!
//! A closed sum over every expression form. Integer literals keep their
//! token and re-derive the `(value, mask)` pair on demand, so nothing in
//! the arena owns heap storage. Binary operators collapse into one
//! variant with an operator tag; the precedence tiers live in the
//! parser.

use hdlc_lex::{CommentRun, Token};
use hdlc_num::IntegerValue;
use hdlc_util::intern::StringEntry;
use hdlc_util::source::Source;
use hdlc_util::span::Span;

use crate::scoped_id::ScopedId;
use crate::type_expr::TypeExpr;

pub enum Expression<'a> {
    Number(NumberExpression),
    ScopedId(ScopedIdExpression<'a>),
    Paren(ParenExpression<'a>),
    List(ListExpression<'a>),
    Member(MemberExpression<'a>),
    Slice(SliceExpression<'a>),
    Call(CallExpression<'a>),
    Cast(CastExpression<'a>),
    Fill(FillExpression<'a>),
    Cat(CatExpression<'a>),
    PopCount(PopCountExpression<'a>),
    Unary(UnaryExpression<'a>),
    Binary(BinaryExpression<'a>),
    Conditional(ConditionalExpression<'a>),
}

impl Expression<'_> {
    pub fn span(&self) -> Span {
        match self {
            Expression::Number(e) => e.span,
            Expression::ScopedId(e) => e.span,
            Expression::Paren(e) => e.span,
            Expression::List(e) => e.span,
            Expression::Member(e) => e.span,
            Expression::Slice(e) => e.span,
            Expression::Call(e) => e.span,
            Expression::Cast(e) => e.span,
            Expression::Fill(e) => e.span,
            Expression::Cat(e) => e.span,
            Expression::PopCount(e) => e.span,
            Expression::Unary(e) => e.span,
            Expression::Binary(e) => e.span,
            Expression::Conditional(e) => e.span,
        }
    }
}

/// An integer literal. The token is kept; the value is derived on
/// demand from the source text.
pub struct NumberExpression {
    pub span: Span,
    pub before_literal_comments: CommentRun,
    pub token: Token,
}

impl NumberExpression {
    pub fn value(&self, source: &Source) -> IntegerValue {
        self.token.integer_value(source)
    }
}

pub struct ScopedIdExpression<'a> {
    pub span: Span,
    pub id: &'a ScopedId<'a>,
}

pub struct ParenExpression<'a> {
    pub span: Span,
    pub before_lparen_comments: CommentRun,
    pub expression: &'a Expression<'a>,
    pub before_rparen_comments: CommentRun,
}

#[derive(Clone, Copy)]
pub struct ListElement<'a> {
    pub expression: &'a Expression<'a>,
    /// Comments before the comma following this element; empty for a
    /// last element without a trailing comma.
    pub before_comma_comments: CommentRun,
}

/// `{a, b, c}` — a list expression.
pub struct ListExpression<'a> {
    pub span: Span,
    pub before_lbrace_comments: CommentRun,
    pub elements: &'a [ListElement<'a>],
    pub has_trailing_comma: bool,
    pub before_rbrace_comments: CommentRun,
}

pub struct MemberExpression<'a> {
    pub span: Span,
    pub base: &'a Expression<'a>,
    pub before_dot_comments: CommentRun,
    pub before_name_comments: CommentRun,
    pub name_span: Span,
    pub name: StringEntry<'a>,
}

pub struct SliceTo<'a> {
    pub before_to_comments: CommentRun,
    pub end: &'a Expression<'a>,
}

/// `a[i]` or `a[lo to hi]`.
pub struct SliceExpression<'a> {
    pub span: Span,
    pub base: &'a Expression<'a>,
    pub before_lbracket_comments: CommentRun,
    pub start: &'a Expression<'a>,
    pub to: Option<SliceTo<'a>>,
    pub before_rbracket_comments: CommentRun,
}

#[derive(Clone, Copy)]
pub struct CallArgument<'a> {
    pub before_comma_comments: CommentRun,
    pub expression: &'a Expression<'a>,
}

pub struct CallExpression<'a> {
    pub span: Span,
    pub callee: &'a Expression<'a>,
    pub before_lparen_comments: CommentRun,
    pub arguments: &'a [CallArgument<'a>],
    pub before_rparen_comments: CommentRun,
}

/// `cast!{T}(e)`.
pub struct CastExpression<'a> {
    pub span: Span,
    pub before_cast_comments: CommentRun,
    pub before_bang_comments: CommentRun,
    pub before_lbrace_comments: CommentRun,
    pub ty: &'a TypeExpr<'a>,
    pub before_rbrace_comments: CommentRun,
    pub before_lparen_comments: CommentRun,
    pub expression: &'a Expression<'a>,
    pub before_rparen_comments: CommentRun,
}

/// `fill(count, value)`.
pub struct FillExpression<'a> {
    pub span: Span,
    pub before_fill_comments: CommentRun,
    pub before_lparen_comments: CommentRun,
    pub count: &'a Expression<'a>,
    pub before_comma_comments: CommentRun,
    pub value: &'a Expression<'a>,
    pub before_rparen_comments: CommentRun,
}

/// `cat(a, b, …)`.
pub struct CatExpression<'a> {
    pub span: Span,
    pub before_cat_comments: CommentRun,
    pub before_lparen_comments: CommentRun,
    pub first: &'a Expression<'a>,
    pub rest: &'a [CallArgument<'a>],
    pub before_rparen_comments: CommentRun,
}

pub struct PopCountExpression<'a> {
    pub span: Span,
    pub before_popcount_comments: CommentRun,
    pub before_lparen_comments: CommentRun,
    pub expression: &'a Expression<'a>,
    pub before_rparen_comments: CommentRun,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    /// `!`
    LogicalNot,
    /// `~`
    BitNot,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `&` — and-reduce.
    AndReduce,
    /// `|` — or-reduce.
    OrReduce,
    /// `^` — xor-reduce.
    XorReduce,
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::LogicalNot => "!",
            UnaryOp::BitNot => "~",
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::AndReduce => "&",
            UnaryOp::OrReduce => "|",
            UnaryOp::XorReduce => "^",
        }
    }
}

pub struct UnaryExpression<'a> {
    pub span: Span,
    pub before_op_comments: CommentRun,
    pub op: UnaryOp,
    pub operand: &'a Expression<'a>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Mul,
    Div,
    Rem,
    Add,
    Sub,
    Shl,
    Shr,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    BitAnd,
    BitXor,
    BitOr,
    LogicalAnd,
    LogicalOr,
    /// `=`
    Assign,
    /// `<->`
    Connect,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitXor => "^",
            BinaryOp::BitOr => "|",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::LogicalOr => "||",
            BinaryOp::Assign => "=",
            BinaryOp::Connect => "<->",
        }
    }
}

pub struct BinaryExpression<'a> {
    pub span: Span,
    pub lhs: &'a Expression<'a>,
    pub before_op_comments: CommentRun,
    pub op: BinaryOp,
    pub rhs: &'a Expression<'a>,
}

/// `cond ? then : else`, right-associative.
pub struct ConditionalExpression<'a> {
    pub span: Span,
    pub condition: &'a Expression<'a>,
    pub before_question_comments: CommentRun,
    pub then_expression: &'a Expression<'a>,
    pub before_colon_comments: CommentRun,
    pub else_expression: &'a Expression<'a>,
}
