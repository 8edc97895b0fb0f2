//! Surface type expressions.
//!
//! These preserve the written form of a type, comments and all. Where a
//! type can be resolved without elaboration (literal widths, builtin
//! names, bundle and alias references, flips of those), the parser also
//! records the semantic [`TypeRef`](crate::types::TypeRef) alongside the
//! node that used it; `typeOf`, non-literal widths, memory, tuple, and
//! function types stay surface-only until elaboration.

use hdlc_lex::CommentRun;
use hdlc_num::BitVectorKind;
use hdlc_util::intern::StringEntry;
use hdlc_util::span::Span;

use crate::expr::Expression;
use crate::scoped_id::ScopedId;

pub enum TypeExpr<'a> {
    /// A named type: `some::alias`.
    ScopedId(ScopedIdType<'a>),
    /// `flip T` or `!T`.
    Flip(FlipType<'a>),
    /// `typeOf(expr)`.
    TypeOf(TypeOfType<'a>),
    /// `uint<width>`.
    UInt(UIntType<'a>),
    /// `sint<width>`.
    SInt(SIntType<'a>),
    /// `bit`, `u8` … `s64`.
    Builtin(BuiltinType),
    /// `memory[size]: Element`.
    Memory(MemoryType<'a>),
    /// `{T, U}`.
    Tuple(TupleType<'a>),
    /// `function(params): Ret`.
    Function(FunctionType<'a>),
}

impl TypeExpr<'_> {
    pub fn span(&self) -> Span {
        match self {
            TypeExpr::ScopedId(t) => t.span,
            TypeExpr::Flip(t) => t.span,
            TypeExpr::TypeOf(t) => t.span,
            TypeExpr::UInt(t) => t.span,
            TypeExpr::SInt(t) => t.span,
            TypeExpr::Builtin(t) => t.span,
            TypeExpr::Memory(t) => t.span,
            TypeExpr::Tuple(t) => t.span,
            TypeExpr::Function(t) => t.span,
        }
    }
}

pub struct ScopedIdType<'a> {
    pub span: Span,
    pub id: &'a ScopedId<'a>,
}

pub struct FlipType<'a> {
    pub span: Span,
    pub before_flip_comments: CommentRun,
    pub inner: &'a TypeExpr<'a>,
}

pub struct TypeOfType<'a> {
    pub span: Span,
    pub before_typeof_comments: CommentRun,
    pub before_lparen_comments: CommentRun,
    pub expression: &'a Expression<'a>,
    pub before_rparen_comments: CommentRun,
}

pub struct UIntType<'a> {
    pub span: Span,
    pub before_uint_comments: CommentRun,
    pub before_langle_comments: CommentRun,
    pub width: &'a Expression<'a>,
    pub before_rangle_comments: CommentRun,
}

pub struct SIntType<'a> {
    pub span: Span,
    pub before_sint_comments: CommentRun,
    pub before_langle_comments: CommentRun,
    pub width: &'a Expression<'a>,
    pub before_rangle_comments: CommentRun,
}

/// The fixed-width builtin names plus `bit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuiltinTypeName {
    Bit,
    U8,
    U16,
    U32,
    U64,
    S8,
    S16,
    S32,
    S64,
}

impl BuiltinTypeName {
    pub fn kind(self) -> BitVectorKind {
        match self {
            BuiltinTypeName::Bit
            | BuiltinTypeName::U8
            | BuiltinTypeName::U16
            | BuiltinTypeName::U32
            | BuiltinTypeName::U64 => BitVectorKind::Unsigned,
            BuiltinTypeName::S8
            | BuiltinTypeName::S16
            | BuiltinTypeName::S32
            | BuiltinTypeName::S64 => BitVectorKind::Signed,
        }
    }

    pub fn bit_width(self) -> usize {
        match self {
            BuiltinTypeName::Bit => 1,
            BuiltinTypeName::U8 | BuiltinTypeName::S8 => 8,
            BuiltinTypeName::U16 | BuiltinTypeName::S16 => 16,
            BuiltinTypeName::U32 | BuiltinTypeName::S32 => 32,
            BuiltinTypeName::U64 | BuiltinTypeName::S64 => 64,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BuiltinTypeName::Bit => "bit",
            BuiltinTypeName::U8 => "u8",
            BuiltinTypeName::U16 => "u16",
            BuiltinTypeName::U32 => "u32",
            BuiltinTypeName::U64 => "u64",
            BuiltinTypeName::S8 => "s8",
            BuiltinTypeName::S16 => "s16",
            BuiltinTypeName::S32 => "s32",
            BuiltinTypeName::S64 => "s64",
        }
    }
}

pub struct BuiltinType {
    pub span: Span,
    pub before_name_comments: CommentRun,
    pub name: BuiltinTypeName,
}

pub struct MemoryType<'a> {
    pub span: Span,
    pub before_memory_comments: CommentRun,
    pub before_lbracket_comments: CommentRun,
    pub size: &'a Expression<'a>,
    pub before_rbracket_comments: CommentRun,
    pub before_colon_comments: CommentRun,
    pub element: &'a TypeExpr<'a>,
}

#[derive(Clone, Copy)]
pub struct TupleTypeElement<'a> {
    pub ty: &'a TypeExpr<'a>,
    /// Comments before the comma following this element; empty for the
    /// last element of a list without a trailing comma.
    pub before_comma_comments: CommentRun,
}

pub struct TupleType<'a> {
    pub span: Span,
    pub before_lbrace_comments: CommentRun,
    pub elements: &'a [TupleTypeElement<'a>],
    pub has_trailing_comma: bool,
    pub before_rbrace_comments: CommentRun,
}

/// An optionally named `function` type parameter.
pub struct FunctionTypeParameter<'a> {
    pub span: Span,
    pub before_comma_comments: CommentRun,
    pub name: Option<FunctionTypeParameterName<'a>>,
    pub ty: &'a TypeExpr<'a>,
}

pub struct FunctionTypeParameterName<'a> {
    pub before_name_comments: CommentRun,
    pub name_span: Span,
    pub name: StringEntry<'a>,
    pub before_colon_comments: CommentRun,
}

pub struct FunctionReturnType<'a> {
    pub before_colon_comments: CommentRun,
    pub ty: &'a TypeExpr<'a>,
}

pub struct FunctionType<'a> {
    pub span: Span,
    pub before_function_comments: CommentRun,
    pub before_lparen_comments: CommentRun,
    pub parameters: &'a [&'a FunctionTypeParameter<'a>],
    pub before_rparen_comments: CommentRun,
    pub return_type: Option<FunctionReturnType<'a>>,
}
