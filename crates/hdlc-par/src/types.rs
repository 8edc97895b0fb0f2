//! Surface type parsing and on-the-spot semantic resolution.
//!
//! `parse_type_expr` builds the written form; `resolve_type_expr` turns
//! it into a pooled semantic type where that needs no elaboration.
//! Width expressions inside `uint<…>`/`sint<…>` parse at shift
//! precedence so the closing `>` stays a delimiter; anything lower
//! needs parentheses.

use hdlc_ast::expr::Expression;
use hdlc_ast::type_expr::{
    BuiltinType, BuiltinTypeName, FlipType, FunctionReturnType, FunctionType,
    FunctionTypeParameter, FunctionTypeParameterName, MemoryType, ScopedIdType, SIntType,
    TupleType, TupleTypeElement, TypeExpr, TypeOfType, UIntType,
};
use hdlc_ast::types::{Direction, TypeRef};
use hdlc_lex::{CommentRun, TokenKind};
use hdlc_num::{BigInt, BitVectorKind, MAX_BIT_WIDTH};
use hdlc_util::diagnostic::{DiagnosticKind, PResult};
use hdlc_util::span::Span;
use num_traits::ToPrimitive;

use crate::Parser;

impl<'a, 'i> Parser<'a, 'i> {
    pub(crate) fn parse_type_expr(&mut self) -> PResult<&'a TypeExpr<'a>> {
        let next = self.peek()?;
        match next.token.kind {
            TokenKind::ColonColon | TokenKind::Ident => {
                let id = self.parse_scoped_id()?;
                if !id.symbol.is_type_symbol() {
                    return Err(self.error(
                        DiagnosticKind::Resolution,
                        id.name_span,
                        "expected: type name",
                    ));
                }
                Ok(self
                    .ctx
                    .alloc(TypeExpr::ScopedId(ScopedIdType { span: id.span, id })))
            }
            TokenKind::KwFlip | TokenKind::Bang => {
                let flip = self.bump()?;
                let inner = self.parse_type_expr()?;
                Ok(self.ctx.alloc(TypeExpr::Flip(FlipType {
                    span: Span::through(flip.token.span, inner.span()),
                    before_flip_comments: flip.comments,
                    inner,
                })))
            }
            TokenKind::KwTypeOf => {
                let typeof_kw = self.bump()?;
                let lparen = self.expect(TokenKind::LParen)?;
                let expression = self.parse_expression()?;
                let rparen = self.expect(TokenKind::RParen)?;
                Ok(self.ctx.alloc(TypeExpr::TypeOf(TypeOfType {
                    span: Span::through(typeof_kw.token.span, rparen.token.span),
                    before_typeof_comments: typeof_kw.comments,
                    before_lparen_comments: lparen.comments,
                    expression,
                    before_rparen_comments: rparen.comments,
                })))
            }
            TokenKind::KwUInt => {
                let uint_kw = self.bump()?;
                let langle = self.expect(TokenKind::Lt)?;
                let width = self.parse_shift_expression()?;
                let rangle = self.expect(TokenKind::Gt)?;
                Ok(self.ctx.alloc(TypeExpr::UInt(UIntType {
                    span: Span::through(uint_kw.token.span, rangle.token.span),
                    before_uint_comments: uint_kw.comments,
                    before_langle_comments: langle.comments,
                    width,
                    before_rangle_comments: rangle.comments,
                })))
            }
            TokenKind::KwSInt => {
                let sint_kw = self.bump()?;
                let langle = self.expect(TokenKind::Lt)?;
                let width = self.parse_shift_expression()?;
                let rangle = self.expect(TokenKind::Gt)?;
                Ok(self.ctx.alloc(TypeExpr::SInt(SIntType {
                    span: Span::through(sint_kw.token.span, rangle.token.span),
                    before_sint_comments: sint_kw.comments,
                    before_langle_comments: langle.comments,
                    width,
                    before_rangle_comments: rangle.comments,
                })))
            }
            TokenKind::KwBit
            | TokenKind::KwU8
            | TokenKind::KwU16
            | TokenKind::KwU32
            | TokenKind::KwU64
            | TokenKind::KwS8
            | TokenKind::KwS16
            | TokenKind::KwS32
            | TokenKind::KwS64 => {
                let name_token = self.bump()?;
                let name = match name_token.token.kind {
                    TokenKind::KwBit => BuiltinTypeName::Bit,
                    TokenKind::KwU8 => BuiltinTypeName::U8,
                    TokenKind::KwU16 => BuiltinTypeName::U16,
                    TokenKind::KwU32 => BuiltinTypeName::U32,
                    TokenKind::KwU64 => BuiltinTypeName::U64,
                    TokenKind::KwS8 => BuiltinTypeName::S8,
                    TokenKind::KwS16 => BuiltinTypeName::S16,
                    TokenKind::KwS32 => BuiltinTypeName::S32,
                    _ => BuiltinTypeName::S64,
                };
                Ok(self.ctx.alloc(TypeExpr::Builtin(BuiltinType {
                    span: name_token.token.span,
                    before_name_comments: name_token.comments,
                    name,
                })))
            }
            TokenKind::KwMemory => {
                let memory_kw = self.bump()?;
                let lbracket = self.expect(TokenKind::LBracket)?;
                let size = self.parse_expression()?;
                let rbracket = self.expect(TokenKind::RBracket)?;
                let colon = self.expect(TokenKind::Colon)?;
                let element = self.parse_type_expr()?;
                Ok(self.ctx.alloc(TypeExpr::Memory(MemoryType {
                    span: Span::through(memory_kw.token.span, element.span()),
                    before_memory_comments: memory_kw.comments,
                    before_lbracket_comments: lbracket.comments,
                    size,
                    before_rbracket_comments: rbracket.comments,
                    before_colon_comments: colon.comments,
                    element,
                })))
            }
            TokenKind::LBrace => {
                let lbrace = self.bump()?;
                let mut elements = Vec::new();
                let mut has_trailing_comma = false;
                while !matches!(self.peek_kind()?, TokenKind::RBrace | TokenKind::Eof) {
                    let ty = self.parse_type_expr()?;
                    if self.peek_kind()? == TokenKind::Comma {
                        let comma = self.bump()?;
                        elements.push(TupleTypeElement {
                            ty,
                            before_comma_comments: comma.comments,
                        });
                        has_trailing_comma = true;
                        continue;
                    }
                    elements.push(TupleTypeElement {
                        ty,
                        before_comma_comments: CommentRun::default(),
                    });
                    has_trailing_comma = false;
                    break;
                }
                let rbrace = self.expect(TokenKind::RBrace)?;
                Ok(self.ctx.alloc(TypeExpr::Tuple(TupleType {
                    span: Span::through(lbrace.token.span, rbrace.token.span),
                    before_lbrace_comments: lbrace.comments,
                    elements: self.ctx.alloc_slice(&elements),
                    has_trailing_comma,
                    before_rbrace_comments: rbrace.comments,
                })))
            }
            TokenKind::KwFunction => self.parse_function_type(),
            _ => Err(self.error(DiagnosticKind::Syntax, next.token.span, "expected: type")),
        }
    }

    fn parse_function_type(&mut self) -> PResult<&'a TypeExpr<'a>> {
        let function_kw = self.expect(TokenKind::KwFunction)?;
        let lparen = self.expect(TokenKind::LParen)?;
        let mut parameters = Vec::new();
        if self.peek_kind()? != TokenKind::RParen {
            let mut before_comma = CommentRun::default();
            loop {
                parameters.push(self.parse_function_type_parameter(before_comma)?);
                if self.peek_kind()? == TokenKind::Comma {
                    before_comma = self.bump()?.comments;
                    continue;
                }
                break;
            }
        }
        let rparen = self.expect(TokenKind::RParen)?;
        let mut span = Span::through(function_kw.token.span, rparen.token.span);
        let return_type = if self.peek_kind()? == TokenKind::Colon {
            let colon = self.bump()?;
            let ty = self.parse_type_expr()?;
            span = Span::through(span, ty.span());
            Some(FunctionReturnType {
                before_colon_comments: colon.comments,
                ty,
            })
        } else {
            None
        };
        Ok(self.ctx.alloc(TypeExpr::Function(FunctionType {
            span,
            before_function_comments: function_kw.comments,
            before_lparen_comments: lparen.comments,
            parameters: self.ctx.alloc_slice(&parameters),
            before_rparen_comments: rparen.comments,
            return_type,
        })))
    }

    /// `name : Type` or a bare type. Telling the two apart needs a
    /// second token of lookahead, so the stream is snapshotted and
    /// rolled back when the identifier turns out to start a type.
    fn parse_function_type_parameter(
        &mut self,
        before_comma_comments: CommentRun,
    ) -> PResult<&'a FunctionTypeParameter<'a>> {
        if self.peek_kind()? == TokenKind::Ident {
            let snapshot = self.lexer.clone();
            let name = self.bump()?;
            if self.peek_kind()? == TokenKind::Colon {
                let colon = self.bump()?;
                let ty = self.parse_type_expr()?;
                return Ok(self.ctx.alloc(FunctionTypeParameter {
                    span: Span::through(name.token.span, ty.span()),
                    before_comma_comments,
                    name: Some(FunctionTypeParameterName {
                        before_name_comments: name.comments,
                        name_span: name.token.span,
                        name: self.intern_token(name.token),
                        before_colon_comments: colon.comments,
                    }),
                    ty,
                }));
            }
            self.lexer = snapshot;
        }
        let ty = self.parse_type_expr()?;
        Ok(self.ctx.alloc(FunctionTypeParameter {
            span: ty.span(),
            before_comma_comments,
            name: None,
            ty,
        }))
    }

    // =========================================================================
    // Semantic resolution
    // =========================================================================

    /// Resolve a surface type to a pooled semantic type when possible.
    /// `direction` lands on the bit-vector leaves of the bit-vector
    /// grammar (builtin names and literal-width `uint`/`sint`); named
    /// types keep their stored direction. Width range violations are
    /// fatal here, at the width expression.
    pub(crate) fn resolve_type_expr(
        &mut self,
        ty: &'a TypeExpr<'a>,
        direction: Direction,
    ) -> PResult<Option<TypeRef<'a>>> {
        match ty {
            TypeExpr::Builtin(builtin) => Ok(Some(TypeRef::BitVector(
                self.ctx
                    .types
                    .bit_vector_type(direction, builtin.name.kind(), builtin.name.bit_width()),
            ))),
            TypeExpr::UInt(uint) => {
                self.resolve_sized(uint.width, direction, BitVectorKind::Unsigned)
            }
            TypeExpr::SInt(sint) => {
                self.resolve_sized(sint.width, direction, BitVectorKind::Signed)
            }
            TypeExpr::Flip(flip) => Ok(self
                .resolve_type_expr(flip.inner, direction)?
                .map(TypeRef::flipped)),
            TypeExpr::ScopedId(scoped) => Ok(scoped.id.symbol.semantic_type()),
            TypeExpr::TypeOf(_)
            | TypeExpr::Memory(_)
            | TypeExpr::Tuple(_)
            | TypeExpr::Function(_) => Ok(None),
        }
    }

    fn resolve_sized(
        &mut self,
        width: &'a Expression<'a>,
        direction: Direction,
        kind: BitVectorKind,
    ) -> PResult<Option<TypeRef<'a>>> {
        let Expression::Number(number) = width else {
            // width depends on constants or template parameters;
            // elaboration's job
            return Ok(None);
        };
        let value = number.value(self.source).value;
        if value < BigInt::from(1) {
            return Err(self.error(
                DiagnosticKind::Semantic,
                width.span(),
                "bit vector must be non-zero width",
            ));
        }
        if value > BigInt::from(MAX_BIT_WIDTH) {
            return Err(self.error(
                DiagnosticKind::Semantic,
                width.span(),
                "bit vector is too wide",
            ));
        }
        let bit_width = value.to_usize().unwrap_or(MAX_BIT_WIDTH);
        Ok(Some(TypeRef::BitVector(
            self.ctx.types.bit_vector_type(direction, kind, bit_width),
        )))
    }
}
