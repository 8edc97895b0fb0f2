//! Expression parsing: precedence climbing over the fixed tier table,
//! postfix operators over primaries, and scoped-id resolution.
//!
//! The tiers, tightest first: postfix `() [] .`; prefix `! ~ + - & | ^`;
//! `* / %`; `+ -`; `<< >>`; `< <= > >=`; `== !=`; `&`; `^`; `|`; `&&`;
//! `||`; ternary `?:` (right-assoc); `=` and `<->` (right-assoc).

use hdlc_ast::expr::{
    BinaryExpression, BinaryOp, CallArgument, CallExpression, CastExpression, CatExpression,
    ConditionalExpression, Expression, FillExpression, ListElement, ListExpression,
    MemberExpression, NumberExpression, ParenExpression, PopCountExpression, ScopedIdExpression,
    SliceExpression, SliceTo, UnaryExpression, UnaryOp,
};
use hdlc_ast::scoped_id::ScopedId;
use hdlc_ast::template::{
    TemplateArgument, TemplateArgumentList, TypeTemplateArgument, ValueTemplateArgument,
};
use hdlc_lex::{CommentRun, TokenKind};
use hdlc_util::diagnostic::{DiagnosticKind, PResult};
use hdlc_util::span::Span;

use crate::Parser;

impl<'a, 'i> Parser<'a, 'i> {
    pub(crate) fn parse_expression(&mut self) -> PResult<&'a Expression<'a>> {
        self.parse_assignment_expression()
    }

    /// `=` and `<->`, right-associative.
    fn parse_assignment_expression(&mut self) -> PResult<&'a Expression<'a>> {
        let lhs = self.parse_conditional_expression()?;
        let op = match self.peek_kind()? {
            TokenKind::Eq => BinaryOp::Assign,
            TokenKind::Connect => BinaryOp::Connect,
            _ => return Ok(lhs),
        };
        let op_token = self.bump()?;
        let rhs = self.parse_assignment_expression()?;
        Ok(self.ctx.alloc(Expression::Binary(BinaryExpression {
            span: Span::through(lhs.span(), rhs.span()),
            lhs,
            before_op_comments: op_token.comments,
            op,
            rhs,
        })))
    }

    /// Ternary `?:`. The then branch takes a full expression; the else
    /// branch continues at the ternary/assignment tier, so chained
    /// conditionals associate to the right.
    fn parse_conditional_expression(&mut self) -> PResult<&'a Expression<'a>> {
        let condition = self.parse_logical_or_expression()?;
        if self.peek_kind()? != TokenKind::Question {
            return Ok(condition);
        }
        let question = self.bump()?;
        let then_expression = self.parse_expression()?;
        let colon = self.expect(TokenKind::Colon)?;
        let else_expression = self.parse_assignment_expression()?;
        Ok(self
            .ctx
            .alloc(Expression::Conditional(ConditionalExpression {
                span: Span::through(condition.span(), else_expression.span()),
                condition,
                before_question_comments: question.comments,
                then_expression,
                before_colon_comments: colon.comments,
                else_expression,
            })))
    }

    fn parse_left_assoc(
        &mut self,
        operators: &[(TokenKind, BinaryOp)],
        next: fn(&mut Self) -> PResult<&'a Expression<'a>>,
    ) -> PResult<&'a Expression<'a>> {
        let mut lhs = next(self)?;
        loop {
            let peeked = self.peek_kind()?;
            let Some(&(_, op)) = operators.iter().find(|&&(kind, _)| kind == peeked) else {
                break;
            };
            let op_token = self.bump()?;
            let rhs = next(self)?;
            lhs = self.ctx.alloc(Expression::Binary(BinaryExpression {
                span: Span::through(lhs.span(), rhs.span()),
                lhs,
                before_op_comments: op_token.comments,
                op,
                rhs,
            }));
        }
        Ok(lhs)
    }

    fn parse_logical_or_expression(&mut self) -> PResult<&'a Expression<'a>> {
        self.parse_left_assoc(
            &[(TokenKind::OrOr, BinaryOp::LogicalOr)],
            Self::parse_logical_and_expression,
        )
    }

    fn parse_logical_and_expression(&mut self) -> PResult<&'a Expression<'a>> {
        self.parse_left_assoc(
            &[(TokenKind::AndAnd, BinaryOp::LogicalAnd)],
            Self::parse_bitwise_or_expression,
        )
    }

    fn parse_bitwise_or_expression(&mut self) -> PResult<&'a Expression<'a>> {
        self.parse_left_assoc(
            &[(TokenKind::Pipe, BinaryOp::BitOr)],
            Self::parse_bitwise_xor_expression,
        )
    }

    fn parse_bitwise_xor_expression(&mut self) -> PResult<&'a Expression<'a>> {
        self.parse_left_assoc(
            &[(TokenKind::Caret, BinaryOp::BitXor)],
            Self::parse_bitwise_and_expression,
        )
    }

    fn parse_bitwise_and_expression(&mut self) -> PResult<&'a Expression<'a>> {
        self.parse_left_assoc(
            &[(TokenKind::Amp, BinaryOp::BitAnd)],
            Self::parse_equality_expression,
        )
    }

    fn parse_equality_expression(&mut self) -> PResult<&'a Expression<'a>> {
        self.parse_left_assoc(
            &[
                (TokenKind::EqEq, BinaryOp::Eq),
                (TokenKind::Ne, BinaryOp::Ne),
            ],
            Self::parse_relational_expression,
        )
    }

    fn parse_relational_expression(&mut self) -> PResult<&'a Expression<'a>> {
        self.parse_left_assoc(
            &[
                (TokenKind::Lt, BinaryOp::Lt),
                (TokenKind::Le, BinaryOp::Le),
                (TokenKind::Gt, BinaryOp::Gt),
                (TokenKind::Ge, BinaryOp::Ge),
            ],
            Self::parse_shift_expression,
        )
    }

    pub(crate) fn parse_shift_expression(&mut self) -> PResult<&'a Expression<'a>> {
        self.parse_left_assoc(
            &[
                (TokenKind::Shl, BinaryOp::Shl),
                (TokenKind::Shr, BinaryOp::Shr),
            ],
            Self::parse_additive_expression,
        )
    }

    fn parse_additive_expression(&mut self) -> PResult<&'a Expression<'a>> {
        self.parse_left_assoc(
            &[
                (TokenKind::Plus, BinaryOp::Add),
                (TokenKind::Minus, BinaryOp::Sub),
            ],
            Self::parse_multiplicative_expression,
        )
    }

    fn parse_multiplicative_expression(&mut self) -> PResult<&'a Expression<'a>> {
        self.parse_left_assoc(
            &[
                (TokenKind::Star, BinaryOp::Mul),
                (TokenKind::Slash, BinaryOp::Div),
                (TokenKind::Percent, BinaryOp::Rem),
            ],
            Self::parse_unary_expression,
        )
    }

    fn parse_unary_expression(&mut self) -> PResult<&'a Expression<'a>> {
        let op = match self.peek_kind()? {
            TokenKind::Bang => UnaryOp::LogicalNot,
            TokenKind::Tilde => UnaryOp::BitNot,
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Minus => UnaryOp::Minus,
            TokenKind::Amp => UnaryOp::AndReduce,
            TokenKind::Pipe => UnaryOp::OrReduce,
            TokenKind::Caret => UnaryOp::XorReduce,
            _ => return self.parse_postfix_expression(),
        };
        let op_token = self.bump()?;
        let operand = self.parse_unary_expression()?;
        Ok(self.ctx.alloc(Expression::Unary(UnaryExpression {
            span: Span::through(op_token.token.span, operand.span()),
            before_op_comments: op_token.comments,
            op,
            operand,
        })))
    }

    /// Postfix `()`, `[]`, `.` over a primary.
    fn parse_postfix_expression(&mut self) -> PResult<&'a Expression<'a>> {
        let mut expression = self.parse_primary_expression()?;
        loop {
            match self.peek_kind()? {
                TokenKind::LParen => {
                    let lparen = self.bump()?;
                    let mut arguments = Vec::new();
                    if !matches!(self.peek_kind()?, TokenKind::RParen | TokenKind::Eof) {
                        let mut before_comma = CommentRun::default();
                        loop {
                            let argument = self.parse_expression()?;
                            arguments.push(CallArgument {
                                before_comma_comments: before_comma,
                                expression: argument,
                            });
                            if self.peek_kind()? == TokenKind::Comma {
                                before_comma = self.bump()?.comments;
                                continue;
                            }
                            break;
                        }
                    }
                    let rparen = self.expect(TokenKind::RParen)?;
                    expression = self.ctx.alloc(Expression::Call(CallExpression {
                        span: Span::through(expression.span(), rparen.token.span),
                        callee: expression,
                        before_lparen_comments: lparen.comments,
                        arguments: self.ctx.alloc_slice(&arguments),
                        before_rparen_comments: rparen.comments,
                    }));
                }
                TokenKind::LBracket => {
                    let lbracket = self.bump()?;
                    let start = self.parse_expression()?;
                    let to = if self.peek_kind()? == TokenKind::KwTo {
                        let to_kw = self.bump()?;
                        let end = self.parse_expression()?;
                        Some(SliceTo {
                            before_to_comments: to_kw.comments,
                            end,
                        })
                    } else {
                        None
                    };
                    let rbracket = self.expect(TokenKind::RBracket)?;
                    expression = self.ctx.alloc(Expression::Slice(SliceExpression {
                        span: Span::through(expression.span(), rbracket.token.span),
                        base: expression,
                        before_lbracket_comments: lbracket.comments,
                        start,
                        to,
                        before_rbracket_comments: rbracket.comments,
                    }));
                }
                TokenKind::Dot => {
                    let dot = self.bump()?;
                    let name = self.expect_msg(TokenKind::Ident, "expected: member name")?;
                    expression = self.ctx.alloc(Expression::Member(MemberExpression {
                        span: Span::through(expression.span(), name.token.span),
                        base: expression,
                        before_dot_comments: dot.comments,
                        before_name_comments: name.comments,
                        name_span: name.token.span,
                        name: self.intern_token(name.token),
                    }));
                }
                _ => break,
            }
        }
        Ok(expression)
    }

    fn parse_primary_expression(&mut self) -> PResult<&'a Expression<'a>> {
        let next = self.peek()?;
        match next.token.kind {
            TokenKind::ColonColon | TokenKind::Ident => {
                let id = self.parse_scoped_id()?;
                Ok(self.ctx.alloc(Expression::ScopedId(ScopedIdExpression {
                    span: id.span,
                    id,
                })))
            }
            kind if kind.is_integer() => {
                let number = self.bump()?;
                Ok(self.ctx.alloc(Expression::Number(NumberExpression {
                    span: number.token.span,
                    before_literal_comments: number.comments,
                    token: number.token,
                })))
            }
            kind if kind.is_integer_pattern() => Err(self.error(
                DiagnosticKind::Syntax,
                next.token.span,
                "number pattern not allowed here",
            )),
            TokenKind::LParen => {
                let lparen = self.bump()?;
                let expression = self.parse_expression()?;
                let rparen = self.expect(TokenKind::RParen)?;
                Ok(self.ctx.alloc(Expression::Paren(ParenExpression {
                    span: Span::through(lparen.token.span, rparen.token.span),
                    before_lparen_comments: lparen.comments,
                    expression,
                    before_rparen_comments: rparen.comments,
                })))
            }
            TokenKind::LBrace => {
                let lbrace = self.bump()?;
                let mut elements = Vec::new();
                let mut has_trailing_comma = false;
                while !matches!(self.peek_kind()?, TokenKind::RBrace | TokenKind::Eof) {
                    let expression = self.parse_expression()?;
                    if self.peek_kind()? == TokenKind::Comma {
                        let comma = self.bump()?;
                        elements.push(ListElement {
                            expression,
                            before_comma_comments: comma.comments,
                        });
                        has_trailing_comma = true;
                        continue;
                    }
                    elements.push(ListElement {
                        expression,
                        before_comma_comments: CommentRun::default(),
                    });
                    has_trailing_comma = false;
                    break;
                }
                let rbrace = self.expect(TokenKind::RBrace)?;
                Ok(self.ctx.alloc(Expression::List(ListExpression {
                    span: Span::through(lbrace.token.span, rbrace.token.span),
                    before_lbrace_comments: lbrace.comments,
                    elements: self.ctx.alloc_slice(&elements),
                    has_trailing_comma,
                    before_rbrace_comments: rbrace.comments,
                })))
            }
            TokenKind::KwCast => {
                let cast_kw = self.bump()?;
                let bang = self.expect(TokenKind::Bang)?;
                let lbrace = self.expect(TokenKind::LBrace)?;
                let ty = self.parse_type_expr()?;
                let rbrace = self.expect(TokenKind::RBrace)?;
                let lparen = self.expect(TokenKind::LParen)?;
                let expression = self.parse_expression()?;
                let rparen = self.expect(TokenKind::RParen)?;
                Ok(self.ctx.alloc(Expression::Cast(CastExpression {
                    span: Span::through(cast_kw.token.span, rparen.token.span),
                    before_cast_comments: cast_kw.comments,
                    before_bang_comments: bang.comments,
                    before_lbrace_comments: lbrace.comments,
                    ty,
                    before_rbrace_comments: rbrace.comments,
                    before_lparen_comments: lparen.comments,
                    expression,
                    before_rparen_comments: rparen.comments,
                })))
            }
            TokenKind::KwFill => {
                let fill_kw = self.bump()?;
                let lparen = self.expect(TokenKind::LParen)?;
                let count = self.parse_expression()?;
                let comma = self.expect(TokenKind::Comma)?;
                let value = self.parse_expression()?;
                let rparen = self.expect(TokenKind::RParen)?;
                Ok(self.ctx.alloc(Expression::Fill(FillExpression {
                    span: Span::through(fill_kw.token.span, rparen.token.span),
                    before_fill_comments: fill_kw.comments,
                    before_lparen_comments: lparen.comments,
                    count,
                    before_comma_comments: comma.comments,
                    value,
                    before_rparen_comments: rparen.comments,
                })))
            }
            TokenKind::KwCat => {
                let cat_kw = self.bump()?;
                let lparen = self.expect(TokenKind::LParen)?;
                let first = self.parse_expression()?;
                let mut rest = Vec::new();
                while self.peek_kind()? == TokenKind::Comma {
                    let comma = self.bump()?;
                    let expression = self.parse_expression()?;
                    rest.push(CallArgument {
                        before_comma_comments: comma.comments,
                        expression,
                    });
                }
                let rparen = self.expect(TokenKind::RParen)?;
                Ok(self.ctx.alloc(Expression::Cat(CatExpression {
                    span: Span::through(cat_kw.token.span, rparen.token.span),
                    before_cat_comments: cat_kw.comments,
                    before_lparen_comments: lparen.comments,
                    first,
                    rest: self.ctx.alloc_slice(&rest),
                    before_rparen_comments: rparen.comments,
                })))
            }
            TokenKind::KwPopCount => {
                let popcount_kw = self.bump()?;
                let lparen = self.expect(TokenKind::LParen)?;
                let expression = self.parse_expression()?;
                let rparen = self.expect(TokenKind::RParen)?;
                Ok(self.ctx.alloc(Expression::PopCount(PopCountExpression {
                    span: Span::through(popcount_kw.token.span, rparen.token.span),
                    before_popcount_comments: popcount_kw.comments,
                    before_lparen_comments: lparen.comments,
                    expression,
                    before_rparen_comments: rparen.comments,
                })))
            }
            _ => Err(self.error(
                DiagnosticKind::Syntax,
                next.token.span,
                "expected: expression",
            )),
        }
    }

    // =========================================================================
    // Scoped identifiers
    // =========================================================================

    /// Parse and resolve `[::]name[!{args}] (::name[!{args}])*`. Every
    /// segment resolves eagerly: a leading `::` starts at the global
    /// scope, otherwise the innermost lookup chain; later segments look
    /// inside the previous symbol's scope.
    pub(crate) fn parse_scoped_id(&mut self) -> PResult<&'a ScopedId<'a>> {
        let start = self.peek()?.token.span;
        let (has_colon_colon, colon_colon_comments) =
            if self.peek_kind()? == TokenKind::ColonColon {
                (true, self.bump()?.comments)
            } else {
                (false, CommentRun::default())
            };
        let name = self.expect_msg(TokenKind::Ident, "expected: symbol name")?;
        let entry = self.intern_token(name.token);
        let symbol = if has_colon_colon {
            self.ctx.global_table().find(entry)
        } else {
            self.current_chain.find(entry)
        };
        let Some(symbol) = symbol else {
            return Err(self.error(
                DiagnosticKind::Resolution,
                name.token.span,
                "name not found",
            ));
        };
        let template_arguments = if self.peek_kind()? == TokenKind::Bang {
            Some(self.parse_template_arguments()?)
        } else {
            None
        };
        let end = template_arguments.map_or(name.token.span, |arguments| arguments.span);
        let mut id = self.ctx.alloc(ScopedId {
            span: Span::through(start, end),
            parent: None,
            before_colon_colon_comments: colon_colon_comments,
            has_colon_colon,
            before_name_comments: name.comments,
            name_span: name.token.span,
            name: entry,
            template_arguments,
            chain: self.current_chain,
            symbol,
        });
        while self.peek_kind()? == TokenKind::ColonColon {
            let colon_colon = self.bump()?;
            let name = self.expect_msg(TokenKind::Ident, "expected: symbol name")?;
            let Some(scope_table) = id.symbol.scope_table() else {
                return Err(self.error(
                    DiagnosticKind::Resolution,
                    id.name_span,
                    "name is not a scope",
                ));
            };
            let entry = self.intern_token(name.token);
            let Some(symbol) = scope_table.find(entry) else {
                return Err(self.error(
                    DiagnosticKind::Resolution,
                    name.token.span,
                    "name not found",
                ));
            };
            let template_arguments = if self.peek_kind()? == TokenKind::Bang {
                Some(self.parse_template_arguments()?)
            } else {
                None
            };
            let end = template_arguments.map_or(name.token.span, |arguments| arguments.span);
            id = self.ctx.alloc(ScopedId {
                span: Span::through(start, end),
                parent: Some(id),
                before_colon_colon_comments: colon_colon.comments,
                has_colon_colon: true,
                before_name_comments: name.comments,
                name_span: name.token.span,
                name: entry,
                template_arguments,
                chain: self.current_chain,
                symbol,
            });
        }
        Ok(id)
    }

    fn parse_template_arguments(&mut self) -> PResult<&'a TemplateArgumentList<'a>> {
        let bang = self.expect(TokenKind::Bang)?;
        let lbrace = self.expect(TokenKind::LBrace)?;
        let mut arguments = Vec::new();
        if !matches!(self.peek_kind()?, TokenKind::RBrace | TokenKind::Eof) {
            let mut before_comma = CommentRun::default();
            loop {
                arguments.push(self.parse_template_argument(before_comma)?);
                if self.peek_kind()? == TokenKind::Comma {
                    before_comma = self.bump()?.comments;
                    continue;
                }
                break;
            }
        }
        let rbrace = self.expect(TokenKind::RBrace)?;
        Ok(self.ctx.alloc(TemplateArgumentList {
            span: Span::through(bang.token.span, rbrace.token.span),
            before_bang_comments: bang.comments,
            before_lbrace_comments: lbrace.comments,
            arguments: self.ctx.alloc_slice(&arguments),
            before_rbrace_comments: rbrace.comments,
        }))
    }

    fn parse_template_argument(
        &mut self,
        before_comma_comments: CommentRun,
    ) -> PResult<&'a TemplateArgument<'a>> {
        if self.peek_kind()? == TokenKind::KwType {
            let type_kw = self.bump()?;
            let ty = self.parse_type_expr()?;
            return Ok(self
                .ctx
                .alloc(TemplateArgument::Type(TypeTemplateArgument {
                    span: Span::through(type_kw.token.span, ty.span()),
                    before_comma_comments,
                    before_type_comments: type_kw.comments,
                    ty,
                })));
        }
        let expression = self.parse_expression()?;
        Ok(self
            .ctx
            .alloc(TemplateArgument::Value(ValueTemplateArgument {
                span: expression.span(),
                before_comma_comments,
                expression,
            })))
    }
}
