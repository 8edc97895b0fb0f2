//! Statement parsing.
//!
//! Declaration statements insert every declared name into the current
//! scope as it is parsed; blocks and `for` statements open their own
//! scope before their bodies. Back-references (name to part, part to
//! statement, loop variable to loop) are bound as soon as the owning
//! node exists.

use hdlc_ast::stmt::{
    BlockStatement, BreakStatement, ConstPart, ConstStatement, ContinueStatement, ElseClause,
    EmptyStatement, ExpressionStatement, ForParent, ForStatement, ForTo, ForTypeStatement,
    ForVariable, IfStatement, LetName, LetPart, LetStatement, MatchPart, MatchPattern,
    MatchStatement, NumberPattern, PortName, PortPart, PortStatement, RangePattern,
    RangePatternTo, RegInitializer, RegName, RegPart, RegStatement, ReturnStatement, Statement,
    TypeAliasStatement,
};
use hdlc_ast::symbol::SymbolRef;
use hdlc_ast::table::Scope;
use hdlc_ast::types::{Direction, TransparentTypeAlias};
use hdlc_lex::{CommentRun, TokenKind};
use hdlc_util::diagnostic::PResult;
use hdlc_util::span::Span;

use crate::Parser;

impl<'a, 'i> Parser<'a, 'i> {
    /// Statements until the closing `}` (or end of file, which the
    /// caller then rejects).
    pub(crate) fn parse_statement_list(&mut self) -> PResult<Vec<&'a Statement<'a>>> {
        let mut statements = Vec::new();
        while !matches!(self.peek_kind()?, TokenKind::RBrace | TokenKind::Eof) {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    pub(crate) fn parse_statement(&mut self) -> PResult<&'a Statement<'a>> {
        match self.peek_kind()? {
            TokenKind::KwModule => {
                let module = self.parse_module(false)?;
                Ok(self.ctx.alloc(Statement::Module(module)))
            }
            TokenKind::KwInterface => {
                let interface = self.parse_interface()?;
                Ok(self.ctx.alloc(Statement::Interface(interface)))
            }
            TokenKind::KwEnum => {
                let enum_decl = self.parse_enum()?;
                Ok(self.ctx.alloc(Statement::Enum(enum_decl)))
            }
            TokenKind::KwFunction => {
                let function = self.parse_function()?;
                Ok(self.ctx.alloc(Statement::Function(function)))
            }
            TokenKind::KwBundle => {
                let bundle = self.parse_bundle()?;
                Ok(self.ctx.alloc(Statement::Bundle(bundle)))
            }
            TokenKind::KwType => self.parse_type_alias_statement(),
            TokenKind::KwConst => self.parse_const_statement(),
            TokenKind::KwLet => self.parse_let_statement(),
            TokenKind::KwInput | TokenKind::KwOutput => self.parse_port_statement(),
            TokenKind::KwReg => self.parse_reg_statement(),
            TokenKind::KwIf => self.parse_if_statement(),
            TokenKind::KwFor => self.parse_for_statement(),
            TokenKind::KwMatch => self.parse_match_statement(),
            TokenKind::LBrace => self.parse_block_statement(),
            TokenKind::KwReturn => self.parse_return_statement(),
            TokenKind::KwBreak => {
                let break_kw = self.bump()?;
                let semicolon = self.expect(TokenKind::Semicolon)?;
                Ok(self.ctx.alloc(Statement::Break(BreakStatement {
                    span: Span::through(break_kw.token.span, semicolon.token.span),
                    before_break_comments: break_kw.comments,
                    before_semicolon_comments: semicolon.comments,
                })))
            }
            TokenKind::KwContinue => {
                let continue_kw = self.bump()?;
                let semicolon = self.expect(TokenKind::Semicolon)?;
                Ok(self.ctx.alloc(Statement::Continue(ContinueStatement {
                    span: Span::through(continue_kw.token.span, semicolon.token.span),
                    before_continue_comments: continue_kw.comments,
                    before_semicolon_comments: semicolon.comments,
                })))
            }
            TokenKind::Semicolon => {
                let semicolon = self.bump()?;
                Ok(self.ctx.alloc(Statement::Empty(EmptyStatement {
                    span: semicolon.token.span,
                    before_semicolon_comments: semicolon.comments,
                })))
            }
            _ => {
                let expression = self.parse_expression()?;
                let semicolon = self.expect(TokenKind::Semicolon)?;
                Ok(self.ctx.alloc(Statement::Expression(ExpressionStatement {
                    span: Span::through(expression.span(), semicolon.token.span),
                    expression,
                    before_semicolon_comments: semicolon.comments,
                })))
            }
        }
    }

    fn parse_type_alias_statement(&mut self) -> PResult<&'a Statement<'a>> {
        let type_kw = self.expect(TokenKind::KwType)?;
        let name = self.expect_msg(TokenKind::Ident, "expected: type name")?;
        let equal = self.expect(TokenKind::Eq)?;
        let target = self.parse_type_expr()?;
        let resolved = self.resolve_type_expr(target, Direction::Reg)?;
        let semicolon = self.expect(TokenKind::Semicolon)?;
        let alias = self.ctx.alloc(TransparentTypeAlias::new(
            self.symbol_data(name.token),
        ));
        if let Some(resolved) = resolved {
            alias.set_target(resolved);
        }
        self.insert_symbol(SymbolRef::TypeAlias(alias))?;
        Ok(self.ctx.alloc(Statement::TypeAlias(TypeAliasStatement {
            span: Span::through(type_kw.token.span, semicolon.token.span),
            before_type_comments: type_kw.comments,
            before_name_comments: name.comments,
            alias,
            before_equal_comments: equal.comments,
            target,
            before_semicolon_comments: semicolon.comments,
        })))
    }

    fn parse_const_statement(&mut self) -> PResult<&'a Statement<'a>> {
        let const_kw = self.expect(TokenKind::KwConst)?;
        let mut parts = Vec::new();
        let mut before_comma = CommentRun::default();
        loop {
            let name = self.expect_msg(TokenKind::Ident, "expected: const name")?;
            let equal = self.expect(TokenKind::Eq)?;
            let value = self.parse_expression()?;
            let part = self.ctx.alloc(ConstPart {
                span: Span::through(name.token.span, value.span()),
                before_comma_comments: before_comma,
                before_name_comments: name.comments,
                symbol: self.symbol_data(name.token),
                before_equal_comments: equal.comments,
                value,
            });
            self.insert_symbol(SymbolRef::ConstName(part))?;
            parts.push(part);
            if self.peek_kind()? == TokenKind::Comma {
                before_comma = self.bump()?.comments;
                continue;
            }
            break;
        }
        let semicolon = self.expect(TokenKind::Semicolon)?;
        Ok(self.ctx.alloc(Statement::Const(ConstStatement {
            span: Span::through(const_kw.token.span, semicolon.token.span),
            before_const_comments: const_kw.comments,
            parts: self.ctx.alloc_slice(&parts),
            before_semicolon_comments: semicolon.comments,
        })))
    }

    fn parse_let_statement(&mut self) -> PResult<&'a Statement<'a>> {
        let let_kw = self.expect(TokenKind::KwLet)?;
        let mut parts = Vec::new();
        let mut before_part_comma = CommentRun::default();
        loop {
            let mut names: Vec<&'a LetName<'a>> = Vec::new();
            let mut before_name_comma = CommentRun::default();
            loop {
                let name = self.expect_msg(TokenKind::Ident, "expected: name")?;
                let let_name = self.ctx.alloc(LetName::new(
                    name.token.span,
                    before_name_comma,
                    self.symbol_data(name.token),
                ));
                self.insert_symbol(SymbolRef::LetName(let_name))?;
                names.push(let_name);
                if self.peek_kind()? == TokenKind::Comma {
                    before_name_comma = self.bump()?.comments;
                    continue;
                }
                break;
            }
            let colon = self.expect(TokenKind::Colon)?;
            let ty = self.parse_type_expr()?;
            let resolved = self.resolve_type_expr(ty, Direction::Reg)?;
            let part = self.ctx.alloc(LetPart {
                span: Span::through(names[0].span, ty.span()),
                before_comma_comments: before_part_comma,
                names: self.ctx.alloc_slice(&names),
                before_colon_comments: colon.comments,
                ty,
                resolved,
            });
            for name in part.names {
                name.set_parent(part);
            }
            parts.push(part);
            if self.peek_kind()? == TokenKind::Comma {
                before_part_comma = self.bump()?.comments;
                continue;
            }
            break;
        }
        let semicolon = self.expect(TokenKind::Semicolon)?;
        Ok(self.ctx.alloc(Statement::Let(LetStatement {
            span: Span::through(let_kw.token.span, semicolon.token.span),
            before_let_comments: let_kw.comments,
            parts: self.ctx.alloc_slice(&parts),
            before_semicolon_comments: semicolon.comments,
        })))
    }

    fn parse_port_statement(&mut self) -> PResult<&'a Statement<'a>> {
        let keyword = self.bump()?;
        let is_input = keyword.token.kind == TokenKind::KwInput;
        let direction = if is_input {
            Direction::Input
        } else {
            Direction::Output
        };
        let name_error = if is_input {
            "expected: input name"
        } else {
            "expected: output name"
        };
        let mut parts: Vec<&'a PortPart<'a>> = Vec::new();
        let mut before_part_comma = CommentRun::default();
        loop {
            let mut names: Vec<&'a PortName<'a>> = Vec::new();
            let mut before_name_comma = CommentRun::default();
            loop {
                let name = self.expect_msg(TokenKind::Ident, name_error)?;
                let port_name = self.ctx.alloc(PortName::new(
                    name.token.span,
                    before_name_comma,
                    self.symbol_data(name.token),
                ));
                self.insert_symbol(SymbolRef::PortName(port_name))?;
                names.push(port_name);
                if self.peek_kind()? == TokenKind::Comma {
                    before_name_comma = self.bump()?.comments;
                    continue;
                }
                break;
            }
            let colon = self.expect(TokenKind::Colon)?;
            let ty = self.parse_type_expr()?;
            let resolved = self.resolve_type_expr(ty, direction)?;
            let part = self.ctx.alloc(PortPart::new(
                Span::through(names[0].span, ty.span()),
                before_part_comma,
                self.ctx.alloc_slice(&names),
                colon.comments,
                ty,
                resolved,
            ));
            for name in part.names {
                name.set_parent(part);
            }
            parts.push(part);
            if self.peek_kind()? == TokenKind::Comma {
                before_part_comma = self.bump()?.comments;
                continue;
            }
            break;
        }
        let semicolon = self.expect(TokenKind::Semicolon)?;
        let statement = self.ctx.alloc(Statement::Port(PortStatement {
            span: Span::through(keyword.token.span, semicolon.token.span),
            before_keyword_comments: keyword.comments,
            is_input,
            parts: self.ctx.alloc_slice(&parts),
            before_semicolon_comments: semicolon.comments,
        }));
        if let Statement::Port(port_statement) = statement {
            for part in port_statement.parts {
                part.set_parent(port_statement);
            }
        }
        Ok(statement)
    }

    fn parse_reg_statement(&mut self) -> PResult<&'a Statement<'a>> {
        let reg_kw = self.expect(TokenKind::KwReg)?;
        let mut parts: Vec<&'a RegPart<'a>> = Vec::new();
        let mut before_part_comma = CommentRun::default();
        loop {
            let mut names: Vec<&'a RegName<'a>> = Vec::new();
            let mut before_name_comma = CommentRun::default();
            loop {
                let name = self.expect_msg(TokenKind::Ident, "expected: reg name")?;
                let mut span = name.token.span;
                let initializer = if self.peek_kind()? == TokenKind::Eq {
                    let equal = self.bump()?;
                    let value = self.parse_expression()?;
                    span = Span::through(span, value.span());
                    Some(RegInitializer {
                        before_equal_comments: equal.comments,
                        value,
                    })
                } else {
                    None
                };
                let reg_name = self.ctx.alloc(RegName::new(
                    span,
                    before_name_comma,
                    self.symbol_data(name.token),
                    initializer,
                ));
                self.insert_symbol(SymbolRef::RegName(reg_name))?;
                names.push(reg_name);
                if self.peek_kind()? == TokenKind::Comma {
                    before_name_comma = self.bump()?.comments;
                    continue;
                }
                break;
            }
            let colon = self.expect(TokenKind::Colon)?;
            let ty = self.parse_type_expr()?;
            let resolved = self.resolve_type_expr(ty, Direction::Reg)?;
            let part = self.ctx.alloc(RegPart {
                span: Span::through(names[0].span, ty.span()),
                before_comma_comments: before_part_comma,
                names: self.ctx.alloc_slice(&names),
                before_colon_comments: colon.comments,
                ty,
                resolved,
            });
            for name in part.names {
                name.set_parent(part);
            }
            parts.push(part);
            if self.peek_kind()? == TokenKind::Comma {
                before_part_comma = self.bump()?.comments;
                continue;
            }
            break;
        }
        let semicolon = self.expect(TokenKind::Semicolon)?;
        Ok(self.ctx.alloc(Statement::Reg(RegStatement {
            span: Span::through(reg_kw.token.span, semicolon.token.span),
            before_reg_comments: reg_kw.comments,
            parts: self.ctx.alloc_slice(&parts),
            before_semicolon_comments: semicolon.comments,
        })))
    }

    fn parse_if_statement(&mut self) -> PResult<&'a Statement<'a>> {
        let if_kw = self.expect(TokenKind::KwIf)?;
        let lparen = self.expect(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        let rparen = self.expect(TokenKind::RParen)?;
        let then_statement = self.parse_statement()?;
        let mut span = Span::through(if_kw.token.span, then_statement.span());
        let else_clause = if self.peek_kind()? == TokenKind::KwElse {
            let else_kw = self.bump()?;
            let statement = self.parse_statement()?;
            span = Span::through(span, statement.span());
            Some(ElseClause {
                before_else_comments: else_kw.comments,
                statement,
            })
        } else {
            None
        };
        Ok(self.ctx.alloc(Statement::If(IfStatement {
            span,
            before_if_comments: if_kw.comments,
            before_lparen_comments: lparen.comments,
            condition,
            before_rparen_comments: rparen.comments,
            then_statement,
            else_clause,
        })))
    }

    fn parse_for_statement(&mut self) -> PResult<&'a Statement<'a>> {
        let for_kw = self.expect(TokenKind::KwFor)?;
        let lparen = self.expect(TokenKind::LParen)?;
        let table = self.ctx.new_symbol_table();
        let scope = Scope {
            table,
            chain: self.current_chain,
        };
        if self.peek_kind()? == TokenKind::KwType {
            let type_kw = self.bump()?;
            let name = self.expect_msg(TokenKind::Ident, "expected: for type name")?;
            return self.with_scope(table, |p| {
                let variable = p.ctx.alloc(ForVariable::new(
                    name.token.span,
                    name.comments,
                    p.symbol_data(name.token),
                ));
                p.insert_symbol(SymbolRef::ForVariable(variable))?;
                let in_kw = p.expect(TokenKind::KwIn)?;
                let ty = p.parse_type_expr()?;
                let rparen = p.expect(TokenKind::RParen)?;
                let body = p.parse_statement()?;
                let statement = p.ctx.alloc(Statement::ForType(ForTypeStatement {
                    span: Span::through(for_kw.token.span, body.span()),
                    scope,
                    before_for_comments: for_kw.comments,
                    before_lparen_comments: lparen.comments,
                    before_type_comments: type_kw.comments,
                    variable,
                    before_in_comments: in_kw.comments,
                    ty,
                    before_rparen_comments: rparen.comments,
                    body,
                }));
                if let Statement::ForType(for_type) = statement {
                    variable.set_parent(ForParent::Type(for_type));
                }
                Ok(statement)
            });
        }
        let name = self.expect_msg(TokenKind::Ident, "expected: for variable name")?;
        self.with_scope(table, |p| {
            let variable = p.ctx.alloc(ForVariable::new(
                name.token.span,
                name.comments,
                p.symbol_data(name.token),
            ));
            p.insert_symbol(SymbolRef::ForVariable(variable))?;
            let in_kw = p.expect(TokenKind::KwIn)?;
            let first = p.parse_expression()?;
            let to = if p.peek_kind()? == TokenKind::KwTo {
                let to_kw = p.bump()?;
                let end = p.parse_expression()?;
                Some(ForTo {
                    before_to_comments: to_kw.comments,
                    end,
                })
            } else {
                None
            };
            let rparen = p.expect(TokenKind::RParen)?;
            let body = p.parse_statement()?;
            let statement = p.ctx.alloc(Statement::For(ForStatement {
                span: Span::through(for_kw.token.span, body.span()),
                scope,
                before_for_comments: for_kw.comments,
                before_lparen_comments: lparen.comments,
                variable,
                before_in_comments: in_kw.comments,
                first,
                to,
                before_rparen_comments: rparen.comments,
                body,
            }));
            if let Statement::For(for_statement) = statement {
                variable.set_parent(ForParent::Numeric(for_statement));
            }
            Ok(statement)
        })
    }

    fn parse_match_statement(&mut self) -> PResult<&'a Statement<'a>> {
        let match_kw = self.expect(TokenKind::KwMatch)?;
        let lparen = self.expect(TokenKind::LParen)?;
        let matchee = self.parse_expression()?;
        let rparen = self.expect(TokenKind::RParen)?;
        let lbrace = self.expect(TokenKind::LBrace)?;
        let mut parts = Vec::new();
        while !matches!(self.peek_kind()?, TokenKind::RBrace | TokenKind::Eof) {
            parts.push(self.parse_match_part()?);
        }
        let rbrace = self.expect(TokenKind::RBrace)?;
        Ok(self.ctx.alloc(Statement::Match(MatchStatement {
            span: Span::through(match_kw.token.span, rbrace.token.span),
            before_match_comments: match_kw.comments,
            before_lparen_comments: lparen.comments,
            matchee,
            before_rparen_comments: rparen.comments,
            before_lbrace_comments: lbrace.comments,
            parts: self.ctx.alloc_slice(&parts),
            before_rbrace_comments: rbrace.comments,
        })))
    }

    fn parse_match_part(&mut self) -> PResult<&'a MatchPart<'a>> {
        let mut patterns = Vec::new();
        patterns.push(self.parse_match_pattern(CommentRun::default())?);
        while self.peek_kind()? == TokenKind::Comma {
            let comma = self.bump()?;
            patterns.push(self.parse_match_pattern(comma.comments)?);
        }
        let fat_arrow = self.expect(TokenKind::FatArrow)?;
        let statement = self.parse_statement()?;
        Ok(self.ctx.alloc(MatchPart {
            span: Span::through(patterns[0].span(), statement.span()),
            patterns: self.ctx.alloc_slice(&patterns),
            before_fat_arrow_comments: fat_arrow.comments,
            statement,
        }))
    }

    fn parse_match_pattern(
        &mut self,
        before_comma_comments: CommentRun,
    ) -> PResult<&'a MatchPattern<'a>> {
        if self.peek_kind()?.is_integer_pattern() {
            let pattern = self.bump()?;
            return Ok(self.ctx.alloc(MatchPattern::Number(NumberPattern {
                span: pattern.token.span,
                before_comma_comments,
                before_literal_comments: pattern.comments,
                token: pattern.token,
            })));
        }
        let first = self.parse_expression()?;
        let mut span = first.span();
        let to = if self.peek_kind()? == TokenKind::KwTo {
            let to_kw = self.bump()?;
            let end = self.parse_expression()?;
            span = Span::through(span, end.span());
            Some(RangePatternTo {
                before_to_comments: to_kw.comments,
                end,
            })
        } else {
            None
        };
        Ok(self.ctx.alloc(MatchPattern::Range(RangePattern {
            span,
            before_comma_comments,
            first,
            to,
        })))
    }

    fn parse_block_statement(&mut self) -> PResult<&'a Statement<'a>> {
        let lbrace = self.expect(TokenKind::LBrace)?;
        let table = self.ctx.new_symbol_table();
        let scope = Scope {
            table,
            chain: self.current_chain,
        };
        let statements = self.with_scope(table, |p| p.parse_statement_list())?;
        let rbrace = self.expect(TokenKind::RBrace)?;
        Ok(self.ctx.alloc(Statement::Block(BlockStatement {
            span: Span::through(lbrace.token.span, rbrace.token.span),
            before_lbrace_comments: lbrace.comments,
            scope,
            statements: self.ctx.alloc_slice(&statements),
            before_rbrace_comments: rbrace.comments,
        })))
    }

    fn parse_return_statement(&mut self) -> PResult<&'a Statement<'a>> {
        let return_kw = self.expect(TokenKind::KwReturn)?;
        let value = if self.peek_kind()? != TokenKind::Semicolon {
            Some(self.parse_expression()?)
        } else {
            None
        };
        let semicolon = self.expect(TokenKind::Semicolon)?;
        Ok(self.ctx.alloc(Statement::Return(ReturnStatement {
            span: Span::through(return_kw.token.span, semicolon.token.span),
            before_return_comments: return_kw.comments,
            value,
            before_semicolon_comments: semicolon.comments,
        })))
    }
}
