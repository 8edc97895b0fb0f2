//! hdlc-par - The recursive-descent parser.
//!
//! One pass over the comment-grouped token stream builds the full AST
//! *and* the scope structure: every scope-introducing construct gets a
//! fresh symbol table and a lookup-chain link, declared names are
//! inserted strict-unique as they are seen, and scoped-name references
//! resolve immediately against the chain in effect (so forward
//! references within a scope fail at the reference). Type positions
//! that need no elaboration resolve to canonical semantic types on the
//! spot; `input`/`output`/`reg` statements bind their direction into
//! the resolved bit-vector types.
//!
//! The first error aborts the unit: it is reported to the handler and
//! `Err(FatalError)` unwinds out of [`parse_top_level_module`].

mod expr;
mod stmt;
mod types;

use hdlc_ast::context::Context;
use hdlc_ast::decl::{
    EnumDecl, EnumPart, Function, FunctionParameter, FunctionReturnClause, Import,
    ImplementsClause, Interface, Module, TopLevelModule,
};
use hdlc_ast::symbol::{SymbolData, SymbolRef};
use hdlc_ast::table::{Scope, SymbolLookupChain, SymbolLookupChainNode, SymbolTable};
use hdlc_ast::template::{
    TemplateParameter, TemplateParameterGroup, TemplateParameterKind, TemplateParameterList,
};
use hdlc_ast::type_expr::TypeExpr;
use hdlc_ast::types::{Bundle, Direction, Variable, VariableLine};
use hdlc_lex::{CommentGroupingLexer, CommentsAndToken, Token, TokenKind};
use hdlc_util::diagnostic::{Diagnostic, DiagnosticKind, FatalError, Handler, PResult};
use hdlc_util::intern::StringEntry;
use hdlc_util::source::Source;
use hdlc_util::span::Span;

/// Parse one compilation unit into a fully resolved top-level module.
///
/// On the first error a diagnostic lands in `handler` and the result is
/// `Err(FatalError)`; the arena and everything already allocated in it
/// stay intact.
pub fn parse_top_level_module<'a>(
    ctx: &Context<'a>,
    source: &Source,
    handler: &Handler,
) -> PResult<&'a TopLevelModule<'a>> {
    let _span = tracing::debug_span!("parse", source = source.name()).entered();
    let global_table = ctx.global_table();
    let global_chain_node = ctx.alloc(SymbolLookupChainNode {
        parent: None,
        table: global_table,
    });
    let mut parser = Parser {
        ctx,
        source,
        lexer: CommentGroupingLexer::new(source, handler),
        handler,
        current_table: global_table,
        current_chain: SymbolLookupChain::new(global_chain_node),
    };
    parser.parse_top_level_module()
}

pub(crate) struct Parser<'a, 'i> {
    pub(crate) ctx: &'i Context<'a>,
    pub(crate) source: &'i Source,
    pub(crate) lexer: CommentGroupingLexer<'i, 'i>,
    handler: &'i Handler,
    pub(crate) current_table: &'a SymbolTable<'a>,
    pub(crate) current_chain: SymbolLookupChain<'a>,
}

impl<'a, 'i> Parser<'a, 'i> {
    // =========================================================================
    // Token plumbing
    // =========================================================================

    pub(crate) fn peek(&mut self) -> PResult<CommentsAndToken> {
        self.lexer.peek()
    }

    pub(crate) fn peek_kind(&mut self) -> PResult<TokenKind> {
        Ok(self.lexer.peek()?.token.kind)
    }

    pub(crate) fn bump(&mut self) -> PResult<CommentsAndToken> {
        self.lexer.bump()
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> PResult<CommentsAndToken> {
        let next = self.peek()?;
        if next.token.kind != kind {
            return Err(self.error(
                DiagnosticKind::Syntax,
                next.token.span,
                format!("expected: {}", kind.token_str()),
            ));
        }
        self.bump()
    }

    pub(crate) fn expect_msg(
        &mut self,
        kind: TokenKind,
        message: &str,
    ) -> PResult<CommentsAndToken> {
        let next = self.peek()?;
        if next.token.kind != kind {
            return Err(self.error(DiagnosticKind::Syntax, next.token.span, message.to_string()));
        }
        self.bump()
    }

    pub(crate) fn error(
        &self,
        kind: DiagnosticKind,
        span: Span,
        message: impl Into<String>,
    ) -> FatalError {
        self.handler
            .report(Diagnostic::error(kind, message, span));
        FatalError
    }

    pub(crate) fn intern_token(&self, token: Token) -> StringEntry<'a> {
        self.ctx.intern(token.text(self.source))
    }

    pub(crate) fn symbol_data(&self, token: Token) -> SymbolData<'a> {
        SymbolData::new(self.intern_token(token), token.span)
    }

    // =========================================================================
    // Scopes
    // =========================================================================

    /// Run `body` with `table` pushed as the innermost scope; the
    /// enclosing `(table, chain)` pair is restored on the way out, also
    /// when `body` fails.
    pub(crate) fn with_scope<T>(
        &mut self,
        table: &'a SymbolTable<'a>,
        body: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        let node = self.ctx.alloc(SymbolLookupChainNode {
            parent: self.current_chain.head,
            table,
        });
        let saved_table = std::mem::replace(&mut self.current_table, table);
        let saved_chain =
            std::mem::replace(&mut self.current_chain, SymbolLookupChain::new(node));
        let result = body(self);
        self.current_table = saved_table;
        self.current_chain = saved_chain;
        result
    }

    /// Insert into the current scope; duplicates are fatal at the
    /// offending name.
    pub(crate) fn insert_symbol(&mut self, symbol: SymbolRef<'a>) -> PResult<()> {
        if self.current_table.insert(symbol) {
            Ok(())
        } else {
            Err(self.error(
                DiagnosticKind::Resolution,
                symbol.name_span(),
                "name redefined",
            ))
        }
    }

    fn insert_into(&mut self, table: &'a SymbolTable<'a>, symbol: SymbolRef<'a>) -> PResult<()> {
        if table.insert(symbol) {
            Ok(())
        } else {
            Err(self.error(
                DiagnosticKind::Resolution,
                symbol.name_span(),
                "name redefined",
            ))
        }
    }

    // =========================================================================
    // Top level
    // =========================================================================

    fn parse_top_level_module(&mut self) -> PResult<&'a TopLevelModule<'a>> {
        let start = self.peek()?.token.span;
        let mut imports = Vec::new();
        while self.peek_kind()? == TokenKind::KwImport {
            imports.push(self.parse_import()?);
        }
        let module = self.parse_module(true)?;
        if self.peek_kind()? != TokenKind::Eof {
            let offending = self.peek()?.token.span;
            return Err(self.error(
                DiagnosticKind::Syntax,
                offending,
                "extra tokens before end-of-file",
            ));
        }
        let eof = self.bump()?;
        Ok(self.ctx.alloc(TopLevelModule {
            span: Span::through(start, eof.token.span),
            imports: self.ctx.alloc_slice(&imports),
            module,
            before_eof_comments: eof.comments,
        }))
    }

    fn parse_import(&mut self) -> PResult<&'a Import<'a>> {
        let import_kw = self.expect(TokenKind::KwImport)?;
        let name = self.expect_msg(TokenKind::Ident, "expected: import name")?;
        let semicolon = self.expect(TokenKind::Semicolon)?;
        Ok(self.ctx.alloc(Import {
            span: Span::through(import_kw.token.span, semicolon.token.span),
            before_import_comments: import_kw.comments,
            before_name_comments: name.comments,
            name: self.intern_token(name.token),
            name_span: name.token.span,
            before_semicolon_comments: semicolon.comments,
        }))
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    pub(crate) fn parse_module(&mut self, is_top_level: bool) -> PResult<&'a Module<'a>> {
        let module_kw = self.expect(TokenKind::KwModule)?;
        let name = self.expect_msg(TokenKind::Ident, "expected: module name")?;
        let table = self.ctx.new_symbol_table();
        let enclosing_table = self.current_table;
        let scope = Scope {
            table,
            chain: self.current_chain,
        };
        self.with_scope(table, |p| {
            let template_parameters = if p.peek_kind()? == TokenKind::Bang {
                if is_top_level {
                    let offending = p.peek()?.token.span;
                    return Err(p.error(
                        DiagnosticKind::Syntax,
                        offending,
                        "top-level module must not be a template",
                    ));
                }
                Some(p.parse_template_parameter_list()?)
            } else {
                None
            };
            let implements = p.parse_implements_clause()?;
            let lbrace = p.expect(TokenKind::LBrace)?;
            let module = p.ctx.alloc(Module::new(
                Span::through(module_kw.token.span, lbrace.token.span),
                module_kw.comments,
                name.comments,
                p.symbol_data(name.token),
                template_parameters,
                implements,
                lbrace.comments,
                scope,
            ));
            p.insert_into(enclosing_table, SymbolRef::Module(module))?;
            // the module's own name is visible inside its body
            table.insert_unbound(SymbolRef::Module(module));
            let statements = p.parse_statement_list()?;
            let rbrace = p.expect(TokenKind::RBrace)?;
            module.define_body(
                p.ctx.alloc_slice(&statements),
                rbrace.comments,
                Span::through(module_kw.token.span, rbrace.token.span),
            );
            Ok(module)
        })
    }

    pub(crate) fn parse_interface(&mut self) -> PResult<&'a Interface<'a>> {
        let interface_kw = self.expect(TokenKind::KwInterface)?;
        let name = self.expect_msg(TokenKind::Ident, "expected: interface name")?;
        let table = self.ctx.new_symbol_table();
        let enclosing_table = self.current_table;
        let scope = Scope {
            table,
            chain: self.current_chain,
        };
        self.with_scope(table, |p| {
            let template_parameters = if p.peek_kind()? == TokenKind::Bang {
                Some(p.parse_template_parameter_list()?)
            } else {
                None
            };
            let implements = p.parse_implements_clause()?;
            let lbrace = p.expect(TokenKind::LBrace)?;
            let interface = p.ctx.alloc(Interface::new(
                Span::through(interface_kw.token.span, lbrace.token.span),
                interface_kw.comments,
                name.comments,
                p.symbol_data(name.token),
                template_parameters,
                implements,
                lbrace.comments,
                scope,
            ));
            p.insert_into(enclosing_table, SymbolRef::Interface(interface))?;
            table.insert_unbound(SymbolRef::Interface(interface));
            let statements = p.parse_statement_list()?;
            let rbrace = p.expect(TokenKind::RBrace)?;
            interface.define_body(
                p.ctx.alloc_slice(&statements),
                rbrace.comments,
                Span::through(interface_kw.token.span, rbrace.token.span),
            );
            Ok(interface)
        })
    }

    fn parse_implements_clause(&mut self) -> PResult<Option<ImplementsClause<'a>>> {
        if self.peek_kind()? != TokenKind::KwImplements {
            return Ok(None);
        }
        let implements_kw = self.bump()?;
        let parent = self.parse_type_expr()?;
        Ok(Some(ImplementsClause {
            before_implements_comments: implements_kw.comments,
            parent,
        }))
    }

    pub(crate) fn parse_function(&mut self) -> PResult<&'a Function<'a>> {
        let function_kw = self.expect(TokenKind::KwFunction)?;
        let name = self.expect_msg(TokenKind::Ident, "expected: function name")?;
        let table = self.ctx.new_symbol_table();
        let enclosing_table = self.current_table;
        let scope = Scope {
            table,
            chain: self.current_chain,
        };
        self.with_scope(table, |p| {
            let template_parameters = if p.peek_kind()? == TokenKind::Bang {
                Some(p.parse_template_parameter_list()?)
            } else {
                None
            };
            let lparen = p.expect(TokenKind::LParen)?;
            let mut parameters = Vec::new();
            if p.peek_kind()? != TokenKind::RParen {
                let mut before_comma = hdlc_lex::CommentRun::default();
                loop {
                    parameters.push(p.parse_function_parameter(before_comma)?);
                    if p.peek_kind()? == TokenKind::Comma {
                        before_comma = p.bump()?.comments;
                        continue;
                    }
                    break;
                }
            }
            let rparen = p.expect(TokenKind::RParen)?;
            let return_type = if p.peek_kind()? == TokenKind::Colon {
                let colon = p.bump()?;
                let ty = p.parse_type_expr()?;
                let resolved = p.resolve_type_expr(ty, Direction::Reg)?;
                Some(FunctionReturnClause {
                    before_colon_comments: colon.comments,
                    ty,
                    resolved,
                })
            } else {
                None
            };
            let lbrace = p.expect(TokenKind::LBrace)?;
            let function = p.ctx.alloc(Function::new(
                Span::through(function_kw.token.span, lbrace.token.span),
                function_kw.comments,
                name.comments,
                p.symbol_data(name.token),
                template_parameters,
                lparen.comments,
                p.ctx.alloc_slice(&parameters),
                rparen.comments,
                return_type,
                lbrace.comments,
                scope,
            ));
            p.insert_into(enclosing_table, SymbolRef::Function(function))?;
            let statements = p.parse_statement_list()?;
            let rbrace = p.expect(TokenKind::RBrace)?;
            function.define_body(
                p.ctx.alloc_slice(&statements),
                rbrace.comments,
                Span::through(function_kw.token.span, rbrace.token.span),
            );
            Ok(function)
        })
    }

    fn parse_function_parameter(
        &mut self,
        before_comma_comments: hdlc_lex::CommentRun,
    ) -> PResult<&'a FunctionParameter<'a>> {
        let name = self.expect_msg(TokenKind::Ident, "expected: function parameter name")?;
        let colon = self.expect(TokenKind::Colon)?;
        let ty = self.parse_type_expr()?;
        let resolved = self.resolve_type_expr(ty, Direction::Reg)?;
        let parameter = self.ctx.alloc(FunctionParameter {
            span: Span::through(name.token.span, ty.span()),
            before_comma_comments,
            before_name_comments: name.comments,
            symbol: self.symbol_data(name.token),
            before_colon_comments: colon.comments,
            ty,
            resolved,
        });
        self.insert_symbol(SymbolRef::FunctionParameter(parameter))?;
        Ok(parameter)
    }

    pub(crate) fn parse_enum(&mut self) -> PResult<&'a EnumDecl<'a>> {
        let enum_kw = self.expect(TokenKind::KwEnum)?;
        let name = self.expect_msg(TokenKind::Ident, "expected: enum name")?;
        let colon = self.expect(TokenKind::Colon)?;
        let underlying = self.parse_type_expr()?;
        let underlying_resolved = self.resolve_type_expr(underlying, Direction::Reg)?;
        let lbrace = self.expect(TokenKind::LBrace)?;
        let table = self.ctx.new_symbol_table();
        let scope = Scope {
            table,
            chain: self.current_chain,
        };
        let enum_decl = self.ctx.alloc(EnumDecl::new(
            Span::through(enum_kw.token.span, lbrace.token.span),
            enum_kw.comments,
            name.comments,
            self.symbol_data(name.token),
            colon.comments,
            underlying,
            underlying_resolved,
            lbrace.comments,
            scope,
        ));
        self.insert_symbol(SymbolRef::Enum(enum_decl))?;
        let parts = self.with_scope(table, |p| {
            let mut parts: Vec<&'a EnumPart<'a>> = Vec::new();
            while p.peek_kind()? == TokenKind::Ident {
                let part_name = p.bump()?;
                let equal = p.expect(TokenKind::Eq)?;
                let value = p.parse_expression()?;
                let had_comma = p.peek_kind()? == TokenKind::Comma;
                let before_comma_comments = if had_comma {
                    p.bump()?.comments
                } else {
                    hdlc_lex::CommentRun::default()
                };
                let part = p.ctx.alloc(EnumPart::new(
                    Span::through(part_name.token.span, value.span()),
                    part_name.comments,
                    p.symbol_data(part_name.token),
                    equal.comments,
                    value,
                    before_comma_comments,
                ));
                part.set_parent(enum_decl);
                p.insert_symbol(SymbolRef::EnumPart(part))?;
                parts.push(part);
                if !had_comma {
                    break;
                }
            }
            Ok(parts)
        })?;
        let rbrace = self.expect(TokenKind::RBrace)?;
        enum_decl.define_parts(
            self.ctx.alloc_slice(&parts),
            rbrace.comments,
            Span::through(enum_kw.token.span, rbrace.token.span),
        );
        Ok(enum_decl)
    }

    pub(crate) fn parse_bundle(&mut self) -> PResult<&'a Bundle<'a>> {
        let bundle_kw = self.expect(TokenKind::KwBundle)?;
        let name = self.expect_msg(TokenKind::Ident, "expected: bundle name")?;
        let lbrace = self.expect(TokenKind::LBrace)?;
        let table = self.ctx.new_symbol_table();
        let scope = Scope {
            table,
            chain: self.current_chain,
        };
        let bundle = self.ctx.new_bundle(
            Span::through(bundle_kw.token.span, lbrace.token.span),
            bundle_kw.comments,
            name.comments,
            self.symbol_data(name.token),
            scope,
            lbrace.comments,
        );
        self.insert_symbol(SymbolRef::Bundle(bundle))?;
        let lines = self.with_scope(table, |p| {
            let mut lines = Vec::new();
            while p.peek_kind()? == TokenKind::Ident {
                lines.push(p.parse_variable_line()?);
            }
            Ok(lines)
        })?;
        let rbrace = self.expect(TokenKind::RBrace)?;
        let mut members = Vec::new();
        for line in &lines {
            members.extend_from_slice(line.names);
        }
        bundle.define(
            self.ctx.alloc_slice(&lines),
            self.ctx.alloc_slice(&members),
            rbrace.comments,
            Span::through(bundle_kw.token.span, rbrace.token.span),
        );
        Ok(bundle)
    }

    fn parse_variable_line(&mut self) -> PResult<&'a VariableLine<'a>> {
        let mut names: Vec<&'a Variable<'a>> = Vec::new();
        let mut before_comma = hdlc_lex::CommentRun::default();
        loop {
            let name = self.expect_msg(TokenKind::Ident, "expected: member name")?;
            let variable = self.ctx.alloc(Variable::new(
                name.token.span,
                before_comma,
                name.comments,
                self.symbol_data(name.token),
            ));
            self.insert_symbol(SymbolRef::Variable(variable))?;
            names.push(variable);
            if self.peek_kind()? == TokenKind::Comma {
                before_comma = self.bump()?.comments;
                continue;
            }
            break;
        }
        let colon = self.expect(TokenKind::Colon)?;
        let ty = self.parse_type_expr()?;
        let resolved = self.resolve_type_expr(ty, Direction::Reg)?;
        let semicolon = self.expect(TokenKind::Semicolon)?;
        for variable in &names {
            variable.set_ty(resolved);
        }
        Ok(self.ctx.alloc(VariableLine {
            span: Span::through(names[0].span, semicolon.token.span),
            names: self.ctx.alloc_slice(&names),
            before_colon_comments: colon.comments,
            ty,
            before_semicolon_comments: semicolon.comments,
        }))
    }

    // =========================================================================
    // Template parameters
    // =========================================================================

    fn parse_template_parameter_list(&mut self) -> PResult<&'a TemplateParameterList<'a>> {
        let bang = self.expect(TokenKind::Bang)?;
        let lbrace = self.expect(TokenKind::LBrace)?;
        let mut groups = Vec::new();
        if self.peek_kind()? != TokenKind::RBrace {
            let mut before_comma = hdlc_lex::CommentRun::default();
            loop {
                groups.push(self.parse_template_parameter_group(before_comma)?);
                if self.peek_kind()? == TokenKind::Comma {
                    before_comma = self.bump()?.comments;
                    continue;
                }
                break;
            }
        }
        let rbrace = self.expect(TokenKind::RBrace)?;
        Ok(self.ctx.alloc(TemplateParameterList {
            span: Span::through(bang.token.span, rbrace.token.span),
            before_bang_comments: bang.comments,
            before_lbrace_comments: lbrace.comments,
            groups: self.ctx.alloc_slice(&groups),
            before_rbrace_comments: rbrace.comments,
        }))
    }

    fn parse_template_parameter_group(
        &mut self,
        before_comma_comments: hdlc_lex::CommentRun,
    ) -> PResult<&'a TemplateParameterGroup<'a>> {
        let group_start = self.peek()?.token.span;
        let (is_module, before_module_comments) = if self.peek_kind()? == TokenKind::KwModule {
            (true, self.bump()?.comments)
        } else {
            (false, hdlc_lex::CommentRun::default())
        };
        let mut name_tokens = Vec::new();
        let mut name_before_comma = hdlc_lex::CommentRun::default();
        loop {
            let name =
                self.expect_msg(TokenKind::Ident, "expected: template parameter name")?;
            name_tokens.push((name, name_before_comma));
            if self.peek_kind()? == TokenKind::Comma {
                name_before_comma = self.bump()?.comments;
                continue;
            }
            break;
        }
        let colon = self.expect(TokenKind::Colon)?;
        let ty = self.parse_type_expr()?;
        let mut group_end = ty.span();
        let ellipsis = if self.peek_kind()? == TokenKind::Ellipsis {
            let ellipsis = self.bump()?;
            group_end = ellipsis.token.span;
            Some(ellipsis.comments)
        } else {
            None
        };
        let is_list = ellipsis.is_some();
        let kind = if is_module {
            let interface = match ty {
                TypeExpr::ScopedId(scoped) => match scoped.id.symbol {
                    SymbolRef::Interface(interface) => Some(interface),
                    _ => None,
                },
                _ => None,
            };
            let Some(interface) = interface else {
                return Err(self.error(
                    DiagnosticKind::Resolution,
                    ty.span(),
                    "module template parameter type must be an interface",
                ));
            };
            TemplateParameterKind::Module { is_list, interface }
        } else {
            let resolved = self.resolve_type_expr(ty, Direction::Reg)?;
            let bit_vector = resolved.filter(|resolved| resolved.as_bit_vector().is_some());
            let Some(value_type) = bit_vector else {
                return Err(self.error(
                    DiagnosticKind::Semantic,
                    ty.span(),
                    "type must be an integer (uint or sint)",
                ));
            };
            TemplateParameterKind::Value {
                is_list,
                ty: value_type,
            }
        };
        let kind = self.ctx.template_kinds.intern(kind);
        let mut parameters = Vec::new();
        for (name, name_before_comma) in name_tokens {
            let parameter = self.ctx.alloc(TemplateParameter {
                span: name.token.span,
                before_comma_comments: name_before_comma,
                before_name_comments: name.comments,
                symbol: self.symbol_data(name.token),
                kind,
            });
            self.insert_symbol(SymbolRef::TemplateParameter(parameter))?;
            parameters.push(parameter);
        }
        Ok(self.ctx.alloc(TemplateParameterGroup {
            span: Span::through(group_start, group_end),
            before_comma_comments,
            is_module,
            before_module_comments,
            parameters: self.ctx.alloc_slice(&parameters),
            before_colon_comments: colon.comments,
            ty,
            ellipsis,
        }))
    }
}

#[cfg(test)]
mod tests;
