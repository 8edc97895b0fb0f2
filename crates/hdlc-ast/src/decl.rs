//! Top-level declarations: modules, interfaces, functions, enums,
//! imports.
//!
//! Declaration nodes exist before their bodies are parsed so that their
//! names can be inserted into the enclosing scope first (strict-unique
//! at declaration). The body slice, closing-brace comments, and final
//! span are bound once afterwards.

use std::cell::Cell;

use hdlc_lex::CommentRun;
use hdlc_util::intern::StringEntry;
use hdlc_util::span::Span;

use crate::expr::Expression;
use crate::stmt::Statement;
use crate::symbol::SymbolData;
use crate::table::Scope;
use crate::template::TemplateParameterList;
use crate::type_expr::TypeExpr;
use crate::types::TypeRef;

/// One parsed compilation unit: imports, the single main module, and
/// the comments trailing it.
pub struct TopLevelModule<'a> {
    pub span: Span,
    pub imports: &'a [&'a Import<'a>],
    pub module: &'a Module<'a>,
    pub before_eof_comments: CommentRun,
}

/// `import name;`
pub struct Import<'a> {
    pub span: Span,
    pub before_import_comments: CommentRun,
    pub before_name_comments: CommentRun,
    pub name: StringEntry<'a>,
    pub name_span: Span,
    pub before_semicolon_comments: CommentRun,
}

/// `implements T` on a module or interface.
pub struct ImplementsClause<'a> {
    pub before_implements_comments: CommentRun,
    pub parent: &'a TypeExpr<'a>,
}

pub struct Module<'a> {
    span: Cell<Span>,
    pub before_module_comments: CommentRun,
    pub before_name_comments: CommentRun,
    pub symbol: SymbolData<'a>,
    pub template_parameters: Option<&'a TemplateParameterList<'a>>,
    pub implements: Option<ImplementsClause<'a>>,
    pub before_lbrace_comments: CommentRun,
    pub scope: Scope<'a>,
    statements: Cell<&'a [&'a Statement<'a>]>,
    before_rbrace_comments: Cell<CommentRun>,
}

impl<'a> Module<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        span: Span,
        before_module_comments: CommentRun,
        before_name_comments: CommentRun,
        symbol: SymbolData<'a>,
        template_parameters: Option<&'a TemplateParameterList<'a>>,
        implements: Option<ImplementsClause<'a>>,
        before_lbrace_comments: CommentRun,
        scope: Scope<'a>,
    ) -> Self {
        Self {
            span: Cell::new(span),
            before_module_comments,
            before_name_comments,
            symbol,
            template_parameters,
            implements,
            before_lbrace_comments,
            scope,
            statements: Cell::new(&[]),
            before_rbrace_comments: Cell::new(CommentRun::default()),
        }
    }

    pub fn span(&self) -> Span {
        self.span.get()
    }

    pub fn statements(&self) -> &'a [&'a Statement<'a>] {
        self.statements.get()
    }

    pub fn before_rbrace_comments(&self) -> CommentRun {
        self.before_rbrace_comments.get()
    }

    /// Bind the parsed body and final extent.
    pub fn define_body(
        &self,
        statements: &'a [&'a Statement<'a>],
        before_rbrace_comments: CommentRun,
        span: Span,
    ) {
        self.statements.set(statements);
        self.before_rbrace_comments.set(before_rbrace_comments);
        self.span.set(span);
    }
}

pub struct Interface<'a> {
    span: Cell<Span>,
    pub before_interface_comments: CommentRun,
    pub before_name_comments: CommentRun,
    pub symbol: SymbolData<'a>,
    pub template_parameters: Option<&'a TemplateParameterList<'a>>,
    pub implements: Option<ImplementsClause<'a>>,
    pub before_lbrace_comments: CommentRun,
    pub scope: Scope<'a>,
    statements: Cell<&'a [&'a Statement<'a>]>,
    before_rbrace_comments: Cell<CommentRun>,
}

impl<'a> Interface<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        span: Span,
        before_interface_comments: CommentRun,
        before_name_comments: CommentRun,
        symbol: SymbolData<'a>,
        template_parameters: Option<&'a TemplateParameterList<'a>>,
        implements: Option<ImplementsClause<'a>>,
        before_lbrace_comments: CommentRun,
        scope: Scope<'a>,
    ) -> Self {
        Self {
            span: Cell::new(span),
            before_interface_comments,
            before_name_comments,
            symbol,
            template_parameters,
            implements,
            before_lbrace_comments,
            scope,
            statements: Cell::new(&[]),
            before_rbrace_comments: Cell::new(CommentRun::default()),
        }
    }

    pub fn span(&self) -> Span {
        self.span.get()
    }

    pub fn statements(&self) -> &'a [&'a Statement<'a>] {
        self.statements.get()
    }

    pub fn before_rbrace_comments(&self) -> CommentRun {
        self.before_rbrace_comments.get()
    }

    pub fn define_body(
        &self,
        statements: &'a [&'a Statement<'a>],
        before_rbrace_comments: CommentRun,
        span: Span,
    ) {
        self.statements.set(statements);
        self.before_rbrace_comments.set(before_rbrace_comments);
        self.span.set(span);
    }
}

/// `name : Type` — one function parameter; a symbol in the function's
/// scope.
pub struct FunctionParameter<'a> {
    pub span: Span,
    pub before_comma_comments: CommentRun,
    pub before_name_comments: CommentRun,
    pub symbol: SymbolData<'a>,
    pub before_colon_comments: CommentRun,
    pub ty: &'a TypeExpr<'a>,
    pub resolved: Option<TypeRef<'a>>,
}

pub struct FunctionReturnClause<'a> {
    pub before_colon_comments: CommentRun,
    pub ty: &'a TypeExpr<'a>,
    pub resolved: Option<TypeRef<'a>>,
}

pub struct Function<'a> {
    span: Cell<Span>,
    pub before_function_comments: CommentRun,
    pub before_name_comments: CommentRun,
    pub symbol: SymbolData<'a>,
    pub template_parameters: Option<&'a TemplateParameterList<'a>>,
    pub before_lparen_comments: CommentRun,
    pub parameters: &'a [&'a FunctionParameter<'a>],
    pub before_rparen_comments: CommentRun,
    pub return_type: Option<FunctionReturnClause<'a>>,
    pub before_lbrace_comments: CommentRun,
    pub scope: Scope<'a>,
    statements: Cell<&'a [&'a Statement<'a>]>,
    before_rbrace_comments: Cell<CommentRun>,
}

impl<'a> Function<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        span: Span,
        before_function_comments: CommentRun,
        before_name_comments: CommentRun,
        symbol: SymbolData<'a>,
        template_parameters: Option<&'a TemplateParameterList<'a>>,
        before_lparen_comments: CommentRun,
        parameters: &'a [&'a FunctionParameter<'a>],
        before_rparen_comments: CommentRun,
        return_type: Option<FunctionReturnClause<'a>>,
        before_lbrace_comments: CommentRun,
        scope: Scope<'a>,
    ) -> Self {
        Self {
            span: Cell::new(span),
            before_function_comments,
            before_name_comments,
            symbol,
            template_parameters,
            before_lparen_comments,
            parameters,
            before_rparen_comments,
            return_type,
            before_lbrace_comments,
            scope,
            statements: Cell::new(&[]),
            before_rbrace_comments: Cell::new(CommentRun::default()),
        }
    }

    pub fn span(&self) -> Span {
        self.span.get()
    }

    pub fn statements(&self) -> &'a [&'a Statement<'a>] {
        self.statements.get()
    }

    pub fn before_rbrace_comments(&self) -> CommentRun {
        self.before_rbrace_comments.get()
    }

    pub fn define_body(
        &self,
        statements: &'a [&'a Statement<'a>],
        before_rbrace_comments: CommentRun,
        span: Span,
    ) {
        self.statements.set(statements);
        self.before_rbrace_comments.set(before_rbrace_comments);
        self.span.set(span);
    }
}

/// `name = expr` — one enumerator; a symbol in the enum's scope with a
/// back-reference to the enum.
pub struct EnumPart<'a> {
    pub span: Span,
    pub before_name_comments: CommentRun,
    pub symbol: SymbolData<'a>,
    pub before_equal_comments: CommentRun,
    pub value: &'a Expression<'a>,
    /// Comments before the comma following this part; empty for a last
    /// part without one.
    pub before_comma_comments: CommentRun,
    parent: Cell<Option<&'a EnumDecl<'a>>>,
}

impl<'a> EnumPart<'a> {
    pub fn new(
        span: Span,
        before_name_comments: CommentRun,
        symbol: SymbolData<'a>,
        before_equal_comments: CommentRun,
        value: &'a Expression<'a>,
        before_comma_comments: CommentRun,
    ) -> Self {
        Self {
            span,
            before_name_comments,
            symbol,
            before_equal_comments,
            value,
            before_comma_comments,
            parent: Cell::new(None),
        }
    }

    pub fn parent(&self) -> Option<&'a EnumDecl<'a>> {
        self.parent.get()
    }

    pub fn set_parent(&self, parent: &'a EnumDecl<'a>) {
        debug_assert!(self.parent.get().is_none());
        self.parent.set(Some(parent));
    }
}

/// `enum Name : Underlying { parts }`.
pub struct EnumDecl<'a> {
    span: Cell<Span>,
    pub before_enum_comments: CommentRun,
    pub before_name_comments: CommentRun,
    pub symbol: SymbolData<'a>,
    pub before_colon_comments: CommentRun,
    pub underlying: &'a TypeExpr<'a>,
    pub underlying_resolved: Option<TypeRef<'a>>,
    pub before_lbrace_comments: CommentRun,
    pub scope: Scope<'a>,
    parts: Cell<&'a [&'a EnumPart<'a>]>,
    before_rbrace_comments: Cell<CommentRun>,
}

impl<'a> EnumDecl<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        span: Span,
        before_enum_comments: CommentRun,
        before_name_comments: CommentRun,
        symbol: SymbolData<'a>,
        before_colon_comments: CommentRun,
        underlying: &'a TypeExpr<'a>,
        underlying_resolved: Option<TypeRef<'a>>,
        before_lbrace_comments: CommentRun,
        scope: Scope<'a>,
    ) -> Self {
        Self {
            span: Cell::new(span),
            before_enum_comments,
            before_name_comments,
            symbol,
            before_colon_comments,
            underlying,
            underlying_resolved,
            before_lbrace_comments,
            scope,
            parts: Cell::new(&[]),
            before_rbrace_comments: Cell::new(CommentRun::default()),
        }
    }

    pub fn span(&self) -> Span {
        self.span.get()
    }

    pub fn parts(&self) -> &'a [&'a EnumPart<'a>] {
        self.parts.get()
    }

    pub fn before_rbrace_comments(&self) -> CommentRun {
        self.before_rbrace_comments.get()
    }

    pub fn define_parts(
        &self,
        parts: &'a [&'a EnumPart<'a>],
        before_rbrace_comments: CommentRun,
        span: Span,
    ) {
        self.parts.set(parts);
        self.before_rbrace_comments.set(before_rbrace_comments);
        self.span.set(span);
    }
}
