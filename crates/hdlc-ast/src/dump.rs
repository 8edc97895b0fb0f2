//! Human-readable text dump.
//!
//! An indent-aware tree printer. Identity-carrying nodes are tagged `=N`
//! the first time they are printed and `*N` on every revisit, which both
//! exposes sharing and terminates on cycles. An empty module dumps as a
//! single `module m =0` line.

use rustc_hash::FxHashMap;

use hdlc_util::source::Source;

use crate::decl::{EnumDecl, Function, Import, Interface, Module, TopLevelModule};
use crate::expr::Expression;
use crate::scoped_id::ScopedId;
use crate::stmt::{MatchPattern, Statement};
use crate::template::{TemplateArgument, TemplateParameterList};
use crate::type_expr::TypeExpr;
use crate::types::Bundle;

pub struct TextDumper<'s> {
    source: &'s Source,
    out: String,
    indent: usize,
    numbers: FxHashMap<usize, usize>,
}

/// Dump one module (and everything under it) as text.
pub fn dump_module_text(module: &Module<'_>, source: &Source) -> String {
    let mut dumper = TextDumper::new(source);
    dumper.module(module);
    dumper.finish()
}

/// Dump a whole compilation unit as text.
pub fn dump_top_level_text(top: &TopLevelModule<'_>, source: &Source) -> String {
    let mut dumper = TextDumper::new(source);
    for import in top.imports {
        dumper.import(import);
    }
    dumper.module(top.module);
    dumper.finish()
}

impl<'s> TextDumper<'s> {
    pub fn new(source: &'s Source) -> Self {
        Self {
            source,
            out: String::new(),
            indent: 0,
            numbers: FxHashMap::default(),
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent {
            self.out.push_str("    ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Tag a node by identity: `=N` on first sight, `*N` after.
    fn tag<T>(&mut self, node: &T) -> (String, bool) {
        let key = node as *const T as usize;
        let next = self.numbers.len();
        match self.numbers.entry(key) {
            std::collections::hash_map::Entry::Occupied(entry) => {
                (format!("*{}", entry.get()), false)
            }
            std::collections::hash_map::Entry::Vacant(entry) => {
                entry.insert(next);
                (format!("={next}"), true)
            }
        }
    }

    fn nested(&mut self, body: impl FnOnce(&mut Self)) {
        self.indent += 1;
        body(self);
        self.indent -= 1;
    }

    fn import(&mut self, node: &Import<'_>) {
        self.line(&format!("import {}", node.name));
    }

    fn module(&mut self, node: &Module<'_>) {
        let (tag, first) = self.tag(node);
        self.line(&format!("module {} {}", node.symbol.name, tag));
        if !first {
            return;
        }
        self.nested(|this| {
            if let Some(parameters) = node.template_parameters {
                this.template_parameters(parameters);
            }
            if let Some(implements) = &node.implements {
                this.line("implements");
                this.nested(|this| this.type_expr(implements.parent));
            }
            for statement in node.statements() {
                this.statement(statement);
            }
        });
    }

    fn interface(&mut self, node: &Interface<'_>) {
        let (tag, first) = self.tag(node);
        self.line(&format!("interface {} {}", node.symbol.name, tag));
        if !first {
            return;
        }
        self.nested(|this| {
            if let Some(parameters) = node.template_parameters {
                this.template_parameters(parameters);
            }
            if let Some(implements) = &node.implements {
                this.line("implements");
                this.nested(|this| this.type_expr(implements.parent));
            }
            for statement in node.statements() {
                this.statement(statement);
            }
        });
    }

    fn function(&mut self, node: &Function<'_>) {
        let (tag, first) = self.tag(node);
        self.line(&format!("function {} {}", node.symbol.name, tag));
        if !first {
            return;
        }
        self.nested(|this| {
            if let Some(parameters) = node.template_parameters {
                this.template_parameters(parameters);
            }
            for parameter in node.parameters {
                this.line(&format!("parameter {}", parameter.symbol.name));
                this.nested(|this| this.type_expr(parameter.ty));
            }
            if let Some(return_type) = &node.return_type {
                this.line("returns");
                this.nested(|this| this.type_expr(return_type.ty));
            }
            for statement in node.statements() {
                this.statement(statement);
            }
        });
    }

    fn enum_decl(&mut self, node: &EnumDecl<'_>) {
        let (tag, first) = self.tag(node);
        self.line(&format!("enum {} {}", node.symbol.name, tag));
        if !first {
            return;
        }
        self.nested(|this| {
            this.type_expr(node.underlying);
            for part in node.parts() {
                this.line(&format!("part {}", part.symbol.name));
                this.nested(|this| this.expression(part.value));
            }
        });
    }

    fn bundle(&mut self, node: &Bundle<'_>) {
        let (tag, first) = self.tag(node);
        self.line(&format!("bundle {} {}", node.symbol.name, tag));
        if !first {
            return;
        }
        self.nested(|this| {
            for line in node.member_lines() {
                for variable in line.names {
                    let described = match variable.ty() {
                        Some(ty) => ty.describe(),
                        None => "<unresolved>".to_string(),
                    };
                    let (tag, _) = this.tag(*variable);
                    this.line(&format!(
                        "member {}: {} {}",
                        variable.symbol.name, described, tag
                    ));
                }
            }
        });
    }

    fn template_parameters(&mut self, node: &TemplateParameterList<'_>) {
        self.line("template-parameters");
        self.nested(|this| {
            for group in node.groups {
                for parameter in group.parameters {
                    let shape = if group.is_module { "module" } else { "value" };
                    let list = if group.ellipsis.is_some() { "..." } else { "" };
                    this.line(&format!(
                        "parameter {} {}{}",
                        shape, parameter.symbol.name, list
                    ));
                }
                this.nested(|this| this.type_expr(group.ty));
            }
        });
    }

    fn statement(&mut self, node: &Statement<'_>) {
        match node {
            Statement::Module(m) => self.module(m),
            Statement::Interface(i) => self.interface(i),
            Statement::Enum(e) => self.enum_decl(e),
            Statement::Function(f) => self.function(f),
            Statement::Bundle(b) => self.bundle(b),
            Statement::Empty(_) => self.line("empty-statement"),
            Statement::Expression(s) => {
                self.line("expression-statement");
                self.nested(|this| this.expression(s.expression));
            }
            Statement::Block(s) => {
                self.line("block");
                self.nested(|this| {
                    for statement in s.statements {
                        this.statement(statement);
                    }
                });
            }
            Statement::If(s) => {
                self.line("if");
                self.nested(|this| {
                    this.expression(s.condition);
                    this.statement(s.then_statement);
                    if let Some(else_clause) = &s.else_clause {
                        this.line("else");
                        this.nested(|this| this.statement(else_clause.statement));
                    }
                });
            }
            Statement::For(s) => {
                self.line(&format!("for {}", s.variable.symbol.name));
                self.nested(|this| {
                    this.expression(s.first);
                    if let Some(to) = &s.to {
                        this.line("to");
                        this.nested(|this| this.expression(to.end));
                    }
                    this.statement(s.body);
                });
            }
            Statement::ForType(s) => {
                self.line(&format!("for type {}", s.variable.symbol.name));
                self.nested(|this| {
                    this.type_expr(s.ty);
                    this.statement(s.body);
                });
            }
            Statement::Match(s) => {
                self.line("match");
                self.nested(|this| {
                    this.expression(s.matchee);
                    for part in s.parts {
                        this.line("case");
                        this.nested(|this| {
                            for pattern in part.patterns {
                                this.match_pattern(pattern);
                            }
                            this.statement(part.statement);
                        });
                    }
                });
            }
            Statement::Return(s) => {
                self.line("return");
                if let Some(value) = s.value {
                    self.nested(|this| this.expression(value));
                }
            }
            Statement::Break(_) => self.line("break"),
            Statement::Continue(_) => self.line("continue"),
            Statement::Const(s) => {
                for part in s.parts {
                    self.line(&format!("const {}", part.symbol.name));
                    self.nested(|this| this.expression(part.value));
                }
            }
            Statement::Let(s) => {
                for part in s.parts {
                    let names: Vec<&str> =
                        part.names.iter().map(|n| n.symbol.name.as_str()).collect();
                    self.line(&format!("let {}", names.join(", ")));
                    self.nested(|this| this.type_expr(part.ty));
                }
            }
            Statement::Port(s) => {
                let keyword = if s.is_input { "input" } else { "output" };
                for part in s.parts {
                    let names: Vec<&str> =
                        part.names.iter().map(|n| n.symbol.name.as_str()).collect();
                    self.line(&format!("{keyword} {}", names.join(", ")));
                    self.nested(|this| this.type_expr(part.ty));
                }
            }
            Statement::Reg(s) => {
                for part in s.parts {
                    for name in part.names {
                        self.line(&format!("reg {}", name.symbol.name));
                        if let Some(initializer) = &name.initializer {
                            self.nested(|this| this.expression(initializer.value));
                        }
                    }
                    self.nested(|this| this.type_expr(part.ty));
                }
            }
            Statement::TypeAlias(s) => {
                self.line(&format!("type {}", s.alias.symbol.name));
                self.nested(|this| this.type_expr(s.target));
            }
        }
    }

    fn expression(&mut self, node: &Expression<'_>) {
        match node {
            Expression::Number(e) => {
                let text = e.token.text(self.source);
                self.line(&format!("number {text}"));
            }
            Expression::ScopedId(e) => self.scoped_id(e.id),
            Expression::Paren(e) => {
                self.line("paren");
                self.nested(|this| this.expression(e.expression));
            }
            Expression::List(e) => {
                self.line("list");
                self.nested(|this| {
                    for element in e.elements {
                        this.expression(element.expression);
                    }
                });
            }
            Expression::Member(e) => {
                self.line(&format!("member .{}", e.name));
                self.nested(|this| this.expression(e.base));
            }
            Expression::Slice(e) => {
                self.line("slice");
                self.nested(|this| {
                    this.expression(e.base);
                    this.expression(e.start);
                    if let Some(to) = &e.to {
                        this.line("to");
                        this.nested(|this| this.expression(to.end));
                    }
                });
            }
            Expression::Call(e) => {
                self.line("call");
                self.nested(|this| {
                    this.expression(e.callee);
                    for argument in e.arguments {
                        this.expression(argument.expression);
                    }
                });
            }
            Expression::Cast(e) => {
                self.line("cast");
                self.nested(|this| {
                    this.type_expr(e.ty);
                    this.expression(e.expression);
                });
            }
            Expression::Fill(e) => {
                self.line("fill");
                self.nested(|this| {
                    this.expression(e.count);
                    this.expression(e.value);
                });
            }
            Expression::Cat(e) => {
                self.line("cat");
                self.nested(|this| {
                    this.expression(e.first);
                    for argument in e.rest {
                        this.expression(argument.expression);
                    }
                });
            }
            Expression::PopCount(e) => {
                self.line("popCount");
                self.nested(|this| this.expression(e.expression));
            }
            Expression::Unary(e) => {
                self.line(&format!("unary {}", e.op.symbol()));
                self.nested(|this| this.expression(e.operand));
            }
            Expression::Binary(e) => {
                self.line(&format!("binary {}", e.op.symbol()));
                self.nested(|this| {
                    this.expression(e.lhs);
                    this.expression(e.rhs);
                });
            }
            Expression::Conditional(e) => {
                self.line("conditional");
                self.nested(|this| {
                    this.expression(e.condition);
                    this.expression(e.then_expression);
                    this.expression(e.else_expression);
                });
            }
        }
    }

    fn scoped_id(&mut self, node: &ScopedId<'_>) {
        self.line(&format!("scoped-id {}", node.path_string()));
        if let Some(arguments) = node.template_arguments {
            self.nested(|this| {
                for argument in arguments.arguments {
                    match argument {
                        TemplateArgument::Type(a) => {
                            this.line("type-argument");
                            this.nested(|this| this.type_expr(a.ty));
                        }
                        TemplateArgument::Value(a) => {
                            this.line("value-argument");
                            this.nested(|this| this.expression(a.expression));
                        }
                    }
                }
            });
        }
    }

    fn match_pattern(&mut self, node: &MatchPattern<'_>) {
        match node {
            MatchPattern::Number(p) => {
                let text = p.token.text(self.source);
                self.line(&format!("pattern {text}"));
            }
            MatchPattern::Range(p) => {
                self.line("pattern-range");
                self.nested(|this| {
                    this.expression(p.first);
                    if let Some(to) = &p.to {
                        this.line("to");
                        this.nested(|this| this.expression(to.end));
                    }
                });
            }
        }
    }

    fn type_expr(&mut self, node: &TypeExpr<'_>) {
        match node {
            TypeExpr::ScopedId(t) => {
                self.line(&format!("type {}", t.id.path_string()));
            }
            TypeExpr::Flip(t) => {
                self.line("type flip");
                self.nested(|this| this.type_expr(t.inner));
            }
            TypeExpr::TypeOf(t) => {
                self.line("type typeOf");
                self.nested(|this| this.expression(t.expression));
            }
            TypeExpr::UInt(t) => {
                self.line("type uint");
                self.nested(|this| this.expression(t.width));
            }
            TypeExpr::SInt(t) => {
                self.line("type sint");
                self.nested(|this| this.expression(t.width));
            }
            TypeExpr::Builtin(t) => {
                self.line(&format!("type {}", t.name.name()));
            }
            TypeExpr::Memory(t) => {
                self.line("type memory");
                self.nested(|this| {
                    this.expression(t.size);
                    this.type_expr(t.element);
                });
            }
            TypeExpr::Tuple(t) => {
                self.line("type tuple");
                self.nested(|this| {
                    for element in t.elements {
                        this.type_expr(element.ty);
                    }
                });
            }
            TypeExpr::Function(t) => {
                self.line("type function");
                self.nested(|this| {
                    for parameter in t.parameters {
                        this.type_expr(parameter.ty);
                    }
                    if let Some(return_type) = &t.return_type {
                        this.type_expr(return_type.ty);
                    }
                });
            }
        }
    }
}
