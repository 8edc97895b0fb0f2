//! AST traversal.
//!
//! [`Visitor`] has one method per node category with a default that
//! walks the children; pattern matching over the closed sums replaces
//! virtual dispatch. Override the methods you care about and call the
//! matching `walk_*` to continue downward.

use crate::decl::{EnumDecl, EnumPart, Function, Import, Interface, Module, TopLevelModule};
use crate::expr::Expression;
use crate::scoped_id::ScopedId;
use crate::stmt::{MatchPart, MatchPattern, Statement};
use crate::template::{
    TemplateArgument, TemplateArgumentList, TemplateParameterGroup, TemplateParameterList,
};
use crate::type_expr::TypeExpr;
use crate::types::{Bundle, Variable, VariableLine};

pub trait Visitor<'a>: Sized {
    fn visit_top_level_module(&mut self, node: &'a TopLevelModule<'a>) {
        walk_top_level_module(self, node);
    }

    fn visit_import(&mut self, _node: &'a Import<'a>) {}

    fn visit_module(&mut self, node: &'a Module<'a>) {
        walk_module(self, node);
    }

    fn visit_interface(&mut self, node: &'a Interface<'a>) {
        walk_interface(self, node);
    }

    fn visit_function(&mut self, node: &'a Function<'a>) {
        walk_function(self, node);
    }

    fn visit_enum(&mut self, node: &'a EnumDecl<'a>) {
        walk_enum(self, node);
    }

    fn visit_enum_part(&mut self, node: &'a EnumPart<'a>) {
        self.visit_expression(node.value);
    }

    fn visit_bundle(&mut self, node: &'a Bundle<'a>) {
        walk_bundle(self, node);
    }

    fn visit_variable_line(&mut self, node: &'a VariableLine<'a>) {
        walk_variable_line(self, node);
    }

    fn visit_variable(&mut self, _node: &'a Variable<'a>) {}

    fn visit_statement(&mut self, node: &'a Statement<'a>) {
        walk_statement(self, node);
    }

    fn visit_expression(&mut self, node: &'a Expression<'a>) {
        walk_expression(self, node);
    }

    fn visit_type_expr(&mut self, node: &'a TypeExpr<'a>) {
        walk_type_expr(self, node);
    }

    fn visit_scoped_id(&mut self, node: &'a ScopedId<'a>) {
        walk_scoped_id(self, node);
    }

    fn visit_match_part(&mut self, node: &'a MatchPart<'a>) {
        walk_match_part(self, node);
    }

    fn visit_match_pattern(&mut self, node: &'a MatchPattern<'a>) {
        walk_match_pattern(self, node);
    }

    fn visit_template_parameter_list(&mut self, node: &'a TemplateParameterList<'a>) {
        walk_template_parameter_list(self, node);
    }

    fn visit_template_parameter_group(&mut self, node: &'a TemplateParameterGroup<'a>) {
        self.visit_type_expr(node.ty);
    }

    fn visit_template_argument_list(&mut self, node: &'a TemplateArgumentList<'a>) {
        walk_template_argument_list(self, node);
    }

    fn visit_template_argument(&mut self, node: &'a TemplateArgument<'a>) {
        walk_template_argument(self, node);
    }
}

pub fn walk_top_level_module<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a TopLevelModule<'a>) {
    for import in node.imports {
        visitor.visit_import(import);
    }
    visitor.visit_module(node.module);
}

pub fn walk_module<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a Module<'a>) {
    if let Some(parameters) = node.template_parameters {
        visitor.visit_template_parameter_list(parameters);
    }
    if let Some(implements) = &node.implements {
        visitor.visit_type_expr(implements.parent);
    }
    for statement in node.statements() {
        visitor.visit_statement(statement);
    }
}

pub fn walk_interface<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a Interface<'a>) {
    if let Some(parameters) = node.template_parameters {
        visitor.visit_template_parameter_list(parameters);
    }
    if let Some(implements) = &node.implements {
        visitor.visit_type_expr(implements.parent);
    }
    for statement in node.statements() {
        visitor.visit_statement(statement);
    }
}

pub fn walk_function<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a Function<'a>) {
    if let Some(parameters) = node.template_parameters {
        visitor.visit_template_parameter_list(parameters);
    }
    for parameter in node.parameters {
        visitor.visit_type_expr(parameter.ty);
    }
    if let Some(return_type) = &node.return_type {
        visitor.visit_type_expr(return_type.ty);
    }
    for statement in node.statements() {
        visitor.visit_statement(statement);
    }
}

pub fn walk_enum<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a EnumDecl<'a>) {
    visitor.visit_type_expr(node.underlying);
    for part in node.parts() {
        visitor.visit_enum_part(part);
    }
}

pub fn walk_bundle<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a Bundle<'a>) {
    for line in node.member_lines() {
        visitor.visit_variable_line(line);
    }
}

pub fn walk_variable_line<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a VariableLine<'a>) {
    for variable in node.names {
        visitor.visit_variable(variable);
    }
    visitor.visit_type_expr(node.ty);
}

pub fn walk_statement<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a Statement<'a>) {
    match node {
        Statement::Empty(_) | Statement::Break(_) | Statement::Continue(_) => {}
        Statement::Expression(s) => visitor.visit_expression(s.expression),
        Statement::Block(s) => {
            for statement in s.statements {
                visitor.visit_statement(statement);
            }
        }
        Statement::If(s) => {
            visitor.visit_expression(s.condition);
            visitor.visit_statement(s.then_statement);
            if let Some(else_clause) = &s.else_clause {
                visitor.visit_statement(else_clause.statement);
            }
        }
        Statement::For(s) => {
            visitor.visit_expression(s.first);
            if let Some(to) = &s.to {
                visitor.visit_expression(to.end);
            }
            visitor.visit_statement(s.body);
        }
        Statement::ForType(s) => {
            visitor.visit_type_expr(s.ty);
            visitor.visit_statement(s.body);
        }
        Statement::Match(s) => {
            visitor.visit_expression(s.matchee);
            for part in s.parts {
                visitor.visit_match_part(part);
            }
        }
        Statement::Return(s) => {
            if let Some(value) = s.value {
                visitor.visit_expression(value);
            }
        }
        Statement::Const(s) => {
            for part in s.parts {
                visitor.visit_expression(part.value);
            }
        }
        Statement::Let(s) => {
            for part in s.parts {
                visitor.visit_type_expr(part.ty);
            }
        }
        Statement::Port(s) => {
            for part in s.parts {
                visitor.visit_type_expr(part.ty);
            }
        }
        Statement::Reg(s) => {
            for part in s.parts {
                for name in part.names {
                    if let Some(initializer) = &name.initializer {
                        visitor.visit_expression(initializer.value);
                    }
                }
                visitor.visit_type_expr(part.ty);
            }
        }
        Statement::TypeAlias(s) => visitor.visit_type_expr(s.target),
        Statement::Module(m) => visitor.visit_module(m),
        Statement::Interface(i) => visitor.visit_interface(i),
        Statement::Enum(e) => visitor.visit_enum(e),
        Statement::Function(f) => visitor.visit_function(f),
        Statement::Bundle(b) => visitor.visit_bundle(b),
    }
}

pub fn walk_expression<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a Expression<'a>) {
    match node {
        Expression::Number(_) => {}
        Expression::ScopedId(e) => visitor.visit_scoped_id(e.id),
        Expression::Paren(e) => visitor.visit_expression(e.expression),
        Expression::List(e) => {
            for element in e.elements {
                visitor.visit_expression(element.expression);
            }
        }
        Expression::Member(e) => visitor.visit_expression(e.base),
        Expression::Slice(e) => {
            visitor.visit_expression(e.base);
            visitor.visit_expression(e.start);
            if let Some(to) = &e.to {
                visitor.visit_expression(to.end);
            }
        }
        Expression::Call(e) => {
            visitor.visit_expression(e.callee);
            for argument in e.arguments {
                visitor.visit_expression(argument.expression);
            }
        }
        Expression::Cast(e) => {
            visitor.visit_type_expr(e.ty);
            visitor.visit_expression(e.expression);
        }
        Expression::Fill(e) => {
            visitor.visit_expression(e.count);
            visitor.visit_expression(e.value);
        }
        Expression::Cat(e) => {
            visitor.visit_expression(e.first);
            for argument in e.rest {
                visitor.visit_expression(argument.expression);
            }
        }
        Expression::PopCount(e) => visitor.visit_expression(e.expression),
        Expression::Unary(e) => visitor.visit_expression(e.operand),
        Expression::Binary(e) => {
            visitor.visit_expression(e.lhs);
            visitor.visit_expression(e.rhs);
        }
        Expression::Conditional(e) => {
            visitor.visit_expression(e.condition);
            visitor.visit_expression(e.then_expression);
            visitor.visit_expression(e.else_expression);
        }
    }
}

pub fn walk_type_expr<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a TypeExpr<'a>) {
    match node {
        TypeExpr::ScopedId(t) => visitor.visit_scoped_id(t.id),
        TypeExpr::Flip(t) => visitor.visit_type_expr(t.inner),
        TypeExpr::TypeOf(t) => visitor.visit_expression(t.expression),
        TypeExpr::UInt(t) => visitor.visit_expression(t.width),
        TypeExpr::SInt(t) => visitor.visit_expression(t.width),
        TypeExpr::Builtin(_) => {}
        TypeExpr::Memory(t) => {
            visitor.visit_expression(t.size);
            visitor.visit_type_expr(t.element);
        }
        TypeExpr::Tuple(t) => {
            for element in t.elements {
                visitor.visit_type_expr(element.ty);
            }
        }
        TypeExpr::Function(t) => {
            for parameter in t.parameters {
                visitor.visit_type_expr(parameter.ty);
            }
            if let Some(return_type) = &t.return_type {
                visitor.visit_type_expr(return_type.ty);
            }
        }
    }
}

pub fn walk_scoped_id<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a ScopedId<'a>) {
    if let Some(parent) = node.parent {
        visitor.visit_scoped_id(parent);
    }
    if let Some(arguments) = node.template_arguments {
        visitor.visit_template_argument_list(arguments);
    }
}

pub fn walk_match_part<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a MatchPart<'a>) {
    for pattern in node.patterns {
        visitor.visit_match_pattern(pattern);
    }
    visitor.visit_statement(node.statement);
}

pub fn walk_match_pattern<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a MatchPattern<'a>) {
    match node {
        MatchPattern::Number(_) => {}
        MatchPattern::Range(p) => {
            visitor.visit_expression(p.first);
            if let Some(to) = &p.to {
                visitor.visit_expression(to.end);
            }
        }
    }
}

pub fn walk_template_parameter_list<'a, V: Visitor<'a>>(
    visitor: &mut V,
    node: &'a TemplateParameterList<'a>,
) {
    for group in node.groups {
        visitor.visit_template_parameter_group(group);
    }
}

pub fn walk_template_argument_list<'a, V: Visitor<'a>>(
    visitor: &mut V,
    node: &'a TemplateArgumentList<'a>,
) {
    for argument in node.arguments {
        visitor.visit_template_argument(argument);
    }
}

pub fn walk_template_argument<'a, V: Visitor<'a>>(visitor: &mut V, node: &'a TemplateArgument<'a>) {
    match node {
        TemplateArgument::Type(a) => visitor.visit_type_expr(a.ty),
        TemplateArgument::Value(a) => visitor.visit_expression(a.expression),
    }
}
