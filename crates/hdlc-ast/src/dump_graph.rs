//! Structured dump: AST to [`DumpGraph`].
//!
//! Builds the identity-keyed intermediate graph that the JSON and DOT
//! writers serialize. Nodes are memoized on their address, so a symbol
//! reachable both through a statement list and through a symbol table
//! serializes once and is shared via `@ref` (JSON) or an extra edge
//! (DOT). Indexed pointer fields (`statements[9]`, `statements[10]`)
//! rely on the writers' natural-number-aware key ordering.

use rustc_hash::FxHashMap;

use hdlc_util::dump::{DumpGraph, DumpId};
use hdlc_util::source::Source;

use crate::decl::{EnumDecl, Function, Interface, Module, TopLevelModule};
use crate::expr::Expression;
use crate::scoped_id::ScopedId;
use crate::stmt::{MatchPattern, Statement};
use crate::symbol::SymbolRef;
use crate::table::SymbolTable;
use crate::template::{TemplateArgument, TemplateParameterList};
use crate::type_expr::TypeExpr;
use crate::types::Bundle;

/// Build the dump graph for a whole compilation unit; returns the graph
/// and the root node.
pub fn build_dump_graph<'a>(
    top: &'a TopLevelModule<'a>,
    source: &Source,
) -> (DumpGraph, DumpId) {
    let mut builder = Builder {
        graph: DumpGraph::new(),
        memo: FxHashMap::default(),
        source,
    };
    let root = builder.top_level(top);
    (builder.graph, root)
}

struct Builder<'s> {
    graph: DumpGraph,
    memo: FxHashMap<usize, DumpId>,
    source: &'s Source,
}

impl<'s> Builder<'s> {
    fn key<T>(node: &T) -> usize {
        node as *const T as usize
    }

    /// Memoize a node by address. Returns the id and whether the caller
    /// owns filling it in. The memo entry is created before the children
    /// are built, which is what terminates cycles.
    fn memoized<T>(&mut self, node: &T, name: &str) -> (DumpId, bool) {
        let key = Self::key(node);
        if let Some(&id) = self.memo.get(&key) {
            return (id, false);
        }
        let id = self.graph.add_node(name);
        self.memo.insert(key, id);
        (id, true)
    }

    fn location(&self, start: u32) -> String {
        self.source.location_string(start)
    }

    fn top_level(&mut self, node: &TopLevelModule<'_>) -> DumpId {
        let (id, _) = self.memoized(node, "TopLevelModule");
        for (index, import) in node.imports.iter().enumerate() {
            let import_id = self.graph.add_node("Import");
            self.graph
                .set_simple(import_id, "name", import.name.as_str());
            self.graph
                .set_simple(import_id, "location", self.location(import.span.start));
            self.graph
                .set_pointer_indexed(id, "imports", index, Some(import_id));
        }
        let module_id = self.module(node.module);
        self.graph.set_pointer(id, "mainModule", Some(module_id));
        id
    }

    fn module(&mut self, node: &Module<'_>) -> DumpId {
        let (id, first) = self.memoized(node, "Module");
        if !first {
            return id;
        }
        self.graph.set_simple(id, "name", node.symbol.name.as_str());
        self.graph
            .set_simple(id, "location", self.location(node.span().start));
        if let Some(parameters) = node.template_parameters {
            let parameters_id = self.template_parameters(parameters);
            self.graph
                .set_pointer(id, "templateParameters", Some(parameters_id));
        }
        if let Some(implements) = &node.implements {
            let parent_id = self.type_expr(implements.parent);
            self.graph.set_pointer(id, "parentType", Some(parent_id));
        }
        for (index, statement) in node.statements().iter().enumerate() {
            let statement_id = self.statement(statement);
            self.graph
                .set_pointer_indexed(id, "statements", index, Some(statement_id));
        }
        let table_id = self.symbol_table(node.scope.table);
        self.graph.set_pointer(id, "symbolTable", Some(table_id));
        id
    }

    fn interface(&mut self, node: &Interface<'_>) -> DumpId {
        let (id, first) = self.memoized(node, "Interface");
        if !first {
            return id;
        }
        self.graph.set_simple(id, "name", node.symbol.name.as_str());
        self.graph
            .set_simple(id, "location", self.location(node.span().start));
        if let Some(parameters) = node.template_parameters {
            let parameters_id = self.template_parameters(parameters);
            self.graph
                .set_pointer(id, "templateParameters", Some(parameters_id));
        }
        if let Some(implements) = &node.implements {
            let parent_id = self.type_expr(implements.parent);
            self.graph.set_pointer(id, "parentType", Some(parent_id));
        }
        for (index, statement) in node.statements().iter().enumerate() {
            let statement_id = self.statement(statement);
            self.graph
                .set_pointer_indexed(id, "statements", index, Some(statement_id));
        }
        let table_id = self.symbol_table(node.scope.table);
        self.graph.set_pointer(id, "symbolTable", Some(table_id));
        id
    }

    fn function(&mut self, node: &Function<'_>) -> DumpId {
        let (id, first) = self.memoized(node, "Function");
        if !first {
            return id;
        }
        self.graph.set_simple(id, "name", node.symbol.name.as_str());
        for (index, parameter) in node.parameters.iter().enumerate() {
            let parameter_id = self.graph.add_node("FunctionParameter");
            self.graph
                .set_simple(parameter_id, "name", parameter.symbol.name.as_str());
            let ty_id = self.type_expr(parameter.ty);
            self.graph.set_pointer(parameter_id, "type", Some(ty_id));
            self.graph
                .set_pointer_indexed(id, "parameters", index, Some(parameter_id));
        }
        if let Some(return_type) = &node.return_type {
            let ty_id = self.type_expr(return_type.ty);
            self.graph.set_pointer(id, "returnType", Some(ty_id));
        }
        for (index, statement) in node.statements().iter().enumerate() {
            let statement_id = self.statement(statement);
            self.graph
                .set_pointer_indexed(id, "statements", index, Some(statement_id));
        }
        id
    }

    fn enum_decl(&mut self, node: &EnumDecl<'_>) -> DumpId {
        let (id, first) = self.memoized(node, "Enum");
        if !first {
            return id;
        }
        self.graph.set_simple(id, "name", node.symbol.name.as_str());
        let underlying_id = self.type_expr(node.underlying);
        self.graph
            .set_pointer(id, "underlyingType", Some(underlying_id));
        for (index, part) in node.parts().iter().enumerate() {
            let (part_id, part_first) = self.memoized(*part, "EnumPart");
            if part_first {
                self.graph
                    .set_simple(part_id, "name", part.symbol.name.as_str());
                let value_id = self.expression(part.value);
                self.graph.set_pointer(part_id, "value", Some(value_id));
                self.graph.set_pointer(part_id, "parentEnum", Some(id));
            }
            self.graph
                .set_pointer_indexed(id, "parts", index, Some(part_id));
        }
        id
    }

    fn bundle(&mut self, node: &Bundle<'_>) -> DumpId {
        let (id, first) = self.memoized(node, "Bundle");
        if !first {
            return id;
        }
        self.graph.set_simple(id, "name", node.symbol.name.as_str());
        self.graph
            .set_simple(id, "isStateless", node.is_stateless().to_string());
        for (index, member) in node.members().iter().enumerate() {
            let (member_id, member_first) = self.memoized(*member, "Variable");
            if member_first {
                self.graph
                    .set_simple(member_id, "name", member.symbol.name.as_str());
                if let Some(ty) = member.ty() {
                    self.graph.set_simple(member_id, "type", ty.describe());
                }
            }
            self.graph
                .set_pointer_indexed(id, "members", index, Some(member_id));
        }
        id
    }

    fn symbol_table(&mut self, table: &SymbolTable<'_>) -> DumpId {
        let (id, first) = self.memoized(table, "SymbolTable");
        if !first {
            return id;
        }
        for (index, symbol) in table.symbols_in_order().iter().enumerate() {
            let symbol_id = self.symbol(*symbol);
            self.graph
                .set_pointer_indexed(id, "symbols", index, Some(symbol_id));
        }
        id
    }

    fn symbol(&mut self, symbol: SymbolRef<'_>) -> DumpId {
        match symbol {
            SymbolRef::Module(n) => self.module(n),
            SymbolRef::Interface(n) => self.interface(n),
            SymbolRef::Function(n) => self.function(n),
            SymbolRef::Enum(n) => self.enum_decl(n),
            SymbolRef::Bundle(n) => self.bundle(n),
            other => {
                let data = other.data();
                let (id, first) = self.memoized(data, "Symbol");
                if first {
                    self.graph.set_simple(id, "name", data.name.as_str());
                }
                id
            }
        }
    }

    fn statement(&mut self, node: &Statement<'_>) -> DumpId {
        match node {
            Statement::Module(m) => return self.module(m),
            Statement::Interface(i) => return self.interface(i),
            Statement::Enum(e) => return self.enum_decl(e),
            Statement::Function(f) => return self.function(f),
            Statement::Bundle(b) => return self.bundle(b),
            _ => {}
        }
        let id = self.graph.add_node(statement_node_name(node));
        match node {
            Statement::Empty(_) | Statement::Break(_) | Statement::Continue(_) => {}
            Statement::Expression(s) => {
                let expr_id = self.expression(s.expression);
                self.graph.set_pointer(id, "expression", Some(expr_id));
            }
            Statement::Block(s) => {
                for (index, statement) in s.statements.iter().enumerate() {
                    let statement_id = self.statement(statement);
                    self.graph
                        .set_pointer_indexed(id, "statements", index, Some(statement_id));
                }
            }
            Statement::If(s) => {
                let condition_id = self.expression(s.condition);
                self.graph.set_pointer(id, "condition", Some(condition_id));
                let then_id = self.statement(s.then_statement);
                self.graph.set_pointer(id, "thenStatement", Some(then_id));
                let else_id = s
                    .else_clause
                    .as_ref()
                    .map(|clause| self.statement(clause.statement));
                self.graph.set_pointer(id, "elseStatement", else_id);
            }
            Statement::For(s) => {
                self.graph
                    .set_simple(id, "variable", s.variable.symbol.name.as_str());
                let first_id = self.expression(s.first);
                self.graph.set_pointer(id, "firstExpression", Some(first_id));
                let second_id = s.to.as_ref().map(|to| self.expression(to.end));
                self.graph.set_pointer(id, "secondExpression", second_id);
                let body_id = self.statement(s.body);
                self.graph.set_pointer(id, "statement", Some(body_id));
            }
            Statement::ForType(s) => {
                self.graph
                    .set_simple(id, "variable", s.variable.symbol.name.as_str());
                let ty_id = self.type_expr(s.ty);
                self.graph.set_pointer(id, "type", Some(ty_id));
                let body_id = self.statement(s.body);
                self.graph.set_pointer(id, "statement", Some(body_id));
            }
            Statement::Match(s) => {
                let matchee_id = self.expression(s.matchee);
                self.graph.set_pointer(id, "matchee", Some(matchee_id));
                for (index, part) in s.parts.iter().enumerate() {
                    let part_id = self.graph.add_node("MatchPart");
                    for (pattern_index, pattern) in part.patterns.iter().enumerate() {
                        let pattern_id = self.match_pattern(pattern);
                        self.graph.set_pointer_indexed(
                            part_id,
                            "patterns",
                            pattern_index,
                            Some(pattern_id),
                        );
                    }
                    let statement_id = self.statement(part.statement);
                    self.graph
                        .set_pointer(part_id, "statement", Some(statement_id));
                    self.graph
                        .set_pointer_indexed(id, "parts", index, Some(part_id));
                }
            }
            Statement::Return(s) => {
                let value_id = s.value.map(|value| self.expression(value));
                self.graph.set_pointer(id, "expression", value_id);
            }
            Statement::Const(s) => {
                for (index, part) in s.parts.iter().enumerate() {
                    let part_id = self.graph.add_node("ConstPart");
                    self.graph
                        .set_simple(part_id, "name", part.symbol.name.as_str());
                    let value_id = self.expression(part.value);
                    self.graph.set_pointer(part_id, "expression", Some(value_id));
                    self.graph
                        .set_pointer_indexed(id, "parts", index, Some(part_id));
                }
            }
            Statement::Let(s) => {
                for (index, part) in s.parts.iter().enumerate() {
                    let part_id = self.graph.add_node("LetPart");
                    for (name_index, name) in part.names.iter().enumerate() {
                        let (name_id, name_first) = self.memoized(&name.symbol, "LetName");
                        if name_first {
                            self.graph
                                .set_simple(name_id, "name", name.symbol.name.as_str());
                        }
                        self.graph
                            .set_pointer_indexed(part_id, "names", name_index, Some(name_id));
                    }
                    let ty_id = self.type_expr(part.ty);
                    self.graph.set_pointer(part_id, "type", Some(ty_id));
                    self.graph
                        .set_pointer_indexed(id, "parts", index, Some(part_id));
                }
            }
            Statement::Port(s) => {
                self.graph.set_simple(id, "isInput", s.is_input.to_string());
                for (index, part) in s.parts.iter().enumerate() {
                    let part_id = self.graph.add_node("PortPart");
                    for (name_index, name) in part.names.iter().enumerate() {
                        let (name_id, name_first) = self.memoized(&name.symbol, "PortName");
                        if name_first {
                            self.graph
                                .set_simple(name_id, "name", name.symbol.name.as_str());
                        }
                        self.graph
                            .set_pointer_indexed(part_id, "names", name_index, Some(name_id));
                    }
                    if let Some(resolved) = part.resolved {
                        self.graph.set_simple(part_id, "type", resolved.describe());
                    }
                    let ty_id = self.type_expr(part.ty);
                    self.graph.set_pointer(part_id, "typeExpression", Some(ty_id));
                    self.graph
                        .set_pointer_indexed(id, "parts", index, Some(part_id));
                }
            }
            Statement::Reg(s) => {
                for (index, part) in s.parts.iter().enumerate() {
                    let part_id = self.graph.add_node("RegPart");
                    for (name_index, name) in part.names.iter().enumerate() {
                        let (name_id, name_first) = self.memoized(&name.symbol, "RegName");
                        if name_first {
                            self.graph
                                .set_simple(name_id, "name", name.symbol.name.as_str());
                            let initializer_id = name
                                .initializer
                                .as_ref()
                                .map(|initializer| self.expression(initializer.value));
                            self.graph
                                .set_pointer(name_id, "initializer", initializer_id);
                        }
                        self.graph
                            .set_pointer_indexed(part_id, "names", name_index, Some(name_id));
                    }
                    let ty_id = self.type_expr(part.ty);
                    self.graph.set_pointer(part_id, "type", Some(ty_id));
                    self.graph
                        .set_pointer_indexed(id, "parts", index, Some(part_id));
                }
            }
            Statement::TypeAlias(s) => {
                self.graph
                    .set_simple(id, "name", s.alias.symbol.name.as_str());
                let target_id = self.type_expr(s.target);
                self.graph.set_pointer(id, "type", Some(target_id));
            }
            Statement::Module(_)
            | Statement::Interface(_)
            | Statement::Enum(_)
            | Statement::Function(_)
            | Statement::Bundle(_) => unreachable!("handled above"),
        }
        id
    }

    fn match_pattern(&mut self, node: &MatchPattern<'_>) -> DumpId {
        match node {
            MatchPattern::Number(p) => {
                let id = self.graph.add_node("NumberPatternMatchPattern");
                self.graph
                    .set_simple(id, "pattern", p.token.text(self.source));
                id
            }
            MatchPattern::Range(p) => {
                let id = self.graph.add_node("RangeMatchPattern");
                let first_id = self.expression(p.first);
                self.graph.set_pointer(id, "firstExpression", Some(first_id));
                let second_id = p.to.as_ref().map(|to| self.expression(to.end));
                self.graph.set_pointer(id, "secondExpression", second_id);
                id
            }
        }
    }

    fn template_parameters(&mut self, node: &TemplateParameterList<'_>) -> DumpId {
        let id = self.graph.add_node("TemplateParameters");
        for (index, parameter) in node.parameters().enumerate() {
            let parameter_id = self.graph.add_node("TemplateParameter");
            self.graph
                .set_simple(parameter_id, "name", parameter.symbol.name.as_str());
            let shape = if parameter.kind.is_module() {
                "module"
            } else {
                "value"
            };
            self.graph.set_simple(parameter_id, "kind", shape);
            self.graph
                .set_simple(parameter_id, "isList", parameter.kind.is_list().to_string());
            self.graph
                .set_pointer_indexed(id, "parameters", index, Some(parameter_id));
        }
        id
    }

    fn scoped_id(&mut self, node: &ScopedId<'_>) -> DumpId {
        let id = self.graph.add_node("ScopedId");
        self.graph.set_simple(id, "name", node.name.as_str());
        self.graph
            .set_simple(id, "path", node.path_string());
        if let Some(parent) = node.parent {
            let parent_id = self.scoped_id(parent);
            self.graph.set_pointer(id, "parentScope", Some(parent_id));
        }
        if let Some(arguments) = node.template_arguments {
            let arguments_id = self.graph.add_node("TemplateArguments");
            for (index, argument) in arguments.arguments.iter().enumerate() {
                let argument_id = match argument {
                    TemplateArgument::Type(a) => {
                        let argument_id = self.graph.add_node("TypeTemplateArgument");
                        let ty_id = self.type_expr(a.ty);
                        self.graph.set_pointer(argument_id, "type", Some(ty_id));
                        argument_id
                    }
                    TemplateArgument::Value(a) => {
                        let argument_id = self.graph.add_node("ValueTemplateArgument");
                        let value_id = self.expression(a.expression);
                        self.graph
                            .set_pointer(argument_id, "expression", Some(value_id));
                        argument_id
                    }
                };
                self.graph
                    .set_pointer_indexed(arguments_id, "arguments", index, Some(argument_id));
            }
            self.graph
                .set_pointer(id, "templateArguments", Some(arguments_id));
        }
        id
    }

    fn expression(&mut self, node: &Expression<'_>) -> DumpId {
        match node {
            Expression::Number(e) => {
                let id = self.graph.add_node("NumberExpression");
                self.graph.set_simple(id, "value", e.token.text(self.source));
                id
            }
            Expression::ScopedId(e) => {
                let id = self.graph.add_node("ScopedIdExpression");
                let scoped_id = self.scoped_id(e.id);
                self.graph.set_pointer(id, "scopedId", Some(scoped_id));
                id
            }
            Expression::Paren(e) => {
                let id = self.graph.add_node("ParenExpression");
                let inner = self.expression(e.expression);
                self.graph.set_pointer(id, "expression", Some(inner));
                id
            }
            Expression::List(e) => {
                let id = self.graph.add_node("ListExpression");
                for (index, element) in e.elements.iter().enumerate() {
                    let element_id = self.expression(element.expression);
                    self.graph
                        .set_pointer_indexed(id, "elements", index, Some(element_id));
                }
                id
            }
            Expression::Member(e) => {
                let id = self.graph.add_node("MemberExpression");
                self.graph.set_simple(id, "member", e.name.as_str());
                let base = self.expression(e.base);
                self.graph.set_pointer(id, "expression", Some(base));
                id
            }
            Expression::Slice(e) => {
                let id = self.graph.add_node("SliceExpression");
                let base = self.expression(e.base);
                self.graph.set_pointer(id, "expression", Some(base));
                let start = self.expression(e.start);
                self.graph.set_pointer(id, "startIndex", Some(start));
                let end = e.to.as_ref().map(|to| self.expression(to.end));
                self.graph.set_pointer(id, "endIndex", end);
                id
            }
            Expression::Call(e) => {
                let id = self.graph.add_node("FunctionCallExpression");
                let callee = self.expression(e.callee);
                self.graph.set_pointer(id, "function", Some(callee));
                for (index, argument) in e.arguments.iter().enumerate() {
                    let argument_id = self.expression(argument.expression);
                    self.graph
                        .set_pointer_indexed(id, "arguments", index, Some(argument_id));
                }
                id
            }
            Expression::Cast(e) => {
                let id = self.graph.add_node("CastExpression");
                let ty = self.type_expr(e.ty);
                self.graph.set_pointer(id, "type", Some(ty));
                let inner = self.expression(e.expression);
                self.graph.set_pointer(id, "expression", Some(inner));
                id
            }
            Expression::Fill(e) => {
                let id = self.graph.add_node("FillExpression");
                let count = self.expression(e.count);
                self.graph.set_pointer(id, "countExpression", Some(count));
                let value = self.expression(e.value);
                self.graph.set_pointer(id, "valueExpression", Some(value));
                id
            }
            Expression::Cat(e) => {
                let id = self.graph.add_node("CatExpression");
                let first = self.expression(e.first);
                self.graph.set_pointer_indexed(id, "parts", 0, Some(first));
                for (index, argument) in e.rest.iter().enumerate() {
                    let argument_id = self.expression(argument.expression);
                    self.graph
                        .set_pointer_indexed(id, "parts", index + 1, Some(argument_id));
                }
                id
            }
            Expression::PopCount(e) => {
                let id = self.graph.add_node("PopCountExpression");
                let inner = self.expression(e.expression);
                self.graph.set_pointer(id, "expression", Some(inner));
                id
            }
            Expression::Unary(e) => {
                let id = self.graph.add_node("UnaryExpression");
                self.graph.set_simple(id, "operator", e.op.symbol());
                let operand = self.expression(e.operand);
                self.graph.set_pointer(id, "expression", Some(operand));
                id
            }
            Expression::Binary(e) => {
                let id = self.graph.add_node("BinaryExpression");
                self.graph.set_simple(id, "operator", e.op.symbol());
                let lhs = self.expression(e.lhs);
                self.graph.set_pointer(id, "lhs", Some(lhs));
                let rhs = self.expression(e.rhs);
                self.graph.set_pointer(id, "rhs", Some(rhs));
                id
            }
            Expression::Conditional(e) => {
                let id = self.graph.add_node("ConditionalExpression");
                let condition = self.expression(e.condition);
                self.graph.set_pointer(id, "condition", Some(condition));
                let then_id = self.expression(e.then_expression);
                self.graph.set_pointer(id, "thenExpression", Some(then_id));
                let else_id = self.expression(e.else_expression);
                self.graph.set_pointer(id, "elseExpression", Some(else_id));
                id
            }
        }
    }

    fn type_expr(&mut self, node: &TypeExpr<'_>) -> DumpId {
        match node {
            TypeExpr::ScopedId(t) => {
                let id = self.graph.add_node("ScopedIdType");
                let scoped_id = self.scoped_id(t.id);
                self.graph.set_pointer(id, "scopedId", Some(scoped_id));
                id
            }
            TypeExpr::Flip(t) => {
                let id = self.graph.add_node("FlipType");
                let inner = self.type_expr(t.inner);
                self.graph.set_pointer(id, "type", Some(inner));
                id
            }
            TypeExpr::TypeOf(t) => {
                let id = self.graph.add_node("TypeOfType");
                let inner = self.expression(t.expression);
                self.graph.set_pointer(id, "expression", Some(inner));
                id
            }
            TypeExpr::UInt(t) => {
                let id = self.graph.add_node("UIntType");
                let width = self.expression(t.width);
                self.graph.set_pointer(id, "bitCount", Some(width));
                id
            }
            TypeExpr::SInt(t) => {
                let id = self.graph.add_node("SIntType");
                let width = self.expression(t.width);
                self.graph.set_pointer(id, "bitCount", Some(width));
                id
            }
            TypeExpr::Builtin(t) => {
                let id = self.graph.add_node("BuiltinType");
                self.graph.set_simple(id, "name", t.name.name());
                id
            }
            TypeExpr::Memory(t) => {
                let id = self.graph.add_node("MemoryType");
                let size = self.expression(t.size);
                self.graph.set_pointer(id, "size", Some(size));
                let element = self.type_expr(t.element);
                self.graph.set_pointer(id, "elementType", Some(element));
                id
            }
            TypeExpr::Tuple(t) => {
                let id = self.graph.add_node("TupleType");
                for (index, element) in t.elements.iter().enumerate() {
                    let element_id = self.type_expr(element.ty);
                    self.graph
                        .set_pointer_indexed(id, "elements", index, Some(element_id));
                }
                id
            }
            TypeExpr::Function(t) => {
                let id = self.graph.add_node("FunctionType");
                for (index, parameter) in t.parameters.iter().enumerate() {
                    let parameter_id = self.graph.add_node("FunctionTypeParameter");
                    if let Some(name) = &parameter.name {
                        self.graph
                            .set_simple(parameter_id, "name", name.name.as_str());
                    }
                    let ty_id = self.type_expr(parameter.ty);
                    self.graph.set_pointer(parameter_id, "type", Some(ty_id));
                    self.graph
                        .set_pointer_indexed(id, "parameters", index, Some(parameter_id));
                }
                if let Some(return_type) = &t.return_type {
                    let return_id = self.type_expr(return_type.ty);
                    self.graph.set_pointer(id, "returnType", Some(return_id));
                }
                id
            }
        }
    }
}

fn statement_node_name(node: &Statement<'_>) -> &'static str {
    match node {
        Statement::Empty(_) => "EmptyStatement",
        Statement::Expression(_) => "ExpressionStatement",
        Statement::Block(_) => "BlockStatement",
        Statement::If(_) => "IfStatement",
        Statement::For(_) => "ForStatement",
        Statement::ForType(_) => "ForTypeStatement",
        Statement::Match(_) => "MatchStatement",
        Statement::Return(_) => "ReturnStatement",
        Statement::Break(_) => "BreakStatement",
        Statement::Continue(_) => "ContinueStatement",
        Statement::Const(_) => "ConstStatement",
        Statement::Let(_) => "LetStatement",
        Statement::Port(_) => "InputOutputStatement",
        Statement::Reg(_) => "RegStatement",
        Statement::TypeAlias(_) => "TypeStatement",
        Statement::Module(_) => "Module",
        Statement::Interface(_) => "Interface",
        Statement::Enum(_) => "Enum",
        Statement::Function(_) => "Function",
        Statement::Bundle(_) => "Bundle",
    }
}
