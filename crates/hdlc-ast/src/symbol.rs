//! Symbols: the name-bearing view of declaration nodes.
//!
//! Every declaration-producing AST node embeds a [`SymbolData`] carrying
//! its interned name, the name's span, and the table it was inserted
//! into. [`SymbolRef`] is the closed sum of all such nodes; it is what
//! symbol tables store and what name lookups return.

use std::cell::Cell;
use std::fmt;

use hdlc_util::intern::StringEntry;
use hdlc_util::span::Span;

use crate::decl::{EnumDecl, EnumPart, Function, FunctionParameter, Interface, Module};
use crate::stmt::{ConstPart, ForVariable, LetName, PortName, RegName};
use crate::table::SymbolTable;
use crate::template::TemplateParameter;
use crate::types::{Bundle, TransparentTypeAlias, TypeRef, Variable};

/// Name, name location, and containing-scope back-link shared by every
/// declaration node. The back-link is bound exactly once, by
/// [`SymbolTable::insert`](crate::table::SymbolTable::insert).
pub struct SymbolData<'a> {
    pub name: StringEntry<'a>,
    pub name_span: Span,
    containing: Cell<Option<&'a SymbolTable<'a>>>,
}

impl<'a> SymbolData<'a> {
    pub fn new(name: StringEntry<'a>, name_span: Span) -> Self {
        Self {
            name,
            name_span,
            containing: Cell::new(None),
        }
    }

    /// The table this symbol was inserted into, once inserted.
    pub fn containing_table(&self) -> Option<&'a SymbolTable<'a>> {
        self.containing.get()
    }

    pub(crate) fn bind(&self, table: &'a SymbolTable<'a>) {
        debug_assert!(self.containing.get().is_none());
        self.containing.set(Some(table));
    }
}

/// A reference to any declaration node, viewed as a symbol.
#[derive(Clone, Copy)]
pub enum SymbolRef<'a> {
    Module(&'a Module<'a>),
    Interface(&'a Interface<'a>),
    Function(&'a Function<'a>),
    FunctionParameter(&'a FunctionParameter<'a>),
    Enum(&'a EnumDecl<'a>),
    EnumPart(&'a EnumPart<'a>),
    Bundle(&'a Bundle<'a>),
    Variable(&'a Variable<'a>),
    TypeAlias(&'a TransparentTypeAlias<'a>),
    TemplateParameter(&'a TemplateParameter<'a>),
    ForVariable(&'a ForVariable<'a>),
    ConstName(&'a ConstPart<'a>),
    LetName(&'a LetName<'a>),
    PortName(&'a PortName<'a>),
    RegName(&'a RegName<'a>),
}

impl<'a> SymbolRef<'a> {
    pub fn data(self) -> &'a SymbolData<'a> {
        match self {
            SymbolRef::Module(n) => &n.symbol,
            SymbolRef::Interface(n) => &n.symbol,
            SymbolRef::Function(n) => &n.symbol,
            SymbolRef::FunctionParameter(n) => &n.symbol,
            SymbolRef::Enum(n) => &n.symbol,
            SymbolRef::EnumPart(n) => &n.symbol,
            SymbolRef::Bundle(n) => &n.symbol,
            SymbolRef::Variable(n) => &n.symbol,
            SymbolRef::TypeAlias(n) => &n.symbol,
            SymbolRef::TemplateParameter(n) => &n.symbol,
            SymbolRef::ForVariable(n) => &n.symbol,
            SymbolRef::ConstName(n) => &n.symbol,
            SymbolRef::LetName(n) => &n.symbol,
            SymbolRef::PortName(n) => &n.symbol,
            SymbolRef::RegName(n) => &n.symbol,
        }
    }

    pub fn name(self) -> StringEntry<'a> {
        self.data().name
    }

    pub fn name_span(self) -> Span {
        self.data().name_span
    }

    pub fn containing_table(self) -> Option<&'a SymbolTable<'a>> {
        self.data().containing_table()
    }

    /// The member table of a scope-introducing symbol: modules,
    /// interfaces, enums, and bundles. Scoped-name resolution may only
    /// step through these.
    pub fn scope_table(self) -> Option<&'a SymbolTable<'a>> {
        match self {
            SymbolRef::Module(n) => Some(n.scope.table),
            SymbolRef::Interface(n) => Some(n.scope.table),
            SymbolRef::Enum(n) => Some(n.scope.table),
            SymbolRef::Bundle(n) => Some(n.scope.table),
            _ => None,
        }
    }

    /// True for symbols that may appear in type position. Interfaces
    /// count: they name types in `implements` clauses and module-kind
    /// template parameters, though they carry no semantic type before
    /// elaboration.
    pub fn is_type_symbol(self) -> bool {
        matches!(
            self,
            SymbolRef::TypeAlias(_) | SymbolRef::Bundle(_) | SymbolRef::Interface(_)
        )
    }

    /// The semantic type a type symbol denotes, when it is already
    /// resolvable without elaboration.
    pub fn semantic_type(self) -> Option<TypeRef<'a>> {
        match self {
            SymbolRef::TypeAlias(alias) => alias.target().map(|_| TypeRef::Alias(alias)),
            SymbolRef::Bundle(bundle) => Some(TypeRef::Bundle(bundle)),
            _ => None,
        }
    }

    fn kind_name(self) -> &'static str {
        match self {
            SymbolRef::Module(_) => "module",
            SymbolRef::Interface(_) => "interface",
            SymbolRef::Function(_) => "function",
            SymbolRef::FunctionParameter(_) => "function parameter",
            SymbolRef::Enum(_) => "enum",
            SymbolRef::EnumPart(_) => "enum part",
            SymbolRef::Bundle(_) => "bundle",
            SymbolRef::Variable(_) => "variable",
            SymbolRef::TypeAlias(_) => "type alias",
            SymbolRef::TemplateParameter(_) => "template parameter",
            SymbolRef::ForVariable(_) => "for variable",
            SymbolRef::ConstName(_) => "const",
            SymbolRef::LetName(_) => "let",
            SymbolRef::PortName(_) => "port",
            SymbolRef::RegName(_) => "reg",
        }
    }
}

impl PartialEq for SymbolRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(
            self.data() as *const SymbolData<'_>,
            other.data() as *const SymbolData<'_>,
        )
    }
}

impl Eq for SymbolRef<'_> {}

impl fmt::Debug for SymbolRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.kind_name(), self.name())
    }
}
