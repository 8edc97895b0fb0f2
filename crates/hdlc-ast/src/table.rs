//! Symbol tables, lookup chains, and scopes.
//!
//! A [`SymbolTable`] is one scope's members: an insertion-ordered,
//! name-keyed map. A [`SymbolLookupChain`] is an immutable singly-linked
//! list of tables, innermost first; the parser links a new node in front
//! of the enclosing chain for every scope it opens and records the
//! `(table, chain)` pair in the scope-introducing node.

use std::cell::RefCell;
use std::hash::BuildHasherDefault;

use indexmap::IndexMap;
use rustc_hash::FxHasher;

use hdlc_util::intern::StringEntry;

use crate::symbol::SymbolRef;

type SymbolMap<'a> = IndexMap<StringEntry<'a>, SymbolRef<'a>, BuildHasherDefault<FxHasher>>;

/// One scope's symbols, in declaration order.
#[derive(Default)]
pub struct SymbolTable<'a> {
    symbols: RefCell<SymbolMap<'a>>,
}

impl<'a> SymbolTable<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a symbol, binding its containing scope to this table.
    /// Returns false (and leaves both the table and the symbol
    /// untouched) when the name is already taken.
    pub fn insert(&'a self, symbol: SymbolRef<'a>) -> bool {
        let mut symbols = self.symbols.borrow_mut();
        if symbols.contains_key(&symbol.name()) {
            return false;
        }
        symbols.insert(symbol.name(), symbol);
        symbol.data().bind(self);
        true
    }

    /// Insert an additional entry for a symbol that already lives in
    /// another table; its containing scope is left alone. Modules and
    /// interfaces use this to make their own name visible inside their
    /// body scope.
    pub fn insert_unbound(&self, symbol: SymbolRef<'a>) -> bool {
        let mut symbols = self.symbols.borrow_mut();
        if symbols.contains_key(&symbol.name()) {
            return false;
        }
        symbols.insert(symbol.name(), symbol);
        true
    }

    pub fn find(&self, name: StringEntry<'a>) -> Option<SymbolRef<'a>> {
        self.symbols.borrow().get(&name).copied()
    }

    pub fn contains(&self, name: StringEntry<'a>) -> bool {
        self.symbols.borrow().contains_key(&name)
    }

    /// The local symbols in insertion order.
    pub fn symbols_in_order(&self) -> Vec<SymbolRef<'a>> {
        self.symbols.borrow().values().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.symbols.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.borrow().is_empty()
    }
}

/// One frame of a lookup chain.
pub struct SymbolLookupChainNode<'a> {
    pub parent: Option<&'a SymbolLookupChainNode<'a>>,
    pub table: &'a SymbolTable<'a>,
}

/// An immutable linked list of scope frames, innermost first.
#[derive(Clone, Copy, Default)]
pub struct SymbolLookupChain<'a> {
    pub head: Option<&'a SymbolLookupChainNode<'a>>,
}

impl<'a> SymbolLookupChain<'a> {
    /// A chain with no frames; `find` always misses.
    pub fn empty() -> Self {
        Self { head: None }
    }

    pub fn new(head: &'a SymbolLookupChainNode<'a>) -> Self {
        Self { head: Some(head) }
    }

    /// Find the first binding of `name`, scanning innermost to
    /// outermost.
    pub fn find(self, name: StringEntry<'a>) -> Option<SymbolRef<'a>> {
        let mut node = self.head;
        while let Some(current) = node {
            if let Some(symbol) = current.table.find(name) {
                return Some(symbol);
            }
            node = current.parent;
        }
        None
    }

    /// The frames of this chain, innermost first.
    pub fn frames(self) -> impl Iterator<Item = &'a SymbolTable<'a>> {
        std::iter::successors(self.head, |node| node.parent).map(|node| node.table)
    }
}

/// The `(table, chain)` pair recorded in every scope-introducing node:
/// the node's own member table plus the lookup chain in effect at its
/// declaration.
#[derive(Clone, Copy)]
pub struct Scope<'a> {
    pub table: &'a SymbolTable<'a>,
    pub chain: SymbolLookupChain<'a>,
}
