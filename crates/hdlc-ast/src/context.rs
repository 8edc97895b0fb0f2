//! The per-compilation-unit context.
//!
//! One [`Context`] bundles the arena, the string pool, the type pool,
//! the template-parameter-kind pool, and the seeded global scope. It is
//! created against an externally owned [`Bump`], borrowed mutably by the
//! parser for one top-level module, and dropped as a whole with its
//! arena. Nothing inside is freed individually.

use bumpalo::Bump;

use hdlc_lex::CommentRun;
use hdlc_util::intern::{StringEntry, StringPool};
use hdlc_util::span::Span;

use crate::symbol::{SymbolData, SymbolRef};
use crate::table::{Scope, SymbolTable};
use crate::template::TemplateParameterKindPool;
use crate::type_pool::TypePool;
use crate::types::{
    Bundle, Direction, FlippedBundle, TransparentTypeAlias, TypeRef, BUILTIN_ALIASES,
};

pub struct Context<'a> {
    arena: &'a Bump,
    pub strings: StringPool<'a>,
    pub types: TypePool<'a>,
    pub template_kinds: TemplateParameterKindPool<'a>,
    global_table: &'a SymbolTable<'a>,
}

impl<'a> Context<'a> {
    /// Build a context over `arena` and seed the global scope with the
    /// nine built-in bit-vector aliases (`bit`, `u8`…`u64`, `s8`…`s64`),
    /// each a transparent alias of the unique Reg-direction type of its
    /// kind and width.
    pub fn new(arena: &'a Bump) -> Context<'a> {
        let strings = StringPool::new(arena);
        let types = TypePool::new(arena);
        let global_table: &'a SymbolTable<'a> = arena.alloc(SymbolTable::new());
        for &(name, kind, bit_width) in BUILTIN_ALIASES {
            let ty = types.bit_vector_type(Direction::Reg, kind, bit_width);
            let alias: &'a TransparentTypeAlias<'a> =
                arena.alloc(TransparentTypeAlias::with_target(
                    SymbolData::new(strings.intern(name), Span::DUMMY),
                    TypeRef::BitVector(ty),
                ));
            let inserted = global_table.insert(SymbolRef::TypeAlias(alias));
            debug_assert!(inserted);
        }
        Context {
            arena,
            strings,
            types,
            template_kinds: TemplateParameterKindPool::new(arena),
            global_table,
        }
    }

    /// The global scope, pre-seeded with the builtin aliases.
    pub fn global_table(&self) -> &'a SymbolTable<'a> {
        self.global_table
    }

    /// Allocate a node into the unit's arena.
    pub fn alloc<T>(&self, value: T) -> &'a T {
        self.arena.alloc(value)
    }

    /// Copy a list of `Copy` items (typically node references) into the
    /// arena.
    pub fn alloc_slice<T: Copy>(&self, values: &[T]) -> &'a [T] {
        self.arena.alloc_slice_copy(values)
    }

    pub fn intern(&self, text: &str) -> StringEntry<'a> {
        self.strings.intern(text)
    }

    pub fn new_symbol_table(&self) -> &'a SymbolTable<'a> {
        self.arena.alloc(SymbolTable::new())
    }

    /// Create a bundle and its flipped twin, cross-linked.
    #[allow(clippy::too_many_arguments)]
    pub fn new_bundle(
        &self,
        span: Span,
        before_bundle_comments: CommentRun,
        before_name_comments: CommentRun,
        symbol: SymbolData<'a>,
        scope: Scope<'a>,
        before_lbrace_comments: CommentRun,
    ) -> &'a Bundle<'a> {
        let flipped: &'a FlippedBundle<'a> = self.arena.alloc(FlippedBundle::new());
        let bundle: &'a Bundle<'a> = self.arena.alloc(Bundle::new(
            span,
            before_bundle_comments,
            before_name_comments,
            symbol,
            scope,
            before_lbrace_comments,
        ));
        bundle.link_flipped(flipped);
        flipped.link_twin(bundle);
        bundle
    }
}
