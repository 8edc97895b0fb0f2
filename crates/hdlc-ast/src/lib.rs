//! hdlc-ast - The resolved, concrete-syntax-preserving AST.
//!
//! Everything a parsed compilation unit is made of lives here:
//!
//! - [`context`]: the per-unit [`Context`] tying the arena to the
//!   string, type, and template-kind pools and the seeded global scope.
//! - [`decl`], [`stmt`], [`expr`], [`type_expr`], [`scoped_id`],
//!   [`template`]: the node model. Every node carries its span and the
//!   leading-comment runs of its punctuators; child lists are arena
//!   slices; cross-references are `Cell`-backed non-owning links bound
//!   right after the forward structure exists.
//! - [`types`] and [`type_pool`]: semantic types with canonicalization,
//!   flipped twins, and bundle statelessness.
//! - [`symbol`] and [`table`]: symbols, insertion-ordered symbol tables,
//!   and immutable lookup chains.
//! - [`visit`], [`dump`], [`dump_graph`]: traversal, the `=N`/`*N` text
//!   dump, and the structured dump graph for JSON/DOT.
//!
//! The whole graph is freed at once with the arena; nothing in it is
//! dropped individually.

pub mod context;
pub mod decl;
pub mod dump;
pub mod dump_graph;
pub mod expr;
pub mod scoped_id;
pub mod stmt;
pub mod symbol;
pub mod table;
pub mod template;
pub mod type_expr;
pub mod type_pool;
pub mod types;
pub mod visit;

pub use context::Context;
pub use decl::{Import, Module, TopLevelModule};
pub use dump::{dump_module_text, dump_top_level_text};
pub use dump_graph::build_dump_graph;
pub use symbol::{SymbolData, SymbolRef};
pub use table::{Scope, SymbolLookupChain, SymbolLookupChainNode, SymbolTable};
pub use type_pool::TypePool;
pub use types::{
    BitVectorType, Bundle, Direction, FlippedBundle, TransparentTypeAlias, TypeRef, Variable,
};
pub use visit::Visitor;

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use hdlc_num::BitVectorKind;
    use hdlc_util::span::Span;

    #[test]
    fn test_bit_vector_type_uniqueness() {
        let arena = Bump::new();
        let ctx = Context::new(&arena);
        for direction in [Direction::Input, Direction::Output, Direction::Reg] {
            for kind in [BitVectorKind::Unsigned, BitVectorKind::Signed] {
                for width in [1usize, 2, 8, 64, 1 << 20] {
                    let a = ctx.types.bit_vector_type(direction, kind, width);
                    let b = ctx.types.bit_vector_type(direction, kind, width);
                    assert!(std::ptr::eq(a, b));
                    assert_eq!(a.direction, direction);
                    assert_eq!(a.kind, kind);
                    assert_eq!(a.bit_width, width);
                }
            }
        }
    }

    #[test]
    fn test_flip_involution() {
        let arena = Bump::new();
        let ctx = Context::new(&arena);
        let input = ctx
            .types
            .bit_vector_type(Direction::Input, BitVectorKind::Unsigned, 4);
        let output = input.flipped();
        assert_eq!(output.direction, Direction::Output);
        assert!(std::ptr::eq(output.flipped(), input));

        let reg = ctx
            .types
            .bit_vector_type(Direction::Reg, BitVectorKind::Signed, 4);
        assert!(std::ptr::eq(reg.flipped(), reg));
    }

    #[test]
    fn test_flip_direction() {
        assert_eq!(Direction::Input.flipped(), Direction::Output);
        assert_eq!(Direction::Output.flipped(), Direction::Input);
        assert_eq!(Direction::Reg.flipped(), Direction::Reg);
    }

    #[test]
    fn test_statelessness_by_direction() {
        assert!(!Direction::Input.is_stateless());
        assert!(!Direction::Output.is_stateless());
        assert!(Direction::Reg.is_stateless());
    }

    #[test]
    fn test_twin_created_eagerly() {
        let arena = Bump::new();
        let ctx = Context::new(&arena);
        let before = ctx.types.len();
        ctx.types
            .bit_vector_type(Direction::Input, BitVectorKind::Unsigned, 123);
        // the twin materializes with the first of the pair
        assert_eq!(ctx.types.len(), before + 2);
        ctx.types
            .bit_vector_type(Direction::Output, BitVectorKind::Unsigned, 123);
        assert_eq!(ctx.types.len(), before + 2);
    }

    #[test]
    fn test_alias_is_transparent() {
        let arena = Bump::new();
        let ctx = Context::new(&arena);
        let target = ctx
            .types
            .bit_vector_type(Direction::Reg, BitVectorKind::Unsigned, 8);
        let alias = ctx.alloc(TransparentTypeAlias::with_target(
            SymbolData::new(ctx.intern("byte"), Span::DUMMY),
            TypeRef::BitVector(target),
        ));
        assert_eq!(TypeRef::Alias(alias), TypeRef::BitVector(target));
        assert_eq!(
            TypeRef::Alias(alias).flipped(),
            TypeRef::BitVector(target.flipped())
        );
        assert!(TypeRef::Alias(alias).is_stateless());
    }

    #[test]
    fn test_symbol_insert_and_find() {
        let arena = Bump::new();
        let ctx = Context::new(&arena);
        let table = ctx.new_symbol_table();
        let alias = ctx.alloc(TransparentTypeAlias::new(SymbolData::new(
            ctx.intern("x"),
            Span::DUMMY,
        )));
        let symbol = SymbolRef::TypeAlias(alias);
        assert!(table.insert(symbol));
        assert_eq!(table.find(ctx.intern("x")), Some(symbol));
        assert!(std::ptr::eq(
            symbol.containing_table().unwrap(),
            table
        ));
    }

    #[test]
    fn test_symbol_insert_duplicate_rejected() {
        let arena = Bump::new();
        let ctx = Context::new(&arena);
        let table = ctx.new_symbol_table();
        let first = ctx.alloc(TransparentTypeAlias::new(SymbolData::new(
            ctx.intern("dup"),
            Span::DUMMY,
        )));
        let second = ctx.alloc(TransparentTypeAlias::new(SymbolData::new(
            ctx.intern("dup"),
            Span::DUMMY,
        )));
        assert!(table.insert(SymbolRef::TypeAlias(first)));
        assert!(!table.insert(SymbolRef::TypeAlias(second)));
        // the loser is untouched and the table still maps to the winner
        assert!(second.symbol.containing_table().is_none());
        assert_eq!(
            table.find(ctx.intern("dup")),
            Some(SymbolRef::TypeAlias(first))
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_symbols_in_insertion_order() {
        let arena = Bump::new();
        let ctx = Context::new(&arena);
        let table = ctx.new_symbol_table();
        for name in ["c", "a", "b"] {
            let alias = ctx.alloc(TransparentTypeAlias::new(SymbolData::new(
                ctx.intern(name),
                Span::DUMMY,
            )));
            table.insert(SymbolRef::TypeAlias(alias));
        }
        let names: Vec<String> = table
            .symbols_in_order()
            .iter()
            .map(|s| s.name().to_string())
            .collect();
        assert_eq!(names, ["c", "a", "b"]);
    }

    #[test]
    fn test_lookup_chain_shadowing() {
        let arena = Bump::new();
        let ctx = Context::new(&arena);
        let outer_table = ctx.new_symbol_table();
        let inner_table = ctx.new_symbol_table();

        let outer_symbol = ctx.alloc(TransparentTypeAlias::new(SymbolData::new(
            ctx.intern("n"),
            Span::DUMMY,
        )));
        let inner_symbol = ctx.alloc(TransparentTypeAlias::new(SymbolData::new(
            ctx.intern("n"),
            Span::DUMMY,
        )));
        outer_table.insert(SymbolRef::TypeAlias(outer_symbol));
        inner_table.insert(SymbolRef::TypeAlias(inner_symbol));

        let outer_node = ctx.alloc(SymbolLookupChainNode {
            parent: None,
            table: outer_table,
        });
        let outer_chain = SymbolLookupChain::new(outer_node);
        let inner_node = ctx.alloc(SymbolLookupChainNode {
            parent: outer_chain.head,
            table: inner_table,
        });
        let inner_chain = SymbolLookupChain::new(inner_node);

        // innermost frame wins
        assert_eq!(
            inner_chain.find(ctx.intern("n")),
            Some(SymbolRef::TypeAlias(inner_symbol))
        );
        assert_eq!(
            outer_chain.find(ctx.intern("n")),
            Some(SymbolRef::TypeAlias(outer_symbol))
        );
        assert_eq!(inner_chain.find(ctx.intern("missing")), None);
        assert_eq!(inner_chain.frames().count(), 2);
    }

    #[test]
    fn test_template_kind_interning() {
        use template::TemplateParameterKind;

        let arena = Bump::new();
        let ctx = Context::new(&arena);
        let u32_type = TypeRef::BitVector(ctx.types.bit_vector_type(
            Direction::Reg,
            BitVectorKind::Unsigned,
            32,
        ));
        let a = ctx.template_kinds.intern(TemplateParameterKind::Value {
            is_list: false,
            ty: u32_type,
        });
        let b = ctx.template_kinds.intern(TemplateParameterKind::Value {
            is_list: false,
            ty: u32_type,
        });
        let c = ctx.template_kinds.intern(TemplateParameterKind::Value {
            is_list: true,
            ty: u32_type,
        });
        assert!(std::ptr::eq(a, b));
        assert!(!std::ptr::eq(a, c));
        assert_eq!(ctx.template_kinds.len(), 2);
    }

    #[test]
    fn test_template_kind_eq_through_alias() {
        use template::TemplateParameterKind;

        let arena = Bump::new();
        let ctx = Context::new(&arena);
        let target = ctx
            .types
            .bit_vector_type(Direction::Reg, BitVectorKind::Unsigned, 16);
        let alias = ctx.alloc(TransparentTypeAlias::with_target(
            SymbolData::new(ctx.intern("halfword"), Span::DUMMY),
            TypeRef::BitVector(target),
        ));
        // structural equality sees through the alias to the canonical type
        let direct = ctx.template_kinds.intern(TemplateParameterKind::Value {
            is_list: false,
            ty: TypeRef::BitVector(target),
        });
        let via_alias = ctx.template_kinds.intern(TemplateParameterKind::Value {
            is_list: false,
            ty: TypeRef::Alias(alias),
        });
        assert!(std::ptr::eq(direct, via_alias));
    }
}
