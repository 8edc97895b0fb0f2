//! Template parameters, parameter kinds, and template arguments.
//!
//! Parameter kinds are interned values: two parameters declared
//! `n : u32` anywhere in the unit share one canonical
//! [`TemplateParameterKind`]. Equality is structural, with the type
//! component compared by canonical identity.

use std::cell::RefCell;
use std::hash::{Hash, Hasher};

use bumpalo::Bump;
use rustc_hash::FxHashMap;

use hdlc_lex::CommentRun;
use hdlc_util::span::Span;

use crate::decl::Interface;
use crate::expr::Expression;
use crate::symbol::SymbolData;
use crate::type_expr::TypeExpr;
use crate::types::TypeRef;

/// The structural shape of a template parameter: a value of a bit-vector
/// type, or a module implementing an interface. `is_list` marks `...`
/// parameter packs.
#[derive(Clone, Copy)]
pub enum TemplateParameterKind<'a> {
    Value { is_list: bool, ty: TypeRef<'a> },
    Module { is_list: bool, interface: &'a Interface<'a> },
}

impl<'a> TemplateParameterKind<'a> {
    pub fn is_list(self) -> bool {
        match self {
            TemplateParameterKind::Value { is_list, .. } => is_list,
            TemplateParameterKind::Module { is_list, .. } => is_list,
        }
    }

    pub fn is_value(self) -> bool {
        matches!(self, TemplateParameterKind::Value { .. })
    }

    pub fn is_module(self) -> bool {
        matches!(self, TemplateParameterKind::Module { .. })
    }
}

impl PartialEq for TemplateParameterKind<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                TemplateParameterKind::Value { is_list: a, ty: ta },
                TemplateParameterKind::Value { is_list: b, ty: tb },
            ) => a == b && ta == tb,
            (
                TemplateParameterKind::Module {
                    is_list: a,
                    interface: ia,
                },
                TemplateParameterKind::Module {
                    is_list: b,
                    interface: ib,
                },
            ) => a == b && std::ptr::eq(*ia, *ib),
            _ => false,
        }
    }
}

impl Eq for TemplateParameterKind<'_> {}

impl Hash for TemplateParameterKind<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            TemplateParameterKind::Value { is_list, ty } => {
                0u8.hash(state);
                is_list.hash(state);
                ty.hash(state);
            }
            TemplateParameterKind::Module { is_list, interface } => {
                1u8.hash(state);
                is_list.hash(state);
                (*interface as *const Interface<'_> as usize).hash(state);
            }
        }
    }
}

/// Hands out one canonical instance per structurally distinct kind.
pub struct TemplateParameterKindPool<'a> {
    arena: &'a Bump,
    kinds: RefCell<FxHashMap<TemplateParameterKind<'a>, &'a TemplateParameterKind<'a>>>,
}

impl<'a> TemplateParameterKindPool<'a> {
    pub fn new(arena: &'a Bump) -> Self {
        Self {
            arena,
            kinds: RefCell::new(FxHashMap::default()),
        }
    }

    pub fn intern(&self, kind: TemplateParameterKind<'a>) -> &'a TemplateParameterKind<'a> {
        if let Some(&existing) = self.kinds.borrow().get(&kind) {
            return existing;
        }
        let stored: &'a TemplateParameterKind<'a> = self.arena.alloc(kind);
        self.kinds.borrow_mut().insert(kind, stored);
        stored
    }

    pub fn len(&self) -> usize {
        self.kinds.borrow().len()
    }
}

/// One declared template parameter name.
pub struct TemplateParameter<'a> {
    pub span: Span,
    pub before_comma_comments: CommentRun,
    pub before_name_comments: CommentRun,
    pub symbol: SymbolData<'a>,
    pub kind: &'a TemplateParameterKind<'a>,
}

/// One `[module] names : Type [...]` group of a parameter list; every
/// name in the group shares the kind.
pub struct TemplateParameterGroup<'a> {
    pub span: Span,
    pub before_comma_comments: CommentRun,
    pub is_module: bool,
    pub before_module_comments: CommentRun,
    pub parameters: &'a [&'a TemplateParameter<'a>],
    pub before_colon_comments: CommentRun,
    pub ty: &'a TypeExpr<'a>,
    /// Comments before the `...` when the group is a parameter pack.
    pub ellipsis: Option<CommentRun>,
}

/// A `!{…}` template parameter list.
pub struct TemplateParameterList<'a> {
    pub span: Span,
    pub before_bang_comments: CommentRun,
    pub before_lbrace_comments: CommentRun,
    pub groups: &'a [&'a TemplateParameterGroup<'a>],
    pub before_rbrace_comments: CommentRun,
}

impl<'a> TemplateParameterList<'a> {
    /// All parameters of all groups, in declaration order.
    pub fn parameters(&self) -> impl Iterator<Item = &'a TemplateParameter<'a>> + '_ {
        self.groups
            .iter()
            .flat_map(|group| group.parameters.iter().copied())
    }
}

/// A `!{…}` template argument list attached to a scoped-id segment.
pub struct TemplateArgumentList<'a> {
    pub span: Span,
    pub before_bang_comments: CommentRun,
    pub before_lbrace_comments: CommentRun,
    pub arguments: &'a [&'a TemplateArgument<'a>],
    pub before_rbrace_comments: CommentRun,
}

pub enum TemplateArgument<'a> {
    /// `type T` — a type argument.
    Type(TypeTemplateArgument<'a>),
    /// A value expression argument.
    Value(ValueTemplateArgument<'a>),
}

impl TemplateArgument<'_> {
    pub fn span(&self) -> Span {
        match self {
            TemplateArgument::Type(a) => a.span,
            TemplateArgument::Value(a) => a.span,
        }
    }
}

pub struct TypeTemplateArgument<'a> {
    pub span: Span,
    pub before_comma_comments: CommentRun,
    pub before_type_comments: CommentRun,
    pub ty: &'a TypeExpr<'a>,
}

pub struct ValueTemplateArgument<'a> {
    pub span: Span,
    pub before_comma_comments: CommentRun,
    pub expression: &'a Expression<'a>,
}
