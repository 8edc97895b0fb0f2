//! Semantic types.
//!
//! These are the canonicalized types symbol resolution produces, as
//! opposed to the surface type expressions in
//! [`type_expr`](crate::type_expr). Bit-vector types are interned by the
//! [`TypePool`](crate::type_pool::TypePool); bundles and their flipped
//! twins are created pairwise by the parser; transparent aliases pass
//! equality through to their target. Type equality is pointer identity
//! of canonical types.

use std::cell::Cell;
use std::fmt;
use std::hash::{Hash, Hasher};

use hdlc_num::BitVectorKind;
use hdlc_util::span::Span;

use crate::symbol::SymbolData;
use crate::table::Scope;
use crate::type_expr::TypeExpr;
use hdlc_lex::CommentRun;

/// Port direction of a bit-vector type. Input and Output carry one end
/// of a wire and are therefore stateful; Reg is internal storage
/// classified as stateless for bundle purposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Input,
    Output,
    Reg,
}

impl Direction {
    /// Input and Output swap; Reg is self-dual.
    pub fn flipped(self) -> Direction {
        match self {
            Direction::Input => Direction::Output,
            Direction::Output => Direction::Input,
            Direction::Reg => Direction::Reg,
        }
    }

    pub fn is_stateless(self) -> bool {
        matches!(self, Direction::Reg)
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Input => "input",
            Direction::Output => "output",
            Direction::Reg => "reg",
        }
    }
}

/// The nine built-in global type aliases, each bound to the unique
/// Reg-direction bit-vector type of its kind and width.
pub const BUILTIN_ALIASES: &[(&str, BitVectorKind, usize)] = &[
    ("bit", BitVectorKind::Unsigned, 1),
    ("u8", BitVectorKind::Unsigned, 8),
    ("u16", BitVectorKind::Unsigned, 16),
    ("u32", BitVectorKind::Unsigned, 32),
    ("u64", BitVectorKind::Unsigned, 64),
    ("s8", BitVectorKind::Signed, 8),
    ("s16", BitVectorKind::Signed, 16),
    ("s32", BitVectorKind::Signed, 32),
    ("s64", BitVectorKind::Signed, 64),
];

/// The unique bit-vector type for one `(direction, kind, width)` triple.
///
/// Instances only come out of the type pool, which also materializes and
/// cross-links the flipped twin.
pub struct BitVectorType<'a> {
    pub direction: Direction,
    pub kind: BitVectorKind,
    pub bit_width: usize,
    flipped: Cell<Option<&'a BitVectorType<'a>>>,
}

impl<'a> BitVectorType<'a> {
    pub(crate) fn new(direction: Direction, kind: BitVectorKind, bit_width: usize) -> Self {
        Self {
            direction,
            kind,
            bit_width,
            flipped: Cell::new(None),
        }
    }

    pub(crate) fn link_flipped(&self, twin: &'a BitVectorType<'a>) {
        self.flipped.set(Some(twin));
    }

    /// The twin with Input/Output swapped; self for Reg.
    pub fn flipped(&self) -> &'a BitVectorType<'a> {
        self.flipped.get().expect("twin linked at interning")
    }

    pub fn is_stateless(&self) -> bool {
        self.direction.is_stateless()
    }

    /// Human-readable form, e.g. `uint<8>(reg)`.
    pub fn describe(&self) -> String {
        format!(
            "{}<{}>({})",
            self.kind.name(),
            self.bit_width,
            self.direction.name()
        )
    }
}

impl fmt::Debug for BitVectorType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// One named member of a bundle. The type is assigned after the whole
/// member line has been parsed, the way `a, b : u8;` shares one type.
pub struct Variable<'a> {
    pub span: Span,
    pub before_comma_comments: CommentRun,
    pub before_name_comments: CommentRun,
    pub symbol: SymbolData<'a>,
    ty: Cell<Option<TypeRef<'a>>>,
}

impl<'a> Variable<'a> {
    pub fn new(
        span: Span,
        before_comma_comments: CommentRun,
        before_name_comments: CommentRun,
        symbol: SymbolData<'a>,
    ) -> Self {
        Self {
            span,
            before_comma_comments,
            before_name_comments,
            symbol,
            ty: Cell::new(None),
        }
    }

    /// The member's semantic type, when its surface type resolved.
    pub fn ty(&self) -> Option<TypeRef<'a>> {
        self.ty.get()
    }

    pub fn set_ty(&self, ty: Option<TypeRef<'a>>) {
        self.ty.set(ty);
    }

    pub fn is_stateless(&self) -> bool {
        // Unresolved member types count as stateless until elaboration
        // refines them.
        self.ty.get().map_or(true, |ty| ty.is_stateless())
    }
}

/// One `names : Type ;` line of a bundle body.
pub struct VariableLine<'a> {
    pub span: Span,
    pub names: &'a [&'a Variable<'a>],
    pub before_colon_comments: CommentRun,
    pub ty: &'a TypeExpr<'a>,
    pub before_semicolon_comments: CommentRun,
}

/// A bundle type and declaration: a record whose flipped twin swaps the
/// Input/Output leaves of every member.
pub struct Bundle<'a> {
    span: Cell<Span>,
    pub before_bundle_comments: CommentRun,
    pub before_name_comments: CommentRun,
    pub symbol: SymbolData<'a>,
    pub scope: Scope<'a>,
    pub before_lbrace_comments: CommentRun,
    member_lines: Cell<&'a [&'a VariableLine<'a>]>,
    members: Cell<&'a [&'a Variable<'a>]>,
    defined: Cell<bool>,
    stateless: Cell<bool>,
    before_rbrace_comments: Cell<CommentRun>,
    flipped: Cell<Option<&'a FlippedBundle<'a>>>,
}

impl<'a> Bundle<'a> {
    /// Construct an undefined bundle. Use
    /// [`Context::new_bundle`](crate::context::Context::new_bundle),
    /// which also creates and links the twin.
    pub(crate) fn new(
        span: Span,
        before_bundle_comments: CommentRun,
        before_name_comments: CommentRun,
        symbol: SymbolData<'a>,
        scope: Scope<'a>,
        before_lbrace_comments: CommentRun,
    ) -> Self {
        Self {
            span: Cell::new(span),
            before_bundle_comments,
            before_name_comments,
            symbol,
            scope,
            before_lbrace_comments,
            member_lines: Cell::new(&[]),
            members: Cell::new(&[]),
            defined: Cell::new(false),
            stateless: Cell::new(true),
            before_rbrace_comments: Cell::new(CommentRun::default()),
            flipped: Cell::new(None),
        }
    }

    pub(crate) fn link_flipped(&self, twin: &'a FlippedBundle<'a>) {
        self.flipped.set(Some(twin));
    }

    pub fn span(&self) -> Span {
        self.span.get()
    }

    pub fn is_defined(&self) -> bool {
        self.defined.get()
    }

    pub fn member_lines(&self) -> &'a [&'a VariableLine<'a>] {
        self.member_lines.get()
    }

    pub fn members(&self) -> &'a [&'a Variable<'a>] {
        debug_assert!(self.defined.get());
        self.members.get()
    }

    /// Stateless iff every member's type is stateless; shared with the
    /// twin. Meaningful once defined.
    pub fn is_stateless(&self) -> bool {
        self.stateless.get()
    }

    pub fn before_rbrace_comments(&self) -> CommentRun {
        self.before_rbrace_comments.get()
    }

    /// Bind the member list. A bundle is defined exactly once; the
    /// statelessness of both twins is computed here.
    pub fn define(
        &self,
        member_lines: &'a [&'a VariableLine<'a>],
        members: &'a [&'a Variable<'a>],
        before_rbrace_comments: CommentRun,
        span: Span,
    ) {
        debug_assert!(!self.defined.get());
        self.defined.set(true);
        self.member_lines.set(member_lines);
        self.members.set(members);
        self.before_rbrace_comments.set(before_rbrace_comments);
        self.span.set(span);
        let stateless = members.iter().all(|member| member.is_stateless());
        self.stateless.set(stateless);
        self.flipped().set_stateless(stateless);
    }

    /// The opaque flipped twin.
    pub fn flipped(&self) -> &'a FlippedBundle<'a> {
        self.flipped.get().expect("twin linked at creation")
    }
}

/// The dual of a [`Bundle`] under port-direction inversion.
pub struct FlippedBundle<'a> {
    stateless: Cell<bool>,
    twin: Cell<Option<&'a Bundle<'a>>>,
}

impl<'a> FlippedBundle<'a> {
    pub(crate) fn new() -> Self {
        Self {
            stateless: Cell::new(true),
            twin: Cell::new(None),
        }
    }

    pub(crate) fn link_twin(&self, twin: &'a Bundle<'a>) {
        self.twin.set(Some(twin));
    }

    fn set_stateless(&self, stateless: bool) {
        self.stateless.set(stateless);
    }

    pub fn twin(&self) -> &'a Bundle<'a> {
        self.twin.get().expect("twin linked at creation")
    }

    /// The flipped bundle's members are the twin's variables; the
    /// direction inversion applies to their bit-vector leaves.
    pub fn members(&self) -> &'a [&'a Variable<'a>] {
        self.twin().members()
    }

    pub fn is_stateless(&self) -> bool {
        self.stateless.get()
    }
}

/// A named type whose canonical form is the aliased type. The target is
/// bound when the alias declaration's right-hand side resolves; the nine
/// built-in aliases are always bound.
pub struct TransparentTypeAlias<'a> {
    pub symbol: SymbolData<'a>,
    target: Cell<Option<TypeRef<'a>>>,
}

impl<'a> TransparentTypeAlias<'a> {
    pub fn new(symbol: SymbolData<'a>) -> Self {
        Self {
            symbol,
            target: Cell::new(None),
        }
    }

    pub fn with_target(symbol: SymbolData<'a>, target: TypeRef<'a>) -> Self {
        Self {
            symbol,
            target: Cell::new(Some(target)),
        }
    }

    pub fn target(&self) -> Option<TypeRef<'a>> {
        self.target.get()
    }

    pub fn set_target(&self, target: TypeRef<'a>) {
        debug_assert!(self.target.get().is_none());
        self.target.set(Some(target));
    }
}

/// A reference to any semantic type. Equality is pointer identity of
/// the canonical type, so transparent aliases compare equal to their
/// targets.
#[derive(Clone, Copy)]
pub enum TypeRef<'a> {
    BitVector(&'a BitVectorType<'a>),
    Bundle(&'a Bundle<'a>),
    FlippedBundle(&'a FlippedBundle<'a>),
    Alias(&'a TransparentTypeAlias<'a>),
}

impl<'a> TypeRef<'a> {
    /// The type reached after stripping transparent aliases.
    pub fn canonical(self) -> TypeRef<'a> {
        match self {
            TypeRef::Alias(alias) => match alias.target() {
                Some(target) => target.canonical(),
                // an alias with an unbound target is its own canonical
                // form; it never reaches type comparisons
                None => self,
            },
            other => other,
        }
    }

    fn canonical_ptr(self) -> *const () {
        match self.canonical() {
            TypeRef::BitVector(t) => t as *const BitVectorType<'_> as *const (),
            TypeRef::Bundle(t) => t as *const Bundle<'_> as *const (),
            TypeRef::FlippedBundle(t) => t as *const FlippedBundle<'_> as *const (),
            TypeRef::Alias(t) => t as *const TransparentTypeAlias<'_> as *const (),
        }
    }

    /// The dual under port-direction inversion; self for symmetric
    /// types.
    pub fn flipped(self) -> TypeRef<'a> {
        match self {
            TypeRef::BitVector(t) => TypeRef::BitVector(t.flipped()),
            TypeRef::Bundle(t) => TypeRef::FlippedBundle(t.flipped()),
            TypeRef::FlippedBundle(t) => TypeRef::Bundle(t.twin()),
            TypeRef::Alias(alias) => match alias.target() {
                Some(target) => target.flipped(),
                None => self,
            },
        }
    }

    pub fn is_stateless(self) -> bool {
        match self {
            TypeRef::BitVector(t) => t.is_stateless(),
            TypeRef::Bundle(t) => t.is_stateless(),
            TypeRef::FlippedBundle(t) => t.is_stateless(),
            TypeRef::Alias(alias) => alias.target().map_or(true, |t| t.is_stateless()),
        }
    }

    /// The canonical bit-vector type, when this is one.
    pub fn as_bit_vector(self) -> Option<&'a BitVectorType<'a>> {
        match self.canonical() {
            TypeRef::BitVector(t) => Some(t),
            _ => None,
        }
    }

    pub fn describe(self) -> String {
        match self {
            TypeRef::BitVector(t) => t.describe(),
            TypeRef::Bundle(t) => format!("bundle {}", t.symbol.name),
            TypeRef::FlippedBundle(t) => format!("!bundle {}", t.twin().symbol.name),
            TypeRef::Alias(t) => format!("alias {}", t.symbol.name),
        }
    }
}

impl PartialEq for TypeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.canonical_ptr(), other.canonical_ptr())
    }
}

impl Eq for TypeRef<'_> {}

impl Hash for TypeRef<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (self.canonical_ptr() as usize).hash(state);
    }
}

impl fmt::Debug for TypeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
