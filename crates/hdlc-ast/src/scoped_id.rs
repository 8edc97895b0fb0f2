//! Scoped identifiers.
//!
//! `A::B::C` (optionally `::`-rooted) is represented as a chain of
//! segments, each holding its own name, optional `!{…}` template
//! arguments, the lookup chain in effect at the reference, and the
//! symbol the segment resolved to. Resolution happens at parse time;
//! later siblings are not visible (no forward references).

use hdlc_lex::CommentRun;
use hdlc_util::intern::StringEntry;
use hdlc_util::span::Span;

use crate::symbol::SymbolRef;
use crate::table::SymbolLookupChain;
use crate::template::TemplateArgumentList;

/// One resolved segment of a scoped identifier. `parent` is the segment
/// to the left, if any.
pub struct ScopedId<'a> {
    pub span: Span,
    pub parent: Option<&'a ScopedId<'a>>,
    pub before_colon_colon_comments: CommentRun,
    /// True when this segment was preceded by `::` (always true for
    /// non-first segments; for the first segment it selects the global
    /// scope).
    pub has_colon_colon: bool,
    pub before_name_comments: CommentRun,
    pub name_span: Span,
    pub name: StringEntry<'a>,
    pub template_arguments: Option<&'a TemplateArgumentList<'a>>,
    /// The chain that was in effect at the reference.
    pub chain: SymbolLookupChain<'a>,
    /// What the segment resolved to.
    pub symbol: SymbolRef<'a>,
}

impl ScopedId<'_> {
    /// The full dotted path, e.g. `a::b::c`.
    pub fn path_string(&self) -> String {
        let mut segments = Vec::new();
        let mut current = Some(self);
        while let Some(segment) = current {
            segments.push(segment);
            current = segment.parent;
        }
        let mut out = String::new();
        for (index, segment) in segments.iter().rev().enumerate() {
            if segment.has_colon_colon || index > 0 {
                out.push_str("::");
            }
            out.push_str(&segment.name);
        }
        out
    }
}
