//! hdlc-util - Foundation types for the hdlc front end.
//!
//! This crate holds the pieces every other phase leans on:
//!
//! - [`span`]: byte-addressed [`Span`]s with a stable [`SourceId`].
//! - [`source`]: immutable [`Source`] buffers and the [`SourceMap`],
//!   including lazy line/column reconstruction.
//! - [`intern`]: the per-compilation-unit [`StringPool`] whose
//!   [`StringEntry`] handles compare by identity.
//! - [`diagnostic`]: [`Diagnostic`] values, the collecting [`Handler`],
//!   and the [`FatalError`] short-circuit marker.
//! - [`dump`]: identity-preserving [`DumpGraph`]s with JSON and Graphviz
//!   DOT writers.
//!
//! Everything here is single-threaded by design: one compilation unit is
//! one logical task, and the arena plus pools live exactly as long as the
//! unit (see the `hdlc-ast` `Context`).

pub mod diagnostic;
pub mod dump;
pub mod intern;
pub mod source;
pub mod span;

pub use diagnostic::{Diagnostic, DiagnosticKind, FatalError, Handler, Level, PResult};
pub use dump::{DumpGraph, DumpId, DumpNode};
pub use intern::{StringEntry, StringPool};
pub use source::{Source, SourceMap};
pub use span::{SourceId, Span};
