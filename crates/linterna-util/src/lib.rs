//! linterna-util - Core Utilities and Foundation Types
//!
//! ============================================================================
//! MODULE OVERVIEW
//! ============================================================================
//!
//! This crate provides the fundamental types shared by every stage of the
//! linterna analysis pipeline. None of them know anything about the analyzed
//! language; they are infrastructure:
//!
//! 1. SOURCE LOCATIONS (`span`)
//!    Byte offsets plus 1-based line/column pairs. Every token, AST node and
//!    diagnostic carries positions derived from a `Span`.
//!
//! 2. STRING INTERNING (`symbol`)
//!    A `Symbol` is a 4-byte handle to a string stored once in a global
//!    table. Identifiers and lexemes are compared by index instead of by
//!    content, and the same spelling never allocates twice.
//!
//!    Properties of the interning function I: S -> N:
//!    - I(s1) = I(s2) iff s1 = s2 (injective over distinct strings)
//!    - comparison and hashing become O(1) integer operations
//!
//! 3. TYPED INDICES (`index_vec`)
//!    `IndexVec<I, T>` pairs a plain `Vec` with a newtype index so that an
//!    id from one arena cannot be used to index another. The scope tree is
//!    built on this: scopes live in an arena and refer to their parent by
//!    index, which keeps the parent link non-owning.
//!
//! 4. DIAGNOSTICS (`diagnostic`)
//!    `Handler` collects `Diagnostic` records (error or warning, message,
//!    span, optionally the originating AST-node kind) in emission order.
//!    No diagnostic ever aborts a stage; the pipeline records and keeps
//!    going, and the reports are rendered from the collected list.

mod index_vec;
mod span;

pub mod diagnostic;
pub mod error;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, Handler, Level};
pub use error::SymbolError;
pub use index_vec::{Idx, IndexVec};
pub use span::Span;
pub use symbol::Symbol;

// Re-export commonly used hash containers
pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;
