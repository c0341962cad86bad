//! linterna-sem - Semantic Analyzer
//!
//! ============================================================================
//! SEMANTIC ANALYSIS
//! ============================================================================
//!
//! The third pipeline stage walks the AST read-only and answers the
//! questions syntax cannot: is every name declared, is it initialized
//! before use, is a `const` ever written twice, does a call match its
//! function's arity. Alongside the hard errors it emits the style
//! warnings a teaching IDE surfaces (loose equality, suspicious
//! arithmetic between literal classes, dead branches, unused bindings).
//!
//! SCOPES:
//!
//! Name resolution runs over a tree of scopes (global, function, block)
//! threaded by parent indices. Lookup walks the parent chain; definition
//! writes only into the current scope, and a name appears at most once
//! per scope. Function bodies, block statements and `for` headers each
//! open a child scope.
//!
//! HOISTING:
//!
//! Before the statements of a global or function scope are walked, every
//! function declared directly in that scope is pre-installed (initialized,
//! hoisted, parameter list captured), so calls above the declaration
//! resolve. Function declarations inside blocks follow the regular walk.
//!
//! The analyzer records every diagnostic and continues; no input aborts
//! the walk. Analysis is deterministic: the same source yields the same
//! diagnostics in the same order.

pub mod scope;

mod analysis;
mod edge_cases;

pub use analysis::{always_falsy, always_truthy, SemanticAnalyzer};
pub use scope::{LitClass, Scope, ScopeId, ScopeKind, ScopeTree, SymbolInfo, SymbolKind, BUILTINS};

use linterna_par::ast::Program;
use linterna_util::Handler;

/// Analyze a parsed program.
///
/// Diagnostics are recorded on the handler; the finished scope tree is
/// returned for the symbol-table report.
///
/// # Example
///
/// ```
/// use linterna_util::Handler;
///
/// let (program, _, _) = linterna_par::parse("const PI = 3.14;");
/// let handler = Handler::new();
/// let scopes = linterna_sem::analyze(&program, &handler);
/// assert_eq!(handler.warning_count(), 1); // unused PI
/// assert!(scopes.len() >= 1);
/// ```
pub fn analyze(program: &Program, handler: &Handler) -> ScopeTree {
    SemanticAnalyzer::new(handler).analyze_program(program)
}
