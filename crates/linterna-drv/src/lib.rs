//! linterna-drv - Analysis Driver
//!
//! ============================================================================
//! PIPELINE DRIVER
//! ============================================================================
//!
//! The driver owns the orchestration of the three stages and the public
//! surface the IDE shell calls:
//!
//! ```text
//! Source text
//!      |
//!      v
//!   [Lexer]    -> positioned tokens + lexical errors
//!      |
//!      v
//!   [Parser]   -> AST + syntax errors (panic-mode recovered)
//!      |
//!      v
//!   [Analyzer] -> scope tree + semantic errors + warnings
//!      |
//!      v
//!   [Reporter] -> three Spanish report sections
//! ```
//!
//! Execution is single-threaded, synchronous and strictly sequential; no
//! stage suspends and no stage mutates the output of an earlier one. Each
//! stage gets a fresh diagnostic handler, so the per-stage counts fall out
//! directly. There is no global state: every call builds its own pipeline
//! and throws it away.
//!
//! The entry points wrap the pipeline in a top-level safety catch: an
//! unexpected internal panic is converted into a single fatal finding and
//! an empty report instead of propagating to the caller.

pub mod report;

use std::panic::{catch_unwind, AssertUnwindSafe};

use linterna_lex::{tokenize, Token, TokenKind};
use linterna_par::{ast::Program, Parser};
use linterna_sem::ScopeTree;
use linterna_util::{Diagnostic, Handler, Level};

/// Message of the fatal finding produced by the top-level safety catch.
const INTERNAL_ERROR: &str = "Internal analyzer error";

/// A reported error or warning with source coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub message: String,
    pub line: u32,
    pub column: u32,
    /// Kind of the AST node the finding originated from, if known.
    pub node: Option<&'static str>,
}

impl Finding {
    fn from_diagnostic(diagnostic: &Diagnostic) -> Self {
        Self {
            message: diagnostic.message.clone(),
            line: diagnostic.span.line,
            column: diagnostic.span.column,
            node: diagnostic.node,
        }
    }

    fn fatal() -> Self {
        Self {
            message: INTERNAL_ERROR.to_string(),
            line: 0,
            column: 0,
            node: None,
        }
    }
}

/// Result of the lexical/syntactic entry point.
pub struct LexicalAnalysis {
    pub lexical_report: String,
    pub syntactic_report: String,
    pub lexical_error_count: usize,
    pub syntax_error_count: usize,
    /// Number of tokens excluding the terminating EOF.
    pub token_count: usize,
    pub ast: Option<Program>,
}

/// Result of the semantic entry point.
pub struct SemanticAnalysis {
    pub report: String,
    pub error_count: usize,
    pub warning_count: usize,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

/// Everything the pipeline produces, for callers that want the artifacts
/// rather than the formatted reports.
pub struct SourceAnalysis {
    pub tokens: Vec<Token>,
    pub ast: Program,
    pub scopes: ScopeTree,
    pub lex_diagnostics: Vec<Diagnostic>,
    pub syntax_diagnostics: Vec<Diagnostic>,
    pub semantic_diagnostics: Vec<Diagnostic>,
}

fn run_pipeline(source: &str) -> SourceAnalysis {
    let (tokens, lex_handler) = tokenize(source);

    let parse_handler = Handler::new();
    let ast = Parser::new(tokens.clone(), &parse_handler).parse_program();

    let sem_handler = Handler::new();
    let scopes = linterna_sem::analyze(&ast, &sem_handler);

    SourceAnalysis {
        tokens,
        ast,
        scopes,
        lex_diagnostics: lex_handler.diagnostics(),
        syntax_diagnostics: parse_handler.diagnostics(),
        semantic_diagnostics: sem_handler.diagnostics(),
    }
}

/// Run the full pipeline and return its raw artifacts.
///
/// Returns `None` only if the pipeline panicked internally.
pub fn analyze_source(source: &str) -> Option<SourceAnalysis> {
    catch_unwind(AssertUnwindSafe(|| run_pipeline(source))).ok()
}

/// Lexical + syntactic analysis of a source string.
///
/// # Example
///
/// ```
/// let result = linterna_drv::lexical_analysis("const PI = 3.14;");
/// assert_eq!(result.token_count, 5);
/// assert_eq!(result.lexical_error_count, 0);
/// assert!(result.ast.is_some());
/// ```
pub fn lexical_analysis(source: &str) -> LexicalAnalysis {
    let run = catch_unwind(AssertUnwindSafe(|| {
        let (tokens, lex_handler) = tokenize(source);

        let parse_handler = Handler::new();
        let ast = Parser::new(tokens.clone(), &parse_handler).parse_program();

        let lex_diagnostics = lex_handler.diagnostics();
        let syntax_diagnostics = parse_handler.diagnostics();
        let token_count = tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Eof)
            .count();

        LexicalAnalysis {
            lexical_report: report::lexical_report(&tokens, &lex_diagnostics),
            syntactic_report: report::syntactic_report(&ast, &syntax_diagnostics),
            lexical_error_count: lex_diagnostics.len(),
            syntax_error_count: syntax_diagnostics.len(),
            token_count,
            ast: Some(ast),
        }
    }));

    run.unwrap_or_else(|_| LexicalAnalysis {
        lexical_report: String::new(),
        syntactic_report: String::new(),
        lexical_error_count: 1,
        syntax_error_count: 0,
        token_count: 0,
        ast: None,
    })
}

/// Semantic analysis of a source string.
///
/// Re-runs the real lexer and parser internally, then analyzes the
/// resulting AST.
///
/// # Example
///
/// ```
/// let result = linterna_drv::semantic_analysis("const K = 1; K = 2;");
/// assert_eq!(result.error_count, 1);
/// assert_eq!(result.errors[0].message, "Cannot assign to const variable 'K'");
/// ```
pub fn semantic_analysis(source: &str) -> SemanticAnalysis {
    let run = catch_unwind(AssertUnwindSafe(|| {
        let analysis = run_pipeline(source);

        let error_diags: Vec<Diagnostic> = analysis
            .semantic_diagnostics
            .iter()
            .filter(|d| d.level == Level::Error)
            .cloned()
            .collect();
        let warning_diags: Vec<Diagnostic> = analysis
            .semantic_diagnostics
            .iter()
            .filter(|d| d.level == Level::Warning)
            .cloned()
            .collect();

        SemanticAnalysis {
            report: report::semantic_report(&analysis.scopes, &error_diags, &warning_diags),
            error_count: error_diags.len(),
            warning_count: warning_diags.len(),
            errors: error_diags.iter().map(Finding::from_diagnostic).collect(),
            warnings: warning_diags.iter().map(Finding::from_diagnostic).collect(),
        }
    }));

    run.unwrap_or_else(|_| SemanticAnalysis {
        report: String::new(),
        error_count: 1,
        warning_count: 0,
        errors: vec![Finding::fatal()],
        warnings: Vec::new(),
    })
}
