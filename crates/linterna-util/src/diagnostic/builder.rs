//! Fluent builder for diagnostics.
//!
//! The builder is the one way stages construct diagnostics: severity and
//! message up front, then span and originating node kind, then `emit`.

use super::{Diagnostic, Handler, Level};
use crate::Span;

/// Fluent builder for [`Diagnostic`]
///
/// # Examples
///
/// ```
/// use linterna_util::{DiagnosticBuilder, Handler, Span};
///
/// let handler = Handler::new();
/// DiagnosticBuilder::warning("Variable 'x' is declared but never used")
///     .span(Span::point(3, 5))
///     .node("VariableDeclarator")
///     .emit(&handler);
/// ```
#[derive(Debug)]
pub struct DiagnosticBuilder {
    level: Level,
    message: String,
    span: Span,
    node: Option<&'static str>,
}

impl DiagnosticBuilder {
    /// Start building an error
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            span: Span::DUMMY,
            node: None,
        }
    }

    /// Start building a warning
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
            span: Span::DUMMY,
            node: None,
        }
    }

    /// Set the source location
    pub fn span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Set the originating AST-node kind
    pub fn node(mut self, node: &'static str) -> Self {
        self.node = Some(node);
        self
    }

    /// Finish building without emitting
    pub fn build(self) -> Diagnostic {
        Diagnostic {
            level: self.level,
            message: self.message,
            span: self.span,
            node: self.node,
        }
    }

    /// Finish building and record on the handler
    pub fn emit(self, handler: &Handler) {
        handler.emit(self.build());
    }
}
