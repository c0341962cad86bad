//! Core lexer implementation.
//!
//! This module contains the main Lexer struct and its dispatch loop.

use linterna_util::{DiagnosticBuilder, Handler, Span};

use crate::cursor::Cursor;
use crate::token::{is_ident_start, Token, TokenKind};

/// Hand-written lexer for the analyzed dialect.
///
/// The lexer transforms source text into a stream of positioned tokens.
/// Whitespace is consumed silently; comments are emitted as tokens so the
/// caller can decide whether to keep them.
pub struct Lexer<'a> {
    /// Character cursor for source traversal.
    pub(crate) cursor: Cursor<'a>,

    /// Handler collecting lexical errors.
    handler: &'a Handler,

    /// Starting byte offset of the current token.
    pub(crate) token_start: usize,

    /// Line where the current token starts (1-based).
    token_start_line: u32,

    /// Column where the current token starts (1-based).
    token_start_column: u32,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer over the given source.
    pub fn new(source: &'a str, handler: &'a Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Returns the next token from the source.
    ///
    /// Skips whitespace, records the token start position, then dispatches
    /// on the current character. At end of input this returns the EOF
    /// token; calling it again keeps returning EOF.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return self.make_token_with(TokenKind::Eof, "");
        }

        match self.cursor.current_char() {
            '/' => self.lex_slash(),
            '"' | '\'' => self.lex_string(),
            '`' => self.lex_template(),
            c if is_ident_start(c) => self.lex_identifier(),
            c if c.is_ascii_digit() => self.lex_number(),
            _ => self.lex_operator(),
        }
    }

    /// Skips whitespace characters. Comments are not skipped here; they
    /// become tokens.
    fn skip_whitespace(&mut self) {
        while !self.cursor.is_at_end() && self.cursor.current_char().is_whitespace() {
            self.cursor.advance();
        }
    }

    /// Slash starts a line comment, a block comment, or an operator.
    fn lex_slash(&mut self) -> Token {
        match self.cursor.peek_char(1) {
            '/' => self.lex_line_comment(),
            '*' => self.lex_block_comment(),
            _ => self.lex_operator(),
        }
    }

    /// Builds a token whose lexeme is the consumed source slice.
    pub(crate) fn make_token(&self, kind: TokenKind) -> Token {
        let lexeme = self.cursor.slice_from(self.token_start);
        Token::new(
            kind,
            lexeme,
            self.token_start_line,
            self.token_start_column,
            self.token_start,
            self.cursor.position(),
        )
    }

    /// Builds a token with an explicit (canonicalized) lexeme.
    pub(crate) fn make_token_with(&self, kind: TokenKind, lexeme: &str) -> Token {
        Token::new(
            kind,
            lexeme,
            self.token_start_line,
            self.token_start_column,
            self.token_start,
            self.cursor.position(),
        )
    }

    /// Reports a lexical error spanning the current token.
    pub(crate) fn report_error(&self, message: String) {
        let span = Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        );
        DiagnosticBuilder::error(message).span(span).emit(self.handler);
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize;

    #[test]
    fn test_empty_source() {
        let (tokens, handler) = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_whitespace_only() {
        let (tokens, handler) = tokenize("  \t\n  \r\n ");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert!(!handler.has_errors());
    }

    #[test]
    fn test_simple_statement() {
        let (tokens, handler) = tokenize("let x = 42;");
        assert!(!handler.has_errors());
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword,
                TokenKind::Identifier,
                TokenKind::Operator,
                TokenKind::Number,
                TokenKind::Punctuator,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_positions() {
        let (tokens, _) = tokenize("let x\n  = 1;");
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1)); // let
        assert_eq!((tokens[1].line, tokens[1].column), (1, 5)); // x
        assert_eq!((tokens[2].line, tokens[2].column), (2, 3)); // =
        assert_eq!((tokens[3].line, tokens[3].column), (2, 5)); // 1
    }

    #[test]
    fn test_byte_offsets() {
        let (tokens, _) = tokenize("ab cd");
        assert_eq!((tokens[0].start, tokens[0].end), (0, 2));
        assert_eq!((tokens[1].start, tokens[1].end), (3, 5));
    }

    #[test]
    fn test_unexpected_character() {
        let (tokens, handler) = tokenize("let @ x");
        assert_eq!(handler.error_count(), 1);
        assert_eq!(handler.diagnostics()[0].message, "Unexpected character: '@'");
        assert_eq!(tokens[1].kind, TokenKind::Invalid);
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_unexpected_unicode_character() {
        let (tokens, handler) = tokenize("é");
        assert_eq!(handler.error_count(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Invalid);
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn test_iterator_stops_at_eof() {
        let handler = Handler::new();
        let lexer = Lexer::new("a b c", &handler);
        assert_eq!(lexer.count(), 3);
    }
}
