//! Comment lexing.
//!
//! Comments are emitted as tokens rather than skipped; the parser filters
//! them out, but the lexical report lists them.

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a line comment from `//` to end of line.
    ///
    /// The terminating newline is not part of the lexeme.
    pub(crate) fn lex_line_comment(&mut self) -> Token {
        self.cursor.advance();
        self.cursor.advance();

        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }

        self.make_token(TokenKind::Comment)
    }

    /// Lexes a block comment `/* ... */`.
    ///
    /// Reaching end of input before `*/` records "Unterminated block
    /// comment" but the partial token is still emitted.
    pub(crate) fn lex_block_comment(&mut self) -> Token {
        self.cursor.advance();
        self.cursor.advance();

        loop {
            if self.cursor.is_at_end() {
                self.report_error("Unterminated block comment".to_string());
                break;
            }
            if self.cursor.current_char() == '*' && self.cursor.peek_char(1) == '/' {
                self.cursor.advance();
                self.cursor.advance();
                break;
            }
            self.cursor.advance();
        }

        self.make_token(TokenKind::Comment)
    }
}
