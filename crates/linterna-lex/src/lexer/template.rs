//! Template literal lexing.

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a template literal opened and closed by a backtick.
    ///
    /// `${ ... }` interpolations are scanned with balanced-brace counting
    /// but not re-lexed; their contents stay verbatim inside the template
    /// lexeme, which is the raw source slice including both backticks.
    /// A backslash keeps the following character verbatim, so an escaped
    /// backtick does not terminate the literal.
    ///
    /// Reaching end of input first records "Unterminated template literal"
    /// and emits no token.
    pub(crate) fn lex_template(&mut self) -> Token {
        self.cursor.advance();

        loop {
            if self.cursor.is_at_end() {
                self.report_error("Unterminated template literal".to_string());
                return self.next_token();
            }

            let c = self.cursor.current_char();

            if c == '`' {
                self.cursor.advance();
                break;
            }

            if c == '\\' {
                self.cursor.advance();
                if !self.cursor.is_at_end() {
                    self.cursor.advance();
                }
                continue;
            }

            if c == '$' && self.cursor.peek_char(1) == '{' {
                self.cursor.advance();
                self.cursor.advance();
                let mut depth = 1u32;
                while depth > 0 {
                    if self.cursor.is_at_end() {
                        self.report_error("Unterminated template literal".to_string());
                        return self.next_token();
                    }
                    match self.cursor.current_char() {
                        '{' => depth += 1,
                        '}' => depth -= 1,
                        _ => {}
                    }
                    self.cursor.advance();
                }
                continue;
            }

            self.cursor.advance();
        }

        self.make_token(TokenKind::Template)
    }
}
