//! String literal lexing.

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a string literal opened by `"` or `'`.
    ///
    /// The emitted lexeme keeps the surrounding quotes around the decoded
    /// body. Recognized escapes are `\n`, `\t`, `\r`, `\\` and the escaped
    /// quote; any other escape passes the escaped character through
    /// literally. A string may span newlines; only the matching quote or
    /// end of input terminates it.
    ///
    /// Reaching end of input first records "Unterminated string literal"
    /// and emits no token: the stream proceeds straight to EOF.
    pub(crate) fn lex_string(&mut self) -> Token {
        let quote = self.cursor.current_char();
        self.cursor.advance();

        let mut body = String::new();

        loop {
            if self.cursor.is_at_end() {
                self.report_error("Unterminated string literal".to_string());
                return self.next_token();
            }

            let c = self.cursor.current_char();

            if c == quote {
                self.cursor.advance();
                break;
            }

            if c == '\\' {
                self.cursor.advance();
                if self.cursor.is_at_end() {
                    self.report_error("Unterminated string literal".to_string());
                    return self.next_token();
                }
                let escaped = self.cursor.current_char();
                self.cursor.advance();
                body.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    other => other,
                });
            } else {
                body.push(c);
                self.cursor.advance();
            }
        }

        let lexeme = format!("{quote}{body}{quote}");
        self.make_token_with(TokenKind::String, &lexeme)
    }
}
