//! Operator and punctuator lexing.

use crate::token::{operator_kind, Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an operator or punctuator by longest match.
    ///
    /// Greedily attempts a 3-character match, then 2, then 1 against the
    /// operator and punctuator sets. On no match the character is
    /// reported, an `invalid` token is emitted, and the cursor advances
    /// one codepoint so progress is guaranteed.
    pub(crate) fn lex_operator(&mut self) -> Token {
        for len in (1..=3).rev() {
            let mut candidate = String::new();
            for i in 0..len {
                let c = self.cursor.peek_char(i);
                if c == '\0' || !c.is_ascii() {
                    break;
                }
                candidate.push(c);
            }
            if candidate.len() != len {
                continue;
            }
            if let Some(kind) = operator_kind(&candidate) {
                self.cursor.advance_n(len);
                return self.make_token(kind);
            }
        }

        let c = self.cursor.current_char();
        self.report_error(format!("Unexpected character: '{c}'"));
        self.cursor.advance();
        self.make_token(TokenKind::Invalid)
    }
}
