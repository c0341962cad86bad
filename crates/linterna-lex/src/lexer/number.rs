//! Number literal lexing.

use crate::token::{Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a number literal.
    ///
    /// Handles decimal integers and floats (at most one `.`, optional
    /// `[eE][+-]?digits` suffix), hexadecimal `0x...` and binary `0b...`.
    /// The lexeme is the raw source slice.
    pub(crate) fn lex_number(&mut self) -> Token {
        if self.cursor.current_char() == '0' {
            match self.cursor.peek_char(1) {
                'x' => {
                    self.cursor.advance();
                    self.cursor.advance();
                    while self.cursor.current_char().is_ascii_hexdigit() {
                        self.cursor.advance();
                    }
                    return self.make_token(TokenKind::Number);
                }
                'b' => {
                    self.cursor.advance();
                    self.cursor.advance();
                    while matches!(self.cursor.current_char(), '0' | '1') {
                        self.cursor.advance();
                    }
                    return self.make_token(TokenKind::Number);
                }
                _ => {}
            }
        }

        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        if self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit() {
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        }

        if matches!(self.cursor.current_char(), 'e' | 'E') {
            let exponent_digit_at = if matches!(self.cursor.peek_char(1), '+' | '-') {
                2
            } else {
                1
            };
            // consume the suffix only when a digit actually follows
            if self.cursor.peek_char(exponent_digit_at).is_ascii_digit() {
                self.cursor.advance_n(exponent_digit_at);
                while self.cursor.current_char().is_ascii_digit() {
                    self.cursor.advance();
                }
            }
        }

        self.make_token(TokenKind::Number)
    }
}

#[cfg(test)]
mod tests {
    use crate::{tokenize, TokenKind};

    fn lex_num(source: &str) -> &'static str {
        let (tokens, handler) = tokenize(source);
        assert!(!handler.has_errors());
        assert_eq!(tokens[0].kind, TokenKind::Number);
        tokens[0].text()
    }

    #[test]
    fn test_decimal_integer() {
        assert_eq!(lex_num("42"), "42");
        assert_eq!(lex_num("0"), "0");
        assert_eq!(lex_num("123456"), "123456");
    }

    #[test]
    fn test_float() {
        assert_eq!(lex_num("3.14"), "3.14");
        assert_eq!(lex_num("0.5"), "0.5");
    }

    #[test]
    fn test_only_one_dot() {
        let (tokens, _) = tokenize("1.2.3");
        assert_eq!(tokens[0].text(), "1.2");
        assert_eq!(tokens[1].kind, TokenKind::Punctuator);
        assert_eq!(tokens[2].text(), "3");
    }

    #[test]
    fn test_trailing_dot_is_member_access() {
        let (tokens, _) = tokenize("1.foo");
        assert_eq!(tokens[0].text(), "1");
        assert_eq!(tokens[1].text(), ".");
        assert_eq!(tokens[2].text(), "foo");
    }

    #[test]
    fn test_scientific() {
        assert_eq!(lex_num("1e10"), "1e10");
        assert_eq!(lex_num("2.5e-3"), "2.5e-3");
        assert_eq!(lex_num("7E+2"), "7E+2");
    }

    #[test]
    fn test_exponent_without_digits_not_consumed() {
        let (tokens, _) = tokenize("1e");
        assert_eq!(tokens[0].text(), "1");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].text(), "e");
    }

    #[test]
    fn test_hex() {
        assert_eq!(lex_num("0x1F"), "0x1F");
        assert_eq!(lex_num("0xdeadBEEF"), "0xdeadBEEF");
    }

    #[test]
    fn test_binary() {
        assert_eq!(lex_num("0b1010"), "0b1010");
        assert_eq!(lex_num("0b0"), "0b0");
    }

    #[test]
    fn test_hex_stops_at_non_digit() {
        let (tokens, _) = tokenize("0x1FG");
        assert_eq!(tokens[0].text(), "0x1F");
        assert_eq!(tokens[1].text(), "G");
    }
}
