//! Identifier and keyword lexing.

use crate::token::{is_ident_continue, is_keyword, Token, TokenKind};
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes an identifier or keyword.
    ///
    /// Identifiers start with a letter, underscore or `$`, followed by
    /// alphanumerics, underscores or `$`. After reading, the spelling is
    /// checked against the keyword set and the token re-tagged if it
    /// matches.
    pub(crate) fn lex_identifier(&mut self) -> Token {
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);
        let kind = if is_keyword(text) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };

        self.make_token(kind)
    }
}
