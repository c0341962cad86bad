//! Token definitions.
//!
//! A [`Token`] is an atom of source: a kind tag, the exact (or, for
//! strings, canonicalized) lexeme, and its position. Tokens are immutable
//! after emission.

use std::fmt;

use linterna_util::{Span, Symbol};

/// Category of a lexed token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Reserved word from the keyword set
    Keyword,
    /// `[A-Za-z_$][A-Za-z0-9_$]*`, not a keyword
    Identifier,
    /// Numeric literal (decimal, float, hex, binary)
    Number,
    /// String literal; lexeme keeps the quotes around the decoded body
    String,
    /// Template literal; lexeme is the raw text including backticks
    Template,
    /// Operator from the operator set
    Operator,
    /// Punctuator (braces, brackets, parens, `;`, `,`, `.`, `...`, `?.`)
    Punctuator,
    /// Line or block comment; emitted but filtered before parsing
    Comment,
    /// End-of-input marker, exactly one per stream
    Eof,
    /// Unrecognized character, emitted for error recovery
    Invalid,
}

impl TokenKind {
    /// Lowercase tag used in the token table of the lexical report.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Template => "template",
            TokenKind::Operator => "operator",
            TokenKind::Punctuator => "punctuator",
            TokenKind::Comment => "comment",
            TokenKind::Eof => "eof",
            TokenKind::Invalid => "invalid",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An atom of source with positional information.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Token {
    /// Token category
    pub kind: TokenKind,
    /// The lexeme, interned
    pub lexeme: Symbol,
    /// Line of the lexeme start (1-based)
    pub line: u32,
    /// Column of the lexeme start (1-based)
    pub column: u32,
    /// Start byte offset
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Token {
    /// Create a token, interning the lexeme.
    pub fn new(
        kind: TokenKind,
        lexeme: &str,
        line: u32,
        column: u32,
        start: usize,
        end: usize,
    ) -> Self {
        Self {
            kind,
            lexeme: Symbol::intern(lexeme),
            line,
            column,
            start,
            end,
        }
    }

    /// The lexeme text.
    pub fn text(&self) -> &'static str {
        self.lexeme.as_str()
    }

    /// True if this token has the given kind and lexeme.
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text() == text
    }

    /// The source span covered by this token.
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end, self.line, self.column)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// True for characters that may start an identifier.
#[inline]
pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

/// True for characters that may continue an identifier.
#[inline]
pub fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// True if the spelling is a reserved word.
///
/// The set includes the usual control-flow, declaration and literal words
/// plus the reserved-but-unused words of the dialect.
pub fn is_keyword(text: &str) -> bool {
    matches!(
        text,
        "abstract"
            | "await"
            | "boolean"
            | "break"
            | "byte"
            | "case"
            | "catch"
            | "char"
            | "class"
            | "const"
            | "continue"
            | "debugger"
            | "default"
            | "delete"
            | "do"
            | "double"
            | "else"
            | "enum"
            | "export"
            | "extends"
            | "false"
            | "final"
            | "finally"
            | "float"
            | "for"
            | "function"
            | "goto"
            | "if"
            | "implements"
            | "import"
            | "in"
            | "instanceof"
            | "int"
            | "interface"
            | "let"
            | "long"
            | "native"
            | "new"
            | "null"
            | "package"
            | "private"
            | "protected"
            | "public"
            | "return"
            | "short"
            | "static"
            | "super"
            | "switch"
            | "synchronized"
            | "this"
            | "throw"
            | "throws"
            | "transient"
            | "true"
            | "try"
            | "typeof"
            | "var"
            | "void"
            | "volatile"
            | "while"
            | "with"
            | "yield"
            | "async"
            | "of"
    )
}

/// Classify an operator or punctuator spelling.
///
/// Returns `None` for spellings in neither set. The lexer calls this with
/// candidate lengths three, two, one, which implements longest match.
pub fn operator_kind(text: &str) -> Option<TokenKind> {
    if matches!(
        text,
        "+" | "-"
            | "*"
            | "/"
            | "%"
            | "++"
            | "--"
            | "="
            | "+="
            | "-="
            | "*="
            | "/="
            | "%="
            | "=="
            | "==="
            | "!="
            | "!=="
            | ">"
            | "<"
            | ">="
            | "<="
            | "&&"
            | "||"
            | "!"
            | "&"
            | "|"
            | "^"
            | "~"
            | "<<"
            | ">>"
            | ">>>"
            | "?"
            | ":"
            | "=>"
            | "**"
            | "**="
    ) {
        return Some(TokenKind::Operator);
    }
    if matches!(
        text,
        "{" | "}" | "[" | "]" | "(" | ")" | ";" | "," | "." | "..." | "?."
    ) {
        return Some(TokenKind::Punctuator);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords() {
        assert!(is_keyword("function"));
        assert!(is_keyword("let"));
        assert!(is_keyword("const"));
        assert!(is_keyword("instanceof"));
        assert!(is_keyword("of"));
        assert!(is_keyword("async"));
        assert!(!is_keyword("Function"));
        assert!(!is_keyword("foo"));
    }

    #[test]
    fn test_ident_chars() {
        assert!(is_ident_start('a'));
        assert!(is_ident_start('_'));
        assert!(is_ident_start('$'));
        assert!(!is_ident_start('1'));
        assert!(is_ident_continue('1'));
        assert!(!is_ident_continue('-'));
    }

    #[test]
    fn test_operator_kind() {
        assert_eq!(operator_kind("==="), Some(TokenKind::Operator));
        assert_eq!(operator_kind(">>>"), Some(TokenKind::Operator));
        assert_eq!(operator_kind("**="), Some(TokenKind::Operator));
        assert_eq!(operator_kind("..."), Some(TokenKind::Punctuator));
        assert_eq!(operator_kind("?."), Some(TokenKind::Punctuator));
        assert_eq!(operator_kind(";"), Some(TokenKind::Punctuator));
        assert_eq!(operator_kind("@"), None);
        assert_eq!(operator_kind("=>"), Some(TokenKind::Operator));
    }

    #[test]
    fn test_token_accessors() {
        let token = Token::new(TokenKind::Identifier, "foo", 1, 5, 4, 7);
        assert_eq!(token.text(), "foo");
        assert!(token.is(TokenKind::Identifier, "foo"));
        assert!(!token.is(TokenKind::Keyword, "foo"));
        assert_eq!(token.span().start, 4);
        assert_eq!(token.span().column, 5);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TokenKind::Keyword.to_string(), "keyword");
        assert_eq!(TokenKind::Eof.to_string(), "eof");
    }
}
