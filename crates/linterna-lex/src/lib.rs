//! linterna-lex - Lexical Analyzer
//!
//! ============================================================================
//! LEXICAL ANALYSIS
//! ============================================================================
//!
//! Lexical analysis is the first phase of the pipeline. It transforms a
//! stream of characters into a stream of positioned tokens:
//!
//! ```text
//! Source: "let x = 42;"
//!
//! Tokens: [keyword "let"] [identifier "x"] [operator "="]
//!         [number "42"] [punctuator ";"] [eof]
//! ```
//!
//! The lexer is direct-coded: each token category has its own lexing
//! method, and a single dispatch loop picks one based on the first
//! character. This keeps the scanner linear time, single pass, and easy to
//! extend with good error messages.
//!
//! Categories recognized (see [`token::TokenKind`]):
//!
//! 1. KEYWORDS - reserved words; an identifier whose spelling is in the
//!    keyword set is re-tagged after scanning.
//! 2. IDENTIFIERS - `[A-Za-z_$][A-Za-z0-9_$]*`.
//! 3. NUMBERS - decimal integers and floats (one `.`, optional `[eE]`
//!    exponent), hex `0x...`, binary `0b...`.
//! 4. STRINGS - `'...'` or `"..."`; the emitted lexeme keeps the quotes
//!    around the decoded body.
//! 5. TEMPLATES - `` `...` `` with `${...}` interpolations kept verbatim
//!    (balanced-brace scan, no re-lexing).
//! 6. COMMENTS - `// ...` and `/* ... */`; emitted as tokens so the IDE can
//!    show them, filtered out before parsing.
//! 7. OPERATORS / PUNCTUATORS - longest match, trying three characters,
//!    then two, then one.
//!
//! Error recovery is panic-free and local: an unrecognized character is
//! reported, an `invalid` token is emitted, and the cursor advances one
//! codepoint so progress is guaranteed on every path. Unterminated strings
//! and templates report an error and produce no token; an unterminated
//! block comment reports an error but still emits the partial comment.
//!
//! The stream always ends with exactly one `eof` token.

pub mod cursor;
pub mod token;

mod edge_cases;
mod lexer;

pub use lexer::Lexer;
pub use token::{Token, TokenKind};

use linterna_util::Handler;

/// Tokenize an entire source string.
///
/// Convenience wrapper that drives [`Lexer`] to completion. The returned
/// vector always ends with exactly one EOF token; lexical errors are
/// recorded on the returned handler.
///
/// # Example
///
/// ```
/// use linterna_lex::{tokenize, TokenKind};
///
/// let (tokens, handler) = tokenize("let x = 1;");
/// assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
/// assert!(!handler.has_errors());
/// ```
pub fn tokenize(source: &str) -> (Vec<Token>, Handler) {
    let handler = Handler::new();
    let mut tokens = Vec::new();
    {
        let mut lexer = Lexer::new(source, &handler);
        loop {
            let token = lexer.next_token();
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                break;
            }
        }
    }
    (tokens, handler)
}
