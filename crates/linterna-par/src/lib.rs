//! linterna-par - Parser (Syntactic Analyzer)
//!
//! ============================================================================
//! PARSING
//! ============================================================================
//!
//! The parser turns the token stream into an Abstract Syntax Tree. It is a
//! recursive-descent parser: each statement form has its own function, and
//! expressions use top-down operator precedence (Pratt parsing) with two
//! binding powers per operator.
//!
//! PRECEDENCE LADDER (lowest to highest):
//!
//! ```text
//! assignment (= += -= *= /= %=)      right-associative
//! conditional (?:)
//! logical (|| then &&)
//! equality (== === != !==)
//! relational (< > <= >= in instanceof)
//! additive (+ -)
//! multiplicative (* / % **)
//! prefix unary (! - + ++ -- typeof void delete)
//! postfix update (++ --)
//! call / member (f(...) x.y x[y])
//! primary
//! ```
//!
//! All listed binary operators are left-associative, which the binding
//! powers encode as `right_bp = left_bp + 1`.
//!
//! ERROR RECOVERY (panic mode):
//!
//! A production that cannot continue records a diagnostic and unwinds with
//! `None` to the nearest statement loop, which calls `synchronize()`:
//! advance one token, then consume tokens until either a `;` is seen and
//! skipped, the next token starts a statement (`function`, `var`, `let`,
//! `const`, `if`, `while`, `for`, `return`), or the input ends. The
//! unconditional first advance guarantees forward progress on every entry,
//! so parsing always terminates; the statement-boundary stop preserves as
//! much downstream structure as possible.
//!
//! A missing statement terminator is the one tolerated error: it is
//! recorded but the finished statement node is kept and no tokens are
//! skipped, so the following sibling statements survive intact.

pub mod ast;

mod edge_cases;
mod expr;
mod stmt;

use linterna_lex::{Token, TokenKind};
use linterna_util::{DiagnosticBuilder, Handler};

use ast::Program;

/// Recursive-descent parser over a token buffer.
///
/// Comment tokens are filtered out at construction; the parser walks the
/// remaining tokens with a single forward cursor and records syntax errors
/// on the shared handler.
pub struct Parser<'a> {
    /// Token buffer, comments removed, terminated by EOF.
    tokens: Vec<Token>,

    /// Cursor into `tokens`.
    pos: usize,

    /// Handler collecting syntax errors.
    handler: &'a Handler,
}

impl<'a> Parser<'a> {
    /// Creates a parser over a token stream.
    ///
    /// The stream should end with an EOF token (as produced by
    /// `linterna_lex::tokenize`); one is appended if missing so the cursor
    /// always has a token to look at.
    pub fn new(tokens: Vec<Token>, handler: &'a Handler) -> Self {
        let mut tokens: Vec<Token> = tokens
            .into_iter()
            .filter(|t| t.kind != TokenKind::Comment)
            .collect();
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            tokens.push(Token::new(TokenKind::Eof, "", 1, 1, 0, 0));
        }
        Self {
            tokens,
            pos: 0,
            handler,
        }
    }

    /// Parses the whole stream into a `Program`.
    ///
    /// Never fails: on a statement error the parser synchronizes and
    /// resumes, so a best-effort tree is always produced.
    pub fn parse_program(&mut self) -> Program {
        let mut body = Vec::new();
        while !self.at_end() {
            match self.parse_stmt() {
                Some(stmt) => body.push(stmt),
                None => self.synchronize(),
            }
        }
        Program {
            body,
            line: 1,
            column: 1,
        }
    }

    // ------------------------------------------------------------------
    // Cursor helpers
    // ------------------------------------------------------------------

    /// The token under the cursor; EOF once the stream is exhausted.
    fn current(&self) -> &Token {
        self.tokens
            .get(self.pos)
            .unwrap_or_else(|| &self.tokens[self.tokens.len() - 1])
    }

    fn at_end(&self) -> bool {
        self.current().kind == TokenKind::Eof
    }

    /// Consumes and returns the current token; EOF is never consumed.
    fn advance(&mut self) -> Token {
        let token = *self.current();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind, text: &str) -> bool {
        self.current().is(kind, text)
    }

    fn check_punct(&self, text: &str) -> bool {
        self.check(TokenKind::Punctuator, text)
    }

    fn check_keyword(&self, text: &str) -> bool {
        self.check(TokenKind::Keyword, text)
    }

    fn match_token(&mut self, kind: TokenKind, text: &str) -> bool {
        if self.check(kind, text) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, text: &str) -> bool {
        self.match_token(TokenKind::Punctuator, text)
    }

    fn match_op(&mut self, text: &str) -> bool {
        self.match_token(TokenKind::Operator, text)
    }

    fn match_keyword(&mut self, text: &str) -> bool {
        self.match_token(TokenKind::Keyword, text)
    }

    // ------------------------------------------------------------------
    // Errors and recovery
    // ------------------------------------------------------------------

    /// Records a syntax error at the given token.
    fn add_error(&self, message: String, token: &Token) {
        DiagnosticBuilder::error(message)
            .span(token.span())
            .emit(self.handler);
    }

    /// Human-readable form of a token for error messages.
    fn describe(token: &Token) -> String {
        if token.kind == TokenKind::Eof {
            "end of input".to_string()
        } else {
            format!("'{}'", token.text())
        }
    }

    /// Consumes the expected token or records an error and unwinds.
    fn expect(&mut self, kind: TokenKind, text: &str) -> Option<Token> {
        if self.check(kind, text) {
            return Some(self.advance());
        }
        let current = *self.current();
        self.add_error(
            format!("Expected '{}', found {}", text, Self::describe(&current)),
            &current,
        );
        None
    }

    fn expect_punct(&mut self, text: &str) -> Option<Token> {
        self.expect(TokenKind::Punctuator, text)
    }

    fn expect_op(&mut self, text: &str) -> Option<Token> {
        self.expect(TokenKind::Operator, text)
    }

    /// Consumes a statement terminator.
    ///
    /// A missing `;` is recorded as a syntax error but tolerated: the
    /// statement node is kept and no tokens are skipped.
    fn expect_semicolon(&mut self) {
        if self.match_punct(";") {
            return;
        }
        let current = *self.current();
        self.add_error(
            format!("Expected ';', found {}", Self::describe(&current)),
            &current,
        );
    }

    /// Panic-mode recovery: skip to the next statement boundary.
    ///
    /// Advances one token unconditionally, then consumes tokens until a
    /// `;` is seen and skipped, the next token is a statement-starting
    /// keyword, or the input ends.
    fn synchronize(&mut self) {
        self.advance();
        while !self.at_end() {
            if self.check_punct(";") {
                self.advance();
                return;
            }
            if self.at_stmt_start() {
                return;
            }
            self.advance();
        }
    }

    /// True if the current token can begin a statement after recovery.
    fn at_stmt_start(&self) -> bool {
        self.current().kind == TokenKind::Keyword
            && matches!(
                self.current().text(),
                "function" | "var" | "let" | "const" | "if" | "while" | "for" | "return"
            )
    }
}

/// Parse a source string end to end.
///
/// Convenience wrapper: lexes, filters comments, parses. Lexical errors go
/// to the returned lex handler, syntax errors to the parse handler.
///
/// # Example
///
/// ```
/// use linterna_par::parse;
///
/// let (program, lex_handler, parse_handler) = parse("let x = 1;");
/// assert_eq!(program.body.len(), 1);
/// assert!(!lex_handler.has_errors());
/// assert!(!parse_handler.has_errors());
/// ```
pub fn parse(source: &str) -> (Program, Handler, Handler) {
    let (tokens, lex_handler) = linterna_lex::tokenize(source);
    let parse_handler = Handler::new();
    let program = Parser::new(tokens, &parse_handler).parse_program();
    (program, lex_handler, parse_handler)
}
