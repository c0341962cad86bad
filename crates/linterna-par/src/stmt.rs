//! Statement parsing - declarations, control flow, blocks.

use crate::ast::*;
use crate::Parser;
use linterna_lex::TokenKind;

impl<'a> Parser<'a> {
    /// Parse a statement.
    pub(crate) fn parse_stmt(&mut self) -> Option<Stmt> {
        let token = *self.current();

        if token.kind == TokenKind::Keyword {
            match token.text() {
                "function" => return self.parse_fn_decl().map(Stmt::FnDecl),
                "var" | "let" | "const" => {
                    let decl = self.parse_var_decl()?;
                    self.expect_semicolon();
                    return Some(Stmt::VarDecl(decl));
                }
                "if" => return self.parse_if_stmt(),
                "while" => return self.parse_while_stmt(),
                "for" => return self.parse_for_stmt(),
                "return" => return self.parse_return_stmt(),
                _ => {}
            }
        }

        if self.check_punct("{") {
            return self.parse_block().map(Stmt::Block);
        }

        let expression = self.parse_expression()?;
        let (line, column) = expression.position();
        self.expect_semicolon();
        Some(Stmt::Expr(ExprStmt {
            expression,
            line,
            column,
        }))
    }

    /// Parse a `var`/`let`/`const` declaration without its terminator.
    ///
    /// The terminator stays with the caller so the `for` header can reuse
    /// this production.
    pub(crate) fn parse_var_decl(&mut self) -> Option<VarDecl> {
        let keyword = self.advance();
        let kind = DeclKind::from_str(keyword.text())?;

        let mut declarators = Vec::new();
        loop {
            let id = self.parse_ident()?;
            let init = if self.match_op("=") {
                Some(self.parse_assignment()?)
            } else {
                None
            };
            declarators.push(Declarator {
                line: id.line,
                column: id.column,
                id,
                init,
            });
            if !self.match_punct(",") {
                break;
            }
        }

        Some(VarDecl {
            kind,
            declarators,
            line: keyword.line,
            column: keyword.column,
        })
    }

    /// Parse a function declaration.
    pub(crate) fn parse_fn_decl(&mut self) -> Option<FnDecl> {
        let keyword = self.advance();
        let id = self.parse_ident()?;

        self.expect_punct("(")?;
        let mut params = Vec::new();
        if !self.check_punct(")") {
            loop {
                params.push(self.parse_ident()?);
                if !self.match_punct(",") {
                    break;
                }
            }
        }
        self.expect_punct(")")?;

        let body = self.parse_block()?;

        Some(FnDecl {
            id,
            params,
            body,
            line: keyword.line,
            column: keyword.column,
        })
    }

    /// Parse a braced block.
    ///
    /// A failed statement inside the block synchronizes locally, so one
    /// bad statement does not lose its siblings.
    pub(crate) fn parse_block(&mut self) -> Option<Block> {
        let open = self.expect_punct("{")?;

        let mut body = Vec::new();
        while !self.at_end() && !self.check_punct("}") {
            match self.parse_stmt() {
                Some(stmt) => body.push(stmt),
                None => self.synchronize(),
            }
        }

        self.expect_punct("}")?;

        Some(Block {
            body,
            line: open.line,
            column: open.column,
        })
    }

    /// Parse `if (test) consequent [else alternate]`.
    fn parse_if_stmt(&mut self) -> Option<Stmt> {
        let keyword = self.advance();

        self.expect_punct("(")?;
        let test = self.parse_expression()?;
        self.expect_punct(")")?;

        let consequent = Box::new(self.parse_stmt()?);
        let alternate = if self.match_keyword("else") {
            Some(Box::new(self.parse_stmt()?))
        } else {
            None
        };

        Some(Stmt::If(IfStmt {
            test,
            consequent,
            alternate,
            line: keyword.line,
            column: keyword.column,
        }))
    }

    /// Parse `while (test) body`.
    fn parse_while_stmt(&mut self) -> Option<Stmt> {
        let keyword = self.advance();

        self.expect_punct("(")?;
        let test = self.parse_expression()?;
        self.expect_punct(")")?;

        let body = Box::new(self.parse_stmt()?);

        Some(Stmt::While(WhileStmt {
            test,
            body,
            line: keyword.line,
            column: keyword.column,
        }))
    }

    /// Parse the three-part `for` header and body.
    ///
    /// The init slot accepts a declaration or an expression; every slot
    /// may be empty.
    fn parse_for_stmt(&mut self) -> Option<Stmt> {
        let keyword = self.advance();

        self.expect_punct("(")?;

        let init = if self.match_punct(";") {
            None
        } else if self.check_keyword("var") || self.check_keyword("let") || self.check_keyword("const")
        {
            let decl = self.parse_var_decl()?;
            self.expect_semicolon();
            Some(ForInit::Decl(decl))
        } else {
            let expr = self.parse_expression()?;
            self.expect_semicolon();
            Some(ForInit::Expr(expr))
        };

        let test = if self.check_punct(";") {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_semicolon();

        let update = if self.check_punct(")") {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_punct(")")?;

        let body = Box::new(self.parse_stmt()?);

        Some(Stmt::For(ForStmt {
            init,
            test,
            update,
            body,
            line: keyword.line,
            column: keyword.column,
        }))
    }

    /// Parse `return [argument];`.
    fn parse_return_stmt(&mut self) -> Option<Stmt> {
        let keyword = self.advance();

        let argument = if self.check_punct(";") || self.check_punct("}") || self.at_end() {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_semicolon();

        Some(Stmt::Return(ReturnStmt {
            argument,
            line: keyword.line,
            column: keyword.column,
        }))
    }

    /// Parse an identifier token into an `Ident` node.
    pub(crate) fn parse_ident(&mut self) -> Option<Ident> {
        let token = *self.current();
        if token.kind == TokenKind::Identifier {
            self.advance();
            return Some(Ident {
                name: token.lexeme,
                line: token.line,
                column: token.column,
            });
        }
        self.add_error(
            format!("Expected identifier, found {}", Self::describe(&token)),
            &token,
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::parse;

    fn parse_ok(source: &str) -> Program {
        let (program, lex, par) = parse(source);
        assert!(!lex.has_errors(), "lex errors for {source:?}");
        assert!(!par.has_errors(), "syntax errors for {source:?}");
        program
    }

    #[test]
    fn test_empty_program() {
        let program = parse_ok("");
        assert!(program.body.is_empty());
    }

    #[test]
    fn test_var_declaration() {
        let program = parse_ok("let x = 1;");
        assert_eq!(program.body.len(), 1);
        let Stmt::VarDecl(decl) = &program.body[0] else {
            panic!("expected VariableDeclaration");
        };
        assert_eq!(decl.kind, DeclKind::Let);
        assert_eq!(decl.declarators.len(), 1);
        assert_eq!(decl.declarators[0].id.name.as_str(), "x");
        assert!(decl.declarators[0].init.is_some());
    }

    #[test]
    fn test_multiple_declarators() {
        let program = parse_ok("var a = 1, b, c = 3;");
        let Stmt::VarDecl(decl) = &program.body[0] else {
            panic!();
        };
        assert_eq!(decl.kind, DeclKind::Var);
        assert_eq!(decl.declarators.len(), 3);
        assert!(decl.declarators[1].init.is_none());
    }

    #[test]
    fn test_const_without_initializer_parses() {
        // Missing initializer is a semantic error, not a syntax error.
        let program = parse_ok("const k;");
        let Stmt::VarDecl(decl) = &program.body[0] else {
            panic!();
        };
        assert_eq!(decl.kind, DeclKind::Const);
        assert!(decl.declarators[0].init.is_none());
    }

    #[test]
    fn test_function_declaration() {
        let program = parse_ok("function add(a, b) { return a + b; }");
        let Stmt::FnDecl(decl) = &program.body[0] else {
            panic!("expected FunctionDeclaration");
        };
        assert_eq!(decl.id.name.as_str(), "add");
        assert_eq!(decl.params.len(), 2);
        assert_eq!(decl.body.body.len(), 1);
        assert!(matches!(decl.body.body[0], Stmt::Return(_)));
    }

    #[test]
    fn test_function_without_params() {
        let program = parse_ok("function main() {}");
        let Stmt::FnDecl(decl) = &program.body[0] else {
            panic!();
        };
        assert!(decl.params.is_empty());
        assert!(decl.body.body.is_empty());
    }

    #[test]
    fn test_if_else() {
        let program = parse_ok("if (a) { b; } else { c; }");
        let Stmt::If(stmt) = &program.body[0] else {
            panic!();
        };
        assert!(matches!(*stmt.consequent, Stmt::Block(_)));
        assert!(stmt.alternate.is_some());
    }

    #[test]
    fn test_else_if_chain() {
        let program = parse_ok("if (a) b; else if (c) d;");
        let Stmt::If(stmt) = &program.body[0] else {
            panic!();
        };
        assert!(matches!(stmt.alternate.as_deref(), Some(Stmt::If(_))));
    }

    #[test]
    fn test_while() {
        let program = parse_ok("while (x) { x; }");
        assert!(matches!(program.body[0], Stmt::While(_)));
    }

    #[test]
    fn test_for_full_header() {
        let program = parse_ok("for (let i = 0; i < 10; i++) { i; }");
        let Stmt::For(stmt) = &program.body[0] else {
            panic!();
        };
        assert!(matches!(stmt.init, Some(ForInit::Decl(_))));
        assert!(stmt.test.is_some());
        assert!(stmt.update.is_some());
    }

    #[test]
    fn test_for_empty_header() {
        let program = parse_ok("for (;;) {}");
        let Stmt::For(stmt) = &program.body[0] else {
            panic!();
        };
        assert!(stmt.init.is_none());
        assert!(stmt.test.is_none());
        assert!(stmt.update.is_none());
    }

    #[test]
    fn test_for_expression_init() {
        let program = parse_ok("for (i = 0; i < 3; i = i + 1) {}");
        let Stmt::For(stmt) = &program.body[0] else {
            panic!();
        };
        assert!(matches!(stmt.init, Some(ForInit::Expr(_))));
    }

    #[test]
    fn test_return_without_argument() {
        let program = parse_ok("function f() { return; }");
        let Stmt::FnDecl(decl) = &program.body[0] else {
            panic!();
        };
        let Stmt::Return(ret) = &decl.body.body[0] else {
            panic!();
        };
        assert!(ret.argument.is_none());
    }

    #[test]
    fn test_nested_blocks() {
        let program = parse_ok("{ { let x = 1; } }");
        let Stmt::Block(outer) = &program.body[0] else {
            panic!();
        };
        assert!(matches!(outer.body[0], Stmt::Block(_)));
    }

    #[test]
    fn test_comments_filtered() {
        let program = parse_ok("let x = 1; // comment\n/* block */ let y = 2;");
        assert_eq!(program.body.len(), 2);
    }

    #[test]
    fn test_statement_positions() {
        let program = parse_ok("let x = 1;\nlet y = 2;");
        assert_eq!(program.body[0].position(), (1, 1));
        assert_eq!(program.body[1].position(), (2, 1));
    }

    #[test]
    fn test_missing_semicolon_recorded_but_kept() {
        let (program, _, par) = parse("let x = 1\nlet y = 2;");
        assert_eq!(par.error_count(), 1);
        assert_eq!(program.body.len(), 2);
    }

    #[test]
    fn test_missing_identifier_error() {
        let (_, _, par) = parse("let = 1;");
        assert!(par.has_errors());
        assert!(par.diagnostics()[0]
            .message
            .starts_with("Expected identifier"));
    }
}
