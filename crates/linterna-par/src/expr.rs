//! Expression parsing using top-down operator precedence.
//!
//! The binary ladder is driven by binding powers: each infix operator has
//! a left and right binding power, and `parse_binary(min_bp)` only
//! consumes operators whose left power is at least `min_bp`. All binary
//! and logical operators are left-associative (`right = left + 1`);
//! assignment and the ternary recurse right instead.

use crate::ast::*;
use crate::Parser;
use linterna_lex::{Token, TokenKind};

/// Binding power levels for the binary ladder.
/// Higher numbers bind tighter.
mod bp {
    /// Minimum binding power (start of expression)
    pub const MIN: u8 = 0;

    /// Logical OR: `||`
    pub const LOGICAL_OR: u8 = 2;

    /// Logical AND: `&&`
    pub const LOGICAL_AND: u8 = 4;

    /// Equality: `==`, `===`, `!=`, `!==`
    pub const EQUALITY: u8 = 6;

    /// Relational: `<`, `>`, `<=`, `>=`, `in`, `instanceof`
    pub const RELATIONAL: u8 = 8;

    /// Additive: `+`, `-`
    pub const ADDITIVE: u8 = 10;

    /// Multiplicative: `*`, `/`, `%`, `**`
    pub const MULTIPLICATIVE: u8 = 12;
}

impl<'a> Parser<'a> {
    /// Parse a full expression (assignment level).
    pub(crate) fn parse_expression(&mut self) -> Option<Expr> {
        self.parse_assignment()
    }

    /// Assignment is right-associative: `a = b = c` is `a = (b = c)`.
    pub(crate) fn parse_assignment(&mut self) -> Option<Expr> {
        let left = self.parse_conditional()?;

        if self.current().kind == TokenKind::Operator {
            if let Some(op) = AssignOp::from_str(self.current().text()) {
                self.advance();
                let right = self.parse_assignment()?;
                let (line, column) = left.position();
                return Some(Expr::Assign(Box::new(AssignExpr {
                    op,
                    left,
                    right,
                    line,
                    column,
                })));
            }
        }

        Some(left)
    }

    /// `test ? consequent : alternate`
    fn parse_conditional(&mut self) -> Option<Expr> {
        let test = self.parse_binary(bp::MIN)?;

        if self.match_op("?") {
            let consequent = self.parse_assignment()?;
            self.expect_op(":")?;
            let alternate = self.parse_assignment()?;
            let (line, column) = test.position();
            return Some(Expr::Conditional(Box::new(ConditionalExpr {
                test,
                consequent,
                alternate,
                line,
                column,
            })));
        }

        Some(test)
    }

    /// Pratt loop over the binary/logical ladder.
    fn parse_binary(&mut self, min_bp: u8) -> Option<Expr> {
        let mut left = self.parse_unary()?;

        loop {
            let Some((left_bp, right_bp)) = self.infix_binding_power() else {
                break;
            };
            if left_bp < min_bp {
                break;
            }

            let op_token = self.advance();
            let right = self.parse_binary(right_bp)?;
            let (line, column) = left.position();

            left = match op_token.text() {
                "&&" | "||" => Expr::Logical(Box::new(LogicalExpr {
                    op: LogicalOp::from_str(op_token.text())?,
                    left,
                    right,
                    line,
                    column,
                })),
                other => Expr::Binary(Box::new(BinaryExpr {
                    op: BinOp::from_str(other)?,
                    left,
                    right,
                    line,
                    column,
                })),
            };
        }

        Some(left)
    }

    /// Binding powers of the current token as an infix operator.
    fn infix_binding_power(&self) -> Option<(u8, u8)> {
        let token = self.current();
        match token.kind {
            TokenKind::Operator => match token.text() {
                "||" => Some((bp::LOGICAL_OR, bp::LOGICAL_OR + 1)),
                "&&" => Some((bp::LOGICAL_AND, bp::LOGICAL_AND + 1)),
                "==" | "===" | "!=" | "!==" => Some((bp::EQUALITY, bp::EQUALITY + 1)),
                "<" | ">" | "<=" | ">=" => Some((bp::RELATIONAL, bp::RELATIONAL + 1)),
                "+" | "-" => Some((bp::ADDITIVE, bp::ADDITIVE + 1)),
                "*" | "/" | "%" | "**" => Some((bp::MULTIPLICATIVE, bp::MULTIPLICATIVE + 1)),
                _ => None,
            },
            TokenKind::Keyword if matches!(token.text(), "in" | "instanceof") => {
                Some((bp::RELATIONAL, bp::RELATIONAL + 1))
            }
            _ => None,
        }
    }

    /// Prefix unary and update operators.
    fn parse_unary(&mut self) -> Option<Expr> {
        let token = *self.current();

        if token.kind == TokenKind::Operator {
            match token.text() {
                "!" | "-" | "+" => {
                    self.advance();
                    let argument = self.parse_unary()?;
                    return Some(Expr::Unary(Box::new(UnaryExpr {
                        op: UnOp::from_str(token.text())?,
                        argument,
                        line: token.line,
                        column: token.column,
                    })));
                }
                "++" | "--" => {
                    self.advance();
                    let argument = self.parse_unary()?;
                    return Some(Expr::Update(Box::new(UpdateExpr {
                        op: UpdateOp::from_str(token.text())?,
                        argument,
                        prefix: true,
                        line: token.line,
                        column: token.column,
                    })));
                }
                _ => {}
            }
        }

        if token.kind == TokenKind::Keyword && matches!(token.text(), "typeof" | "void" | "delete")
        {
            self.advance();
            let argument = self.parse_unary()?;
            return Some(Expr::Unary(Box::new(UnaryExpr {
                op: UnOp::from_str(token.text())?,
                argument,
                line: token.line,
                column: token.column,
            })));
        }

        self.parse_postfix()
    }

    /// Postfix `++`/`--`.
    fn parse_postfix(&mut self) -> Option<Expr> {
        let expr = self.parse_call_member()?;

        if self.current().kind == TokenKind::Operator
            && matches!(self.current().text(), "++" | "--")
        {
            let token = self.advance();
            let (line, column) = expr.position();
            return Some(Expr::Update(Box::new(UpdateExpr {
                op: UpdateOp::from_str(token.text())?,
                argument: expr,
                prefix: false,
                line,
                column,
            })));
        }

        Some(expr)
    }

    /// Left-associative call and member chains.
    fn parse_call_member(&mut self) -> Option<Expr> {
        let mut expr = self.parse_primary()?;

        loop {
            if self.check_punct("(") {
                self.advance();
                let mut arguments = Vec::new();
                if !self.check_punct(")") {
                    loop {
                        arguments.push(self.parse_assignment()?);
                        if !self.match_punct(",") {
                            break;
                        }
                    }
                }
                self.expect_punct(")")?;
                let (line, column) = expr.position();
                expr = Expr::Call(Box::new(CallExpr {
                    callee: expr,
                    arguments,
                    line,
                    column,
                }));
            } else if self.check_punct(".") {
                self.advance();
                let property = self.parse_property_name()?;
                let (line, column) = expr.position();
                expr = Expr::Member(Box::new(MemberExpr {
                    object: expr,
                    property: Expr::Ident(property),
                    computed: false,
                    line,
                    column,
                }));
            } else if self.check_punct("[") {
                self.advance();
                let property = self.parse_expression()?;
                self.expect_punct("]")?;
                let (line, column) = expr.position();
                expr = Expr::Member(Box::new(MemberExpr {
                    object: expr,
                    property,
                    computed: true,
                    line,
                    column,
                }));
            } else {
                break;
            }
        }

        Some(expr)
    }

    /// Property name after `.`; keywords are legal here (`obj.delete`).
    fn parse_property_name(&mut self) -> Option<Ident> {
        let token = *self.current();
        if matches!(token.kind, TokenKind::Identifier | TokenKind::Keyword) {
            self.advance();
            return Some(Ident {
                name: token.lexeme,
                line: token.line,
                column: token.column,
            });
        }
        self.add_error(
            format!("Expected property name, found {}", Self::describe(&token)),
            &token,
        );
        None
    }

    /// Primary expressions.
    fn parse_primary(&mut self) -> Option<Expr> {
        let token = *self.current();

        match token.kind {
            TokenKind::Identifier => {
                self.advance();
                Some(Expr::Ident(Ident {
                    name: token.lexeme,
                    line: token.line,
                    column: token.column,
                }))
            }
            TokenKind::Number => {
                self.advance();
                Some(Expr::Literal(Literal {
                    value: LitValue::Number(number_value(token.text())),
                    raw: token.text().to_string(),
                    line: token.line,
                    column: token.column,
                }))
            }
            TokenKind::String => {
                self.advance();
                let raw = token.text();
                let body = raw[1..raw.len() - 1].to_string();
                Some(Expr::Literal(Literal {
                    value: LitValue::Str(body),
                    raw: raw.to_string(),
                    line: token.line,
                    column: token.column,
                }))
            }
            TokenKind::Template => {
                self.advance();
                Some(Expr::Template(TemplateLit {
                    raw: token.text().to_string(),
                    line: token.line,
                    column: token.column,
                }))
            }
            TokenKind::Keyword => match token.text() {
                "true" | "false" => {
                    self.advance();
                    Some(Expr::Literal(Literal {
                        value: LitValue::Bool(token.text() == "true"),
                        raw: token.text().to_string(),
                        line: token.line,
                        column: token.column,
                    }))
                }
                "null" => {
                    self.advance();
                    Some(Expr::Literal(Literal {
                        value: LitValue::Null,
                        raw: "null".to_string(),
                        line: token.line,
                        column: token.column,
                    }))
                }
                _ => {
                    self.error_unexpected(&token);
                    None
                }
            },
            TokenKind::Punctuator if token.text() == "(" => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_punct(")")?;
                Some(expr)
            }
            TokenKind::Punctuator if token.text() == "[" => self.parse_array(token),
            TokenKind::Punctuator if token.text() == "{" => self.parse_object(token),
            _ => {
                self.error_unexpected(&token);
                None
            }
        }
    }

    /// Array literal; a `,` with no preceding value is a hole.
    fn parse_array(&mut self, open: Token) -> Option<Expr> {
        self.advance();

        let mut elements = Vec::new();
        loop {
            if self.check_punct("]") {
                break;
            }
            if self.check_punct(",") {
                self.advance();
                elements.push(None);
                continue;
            }
            elements.push(Some(self.parse_assignment()?));
            if !self.match_punct(",") {
                break;
            }
        }
        self.expect_punct("]")?;

        Some(Expr::Array(Box::new(ArrayExpr {
            elements,
            line: open.line,
            column: open.column,
        })))
    }

    /// Object literal; duplicate keys are accepted here, the analyzer
    /// warns about them.
    fn parse_object(&mut self, open: Token) -> Option<Expr> {
        self.advance();

        let mut properties = Vec::new();
        if !self.check_punct("}") {
            loop {
                let key_token = *self.current();
                let key = self.parse_object_key()?;
                self.expect_op(":")?;
                let value = self.parse_assignment()?;
                properties.push(Property {
                    key,
                    value,
                    line: key_token.line,
                    column: key_token.column,
                });
                if !self.match_punct(",") {
                    break;
                }
            }
        }
        self.expect_punct("}")?;

        Some(Expr::Object(Box::new(ObjectExpr {
            properties,
            line: open.line,
            column: open.column,
        })))
    }

    /// Object keys: identifiers, keywords, string or number literals.
    fn parse_object_key(&mut self) -> Option<linterna_util::Symbol> {
        let token = *self.current();
        match token.kind {
            TokenKind::Identifier | TokenKind::Keyword | TokenKind::Number => {
                self.advance();
                Some(token.lexeme)
            }
            TokenKind::String => {
                self.advance();
                let raw = token.text();
                Some(linterna_util::Symbol::intern(&raw[1..raw.len() - 1]))
            }
            _ => {
                self.add_error(
                    format!("Expected property key, found {}", Self::describe(&token)),
                    &token,
                );
                None
            }
        }
    }

    /// Record "Unexpected token" at primary position.
    fn error_unexpected(&mut self, token: &Token) {
        let message = if token.kind == TokenKind::Eof {
            "Unexpected end of input".to_string()
        } else {
            format!("Unexpected token: '{}'", token.text())
        };
        self.add_error(message, token);
    }
}

/// Numeric value of a number lexeme (decimal, float, hex, binary).
fn number_value(text: &str) -> f64 {
    if let Some(hex) = text.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).map(|v| v as f64).unwrap_or(0.0)
    } else if let Some(bin) = text.strip_prefix("0b") {
        u64::from_str_radix(bin, 2).map(|v| v as f64).unwrap_or(0.0)
    } else {
        text.parse().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::parse;

    fn parse_expr(source: &str) -> Expr {
        let (program, lex, par) = parse(source);
        assert!(!lex.has_errors(), "lex errors for {source:?}");
        assert!(!par.has_errors(), "syntax errors for {source:?}");
        let Some(Stmt::Expr(stmt)) = program.body.into_iter().next() else {
            panic!("expected expression statement");
        };
        stmt.expression
    }

    fn assert_binary(expr: &Expr, op: BinOp) {
        match expr {
            Expr::Binary(b) => assert_eq!(b.op, op, "expected operator {op}"),
            other => panic!("expected BinaryExpression, got {}", other.node_kind()),
        }
    }

    // ====================================================================
    // LITERALS AND PRIMARIES
    // ====================================================================

    #[test]
    fn test_number_literal() {
        let Expr::Literal(lit) = parse_expr("42;") else {
            panic!();
        };
        assert_eq!(lit.value, LitValue::Number(42.0));
        assert_eq!(lit.raw, "42");
    }

    #[test]
    fn test_hex_and_binary_values() {
        let Expr::Literal(lit) = parse_expr("0x1F;") else {
            panic!();
        };
        assert_eq!(lit.value, LitValue::Number(31.0));
        let Expr::Literal(lit) = parse_expr("0b101;") else {
            panic!();
        };
        assert_eq!(lit.value, LitValue::Number(5.0));
    }

    #[test]
    fn test_string_literal_value_without_quotes() {
        let Expr::Literal(lit) = parse_expr("\"hi\";") else {
            panic!();
        };
        assert_eq!(lit.value, LitValue::Str("hi".to_string()));
        assert_eq!(lit.raw, "\"hi\"");
    }

    #[test]
    fn test_keyword_literals() {
        assert!(matches!(
            parse_expr("true;"),
            Expr::Literal(Literal {
                value: LitValue::Bool(true),
                ..
            })
        ));
        assert!(matches!(
            parse_expr("null;"),
            Expr::Literal(Literal {
                value: LitValue::Null,
                ..
            })
        ));
    }

    #[test]
    fn test_undefined_is_identifier() {
        let Expr::Ident(ident) = parse_expr("undefined;") else {
            panic!("undefined must parse as Identifier");
        };
        assert_eq!(ident.name.as_str(), "undefined");
    }

    #[test]
    fn test_template_literal() {
        let Expr::Template(tpl) = parse_expr("`a ${x} b`;") else {
            panic!();
        };
        assert_eq!(tpl.raw, "`a ${x} b`");
    }

    #[test]
    fn test_parenthesized() {
        assert_binary(&parse_expr("(a + b) * c;"), BinOp::Mul);
    }

    // ====================================================================
    // PRECEDENCE AND ASSOCIATIVITY
    // ====================================================================

    #[test]
    fn test_precedence_mul_over_add() {
        let expr = parse_expr("a + b * c;");
        assert_binary(&expr, BinOp::Add);
        let Expr::Binary(b) = &expr else { panic!() };
        assert_binary(&b.right, BinOp::Mul);
    }

    #[test]
    fn test_left_associative_sub() {
        let expr = parse_expr("a - b - c;");
        assert_binary(&expr, BinOp::Sub);
        let Expr::Binary(b) = &expr else { panic!() };
        assert_binary(&b.left, BinOp::Sub);
    }

    #[test]
    fn test_logical_precedence() {
        // a && b == c || d  =>  (a && (b == c)) || d
        let expr = parse_expr("a && b == c || d;");
        let Expr::Logical(or) = &expr else { panic!() };
        assert_eq!(or.op, LogicalOp::Or);
        let Expr::Logical(and) = &or.left else {
            panic!()
        };
        assert_eq!(and.op, LogicalOp::And);
        assert_binary(&and.right, BinOp::EqLoose);
    }

    #[test]
    fn test_relational_keywords() {
        assert_binary(&parse_expr("a in b;"), BinOp::In);
        assert_binary(&parse_expr("a instanceof b;"), BinOp::InstanceOf);
    }

    #[test]
    fn test_pow_in_multiplicative_layer() {
        // a * b ** c parses left-associatively within one layer
        let expr = parse_expr("a ** b * c;");
        assert_binary(&expr, BinOp::Mul);
        let Expr::Binary(b) = &expr else { panic!() };
        assert_binary(&b.left, BinOp::Pow);
    }

    #[test]
    fn test_assignment_right_associative() {
        let Expr::Assign(outer) = parse_expr("a = b = c;") else {
            panic!();
        };
        assert_eq!(outer.op, AssignOp::Assign);
        assert!(matches!(outer.right, Expr::Assign(_)));
    }

    #[test]
    fn test_compound_assignment() {
        let Expr::Assign(assign) = parse_expr("a += 1;") else {
            panic!();
        };
        assert_eq!(assign.op, AssignOp::AddAssign);
    }

    #[test]
    fn test_conditional() {
        let Expr::Conditional(cond) = parse_expr("a ? b : c;") else {
            panic!();
        };
        assert!(matches!(cond.test, Expr::Ident(_)));
        assert!(matches!(cond.consequent, Expr::Ident(_)));
        assert!(matches!(cond.alternate, Expr::Ident(_)));
    }

    // ====================================================================
    // UNARY, UPDATE
    // ====================================================================

    #[test]
    fn test_prefix_unary() {
        let Expr::Unary(u) = parse_expr("!flag;") else {
            panic!();
        };
        assert_eq!(u.op, UnOp::Not);
    }

    #[test]
    fn test_chained_unary() {
        let Expr::Unary(outer) = parse_expr("!!x;") else {
            panic!();
        };
        assert_eq!(outer.op, UnOp::Not);
        assert!(matches!(&outer.argument, Expr::Unary(inner) if inner.op == UnOp::Not));
    }

    #[test]
    fn test_keyword_unary() {
        let Expr::Unary(u) = parse_expr("typeof x;") else {
            panic!();
        };
        assert_eq!(u.op, UnOp::TypeOf);
        let Expr::Unary(u) = parse_expr("delete obj.prop;") else {
            panic!();
        };
        assert_eq!(u.op, UnOp::Delete);
        assert!(matches!(u.argument, Expr::Member(_)));
    }

    #[test]
    fn test_prefix_update() {
        let Expr::Update(u) = parse_expr("++i;") else {
            panic!();
        };
        assert_eq!(u.op, UpdateOp::Inc);
        assert!(u.prefix);
    }

    #[test]
    fn test_postfix_update() {
        let Expr::Update(u) = parse_expr("i--;") else {
            panic!();
        };
        assert_eq!(u.op, UpdateOp::Dec);
        assert!(!u.prefix);
    }

    // ====================================================================
    // CALL AND MEMBER CHAINS
    // ====================================================================

    #[test]
    fn test_call_with_arguments() {
        let Expr::Call(call) = parse_expr("f(1, x, \"s\");") else {
            panic!();
        };
        assert_eq!(call.arguments.len(), 3);
    }

    #[test]
    fn test_chained_calls() {
        let Expr::Call(outer) = parse_expr("f(1)(2);") else {
            panic!();
        };
        assert!(matches!(outer.callee, Expr::Call(_)));
    }

    #[test]
    fn test_member_dot() {
        let Expr::Member(member) = parse_expr("console.log;") else {
            panic!();
        };
        assert!(!member.computed);
        assert!(matches!(&member.property, Expr::Ident(p) if p.name.as_str() == "log"));
    }

    #[test]
    fn test_member_computed() {
        let Expr::Member(member) = parse_expr("arr[i + 1];") else {
            panic!();
        };
        assert!(member.computed);
        assert!(matches!(member.property, Expr::Binary(_)));
    }

    #[test]
    fn test_method_call_chain() {
        let Expr::Call(call) = parse_expr("obj.items[0].render();") else {
            panic!();
        };
        assert!(matches!(call.callee, Expr::Member(_)));
    }

    // ====================================================================
    // ARRAYS AND OBJECTS
    // ====================================================================

    #[test]
    fn test_array_literal() {
        let Expr::Array(array) = parse_expr("[1, 2, 3];") else {
            panic!();
        };
        assert_eq!(array.elements.len(), 3);
        assert!(array.elements.iter().all(Option::is_some));
    }

    #[test]
    fn test_array_hole() {
        let Expr::Array(array) = parse_expr("[1, , 3];") else {
            panic!();
        };
        assert_eq!(array.elements.len(), 3);
        assert!(array.elements[1].is_none());
    }

    #[test]
    fn test_empty_array() {
        let Expr::Array(array) = parse_expr("[];") else {
            panic!();
        };
        assert!(array.elements.is_empty());
    }

    #[test]
    fn test_object_literal() {
        let Expr::Assign(assign) = parse_expr("x = { a: 1, \"b\": 2 };") else {
            panic!();
        };
        let Expr::Object(object) = &assign.right else {
            panic!();
        };
        assert_eq!(object.properties.len(), 2);
        assert_eq!(object.properties[0].key.as_str(), "a");
        assert_eq!(object.properties[1].key.as_str(), "b");
    }

    #[test]
    fn test_object_duplicate_keys_accepted() {
        let (program, _, par) = parse("x = { a: 1, a: 2 };");
        assert!(!par.has_errors());
        assert_eq!(program.body.len(), 1);
    }

    // ====================================================================
    // ERRORS
    // ====================================================================

    #[test]
    fn test_unexpected_token_message() {
        let (_, _, par) = parse("let x = ;");
        assert!(par
            .diagnostics()
            .iter()
            .any(|d| d.message == "Unexpected token: ';'"));
    }

    #[test]
    fn test_unexpected_eof() {
        let (_, _, par) = parse("1 +");
        assert!(par
            .diagnostics()
            .iter()
            .any(|d| d.message == "Unexpected end of input"));
    }
}
