//! Report formatting.
//!
//! The reporter is a pure formatter over the outputs of the three stages;
//! it never mutates or re-derives anything. The section headers and the
//! `N. [Línea L, Columna C] <message>` finding format are displayed
//! verbatim by the IDE shell and must not change.

use linterna_lex::{Token, TokenKind};
use linterna_par::ast::*;
use linterna_sem::{ScopeTree, SymbolKind};
use linterna_util::Diagnostic;

/// Token-table rows shown before the report elides the rest.
const TOKEN_TABLE_LIMIT: usize = 50;

/// Renders the `=== ANÁLISIS LÉXICO ===` section.
pub fn lexical_report(tokens: &[Token], errors: &[Diagnostic]) -> String {
    let mut out = String::new();
    out.push_str("=== ANÁLISIS LÉXICO ===\n\n");

    out.push_str(&format!("Errores léxicos: {}\n", errors.len()));
    push_findings(&mut out, errors);
    out.push('\n');

    let visible: Vec<&Token> = tokens.iter().filter(|t| t.kind != TokenKind::Eof).collect();
    out.push_str(&format!("Tokens reconocidos: {}\n", visible.len()));
    out.push_str(&format!(
        "  {:<12} {:<24} {:>6} {:>8}\n",
        "TIPO", "LEXEMA", "LÍNEA", "COLUMNA"
    ));
    for token in visible.iter().take(TOKEN_TABLE_LIMIT) {
        out.push_str(&format!(
            "  {:<12} {:<24} {:>6} {:>8}\n",
            token.kind.as_str(),
            printable(token.text()),
            token.line,
            token.column
        ));
    }
    if visible.len() > TOKEN_TABLE_LIMIT {
        out.push_str(&format!(
            "  ... y {} tokens más\n",
            visible.len() - TOKEN_TABLE_LIMIT
        ));
    }

    out.push('\n');
    out.push_str("Estadísticas:\n");
    out.push_str(&format!("  Total de tokens: {}\n", visible.len()));
    out.push_str(&format!("  Errores: {}\n", errors.len()));
    out
}

/// Renders the `=== ANÁLISIS SINTÁCTICO ===` section.
pub fn syntactic_report(program: &Program, errors: &[Diagnostic]) -> String {
    let mut out = String::new();
    out.push_str("=== ANÁLISIS SINTÁCTICO ===\n\n");

    out.push_str(&format!("Errores sintácticos: {}\n", errors.len()));
    push_findings(&mut out, errors);
    out.push('\n');

    out.push_str("Árbol de sintaxis abstracta:\n");
    out.push_str(&format!("{}\n", program.node_kind()));
    for stmt in &program.body {
        push_stmt(&mut out, stmt, 1);
    }

    out.push('\n');
    out.push_str("Estadísticas:\n");
    out.push_str(&format!(
        "  Sentencias de nivel superior: {}\n",
        program.body.len()
    ));
    out.push_str(&format!("  Errores: {}\n", errors.len()));
    out
}

/// Renders the `=== ANÁLISIS SEMÁNTICO ===` section.
pub fn semantic_report(
    scopes: &ScopeTree,
    errors: &[Diagnostic],
    warnings: &[Diagnostic],
) -> String {
    let mut out = String::new();
    out.push_str("=== ANÁLISIS SEMÁNTICO ===\n\n");

    out.push_str(&format!("Errores semánticos: {}\n", errors.len()));
    push_findings(&mut out, errors);
    out.push_str(&format!("Advertencias: {}\n", warnings.len()));
    push_findings(&mut out, warnings);
    out.push('\n');

    out.push_str("Tabla de símbolos:\n");
    let mut symbol_count = 0usize;
    scopes.walk(ScopeTree::GLOBAL, &mut |id, scope| {
        out.push_str(&format!(
            "  Ámbito {} #{}\n",
            scope.kind.as_str(),
            id.0
        ));
        out.push_str(&format!(
            "    {:<16} {:<10} {:>6}  {:<13} {:<6}\n",
            "NOMBRE", "TIPO", "LÍNEA", "INICIALIZADA", "USADA"
        ));
        for (name, info) in &scope.bindings {
            symbol_count += 1;
            let line = if info.kind == SymbolKind::Builtin {
                "-".to_string()
            } else {
                info.line.to_string()
            };
            out.push_str(&format!(
                "    {:<16} {:<10} {:>6}  {:<13} {:<6}\n",
                name.as_str(),
                info.kind.as_str(),
                line,
                if info.initialized { "sí" } else { "no" },
                if info.used { "sí" } else { "no" }
            ));
        }
    });

    out.push('\n');
    out.push_str("Estadísticas:\n");
    out.push_str(&format!("  Ámbitos: {}\n", scopes.len()));
    out.push_str(&format!("  Símbolos: {symbol_count}\n"));
    out.push_str(&format!("  Errores: {}\n", errors.len()));
    out.push_str(&format!("  Advertencias: {}\n", warnings.len()));
    out
}

/// Enumerated `N. [Línea L, Columna C] <message>` lines.
fn push_findings(out: &mut String, findings: &[Diagnostic]) {
    for (index, diagnostic) in findings.iter().enumerate() {
        out.push_str(&format!(
            "  {}. [Línea {}, Columna {}] {}\n",
            index + 1,
            diagnostic.span.line,
            diagnostic.span.column,
            diagnostic.message
        ));
    }
}

/// Lexemes shown in one table row: control characters escaped.
fn printable(text: &str) -> String {
    text.replace('\n', "\\n").replace('\t', "\\t").replace('\r', "\\r")
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn push_stmt(out: &mut String, stmt: &Stmt, depth: usize) {
    indent(out, depth);
    match stmt {
        Stmt::VarDecl(decl) => {
            out.push_str(&format!("{} ({})\n", stmt.node_kind(), decl.kind));
            for declarator in &decl.declarators {
                indent(out, depth + 1);
                out.push_str(&format!(
                    "VariableDeclarator: {}\n",
                    declarator.id.name
                ));
                if let Some(init) = &declarator.init {
                    push_expr(out, init, depth + 2);
                }
            }
        }
        Stmt::FnDecl(decl) => {
            let params: Vec<&str> = decl.params.iter().map(|p| p.name.as_str()).collect();
            out.push_str(&format!(
                "{}: {}({})\n",
                stmt.node_kind(),
                decl.id.name,
                params.join(", ")
            ));
            for inner in &decl.body.body {
                push_stmt(out, inner, depth + 1);
            }
        }
        Stmt::Block(block) => {
            out.push_str("BlockStatement\n");
            for inner in &block.body {
                push_stmt(out, inner, depth + 1);
            }
        }
        Stmt::If(if_stmt) => {
            out.push_str("IfStatement\n");
            push_expr(out, &if_stmt.test, depth + 1);
            push_stmt(out, &if_stmt.consequent, depth + 1);
            if let Some(alternate) = &if_stmt.alternate {
                push_stmt(out, alternate, depth + 1);
            }
        }
        Stmt::While(while_stmt) => {
            out.push_str("WhileStatement\n");
            push_expr(out, &while_stmt.test, depth + 1);
            push_stmt(out, &while_stmt.body, depth + 1);
        }
        Stmt::For(for_stmt) => {
            out.push_str("ForStatement\n");
            match &for_stmt.init {
                Some(ForInit::Decl(decl)) => {
                    push_stmt(out, &Stmt::VarDecl(decl.clone()), depth + 1)
                }
                Some(ForInit::Expr(expr)) => push_expr(out, expr, depth + 1),
                None => {}
            }
            if let Some(test) = &for_stmt.test {
                push_expr(out, test, depth + 1);
            }
            if let Some(update) = &for_stmt.update {
                push_expr(out, update, depth + 1);
            }
            push_stmt(out, &for_stmt.body, depth + 1);
        }
        Stmt::Return(ret) => {
            out.push_str("ReturnStatement\n");
            if let Some(argument) = &ret.argument {
                push_expr(out, argument, depth + 1);
            }
        }
        Stmt::Expr(expr_stmt) => {
            out.push_str("ExpressionStatement\n");
            push_expr(out, &expr_stmt.expression, depth + 1);
        }
    }
}

fn push_expr(out: &mut String, expr: &Expr, depth: usize) {
    indent(out, depth);
    match expr {
        Expr::Assign(assign) => {
            out.push_str(&format!("AssignmentExpression ({})\n", assign.op));
            push_expr(out, &assign.left, depth + 1);
            push_expr(out, &assign.right, depth + 1);
        }
        Expr::Conditional(cond) => {
            out.push_str("ConditionalExpression\n");
            push_expr(out, &cond.test, depth + 1);
            push_expr(out, &cond.consequent, depth + 1);
            push_expr(out, &cond.alternate, depth + 1);
        }
        Expr::Logical(logical) => {
            out.push_str(&format!("LogicalExpression ({})\n", logical.op));
            push_expr(out, &logical.left, depth + 1);
            push_expr(out, &logical.right, depth + 1);
        }
        Expr::Binary(binary) => {
            out.push_str(&format!("BinaryExpression ({})\n", binary.op));
            push_expr(out, &binary.left, depth + 1);
            push_expr(out, &binary.right, depth + 1);
        }
        Expr::Unary(unary) => {
            out.push_str(&format!("UnaryExpression ({})\n", unary.op));
            push_expr(out, &unary.argument, depth + 1);
        }
        Expr::Update(update) => {
            let position = if update.prefix { "prefijo" } else { "sufijo" };
            out.push_str(&format!("UpdateExpression ({} {})\n", update.op, position));
            push_expr(out, &update.argument, depth + 1);
        }
        Expr::Call(call) => {
            out.push_str("CallExpression\n");
            push_expr(out, &call.callee, depth + 1);
            for argument in &call.arguments {
                push_expr(out, argument, depth + 1);
            }
        }
        Expr::Member(member) => {
            let access = if member.computed { "computado" } else { "directo" };
            out.push_str(&format!("MemberExpression ({access})\n"));
            push_expr(out, &member.object, depth + 1);
            push_expr(out, &member.property, depth + 1);
        }
        Expr::Ident(ident) => {
            out.push_str(&format!("Identifier ({})\n", ident.name));
        }
        Expr::Literal(lit) => {
            out.push_str(&format!("Literal ({})\n", printable(&lit.raw)));
        }
        Expr::Template(template) => {
            out.push_str(&format!("TemplateLiteral ({})\n", printable(&template.raw)));
        }
        Expr::Array(array) => {
            out.push_str("ArrayExpression\n");
            for element in &array.elements {
                match element {
                    Some(expr) => push_expr(out, expr, depth + 1),
                    None => {
                        indent(out, depth + 1);
                        out.push_str("<hueco>\n");
                    }
                }
            }
        }
        Expr::Object(object) => {
            out.push_str("ObjectExpression\n");
            for property in &object.properties {
                indent(out, depth + 1);
                out.push_str(&format!("Property: {}\n", property.key));
                push_expr(out, &property.value, depth + 2);
            }
        }
    }
}
