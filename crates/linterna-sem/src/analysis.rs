//! Semantic analysis over the AST.
//!
//! The analyzer is a single read-only walk of the tree. It maintains the
//! scope tree (entering a child scope at function bodies, block statements
//! and `for` headers), pre-installs hoisted function declarations, checks
//! declaration/usage/initialization/const rules, and emits the style
//! warnings. No diagnostic aborts the walk; everything is recorded on the
//! shared handler and analysis continues.

use linterna_par::ast::*;
use linterna_util::{DiagnosticBuilder, FxHashSet, Handler, Span, Symbol};

use crate::scope::{LitClass, Scope, ScopeId, ScopeKind, ScopeTree, SymbolInfo, SymbolKind};

/// Per-function frame for return tracking.
struct FnFrame {
    name: Symbol,
    has_return: bool,
}

/// Scope-aware semantic analyzer.
///
/// One instance analyzes one program; there is no shared state between
/// runs.
pub struct SemanticAnalyzer<'a> {
    /// Scope tree under construction.
    scopes: ScopeTree,

    /// Scope the walk is currently inside.
    current: ScopeId,

    /// Handler collecting errors and warnings.
    handler: &'a Handler,

    /// Stack of enclosing function frames.
    fn_stack: Vec<FnFrame>,
}

impl<'a> SemanticAnalyzer<'a> {
    /// Creates an analyzer with a fresh scope tree (builtins preloaded).
    pub fn new(handler: &'a Handler) -> Self {
        Self {
            scopes: ScopeTree::new(),
            current: ScopeTree::GLOBAL,
            handler,
            fn_stack: Vec::new(),
        }
    }

    /// Analyzes a whole program and returns the finished scope tree.
    pub fn analyze_program(mut self, program: &Program) -> ScopeTree {
        self.hoist_functions(&program.body);
        for stmt in &program.body {
            self.analyze_stmt(stmt);
        }
        self.check_unused();
        self.scopes
    }

    // ------------------------------------------------------------------
    // Diagnostics
    // ------------------------------------------------------------------

    fn error(&self, message: String, line: u32, column: u32, node: &'static str) {
        DiagnosticBuilder::error(message)
            .span(Span::point(line, column))
            .node(node)
            .emit(self.handler);
    }

    fn warning(&self, message: String, line: u32, column: u32, node: &'static str) {
        DiagnosticBuilder::warning(message)
            .span(Span::point(line, column))
            .node(node)
            .emit(self.handler);
    }

    // ------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------

    /// Pre-installs every function declared directly in this statement
    /// list into the current scope, before the regular walk sees any of
    /// them. Runs for global and function scopes only.
    fn hoist_functions(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            let Stmt::FnDecl(decl) = stmt else { continue };
            let name = decl.id.name;
            let mut info = SymbolInfo::new(SymbolKind::Function, decl.line, decl.column, true);
            info.hoisted = true;
            info.params = Some(decl.params.iter().map(|p| p.name).collect());
            if !self.scopes.define(self.current, name, info) {
                self.error(
                    format!("Variable '{name}' is already declared in this scope"),
                    decl.line,
                    decl.column,
                    "FunctionDeclaration",
                );
            }
        }
    }

    fn analyze_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl(decl) => self.analyze_var_decl(decl),
            Stmt::FnDecl(decl) => self.analyze_fn_decl(decl),
            Stmt::Block(block) => {
                let scope = self.scopes.push_scope(ScopeKind::Block, self.current);
                let prev = self.current;
                self.current = scope;
                for inner in &block.body {
                    self.analyze_stmt(inner);
                }
                self.current = prev;
            }
            Stmt::If(stmt) => {
                self.analyze_expr(&stmt.test);
                self.branch_condition_warnings(&stmt.test, "IfStatement");
                self.analyze_stmt(&stmt.consequent);
                if let Some(alternate) = &stmt.alternate {
                    self.analyze_stmt(alternate);
                }
            }
            Stmt::While(stmt) => {
                self.analyze_expr(&stmt.test);
                let (line, column) = stmt.test.position();
                if always_truthy(&stmt.test) {
                    self.warning(
                        "Potential infinite loop: condition is always truthy".to_string(),
                        line,
                        column,
                        "WhileStatement",
                    );
                } else if always_falsy(&stmt.test) {
                    self.warning(
                        "Loop condition is always falsy".to_string(),
                        line,
                        column,
                        "WhileStatement",
                    );
                }
                self.analyze_stmt(&stmt.body);
            }
            Stmt::For(stmt) => {
                // the header gets its own scope so init declarations are
                // loop-local
                let scope = self.scopes.push_scope(ScopeKind::Block, self.current);
                let prev = self.current;
                self.current = scope;
                match &stmt.init {
                    Some(ForInit::Decl(decl)) => self.analyze_var_decl(decl),
                    Some(ForInit::Expr(expr)) => self.analyze_expr(expr),
                    None => {}
                }
                if let Some(test) = &stmt.test {
                    self.analyze_expr(test);
                }
                if let Some(update) = &stmt.update {
                    self.analyze_expr(update);
                }
                self.analyze_stmt(&stmt.body);
                self.current = prev;
            }
            Stmt::Return(stmt) => {
                if self.fn_stack.is_empty() {
                    self.error(
                        "Return statement outside of function".to_string(),
                        stmt.line,
                        stmt.column,
                        "ReturnStatement",
                    );
                } else if let Some(frame) = self.fn_stack.last_mut() {
                    frame.has_return = true;
                }
                if let Some(argument) = &stmt.argument {
                    self.analyze_expr(argument);
                }
            }
            Stmt::Expr(stmt) => self.analyze_expr(&stmt.expression),
        }
    }

    fn analyze_var_decl(&mut self, decl: &VarDecl) {
        for declarator in &decl.declarators {
            let name = declarator.id.name;

            if decl.kind == DeclKind::Const && declarator.init.is_none() {
                self.error(
                    format!("Missing initializer in const declaration '{name}'"),
                    declarator.line,
                    declarator.column,
                    "VariableDeclarator",
                );
            }

            let kind = if decl.kind == DeclKind::Const {
                SymbolKind::Const
            } else {
                SymbolKind::Variable
            };

            let existing_kind = self
                .scopes
                .lookup_in(self.current, name)
                .map(|info| info.kind);
            match existing_kind {
                Some(existing) => {
                    let message = if existing != kind {
                        format!("Identifier '{name}' has already been declared with different kind")
                    } else {
                        format!("Variable '{name}' is already declared in this scope")
                    };
                    self.error(message, declarator.line, declarator.column, "VariableDeclarator");
                }
                None => {
                    let mut info = SymbolInfo::new(
                        kind,
                        declarator.line,
                        declarator.column,
                        declarator.init.is_some(),
                    );
                    if let Some(Expr::Literal(lit)) = &declarator.init {
                        info.lit_class = Some(LitClass::of(&lit.value));
                    }
                    self.scopes.define(self.current, name, info);
                }
            }

            if let Some(init) = &declarator.init {
                self.analyze_expr(init);
            }
        }
    }

    fn analyze_fn_decl(&mut self, decl: &FnDecl) {
        let name = decl.id.name;

        // Hoisting covers global and function scopes; a declaration in a
        // block scope is installed by the regular walk.
        if self.scopes.scope(self.current).kind == ScopeKind::Block {
            let mut info = SymbolInfo::new(SymbolKind::Function, decl.line, decl.column, true);
            info.params = Some(decl.params.iter().map(|p| p.name).collect());
            if !self.scopes.define(self.current, name, info) {
                self.error(
                    format!("Variable '{name}' is already declared in this scope"),
                    decl.line,
                    decl.column,
                    "FunctionDeclaration",
                );
            }
        }

        self.fn_stack.push(FnFrame {
            name,
            has_return: false,
        });

        let scope = self.scopes.push_scope(ScopeKind::Function, self.current);
        let prev = self.current;
        self.current = scope;

        for param in &decl.params {
            let info = SymbolInfo::new(SymbolKind::Parameter, param.line, param.column, true);
            if !self.scopes.define(scope, param.name, info) {
                self.error(
                    format!("Variable '{}' is already declared in this scope", param.name),
                    param.line,
                    param.column,
                    "Identifier",
                );
            }
        }

        self.hoist_functions(&decl.body.body);
        for stmt in &decl.body.body {
            self.analyze_stmt(stmt);
        }

        self.current = prev;

        if let Some(frame) = self.fn_stack.pop() {
            if !frame.has_return && frame.name.as_str() != "main" {
                self.warning(
                    format!("Function '{}' does not have a return statement", frame.name),
                    decl.line,
                    decl.column,
                    "FunctionDeclaration",
                );
            }
        }
    }

    // ------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------

    fn analyze_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Ident(ident) => self.analyze_ident_use(ident),
            Expr::Literal(_) | Expr::Template(_) => {}
            Expr::Assign(assign) => self.analyze_assignment(assign),
            Expr::Conditional(cond) => {
                self.analyze_expr(&cond.test);
                self.branch_condition_warnings(&cond.test, "ConditionalExpression");
                self.analyze_expr(&cond.consequent);
                self.analyze_expr(&cond.alternate);
            }
            Expr::Logical(logical) => {
                self.analyze_expr(&logical.left);
                self.analyze_expr(&logical.right);
            }
            Expr::Binary(binary) => self.analyze_binary(binary),
            Expr::Unary(unary) => self.analyze_unary(unary),
            Expr::Update(update) => self.analyze_update(update),
            Expr::Call(call) => self.analyze_call(call),
            Expr::Member(member) => self.analyze_member(member),
            Expr::Array(array) => {
                for element in array.elements.iter().flatten() {
                    self.analyze_expr(element);
                }
            }
            Expr::Object(object) => self.analyze_object(object),
        }
    }

    /// Identifier in read position: resolve, mark used, check
    /// initialization.
    fn analyze_ident_use(&mut self, ident: &Ident) {
        let name = ident.name;
        match self.scopes.resolve(self.current, name) {
            None => self.error(
                format!("'{name}' is not defined"),
                ident.line,
                ident.column,
                "Identifier",
            ),
            Some(scope) => {
                let mut uninitialized = false;
                if let Some(info) = self.scopes.symbol_mut(scope, name) {
                    info.used = true;
                    uninitialized =
                        !info.initialized && info.kind != SymbolKind::Function && !info.builtin;
                }
                if uninitialized {
                    self.error(
                        format!("Variable '{name}' is used before being initialized"),
                        ident.line,
                        ident.column,
                        "Identifier",
                    );
                }
            }
        }
    }

    /// Assignment: right side first, then the target. A left-side
    /// identifier is not marked as used.
    fn analyze_assignment(&mut self, assign: &AssignExpr) {
        self.analyze_expr(&assign.right);

        match &assign.left {
            Expr::Ident(ident) => {
                let name = ident.name;
                match self.scopes.resolve(self.current, name) {
                    None => self.error(
                        format!("Cannot assign to undeclared variable '{name}'"),
                        ident.line,
                        ident.column,
                        "AssignmentExpression",
                    ),
                    Some(scope) => {
                        let mut const_violation = false;
                        if let Some(info) = self.scopes.symbol_mut(scope, name) {
                            if info.kind == SymbolKind::Const && info.initialized {
                                const_violation = true;
                            } else {
                                info.initialized = true;
                                info.assigned = true;
                            }
                        }
                        if const_violation {
                            self.error(
                                format!("Cannot assign to const variable '{name}'"),
                                ident.line,
                                ident.column,
                                "AssignmentExpression",
                            );
                        }
                    }
                }
            }
            other => self.analyze_expr(other),
        }

        match assign.op {
            AssignOp::AddAssign => self.check_add_classes(
                &assign.left,
                &assign.right,
                assign.line,
                assign.column,
                "AssignmentExpression",
            ),
            AssignOp::SubAssign
            | AssignOp::MulAssign
            | AssignOp::DivAssign
            | AssignOp::ModAssign => self.check_numeric_classes(
                &assign.left,
                &assign.right,
                assign.line,
                assign.column,
                "AssignmentExpression",
            ),
            AssignOp::Assign => {}
        }
    }

    fn analyze_binary(&mut self, binary: &BinaryExpr) {
        self.analyze_expr(&binary.left);
        self.analyze_expr(&binary.right);

        match binary.op {
            BinOp::EqLoose => self.warning(
                "Use '===' for strict comparison".to_string(),
                binary.line,
                binary.column,
                "BinaryExpression",
            ),
            BinOp::NeLoose => self.warning(
                "Use '!==' for strict comparison".to_string(),
                binary.line,
                binary.column,
                "BinaryExpression",
            ),
            BinOp::Add => self.check_add_classes(
                &binary.left,
                &binary.right,
                binary.line,
                binary.column,
                "BinaryExpression",
            ),
            BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod | BinOp::Pow => self
                .check_numeric_classes(
                    &binary.left,
                    &binary.right,
                    binary.line,
                    binary.column,
                    "BinaryExpression",
                ),
            op if op.is_relational() => self.check_comparison_classes(
                &binary.left,
                &binary.right,
                binary.line,
                binary.column,
            ),
            _ => {}
        }
    }

    fn analyze_unary(&mut self, unary: &UnaryExpr) {
        if unary.op == UnOp::Not {
            if let Expr::Unary(inner) = &unary.argument {
                if inner.op == UnOp::Not {
                    self.warning(
                        "Double negation '!!' can be simplified".to_string(),
                        unary.line,
                        unary.column,
                        "UnaryExpression",
                    );
                }
            }
        }

        if unary.op == UnOp::Delete {
            if let Expr::Ident(ident) = &unary.argument {
                self.warning(
                    format!(
                        "Delete of unqualified identifier '{}' in strict mode",
                        ident.name
                    ),
                    unary.line,
                    unary.column,
                    "UnaryExpression",
                );
            }
        }

        self.analyze_expr(&unary.argument);
    }

    /// Update targets must be declared, non-const identifiers; errors
    /// mirror assignment.
    fn analyze_update(&mut self, update: &UpdateExpr) {
        match &update.argument {
            Expr::Ident(ident) => {
                let name = ident.name;
                match self.scopes.resolve(self.current, name) {
                    None => self.error(
                        format!("Cannot update undeclared variable '{name}'"),
                        ident.line,
                        ident.column,
                        "UpdateExpression",
                    ),
                    Some(scope) => {
                        let mut const_violation = false;
                        if let Some(info) = self.scopes.symbol_mut(scope, name) {
                            if info.kind == SymbolKind::Const {
                                const_violation = true;
                            } else {
                                info.initialized = true;
                                info.assigned = true;
                            }
                        }
                        if const_violation {
                            self.error(
                                format!("Cannot update const variable '{name}'"),
                                ident.line,
                                ident.column,
                                "UpdateExpression",
                            );
                        }
                    }
                }
            }
            other => self.analyze_expr(other),
        }
    }

    fn analyze_call(&mut self, call: &CallExpr) {
        match &call.callee {
            Expr::Ident(ident) => {
                let name = ident.name;
                match self.scopes.resolve(self.current, name) {
                    None => self.error(
                        format!("'{name}' is not defined"),
                        ident.line,
                        ident.column,
                        "CallExpression",
                    ),
                    Some(scope) => {
                        let mut not_function = false;
                        let mut expected = None;
                        if let Some(info) = self.scopes.symbol_mut(scope, name) {
                            info.used = true;
                            not_function =
                                info.kind != SymbolKind::Function && !info.builtin;
                            if info.kind == SymbolKind::Function {
                                expected = info.params.as_ref().map(Vec::len);
                            }
                        }
                        if not_function {
                            self.warning(
                                format!("'{name}' is not a function"),
                                ident.line,
                                ident.column,
                                "CallExpression",
                            );
                        }
                        if let Some(expected) = expected {
                            let got = call.arguments.len();
                            if expected != got {
                                self.warning(
                                    format!(
                                        "Function '{name}' expects {expected} arguments, got {got}"
                                    ),
                                    ident.line,
                                    ident.column,
                                    "CallExpression",
                                );
                            }
                        }
                    }
                }
            }
            other => self.analyze_expr(other),
        }

        for argument in &call.arguments {
            self.analyze_expr(argument);
        }
    }

    fn analyze_member(&mut self, member: &MemberExpr) {
        self.analyze_expr(&member.object);

        if member.computed {
            self.analyze_expr(&member.property);
            return;
        }

        // property names are not identifier references, so they are not
        // resolved; the console heuristic inspects them directly
        if let (Expr::Ident(object), Expr::Ident(property)) = (&member.object, &member.property) {
            if object.name.as_str() == "console"
                && !matches!(
                    property.name.as_str(),
                    "log" | "warn" | "error" | "info" | "debug"
                )
            {
                self.warning(
                    format!("Unknown console method: '{}'", property.name),
                    property.line,
                    property.column,
                    "MemberExpression",
                );
            }
        }
    }

    fn analyze_object(&mut self, object: &ObjectExpr) {
        let mut seen: FxHashSet<Symbol> = FxHashSet::default();
        for property in &object.properties {
            if !seen.insert(property.key) {
                self.warning(
                    format!("Duplicate key '{}' in object literal", property.key),
                    property.line,
                    property.column,
                    "ObjectExpression",
                );
            }
            self.analyze_expr(&property.value);
        }
    }

    // ------------------------------------------------------------------
    // Heuristics
    // ------------------------------------------------------------------

    /// Dead-branch warnings for `if` and `?:` tests.
    fn branch_condition_warnings(&self, test: &Expr, node: &'static str) {
        let (line, column) = test.position();
        if always_truthy(test) {
            self.warning("Condition is always truthy".to_string(), line, column, node);
        } else if always_falsy(test) {
            self.warning("Condition is always falsy".to_string(), line, column, node);
        }
    }

    /// Literal class of an expression: a literal leaf, or a variable
    /// whose initializer was a literal. Anything else is unknown.
    fn expr_class(&self, expr: &Expr) -> Option<LitClass> {
        match expr {
            Expr::Literal(lit) => Some(LitClass::of(&lit.value)),
            Expr::Ident(ident) => {
                let scope = self.scopes.resolve(self.current, ident.name)?;
                self.scopes.symbol(scope, ident.name)?.lit_class
            }
            _ => None,
        }
    }

    /// `+` mixing a string with a number concatenates instead of adding.
    fn check_add_classes(
        &self,
        left: &Expr,
        right: &Expr,
        line: u32,
        column: u32,
        node: &'static str,
    ) {
        let classes = (self.expr_class(left), self.expr_class(right));
        if matches!(
            classes,
            (Some(LitClass::Str), Some(LitClass::Number))
                | (Some(LitClass::Number), Some(LitClass::Str))
        ) {
            self.warning(
                "Adding string and number might produce unexpected results".to_string(),
                line,
                column,
                node,
            );
        }
    }

    /// Numeric operators coerce string operands.
    fn check_numeric_classes(
        &self,
        left: &Expr,
        right: &Expr,
        line: u32,
        column: u32,
        node: &'static str,
    ) {
        if self.expr_class(left) == Some(LitClass::Str)
            || self.expr_class(right) == Some(LitClass::Str)
        {
            self.warning(
                "Numeric operation on a string might produce unexpected results".to_string(),
                line,
                column,
                node,
            );
        }
    }

    /// Relational comparison between different primitive classes coerces.
    fn check_comparison_classes(&self, left: &Expr, right: &Expr, line: u32, column: u32) {
        if let (Some(left_class), Some(right_class)) =
            (self.expr_class(left), self.expr_class(right))
        {
            if left_class != right_class {
                self.warning(
                    "Comparing values of different types might produce unexpected results"
                        .to_string(),
                    line,
                    column,
                    "BinaryExpression",
                );
            }
        }
    }

    // ------------------------------------------------------------------
    // Final pass
    // ------------------------------------------------------------------

    /// Walks the finished scope tree and reports bindings that were never
    /// read. Functions and builtins are exempt, as are bindings that were
    /// only ever assigned to.
    fn check_unused(&self) {
        let mut report = |_: ScopeId, scope: &Scope| {
            for (name, info) in &scope.bindings {
                if info.builtin || info.kind == SymbolKind::Function {
                    continue;
                }
                if !info.used && !info.assigned {
                    self.warning(
                        format!("Variable '{name}' is declared but never used"),
                        info.line,
                        info.column,
                        "Identifier",
                    );
                }
            }
        };
        self.scopes.walk(ScopeTree::GLOBAL, &mut report);
    }
}

/// True when the expression is statically truthy: a truthy literal (not
/// `0`, not `""`) or the bareword `true`.
pub fn always_truthy(expr: &Expr) -> bool {
    match expr {
        Expr::Literal(lit) => match &lit.value {
            LitValue::Bool(b) => *b,
            LitValue::Number(n) => *n != 0.0 && !n.is_nan(),
            LitValue::Str(s) => !s.is_empty(),
            LitValue::Null => false,
        },
        Expr::Ident(ident) => ident.name.as_str() == "true",
        _ => false,
    }
}

/// True when the expression is statically falsy: a falsy literal
/// (including `0` and `""`) or one of the barewords `false`, `undefined`,
/// `null`.
pub fn always_falsy(expr: &Expr) -> bool {
    match expr {
        Expr::Literal(lit) => match &lit.value {
            LitValue::Bool(b) => !*b,
            LitValue::Number(n) => *n == 0.0 || n.is_nan(),
            LitValue::Str(s) => s.is_empty(),
            LitValue::Null => true,
        },
        Expr::Ident(ident) => matches!(ident.name.as_str(), "false" | "undefined" | "null"),
        _ => false,
    }
}
