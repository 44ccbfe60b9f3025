//! Statement-level parsing tests
//!
//! Declarations, control flow, labels, and automatic semicolon
//! insertion.

use parser::node::{ForTarget, Statement, VariableKind};
use parser::{parse, EcmaVersion, Options, ParseError, Program, SourceType};

fn script(source: &str) -> Result<Program, ParseError> {
    parse(source, Options::default())
}

fn module(source: &str) -> Result<Program, ParseError> {
    let options = Options {
        source_type: SourceType::Module,
        ..Options::default()
    };
    parse(source, options)
}

fn script_err(source: &str) -> ParseError {
    script(source).unwrap_err()
}

#[test]
fn test_var_declarations() {
    let program = script("var a = 1, b, c = a;").unwrap();
    let Statement::VariableDeclaration { kind, declarations, .. } = &program.body[0] else {
        panic!("expected variable declaration");
    };
    assert_eq!(*kind, VariableKind::Var);
    assert_eq!(declarations.len(), 3);
    assert!(declarations[1].init.is_none());
}

#[test]
fn test_const_requires_initializer() {
    let err = script_err("const x;");
    assert_eq!(err.message, "Missing initializer in const declaration");
}

#[test]
fn test_destructuring_declaration_requires_initializer() {
    let err = script_err("var [a, b];");
    assert!(err.message.contains("require an initialization value"));
}

#[test]
fn test_let_is_an_identifier_when_no_binding_follows() {
    // Sloppy mode: `let` alone is a plain assignment target
    let program = script("let = 5;").unwrap();
    assert!(matches!(
        program.body[0],
        Statement::ExpressionStatement { .. }
    ));
    let program = script("let x = 5;").unwrap();
    assert!(matches!(
        program.body[0],
        Statement::VariableDeclaration { kind: VariableKind::Let, .. }
    ));
}

#[test]
fn test_let_binding_let_rejected() {
    let err = script_err("let let = 1;");
    assert!(err.message.contains("let is disallowed"));
}

#[test]
fn test_if_else_chain() {
    let program = script("if (a) b(); else if (c) d(); else e();").unwrap();
    assert!(matches!(program.body[0], Statement::IfStatement { .. }));
}

#[test]
fn test_do_while_optional_semicolon() {
    let program = script("do f(); while (x) g();").unwrap();
    assert_eq!(program.body.len(), 2);
}

#[test]
fn test_classic_for() {
    let program = script("for (var i = 0; i < 10; i++) f(i);").unwrap();
    let Statement::ForStatement { init, test, update, .. } = &program.body[0] else {
        panic!("expected for statement");
    };
    assert!(init.is_some());
    assert!(test.is_some());
    assert!(update.is_some());
    assert!(script("for (;;) break;").is_ok());
}

#[test]
fn test_for_in_and_for_of() {
    let program = script("for (const k in obj) f(k);").unwrap();
    assert!(matches!(program.body[0], Statement::ForInStatement { .. }));

    let program = script("for (let [a, b] of pairs) f(a, b);").unwrap();
    let Statement::ForOfStatement { left, is_await, .. } = &program.body[0] else {
        panic!("expected for-of");
    };
    assert!(matches!(left, ForTarget::VariableDeclaration { .. }));
    assert!(!is_await);
}

#[test]
fn test_for_of_expression_head() {
    let program = script("for ([a, b] of pairs) f();").unwrap();
    let Statement::ForOfStatement { left, .. } = &program.body[0] else {
        panic!("expected for-of");
    };
    assert!(matches!(left, ForTarget::Pattern(_)));
}

#[test]
fn test_for_in_initializer_legacy_only() {
    // Sloppy scripts keep the legacy `for (var x = 1 in y)` form
    assert!(script("for (var x = 1 in y) f();").is_ok());
    let err = script_err("for (let x = 1 in y) f();");
    assert!(err.message.contains("may not have an initializer"));
    let err = script_err("for (var x = 1 of y) f();");
    assert!(err.message.contains("may not have an initializer"));
    assert!(module("for (var x = 1 in y) f();").is_err());
}

#[test]
fn test_for_await_requires_async_context() {
    assert!(script("async function f() { for await (const x of xs) g(x); }").is_ok());
    assert!(script("function f() { for await (const x of xs) g(x); }").is_err());
    // for-await has no for-in form
    assert!(script("async function f() { for await (const x in xs) g(x); }").is_err());
}

#[test]
fn test_top_level_for_await_in_module() {
    assert!(module("for await (const x of xs) f(x);").is_ok());
    assert!(script("for await (const x of xs) f(x);").is_err());
}

#[test]
fn test_labeled_break_and_continue() {
    assert!(script("outer: for (;;) { for (;;) { break outer; } }").is_ok());
    assert!(script("outer: for (;;) { continue outer; }").is_ok());
    assert!(script("outer: while (a) { inner: while (b) continue inner; }").is_ok());
}

#[test]
fn test_unsyntactic_break_and_continue() {
    assert_eq!(script_err("break;").message, "Unsyntactic break");
    assert_eq!(script_err("continue;").message, "Unsyntactic continue");
    // A label on a non-loop statement is not a continue target
    assert_eq!(
        script_err("lab: { continue lab; }").message,
        "Unsyntactic continue"
    );
    assert!(script("lab: { break lab; }").is_ok());
    // Switch accepts break but never continue
    assert!(script("switch (x) { case 1: break; }").is_ok());
    assert_eq!(
        script_err("switch (x) { case 1: continue; }").message,
        "Unsyntactic continue"
    );
}

#[test]
fn test_duplicate_label() {
    let err = script_err("a: a: f();");
    assert_eq!(err.message, "Label 'a' is already declared");
}

#[test]
fn test_labels_do_not_cross_function_boundaries() {
    let err = script_err("lab: for (;;) { function f() { break lab; } }");
    assert_eq!(err.message, "Unsyntactic break");
}

#[test]
fn test_switch_single_default() {
    assert!(script("switch (x) { case 1: f(); default: g(); }").is_ok());
    let err = script_err("switch (x) { default: f(); default: g(); }");
    assert_eq!(err.message, "Multiple default clauses");
}

#[test]
fn test_try_requires_handler_or_finalizer() {
    assert!(script("try { f(); } catch (e) { g(e); }").is_ok());
    assert!(script("try { f(); } finally { g(); }").is_ok());
    let err = script_err("try { f(); }");
    assert_eq!(err.message, "Missing catch or finally clause");
}

#[test]
fn test_optional_catch_binding() {
    assert!(script("try { f(); } catch { g(); }").is_ok());
    let options = Options {
        ecma_version: EcmaVersion::Es2018,
        ..Options::default()
    };
    assert!(parse("try { f(); } catch { g(); }", options).is_err());
}

#[test]
fn test_throw_newline_restriction() {
    assert!(script("throw new Error('x');").is_ok());
    let err = script_err("throw\nnew Error('x');");
    assert_eq!(err.message, "Illegal newline after throw");
}

#[test]
fn test_return_outside_function() {
    assert_eq!(script_err("return 1;").message, "'return' outside of function");
    let options = Options {
        allow_return_outside_function: true,
        ..Options::default()
    };
    assert!(parse("return 1;", options).is_ok());
    assert!(script("function f() { return; }").is_ok());
}

#[test]
fn test_asi_splits_statements() {
    assert_eq!(script("x\ny").unwrap().body.len(), 2);
    assert_eq!(script("var a = 1\nvar b = 2").unwrap().body.len(), 2);
    // No newline, no semicolon: error
    assert!(script("var a = 1 var b = 2").is_err());
}

#[test]
fn test_asi_restricted_productions() {
    // `return\nx` returns undefined, leaving `x` a second statement
    let program = script("function f() { return\n1 }").unwrap();
    let Statement::FunctionDeclaration { body, .. } = &program.body[0] else {
        panic!("expected function");
    };
    assert_eq!(body.len(), 2);
    let Statement::ReturnStatement { argument, .. } = &body[0] else {
        panic!("expected return");
    };
    assert!(argument.is_none());
}

#[test]
fn test_directive_prologue() {
    let program = script("'use strict'; f();").unwrap();
    let Statement::ExpressionStatement { directive, .. } = &program.body[0] else {
        panic!("expected expression statement");
    };
    assert_eq!(directive.as_deref(), Some("use strict"));
    // The directive takes effect for the rest of the program
    assert!(script("'use strict'; with (a) {}").is_err());
}

#[test]
fn test_escaped_directive_does_not_trigger_strict() {
    // The raw text decides; an escape breaks the directive
    assert!(script("'use \\u0073trict'; with (a) {}").is_ok());
}

#[test]
fn test_function_in_strict_sub_statement_position() {
    // Annex B tolerates these in sloppy mode only
    assert!(script("if (x) function f() {}").is_ok());
    assert!(script("lab: function f() {}").is_ok());
    assert!(module("if (x) function f() {}").is_err());
    // Loop bodies never take declarations
    assert!(script("while (x) function f() {}").is_err());
    // Generators and async functions are excluded from the tolerance
    assert!(script("if (x) function* f() {}").is_err());
    assert!(script("if (x) async function f() {}").is_err());
}

#[test]
fn test_class_and_lexical_need_statement_list() {
    assert!(script("if (x) class A {}").is_err());
    assert!(script("if (x) let y = 1;").is_err());
}

#[test]
fn test_non_simple_params_reject_use_strict() {
    let err = script_err("function f(a = 1) { 'use strict'; }");
    assert!(err.message.contains("non-simple parameter list"));
    assert!(script("function f(a) { 'use strict'; }").is_ok());
}

#[test]
fn test_late_strict_directive_rechecks_params() {
    let err = script_err("function f(eval) { 'use strict'; }");
    assert!(err.message.contains("eval"));
    assert!(script("function f(eval) {}").is_ok());
}

#[test]
fn test_async_function_declaration() {
    let program = script("async function f() { await g(); }").unwrap();
    let Statement::FunctionDeclaration { is_async, .. } = &program.body[0] else {
        panic!("expected function");
    };
    assert!(*is_async);
    // `async` and the newline restriction
    assert_eq!(script("async\nfunction f() {}").unwrap().body.len(), 2);
}

#[test]
fn test_generator_declaration() {
    let program = script("function* g() { yield 1; }").unwrap();
    let Statement::FunctionDeclaration { is_generator, .. } = &program.body[0] else {
        panic!("expected function");
    };
    assert!(*is_generator);
}

#[test]
fn test_debugger_and_empty() {
    let program = script("debugger;; ;").unwrap();
    assert!(matches!(program.body[0], Statement::DebuggerStatement { .. }));
    assert!(matches!(program.body[1], Statement::EmptyStatement { .. }));
}

#[test]
fn test_block_statement_scoping() {
    assert!(script("{ let x = 1; } { let x = 2; }").is_ok());
    assert!(script("{ let x = 1; let x = 2; }").is_err());
}
