//! Scope and redeclaration tests
//!
//! The var/lexical clash matrix, the simple-catch carve-out, and
//! parameter name checks.

use parser::{parse, Options, ParseError, Program, SourceType};

fn script(source: &str) -> Result<Program, ParseError> {
    parse(source, Options::default())
}

fn script_err(source: &str) -> ParseError {
    script(source).unwrap_err()
}

#[test]
fn test_redeclaration_matrix() {
    assert!(script("var x; var x;").is_ok());
    assert!(script("let x; let x;").is_err());
    assert!(script("let x; var x;").is_err());
    assert!(script("var x; let x;").is_err());
    assert!(script("const x = 1; const x = 2;").is_err());
    let err = script_err("let x; let x;");
    assert_eq!(err.message, "Identifier 'x' has already been declared");
}

#[test]
fn test_var_hoists_through_blocks() {
    // The inner var reaches the function scope where `let x` lives
    assert!(script("let x; { var x; }").is_err());
    assert!(script("let x; { let x; }").is_ok());
    assert!(script("function f() { let x; { var x; } }").is_err());
    assert!(script("let x; function f() { var x; }").is_ok());
}

#[test]
fn test_function_declarations_at_top_level() {
    // Sloppy top level: function declarations behave like var
    assert!(script("function f() {} function f() {}").is_ok());
    assert!(script("function f() {} var f;").is_ok());
    assert!(script("let f; function f() {}").is_err());
    assert!(script("function f() {} let f;").is_err());
}

#[test]
fn test_block_function_declarations_are_lexical() {
    assert!(script("{ let f; function f() {} }").is_err());
    // But they do not clash with an outer var
    assert!(script("var f; { function f() {} }").is_ok());
}

#[test]
fn test_generators_and_async_bind_lexically() {
    assert!(script("function* f() {} var f;").is_err());
    assert!(script("async function f() {} var f;").is_err());
}

#[test]
fn test_simple_catch_carve_out() {
    assert!(script("try {} catch (e) { var e; }").is_ok());
    assert!(script("try {} catch (e) { let e; }").is_err());
    // A destructured catch parameter is fully lexical
    assert!(script("try {} catch ([e]) { var e; }").is_err());
    assert!(script("try {} catch (e) {} var e;").is_ok());
}

#[test]
fn test_parameter_name_clashes() {
    assert!(script("function f(a, a) {}").is_ok());
    assert_eq!(
        script_err("'use strict'; function f(a, a) {}").message,
        "Argument name clash"
    );
    // Non-simple parameter lists require uniqueness everywhere
    assert!(script("function f(a, [a]) {}").is_err());
    assert!(script("function f(a, a = 1) {}").is_err());
    // Arrows and methods always require uniqueness
    assert!(script("(a, a) => a").is_err());
    assert!(script("x = {m(a, a) {}}").is_err());
    assert!(script("class C { m(a, a) {} }").is_err());
}

#[test]
fn test_params_share_scope_with_lexical_body() {
    assert!(script("function f(a) { let a; }").is_err());
    assert!(script("function f(a) { var a; }").is_ok());
}

#[test]
fn test_function_expression_name_is_local() {
    assert!(script("x = function f() {}; x = function f() {};").is_ok());
}

#[test]
fn test_loop_head_scoping() {
    assert!(script("for (let i = 0; i < 2; i++) {} for (let i = 0; i < 2; i++) {}").is_ok());
    assert!(script("for (let i;;) { let i; }").is_ok());
    assert!(script("for (let i, i;;);").is_err());
}

#[test]
fn test_eval_and_arguments_restricted_in_strict() {
    assert!(script("var eval = 1;").is_ok());
    assert!(script("'use strict'; var eval = 1;").is_err());
    assert!(script("'use strict'; var arguments = 1;").is_err());
    assert!(script("'use strict'; eval = 1;").is_err());
    assert!(script("'use strict'; f(eval);").is_ok());
}

#[test]
fn test_module_top_level_is_lexical_for_functions() {
    let options = Options {
        source_type: SourceType::Module,
        ..Options::default()
    };
    assert!(parse("function f() {} function f() {}", options).is_err());
}
