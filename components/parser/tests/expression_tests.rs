//! Expression parsing tests
//!
//! Operator precedence, arrow detection, destructuring ambiguity, and
//! the context-sensitive operators.

use parser::node::{BinaryOperator, Expression, Statement};
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

fn expr(source: &str) -> Expression {
    let program = script(source).unwrap();
    match program.body.into_iter().next() {
        Some(Statement::ExpressionStatement { expression, .. }) => expression,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

#[test]
fn test_multiplicative_binds_tighter() {
    let Expression::BinaryExpression { operator, right, .. } = expr("1 + 2 * 3") else {
        panic!("expected binary expression");
    };
    assert_eq!(operator, BinaryOperator::Add);
    assert!(matches!(
        *right,
        Expression::BinaryExpression { operator: BinaryOperator::Mul, .. }
    ));
}

#[test]
fn test_left_associativity() {
    // (1 - 2) - 3
    let Expression::BinaryExpression { left, .. } = expr("1 - 2 - 3") else {
        panic!("expected binary expression");
    };
    assert!(matches!(*left, Expression::BinaryExpression { .. }));
}

#[test]
fn test_exponent_right_associative() {
    // 2 ** (3 ** 4)
    let Expression::BinaryExpression { operator, right, .. } = expr("2 ** 3 ** 4") else {
        panic!("expected binary expression");
    };
    assert_eq!(operator, BinaryOperator::Exp);
    assert!(matches!(
        *right,
        Expression::BinaryExpression { operator: BinaryOperator::Exp, .. }
    ));
}

#[test]
fn test_unary_before_exponent_rejected() {
    let err = script_err("-a ** b");
    assert!(err.message.contains("exponentiation"));
    assert!(script("(-a) ** b").is_ok());
    // Update expressions are exempt
    assert!(script("a++ ** b").is_ok());
}

#[test]
fn test_coalesce_mixing() {
    assert!(script("a ?? b ?? c").is_ok());
    let err = script_err("a ?? b || c");
    assert!(err.message.contains("cannot be mixed"));
    let err = script_err("a && b ?? c");
    assert!(err.message.contains("cannot be mixed"));
    assert!(script("(a && b) ?? c").is_ok());
}

#[test]
fn test_in_operator_excluded_from_for_init() {
    // `in` must not terminate the head early
    assert!(script("for (a = b in c ? 1 : 2;;);").is_err());
    assert!(script("if (a in b) f();").is_ok());
}

#[test]
fn test_conditional_and_sequence() {
    assert!(matches!(expr("a ? b : c"), Expression::ConditionalExpression { .. }));
    let Expression::SequenceExpression { expressions, .. } = expr("a, b, c") else {
        panic!("expected sequence");
    };
    assert_eq!(expressions.len(), 3);
}

#[test]
fn test_assignment_operators() {
    assert!(script("a = b").is_ok());
    assert!(script("a += b").is_ok());
    assert!(script("a **= b").is_ok());
    assert!(script("a ||= b").is_ok());
    assert!(script("a &&= b").is_ok());
    assert!(script("a ??= b").is_ok());
    let options = Options {
        ecma_version: EcmaVersion::Es2020,
        ..Options::default()
    };
    assert!(parse("a ||= b", options).is_err());
}

#[test]
fn test_assigning_to_rvalue() {
    assert_eq!(script_err("1 = 2").message, "Assigning to rvalue");
    assert_eq!(script_err("a + b = c").message, "Assigning to rvalue");
    assert_eq!(script_err("a++ = b").message, "Assigning to rvalue");
}

#[test]
fn test_arrow_functions() {
    assert!(matches!(expr("a => a"), Expression::ArrowFunctionExpression { .. }));
    assert!(matches!(expr("() => 1"), Expression::ArrowFunctionExpression { .. }));
    assert!(matches!(
        expr("(a, b) => a + b"),
        Expression::ArrowFunctionExpression { .. }
    ));
    assert!(matches!(
        expr("(a, ...rest) => rest"),
        Expression::ArrowFunctionExpression { .. }
    ));
    assert!(matches!(
        expr("({a}, [b]) => a + b"),
        Expression::ArrowFunctionExpression { .. }
    ));
}

#[test]
fn test_arrow_only_at_expression_start() {
    // `b => c` after an operator is not an arrow parameter list
    assert!(script("a + b => c").is_err());
    assert!(script("a + (b => c)").is_ok());
}

#[test]
fn test_arrow_newline_restriction() {
    assert!(script("a\n=> a").is_err());
}

#[test]
fn test_async_arrows_and_calls() {
    let Expression::ArrowFunctionExpression { is_async, .. } = expr("async a => a") else {
        panic!("expected arrow");
    };
    assert!(is_async);
    assert!(matches!(
        expr("async (a, b) => a"),
        Expression::ArrowFunctionExpression { .. }
    ));
    // Without the arrow it is a plain call of a function named async
    assert!(matches!(expr("async(a, b)"), Expression::CallExpression { .. }));
    // A newline keeps `async` an identifier
    assert!(script("async\n(a) => a").is_err());
}

#[test]
fn test_spread_in_plain_parens_rejected() {
    let err = script_err("(...a)");
    assert!(err.message.contains("Unexpected token"));
    assert!(script("(...a) => a").is_ok());
    assert!(script("f(...a)").is_ok());
}

#[test]
fn test_empty_parens_need_arrow() {
    assert!(script("()").is_err());
    assert!(script("() => 0").is_ok());
}

#[test]
fn test_destructuring_assignment() {
    assert!(script("[a, b] = c").is_ok());
    assert!(script("({a, b: {c}} = d)").is_ok());
    assert!(script("[a = 1, [b]] = c").is_ok());
    assert!(script("[a, ...b] = c").is_ok());
}

#[test]
fn test_rest_must_be_last() {
    let err = script_err("[...a, b] = c");
    assert_eq!(err.message, "Rest element must be last element");
    let err = script_err("function f(...a, b) {}");
    assert!(
        err.message.contains("Comma is not permitted after the rest element")
            || err.message.contains("Rest element must be last element")
    );
}

#[test]
fn test_shorthand_default_only_in_patterns() {
    let err = script_err("({a = 1})");
    assert!(err.message.contains("only in destructuring patterns"));
    assert!(script("({a = 1} = b)").is_ok());
}

#[test]
fn test_parenthesized_pattern_rejected() {
    assert_eq!(script_err("({a}) = b").message, "Parenthesized pattern");
    // A parenthesized simple reference stays assignable
    assert!(script("(a) = b").is_ok());
}

#[test]
fn test_double_proto() {
    let err = script_err("({__proto__: 1, __proto__: 2})");
    assert_eq!(err.message, "Redefinition of __proto__ property");
    // Fine as a pattern, and fine when a key is computed or shorthand
    assert!(script("({__proto__: a, __proto__: b} = c)").is_ok());
    assert!(script("({['__proto__']: 1, __proto__: 2})").is_ok());
    assert!(script("({__proto__, __proto__: 2})").is_ok());
}

#[test]
fn test_object_literal_methods() {
    assert!(script("x = {m() {}, get p() { return 1; }, set p(v) {}}").is_ok());
    assert!(script("x = {*gen() { yield 1; }}").is_ok());
    assert!(script("x = {async m() { await p; }}").is_ok());
    assert!(script("x = {async *m() { await p; yield 1; }}").is_ok());
    assert!(script("x = {['computed']: 1, 'str': 2, 42: 3}").is_ok());
    // `async` and `get` remain ordinary property names
    assert!(script("x = {async: 1, get: 2, set: 3}").is_ok());
    assert!(script("x = {async, get}").is_ok());
}

#[test]
fn test_accessor_arity() {
    assert_eq!(
        script_err("x = {get p(a) {}}").message,
        "getter should have no params"
    );
    assert_eq!(
        script_err("x = {set p() {}}").message,
        "setter should have exactly one param"
    );
    assert_eq!(
        script_err("x = {set p(...v) {}}").message,
        "Setter cannot use rest params"
    );
}

#[test]
fn test_yield_in_generators() {
    assert!(script("function* g() { yield; yield 1; yield* inner(); }").is_ok());
    // Newline after yield ends the expression; `* x` cannot follow
    assert!(script("function* g() { yield\n* x; }").is_err());
    // Outside generators `yield` is an identifier in sloppy mode
    assert!(script("var yield = 1;").is_ok());
    assert!(script("function* g() { var yield = 1; }").is_err());
    assert!(module("var yield = 1;").is_err());
}

#[test]
fn test_await_contexts() {
    assert!(script("async function f() { await p; }").is_ok());
    // Sloppy non-async scope: `await` is an identifier
    assert!(script("var await = 1;").is_ok());
    assert!(script("async function f() { var await = 1; }").is_err());
    assert!(module("var await = 1;").is_err());
    // Module top level awaits
    assert!(module("await p;").is_ok());
    assert!(script("await p;").is_err());
}

#[test]
fn test_optional_chaining() {
    assert!(script("a?.b").is_ok());
    assert!(script("a?.[b]").is_ok());
    assert!(script("a?.(b)").is_ok());
    assert!(script("a?.b.c(d)?.[e]").is_ok());
    let err = script_err("new a?.b()");
    assert!(err.message.contains("callee of new"));
    let err = script_err("a?.b`t`");
    assert!(err.message.contains("tag of tagged template"));
    let options = Options {
        ecma_version: EcmaVersion::Es2019,
        ..Options::default()
    };
    assert!(parse("a?.b", options).is_err());
}

#[test]
fn test_templates() {
    assert!(matches!(expr("`plain`"), Expression::TemplateLiteral { .. }));
    let Expression::TemplateLiteral { quasis, expressions, .. } = expr("`a${b}c${d}e`") else {
        panic!("expected template");
    };
    assert_eq!(quasis.len(), 3);
    assert_eq!(expressions.len(), 2);
    assert!(matches!(
        expr("tag`a${b}`"),
        Expression::TaggedTemplateExpression { .. }
    ));
}

#[test]
fn test_template_invalid_escape() {
    let err = script_err("`\\unicode`");
    assert!(
        err.message.contains("escape") || err.message.contains("Invalid"),
        "{}",
        err.message
    );
    // Tagged templates tolerate it; the cooked value is absent
    assert!(script("tag`\\unicode`").is_ok());
}

#[test]
fn test_new_expressions() {
    assert!(matches!(expr("new X"), Expression::NewExpression { .. }));
    assert!(script("new X(1, 2)").is_ok());
    // `new a.b()` calls the member; `new (a())` parenthesizes
    assert!(script("new a.b(c)").is_ok());
    assert!(script("new (a())(b)").is_ok());
    assert!(script("new new X()()").is_ok());
}

#[test]
fn test_new_target() {
    assert!(script("function f() { return new.target; }").is_ok());
    assert!(script("new.target").is_err());
    let err = script_err("function f() { new.other; }");
    assert!(err.message.contains("new.target"));
}

#[test]
fn test_dynamic_import() {
    assert!(script("import('mod')").is_ok());
    assert_eq!(
        script_err("import('mod',)").message,
        "Trailing comma is not allowed in import()"
    );
    assert!(script("import()").is_err());
    let err = script_err("new import('mod')");
    assert_eq!(err.message, "Cannot use new with import()");
}

#[test]
fn test_import_meta() {
    assert!(module("import.meta.url").is_ok());
    let err = script_err("import.meta");
    assert_eq!(err.message, "Cannot use 'import.meta' outside a module");
    let err = module("import.other").unwrap_err();
    assert!(err.message.contains("import.meta"));
}

#[test]
fn test_delete_restrictions() {
    assert!(script("delete a.b").is_ok());
    assert!(script("delete x").is_ok());
    assert_eq!(
        script_err("'use strict'; delete x").message,
        "Deleting local variable in strict mode"
    );
    let err = script_err("class A { #x; m() { delete this.#x; } }");
    assert_eq!(err.message, "Private fields can not be deleted");
}

#[test]
fn test_update_expression_targets() {
    assert!(script("a++").is_ok());
    assert!(script("++a.b").is_ok());
    assert!(script_err("1++").message.contains("Assigning to rvalue"));
    assert!(script_err("++1").message.contains("Assigning to rvalue"));
}

#[test]
fn test_literals() {
    assert!(matches!(expr("42"), Expression::Literal { .. }));
    assert!(matches!(expr("0x1f"), Expression::Literal { .. }));
    assert!(matches!(expr("'str'"), Expression::Literal { .. }));
    assert!(matches!(expr("null"), Expression::Literal { .. }));
    assert!(matches!(expr("true"), Expression::Literal { .. }));
    assert!(matches!(expr("/re/gi"), Expression::Literal { .. }));
}

#[test]
fn test_bigint_gated() {
    assert!(script("123n").is_ok());
    let options = Options {
        ecma_version: EcmaVersion::Es2019,
        ..Options::default()
    };
    assert!(parse("123n", options).is_err());
}

#[test]
fn test_reserved_words_as_identifiers() {
    assert!(script("var x = class;").is_err());
    let err = script_err("var class = 1;");
    assert!(err.message.contains("Unexpected"));
    assert!(script_err("var enum = 1;").message.contains("reserved"));
    assert!(script("'use strict'; var public = 1;").is_err());
    assert!(script("var public = 1;").is_ok());
}

#[test]
fn test_node_spans_nest() {
    let Expression::BinaryExpression { left, right, span, .. } = expr("a + b * c") else {
        panic!("expected binary expression");
    };
    assert!(span.contains(&left.span()));
    assert!(span.contains(&right.span()));
    assert_eq!(span.start.offset, 0);
    assert_eq!(span.end.offset, 9);
}

#[test]
fn test_preserve_parens() {
    let options = Options {
        preserve_parens: true,
        ..Options::default()
    };
    let program = parse("(a);", options).unwrap();
    let Statement::ExpressionStatement { expression, .. } = &program.body[0] else {
        panic!("expected expression statement");
    };
    assert!(matches!(expression, Expression::ParenthesizedExpression { .. }));
    assert!(!matches!(expr("(a)"), Expression::ParenthesizedExpression { .. }));
}

#[test]
fn test_allow_reserved() {
    use parser::AllowReserved;
    let options = Options {
        allow_reserved: AllowReserved::Yes,
        ..Options::default()
    };
    assert!(parse("var enum = 1;", options).is_ok());
    let options = Options {
        allow_reserved: AllowReserved::Never,
        ..Options::default()
    };
    // The strict reserved set applies even in sloppy mode
    assert!(parse("var package = 1;", options).is_err());
}

#[test]
fn test_keyword_property_access() {
    // Keywords are fine after a dot and as property keys
    assert!(script("a.delete").is_ok());
    assert!(script("a.if.else").is_ok());
    assert!(script("x = {if: 1, class: 2}").is_ok());
}
