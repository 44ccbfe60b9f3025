//! Class body parsing tests
//!
//! Methods, accessors, fields, private names, and constructor rules.

use parser::{parse, EcmaVersion, Options, ParseError, Program};

fn script(source: &str) -> Result<Program, ParseError> {
    parse(source, Options::default())
}

fn script_err(source: &str) -> ParseError {
    script(source).unwrap_err()
}

#[test]
fn test_basic_class() {
    assert!(script("class A { m() { return 1; } }").is_ok());
    assert!(script("class A extends B { m() {} }").is_ok());
    assert!(script("x = class { m() {} };").is_ok());
    assert!(script("x = class Named { m() { return Named; } };").is_ok());
    // Semicolons between members are tolerated
    assert!(script("class A { ; m() {} ; }").is_ok());
}

#[test]
fn test_class_bodies_are_strict() {
    let err = script_err("class A { m() { with (a) {} } }");
    assert_eq!(err.message, "'with' in strict mode");
    // Strictness ends with the class
    assert!(script("class A {} with (a) {}").is_ok());
}

#[test]
fn test_constructor_rules() {
    assert!(script("class A { constructor() {} }").is_ok());
    assert_eq!(
        script_err("class A { constructor() {} constructor() {} }").message,
        "Duplicate constructor in the same class"
    );
    assert_eq!(
        script_err("class A { get constructor() {} }").message,
        "Constructor can't have get/set modifier"
    );
    assert_eq!(
        script_err("class A { *constructor() {} }").message,
        "Constructor can't be a generator"
    );
    assert_eq!(
        script_err("class A { async constructor() {} }").message,
        "Constructor can't be an async method"
    );
    // A string key still counts; a computed or static one does not
    assert!(script("class A { constructor() {} 'constructor'() {} }").is_err());
    assert!(script("class A { constructor() {} ['constructor']() {} }").is_ok());
    assert!(script("class A { constructor() {} static constructor() {} }").is_ok());
}

#[test]
fn test_super_rules() {
    assert!(script("class A extends B { constructor() { super(); } }").is_ok());
    assert!(script("class A extends B { m() { return super.m(); } }").is_ok());
    let err = script_err("class A { constructor() { super(); } }");
    assert_eq!(err.message, "super() call outside constructor of a subclass");
    let err = script_err("function f() { super.x; }");
    assert_eq!(err.message, "'super' keyword outside a method");
}

#[test]
fn test_static_members() {
    assert!(script("class A { static m() {} static get p() { return 1; } }").is_ok());
    assert_eq!(
        script_err("class A { static prototype() {} }").message,
        "Classes may not have a static property named prototype"
    );
    // `static` alone is a method name when followed by parens
    assert!(script("class A { static() {} }").is_ok());
}

#[test]
fn test_class_fields() {
    assert!(script("class A { x; y = 1; static z = 2; ['w'] = 3; }").is_ok());
    assert_eq!(
        script_err("class A { constructor = 1; }").message,
        "Classes can't have a field named 'constructor'"
    );
    let options = Options {
        ecma_version: EcmaVersion::Es2021,
        ..Options::default()
    };
    assert!(parse("class A { x = 1; }", options).is_err());
}

#[test]
fn test_field_initializer_scope() {
    // `this` and `new.target` work in initializers; `arguments` scoping
    // aside, await/yield revert to identifiers
    assert!(script("class A { x = this.y; }").is_ok());
    assert!(script("function* g() { class A { x = yield; } }").is_err());
}

#[test]
fn test_private_names() {
    assert!(script("class A { #x = 1; m() { return this.#x; } }").is_ok());
    assert!(script("class A { #m() {} n() { this.#m(); } }").is_ok());
    assert!(script("class A { static #x; static m() { return A.#x; } }").is_ok());
}

#[test]
fn test_private_name_must_be_declared() {
    let err = script_err("class A { m() { return this.#x; } }");
    assert_eq!(
        err.message,
        "Private field '#x' must be declared in an enclosing class"
    );
    // Inner classes see outer declarations
    assert!(
        script("class A { #x; m() { return class { n() { return this.#x; } }; } }").is_ok()
    );
    let err = script_err("this.#x");
    assert!(err.message.contains("#x"));
}

#[test]
fn test_duplicate_private_names() {
    let err = script_err("class A { #x; #x; }");
    assert_eq!(err.message, "Identifier '#x' has already been declared");
    // A getter and setter may share a name when both are instance or
    // both static
    assert!(script("class A { get #p() { return 1; } set #p(v) {} }").is_ok());
    assert!(script("class A { static get #p() { return 1; } static set #p(v) {} }").is_ok());
    assert!(script("class A { get #p() { return 1; } static set #p(v) {} }").is_err());
    assert!(script("class A { get #p() {} get #p() {} }").is_err());
}

#[test]
fn test_private_constructor_name() {
    assert_eq!(
        script_err("class A { #constructor() {} }").message,
        "Classes can't have an element named '#constructor'"
    );
}

#[test]
fn test_private_brand_check() {
    assert!(script("class A { #x; m(o) { return #x in o; } }").is_ok());
    let err = script_err("class A { m(o) { return #x in o; } }");
    assert!(err.message.contains("#x"));
}

#[test]
fn test_accessor_arity_in_classes() {
    assert_eq!(
        script_err("class A { get p(a) {} }").message,
        "getter should have no params"
    );
    assert_eq!(
        script_err("class A { set p() {} }").message,
        "setter should have exactly one param"
    );
}

#[test]
fn test_generator_and_async_methods() {
    assert!(script("class A { *gen() { yield 1; } }").is_ok());
    assert!(script("class A { async m() { await p; } }").is_ok());
    assert!(script("class A { async *m() { yield await p; } }").is_ok());
    assert!(script("class A { static async m() {} }").is_ok());
}

#[test]
fn test_keyword_method_names() {
    assert!(script("class A { delete() {} if() {} static() {} get() {} }").is_ok());
    assert!(script("class A { get get() { return 1; } }").is_ok());
}

#[test]
fn test_class_name_binding() {
    assert!(script("class A {} class A {}").is_err());
    assert!(script("var A; class A {}").is_err());
    // Expression names bind only inside the class
    assert!(script("x = class A {}; x = class A {};").is_ok());
}

#[test]
fn test_heritage_is_subscript_expression() {
    assert!(script("class A extends b.c.d { }").is_ok());
    assert!(script("class A extends f() { }").is_ok());
    assert!(script("class A extends (b || c) { }").is_ok());
    // Bare operator expressions need parentheses
    assert!(script("class A extends b || c { }").is_err());
}
