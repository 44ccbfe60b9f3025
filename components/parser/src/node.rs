//! Syntax tree node definitions.
//!
//! Nodes are tagged unions in the style of an ESTree-shaped AST: each
//! variant exclusively owns its children, there is no aliasing and no
//! cycles, and a node is immutable once its end position has been fixed.
//!
//! Every node carries a [`Span`]. Offsets are always meaningful; line and
//! column fields are populated only when position tracking is enabled in
//! the parse options.

use serde::Serialize;
use syntax_core::Span;

use crate::options::SourceType;

/// A complete parsed program.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    /// Top-level statements
    pub body: Vec<Statement>,
    /// Script or module
    pub source_type: SourceType,
    /// Source range (end is fixed after trailing whitespace is skipped)
    pub span: Span,
}

/// Variable declaration kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VariableKind {
    /// `var` - function-scoped
    Var,
    /// `let` - block-scoped
    Let,
    /// `const` - block-scoped, requires initializer
    Const,
}

impl VariableKind {
    /// Source keyword for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Var => "var",
            VariableKind::Let => "let",
            VariableKind::Const => "const",
        }
    }
}

/// JavaScript statements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Statement {
    /// Variable declaration (var, let, const)
    VariableDeclaration {
        /// Declaration kind
        kind: VariableKind,
        /// Declarators
        declarations: Vec<VariableDeclarator>,
        /// Source range
        span: Span,
    },

    /// Function declaration
    FunctionDeclaration {
        /// Function name
        name: String,
        /// Parameter patterns
        params: Vec<Pattern>,
        /// Body statements
        body: Vec<Statement>,
        /// Is async function
        is_async: bool,
        /// Is generator function
        is_generator: bool,
        /// Source range
        span: Span,
    },

    /// Class declaration
    ClassDeclaration {
        /// Class name (empty only for `export default class {}`)
        name: Option<String>,
        /// Superclass expression
        super_class: Option<Box<Expression>>,
        /// Class body elements
        body: Vec<ClassElement>,
        /// Source range
        span: Span,
    },

    /// Expression statement
    ExpressionStatement {
        /// The expression
        expression: Expression,
        /// True when this statement is a directive prologue entry
        directive: Option<String>,
        /// Source range
        span: Span,
    },

    /// Block statement
    BlockStatement {
        /// Statements in the block
        body: Vec<Statement>,
        /// Source range
        span: Span,
    },

    /// Empty statement (a lone `;`)
    EmptyStatement {
        /// Source range
        span: Span,
    },

    /// If statement
    IfStatement {
        /// Condition
        test: Expression,
        /// Then branch
        consequent: Box<Statement>,
        /// Else branch
        alternate: Option<Box<Statement>>,
        /// Source range
        span: Span,
    },

    /// Return statement
    ReturnStatement {
        /// Returned value
        argument: Option<Expression>,
        /// Source range
        span: Span,
    },

    /// While loop
    WhileStatement {
        /// Condition
        test: Expression,
        /// Body
        body: Box<Statement>,
        /// Source range
        span: Span,
    },

    /// Do-while loop
    DoWhileStatement {
        /// Body
        body: Box<Statement>,
        /// Condition
        test: Expression,
        /// Source range
        span: Span,
    },

    /// C-style for loop
    ForStatement {
        /// Initializer
        init: Option<ForInit>,
        /// Condition
        test: Option<Expression>,
        /// Update expression
        update: Option<Expression>,
        /// Body
        body: Box<Statement>,
        /// Source range
        span: Span,
    },

    /// For-in loop
    ForInStatement {
        /// Loop target
        left: ForTarget,
        /// Object whose keys are enumerated
        right: Expression,
        /// Body
        body: Box<Statement>,
        /// Source range
        span: Span,
    },

    /// For-of loop
    ForOfStatement {
        /// Loop target
        left: ForTarget,
        /// Iterated expression
        right: Expression,
        /// Body
        body: Box<Statement>,
        /// `for await (... of ...)`
        is_await: bool,
        /// Source range
        span: Span,
    },

    /// Break statement
    BreakStatement {
        /// Optional label
        label: Option<String>,
        /// Source range
        span: Span,
    },

    /// Continue statement
    ContinueStatement {
        /// Optional label
        label: Option<String>,
        /// Source range
        span: Span,
    },

    /// Labeled statement
    LabeledStatement {
        /// Label name
        label: String,
        /// Labeled body
        body: Box<Statement>,
        /// Source range
        span: Span,
    },

    /// Throw statement
    ThrowStatement {
        /// Thrown value
        argument: Expression,
        /// Source range
        span: Span,
    },

    /// Try statement; at least one of handler/finalizer is present
    TryStatement {
        /// Try block
        block: Vec<Statement>,
        /// Catch clause
        handler: Option<CatchClause>,
        /// Finally block
        finalizer: Option<Vec<Statement>>,
        /// Source range
        span: Span,
    },

    /// Switch statement
    SwitchStatement {
        /// Discriminant
        discriminant: Expression,
        /// Case clauses
        cases: Vec<SwitchCase>,
        /// Source range
        span: Span,
    },

    /// With statement (non-strict only)
    WithStatement {
        /// Scope object
        object: Expression,
        /// Body
        body: Box<Statement>,
        /// Source range
        span: Span,
    },

    /// Debugger statement
    DebuggerStatement {
        /// Source range
        span: Span,
    },

    /// Import declaration (modules only)
    ImportDeclaration {
        /// Import specifiers
        specifiers: Vec<ImportSpecifier>,
        /// Module source string
        source: String,
        /// Source range
        span: Span,
    },

    /// `export { ... }` / `export <decl>` / `export { ... } from "..."`
    ExportNamedDeclaration {
        /// Exported declaration, if this exports one directly
        declaration: Option<Box<Statement>>,
        /// Export specifiers
        specifiers: Vec<ExportSpecifier>,
        /// Re-export source
        source: Option<String>,
        /// Source range
        span: Span,
    },

    /// `export default <expr|decl>`
    ExportDefaultDeclaration {
        /// The exported value
        declaration: ExportDefault,
        /// Source range
        span: Span,
    },

    /// `export * from "..."` / `export * as name from "..."`
    ExportAllDeclaration {
        /// Optional namespace alias
        exported: Option<String>,
        /// Re-export source
        source: String,
        /// Source range
        span: Span,
    },
}

impl Statement {
    /// The statement's source range.
    pub fn span(&self) -> Span {
        match self {
            Statement::VariableDeclaration { span, .. }
            | Statement::FunctionDeclaration { span, .. }
            | Statement::ClassDeclaration { span, .. }
            | Statement::ExpressionStatement { span, .. }
            | Statement::BlockStatement { span, .. }
            | Statement::EmptyStatement { span }
            | Statement::IfStatement { span, .. }
            | Statement::ReturnStatement { span, .. }
            | Statement::WhileStatement { span, .. }
            | Statement::DoWhileStatement { span, .. }
            | Statement::ForStatement { span, .. }
            | Statement::ForInStatement { span, .. }
            | Statement::ForOfStatement { span, .. }
            | Statement::BreakStatement { span, .. }
            | Statement::ContinueStatement { span, .. }
            | Statement::LabeledStatement { span, .. }
            | Statement::ThrowStatement { span, .. }
            | Statement::TryStatement { span, .. }
            | Statement::SwitchStatement { span, .. }
            | Statement::WithStatement { span, .. }
            | Statement::DebuggerStatement { span }
            | Statement::ImportDeclaration { span, .. }
            | Statement::ExportNamedDeclaration { span, .. }
            | Statement::ExportDefaultDeclaration { span, .. }
            | Statement::ExportAllDeclaration { span, .. } => *span,
        }
    }
}

/// A single declarator in a variable declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclarator {
    /// Binding pattern
    pub id: Pattern,
    /// Initializer
    pub init: Option<Expression>,
    /// Source range
    pub span: Span,
}

/// Initializer position of a C-style for loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ForInit {
    /// `for (let x = ...;;)`
    VariableDeclaration {
        /// Declaration kind
        kind: VariableKind,
        /// Declarators
        declarations: Vec<VariableDeclarator>,
        /// Source range
        span: Span,
    },
    /// `for (x = ...;;)`
    Expression(Expression),
}

/// Target of a for-in/for-of loop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ForTarget {
    /// Fresh declaration: exactly one declarator, no initializer
    VariableDeclaration {
        /// Declaration kind
        kind: VariableKind,
        /// Binding pattern
        id: Pattern,
        /// Source range
        span: Span,
    },
    /// Assignment to an existing target
    Pattern(Pattern),
}

/// Catch clause of a try statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatchClause {
    /// Catch parameter; `None` for an optional catch binding
    pub param: Option<Pattern>,
    /// Handler body
    pub body: Vec<Statement>,
    /// Source range
    pub span: Span,
}

/// One case clause of a switch statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchCase {
    /// Test expression; `None` for `default:`
    pub test: Option<Expression>,
    /// Statements run for this case
    pub consequent: Vec<Statement>,
    /// Source range
    pub span: Span,
}

/// Import specifier forms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ImportSpecifier {
    /// `import name from "..."`
    Default {
        /// Local binding name
        local: String,
        /// Source range
        span: Span,
    },
    /// `import * as name from "..."`
    Namespace {
        /// Local binding name
        local: String,
        /// Source range
        span: Span,
    },
    /// `import { imported as local } from "..."`
    Named {
        /// Name in the source module
        imported: String,
        /// Local binding name
        local: String,
        /// Source range
        span: Span,
    },
}

/// One entry of an `export { ... }` clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportSpecifier {
    /// Local name being exported
    pub local: String,
    /// Exported name
    pub exported: String,
    /// Source range
    pub span: Span,
}

/// Value position of `export default`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExportDefault {
    /// A (possibly nameless) function declaration
    Function(Box<Statement>),
    /// A (possibly nameless) class declaration
    Class(Box<Statement>),
    /// Any other expression
    Expression(Expression),
}

/// JavaScript expressions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expression {
    /// Identifier reference
    Identifier {
        /// Name
        name: String,
        /// Source range
        span: Span,
    },

    /// Private name reference (`#x in obj`, `this.#x`)
    PrivateName {
        /// Name without the `#`
        name: String,
        /// Source range
        span: Span,
    },

    /// Literal value
    Literal {
        /// Decoded value
        value: Literal,
        /// Source range
        span: Span,
    },

    /// Template literal
    TemplateLiteral {
        /// Text chunks; always one more than `expressions`
        quasis: Vec<TemplateElement>,
        /// Substitution expressions
        expressions: Vec<Expression>,
        /// Source range
        span: Span,
    },

    /// Tagged template (`tag`...`` ` ``)
    TaggedTemplateExpression {
        /// Tag function
        tag: Box<Expression>,
        /// The template
        quasi: Box<Expression>,
        /// Source range
        span: Span,
    },

    /// Array literal
    ArrayExpression {
        /// Elements; `None` for holes
        elements: Vec<Option<ArrayElement>>,
        /// Source range
        span: Span,
    },

    /// Object literal
    ObjectExpression {
        /// Properties
        properties: Vec<ObjectMember>,
        /// Source range
        span: Span,
    },

    /// Function expression
    FunctionExpression {
        /// Optional name
        name: Option<String>,
        /// Parameter patterns
        params: Vec<Pattern>,
        /// Body statements
        body: Vec<Statement>,
        /// Is async
        is_async: bool,
        /// Is generator
        is_generator: bool,
        /// Source range
        span: Span,
    },

    /// Arrow function
    ArrowFunctionExpression {
        /// Parameter patterns
        params: Vec<Pattern>,
        /// Body
        body: ArrowBody,
        /// Is async
        is_async: bool,
        /// Source range
        span: Span,
    },

    /// Class expression
    ClassExpression {
        /// Optional name
        name: Option<String>,
        /// Superclass expression
        super_class: Option<Box<Expression>>,
        /// Body elements
        body: Vec<ClassElement>,
        /// Source range
        span: Span,
    },

    /// Unary operation
    UnaryExpression {
        /// Operator
        operator: UnaryOperator,
        /// Operand
        argument: Box<Expression>,
        /// Source range
        span: Span,
    },

    /// Prefix or postfix `++`/`--`
    UpdateExpression {
        /// Operator
        operator: UpdateOperator,
        /// Operand
        argument: Box<Expression>,
        /// True for prefix form
        prefix: bool,
        /// Source range
        span: Span,
    },

    /// Binary operation
    BinaryExpression {
        /// Left operand
        left: Box<Expression>,
        /// Operator
        operator: BinaryOperator,
        /// Right operand
        right: Box<Expression>,
        /// Source range
        span: Span,
    },

    /// Short-circuiting logical operation
    LogicalExpression {
        /// Left operand
        left: Box<Expression>,
        /// Operator
        operator: LogicalOperator,
        /// Right operand
        right: Box<Expression>,
        /// Source range
        span: Span,
    },

    /// Assignment
    AssignmentExpression {
        /// Target
        left: AssignmentTarget,
        /// Operator
        operator: AssignmentOperator,
        /// Value
        right: Box<Expression>,
        /// Source range
        span: Span,
    },

    /// Conditional (ternary)
    ConditionalExpression {
        /// Condition
        test: Box<Expression>,
        /// Value when truthy
        consequent: Box<Expression>,
        /// Value when falsy
        alternate: Box<Expression>,
        /// Source range
        span: Span,
    },

    /// Call
    CallExpression {
        /// Callee
        callee: Box<Expression>,
        /// Arguments
        arguments: Vec<CallArgument>,
        /// Optional call (`f?.()`)
        optional: bool,
        /// Source range
        span: Span,
    },

    /// Member access
    MemberExpression {
        /// Object
        object: Box<Expression>,
        /// Property
        property: Box<Expression>,
        /// Bracket notation
        computed: bool,
        /// Optional access (`a?.b`)
        optional: bool,
        /// Source range
        span: Span,
    },

    /// `new` expression
    NewExpression {
        /// Constructor
        callee: Box<Expression>,
        /// Arguments
        arguments: Vec<CallArgument>,
        /// Source range
        span: Span,
    },

    /// `new.target` / `import.meta`
    MetaProperty {
        /// `new` or `import`
        meta: String,
        /// `target` or `meta`
        property: String,
        /// Source range
        span: Span,
    },

    /// Dynamic `import(...)`
    ImportExpression {
        /// Module specifier expression
        source: Box<Expression>,
        /// Source range
        span: Span,
    },

    /// Comma sequence
    SequenceExpression {
        /// Expressions in order
        expressions: Vec<Expression>,
        /// Source range
        span: Span,
    },

    /// `this`
    ThisExpression {
        /// Source range
        span: Span,
    },

    /// `super` (valid only as callee or member object)
    SuperExpression {
        /// Source range
        span: Span,
    },

    /// `yield` / `yield*`
    YieldExpression {
        /// Yielded value
        argument: Option<Box<Expression>>,
        /// `yield*`
        delegate: bool,
        /// Source range
        span: Span,
    },

    /// `await`
    AwaitExpression {
        /// Awaited value
        argument: Box<Expression>,
        /// Source range
        span: Span,
    },

    /// Explicit parenthesized wrapper, kept only when requested
    ParenthesizedExpression {
        /// Inner expression
        expression: Box<Expression>,
        /// Source range
        span: Span,
    },
}

impl Expression {
    /// The expression's source range.
    pub fn span(&self) -> Span {
        match self {
            Expression::Identifier { span, .. }
            | Expression::PrivateName { span, .. }
            | Expression::Literal { span, .. }
            | Expression::TemplateLiteral { span, .. }
            | Expression::TaggedTemplateExpression { span, .. }
            | Expression::ArrayExpression { span, .. }
            | Expression::ObjectExpression { span, .. }
            | Expression::FunctionExpression { span, .. }
            | Expression::ArrowFunctionExpression { span, .. }
            | Expression::ClassExpression { span, .. }
            | Expression::UnaryExpression { span, .. }
            | Expression::UpdateExpression { span, .. }
            | Expression::BinaryExpression { span, .. }
            | Expression::LogicalExpression { span, .. }
            | Expression::AssignmentExpression { span, .. }
            | Expression::ConditionalExpression { span, .. }
            | Expression::CallExpression { span, .. }
            | Expression::MemberExpression { span, .. }
            | Expression::NewExpression { span, .. }
            | Expression::MetaProperty { span, .. }
            | Expression::ImportExpression { span, .. }
            | Expression::SequenceExpression { span, .. }
            | Expression::ThisExpression { span }
            | Expression::SuperExpression { span }
            | Expression::YieldExpression { span, .. }
            | Expression::AwaitExpression { span, .. }
            | Expression::ParenthesizedExpression { span, .. } => *span,
        }
    }
}

/// Decoded literal value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    /// Number
    Number(f64),
    /// BigInt, source digits preserved without the `n` suffix
    BigInt(String),
    /// String
    String(String),
    /// Boolean
    Boolean(bool),
    /// `null`
    Null,
    /// Regular expression, raw text preserved verbatim
    Regex {
        /// Pattern between the slashes
        pattern: String,
        /// Flags
        flags: String,
    },
}

/// One text chunk of a template literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateElement {
    /// Raw source text of the chunk
    pub raw: String,
    /// Decoded text; `None` when the chunk held an invalid escape
    /// (permitted only in tagged templates)
    pub cooked: Option<String>,
    /// True for the final chunk
    pub tail: bool,
    /// Source range
    pub span: Span,
}

/// Array literal element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ArrayElement {
    /// Plain element
    Expression(Expression),
    /// Spread element
    Spread(Expression),
}

/// Call or `new` argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CallArgument {
    /// Plain argument
    Expression(Expression),
    /// Spread argument
    Spread(Expression),
}

/// Property kind inside object literals and classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PropertyKind {
    /// Plain value or method
    Init,
    /// Getter
    Get,
    /// Setter
    Set,
}

/// Object literal member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ObjectMember {
    /// Key/value property, shorthand property, or method
    Property {
        /// Key
        key: PropertyKey,
        /// Value
        value: Expression,
        /// Init/get/set
        kind: PropertyKind,
        /// `{ a }` shorthand
        shorthand: bool,
        /// `{ [expr]: ... }`
        computed: bool,
        /// `{ m() {} }` method shorthand
        method: bool,
        /// Source range
        span: Span,
    },
    /// `{ ...expr }`
    Spread {
        /// Spread argument
        argument: Expression,
        /// Source range
        span: Span,
    },
}

/// Property key forms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PropertyKey {
    /// Plain identifier key
    Identifier(String),
    /// String literal key
    String(String),
    /// Numeric literal key
    Number(f64),
    /// Private name key (class elements only)
    PrivateName(String),
    /// Computed key
    Computed(Box<Expression>),
}

impl PropertyKey {
    /// The key's textual name for uncomputed keys.
    pub fn static_name(&self) -> Option<&str> {
        match self {
            PropertyKey::Identifier(name) | PropertyKey::String(name) => Some(name),
            _ => None,
        }
    }
}

/// Method kind inside a class body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MethodKind {
    /// Constructor
    Constructor,
    /// Plain method
    Method,
    /// Getter
    Get,
    /// Setter
    Set,
}

/// Class body element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ClassElement {
    /// Method definition
    Method {
        /// Key
        key: PropertyKey,
        /// Constructor/method/get/set
        kind: MethodKind,
        /// The method function (always a `FunctionExpression`)
        value: Expression,
        /// `static` member
        is_static: bool,
        /// Computed key
        computed: bool,
        /// Source range
        span: Span,
    },
    /// Field definition
    Property {
        /// Key
        key: PropertyKey,
        /// Initializer
        value: Option<Expression>,
        /// `static` member
        is_static: bool,
        /// Computed key
        computed: bool,
        /// Source range
        span: Span,
    },
}

/// Arrow function body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ArrowBody {
    /// Concise expression body
    Expression(Box<Expression>),
    /// Block body
    Block(Vec<Statement>),
}

/// Binding or assignment pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Pattern {
    /// Plain identifier
    Identifier {
        /// Name
        name: String,
        /// Source range
        span: Span,
    },
    /// Object destructuring
    Object {
        /// Properties
        properties: Vec<ObjectPatternProperty>,
        /// Trailing `...rest`, must be last
        rest: Option<Box<Pattern>>,
        /// Source range
        span: Span,
    },
    /// Array destructuring; `None` entries are holes
    Array {
        /// Element patterns
        elements: Vec<Option<Pattern>>,
        /// Source range
        span: Span,
    },
    /// Pattern with a default value
    Assignment {
        /// Target pattern
        left: Box<Pattern>,
        /// Default value
        right: Box<Expression>,
        /// Source range
        span: Span,
    },
    /// `...rest`
    Rest {
        /// Inner pattern
        argument: Box<Pattern>,
        /// Source range
        span: Span,
    },
    /// Member expression target (destructuring assignment only,
    /// never a binding)
    Member(Box<Expression>),
}

impl Pattern {
    /// The pattern's source range.
    pub fn span(&self) -> Span {
        match self {
            Pattern::Identifier { span, .. }
            | Pattern::Object { span, .. }
            | Pattern::Array { span, .. }
            | Pattern::Assignment { span, .. }
            | Pattern::Rest { span, .. } => *span,
            Pattern::Member(expr) => expr.span(),
        }
    }
}

/// One property of an object pattern.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectPatternProperty {
    /// Key
    pub key: PropertyKey,
    /// Bound value pattern
    pub value: Pattern,
    /// `{ a }` shorthand
    pub shorthand: bool,
    /// Computed key
    pub computed: bool,
    /// Source range
    pub span: Span,
}

/// Left-hand side of an assignment expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AssignmentTarget {
    /// Simple identifier
    Identifier {
        /// Name
        name: String,
        /// Source range
        span: Span,
    },
    /// Member expression
    Member(Box<Expression>),
    /// Destructuring pattern
    Pattern(Pattern),
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOperator {
    /// `-`
    Minus,
    /// `+`
    Plus,
    /// `!`
    Not,
    /// `~`
    BitwiseNot,
    /// `typeof`
    Typeof,
    /// `void`
    Void,
    /// `delete`
    Delete,
}

/// Update operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UpdateOperator {
    /// `++`
    Increment,
    /// `--`
    Decrement,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `**`
    Exp,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `===`
    StrictEq,
    /// `!==`
    StrictNotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `&`
    BitwiseAnd,
    /// `|`
    BitwiseOr,
    /// `^`
    BitwiseXor,
    /// `<<`
    LeftShift,
    /// `>>`
    RightShift,
    /// `>>>`
    UnsignedRightShift,
    /// `in`
    In,
    /// `instanceof`
    Instanceof,
}

/// Logical operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogicalOperator {
    /// `&&`
    And,
    /// `||`
    Or,
    /// `??`
    NullishCoalesce,
}

/// Assignment operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AssignmentOperator {
    /// `=`
    Assign,
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,
    /// `*=`
    MulAssign,
    /// `/=`
    DivAssign,
    /// `%=`
    ModAssign,
    /// `**=`
    ExpAssign,
    /// `&=`
    BitAndAssign,
    /// `|=`
    BitOrAssign,
    /// `^=`
    BitXorAssign,
    /// `<<=`
    LeftShiftAssign,
    /// `>>=`
    RightShiftAssign,
    /// `>>>=`
    UnsignedRightShiftAssign,
    /// `&&=`
    LogicalAndAssign,
    /// `||=`
    LogicalOrAssign,
    /// `??=`
    NullishCoalesceAssign,
}

#[cfg(test)]
mod tests {
    use super::*;
    use syntax_core::Position;

    fn span(a: usize, b: usize) -> Span {
        Span {
            start: Position { offset: a, line: 0, column: 0 },
            end: Position { offset: b, line: 0, column: 0 },
        }
    }

    #[test]
    fn test_statement_span_access() {
        let stmt = Statement::EmptyStatement { span: span(3, 4) };
        assert_eq!(stmt.span().start.offset, 3);
        assert_eq!(stmt.span().end.offset, 4);
    }

    #[test]
    fn test_expression_span_access() {
        let expr = Expression::Identifier {
            name: "x".to_string(),
            span: span(0, 1),
        };
        assert_eq!(expr.span().end.offset, 1);
    }

    #[test]
    fn test_pattern_member_span_delegates() {
        let member = Expression::MemberExpression {
            object: Box::new(Expression::Identifier {
                name: "a".to_string(),
                span: span(0, 1),
            }),
            property: Box::new(Expression::Identifier {
                name: "b".to_string(),
                span: span(2, 3),
            }),
            computed: false,
            optional: false,
            span: span(0, 3),
        };
        let pat = Pattern::Member(Box::new(member));
        assert_eq!(pat.span().end.offset, 3);
    }

    #[test]
    fn test_property_key_static_name() {
        assert_eq!(
            PropertyKey::Identifier("proto".to_string()).static_name(),
            Some("proto")
        );
        assert_eq!(PropertyKey::Number(1.0).static_name(), None);
    }

    #[test]
    fn test_nodes_serialize() {
        let stmt = Statement::DebuggerStatement { span: span(0, 8) };
        let json = serde_json::to_string(&stmt).unwrap();
        assert!(json.contains("DebuggerStatement"));
    }
}
