//! Expression parsing.
//!
//! A recursive-descent core with a precedence-climbing loop for binary
//! operators. Constructs that cannot be classified from the left (arrow
//! parameter lists, destructuring targets, `async` heads) are parsed in
//! their expression reading first and converted once the deciding token
//! appears.

use syntax_core::{ErrorKind, ParseError, Position, Span};

use crate::lval::DestructuringErrors;
use crate::node::{
    ArrayElement, ArrowBody, AssignmentOperator, AssignmentTarget, BinaryOperator, CallArgument,
    Expression, Literal, LogicalOperator, ObjectMember, Pattern, PropertyKey, PropertyKind,
    TemplateElement, UnaryOperator, UpdateOperator,
};
use crate::options::{AllowReserved, EcmaVersion, SourceType};
use crate::scope::{BindingKind, ScopeFlags};
use crate::token::{Keyword, Punct, TokenKind, TokenValue};
use crate::Parser;

/// Words reserved in strict mode beyond the keyword set.
const STRICT_RESERVED: &[&str] = &[
    "implements", "interface", "let", "package", "private", "protected", "public", "static",
    "yield",
];

fn binop_prec(kind: TokenKind) -> Option<u8> {
    match kind {
        TokenKind::Punct(Punct::Coalesce) | TokenKind::Punct(Punct::OrOr) => Some(1),
        TokenKind::Punct(Punct::AndAnd) => Some(2),
        TokenKind::Punct(Punct::Or) => Some(3),
        TokenKind::Punct(Punct::Xor) => Some(4),
        TokenKind::Punct(Punct::And) => Some(5),
        TokenKind::Punct(Punct::EqEq)
        | TokenKind::Punct(Punct::NotEq)
        | TokenKind::Punct(Punct::EqEqEq)
        | TokenKind::Punct(Punct::NotEqEq) => Some(6),
        TokenKind::Punct(Punct::Lt)
        | TokenKind::Punct(Punct::Gt)
        | TokenKind::Punct(Punct::LtEq)
        | TokenKind::Punct(Punct::GtEq)
        | TokenKind::Keyword(Keyword::In)
        | TokenKind::Keyword(Keyword::Instanceof) => Some(7),
        TokenKind::Punct(Punct::LtLt)
        | TokenKind::Punct(Punct::GtGt)
        | TokenKind::Punct(Punct::GtGtGt) => Some(8),
        TokenKind::Punct(Punct::Plus) | TokenKind::Punct(Punct::Minus) => Some(9),
        TokenKind::Punct(Punct::Star)
        | TokenKind::Punct(Punct::Slash)
        | TokenKind::Punct(Punct::Percent) => Some(10),
        _ => None,
    }
}

fn binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    Some(match kind {
        TokenKind::Punct(Punct::Plus) => BinaryOperator::Add,
        TokenKind::Punct(Punct::Minus) => BinaryOperator::Sub,
        TokenKind::Punct(Punct::Star) => BinaryOperator::Mul,
        TokenKind::Punct(Punct::Slash) => BinaryOperator::Div,
        TokenKind::Punct(Punct::Percent) => BinaryOperator::Mod,
        TokenKind::Punct(Punct::EqEq) => BinaryOperator::Eq,
        TokenKind::Punct(Punct::NotEq) => BinaryOperator::NotEq,
        TokenKind::Punct(Punct::EqEqEq) => BinaryOperator::StrictEq,
        TokenKind::Punct(Punct::NotEqEq) => BinaryOperator::StrictNotEq,
        TokenKind::Punct(Punct::Lt) => BinaryOperator::Lt,
        TokenKind::Punct(Punct::LtEq) => BinaryOperator::LtEq,
        TokenKind::Punct(Punct::Gt) => BinaryOperator::Gt,
        TokenKind::Punct(Punct::GtEq) => BinaryOperator::GtEq,
        TokenKind::Punct(Punct::And) => BinaryOperator::BitwiseAnd,
        TokenKind::Punct(Punct::Or) => BinaryOperator::BitwiseOr,
        TokenKind::Punct(Punct::Xor) => BinaryOperator::BitwiseXor,
        TokenKind::Punct(Punct::LtLt) => BinaryOperator::LeftShift,
        TokenKind::Punct(Punct::GtGt) => BinaryOperator::RightShift,
        TokenKind::Punct(Punct::GtGtGt) => BinaryOperator::UnsignedRightShift,
        TokenKind::Keyword(Keyword::In) => BinaryOperator::In,
        TokenKind::Keyword(Keyword::Instanceof) => BinaryOperator::Instanceof,
        _ => return None,
    })
}

fn assignment_operator(p: Punct) -> Option<AssignmentOperator> {
    Some(match p {
        Punct::Eq => AssignmentOperator::Assign,
        Punct::PlusEq => AssignmentOperator::AddAssign,
        Punct::MinusEq => AssignmentOperator::SubAssign,
        Punct::StarEq => AssignmentOperator::MulAssign,
        Punct::SlashEq => AssignmentOperator::DivAssign,
        Punct::PercentEq => AssignmentOperator::ModAssign,
        Punct::StarStarEq => AssignmentOperator::ExpAssign,
        Punct::AndEq => AssignmentOperator::BitAndAssign,
        Punct::OrEq => AssignmentOperator::BitOrAssign,
        Punct::XorEq => AssignmentOperator::BitXorAssign,
        Punct::LtLtEq => AssignmentOperator::LeftShiftAssign,
        Punct::GtGtEq => AssignmentOperator::RightShiftAssign,
        Punct::GtGtGtEq => AssignmentOperator::UnsignedRightShiftAssign,
        Punct::AndAndEq => AssignmentOperator::LogicalAndAssign,
        Punct::OrOrEq => AssignmentOperator::LogicalOrAssign,
        Punct::CoalesceEq => AssignmentOperator::NullishCoalesceAssign,
        _ => return None,
    })
}

/// Whether a token kind can begin an expression, used to decide if
/// `yield` has an operand.
fn starts_expr(kind: TokenKind) -> bool {
    match kind {
        TokenKind::Name
        | TokenKind::PrivateName
        | TokenKind::Number
        | TokenKind::BigInt
        | TokenKind::Str
        | TokenKind::Regex => true,
        TokenKind::Keyword(kw) => matches!(
            kw,
            Keyword::This
                | Keyword::Super
                | Keyword::Function
                | Keyword::Class
                | Keyword::New
                | Keyword::Typeof
                | Keyword::Void
                | Keyword::Delete
                | Keyword::Null
                | Keyword::True
                | Keyword::False
                | Keyword::Import
        ),
        TokenKind::Punct(p) => matches!(
            p,
            Punct::LParen
                | Punct::LBracket
                | Punct::LBrace
                | Punct::Plus
                | Punct::Minus
                | Punct::Not
                | Punct::Tilde
                | Punct::PlusPlus
                | Punct::MinusMinus
                | Punct::BackQuote
                | Punct::Slash
                | Punct::SlashEq
        ),
        _ => false,
    }
}

/// One item of a parenthesized list that may still become either a
/// sequence expression or an arrow parameter list.
enum ParenItem {
    Expr(Expression),
    Spread(Expression, Position),
}

impl<'s> Parser<'s> {
    /// Full expression, including comma sequences.
    pub(crate) fn parse_expression(&mut self, for_init: bool) -> Result<Expression, ParseError> {
        let start = self.cur.span.start;
        let expr = self.parse_maybe_assign(for_init, None)?;
        if self.at_punct(Punct::Comma) {
            let mut expressions = vec![expr];
            while self.eat_punct(Punct::Comma)? {
                expressions.push(self.parse_maybe_assign(for_init, None)?);
            }
            return Ok(Expression::SequenceExpression {
                expressions,
                span: self.node_span(start),
            });
        }
        Ok(expr)
    }

    /// Assignment-level expression. When `for_init` is set, the `in`
    /// operator is excluded so `for (a in b)` heads stay unambiguous.
    pub(crate) fn parse_maybe_assign(
        &mut self,
        for_init: bool,
        errors: Option<&mut DestructuringErrors>,
    ) -> Result<Expression, ParseError> {
        if self.scopes.in_generator() && self.cur.is_contextual("yield") {
            return self.parse_yield(for_init);
        }

        let mut own = DestructuringErrors::new();
        let owns = errors.is_none();
        let errs: &mut DestructuringErrors = match errors {
            Some(e) => e,
            None => &mut own,
        };

        let start = self.cur.span.start;
        self.potential_arrow_at = start.offset;
        let left = self.parse_maybe_conditional(for_init, errs)?;

        if let TokenKind::Punct(p) = self.cur.kind {
            if let Some(operator) = assignment_operator(p) {
                let op_gate = match operator {
                    AssignmentOperator::LogicalAndAssign
                    | AssignmentOperator::LogicalOrAssign
                    | AssignmentOperator::NullishCoalesceAssign => EcmaVersion::Es2021,
                    AssignmentOperator::ExpAssign => EcmaVersion::Es2016,
                    _ => EcmaVersion::Es5,
                };
                if self.options.ecma_version < op_gate {
                    return Err(self.unexpected());
                }
                let target = if operator == AssignmentOperator::Assign {
                    self.to_assignment_target(left, errs)?
                } else {
                    self.to_simple_assignment_target(left)?
                };
                // Constructs like shorthand defaults are valid inside the
                // now-confirmed pattern
                errs.shorthand_assign = None;
                errs.double_proto = None;
                self.next()?;
                let right = self.parse_maybe_assign(for_init, None)?;
                return Ok(Expression::AssignmentExpression {
                    left: target,
                    operator,
                    right: Box::new(right),
                    span: self.node_span(start),
                });
            }
        }

        if owns {
            self.check_expression_errors(errs)?;
        }
        Ok(left)
    }

    fn to_assignment_target(
        &mut self,
        left: Expression,
        errs: &mut DestructuringErrors,
    ) -> Result<AssignmentTarget, ParseError> {
        match left {
            Expression::Identifier { name, span } => {
                self.check_restricted_name(&name, "Assigning to", span.start)?;
                Ok(AssignmentTarget::Identifier { name, span })
            }
            Expression::MemberExpression { .. } => Ok(AssignmentTarget::Member(Box::new(left))),
            Expression::ObjectExpression { .. } | Expression::ArrayExpression { .. } => {
                self.check_pattern_errors(errs, false)?;
                let pattern = self.expression_to_pattern(left, false)?;
                Ok(AssignmentTarget::Pattern(pattern))
            }
            Expression::ParenthesizedExpression { expression, span } => {
                match *expression {
                    inner @ Expression::Identifier { .. }
                    | inner @ Expression::MemberExpression { .. } => {
                        self.to_assignment_target(inner, errs)
                    }
                    _ => Err(self.err_at(
                        ErrorKind::Syntax,
                        "Parenthesized pattern",
                        span.start,
                    )),
                }
            }
            other => Err(self.err_at(
                ErrorKind::Syntax,
                "Assigning to rvalue",
                other.span().start,
            )),
        }
    }

    /// Compound assignment targets must be plain identifiers or members.
    fn to_simple_assignment_target(
        &mut self,
        left: Expression,
    ) -> Result<AssignmentTarget, ParseError> {
        match left {
            Expression::Identifier { name, span } => {
                self.check_restricted_name(&name, "Assigning to", span.start)?;
                Ok(AssignmentTarget::Identifier { name, span })
            }
            Expression::MemberExpression { .. } => Ok(AssignmentTarget::Member(Box::new(left))),
            Expression::ParenthesizedExpression { expression, .. } => {
                self.to_simple_assignment_target(*expression)
            }
            other => Err(self.err_at(
                ErrorKind::Syntax,
                "Assigning to rvalue",
                other.span().start,
            )),
        }
    }

    fn parse_maybe_conditional(
        &mut self,
        for_init: bool,
        errs: &mut DestructuringErrors,
    ) -> Result<Expression, ParseError> {
        let start = self.cur.span.start;
        let expr = self.parse_expr_ops(for_init, errs)?;
        if errs.shorthand_assign.is_some() || errs.double_proto.is_some() {
            // Can only survive as a pattern; leave it for the caller
            return Ok(expr);
        }
        if self.eat_punct(Punct::Question)? {
            let consequent = self.parse_maybe_assign(false, None)?;
            self.expect_punct(Punct::Colon)?;
            let alternate = self.parse_maybe_assign(for_init, None)?;
            return Ok(Expression::ConditionalExpression {
                test: Box::new(expr),
                consequent: Box::new(consequent),
                alternate: Box::new(alternate),
                span: self.node_span(start),
            });
        }
        Ok(expr)
    }

    fn parse_expr_ops(
        &mut self,
        for_init: bool,
        errs: &mut DestructuringErrors,
    ) -> Result<Expression, ParseError> {
        let start = self.cur.span.start;
        let left = self.parse_maybe_unary(Some(errs), false, false, for_init)?;
        if errs.shorthand_assign.is_some() || errs.double_proto.is_some() {
            return Ok(left);
        }
        self.parse_binop_rhs(left, start, 0, for_init)
    }

    fn parse_binop_rhs(
        &mut self,
        left: Expression,
        left_start: Position,
        min_prec: u8,
        for_init: bool,
    ) -> Result<Expression, ParseError> {
        let kind = self.cur.kind;
        if kind == TokenKind::Keyword(Keyword::In) && for_init {
            return Ok(left);
        }
        let Some(mut prec) = binop_prec(kind) else {
            return Ok(left);
        };
        if prec <= min_prec {
            return Ok(left);
        }
        let logical = matches!(
            kind,
            TokenKind::Punct(Punct::OrOr) | TokenKind::Punct(Punct::AndAnd)
        );
        let coalesce = kind == TokenKind::Punct(Punct::Coalesce);
        if coalesce {
            // `??` climbs like `&&` so the mixing check below catches
            // ambiguous combinations
            prec = 2;
        }
        let op_pos = self.cur.span.start;
        self.next()?;

        let right_start = self.cur.span.start;
        let right_operand = self.parse_maybe_unary(None, false, false, for_init)?;
        let right = self.parse_binop_rhs(right_operand, right_start, prec, for_init)?;

        let node = if logical || coalesce {
            let operator = match kind {
                TokenKind::Punct(Punct::OrOr) => LogicalOperator::Or,
                TokenKind::Punct(Punct::AndAnd) => LogicalOperator::And,
                _ => LogicalOperator::NullishCoalesce,
            };
            Expression::LogicalExpression {
                left: Box::new(left),
                operator,
                right: Box::new(right),
                span: self.node_span(left_start),
            }
        } else {
            let operator = binary_operator(kind)
                .ok_or_else(|| self.err_at(ErrorKind::Syntax, "Unexpected token", op_pos))?;
            Expression::BinaryExpression {
                left: Box::new(left),
                operator,
                right: Box::new(right),
                span: self.node_span(left_start),
            }
        };

        if (logical && self.cur.kind == TokenKind::Punct(Punct::Coalesce))
            || (coalesce
                && matches!(
                    self.cur.kind,
                    TokenKind::Punct(Punct::OrOr) | TokenKind::Punct(Punct::AndAnd)
                ))
        {
            return Err(self.err_at(
                ErrorKind::Syntax,
                "Logical expressions and coalesce expressions cannot be mixed. \
                 Wrap either by parentheses",
                self.cur.span.start,
            ));
        }
        self.parse_binop_rhs(node, left_start, min_prec, for_init)
    }

    /// Unary, update, and exponentiation layer.
    fn parse_maybe_unary(
        &mut self,
        errors: Option<&mut DestructuringErrors>,
        saw_unary_in: bool,
        inc_dec: bool,
        for_init: bool,
    ) -> Result<Expression, ParseError> {
        let start = self.cur.span.start;
        let mut saw_unary = saw_unary_in;

        if self.can_await() && self.cur.is_contextual("await") {
            let expr = self.parse_await(for_init)?;
            saw_unary = true;
            return self.maybe_exponent(expr, start, saw_unary, inc_dec, for_init);
        }

        let prefix_unary = match self.cur.kind {
            TokenKind::Punct(Punct::Plus) => Some(UnaryOperator::Plus),
            TokenKind::Punct(Punct::Minus) => Some(UnaryOperator::Minus),
            TokenKind::Punct(Punct::Not) => Some(UnaryOperator::Not),
            TokenKind::Punct(Punct::Tilde) => Some(UnaryOperator::BitwiseNot),
            TokenKind::Keyword(Keyword::Typeof) => Some(UnaryOperator::Typeof),
            TokenKind::Keyword(Keyword::Void) => Some(UnaryOperator::Void),
            TokenKind::Keyword(Keyword::Delete) => Some(UnaryOperator::Delete),
            _ => None,
        };

        let expr = if let Some(operator) = prefix_unary {
            self.next()?;
            let argument = self.parse_maybe_unary(None, true, false, for_init)?;
            if operator == UnaryOperator::Delete {
                self.check_delete_argument(&argument)?;
            }
            saw_unary = true;
            Expression::UnaryExpression {
                operator,
                argument: Box::new(argument),
                span: self.node_span(start),
            }
        } else if matches!(
            self.cur.kind,
            TokenKind::Punct(Punct::PlusPlus) | TokenKind::Punct(Punct::MinusMinus)
        ) {
            let operator = if self.cur.kind == TokenKind::Punct(Punct::PlusPlus) {
                UpdateOperator::Increment
            } else {
                UpdateOperator::Decrement
            };
            self.next()?;
            let argument = self.parse_maybe_unary(None, true, true, for_init)?;
            self.check_update_argument(&argument)?;
            Expression::UpdateExpression {
                operator,
                argument: Box::new(argument),
                prefix: true,
                span: self.node_span(start),
            }
        } else if !saw_unary && self.cur.kind == TokenKind::PrivateName {
            // `#x in obj` brand check
            if self.options.ecma_version < EcmaVersion::Es2022 || for_init {
                return Err(self.unexpected());
            }
            let expr = self.parse_private_name_expression()?;
            if self.cur.kind != TokenKind::Keyword(Keyword::In) {
                return Err(self.unexpected());
            }
            expr
        } else {
            let mut expr = self.parse_expr_subscripts(errors, for_init)?;
            while matches!(
                self.cur.kind,
                TokenKind::Punct(Punct::PlusPlus) | TokenKind::Punct(Punct::MinusMinus)
            ) && !self.cur.newline_before
            {
                let operator = if self.cur.kind == TokenKind::Punct(Punct::PlusPlus) {
                    UpdateOperator::Increment
                } else {
                    UpdateOperator::Decrement
                };
                self.check_update_argument(&expr)?;
                self.next()?;
                expr = Expression::UpdateExpression {
                    operator,
                    argument: Box::new(expr),
                    prefix: false,
                    span: self.node_span(start),
                };
            }
            expr
        };

        self.maybe_exponent(expr, start, saw_unary, inc_dec, for_init)
    }

    /// Right-associative `**`, which refuses a bare unary operand on its
    /// left.
    fn maybe_exponent(
        &mut self,
        left: Expression,
        start: Position,
        saw_unary: bool,
        inc_dec: bool,
        for_init: bool,
    ) -> Result<Expression, ParseError> {
        if inc_dec || self.cur.kind != TokenKind::Punct(Punct::StarStar) {
            return Ok(left);
        }
        if saw_unary {
            return Err(self.err_at(
                ErrorKind::Syntax,
                "Unary operator used immediately before exponentiation expression. \
                 Parenthesis must be used to disambiguate operator precedence",
                self.cur.span.start,
            ));
        }
        self.next()?;
        let right = self.parse_maybe_unary(None, false, false, for_init)?;
        Ok(Expression::BinaryExpression {
            left: Box::new(left),
            operator: BinaryOperator::Exp,
            right: Box::new(right),
            span: self.node_span(start),
        })
    }

    fn check_update_argument(&self, argument: &Expression) -> Result<(), ParseError> {
        match argument {
            Expression::Identifier { name, span } => {
                self.check_restricted_name(name, "Assigning to", span.start)
            }
            Expression::MemberExpression { .. } => Ok(()),
            Expression::ParenthesizedExpression { expression, .. } => {
                self.check_update_argument(expression)
            }
            other => Err(self.err_at(
                ErrorKind::Syntax,
                "Assigning to rvalue",
                other.span().start,
            )),
        }
    }

    fn check_delete_argument(&self, argument: &Expression) -> Result<(), ParseError> {
        match argument {
            Expression::Identifier { span, .. } if self.strict => Err(self.err_at(
                ErrorKind::Syntax,
                "Deleting local variable in strict mode",
                span.start,
            )),
            Expression::MemberExpression { property, span, .. } => {
                if matches!(property.as_ref(), Expression::PrivateName { .. }) {
                    return Err(self.err_at(
                        ErrorKind::Syntax,
                        "Private fields can not be deleted",
                        span.start,
                    ));
                }
                Ok(())
            }
            Expression::ParenthesizedExpression { expression, .. } => {
                self.check_delete_argument(expression)
            }
            _ => Ok(()),
        }
    }

    fn parse_await(&mut self, for_init: bool) -> Result<Expression, ParseError> {
        let start = self.cur.span.start;
        self.next()?;
        let argument = self.parse_maybe_unary(None, true, false, for_init)?;
        Ok(Expression::AwaitExpression {
            argument: Box::new(argument),
            span: self.node_span(start),
        })
    }

    fn parse_yield(&mut self, for_init: bool) -> Result<Expression, ParseError> {
        let start = self.cur.span.start;
        self.next()?;
        if self.at_punct(Punct::Semi)
            || self.can_insert_semicolon()
            || (self.cur.kind != TokenKind::Punct(Punct::Star) && !starts_expr(self.cur.kind))
        {
            return Ok(Expression::YieldExpression {
                argument: None,
                delegate: false,
                span: self.node_span(start),
            });
        }
        let delegate = self.eat_punct(Punct::Star)?;
        let argument = Some(Box::new(self.parse_maybe_assign(for_init, None)?));
        Ok(Expression::YieldExpression {
            argument,
            delegate,
            span: self.node_span(start),
        })
    }

    // Subscript chains

    pub(crate) fn parse_expr_subscripts(
        &mut self,
        errors: Option<&mut DestructuringErrors>,
        for_init: bool,
    ) -> Result<Expression, ParseError> {
        let start = self.cur.span.start;
        let atom = self.parse_expr_atom(errors, for_init)?;
        if matches!(atom, Expression::ArrowFunctionExpression { .. }) {
            return Ok(atom);
        }
        self.parse_subscripts(atom, start, false, for_init)
    }

    pub(crate) fn parse_subscripts(
        &mut self,
        base: Expression,
        start: Position,
        no_calls: bool,
        for_init: bool,
    ) -> Result<Expression, ParseError> {
        let maybe_async_arrow = self.options.ecma_version >= EcmaVersion::Es2017
            && matches!(&base, Expression::Identifier { name, span }
                if name == "async"
                    && span.end.offset - span.start.offset == 5
                    && self.potential_arrow_at == span.start.offset)
            && !self.cur.newline_before;

        let mut expr = base;
        let mut opt_chained = false;
        loop {
            let (next, done) = self.parse_subscript(
                expr,
                start,
                no_calls,
                for_init,
                maybe_async_arrow,
                &mut opt_chained,
            )?;
            if done {
                return Ok(next);
            }
            expr = next;
        }
    }

    fn parse_subscript(
        &mut self,
        base: Expression,
        start: Position,
        no_calls: bool,
        for_init: bool,
        maybe_async_arrow: bool,
        opt_chained: &mut bool,
    ) -> Result<(Expression, bool), ParseError> {
        let optional = self.options.ecma_version >= EcmaVersion::Es2020
            && self.at_punct(Punct::QuestionDot);
        if optional {
            if no_calls {
                return Err(self.err_at(
                    ErrorKind::Syntax,
                    "Optional chaining cannot appear in the callee of new expressions",
                    self.cur.span.start,
                ));
            }
            *opt_chained = true;
            self.next()?;
        }

        if self.at_punct(Punct::LBracket) {
            self.next()?;
            let property = self.parse_expression(false)?;
            self.expect_punct(Punct::RBracket)?;
            let expr = Expression::MemberExpression {
                object: Box::new(base),
                property: Box::new(property),
                computed: true,
                optional,
                span: self.node_span(start),
            };
            return Ok((expr, false));
        }

        if !no_calls && self.at_punct(Punct::LParen) {
            if maybe_async_arrow {
                return self.parse_async_call_or_arrow(base, start);
            }
            self.next()?;
            let arguments = self.parse_call_arguments()?;
            let expr = Expression::CallExpression {
                callee: Box::new(base),
                arguments,
                optional,
                span: self.node_span(start),
            };
            return Ok((expr, false));
        }

        if optional || self.at_punct(Punct::Dot) {
            if !optional {
                self.next()?;
            }
            if self.cur.kind == TokenKind::PrivateName {
                let property = self.parse_private_name_expression()?;
                let expr = Expression::MemberExpression {
                    object: Box::new(base),
                    property: Box::new(property),
                    computed: false,
                    optional,
                    span: self.node_span(start),
                };
                return Ok((expr, false));
            }
            let prop_start = self.cur.span.start;
            let name = self.parse_ident_liberal()?;
            let property = Expression::Identifier { name, span: self.node_span(prop_start) };
            let expr = Expression::MemberExpression {
                object: Box::new(base),
                property: Box::new(property),
                computed: false,
                optional,
                span: self.node_span(start),
            };
            return Ok((expr, false));
        }

        if self.at_punct(Punct::BackQuote) && self.options.ecma_version >= EcmaVersion::Es2015 {
            if *opt_chained {
                return Err(self.err_at(
                    ErrorKind::Syntax,
                    "Optional chaining cannot appear in the tag of tagged template expressions",
                    self.cur.span.start,
                ));
            }
            let quasi = self.parse_template(true)?;
            let expr = Expression::TaggedTemplateExpression {
                tag: Box::new(base),
                quasi: Box::new(quasi),
                span: self.node_span(start),
            };
            return Ok((expr, false));
        }

        Ok((base, true))
    }

    /// `async (...)` is a call until an arrow proves otherwise.
    fn parse_async_call_or_arrow(
        &mut self,
        callee: Expression,
        start: Position,
    ) -> Result<(Expression, bool), ParseError> {
        self.expect_punct(Punct::LParen)?;
        let mut errs = DestructuringErrors::new();
        let items = self.parse_paren_items(&mut errs)?;

        if !self.can_insert_semicolon() && self.eat_punct(Punct::Arrow)? {
            self.check_pattern_errors(&errs, true)?;
            let params = self.paren_items_to_params(items)?;
            let arrow = self.parse_arrow_expression(start, params, true)?;
            return Ok((arrow, true));
        }

        self.check_expression_errors(&errs)?;
        let mut arguments = Vec::new();
        for item in items {
            match item {
                ParenItem::Expr(expr) => arguments.push(CallArgument::Expression(expr)),
                ParenItem::Spread(expr, _) => arguments.push(CallArgument::Spread(expr)),
            }
        }
        let call = Expression::CallExpression {
            callee: Box::new(callee),
            arguments,
            optional: false,
            span: self.node_span(start),
        };
        Ok((call, false))
    }

    fn parse_call_arguments(&mut self) -> Result<Vec<CallArgument>, ParseError> {
        let mut arguments = Vec::new();
        let mut first = true;
        loop {
            if self.eat_punct(Punct::RParen)? {
                break;
            }
            if first {
                first = false;
            } else {
                self.expect_punct(Punct::Comma)?;
                if self.options.ecma_version >= EcmaVersion::Es2017
                    && self.eat_punct(Punct::RParen)?
                {
                    break;
                }
            }
            if self.at_punct(Punct::Ellipsis) {
                self.next()?;
                let expr = self.parse_maybe_assign(false, None)?;
                arguments.push(CallArgument::Spread(expr));
            } else {
                arguments.push(CallArgument::Expression(self.parse_maybe_assign(false, None)?));
            }
        }
        Ok(arguments)
    }

    // Atoms

    fn parse_expr_atom(
        &mut self,
        errors: Option<&mut DestructuringErrors>,
        for_init: bool,
    ) -> Result<Expression, ParseError> {
        let start = self.cur.span.start;
        let can_be_arrow = self.potential_arrow_at == start.offset;

        match self.cur.kind {
            TokenKind::Keyword(Keyword::Super) => {
                if !self.scopes.allow_super() {
                    return Err(self.err_at(
                        ErrorKind::Syntax,
                        "'super' keyword outside a method",
                        start,
                    ));
                }
                self.next()?;
                if self.at_punct(Punct::LParen) && !self.scopes.allow_direct_super() {
                    return Err(self.err_at(
                        ErrorKind::Syntax,
                        "super() call outside constructor of a subclass",
                        start,
                    ));
                }
                if !matches!(
                    self.cur.kind,
                    TokenKind::Punct(Punct::Dot)
                        | TokenKind::Punct(Punct::LBracket)
                        | TokenKind::Punct(Punct::LParen)
                ) {
                    return Err(self.unexpected());
                }
                Ok(Expression::SuperExpression { span: self.node_span(start) })
            }
            TokenKind::Keyword(Keyword::This) => {
                self.next()?;
                Ok(Expression::ThisExpression { span: self.node_span(start) })
            }
            TokenKind::Name => {
                let escaped =
                    matches!(self.cur.value, TokenValue::Name { escaped: true, .. });
                let name = self.parse_identifier_name()?;
                if self.options.ecma_version >= EcmaVersion::Es2017
                    && !escaped
                    && name == "async"
                    && !self.cur.newline_before
                {
                    if self.eat_keyword(Keyword::Function)? {
                        return self.parse_function_expression(start, true);
                    }
                    if can_be_arrow && self.cur.kind == TokenKind::Name {
                        let param = self.parse_binding_identifier()?;
                        if self.can_insert_semicolon() {
                            return Err(self.unexpected());
                        }
                        self.expect_punct(Punct::Arrow)?;
                        return self.parse_arrow_expression(start, vec![param], true);
                    }
                }
                if can_be_arrow
                    && self.options.ecma_version >= EcmaVersion::Es2015
                    && self.at_punct(Punct::Arrow)
                    && !self.cur.newline_before
                {
                    self.next()?;
                    self.check_restricted_name(&name, "Binding", start)?;
                    let param = Pattern::Identifier { name, span: self.node_span(start) };
                    return self.parse_arrow_expression(start, vec![param], false);
                }
                Ok(Expression::Identifier { name, span: self.node_span(start) })
            }
            TokenKind::Number => {
                let value = match self.cur.value {
                    TokenValue::Number(n) => n,
                    _ => 0.0,
                };
                self.next()?;
                Ok(Expression::Literal {
                    value: Literal::Number(value),
                    span: self.node_span(start),
                })
            }
            TokenKind::BigInt => {
                let value = match &self.cur.value {
                    TokenValue::BigInt(v) => v.to_string(),
                    _ => String::new(),
                };
                self.next()?;
                Ok(Expression::Literal {
                    value: Literal::BigInt(value),
                    span: self.node_span(start),
                })
            }
            TokenKind::Str => {
                let value = match &self.cur.value {
                    TokenValue::Str(s) => s.clone(),
                    _ => String::new(),
                };
                self.next()?;
                Ok(Expression::Literal {
                    value: Literal::String(value),
                    span: self.node_span(start),
                })
            }
            TokenKind::Regex => {
                let (pattern, flags) = match &self.cur.value {
                    TokenValue::Regex { pattern, flags } => (pattern.clone(), flags.clone()),
                    _ => (String::new(), String::new()),
                };
                self.next()?;
                Ok(Expression::Literal {
                    value: Literal::Regex { pattern, flags },
                    span: self.node_span(start),
                })
            }
            TokenKind::Keyword(Keyword::Null) => {
                self.next()?;
                Ok(Expression::Literal { value: Literal::Null, span: self.node_span(start) })
            }
            TokenKind::Keyword(Keyword::True) | TokenKind::Keyword(Keyword::False) => {
                let value = self.cur.kind == TokenKind::Keyword(Keyword::True);
                self.next()?;
                Ok(Expression::Literal {
                    value: Literal::Boolean(value),
                    span: self.node_span(start),
                })
            }
            TokenKind::Punct(Punct::LParen) => {
                self.parse_paren_and_distinguish(can_be_arrow, for_init, errors)
            }
            TokenKind::Punct(Punct::LBracket) => self.parse_array_literal(errors),
            TokenKind::Punct(Punct::LBrace) => self.parse_object_literal(errors),
            TokenKind::Keyword(Keyword::Function) => {
                self.next()?;
                self.parse_function_expression(start, false)
            }
            TokenKind::Keyword(Keyword::Class) => self.parse_class_expression(),
            TokenKind::Keyword(Keyword::New) => self.parse_new(for_init),
            TokenKind::Punct(Punct::BackQuote) => self.parse_template(false),
            TokenKind::Keyword(Keyword::Import)
                if self.options.ecma_version >= EcmaVersion::Es2020 =>
            {
                self.next()?;
                if self.at_punct(Punct::Dot) {
                    return self.parse_import_meta(start);
                }
                self.expect_punct(Punct::LParen)?;
                let source = self.parse_maybe_assign(false, None)?;
                if self.at_punct(Punct::Comma) {
                    // Exactly one specifier and no trailing comma
                    let at = self.cur.span.start;
                    self.next()?;
                    if self.at_punct(Punct::RParen) {
                        return Err(self.err_at(
                            ErrorKind::Syntax,
                            "Trailing comma is not allowed in import()",
                            at,
                        ));
                    }
                    return Err(self.err_at(ErrorKind::Syntax, "Unexpected token", at));
                }
                self.expect_punct(Punct::RParen)?;
                Ok(Expression::ImportExpression {
                    source: Box::new(source),
                    span: self.node_span(start),
                })
            }
            _ => Err(self.unexpected()),
        }
    }

    fn parse_import_meta(&mut self, start: Position) -> Result<Expression, ParseError> {
        self.expect_punct(Punct::Dot)?;
        if !self.cur.is_contextual("meta") {
            return Err(self.err_at(
                ErrorKind::Syntax,
                "The only valid meta property for import is 'import.meta'",
                self.cur.span.start,
            ));
        }
        if self.options.source_type != SourceType::Module {
            return Err(self.err_at(
                ErrorKind::Syntax,
                "Cannot use 'import.meta' outside a module",
                start,
            ));
        }
        self.next()?;
        Ok(Expression::MetaProperty {
            meta: "import".to_string(),
            property: "meta".to_string(),
            span: self.node_span(start),
        })
    }

    fn parse_new(&mut self, for_init: bool) -> Result<Expression, ParseError> {
        let start = self.cur.span.start;
        self.next()?;
        if self.at_punct(Punct::Dot) && self.options.ecma_version >= EcmaVersion::Es2015 {
            self.next()?;
            if !self.cur.is_contextual("target") {
                return Err(self.err_at(
                    ErrorKind::Syntax,
                    "The only valid meta property for new is 'new.target'",
                    self.cur.span.start,
                ));
            }
            if !self.scopes.allow_new_target() {
                return Err(self.err_at(
                    ErrorKind::Syntax,
                    "'new.target' can only be used in functions and class static block",
                    start,
                ));
            }
            self.next()?;
            return Ok(Expression::MetaProperty {
                meta: "new".to_string(),
                property: "target".to_string(),
                span: self.node_span(start),
            });
        }
        let callee_start = self.cur.span.start;
        if self.cur.kind == TokenKind::Keyword(Keyword::Import) {
            return Err(self.err_at(
                ErrorKind::Syntax,
                "Cannot use new with import()",
                callee_start,
            ));
        }
        let atom = self.parse_expr_atom(None, for_init)?;
        let callee = self.parse_subscripts(atom, callee_start, true, for_init)?;
        let arguments = if self.eat_punct(Punct::LParen)? {
            self.parse_call_arguments()?
        } else {
            Vec::new()
        };
        Ok(Expression::NewExpression {
            callee: Box::new(callee),
            arguments,
            span: self.node_span(start),
        })
    }

    // Parentheses: sequence expression or arrow parameter list

    fn parse_paren_and_distinguish(
        &mut self,
        can_be_arrow: bool,
        for_init: bool,
        outer: Option<&mut DestructuringErrors>,
    ) -> Result<Expression, ParseError> {
        let start = self.cur.span.start;
        self.next()?;

        if self.options.ecma_version < EcmaVersion::Es2015 {
            let inner = self.parse_expression(false)?;
            self.expect_punct(Punct::RParen)?;
            return Ok(self.wrap_parens(inner, start, outer));
        }

        let mut errs = DestructuringErrors::new();
        let items = self.parse_paren_items(&mut errs)?;

        if can_be_arrow && !self.can_insert_semicolon() && self.eat_punct(Punct::Arrow)? {
            self.check_pattern_errors(&errs, true)?;
            let params = self.paren_items_to_params(items)?;
            return self.parse_arrow_expression(start, params, false);
        }

        if items.is_empty() {
            return Err(self.unexpected());
        }
        let mut expressions = Vec::new();
        for item in items {
            match item {
                ParenItem::Expr(expr) => expressions.push(expr),
                ParenItem::Spread(_, spread_at) => {
                    return Err(self.err_at(ErrorKind::Syntax, "Unexpected token", spread_at));
                }
            }
        }
        self.check_expression_errors(&errs)?;

        let inner = if expressions.len() == 1 {
            expressions.remove(0)
        } else {
            let first = expressions[0].span().start;
            Expression::SequenceExpression {
                expressions,
                span: Span { start: first, end: self.prev.span.start },
            }
        };
        Ok(self.wrap_parens(inner, start, outer))
    }

    /// Either keeps the wrapper node or records the parens into the
    /// caller's deferred errors, so a later pattern conversion can
    /// reject `({a}) = x` and `((a)) => x`.
    fn wrap_parens(
        &mut self,
        inner: Expression,
        start: Position,
        outer: Option<&mut DestructuringErrors>,
    ) -> Expression {
        if self.options.preserve_parens {
            return Expression::ParenthesizedExpression {
                expression: Box::new(inner),
                span: self.node_span(start),
            };
        }
        if let Some(errs) = outer {
            if errs.paren_bind.is_none() {
                errs.paren_bind = Some(start);
            }
            if matches!(
                inner,
                Expression::ObjectExpression { .. } | Expression::ArrayExpression { .. }
            ) && errs.paren_assign.is_none()
            {
                errs.paren_assign = Some(start);
            }
        }
        inner
    }

    fn parse_paren_items(
        &mut self,
        errs: &mut DestructuringErrors,
    ) -> Result<Vec<ParenItem>, ParseError> {
        let mut items = Vec::new();
        let mut first = true;
        loop {
            if self.eat_punct(Punct::RParen)? {
                break;
            }
            if first {
                first = false;
            } else {
                self.expect_punct(Punct::Comma)?;
                if self.options.ecma_version >= EcmaVersion::Es2017
                    && self.eat_punct(Punct::RParen)?
                {
                    break;
                }
            }
            if self.at_punct(Punct::Ellipsis) {
                let spread_at = self.cur.span.start;
                self.next()?;
                let expr = self.parse_maybe_assign(false, Some(errs))?;
                if self.at_punct(Punct::Comma) && errs.trailing_comma.is_none() {
                    errs.trailing_comma = Some(self.cur.span.start);
                }
                items.push(ParenItem::Spread(expr, spread_at));
            } else {
                items.push(ParenItem::Expr(self.parse_maybe_assign(false, Some(errs))?));
            }
        }
        Ok(items)
    }

    fn paren_items_to_params(
        &mut self,
        items: Vec<ParenItem>,
    ) -> Result<Vec<Pattern>, ParseError> {
        let mut params = Vec::new();
        let total = items.len();
        for (i, item) in items.into_iter().enumerate() {
            match item {
                ParenItem::Expr(expr) => {
                    params.push(self.expression_to_pattern(expr, true)?);
                }
                ParenItem::Spread(expr, spread_at) => {
                    if i + 1 < total {
                        return Err(self.err_at(
                            ErrorKind::Syntax,
                            "Rest element must be last element",
                            spread_at,
                        ));
                    }
                    let arg = self.expression_to_pattern(expr, true)?;
                    if matches!(arg, Pattern::Assignment { .. }) {
                        return Err(self.err_at(
                            ErrorKind::Syntax,
                            "Rest elements cannot have a default value",
                            spread_at,
                        ));
                    }
                    let end = arg.span().end;
                    params.push(Pattern::Rest {
                        argument: Box::new(arg),
                        span: Span { start: spread_at, end },
                    });
                }
            }
        }
        Ok(params)
    }

    /// Arrow function body, entered with the parameter patterns already
    /// known and `=>` consumed.
    pub(crate) fn parse_arrow_expression(
        &mut self,
        start: Position,
        params: Vec<Pattern>,
        is_async: bool,
    ) -> Result<Expression, ParseError> {
        let mut flags = ScopeFlags::FUNCTION | ScopeFlags::ARROW;
        if is_async {
            flags |= ScopeFlags::ASYNC;
        }
        self.scopes.enter(flags);
        self.check_params(&params, true)?;

        let body = if self.at_punct(Punct::LBrace) {
            let old_strict = self.strict;
            self.next()?;
            let (body, _) = self.parse_function_body_block(&params)?;
            self.set_strict(old_strict);
            ArrowBody::Block(body)
        } else {
            ArrowBody::Expression(Box::new(self.parse_maybe_assign(false, None)?))
        };
        self.scopes.exit();

        Ok(Expression::ArrowFunctionExpression {
            params,
            body,
            is_async,
            span: self.node_span(start),
        })
    }

    /// Declare parameters in the current function scope and reject
    /// duplicates where the language does.
    pub(crate) fn check_params(
        &mut self,
        params: &[Pattern],
        force_unique: bool,
    ) -> Result<(), ParseError> {
        let simple = params.iter().all(|p| matches!(p, Pattern::Identifier { .. }));
        let unique = force_unique || self.strict || !simple;
        let mut seen: Vec<String> = Vec::new();
        for param in params {
            self.declare_pattern(param, BindingKind::Var)?;
            if unique {
                let mut names = Vec::new();
                collect_bound_names(param, &mut names);
                for (name, pos) in names {
                    if seen.iter().any(|s| s == &name) {
                        return Err(self.err_at(
                            ErrorKind::Syntax,
                            "Argument name clash",
                            pos,
                        ));
                    }
                    seen.push(name);
                }
            }
        }
        Ok(())
    }

    // Array and object literals

    fn parse_array_literal(
        &mut self,
        errors: Option<&mut DestructuringErrors>,
    ) -> Result<Expression, ParseError> {
        let start = self.cur.span.start;
        self.next()?;
        let mut own = DestructuringErrors::new();
        let errs = match errors {
            Some(e) => e,
            None => &mut own,
        };
        let mut elements = Vec::new();
        let mut first = true;
        loop {
            if self.eat_punct(Punct::RBracket)? {
                break;
            }
            if first {
                first = false;
            } else {
                self.expect_punct(Punct::Comma)?;
                if self.eat_punct(Punct::RBracket)? {
                    break;
                }
            }
            if self.at_punct(Punct::Comma) {
                elements.push(None);
                continue;
            }
            if self.at_punct(Punct::Ellipsis) && self.options.ecma_version >= EcmaVersion::Es2015
            {
                self.next()?;
                let expr = self.parse_maybe_assign(false, Some(errs))?;
                if self.at_punct(Punct::Comma) && errs.trailing_comma.is_none() {
                    errs.trailing_comma = Some(self.cur.span.start);
                }
                elements.push(Some(ArrayElement::Spread(expr)));
            } else {
                elements.push(Some(ArrayElement::Expression(
                    self.parse_maybe_assign(false, Some(errs))?,
                )));
            }
        }
        Ok(Expression::ArrayExpression { elements, span: self.node_span(start) })
    }

    fn parse_object_literal(
        &mut self,
        errors: Option<&mut DestructuringErrors>,
    ) -> Result<Expression, ParseError> {
        let start = self.cur.span.start;
        self.next()?;
        let mut own = DestructuringErrors::new();
        let owns = errors.is_none();
        let errs = match errors {
            Some(e) => e,
            None => &mut own,
        };
        let mut properties = Vec::new();
        let mut saw_proto = false;
        let mut first = true;
        loop {
            if self.eat_punct(Punct::RBrace)? {
                break;
            }
            if first {
                first = false;
            } else {
                self.expect_punct(Punct::Comma)?;
                if self.eat_punct(Punct::RBrace)? {
                    break;
                }
            }
            if self.at_punct(Punct::Ellipsis) {
                if self.options.ecma_version < EcmaVersion::Es2018 {
                    return Err(self.unexpected());
                }
                let spread_start = self.cur.span.start;
                self.next()?;
                let argument = self.parse_maybe_assign(false, Some(errs))?;
                if self.at_punct(Punct::Comma) && errs.trailing_comma.is_none() {
                    errs.trailing_comma = Some(self.cur.span.start);
                }
                properties.push(ObjectMember::Spread {
                    argument,
                    span: self.node_span(spread_start),
                });
                continue;
            }
            let property = self.parse_object_property(errs, &mut saw_proto)?;
            properties.push(property);
        }
        let expr = Expression::ObjectExpression { properties, span: self.node_span(start) };
        if owns {
            self.check_expression_errors(errs)?;
        }
        Ok(expr)
    }

    fn parse_object_property(
        &mut self,
        errs: &mut DestructuringErrors,
        saw_proto: &mut bool,
    ) -> Result<ObjectMember, ParseError> {
        let start = self.cur.span.start;
        let mut is_async = false;
        let mut is_generator = false;

        if self.options.ecma_version >= EcmaVersion::Es2017 && self.cur.is_contextual("async") {
            let ahead = self.peek_token()?;
            if !ahead.newline_before
                && (is_property_key_start(&ahead) || ahead.kind == TokenKind::Punct(Punct::Star))
            {
                self.next()?;
                is_async = true;
            }
        }
        if self.options.ecma_version >= EcmaVersion::Es2015 && self.at_punct(Punct::Star) {
            if is_async && self.options.ecma_version < EcmaVersion::Es2018 {
                return Err(self.unexpected());
            }
            self.next()?;
            is_generator = true;
        }

        // get/set when another key follows
        if !is_async
            && !is_generator
            && self.options.ecma_version >= EcmaVersion::Es5
            && (self.cur.is_contextual("get") || self.cur.is_contextual("set"))
        {
            let ahead = self.peek_token()?;
            if is_property_key_start(&ahead) {
                let kind = if self.cur.is_contextual("get") {
                    PropertyKind::Get
                } else {
                    PropertyKind::Set
                };
                self.next()?;
                let (key, computed) = self.parse_property_key()?;
                let value = self.parse_method(false, false, false)?;
                self.check_accessor_arity(&value, kind)?;
                return Ok(ObjectMember::Property {
                    key,
                    value,
                    kind,
                    shorthand: false,
                    computed,
                    method: false,
                    span: self.node_span(start),
                });
            }
        }

        let (key, computed) = self.parse_property_key()?;

        if (is_async || is_generator || self.at_punct(Punct::LParen))
            && self.options.ecma_version >= EcmaVersion::Es2015
        {
            let value = self.parse_method(is_async, is_generator, false)?;
            return Ok(ObjectMember::Property {
                key,
                value,
                kind: PropertyKind::Init,
                shorthand: false,
                computed,
                method: true,
                span: self.node_span(start),
            });
        }

        if self.eat_punct(Punct::Colon)? {
            if !computed && key.static_name() == Some("__proto__") {
                if *saw_proto {
                    if errs.double_proto.is_none() {
                        errs.double_proto = Some(start);
                    }
                } else {
                    *saw_proto = true;
                }
            }
            let value = self.parse_maybe_assign(false, Some(errs))?;
            return Ok(ObjectMember::Property {
                key,
                value,
                kind: PropertyKind::Init,
                shorthand: false,
                computed,
                method: false,
                span: self.node_span(start),
            });
        }

        // Shorthand
        if self.options.ecma_version < EcmaVersion::Es2015 || computed {
            return Err(self.unexpected());
        }
        let name = match &key {
            PropertyKey::Identifier(name) => name.clone(),
            _ => return Err(self.unexpected()),
        };
        self.check_unreserved(&name, start)?;
        let name_span = self.node_span(start);
        let value = if self.at_punct(Punct::Eq) {
            if errs.shorthand_assign.is_none() {
                errs.shorthand_assign = Some(self.cur.span.start);
            }
            self.next()?;
            let right = self.parse_maybe_assign(false, None)?;
            Expression::AssignmentExpression {
                left: AssignmentTarget::Identifier { name, span: name_span },
                operator: AssignmentOperator::Assign,
                right: Box::new(right),
                span: self.node_span(start),
            }
        } else {
            Expression::Identifier { name, span: name_span }
        };
        Ok(ObjectMember::Property {
            key,
            value,
            kind: PropertyKind::Init,
            shorthand: true,
            computed: false,
            method: false,
            span: self.node_span(start),
        })
    }

    /// Property name: identifier, keyword, string, number, private name
    /// (classes only), or a computed `[expr]`.
    pub(crate) fn parse_property_key(&mut self) -> Result<(PropertyKey, bool), ParseError> {
        if self.options.ecma_version >= EcmaVersion::Es2015
            && self.eat_punct(Punct::LBracket)?
        {
            let key = self.parse_maybe_assign(false, None)?;
            self.expect_punct(Punct::RBracket)?;
            return Ok((PropertyKey::Computed(Box::new(key)), true));
        }
        match self.cur.kind {
            TokenKind::Str => {
                let value = match &self.cur.value {
                    TokenValue::Str(s) => s.clone(),
                    _ => String::new(),
                };
                self.next()?;
                Ok((PropertyKey::String(value), false))
            }
            TokenKind::Number => {
                let value = match self.cur.value {
                    TokenValue::Number(n) => n,
                    _ => 0.0,
                };
                self.next()?;
                Ok((PropertyKey::Number(value), false))
            }
            TokenKind::Name | TokenKind::Keyword(_) => {
                let name = self.parse_ident_liberal()?;
                Ok((PropertyKey::Identifier(name), false))
            }
            _ => Err(self.unexpected()),
        }
    }

    pub(crate) fn check_accessor_arity(
        &self,
        value: &Expression,
        kind: PropertyKind,
    ) -> Result<(), ParseError> {
        let Expression::FunctionExpression { params, span, .. } = value else {
            return Ok(());
        };
        match kind {
            PropertyKind::Get if !params.is_empty() => Err(self.err_at(
                ErrorKind::Syntax,
                "getter should have no params",
                span.start,
            )),
            PropertyKind::Set if params.len() != 1 => Err(self.err_at(
                ErrorKind::Syntax,
                "setter should have exactly one param",
                span.start,
            )),
            PropertyKind::Set if matches!(params[0], Pattern::Rest { .. }) => Err(self.err_at(
                ErrorKind::Syntax,
                "Setter cannot use rest params",
                span.start,
            )),
            _ => Ok(()),
        }
    }

    // Templates

    pub(crate) fn parse_template(&mut self, tagged: bool) -> Result<Expression, ParseError> {
        let start = self.cur.span.start;
        self.expect_punct(Punct::BackQuote)?;
        let mut quasis: Vec<TemplateElement> = Vec::new();
        let mut expressions = Vec::new();
        let mut need_chunk = true;
        loop {
            match self.cur.kind {
                TokenKind::Template => {
                    let chunk_span = self.cur.span;
                    let cooked = match &self.cur.value {
                        TokenValue::Template { cooked } => cooked.clone(),
                        _ => None,
                    };
                    if cooked.is_none() && !tagged {
                        return Err(self.err_at(
                            ErrorKind::Syntax,
                            "Bad escape sequence in untagged template literal",
                            chunk_span.start,
                        ));
                    }
                    let raw = self.source[chunk_span.start.offset..chunk_span.end.offset]
                        .replace("\r\n", "\n")
                        .replace('\r', "\n");
                    quasis.push(TemplateElement {
                        raw,
                        cooked,
                        tail: false,
                        span: self.maybe_zero_span(chunk_span),
                    });
                    need_chunk = false;
                    self.next()?;
                }
                TokenKind::Punct(Punct::DollarBraceL) => {
                    if need_chunk {
                        quasis.push(self.empty_template_element());
                    }
                    self.next()?;
                    expressions.push(self.parse_expression(false)?);
                    self.expect_punct(Punct::RBrace)?;
                    need_chunk = true;
                }
                TokenKind::Punct(Punct::BackQuote) => {
                    if need_chunk {
                        quasis.push(self.empty_template_element());
                    }
                    if let Some(last) = quasis.last_mut() {
                        last.tail = true;
                    }
                    self.next()?;
                    break;
                }
                _ => return Err(self.unexpected()),
            }
        }
        Ok(Expression::TemplateLiteral {
            quasis,
            expressions,
            span: self.node_span(start),
        })
    }

    fn empty_template_element(&self) -> TemplateElement {
        let at = self.cur.span.start;
        TemplateElement {
            raw: String::new(),
            cooked: Some(String::new()),
            tail: false,
            span: self.maybe_zero_span(Span::empty(at)),
        }
    }

    // Identifiers

    /// Identifier reference or binding name; rejects keywords and words
    /// reserved in the current context.
    pub(crate) fn parse_identifier_name(&mut self) -> Result<String, ParseError> {
        let start = self.cur.span.start;
        let TokenValue::Name { name, .. } = &self.cur.value else {
            return Err(self.unexpected());
        };
        let name = name.clone();
        self.check_unreserved(&name, start)?;
        self.next()?;
        Ok(name)
    }

    /// Identifier in positions where keywords are acceptable (member
    /// names, property names, labels after `.`).
    pub(crate) fn parse_ident_liberal(&mut self) -> Result<String, ParseError> {
        let name = match (&self.cur.kind, &self.cur.value) {
            (TokenKind::Name, TokenValue::Name { name, .. }) => name.clone(),
            (TokenKind::Keyword(kw), _) => kw.as_str().to_string(),
            _ => return Err(self.unexpected()),
        };
        self.next()?;
        Ok(name)
    }

    pub(crate) fn check_unreserved(&self, name: &str, pos: Position) -> Result<(), ParseError> {
        if self.scopes.in_generator() && name == "yield" {
            return Err(self.err_at(
                ErrorKind::Syntax,
                "Cannot use 'yield' as identifier inside a generator",
                pos,
            ));
        }
        if name == "await" {
            if self.scopes.in_async() {
                return Err(self.err_at(
                    ErrorKind::Syntax,
                    "Cannot use 'await' as identifier inside an async function",
                    pos,
                ));
            }
            if self.options.source_type == SourceType::Module {
                return Err(self.err_at(
                    ErrorKind::Syntax,
                    "Cannot use 'await' as identifier inside a module",
                    pos,
                ));
            }
        }
        if Keyword::from_word(name).is_some() {
            return Err(self.err_at(
                ErrorKind::Syntax,
                format!("Unexpected keyword '{name}'"),
                pos,
            ));
        }
        if name == "enum" && self.options.allow_reserved != AllowReserved::Yes {
            return Err(self.err_at(
                ErrorKind::Syntax,
                "The keyword 'enum' is reserved",
                pos,
            ));
        }
        let strict_reserved = self.strict || self.options.allow_reserved == AllowReserved::Never;
        if strict_reserved
            && self.options.allow_reserved != AllowReserved::Yes
            && STRICT_RESERVED.contains(&name)
        {
            return Err(self.err_at(
                ErrorKind::Syntax,
                format!("The keyword '{name}' is reserved"),
                pos,
            ));
        }
        Ok(())
    }

    // Private names

    /// `#name` reference; records the use for the enclosing class to
    /// verify once its body is complete.
    pub(crate) fn parse_private_name_expression(&mut self) -> Result<Expression, ParseError> {
        let start = self.cur.span.start;
        let name = match &self.cur.value {
            TokenValue::Name { name, .. } => name.clone(),
            _ => return Err(self.unexpected()),
        };
        if self.private_names.is_empty() {
            return Err(self.err_at(
                ErrorKind::Syntax,
                format!("Private field '#{name}' must be declared in an enclosing class"),
                start,
            ));
        }
        if let Some(ctx) = self.private_names.last_mut() {
            ctx.used.push((name.clone(), start));
        }
        self.next()?;
        Ok(Expression::PrivateName { name, span: self.node_span(start) })
    }
}

/// Collect every name bound by a pattern with its position.
pub(crate) fn collect_bound_names(pattern: &Pattern, out: &mut Vec<(String, Position)>) {
    match pattern {
        Pattern::Identifier { name, span } => out.push((name.clone(), span.start)),
        Pattern::Object { properties, rest, .. } => {
            for prop in properties {
                collect_bound_names(&prop.value, out);
            }
            if let Some(rest) = rest {
                collect_bound_names(rest, out);
            }
        }
        Pattern::Array { elements, .. } => {
            for element in elements.iter().flatten() {
                collect_bound_names(element, out);
            }
        }
        Pattern::Assignment { left, .. } => collect_bound_names(left, out),
        Pattern::Rest { argument, .. } => collect_bound_names(argument, out),
        Pattern::Member(_) => {}
    }
}

/// Whether a token can begin a (non-computed or computed) property key.
fn is_property_key_start(token: &crate::token::Token) -> bool {
    matches!(
        token.kind,
        TokenKind::Name
            | TokenKind::Str
            | TokenKind::Number
            | TokenKind::Keyword(_)
            | TokenKind::Punct(Punct::LBracket)
    )
}

