//! Binding patterns and assignment targets.
//!
//! Destructuring makes `{` and `(` ambiguous until an `=` or `=>` is
//! seen, so object and array literals are parsed as expressions first and
//! converted to patterns on demand. [`DestructuringErrors`] records the
//! constructs that are only legal in one reading; whichever reading wins
//! raises the recorded position for the other.

use syntax_core::{ErrorKind, ParseError, Position};

use crate::node::{
    ArrayElement, Expression, ObjectMember, ObjectPatternProperty, Pattern, PropertyKey,
    PropertyKind,
};
use crate::options::EcmaVersion;
use crate::scope::BindingKind;
use crate::token::Punct;
use crate::Parser;

/// Positions of constructs whose validity depends on whether the
/// surrounding expression turns out to be a pattern.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DestructuringErrors {
    /// `{ a = 1 }` shorthand with a default
    pub shorthand_assign: Option<Position>,
    /// Comma after a rest element
    pub trailing_comma: Option<Position>,
    /// Parenthesized target in assignment position
    pub paren_assign: Option<Position>,
    /// Parenthesized target in binding position
    pub paren_bind: Option<Position>,
    /// Second `__proto__` key in an object literal
    pub double_proto: Option<Position>,
}

impl DestructuringErrors {
    pub(crate) fn new() -> Self {
        DestructuringErrors::default()
    }
}

impl<'s> Parser<'s> {
    /// Raise the deferred errors that apply when the expression stayed an
    /// expression.
    pub(crate) fn check_expression_errors(
        &self,
        errors: &DestructuringErrors,
    ) -> Result<(), ParseError> {
        if let Some(pos) = errors.double_proto {
            return Err(self.err_at(
                ErrorKind::Syntax,
                "Redefinition of __proto__ property",
                pos,
            ));
        }
        if let Some(pos) = errors.shorthand_assign {
            return Err(self.err_at(
                ErrorKind::Syntax,
                "Shorthand property assignments are valid only in destructuring patterns",
                pos,
            ));
        }
        Ok(())
    }

    /// Raise the deferred errors that apply when the expression became a
    /// pattern.
    pub(crate) fn check_pattern_errors(
        &self,
        errors: &DestructuringErrors,
        is_binding: bool,
    ) -> Result<(), ParseError> {
        if let Some(pos) = errors.trailing_comma {
            return Err(self.err_at(
                ErrorKind::Syntax,
                "Comma is not permitted after the rest element",
                pos,
            ));
        }
        let paren = if is_binding { errors.paren_bind } else { errors.paren_assign };
        if let Some(pos) = paren {
            return Err(self.err_at(ErrorKind::Syntax, "Parenthesized pattern", pos));
        }
        Ok(())
    }

    /// Convert an already-parsed expression into a pattern.
    ///
    /// This is a total conversion: the input expression is consumed and
    /// every node is either rebuilt as a pattern or rejected here.
    pub(crate) fn expression_to_pattern(
        &mut self,
        expr: Expression,
        binding: bool,
    ) -> Result<Pattern, ParseError> {
        let at = expr.span().start;
        match expr {
            Expression::Identifier { name, span } => {
                let action = if binding { "Binding" } else { "Assigning to" };
                self.check_restricted_name(&name, action, span.start)?;
                Ok(Pattern::Identifier { name, span })
            }
            Expression::ObjectExpression { properties, span } => {
                let mut props = Vec::new();
                let mut rest: Option<Box<Pattern>> = None;
                let total = properties.len();
                for (i, member) in properties.into_iter().enumerate() {
                    match member {
                        ObjectMember::Property {
                            key,
                            value,
                            kind,
                            shorthand,
                            computed,
                            method,
                            span: prop_span,
                        } => {
                            if rest.is_some() {
                                return Err(self.err_at(
                                    ErrorKind::Syntax,
                                    "Rest element must be last element",
                                    prop_span.start,
                                ));
                            }
                            if kind != PropertyKind::Init || method {
                                return Err(self.err_at(
                                    ErrorKind::Syntax,
                                    "Object pattern can't contain getter or setter",
                                    prop_span.start,
                                ));
                            }
                            let value = self.expression_to_pattern(value, binding)?;
                            props.push(ObjectPatternProperty {
                                key,
                                value,
                                shorthand,
                                computed,
                                span: prop_span,
                            });
                        }
                        ObjectMember::Spread { argument, span: spread_span } => {
                            if rest.is_some() || i + 1 < total {
                                return Err(self.err_at(
                                    ErrorKind::Syntax,
                                    "Rest element must be last element",
                                    spread_span.start,
                                ));
                            }
                            let arg = self.expression_to_pattern(argument, binding)?;
                            match &arg {
                                Pattern::Assignment { .. } => {
                                    return Err(self.err_at(
                                        ErrorKind::Syntax,
                                        "Rest elements cannot have a default value",
                                        spread_span.start,
                                    ));
                                }
                                Pattern::Identifier { .. } => {}
                                Pattern::Member(_) if !binding => {}
                                _ => {
                                    return Err(self.err_at(
                                        ErrorKind::Syntax,
                                        "Invalid rest operator's argument",
                                        spread_span.start,
                                    ));
                                }
                            }
                            rest = Some(Box::new(arg));
                        }
                    }
                }
                Ok(Pattern::Object { properties: props, rest, span })
            }
            Expression::ArrayExpression { elements, span } => {
                let total = elements.len();
                let mut out = Vec::new();
                for (i, element) in elements.into_iter().enumerate() {
                    match element {
                        None => out.push(None),
                        Some(ArrayElement::Expression(inner)) => {
                            out.push(Some(self.expression_to_pattern(inner, binding)?));
                        }
                        Some(ArrayElement::Spread(inner)) => {
                            let spread_at = inner.span().start;
                            if i + 1 < total {
                                return Err(self.err_at(
                                    ErrorKind::Syntax,
                                    "Rest element must be last element",
                                    spread_at,
                                ));
                            }
                            let arg = self.expression_to_pattern(inner, binding)?;
                            if matches!(arg, Pattern::Assignment { .. }) {
                                return Err(self.err_at(
                                    ErrorKind::Syntax,
                                    "Rest elements cannot have a default value",
                                    spread_at,
                                ));
                            }
                            let rest_span =
                                syntax_core::Span { start: spread_at, end: arg.span().end };
                            out.push(Some(Pattern::Rest {
                                argument: Box::new(arg),
                                span: rest_span,
                            }));
                        }
                    }
                }
                Ok(Pattern::Array { elements: out, span })
            }
            Expression::AssignmentExpression { left, operator, right, span } => {
                if operator != crate::node::AssignmentOperator::Assign {
                    return Err(self.err_at(
                        ErrorKind::Syntax,
                        "Only '=' operator can be used for specifying default value",
                        at,
                    ));
                }
                let target = self.assignment_target_to_pattern(left, binding)?;
                Ok(Pattern::Assignment {
                    left: Box::new(target),
                    right,
                    span,
                })
            }
            Expression::MemberExpression { .. } => {
                if binding {
                    return Err(self.err_at(ErrorKind::Syntax, "Binding member expression", at));
                }
                Ok(Pattern::Member(Box::new(expr)))
            }
            Expression::ParenthesizedExpression { expression, .. } => {
                let inner = self.expression_to_pattern(*expression, binding)?;
                match inner {
                    Pattern::Identifier { .. } | Pattern::Member(_) if !binding => Ok(inner),
                    _ => Err(self.err_at(ErrorKind::Syntax, "Parenthesized pattern", at)),
                }
            }
            _ => Err(self.err_at(ErrorKind::Syntax, "Assigning to rvalue", at)),
        }
    }

    fn assignment_target_to_pattern(
        &mut self,
        target: crate::node::AssignmentTarget,
        binding: bool,
    ) -> Result<Pattern, ParseError> {
        match target {
            crate::node::AssignmentTarget::Identifier { name, span } => {
                Ok(Pattern::Identifier { name, span })
            }
            crate::node::AssignmentTarget::Member(expr) => {
                if binding {
                    let at = expr.span().start;
                    return Err(self.err_at(ErrorKind::Syntax, "Binding member expression", at));
                }
                Ok(Pattern::Member(expr))
            }
            crate::node::AssignmentTarget::Pattern(pat) => Ok(pat),
        }
    }

    // Direct pattern parsing, used in positions that are unambiguously
    // bindings (declarations, parameter lists, catch clauses).

    /// Identifier, array pattern, or object pattern.
    pub(crate) fn parse_binding_atom(&mut self) -> Result<Pattern, ParseError> {
        if self.options.ecma_version >= EcmaVersion::Es2015 {
            if self.at_punct(Punct::LBracket) {
                let start = self.cur.span.start;
                self.next()?;
                let elements =
                    self.parse_binding_list(Punct::RBracket, true, true)?;
                return Ok(Pattern::Array { elements, span: self.node_span(start) });
            }
            if self.at_punct(Punct::LBrace) {
                return self.parse_object_pattern();
            }
        }
        self.parse_binding_identifier()
    }

    pub(crate) fn parse_binding_identifier(&mut self) -> Result<Pattern, ParseError> {
        let start = self.cur.span.start;
        let name = self.parse_identifier_name()?;
        self.check_restricted_name(&name, "Binding", start)?;
        Ok(Pattern::Identifier { name, span: self.node_span(start) })
    }

    /// Comma-separated patterns up to `close`. Holes are permitted in
    /// array patterns only.
    pub(crate) fn parse_binding_list(
        &mut self,
        close: Punct,
        allow_empty: bool,
        allow_trailing: bool,
    ) -> Result<Vec<Option<Pattern>>, ParseError> {
        let mut elements = Vec::new();
        let mut first = true;
        loop {
            if self.eat_punct(close)? {
                break;
            }
            if first {
                first = false;
            } else {
                self.expect_punct(Punct::Comma)?;
                if allow_trailing && self.eat_punct(close)? {
                    break;
                }
            }
            if allow_empty && self.at_punct(Punct::Comma) {
                elements.push(None);
                continue;
            }
            if self.at_punct(Punct::Ellipsis) {
                let rest = self.parse_rest_binding()?;
                if self.at_punct(Punct::Comma) {
                    return Err(self.err_at(
                        ErrorKind::Syntax,
                        "Comma is not permitted after the rest element",
                        self.cur.span.start,
                    ));
                }
                elements.push(Some(rest));
                self.expect_punct(close)?;
                break;
            }
            elements.push(Some(self.parse_maybe_default()?));
        }
        Ok(elements)
    }

    /// `...pattern`; any binding atom may follow in array patterns and
    /// parameter lists.
    pub(crate) fn parse_rest_binding(&mut self) -> Result<Pattern, ParseError> {
        let start = self.cur.span.start;
        self.expect_punct(Punct::Ellipsis)?;
        let argument = self.parse_binding_atom()?;
        if self.at_punct(Punct::Eq) {
            return Err(self.err_at(
                ErrorKind::Syntax,
                "Rest elements cannot have a default value",
                self.cur.span.start,
            ));
        }
        Ok(Pattern::Rest { argument: Box::new(argument), span: self.node_span(start) })
    }

    /// Pattern with an optional `= default`.
    pub(crate) fn parse_maybe_default(&mut self) -> Result<Pattern, ParseError> {
        let start = self.cur.span.start;
        let pat = self.parse_binding_atom()?;
        if self.options.ecma_version < EcmaVersion::Es2015 || !self.eat_punct(Punct::Eq)? {
            return Ok(pat);
        }
        let right = self.parse_maybe_assign(false, None)?;
        Ok(Pattern::Assignment {
            left: Box::new(pat),
            right: Box::new(right),
            span: self.node_span(start),
        })
    }

    fn parse_object_pattern(&mut self) -> Result<Pattern, ParseError> {
        let start = self.cur.span.start;
        self.expect_punct(Punct::LBrace)?;
        let mut properties = Vec::new();
        let mut rest: Option<Box<Pattern>> = None;
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
                // Object rest binds a plain identifier only
                let argument = self.parse_binding_identifier()?;
                if self.at_punct(Punct::Comma) {
                    return Err(self.err_at(
                        ErrorKind::Syntax,
                        "Comma is not permitted after the rest element",
                        self.cur.span.start,
                    ));
                }
                rest = Some(Box::new(Pattern::Rest {
                    argument: Box::new(argument),
                    span: self.node_span(spread_start),
                }));
                self.expect_punct(Punct::RBrace)?;
                break;
            }
            properties.push(self.parse_pattern_property()?);
        }
        Ok(Pattern::Object { properties, rest, span: self.node_span(start) })
    }

    fn parse_pattern_property(&mut self) -> Result<ObjectPatternProperty, ParseError> {
        let start = self.cur.span.start;
        let (key, computed) = self.parse_property_key()?;
        if self.eat_punct(Punct::Colon)? {
            let value = self.parse_maybe_default()?;
            return Ok(ObjectPatternProperty {
                key,
                value,
                shorthand: false,
                computed,
                span: self.node_span(start),
            });
        }
        // Shorthand: the key doubles as the bound name
        let name = match &key {
            PropertyKey::Identifier(name) if !computed => name.clone(),
            _ => return Err(self.unexpected()),
        };
        self.check_restricted_name(&name, "Binding", start)?;
        let mut value = Pattern::Identifier { name, span: self.node_span(start) };
        if self.options.ecma_version >= EcmaVersion::Es2015 && self.eat_punct(Punct::Eq)? {
            let right = self.parse_maybe_assign(false, None)?;
            value = Pattern::Assignment {
                left: Box::new(value),
                right: Box::new(right),
                span: self.node_span(start),
            };
        }
        Ok(ObjectPatternProperty {
            key,
            value,
            shorthand: true,
            computed: false,
            span: self.node_span(start),
        })
    }

    // Declaration and target checks

    /// Walk a pattern, declaring every bound name in the current scope.
    pub(crate) fn declare_pattern(
        &mut self,
        pattern: &Pattern,
        kind: BindingKind,
    ) -> Result<(), ParseError> {
        match pattern {
            Pattern::Identifier { name, span } => {
                self.scopes.declare(name, kind, span.start)
            }
            Pattern::Object { properties, rest, .. } => {
                for prop in properties {
                    self.declare_pattern(&prop.value, kind)?;
                }
                if let Some(rest) = rest {
                    self.declare_pattern(rest, kind)?;
                }
                Ok(())
            }
            Pattern::Array { elements, .. } => {
                for element in elements.iter().flatten() {
                    self.declare_pattern(element, kind)?;
                }
                Ok(())
            }
            Pattern::Assignment { left, .. } => self.declare_pattern(left, kind),
            Pattern::Rest { argument, .. } => self.declare_pattern(argument, kind),
            Pattern::Member(expr) => {
                if kind != BindingKind::None {
                    return Err(self.err_at(
                        ErrorKind::Syntax,
                        "Binding member expression",
                        expr.span().start,
                    ));
                }
                Ok(())
            }
        }
    }

    /// Strict mode forbids `eval` and `arguments` as binding or
    /// assignment targets. `action` names the attempted use in the error.
    pub(crate) fn check_restricted_name(
        &self,
        name: &str,
        action: &str,
        pos: Position,
    ) -> Result<(), ParseError> {
        if self.strict && (name == "eval" || name == "arguments") {
            return Err(self.err_at(
                ErrorKind::Syntax,
                format!("{action} '{name}' in strict mode"),
                pos,
            ));
        }
        Ok(())
    }
}
