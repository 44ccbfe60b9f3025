//! Statement and declaration parsing.

use std::mem;

use syntax_core::{ErrorKind, ParseError, Position, Span};
use tracing::trace;

use crate::expression::collect_bound_names;
use crate::node::{
    CatchClause, ClassElement, ExportDefault, ExportSpecifier, Expression, ForInit, ForTarget,
    ImportSpecifier, Literal, MethodKind, Pattern, Program, PropertyKey, Statement, SwitchCase,
    VariableDeclarator, VariableKind,
};
use crate::options::{EcmaVersion, SourceType};
use crate::scope::{BindingKind, ScopeFlags};
use crate::token::{Keyword, Punct, Token, TokenKind, TokenValue};
use crate::{Label, LabelKind, Parser};

/// What kind of position a statement is being parsed in. Declarations
/// are restricted to places where a statement list could hold them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StmtCtx {
    /// Inside a statement list
    Default,
    /// Direct child of `if`/`else`
    IfBody,
    /// Body of a labeled statement
    Label,
    /// Body of a loop or `with`
    Other,
}

// Private name declaration bits; getters and setters may pair up when
// they agree on static placement.
const PRIV_GET_I: u8 = 1;
const PRIV_SET_I: u8 = 2;
const PRIV_GET_S: u8 = 4;
const PRIV_SET_S: u8 = 8;
const PRIV_OTHER: u8 = 16;

impl<'s> Parser<'s> {
    /// Parse the whole program, then settle deferred module checks.
    pub(crate) fn parse_top_level(&mut self) -> Result<Program, ParseError> {
        let start = Position { offset: 0, line: 1, column: 0 };
        let mut body = Vec::new();
        let mut prologue = true;
        while self.cur.kind != TokenKind::Eof {
            let mut stmt = self.parse_statement(StmtCtx::Default, true)?;
            if prologue {
                match self.directive_text(&stmt) {
                    Some(text) => {
                        if text == "use strict" {
                            self.set_strict(true);
                        }
                        apply_directive(&mut stmt, text);
                    }
                    None => prologue = false,
                }
            }
            body.push(stmt);
        }
        if let Some((name, pos)) = self.scopes.first_undefined_export() {
            let message = format!("Export '{name}' is not defined");
            return Err(self.err_at(ErrorKind::Syntax, message, pos));
        }
        // The EOF token sits past any trailing whitespace
        let end = self.cur.span.start;
        Ok(Program {
            body,
            source_type: self.options.source_type,
            span: self.maybe_zero_span(Span { start, end }),
        })
    }

    /// When the statement is a lone string literal, its raw text between
    /// the quotes.
    fn directive_text(&self, stmt: &Statement) -> Option<String> {
        let Statement::ExpressionStatement { expression, .. } = stmt else {
            return None;
        };
        let Expression::Literal { value: Literal::String(_), span } = expression else {
            return None;
        };
        Some(self.source[span.start.offset + 1..span.end.offset - 1].to_string())
    }

    pub(crate) fn parse_statement(
        &mut self,
        ctx: StmtCtx,
        top_level: bool,
    ) -> Result<Statement, ParseError> {
        let start = self.cur.span.start;
        trace!(kind = ?self.cur.kind, offset = start.offset, "statement");
        match self.cur.kind {
            TokenKind::Keyword(Keyword::Var) => {
                self.next()?;
                self.parse_var_statement(start, VariableKind::Var)
            }
            TokenKind::Keyword(Keyword::Const) => {
                if ctx != StmtCtx::Default {
                    return Err(self.unexpected());
                }
                self.next()?;
                self.parse_var_statement(start, VariableKind::Const)
            }
            TokenKind::Keyword(Keyword::Function) => {
                if ctx == StmtCtx::Other
                    || (ctx != StmtCtx::Default && self.strict)
                {
                    return Err(self.unexpected());
                }
                self.next()?;
                let allow_loose = ctx != StmtCtx::Default;
                self.parse_function_declaration(start, false, allow_loose)
            }
            TokenKind::Keyword(Keyword::Class) => {
                if ctx != StmtCtx::Default {
                    return Err(self.unexpected());
                }
                self.parse_class_declaration(start)
            }
            TokenKind::Keyword(Keyword::If) => self.parse_if_statement(start),
            TokenKind::Keyword(Keyword::Return) => self.parse_return_statement(start),
            TokenKind::Keyword(Keyword::While) => self.parse_while_statement(start),
            TokenKind::Keyword(Keyword::Do) => self.parse_do_while_statement(start),
            TokenKind::Keyword(Keyword::For) => self.parse_for_statement(start),
            TokenKind::Keyword(Keyword::Switch) => self.parse_switch_statement(start),
            TokenKind::Keyword(Keyword::Try) => self.parse_try_statement(start),
            TokenKind::Keyword(Keyword::With) => self.parse_with_statement(start),
            TokenKind::Keyword(Keyword::Throw) => self.parse_throw_statement(start),
            TokenKind::Keyword(Keyword::Break) => self.parse_break_continue(start, true),
            TokenKind::Keyword(Keyword::Continue) => self.parse_break_continue(start, false),
            TokenKind::Keyword(Keyword::Debugger) => {
                self.next()?;
                self.semicolon()?;
                Ok(Statement::DebuggerStatement { span: self.node_span(start) })
            }
            TokenKind::Punct(Punct::LBrace) => {
                let body = self.parse_block(true)?;
                Ok(Statement::BlockStatement { body, span: self.node_span(start) })
            }
            TokenKind::Punct(Punct::Semi) => {
                self.next()?;
                Ok(Statement::EmptyStatement { span: self.node_span(start) })
            }
            TokenKind::Keyword(Keyword::Import) => {
                // `import(...)` and `import.meta` are expressions
                let ahead = self.peek_token()?;
                if self.options.ecma_version >= EcmaVersion::Es2020
                    && matches!(
                        ahead.kind,
                        TokenKind::Punct(Punct::LParen) | TokenKind::Punct(Punct::Dot)
                    )
                {
                    return self.parse_expression_statement(start);
                }
                self.check_module_position(top_level)?;
                self.parse_import_declaration(start)
            }
            TokenKind::Keyword(Keyword::Export) => {
                self.check_module_position(top_level)?;
                self.parse_export_declaration(start)
            }
            TokenKind::Name => {
                if self.is_let_declaration()? {
                    if ctx != StmtCtx::Default {
                        return Err(self.unexpected());
                    }
                    self.next()?;
                    return self.parse_var_statement(start, VariableKind::Let);
                }
                if self.is_async_function_ahead()? {
                    if ctx != StmtCtx::Default {
                        return Err(self.unexpected());
                    }
                    self.next()?;
                    self.expect_keyword(Keyword::Function)?;
                    return self.parse_function_declaration(start, true, false);
                }
                self.parse_expression_statement(start)
            }
            _ => self.parse_expression_statement(start),
        }
    }

    fn check_module_position(&self, top_level: bool) -> Result<(), ParseError> {
        if self.options.source_type != SourceType::Module {
            return Err(self.err_at(
                ErrorKind::Syntax,
                "'import' and 'export' may appear only with 'sourceType: module'",
                self.cur.span.start,
            ));
        }
        if !top_level {
            return Err(self.err_at(
                ErrorKind::Syntax,
                "'import' and 'export' may only appear at the top level",
                self.cur.span.start,
            ));
        }
        Ok(())
    }

    /// `let` begins a declaration only when a binding can follow;
    /// otherwise it is an ordinary identifier.
    fn is_let_declaration(&mut self) -> Result<bool, ParseError> {
        if !self.cur.is_contextual("let") || self.options.ecma_version < EcmaVersion::Es2015 {
            return Ok(false);
        }
        let ahead = self.peek_token()?;
        Ok(matches!(
            ahead.kind,
            TokenKind::Name
                | TokenKind::Punct(Punct::LBracket)
                | TokenKind::Punct(Punct::LBrace)
        ))
    }

    fn is_async_function_ahead(&mut self) -> Result<bool, ParseError> {
        if self.options.ecma_version < EcmaVersion::Es2017
            || !self.cur.is_contextual("async")
        {
            return Ok(false);
        }
        let ahead = self.peek_token()?;
        Ok(ahead.kind == TokenKind::Keyword(Keyword::Function) && !ahead.newline_before)
    }

    fn parse_expression_statement(&mut self, start: Position) -> Result<Statement, ParseError> {
        let expression = self.parse_expression(false)?;
        // An identifier followed by a colon is a label
        if let Expression::Identifier { name, span } = &expression {
            if self.at_punct(Punct::Colon) {
                let name = name.clone();
                let label_start = span.start;
                return self.parse_labeled_statement(label_start, name);
            }
        }
        self.semicolon()?;
        Ok(Statement::ExpressionStatement {
            expression,
            directive: None,
            span: self.node_span(start),
        })
    }

    fn parse_labeled_statement(
        &mut self,
        start: Position,
        name: String,
    ) -> Result<Statement, ParseError> {
        if self.labels.iter().any(|l| l.name.as_deref() == Some(&name)) {
            let message = format!("Label '{name}' is already declared");
            return Err(self.err_at(ErrorKind::Syntax, message, start));
        }
        self.expect_punct(Punct::Colon)?;
        let kind = match self.cur.kind {
            TokenKind::Keyword(Keyword::For)
            | TokenKind::Keyword(Keyword::While)
            | TokenKind::Keyword(Keyword::Do) => LabelKind::Loop,
            TokenKind::Keyword(Keyword::Switch) => LabelKind::Switch,
            _ => LabelKind::None,
        };
        self.labels.push(Label { name: Some(name.clone()), kind });
        let body = self.parse_statement(StmtCtx::Label, false)?;
        self.labels.pop();
        Ok(Statement::LabeledStatement {
            label: name,
            body: Box::new(body),
            span: self.node_span(start),
        })
    }

    /// Statement list in braces. `new_scope` is false for function
    /// bodies, whose scope the caller has already entered.
    pub(crate) fn parse_block(&mut self, new_scope: bool) -> Result<Vec<Statement>, ParseError> {
        self.expect_punct(Punct::LBrace)?;
        if new_scope {
            self.scopes.enter(ScopeFlags::empty());
        }
        let mut body = Vec::new();
        while !self.eat_punct(Punct::RBrace)? {
            body.push(self.parse_statement(StmtCtx::Default, false)?);
        }
        if new_scope {
            self.scopes.exit();
        }
        Ok(body)
    }

    // Variable declarations

    fn parse_var_statement(
        &mut self,
        start: Position,
        kind: VariableKind,
    ) -> Result<Statement, ParseError> {
        if kind != VariableKind::Var && self.options.ecma_version < EcmaVersion::Es2015 {
            return Err(self.unexpected());
        }
        let declarations = self.parse_var_declarations(kind, false)?;
        self.semicolon()?;
        Ok(Statement::VariableDeclaration {
            kind,
            declarations,
            span: self.node_span(start),
        })
    }

    /// Declarator list after the `var`/`let`/`const` keyword.
    fn parse_var_declarations(
        &mut self,
        kind: VariableKind,
        for_head: bool,
    ) -> Result<Vec<VariableDeclarator>, ParseError> {
        let binding_kind = match kind {
            VariableKind::Var => BindingKind::Var,
            VariableKind::Let | VariableKind::Const => BindingKind::Lexical,
        };
        let mut declarations = Vec::new();
        loop {
            let start = self.cur.span.start;
            let id = self.parse_binding_atom()?;
            if kind != VariableKind::Var {
                let mut names = Vec::new();
                collect_bound_names(&id, &mut names);
                for (name, pos) in &names {
                    if name == "let" {
                        return Err(self.err_at(
                            ErrorKind::Syntax,
                            "let is disallowed as a lexically bound name",
                            *pos,
                        ));
                    }
                }
            }
            self.declare_pattern(&id, binding_kind)?;
            let at_of_in = self.cur.kind == TokenKind::Keyword(Keyword::In)
                || self.cur.is_contextual("of");
            let init = if self.eat_punct(Punct::Eq)? {
                Some(self.parse_maybe_assign(for_head, None)?)
            } else if kind == VariableKind::Const && !(for_head && at_of_in) {
                return Err(self.err_at(
                    ErrorKind::Syntax,
                    "Missing initializer in const declaration",
                    self.cur.span.start,
                ));
            } else if !matches!(id, Pattern::Identifier { .. }) && !(for_head && at_of_in) {
                return Err(self.err_at(
                    ErrorKind::Syntax,
                    "Complex binding patterns require an initialization value",
                    self.prev.span.end,
                ));
            } else {
                None
            };
            declarations.push(VariableDeclarator { id, init, span: self.node_span(start) });
            if !self.eat_punct(Punct::Comma)? {
                break;
            }
        }
        Ok(declarations)
    }

    // Control flow

    fn parse_if_statement(&mut self, start: Position) -> Result<Statement, ParseError> {
        self.next()?;
        self.expect_punct(Punct::LParen)?;
        let test = self.parse_expression(false)?;
        self.expect_punct(Punct::RParen)?;
        let consequent = self.parse_statement(StmtCtx::IfBody, false)?;
        let alternate = if self.eat_keyword(Keyword::Else)? {
            Some(Box::new(self.parse_statement(StmtCtx::IfBody, false)?))
        } else {
            None
        };
        Ok(Statement::IfStatement {
            test,
            consequent: Box::new(consequent),
            alternate,
            span: self.node_span(start),
        })
    }

    fn parse_return_statement(&mut self, start: Position) -> Result<Statement, ParseError> {
        if !self.scopes.in_function() && !self.options.allow_return_outside_function {
            return Err(self.err_at(
                ErrorKind::Syntax,
                "'return' outside of function",
                start,
            ));
        }
        self.next()?;
        let argument = if self.at_punct(Punct::Semi) || self.can_insert_semicolon() {
            None
        } else {
            Some(self.parse_expression(false)?)
        };
        self.semicolon()?;
        Ok(Statement::ReturnStatement { argument, span: self.node_span(start) })
    }

    fn parse_while_statement(&mut self, start: Position) -> Result<Statement, ParseError> {
        self.next()?;
        self.expect_punct(Punct::LParen)?;
        let test = self.parse_expression(false)?;
        self.expect_punct(Punct::RParen)?;
        self.labels.push(Label { name: None, kind: LabelKind::Loop });
        let body = self.parse_statement(StmtCtx::Other, false)?;
        self.labels.pop();
        Ok(Statement::WhileStatement {
            test,
            body: Box::new(body),
            span: self.node_span(start),
        })
    }

    fn parse_do_while_statement(&mut self, start: Position) -> Result<Statement, ParseError> {
        self.next()?;
        self.labels.push(Label { name: None, kind: LabelKind::Loop });
        let body = self.parse_statement(StmtCtx::Other, false)?;
        self.labels.pop();
        self.expect_keyword(Keyword::While)?;
        self.expect_punct(Punct::LParen)?;
        let test = self.parse_expression(false)?;
        self.expect_punct(Punct::RParen)?;
        // The closing semicolon of do-while is always optional
        self.eat_punct(Punct::Semi)?;
        Ok(Statement::DoWhileStatement {
            body: Box::new(body),
            test,
            span: self.node_span(start),
        })
    }

    fn parse_for_statement(&mut self, start: Position) -> Result<Statement, ParseError> {
        self.next()?;
        let await_at = if self.can_await() && self.cur.is_contextual("await") {
            let at = self.cur.span.start;
            self.next()?;
            Some(at)
        } else {
            None
        };
        self.expect_punct(Punct::LParen)?;
        self.scopes.enter(ScopeFlags::empty());
        self.labels.push(Label { name: None, kind: LabelKind::Loop });

        let result = self.parse_for_rest(start, await_at);

        self.labels.pop();
        self.scopes.exit();
        result
    }

    fn parse_for_rest(
        &mut self,
        start: Position,
        await_at: Option<Position>,
    ) -> Result<Statement, ParseError> {
        if self.at_punct(Punct::Semi) {
            if let Some(at) = await_at {
                return Err(self.err_at(ErrorKind::Syntax, "Unexpected token", at));
            }
            self.next()?;
            return self.parse_for_tail(start, None);
        }

        let head_start = self.cur.span.start;
        let decl_kind = match self.cur.kind {
            TokenKind::Keyword(Keyword::Var) => Some(VariableKind::Var),
            TokenKind::Keyword(Keyword::Const) => Some(VariableKind::Const),
            TokenKind::Name => {
                if self.is_let_declaration()? {
                    Some(VariableKind::Let)
                } else {
                    None
                }
            }
            _ => None,
        };

        if let Some(kind) = decl_kind {
            self.next()?;
            let declarations = self.parse_var_declarations(kind, true)?;
            let is_in = self.cur.kind == TokenKind::Keyword(Keyword::In);
            let is_of = self.cur.is_contextual("of")
                && self.options.ecma_version >= EcmaVersion::Es2015;
            if declarations.len() == 1 && (is_in || is_of) {
                let declarator = declarations.into_iter().next().ok_or_else(|| {
                    self.err_at(ErrorKind::Syntax, "Unexpected token", head_start)
                })?;
                if let Some(init) = &declarator.init {
                    let simple_var = kind == VariableKind::Var
                        && matches!(declarator.id, Pattern::Identifier { .. });
                    if is_of
                        || self.strict
                        || !simple_var
                        || self.options.ecma_version < EcmaVersion::Es2017
                    {
                        let what = if is_of { "for-of" } else { "for-in" };
                        let message = format!(
                            "{what} loop variable declaration may not have an initializer"
                        );
                        return Err(self.err_at(
                            ErrorKind::Syntax,
                            message,
                            init.span().start,
                        ));
                    }
                }
                let left = ForTarget::VariableDeclaration {
                    kind,
                    id: declarator.id,
                    span: self.maybe_zero_span(Span {
                        start: head_start,
                        end: declarator.span.end,
                    }),
                };
                return self.parse_for_in_of(start, left, is_of, await_at);
            }
            if let Some(at) = await_at {
                return Err(self.err_at(ErrorKind::Syntax, "Unexpected token", at));
            }
            let init = ForInit::VariableDeclaration {
                kind,
                declarations,
                span: self.node_span(head_start),
            };
            self.expect_punct(Punct::Semi)?;
            return self.parse_for_tail(start, Some(init));
        }

        let mut errs = crate::lval::DestructuringErrors::new();
        let init_expr = {
            let first = self.parse_maybe_assign(true, Some(&mut errs))?;
            if self.at_punct(Punct::Comma) {
                let seq_start = first.span().start;
                let mut expressions = vec![first];
                while self.eat_punct(Punct::Comma)? {
                    expressions.push(self.parse_maybe_assign(true, None)?);
                }
                Expression::SequenceExpression {
                    expressions,
                    span: self.node_span(seq_start),
                }
            } else {
                first
            }
        };

        let is_in = self.cur.kind == TokenKind::Keyword(Keyword::In);
        let is_of =
            self.cur.is_contextual("of") && self.options.ecma_version >= EcmaVersion::Es2015;
        if is_in || is_of {
            self.check_pattern_errors(&errs, false)?;
            let pattern = self.expression_to_pattern(init_expr, false)?;
            return self.parse_for_in_of(start, ForTarget::Pattern(pattern), is_of, await_at);
        }
        if let Some(at) = await_at {
            return Err(self.err_at(ErrorKind::Syntax, "Unexpected token", at));
        }
        self.check_expression_errors(&errs)?;
        self.expect_punct(Punct::Semi)?;
        self.parse_for_tail(start, Some(ForInit::Expression(init_expr)))
    }

    fn parse_for_in_of(
        &mut self,
        start: Position,
        left: ForTarget,
        is_of: bool,
        await_at: Option<Position>,
    ) -> Result<Statement, ParseError> {
        if await_at.is_some() && !is_of {
            let at = await_at.ok_or_else(|| self.unexpected())?;
            return Err(self.err_at(ErrorKind::Syntax, "Unexpected token", at));
        }
        if is_of && await_at.is_some() && self.options.ecma_version < EcmaVersion::Es2018 {
            let at = await_at.ok_or_else(|| self.unexpected())?;
            return Err(self.err_at(ErrorKind::Syntax, "Unexpected token", at));
        }
        self.next()?;
        let right = if is_of {
            self.parse_maybe_assign(false, None)?
        } else {
            self.parse_expression(false)?
        };
        self.expect_punct(Punct::RParen)?;
        let body = self.parse_statement(StmtCtx::Other, false)?;
        let span = self.node_span(start);
        if is_of {
            Ok(Statement::ForOfStatement {
                left,
                right,
                body: Box::new(body),
                is_await: await_at.is_some(),
                span,
            })
        } else {
            Ok(Statement::ForInStatement { left, right, body: Box::new(body), span })
        }
    }

    fn parse_for_tail(
        &mut self,
        start: Position,
        init: Option<ForInit>,
    ) -> Result<Statement, ParseError> {
        let test = if self.at_punct(Punct::Semi) {
            None
        } else {
            Some(self.parse_expression(false)?)
        };
        self.expect_punct(Punct::Semi)?;
        let update = if self.at_punct(Punct::RParen) {
            None
        } else {
            Some(self.parse_expression(false)?)
        };
        self.expect_punct(Punct::RParen)?;
        let body = self.parse_statement(StmtCtx::Other, false)?;
        Ok(Statement::ForStatement {
            init,
            test,
            update,
            body: Box::new(body),
            span: self.node_span(start),
        })
    }

    fn parse_switch_statement(&mut self, start: Position) -> Result<Statement, ParseError> {
        self.next()?;
        self.expect_punct(Punct::LParen)?;
        let discriminant = self.parse_expression(false)?;
        self.expect_punct(Punct::RParen)?;
        self.expect_punct(Punct::LBrace)?;
        self.scopes.enter(ScopeFlags::empty());
        self.labels.push(Label { name: None, kind: LabelKind::Switch });

        let mut cases: Vec<SwitchCase> = Vec::new();
        let mut saw_default = false;
        while !self.eat_punct(Punct::RBrace)? {
            let case_start = self.cur.span.start;
            let test = if self.eat_keyword(Keyword::Case)? {
                Some(self.parse_expression(false)?)
            } else {
                let default_at = self.cur.span.start;
                self.expect_keyword(Keyword::Default)?;
                if saw_default {
                    self.labels.pop();
                    self.scopes.exit();
                    return Err(self.err_at(
                        ErrorKind::Syntax,
                        "Multiple default clauses",
                        default_at,
                    ));
                }
                saw_default = true;
                None
            };
            self.expect_punct(Punct::Colon)?;
            let mut consequent = Vec::new();
            while !matches!(
                self.cur.kind,
                TokenKind::Keyword(Keyword::Case)
                    | TokenKind::Keyword(Keyword::Default)
                    | TokenKind::Punct(Punct::RBrace)
            ) {
                consequent.push(self.parse_statement(StmtCtx::Default, false)?);
            }
            cases.push(SwitchCase { test, consequent, span: self.node_span(case_start) });
        }
        self.labels.pop();
        self.scopes.exit();
        Ok(Statement::SwitchStatement {
            discriminant,
            cases,
            span: self.node_span(start),
        })
    }

    fn parse_try_statement(&mut self, start: Position) -> Result<Statement, ParseError> {
        self.next()?;
        let block = self.parse_block(true)?;

        let handler = if self.cur.kind == TokenKind::Keyword(Keyword::Catch) {
            let clause_start = self.cur.span.start;
            self.next()?;
            let param = if self.eat_punct(Punct::LParen)? {
                let param = self.parse_binding_atom()?;
                let simple = matches!(param, Pattern::Identifier { .. });
                let flags = if simple { ScopeFlags::SIMPLE_CATCH } else { ScopeFlags::empty() };
                self.scopes.enter(flags);
                let kind = if simple { BindingKind::SimpleCatch } else { BindingKind::Lexical };
                self.declare_pattern(&param, kind)?;
                self.expect_punct(Punct::RParen)?;
                Some(param)
            } else {
                if self.options.ecma_version < EcmaVersion::Es2019 {
                    return Err(self.unexpected());
                }
                self.scopes.enter(ScopeFlags::empty());
                None
            };
            // The catch body shares the parameter's scope frame
            let body = self.parse_block(false)?;
            self.scopes.exit();
            Some(CatchClause { param, body, span: self.node_span(clause_start) })
        } else {
            None
        };

        let finalizer = if self.eat_keyword(Keyword::Finally)? {
            Some(self.parse_block(true)?)
        } else {
            None
        };
        if handler.is_none() && finalizer.is_none() {
            return Err(self.err_at(
                ErrorKind::Syntax,
                "Missing catch or finally clause",
                start,
            ));
        }
        Ok(Statement::TryStatement {
            block,
            handler,
            finalizer,
            span: self.node_span(start),
        })
    }

    fn parse_with_statement(&mut self, start: Position) -> Result<Statement, ParseError> {
        if self.strict {
            return Err(self.err_at(ErrorKind::Syntax, "'with' in strict mode", start));
        }
        self.next()?;
        self.expect_punct(Punct::LParen)?;
        let object = self.parse_expression(false)?;
        self.expect_punct(Punct::RParen)?;
        let body = self.parse_statement(StmtCtx::Other, false)?;
        Ok(Statement::WithStatement {
            object,
            body: Box::new(body),
            span: self.node_span(start),
        })
    }

    fn parse_throw_statement(&mut self, start: Position) -> Result<Statement, ParseError> {
        self.next()?;
        if self.cur.newline_before {
            return Err(self.err_at(
                ErrorKind::Syntax,
                "Illegal newline after throw",
                start,
            ));
        }
        let argument = self.parse_expression(false)?;
        self.semicolon()?;
        Ok(Statement::ThrowStatement { argument, span: self.node_span(start) })
    }

    fn parse_break_continue(
        &mut self,
        start: Position,
        is_break: bool,
    ) -> Result<Statement, ParseError> {
        self.next()?;
        let label = if self.at_punct(Punct::Semi) || self.can_insert_semicolon() {
            None
        } else {
            Some(self.parse_identifier_name()?)
        };
        self.semicolon()?;

        let mut found = false;
        for lab in &self.labels {
            match &label {
                None => {
                    if lab.kind == LabelKind::Loop
                        || (is_break && lab.kind == LabelKind::Switch)
                    {
                        found = true;
                        break;
                    }
                }
                Some(name) => {
                    if lab.name.as_deref() == Some(name) {
                        if is_break || lab.kind == LabelKind::Loop {
                            found = true;
                        }
                        break;
                    }
                }
            }
        }
        if !found {
            let what = if is_break { "break" } else { "continue" };
            return Err(self.err_at(
                ErrorKind::Syntax,
                format!("Unsyntactic {what}"),
                start,
            ));
        }
        let span = self.node_span(start);
        Ok(if is_break {
            Statement::BreakStatement { label, span }
        } else {
            Statement::ContinueStatement { label, span }
        })
    }

    // Functions

    /// Function declaration; `function` has been consumed.
    fn parse_function_declaration(
        &mut self,
        start: Position,
        is_async: bool,
        loose_position: bool,
    ) -> Result<Statement, ParseError> {
        let is_generator =
            self.options.ecma_version >= EcmaVersion::Es2015 && self.eat_punct(Punct::Star)?;
        if loose_position && (is_async || is_generator) {
            return Err(self.unexpected());
        }
        let name_start = self.cur.span.start;
        let name = self.parse_identifier_name()?;
        self.check_restricted_name(&name, "Binding", name_start)?;
        let kind = if self.strict || is_generator || is_async {
            BindingKind::Lexical
        } else {
            BindingKind::Function
        };
        self.scopes.declare(&name, kind, name_start)?;

        let (params, body) = self.parse_function_rest(is_async, is_generator)?;
        Ok(Statement::FunctionDeclaration {
            name,
            params,
            body,
            is_async,
            is_generator,
            span: self.node_span(start),
        })
    }

    /// Function expression; `function` has been consumed.
    pub(crate) fn parse_function_expression(
        &mut self,
        start: Position,
        is_async: bool,
    ) -> Result<Expression, ParseError> {
        let is_generator =
            self.options.ecma_version >= EcmaVersion::Es2015 && self.eat_punct(Punct::Star)?;
        let name = if self.cur.kind == TokenKind::Name {
            let at = self.cur.span.start;
            let name = self.parse_identifier_name()?;
            self.check_restricted_name(&name, "Binding", at)?;
            Some(name)
        } else {
            None
        };
        let (params, body) = self.parse_function_rest(is_async, is_generator)?;
        Ok(Expression::FunctionExpression {
            name,
            params,
            body,
            is_async,
            is_generator,
            span: self.node_span(start),
        })
    }

    /// Parameter list and body, shared by declarations and expressions.
    fn parse_function_rest(
        &mut self,
        is_async: bool,
        is_generator: bool,
    ) -> Result<(Vec<Pattern>, Vec<Statement>), ParseError> {
        let mut flags = ScopeFlags::FUNCTION;
        if is_async {
            flags |= ScopeFlags::ASYNC;
        }
        if is_generator {
            flags |= ScopeFlags::GENERATOR;
        }
        self.scopes.enter(flags);

        self.expect_punct(Punct::LParen)?;
        let params = self.parse_param_list()?;
        self.check_params(&params, false)?;

        let old_strict = self.strict;
        self.expect_punct(Punct::LBrace)?;
        let (body, _) = self.parse_function_body_block(&params)?;
        self.set_strict(old_strict);

        self.scopes.exit();
        Ok((params, body))
    }

    /// Parameters between parentheses; the opening paren has been
    /// consumed.
    pub(crate) fn parse_param_list(&mut self) -> Result<Vec<Pattern>, ParseError> {
        let allow_trailing = self.options.ecma_version >= EcmaVersion::Es2017;
        let elements = self.parse_binding_list(Punct::RParen, false, allow_trailing)?;
        let mut params = Vec::new();
        for element in elements {
            match element {
                Some(p) => params.push(p),
                None => return Err(self.unexpected()),
            }
        }
        Ok(params)
    }

    /// Function body statements; `{` has been consumed and the function
    /// scope entered. Returns the statements and whether a `use strict`
    /// directive was seen.
    pub(crate) fn parse_function_body_block(
        &mut self,
        params: &[Pattern],
    ) -> Result<(Vec<Statement>, bool), ParseError> {
        let outer_labels = mem::take(&mut self.labels);
        let simple = params.iter().all(|p| matches!(p, Pattern::Identifier { .. }));

        let mut body = Vec::new();
        let mut prologue = true;
        let mut became_strict = false;
        let result = loop {
            if self.eat_punct(Punct::RBrace)? {
                break Ok(());
            }
            if self.cur.kind == TokenKind::Eof {
                break Err(self.unexpected());
            }
            let mut stmt = match self.parse_statement(StmtCtx::Default, false) {
                Ok(s) => s,
                Err(e) => break Err(e),
            };
            if prologue {
                match self.directive_text(&stmt) {
                    Some(text) => {
                        if text == "use strict" && !self.strict {
                            if !simple {
                                break Err(self.err_at(
                                    ErrorKind::Syntax,
                                    "Illegal 'use strict' directive in function with \
                                     non-simple parameter list",
                                    stmt.span().start,
                                ));
                            }
                            self.set_strict(true);
                            became_strict = true;
                            if let Err(e) = self.recheck_params_strict(params) {
                                break Err(e);
                            }
                        }
                        apply_directive(&mut stmt, text);
                    }
                    None => prologue = false,
                }
            }
            body.push(stmt);
        };
        self.labels = outer_labels;
        result?;
        Ok((body, became_strict))
    }

    /// A late `use strict` directive retroactively applies the strict
    /// binding rules to the parameters.
    fn recheck_params_strict(&mut self, params: &[Pattern]) -> Result<(), ParseError> {
        let mut names = Vec::new();
        for param in params {
            collect_bound_names(param, &mut names);
        }
        for (name, pos) in names {
            self.check_restricted_name(&name, "Binding", pos)?;
            self.check_unreserved(&name, pos)?;
        }
        Ok(())
    }

    /// Method body: `(params) { ... }` as a function expression value.
    pub(crate) fn parse_method(
        &mut self,
        is_async: bool,
        is_generator: bool,
        allow_direct_super: bool,
    ) -> Result<Expression, ParseError> {
        let start = self.cur.span.start;
        let mut flags = ScopeFlags::FUNCTION | ScopeFlags::SUPER;
        if is_async {
            flags |= ScopeFlags::ASYNC;
        }
        if is_generator {
            flags |= ScopeFlags::GENERATOR;
        }
        if allow_direct_super {
            flags |= ScopeFlags::DIRECT_SUPER;
        }
        self.scopes.enter(flags);

        self.expect_punct(Punct::LParen)?;
        let params = self.parse_param_list()?;
        // Methods require unique parameter names
        self.check_params(&params, true)?;

        let old_strict = self.strict;
        self.expect_punct(Punct::LBrace)?;
        let (body, _) = self.parse_function_body_block(&params)?;
        self.set_strict(old_strict);

        self.scopes.exit();
        Ok(Expression::FunctionExpression {
            name: None,
            params,
            body,
            is_async,
            is_generator,
            span: self.node_span(start),
        })
    }

    // Classes

    fn parse_class_declaration(&mut self, start: Position) -> Result<Statement, ParseError> {
        if self.options.ecma_version < EcmaVersion::Es2015 {
            return Err(self.unexpected());
        }
        self.next()?;
        let old_strict = self.strict;
        self.set_strict(true);

        let name_start = self.cur.span.start;
        let name = match self.parse_class_name()? {
            Some(name) => name,
            None => {
                self.set_strict(old_strict);
                return Err(self.unexpected());
            }
        };
        self.scopes.declare(&name, BindingKind::Lexical, name_start)?;

        let (super_class, body) = self.parse_class_tail()?;
        self.set_strict(old_strict);
        Ok(Statement::ClassDeclaration {
            name: Some(name),
            super_class,
            body,
            span: self.node_span(start),
        })
    }

    /// Class declaration for `export default`, where the name is
    /// optional.
    fn parse_class_declaration_default(
        &mut self,
        start: Position,
    ) -> Result<Statement, ParseError> {
        self.next()?;
        let old_strict = self.strict;
        self.set_strict(true);
        let name_start = self.cur.span.start;
        let name = self.parse_class_name()?;
        if let Some(name) = &name {
            self.scopes.declare(name, BindingKind::Lexical, name_start)?;
        }
        let (super_class, body) = self.parse_class_tail()?;
        self.set_strict(old_strict);
        Ok(Statement::ClassDeclaration {
            name,
            super_class,
            body,
            span: self.node_span(start),
        })
    }

    /// Class expression; `class` is the current token.
    pub(crate) fn parse_class_expression(&mut self) -> Result<Expression, ParseError> {
        if self.options.ecma_version < EcmaVersion::Es2015 {
            return Err(self.unexpected());
        }
        let start = self.cur.span.start;
        self.next()?;
        let old_strict = self.strict;
        self.set_strict(true);
        let name = self.parse_class_name()?;
        let (super_class, body) = self.parse_class_tail()?;
        self.set_strict(old_strict);
        Ok(Expression::ClassExpression {
            name,
            super_class,
            body,
            span: self.node_span(start),
        })
    }

    fn parse_class_name(&mut self) -> Result<Option<String>, ParseError> {
        if self.cur.kind == TokenKind::Name
            && !self.cur.is_contextual("extends")
        {
            let at = self.cur.span.start;
            let name = self.parse_identifier_name()?;
            self.check_restricted_name(&name, "Binding", at)?;
            return Ok(Some(name));
        }
        Ok(None)
    }

    /// Heritage clause and class body.
    fn parse_class_tail(
        &mut self,
    ) -> Result<(Option<Box<Expression>>, Vec<ClassElement>), ParseError> {
        let super_class = if self.eat_keyword(Keyword::Extends)? {
            // Any left-hand-side expression; operators need parentheses
            Some(Box::new(self.parse_expr_subscripts(None, false)?))
        } else {
            None
        };
        let has_super = super_class.is_some();

        self.private_names.push(crate::ClassPrivates::default());
        self.expect_punct(Punct::LBrace)?;
        let mut body = Vec::new();
        let mut saw_constructor = false;
        while !self.eat_punct(Punct::RBrace)? {
            if self.eat_punct(Punct::Semi)? {
                continue;
            }
            let element = self.parse_class_element(has_super, &mut saw_constructor)?;
            body.push(element);
        }
        self.resolve_class_private_names()?;
        Ok((super_class, body))
    }

    fn parse_class_element(
        &mut self,
        has_super: bool,
        saw_constructor: &mut bool,
    ) -> Result<ClassElement, ParseError> {
        let start = self.cur.span.start;

        let mut is_static = false;
        if self.cur.is_contextual("static") {
            let ahead = self.peek_token()?;
            if !matches!(
                ahead.kind,
                TokenKind::Punct(Punct::LParen) | TokenKind::Punct(Punct::Eq)
            ) {
                self.next()?;
                is_static = true;
            }
        }

        let mut is_async = false;
        if self.options.ecma_version >= EcmaVersion::Es2017 && self.cur.is_contextual("async") {
            let ahead = self.peek_token()?;
            if !ahead.newline_before
                && (class_key_start(&ahead) || ahead.kind == TokenKind::Punct(Punct::Star))
            {
                self.next()?;
                is_async = true;
            }
        }
        let mut is_generator = false;
        if self.at_punct(Punct::Star) {
            if is_async && self.options.ecma_version < EcmaVersion::Es2018 {
                return Err(self.unexpected());
            }
            self.next()?;
            is_generator = true;
        }

        let mut accessor: Option<MethodKind> = None;
        if !is_async
            && !is_generator
            && (self.cur.is_contextual("get") || self.cur.is_contextual("set"))
        {
            let ahead = self.peek_token()?;
            if class_key_start(&ahead) {
                accessor = Some(if self.cur.is_contextual("get") {
                    MethodKind::Get
                } else {
                    MethodKind::Set
                });
                self.next()?;
            }
        }

        let (key, computed) = self.parse_class_property_key()?;

        if self.at_punct(Punct::LParen) {
            return self.finish_class_method(
                start,
                key,
                computed,
                is_static,
                is_async,
                is_generator,
                accessor,
                has_super,
                saw_constructor,
            );
        }

        // Field definition
        if self.options.ecma_version < EcmaVersion::Es2022 || is_async || is_generator {
            return Err(self.unexpected());
        }
        if accessor.is_some() {
            return Err(self.unexpected());
        }
        if !computed {
            if key.static_name() == Some("constructor") {
                return Err(self.err_at(
                    ErrorKind::Syntax,
                    "Classes can't have a field named 'constructor'",
                    start,
                ));
            }
            if is_static && key.static_name() == Some("prototype") {
                return Err(self.err_at(
                    ErrorKind::Syntax,
                    "Classes can't have a static field named 'prototype'",
                    start,
                ));
            }
        }
        if let PropertyKey::PrivateName(name) = &key {
            let bit = PRIV_OTHER;
            let name = name.clone();
            self.declare_private_name(&name, bit, start)?;
        }
        let value = if self.eat_punct(Punct::Eq)? {
            // Initializers run with their own this/new.target rules
            self.scopes.enter(
                ScopeFlags::FUNCTION | ScopeFlags::SUPER | ScopeFlags::CLASS_FIELD_INIT,
            );
            let value = self.parse_maybe_assign(false, None)?;
            self.scopes.exit();
            Some(value)
        } else {
            None
        };
        self.semicolon()?;
        Ok(ClassElement::Property {
            key,
            value,
            is_static,
            computed,
            span: self.node_span(start),
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn finish_class_method(
        &mut self,
        start: Position,
        key: PropertyKey,
        computed: bool,
        is_static: bool,
        is_async: bool,
        is_generator: bool,
        accessor: Option<MethodKind>,
        has_super: bool,
        saw_constructor: &mut bool,
    ) -> Result<ClassElement, ParseError> {
        let is_constructor = !is_static
            && !computed
            && accessor.is_none()
            && key.static_name() == Some("constructor");
        if is_constructor {
            if is_async {
                return Err(self.err_at(
                    ErrorKind::Syntax,
                    "Constructor can't be an async method",
                    start,
                ));
            }
            if is_generator {
                return Err(self.err_at(
                    ErrorKind::Syntax,
                    "Constructor can't be a generator",
                    start,
                ));
            }
            if *saw_constructor {
                return Err(self.err_at(
                    ErrorKind::Syntax,
                    "Duplicate constructor in the same class",
                    start,
                ));
            }
            *saw_constructor = true;
        } else if !computed && accessor.is_some() && key.static_name() == Some("constructor") {
            return Err(self.err_at(
                ErrorKind::Syntax,
                "Constructor can't have get/set modifier",
                start,
            ));
        }
        if is_static && !computed && key.static_name() == Some("prototype") {
            return Err(self.err_at(
                ErrorKind::Syntax,
                "Classes may not have a static property named prototype",
                start,
            ));
        }
        if let PropertyKey::PrivateName(name) = &key {
            let bit = match accessor {
                Some(MethodKind::Get) if is_static => PRIV_GET_S,
                Some(MethodKind::Get) => PRIV_GET_I,
                Some(MethodKind::Set) if is_static => PRIV_SET_S,
                Some(MethodKind::Set) => PRIV_SET_I,
                _ => PRIV_OTHER,
            };
            let name = name.clone();
            self.declare_private_name(&name, bit, start)?;
        }

        let value =
            self.parse_method(is_async, is_generator, is_constructor && has_super)?;
        let kind = if is_constructor {
            MethodKind::Constructor
        } else {
            accessor.unwrap_or(MethodKind::Method)
        };
        match kind {
            MethodKind::Get => self.check_accessor_arity(&value, crate::node::PropertyKind::Get)?,
            MethodKind::Set => self.check_accessor_arity(&value, crate::node::PropertyKind::Set)?,
            _ => {}
        }
        Ok(ClassElement::Method {
            key,
            kind,
            value,
            is_static,
            computed,
            span: self.node_span(start),
        })
    }

    /// Property key inside a class body; adds private names to the plain
    /// key forms.
    fn parse_class_property_key(&mut self) -> Result<(PropertyKey, bool), ParseError> {
        if self.cur.kind == TokenKind::PrivateName {
            let start = self.cur.span.start;
            let name = match &self.cur.value {
                TokenValue::Name { name, .. } => name.clone(),
                _ => return Err(self.unexpected()),
            };
            if name == "constructor" {
                return Err(self.err_at(
                    ErrorKind::Syntax,
                    "Classes can't have an element named '#constructor'",
                    start,
                ));
            }
            self.next()?;
            return Ok((PropertyKey::PrivateName(name), false));
        }
        self.parse_property_key()
    }

    fn declare_private_name(
        &mut self,
        name: &str,
        bit: u8,
        pos: Position,
    ) -> Result<(), ParseError> {
        let Some(ctx) = self.private_names.last_mut() else {
            return Err(self.err_at(ErrorKind::Syntax, "Unexpected private name", pos));
        };
        if let Some((_, bits)) = ctx.declared.iter_mut().find(|(n, _)| n == name) {
            let pairs = (*bits == PRIV_GET_I && bit == PRIV_SET_I)
                || (*bits == PRIV_SET_I && bit == PRIV_GET_I)
                || (*bits == PRIV_GET_S && bit == PRIV_SET_S)
                || (*bits == PRIV_SET_S && bit == PRIV_GET_S);
            if !pairs {
                return Err(self.err_at(
                    ErrorKind::Binding,
                    format!("Identifier '#{name}' has already been declared"),
                    pos,
                ));
            }
            *bits |= bit;
            return Ok(());
        }
        ctx.declared.push((name.to_string(), bit));
        Ok(())
    }

    /// At the end of a class body, uses of undeclared private names
    /// escalate to the enclosing class or become errors.
    fn resolve_class_private_names(&mut self) -> Result<(), ParseError> {
        let Some(ctx) = self.private_names.pop() else {
            return Ok(());
        };
        for (name, pos) in ctx.used {
            if ctx.declared.iter().any(|(n, _)| *n == name) {
                continue;
            }
            match self.private_names.last_mut() {
                Some(outer) => outer.used.push((name, pos)),
                None => {
                    return Err(self.err_at(
                        ErrorKind::Syntax,
                        format!(
                            "Private field '#{name}' must be declared in an enclosing class"
                        ),
                        pos,
                    ));
                }
            }
        }
        Ok(())
    }

    // Modules

    fn parse_import_declaration(&mut self, start: Position) -> Result<Statement, ParseError> {
        self.next()?;
        let mut specifiers = Vec::new();

        if self.cur.kind == TokenKind::Str {
            let source = self.parse_module_source()?;
            self.semicolon()?;
            return Ok(Statement::ImportDeclaration {
                specifiers,
                source,
                span: self.node_span(start),
            });
        }

        if self.cur.kind == TokenKind::Name {
            let spec_start = self.cur.span.start;
            let local = self.parse_import_binding()?;
            specifiers.push(ImportSpecifier::Default {
                local,
                span: self.node_span(spec_start),
            });
            if self.eat_punct(Punct::Comma)? {
                self.parse_import_specifier_group(&mut specifiers)?;
            }
        } else {
            self.parse_import_specifier_group(&mut specifiers)?;
        }

        if !self.eat_contextual("from")? {
            return Err(self.unexpected());
        }
        let source = self.parse_module_source()?;
        self.semicolon()?;
        Ok(Statement::ImportDeclaration {
            specifiers,
            source,
            span: self.node_span(start),
        })
    }

    /// `* as name` or `{ ... }` after `import` (or after `default,`).
    fn parse_import_specifier_group(
        &mut self,
        specifiers: &mut Vec<ImportSpecifier>,
    ) -> Result<(), ParseError> {
        if self.at_punct(Punct::Star) {
            let spec_start = self.cur.span.start;
            self.next()?;
            if !self.eat_contextual("as")? {
                return Err(self.unexpected());
            }
            let local = self.parse_import_binding()?;
            specifiers.push(ImportSpecifier::Namespace {
                local,
                span: self.node_span(spec_start),
            });
            return Ok(());
        }

        self.expect_punct(Punct::LBrace)?;
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
            let spec_start = self.cur.span.start;
            let imported = self.parse_module_export_name()?;
            let local = if self.eat_contextual("as")? {
                self.parse_import_binding()?
            } else {
                // Shorthand: the imported name must itself be bindable
                self.check_unreserved(&imported, spec_start)?;
                self.check_restricted_name(&imported, "Binding", spec_start)?;
                self.scopes.declare(&imported, BindingKind::Lexical, spec_start)?;
                imported.clone()
            };
            specifiers.push(ImportSpecifier::Named {
                imported,
                local,
                span: self.node_span(spec_start),
            });
        }
        Ok(())
    }

    fn parse_import_binding(&mut self) -> Result<String, ParseError> {
        let at = self.cur.span.start;
        let name = self.parse_identifier_name()?;
        self.check_restricted_name(&name, "Binding", at)?;
        self.scopes.declare(&name, BindingKind::Lexical, at)?;
        Ok(name)
    }

    /// Exported or imported name: an identifier (keywords included) or,
    /// from ES2022, a string literal.
    fn parse_module_export_name(&mut self) -> Result<String, ParseError> {
        if self.cur.kind == TokenKind::Str
            && self.options.ecma_version >= EcmaVersion::Es2022
        {
            let value = match &self.cur.value {
                TokenValue::Str(s) => s.clone(),
                _ => String::new(),
            };
            self.next()?;
            return Ok(value);
        }
        self.parse_ident_liberal()
    }

    fn parse_module_source(&mut self) -> Result<String, ParseError> {
        if self.cur.kind != TokenKind::Str {
            return Err(self.unexpected());
        }
        let value = match &self.cur.value {
            TokenValue::Str(s) => s.clone(),
            _ => String::new(),
        };
        self.next()?;
        Ok(value)
    }

    fn declare_export(&mut self, name: &str, pos: Position) -> Result<(), ParseError> {
        if let Some(_first) = self.exports.get(name) {
            let message = format!("Duplicate export '{name}'");
            return Err(self.err_at(ErrorKind::Syntax, message, pos));
        }
        self.exports.insert(name.to_string(), pos);
        Ok(())
    }

    fn parse_export_declaration(&mut self, start: Position) -> Result<Statement, ParseError> {
        self.next()?;

        // export * from / export * as ns from
        if self.at_punct(Punct::Star) {
            self.next()?;
            let exported = if self.eat_contextual("as")? {
                if self.options.ecma_version < EcmaVersion::Es2020 {
                    return Err(self.unexpected());
                }
                let at = self.cur.span.start;
                let name = self.parse_module_export_name()?;
                self.declare_export(&name, at)?;
                Some(name)
            } else {
                None
            };
            if !self.eat_contextual("from")? {
                return Err(self.unexpected());
            }
            let source = self.parse_module_source()?;
            self.semicolon()?;
            return Ok(Statement::ExportAllDeclaration {
                exported,
                source,
                span: self.node_span(start),
            });
        }

        // export default ...
        if self.cur.kind == TokenKind::Keyword(Keyword::Default) {
            let default_at = self.cur.span.start;
            self.next()?;
            self.declare_export("default", default_at)?;
            let decl_start = self.cur.span.start;
            let declaration = if self.cur.kind == TokenKind::Keyword(Keyword::Function) {
                self.next()?;
                let stmt = self.parse_default_function(decl_start, false)?;
                ExportDefault::Function(Box::new(stmt))
            } else if self.is_async_function_ahead()? {
                self.next()?;
                self.expect_keyword(Keyword::Function)?;
                let stmt = self.parse_default_function(decl_start, true)?;
                ExportDefault::Function(Box::new(stmt))
            } else if self.cur.kind == TokenKind::Keyword(Keyword::Class) {
                let stmt = self.parse_class_declaration_default(decl_start)?;
                ExportDefault::Class(Box::new(stmt))
            } else {
                let expr = self.parse_maybe_assign(false, None)?;
                self.semicolon()?;
                ExportDefault::Expression(expr)
            };
            return Ok(Statement::ExportDefaultDeclaration {
                declaration,
                span: self.node_span(start),
            });
        }

        // export <declaration>
        if matches!(
            self.cur.kind,
            TokenKind::Keyword(Keyword::Var)
                | TokenKind::Keyword(Keyword::Const)
                | TokenKind::Keyword(Keyword::Function)
                | TokenKind::Keyword(Keyword::Class)
        ) || self.is_let_declaration()?
            || self.is_async_function_ahead()?
        {
            let declaration = self.parse_statement(StmtCtx::Default, true)?;
            let mut names = Vec::new();
            exported_declaration_names(&declaration, &mut names);
            for (name, pos) in names {
                self.declare_export(&name, pos)?;
            }
            return Ok(Statement::ExportNamedDeclaration {
                declaration: Some(Box::new(declaration)),
                specifiers: Vec::new(),
                source: None,
                span: self.node_span(start),
            });
        }

        // export { ... } [from ...]
        self.expect_punct(Punct::LBrace)?;
        let mut specifiers = Vec::new();
        let mut local_strings: Vec<Position> = Vec::new();
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
            let spec_start = self.cur.span.start;
            let local_is_string = self.cur.kind == TokenKind::Str;
            if local_is_string {
                local_strings.push(spec_start);
            }
            let local = self.parse_module_export_name()?;
            let (exported, exported_at) = if self.eat_contextual("as")? {
                let at = self.cur.span.start;
                (self.parse_module_export_name()?, at)
            } else {
                (local.clone(), spec_start)
            };
            self.declare_export(&exported, exported_at)?;
            specifiers.push(ExportSpecifier {
                local,
                exported,
                span: self.node_span(spec_start),
            });
        }

        let source = if self.eat_contextual("from")? {
            Some(self.parse_module_source()?)
        } else {
            if let Some(at) = local_strings.first() {
                return Err(self.err_at(
                    ErrorKind::Syntax,
                    "A string literal cannot be used as an exported binding without `from`",
                    *at,
                ));
            }
            for spec in &specifiers {
                // The local side must name a top-level binding; it may be
                // declared later in the file
                self.check_unreserved(&spec.local, spec.span.start)?;
                self.scopes.check_local_export(&spec.local, spec.span.start);
            }
            None
        };
        self.semicolon()?;
        Ok(Statement::ExportNamedDeclaration {
            declaration: None,
            specifiers,
            source,
            span: self.node_span(start),
        })
    }

    /// Function declaration after `export default function`, where the
    /// name may be omitted.
    fn parse_default_function(
        &mut self,
        start: Position,
        is_async: bool,
    ) -> Result<Statement, ParseError> {
        let is_generator =
            self.options.ecma_version >= EcmaVersion::Es2015 && self.eat_punct(Punct::Star)?;
        let name = if self.cur.kind == TokenKind::Name {
            let at = self.cur.span.start;
            let name = self.parse_identifier_name()?;
            self.check_restricted_name(&name, "Binding", at)?;
            self.scopes.declare(&name, BindingKind::Lexical, at)?;
            name
        } else {
            String::new()
        };
        let (params, body) = self.parse_function_rest(is_async, is_generator)?;
        Ok(Statement::FunctionDeclaration {
            name,
            params,
            body,
            is_async,
            is_generator,
            span: self.node_span(start),
        })
    }

}

/// Record the exported names bound by `export <declaration>`.
fn exported_declaration_names(stmt: &Statement, out: &mut Vec<(String, Position)>) {
    match stmt {
        Statement::VariableDeclaration { declarations, .. } => {
            for decl in declarations {
                collect_bound_names(&decl.id, out);
            }
        }
        Statement::FunctionDeclaration { name, span, .. } => {
            out.push((name.clone(), span.start));
        }
        Statement::ClassDeclaration { name: Some(name), span, .. } => {
            out.push((name.clone(), span.start));
        }
        _ => {}
    }
}

fn apply_directive(stmt: &mut Statement, text: String) {
    if let Statement::ExpressionStatement { directive, .. } = stmt {
        *directive = Some(text);
    }
}

/// Whether a token can begin a class element key.
fn class_key_start(token: &Token) -> bool {
    matches!(
        token.kind,
        TokenKind::Name
            | TokenKind::Str
            | TokenKind::Number
            | TokenKind::PrivateName
            | TokenKind::Keyword(_)
            | TokenKind::Punct(Punct::LBracket)
    )
}
