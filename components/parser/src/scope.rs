//! Scope tracking for binding validation.
//!
//! The tracker maintains a stack of scope frames during parsing and
//! rejects invalid redeclarations at their source position. It records
//! names only; it performs no resolution and builds no symbol table.

use bitflags::bitflags;
use std::collections::HashMap;
use syntax_core::{ErrorKind, ParseError, Position};
use tracing::trace;

bitflags! {
    /// Properties of a scope frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ScopeFlags: u16 {
        /// Program top level
        const TOP = 1 << 0;
        /// Function body (any flavor)
        const FUNCTION = 1 << 1;
        /// Async function
        const ASYNC = 1 << 2;
        /// Generator function
        const GENERATOR = 1 << 3;
        /// Arrow function (transparent to `this` and `new.target`)
        const ARROW = 1 << 4;
        /// Catch clause whose parameter is a single plain identifier
        const SIMPLE_CATCH = 1 << 5;
        /// `super` property access is allowed (method bodies)
        const SUPER = 1 << 6;
        /// `super(...)` call is allowed (derived constructors)
        const DIRECT_SUPER = 1 << 7;
        /// Class field initializer (await/yield are unavailable)
        const CLASS_FIELD_INIT = 1 << 8;

        /// Scopes that host `var` declarations
        const VAR = Self::TOP.bits() | Self::FUNCTION.bits();
    }
}

/// How a name is being introduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// Not a binding at all (plain reference; no bookkeeping)
    None,
    /// `var` declaration or function parameter
    Var,
    /// `let`, `const`, class declaration, import
    Lexical,
    /// Function declaration in a block
    Function,
    /// Catch parameter that is a single plain identifier
    SimpleCatch,
    /// Declared outside the scope it will live in (function name,
    /// for-head bindings before the body scope exists)
    Outside,
}

/// One frame on the scope stack.
#[derive(Debug)]
struct Scope {
    flags: ScopeFlags,
    /// Names declared with `var` reachable from this frame
    var: Vec<String>,
    /// Names declared lexically in this frame; for a simple-catch frame
    /// the first entry is always the catch parameter
    lexical: Vec<String>,
    /// Block-level function declaration names
    functions: Vec<String>,
}

impl Scope {
    fn new(flags: ScopeFlags) -> Self {
        Scope {
            flags,
            var: Vec::new(),
            lexical: Vec::new(),
            functions: Vec::new(),
        }
    }
}

/// Tracks scopes and declared names for the duration of a parse.
#[derive(Debug)]
pub struct ScopeTracker {
    stack: Vec<Scope>,
    in_module: bool,
    /// Names referenced in module export clauses but not (yet) declared
    /// at the top level, with the position of the first reference.
    undefined_exports: HashMap<String, Position>,
}

impl ScopeTracker {
    /// Create a tracker with the top-level scope already entered.
    pub fn new(in_module: bool) -> Self {
        ScopeTracker {
            stack: vec![Scope::new(ScopeFlags::TOP)],
            in_module,
            undefined_exports: HashMap::new(),
        }
    }

    /// Enter a new scope.
    pub fn enter(&mut self, flags: ScopeFlags) {
        trace!(?flags, depth = self.stack.len(), "enter scope");
        self.stack.push(Scope::new(flags));
    }

    /// Exit the innermost scope. The top-level scope is never popped.
    pub fn exit(&mut self) {
        debug_assert!(self.stack.len() > 1);
        self.stack.pop();
    }

    fn current(&mut self) -> &mut Scope {
        // The stack always holds at least the top-level frame.
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Flags of the innermost scope.
    pub fn current_flags(&self) -> ScopeFlags {
        self.stack[self.stack.len() - 1].flags
    }

    /// Flags of the nearest var-hosting scope.
    pub fn current_var_flags(&self) -> ScopeFlags {
        for scope in self.stack.iter().rev() {
            if scope.flags.intersects(ScopeFlags::VAR) {
                return scope.flags;
            }
        }
        self.stack[0].flags
    }

    /// Flags of the nearest scope that binds `this` (skips arrows).
    pub fn current_this_flags(&self) -> ScopeFlags {
        for scope in self.stack.iter().rev() {
            if scope.flags.intersects(ScopeFlags::VAR)
                && !scope.flags.contains(ScopeFlags::ARROW)
            {
                return scope.flags;
            }
        }
        self.stack[0].flags
    }

    /// True inside any function body, arrow included.
    pub fn in_function(&self) -> bool {
        self.current_var_flags().contains(ScopeFlags::FUNCTION)
    }

    /// True where `yield` is a keyword.
    pub fn in_generator(&self) -> bool {
        let flags = self.current_var_flags();
        flags.contains(ScopeFlags::GENERATOR)
            && !flags.contains(ScopeFlags::CLASS_FIELD_INIT)
    }

    /// True where `await` is a keyword.
    pub fn in_async(&self) -> bool {
        let flags = self.current_var_flags();
        flags.contains(ScopeFlags::ASYNC)
            && !flags.contains(ScopeFlags::CLASS_FIELD_INIT)
    }

    /// True where `super.x` is valid.
    pub fn allow_super(&self) -> bool {
        self.current_this_flags().contains(ScopeFlags::SUPER)
    }

    /// True where `super(...)` is valid.
    pub fn allow_direct_super(&self) -> bool {
        self.current_this_flags().contains(ScopeFlags::DIRECT_SUPER)
    }

    /// True where `new.target` is valid.
    pub fn allow_new_target(&self) -> bool {
        let flags = self.current_this_flags();
        flags.contains(ScopeFlags::FUNCTION) || flags.contains(ScopeFlags::CLASS_FIELD_INIT)
    }

    /// Block-level function declarations bind like `var` in sloppy-mode
    /// scripts at the top level and directly inside function bodies.
    fn functions_as_var(&self, flags: ScopeFlags) -> bool {
        flags.contains(ScopeFlags::FUNCTION)
            || (!self.in_module && flags.contains(ScopeFlags::TOP))
    }

    /// Record a declared name, rejecting invalid redeclarations.
    pub fn declare(
        &mut self,
        name: &str,
        kind: BindingKind,
        pos: Position,
    ) -> Result<(), ParseError> {
        trace!(name, ?kind, "declare");
        let redeclared = match kind {
            BindingKind::None | BindingKind::Outside => false,
            BindingKind::Lexical => {
                let in_module = self.in_module;
                let scope = self.current();
                let clash = scope.lexical.iter().any(|n| n == name)
                    || scope.functions.iter().any(|n| n == name)
                    || scope.var.iter().any(|n| n == name);
                scope.lexical.push(name.to_string());
                if in_module && scope.flags.contains(ScopeFlags::TOP) {
                    self.undefined_exports.remove(name);
                }
                clash
            }
            BindingKind::SimpleCatch => {
                // The parameter owns the frame; shadowing is checked when
                // something else collides with it, not here.
                self.current().lexical.push(name.to_string());
                false
            }
            BindingKind::Function => {
                let as_var = self.functions_as_var(self.current_flags());
                let scope = self.current();
                let clash = if as_var {
                    scope.lexical.iter().any(|n| n == name)
                } else {
                    scope.lexical.iter().any(|n| n == name)
                        || scope.var.iter().any(|n| n == name)
                };
                scope.functions.push(name.to_string());
                clash
            }
            BindingKind::Var => {
                let mut clash = false;
                let in_module = self.in_module;
                for i in (0..self.stack.len()).rev() {
                    let as_var = {
                        let flags = self.stack[i].flags;
                        self.functions_as_var(flags)
                    };
                    let scope = &mut self.stack[i];
                    let catch_param_shadow = scope.flags.contains(ScopeFlags::SIMPLE_CATCH)
                        && scope.lexical.first().map(String::as_str) == Some(name);
                    if (scope.lexical.iter().any(|n| n == name) && !catch_param_shadow)
                        || (!as_var && scope.functions.iter().any(|n| n == name))
                    {
                        clash = true;
                        break;
                    }
                    scope.var.push(name.to_string());
                    if in_module && scope.flags.contains(ScopeFlags::TOP) {
                        self.undefined_exports.remove(name);
                    }
                    if scope.flags.intersects(ScopeFlags::VAR) {
                        break;
                    }
                }
                clash
            }
        };
        if redeclared {
            return Err(ParseError::new(
                ErrorKind::Binding,
                format!("Identifier '{name}' has already been declared"),
                pos,
            ));
        }
        Ok(())
    }

    /// Record a local name referenced by an `export { ... }` clause.
    ///
    /// Undeclared names are remembered and reported at end of parse,
    /// since the declaration may legally follow the export.
    pub fn check_local_export(&mut self, name: &str, pos: Position) {
        let top = &self.stack[0];
        if !top.lexical.iter().any(|n| n == name) && !top.var.iter().any(|n| n == name) {
            self.undefined_exports.entry(name.to_string()).or_insert(pos);
        }
    }

    /// The export reference that never resolved, if any. Checked once,
    /// after the whole program has been parsed.
    pub fn first_undefined_export(&self) -> Option<(&str, Position)> {
        self.undefined_exports
            .iter()
            .min_by_key(|(_, pos)| pos.offset)
            .map(|(name, pos)| (name.as_str(), *pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(offset: usize) -> Position {
        Position { offset, line: 1, column: offset as u32 }
    }

    #[test]
    fn test_let_redeclaration_rejected() {
        let mut scopes = ScopeTracker::new(false);
        scopes.declare("x", BindingKind::Lexical, pos(4)).unwrap();
        let err = scopes.declare("x", BindingKind::Lexical, pos(11)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Binding);
        assert!(err.message.contains("already been declared"));
        assert_eq!(err.pos.offset, 11);
    }

    #[test]
    fn test_var_var_redeclaration_allowed() {
        let mut scopes = ScopeTracker::new(false);
        scopes.declare("x", BindingKind::Var, pos(4)).unwrap();
        scopes.declare("x", BindingKind::Var, pos(11)).unwrap();
    }

    #[test]
    fn test_var_against_let_in_outer_scope() {
        let mut scopes = ScopeTracker::new(false);
        scopes.declare("x", BindingKind::Lexical, pos(4)).unwrap();
        scopes.enter(ScopeFlags::empty());
        // var hoists past the block and collides with the outer let
        assert!(scopes.declare("x", BindingKind::Var, pos(20)).is_err());
    }

    #[test]
    fn test_let_shadows_in_inner_block() {
        let mut scopes = ScopeTracker::new(false);
        scopes.declare("x", BindingKind::Lexical, pos(4)).unwrap();
        scopes.enter(ScopeFlags::empty());
        scopes.declare("x", BindingKind::Lexical, pos(20)).unwrap();
        scopes.exit();
    }

    #[test]
    fn test_var_stops_at_function_boundary() {
        let mut scopes = ScopeTracker::new(false);
        scopes.declare("x", BindingKind::Lexical, pos(4)).unwrap();
        scopes.enter(ScopeFlags::FUNCTION);
        scopes.declare("x", BindingKind::Var, pos(30)).unwrap();
    }

    #[test]
    fn test_simple_catch_param_var_carveout() {
        // catch (e) { var e } is legal when the catch binding is simple
        let mut scopes = ScopeTracker::new(false);
        scopes.enter(ScopeFlags::SIMPLE_CATCH);
        scopes.declare("e", BindingKind::SimpleCatch, pos(7)).unwrap();
        scopes.enter(ScopeFlags::empty());
        scopes.declare("e", BindingKind::Var, pos(12)).unwrap();
    }

    #[test]
    fn test_destructured_catch_param_var_clash() {
        // catch ([e]) { var e } is a redeclaration
        let mut scopes = ScopeTracker::new(false);
        scopes.enter(ScopeFlags::empty());
        scopes.declare("e", BindingKind::Lexical, pos(8)).unwrap();
        scopes.enter(ScopeFlags::empty());
        assert!(scopes.declare("e", BindingKind::Var, pos(18)).is_err());
    }

    #[test]
    fn test_lexical_against_simple_catch_param() {
        // catch (e) { let e } collides with the parameter
        let mut scopes = ScopeTracker::new(false);
        scopes.enter(ScopeFlags::SIMPLE_CATCH);
        scopes.declare("e", BindingKind::SimpleCatch, pos(7)).unwrap();
        scopes.enter(ScopeFlags::empty());
        scopes.declare("e", BindingKind::Lexical, pos(16)).unwrap();
        scopes.exit();
        // directly in the catch frame it does collide
        assert!(scopes.declare("e", BindingKind::Lexical, pos(20)).is_err());
    }

    #[test]
    fn test_function_binds_like_var_at_script_top() {
        let mut scopes = ScopeTracker::new(false);
        scopes.declare("f", BindingKind::Var, pos(0)).unwrap();
        scopes.declare("f", BindingKind::Function, pos(10)).unwrap();
    }

    #[test]
    fn test_function_clashes_with_var_at_module_top() {
        let mut scopes = ScopeTracker::new(true);
        scopes.declare("f", BindingKind::Var, pos(0)).unwrap();
        assert!(scopes.declare("f", BindingKind::Function, pos(10)).is_err());
    }

    #[test]
    fn test_this_flags_skip_arrows() {
        let mut scopes = ScopeTracker::new(false);
        scopes.enter(ScopeFlags::FUNCTION | ScopeFlags::GENERATOR);
        scopes.enter(ScopeFlags::FUNCTION | ScopeFlags::ARROW);
        assert!(scopes.current_this_flags().contains(ScopeFlags::GENERATOR));
        assert!(scopes.in_function());
    }

    #[test]
    fn test_undefined_export_bookkeeping() {
        let mut scopes = ScopeTracker::new(true);
        scopes.check_local_export("missing", pos(9));
        scopes.check_local_export("later", pos(30));
        scopes.declare("later", BindingKind::Lexical, pos(40)).unwrap();
        let (name, at) = scopes.first_undefined_export().unwrap();
        assert_eq!(name, "missing");
        assert_eq!(at.offset, 9);
    }
}
