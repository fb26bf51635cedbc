//! Variable environments.
//!
//! A [`Scope`] is one map of names to values plus a parent link; an
//! [`Environment`] is the interpreter's stack of active scopes. Name
//! resolution walks the parent chain from the innermost scope, so the
//! chain, not the stack, defines visibility: a function call scope links
//! straight to the global scope and cannot see its caller's locals.
//!
//! The stack exists so `pop_scope` restores the previous innermost scope
//! even when the popped scope's parent link skips over it.

use std::cell::RefCell;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::trace;

use crate::value::Value;

/// Shared, mutable cell for scopes.
///
/// Scopes are shared between the environment stack and child parent links,
/// so they live behind `Rc<RefCell>`. Borrows are confined to single
/// methods and never held across evaluation.
#[derive(Debug)]
pub struct ScopeCell<T>(Rc<RefCell<T>>);

impl<T> ScopeCell<T> {
    pub fn new(value: T) -> Self {
        ScopeCell(Rc::new(RefCell::new(value)))
    }

    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }
}

impl<T> Clone for ScopeCell<T> {
    fn clone(&self) -> Self {
        ScopeCell(Rc::clone(&self.0))
    }
}

/// One lexical scope: bindings plus the enclosing scope.
#[derive(Debug, Default)]
pub struct Scope {
    values: FxHashMap<String, Value>,
    parent: Option<ScopeCell<Scope>>,
}

/// Assignment to a name with no binding anywhere on the chain.
///
/// Carries no location; the interpreter attributes it to the assignment's
/// name token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("assignment to undefined variable")]
pub struct AssignToUndefined;

impl Scope {
    fn with_parent(parent: ScopeCell<Scope>) -> Self {
        Scope {
            values: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Bind `name` in this scope, replacing any existing binding here.
    fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_owned(), value);
    }

    /// Resolve `name` against this scope, then the parent chain.
    fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.values.get(name) {
            return Some(value.clone());
        }
        match &self.parent {
            Some(parent) => parent.borrow().lookup(name),
            None => None,
        }
    }

    /// Overwrite the nearest existing binding of `name` on the chain.
    fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignToUndefined> {
        if let Some(slot) = self.values.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => Err(AssignToUndefined),
        }
    }
}

/// The interpreter's scope stack.
///
/// The global scope sits at the bottom and is never popped; REPL sessions
/// rely on it persisting across `interpret` calls.
#[derive(Debug)]
pub struct Environment {
    scopes: Vec<ScopeCell<Scope>>,
    global: ScopeCell<Scope>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        let global = ScopeCell::new(Scope::default());
        Environment {
            scopes: vec![global.clone()],
            global,
        }
    }

    fn innermost(&self) -> &ScopeCell<Scope> {
        // Invariant: the global scope is always present.
        self.scopes.last().unwrap_or(&self.global)
    }

    /// Enter a block scope nested in the current innermost scope.
    pub fn push_scope(&mut self) {
        let scope = Scope::with_parent(self.innermost().clone());
        self.scopes.push(ScopeCell::new(scope));
    }

    /// Enter a function call scope.
    ///
    /// The call scope's parent is the global scope, not the current scope:
    /// function bodies see their parameters and globals only. Declared
    /// functions therefore do not close over their defining environment.
    pub fn push_call_scope(&mut self) {
        let scope = Scope::with_parent(self.global.clone());
        self.scopes.push(ScopeCell::new(scope));
    }

    /// Leave the innermost scope. The global scope is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Bind `name` in the innermost scope. Redefinition is allowed and
    /// overwrites, matching `var` semantics at every nesting depth.
    pub fn define(&mut self, name: &str, value: Value) {
        trace!(name, depth = self.scopes.len(), "define");
        self.innermost().borrow_mut().define(name, value);
    }

    /// Resolve `name` from the innermost scope outward.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.innermost().borrow().lookup(name)
    }

    /// Assign to the nearest existing binding of `name`.
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignToUndefined> {
        self.innermost().borrow_mut().assign(name, value)
    }

    /// Current stack depth, including the global scope.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}
