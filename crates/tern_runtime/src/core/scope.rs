//! Lexical scopes.
//!
//! A scope is a node in a parent chain owning its own bindings. Scopes are
//! shared through `ScopeRef`; a child keeps its parent alive, never the
//! other way around.

use std::cell::RefCell;
use std::rc::Rc;

use super::value::{FastHashMap, Name, Value, fast_map_new};
use crate::errors::Fault;

pub type ScopeRef = Rc<RefCell<Scope>>;

#[derive(Debug)]
pub struct Scope {
    parent: Option<ScopeRef>,
    bindings: FastHashMap<Name, Value>,
}

impl Scope {
    pub fn new(parent: Option<ScopeRef>) -> Self {
        Self {
            parent,
            bindings: fast_map_new(),
        }
    }

    pub fn parent(&self) -> Option<&ScopeRef> {
        self.parent.as_ref()
    }

    /// Binding in this scope only, ignoring the parent chain.
    pub fn get_own(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn has_own(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Drops every binding, releasing the values they held.
    pub fn clear(&mut self) {
        self.bindings.clear();
    }
}

pub fn global_scope() -> ScopeRef {
    Rc::new(RefCell::new(Scope::new(None)))
}

/// New scope chained to `parent`, holding the only reference to itself.
pub fn create_child_scope(parent: &ScopeRef) -> ScopeRef {
    Rc::new(RefCell::new(Scope::new(Some(parent.clone()))))
}

/// Installs a mutable binding. The value moves into the scope.
pub fn bind_mutable(scope: &ScopeRef, name: Name, value: Value) -> Result<(), Fault> {
    let mut s = scope.borrow_mut();
    if s.bindings.contains_key(&name) {
        return Err(Fault::DuplicateBinding(name.to_string()));
    }
    s.bindings.insert(name, value);
    Ok(())
}

/// Drops one reference. The last reference destroys the scope and its
/// bindings.
pub fn release_scope(scope: ScopeRef) {
    let remaining = Rc::strong_count(&scope) - 1;
    tracing::trace!(target: "tern::scope", remaining, "release scope");
    drop(scope);
}

/// Resolves `name` through the parent chain.
pub fn lookup(scope: &ScopeRef, name: &str) -> Option<Value> {
    let mut cur = Some(scope.clone());
    while let Some(s) = cur {
        let s = s.borrow();
        if let Some(v) = s.bindings.get(name) {
            return Some(v.clone());
        }
        cur = s.parent.clone();
    }
    None
}

/// Updates the nearest binding of `name`. Hands the value back when no
/// scope in the chain binds it.
pub fn assign(scope: &ScopeRef, name: &str, value: Value) -> Result<(), Value> {
    let mut cur = Some(scope.clone());
    while let Some(s) = cur {
        let mut s = s.borrow_mut();
        if let Some(slot) = s.bindings.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        cur = s.parent.clone();
    }
    Err(value)
}

/// Last scope of the parent chain.
pub fn outermost(scope: &ScopeRef) -> ScopeRef {
    let mut cur = scope.clone();
    loop {
        let parent = cur.borrow().parent.clone();
        match parent {
            Some(p) => cur = p,
            None => return cur,
        }
    }
}

/// Declares `name` in `scope` itself unless it is already bound there.
pub fn declare(scope: &ScopeRef, name: Name, value: Value) {
    scope.borrow_mut().bindings.entry(name).or_insert(value);
}
