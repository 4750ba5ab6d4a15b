// ABOUTME: Environment module for managing variable bindings and scopes

use crate::error::AxionError;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

struct Binding {
    value: Value,
    is_const: bool,
}

#[derive(Default)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Binding>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new global environment with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates a new child environment with a parent.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    /// Declares a new binding in THIS scope. Errors if the name is already
    /// bound in this same scope — shadowing a parent scope is allowed, but
    /// redeclaring within one scope is not.
    pub fn declare(&self, name: &str, value: Value, is_const: bool) -> Result<(), AxionError> {
        let mut bindings = self.bindings.borrow_mut();
        if bindings.contains_key(name) {
            return Err(AxionError::Name(format!(
                "'{}' is already declared in this scope",
                name
            )));
        }
        bindings.insert(name.to_string(), Binding { value, is_const });
        Ok(())
    }

    /// Looks up a binding's value in this scope, then parent scopes.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(binding) = self.bindings.borrow().get(name) {
            return Some(binding.value.clone());
        }
        self.parent.as_ref().and_then(|p| p.get(name))
    }

    /// Whether `name` is const anywhere in the scope chain. `None` if unbound.
    pub fn is_const(&self, name: &str) -> Option<bool> {
        if let Some(binding) = self.bindings.borrow().get(name) {
            return Some(binding.is_const);
        }
        self.parent.as_ref().and_then(|p| p.is_const(name))
    }

    /// Snapshot of this scope's own bindings (not parents'), used to build a
    /// module Record at include time.
    pub fn own_bindings(&self) -> Vec<(String, Value)> {
        self.bindings
            .borrow()
            .iter()
            .map(|(name, binding)| (name.clone(), binding.value.clone()))
            .collect()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.bindings.borrow().contains_key(name)
            || self.parent.as_ref().is_some_and(|p| p.exists(name))
    }

    /// Updates an existing binding, walking the parent chain to find it.
    /// Errors if the binding is const or doesn't exist.
    pub fn set(&self, name: &str, value: Value) -> Result<(), AxionError> {
        let mut bindings = self.bindings.borrow_mut();
        if let Some(binding) = bindings.get_mut(name) {
            if binding.is_const {
                return Err(AxionError::Const(format!(
                    "cannot assign to const '{}'",
                    name
                )));
            }
            binding.value = value;
            return Ok(());
        }
        drop(bindings);

        if let Some(ref parent) = self.parent {
            return parent.set(name, value);
        }

        Err(AxionError::Name(format!("undefined variable '{}'", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_and_get() {
        let env = Environment::new();
        env.declare("x", Value::Integer(42), false).unwrap();
        assert!(matches!(env.get("x"), Some(Value::Integer(42))));
    }

    #[test]
    fn undefined_symbol_is_none() {
        let env = Environment::new();
        assert!(env.get("undefined").is_none());
    }

    #[test]
    fn exists_walks_parent_chain() {
        let parent = Environment::new();
        parent.declare("x", Value::Integer(1), false).unwrap();
        let child = Environment::with_parent(parent);
        assert!(child.exists("x"));
        assert!(!child.exists("y"));
    }

    #[test]
    fn redeclaration_in_same_scope_errors() {
        let env = Environment::new();
        env.declare("x", Value::Integer(1), false).unwrap();
        assert!(env.declare("x", Value::Integer(2), false).is_err());
    }

    #[test]
    fn child_scope_may_shadow_parent() {
        let parent = Environment::new();
        parent.declare("x", Value::Integer(42), false).unwrap();

        let child = Environment::with_parent(parent);
        child.declare("x", Value::Integer(100), false).unwrap();

        assert!(matches!(child.get("x"), Some(Value::Integer(100))));
    }

    #[test]
    fn child_sees_parent_bindings() {
        let parent = Environment::new();
        parent.declare("x", Value::Integer(42), false).unwrap();
        let child = Environment::with_parent(parent);
        assert!(matches!(child.get("x"), Some(Value::Integer(42))));
    }

    #[test]
    fn set_walks_up_to_defining_scope() {
        let parent = Environment::new();
        parent.declare("x", Value::Integer(1), false).unwrap();
        let child = Environment::with_parent(parent.clone());

        child.set("x", Value::Integer(2)).unwrap();
        assert!(matches!(parent.get("x"), Some(Value::Integer(2))));
    }

    #[test]
    fn set_on_const_binding_errors() {
        let env = Environment::new();
        env.declare("x", Value::Integer(1), true).unwrap();
        assert!(matches!(env.set("x", Value::Integer(2)), Err(AxionError::Const(_))));
    }

    #[test]
    fn set_on_undefined_errors() {
        let env = Environment::new();
        assert!(matches!(env.set("y", Value::Integer(1)), Err(AxionError::Name(_))));
    }
}
