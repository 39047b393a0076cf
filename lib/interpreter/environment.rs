use std::{cell::RefCell, collections::HashMap, rc::Rc};

use super::object::Object;

/// One scope in the lexical chain. Environments are shared (a closure holds
/// its defining scope alive), so they always live behind `Rc<RefCell<_>>`.
#[derive(Debug, PartialEq, Clone)]
pub struct Environment {
    store: HashMap<String, Object>,
    outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            outer: None,
        }))
    }

    pub fn new_enclosed(outer: Rc<RefCell<Environment>>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Environment {
            store: HashMap::new(),
            outer: Some(outer),
        }))
    }

    /// Resolves a name against this scope, reading through to the enclosing
    /// chain on a miss.
    pub fn get(&self, name: &str) -> Option<Object> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => match &self.outer {
                Some(outer) => outer.borrow().get(name),
                None => None,
            },
        }
    }

    /// Binds in this scope only, overwriting an existing binding of the same
    /// name.
    pub fn set(&mut self, name: &str, value: Object) {
        self.store.insert(name.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inner_scopes_read_through_and_shadow() {
        let outer = Environment::new();
        outer.borrow_mut().set("a", Object::Integer(1));
        outer.borrow_mut().set("b", Object::Integer(2));

        let inner = Environment::new_enclosed(outer.clone());
        inner.borrow_mut().set("b", Object::Integer(20));

        assert_eq!(inner.borrow().get("a"), Some(Object::Integer(1)));
        assert_eq!(inner.borrow().get("b"), Some(Object::Integer(20)));
        assert_eq!(outer.borrow().get("b"), Some(Object::Integer(2)));
        assert_eq!(inner.borrow().get("c"), None);
    }

    #[test]
    fn set_overwrites_in_place() {
        let env = Environment::new();
        env.borrow_mut().set("x", Object::Integer(1));
        env.borrow_mut().set("x", Object::Integer(2));
        assert_eq!(env.borrow().get("x"), Some(Object::Integer(2)));
    }
}
