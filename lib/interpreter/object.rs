use core::fmt;
use std::{cell::RefCell, collections::HashMap, rc::Rc};

use anyhow::{anyhow, Result};

use crate::ast::Statement;

use super::environment::Environment;

pub type BuiltinFn = fn(Vec<Object>) -> Result<Object>;

/// A runtime value. Arrays share their backing storage so that `push` can
/// grow an array through any binding that refers to it; everything else
/// behaves like a value.
#[derive(Debug, PartialEq, Clone)]
pub enum Object {
    Integer(i64),
    String(String),
    Boolean(bool),
    Null,
    Array(Rc<RefCell<Vec<Object>>>),
    Hash(HashMap<HashKey, Object>),
    /// The return signal: wraps the value of a `return` statement on its
    /// way out of a block, unwrapped again at the function-call boundary.
    ReturnValue(Box<Object>),
    Function {
        parameters: Vec<String>,
        body: Box<Statement>,
        env: Rc<RefCell<Environment>>,
    },
    BuiltInFunction(BuiltinFn),
}

/// A hash key is qualified by its kind: `1`, `"1"` and `true` are three
/// distinct keys no matter how their underlying representations coincide.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub enum HashKey {
    Integer(i64),
    String(String),
    Boolean(bool),
}

impl Object {
    pub fn array(elements: Vec<Object>) -> Object {
        Object::Array(Rc::new(RefCell::new(elements)))
    }

    /// The uniform type tag, used wherever a diagnostic names an operand's
    /// type.
    pub fn kind(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::String(_) => "STRING",
            Object::Boolean(_) => "BOOLEAN",
            Object::Null => "NULL",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
            Object::ReturnValue(_) => "RETURN_VALUE",
            Object::Function { .. } => "FUNCTION",
            Object::BuiltInFunction(_) => "BUILTIN",
        }
    }

    pub fn hash_key(&self) -> Result<HashKey> {
        match self {
            Object::Integer(value) => Ok(HashKey::Integer(*value)),
            Object::String(value) => Ok(HashKey::String(value.clone())),
            Object::Boolean(value) => Ok(HashKey::Boolean(*value)),
            _ => Err(anyhow!("unusable as hash key: {}", self.kind())),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::String(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::Null => write!(f, "null"),
            Object::Array(elements) => {
                let elements: Vec<String> = elements
                    .borrow()
                    .iter()
                    .map(|element| element.to_string())
                    .collect();
                write!(f, "[{}]", elements.join(", "))
            }
            Object::Hash(pairs) => {
                let pairs: Vec<String> = pairs
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value))
                    .collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
            Object::ReturnValue(value) => write!(f, "return {}", value),
            Object::Function {
                parameters, body, ..
            } => write!(f, "fn({}) {{ {} }}", parameters.join(", "), body),
            Object::BuiltInFunction(_) => write!(f, "builtin function"),
        }
    }
}

impl fmt::Display for HashKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HashKey::Integer(value) => write!(f, "{}", value),
            HashKey::String(value) => write!(f, "{}", value),
            HashKey::Boolean(value) => write!(f, "{}", value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_values_of_one_kind_share_a_hash_key() {
        let cases = vec![
            (Object::Integer(1), Object::Integer(1)),
            (Object::String("hello".to_string()), Object::String("hello".to_string())),
            (Object::Boolean(true), Object::Boolean(true)),
        ];
        for (a, b) in cases {
            assert_eq!(a.hash_key().unwrap(), b.hash_key().unwrap());
        }
    }

    #[test]
    fn differing_values_of_one_kind_have_distinct_hash_keys() {
        let cases = vec![
            (Object::Integer(1), Object::Integer(2)),
            (Object::String("hello".to_string()), Object::String("diff".to_string())),
            (Object::Boolean(true), Object::Boolean(false)),
        ];
        for (a, b) in cases {
            assert_ne!(a.hash_key().unwrap(), b.hash_key().unwrap());
        }
    }

    // Kinds with coinciding representations must still never collide.
    #[test]
    fn hash_keys_are_type_qualified() {
        let objects = vec![
            Object::Integer(1),
            Object::String("1".to_string()),
            Object::Boolean(true),
        ];
        for (i, a) in objects.iter().enumerate() {
            for (j, b) in objects.iter().enumerate() {
                let (a, b) = (a.hash_key().unwrap(), b.hash_key().unwrap());
                if i == j {
                    assert_eq!(a, b);
                } else {
                    assert_ne!(a, b);
                }
            }
        }
    }

    #[test]
    fn only_scalar_kinds_are_hashable() {
        let unhashable = vec![
            Object::Null,
            Object::array(vec![]),
            Object::Hash(HashMap::new()),
        ];
        for object in unhashable {
            let error = object.hash_key().unwrap_err();
            assert_eq!(
                error.to_string(),
                format!("unusable as hash key: {}", object.kind())
            );
        }
    }
}
