use std::collections::HashMap;

use anyhow::{anyhow, bail, Result};
use lazy_static::lazy_static;

use super::object::{BuiltinFn, Object};

lazy_static! {
    // Built once, read-only afterwards. The evaluator consults this table
    // only after the environment chain misses, so user bindings shadow
    // builtin names.
    static ref BUILTINS: HashMap<&'static str, BuiltinFn> = {
        let mut builtins: HashMap<&'static str, BuiltinFn> = HashMap::new();
        builtins.insert("len", len);
        builtins.insert("first", first);
        builtins.insert("last", last);
        builtins.insert("push", push);
        builtins
    };
}

pub fn lookup(name: &str) -> Option<Object> {
    BUILTINS
        .get(name)
        .map(|function| Object::BuiltInFunction(*function))
}

fn check_arity(name: &str, want: usize, got: usize) -> Result<()> {
    if want != got {
        bail!("wrong number of arguments for {name}: want={want}, got={got}");
    }
    Ok(())
}

fn len(args: Vec<Object>) -> Result<Object> {
    check_arity("len", 1, args.len())?;
    match &args[0] {
        Object::String(value) => Ok(Object::Integer(value.chars().count() as i64)),
        Object::Array(elements) => Ok(Object::Integer(elements.borrow().len() as i64)),
        other => Err(anyhow!(
            "argument to `len` not supported, got {}",
            other.kind()
        )),
    }
}

fn first(args: Vec<Object>) -> Result<Object> {
    check_arity("first", 1, args.len())?;
    match &args[0] {
        Object::Array(elements) => {
            Ok(elements.borrow().first().cloned().unwrap_or(Object::Null))
        }
        other => Err(anyhow!(
            "argument to `first` must be ARRAY, got {}",
            other.kind()
        )),
    }
}

fn last(args: Vec<Object>) -> Result<Object> {
    check_arity("last", 1, args.len())?;
    match &args[0] {
        Object::Array(elements) => {
            Ok(elements.borrow().last().cloned().unwrap_or(Object::Null))
        }
        other => Err(anyhow!(
            "argument to `last` must be ARRAY, got {}",
            other.kind()
        )),
    }
}

// The one mutating operation in the language: appends through the shared
// backing storage, so every binding aliasing the array sees the new element.
// Returns the new length.
fn push(args: Vec<Object>) -> Result<Object> {
    check_arity("push", 2, args.len())?;
    match &args[0] {
        Object::Array(elements) => {
            let mut elements = elements.borrow_mut();
            elements.push(args[1].clone());
            Ok(Object::Integer(elements.len() as i64))
        }
        other => Err(anyhow!(
            "argument to `push` must be ARRAY, got {}",
            other.kind()
        )),
    }
}
