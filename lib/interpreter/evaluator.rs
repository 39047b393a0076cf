use std::{cell::RefCell, collections::HashMap, rc::Rc};

use anyhow::{anyhow, bail, Result};

use crate::{
    ast::{Expression, Program, Statement},
    token::Token,
};

use super::{builtins, environment::Environment, object::Object};

const TRUE: Object = Object::Boolean(true);
const FALSE: Object = Object::Boolean(false);
const NULL: Object = Object::Null;

/// Tree-walking evaluation. The evaluator owns the current environment and
/// keeps it between programs, so one evaluator carries a whole session.
pub struct Evaluator {
    env: Rc<RefCell<Environment>>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            env: Environment::new(),
        }
    }

    pub fn eval(&mut self, program: Program) -> Result<Object> {
        let mut result = NULL;
        for statement in program.statements {
            result = match self.eval_statement(Box::new(statement))? {
                Object::ReturnValue(value) => return Ok(*value),
                object => object,
            };
        }
        Ok(result)
    }

    fn eval_statement(&mut self, statement: Box<Statement>) -> Result<Object> {
        match *statement {
            Statement::Expression(expression) => self.eval_expression(Box::new(expression)),
            Statement::Block(statements) => self.eval_block_statement(statements),
            Statement::Return(expression) => {
                let value = self.eval_expression(Box::new(expression))?;
                Ok(Object::ReturnValue(Box::new(value)))
            }
            Statement::Let { name, value } => {
                let value = self.eval_expression(Box::new(value))?;
                self.env.borrow_mut().set(&name, value);
                Ok(NULL)
            }
        }
    }

    // A return signal passes through unopened; it is unwrapped at the
    // function-call boundary (or at the program's top level).
    fn eval_block_statement(&mut self, statements: Vec<Statement>) -> Result<Object> {
        let mut result = NULL;
        for statement in statements {
            result = self.eval_statement(Box::new(statement))?;
            if let Object::ReturnValue(_) = result {
                return Ok(result);
            }
        }
        Ok(result)
    }

    fn eval_expression(&mut self, expression: Box<Expression>) -> Result<Object> {
        match *expression {
            Expression::IntegerLiteral(value) => Ok(Object::Integer(value)),
            Expression::StringLiteral(value) => Ok(Object::String(value)),
            Expression::BooleanLiteral(value) => Ok(native_bool_to_boolean_object(value)),
            Expression::Identifier(name) => self.eval_identifier_expression(name),
            Expression::Prefix { operator, right } => {
                let right = self.eval_expression(right)?;
                self.eval_prefix_expression(operator, right)
            }
            Expression::Infix {
                left,
                operator,
                right,
            } => {
                let left = self.eval_expression(left)?;
                let right = self.eval_expression(right)?;
                self.eval_infix_expression(left, operator, right)
            }
            Expression::If {
                condition,
                consequence,
                alternative,
            } => self.eval_if_expression(condition, consequence, alternative),
            Expression::FunctionLiteral { parameters, body } => Ok(Object::Function {
                parameters,
                body,
                env: self.env.clone(),
            }),
            Expression::Call {
                function,
                arguments,
            } => self.eval_call_expression(function, arguments),
            Expression::ArrayLiteral(elements) => self.eval_array_literal(elements),
            Expression::Index { left, index } => self.eval_index_expression(left, index),
            Expression::HashLiteral(pairs) => self.eval_hash_literal(pairs),
        }
    }

    fn eval_identifier_expression(&mut self, name: String) -> Result<Object> {
        if let Some(value) = self.env.borrow().get(&name) {
            return Ok(value);
        }
        builtins::lookup(&name).ok_or(anyhow!("identifier not found: {}", name))
    }

    fn eval_prefix_expression(&mut self, operator: Token, right: Object) -> Result<Object> {
        match operator {
            Token::Bang => Ok(native_bool_to_boolean_object(!is_truthy(&right))),
            Token::Minus => match right {
                Object::Integer(value) => Ok(Object::Integer(-value)),
                right => Err(anyhow!("unknown operator: -{}", right.kind())),
            },
            _ => Err(anyhow!("unknown operator: {}{}", operator, right.kind())),
        }
    }

    fn eval_infix_expression(
        &mut self,
        left: Object,
        operator: Token,
        right: Object,
    ) -> Result<Object> {
        match (left, right) {
            (Object::Integer(left), Object::Integer(right)) => {
                self.eval_integer_infix_expression(left, operator, right)
            }
            (Object::Boolean(left), Object::Boolean(right)) => match operator {
                Token::Eq => Ok(native_bool_to_boolean_object(left == right)),
                Token::NotEq => Ok(native_bool_to_boolean_object(left != right)),
                _ => Err(anyhow!("unknown operator: BOOLEAN {} BOOLEAN", operator)),
            },
            (Object::String(left), Object::String(right)) => match operator {
                Token::Plus => Ok(Object::String(format!("{}{}", left, right))),
                _ => Err(anyhow!("unknown operator: STRING {} STRING", operator)),
            },
            (Object::Null, Object::Null) => match operator {
                Token::Eq => Ok(TRUE),
                Token::NotEq => Ok(FALSE),
                _ => Err(anyhow!("unknown operator: NULL {} NULL", operator)),
            },
            (left, right) if left.kind() != right.kind() => Err(anyhow!(
                "type mismatch: {} {} {}",
                left.kind(),
                operator,
                right.kind()
            )),
            (left, right) => Err(anyhow!(
                "unknown operator: {} {} {}",
                left.kind(),
                operator,
                right.kind()
            )),
        }
    }

    fn eval_integer_infix_expression(
        &mut self,
        left: i64,
        operator: Token,
        right: i64,
    ) -> Result<Object> {
        match operator {
            Token::Plus => Ok(Object::Integer(left + right)),
            Token::Minus => Ok(Object::Integer(left - right)),
            Token::Asterisk => Ok(Object::Integer(left * right)),
            Token::Slash => {
                if right == 0 {
                    bail!("division by zero");
                }
                Ok(Object::Integer(left / right))
            }
            Token::Lt => Ok(native_bool_to_boolean_object(left < right)),
            Token::Gt => Ok(native_bool_to_boolean_object(left > right)),
            Token::Eq => Ok(native_bool_to_boolean_object(left == right)),
            Token::NotEq => Ok(native_bool_to_boolean_object(left != right)),
            _ => Err(anyhow!("unknown operator: INTEGER {} INTEGER", operator)),
        }
    }

    fn eval_if_expression(
        &mut self,
        condition: Box<Expression>,
        consequence: Box<Statement>,
        alternative: Option<Box<Statement>>,
    ) -> Result<Object> {
        let condition = self.eval_expression(condition)?;
        if is_truthy(&condition) {
            self.eval_statement(consequence)
        } else if let Some(alternative) = alternative {
            self.eval_statement(alternative)
        } else {
            Ok(NULL)
        }
    }

    fn eval_call_expression(
        &mut self,
        function: Box<Expression>,
        arguments: Vec<Expression>,
    ) -> Result<Object> {
        let function = self.eval_expression(function)?;
        let args = arguments
            .into_iter()
            .map(|argument| self.eval_expression(Box::new(argument)))
            .collect::<Result<Vec<Object>>>()?;

        match function {
            Object::Function {
                parameters,
                body,
                env,
            } => {
                if parameters.len() != args.len() {
                    bail!(
                        "wrong number of arguments: want={}, got={}",
                        parameters.len(),
                        args.len()
                    );
                }
                // The call frame extends the function's captured scope, not
                // the caller's.
                let call_env = Environment::new_enclosed(env);
                parameters.into_iter().zip(args).for_each(|(param, arg)| {
                    call_env.borrow_mut().set(&param, arg);
                });
                let caller_env = std::mem::replace(&mut self.env, call_env);
                let result = self.eval_statement(body);
                self.env = caller_env;
                match result? {
                    Object::ReturnValue(value) => Ok(*value),
                    object => Ok(object),
                }
            }
            Object::BuiltInFunction(function) => function(args),
            other => bail!("{} is not a function", other.kind()),
        }
    }

    fn eval_array_literal(&mut self, elements: Vec<Expression>) -> Result<Object> {
        let elements = elements
            .into_iter()
            .map(|element| self.eval_expression(Box::new(element)))
            .collect::<Result<Vec<Object>>>()?;
        Ok(Object::array(elements))
    }

    fn eval_index_expression(
        &mut self,
        left: Box<Expression>,
        index: Box<Expression>,
    ) -> Result<Object> {
        let left = self.eval_expression(left)?;
        let index = self.eval_expression(index)?;
        match (left, index) {
            (Object::Array(elements), Object::Integer(index)) => {
                let elements = elements.borrow();
                // Out of range, including negative, yields null.
                let element = usize::try_from(index)
                    .ok()
                    .and_then(|index| elements.get(index).cloned());
                Ok(element.unwrap_or(NULL))
            }
            (Object::Hash(pairs), index) => {
                let key = index.hash_key()?;
                Ok(pairs.get(&key).cloned().unwrap_or(NULL))
            }
            (left, _) => Err(anyhow!("index operator not supported: {}", left.kind())),
        }
    }

    fn eval_hash_literal(&mut self, pairs: Vec<(Expression, Expression)>) -> Result<Object> {
        let mut hash = HashMap::new();
        for (key, value) in pairs {
            let key = self.eval_expression(Box::new(key))?.hash_key()?;
            let value = self.eval_expression(Box::new(value))?;
            hash.insert(key, value);
        }
        Ok(Object::Hash(hash))
    }
}

fn native_bool_to_boolean_object(input: bool) -> Object {
    if input {
        TRUE
    } else {
        FALSE
    }
}

fn is_truthy(object: &Object) -> bool {
    !matches!(object, Object::Null | Object::Boolean(false))
}
