use std::fmt;

use anyhow::{anyhow, bail, Error, Result};

use crate::{
    ast::{Expression, Program, Statement},
    lexer::Lexer,
    token::Token,
};

#[derive(Debug, Clone, PartialOrd, PartialEq, Eq, Ord)]
enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

impl Precedence {
    fn from_token(token: &Token) -> Self {
        match token {
            Token::Eq | Token::NotEq => Precedence::Equals,
            Token::Lt | Token::Gt => Precedence::LessGreater,
            Token::Plus | Token::Minus => Precedence::Sum,
            Token::Asterisk | Token::Slash => Precedence::Product,
            Token::Lparen => Precedence::Call,
            Token::Lbracket => Precedence::Index,
            _ => Precedence::Lowest,
        }
    }
}

/// The syntax errors collected over one parse pass. A program that came back
/// alongside these is unusable and must not be evaluated.
#[derive(Debug)]
pub struct ParserErrors(Vec<Error>);

impl ParserErrors {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Error> {
        self.0.iter()
    }
}

impl fmt::Display for ParserErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|error| error.to_string()).collect();
        write!(f, "{}", messages.join("\n"))
    }
}

impl std::error::Error for ParserErrors {}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    cur_token: Option<Token>,
    peek_token: Option<Token>,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        Self {
            cur_token: lexer.next_token(),
            peek_token: lexer.next_token(),
            lexer,
        }
    }

    /// Parses the whole token stream. A malformed statement is recorded and
    /// the parser resynchronizes at the next `;`, so a single pass surfaces
    /// every diagnostic it can.
    pub fn parse_program(&mut self) -> Result<Program, ParserErrors> {
        let mut statements: Vec<Statement> = Vec::new();
        let mut errors: Vec<Error> = Vec::new();

        while self.cur_token.is_some() {
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(error) => {
                    errors.push(error);
                    self.synchronize();
                }
            }
            self.next_token();
        }

        if errors.is_empty() {
            Ok(Program { statements })
        } else {
            Err(ParserErrors(errors))
        }
    }

    fn cur_token(&self) -> Result<Token> {
        self.cur_token.clone().ok_or(anyhow!("no token found"))
    }

    fn next_token(&mut self) {
        self.cur_token = self.peek_token.take();
        self.peek_token = self.lexer.next_token();
    }

    // Skips to the statement boundary after an error, leaving the `;` as the
    // current token so the statement loop steps past it.
    fn synchronize(&mut self) {
        while self
            .cur_token
            .as_ref()
            .is_some_and(|token| !token.variant_eq(&Token::Semicolon))
        {
            self.next_token();
        }
    }

    fn peek_is(&self, token: &Token) -> bool {
        self.peek_token
            .as_ref()
            .is_some_and(|peek| peek.variant_eq(token))
    }

    fn expect_peek(&mut self, exp_token: Token) -> Result<()> {
        let peek_token = self.peek_token.as_ref().ok_or(anyhow!("no token found"))?;
        if peek_token.variant_eq(&exp_token) {
            self.next_token();
            Ok(())
        } else {
            bail!("expected next token to be {exp_token}, found {peek_token}")
        }
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        match self.cur_token()? {
            Token::Let => self.parse_let_statement(),
            Token::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> Result<Statement> {
        self.next_token();
        let name = self.parse_identifier_name()?;

        self.expect_peek(Token::Assign)?;
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(&Token::Semicolon) {
            self.next_token();
        }

        Ok(Statement::Let { name, value })
    }

    fn parse_return_statement(&mut self) -> Result<Statement> {
        self.next_token();

        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(&Token::Semicolon) {
            self.next_token();
        }

        Ok(Statement::Return(value))
    }

    fn parse_expression_statement(&mut self) -> Result<Statement> {
        let expression = self.parse_expression(Precedence::Lowest)?;

        if self.peek_is(&Token::Semicolon) {
            self.next_token();
        }

        Ok(Statement::Expression(expression))
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Result<Expression> {
        let cur_token = self.cur_token()?;

        let mut left_exp = match cur_token {
            Token::Ident(value) => Expression::Identifier(value),
            Token::Int(value) => self.parse_integer_literal(value)?,
            Token::String(value) => Expression::StringLiteral(value),
            Token::True => Expression::BooleanLiteral(true),
            Token::False => Expression::BooleanLiteral(false),
            token @ (Token::Bang | Token::Minus) => self.parse_prefix_expression(token)?,
            Token::Lparen => self.parse_grouped_expression()?,
            Token::Lbracket => self.parse_array_literal()?,
            Token::Lbrace => self.parse_hash_literal()?,
            Token::If => self.parse_if_expression()?,
            Token::Function => self.parse_function_literal()?,
            token => bail!("no prefix parse function for {token}"),
        };

        loop {
            let Some(peek_token) = self.peek_token.clone() else {
                break;
            };
            if peek_token.variant_eq(&Token::Semicolon)
                || precedence >= Precedence::from_token(&peek_token)
            {
                break;
            }
            left_exp = match peek_token {
                Token::Plus
                | Token::Minus
                | Token::Asterisk
                | Token::Slash
                | Token::Eq
                | Token::NotEq
                | Token::Lt
                | Token::Gt => {
                    self.next_token();
                    self.parse_infix_expression(left_exp)?
                }
                Token::Lparen => {
                    self.next_token();
                    self.parse_call_expression(left_exp)?
                }
                Token::Lbracket => {
                    self.next_token();
                    self.parse_index_expression(left_exp)?
                }
                _ => break,
            };
        }

        Ok(left_exp)
    }

    fn parse_prefix_expression(&mut self, operator: Token) -> Result<Expression> {
        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;
        Ok(Expression::Prefix {
            operator,
            right: Box::new(right),
        })
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Result<Expression> {
        let operator = self.cur_token()?;
        let precedence = Precedence::from_token(&operator);
        self.next_token();
        let right = self.parse_expression(precedence)?;
        Ok(Expression::Infix {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    fn parse_identifier_name(&mut self) -> Result<String> {
        match self.cur_token()? {
            Token::Ident(name) => Ok(name),
            token => bail!("expected identifier, found {token}"),
        }
    }

    fn parse_integer_literal(&mut self, literal: String) -> Result<Expression> {
        let value = literal
            .parse::<i64>()
            .map_err(|err| anyhow!("could not parse integer literal as i64: {err}"))?;
        Ok(Expression::IntegerLiteral(value))
    }

    fn parse_grouped_expression(&mut self) -> Result<Expression> {
        self.next_token();
        let exp = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(Token::Rparen)?;
        Ok(exp)
    }

    fn parse_if_expression(&mut self) -> Result<Expression> {
        self.expect_peek(Token::Lparen)?;
        self.next_token();

        let condition = self.parse_expression(Precedence::Lowest)?;

        self.expect_peek(Token::Rparen)?;
        self.expect_peek(Token::Lbrace)?;

        let consequence = self.parse_block_statement()?;

        let alternative = if self.peek_is(&Token::Else) {
            self.next_token();
            self.expect_peek(Token::Lbrace)?;
            Some(Box::new(self.parse_block_statement()?))
        } else {
            None
        };

        Ok(Expression::If {
            condition: Box::new(condition),
            consequence: Box::new(consequence),
            alternative,
        })
    }

    fn parse_array_literal(&mut self) -> Result<Expression> {
        let elements = self.parse_expression_list(Token::Rbracket)?;
        Ok(Expression::ArrayLiteral(elements))
    }

    fn parse_hash_literal(&mut self) -> Result<Expression> {
        let mut pairs: Vec<(Expression, Expression)> = Vec::new();

        while !self.peek_is(&Token::Rbrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;
            self.expect_peek(Token::Colon)?;
            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));
            if !self.peek_is(&Token::Rbrace) {
                self.expect_peek(Token::Comma)?;
            }
        }

        self.expect_peek(Token::Rbrace)?;

        Ok(Expression::HashLiteral(pairs))
    }

    fn parse_function_literal(&mut self) -> Result<Expression> {
        self.expect_peek(Token::Lparen)?;

        let parameters = self.parse_function_parameters()?;

        self.expect_peek(Token::Lbrace)?;

        let body = self.parse_block_statement()?;

        Ok(Expression::FunctionLiteral {
            parameters,
            body: Box::new(body),
        })
    }

    // Parameters are bare identifiers, not expressions.
    fn parse_function_parameters(&mut self) -> Result<Vec<String>> {
        let mut parameters: Vec<String> = Vec::new();

        if self.peek_is(&Token::Rparen) {
            self.next_token();
            return Ok(parameters);
        }

        self.next_token();
        parameters.push(self.parse_identifier_name()?);

        while self.peek_is(&Token::Comma) {
            self.next_token();
            self.next_token();
            parameters.push(self.parse_identifier_name()?);
        }

        self.expect_peek(Token::Rparen)?;

        Ok(parameters)
    }

    fn parse_expression_list(&mut self, end_token: Token) -> Result<Vec<Expression>> {
        let mut expressions: Vec<Expression> = Vec::new();

        if self.peek_is(&end_token) {
            self.next_token();
            return Ok(expressions);
        }

        self.next_token();
        expressions.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_is(&Token::Comma) {
            self.next_token();
            self.next_token();
            expressions.push(self.parse_expression(Precedence::Lowest)?);
        }

        self.expect_peek(end_token)?;

        Ok(expressions)
    }

    fn parse_block_statement(&mut self) -> Result<Statement> {
        self.next_token();

        let mut statements: Vec<Statement> = Vec::new();

        while self
            .cur_token
            .as_ref()
            .is_some_and(|token| !token.variant_eq(&Token::Rbrace))
        {
            let statement = self.parse_statement()?;
            statements.push(statement);
            self.next_token();
        }

        if self.cur_token.is_none() {
            bail!("expected next token to be {}, found none", Token::Rbrace);
        }

        Ok(Statement::Block(statements))
    }

    fn parse_call_expression(&mut self, function: Expression) -> Result<Expression> {
        let arguments = self.parse_expression_list(Token::Rparen)?;
        Ok(Expression::Call {
            function: Box::new(function),
            arguments,
        })
    }

    fn parse_index_expression(&mut self, left: Expression) -> Result<Expression> {
        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(Token::Rbracket)?;
        Ok(Expression::Index {
            left: Box::new(left),
            index: Box::new(index),
        })
    }
}
