//! Recursive-descent parser for the filter language.
//!
//! Grammar, each level right-recursive:
//!
//! ```text
//! or         = and ( "," or )?
//! and        = constraint ( ";" and )?
//! constraint = "(" or ")"
//!            | SELECTOR ( ( "==" | "!=" | COMPARISON ) value )?
//! value      = TEXT | SELECTOR | INTEGER | FLOAT | BOOLEAN
//!            | "(" ( value ( "," value )* )? ")"
//! ```
//!
//! Every group, list and chain link counts as one level of nesting. Input
//! nested deeper than [`MAX_NESTING`] is rejected, which keeps parsing,
//! traversal and dropping of any accepted tree within a bounded stack.

use std::str::FromStr;

use thiserror::Error;
use tracing::debug;

use crate::{
    ast::{Expr, Lexeme, Operator, Token},
    lexer::{LexError, Lexer},
    value::Value,
};

/// Errors produced by [`parse`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The input could not be tokenized
    #[error("lexical error: {0}")]
    Lexical(#[from] LexError),

    /// The tokens do not form a valid filter
    #[error("syntax error on line {line}: {message}{}", near_suffix(.near))]
    Syntax {
        line: usize,
        message: String,
        near: Option<String>,
    },
}

fn near_suffix(near: &Option<String>) -> String {
    near.as_ref()
        .map(|token| format!(" near '{}'", token))
        .unwrap_or_default()
}

impl ParseError {
    /// Source line the error was detected on.
    pub fn line(&self) -> usize {
        match self {
            ParseError::Lexical(e) => e.line(),
            ParseError::Syntax { line, .. } => *line,
        }
    }
}

/// Deepest nesting of groups, lists and chain links a filter may use.
pub const MAX_NESTING: usize = 256;

pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current_token: Option<Lexeme>,
    previous_token: Option<Lexeme>,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
            previous_token: None,
            depth: 0,
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        let next = self.lexer.next_token()?;
        self.previous_token = std::mem::replace(&mut self.current_token, next);
        Ok(())
    }

    fn peek(&self) -> Option<&Token> {
        self.current_token.as_ref().map(|lexeme| &lexeme.token)
    }

    fn check(&self, token: &Token) -> bool {
        self.peek().is_some_and(|current| {
            std::mem::discriminant(current) == std::mem::discriminant(token)
        })
    }

    /// Builds a syntax error positioned at the current token, or at the last
    /// consumed one when the input is exhausted.
    fn error(&self, message: impl Into<String>) -> ParseError {
        let at = self.current_token.as_ref().or(self.previous_token.as_ref());
        ParseError::Syntax {
            line: at.map_or(1, |lexeme| lexeme.line),
            message: message.into(),
            near: at.map(|lexeme| lexeme.token.describe()),
        }
    }

    /// Runs `parse` one nesting level deeper.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(self.error("nesting too deep"));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Parse OR chain: and ("," or)?
    fn parse_or(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_and()?;

        if self.check(&Token::Comma) {
            self.advance()?;
            let right = self.nested(Self::parse_or)?;
            return Ok(Expr::or(left, right));
        }
        Ok(left)
    }

    /// Parse AND chain: constraint (";" and)?
    fn parse_and(&mut self) -> Result<Expr, ParseError> {
        let left = self.parse_constraint()?;

        if self.check(&Token::Semicolon) {
            self.advance()?;
            let right = self.nested(Self::parse_and)?;
            return Ok(Expr::and(left, right));
        }
        Ok(left)
    }

    fn parse_constraint(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Some(Token::LParen) => self.nested(Self::parse_group),
            Some(Token::Selector(_)) => self.parse_selector_constraint(),
            Some(_) => Err(self.error("expected a selector or '('")),
            None => Err(self.error("unexpected end of input, expected a selector or '('")),
        }
    }

    /// Parse a parenthesised filter, starting at its '('.
    fn parse_group(&mut self) -> Result<Expr, ParseError> {
        let open_line = self.current_token.as_ref().map_or(1, |lexeme| lexeme.line);
        self.advance()?;
        let inner = self.parse_or()?;

        if !self.check(&Token::RParen) {
            let near = self
                .current_token
                .as_ref()
                .or(self.previous_token.as_ref())
                .map(|lexeme| lexeme.token.describe());
            return Err(ParseError::Syntax {
                line: open_line,
                message: "unmatched '('".to_string(),
                near,
            });
        }
        self.advance()?;
        Ok(inner)
    }

    fn parse_selector_constraint(&mut self) -> Result<Expr, ParseError> {
        let selector = match self.peek() {
            Some(Token::Selector(name)) => name.clone(),
            _ => return Err(self.error("expected a selector")),
        };
        self.advance()?;

        let op = match self.peek() {
            Some(Token::EqEq) => Operator::Equal,
            Some(Token::NotEq) => Operator::NotEqual,
            Some(Token::Comparison(tag)) => Operator::Custom(tag.clone()),
            _ => return Ok(Expr::Selector(selector)),
        };
        self.advance()?;

        let value = self.parse_value()?;
        Ok(Expr::Comparison {
            selector,
            op,
            value,
        })
    }

    /// Parse a literal argument, recursing into parenthesised lists.
    pub fn parse_value(&mut self) -> Result<Value, ParseError> {
        let value = match self.peek() {
            Some(Token::Text(s)) | Some(Token::Selector(s)) => Value::Text(s.clone()),
            Some(Token::Integer(n)) => Value::Integer(*n),
            Some(Token::Float(n)) => Value::Float(*n),
            Some(Token::Boolean(b)) => Value::Boolean(*b),
            Some(Token::LParen) => return self.nested(Self::parse_list),
            Some(_) => return Err(self.error("expected a value")),
            None => return Err(self.error("unexpected end of input, expected a value")),
        };
        self.advance()?;
        Ok(value)
    }

    /// Parse a list, starting at its '('.
    fn parse_list(&mut self) -> Result<Value, ParseError> {
        self.advance()?;
        let mut items = vec![];

        if self.check(&Token::RParen) {
            self.advance()?;
            return Ok(Value::List(items));
        }

        loop {
            items.push(self.parse_value()?);

            match self.peek() {
                Some(Token::Comma) => self.advance()?,
                Some(Token::RParen) => {
                    self.advance()?;
                    return Ok(Value::List(items));
                }
                Some(_) => return Err(self.error("expected ',' or ')' in list")),
                None => return Err(self.error("missing ')' to close list")),
            }
        }
    }

    /// Parse a complete filter; every token must be consumed.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_or()?;

        match self.peek() {
            None => Ok(expr),
            Some(Token::RParen) => Err(self.error("unmatched ')'")),
            Some(_) => Err(self.error("unexpected token after complete filter")),
        }
    }
}

/// Parses a filter string into an AST.
///
/// # Examples
///
/// ```
/// use rsql_query::{parse, Expr, Operator, Value};
///
/// let expr = parse("name==John").unwrap();
/// assert_eq!(
///     expr,
///     Expr::comparison("name", Operator::Equal, Value::from("John"))
/// );
/// ```
pub fn parse(input: &str) -> Result<Expr, ParseError> {
    let mut parser = Parser::new(Lexer::new(input))?;
    let expr = parser.parse()?;
    debug!(filter = input, "parsed filter");
    Ok(expr)
}

impl FromStr for Expr {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
