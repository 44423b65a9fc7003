//! Tokenizer for the filter language.
//!
//! Every rule is tried at the current position and the longest match wins.
//! Ties go to the rule listed first, which is what makes `123` an integer
//! rather than a selector and `True` a boolean rather than a selector.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::trace;

use crate::ast::{Lexeme, Token};

/// Errors raised while splitting the input into tokens.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexError {
    /// No rule matches at this position
    #[error("unexpected character '{character}' on line {line}")]
    UnexpectedCharacter { character: char, line: usize },

    /// Numeric literal that does not fit the target type
    #[error("number '{literal}' out of range on line {line}")]
    NumberOutOfRange { literal: String, line: usize },
}

impl LexError {
    pub fn line(&self) -> usize {
        match self {
            LexError::UnexpectedCharacter { line, .. } | LexError::NumberOutOfRange { line, .. } => {
                *line
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Rule {
    Float,
    Integer,
    Boolean,
    Selector,
    BareText,
    DoubleQuoted,
    SingleQuoted,
    Comparison,
    LParen,
    RParen,
    Comma,
    Semicolon,
    EqEq,
    NotEq,
    Whitespace,
}

/// Rules in priority order.
static RULES: LazyLock<Vec<(Rule, Regex)>> = LazyLock::new(|| {
    [
        (Rule::Float, r"\A[+-]?[0-9]+\.[0-9]+(?:[eE][+-]?[0-9]+)?"),
        (Rule::Integer, r"\A[+-]?[0-9]+"),
        (Rule::Boolean, r"\A(?i:true|false)"),
        (Rule::Selector, r"\A[A-Za-z0-9:._]+"),
        (Rule::BareText, r#"\A[^\s"';,=!()]+"#),
        (Rule::DoubleQuoted, r#"\A"(?s:[^"\\]|\\.)*""#),
        (Rule::SingleQuoted, r"\A'(?s:[^'\\]|\\.)*'"),
        (Rule::Comparison, r"\A=[a-z0-9]+="),
        (Rule::LParen, r"\A\("),
        (Rule::RParen, r"\A\)"),
        (Rule::Comma, r"\A,"),
        (Rule::Semicolon, r"\A;"),
        (Rule::EqEq, r"\A=="),
        (Rule::NotEq, r"\A!="),
        (Rule::Whitespace, r"\A\s+"),
    ]
    .into_iter()
    .map(|(rule, pattern)| (rule, Regex::new(pattern).expect("token patterns are valid")))
    .collect()
});

pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            line: 1,
        }
    }

    fn longest_match(&self) -> Option<(Rule, &'a str)> {
        let input: &'a str = self.input;
        let rest = &input[self.position..];
        let mut best: Option<(Rule, &'a str)> = None;

        for (rule, regex) in RULES.iter() {
            if let Some(m) = regex.find(rest) {
                // Strictly longer only: earlier rules keep ties.
                if m.end() > best.map_or(0, |(_, text)| text.len()) {
                    best = Some((*rule, m.as_str()));
                }
            }
        }
        best
    }

    /// Returns the next token, or `None` at the end of input.
    pub fn next_token(&mut self) -> Result<Option<Lexeme>, LexError> {
        loop {
            let Some(ch) = self.input[self.position..].chars().next() else {
                return Ok(None);
            };

            let Some((rule, text)) = self.longest_match() else {
                return Err(LexError::UnexpectedCharacter {
                    character: ch,
                    line: self.line,
                });
            };

            let line = self.line;
            self.position += text.len();
            self.line += text.matches('\n').count();

            if rule == Rule::Whitespace {
                continue;
            }

            let token = decode(rule, text, line)?;
            return Ok(Some(Lexeme::new(token, line)));
        }
    }
}

fn decode(rule: Rule, text: &str, line: usize) -> Result<Token, LexError> {
    let out_of_range = || LexError::NumberOutOfRange {
        literal: text.to_string(),
        line,
    };

    let token = match rule {
        Rule::Float => {
            let n = text.parse::<f64>().map_err(|_| out_of_range())?;
            if !n.is_finite() {
                return Err(out_of_range());
            }
            Token::Float(n)
        }
        Rule::Integer => Token::Integer(text.parse::<i64>().map_err(|_| out_of_range())?),
        Rule::Boolean => Token::Boolean(text.eq_ignore_ascii_case("true")),
        Rule::Selector => Token::Selector(text.to_string()),
        Rule::BareText => Token::Text(text.to_string()),
        Rule::DoubleQuoted => Token::Text(unquote(text, '"')),
        Rule::SingleQuoted => Token::Text(unquote(text, '\'')),
        Rule::Comparison => Token::Comparison(text[1..text.len() - 1].to_string()),
        Rule::LParen => Token::LParen,
        Rule::RParen => Token::RParen,
        Rule::Comma => Token::Comma,
        Rule::Semicolon => Token::Semicolon,
        Rule::EqEq => Token::EqEq,
        Rule::NotEq => Token::NotEq,
        Rule::Whitespace => unreachable!("whitespace is skipped before decoding"),
    };
    Ok(token)
}

/// Strips the surrounding quotes and unescapes the quote character.
fn unquote(text: &str, quote: char) -> String {
    let inner = &text[1..text.len() - 1];
    inner.replace(&format!("\\{}", quote), &quote.to_string())
}

/// Tokenize the entire input.
pub fn tokenize(input: &str) -> Result<Vec<Lexeme>, LexError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();

    while let Some(lexeme) = lexer.next_token()? {
        tokens.push(lexeme);
    }

    trace!(count = tokens.len(), "tokenized filter");
    Ok(tokens)
}
