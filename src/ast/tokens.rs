/// Lexical token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Literals
    /// Floating point number with a mandatory fractional part
    ///
    /// # Examples
    /// ```text
    /// 12.5
    /// -0.25
    /// 123.5e-2
    /// ```
    Float(f64),

    /// Integer without a decimal point
    ///
    /// # Examples
    /// ```text
    /// 42
    /// +7
    /// -10
    /// ```
    Integer(i64),

    /// Case-insensitive `true` / `false`
    Boolean(bool),

    /// Unquoted or quoted text, already decoded
    ///
    /// # Examples
    /// ```text
    /// Hello*
    /// "two words"
    /// 'it\'s'
    /// ```
    Text(String),

    // Identifiers
    /// Field name made of `[A-Za-z0-9:._]`
    ///
    /// A selector-shaped lexeme is also accepted as a text argument.
    ///
    /// # Examples
    /// ```text
    /// name
    /// author.age
    /// ns:tag
    /// ```
    Selector(String),

    // Operators
    /// Custom comparison `=tag=`, carrying the inner tag
    ///
    /// # Examples
    /// ```text
    /// =ge=
    /// =lt=
    /// ```
    Comparison(String),

    /// Equality operator (`==`)
    EqEq,

    /// Inequality operator (`!=`)
    NotEq,

    // Combinators
    /// Logical OR separator (`,`), also separates list items
    Comma,

    /// Logical AND separator (`;`)
    Semicolon,

    // Delimiters
    /// Left parenthesis for grouping or list literals
    LParen,

    /// Right parenthesis
    RParen,
}

impl Token {
    /// Source-like rendering used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Float(n) => n.to_string(),
            Token::Integer(n) => n.to_string(),
            Token::Boolean(b) => b.to_string(),
            Token::Text(s) => format!("'{}'", s),
            Token::Selector(s) => s.clone(),
            Token::Comparison(tag) => format!("={}=", tag),
            Token::EqEq => "==".to_string(),
            Token::NotEq => "!=".to_string(),
            Token::Comma => ",".to_string(),
            Token::Semicolon => ";".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
        }
    }
}

/// A token together with the line it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct Lexeme {
    pub token: Token,
    /// 1-based source line
    pub line: usize,
}

impl Lexeme {
    pub fn new(token: Token, line: usize) -> Self {
        Lexeme { token, line }
    }
}
