use crate::{ast::Operator, value::Value};

/// Abstract Syntax Tree node representing a parsed filter.
///
/// Leaves are constraints (`Selector`, `Comparison`); inner nodes are the two
/// binary combinators. Grouping parentheses leave no trace in the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Presence check
    ///
    /// # Example
    /// ```text
    /// name
    /// ```
    Selector(String),

    /// Selector compared against a literal argument
    ///
    /// # Examples
    /// ```text
    /// name==John
    /// age=ge=18
    /// tag!=(a,b)
    /// ```
    Comparison {
        selector: String,
        op: Operator,
        value: Value,
    },

    /// Logical AND (`;`)
    And(Box<Expr>, Box<Expr>),

    /// Logical OR (`,`)
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn selector(name: impl Into<String>) -> Self {
        Expr::Selector(name.into())
    }

    pub fn comparison(selector: impl Into<String>, op: Operator, value: impl Into<Value>) -> Self {
        Expr::Comparison {
            selector: selector.into(),
            op,
            value: value.into(),
        }
    }

    pub fn and(left: Expr, right: Expr) -> Self {
        Expr::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Expr, right: Expr) -> Self {
        Expr::Or(Box::new(left), Box::new(right))
    }

    /// True for `Selector` and `Comparison` nodes.
    pub fn is_constraint(&self) -> bool {
        matches!(self, Expr::Selector(_) | Expr::Comparison { .. })
    }
}
