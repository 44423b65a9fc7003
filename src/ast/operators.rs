use std::fmt;

/// Comparison operator of a constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Equal (`==`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
    /// Custom comparison (`=tag=`); the tag is lowercase alphanumeric
    Custom(String),
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Equal => write!(f, "=="),
            Operator::NotEqual => write!(f, "!="),
            Operator::Custom(tag) => write!(f, "={}=", tag),
        }
    }
}
