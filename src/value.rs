/// A literal argument on the right-hand side of a comparison.
///
/// Integers and floats are kept apart so builders can render them
/// faithfully. Lists nest arbitrarily.
///
/// # Examples
///
/// ```
/// use rsql_query::Value;
///
/// let text = Value::from("John");
/// let list = Value::List(vec![Value::Integer(1), Value::Float(2.5)]);
///
/// assert!(text.is_text());
/// assert_eq!(list.type_name(), "list");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// UTF-8 text
    Text(String),

    /// Integer number
    Integer(i64),

    /// Floating-point number
    Float(f64),

    /// Boolean
    Boolean(bool),

    /// Parenthesised list of values
    List(Vec<Value>),
}

impl Value {
    /// Human-readable type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Text(_) => "text",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Boolean(_) => "boolean",
            Value::List(_) => "list",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}
