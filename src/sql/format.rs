//! SQL literal rendering.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::value::Value;

/// Doubles single quotes.
pub fn escape(s: &str) -> String {
    s.replace('\'', "''")
}

pub fn quote(s: &str) -> String {
    format!("'{}'", escape(s))
}

/// Renders a value as a SQL literal; lists become parenthesised tuples.
pub fn literal(value: &Value) -> String {
    match value {
        Value::Text(s) => quote(s),
        Value::Integer(n) => n.to_string(),
        Value::Float(n) => n.to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::List(items) => {
            let items: Vec<String> = items.iter().map(literal).collect();
            format!("({})", items.join(", "))
        }
    }
}

/// Text with a leading or trailing `*` is a pattern.
pub fn is_wildcard(s: &str) -> bool {
    s.starts_with('*') || s.ends_with('*')
}

/// Quoted `LIKE` pattern with `*` rewritten to `%`.
pub fn like_pattern(s: &str) -> String {
    quote(&s.replace('*', "%"))
}

/// SQL operator for an ordering tag (`ge`, `gt`, `le`, `lt`).
pub fn ordering_operator(tag: &str) -> Option<&'static str> {
    match tag {
        "ge" => Some(">="),
        "gt" => Some(">"),
        "le" => Some("<="),
        "lt" => Some("<"),
        _ => None,
    }
}

/// Accepts ISO-8601 dates, local date-times and offset date-times.
pub fn is_iso8601(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || s.parse::<NaiveDateTime>().is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").is_ok()
        || s.parse::<NaiveDate>().is_ok()
}
