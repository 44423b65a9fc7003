//! Reference query builder producing a SQL `SELECT`.
//!
//! # Examples
//!
//! ```
//! use rsql_query::{parse, Select, SqlBuilder, SqlOptions};
//!
//! let ast = parse("name==John").unwrap();
//! let builder = SqlBuilder::new(SqlOptions::default().select(Select::FromSelectors));
//! assert_eq!(
//!     builder.to_sql(&ast).unwrap(),
//!     "SELECT name FROM table WHERE name = 'John'"
//! );
//! ```

mod format;
mod options;
mod store;

pub use options::{Select, SqlOptions, Transformer};
pub use store::{Rows, Store, into_objects, into_records};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    ast::{Expr, Operator},
    error::{BuildError, Error},
    parser::parse,
    selectors::SelectorCollector,
    traverse::{self, Visitor},
    value::Value,
};

/// Visitor rendering a filter as `SELECT ... FROM ... WHERE ...`.
#[derive(Debug, Clone, Default)]
pub struct SqlBuilder {
    options: SqlOptions,
}

impl SqlBuilder {
    pub fn new(options: SqlOptions) -> Self {
        SqlBuilder { options }
    }

    /// Builds the query text for `ast`.
    pub fn to_sql(&self, ast: &Expr) -> Result<String, BuildError> {
        traverse::build(ast, self)
    }

    /// Builds the query, runs it on `store` and maps the rows into records.
    pub fn fetch<T, S>(&self, ast: &Expr, store: &S) -> Result<Vec<T>, BuildError>
    where
        T: DeserializeOwned,
        S: Store + ?Sized,
    {
        let sql = self.to_sql(ast)?;
        let rows = store.query(&sql)?;
        debug!(sql = %sql, rows = rows.rows.len(), "store returned rows");
        into_records(rows)
    }

    fn check_access(&self, selector: &str) -> Result<(), BuildError> {
        if self.options.is_allowed(selector) {
            Ok(())
        } else {
            debug!(selector = selector, "selector rejected by access lists");
            Err(BuildError::SelectorNotAllowed(selector.to_string()))
        }
    }

    fn projection(&self, root: &Expr) -> Result<String, BuildError> {
        match &self.options.select {
            Select::All => Ok("*".to_string()),
            Select::FromSelectors => Ok(traverse::build(root, &SelectorCollector)?.join(", ")),
            Select::List(columns) => Ok(columns.join(", ")),
        }
    }

    fn format_equality(&self, selector: &str, op: &Operator, value: &Value) -> String {
        let negated = matches!(op, Operator::NotEqual);
        let not = if negated { "NOT " } else { "" };

        match value {
            Value::Text(text) if format::is_wildcard(text) => {
                let like = if self.options.case_sensitive { "LIKE" } else { "ILIKE" };
                format!("{} {}{} {}", selector, not, like, format::like_pattern(text))
            }
            Value::Text(text) => {
                let cmp = if negated { "<>" } else { "=" };
                if self.options.case_sensitive {
                    format!("{} {} {}", selector, cmp, format::quote(text))
                } else {
                    format!("LOWER({}) {} LOWER({})", selector, cmp, format::quote(text))
                }
            }
            // `IN ()` is not valid SQL; an empty list matches nothing.
            Value::List(items) if items.is_empty() => {
                let always = if negated { "1 = 1" } else { "1 = 0" };
                always.to_string()
            }
            Value::List(_) => format!("{} {}IN {}", selector, not, format::literal(value)),
            Value::Integer(_) | Value::Float(_) | Value::Boolean(_) => {
                let cmp = if negated { "<>" } else { "=" };
                format!("{} {} {}", selector, cmp, format::literal(value))
            }
        }
    }

    fn format_comparison(
        &self,
        selector: &str,
        tag: &str,
        value: &Value,
    ) -> Result<String, BuildError> {
        let unsupported = || BuildError::UnsupportedOperator {
            selector: selector.to_string(),
            operator: tag.to_string(),
            value_type: value.type_name(),
        };

        let cmp = format::ordering_operator(tag).ok_or_else(unsupported)?;

        match value {
            value if value.is_numeric() => {
                Ok(format!("{} {} {}", selector, cmp, format::literal(value)))
            }
            Value::Text(text) if format::is_iso8601(text) => {
                Ok(format!("{} {} {}", selector, cmp, format::quote(text)))
            }
            Value::Text(text) => Err(BuildError::DateFormat {
                selector: selector.to_string(),
                value: text.clone(),
            }),
            _ => Err(unsupported()),
        }
    }
}

impl Visitor for SqlBuilder {
    type State = String;
    type Output = String;

    fn build(&self, root: &Expr, filter: String) -> Result<String, BuildError> {
        let mut sql = format!(
            "SELECT {} FROM {} WHERE {}",
            self.projection(root)?,
            self.options.table,
            filter
        );

        if let Some(order_by) = &self.options.order_by {
            sql.push_str(&format!(" ORDER BY {}", order_by));
        }
        if let Some(limit) = &self.options.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }
        if let Some(offset) = &self.options.offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        debug!(sql = %sql, "built query");
        Ok(sql)
    }

    fn on_or(
        &self,
        _left: &Expr,
        _right: &Expr,
        left: String,
        right: String,
        _root: &Expr,
        _state: String,
    ) -> Result<String, BuildError> {
        Ok(format!("({} OR {})", left, right))
    }

    fn on_and(
        &self,
        _left: &Expr,
        _right: &Expr,
        left: String,
        right: String,
        _root: &Expr,
        _state: String,
    ) -> Result<String, BuildError> {
        Ok(format!("({} AND {})", left, right))
    }

    fn on_selector(&self, name: &str, _root: &Expr, _state: String) -> Result<String, BuildError> {
        self.check_access(name)?;
        Ok(format!("{} IS NOT NULL", name))
    }

    fn on_selector_value(
        &self,
        name: &str,
        op: &Operator,
        value: &Value,
        _root: &Expr,
        _state: String,
    ) -> Result<String, BuildError> {
        self.check_access(name)?;
        let value = self.options.transformer.apply(name, value.clone());
        Ok(self.format_equality(name, op, &value))
    }

    fn on_selector_value_with_comparison(
        &self,
        name: &str,
        tag: &str,
        value: &Value,
        _root: &Expr,
        _state: String,
    ) -> Result<String, BuildError> {
        self.check_access(name)?;
        let value = self.options.transformer.apply(name, value.clone());
        self.format_comparison(name, tag, &value)
    }
}

/// Parses `filter` and builds it with `options` in one step.
///
/// # Examples
///
/// ```
/// use rsql_query::{filter_to_sql, SqlOptions};
///
/// let sql = filter_to_sql("name==Hello*", SqlOptions::default().case_sensitive(false)).unwrap();
/// assert_eq!(sql, "SELECT * FROM table WHERE name ILIKE 'Hello%'");
/// ```
pub fn filter_to_sql(filter: &str, options: SqlOptions) -> Result<String, Error> {
    let ast = parse(filter)?;
    Ok(SqlBuilder::new(options).to_sql(&ast)?)
}
