//! Configuration for [`SqlBuilder`](super::SqlBuilder).

use std::{fmt, sync::Arc};

use serde::Deserialize;

use crate::{error::Error, value::Value};

/// Rewrites a comparison value before it is formatted.
///
/// Receives the selector and the parsed value; defaults to identity.
#[derive(Clone)]
pub struct Transformer(Arc<dyn Fn(&str, Value) -> Value + Send + Sync>);

impl Transformer {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&str, Value) -> Value + Send + Sync + 'static,
    {
        Transformer(Arc::new(f))
    }

    pub fn identity() -> Self {
        Transformer::new(|_, value| value)
    }

    pub fn apply(&self, selector: &str, value: Value) -> Value {
        (self.0)(selector, value)
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Transformer::identity()
    }
}

impl fmt::Debug for Transformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transformer(..)")
    }
}

/// Projection of the generated `SELECT`.
///
/// Deserializes from `"all"`, `"from_selectors"` or a list of column names.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "SelectRepr")]
pub enum Select {
    /// `SELECT *`
    #[default]
    All,
    /// Every selector the filter mentions, in order of first appearance
    FromSelectors,
    /// Explicit column list
    List(Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SelectRepr {
    Keyword(String),
    List(Vec<String>),
}

impl TryFrom<SelectRepr> for Select {
    type Error = String;

    fn try_from(repr: SelectRepr) -> Result<Self, Self::Error> {
        match repr {
            SelectRepr::Keyword(keyword) => match keyword.as_str() {
                "all" => Ok(Select::All),
                "from_selectors" => Ok(Select::FromSelectors),
                other => Err(format!(
                    "unknown select mode '{}', expected \"all\", \"from_selectors\" or a list",
                    other
                )),
            },
            SelectRepr::List(columns) => Ok(Select::List(columns)),
        }
    }
}

/// Options for the SQL builder.
///
/// # Examples
///
/// ```
/// use rsql_query::{Select, SqlOptions};
///
/// let options = SqlOptions::from_json(
///     r#"{"table": "users", "select": "from_selectors", "limit": "10"}"#,
/// )
/// .unwrap();
/// assert_eq!(options.table, "users");
/// assert_eq!(options.select, Select::FromSelectors);
/// assert!(options.case_sensitive);
///
/// let options = SqlOptions::default().table("users").case_sensitive(false);
/// assert!(!options.case_sensitive);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SqlOptions {
    pub table: String,
    pub select: Select,
    /// Allow-list; takes precedence over `except`
    pub only: Option<Vec<String>>,
    /// Deny-list
    pub except: Option<Vec<String>>,
    pub order_by: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub case_sensitive: bool,
    #[serde(skip)]
    pub transformer: Transformer,
}

impl Default for SqlOptions {
    fn default() -> Self {
        SqlOptions {
            table: "table".to_string(),
            select: Select::All,
            only: None,
            except: None,
            order_by: None,
            limit: None,
            offset: None,
            case_sensitive: true,
            transformer: Transformer::identity(),
        }
    }
}

impl SqlOptions {
    /// Loads options from a JSON document; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn select(mut self, select: Select) -> Self {
        self.select = select;
        self
    }

    pub fn only<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only = Some(selectors.into_iter().map(Into::into).collect());
        self
    }

    pub fn except<I, S>(mut self, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.except = Some(selectors.into_iter().map(Into::into).collect());
        self
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn limit(mut self, limit: impl Into<String>) -> Self {
        self.limit = Some(limit.into());
        self
    }

    pub fn offset(mut self, offset: impl Into<String>) -> Self {
        self.offset = Some(offset.into());
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn transformer<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, Value) -> Value + Send + Sync + 'static,
    {
        self.transformer = Transformer::new(f);
        self
    }

    /// Access check: the allow-list wins when present, otherwise the
    /// deny-list is consulted.
    pub fn is_allowed(&self, selector: &str) -> bool {
        match (&self.only, &self.except) {
            (Some(only), _) => only.iter().any(|s| s == selector),
            (None, Some(except)) => !except.iter().any(|s| s == selector),
            (None, None) => true,
        }
    }
}
