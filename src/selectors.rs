//! Visitor that lists the selectors a filter mentions.

use crate::{
    ast::{Expr, Operator},
    error::BuildError,
    traverse::Visitor,
    value::Value,
};

/// Collects unique selector names in order of first appearance.
///
/// # Examples
///
/// ```
/// use rsql_query::{build, parse, SelectorCollector};
///
/// let ast = parse("b==1;(a==2,b==3);c").unwrap();
/// assert_eq!(build(&ast, &SelectorCollector).unwrap(), vec!["b", "a", "c"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorCollector;

fn push_unique(mut seen: Vec<String>, name: &str) -> Vec<String> {
    if !seen.iter().any(|s| s == name) {
        seen.push(name.to_string());
    }
    seen
}

fn merge(left: Vec<String>, right: Vec<String>) -> Vec<String> {
    right.iter().fold(left, |acc, name| push_unique(acc, name))
}

impl Visitor for SelectorCollector {
    type State = Vec<String>;
    type Output = Vec<String>;

    fn on_or(
        &self,
        _left: &Expr,
        _right: &Expr,
        left: Vec<String>,
        right: Vec<String>,
        _root: &Expr,
        _state: Vec<String>,
    ) -> Result<Vec<String>, BuildError> {
        Ok(merge(left, right))
    }

    fn on_and(
        &self,
        _left: &Expr,
        _right: &Expr,
        left: Vec<String>,
        right: Vec<String>,
        _root: &Expr,
        _state: Vec<String>,
    ) -> Result<Vec<String>, BuildError> {
        Ok(merge(left, right))
    }

    fn on_selector(
        &self,
        name: &str,
        _root: &Expr,
        state: Vec<String>,
    ) -> Result<Vec<String>, BuildError> {
        Ok(push_unique(state, name))
    }

    fn on_selector_value(
        &self,
        name: &str,
        _op: &Operator,
        _value: &Value,
        _root: &Expr,
        state: Vec<String>,
    ) -> Result<Vec<String>, BuildError> {
        Ok(push_unique(state, name))
    }

    fn on_selector_value_with_comparison(
        &self,
        name: &str,
        _tag: &str,
        _value: &Value,
        _root: &Expr,
        state: Vec<String>,
    ) -> Result<Vec<String>, BuildError> {
        Ok(push_unique(state, name))
    }
}
