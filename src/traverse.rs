//! Generic AST traversal.
//!
//! [`traverse`] walks an [`Expr`] and hands each node to a [`Visitor`],
//! threading the visitor's state through the walk. Every callback has a
//! default body, so a visitor only overrides what it cares about.
//!
//! Combinators are visited children first. Both children start from the
//! state the combinator itself received; `on_and` / `on_or` get the two
//! child nodes with their resulting states and decide how to merge them. The first error aborts the
//! walk and is returned as is.

use crate::{
    ast::{Expr, Operator},
    error::BuildError,
    value::Value,
};

/// Callback set driven by [`traverse`].
///
/// Options a visitor needs live on the visitor itself, so `init` only
/// receives the root of the tree.
pub trait Visitor {
    /// Accumulator threaded through the walk
    type State: Clone + Default;

    /// Final product of [`build`]
    type Output: From<Self::State>;

    /// Initial state for a walk over `root`.
    fn init(&self, _root: &Expr) -> Self::State {
        Self::State::default()
    }

    /// Turns the state left by a complete walk into the output.
    fn build(&self, _root: &Expr, state: Self::State) -> Result<Self::Output, BuildError> {
        Ok(state.into())
    }

    fn on_or(
        &self,
        _left: &Expr,
        _right: &Expr,
        _left_state: Self::State,
        _right_state: Self::State,
        _root: &Expr,
        state: Self::State,
    ) -> Result<Self::State, BuildError> {
        Ok(state)
    }

    fn on_and(
        &self,
        _left: &Expr,
        _right: &Expr,
        _left_state: Self::State,
        _right_state: Self::State,
        _root: &Expr,
        state: Self::State,
    ) -> Result<Self::State, BuildError> {
        Ok(state)
    }

    /// Called for every leaf. The default forwards to the callback matching
    /// the leaf's shape.
    fn on_constraint(
        &self,
        node: &Expr,
        root: &Expr,
        state: Self::State,
    ) -> Result<Self::State, BuildError> {
        match node {
            Expr::Selector(name) => self.on_selector(name, root, state),
            Expr::Comparison {
                selector,
                op: Operator::Custom(tag),
                value,
            } => self.on_selector_value_with_comparison(selector, tag, value, root, state),
            Expr::Comparison {
                selector,
                op,
                value,
            } => self.on_selector_value(selector, op, value, root, state),
            Expr::And(..) | Expr::Or(..) => Ok(state),
        }
    }

    fn on_selector(
        &self,
        _name: &str,
        _root: &Expr,
        state: Self::State,
    ) -> Result<Self::State, BuildError> {
        Ok(state)
    }

    /// `op` is [`Operator::Equal`] or [`Operator::NotEqual`].
    fn on_selector_value(
        &self,
        _name: &str,
        _op: &Operator,
        _value: &Value,
        _root: &Expr,
        state: Self::State,
    ) -> Result<Self::State, BuildError> {
        Ok(state)
    }

    fn on_selector_value_with_comparison(
        &self,
        _name: &str,
        _tag: &str,
        _value: &Value,
        _root: &Expr,
        state: Self::State,
    ) -> Result<Self::State, BuildError> {
        Ok(state)
    }
}

/// Walks `node`, a subtree of `root`, dispatching each node to `visitor`.
pub fn traverse<V: Visitor + ?Sized>(
    node: &Expr,
    root: &Expr,
    visitor: &V,
    state: V::State,
) -> Result<V::State, BuildError> {
    match node {
        Expr::Or(left, right) => {
            let left_state = traverse(left, root, visitor, state.clone())?;
            let right_state = traverse(right, root, visitor, state.clone())?;
            visitor.on_or(left, right, left_state, right_state, root, state)
        }
        Expr::And(left, right) => {
            let left_state = traverse(left, root, visitor, state.clone())?;
            let right_state = traverse(right, root, visitor, state.clone())?;
            visitor.on_and(left, right, left_state, right_state, root, state)
        }
        Expr::Selector(_) | Expr::Comparison { .. } => visitor.on_constraint(node, root, state),
    }
}

/// Runs a full walk: `init`, [`traverse`] from the root, then `build`.
///
/// # Examples
///
/// ```
/// use rsql_query::{build, parse, SelectorCollector};
///
/// let ast = parse("name==John;age=gt=30,name!=Jane").unwrap();
/// let selectors = build(&ast, &SelectorCollector).unwrap();
/// assert_eq!(selectors, vec!["name", "age"]);
/// ```
pub fn build<V: Visitor + ?Sized>(root: &Expr, visitor: &V) -> Result<V::Output, BuildError> {
    let state = visitor.init(root);
    let state = traverse(root, root, visitor, state)?;
    visitor.build(root, state)
}
