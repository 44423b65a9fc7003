// tests/traverse_tests.rs

use std::cell::RefCell;

use rsql_query::{
    BuildError, Expr, Operator, SelectorCollector, Value, Visitor, build, parse, traverse,
};

// ============================================================================
// Helpers
// ============================================================================

/// Does nothing; relies on every default.
struct Noop;

impl Visitor for Noop {
    type State = ();
    type Output = ();
}

/// Records each callback and fails on a chosen selector.
#[derive(Default)]
struct Recorder {
    calls: RefCell<Vec<String>>,
    fail_on: Option<&'static str>,
}

impl Recorder {
    fn failing_on(selector: &'static str) -> Self {
        Recorder {
            calls: RefCell::new(vec![]),
            fail_on: Some(selector),
        }
    }

    fn leaf(&self, name: &str, state: Vec<String>) -> Result<Vec<String>, BuildError> {
        self.calls.borrow_mut().push(name.to_string());
        if self.fail_on == Some(name) {
            return Err(BuildError::SelectorNotAllowed(name.to_string()));
        }
        let mut state = state;
        state.push(name.to_string());
        Ok(state)
    }
}

impl Visitor for Recorder {
    type State = Vec<String>;
    type Output = Vec<String>;

    fn init(&self, _root: &Expr) -> Vec<String> {
        vec!["start".to_string()]
    }

    fn on_or(
        &self,
        _left: &Expr,
        _right: &Expr,
        left: Vec<String>,
        right: Vec<String>,
        _root: &Expr,
        state: Vec<String>,
    ) -> Result<Vec<String>, BuildError> {
        self.calls.borrow_mut().push("or".to_string());
        let mut merged = state;
        merged.push(format!("or[{}|{}]", left.join(" "), right.join(" ")));
        Ok(merged)
    }

    fn on_and(
        &self,
        _left: &Expr,
        _right: &Expr,
        left: Vec<String>,
        right: Vec<String>,
        _root: &Expr,
        state: Vec<String>,
    ) -> Result<Vec<String>, BuildError> {
        self.calls.borrow_mut().push("and".to_string());
        let mut merged = state;
        merged.push(format!("and[{}|{}]", left.join(" "), right.join(" ")));
        Ok(merged)
    }

    fn on_selector(
        &self,
        name: &str,
        _root: &Expr,
        state: Vec<String>,
    ) -> Result<Vec<String>, BuildError> {
        self.leaf(name, state)
    }

    fn on_selector_value(
        &self,
        name: &str,
        _op: &Operator,
        _value: &Value,
        _root: &Expr,
        state: Vec<String>,
    ) -> Result<Vec<String>, BuildError> {
        self.leaf(name, state)
    }

    fn on_selector_value_with_comparison(
        &self,
        name: &str,
        tag: &str,
        _value: &Value,
        _root: &Expr,
        state: Vec<String>,
    ) -> Result<Vec<String>, BuildError> {
        self.leaf(&format!("{}:{}", name, tag), state)
    }
}

/// Overrides only the leaf hook and counts leaves.
struct LeafCounter;

impl Visitor for LeafCounter {
    type State = usize;
    type Output = usize;

    fn on_constraint(&self, node: &Expr, _root: &Expr, state: usize) -> Result<usize, BuildError> {
        assert!(node.is_constraint());
        Ok(state + 1)
    }

    fn on_and(
        &self,
        _left: &Expr,
        _right: &Expr,
        left_count: usize,
        right_count: usize,
        _root: &Expr,
        state: usize,
    ) -> Result<usize, BuildError> {
        Ok(left_count + right_count - state)
    }

    fn on_or(
        &self,
        _left: &Expr,
        _right: &Expr,
        left_count: usize,
        right_count: usize,
        _root: &Expr,
        state: usize,
    ) -> Result<usize, BuildError> {
        Ok(left_count + right_count - state)
    }
}

// ============================================================================
// Dispatch
// ============================================================================

#[test]
fn test_defaults_are_noops() {
    let ast = parse("a==1;(b,c=gt=2)").unwrap();
    assert_eq!(build(&ast, &Noop), Ok(()));
}

#[test]
fn test_leaf_dispatch() {
    let recorder = Recorder::default();
    let ast = parse("a").unwrap();
    assert_eq!(build(&ast, &recorder).unwrap(), vec!["start", "a"]);

    let recorder = Recorder::default();
    let ast = parse("a=lt=3").unwrap();
    assert_eq!(build(&ast, &recorder).unwrap(), vec!["start", "a:lt"]);
}

#[test]
fn test_children_start_from_parent_state() {
    let recorder = Recorder::default();
    let ast = parse("a==1;b==2").unwrap();

    assert_eq!(
        build(&ast, &recorder).unwrap(),
        vec!["start", "and[start a|start b]"]
    );
}

#[test]
fn test_visit_order_is_left_to_right_children_first() {
    let recorder = Recorder::default();
    let ast = parse("a==1,b==2;c==3").unwrap();
    build(&ast, &recorder).unwrap();

    assert_eq!(*recorder.calls.borrow(), vec!["a", "b", "c", "and", "or"]);
}

#[test]
fn test_root_is_passed_through() {
    struct RootCheck(Expr);

    impl Visitor for RootCheck {
        type State = bool;
        type Output = bool;

        fn init(&self, _root: &Expr) -> bool {
            true
        }

        fn on_selector(&self, _name: &str, root: &Expr, state: bool) -> Result<bool, BuildError> {
            Ok(state && *root == self.0)
        }

        fn on_and(
            &self,
            _left: &Expr,
            _right: &Expr,
            left_ok: bool,
            right_ok: bool,
            root: &Expr,
            _state: bool,
        ) -> Result<bool, BuildError> {
            Ok(left_ok && right_ok && *root == self.0)
        }
    }

    let ast = parse("a;b").unwrap();
    assert_eq!(build(&ast, &RootCheck(ast.clone())), Ok(true));
}

#[test]
fn test_combinators_see_their_operands() {
    /// Renders the tree shape from the operand nodes alone.
    struct Shape;

    fn kind(node: &Expr) -> &'static str {
        match node {
            Expr::Selector(_) => "sel",
            Expr::Comparison { .. } => "cmp",
            Expr::And(..) => "and",
            Expr::Or(..) => "or",
        }
    }

    impl Visitor for Shape {
        type State = Vec<String>;
        type Output = Vec<String>;

        fn on_or(
            &self,
            left: &Expr,
            right: &Expr,
            left_state: Vec<String>,
            right_state: Vec<String>,
            _root: &Expr,
            _state: Vec<String>,
        ) -> Result<Vec<String>, BuildError> {
            let mut merged = [left_state, right_state].concat();
            merged.push(format!("or({},{})", kind(left), kind(right)));
            Ok(merged)
        }

        fn on_and(
            &self,
            left: &Expr,
            right: &Expr,
            left_state: Vec<String>,
            right_state: Vec<String>,
            _root: &Expr,
            _state: Vec<String>,
        ) -> Result<Vec<String>, BuildError> {
            let mut merged = [left_state, right_state].concat();
            merged.push(format!("and({},{})", kind(left), kind(right)));
            Ok(merged)
        }
    }

    let ast = parse("a,b==2;(c,d=gt=1)").unwrap();
    assert_eq!(
        build(&ast, &Shape).unwrap(),
        vec!["or(sel,cmp)", "and(cmp,or)", "or(sel,and)"]
    );
}

#[test]
fn test_on_constraint_override() {
    let ast = parse("a==1;(b,c=gt=2);d!=(1,2)").unwrap();
    assert_eq!(build(&ast, &LeafCounter), Ok(4));
}

#[test]
fn test_traverse_subtree() {
    let ast = parse("a==1;b==2").unwrap();
    let Expr::And(_, right) = &ast else {
        panic!("Expected and");
    };
    let recorder = Recorder::default();
    let state = traverse(right, &ast, &recorder, vec![]).unwrap();
    assert_eq!(state, vec!["b"]);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_first_error_aborts_walk() {
    let recorder = Recorder::failing_on("b");
    let ast = parse("a==1;b==2;c==3").unwrap();

    let err = build(&ast, &recorder).unwrap_err();
    assert_eq!(err, BuildError::SelectorNotAllowed("b".to_string()));
    assert_eq!(*recorder.calls.borrow(), vec!["a", "b"]);
}

#[test]
fn test_error_in_left_branch_skips_right() {
    let recorder = Recorder::failing_on("a");
    let ast = parse("a,b").unwrap();

    assert!(build(&ast, &recorder).is_err());
    assert_eq!(*recorder.calls.borrow(), vec!["a"]);
}

#[test]
fn test_walk_can_be_rerun() {
    let ast = parse("a==1;b==2").unwrap();

    assert!(build(&ast, &Recorder::failing_on("b")).is_err());
    assert_eq!(build(&ast, &Recorder::default()).unwrap().len(), 2);
}

// ============================================================================
// Selector Collection
// ============================================================================

#[test]
fn test_selector_collector_first_seen_order() {
    let ast = parse("b==1;(a==2,b==3);c;a=gt=1").unwrap();
    assert_eq!(build(&ast, &SelectorCollector).unwrap(), vec!["b", "a", "c"]);
}

#[test]
fn test_selector_collector_single() {
    let ast = parse("name").unwrap();
    assert_eq!(build(&ast, &SelectorCollector).unwrap(), vec!["name"]);
}
