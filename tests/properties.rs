// tests/properties.rs

use proptest::prelude::*;
use rsql_query::{Select, SelectorCollector, SqlBuilder, SqlOptions, build, parse};

/// A constraint and the selector it mentions.
fn constraint() -> impl Strategy<Value = (String, Vec<String>)> {
    (
        prop::sample::select(vec!["a", "b", "name", "author.age", "ns:tag"]),
        prop::option::of(-50i64..50),
    )
        .prop_map(|(selector, value)| {
            let text = match value {
                Some(n) => format!("{}=={}", selector, n),
                None => selector.to_string(),
            };
            (text, vec![selector.to_string()])
        })
}

/// Random filters built from constraints, separators and groups, with the
/// selectors in order of appearance.
fn filter() -> impl Strategy<Value = (String, Vec<String>)> {
    constraint().prop_recursive(5, 48, 2, |inner| {
        (
            inner.clone(),
            inner,
            prop::sample::select(vec![",", ";"]),
            any::<bool>(),
        )
            .prop_map(|((left, mut selectors), (right, rest), separator, grouped)| {
                let text = format!("{}{}{}", left, separator, right);
                let text = if grouped { format!("({})", text) } else { text };
                selectors.extend(rest);
                (text, selectors)
            })
    })
}

fn unique_in_order(selectors: Vec<String>) -> Vec<String> {
    let mut seen: Vec<String> = vec![];
    for selector in selectors {
        if !seen.contains(&selector) {
            seen.push(selector);
        }
    }
    seen
}

proptest! {
    #[test]
    fn parse_is_idempotent((text, _) in filter()) {
        prop_assert_eq!(parse(&text).unwrap(), parse(&text).unwrap());
    }

    #[test]
    fn collector_lists_each_selector_once((text, selectors) in filter()) {
        let ast = parse(&text).unwrap();
        prop_assert_eq!(build(&ast, &SelectorCollector).unwrap(), unique_in_order(selectors));
    }

    #[test]
    fn projection_matches_filter_selectors((text, selectors) in filter()) {
        let ast = parse(&text).unwrap();
        let sql = SqlBuilder::new(SqlOptions::default().select(Select::FromSelectors))
            .to_sql(&ast)
            .unwrap();
        let expected = format!("SELECT {} FROM table WHERE ", unique_in_order(selectors).join(", "));
        prop_assert!(sql.starts_with(&expected), "{} does not start with {}", sql, expected);
    }

    #[test]
    fn whitespace_between_tokens_is_insignificant((text, _) in filter()) {
        let spaced = text
            .replace(',', " , ")
            .replace(';', " ; ")
            .replace("==", " == ");
        prop_assert_eq!(parse(&spaced).unwrap(), parse(&text).unwrap());
    }
}
