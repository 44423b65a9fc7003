//! URI-friendly filter expressions compiled into queries.
//!
//! ```
//! use rsql_query::{parse, SqlBuilder, SqlOptions};
//!
//! let ast = parse("name==John;age=ge=18").unwrap();
//! let sql = SqlBuilder::new(SqlOptions::default().table("users"))
//!     .to_sql(&ast)
//!     .unwrap();
//! assert_eq!(sql, "SELECT * FROM users WHERE (name = 'John' AND age >= 18)");
//! ```
pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod selectors;
pub mod sql;
pub mod traverse;
pub mod value;

pub use ast::{Expr, Lexeme, Operator, Token};
pub use error::{BuildError, Error, Result};
pub use lexer::{LexError, Lexer, tokenize};
pub use parser::{ParseError, Parser, parse};
pub use selectors::SelectorCollector;
pub use sql::{Rows, Select, SqlBuilder, SqlOptions, Store, Transformer, filter_to_sql};
pub use traverse::{Visitor, build, traverse};
pub use value::Value;
