//! # Filter Language - Abstract Syntax Tree
//!
//! This module defines the tokens and tree produced when a filter string is
//! parsed.
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Tree nodes (constraints and combinators)
//! - **[operators]** - Comparison operators
//!
//! ## Quick Start
//!
//! ```text
//! name==John;(age=gt=30,role=in=(admin,owner))
//! ```
//!
//! ## Precedence
//!
//! `;` (AND) binds tighter than `,` (OR) and both associate to the right:
//!
//! ```text
//! a==1,b==2;c==3      =>  Or(a, And(b, c))
//! a==1;b==2;c==3      =>  And(a, And(b, c))
//! (a==1,b==2);c==3    =>  And(Or(a, b), c)
//! ```
//!
//! ## Literals
//!
//! Arguments are integers, floats, booleans, bare or quoted text, and
//! parenthesised lists of those (lists nest):
//!
//! ```text
//! x==123          Integer
//! x==123.5e-2     Float
//! x==TRUE         Boolean
//! x==Hello*       Text
//! x=='it\'s'      Text
//! x==(1,(2,3))    List
//! ```
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::Expr;
pub use operators::Operator;
pub use tokens::{Lexeme, Token};
