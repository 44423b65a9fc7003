//! Error types for building queries from a parsed filter.
//!
//! Parsing has its own [`ParseError`]; [`BuildError`] covers everything a
//! visitor can fail on. [`Error`] unifies both stages.

use thiserror::Error;

use crate::parser::ParseError;

/// Errors raised while turning an AST into a query.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    /// Ordered comparison against text that is not an ISO-8601 date or date-time
    #[error("invalid date format for '{selector}': '{value}'")]
    DateFormat { selector: String, value: String },

    /// Unknown comparison tag, or a known tag with an unsupported value type
    #[error("unsupported operator '{operator}' for '{selector}' with {value_type} value")]
    UnsupportedOperator {
        selector: String,
        operator: String,
        value_type: &'static str,
    },

    /// Selector outside the allow-list or inside the deny-list
    #[error("selector not allowed: {0}")]
    SelectorNotAllowed(String),

    /// The store returned something that cannot be mapped to records
    #[error("unexpected store response: {0}")]
    StoreResponse(String),

    /// The store failed to run the query (connection, driver, timeout)
    #[error("store error: {0}")]
    Store(String),
}

/// The main error type for parse-and-build operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for parse-and-build operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns true if the filter text itself is malformed
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::Parse(_))
    }

    /// Returns true if access control rejected a selector
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Error::Build(BuildError::SelectorNotAllowed(_)))
    }
}
