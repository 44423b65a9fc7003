//! Hand-off to an external store and row-to-record mapping.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};

use crate::error::BuildError;

/// Tabular response from a store: column names and row cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rows {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<JsonValue>>,
}

/// Executes a finished query. Implementations own connections, retries and
/// timeouts, and report their own failures as [`BuildError::Store`].
pub trait Store {
    fn query(&self, sql: &str) -> Result<Rows, BuildError>;
}

impl<F> Store for F
where
    F: Fn(&str) -> Result<Rows, BuildError>,
{
    fn query(&self, sql: &str) -> Result<Rows, BuildError> {
        self(sql)
    }
}

/// Zips every row with the column names.
pub fn into_objects(rows: Rows) -> Result<Vec<Map<String, JsonValue>>, BuildError> {
    let Rows { columns, rows } = rows;

    rows.into_iter()
        .enumerate()
        .map(|(index, row)| {
            if row.len() != columns.len() {
                return Err(BuildError::StoreResponse(format!(
                    "row {} has {} cells, expected {}",
                    index,
                    row.len(),
                    columns.len()
                )));
            }
            Ok(columns.iter().cloned().zip(row).collect())
        })
        .collect()
}

/// Maps rows into typed records through their JSON object form.
pub fn into_records<T: DeserializeOwned>(rows: Rows) -> Result<Vec<T>, BuildError> {
    into_objects(rows)?
        .into_iter()
        .enumerate()
        .map(|(index, object)| {
            serde_json::from_value(JsonValue::Object(object))
                .map_err(|e| BuildError::StoreResponse(format!("row {}: {}", index, e)))
        })
        .collect()
}
