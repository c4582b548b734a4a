use std::collections::HashMap;

use serde_json::Value;

use crate::Result;
use crate::error::Error;

/// Table is the normalized result of one API fetch: uppercase column
/// names in first-seen order, one row of scalar cells per top-level
/// JSON array element. Uppercasing the column names is the only
/// transformation applied to the API output.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Normalize one JSON payload. An array becomes one row per
    /// element; a bare object becomes a single row. Nested objects are
    /// flattened into dotted-key columns; keys absent from a given row
    /// fill with null.
    pub fn from_json(body: &Value) -> Result<Table> {
        let records = match body {
            Value::Array(items) => items.as_slice(),
            Value::Object(_) => std::slice::from_ref(body),
            _ => return Err(Error::Validation("api response is not tabular".to_string())),
        };

        let mut columns: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut sparse: Vec<Vec<(usize, Value)>> = Vec::with_capacity(records.len());

        for record in records {
            if !record.is_object() {
                return Err(Error::Validation("api response is not tabular".to_string()));
            }
            let mut cells = Vec::new();
            flatten("", record, &mut cells);

            let mut row = Vec::with_capacity(cells.len());
            for (name, value) in cells {
                let col = match index.get(&name) {
                    Some(col) => *col,
                    None => {
                        columns.push(name.clone());
                        index.insert(name, columns.len() - 1);
                        columns.len() - 1
                    }
                };
                row.push((col, value));
            }
            sparse.push(row);
        }

        let rows = sparse
            .into_iter()
            .map(|cells| {
                let mut row = vec![Value::Null; columns.len()];
                for (col, value) in cells {
                    row[col] = value;
                }
                row
            })
            .collect();

        Ok(Table { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }
}

// Leaves keep their JSON scalar value; only objects recurse. Arrays
// stay whole and render as JSON text downstream.
fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, Value)>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&path, child, out);
            }
        }
        leaf => out.push((prefix.to_uppercase(), leaf.clone())),
    }
}

/// Cell text as written to CSV: null renders empty, strings render
/// bare, everything else renders as JSON.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
