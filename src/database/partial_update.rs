//! Builds targeted, fully parameterized UPDATE statements from a sparse
//! field map.
//!
//! Identifiers cannot be bound as parameters, so every column named in the
//! field map must appear in the table's allow-list before it is written
//! into statement text. Values are never written into the text at all.

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Boolean,
}

impl ColumnKind {
    fn accepts(&self, value: &Value) -> bool {
        match self {
            ColumnKind::Text => value.is_string(),
            ColumnKind::Boolean => value.is_boolean(),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            ColumnKind::Text => "string",
            ColumnKind::Boolean => "boolean",
        }
    }
}

#[derive(Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnKind,
}

/// A table that accepts partial updates: which columns may select rows and
/// which may be written.
#[derive(Debug)]
pub struct TableDef {
    pub name: &'static str,
    pub key_columns: &'static [&'static str],
    pub updatable: &'static [ColumnDef],
}

impl TableDef {
    fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.updatable.iter().find(|c| c.name == name)
    }

    fn key_column(&self, name: &str) -> Option<&'static str> {
        self.key_columns.iter().copied().find(|k| *k == name)
    }
}

/// `username` and `password` are intentionally absent: the key is immutable
/// and the hash has its own write path.
pub const USERS: TableDef = TableDef {
    name: "users",
    key_columns: &["username"],
    updatable: &[
        ColumnDef { name: "first_name", kind: ColumnKind::Text },
        ColumnDef { name: "last_name", kind: ColumnKind::Text },
        ColumnDef { name: "email", kind: ColumnKind::Text },
        ColumnDef { name: "phone", kind: ColumnKind::Text },
        ColumnDef { name: "admin", kind: ColumnKind::Boolean },
    ],
};

const TABLES: &[TableDef] = &[USERS];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UpdateBuildError {
    #[error("No fields supplied to update")]
    EmptyFieldSet,

    #[error("Field '{0}' cannot be updated")]
    NotUpdatable(String),

    #[error("Field '{column}' must be a {expected}")]
    InvalidValue { column: String, expected: &'static str },

    #[error("Table '{0}' does not accept partial updates")]
    UnknownTable(String),

    #[error("Column '{column}' is not a key of table '{table}'")]
    UnknownKeyColumn { table: String, column: String },
}

impl UpdateBuildError {
    /// True when the request itself was bad, as opposed to a wiring mistake
    /// in the calling code.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            UpdateBuildError::EmptyFieldSet
                | UpdateBuildError::NotUpdatable(_)
                | UpdateBuildError::InvalidValue { .. }
        )
    }
}

/// A ready-to-run UPDATE plus its bound values: field values in map order,
/// then the key value.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdate {
    query: String,
    params: Vec<Value>,
    table: &'static str,
    columns: Vec<&'static str>,
    key_column: &'static str,
}

impl PartialUpdate {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    pub fn key_column(&self) -> &'static str {
        self.key_column
    }

    pub fn key_value(&self) -> &Value {
        &self.params[self.columns.len()]
    }

    /// Column/value pairs in the order they are bound.
    pub fn assignments(&self) -> impl Iterator<Item = (&'static str, &Value)> + '_ {
        self.columns.iter().copied().zip(self.params.iter())
    }
}

pub fn sql_for_partial_update(
    table: &str,
    fields: &Map<String, Value>,
    key_column: &str,
    key_value: impl Into<Value>,
) -> Result<PartialUpdate, UpdateBuildError> {
    let table_def = TABLES
        .iter()
        .find(|t| t.name == table)
        .ok_or_else(|| UpdateBuildError::UnknownTable(table.to_string()))?;

    let key_column = table_def
        .key_column(key_column)
        .ok_or_else(|| UpdateBuildError::UnknownKeyColumn {
            table: table.to_string(),
            column: key_column.to_string(),
        })?;

    if fields.is_empty() {
        return Err(UpdateBuildError::EmptyFieldSet);
    }

    let mut columns = Vec::with_capacity(fields.len());
    let mut params = Vec::with_capacity(fields.len() + 1);
    for (name, value) in fields {
        let column = table_def
            .column(name)
            .ok_or_else(|| UpdateBuildError::NotUpdatable(name.clone()))?;
        if !column.kind.accepts(value) {
            return Err(UpdateBuildError::InvalidValue {
                column: column.name.to_string(),
                expected: column.kind.describe(),
            });
        }
        columns.push(column.name);
        params.push(value.clone());
    }
    params.push(key_value.into());

    let set_clauses: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| format!("\"{}\" = ${}", column, i + 1))
        .collect();

    let query = format!(
        "UPDATE \"{}\" SET {} WHERE \"{}\" = ${} RETURNING *",
        table_def.name,
        set_clauses.join(", "),
        key_column,
        params.len()
    );

    tracing::debug!("Built partial update on {}: columns={:?}", table_def.name, columns);

    Ok(PartialUpdate {
        query,
        params,
        table: table_def.name,
        columns,
        key_column,
    })
}
