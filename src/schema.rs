//! Table schema derivation and idempotent table creation.
//!
//! Column types come from the column *name*, never from sampled values:
//!
//! | name pattern                      | type      |
//! |-----------------------------------|-----------|
//! | `id`, `*_id`                      | `INTEGER` |
//! | contains `price` or `quantity`    | `REAL`    |
//! | contains `date`                   | `TEXT`    |
//! | anything else                     | `TEXT`    |
//!
//! Matching is case-insensitive and the first matching row wins.
//!
//! Table and column names are interpolated into DDL/DML unquoted, so they are
//! checked against an identifier allowlist first. [`TableSchema`] is the only
//! place SQL text containing identifiers is built.

use std::{collections::HashSet, sync::OnceLock};

use log::debug;
use regex::Regex;

use crate::{
    error::{IngestError, Result},
    infer::ColumnType,
    store::Store,
};

static IDENTIFIER: OnceLock<Regex> = OnceLock::new();

fn identifier_pattern() -> &'static Regex {
    IDENTIFIER.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid")
    })
}

pub fn is_valid_identifier(name: &str) -> bool {
    identifier_pattern().is_match(name)
}

pub fn column_type_for_name(name: &str) -> ColumnType {
    let lowered = name.to_ascii_lowercase();
    if lowered == "id" || lowered.ends_with("_id") {
        ColumnType::Integer
    } else if lowered.contains("price") || lowered.contains("quantity") {
        ColumnType::Real
    } else if lowered.contains("date") {
        // Dates are kept as text and never parsed.
        ColumnType::Text
    } else {
        ColumnType::Text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub datatype: ColumnType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub table: String,
    pub columns: Vec<ColumnDef>,
}

impl TableSchema {
    /// Validates names and assigns a type to every column.
    pub fn from_headers<S: AsRef<str>>(table: &str, headers: &[S]) -> Result<Self> {
        if !is_valid_identifier(table) {
            return Err(IngestError::schema(
                table,
                format!("'{table}' is not a valid table name"),
            ));
        }
        if headers.is_empty() {
            return Err(IngestError::schema(table, "no columns defined"));
        }

        let mut seen = HashSet::with_capacity(headers.len());
        let mut columns = Vec::with_capacity(headers.len());
        for (idx, header) in headers.iter().enumerate() {
            let name = header.as_ref();
            if name.is_empty() {
                return Err(IngestError::schema(
                    table,
                    format!("column {} has an empty name", idx + 1),
                ));
            }
            if !is_valid_identifier(name) {
                return Err(IngestError::schema(
                    table,
                    format!("'{name}' is not a valid column name"),
                ));
            }
            if !seen.insert(name.to_ascii_lowercase()) {
                return Err(IngestError::schema(
                    table,
                    format!("duplicate column '{name}'"),
                ));
            }
            columns.push(ColumnDef {
                name: name.to_string(),
                datatype: column_type_for_name(name),
            });
        }

        Ok(Self {
            table: table.to_string(),
            columns,
        })
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_types(&self) -> Vec<ColumnType> {
        self.columns.iter().map(|c| c.datatype).collect()
    }

    pub fn create_sql(&self) -> String {
        let defs = self
            .columns
            .iter()
            .map(|c| format!("{} {}", c.name, c.datatype.as_sql()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("CREATE TABLE IF NOT EXISTS {} ({defs})", self.table)
    }

    pub fn insert_sql(&self) -> String {
        let placeholders = (1..=self.columns.len())
            .map(|idx| format!("?{idx}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({placeholders})",
            self.table,
            self.column_names().join(", ")
        )
    }
}

/// Derives the schema for `table` and creates the table if it is absent.
///
/// An existing table is left untouched, even if its definition differs.
pub fn build_schema<S: AsRef<str>>(
    store: &Store,
    table: &str,
    headers: &[S],
) -> Result<TableSchema> {
    let schema = TableSchema::from_headers(table, headers)?;
    let sql = schema.create_sql();
    debug!("Creating table: {sql}");
    store
        .connection()
        .execute(&sql, [])
        .map_err(|err| IngestError::schema(table, err.to_string()))?;
    Ok(schema)
}
