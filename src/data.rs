use rusqlite::types::{ToSql, ToSqlOutput};

use crate::infer::ColumnType;

/// A normalized cell converted for its column, ready to be bound.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

impl ToSql for CellValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            CellValue::Integer(i) => ToSqlOutput::from(*i),
            CellValue::Real(f) => ToSqlOutput::from(*f),
            CellValue::Text(s) => ToSqlOutput::from(s.as_str()),
        })
    }
}

/// Converts a trimmed cell for a column of type `ty`.
///
/// Empty cells stay empty text whatever the column type; they are never
/// turned into NULL. Non-empty cells in numeric columns must parse, and the
/// error string describes the mismatch.
pub fn parse_cell(value: &str, ty: ColumnType) -> Result<CellValue, String> {
    if value.is_empty() {
        return Ok(CellValue::Text(String::new()));
    }
    match ty {
        ColumnType::Integer => value
            .parse::<i64>()
            .map(CellValue::Integer)
            .map_err(|_| format!("expected integer, found '{value}'")),
        // SQLite stores NaN as NULL, so it is rejected like any other non-number.
        ColumnType::Real => value
            .parse::<f64>()
            .ok()
            .filter(|f| !f.is_nan())
            .map(CellValue::Real)
            .ok_or_else(|| format!("expected real number, found '{value}'")),
        ColumnType::Text => Ok(CellValue::Text(value.to_string())),
    }
}
