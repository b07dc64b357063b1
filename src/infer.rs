//! Value-level type classification.
//!
//! [`infer_type`] looks at a single cell and reports which storage class it
//! would fit. Table typing does not sample values (see
//! [`crate::schema::column_type_for_name`]); this is a standalone primitive.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
}

impl ColumnType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

pub fn infer_type(value: &str) -> ColumnType {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return ColumnType::Text;
    }
    if is_integer_literal(trimmed) {
        return ColumnType::Integer;
    }
    if trimmed.parse::<f64>().is_ok() {
        return ColumnType::Real;
    }
    ColumnType::Text
}

// Digit strings of any length count, so values wider than i64 stay INTEGER.
fn is_integer_literal(value: &str) -> bool {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}
