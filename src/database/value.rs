//! Scalar value type shared by query generation and execution
//!
//! This module is the single point of truth for the values that can appear in
//! filters, updates and records, and for how they render as SQL literal text.

use chrono::NaiveDateTime;
use serde_json::Value as JsonValue;

/// SQL literal for missing values
pub const NULL_LITERAL: &str = "NULL";

/// A row as returned by the adapters, position-aligned with the requested columns
pub type Record = Vec<SqlValue>;

/// Scalar value supported by the query engine
///
/// Covers the column value domain shared by both backends: integers, booleans,
/// floating point numbers, text, timestamps and NULL.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl SqlValue {
    /// Check if this value is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }

    /// Render this value as dialect-safe SQL literal text
    ///
    /// Text and timestamps are wrapped in single quotes with embedded quotes
    /// doubled. Booleans render as `1`/`0`, which both backends accept in
    /// literal context.
    pub fn to_sql_literal(&self) -> String {
        match self {
            SqlValue::Null => NULL_LITERAL.to_string(),
            SqlValue::Bool(true) => "1".to_string(),
            SqlValue::Bool(false) => "0".to_string(),
            SqlValue::Int(i) => i.to_string(),
            SqlValue::Float(f) => f.to_string(),
            SqlValue::Text(s) => format!("'{}'", s.replace('\'', "''")),
            SqlValue::DateTime(dt) => format!("'{}'", dt.format("%Y-%m-%d %H:%M:%S%.f")),
        }
    }

    /// Convert to a boolean if possible
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SqlValue::Bool(b) => Some(*b),
            SqlValue::Int(i) => Some(*i != 0),
            _ => None,
        }
    }

    /// Convert to an i64 if possible
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SqlValue::Int(i) => Some(*i),
            SqlValue::Bool(b) => Some(*b as i64),
            SqlValue::Text(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Convert to an f64 if possible
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SqlValue::Float(f) => Some(*f),
            SqlValue::Int(i) => Some(*i as f64),
            SqlValue::Text(s) => s.parse().ok(),
            _ => None,
        }
    }

    /// Borrow the text content if this is a text value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Convert to a JSON value for callers that want serialized rows
    pub fn to_json(&self) -> JsonValue {
        match self {
            SqlValue::Null => JsonValue::Null,
            SqlValue::Bool(b) => JsonValue::Bool(*b),
            SqlValue::Int(i) => JsonValue::Number((*i).into()),
            SqlValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            SqlValue::Text(s) => JsonValue::String(s.clone()),
            SqlValue::DateTime(dt) => {
                JsonValue::String(dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
            }
        }
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int(value as i64)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Int(value)
    }
}

impl From<u32> for SqlValue {
    fn from(value: u32) -> Self {
        SqlValue::Int(value as i64)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(value: NaiveDateTime) -> Self {
        SqlValue::DateTime(value)
    }
}

impl<T> From<Option<T>> for SqlValue
where
    T: Into<SqlValue>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => SqlValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn null_renders_unquoted() {
        assert_eq!(SqlValue::Null.to_sql_literal(), "NULL");
    }

    #[test]
    fn booleans_render_portable() {
        assert_eq!(SqlValue::Bool(true).to_sql_literal(), "1");
        assert_eq!(SqlValue::Bool(false).to_sql_literal(), "0");
    }

    #[test]
    fn text_is_quoted_and_escaped() {
        assert_eq!(SqlValue::from("plain").to_sql_literal(), "'plain'");
        assert_eq!(SqlValue::from("it's").to_sql_literal(), "'it''s'");
    }

    #[test]
    fn datetime_is_quoted() {
        let dt = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        assert_eq!(
            SqlValue::DateTime(dt).to_sql_literal(),
            "'2024-01-15 10:30:00'"
        );
    }

    #[test]
    fn numbers_render_bare() {
        assert_eq!(SqlValue::Int(-7).to_sql_literal(), "-7");
        assert_eq!(SqlValue::Float(2.5).to_sql_literal(), "2.5");
    }

    #[test]
    fn option_maps_to_null() {
        assert_eq!(SqlValue::from(None::<i64>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some(3i64)), SqlValue::Int(3));
    }
}
