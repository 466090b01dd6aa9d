//! Clause assemblers shared by the statement generators
//!
//! Each assembler takes the query text built so far and appends one clause with
//! a trailing space when its payload is present, passing the accumulator
//! through unchanged otherwise. Clause order is part of the generated-text
//! contract, so callers apply these in a fixed sequence.

use indexmap::IndexMap;

use crate::database::value::SqlValue;
use crate::error::{Error, Result};
use crate::queries::filters::Filter;

/// Column selection covering every column of a table
pub const ALL_COLUMNS: &str = "*";

/// Sort direction for ORDER BY clauses
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    pub fn sql_keyword(&self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

/// One ORDER BY entry; earlier entries have higher sort priority
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ordering {
    pub column: String,
    pub direction: OrderDirection,
}

impl Ordering {
    pub fn new(column: impl Into<String>, direction: OrderDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    pub fn asc(column: impl Into<String>) -> Self {
        Self::new(column, OrderDirection::Asc)
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self::new(column, OrderDirection::Desc)
    }

    fn to_sql(&self) -> String {
        format!("{} {}", self.column, self.direction.sql_keyword())
    }
}

/// Column-to-value assignments for UPDATE and upsert statements
///
/// Insertion order determines SET emission order, which keeps generated text
/// deterministic.
pub type Updates = IndexMap<String, SqlValue>;

/// Append `WHERE ...` when filters are present
pub fn add_filters(mut query: String, filters: Option<&Filter>) -> String {
    if let Some(filters) = filters {
        query.push_str("WHERE ");
        query.push_str(&filters.to_sql());
        query.push(' ');
    }
    query
}

/// Append `ORDER BY col dir, ...` when orderings are present
pub fn add_orderings(mut query: String, orderings: &[Ordering]) -> String {
    if !orderings.is_empty() {
        let orderings = orderings
            .iter()
            .map(Ordering::to_sql)
            .collect::<Vec<_>>()
            .join(", ");
        query.push_str("ORDER BY ");
        query.push_str(&orderings);
        query.push(' ');
    }
    query
}

/// Append `GROUP BY col, ...` when groupings are present
pub fn add_groupings(mut query: String, groupings: &[String]) -> String {
    if !groupings.is_empty() {
        query.push_str("GROUP BY ");
        query.push_str(&groupings.join(", "));
        query.push(' ');
    }
    query
}

/// Append `LIMIT n`, then `OFFSET m` only when a limit was emitted
///
/// An offset without a limit is dropped here; the MySQL dialect substitutes a
/// sentinel limit before this assembler runs (see `SqlDialect::normalize_pagination`).
pub fn add_pagination(mut query: String, limit: Option<u64>, offset: Option<u64>) -> String {
    if let Some(limit) = limit {
        query.push_str(&format!("LIMIT {} ", limit));
        if let Some(offset) = offset {
            query.push_str(&format!("OFFSET {} ", offset));
        }
    }
    query
}

/// Append `SET col = literal, ...`
pub fn add_updates(mut query: String, updates: &Updates) -> String {
    let assignments = updates
        .iter()
        .map(|(column, value)| format!("{} = {}", column, value.to_sql_literal()))
        .collect::<Vec<_>>()
        .join(", ");
    query.push_str("SET ");
    query.push_str(&assignments);
    query.push(' ');
    query
}

/// Validate that a required list parameter is non-empty
pub fn check_query_parameter(parameter: &'static str, values: &[String]) -> Result<()> {
    if values.is_empty() {
        return Err(Error::EmptyQueryParameter { parameter });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payloads_pass_through() {
        let query = String::from("SELECT * FROM t ");
        assert_eq!(add_filters(query.clone(), None), query);
        assert_eq!(add_orderings(query.clone(), &[]), query);
        assert_eq!(add_groupings(query.clone(), &[]), query);
        assert_eq!(add_pagination(query.clone(), None, None), query);
    }

    #[test]
    fn filters_clause() {
        let query = add_filters(String::from("SELECT * FROM t "), Some(&Filter::eq("id", 1)));
        assert_eq!(query, "SELECT * FROM t WHERE id = 1 ");
    }

    #[test]
    fn orderings_clause() {
        let query = add_orderings(
            String::from("SELECT * FROM t "),
            &[Ordering::asc("id"), Ordering::desc("created")],
        );
        assert_eq!(query, "SELECT * FROM t ORDER BY id ASC, created DESC ");
    }

    #[test]
    fn offset_requires_limit() {
        let query = add_pagination(String::new(), Some(10), Some(5));
        assert_eq!(query, "LIMIT 10 OFFSET 5 ");

        let query = add_pagination(String::new(), None, Some(5));
        assert_eq!(query, "");
    }

    #[test]
    fn updates_clause_preserves_insertion_order() {
        let mut updates = Updates::new();
        updates.insert("b".to_string(), SqlValue::Int(2));
        updates.insert("a".to_string(), SqlValue::from("x"));
        let query = add_updates(String::from("UPDATE t "), &updates);
        assert_eq!(query, "UPDATE t SET b = 2, a = 'x' ");
    }

    #[test]
    fn empty_parameter_is_rejected() {
        let err = check_query_parameter("columns_names", &[]).unwrap_err();
        assert!(matches!(
            err,
            Error::EmptyQueryParameter {
                parameter: "columns_names"
            }
        ));
    }
}
