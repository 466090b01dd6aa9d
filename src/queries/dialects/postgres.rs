//! PostgreSQL dialect implementation
//!
//! Uses the Postgres-native idioms the MySQL family lacks: `$n` placeholders,
//! `DISTINCT ON` for the group-wise rewrite, `ON CONFLICT` upserts and a real
//! `RETURNING` clause.

use super::{DatabaseBackend, SqlDialect};
use crate::error::Result;
use crate::queries::clauses::{
    add_filters, add_orderings, add_pagination, check_query_parameter, Ordering, ALL_COLUMNS,
};
use crate::queries::insert::{InsertQuery, InsertReturningQuery, ReturningPlan};
use crate::queries::select::GroupWiseQuery;

/// PostgreSQL dialect
pub struct PostgresDialect;

impl PostgresDialect {
    pub fn new() -> Self {
        Self
    }

    // DISTINCT ON keeps the first row per group under this ordering, so the
    // ordering columns must be exactly the groupings followed by the target.
    fn group_wise_orderings(query: &GroupWiseQuery) -> Vec<Ordering> {
        let target = if query.is_maximum {
            Ordering::desc(query.target_column_name.clone())
        } else {
            Ordering::asc(query.target_column_name.clone())
        };
        query
            .groupings
            .iter()
            .map(Ordering::asc)
            .chain(std::iter::once(target))
            .collect()
    }
}

impl Default for PostgresDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlDialect for PostgresDialect {
    fn backend(&self) -> DatabaseBackend {
        DatabaseBackend::Postgres
    }

    fn placeholder(&self, position: usize) -> String {
        format!("${}", position)
    }

    fn group_wise_select_sql(&self, query: &GroupWiseQuery) -> String {
        let columns = query.columns_names.join(", ");
        let groupings = query.groupings.join(", ");
        let mut inner = format!(
            "SELECT DISTINCT ON ({}) {} FROM {} ",
            groupings, ALL_COLUMNS, query.table_name,
        );
        inner = add_filters(inner, query.filters.as_ref());
        inner = add_orderings(inner, &Self::group_wise_orderings(query));

        let mut sql = format!("SELECT {} FROM ({}) AS subquery ", columns, inner);
        sql = add_orderings(sql, &query.orderings);
        add_pagination(sql, query.limit, query.offset)
    }

    fn insert_sql(&self, query: &InsertQuery) -> String {
        let columns = query.columns_names.join(", ");
        let labels = self.placeholders(query.columns_names.len());
        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) ",
            query.table_name, columns, labels,
        );

        if query.unique_columns_names.is_empty() {
            return sql;
        }

        // A unique constraint must exist on exactly the columns named in
        // ON CONFLICT; DO NOTHING makes the non-merge path a true no-op,
        // unlike the MySQL rendition.
        let action = if query.merge {
            let updates = query
                .columns_names
                .iter()
                .map(|column| format!("{} = EXCLUDED.{}", column, column))
                .collect::<Vec<_>>()
                .join(", ");
            format!("UPDATE SET {}", updates)
        } else {
            "NOTHING".to_string()
        };
        let unique_columns = query.unique_columns_names.join(", ");
        sql.push_str(&format!("ON CONFLICT ({}) DO {} ", unique_columns, action));
        sql
    }

    fn generate_insert_returning(&self, query: &InsertReturningQuery) -> Result<ReturningPlan> {
        check_query_parameter("returning_columns_names", &query.returning_columns_names)?;
        let mut sql = self.generate_insert(&query.insert)?;
        sql.push_str(&format!(
            "RETURNING {}",
            query.returning_columns_names.join(", ")
        ));
        Ok(ReturningPlan::Native { sql })
    }

    fn settings_query(&self, setting_name: &str) -> String {
        format!("SHOW {}", setting_name)
    }

    fn settings_value_index(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_numbered() {
        let dialect = PostgresDialect::new();
        assert_eq!(dialect.placeholders(3), "$1, $2, $3");
    }

    #[test]
    fn pagination_passes_through() {
        let dialect = PostgresDialect::new();
        assert_eq!(dialect.normalize_pagination(None, Some(5)), (None, Some(5)));
    }

    #[test]
    fn settings_query_shape() {
        let dialect = PostgresDialect::new();
        assert_eq!(dialect.settings_query("max_connections"), "SHOW max_connections");
        assert_eq!(dialect.settings_value_index(), 0);
    }
}
