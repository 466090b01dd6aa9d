//! MySQL/MariaDB dialect implementation
//!
//! Covers the MySQL-family quirks: positional `?` placeholders, the mandatory
//! LIMIT when OFFSET is present, `ON DUPLICATE KEY UPDATE` upserts, the
//! self-join group-wise rewrite (MySQL has no `DISTINCT ON`), and the
//! `LAST_INSERT_ID` recovery path standing in for `RETURNING`.

use super::{DatabaseBackend, SqlDialect};
use crate::error::{Error, Result};
use crate::queries::clauses::{
    add_filters, add_groupings, add_orderings, add_pagination, check_query_parameter,
};
use crate::queries::insert::{InsertQuery, InsertReturningQuery, ReturningPlan};
use crate::queries::select::GroupWiseQuery;

/// Largest BIGINT UNSIGNED value (2^64 - 1), substituted for a missing LIMIT
/// when an OFFSET is requested
pub const MYSQL_MAX_BIGINT: u64 = u64::MAX;

/// MySQL/MariaDB dialect
pub struct MySqlDialect;

impl MySqlDialect {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MySqlDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlDialect for MySqlDialect {
    fn backend(&self) -> DatabaseBackend {
        DatabaseBackend::MySql
    }

    fn placeholder(&self, _position: usize) -> String {
        "?".to_string()
    }

    fn normalize_pagination(
        &self,
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> (Option<u64>, Option<u64>) {
        if limit.is_none() && offset.is_some() {
            log::warn!(
                "MySQL requires LIMIT when OFFSET is set; \
                 assuming a BIGINT primary key and substituting LIMIT {}",
                MYSQL_MAX_BIGINT
            );
            return (Some(MYSQL_MAX_BIGINT), offset);
        }
        (limit, offset)
    }

    // Self-join on the aggregated extremum, the standard MySQL workaround for
    // the missing DISTINCT ON. Filters and pagination bind to the inner
    // aggregation; ordering and projection apply to the joined result.
    fn group_wise_select_sql(&self, query: &GroupWiseQuery) -> String {
        let columns = query.columns_names.join(", ");
        let groupings = query.groupings.join(", ");
        let mut inner = format!(
            "SELECT {}, {}({}) AS {} FROM {} ",
            groupings,
            query.aggregate_keyword(),
            query.target_column_name,
            query.target_column_name,
            query.table_name,
        );
        inner = add_filters(inner, query.filters.as_ref());
        inner = add_pagination(inner, query.limit, query.offset);
        inner = add_groupings(inner, &query.groupings);

        let sql = format!(
            "SELECT {} FROM {} JOIN ({}) as subquery USING ({}, {}) ",
            columns, query.table_name, inner, groupings, query.target_column_name,
        );
        add_orderings(sql, &query.orderings)
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

        // VALUES(col) carries the proposed row's value. The merge path
        // reassigns only the unique columns, which are equal on conflict, so
        // the row survives unchanged even though an UPDATE is issued; the
        // non-merge path reassigns every column from the proposed row.
        // Postgres's non-merge path is a true DO NOTHING instead.
        let reassigned = if query.merge {
            &query.unique_columns_names
        } else {
            &query.columns_names
        };
        let updates = reassigned
            .iter()
            .map(|column| format!("{} = VALUES({})", column, column))
            .collect::<Vec<_>>()
            .join(", ");
        sql.push_str(&format!("ON DUPLICATE KEY UPDATE {} ", updates));
        sql
    }

    fn generate_insert_returning(&self, query: &InsertReturningQuery) -> Result<ReturningPlan> {
        check_query_parameter("returning_columns_names", &query.returning_columns_names)?;
        let primary_key = query
            .insert
            .unique_columns_names
            .first()
            .ok_or(Error::MissingPrimaryKey)?
            .clone();
        let insert_sql = self.generate_insert(&query.insert)?;
        let keys_sql = format!(
            "SELECT LAST_INSERT_ID({}) FROM {}",
            primary_key, query.insert.table_name,
        );
        Ok(ReturningPlan::Emulated {
            insert_sql,
            keys_sql,
            primary_key,
        })
    }

    fn settings_query(&self, setting_name: &str) -> String {
        format!("SHOW VARIABLES LIKE '{}'", setting_name)
    }

    // SHOW VARIABLES rows are (Variable_name, Value)
    fn settings_value_index(&self) -> usize {
        1
    }
}
