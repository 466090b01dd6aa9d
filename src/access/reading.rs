//! Read operations: fetch, aggregates, group-wise fetches and settings

use std::collections::HashMap;

use super::DataAccess;
use crate::database::value::{Record, SqlValue};
use crate::error::{Error, Result};
use crate::queries::clauses::{Ordering, ALL_COLUMNS};
use crate::queries::filters::Filter;
use crate::queries::select::{GroupWiseQuery, SelectQuery};

/// Parameters for a plain fetch
#[derive(Clone, Debug, Default)]
pub struct FetchRequest {
    pub table_name: String,
    pub columns_names: Vec<String>,
    pub columns_aliases: HashMap<String, String>,
    pub filters: Option<Filter>,
    pub orderings: Vec<Ordering>,
    pub groupings: Vec<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl FetchRequest {
    pub fn new<I, S>(table_name: impl Into<String>, columns_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table_name: table_name.into(),
            columns_names: columns_names.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_aliases(mut self, columns_aliases: HashMap<String, String>) -> Self {
        self.columns_aliases = columns_aliases;
        self
    }

    pub fn with_filters(mut self, filters: Filter) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn with_orderings(mut self, orderings: Vec<Ordering>) -> Self {
        self.orderings = orderings;
        self
    }

    pub fn with_groupings<I, S>(mut self, groupings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groupings = groupings.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Parameters for a group-wise fetch
#[derive(Clone, Debug, Default)]
pub struct GroupWiseFetchRequest {
    pub table_name: String,
    pub columns_names: Vec<String>,
    pub columns_aliases: HashMap<String, String>,
    pub target_column_name: String,
    pub groupings: Vec<String>,
    pub filters: Option<Filter>,
    pub orderings: Vec<Ordering>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub is_maximum: bool,
}

impl GroupWiseFetchRequest {
    pub fn new<I, S, G, T>(
        table_name: impl Into<String>,
        columns_names: I,
        target_column_name: impl Into<String>,
        groupings: G,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        G: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            table_name: table_name.into(),
            columns_names: columns_names.into_iter().map(Into::into).collect(),
            target_column_name: target_column_name.into(),
            groupings: groupings.into_iter().map(Into::into).collect(),
            is_maximum: true,
            ..Default::default()
        }
    }

    pub fn with_aliases(mut self, columns_aliases: HashMap<String, String>) -> Self {
        self.columns_aliases = columns_aliases;
        self
    }

    pub fn with_filters(mut self, filters: Filter) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn with_orderings(mut self, orderings: Vec<Ordering>) -> Self {
        self.orderings = orderings;
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn minimum(mut self) -> Self {
        self.is_maximum = false;
        self
    }
}

// Every requested column is emitted as `name AS alias`, with the name itself
// as the default alias, so result positions always match the request.
fn aliased_columns(
    columns_names: &[String],
    columns_aliases: &HashMap<String, String>,
) -> Vec<String> {
    columns_names
        .iter()
        .map(|name| {
            let alias = columns_aliases.get(name).unwrap_or(name);
            format!("{} AS {}", name, alias)
        })
        .collect()
}

fn function_column(function_name: &str, column_name: &str) -> String {
    format!("{}({}) AS {}_1", function_name, column_name, function_name)
}

fn first_value(row: Option<Record>, default: SqlValue) -> SqlValue {
    match row {
        Some(mut record) if !record.is_empty() => record.swap_remove(0),
        _ => default,
    }
}

impl DataAccess {
    /// Fetch all matching rows, aligned to the requested columns
    pub async fn fetch(&self, request: FetchRequest) -> Result<Vec<Record>> {
        let (limit, offset) = self
            .dialect
            .normalize_pagination(request.limit, request.offset);
        let select = SelectQuery {
            table_name: request.table_name,
            columns_names: aliased_columns(&request.columns_names, &request.columns_aliases),
            filters: request.filters,
            orderings: request.orderings,
            groupings: request.groupings,
            limit,
            offset,
        };
        let sql = self.dialect.generate_select(&select)?;
        self.adapter.fetch_all(&sql, Vec::new()).await
    }

    /// Fetch the group-wise extremum rows
    pub async fn group_wise_fetch(&self, request: GroupWiseFetchRequest) -> Result<Vec<Record>> {
        let (limit, offset) = self
            .dialect
            .normalize_pagination(request.limit, request.offset);
        let query = GroupWiseQuery {
            table_name: request.table_name,
            columns_names: aliased_columns(&request.columns_names, &request.columns_aliases),
            target_column_name: request.target_column_name,
            groupings: request.groupings,
            filters: request.filters,
            orderings: request.orderings,
            limit,
            offset,
            is_maximum: request.is_maximum,
        };
        let sql = self.dialect.generate_group_wise_select(&query)?;
        self.adapter.fetch_all(&sql, Vec::new()).await
    }

    /// Count matching rows; an empty table counts as zero
    pub async fn fetch_records_count(
        &self,
        table_name: &str,
        filters: Option<Filter>,
    ) -> Result<i64> {
        let value = self
            .fetch_column_function("COUNT", table_name, ALL_COLUMNS, filters, SqlValue::Int(0))
            .await?;
        Ok(value.as_i64().unwrap_or(0))
    }

    /// Maximum value of a column; NULL when no row matches
    pub async fn fetch_max_column_value(
        &self,
        table_name: &str,
        column_name: &str,
        filters: Option<Filter>,
    ) -> Result<SqlValue> {
        self.fetch_column_function("MAX", table_name, column_name, filters, SqlValue::Null)
            .await
    }

    /// Count rows retained by a group-wise maximum fetch
    pub async fn group_wise_fetch_records_count(
        &self,
        table_name: &str,
        target_column_name: &str,
        groupings: Vec<String>,
        filters: Option<Filter>,
    ) -> Result<i64> {
        let value = self
            .group_wise_column_function(
                "COUNT",
                table_name,
                ALL_COLUMNS,
                target_column_name,
                groupings,
                filters,
            )
            .await?;
        Ok(value.as_i64().unwrap_or(0))
    }

    /// Maximum value of a column across the group-wise maximum rows
    pub async fn group_wise_fetch_max_column_value(
        &self,
        table_name: &str,
        column_name: &str,
        target_column_name: &str,
        groupings: Vec<String>,
        filters: Option<Filter>,
    ) -> Result<SqlValue> {
        self.group_wise_column_function(
            "MAX",
            table_name,
            column_name,
            target_column_name,
            groupings,
            filters,
        )
        .await
    }

    /// Read the backend's connection limit setting
    pub async fn fetch_max_connections(&self) -> Result<u32> {
        let sql = self.dialect.settings_query("max_connections");
        let row = self
            .adapter
            .fetch_one(&sql, Vec::new())
            .await?
            .ok_or_else(|| Error::query_execution(&sql, "no row returned"))?;
        let value = row
            .get(self.dialect.settings_value_index())
            .cloned()
            .unwrap_or(SqlValue::Null);
        match value {
            SqlValue::Int(count) => Ok(count as u32),
            SqlValue::Text(text) => text
                .parse()
                .map_err(|e| Error::decode("max_connections", e)),
            other => Err(Error::decode(
                "max_connections",
                format!("unexpected value: {:?}", other),
            )),
        }
    }

    async fn fetch_column_function(
        &self,
        function_name: &str,
        table_name: &str,
        column_name: &str,
        filters: Option<Filter>,
        default: SqlValue,
    ) -> Result<SqlValue> {
        let columns = vec![function_column(function_name, column_name)];
        let mut select = SelectQuery::new(table_name, columns);
        select.filters = filters;
        let sql = self.dialect.generate_select(&select)?;
        let row = self.adapter.fetch_one(&sql, Vec::new()).await?;
        Ok(first_value(row, default))
    }

    async fn group_wise_column_function(
        &self,
        function_name: &str,
        table_name: &str,
        column_name: &str,
        target_column_name: &str,
        groupings: Vec<String>,
        filters: Option<Filter>,
    ) -> Result<SqlValue> {
        let mut query = GroupWiseQuery::new(
            table_name,
            vec![function_column(function_name, column_name)],
            target_column_name,
            groupings,
        );
        query.filters = filters;
        let sql = self.dialect.generate_group_wise_select(&query)?;
        let row = self.adapter.fetch_one(&sql, Vec::new()).await?;
        Ok(first_value(row, SqlValue::Int(0)))
    }
}
