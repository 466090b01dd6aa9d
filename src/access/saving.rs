//! Write operations: insert and insert-returning

use super::DataAccess;
use crate::database::value::{Record, SqlValue};
use crate::error::Result;
use crate::queries::filters::Filter;
use crate::queries::insert::{InsertQuery, InsertReturningQuery, ReturningPlan};
use crate::queries::select::SelectQuery;

/// Parameters for an insert
#[derive(Clone, Debug, Default)]
pub struct InsertRequest {
    pub table_name: String,
    pub columns_names: Vec<String>,
    pub unique_columns_names: Vec<String>,
    pub merge: bool,
    pub records: Vec<Record>,
}

impl InsertRequest {
    pub fn new<I, S>(table_name: impl Into<String>, columns_names: I, records: Vec<Record>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table_name: table_name.into(),
            columns_names: columns_names.into_iter().map(Into::into).collect(),
            records,
            ..Default::default()
        }
    }

    pub fn with_unique_columns<I, S>(mut self, unique_columns_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unique_columns_names = unique_columns_names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    fn into_parts(self) -> (InsertQuery, Vec<Record>) {
        let query = InsertQuery {
            table_name: self.table_name,
            columns_names: self.columns_names,
            unique_columns_names: self.unique_columns_names,
            merge: self.merge,
        };
        (query, self.records)
    }
}

/// Parameters for an insert that reports the inserted rows back
#[derive(Clone, Debug, Default)]
pub struct InsertReturningRequest {
    pub insert: InsertRequest,
    pub returning_columns_names: Vec<String>,
}

impl InsertReturningRequest {
    pub fn new<I, S>(insert: InsertRequest, returning_columns_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            insert,
            returning_columns_names: returning_columns_names
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

impl DataAccess {
    /// Insert all records with one generated statement
    pub async fn insert(&self, request: InsertRequest) -> Result<()> {
        let (query, records) = request.into_parts();
        let sql = self.dialect.generate_insert(&query)?;
        self.adapter.execute_many(&sql, records).await
    }

    /// Insert all records and return the requested columns of the inserted rows
    ///
    /// On backends without native RETURNING this runs the emulated statement
    /// sequence; the phases are not atomic on their own, so callers needing
    /// atomicity wrap the call in an externally managed transaction.
    pub async fn insert_returning(&self, request: InsertReturningRequest) -> Result<Vec<Record>> {
        let InsertReturningRequest {
            insert,
            returning_columns_names,
        } = request;
        let (query, records) = insert.into_parts();
        let table_name = query.table_name.clone();
        let query = InsertReturningQuery::new(query, returning_columns_names.clone());

        match self.dialect.generate_insert_returning(&query)? {
            ReturningPlan::Native { sql } => {
                let mut rows = Vec::new();
                for record in records {
                    rows.extend(self.adapter.fetch_all(&sql, record).await?);
                }
                Ok(rows)
            }
            ReturningPlan::Emulated {
                insert_sql,
                keys_sql,
                primary_key,
            } => {
                for record in records {
                    self.adapter.execute(&insert_sql, record).await?;
                }
                let key_rows = self.adapter.fetch_all(&keys_sql, Vec::new()).await?;
                let keys: Vec<SqlValue> = key_rows
                    .into_iter()
                    .filter_map(|mut row| {
                        if row.is_empty() {
                            None
                        } else {
                            Some(row.swap_remove(0))
                        }
                    })
                    .collect();
                let select = SelectQuery::new(table_name, returning_columns_names)
                    .with_filters(Filter::is_in(primary_key, keys));
                let sql = self.dialect.generate_select(&select)?;
                self.adapter.fetch_all(&sql, Vec::new()).await
            }
        }
    }
}
