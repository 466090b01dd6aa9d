//! PostgreSQL database adapter implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::postgres::{PgArguments, PgColumn, PgPoolOptions, PgRow};
use sqlx::{Column, PgPool, Postgres, Row, TypeInfo, ValueRef};

use crate::database::adapter::DatabaseAdapter;
use crate::database::config::DatabaseConnectionConfig;
use crate::database::value::{Record, SqlValue};
use crate::error::{Error, Result};
use crate::queries::dialects::DatabaseBackend;

type PgQuery<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;

/// PostgreSQL adapter over a sqlx connection pool
#[derive(Clone)]
pub struct PostgresAdapter {
    pool: Arc<PgPool>,
}

impl PostgresAdapter {
    /// Connect a new pool using the given configuration
    pub async fn connect(config: &DatabaseConnectionConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .connect(&config.url)
            .await
            .map_err(|e| Error::connection(format!("Failed to connect to PostgreSQL: {}", e)))?;
        Ok(Self::from_pool(pool))
    }

    /// Create an adapter from an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn bind_value(query: PgQuery<'_>, value: SqlValue) -> PgQuery<'_> {
        match value {
            // PostgreSQL wants typed NULLs; bytea casts leniently
            SqlValue::Null => query.bind(None::<Vec<u8>>),
            SqlValue::Bool(b) => query.bind(b),
            SqlValue::Int(i) => query.bind(i),
            SqlValue::Float(f) => query.bind(f),
            SqlValue::Text(s) => query.bind(s),
            SqlValue::DateTime(dt) => query.bind(dt),
        }
    }

    fn bind_values(sql: &str, params: Vec<SqlValue>) -> PgQuery<'_> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = Self::bind_value(query, param);
        }
        query
    }

    fn row_to_record(row: &PgRow) -> Result<Record> {
        let mut record = Record::with_capacity(row.len());
        for (index, column) in row.columns().iter().enumerate() {
            record.push(Self::column_to_value(row, index, column)?);
        }
        Ok(record)
    }

    fn column_to_value(row: &PgRow, index: usize, column: &PgColumn) -> Result<SqlValue> {
        let raw = row
            .try_get_raw(index)
            .map_err(|e| Error::decode(column.name(), e))?;
        if raw.is_null() {
            return Ok(SqlValue::Null);
        }

        let decode = |e: sqlx::Error| Error::decode(column.name(), e);
        let value = match column.type_info().name() {
            "BOOL" => SqlValue::Bool(row.try_get::<bool, _>(index).map_err(decode)?),
            "INT2" => SqlValue::Int(row.try_get::<i16, _>(index).map_err(decode)? as i64),
            "INT4" => SqlValue::Int(row.try_get::<i32, _>(index).map_err(decode)? as i64),
            "INT8" => SqlValue::Int(row.try_get::<i64, _>(index).map_err(decode)?),
            "FLOAT4" => SqlValue::Float(row.try_get::<f32, _>(index).map_err(decode)? as f64),
            "FLOAT8" => SqlValue::Float(row.try_get::<f64, _>(index).map_err(decode)?),
            "TIMESTAMP" => {
                SqlValue::DateTime(row.try_get::<NaiveDateTime, _>(index).map_err(decode)?)
            }
            "TIMESTAMPTZ" => SqlValue::DateTime(
                row.try_get::<DateTime<Utc>, _>(index)
                    .map_err(decode)?
                    .naive_utc(),
            ),
            // TEXT, VARCHAR, BPCHAR, NAME and anything else that travels as text
            _ => SqlValue::Text(row.try_get::<String, _>(index).map_err(decode)?),
        };
        Ok(value)
    }
}

#[async_trait]
impl DatabaseAdapter for PostgresAdapter {
    fn backend(&self) -> DatabaseBackend {
        DatabaseBackend::Postgres
    }

    async fn execute(&self, sql: &str, params: Vec<SqlValue>) -> Result<u64> {
        #[cfg(debug_assertions)]
        log::debug!("PostgreSQL EXECUTE: {}", sql);

        let result = Self::bind_values(sql, params)
            .execute(&*self.pool)
            .await
            .map_err(|e| Error::query_execution(sql, e))?;
        Ok(result.rows_affected())
    }

    async fn execute_many(&self, sql: &str, records: Vec<Record>) -> Result<()> {
        #[cfg(debug_assertions)]
        log::debug!("PostgreSQL EXECUTE_MANY ({} records): {}", records.len(), sql);

        for record in records {
            Self::bind_values(sql, record)
                .execute(&*self.pool)
                .await
                .map_err(|e| Error::query_execution(sql, e))?;
        }
        Ok(())
    }

    async fn fetch_one(&self, sql: &str, params: Vec<SqlValue>) -> Result<Option<Record>> {
        #[cfg(debug_assertions)]
        log::debug!("PostgreSQL FETCH_ONE: {}", sql);

        let row = Self::bind_values(sql, params)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| Error::query_execution(sql, e))?;
        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn fetch_all(&self, sql: &str, params: Vec<SqlValue>) -> Result<Vec<Record>> {
        #[cfg(debug_assertions)]
        log::debug!("PostgreSQL FETCH_ALL: {}", sql);

        let rows = Self::bind_values(sql, params)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| Error::query_execution(sql, e))?;
        rows.iter().map(Self::row_to_record).collect()
    }
}
