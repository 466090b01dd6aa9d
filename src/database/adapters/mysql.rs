//! MySQL database adapter implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::mysql::{MySqlArguments, MySqlColumn, MySqlPoolOptions, MySqlRow};
use sqlx::{Column, MySql, MySqlPool, Row, TypeInfo, ValueRef};

use crate::database::adapter::DatabaseAdapter;
use crate::database::config::DatabaseConnectionConfig;
use crate::database::value::{Record, SqlValue};
use crate::error::{Error, Result};
use crate::queries::dialects::DatabaseBackend;

type MySqlQuery<'q> = sqlx::query::Query<'q, MySql, MySqlArguments>;

/// MySQL adapter over a sqlx connection pool
#[derive(Clone)]
pub struct MySqlAdapter {
    pool: Arc<MySqlPool>,
}

impl MySqlAdapter {
    /// Connect a new pool using the given configuration
    pub async fn connect(config: &DatabaseConnectionConfig) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .connect(&config.url)
            .await
            .map_err(|e| Error::connection(format!("Failed to connect to MySQL: {}", e)))?;
        Ok(Self::from_pool(pool))
    }

    /// Create an adapter from an existing pool
    pub fn from_pool(pool: MySqlPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Get a reference to the underlying pool
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    fn bind_value(query: MySqlQuery<'_>, value: SqlValue) -> MySqlQuery<'_> {
        match value {
            // MySQL accepts NULL for any column type
            SqlValue::Null => query.bind(None::<Vec<u8>>),
            SqlValue::Bool(b) => query.bind(b),
            SqlValue::Int(i) => query.bind(i),
            SqlValue::Float(f) => query.bind(f),
            SqlValue::Text(s) => query.bind(s),
            SqlValue::DateTime(dt) => query.bind(dt),
        }
    }

    fn bind_values(sql: &str, params: Vec<SqlValue>) -> MySqlQuery<'_> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = Self::bind_value(query, param);
        }
        query
    }

    fn row_to_record(row: &MySqlRow) -> Result<Record> {
        let mut record = Record::with_capacity(row.len());
        for (index, column) in row.columns().iter().enumerate() {
            record.push(Self::column_to_value(row, index, column)?);
        }
        Ok(record)
    }

    fn column_to_value(row: &MySqlRow, index: usize, column: &MySqlColumn) -> Result<SqlValue> {
        let raw = row
            .try_get_raw(index)
            .map_err(|e| Error::decode(column.name(), e))?;
        if raw.is_null() {
            return Ok(SqlValue::Null);
        }

        let decode = |e: sqlx::Error| Error::decode(column.name(), e);
        let value = match column.type_info().name() {
            // TINYINT(1) surfaces as BOOLEAN
            "BOOLEAN" => SqlValue::Bool(row.try_get::<bool, _>(index).map_err(decode)?),
            "TINYINT" => SqlValue::Int(row.try_get::<i8, _>(index).map_err(decode)? as i64),
            "SMALLINT" => SqlValue::Int(row.try_get::<i16, _>(index).map_err(decode)? as i64),
            "INT" | "MEDIUMINT" => {
                SqlValue::Int(row.try_get::<i32, _>(index).map_err(decode)? as i64)
            }
            "BIGINT" => SqlValue::Int(row.try_get::<i64, _>(index).map_err(decode)?),
            "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
            | "BIGINT UNSIGNED" => {
                SqlValue::Int(row.try_get::<u64, _>(index).map_err(decode)? as i64)
            }
            "FLOAT" => SqlValue::Float(row.try_get::<f32, _>(index).map_err(decode)? as f64),
            "DOUBLE" => SqlValue::Float(row.try_get::<f64, _>(index).map_err(decode)?),
            "DATETIME" | "TIMESTAMP" => {
                SqlValue::DateTime(row.try_get::<NaiveDateTime, _>(index).map_err(decode)?)
            }
            // VARCHAR, CHAR, TEXT, ENUM, DECIMAL and everything else that
            // travels as text
            _ => SqlValue::Text(row.try_get::<String, _>(index).map_err(decode)?),
        };
        Ok(value)
    }
}

#[async_trait]
impl DatabaseAdapter for MySqlAdapter {
    fn backend(&self) -> DatabaseBackend {
        DatabaseBackend::MySql
    }

    async fn execute(&self, sql: &str, params: Vec<SqlValue>) -> Result<u64> {
        #[cfg(debug_assertions)]
        log::debug!("MySQL EXECUTE: {}", sql);

        let result = Self::bind_values(sql, params)
            .execute(&*self.pool)
            .await
            .map_err(|e| Error::query_execution(sql, e))?;
        Ok(result.rows_affected())
    }

    async fn execute_many(&self, sql: &str, records: Vec<Record>) -> Result<()> {
        #[cfg(debug_assertions)]
        log::debug!("MySQL EXECUTE_MANY ({} records): {}", records.len(), sql);

        // The driver has no batched execute; one prepared statement is reused
        // per record.
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
        log::debug!("MySQL FETCH_ONE: {}", sql);

        let row = Self::bind_values(sql, params)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| Error::query_execution(sql, e))?;
        row.as_ref().map(Self::row_to_record).transpose()
    }

    async fn fetch_all(&self, sql: &str, params: Vec<SqlValue>) -> Result<Vec<Record>> {
        #[cfg(debug_assertions)]
        log::debug!("MySQL FETCH_ALL: {}", sql);

        let rows = Self::bind_values(sql, params)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| Error::query_execution(sql, e))?;
        rows.iter().map(Self::row_to_record).collect()
    }
}
