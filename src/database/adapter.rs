//! Database adapter trait for the two supported backends
//!
//! The adapter is the boundary between the query engine and a live
//! connection: it executes SQL text and hands rows back as position-aligned
//! records. Connection pooling, transactions and retries live behind this
//! trait, never in the core.

use async_trait::async_trait;

use crate::database::value::{Record, SqlValue};
use crate::error::Result;
use crate::queries::dialects::DatabaseBackend;

/// Unified execution interface over a MySQL or PostgreSQL connection pool
///
/// Every method reports failures as `Error::QueryExecution` carrying the
/// offending SQL text. One statement is in flight per underlying connection at
/// a time; concurrent calls are serialized by the pool.
#[async_trait]
pub trait DatabaseAdapter: Send + Sync {
    /// The backend family this adapter talks to
    fn backend(&self) -> DatabaseBackend;

    /// Execute a statement, returning the affected row count
    async fn execute(&self, sql: &str, params: Vec<SqlValue>) -> Result<u64>;

    /// Execute one statement once per record
    async fn execute_many(&self, sql: &str, records: Vec<Record>) -> Result<()>;

    /// Fetch the first row of a query, if any
    async fn fetch_one(&self, sql: &str, params: Vec<SqlValue>) -> Result<Option<Record>>;

    /// Fetch all rows of a query
    async fn fetch_all(&self, sql: &str, params: Vec<SqlValue>) -> Result<Vec<Record>>;
}
