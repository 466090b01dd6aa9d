//! duosql - dialect-abstracting asynchronous data access
//!
//! duosql translates backend-neutral query descriptions (tables, columns,
//! filter trees, orderings, pagination, upsert policy) into dialect-correct
//! SQL for MySQL-family and Postgres-family engines, and executes them
//! through a thin adapter over the driver's connection pool:
//! - one `SqlDialect` implementation per backend, selected once per session
//!   from the connection URI's scheme
//! - group-wise maximum/minimum fetches via the self-join rewrite on MySQL
//!   and `DISTINCT ON` on Postgres
//! - upserts via `ON DUPLICATE KEY UPDATE` and `ON CONFLICT`
//! - `RETURNING` emulation through `LAST_INSERT_ID` where the engine lacks it

// Enforce error handling best practices
#![cfg_attr(
    not(test),
    warn(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
    )
)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used,))]

pub mod access;
pub mod database;
pub mod error;
pub mod queries;

// Re-export the main types for the public API
pub use access::{
    DataAccess, FetchRequest, GroupWiseFetchRequest, InsertRequest, InsertReturningRequest,
};
pub use database::{
    DatabaseAdapter, DatabaseConnectionConfig, MySqlAdapter, PostgresAdapter, Record, SqlValue,
};
pub use error::{Error, Result};
pub use queries::{
    create_dialect, DatabaseBackend, Filter, GroupWiseQuery, InsertQuery, InsertReturningQuery,
    OrderDirection, Ordering, ReturningPlan, SelectQuery, SqlDialect, Updates,
};
