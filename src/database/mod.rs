//! Execution layer: scalar values, the adapter boundary and its backends

pub mod adapter;
pub mod adapters;
pub mod config;
pub mod value;

pub use adapter::DatabaseAdapter;
pub use adapters::{MySqlAdapter, PostgresAdapter};
pub use config::DatabaseConnectionConfig;
pub use value::{Record, SqlValue, NULL_LITERAL};
