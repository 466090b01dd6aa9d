//! Backend-specific adapter implementations

pub mod mysql;
pub mod postgres;

pub use mysql::MySqlAdapter;
pub use postgres::PostgresAdapter;
