//! Data-access facade
//!
//! `DataAccess` binds the statement generators to a live adapter. The dialect
//! is resolved exactly once, when the facade is built; no other component
//! re-inspects the connection URI or branches on the backend.

use crate::database::adapter::DatabaseAdapter;
use crate::database::adapters::{MySqlAdapter, PostgresAdapter};
use crate::database::config::DatabaseConnectionConfig;
use crate::error::Result;
use crate::queries::dialects::{create_dialect, DatabaseBackend, SqlDialect};

pub mod deletion;
pub mod reading;
pub mod saving;
pub mod updating;

pub use reading::{FetchRequest, GroupWiseFetchRequest};
pub use saving::{InsertRequest, InsertReturningRequest};

/// Asynchronous data-access operations over one backend
pub struct DataAccess {
    pub(crate) adapter: Box<dyn DatabaseAdapter>,
    pub(crate) dialect: Box<dyn SqlDialect>,
}

impl DataAccess {
    /// Wrap an existing adapter, selecting the dialect from its backend
    pub fn new(adapter: Box<dyn DatabaseAdapter>) -> Self {
        let dialect = create_dialect(adapter.backend());
        Self { adapter, dialect }
    }

    /// Connect to the backend named by the configuration's URL scheme
    pub async fn connect(config: &DatabaseConnectionConfig) -> Result<Self> {
        let backend = DatabaseBackend::from_url(&config.url)?;
        let adapter: Box<dyn DatabaseAdapter> = match backend {
            DatabaseBackend::MySql => Box::new(MySqlAdapter::connect(config).await?),
            DatabaseBackend::Postgres => Box::new(PostgresAdapter::connect(config).await?),
        };
        Ok(Self::new(adapter))
    }

    /// The backend this facade operates on
    pub fn backend(&self) -> DatabaseBackend {
        self.adapter.backend()
    }
}
