//! Update operation

use super::DataAccess;
use crate::error::Result;
use crate::queries::clauses::Updates;
use crate::queries::filters::Filter;

impl DataAccess {
    /// Update matching rows, returning the affected row count
    pub async fn update(
        &self,
        table_name: &str,
        updates: Updates,
        filters: Option<Filter>,
    ) -> Result<u64> {
        let sql = self
            .dialect
            .generate_update(table_name, &updates, filters.as_ref());
        self.adapter.execute(&sql, Vec::new()).await
    }
}
