//! Delete operation

use super::DataAccess;
use crate::error::Result;
use crate::queries::filters::Filter;

impl DataAccess {
    /// Delete matching rows, returning the affected row count
    pub async fn delete(&self, table_name: &str, filters: Option<Filter>) -> Result<u64> {
        let sql = self.dialect.generate_delete(table_name, filters.as_ref());
        self.adapter.execute(&sql, Vec::new()).await
    }
}
