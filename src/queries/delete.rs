//! DELETE statement generation

use crate::queries::clauses::add_filters;
use crate::queries::filters::Filter;

/// Generate a DELETE statement
pub fn generate_delete_query(table_name: &str, filters: Option<&Filter>) -> String {
    let sql = format!("DELETE FROM {} ", table_name);
    add_filters(sql, filters)
}
