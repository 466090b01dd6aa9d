//! UPDATE statement generation

use crate::queries::clauses::{add_filters, add_updates, Updates};
use crate::queries::filters::Filter;

/// Generate an UPDATE statement with literal-embedded assignments
pub fn generate_update_query(
    table_name: &str,
    updates: &Updates,
    filters: Option<&Filter>,
) -> String {
    let mut sql = format!("UPDATE {} ", table_name);
    sql = add_updates(sql, updates);
    sql = add_filters(sql, filters);
    sql
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::value::SqlValue;

    #[test]
    fn update_with_filters() {
        let mut updates = Updates::new();
        updates.insert("name".to_string(), SqlValue::from("bob"));
        updates.insert("age".to_string(), SqlValue::Int(30));
        let sql = generate_update_query("users", &updates, Some(&Filter::eq("id", 7)));
        assert_eq!(sql, "UPDATE users SET name = 'bob', age = 30 WHERE id = 7 ");
    }

    #[test]
    fn update_without_filters() {
        let mut updates = Updates::new();
        updates.insert("active".to_string(), SqlValue::Bool(false));
        let sql = generate_update_query("users", &updates, None);
        assert_eq!(sql, "UPDATE users SET active = 0 ");
    }
}
