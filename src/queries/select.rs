//! SELECT statement descriptions and the dialect-independent generator

use crate::error::Result;
use crate::queries::clauses::{
    add_filters, add_groupings, add_orderings, add_pagination, check_query_parameter, Ordering,
};
use crate::queries::filters::Filter;

/// Description of a plain SELECT statement
#[derive(Clone, Debug, Default)]
pub struct SelectQuery {
    pub table_name: String,
    pub columns_names: Vec<String>,
    pub filters: Option<Filter>,
    pub orderings: Vec<Ordering>,
    pub groupings: Vec<String>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl SelectQuery {
    pub fn new<I, S>(table_name: impl Into<String>, columns_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table_name: table_name.into(),
            columns_names: columns_names.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn with_filters(mut self, filters: Filter) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn with_orderings(mut self, orderings: Vec<Ordering>) -> Self {
        self.orderings = orderings;
        self
    }

    pub fn with_groupings<I, S>(mut self, groupings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groupings = groupings.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

/// Description of a group-wise extremum SELECT
///
/// Returns, per group of rows sharing the grouping columns' values, the row
/// holding the maximum (or minimum) value of the target column. When several
/// rows share the extremal value the retained row is engine-defined.
#[derive(Clone, Debug, Default)]
pub struct GroupWiseQuery {
    pub table_name: String,
    pub columns_names: Vec<String>,
    pub target_column_name: String,
    pub groupings: Vec<String>,
    pub filters: Option<Filter>,
    pub orderings: Vec<Ordering>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub is_maximum: bool,
}

impl GroupWiseQuery {
    pub fn new<I, S, G, T>(
        table_name: impl Into<String>,
        columns_names: I,
        target_column_name: impl Into<String>,
        groupings: G,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        G: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            table_name: table_name.into(),
            columns_names: columns_names.into_iter().map(Into::into).collect(),
            target_column_name: target_column_name.into(),
            groupings: groupings.into_iter().map(Into::into).collect(),
            is_maximum: true,
            ..Default::default()
        }
    }

    pub fn with_filters(mut self, filters: Filter) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn with_orderings(mut self, orderings: Vec<Ordering>) -> Self {
        self.orderings = orderings;
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn minimum(mut self) -> Self {
        self.is_maximum = false;
        self
    }

    /// Aggregate keyword for the MySQL rewrite
    pub fn aggregate_keyword(&self) -> &'static str {
        if self.is_maximum {
            "MAX"
        } else {
            "MIN"
        }
    }
}

/// Generate a plain SELECT statement
pub fn generate_select_query(query: &SelectQuery) -> Result<String> {
    check_query_parameter("columns_names", &query.columns_names)?;

    let columns = query.columns_names.join(", ");
    let mut sql = format!("SELECT {} FROM {} ", columns, query.table_name);
    sql = add_filters(sql, query.filters.as_ref());
    sql = add_orderings(sql, &query.orderings);
    sql = add_groupings(sql, &query.groupings);
    sql = add_pagination(sql, query.limit, query.offset);
    Ok(sql)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn bare_select() {
        let query = SelectQuery::new("users", vec!["id", "name"]);
        assert_eq!(
            generate_select_query(&query).unwrap(),
            "SELECT id, name FROM users "
        );
    }

    #[test]
    fn all_clauses_in_order() {
        let query = SelectQuery::new("users", vec!["id"])
            .with_filters(Filter::gt("id", 5))
            .with_orderings(vec![Ordering::asc("id")])
            .with_groupings(vec!["id"])
            .with_limit(10)
            .with_offset(20);
        assert_eq!(
            generate_select_query(&query).unwrap(),
            "SELECT id FROM users WHERE id > 5 ORDER BY id ASC GROUP BY id LIMIT 10 OFFSET 20 "
        );
    }

    #[test]
    fn empty_columns_are_rejected() {
        let query = SelectQuery::new("users", Vec::<String>::new());
        assert!(matches!(
            generate_select_query(&query),
            Err(Error::EmptyQueryParameter {
                parameter: "columns_names"
            })
        ));
    }
}
