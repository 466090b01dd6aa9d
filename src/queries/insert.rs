//! INSERT statement descriptions and execution plans

/// Description of an INSERT statement with optional upsert behavior
///
/// When `unique_columns_names` is empty the insert is plain and conflicts
/// surface as execution errors. With unique columns declared, `merge` selects
/// between updating the existing row from the proposed one (`true`) and
/// keeping the existing row (`false`); the two dialects express both cases
/// differently and not quite symmetrically.
#[derive(Clone, Debug, Default)]
pub struct InsertQuery {
    pub table_name: String,
    pub columns_names: Vec<String>,
    pub unique_columns_names: Vec<String>,
    pub merge: bool,
}

impl InsertQuery {
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

    pub fn with_unique_columns<I, S>(mut self, unique_columns_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.unique_columns_names = unique_columns_names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }
}

/// Description of an INSERT that must report the inserted rows back
#[derive(Clone, Debug, Default)]
pub struct InsertReturningQuery {
    pub insert: InsertQuery,
    pub returning_columns_names: Vec<String>,
}

impl InsertReturningQuery {
    pub fn new<I, S>(insert: InsertQuery, returning_columns_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            insert,
            returning_columns_names: returning_columns_names
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

/// How a dialect reports inserted rows back to the caller
///
/// Postgres appends `RETURNING` to the insert itself. MySQL has no equivalent,
/// so the plan spells out the statement sequence the facade must run: the
/// plain insert per record, then the key-recovery query; the final projection
/// is built once the recovered keys are known. The sequence is not atomic on
/// its own, so callers needing atomicity wrap the whole plan in an externally
/// managed transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReturningPlan {
    Native {
        sql: String,
    },
    Emulated {
        insert_sql: String,
        keys_sql: String,
        primary_key: String,
    },
}
