//! Filter expression trees and their compilation to SQL boolean expressions
//!
//! A filter is either a logical node combining sub-filters with AND/OR, or a
//! predicate over a single column. Compilation renders parenthesized children
//! joined by the bare operator keyword, so `a AND b` compiles to `(a)AND(b)`.

use crate::database::value::SqlValue;

/// Logical combinator for filter trees
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogicalOperator {
    And,
    Or,
}

impl LogicalOperator {
    pub fn sql_keyword(&self) -> &'static str {
        match self {
            LogicalOperator::And => "AND",
            LogicalOperator::Or => "OR",
        }
    }
}

/// Predicate operator over a single column
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PredicateOperator {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Is,
    IsNot,
    Like,
    NotLike,
    In,
    NotIn,
    Between,
}

impl PredicateOperator {
    pub fn sql_keyword(&self) -> &'static str {
        match self {
            PredicateOperator::Eq => "=",
            PredicateOperator::Ne => "!=",
            PredicateOperator::Lt => "<",
            PredicateOperator::Gt => ">",
            PredicateOperator::Le => "<=",
            PredicateOperator::Ge => ">=",
            PredicateOperator::Is => "IS",
            PredicateOperator::IsNot => "IS NOT",
            PredicateOperator::Like => "LIKE",
            PredicateOperator::NotLike => "NOT LIKE",
            PredicateOperator::In => "IN",
            PredicateOperator::NotIn => "NOT IN",
            PredicateOperator::Between => "BETWEEN",
        }
    }

    /// IN / NOT IN take a list operand rendered as `(v1, v2, ...)`
    pub fn is_inclusion(&self) -> bool {
        matches!(self, PredicateOperator::In | PredicateOperator::NotIn)
    }

    /// BETWEEN takes a two-value operand rendered as `low AND high`
    pub fn is_range(&self) -> bool {
        matches!(self, PredicateOperator::Between)
    }
}

/// Operand of a predicate node
///
/// The shape is expected to match the operator class (single value for
/// comparisons, list for inclusion, pair for ranges). Mismatches are not
/// validated here; they compile to malformed SQL and fail at execution.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Value(SqlValue),
    Values(Vec<SqlValue>),
    Range(SqlValue, SqlValue),
}

impl Operand {
    fn literals(&self) -> Vec<String> {
        match self {
            Operand::Value(value) => vec![value.to_sql_literal()],
            Operand::Values(values) => values.iter().map(SqlValue::to_sql_literal).collect(),
            Operand::Range(low, high) => vec![low.to_sql_literal(), high.to_sql_literal()],
        }
    }
}

/// A backend-neutral filter expression
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    Logical {
        operator: LogicalOperator,
        filters: Vec<Filter>,
    },
    Predicate {
        operator: PredicateOperator,
        column: String,
        operand: Operand,
    },
}

impl Filter {
    /// Combine filters with AND
    pub fn and(filters: Vec<Filter>) -> Self {
        Filter::Logical {
            operator: LogicalOperator::And,
            filters,
        }
    }

    /// Combine filters with OR
    pub fn or(filters: Vec<Filter>) -> Self {
        Filter::Logical {
            operator: LogicalOperator::Or,
            filters,
        }
    }

    fn comparison<V: Into<SqlValue>>(
        operator: PredicateOperator,
        column: impl Into<String>,
        value: V,
    ) -> Self {
        Filter::Predicate {
            operator,
            column: column.into(),
            operand: Operand::Value(value.into()),
        }
    }

    /// `column = value`
    pub fn eq<V: Into<SqlValue>>(column: impl Into<String>, value: V) -> Self {
        Self::comparison(PredicateOperator::Eq, column, value)
    }

    /// `column != value`
    pub fn ne<V: Into<SqlValue>>(column: impl Into<String>, value: V) -> Self {
        Self::comparison(PredicateOperator::Ne, column, value)
    }

    /// `column < value`
    pub fn lt<V: Into<SqlValue>>(column: impl Into<String>, value: V) -> Self {
        Self::comparison(PredicateOperator::Lt, column, value)
    }

    /// `column > value`
    pub fn gt<V: Into<SqlValue>>(column: impl Into<String>, value: V) -> Self {
        Self::comparison(PredicateOperator::Gt, column, value)
    }

    /// `column <= value`
    pub fn le<V: Into<SqlValue>>(column: impl Into<String>, value: V) -> Self {
        Self::comparison(PredicateOperator::Le, column, value)
    }

    /// `column >= value`
    pub fn ge<V: Into<SqlValue>>(column: impl Into<String>, value: V) -> Self {
        Self::comparison(PredicateOperator::Ge, column, value)
    }

    /// `column LIKE pattern`
    pub fn like(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::comparison(PredicateOperator::Like, column, pattern.into())
    }

    /// `column NOT LIKE pattern`
    pub fn not_like(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::comparison(PredicateOperator::NotLike, column, pattern.into())
    }

    /// `column IS NULL`
    pub fn is_null(column: impl Into<String>) -> Self {
        Self::comparison(PredicateOperator::Is, column, SqlValue::Null)
    }

    /// `column IS NOT NULL`
    pub fn is_not_null(column: impl Into<String>) -> Self {
        Self::comparison(PredicateOperator::IsNot, column, SqlValue::Null)
    }

    /// `column IN (values)`
    pub fn is_in<V: Into<SqlValue>>(column: impl Into<String>, values: Vec<V>) -> Self {
        Filter::Predicate {
            operator: PredicateOperator::In,
            column: column.into(),
            operand: Operand::Values(values.into_iter().map(Into::into).collect()),
        }
    }

    /// `column NOT IN (values)`
    pub fn not_in<V: Into<SqlValue>>(column: impl Into<String>, values: Vec<V>) -> Self {
        Filter::Predicate {
            operator: PredicateOperator::NotIn,
            column: column.into(),
            operand: Operand::Values(values.into_iter().map(Into::into).collect()),
        }
    }

    /// `column BETWEEN low AND high`
    pub fn between<V: Into<SqlValue>>(column: impl Into<String>, low: V, high: V) -> Self {
        Filter::Predicate {
            operator: PredicateOperator::Between,
            column: column.into(),
            operand: Operand::Range(low.into(), high.into()),
        }
    }

    /// Compile this filter into a SQL boolean expression
    pub fn to_sql(&self) -> String {
        match self {
            Filter::Logical { operator, filters } => filters
                .iter()
                .map(|filter| format!("({})", filter.to_sql()))
                .collect::<Vec<_>>()
                .join(operator.sql_keyword()),
            Filter::Predicate {
                operator,
                column,
                operand,
            } => {
                let literals = operand.literals();
                let rendered = if operator.is_inclusion() {
                    format!("({})", literals.join(", "))
                } else if operator.is_range() {
                    literals.join(" AND ")
                } else {
                    literals.join(", ")
                };
                format!("{} {} {}", column, operator.sql_keyword(), rendered)
            }
        }
    }
}
