//! Filter tree compilation properties

use duosql::queries::filters::{Filter, LogicalOperator, Operand, PredicateOperator};
use duosql::SqlValue;

#[test]
fn comparison_predicates_contain_column_operator_and_value() {
    let cases = vec![
        (PredicateOperator::Eq, SqlValue::Int(3), "3"),
        (PredicateOperator::Ne, SqlValue::Int(-1), "-1"),
        (PredicateOperator::Lt, SqlValue::Float(1.5), "1.5"),
        (PredicateOperator::Gt, SqlValue::Bool(true), "1"),
        (PredicateOperator::Le, SqlValue::Int(10), "10"),
        (PredicateOperator::Ge, SqlValue::Int(0), "0"),
        (
            PredicateOperator::Like,
            SqlValue::Text("a%".to_string()),
            "'a%'",
        ),
        (
            PredicateOperator::NotLike,
            SqlValue::Text("b_".to_string()),
            "'b_'",
        ),
        (PredicateOperator::Is, SqlValue::Null, "NULL"),
        (PredicateOperator::IsNot, SqlValue::Null, "NULL"),
    ];

    for (operator, value, literal) in cases {
        let filter = Filter::Predicate {
            operator,
            column: "payload".to_string(),
            operand: Operand::Value(value),
        };
        let sql = filter.to_sql();
        assert!(sql.contains("payload"), "missing column in: {}", sql);
        assert!(
            sql.contains(operator.sql_keyword()),
            "missing operator in: {}",
            sql
        );
        assert!(sql.contains(literal), "missing value in: {}", sql);
    }
}

#[test]
fn inclusion_filters_contain_every_element() {
    let filter = Filter::is_in("id", vec![1, 2, 3]);
    let sql = filter.to_sql();
    for literal in ["1", "2", "3"] {
        assert!(sql.contains(literal), "missing {} in: {}", literal, sql);
    }
    assert_eq!(sql, "id IN (1, 2, 3)");

    let filter = Filter::not_in("name", vec!["ann", "bob"]);
    let sql = filter.to_sql();
    assert!(sql.contains("'ann'"));
    assert!(sql.contains("'bob'"));
    assert_eq!(sql, "name NOT IN ('ann', 'bob')");
}

#[test]
fn range_filters_join_endpoints_with_and() {
    let sql = Filter::between("id", 1, 10).to_sql();
    assert!(sql.contains('1'));
    assert!(sql.contains("10"));
    assert!(sql.contains(" AND "));
    assert_eq!(sql, "id BETWEEN 1 AND 10");
}

#[test]
fn logical_filters_embed_parenthesized_children() {
    let children = vec![
        Filter::eq("a", 1),
        Filter::between("b", 2, 3),
        Filter::is_in("c", vec!["x", "y"]),
    ];
    for operator in [LogicalOperator::And, LogicalOperator::Or] {
        let parent = Filter::Logical {
            operator,
            filters: children.clone(),
        };
        let sql = parent.to_sql();
        assert!(sql.contains(operator.sql_keyword()));
        for child in &children {
            let wrapped = format!("({})", child.to_sql());
            assert!(sql.contains(&wrapped), "missing {} in: {}", wrapped, sql);
        }
    }
}

#[test]
fn nested_logical_filters_compile_recursively() {
    let inner = Filter::or(vec![Filter::eq("x", 1), Filter::eq("x", 2)]);
    let outer = Filter::and(vec![inner.clone(), Filter::is_not_null("y")]);
    let sql = outer.to_sql();
    assert_eq!(sql, "((x = 1)OR(x = 2))AND(y IS NOT NULL)");
    assert!(sql.contains(&format!("({})", inner.to_sql())));
}

#[test]
fn text_values_are_escaped_inside_filters() {
    let sql = Filter::eq("name", "o'brien").to_sql();
    assert_eq!(sql, "name = 'o''brien'");
}
