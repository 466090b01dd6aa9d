//! Generated SQL text is a compatibility contract: clause order, keyword
//! casing and spacing are asserted exactly, per dialect.

use duosql::queries::dialects::mysql::MYSQL_MAX_BIGINT;
use duosql::{
    create_dialect, DatabaseBackend, Error, Filter, GroupWiseQuery, InsertQuery,
    InsertReturningQuery, Ordering, ReturningPlan, SelectQuery, SqlDialect, SqlValue, Updates,
};

fn mysql() -> Box<dyn SqlDialect> {
    create_dialect(DatabaseBackend::MySql)
}

fn postgres() -> Box<dyn SqlDialect> {
    create_dialect(DatabaseBackend::Postgres)
}

#[test]
fn select_text_is_identical_across_dialects() {
    let query = SelectQuery::new("users", vec!["id", "name"])
        .with_filters(Filter::gt("id", 5))
        .with_orderings(vec![Ordering::asc("id")])
        .with_limit(10)
        .with_offset(20);

    let expected = "SELECT id, name FROM users WHERE id > 5 ORDER BY id ASC LIMIT 10 OFFSET 20 ";
    assert_eq!(mysql().generate_select(&query).unwrap(), expected);
    assert_eq!(postgres().generate_select(&query).unwrap(), expected);
}

#[test]
fn mysql_group_wise_uses_self_join() {
    let query = GroupWiseQuery::new(
        "events",
        vec!["id", "category", "score"],
        "id",
        vec!["category"],
    )
    .with_orderings(vec![Ordering::desc("id")]);

    let sql = mysql().generate_group_wise_select(&query).unwrap();
    assert_eq!(
        sql,
        "SELECT id, category, score FROM events \
         JOIN (SELECT category, MAX(id) AS id FROM events GROUP BY category ) as subquery \
         USING (category, id) ORDER BY id DESC "
    );
}

#[test]
fn mysql_group_wise_binds_filters_and_pagination_to_inner_query() {
    let query = GroupWiseQuery::new("events", vec!["id", "category"], "id", vec!["category"])
        .with_filters(Filter::eq("category", "a"))
        .with_limit(5);

    let sql = mysql().generate_group_wise_select(&query).unwrap();
    assert_eq!(
        sql,
        "SELECT id, category FROM events \
         JOIN (SELECT category, MAX(id) AS id FROM events WHERE category = 'a' LIMIT 5 \
         GROUP BY category ) as subquery USING (category, id) "
    );
}

#[test]
fn mysql_group_wise_minimum_uses_min() {
    let query =
        GroupWiseQuery::new("events", vec!["id", "category"], "id", vec!["category"]).minimum();
    let sql = mysql().generate_group_wise_select(&query).unwrap();
    assert!(sql.contains("MIN(id) AS id"));
    assert!(!sql.contains("MAX"));
}

#[test]
fn postgres_group_wise_uses_distinct_on() {
    let query = GroupWiseQuery::new(
        "events",
        vec!["id", "category", "score"],
        "id",
        vec!["category"],
    )
    .with_orderings(vec![Ordering::desc("id")])
    .with_limit(3);

    let sql = postgres().generate_group_wise_select(&query).unwrap();
    assert_eq!(
        sql,
        "SELECT id, category, score FROM \
         (SELECT DISTINCT ON (category) * FROM events ORDER BY category ASC, id DESC ) \
         AS subquery ORDER BY id DESC LIMIT 3 "
    );
}

#[test]
fn postgres_group_wise_minimum_orders_target_ascending() {
    let query = GroupWiseQuery::new("events", vec!["id"], "id", vec!["category"]).minimum();
    let sql = postgres().generate_group_wise_select(&query).unwrap();
    assert!(sql.contains("ORDER BY category ASC, id ASC "));
}

#[test]
fn group_wise_results_project_the_same_columns_on_both_dialects() {
    let query = GroupWiseQuery::new("events", vec!["id", "category"], "id", vec!["category"]);
    for dialect in [mysql(), postgres()] {
        let sql = dialect.generate_group_wise_select(&query).unwrap();
        assert!(sql.starts_with("SELECT id, category FROM "));
    }
}

#[test]
fn plain_insert_uses_dialect_placeholders() {
    let query = InsertQuery::new("items", vec!["id", "val"]);
    assert_eq!(
        mysql().generate_insert(&query).unwrap(),
        "INSERT INTO items (id, val) VALUES (?, ?) "
    );
    assert_eq!(
        postgres().generate_insert(&query).unwrap(),
        "INSERT INTO items (id, val) VALUES ($1, $2) "
    );
}

#[test]
fn mysql_upsert_without_merge_still_issues_an_update() {
    // The non-merge path reassigns every column from the proposed row via
    // VALUES(), routing conflicts through duplicate-key handling.
    let query = InsertQuery::new("items", vec!["id", "val"]).with_unique_columns(vec!["id"]);
    assert_eq!(
        mysql().generate_insert(&query).unwrap(),
        "INSERT INTO items (id, val) VALUES (?, ?) \
         ON DUPLICATE KEY UPDATE id = VALUES(id), val = VALUES(val) "
    );
}

#[test]
fn mysql_upsert_with_merge_reassigns_unique_columns() {
    let query = InsertQuery::new("items", vec!["id", "val"])
        .with_unique_columns(vec!["id"])
        .with_merge(true);
    assert_eq!(
        mysql().generate_insert(&query).unwrap(),
        "INSERT INTO items (id, val) VALUES (?, ?) ON DUPLICATE KEY UPDATE id = VALUES(id) "
    );
}

#[test]
fn postgres_upsert_without_merge_does_nothing() {
    let query = InsertQuery::new("items", vec!["id", "val"]).with_unique_columns(vec!["id"]);
    assert_eq!(
        postgres().generate_insert(&query).unwrap(),
        "INSERT INTO items (id, val) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING "
    );
}

#[test]
fn postgres_upsert_with_merge_updates_from_excluded() {
    let query = InsertQuery::new("items", vec!["id", "val"])
        .with_unique_columns(vec!["id"])
        .with_merge(true);
    assert_eq!(
        postgres().generate_insert(&query).unwrap(),
        "INSERT INTO items (id, val) VALUES ($1, $2) \
         ON CONFLICT (id) DO UPDATE SET id = EXCLUDED.id, val = EXCLUDED.val "
    );
}

#[test]
fn postgres_insert_returning_is_a_single_statement() {
    let query = InsertReturningQuery::new(
        InsertQuery::new("items", vec!["id", "val"]),
        vec!["id", "val"],
    );
    let plan = postgres().generate_insert_returning(&query).unwrap();
    assert_eq!(
        plan,
        ReturningPlan::Native {
            sql: "INSERT INTO items (id, val) VALUES ($1, $2) RETURNING id, val".to_string(),
        }
    );
}

#[test]
fn mysql_insert_returning_plans_the_emulation() {
    let query = InsertReturningQuery::new(
        InsertQuery::new("items", vec!["id", "val"]).with_unique_columns(vec!["id"]),
        vec!["id", "val"],
    );
    let plan = mysql().generate_insert_returning(&query).unwrap();
    assert_eq!(
        plan,
        ReturningPlan::Emulated {
            insert_sql: "INSERT INTO items (id, val) VALUES (?, ?) \
                         ON DUPLICATE KEY UPDATE id = VALUES(id), val = VALUES(val) "
                .to_string(),
            keys_sql: "SELECT LAST_INSERT_ID(id) FROM items".to_string(),
            primary_key: "id".to_string(),
        }
    );
}

#[test]
fn mysql_insert_returning_requires_a_unique_column() {
    let query = InsertReturningQuery::new(
        InsertQuery::new("items", vec!["id", "val"]),
        vec!["id", "val"],
    );
    assert!(matches!(
        mysql().generate_insert_returning(&query),
        Err(Error::MissingPrimaryKey)
    ));
}

#[test]
fn update_and_delete_text() {
    let mut updates = Updates::new();
    updates.insert("val".to_string(), SqlValue::from("b"));
    for dialect in [mysql(), postgres()] {
        assert_eq!(
            dialect.generate_update("items", &updates, Some(&Filter::eq("id", 1))),
            "UPDATE items SET val = 'b' WHERE id = 1 "
        );
        assert_eq!(
            dialect.generate_delete("items", None),
            "DELETE FROM items "
        );
    }
}

#[test]
fn pagination_normalization_differs_per_dialect() {
    assert_eq!(
        mysql().normalize_pagination(None, Some(5)),
        (Some(MYSQL_MAX_BIGINT), Some(5))
    );
    assert_eq!(MYSQL_MAX_BIGINT, u64::MAX);
    assert_eq!(
        postgres().normalize_pagination(None, Some(5)),
        (None, Some(5))
    );
}

#[test]
fn empty_columns_are_rejected_by_both_dialects() {
    let query = SelectQuery::new("users", Vec::<String>::new());
    for dialect in [mysql(), postgres()] {
        assert!(matches!(
            dialect.generate_select(&query),
            Err(Error::EmptyQueryParameter {
                parameter: "columns_names"
            })
        ));
    }
}

#[test]
fn empty_groupings_are_rejected() {
    let query = GroupWiseQuery::new("events", vec!["id"], "id", Vec::<String>::new());
    for dialect in [mysql(), postgres()] {
        assert!(matches!(
            dialect.generate_group_wise_select(&query),
            Err(Error::EmptyQueryParameter {
                parameter: "groupings"
            })
        ));
    }
}

#[test]
fn empty_returning_columns_are_rejected() {
    let query = InsertReturningQuery::new(
        InsertQuery::new("items", vec!["id"]).with_unique_columns(vec!["id"]),
        Vec::<String>::new(),
    );
    for dialect in [mysql(), postgres()] {
        assert!(matches!(
            dialect.generate_insert_returning(&query),
            Err(Error::EmptyQueryParameter {
                parameter: "returning_columns_names"
            })
        ));
    }
}
