mod common;

use common::{compile, compile_in, compile_with, ints};
use oxide_query::query::{LockStrength, TextOperator};
use oxide_query::{
    Compiler, CompilerConfig, Condition, Dialect, DialectKind, MysqlDialect, PostgresDialect,
    Query, SqlValue,
};

#[test]
fn test_postgres_numbers_placeholders() {
    let result = compile_in(
        PostgresDialect::new(),
        Query::new()
            .from("users")
            .where_clause(Condition::text("name", TextOperator::StartsWith, "Al", false))
            .filter("age", ">=", 21)
            .limit(10)
            .offset(20),
    );
    assert_eq!(
        result.sql,
        r#"SELECT * FROM "users" WHERE LOWER("name") LIKE $1 AND "age" >= $2 LIMIT $3 OFFSET $4"#
    );
    assert_eq!(
        result.bindings,
        vec![
            SqlValue::Text(String::from("al%")),
            SqlValue::Int(21),
            SqlValue::Int(10),
            SqlValue::Int(20),
        ]
    );
}

#[test]
fn test_postgres_union_and_lock() {
    let result = compile_in(
        PostgresDialect::new(),
        Query::new()
            .from("a")
            .filter("x", "=", 1)
            .union(Query::new().from("b").filter("y", "=", 2))
            .lock(LockStrength::Update, false),
    );
    assert_eq!(
        result.sql,
        r#"SELECT * FROM "a" WHERE "x" = $1 UNION (SELECT * FROM "b" WHERE "y" = $2) FOR UPDATE"#
    );
    assert_eq!(result.bindings, ints(&[1, 2]));
}

#[test]
fn test_postgres_quotes_aggregate_alias() {
    let result = compile_in(PostgresDialect::new(), Query::new().from("users").count());
    assert_eq!(result.sql, r#"SELECT COUNT(*) AS "count" FROM "users""#);
}

#[test]
fn test_mysql_random_and_lock() {
    let result = compile_in(
        MysqlDialect::new(),
        Query::new()
            .from("tips")
            .select(&["tips.body"])
            .order_by_random(Some("42"))
            .limit(1)
            .lock(LockStrength::Share, true),
    );
    assert_eq!(
        result.sql,
        "SELECT `tips`.`body` FROM `tips` ORDER BY RAND(42) LIMIT ? FOR SHARE NOWAIT"
    );
}

#[test]
fn test_generic_ignores_unions_and_lock() {
    let result = compile(
        Query::new()
            .from("a")
            .union_all(Query::new().from("b"))
            .lock(LockStrength::Update, true),
    );
    assert_eq!(result.sql, "SELECT * FROM a");
}

#[test]
fn test_dialect_from_config() {
    let config = CompilerConfig::from_json(r#"{ "dialect": "mysql" }"#).unwrap();
    assert_eq!(config.dialect, DialectKind::Mysql);
    let compiler = Compiler::from_config(&config);
    assert_eq!(compiler.dialect().name(), "mysql");

    let result = compile_with(&compiler, Query::new().from("users").filter("id", "=", 1));
    assert_eq!(result.sql, "SELECT * FROM `users` WHERE `id` = ?");
}

#[test]
fn test_unknown_dialect_in_config() {
    assert!(CompilerConfig::from_json(r#"{ "dialect": "oracle" }"#).is_err());
}

#[test]
fn test_custom_after_compile_hook() {
    #[derive(Debug)]
    struct Commented;

    impl Dialect for Commented {
        fn name(&self) -> &'static str {
            "commented"
        }

        fn after_compile(&self, sql: String, bindings: &[SqlValue]) -> String {
            format!("{sql} /* {} binding(s) */", bindings.len())
        }
    }

    let result = compile_in(Commented, Query::new().from("t").filter("a", "=", 1));
    assert_eq!(result.sql, "SELECT * FROM t WHERE a = ? /* 1 binding(s) */");
}

#[test]
fn test_postgres_question_mark_in_identifier() {
    let result = compile_in(
        PostgresDialect::new(),
        Query::new().from("t").select(&["is_ok?"]).filter("a", "=", 1),
    );
    assert_eq!(result.sql, r#"SELECT "is_ok?" FROM "t" WHERE "a" = $1"#);
    assert_eq!(result.bindings, ints(&[1]));
}

#[test]
fn test_generic_question_mark_in_identifier() {
    let result = compile(
        Query::new()
            .from("t")
            .where_clause(Condition::columns("a", "=", "b?"))
            .filter("c", "=", 1),
    );
    assert_eq!(result.sql, r#"SELECT * FROM t WHERE a = "b?" AND c = ?"#);
    assert_eq!(result.bindings, ints(&[1]));
}

#[test]
fn test_postgres_inline_sql() {
    let result = compile_in(
        PostgresDialect::new(),
        Query::new().from("users").filter("id", "=", 1).filter("name", "=", "Ann"),
    );
    assert_eq!(
        result.sql,
        r#"SELECT * FROM "users" WHERE "id" = $1 AND "name" = $2"#
    );
    assert_eq!(
        result.to_inline_sql(),
        r#"SELECT * FROM "users" WHERE "id" = 1 AND "name" = 'Ann'"#
    );
}
