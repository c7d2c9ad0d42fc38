//! # oxide-query
//!
//! A query compiler that turns a structured, dialect-agnostic SELECT tree
//! into parameterized SQL plus an ordered list of bound values.
//!
//! This crate provides:
//! - A clause store that keeps every clause tagged with its component, in
//!   insertion order
//! - Deep joins: shorthand relationship paths (`"author.company"`) expanded
//!   into explicit join chains with inferred keys
//! - A recursive condition compiler shared by WHERE, HAVING and JOIN ... ON
//! - Pluggable [`Dialect`]s for quoting, functions, set operations and
//!   locking
//!
//! ## Compiling a query
//!
//! ```rust
//! use oxide_query::{Compiler, Query, SqlValue};
//!
//! let mut query = Query::new().from("users").filter("id", "=", 1).limit(10);
//! let result = Compiler::default().compile(&mut query).unwrap();
//!
//! assert_eq!(result.sql, "SELECT * FROM users WHERE id = ? LIMIT ?");
//! assert_eq!(result.bindings, vec![SqlValue::Int(1), SqlValue::Int(10)]);
//! ```
//!
//! ## Deep joins
//!
//! Keys are inferred from the singular form of each path segment:
//!
//! ```rust
//! use oxide_query::{Compiler, PostgresDialect, Query};
//!
//! let mut query = Query::new().from("posts").deep_join("authors.companies");
//! let result = Compiler::new(PostgresDialect::new()).compile(&mut query).unwrap();
//!
//! assert_eq!(
//!     result.sql,
//!     concat!(
//!         r#"SELECT * FROM "posts" "#,
//!         r#"INNER JOIN "authors" ON "posts"."authorId" = "authors"."Id" "#,
//!         r#"INNER JOIN "companies" ON "authors"."companyId" = "companies"."Id""#,
//!     )
//! );
//! ```
//!
//! ## SQL Injection Prevention
//!
//! Values never reach the SQL text; they are returned as bindings:
//!
//! ```rust
//! use oxide_query::{Compiler, Query, SqlValue};
//!
//! let user_input = "'; DROP TABLE users; --";
//! let mut query = Query::new().from("users").select(&["id"]).filter("name", "=", user_input);
//! let result = Compiler::default().compile(&mut query).unwrap();
//!
//! assert_eq!(result.sql, "SELECT id FROM users WHERE name = ?");
//! assert_eq!(result.bindings, vec![SqlValue::Text(user_input.to_string())]);
//! ```

pub mod compiler;
pub mod config;
pub mod dialect;
pub mod error;
pub mod expander;
pub mod inflector;
pub mod query;
pub mod value;

pub use compiler::{CompileContext, Compiler, ConditionHandler, ConditionRegistry, SqlResult};
pub use config::{CompilerConfig, DeepJoinConfig, DialectKind};
pub use dialect::{Dialect, GenericDialect, MysqlDialect, PostgresDialect};
pub use error::{CompileError, Result};
pub use expander::DeepJoinExpander;
pub use inflector::{EnglishInflector, Inflector};
pub use query::{Condition, ConditionNode, DeepJoin, Join, JoinType, Query};
pub use value::{SqlValue, ToSqlValue};
