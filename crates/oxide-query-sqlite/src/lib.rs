//! # oxide-query-sqlite
//!
//! SQLite dialect for `oxide-query`.
//!
//! # How SQLite differs from other dialects
//!
//! - **Identifier quoting**: SQLite uses double quotes (`"`) as the
//!   standard quoting style, though it also accepts backticks and square
//!   brackets. See [SQLite keywords].
//! - **[Compound SELECT]**: the operands of `UNION`, `INTERSECT` and
//!   `EXCEPT` may not be parenthesized.
//! - **No row locking**: SQLite locks whole databases, so `FOR UPDATE` and
//!   `FOR SHARE` are never emitted.
//!
//! [SQLite keywords]: https://www.sqlite.org/lang_keywords.html
//! [Compound SELECT]: https://www.sqlite.org/lang_select.html#compound_select_statements
//!
//! ## Example
//!
//! ```rust
//! use oxide_query::{Compiler, Query};
//! use oxide_query_sqlite::SqliteDialect;
//!
//! let mut query = Query::new()
//!     .from("active_users")
//!     .union(Query::new().from("archived_users"));
//! let result = Compiler::new(SqliteDialect::new()).compile(&mut query).unwrap();
//!
//! assert_eq!(
//!     result.sql,
//!     r#"SELECT * FROM "active_users" UNION SELECT * FROM "archived_users""#
//! );
//! ```

mod dialect;

pub use dialect::SqliteDialect;
