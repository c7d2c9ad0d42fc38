//! SQL dialect support.
//!
//! A [`Dialect`] is the strategy the compiler consults for everything that
//! differs between databases: identifier quoting, function spelling, set
//! operations, row locking and final placeholder style. The compiler owns
//! one as `Arc<dyn Dialect>`; adding a database means adding a type, not
//! touching the compiler.

mod generic;
mod mysql;
mod postgres;

pub use generic::GenericDialect;
pub use mysql::MysqlDialect;
pub use postgres::PostgresDialect;

use std::fmt::Debug;

use crate::compiler::{CompileContext, Compiler};
use crate::error::Result;
use crate::query::clause::split_alias;
use crate::query::{Lock, LockStrength, Query};
use crate::value::SqlValue;

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: Debug + Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quote character, or `None` to leave
    /// identifiers bare.
    fn identifier_quote(&self) -> Option<char> {
        None
    }

    /// Wraps an identifier that may be qualified (`a.b`) or aliased
    /// (`a as b`).
    fn wrap(&self, identifier: &str) -> String {
        let (expr, alias) = split_alias(identifier.trim());
        let wrapped = expr
            .split('.')
            .map(|part| self.wrap_value(part.trim()))
            .collect::<Vec<_>>()
            .join(".");
        match alias {
            Some(alias) => format!("{wrapped} AS {}", self.wrap_value(alias)),
            None => wrapped,
        }
    }

    /// Wraps a table name.
    fn wrap_table(&self, name: &str) -> String {
        self.wrap(name)
    }

    /// Quotes a single identifier segment. `*` is never quoted.
    ///
    /// Without a dialect quote, plain words stay bare and anything else
    /// gets ANSI double quotes, so no identifier can emit a placeholder.
    fn wrap_value(&self, value: &str) -> String {
        if value == "*" {
            return String::from("*");
        }
        match self.identifier_quote() {
            Some(quote) => quote_identifier(value, quote),
            None if is_plain_identifier(value) => String::from(value),
            None => quote_identifier(value, '"'),
        }
    }

    /// Wraps and comma-joins a column list. An empty list is `*`.
    fn columnize(&self, columns: &[String]) -> String {
        if columns.is_empty() {
            return String::from("*");
        }
        columns
            .iter()
            .map(|c| self.wrap(c))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Random ordering expression.
    fn compile_random(&self, _seed: Option<&str>) -> String {
        String::from("RANDOM()")
    }

    /// Lower-cases an expression.
    fn compile_lower(&self, expr: &str) -> String {
        format!("LOWER({expr})")
    }

    /// Upper-cases an expression.
    fn compile_upper(&self, expr: &str) -> String {
        format!("UPPER({expr})")
    }

    /// Set operations. Emits nothing unless the dialect opts in.
    fn compile_unions(
        &self,
        _compiler: &Compiler,
        _ctx: &mut CompileContext,
        _query: &Query,
    ) -> Result<Option<String>> {
        Ok(None)
    }

    /// Row locking. Emits nothing unless the dialect opts in.
    fn compile_lock(&self, _lock: &Lock) -> Option<String> {
        None
    }

    /// Runs before any component is compiled. Expands deep joins.
    fn before_compile(&self, compiler: &Compiler, query: &mut Query) -> Result<()> {
        compiler.expander().expand(query)
    }

    /// Post-processes the final text.
    fn after_compile(&self, sql: String, _bindings: &[SqlValue]) -> String {
        sql
    }
}

fn quote_identifier(value: &str, quote: char) -> String {
    let escaped = value.replace(quote, &format!("{quote}{quote}"));
    format!("{quote}{escaped}{quote}")
}

fn is_plain_identifier(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// `FOR UPDATE` / `FOR SHARE` with optional `NOWAIT`.
pub(crate) fn standard_lock(lock: &Lock) -> String {
    let mut sql = String::from(match lock.strength {
        LockStrength::Update => "FOR UPDATE",
        LockStrength::Share => "FOR SHARE",
    });
    if lock.nowait {
        sql.push_str(" NOWAIT");
    }
    sql
}
