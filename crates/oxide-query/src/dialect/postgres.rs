//! PostgreSQL dialect.

use super::{standard_lock, Dialect};
use crate::compiler::placeholder::{replace_placeholders, Placeholder};
use crate::compiler::{CompileContext, Compiler};
use crate::error::Result;
use crate::query::{Lock, Query};
use crate::value::SqlValue;

/// PostgreSQL dialect.
///
/// Placeholders are numbered (`$1`, `$2`, ...) after compilation.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn identifier_quote(&self) -> Option<char> {
        Some('"')
    }

    fn compile_unions(
        &self,
        compiler: &Compiler,
        ctx: &mut CompileContext,
        query: &Query,
    ) -> Result<Option<String>> {
        compiler.compile_combines(ctx, query, true)
    }

    fn compile_lock(&self, lock: &Lock) -> Option<String> {
        Some(standard_lock(lock))
    }

    fn after_compile(&self, sql: String, _bindings: &[SqlValue]) -> String {
        replace_placeholders(&sql, |placeholder| match placeholder {
            Placeholder::Positional(n) => Some(format!("${n}")),
            Placeholder::Numbered(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_dialect() {
        let dialect = PostgresDialect::new();
        assert_eq!(dialect.name(), "postgres");
        assert_eq!(dialect.wrap("public.users"), r#""public"."users""#);
        assert_eq!(dialect.compile_lower("\"name\""), "LOWER(\"name\")");
    }

    #[test]
    fn test_placeholders_are_numbered() {
        let sql = PostgresDialect.after_compile(String::from("a = ? AND b IN (?, ?)"), &[]);
        assert_eq!(sql, "a = $1 AND b IN ($2, $3)");
    }

    #[test]
    fn test_quoted_question_marks_are_not_numbered() {
        let sql = PostgresDialect.after_compile(
            String::from(r#"SELECT "is_ok?" FROM "t" WHERE "a" = ? AND "b" <> '?'"#),
            &[],
        );
        assert_eq!(sql, r#"SELECT "is_ok?" FROM "t" WHERE "a" = $1 AND "b" <> '?'"#);
    }
}
