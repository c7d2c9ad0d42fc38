//! SQLite dialect implementation.

use oxide_query::dialect::Dialect;
use oxide_query::query::Query;
use oxide_query::{CompileContext, Compiler, Result};

/// SQLite dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn identifier_quote(&self) -> Option<char> {
        Some('"') // SQLite also accepts backticks, but double quotes are standard
    }

    fn compile_unions(
        &self,
        compiler: &Compiler,
        ctx: &mut CompileContext,
        query: &Query,
    ) -> Result<Option<String>> {
        compiler.compile_combines(ctx, query, false)
    }
}
