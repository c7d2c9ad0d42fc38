//! MySQL dialect.

use super::{standard_lock, Dialect};
use crate::compiler::{CompileContext, Compiler};
use crate::error::Result;
use crate::query::{Lock, Query};

/// MySQL / MariaDB dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct MysqlDialect;

impl MysqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MysqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn identifier_quote(&self) -> Option<char> {
        Some('`')
    }

    fn compile_random(&self, seed: Option<&str>) -> String {
        format!("RAND({})", seed.unwrap_or_default())
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mysql_dialect() {
        let dialect = MysqlDialect::new();
        assert_eq!(dialect.name(), "mysql");
        assert_eq!(dialect.wrap("users.id"), "`users`.`id`");
        assert_eq!(dialect.wrap_value("we`ird"), "`we``ird`");
        assert_eq!(dialect.compile_random(None), "RAND()");
        assert_eq!(dialect.compile_random(Some("7")), "RAND(7)");
    }
}
