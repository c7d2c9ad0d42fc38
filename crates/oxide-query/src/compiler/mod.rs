//! Query compilation.
//!
//! [`Compiler::compile`] runs the dialect's `before_compile` hook (deep-join
//! expansion by default), walks the components in their fixed order and
//! hands the joined text to the dialect's `after_compile` hook. Bindings are
//! collected in a [`CompileContext`] in exactly the order their placeholders
//! are emitted, across the whole statement.

mod components;
mod conditions;
pub mod placeholder;
pub mod registry;

pub use registry::{ConditionHandler, ConditionRegistry};

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::config::{CompilerConfig, DeepJoinConfig};
use crate::dialect::{Dialect, GenericDialect};
use crate::error::{CompileError, Result};
use crate::expander::DeepJoinExpander;
use crate::inflector::Inflector;
use crate::query::Query;
use crate::value::SqlValue;
use placeholder::{count_positional, replace_placeholders};

/// Compiled SQL text and its positional bindings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SqlResult {
    /// Statement text with `?` placeholders, or the dialect's own style.
    pub sql: String,
    /// Values for the placeholders, in order.
    pub bindings: Vec<SqlValue>,
}

impl SqlResult {
    /// Returns the text with every placeholder replaced by its inlined
    /// binding. Both `?` and numbered `$n` placeholders are recognized.
    ///
    /// **Warning**: For logs and debugging only. Execute `sql` with
    /// `bindings` instead.
    #[must_use]
    pub fn to_inline_sql(&self) -> String {
        replace_placeholders(&self.sql, |placeholder| {
            let index = placeholder.index().checked_sub(1)?;
            self.bindings.get(index).map(SqlValue::to_sql_inline)
        })
    }
}

/// Mutable state of one compile call.
#[derive(Debug, Default)]
pub struct CompileContext {
    bindings: Vec<SqlValue>,
}

impl CompileContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a value and returns its placeholder.
    pub fn bind(&mut self, value: SqlValue) -> &'static str {
        self.bindings.push(value);
        "?"
    }

    /// Records values in order.
    pub fn bind_all<I: IntoIterator<Item = SqlValue>>(&mut self, values: I) {
        self.bindings.extend(values);
    }

    /// Bindings recorded so far.
    #[must_use]
    pub fn bindings(&self) -> &[SqlValue] {
        &self.bindings
    }

    /// Consumes the context.
    #[must_use]
    pub fn into_bindings(self) -> Vec<SqlValue> {
        self.bindings
    }
}

/// Compiles [`Query`] trees into SQL for one dialect.
///
/// Immutable once built, so a single compiler can be shared between threads
/// and used for any number of queries.
#[derive(Debug, Clone)]
pub struct Compiler {
    dialect: Arc<dyn Dialect>,
    registry: ConditionRegistry,
    expander: DeepJoinExpander,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(GenericDialect::new())
    }
}

impl Compiler {
    /// Creates a compiler for `dialect` with default settings.
    #[must_use]
    pub fn new(dialect: impl Dialect + 'static) -> Self {
        Self::with_dialect(Arc::new(dialect))
    }

    /// Creates a compiler for a shared dialect.
    #[must_use]
    pub fn with_dialect(dialect: Arc<dyn Dialect>) -> Self {
        Self {
            dialect,
            registry: ConditionRegistry::new(),
            expander: DeepJoinExpander::default(),
        }
    }

    /// Creates a compiler from configuration.
    #[must_use]
    pub fn from_config(config: &CompilerConfig) -> Self {
        Self::with_dialect(config.dialect.dialect()).with_config(config.deep_join.clone())
    }

    /// Replaces the deep-join key settings, keeping the inflector.
    #[must_use]
    pub fn with_config(mut self, config: DeepJoinConfig) -> Self {
        self.expander = DeepJoinExpander::new(config, self.expander.inflector());
        self
    }

    /// Replaces the inflector, keeping the deep-join key settings.
    #[must_use]
    pub fn with_inflector(mut self, inflector: Arc<dyn Inflector>) -> Self {
        self.expander = DeepJoinExpander::new(self.expander.config().clone(), inflector);
        self
    }

    /// Replaces the deep-join expander.
    #[must_use]
    pub fn with_expander(mut self, expander: DeepJoinExpander) -> Self {
        self.expander = expander;
        self
    }

    /// Replaces the condition registry.
    #[must_use]
    pub fn with_registry(mut self, registry: ConditionRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// The wrapping strategy.
    #[must_use]
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// The condition registry.
    #[must_use]
    pub const fn registry(&self) -> &ConditionRegistry {
        &self.registry
    }

    /// The deep-join expander.
    #[must_use]
    pub const fn expander(&self) -> &DeepJoinExpander {
        &self.expander
    }

    /// Compiles `query`.
    ///
    /// The query is expanded in place first, so compiling it again yields
    /// the same result.
    pub fn compile(&self, query: &mut Query) -> Result<SqlResult> {
        debug!(dialect = self.dialect.name(), "compiling query");
        self.dialect.before_compile(self, query)?;

        let mut ctx = CompileContext::new();
        let sql = self.compile_select(&mut ctx, query)?;
        let bindings = ctx.into_bindings();
        let sql = self.dialect.after_compile(sql, &bindings);

        debug!(sql = %sql, bindings = bindings.len(), "compiled query");
        Ok(SqlResult { sql, bindings })
    }

    /// Compiles a nested query into `ctx`.
    ///
    /// The nested query is expanded on a private copy; the caller's tree is
    /// left untouched.
    pub fn compile_subquery(&self, ctx: &mut CompileContext, query: &Query) -> Result<String> {
        let mut query = query.clone();
        self.dialect.before_compile(self, &mut query)?;
        self.compile_select(ctx, &query)
    }

    /// Records a raw fragment's bindings and returns its text.
    ///
    /// The number of `?` placeholders outside quotes must equal the number
    /// of bindings.
    pub fn compile_raw(
        &self,
        ctx: &mut CompileContext,
        expression: &str,
        bindings: &[SqlValue],
    ) -> Result<String> {
        let found = count_positional(expression);
        if found != bindings.len() {
            return Err(CompileError::PlaceholderMismatch {
                expected: bindings.len(),
                found,
            });
        }
        ctx.bind_all(bindings.iter().cloned());
        Ok(String::from(expression))
    }
}
