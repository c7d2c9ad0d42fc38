//! Deep-join expansion.
//!
//! A deep join such as `"author.company"` on a query over `posts` becomes
//!
//! ```text
//! INNER JOIN author ON posts.authorId = author.Id
//! INNER JOIN company ON author.companyId = company.Id
//! ```
//!
//! Expansion mutates the query's clause store: each generated join is
//! appended to the join component and the triggering deep join is removed,
//! so running the expander again on the same query changes nothing.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::DeepJoinConfig;
use crate::error::{CompileError, Result};
use crate::inflector::{EnglishInflector, Inflector};
use crate::query::{Clause, ClauseVariant, Component, DeepJoin, FromClause, Join, Query};

/// Rewrites deep joins into explicit join chains.
#[derive(Clone)]
pub struct DeepJoinExpander {
    config: DeepJoinConfig,
    inflector: Arc<dyn Inflector>,
}

impl std::fmt::Debug for DeepJoinExpander {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeepJoinExpander")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for DeepJoinExpander {
    fn default() -> Self {
        Self::new(DeepJoinConfig::default(), Arc::new(EnglishInflector::new()))
    }
}

impl DeepJoinExpander {
    /// Creates an expander with explicit settings and inflector.
    #[must_use]
    pub fn new(config: DeepJoinConfig, inflector: Arc<dyn Inflector>) -> Self {
        Self { config, inflector }
    }

    /// Returns the key inference settings.
    #[must_use]
    pub const fn config(&self) -> &DeepJoinConfig {
        &self.config
    }

    /// Returns the inflector used to singularize path segments.
    #[must_use]
    pub fn inflector(&self) -> Arc<dyn Inflector> {
        Arc::clone(&self.inflector)
    }

    /// Expands every deep join of `query` in place.
    pub fn expand(&self, query: &mut Query) -> Result<()> {
        let triggers = query
            .clauses()
            .entries(Component::DeepJoin)
            .map(|(id, clause)| {
                DeepJoin::from_clause(clause)
                    .cloned()
                    .map(|join| (id, join))
                    .ok_or(CompileError::InvalidClause {
                        component: Component::DeepJoin.as_str(),
                        found: clause.kind(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        for (id, deep) in triggers {
            let joins = self.chain(query, &deep)?;
            let store = query.clauses_mut();
            let count = joins.len();
            for join in joins {
                store.add(Component::Join, Clause::Join(join));
            }
            store.remove(id);
            debug!(expression = %deep.expression, joins = count, "expanded deep join");
        }
        Ok(())
    }

    /// Builds the join chain for one deep join without touching the query.
    pub fn chain(&self, query: &Query, deep: &DeepJoin) -> Result<Vec<Join>> {
        let segments: Vec<&str> = deep.segments().collect();
        if segments.is_empty() {
            return Ok(Vec::new());
        }

        let root = query
            .clauses()
            .get_one::<FromClause>(Component::From)
            .and_then(FromClause::reference_name)
            .ok_or_else(|| CompileError::MissingRoot(deep.expression.clone()))?;

        let mut joins = Vec::with_capacity(segments.len());
        let mut source = root;
        for target in segments {
            let (source_key, target_key) = self.keys(deep, target);
            trace!(source, target, %source_key, %target_key, "deep join segment");
            joins.push(Join::on_columns(
                deep.join_type,
                target,
                &format!("{source}.{source_key}"),
                &format!("{target}.{target_key}"),
            ));
            source = target;
        }
        Ok(joins)
    }

    fn keys(&self, deep: &DeepJoin, target: &str) -> (String, String) {
        if let Some(generator) = &deep.source_key {
            let target_key = deep
                .target_key
                .as_ref()
                .map_or_else(|| self.config.target_key.clone(), |g| g.generate(target));
            return (generator.generate(target), target_key);
        }

        let suffix = deep
            .source_key_suffix
            .as_deref()
            .unwrap_or(&self.config.source_key_suffix);
        let target_key = deep
            .target_key_name
            .clone()
            .unwrap_or_else(|| self.config.target_key.clone());
        (
            format!("{}{suffix}", self.inflector.singularize(target)),
            target_key,
        )
    }
}
