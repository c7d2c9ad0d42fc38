//! Tag-based dispatch for condition compilers.
//!
//! Every [`ConditionNode`](crate::query::ConditionNode) reports a tag; the
//! registry maps tags to handler functions. The built-in handlers are
//! registered by [`ConditionRegistry::new`]; extensions add their own tags
//! with [`register`](ConditionRegistry::register) before the compiler is
//! shared.

use std::collections::HashMap;
use std::fmt;

use super::conditions;
use super::{CompileContext, Compiler};
use crate::error::{CompileError, Result};
use crate::query::Condition;

/// Compiles one condition into SQL, recording its bindings in the context.
pub type ConditionHandler = fn(&Compiler, &mut CompileContext, &Condition) -> Result<String>;

/// Maps condition tags to handlers.
#[derive(Clone)]
pub struct ConditionRegistry {
    handlers: HashMap<String, ConditionHandler>,
}

impl ConditionRegistry {
    /// Creates a registry holding the built-in handlers.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("basic", conditions::compile_basic);
        registry.register("text", conditions::compile_text);
        registry.register("columns", conditions::compile_columns);
        registry.register("nested", conditions::compile_nested);
        registry.register("raw", conditions::compile_raw);
        registry.register("null", conditions::compile_null);
        registry.register("between", conditions::compile_between);
        registry.register("in", conditions::compile_in);
        registry.register("in_query", conditions::compile_in_query);
        registry.register("exists", conditions::compile_exists);
        registry
    }

    /// Creates a registry with no handlers.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registers `handler` under `tag`, returning the handler it replaced.
    pub fn register(&mut self, tag: &str, handler: ConditionHandler) -> Option<ConditionHandler> {
        self.handlers.insert(String::from(tag), handler)
    }

    /// Whether a handler exists for `tag`.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.handlers.contains_key(tag)
    }

    /// Looks up the handler for `tag`.
    pub fn resolve(&self, tag: &str) -> Result<ConditionHandler> {
        self.handlers
            .get(tag)
            .copied()
            .ok_or_else(|| CompileError::UnresolvedHandler(String::from(tag)))
    }
}

impl Default for ConditionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConditionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tags: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("ConditionRegistry").field("tags", &tags).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_registered() {
        let registry = ConditionRegistry::new();
        for tag in [
            "basic", "text", "columns", "nested", "raw", "null", "between", "in", "in_query",
            "exists",
        ] {
            assert!(registry.contains(tag), "missing {tag}");
        }
        assert!(!registry.contains("custom"));
    }

    #[test]
    fn test_unknown_tag() {
        let err = ConditionRegistry::empty().resolve("basic").unwrap_err();
        assert!(matches!(err, CompileError::UnresolvedHandler(tag) if tag == "basic"));
    }

    #[test]
    fn test_register_replaces() {
        fn always_true(_: &Compiler, _: &mut CompileContext, _: &Condition) -> Result<String> {
            Ok(String::from("1 = 1"))
        }
        let mut registry = ConditionRegistry::new();
        assert!(registry.register("basic", always_true).is_some());
        assert!(registry.register("always", always_true).is_none());
        assert!(registry.resolve("always").is_ok());
    }
}
