//! Compiler configuration.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::dialect::{Dialect, GenericDialect, MysqlDialect, PostgresDialect};
use crate::error::Result;

/// Built-in dialects selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    /// No quoting, ANSI functions.
    #[default]
    Generic,
    /// PostgreSQL.
    Postgres,
    /// MySQL / MariaDB.
    Mysql,
}

impl DialectKind {
    /// Instantiates the dialect.
    #[must_use]
    pub fn dialect(self) -> Arc<dyn Dialect> {
        match self {
            Self::Generic => Arc::new(GenericDialect::new()),
            Self::Postgres => Arc::new(PostgresDialect::new()),
            Self::Mysql => Arc::new(MysqlDialect::new()),
        }
    }
}

/// Key inference settings for deep joins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeepJoinConfig {
    /// Appended to the singularized target to form the source key.
    pub source_key_suffix: String,
    /// Key on the target side of each generated join.
    pub target_key: String,
}

impl Default for DeepJoinConfig {
    fn default() -> Self {
        Self {
            source_key_suffix: String::from("Id"),
            target_key: String::from("Id"),
        }
    }
}

/// Top-level compiler configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Dialect used for wrapping and function syntax.
    pub dialect: DialectKind,
    /// Deep-join key inference.
    pub deep_join: DeepJoinConfig,
}

impl CompilerConfig {
    /// Parses a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompileError;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = CompilerConfig::from_json("{}").unwrap();
        assert_eq!(config, CompilerConfig::default());
        assert_eq!(config.deep_join.source_key_suffix, "Id");
        assert_eq!(config.deep_join.target_key, "Id");
    }

    #[test]
    fn test_partial_document() {
        let config =
            CompilerConfig::from_json(r#"{"dialect":"postgres","deep_join":{"source_key_suffix":"_id"}}"#)
                .unwrap();
        assert_eq!(config.dialect, DialectKind::Postgres);
        assert_eq!(config.deep_join.source_key_suffix, "_id");
        assert_eq!(config.deep_join.target_key, "Id");
        assert_eq!(config.dialect.dialect().name(), "postgres");
    }

    #[test]
    fn test_invalid_document() {
        let err = CompilerConfig::from_json(r#"{"dialect":"oracle"}"#).unwrap_err();
        assert!(matches!(err, CompileError::InvalidConfig(_)));
    }
}
