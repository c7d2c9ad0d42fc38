//! Join clauses.

use std::fmt;
use std::sync::Arc;

use super::clause::FromClause;
use super::condition::Condition;

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinType {
    /// INNER JOIN.
    #[default]
    Inner,
    /// LEFT OUTER JOIN.
    Left,
    /// RIGHT OUTER JOIN.
    Right,
    /// FULL OUTER JOIN.
    Full,
    /// CROSS JOIN.
    Cross,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

/// An explicit join. Owns its table expression and its ON predicates.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// The type of join.
    pub join_type: JoinType,
    /// The joined table.
    pub table: FromClause,
    /// ON predicates. Empty means no ON clause.
    pub on: Vec<Condition>,
}

impl Join {
    /// Creates an equality join `table ON first = second`.
    #[must_use]
    pub fn on_columns(join_type: JoinType, table: &str, first: &str, second: &str) -> Self {
        Self {
            join_type,
            table: FromClause::table(table),
            on: vec![Condition::columns(first, "=", second)],
        }
    }
}

/// Maps a path segment to a key name.
#[derive(Clone)]
pub struct KeyGenerator(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl KeyGenerator {
    /// Wraps a closure.
    pub fn new(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Generates the key for `segment`.
    #[must_use]
    pub fn generate(&self, segment: &str) -> String {
        (self.0)(segment)
    }
}

impl fmt::Debug for KeyGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyGenerator(..)")
    }
}

impl PartialEq for KeyGenerator {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A shorthand relationship path such as `"author.company"`.
///
/// Expanded into a chain of [`Join`]s before compilation. Unset key
/// settings fall back to the compiler configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DeepJoin {
    /// Dot-separated path.
    pub expression: String,
    /// Type used for every generated join.
    pub join_type: JoinType,
    /// Computes the source-side key from the target segment.
    pub source_key: Option<KeyGenerator>,
    /// Computes the target-side key from the target segment.
    pub target_key: Option<KeyGenerator>,
    /// Suffix appended to the singularized target for the source key.
    pub source_key_suffix: Option<String>,
    /// Fixed target key name.
    pub target_key_name: Option<String>,
}

impl DeepJoin {
    /// Creates an inner deep join with default key inference.
    #[must_use]
    pub fn new(expression: &str) -> Self {
        Self {
            expression: String::from(expression),
            join_type: JoinType::Inner,
            source_key: None,
            target_key: None,
            source_key_suffix: None,
            target_key_name: None,
        }
    }

    /// Sets the join type.
    #[must_use]
    pub const fn join_type(mut self, join_type: JoinType) -> Self {
        self.join_type = join_type;
        self
    }

    /// Overrides the source-key suffix.
    #[must_use]
    pub fn source_key_suffix(mut self, suffix: &str) -> Self {
        self.source_key_suffix = Some(String::from(suffix));
        self
    }

    /// Overrides the target key name.
    #[must_use]
    pub fn target_key_name(mut self, key: &str) -> Self {
        self.target_key_name = Some(String::from(key));
        self
    }

    /// Uses generators instead of inference. `target` may be omitted.
    #[must_use]
    pub fn key_generators(mut self, source: KeyGenerator, target: Option<KeyGenerator>) -> Self {
        self.source_key = Some(source);
        self.target_key = target;
        self
    }

    /// Returns the non-empty path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.expression
            .split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}
