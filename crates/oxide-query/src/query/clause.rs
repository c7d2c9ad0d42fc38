//! Clause types.
//!
//! Every clause is stored under a [`Component`], the section of the
//! statement it contributes to. Within a component, insertion order is
//! emission order.

use super::condition::Condition;
use super::join::{DeepJoin, Join};
use super::Query;
use crate::value::SqlValue;

/// Section of a statement a clause belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// FROM source.
    From,
    /// Explicit JOIN.
    Join,
    /// Shorthand join path, removed before compiling.
    DeepJoin,
    /// WHERE predicate.
    Where,
    /// GROUP BY column.
    Group,
    /// HAVING predicate.
    Having,
    /// ORDER BY entry.
    Order,
    /// LIMIT/OFFSET payload.
    Limit,
    /// Projected column.
    Select,
    /// Aggregate projection.
    Aggregate,
    /// UNION/INTERSECT/EXCEPT.
    Union,
    /// Row locking.
    Lock,
}

impl Component {
    /// Returns the component name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::From => "from",
            Self::Join => "join",
            Self::DeepJoin => "deep_join",
            Self::Where => "where",
            Self::Group => "group",
            Self::Having => "having",
            Self::Order => "order",
            Self::Limit => "limit",
            Self::Select => "select",
            Self::Aggregate => "aggregate",
            Self::Union => "union",
            Self::Lock => "lock",
        }
    }
}

/// Table expression of a FROM or JOIN.
#[derive(Debug, Clone, PartialEq)]
pub enum FromClause {
    /// A named table, optionally aliased.
    Table {
        /// Table name. May carry an inline alias (`"users as u"`).
        name: String,
        /// Alias.
        alias: Option<String>,
    },
    /// Verbatim SQL with `?` placeholders.
    Raw {
        /// SQL text.
        expression: String,
        /// Values for the placeholders, in order.
        bindings: Vec<SqlValue>,
    },
    /// A nested SELECT.
    SubQuery {
        /// The nested query.
        query: Box<Query>,
        /// Alias appended after the closing parenthesis.
        alias: Option<String>,
    },
}

impl FromClause {
    /// Creates a plain table reference.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self::Table {
            name: name.into(),
            alias: None,
        }
    }

    /// Returns the name other clauses use to refer to this source.
    ///
    /// An explicit alias wins, then an inline `"table as alias"`, then the
    /// bare table name. Raw fragments have no name.
    #[must_use]
    pub fn reference_name(&self) -> Option<&str> {
        let name = match self {
            Self::Table { alias: Some(alias), .. } | Self::SubQuery { alias: Some(alias), .. } => {
                alias.as_str()
            }
            Self::Table { name, alias: None } => split_alias(name).1.unwrap_or(name.as_str()),
            Self::SubQuery { alias: None, .. } | Self::Raw { .. } => return None,
        };
        let name = name.trim();
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

/// Splits `"expr as alias"` (case-insensitive `as`) into its two halves.
pub(crate) fn split_alias(value: &str) -> (&str, Option<&str>) {
    let lower = value.to_ascii_lowercase();
    match lower.find(" as ") {
        Some(pos) => (value[..pos].trim(), Some(value[pos + 4..].trim())),
        None => (value, None),
    }
}

/// A projected or grouped column.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// A column name, possibly qualified or aliased.
    Name(String),
    /// Verbatim SQL with `?` placeholders.
    Raw {
        /// SQL text.
        expression: String,
        /// Values for the placeholders, in order.
        bindings: Vec<SqlValue>,
    },
    /// A scalar sub-select.
    SubQuery {
        /// The nested query.
        query: Box<Query>,
        /// Column alias.
        alias: String,
    },
}

/// Aggregate functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    /// COUNT.
    Count,
    /// SUM.
    Sum,
    /// AVG.
    Avg,
    /// MIN.
    Min,
    /// MAX.
    Max,
}

impl AggregateFunction {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Count => "COUNT",
            Self::Sum => "SUM",
            Self::Avg => "AVG",
            Self::Min => "MIN",
            Self::Max => "MAX",
        }
    }
}

/// Aggregate projection, e.g. `SELECT COUNT(*) AS count`.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    /// Function applied to the columns.
    pub function: AggregateFunction,
    /// Columns; empty means `*`.
    pub columns: Vec<String>,
    /// Result alias. Defaults to the lowercase function name.
    pub alias: Option<String>,
}

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// An ORDER BY entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Order {
    /// A column with a direction.
    Column {
        /// Column name.
        column: String,
        /// Direction.
        direction: OrderDirection,
    },
    /// Verbatim SQL with `?` placeholders.
    Raw {
        /// SQL text.
        expression: String,
        /// Values for the placeholders, in order.
        bindings: Vec<SqlValue>,
    },
    /// Dialect-specific random ordering.
    Random {
        /// Optional seed.
        seed: Option<String>,
    },
}

/// LIMIT/OFFSET payload. The two halves are independent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Limit {
    /// Maximum number of rows.
    pub limit: Option<u32>,
    /// Rows to skip.
    pub offset: Option<u32>,
}

impl Limit {
    /// Whether a LIMIT placeholder should be emitted.
    #[must_use]
    pub fn has_limit(&self) -> bool {
        self.limit.is_some_and(|n| n > 0)
    }

    /// Whether an OFFSET placeholder should be emitted.
    #[must_use]
    pub const fn has_offset(&self) -> bool {
        self.offset.is_some()
    }
}

/// Set operation combining two selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineOperation {
    /// UNION.
    Union,
    /// INTERSECT.
    Intersect,
    /// EXCEPT.
    Except,
}

impl CombineOperation {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        }
    }
}

/// A combined select.
#[derive(Debug, Clone, PartialEq)]
pub enum Combine {
    /// Another query.
    Query {
        /// Set operation.
        operation: CombineOperation,
        /// Keep duplicates (`ALL`).
        all: bool,
        /// The combined query.
        query: Box<Query>,
    },
    /// Verbatim SQL with `?` placeholders.
    Raw {
        /// SQL text.
        expression: String,
        /// Values for the placeholders, in order.
        bindings: Vec<SqlValue>,
    },
}

/// Row lock strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockStrength {
    /// Exclusive lock.
    Update,
    /// Shared lock.
    Share,
}

/// Row locking request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lock {
    /// Lock strength.
    pub strength: LockStrength,
    /// Fail instead of waiting for the lock.
    pub nowait: bool,
}

/// A clause of any component.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// FROM source.
    From(FromClause),
    /// Explicit join.
    Join(Join),
    /// Shorthand join path.
    DeepJoin(DeepJoin),
    /// WHERE predicate.
    Where(Condition),
    /// HAVING predicate.
    Having(Condition),
    /// Projected column.
    Select(Column),
    /// Grouped column.
    Group(Column),
    /// Aggregate projection.
    Aggregate(Aggregate),
    /// Ordering entry.
    Order(Order),
    /// LIMIT/OFFSET payload.
    Limit(Limit),
    /// Combined select.
    Union(Combine),
    /// Row locking.
    Lock(Lock),
}

impl Clause {
    /// Returns the variant name.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::From(_) => "from",
            Self::Join(_) => "join",
            Self::DeepJoin(_) => "deep_join",
            Self::Where(_) => "where",
            Self::Having(_) => "having",
            Self::Select(_) => "select",
            Self::Group(_) => "group",
            Self::Aggregate(_) => "aggregate",
            Self::Order(_) => "order",
            Self::Limit(_) => "limit",
            Self::Union(_) => "union",
            Self::Lock(_) => "lock",
        }
    }
}

/// Typed view into a [`Clause`].
///
/// Implemented for every payload type so the store can hand out typed
/// slices of a component.
pub trait ClauseVariant: Sized {
    /// Returns the payload if the clause has this type.
    fn from_clause(clause: &Clause) -> Option<&Self>;
}

macro_rules! clause_variant {
    ($ty:ty => $($variant:ident)|+) => {
        impl ClauseVariant for $ty {
            fn from_clause(clause: &Clause) -> Option<&Self> {
                match clause {
                    $(Clause::$variant(inner))|+ => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

clause_variant!(FromClause => From);
clause_variant!(Join => Join);
clause_variant!(DeepJoin => DeepJoin);
clause_variant!(Condition => Where | Having);
clause_variant!(Column => Select | Group);
clause_variant!(Aggregate => Aggregate);
clause_variant!(Order => Order);
clause_variant!(Limit => Limit);
clause_variant!(Combine => Union);
clause_variant!(Lock => Lock);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_name_prefers_alias() {
        let from = FromClause::Table {
            name: String::from("users"),
            alias: Some(String::from("u")),
        };
        assert_eq!(from.reference_name(), Some("u"));
        assert_eq!(FromClause::table("users AS x").reference_name(), Some("x"));
        assert_eq!(FromClause::table("users").reference_name(), Some("users"));
        assert_eq!(FromClause::table("  ").reference_name(), None);
    }

    #[test]
    fn test_reference_name_of_raw_and_unaliased_subquery() {
        let raw = FromClause::Raw {
            expression: String::from("generate_series(1, 3)"),
            bindings: vec![],
        };
        assert_eq!(raw.reference_name(), None);
        let sub = FromClause::SubQuery {
            query: Box::new(Query::new()),
            alias: None,
        };
        assert_eq!(sub.reference_name(), None);
    }

    #[test]
    fn test_limit_presence() {
        let limit = Limit {
            limit: Some(0),
            offset: Some(0),
        };
        assert!(!limit.has_limit());
        assert!(limit.has_offset());
        assert!(!Limit::default().has_offset());
    }

    #[test]
    fn test_split_alias() {
        assert_eq!(split_alias("users as u"), ("users", Some("u")));
        assert_eq!(split_alias("users AS u"), ("users", Some("u")));
        assert_eq!(split_alias("users"), ("users", None));
    }
}
