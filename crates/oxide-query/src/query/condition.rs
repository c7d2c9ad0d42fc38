//! Boolean predicate trees shared by WHERE, HAVING and JOIN ... ON.

use super::Query;
use crate::value::{SqlValue, ToSqlValue};

/// String matching operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOperator {
    /// `LIKE` with the value used as the pattern.
    Like,
    /// Value is a prefix.
    StartsWith,
    /// Value is a suffix.
    EndsWith,
    /// Value appears anywhere.
    Contains,
}

impl TextOperator {
    /// Turns the raw value into a LIKE pattern.
    #[must_use]
    pub fn pattern(&self, value: &str) -> String {
        match self {
            Self::Like => value.to_string(),
            Self::StartsWith => format!("{value}%"),
            Self::EndsWith => format!("%{value}"),
            Self::Contains => format!("%{value}%"),
        }
    }
}

/// The shape of a predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionNode {
    /// `<column> <operator> ?`
    Basic {
        /// Column name.
        column: String,
        /// Comparison operator.
        operator: String,
        /// Compared value.
        value: SqlValue,
    },
    /// `<column> LIKE ?` with a generated pattern.
    Text {
        /// Column name.
        column: String,
        /// Match kind.
        operator: TextOperator,
        /// Raw value the pattern is built from.
        value: String,
        /// When false both sides are lowered.
        case_sensitive: bool,
    },
    /// `<first> <operator> <second>`, no bindings.
    Columns {
        /// Left column.
        first: String,
        /// Comparison operator.
        operator: String,
        /// Right column.
        second: String,
    },
    /// A parenthesized group.
    Nested(Vec<Condition>),
    /// Verbatim SQL with `?` placeholders.
    Raw {
        /// SQL text.
        expression: String,
        /// Values for the placeholders, in order.
        bindings: Vec<SqlValue>,
    },
    /// `<column> IS NULL`
    Null {
        /// Column name.
        column: String,
    },
    /// `<column> BETWEEN ? AND ?`
    Between {
        /// Column name.
        column: String,
        /// Lower bound.
        lower: SqlValue,
        /// Upper bound.
        upper: SqlValue,
    },
    /// `<column> IN (?, ...)`
    In {
        /// Column name.
        column: String,
        /// Candidate values.
        values: Vec<SqlValue>,
    },
    /// `<column> IN (<subquery>)`
    InQuery {
        /// Column name.
        column: String,
        /// The sub-select.
        query: Box<Query>,
    },
    /// `EXISTS (<subquery>)`
    Exists(Box<Query>),
    /// A node compiled by a handler registered under `tag`.
    Custom {
        /// Registry tag.
        tag: String,
        /// Column name.
        column: String,
        /// Values for the handler.
        values: Vec<SqlValue>,
    },
}

impl ConditionNode {
    /// Returns the variant name.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Basic { .. } => "basic",
            Self::Text { .. } => "text",
            Self::Columns { .. } => "columns",
            Self::Nested(_) => "nested",
            Self::Raw { .. } => "raw",
            Self::Null { .. } => "null",
            Self::Between { .. } => "between",
            Self::In { .. } => "in",
            Self::InQuery { .. } => "in_query",
            Self::Exists(_) => "exists",
            Self::Custom { .. } => "custom",
        }
    }

    /// Returns the registry tag used to resolve this node's compiler.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Custom { tag, .. } => tag,
            other => other.kind(),
        }
    }
}

/// A predicate plus its combinator flags.
///
/// `or` selects the keyword joining this node to the previous one and is
/// ignored on the first node of a list.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Joined with OR instead of AND.
    pub or: bool,
    /// Negated.
    pub not: bool,
    /// The predicate.
    pub node: ConditionNode,
}

impl Condition {
    /// Wraps a node with AND, non-negated.
    #[must_use]
    pub const fn new(node: ConditionNode) -> Self {
        Self {
            or: false,
            not: false,
            node,
        }
    }

    /// `<column> <operator> ?`
    #[must_use]
    pub fn basic<T: ToSqlValue>(column: &str, operator: &str, value: T) -> Self {
        Self::new(ConditionNode::Basic {
            column: String::from(column),
            operator: String::from(operator),
            value: value.to_sql_value(),
        })
    }

    /// `<first> <operator> <second>`
    #[must_use]
    pub fn columns(first: &str, operator: &str, second: &str) -> Self {
        Self::new(ConditionNode::Columns {
            first: String::from(first),
            operator: String::from(operator),
            second: String::from(second),
        })
    }

    /// Verbatim SQL.
    #[must_use]
    pub fn raw(expression: &str, bindings: Vec<SqlValue>) -> Self {
        Self::new(ConditionNode::Raw {
            expression: String::from(expression),
            bindings,
        })
    }

    /// A parenthesized group.
    #[must_use]
    pub const fn nested(conditions: Vec<Self>) -> Self {
        Self::new(ConditionNode::Nested(conditions))
    }

    /// `<column> IS NULL`
    #[must_use]
    pub fn null(column: &str) -> Self {
        Self::new(ConditionNode::Null {
            column: String::from(column),
        })
    }

    /// `<column> BETWEEN ? AND ?`
    #[must_use]
    pub fn between<T: ToSqlValue, U: ToSqlValue>(column: &str, lower: T, upper: U) -> Self {
        Self::new(ConditionNode::Between {
            column: String::from(column),
            lower: lower.to_sql_value(),
            upper: upper.to_sql_value(),
        })
    }

    /// `<column> IN (?, ...)`
    #[must_use]
    pub fn in_list<T: ToSqlValue>(column: &str, values: Vec<T>) -> Self {
        Self::new(ConditionNode::In {
            column: String::from(column),
            values: values.into_iter().map(ToSqlValue::to_sql_value).collect(),
        })
    }

    /// `<column> IN (<subquery>)`
    #[must_use]
    pub fn in_query(column: &str, query: Query) -> Self {
        Self::new(ConditionNode::InQuery {
            column: String::from(column),
            query: Box::new(query),
        })
    }

    /// `EXISTS (<subquery>)`
    #[must_use]
    pub fn exists(query: Query) -> Self {
        Self::new(ConditionNode::Exists(Box::new(query)))
    }

    /// String match.
    #[must_use]
    pub fn text(column: &str, operator: TextOperator, value: &str, case_sensitive: bool) -> Self {
        Self::new(ConditionNode::Text {
            column: String::from(column),
            operator,
            value: String::from(value),
            case_sensitive,
        })
    }

    /// Joins this node to the previous one with OR.
    #[must_use]
    pub const fn or(mut self) -> Self {
        self.or = true;
        self
    }

    /// Negates this node.
    #[must_use]
    pub const fn not(mut self) -> Self {
        self.not = true;
        self
    }
}
