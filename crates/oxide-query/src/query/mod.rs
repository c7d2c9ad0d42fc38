//! The structured query model.
//!
//! A [`Query`] is a bag of typed clauses in a [`ClauseStore`]. The helper
//! methods below only append clauses; nothing is validated until the query
//! is compiled.

pub mod clause;
pub mod condition;
pub mod join;
pub mod store;

pub use clause::{
    Aggregate, AggregateFunction, Clause, ClauseVariant, Column, Combine, CombineOperation,
    Component, FromClause, Limit, Lock, LockStrength, Order, OrderDirection,
};
pub use condition::{Condition, ConditionNode, TextOperator};
pub use join::{DeepJoin, Join, JoinType, KeyGenerator};
pub use store::{ClauseId, ClauseStore};

use crate::value::{SqlValue, ToSqlValue};

/// A SELECT statement under construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    clauses: ClauseStore,
    distinct: bool,
}

impl Query {
    /// Creates an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the clause store.
    #[must_use]
    pub const fn clauses(&self) -> &ClauseStore {
        &self.clauses
    }

    /// Returns the clause store mutably.
    pub fn clauses_mut(&mut self) -> &mut ClauseStore {
        &mut self.clauses
    }

    /// Whether `SELECT DISTINCT` was requested.
    #[must_use]
    pub const fn is_distinct(&self) -> bool {
        self.distinct
    }

    fn push(mut self, component: Component, clause: Clause) -> Self {
        self.clauses.add(component, clause);
        self
    }

    // FROM

    /// Sets the FROM table, replacing any previous source.
    #[must_use]
    pub fn from(self, table: &str) -> Self {
        self.from_clause(FromClause::table(table))
    }

    /// Sets an aliased FROM table.
    #[must_use]
    pub fn from_as(self, table: &str, alias: &str) -> Self {
        self.from_clause(FromClause::Table {
            name: String::from(table),
            alias: Some(String::from(alias)),
        })
    }

    /// Sets a raw FROM fragment.
    #[must_use]
    pub fn from_raw(self, expression: &str, bindings: Vec<SqlValue>) -> Self {
        self.from_clause(FromClause::Raw {
            expression: String::from(expression),
            bindings,
        })
    }

    /// Selects from a sub-query.
    #[must_use]
    pub fn from_query(self, query: Self, alias: &str) -> Self {
        self.from_clause(FromClause::SubQuery {
            query: Box::new(query),
            alias: Some(String::from(alias)),
        })
    }

    /// Sets any FROM source.
    #[must_use]
    pub fn from_clause(mut self, from: FromClause) -> Self {
        self.clauses.replace(Component::From, Clause::From(from));
        self
    }

    // SELECT

    /// Adds projected columns.
    #[must_use]
    pub fn select(mut self, columns: &[&str]) -> Self {
        for column in columns {
            self.clauses.add(
                Component::Select,
                Clause::Select(Column::Name(String::from(*column))),
            );
        }
        self
    }

    /// Adds a raw projected expression.
    #[must_use]
    pub fn select_raw(self, expression: &str, bindings: Vec<SqlValue>) -> Self {
        self.push(
            Component::Select,
            Clause::Select(Column::Raw {
                expression: String::from(expression),
                bindings,
            }),
        )
    }

    /// Adds a scalar sub-select.
    #[must_use]
    pub fn select_query(self, query: Self, alias: &str) -> Self {
        self.push(
            Component::Select,
            Clause::Select(Column::SubQuery {
                query: Box::new(query),
                alias: String::from(alias),
            }),
        )
    }

    /// Requests `SELECT DISTINCT`.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Replaces the projection with an aggregate.
    #[must_use]
    pub fn aggregate(mut self, function: AggregateFunction, columns: &[&str]) -> Self {
        self.clauses.replace(
            Component::Aggregate,
            Clause::Aggregate(Aggregate {
                function,
                columns: columns.iter().map(|c| String::from(*c)).collect(),
                alias: None,
            }),
        );
        self
    }

    /// `SELECT COUNT(*) AS count`.
    #[must_use]
    pub fn count(self) -> Self {
        self.aggregate(AggregateFunction::Count, &[])
    }

    // JOIN

    /// Adds `INNER JOIN table ON first = second`.
    #[must_use]
    pub fn join(self, table: &str, first: &str, second: &str) -> Self {
        self.join_clause(Join::on_columns(JoinType::Inner, table, first, second))
    }

    /// Adds `LEFT JOIN table ON first = second`.
    #[must_use]
    pub fn left_join(self, table: &str, first: &str, second: &str) -> Self {
        self.join_clause(Join::on_columns(JoinType::Left, table, first, second))
    }

    /// Adds `RIGHT JOIN table ON first = second`.
    #[must_use]
    pub fn right_join(self, table: &str, first: &str, second: &str) -> Self {
        self.join_clause(Join::on_columns(JoinType::Right, table, first, second))
    }

    /// Adds `CROSS JOIN table`.
    #[must_use]
    pub fn cross_join(self, table: &str) -> Self {
        self.join_clause(Join {
            join_type: JoinType::Cross,
            table: FromClause::table(table),
            on: vec![],
        })
    }

    /// Adds any join.
    #[must_use]
    pub fn join_clause(self, join: Join) -> Self {
        self.push(Component::Join, Clause::Join(join))
    }

    /// Adds an inner deep join over a dotted path.
    #[must_use]
    pub fn deep_join(self, expression: &str) -> Self {
        self.deep_join_clause(DeepJoin::new(expression))
    }

    /// Adds a configured deep join.
    #[must_use]
    pub fn deep_join_clause(self, join: DeepJoin) -> Self {
        self.push(Component::DeepJoin, Clause::DeepJoin(join))
    }

    // WHERE

    /// Adds `column operator ?` joined with AND.
    #[must_use]
    pub fn filter<T: ToSqlValue>(self, column: &str, operator: &str, value: T) -> Self {
        self.where_clause(Condition::basic(column, operator, value))
    }

    /// Adds `column operator ?` joined with OR.
    #[must_use]
    pub fn or_filter<T: ToSqlValue>(self, column: &str, operator: &str, value: T) -> Self {
        self.where_clause(Condition::basic(column, operator, value).or())
    }

    /// Adds a WHERE predicate.
    #[must_use]
    pub fn where_clause(self, condition: Condition) -> Self {
        self.push(Component::Where, Clause::Where(condition))
    }

    // GROUP BY / HAVING

    /// Adds GROUP BY columns.
    #[must_use]
    pub fn group_by(mut self, columns: &[&str]) -> Self {
        for column in columns {
            self.clauses.add(
                Component::Group,
                Clause::Group(Column::Name(String::from(*column))),
            );
        }
        self
    }

    /// Adds a raw GROUP BY expression.
    #[must_use]
    pub fn group_by_raw(self, expression: &str, bindings: Vec<SqlValue>) -> Self {
        self.push(
            Component::Group,
            Clause::Group(Column::Raw {
                expression: String::from(expression),
                bindings,
            }),
        )
    }

    /// Adds `HAVING column operator ?` joined with AND.
    #[must_use]
    pub fn having<T: ToSqlValue>(self, column: &str, operator: &str, value: T) -> Self {
        self.having_clause(Condition::basic(column, operator, value))
    }

    /// Adds `HAVING column operator ?` joined with OR.
    #[must_use]
    pub fn or_having<T: ToSqlValue>(self, column: &str, operator: &str, value: T) -> Self {
        self.having_clause(Condition::basic(column, operator, value).or())
    }

    /// Adds a HAVING predicate.
    #[must_use]
    pub fn having_clause(self, condition: Condition) -> Self {
        self.push(Component::Having, Clause::Having(condition))
    }

    // ORDER BY

    /// Orders ascending by `column`.
    #[must_use]
    pub fn order_by(self, column: &str) -> Self {
        self.push(
            Component::Order,
            Clause::Order(Order::Column {
                column: String::from(column),
                direction: OrderDirection::Asc,
            }),
        )
    }

    /// Orders descending by `column`.
    #[must_use]
    pub fn order_by_desc(self, column: &str) -> Self {
        self.push(
            Component::Order,
            Clause::Order(Order::Column {
                column: String::from(column),
                direction: OrderDirection::Desc,
            }),
        )
    }

    /// Adds a raw ORDER BY expression.
    #[must_use]
    pub fn order_by_raw(self, expression: &str, bindings: Vec<SqlValue>) -> Self {
        self.push(
            Component::Order,
            Clause::Order(Order::Raw {
                expression: String::from(expression),
                bindings,
            }),
        )
    }

    /// Orders randomly.
    #[must_use]
    pub fn order_by_random(self, seed: Option<&str>) -> Self {
        self.push(
            Component::Order,
            Clause::Order(Order::Random {
                seed: seed.map(String::from),
            }),
        )
    }

    // LIMIT / OFFSET

    fn limit_payload(&self) -> Limit {
        self.clauses
            .get_one::<Limit>(Component::Limit)
            .copied()
            .unwrap_or_default()
    }

    /// Sets LIMIT. The value is bound unchanged.
    #[must_use]
    pub fn limit(mut self, n: u32) -> Self {
        let mut payload = self.limit_payload();
        payload.limit = Some(n);
        self.clauses.replace(Component::Limit, Clause::Limit(payload));
        self
    }

    /// Sets OFFSET.
    #[must_use]
    pub fn offset(mut self, n: u32) -> Self {
        let mut payload = self.limit_payload();
        payload.offset = Some(n);
        self.clauses.replace(Component::Limit, Clause::Limit(payload));
        self
    }

    // UNION / LOCK

    /// Adds `UNION query`.
    #[must_use]
    pub fn union(self, query: Self) -> Self {
        self.combine(CombineOperation::Union, false, query)
    }

    /// Adds `UNION ALL query`.
    #[must_use]
    pub fn union_all(self, query: Self) -> Self {
        self.combine(CombineOperation::Union, true, query)
    }

    /// Adds a set operation.
    #[must_use]
    pub fn combine(self, operation: CombineOperation, all: bool, query: Self) -> Self {
        self.push(
            Component::Union,
            Clause::Union(Combine::Query {
                operation,
                all,
                query: Box::new(query),
            }),
        )
    }

    /// Adds a raw set operation fragment.
    #[must_use]
    pub fn combine_raw(self, expression: &str, bindings: Vec<SqlValue>) -> Self {
        self.push(
            Component::Union,
            Clause::Union(Combine::Raw {
                expression: String::from(expression),
                bindings,
            }),
        )
    }

    /// Requests row locking.
    #[must_use]
    pub fn lock(mut self, strength: LockStrength, nowait: bool) -> Self {
        self.clauses
            .replace(Component::Lock, Clause::Lock(Lock { strength, nowait }));
        self
    }
}
