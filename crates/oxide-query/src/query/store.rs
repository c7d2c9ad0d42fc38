//! Insertion-ordered, component-tagged clause collection.

use super::clause::{Clause, ClauseVariant, Component};
use crate::error::{CompileError, Result};

/// Stable identifier of a stored clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClauseId(u64);

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    id: ClauseId,
    component: Component,
    clause: Clause,
}

/// Ordered clause storage for one query.
///
/// Entries keep their insertion order across components. The store never
/// reorders or deduplicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClauseStore {
    entries: Vec<Entry>,
    next_id: u64,
}

impl ClauseStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a clause under `component` and returns its id.
    pub fn add(&mut self, component: Component, clause: Clause) -> ClauseId {
        let id = ClauseId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            component,
            clause,
        });
        id
    }

    /// Removes every clause of `component`, then appends `clause`.
    pub fn replace(&mut self, component: Component, clause: Clause) -> ClauseId {
        self.entries.retain(|e| e.component != component);
        self.add(component, clause)
    }

    /// Removes a clause. Returns it if it was present.
    pub fn remove(&mut self, id: ClauseId) -> Option<Clause> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(pos).clause)
    }

    /// Whether any clause is stored under `component`.
    #[must_use]
    pub fn has(&self, component: Component) -> bool {
        self.entries.iter().any(|e| e.component == component)
    }

    /// Iterates the raw clauses of `component` in insertion order.
    pub fn clauses(&self, component: Component) -> impl Iterator<Item = &Clause> {
        self.entries
            .iter()
            .filter(move |e| e.component == component)
            .map(|e| &e.clause)
    }

    /// Iterates `(id, clause)` pairs of `component` in insertion order.
    pub fn entries(&self, component: Component) -> impl Iterator<Item = (ClauseId, &Clause)> {
        self.entries
            .iter()
            .filter(move |e| e.component == component)
            .map(|e| (e.id, &e.clause))
    }

    /// Returns the clauses of `component` that have type `T`.
    #[must_use]
    pub fn get<T: ClauseVariant>(&self, component: Component) -> Vec<&T> {
        self.clauses(component).filter_map(T::from_clause).collect()
    }

    /// Returns the first clause of `component` that has type `T`.
    #[must_use]
    pub fn get_one<T: ClauseVariant>(&self, component: Component) -> Option<&T> {
        self.clauses(component).find_map(T::from_clause)
    }

    /// Like [`get`](Self::get), but a clause of another type, or one whose
    /// own kind names a different component, is an error.
    pub fn get_strict<T: ClauseVariant>(&self, component: Component) -> Result<Vec<&T>> {
        self.clauses(component)
            .map(|clause| {
                T::from_clause(clause)
                    .filter(|_| clause.kind() == component.as_str())
                    .ok_or(CompileError::InvalidClause {
                        component: component.as_str(),
                        found: clause.kind(),
                    })
            })
            .collect()
    }

    /// Total number of stored clauses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::clause::{FromClause, Order, OrderDirection};
    use crate::query::condition::Condition;

    fn order(column: &str) -> Clause {
        Clause::Order(Order::Column {
            column: String::from(column),
            direction: OrderDirection::Asc,
        })
    }

    #[test]
    fn test_get_preserves_insertion_order() {
        let mut store = ClauseStore::new();
        store.add(Component::Order, order("a"));
        store.add(Component::Where, Clause::Where(Condition::null("x")));
        store.add(Component::Order, order("b"));

        let orders: Vec<&Order> = store.get(Component::Order);
        assert_eq!(orders.len(), 2);
        assert!(matches!(orders[0], Order::Column { column, .. } if column == "a"));
        assert!(matches!(orders[1], Order::Column { column, .. } if column == "b"));
    }

    #[test]
    fn test_get_one_and_has() {
        let mut store = ClauseStore::new();
        assert!(!store.has(Component::From));
        assert!(store.get_one::<FromClause>(Component::From).is_none());

        store.add(Component::From, Clause::From(FromClause::table("users")));
        assert!(store.has(Component::From));
        assert_eq!(
            store.get_one::<FromClause>(Component::From),
            Some(&FromClause::table("users"))
        );
    }

    #[test]
    fn test_remove_by_id() {
        let mut store = ClauseStore::new();
        let first = store.add(Component::Order, order("a"));
        store.add(Component::Order, order("b"));

        assert!(store.remove(first).is_some());
        assert!(store.remove(first).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_replace_drops_component() {
        let mut store = ClauseStore::new();
        store.add(Component::From, Clause::From(FromClause::table("a")));
        store.replace(Component::From, Clause::From(FromClause::table("b")));
        assert_eq!(store.get::<FromClause>(Component::From), vec![&FromClause::table("b")]);
    }

    #[test]
    fn test_get_skips_but_strict_rejects_foreign_variants() {
        let mut store = ClauseStore::new();
        store.add(Component::From, order("a"));

        assert!(store.get::<FromClause>(Component::From).is_empty());
        let err = store.get_strict::<FromClause>(Component::From).unwrap_err();
        assert!(matches!(
            err,
            CompileError::InvalidClause {
                component: "from",
                found: "order"
            }
        ));
    }

    #[test]
    fn test_strict_rejects_clause_of_sibling_component() {
        let mut store = ClauseStore::new();
        store.add(Component::Where, Clause::Having(Condition::null("x")));
        store.add(Component::Having, Clause::Where(Condition::null("y")));

        assert_eq!(store.get::<Condition>(Component::Where).len(), 1);
        let err = store.get_strict::<Condition>(Component::Where).unwrap_err();
        assert!(matches!(
            err,
            CompileError::InvalidClause {
                component: "where",
                found: "having"
            }
        ));
        let err = store.get_strict::<Condition>(Component::Having).unwrap_err();
        assert!(matches!(
            err,
            CompileError::InvalidClause {
                component: "having",
                found: "where"
            }
        ));
    }
}
