//! Generic SQL dialect.

use super::Dialect;

/// A dialect-neutral strategy: bare identifiers, ANSI function names, no
/// set operations or locking.
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Creates a new generic dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Lock, LockStrength};

    #[test]
    fn test_generic_dialect() {
        let dialect = GenericDialect::new();
        assert_eq!(dialect.name(), "generic");
        assert_eq!(dialect.identifier_quote(), None);
        assert_eq!(dialect.wrap("users.id as uid"), "users.id AS uid");
        assert_eq!(dialect.compile_random(Some("42")), "RANDOM()");
        assert_eq!(dialect.compile_upper("name"), "UPPER(name)");
        let lock = Lock {
            strength: LockStrength::Update,
            nowait: false,
        };
        assert_eq!(dialect.compile_lock(&lock), None);
    }
}
