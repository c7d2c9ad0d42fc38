//! Error types for query compilation.

use thiserror::Error;

/// Errors that abort a compile call.
///
/// Compilation is a pure function of the clause tree, so the same input
/// always fails the same way. No partial SQL is ever returned.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Deep-join expansion could not determine the root table or alias.
    #[error("cannot expand deep join '{0}': the query has no named FROM table or alias")]
    MissingRoot(String),

    /// A component holds a clause variant that does not belong to it.
    #[error("invalid clause in '{component}' component: found {found}")]
    InvalidClause {
        /// Component being compiled.
        component: &'static str,
        /// Variant that was found instead.
        found: &'static str,
    },

    /// A raw fragment's placeholders disagree with its bindings.
    #[error("raw fragment has {found} placeholder(s) but {expected} binding(s)")]
    PlaceholderMismatch {
        /// Number of bindings supplied.
        expected: usize,
        /// Number of placeholders found in the text.
        found: usize,
    },

    /// No condition handler is registered for a tag.
    #[error("no condition compiler registered for '{0}'")]
    UnresolvedHandler(String),

    /// The compiler configuration could not be parsed.
    #[error("invalid compiler configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

/// Result type alias for compile operations.
pub type Result<T> = std::result::Result<T, CompileError>;
