use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every way a formula evaluation can fail.
///
/// A formula either fully succeeds or fully fails: any of these aborts
/// [`Engine::produce`](crate::Engine::produce) with no partial result. Hosts
/// that substitute per-token fallbacks do so outside this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FormulaError {
    /// The lexer/parser could not match the grammar. `near` holds the two most
    /// recently consumed characters for diagnostic context.
    #[error("syntax error: expected {expected} near `{near}`")]
    Syntax { expected: String, near: String },

    /// A forced call site's name is not in the function registry.
    ///
    /// Names are resolved only when a call site is forced, so an unknown
    /// function inside a never-taken branch does not produce this error.
    #[error("unknown function `{0}`")]
    UnknownFunction(String),

    /// A handler was invoked with the wrong number of arguments.
    #[error("`{function}` expects {expected}, got {actual} argument(s)")]
    Arity {
        function: String,
        expected: String,
        actual: usize,
    },

    /// A handler forced an argument whose runtime type violates its contract.
    #[error("`{function}` expects {expected}, got {actual}")]
    Type {
        function: String,
        expected: String,
        actual: String,
    },

    /// `IsEqual` was given operands of types it cannot compare.
    #[error("cannot compare {left} with {right}")]
    IncompatibleComparison { left: String, right: String },

    /// The host field provider failed to resolve a dotted field path.
    #[error("field `{path}` could not be resolved: {message}")]
    Field { path: String, message: String },
}

impl FormulaError {
    pub fn type_error(
        function: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        FormulaError::Type {
            function: function.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}
