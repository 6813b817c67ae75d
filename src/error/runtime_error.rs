use thiserror::Error;

/// Represents all errors that can occur during evaluation.
///
/// A failed evaluation never alters the expression; the same expression can be
/// evaluated again with different bindings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A free variable had no binding.
    #[error("Error at position {position}: Undefined variable '{name}'.")]
    UndefinedVariable {
        /// The name of the variable.
        name:     String,
        /// Byte offset of the variable's first occurrence in the source.
        position: usize,
    },
    /// An operator or function was applied outside of its domain.
    #[error("Error at position {position}: Domain error in '{operation}': {reason}.")]
    Domain {
        /// The operator symbol or function name.
        operation: String,
        /// Why the operation is undefined for its operands.
        reason:    &'static str,
        /// Byte offset of the operation in the source.
        position:  usize,
    },
    /// Positional evaluation received the wrong number of values.
    #[error("Expected {expected} value(s), found {found}.")]
    ArgumentCountMismatch {
        /// Number of parameters of the expression.
        expected: usize,
        /// Number of values supplied.
        found:    usize,
    },
}
