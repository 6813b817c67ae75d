/// Core evaluation logic.
///
/// Walks an expression tree and reduces it to a number, applying registered
/// operators and functions and reporting domain errors with their position.
pub mod core;

/// Variable bindings.
///
/// Defines the [`VariableSource`](variables::VariableSource) trait through
/// which an evaluation looks up the values of free variables.
pub mod variables;
