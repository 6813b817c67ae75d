/// Parser state, entry point and depth guards.
///
/// Contains the [`Parser`](core::Parser) itself, the result type, node
/// construction with constant folding and validation of declared variable
/// names.
pub mod core;

/// Infix operator parsing.
///
/// Implements precedence climbing over the binary operators of the registry,
/// honouring their precedence and associativity.
pub mod binary;

/// Prefix operators and primary expressions.
///
/// Handles prefix operators, literals, identifier resolution, parenthesized
/// groups and function calls.
pub mod unary;

/// Helpers shared by the parsing functions.
pub mod utils;
