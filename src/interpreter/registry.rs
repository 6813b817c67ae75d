/// Registry entry types and the lookup table built per engine.
pub mod core;

/// Builtin constants.
pub mod constants;

/// Builtin prefix and infix operators.
///
/// Each operator carries its symbol, arity, precedence, associativity and the
/// function that applies it.
pub mod operators;

/// Builtin functions and their fixed arities.
///
/// Trigonometric functions honour the configured angle unit; functions with
/// integer guards use the configured precision.
pub mod functions;

pub use self::core::{
    Associativity, BuiltinFn, BuiltinResult, Constant, Function, Operator, OperatorArity, Registry,
};
