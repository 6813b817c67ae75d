/// Parsing errors.
///
/// Defines every failure that can occur while turning source text into an
/// [`Expression`](crate::Expression): invalid characters, grammar violations,
/// function arity mismatches, unknown operator symbols, depth guard trips and
/// invalid declared variable names.
pub mod parse_error;
/// Runtime errors.
///
/// Contains the data-dependent failures raised while evaluating a parsed
/// expression, such as a missing variable binding or a mathematically
/// undefined operation.
pub mod runtime_error;

pub use parse_error::{ParseError, ParseErrorKind};
pub use runtime_error::RuntimeError;
