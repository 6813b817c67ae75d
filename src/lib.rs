//! # calculate
//!
//! calculate is a small math expression parser and evaluator written in Rust.
//! It turns a formula such as `sqrt(x^2 + y^2)` into an immutable expression
//! tree that can be evaluated any number of times against different variable
//! bindings, and exposes the builtin constants, operators and functions for
//! introspection.
//!
//! ```
//! use calculate::{Engine, EngineConfig};
//!
//! let engine = Engine::new(EngineConfig::default());
//! let expr = engine.parse("2 * pi * r").unwrap();
//!
//! let area = expr.evaluate(&[("r", 1.0)]).unwrap();
//! assert!((area - std::f64::consts::TAU).abs() < 1e-12);
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::evaluator::variables::VariableSource;

/// Defines the structure of parsed expressions.
///
/// This module declares the `Expr` enum, the tree the parser builds and the
/// evaluator walks. Nodes carry the byte offset of the source text they came
/// from for error reporting.
///
/// # Responsibilities
/// - Defines literal, variable, operator and call nodes.
/// - Renders trees in canonical parenthesized form.
pub mod ast;
/// The expression engine and its parsed expressions.
///
/// An [`Engine`] owns a registry built from an [`EngineConfig`]; it parses
/// source text into [`Expression`]s, which evaluate independently of the
/// engine.
pub mod engine;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised while lexing, parsing, or
/// evaluating an expression. Every error carries the position or name needed
/// to render a precise diagnostic.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches source positions and offending text or names.
/// - Integrates with `std::error::Error` through `thiserror`.
pub mod error;
/// Orchestrates the phases of expression processing.
///
/// This module ties together configuration, the builtin registry, lexing,
/// parsing and evaluation.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, registry and evaluator.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// Read-only introspection over the builtin registry.
pub mod query;
/// General numeric helpers shared by the registry and the parser.
pub mod util;

pub use engine::{Engine, Expression};
pub use error::{ParseError, ParseErrorKind, RuntimeError};
pub use interpreter::config::{AngleUnit, EngineConfig};
pub use query::Query;

/// Parses and evaluates `source` with the default configuration.
///
/// # Errors
/// Returns an error if parsing or evaluation fails.
///
/// # Examples
/// ```
/// use calculate::evaluate;
///
/// assert_eq!(evaluate("(2 + 3) * 4", &()).unwrap(), 20.0);
///
/// // 'x' is not bound.
/// assert!(evaluate("x + 1", &()).is_err());
/// assert_eq!(evaluate("x + 1", &[("x", 2.0)]).unwrap(), 3.0);
/// ```
pub fn evaluate<V: VariableSource + ?Sized>(source: &str,
                                            variables: &V)
                                            -> Result<f64, Box<dyn std::error::Error>> {
    let expression = Engine::default().parse(source)?;
    Ok(expression.evaluate(variables)?)
}
