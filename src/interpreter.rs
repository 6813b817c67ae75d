/// Per-engine configuration.
///
/// Declares [`EngineConfig`](config::EngineConfig) and
/// [`AngleUnit`](config::AngleUnit) together with their defaults.
pub mod config;
/// The evaluator module reduces parsed trees to numbers.
///
/// The evaluator traverses the tree, looks up variables in the caller's
/// bindings, applies registered operators and functions, and reports domain
/// errors such as division by zero.
///
/// # Responsibilities
/// - Evaluates every node kind, arguments left to right.
/// - Reports undefined variables and domain errors with their position.
/// - Never mutates the tree; evaluations are independent.
pub mod evaluator;
/// The lexer module tokenizes source text for the parser.
///
/// The lexer reads the raw source text and produces a sequence of tokens:
/// numbers, identifiers, operator symbols, parentheses and separators, each
/// with its byte offset.
///
/// # Responsibilities
/// - Converts the input character stream into positioned tokens.
/// - Splits operator symbols by longest match against the registry.
/// - Reports lexical errors for characters no token can start with.
pub mod lexer;
/// The parser module builds expression trees from tokens.
///
/// The parser consumes the token sequence, resolves identifiers and operator
/// symbols against the registry and produces a tree honouring precedence and
/// associativity, optionally folding constant subtrees.
///
/// # Responsibilities
/// - Converts tokens into [`Expr`](crate::ast::Expr) nodes.
/// - Validates grammar and function arity, reporting errors with positions.
/// - Bounds nesting depth and tree height.
pub mod parser;
/// The registry module holds the builtin constants, operators and functions.
///
/// A registry is built once per engine from the configuration and never
/// changes afterwards. Both the lexer and the parser consult it, and the
/// query facade enumerates it.
pub mod registry;
