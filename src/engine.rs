use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::{
    ast::Expr,
    error::{ParseError, RuntimeError},
    interpreter::{
        config::EngineConfig,
        evaluator::{
            core::{Context, EvalResult},
            variables::VariableSource,
        },
        lexer::tokenize,
        parser::core::{ParseResult, ParsedTree, parse, validate_names},
        registry::Registry,
    },
    query::Query,
};

/// An expression engine: a registry built from one configuration.
///
/// The engine is immutable after construction and can be shared across threads
/// without locking. Engines with different configurations coexist freely.
///
/// # Example
/// ```
/// use calculate::{AngleUnit, Engine, EngineConfig};
///
/// let radians = Engine::default();
/// let degrees = Engine::new(EngineConfig::default().with_angle_unit(AngleUnit::Degrees));
///
/// assert_eq!(degrees.parse("sin(90)").unwrap().evaluate(&()), Ok(1.0));
/// assert!(radians.parse("sin(90)").unwrap().evaluate(&()).unwrap() < 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Registry,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    /// Creates an engine for `config`.
    ///
    /// A negative precision is replaced by its magnitude and a maximum depth
    /// of zero by one.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { registry: Registry::new(config.normalized()) }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        self.registry.config()
    }

    /// The registry of constants, operators and functions.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Read-only introspection over the registry.
    #[must_use]
    pub const fn query(&self) -> Query<'_> {
        Query::new(&self.registry)
    }

    /// Parses `source` into an [`Expression`].
    ///
    /// Every identifier that is not a constant or a called function becomes
    /// a free variable.
    ///
    /// # Errors
    /// Fails with a lexical, syntax, arity, unknown operator or too complex
    /// [`ParseError`]. A successfully parsed expression is free of all of
    /// them.
    ///
    /// # Example
    /// ```
    /// use calculate::{Engine, ParseErrorKind};
    ///
    /// let engine = Engine::default();
    ///
    /// assert_eq!(engine.parse("2+3*4").unwrap().evaluate(&()), Ok(14.0));
    /// assert_eq!(engine.parse("2^3^2").unwrap().evaluate(&()), Ok(512.0));
    /// assert_eq!(engine.parse("max(1)").unwrap_err().kind(), ParseErrorKind::Arity);
    /// ```
    pub fn parse(&self, source: &str) -> ParseResult<Expression> {
        self.build(source, None)
    }

    /// Parses `source` with a fixed, ordered list of variable names.
    ///
    /// The names become the parameters of the expression, in order, for
    /// [`Expression::call`]. Any other identifier that is not a constant or a
    /// called function is rejected.
    ///
    /// # Errors
    /// Besides the errors of [`Engine::parse`], fails with `BadName`,
    /// `DuplicateName` or `UndefinedSymbol`.
    ///
    /// # Example
    /// ```
    /// use calculate::{Engine, ParseError};
    ///
    /// let engine = Engine::default();
    /// let hyp = engine.parse_with_variables("sqrt(a^2 + b^2)", ["a", "b"]).unwrap();
    ///
    /// assert_eq!(hyp.call(&[3.0, 4.0]), Ok(5.0));
    /// assert!(matches!(engine.parse_with_variables("a + c", ["a"]),
    ///                  Err(ParseError::UndefinedSymbol { .. })));
    /// ```
    pub fn parse_with_variables<I, S>(&self, source: &str, names: I) -> ParseResult<Expression>
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        validate_names(&names, &self.registry)?;
        self.build(source, Some(names))
    }

    /// Parses `source` with variables declared as one comma-separated list,
    /// e.g. `"x, y"`.
    ///
    /// Whitespace in the list is ignored and an empty list declares no
    /// variables. Empty entries such as the one in `"x,,y"` are rejected as
    /// `BadName`.
    ///
    /// # Errors
    /// As [`Engine::parse_with_variables`].
    ///
    /// # Example
    /// ```
    /// use calculate::Engine;
    ///
    /// let engine = Engine::default();
    /// let expr = engine.parse_with_variable_list("x - y", " y , x ").unwrap();
    ///
    /// assert_eq!(expr.parameters(), ["y", "x"]);
    /// assert_eq!(expr.call(&[1.0, 3.0]), Ok(2.0));
    /// ```
    pub fn parse_with_variable_list(&self, source: &str, list: &str) -> ParseResult<Expression> {
        let compact: String = list.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return self.parse_with_variables(source, std::iter::empty::<String>());
        }
        self.parse_with_variables(source, compact.split(','))
    }

    /// Names of the constants, in registration order.
    #[must_use]
    pub fn list_constants(&self) -> Vec<String> {
        self.query().constant_names()
    }

    /// Names of the functions, in registration order.
    #[must_use]
    pub fn list_functions(&self) -> Vec<String> {
        self.query().function_names()
    }

    /// Distinct operator symbols, in registration order.
    #[must_use]
    pub fn list_operators(&self) -> Vec<String> {
        self.query().operator_symbols()
    }

    fn build(&self, source: &str, declared: Option<Vec<String>>) -> ParseResult<Expression> {
        let tokens = tokenize(source, &self.registry)?;
        let ParsedTree { root, variables } =
            parse(tokens, &self.registry, declared.as_deref()).inspect_err(|e| {
                                                                   debug!(%e, "parse failed");
                                                               })?;

        debug!(len = source.len(),
               variables = variables.len(),
               optimize = self.config().optimize,
               "parsed expression");

        let parameters = declared.unwrap_or_else(|| variables.keys().cloned().collect());
        Ok(Expression { source: source.to_string(),
                        root,
                        variables: variables.keys().cloned().collect(),
                        first_use: variables,
                        parameters,
                        config: *self.config() })
    }
}

/// A parsed, immutable expression.
///
/// Holds the tree, its free variables and the configuration it was parsed
/// with; it does not borrow the engine. Evaluate it any number of times, from
/// any number of threads, each call with its own bindings.
#[derive(Debug, Clone)]
pub struct Expression {
    source:     String,
    root:       Expr,
    variables:  BTreeSet<String>,
    first_use:  BTreeMap<String, usize>,
    parameters: Vec<String>,
    config:     EngineConfig,
}

impl Expression {
    /// The source text the expression was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The root of the expression tree.
    #[must_use]
    pub const fn tree(&self) -> &Expr {
        &self.root
    }

    /// The configuration the expression was parsed with.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Names that must be bound at evaluation.
    ///
    /// ```
    /// use calculate::Engine;
    ///
    /// let expr = Engine::default().parse("x + 1").unwrap();
    /// assert_eq!(expr.variables().iter().collect::<Vec<_>>(), ["x"]);
    /// ```
    #[must_use]
    pub const fn variables(&self) -> &BTreeSet<String> {
        &self.variables
    }

    /// Parameter order used by [`Expression::call`]: the declared names, or
    /// the free variables sorted by name.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Evaluates the expression with `variables`.
    ///
    /// Every free variable is checked for a binding before the walk starts.
    ///
    /// # Errors
    /// - `UndefinedVariable` naming the first unbound free variable, in name
    ///   order, and the offset of its first occurrence.
    /// - `Domain` if an operation is undefined for the values involved.
    ///
    /// # Example
    /// ```
    /// use std::collections::HashMap;
    ///
    /// use calculate::{Engine, RuntimeError};
    ///
    /// let expr = Engine::default().parse("1/x").unwrap();
    ///
    /// let x = HashMap::from([("x".to_string(), 4.0)]);
    /// assert_eq!(expr.evaluate(&x), Ok(0.25));
    ///
    /// let zero = HashMap::from([("x".to_string(), 0.0)]);
    /// assert!(matches!(expr.evaluate(&zero), Err(RuntimeError::Domain { .. })));
    ///
    /// assert!(matches!(expr.evaluate(&()), Err(RuntimeError::UndefinedVariable { .. })));
    /// ```
    pub fn evaluate<V: VariableSource + ?Sized>(&self, variables: &V) -> EvalResult<f64> {
        if let Some((name, position)) = self.first_use
                                            .iter()
                                            .find(|(name, _)| variables.lookup(name).is_none())
        {
            debug!(%name, position, "unbound variable");
            return Err(RuntimeError::UndefinedVariable { name:     name.clone(),
                                                         position: *position, });
        }

        Context::new(&self.config, variables).eval(&self.root)
                                              .inspect_err(|e| debug!(%e, "evaluation failed"))
    }

    /// Evaluates the expression binding `values` to [`parameters`] in order.
    ///
    /// [`parameters`]: Expression::parameters
    ///
    /// # Errors
    /// `ArgumentCountMismatch` when the number of values differs from the
    /// number of parameters, otherwise as [`Expression::evaluate`].
    pub fn call(&self, values: &[f64]) -> EvalResult<f64> {
        if values.len() != self.parameters.len() {
            return Err(RuntimeError::ArgumentCountMismatch { expected: self.parameters.len(),
                                                             found:    values.len(), });
        }
        let bindings: Vec<(&str, f64)> = self.parameters
                                             .iter()
                                             .map(String::as_str)
                                             .zip(values.iter().copied())
                                             .collect();
        self.evaluate(bindings.as_slice())
    }
}

/// Two expressions are equal when they were parsed from the same source with
/// the same parameters under the same configuration.
impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
        && self.parameters == other.parameters
        && self.config == other.config
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::str::FromStr for Expression {
    type Err = ParseError;

    /// Parses with the default engine configuration.
    fn from_str(source: &str) -> Result<Self, Self::Err> {
        Engine::default().parse(source)
    }
}
