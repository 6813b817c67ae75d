use std::collections::HashMap;

use serde::Serialize;
use tracing::trace;

use crate::interpreter::{
    config::EngineConfig,
    registry::{constants::CONSTANTS, functions::FUNCTIONS, operators::OPERATORS},
};

/// Result of applying a builtin: the value, or the reason the operands lie
/// outside the builtin's domain.
pub type BuiltinResult = Result<f64, &'static str>;

/// Signature shared by builtin operators and functions.
///
/// The slice always holds exactly as many operands as the entry's arity;
/// `apply` rejects any other length before the builtin runs.
pub type BuiltinFn = fn(&[f64], &EngineConfig) -> BuiltinResult;

/// Number of operands an operator takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorArity {
    /// Prefix operator with one operand.
    Unary,
    /// Infix operator with two operands.
    Binary,
}

impl OperatorArity {
    /// Number of operands an operator of this arity takes.
    #[must_use]
    pub const fn operands(self) -> usize {
        match self {
            Self::Unary => 1,
            Self::Binary => 2,
        }
    }
}

impl std::fmt::Display for OperatorArity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unary => write!(f, "unary"),
            Self::Binary => write!(f, "binary"),
        }
    }
}

/// How operators of equal precedence group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Associativity {
    /// `a - b - c` groups as `(a - b) - c`.
    Left,
    /// `a ^ b ^ c` groups as `a ^ (b ^ c)`.
    Right,
}

/// A named constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant {
    /// Name as written in expressions.
    pub name:  &'static str,
    /// Value substituted at parse time.
    pub value: f64,
}

/// A prefix or infix operator.
#[derive(Debug, Clone, Copy)]
pub struct Operator {
    /// Symbol as written in expressions.
    pub symbol:        &'static str,
    /// Unary or binary.
    pub arity:         OperatorArity,
    /// Binding strength; higher binds tighter.
    pub precedence:    u8,
    /// Grouping of equal-precedence chains.
    pub associativity: Associativity,
    pub(crate) func:   BuiltinFn,
}

impl Operator {
    /// Applies the operator to already evaluated operands.
    ///
    /// Fails without calling the builtin when the number of operands does not
    /// match the arity.
    ///
    /// # Example
    /// ```
    /// use calculate::{Engine, interpreter::registry::OperatorArity};
    ///
    /// let engine = Engine::default();
    /// let div = engine.registry().operator("/", OperatorArity::Binary).unwrap();
    ///
    /// assert_eq!(div.apply(&[6.0, 3.0], engine.config()), Ok(2.0));
    /// assert!(div.apply(&[1.0, 0.0], engine.config()).is_err());
    /// assert!(div.apply(&[1.0], engine.config()).is_err());
    /// ```
    pub fn apply(&self, operands: &[f64], config: &EngineConfig) -> BuiltinResult {
        checked(self.func, self.arity.operands(), operands, config)
    }
}

impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        self.symbol == other.symbol && self.arity == other.arity
    }
}

/// A function with a fixed number of arguments.
#[derive(Debug, Clone, Copy)]
pub struct Function {
    /// Name as written in expressions.
    pub name:        &'static str,
    /// Exact number of arguments.
    pub arity:       usize,
    pub(crate) func: BuiltinFn,
}

impl Function {
    /// Applies the function to already evaluated arguments.
    ///
    /// Fails without calling the builtin when the number of arguments differs
    /// from the arity.
    pub fn apply(&self, arguments: &[f64], config: &EngineConfig) -> BuiltinResult {
        checked(self.func, self.arity, arguments, config)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Runs a builtin and rejects a NaN produced from operands that were not NaN.
fn checked(func: BuiltinFn, arity: usize, args: &[f64], config: &EngineConfig) -> BuiltinResult {
    if args.len() != arity {
        return Err("wrong number of operands");
    }
    let value = func(args, config)?;
    if value.is_nan() && !args.iter().any(|a| a.is_nan()) {
        return Err("result is not a number");
    }
    Ok(value)
}

/// Immutable table of the constants, operators and functions known to one
/// engine.
///
/// Built once from the builtin tables and the engine configuration; nothing can
/// be added or removed afterwards. Lookups are hash based. Enumeration follows
/// registration order.
#[derive(Debug, Clone)]
pub struct Registry {
    config:    EngineConfig,
    constants: HashMap<&'static str, Constant>,
    functions: HashMap<&'static str, Function>,
    unary:     HashMap<&'static str, Operator>,
    binary:    HashMap<&'static str, Operator>,
    /// Every operator symbol, longest first, for maximal munch in the lexer.
    symbols:   Vec<&'static str>,
}

impl Registry {
    /// Builds the registry for `config` from the builtin tables.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let constants = CONSTANTS.iter().map(|c| (c.name, *c)).collect();
        let functions = FUNCTIONS.iter().map(|f| (f.name, *f)).collect();
        let mut unary = HashMap::new();
        let mut binary = HashMap::new();
        for op in OPERATORS {
            match op.arity {
                OperatorArity::Unary => unary.insert(op.symbol, *op),
                OperatorArity::Binary => binary.insert(op.symbol, *op),
            };
        }

        let mut symbols: Vec<&'static str> = Vec::new();
        for op in OPERATORS {
            if !symbols.contains(&op.symbol) {
                symbols.push(op.symbol);
            }
        }
        symbols.sort_by_key(|s| std::cmp::Reverse(s.len()));

        trace!(constants = CONSTANTS.len(),
               functions = FUNCTIONS.len(),
               operators = OPERATORS.len(),
               "registry built");

        Self { config,
               constants,
               functions,
               unary,
               binary,
               symbols }
    }

    /// The configuration the registry was built with.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Looks up a constant by name.
    #[must_use]
    pub fn constant(&self, name: &str) -> Option<&Constant> {
        self.constants.get(name)
    }

    /// Looks up a function by name.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    /// Looks up an operator by symbol and arity.
    ///
    /// # Example
    /// ```
    /// use calculate::{Engine, interpreter::registry::{Associativity, OperatorArity}};
    ///
    /// let engine = Engine::default();
    /// let pow = engine.registry().operator("^", OperatorArity::Binary).unwrap();
    ///
    /// assert_eq!(pow.associativity, Associativity::Right);
    /// assert!(engine.registry().operator("*", OperatorArity::Unary).is_none());
    /// ```
    #[must_use]
    pub fn operator(&self, symbol: &str, arity: OperatorArity) -> Option<&Operator> {
        match arity {
            OperatorArity::Unary => self.unary.get(symbol),
            OperatorArity::Binary => self.binary.get(symbol),
        }
    }

    /// Returns the longest registered operator symbol that prefixes `input`.
    ///
    /// # Example
    /// ```
    /// use calculate::Engine;
    ///
    /// let engine = Engine::default();
    ///
    /// assert_eq!(engine.registry().longest_operator("**2"), Some("**"));
    /// assert_eq!(engine.registry().longest_operator("*-2"), Some("*"));
    /// assert_eq!(engine.registry().longest_operator("$"), None);
    /// ```
    #[must_use]
    pub fn longest_operator(&self, input: &str) -> Option<&'static str> {
        self.symbols
            .iter()
            .copied()
            .find(|symbol| input.starts_with(symbol))
    }

    /// Constants in registration order.
    pub fn constants(&self) -> impl Iterator<Item = &Constant> {
        CONSTANTS.iter()
                 .filter_map(|c| self.constants.get(c.name))
    }

    /// Functions in registration order.
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        FUNCTIONS.iter()
                 .filter_map(|f| self.functions.get(f.name))
    }

    /// Operators in registration order, unary and binary interleaved as
    /// registered.
    pub fn operators(&self) -> impl Iterator<Item = &Operator> {
        OPERATORS.iter()
                 .filter_map(|op| self.operator(op.symbol, op.arity))
    }

    /// Distinct operator symbols in registration order.
    #[must_use]
    pub fn operator_symbols(&self) -> Vec<&'static str> {
        let mut seen = Vec::new();
        for op in self.operators() {
            if !seen.contains(&op.symbol) {
                seen.push(op.symbol);
            }
        }
        seen
    }
}
