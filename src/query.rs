use serde::Serialize;

use crate::interpreter::{
    config::EngineConfig,
    registry::{Associativity, OperatorArity, Registry},
};

/// Metadata of a registered constant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstantInfo {
    /// Name as written in expressions.
    pub name:  String,
    /// Value.
    pub value: f64,
}

/// Metadata of a registered function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionInfo {
    /// Name as written in expressions.
    pub name:  String,
    /// Exact number of arguments.
    pub arity: usize,
}

/// Metadata of a registered operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperatorInfo {
    /// Symbol as written in expressions.
    pub symbol:        String,
    /// Unary or binary.
    pub arity:         OperatorArity,
    /// Binding strength; higher binds tighter.
    pub precedence:    u8,
    /// Grouping of equal-precedence chains.
    pub associativity: Associativity,
}

/// Read-only introspection over an engine's registry.
///
/// Intended for help surfaces and host bindings that expose the available
/// names; it has no effect on parsing or evaluation.
///
/// # Example
/// ```
/// use calculate::Engine;
///
/// let engine = Engine::default();
/// let query = engine.query();
///
/// assert_eq!(query.constant_names(), ["pi", "e", "tau", "phi"]);
/// assert!(query.function_names().contains(&"atan2".to_string()));
/// assert_eq!(query.operator_symbols(), ["+", "-", "*", "/", "%", "^", "**"]);
/// assert_eq!(query.function("clamp").map(|f| f.arity), Some(3));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Query<'a> {
    registry: &'a Registry,
}

impl<'a> Query<'a> {
    /// Wraps a registry.
    #[must_use]
    pub const fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &'a EngineConfig {
        self.registry.config()
    }

    /// Constants with their values, in registration order.
    #[must_use]
    pub fn constants(&self) -> Vec<ConstantInfo> {
        self.registry
            .constants()
            .map(|c| ConstantInfo { name:  c.name.to_string(),
                                    value: c.value, })
            .collect()
    }

    /// Functions with their arities, in registration order.
    #[must_use]
    pub fn functions(&self) -> Vec<FunctionInfo> {
        self.registry
            .functions()
            .map(|f| FunctionInfo { name:  f.name.to_string(),
                                    arity: f.arity, })
            .collect()
    }

    /// Operators with their parsing properties, in registration order.
    #[must_use]
    pub fn operators(&self) -> Vec<OperatorInfo> {
        self.registry
            .operators()
            .map(|op| OperatorInfo { symbol:        op.symbol.to_string(),
                                     arity:         op.arity,
                                     precedence:    op.precedence,
                                     associativity: op.associativity, })
            .collect()
    }

    /// Metadata of one function.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<FunctionInfo> {
        self.registry
            .function(name)
            .map(|f| FunctionInfo { name:  f.name.to_string(),
                                    arity: f.arity, })
    }

    /// Constant names, in registration order.
    #[must_use]
    pub fn constant_names(&self) -> Vec<String> {
        self.registry
            .constants()
            .map(|c| c.name.to_string())
            .collect()
    }

    /// Function names, in registration order.
    #[must_use]
    pub fn function_names(&self) -> Vec<String> {
        self.registry
            .functions()
            .map(|f| f.name.to_string())
            .collect()
    }

    /// Distinct operator symbols, in registration order.
    #[must_use]
    pub fn operator_symbols(&self) -> Vec<String> {
        self.registry
            .operator_symbols()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
