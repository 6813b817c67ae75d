use crate::{
    ast::Expr,
    error::RuntimeError,
    interpreter::{config::EngineConfig, evaluator::variables::VariableSource},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The read-only state of one evaluation: the configuration the expression
/// was parsed with and the caller's bindings.
///
/// A context holds no mutable state, so any number of evaluations of the same
/// tree can run at once, each with its own context.
pub struct Context<'a, V: ?Sized> {
    config:    &'a EngineConfig,
    variables: &'a V,
}

impl<'a, V: VariableSource + ?Sized> Context<'a, V> {
    /// Creates a context over `variables`.
    #[must_use]
    pub const fn new(config: &'a EngineConfig, variables: &'a V) -> Self {
        Self { config, variables }
    }

    /// Evaluates an expression tree to a number.
    ///
    /// Operands and arguments are evaluated left to right before the operator
    /// or function is applied. Recursion depth equals tree height, which the
    /// parser bounds by the configured maximum depth.
    ///
    /// # Errors
    /// - `UndefinedVariable` if a variable has no binding.
    /// - `Domain` if an operator or function rejects its operands.
    ///
    /// # Example
    /// ```
    /// use calculate::{Engine, interpreter::evaluator::core::Context};
    ///
    /// let engine = Engine::default();
    /// let expr = engine.parse("x / 2").unwrap();
    /// let context = Context::new(engine.config(), &[("x", 5.0)]);
    ///
    /// assert_eq!(context.eval(expr.tree()), Ok(2.5));
    /// ```
    pub fn eval(&self, expr: &Expr) -> EvalResult<f64> {
        match expr {
            Expr::Literal { value, .. } => Ok(*value),
            Expr::Variable { name, position } => self.eval_variable(name, *position),
            Expr::UnaryOp { op,
                            operand,
                            position, } => {
                let value = self.eval(operand)?;
                op.apply(&[value], self.config)
                  .map_err(|reason| domain(op.symbol, reason, *position))
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             position, } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                op.apply(&[left, right], self.config)
                  .map_err(|reason| domain(op.symbol, reason, *position))
            },
            Expr::Call { function,
                         arguments,
                         position, } => {
                let values = arguments.iter()
                                      .map(|argument| self.eval(argument))
                                      .collect::<EvalResult<Vec<f64>>>()?;
                function.apply(&values, self.config)
                        .map_err(|reason| domain(function.name, reason, *position))
            },
        }
    }

    /// Looks up a variable binding.
    fn eval_variable(&self, name: &str, position: usize) -> EvalResult<f64> {
        self.variables
            .lookup(name)
            .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.to_string(),
                                                              position })
    }
}

fn domain(operation: &str, reason: &'static str, position: usize) -> RuntimeError {
    RuntimeError::Domain { operation: operation.to_string(),
                           reason,
                           position }
}
