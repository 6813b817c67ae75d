use crate::interpreter::registry::{Function, Operator};

/// A literal too large for `f64`; it reads back as infinity.
const OVERFLOW: &str = "1e999";

/// A node of a parsed expression tree.
///
/// Every node owns its children exclusively; trees are never shared and never
/// cyclic. Operators and functions are resolved against the registry while
/// parsing, so a tree can be evaluated without access to the engine that
/// built it.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal, a constant, or a folded subtree.
    Literal {
        /// The value.
        value:    f64,
        /// Byte offset in the source.
        position: usize,
    },
    /// Reference to a free variable by name.
    Variable {
        /// Name of the variable.
        name:     String,
        /// Byte offset in the source.
        position: usize,
    },
    /// A prefix operation (e.g. `-x`).
    UnaryOp {
        /// The operator to apply.
        op:       Operator,
        /// The operand.
        operand:  Box<Self>,
        /// Byte offset of the operator symbol.
        position: usize,
    },
    /// An infix operation (e.g. `a + b`).
    BinaryOp {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       Operator,
        /// Right operand.
        right:    Box<Self>,
        /// Byte offset of the operator symbol.
        position: usize,
    },
    /// Function call expression (e.g. `sin(x)`).
    Call {
        /// The function being called.
        function:  Function,
        /// Arguments, evaluated left to right.
        arguments: Vec<Self>,
        /// Byte offset of the function name.
        position:  usize,
    },
}

impl Expr {
    /// Gets the source position from `self`.
    /// ## Example
    /// ```
    /// use calculate::ast::Expr;
    ///
    /// let expr = Expr::Variable { name:     "x".to_string(),
    ///                             position: 5, };
    ///
    /// assert_eq!(expr.position(), 5);
    /// ```
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Literal { position, .. }
            | Self::Variable { position, .. }
            | Self::UnaryOp { position, .. }
            | Self::BinaryOp { position, .. }
            | Self::Call { position, .. } => *position,
        }
    }

    /// Returns the value of a literal node.
    #[must_use]
    pub const fn literal_value(&self) -> Option<f64> {
        match self {
            Self::Literal { value, .. } => Some(*value),
            _ => None,
        }
    }
}

/// Renders the tree in canonical, fully parenthesized infix form.
///
/// The rendering parses back to an expression with the same value. An
/// infinite literal, which only folding can produce, is written as the
/// overflowing literal `1e999`.
/// NaN literals never come out of the parser and render as `NaN`.
///
/// ```
/// use calculate::{Engine, EngineConfig};
///
/// let engine = Engine::new(EngineConfig::default().with_optimize(false));
/// let expr = engine.parse("2 + 3 * -x").unwrap();
///
/// assert_eq!(expr.tree().to_string(), "(2 + (3 * (-x)))");
/// ```
impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal { value, .. } if value.is_infinite() => {
                if value.is_sign_negative() {
                    write!(f, "(-{OVERFLOW})")
                } else {
                    write!(f, "{OVERFLOW}")
                }
            },
            Self::Literal { value, .. } if value.is_sign_negative() && *value != 0.0 => {
                write!(f, "({value})")
            },
            Self::Literal { value, .. } => write!(f, "{value}"),
            Self::Variable { name, .. } => write!(f, "{name}"),
            Self::UnaryOp { op, operand, .. } => write!(f, "({}{operand})", op.symbol),
            Self::BinaryOp { left, op, right, .. } => {
                write!(f, "({left} {} {right})", op.symbol)
            },
            Self::Call { function,
                         arguments,
                         .. } => {
                write!(f, "{}(", function.name)?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                write!(f, ")")
            },
        }
    }
}
