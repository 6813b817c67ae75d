use crate::{
    interpreter::{
        config::EngineConfig,
        registry::{Associativity, BuiltinResult, Operator, OperatorArity},
    },
    util::num::integral_value,
};

/// Precedence shared by all prefix operators; binds tighter than any infix
/// operator.
pub const PREFIX_PRECEDENCE: u8 = 40;

/// Defines the operator table.
///
/// Each entry provides the symbol, arity, precedence, associativity and the
/// function applying the operator. The macro produces `OPERATORS`, the static
/// table the registry is built from.
macro_rules! builtin_operators {
    (
        $(
            $symbol:literal => {
                arity: $arity:ident,
                precedence: $precedence:expr,
                assoc: $assoc:ident,
                func: $func:path $(,)?
            }
        ),* $(,)?
    ) => {
        /// Builtin operators, in enumeration order.
        pub static OPERATORS: &[Operator] = &[
            $(
                Operator { symbol:        $symbol,
                           arity:         OperatorArity::$arity,
                           precedence:    $precedence,
                           associativity: Associativity::$assoc,
                           func:          $func },
            )*
        ];
    };
}

builtin_operators! {
    "+"  => { arity: Unary,  precedence: PREFIX_PRECEDENCE, assoc: Right, func: identity },
    "-"  => { arity: Unary,  precedence: PREFIX_PRECEDENCE, assoc: Right, func: negate },
    "+"  => { arity: Binary, precedence: 10, assoc: Left,  func: add },
    "-"  => { arity: Binary, precedence: 10, assoc: Left,  func: sub },
    "*"  => { arity: Binary, precedence: 20, assoc: Left,  func: mul },
    "/"  => { arity: Binary, precedence: 20, assoc: Left,  func: div },
    "%"  => { arity: Binary, precedence: 20, assoc: Left,  func: rem },
    "^"  => { arity: Binary, precedence: 30, assoc: Right, func: pow },
    "**" => { arity: Binary, precedence: 30, assoc: Right, func: pow },
}

fn identity(args: &[f64], _: &EngineConfig) -> BuiltinResult {
    Ok(args[0])
}

fn negate(args: &[f64], _: &EngineConfig) -> BuiltinResult {
    Ok(-args[0])
}

fn add(args: &[f64], _: &EngineConfig) -> BuiltinResult {
    Ok(args[0] + args[1])
}

fn sub(args: &[f64], _: &EngineConfig) -> BuiltinResult {
    Ok(args[0] - args[1])
}

fn mul(args: &[f64], _: &EngineConfig) -> BuiltinResult {
    Ok(args[0] * args[1])
}

fn div(args: &[f64], _: &EngineConfig) -> BuiltinResult {
    if args[1] == 0.0 {
        return Err("division by zero");
    }
    Ok(args[0] / args[1])
}

/// Truncated remainder; the result has the sign of the dividend.
fn rem(args: &[f64], _: &EngineConfig) -> BuiltinResult {
    if args[1] == 0.0 {
        return Err("modulo by zero");
    }
    Ok(args[0] % args[1])
}

/// Exponentiation.
///
/// A zero base with a negative exponent divides by zero. A negative base needs
/// an exponent that is integral within the configured precision; the exponent
/// is then snapped to that integer.
///
/// # Example
/// ```
/// use calculate::{Engine, interpreter::registry::OperatorArity};
///
/// let engine = Engine::default();
/// let pow = engine.registry().operator("^", OperatorArity::Binary).unwrap();
///
/// assert_eq!(pow.apply(&[-2.0, 3.0], engine.config()), Ok(-8.0));
/// assert!(pow.apply(&[-8.0, 1.0 / 3.0], engine.config()).is_err());
/// assert!(pow.apply(&[0.0, -1.0], engine.config()).is_err());
/// ```
pub(crate) fn pow(args: &[f64], config: &EngineConfig) -> BuiltinResult {
    let (base, exponent) = (args[0], args[1]);

    if base == 0.0 && exponent < 0.0 {
        return Err("division by zero");
    }
    if base < 0.0 {
        let exponent = integral_value(exponent, config.precision)
            .ok_or("fractional power of a negative number")?;
        return Ok(base.powf(exponent));
    }
    Ok(base.powf(exponent))
}
