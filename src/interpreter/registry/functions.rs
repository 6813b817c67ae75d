use crate::{
    interpreter::{
        config::{AngleUnit, EngineConfig},
        registry::{BuiltinResult, Function, operators},
    },
    util::num::{MAX_FACTORIAL_ARGUMENT, approx_eq, small_natural},
};

/// Defines the function table.
///
/// Each entry provides a name, an exact arity and the function implementing
/// it. The macro produces `FUNCTIONS`, the static table the registry is built
/// from.
macro_rules! builtin_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:path $(,)?
            }
        ),* $(,)?
    ) => {
        /// Builtin functions, in enumeration order.
        pub static FUNCTIONS: &[Function] = &[
            $(
                Function { name: $name, arity: $arity, func: $func },
            )*
        ];
    };
}

builtin_functions! {
    "sin"     => { arity: 1, func: sin },
    "cos"     => { arity: 1, func: cos },
    "tan"     => { arity: 1, func: tan },
    "asin"    => { arity: 1, func: asin },
    "acos"    => { arity: 1, func: acos },
    "atan"    => { arity: 1, func: atan },
    "sinh"    => { arity: 1, func: sinh },
    "cosh"    => { arity: 1, func: cosh },
    "tanh"    => { arity: 1, func: tanh },
    "exp"     => { arity: 1, func: exp },
    "ln"      => { arity: 1, func: ln },
    "log2"    => { arity: 1, func: log2 },
    "log10"   => { arity: 1, func: log10 },
    "sqrt"    => { arity: 1, func: sqrt },
    "cbrt"    => { arity: 1, func: cbrt },
    "abs"     => { arity: 1, func: abs },
    "floor"   => { arity: 1, func: floor },
    "ceil"    => { arity: 1, func: ceil },
    "round"   => { arity: 1, func: round },
    "trunc"   => { arity: 1, func: trunc },
    "sign"    => { arity: 1, func: sign },
    "fact"    => { arity: 1, func: fact },
    "radians" => { arity: 1, func: radians },
    "degrees" => { arity: 1, func: degrees },
    "log"     => { arity: 2, func: log },
    "atan2"   => { arity: 2, func: atan2 },
    "hypot"   => { arity: 2, func: hypot },
    "pow"     => { arity: 2, func: operators::pow },
    "min"     => { arity: 2, func: min },
    "max"     => { arity: 2, func: max },
    "clamp"   => { arity: 3, func: clamp },
}

/// Generates a one-argument builtin that applies the `f64` method of the same
/// name and is defined on the whole real line.
macro_rules! real_builtin {
    ($($fname:ident),* $(,)?) => {
        $(
            fn $fname(args: &[f64], _: &EngineConfig) -> BuiltinResult {
                Ok(args[0].$fname())
            }
        )*
    };
}

real_builtin!(sinh, cosh, tanh, exp, cbrt, abs, floor, ceil, round, trunc);

/// Results this close to zero are snapped to zero in degree mode, so that
/// `sin(180)` is exactly `0`.
fn snap(value: f64, config: &EngineConfig) -> f64 {
    if config.angle_unit == AngleUnit::Degrees && value.abs() <= config.precision {
        0.0
    } else {
        value
    }
}

fn sin(args: &[f64], config: &EngineConfig) -> BuiltinResult {
    Ok(snap(config.angle_unit.to_radians(args[0]).sin(), config))
}

fn cos(args: &[f64], config: &EngineConfig) -> BuiltinResult {
    Ok(snap(config.angle_unit.to_radians(args[0]).cos(), config))
}

/// Tangent; undefined wherever the cosine vanishes within the configured
/// precision.
fn tan(args: &[f64], config: &EngineConfig) -> BuiltinResult {
    let angle = config.angle_unit.to_radians(args[0]);
    if angle.cos().abs() <= config.precision {
        return Err("tangent is undefined at odd multiples of a right angle");
    }
    Ok(snap(angle.tan(), config))
}

fn asin(args: &[f64], config: &EngineConfig) -> BuiltinResult {
    if args[0].abs() > 1.0 {
        return Err("argument outside [-1, 1]");
    }
    Ok(config.angle_unit.from_radians(args[0].asin()))
}

fn acos(args: &[f64], config: &EngineConfig) -> BuiltinResult {
    if args[0].abs() > 1.0 {
        return Err("argument outside [-1, 1]");
    }
    Ok(config.angle_unit.from_radians(args[0].acos()))
}

fn atan(args: &[f64], config: &EngineConfig) -> BuiltinResult {
    Ok(config.angle_unit.from_radians(args[0].atan()))
}

fn atan2(args: &[f64], config: &EngineConfig) -> BuiltinResult {
    Ok(config.angle_unit.from_radians(args[0].atan2(args[1])))
}

fn ln(args: &[f64], _: &EngineConfig) -> BuiltinResult {
    positive(args[0]).map(f64::ln)
}

fn log2(args: &[f64], _: &EngineConfig) -> BuiltinResult {
    positive(args[0]).map(f64::log2)
}

fn log10(args: &[f64], _: &EngineConfig) -> BuiltinResult {
    positive(args[0]).map(f64::log10)
}

/// Logarithm of `args[0]` in base `args[1]`.
fn log(args: &[f64], config: &EngineConfig) -> BuiltinResult {
    let value = positive(args[0])?;
    let base = args[1];
    if base <= 0.0 || approx_eq(base, 1.0, config.precision) {
        return Err("logarithm base must be positive and different from 1");
    }
    Ok(value.ln() / base.ln())
}

fn positive(value: f64) -> BuiltinResult {
    if value <= 0.0 {
        return Err("logarithm of a non-positive number");
    }
    Ok(value)
}

fn sqrt(args: &[f64], _: &EngineConfig) -> BuiltinResult {
    if args[0] < 0.0 {
        return Err("square root of a negative number");
    }
    Ok(args[0].sqrt())
}

/// Returns `-1`, `0` or `1`; zero maps to zero regardless of its sign bit.
fn sign(args: &[f64], _: &EngineConfig) -> BuiltinResult {
    let x = args[0];
    if x == 0.0 {
        Ok(0.0)
    } else {
        Ok(x.signum())
    }
}

/// Factorial of a natural number no greater than 170.
fn fact(args: &[f64], config: &EngineConfig) -> BuiltinResult {
    let n = small_natural(args[0], config.precision, MAX_FACTORIAL_ARGUMENT)
        .ok_or("factorial requires a natural number no greater than 170")?;
    Ok((2..=n).map(f64::from).product())
}

fn radians(args: &[f64], _: &EngineConfig) -> BuiltinResult {
    Ok(args[0].to_radians())
}

fn degrees(args: &[f64], _: &EngineConfig) -> BuiltinResult {
    Ok(args[0].to_degrees())
}

fn hypot(args: &[f64], _: &EngineConfig) -> BuiltinResult {
    Ok(args[0].hypot(args[1]))
}

fn min(args: &[f64], _: &EngineConfig) -> BuiltinResult {
    Ok(args[0].min(args[1]))
}

fn max(args: &[f64], _: &EngineConfig) -> BuiltinResult {
    Ok(args[0].max(args[1]))
}

/// Restricts `args[1]` to the inclusive range `[args[0], args[2]]`.
fn clamp(args: &[f64], _: &EngineConfig) -> BuiltinResult {
    let (lower, value, upper) = (args[0], args[1], args[2]);
    if lower.is_nan() || upper.is_nan() {
        return Ok(f64::NAN);
    }
    if lower > upper {
        return Err("lower bound exceeds upper bound");
    }
    Ok(value.clamp(lower, upper))
}
