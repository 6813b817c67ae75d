use std::f64::consts::{E, PI, TAU};

use crate::interpreter::registry::Constant;

/// The golden ratio.
const PHI: f64 = 1.618_033_988_749_895;

/// Builtin constants, in enumeration order.
///
/// Values do not depend on the engine configuration.
pub static CONSTANTS: &[Constant] = &[Constant { name: "pi", value: PI },
                                      Constant { name: "e", value: E },
                                      Constant { name: "tau", value: TAU },
                                      Constant { name: "phi", value: PHI }];
