/// Numeric comparison helpers.
///
/// The engine never compares floating-point values bit-exactly. Wherever it
/// needs equality (integer guards, singularities) it goes through these
/// helpers with the precision configured on the engine.
pub mod num;
