use serde::{Deserialize, Serialize};

/// Default tolerance used by the engine's own equality checks.
pub const PRECISION: f64 = 1e-12;
/// Default bound on expression nesting and tree height.
pub const MAX_DEPTH: usize = 256;

/// Unit in which trigonometric functions take and return angles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleUnit {
    /// Angles in radians.
    #[default]
    Radians,
    /// Angles in degrees.
    Degrees,
}

impl AngleUnit {
    /// Converts an angle in this unit to radians.
    #[must_use]
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            Self::Radians => angle,
            Self::Degrees => angle.to_radians(),
        }
    }

    /// Converts an angle in radians to this unit.
    #[must_use]
    pub fn from_radians(self, angle: f64) -> f64 {
        match self {
            Self::Radians => angle,
            Self::Degrees => angle.to_degrees(),
        }
    }
}

impl std::fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Radians => write!(f, "radians"),
            Self::Degrees => write!(f, "degrees"),
        }
    }
}

/// Per-engine configuration.
///
/// Every engine owns its configuration; nothing here is process-wide, so
/// engines with different settings can coexist. Parsed expressions carry a
/// copy of the configuration they were parsed with.
///
/// ## Example
/// ```
/// use calculate::{AngleUnit, EngineConfig};
///
/// let config = EngineConfig::default().with_angle_unit(AngleUnit::Degrees)
///                                     .with_optimize(false);
///
/// assert_eq!(config.angle_unit, AngleUnit::Degrees);
/// assert!(!config.optimize);
/// assert_eq!(config.max_depth, 256);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tolerance for the engine's internal equality checks (integer guards,
    /// singularities). Negative values are treated as their magnitude and
    /// non-finite ones as the default.
    pub precision:  f64,
    /// Unit used by trigonometric functions.
    pub angle_unit: AngleUnit,
    /// Whether constant subtrees are folded at parse time.
    pub optimize:   bool,
    /// Maximum nesting depth and tree height accepted by the parser.
    pub max_depth:  usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { precision:  PRECISION,
               angle_unit: AngleUnit::Radians,
               optimize:   true,
               max_depth:  MAX_DEPTH, }
    }
}

impl EngineConfig {
    /// Sets the comparison tolerance.
    ///
    /// A negative tolerance is taken by magnitude. NaN and infinity fall back
    /// to the default [`PRECISION`].
    ///
    /// ```
    /// use calculate::EngineConfig;
    ///
    /// assert_eq!(EngineConfig::default().with_precision(-1e-6).precision, 1e-6);
    /// assert_eq!(EngineConfig::default().with_precision(f64::NAN).precision, 1e-12);
    /// ```
    #[must_use]
    pub const fn with_precision(mut self, precision: f64) -> Self {
        self.precision = if precision.is_finite() { precision.abs() } else { PRECISION };
        self
    }

    /// Sets the angle unit used by trigonometric functions.
    #[must_use]
    pub const fn with_angle_unit(mut self, angle_unit: AngleUnit) -> Self {
        self.angle_unit = angle_unit;
        self
    }

    /// Enables or disables constant folding.
    #[must_use]
    pub const fn with_optimize(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }

    /// Sets the maximum depth. A depth of zero is raised to one.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = if max_depth == 0 { 1 } else { max_depth };
        self
    }

    /// Returns the configuration with `precision` made finite and
    /// non-negative, and `max_depth` at least one.
    #[must_use]
    pub(crate) const fn normalized(self) -> Self {
        self.with_precision(self.precision)
            .with_max_depth(self.max_depth)
    }
}
