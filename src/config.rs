use crate::error::ConfigError;
use crate::math::consts::EPSILON;
use crate::math::Vec3;

/// Configuration for the GJK intersection test
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GjkConfig {
    /// Maximum number of support queries after the first one
    pub max_iterations: usize,
    /// Direction of the very first support query
    pub initial_direction: Vec3,
}

impl Default for GjkConfig {
    fn default() -> Self {
        Self {
            max_iterations: 8,
            initial_direction: Vec3::Y,
        }
    }
}

impl GjkConfig {
    /// Sets the iteration cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the first search direction
    pub fn with_initial_direction(mut self, direction: Vec3) -> Self {
        self.initial_direction = direction;
        self
    }

    /// Checks that the configuration can terminate with a meaningful verdict
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations { algorithm: "GJK" });
        }
        if !self.initial_direction.is_finite() || self.initial_direction.length_squared() < EPSILON
        {
            return Err(ConfigError::InvalidDirection(self.initial_direction));
        }
        Ok(())
    }
}

/// Configuration for the EPA penetration solver
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EpaConfig {
    /// Maximum number of polytope expansions
    pub max_iterations: usize,
    /// Convergence threshold on the support distance gained by an expansion
    pub tolerance: f32,
    /// Added to the reported depth so the corrected body ends up just outside
    pub depth_bias: f32,
}

impl Default for EpaConfig {
    fn default() -> Self {
        Self {
            max_iterations: 32,
            tolerance: 0.001,
            depth_bias: 0.001,
        }
    }
}

impl EpaConfig {
    /// Sets the iteration cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the convergence threshold
    pub fn with_tolerance(mut self, tolerance: f32) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the depth bias
    pub fn with_depth_bias(mut self, depth_bias: f32) -> Self {
        self.depth_bias = depth_bias;
        self
    }

    /// Checks that the configuration can converge
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations { algorithm: "EPA" });
        }
        check_non_negative("EPA tolerance", self.tolerance)?;
        check_non_negative("EPA depth bias", self.depth_bias)
    }
}

/// Narrow-phase configuration shared by every pair query
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CollisionConfig {
    /// GJK settings
    pub gjk: GjkConfig,
    /// EPA settings
    pub epa: EpaConfig,
}

impl CollisionConfig {
    /// Validates both stages
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gjk.validate()?;
        self.epa.validate()
    }
}

fn check_non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidTolerance { name, value })
    }
}
