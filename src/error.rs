use thiserror::Error;

/// A configuration value that would break the termination or convergence guarantees.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// An iteration cap of zero would never run the algorithm.
    #[error("{algorithm} iteration limit must be at least 1")]
    ZeroIterations {
        /// Which algorithm the limit belongs to
        algorithm: &'static str,
    },
    /// Tolerances and biases must be finite and non-negative.
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidTolerance {
        /// Name of the offending field
        name: &'static str,
        /// The rejected value
        value: f32,
    },
    /// The first GJK support query needs a usable direction.
    #[error("initial GJK search direction must be finite and non-zero, got {0}")]
    InvalidDirection(glam::Vec3),
}

/// Geometry that cannot form a convex support map.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    /// A hull needs at least one vertex to answer support queries.
    #[error("convex hull has no vertices")]
    EmptyHull,
    /// NaN or infinite coordinates poison every dot product.
    #[error("convex hull vertex {index} is not finite: {vertex}")]
    NonFiniteVertex {
        /// Position of the vertex in the input
        index: usize,
        /// The rejected vertex
        vertex: glam::Vec3,
    },
}
