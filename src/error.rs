//! Error types for cloth configuration.

use core::fmt;

/// Errors reported when a [`ClothConfig`](crate::config::ClothConfig) is rejected.
///
/// Numerical blow-ups during stepping are not errors; see
/// [`ClothSimulation::is_finite`](crate::cloth::ClothSimulation::is_finite).
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Grid half width must be at least 1 (a 3x3 grid).
    InvalidGridDimensions,
    /// Time step must be positive and finite.
    InvalidTimeStep,
    /// Velocity damping factor must be in (0, 1].
    InvalidDamping,
    /// Spring stiffness and damping coefficients must be finite and non-negative.
    InvalidStiffness,
    /// Particle spacing must be positive and finite.
    InvalidSpacing,
    /// Sphere radius must be positive and its center finite.
    InvalidSphere { index: usize },
    /// The backward integrator needs at least one look-ahead step.
    InvalidLookahead,
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::InvalidGridDimensions => write!(f, "grid half width must be at least 1"),
            PhysicsError::InvalidTimeStep => write!(f, "time step must be positive and finite"),
            PhysicsError::InvalidDamping => write!(f, "damping factor must be in (0, 1]"),
            PhysicsError::InvalidStiffness => {
                write!(f, "spring coefficients must be finite and non-negative")
            }
            PhysicsError::InvalidSpacing => write!(f, "particle spacing must be positive and finite"),
            PhysicsError::InvalidSphere { index } => {
                write!(f, "sphere {} needs a positive radius and a finite center", index)
            }
            PhysicsError::InvalidLookahead => write!(f, "look-ahead step count must be at least 1"),
        }
    }
}

impl core::error::Error for PhysicsError {}
