//! Physics error types
//!
//! Precondition violations are rejected when an object enters the registry so
//! that degenerate values never reach the integrator as NaN.

use std::fmt;

/// Error type for physics registry operations
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Object was submitted with an empty id
    MissingId,
    /// Dynamic body with zero, negative or non-finite mass
    InvalidMass { id: String, mass: f32 },
    /// Collider dimensions that are not positive and finite
    InvalidShape { id: String, reason: String },
    /// Position, velocity or rotation containing NaN or infinity
    NonFiniteState { id: String, field: &'static str },
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PhysicsError::MissingId => write!(f, "Physics object has no id"),
            PhysicsError::InvalidMass { id, mass } => {
                write!(f, "Physics object '{}' has invalid mass {}", id, mass)
            }
            PhysicsError::InvalidShape { id, reason } => {
                write!(f, "Physics object '{}' has invalid collider: {}", id, reason)
            }
            PhysicsError::NonFiniteState { id, field } => {
                write!(f, "Physics object '{}' has non-finite {}", id, field)
            }
        }
    }
}

impl std::error::Error for PhysicsError {}
