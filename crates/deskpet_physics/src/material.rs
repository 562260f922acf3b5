//! Physical material properties for collision response

use serde::{Deserialize, Serialize};

/// Physical material properties for collision response
///
/// Materials define how objects interact during collisions, including
/// friction (how much objects resist sliding) and restitution (bounciness).
/// Density is carried for callers that derive mass from volume.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicsMaterial {
    /// Friction coefficient (0.0 = ice, 1.0 = rubber)
    pub friction: f32,
    /// Restitution/bounciness (0.0 = no bounce, 1.0 = perfect bounce)
    pub restitution: f32,
    /// Density in kg/m³
    pub density: f32,
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        Self {
            friction: 0.5,
            restitution: 0.0,
            density: 1000.0,
        }
    }
}

impl PhysicsMaterial {
    /// Avatar bodies: low friction, bouncy
    pub const CHARACTER: Self = Self {
        friction: 0.3,
        restitution: 0.7,
        density: 1000.0,
    };

    /// Furniture obstacles: moderate friction, low bounce
    pub const FURNITURE: Self = Self {
        friction: 0.5,
        restitution: 0.2,
        density: 500.0,
    };

    /// Ground slab: high friction, very low bounce
    pub const GROUND: Self = Self {
        friction: 0.8,
        restitution: 0.1,
        density: f32::INFINITY,
    };

    /// Create a new physics material
    ///
    /// Friction and restitution are clamped to the range [0.0, 1.0].
    pub fn new(friction: f32, restitution: f32, density: f32) -> Self {
        Self {
            friction: friction.clamp(0.0, 1.0),
            restitution: restitution.clamp(0.0, 1.0),
            density,
        }
    }

    /// Combine two materials for collision response
    ///
    /// Geometric mean for friction, minimum for restitution (the less
    /// bouncy surface wins).
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            friction: (self.friction * other.friction).sqrt(),
            restitution: self.restitution.min(other.restitution),
            density: self.density.max(other.density),
        }
    }
}
