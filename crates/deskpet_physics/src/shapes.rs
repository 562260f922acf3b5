//! Collision shapes
//!
//! `ColliderShape` is the per-object shape description (local, centred on the
//! object's position). `Sphere` and `Aabb` are the world-space primitives the
//! narrow phase works on.

use glam::Vec3;
use std::f32::consts::PI;

/// A sphere defined by center and radius
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    /// Create a new sphere at the given center with the given radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if a point is inside or on the sphere
    pub fn contains(&self, point: Vec3) -> bool {
        (point - self.center).length_squared() <= self.radius * self.radius
    }
}

/// An axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner (all components are minimums)
    pub min: Vec3,
    /// Maximum corner (all components are maximums)
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a position with given half-extents
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Get the center of the AABB
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the half-extents (half the size in each dimension)
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Get the full size in each dimension
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Check if a point is inside or on the AABB
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Check whether two boxes overlap or touch
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }

    /// Get the closest point inside or on the AABB to a given point
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point.max(self.min).min(self.max)
    }

    /// Translate the AABB by a delta
    pub fn translated(&self, delta: Vec3) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }
}

/// Collider shape of a physics object, centred on the object position
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColliderShape {
    Sphere { radius: f32 },
    Box { half_extents: Vec3 },
    /// Reserved. Carries a bounding box but never produces contacts.
    Capsule { radius: f32, half_height: f32 },
}

impl ColliderShape {
    /// Half-extents of the local bounding box
    pub fn half_extents(&self) -> Vec3 {
        match *self {
            ColliderShape::Sphere { radius } => Vec3::splat(radius),
            ColliderShape::Box { half_extents } => half_extents,
            ColliderShape::Capsule {
                radius,
                half_height,
            } => Vec3::new(radius, half_height + radius, radius),
        }
    }

    /// World-space bounding box when centred at `position`
    pub fn bounding_box(&self, position: Vec3) -> Aabb {
        Aabb::from_center_half_extents(position, self.half_extents())
    }

    /// Area presented to the air stream, used for drag and wind
    ///
    /// Boxes use their largest face as an approximation.
    pub fn cross_sectional_area(&self) -> f32 {
        match *self {
            ColliderShape::Sphere { radius } => PI * radius * radius,
            ColliderShape::Box { half_extents } => {
                let size = half_extents * 2.0;
                (size.x * size.y).max(size.x * size.z).max(size.y * size.z)
            }
            ColliderShape::Capsule { .. } => 1.0,
        }
    }

    /// Check the dimensions are positive and finite
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            ColliderShape::Sphere { radius } => {
                if radius.is_finite() && radius > 0.0 {
                    Ok(())
                } else {
                    Err(format!("sphere radius must be positive, got {}", radius))
                }
            }
            ColliderShape::Box { half_extents } => {
                if half_extents.is_finite() && half_extents.cmpgt(Vec3::ZERO).all() {
                    Ok(())
                } else {
                    Err(format!("box half-extents must be positive, got {}", half_extents))
                }
            }
            ColliderShape::Capsule {
                radius,
                half_height,
            } => {
                if radius.is_finite() && radius > 0.0 && half_height.is_finite() && half_height >= 0.0 {
                    Ok(())
                } else {
                    Err(format!(
                        "capsule needs positive radius and non-negative half height, got {} / {}",
                        radius, half_height
                    ))
                }
            }
        }
    }
}
