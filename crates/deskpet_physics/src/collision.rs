//! Narrow-phase collision detection
//!
//! Every routine reports contacts in the same convention: the normal points
//! from the first shape toward the second, and `depth` is the overlap along
//! that normal. Boxes are treated as axis-aligned regardless of the body's
//! stored rotation.

use glam::Vec3;

use crate::body::PhysicsObject;
use crate::shapes::{Aabb, ColliderShape, Sphere};

/// Below this distance two points are considered coincident
const DEGENERATE_DISTANCE: f32 = 1e-6;

/// Contact manifold between two shapes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// Approximate point of contact
    pub point: Vec3,
    /// Unit normal pointing from the first shape toward the second
    pub normal: Vec3,
    /// Penetration depth (positive means overlapping)
    pub depth: f32,
}

impl Contact {
    /// Create a new contact
    pub fn new(point: Vec3, normal: Vec3, depth: f32) -> Self {
        Self { point, normal, depth }
    }

    /// Same contact seen from the other shape
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }

    /// Check if this represents an actual collision (positive penetration)
    pub fn is_colliding(&self) -> bool {
        self.depth > 0.0
    }
}

/// Test sphere vs sphere collision
///
/// Coincident centers report a `+Y` normal with the full radius sum as depth.
pub fn sphere_vs_sphere(a: &Sphere, b: &Sphere) -> Option<Contact> {
    let delta = b.center - a.center;
    let min_dist = a.radius + b.radius;
    let dist_sq = delta.length_squared();

    if dist_sq >= min_dist * min_dist {
        return None;
    }

    let dist = dist_sq.sqrt();
    let normal = if dist > DEGENERATE_DISTANCE {
        delta / dist
    } else {
        Vec3::Y
    };
    let point = a.center + normal * a.radius;
    Some(Contact::new(point, normal, min_dist - dist))
}

/// Test sphere vs AABB collision
///
/// The normal points from the sphere toward the box. A sphere whose center is
/// inside the box is pushed out through the nearest face.
pub fn sphere_vs_aabb(sphere: &Sphere, aabb: &Aabb) -> Option<Contact> {
    let closest = aabb.closest_point(sphere.center);
    let delta = closest - sphere.center;
    let dist_sq = delta.length_squared();

    if dist_sq >= sphere.radius * sphere.radius {
        return None;
    }

    let dist = dist_sq.sqrt();
    if dist > DEGENERATE_DISTANCE {
        return Some(Contact::new(closest, delta / dist, sphere.radius - dist));
    }

    // Center inside the box: find the face with the shortest escape distance
    let to_min = sphere.center - aabb.min;
    let to_max = aabb.max - sphere.center;
    let candidates = [
        (to_min.x, Vec3::X),
        (to_max.x, -Vec3::X),
        (to_min.y, Vec3::Y),
        (to_max.y, -Vec3::Y),
        (to_min.z, Vec3::Z),
        (to_max.z, -Vec3::Z),
    ];
    let (escape, normal) = candidates
        .into_iter()
        .fold((f32::INFINITY, Vec3::Y), |best, candidate| {
            if candidate.0 < best.0 {
                candidate
            } else {
                best
            }
        });

    // `normal` points into the box, away from the escape face
    let point = sphere.center - normal * escape;
    Some(Contact::new(point, normal, sphere.radius + escape))
}

/// Test AABB vs AABB collision with a separating-axis test on X, Y and Z
///
/// The axis of least overlap becomes the normal. The contact point is the
/// midpoint of the two centers.
pub fn aabb_vs_aabb(a: &Aabb, b: &Aabb) -> Option<Contact> {
    let center_a = a.center();
    let center_b = b.center();
    let half_a = a.half_extents();
    let half_b = b.half_extents();

    let mut min_overlap = f32::INFINITY;
    let mut normal = Vec3::Y;

    for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
        let projection_a = axis.dot(center_a);
        let projection_b = axis.dot(center_b);
        let radius_a = half_a.dot(axis);
        let radius_b = half_b.dot(axis);

        let overlap = (projection_a + radius_a).min(projection_b + radius_b)
            - (projection_a - radius_a).max(projection_b - radius_b);
        if overlap <= 0.0 {
            return None;
        }

        if overlap < min_overlap {
            min_overlap = overlap;
            normal = if projection_b >= projection_a { axis } else { -axis };
        }
    }

    let point = (center_a + center_b) * 0.5;
    Some(Contact::new(point, normal, min_overlap))
}

/// Narrow-phase test between two physics objects
///
/// Returns `None` when both are static, when their bounding boxes are
/// disjoint, or when either uses the reserved capsule shape.
pub fn detect(a: &PhysicsObject, b: &PhysicsObject) -> Option<Contact> {
    if a.is_static && b.is_static {
        return None;
    }
    if !a.bounding_box().intersects(&b.bounding_box()) {
        return None;
    }

    let contact = match (a.shape, b.shape) {
        (ColliderShape::Sphere { radius: ra }, ColliderShape::Sphere { radius: rb }) => {
            sphere_vs_sphere(&Sphere::new(a.position, ra), &Sphere::new(b.position, rb))
        }
        (ColliderShape::Sphere { radius }, ColliderShape::Box { .. }) => {
            sphere_vs_aabb(&Sphere::new(a.position, radius), &b.bounding_box())
        }
        (ColliderShape::Box { .. }, ColliderShape::Sphere { radius }) => {
            sphere_vs_aabb(&Sphere::new(b.position, radius), &a.bounding_box()).map(Contact::flipped)
        }
        (ColliderShape::Box { .. }, ColliderShape::Box { .. }) => {
            aabb_vs_aabb(&a.bounding_box(), &b.bounding_box())
        }
        (ColliderShape::Capsule { .. }, _) | (_, ColliderShape::Capsule { .. }) => None,
    };

    contact.filter(Contact::is_colliding)
}
