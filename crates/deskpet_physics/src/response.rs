//! Impulse-based collision response

use glam::Vec3;

use crate::body::PhysicsObject;
use crate::collision::Contact;

/// Tangential speeds below this produce no friction impulse
const MIN_TANGENT_SPEED: f32 = 1e-3;

/// Tuning for a single contact resolution
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResponseSettings {
    /// Apply the tangential friction impulse
    pub friction: bool,
    /// Approach speeds against a static body below this resolve with zero restitution
    pub restitution_velocity_threshold: f32,
}

impl Default for ResponseSettings {
    fn default() -> Self {
        Self {
            friction: true,
            restitution_velocity_threshold: 0.5,
        }
    }
}

/// Resolve a contact between `a` and `b`
///
/// The contact normal must point from `a` toward `b`. Positions are separated
/// in proportion to inverse mass, then a normal impulse with the combined
/// restitution is applied, followed by a Coulomb-clamped friction impulse.
/// Slow approaches against a static body are treated as resting and do not
/// bounce. Both bodies are woken.
pub fn resolve_contact(
    a: &mut PhysicsObject,
    b: &mut PhysicsObject,
    contact: &Contact,
    settings: &ResponseSettings,
) {
    let inv_a = a.inverse_mass();
    let inv_b = b.inverse_mass();
    let inv_sum = inv_a + inv_b;
    if inv_sum <= 0.0 {
        return;
    }

    let normal = contact.normal;

    // Positional correction
    let correction = normal * (contact.depth.max(0.0) / inv_sum);
    a.position -= correction * inv_a;
    b.position += correction * inv_b;

    if !a.is_static {
        a.wake();
    }
    if !b.is_static {
        b.wake();
    }

    let relative_velocity = b.velocity - a.velocity;
    let velocity_along_normal = relative_velocity.dot(normal);
    if velocity_along_normal > 0.0 {
        return;
    }

    let combined = a.material.combine(&b.material);
    // Resting contact on static geometry
    let resting = (a.is_static || b.is_static) && -velocity_along_normal < settings.restitution_velocity_threshold;
    let restitution = if resting {
        0.0
    } else {
        combined.restitution
    };

    let j = -(1.0 + restitution) * velocity_along_normal / inv_sum;
    a.velocity -= normal * (j * inv_a);
    b.velocity += normal * (j * inv_b);

    if !settings.friction {
        return;
    }

    let tangent = relative_velocity - normal * velocity_along_normal;
    if tangent.length() <= MIN_TANGENT_SPEED {
        return;
    }
    let tangent = tangent.normalize();

    // Impulse that would stop the sliding, limited by the friction cone
    let sliding = (b.velocity - a.velocity).dot(tangent);
    let max_friction = combined.friction * j;
    let jt = (-sliding / inv_sum).clamp(-max_friction, max_friction);

    a.velocity -= tangent * (jt * inv_a);
    b.velocity += tangent * (jt * inv_b);
}

/// Total linear momentum of two bodies, ignoring static ones
pub fn momentum(a: &PhysicsObject, b: &PhysicsObject) -> Vec3 {
    let of = |body: &PhysicsObject| {
        if body.is_static {
            Vec3::ZERO
        } else {
            body.velocity * body.mass
        }
    };
    of(a) + of(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::detect;
    use crate::material::PhysicsMaterial;

    fn elastic() -> PhysicsMaterial {
        PhysicsMaterial::new(0.0, 1.0, 1000.0)
    }

    #[test]
    fn test_equal_mass_elastic_swap() {
        let mut a = PhysicsObject::new_sphere("a", Vec3::new(-0.45, 0.0, 0.0), 0.5)
            .with_velocity(Vec3::new(2.0, 0.0, 0.0))
            .with_material(elastic());
        let mut b = PhysicsObject::new_sphere("b", Vec3::new(0.45, 0.0, 0.0), 0.5)
            .with_velocity(Vec3::new(-2.0, 0.0, 0.0))
            .with_material(elastic());

        let contact = detect(&a, &b).expect("Should collide");
        resolve_contact(&mut a, &mut b, &contact, &ResponseSettings::default());

        assert!((a.velocity.x + 2.0).abs() < 0.0001);
        assert!((b.velocity.x - 2.0).abs() < 0.0001);
    }

    #[test]
    fn test_static_body_absorbs_no_correction() {
        let mut ball = PhysicsObject::new_sphere("ball", Vec3::new(0.0, 0.4, 0.0), 0.5)
            .with_velocity(Vec3::new(0.0, -3.0, 0.0))
            .with_material(PhysicsMaterial::new(0.5, 0.5, 1000.0));
        let mut ground = PhysicsObject::new_static_box("ground", Vec3::new(0.0, -0.5, 0.0), Vec3::new(5.0, 0.5, 5.0))
            .with_material(PhysicsMaterial::new(0.5, 0.5, 1000.0));

        let contact = detect(&ball, &ground).expect("Should collide");
        resolve_contact(&mut ball, &mut ground, &contact, &ResponseSettings::default());

        assert_eq!(ground.position, Vec3::new(0.0, -0.5, 0.0));
        assert_eq!(ground.velocity, Vec3::ZERO);
        assert!((ball.position.y - 0.5).abs() < 0.0001);
        // Bounces with restitution 0.5
        assert!((ball.velocity.y - 1.5).abs() < 0.0001);
    }

    #[test]
    fn test_slow_contact_does_not_bounce() {
        let mut ball = PhysicsObject::new_sphere("ball", Vec3::new(0.0, 0.45, 0.0), 0.5)
            .with_velocity(Vec3::new(0.0, -0.2, 0.0))
            .with_material(PhysicsMaterial::new(0.5, 1.0, 1000.0));
        let mut ground = PhysicsObject::new_static_box("ground", Vec3::new(0.0, -0.5, 0.0), Vec3::new(5.0, 0.5, 5.0))
            .with_material(PhysicsMaterial::new(0.5, 1.0, 1000.0));

        let contact = detect(&ball, &ground).expect("Should collide");
        resolve_contact(&mut ball, &mut ground, &contact, &ResponseSettings::default());

        assert!(ball.velocity.y.abs() < 0.0001);
    }

    #[test]
    fn test_slow_dynamic_pair_keeps_restitution() {
        let mut a = PhysicsObject::new_sphere("a", Vec3::new(-0.49, 0.0, 0.0), 0.5)
            .with_velocity(Vec3::new(0.2, 0.0, 0.0))
            .with_material(elastic());
        let mut b = PhysicsObject::new_sphere("b", Vec3::new(0.49, 0.0, 0.0), 0.5)
            .with_velocity(Vec3::new(-0.2, 0.0, 0.0))
            .with_material(elastic());

        let contact = detect(&a, &b).expect("Should collide");
        resolve_contact(&mut a, &mut b, &contact, &ResponseSettings::default());

        assert!((a.velocity.x + 0.2).abs() < 0.0001);
        assert!((b.velocity.x - 0.2).abs() < 0.0001);
    }

    #[test]
    fn test_separating_bodies_get_no_impulse() {
        let mut a = PhysicsObject::new_sphere("a", Vec3::new(-0.4, 0.0, 0.0), 0.5)
            .with_velocity(Vec3::new(-1.0, 0.0, 0.0));
        let mut b = PhysicsObject::new_sphere("b", Vec3::new(0.4, 0.0, 0.0), 0.5)
            .with_velocity(Vec3::new(1.0, 0.0, 0.0));

        let contact = detect(&a, &b).expect("Should collide");
        resolve_contact(&mut a, &mut b, &contact, &ResponseSettings::default());

        assert_eq!(a.velocity, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(b.velocity, Vec3::new(1.0, 0.0, 0.0));
        // Still pushed apart
        assert!((b.position.x - a.position.x - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_friction_never_reverses_sliding() {
        let mut ball = PhysicsObject::new_sphere("ball", Vec3::new(0.0, 0.45, 0.0), 0.5)
            .with_velocity(Vec3::new(0.3, -5.0, 0.0))
            .with_material(PhysicsMaterial::new(1.0, 0.0, 1000.0));
        let mut ground = PhysicsObject::new_static_box("ground", Vec3::new(0.0, -0.5, 0.0), Vec3::new(5.0, 0.5, 5.0))
            .with_material(PhysicsMaterial::new(1.0, 0.0, 1000.0));

        let contact = detect(&ball, &ground).expect("Should collide");
        resolve_contact(&mut ball, &mut ground, &contact, &ResponseSettings::default());

        // Strong normal impulse, so friction stops the sliding but does not flip it
        assert!(ball.velocity.x.abs() < 0.0001);
    }

    #[test]
    fn test_friction_is_limited_by_normal_impulse() {
        let material = PhysicsMaterial::new(0.1, 0.0, 1000.0);
        let mut ball = PhysicsObject::new_sphere("ball", Vec3::new(0.0, 0.45, 0.0), 0.5)
            .with_velocity(Vec3::new(10.0, -1.0, 0.0))
            .with_material(material);
        let mut ground = PhysicsObject::new_static_box("ground", Vec3::new(0.0, -0.5, 0.0), Vec3::new(5.0, 0.5, 5.0))
            .with_material(material);

        let contact = detect(&ball, &ground).expect("Should collide");
        resolve_contact(&mut ball, &mut ground, &contact, &ResponseSettings::default());

        // j = 1, friction impulse capped at 0.1
        assert!((ball.velocity.x - 9.9).abs() < 0.0001);
    }

    #[test]
    fn test_friction_disabled() {
        let material = PhysicsMaterial::new(1.0, 0.0, 1000.0);
        let mut ball = PhysicsObject::new_sphere("ball", Vec3::new(0.0, 0.45, 0.0), 0.5)
            .with_velocity(Vec3::new(2.0, -1.0, 0.0))
            .with_material(material);
        let mut ground = PhysicsObject::new_static_box("ground", Vec3::new(0.0, -0.5, 0.0), Vec3::new(5.0, 0.5, 5.0))
            .with_material(material);
        let settings = ResponseSettings {
            friction: false,
            ..Default::default()
        };

        let contact = detect(&ball, &ground).expect("Should collide");
        resolve_contact(&mut ball, &mut ground, &contact, &settings);

        assert_eq!(ball.velocity.x, 2.0);
    }

    #[test]
    fn test_collision_wakes_sleepers() {
        let mut a = PhysicsObject::new_sphere("a", Vec3::new(-0.4, 0.0, 0.0), 0.5);
        let mut b = PhysicsObject::new_sphere("b", Vec3::new(0.4, 0.0, 0.0), 0.5);
        a.is_sleeping = true;
        b.is_sleeping = true;

        let contact = detect(&a, &b).expect("Should collide");
        resolve_contact(&mut a, &mut b, &contact, &ResponseSettings::default());

        assert!(!a.is_sleeping);
        assert!(!b.is_sleeping);
    }

    #[test]
    fn test_momentum_ignores_static() {
        let a = PhysicsObject::new_sphere("a", Vec3::ZERO, 0.5)
            .with_mass(2.0)
            .with_velocity(Vec3::X);
        let b = PhysicsObject::new_static_box("b", Vec3::ZERO, Vec3::ONE);
        assert_eq!(momentum(&a, &b), Vec3::new(2.0, 0.0, 0.0));
    }
}
