//! Per-step force accumulation: gravity, air drag, wind and queued forces

use glam::Vec3;
use rand::Rng;

use crate::body::PhysicsObject;
use crate::environment::{Environment, Wind};
use crate::world::{PhysicsConfig, PhysicsFeatures};

/// Quadratic air drag opposing `velocity`
///
/// `|F| = 0.5 * rho * v² * Cd * A`. Zero velocity gives zero force.
pub fn air_resistance(velocity: Vec3, area: f32, air_density: f32, drag_coefficient: f32) -> Vec3 {
    let speed_sq = velocity.length_squared();
    if speed_sq <= 0.0 {
        return Vec3::ZERO;
    }
    let magnitude = 0.5 * air_density * speed_sq * drag_coefficient * area;
    -velocity.normalize_or_zero() * magnitude
}

/// Random gust offset, uniform in `[-t/2, t/2]` per axis with the vertical axis halved
pub fn turbulence_noise<R: Rng + ?Sized>(turbulence: f32, rng: &mut R) -> Vec3 {
    if turbulence <= 0.0 {
        return Vec3::ZERO;
    }
    let mut sample = || (rng.random::<f32>() - 0.5) * turbulence;
    let x = sample();
    let y = sample() * 0.5;
    let z = sample();
    Vec3::new(x, y, z)
}

/// Force the wind exerts on a body presenting `area` to it
pub fn wind_force<R: Rng + ?Sized>(wind: &Wind, area: f32, coefficient: f32, rng: &mut R) -> Vec3 {
    (wind.velocity() + turbulence_noise(wind.turbulence, rng)) * area * coefficient
}

/// Rebuild `object.acceleration` for the coming step
///
/// Static and sleeping bodies are left untouched, including their queued
/// force. Otherwise the queued external force is consumed.
pub fn accumulate<R: Rng + ?Sized>(
    object: &mut PhysicsObject,
    environment: &Environment,
    config: &PhysicsConfig,
    rng: &mut R,
) {
    if !object.is_active() {
        return;
    }

    object.acceleration = Vec3::ZERO;

    if object.affected_by_gravity {
        object.acceleration.y += config.gravity;
    }

    let inverse_mass = object.inverse_mass();
    let area = object.shape.cross_sectional_area();

    if config.features.contains(PhysicsFeatures::FLUID_DYNAMICS) {
        let drag = air_resistance(object.velocity, area, config.air_density, config.drag_coefficient);
        object.acceleration += drag * inverse_mass;
    }

    if config.features.contains(PhysicsFeatures::WIND) && object.wind_affected {
        let wind = wind_force(&environment.wind, area, config.wind_coefficient, rng);
        object.acceleration += wind * inverse_mass;
    }

    object.acceleration += object.pending_force * inverse_mass;
    object.pending_force = Vec3::ZERO;
}
