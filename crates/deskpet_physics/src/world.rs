//! Physics world and simulation

use std::collections::HashMap;

use bitflags::bitflags;
use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use slotmap::SlotMap;

use crate::body::{BodyKey, ObjectId, ObjectUpdate, PhysicsObject};
use crate::boundary::{CameraProjection, Viewport, ViewportBoundary};
use crate::collision;
use crate::environment::{Environment, EnvironmentUpdate};
use crate::error::PhysicsError;
use crate::forces;
use crate::material::PhysicsMaterial;
use crate::response::{self, ResponseSettings};

/// Id given to the slab created by `PhysicsWorld::add_ground`
pub const GROUND_ID: &str = "ground";

/// Ground slab footprint and thickness
const GROUND_HALF_EXTENTS: Vec3 = Vec3::new(50.0, 0.05, 50.0);

bitflags! {
    /// Optional parts of the simulation
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PhysicsFeatures: u8 {
        /// Quadratic air drag
        const FLUID_DYNAMICS = 1 << 0;
        /// Environment wind on `wind_affected` bodies
        const WIND = 1 << 1;
        /// Tangential friction impulses at contacts
        const FRICTION = 1 << 2;
        /// Put settled bodies to sleep
        const SLEEPING = 1 << 3;
    }
}

impl Default for PhysicsFeatures {
    fn default() -> Self {
        Self::all()
    }
}

/// Configuration for the physics simulation
#[derive(Clone, Debug, PartialEq)]
pub struct PhysicsConfig {
    /// Gravity acceleration (applied to Y-axis, negative = down)
    pub gravity: f32,
    /// Length of one simulation step in seconds
    pub fixed_timestep: f32,
    /// Most steps a single `tick` may run; excess time is dropped
    pub max_substeps: usize,
    /// Run a final partial step for time left over after whole steps
    pub interpolate_remainder: bool,
    /// Air density in kg/m³
    pub air_density: f32,
    pub drag_coefficient: f32,
    pub wind_coefficient: f32,
    /// Linear and angular speed below which a body counts as resting
    pub sleep_threshold: f32,
    /// Seconds a body must rest before it sleeps
    pub sleep_delay: f32,
    /// Approach speed below which contacts do not bounce
    pub restitution_velocity_threshold: f32,
    pub features: PhysicsFeatures,
    /// Seed for wind turbulence
    pub turbulence_seed: u64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: -9.8,
            fixed_timestep: 1.0 / 60.0,
            max_substeps: 5,
            interpolate_remainder: false,
            air_density: 1.2,
            drag_coefficient: 0.47,
            wind_coefficient: 0.1,
            sleep_threshold: 0.01,
            sleep_delay: 0.25,
            restitution_velocity_threshold: 0.5,
            features: PhysicsFeatures::default(),
            turbulence_seed: 0,
        }
    }
}

impl PhysicsConfig {
    /// Create a new physics config with the given gravity
    pub fn new(gravity: f32) -> Self {
        Self {
            gravity,
            ..Default::default()
        }
    }

    /// Set the enabled features
    pub fn with_features(mut self, features: PhysicsFeatures) -> Self {
        self.features = features;
        self
    }

    /// Contact response tuning derived from this config
    pub fn response_settings(&self) -> ResponseSettings {
        ResponseSettings {
            friction: self.features.contains(PhysicsFeatures::FRICTION),
            restitution_velocity_threshold: self.restitution_velocity_threshold,
        }
    }
}

/// The physics world: registry, environment, boundary and step loop
pub struct PhysicsWorld {
    /// All objects in the world (using generational keys)
    bodies: SlotMap<BodyKey, PhysicsObject>,
    /// Caller-facing ids mapped to storage keys
    index: HashMap<ObjectId, BodyKey>,
    environment: Environment,
    boundary: Option<ViewportBoundary>,
    /// Physics configuration
    pub config: PhysicsConfig,
    /// Simulated time owed to the step loop
    accumulator: f32,
    /// Time passed to the previous `tick`, `None` right after `start`
    last_update: Option<f64>,
    running: bool,
    rng: StdRng,
}

impl PhysicsWorld {
    /// Create a new physics world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new physics world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            index: HashMap::new(),
            environment: Environment::default(),
            boundary: None,
            rng: StdRng::seed_from_u64(config.turbulence_seed),
            config,
            accumulator: 0.0,
            last_update: None,
            running: false,
        }
    }

    /// Register an object, replacing any existing object with the same id
    ///
    /// A replaced object keeps its storage slot.
    pub fn add(&mut self, object: PhysicsObject) -> Result<BodyKey, PhysicsError> {
        if let Err(err) = object.validate() {
            log::warn!("Rejected physics object: {}", err);
            return Err(err);
        }

        if let Some(&key) = self.index.get(&object.id) {
            log::debug!("Replacing physics object '{}'", object.id);
            self.bodies[key] = object;
            return Ok(key);
        }

        log::debug!("Adding physics object '{}'", object.id);
        let id = object.id.clone();
        let key = self.bodies.insert(object);
        self.index.insert(id, key);
        Ok(key)
    }

    /// Remove an object and return it, `None` if the id is unknown
    pub fn remove(&mut self, id: &str) -> Option<PhysicsObject> {
        let key = self.index.remove(id)?;
        log::debug!("Removing physics object '{}'", id);
        self.bodies.remove(key)
    }

    /// Merge `update` into an existing object
    ///
    /// Returns `Ok(false)` for unknown ids. An update that would leave the
    /// object invalid is rejected and the object is left untouched.
    pub fn update(&mut self, id: &str, update: &ObjectUpdate) -> Result<bool, PhysicsError> {
        let Some(&key) = self.index.get(id) else {
            return Ok(false);
        };
        let Some(object) = self.bodies.get_mut(key) else {
            return Ok(false);
        };

        let mut candidate = object.clone();
        update.apply_to(&mut candidate);
        candidate.validate()?;
        *object = candidate;
        Ok(true)
    }

    /// Get an object by id
    pub fn get(&self, id: &str) -> Option<&PhysicsObject> {
        self.index.get(id).and_then(|&key| self.bodies.get(key))
    }

    /// Get an object by storage key
    pub fn get_by_key(&self, key: BodyKey) -> Option<&PhysicsObject> {
        self.bodies.get(key)
    }

    /// Storage key of an object
    pub fn key(&self, id: &str) -> Option<BodyKey> {
        self.index.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Get the number of objects in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Iterate over all objects
    pub fn iter(&self) -> impl Iterator<Item = &PhysicsObject> + '_ {
        self.bodies.values()
    }

    fn body_mut(&mut self, id: &str) -> Option<&mut PhysicsObject> {
        let key = *self.index.get(id)?;
        self.bodies.get_mut(key)
    }

    /// Queue a force for the next step; `false` if the id is unknown
    pub fn apply_force(&mut self, id: &str, force: Vec3) -> bool {
        self.body_mut(id).map(|body| body.apply_force(force)).is_some()
    }

    /// Change an object's velocity by `impulse / mass`; `false` if the id is unknown
    pub fn apply_impulse(&mut self, id: &str, impulse: Vec3) -> bool {
        self.body_mut(id).map(|body| body.apply_impulse(impulse)).is_some()
    }

    /// Change an object's angular velocity by `torque / mass`; `false` if the id is unknown
    pub fn apply_torque(&mut self, id: &str, torque: Vec3) -> bool {
        self.body_mut(id).map(|body| body.apply_torque(torque)).is_some()
    }

    /// Wake a sleeping object; `false` if the id is unknown
    pub fn wake(&mut self, id: &str) -> bool {
        match self.body_mut(id) {
            Some(body) => {
                if body.is_sleeping {
                    log::debug!("Waking '{}'", id);
                }
                body.wake();
                true
            }
            None => false,
        }
    }

    /// Add the ground slab with its top face at `y`
    pub fn add_ground(&mut self, y: f32) -> Result<BodyKey, PhysicsError> {
        let center = Vec3::new(0.0, y - GROUND_HALF_EXTENTS.y, 0.0);
        let ground = PhysicsObject::new_static_box(GROUND_ID, center, GROUND_HALF_EXTENTS)
            .with_material(PhysicsMaterial::GROUND);
        self.add(ground)
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Merge a partial environment change
    pub fn update_environment(&mut self, update: &EnvironmentUpdate) {
        self.environment.apply(update);
    }

    /// Install the viewport boundary
    pub fn set_boundary(&mut self, boundary: ViewportBoundary) {
        self.boundary = Some(boundary);
    }

    /// Remove the viewport boundary, returning it
    pub fn clear_boundary(&mut self) -> Option<ViewportBoundary> {
        self.boundary.take()
    }

    pub fn boundary(&self) -> Option<&ViewportBoundary> {
        self.boundary.as_ref()
    }

    pub fn boundary_mut(&mut self) -> Option<&mut ViewportBoundary> {
        self.boundary.as_mut()
    }

    /// Forward the current viewport and camera to the boundary, if any
    pub fn set_viewport(&mut self, viewport: Viewport, camera: CameraProjection) {
        if let Some(boundary) = &mut self.boundary {
            boundary.set_viewport(viewport, camera);
        }
    }

    /// Start consuming time in `tick`
    ///
    /// The clock restarts, so time spent stopped is never simulated.
    pub fn start(&mut self) {
        self.running = true;
        self.last_update = None;
        self.accumulator = 0.0;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance by wall-clock time `now` (seconds), returning the steps run
    ///
    /// Runs whole fixed steps from the accumulated time, at most
    /// `max_substeps` per call. The first call after `start` only records
    /// the time.
    pub fn tick(&mut self, now: f64) -> usize {
        if !self.running {
            return 0;
        }
        let Some(last) = self.last_update.replace(now) else {
            return 0;
        };

        let fixed = self.config.fixed_timestep;
        if !(fixed > 0.0) {
            return 0;
        }

        self.accumulator += (now - last).max(0.0) as f32;

        let mut steps = 0;
        while self.accumulator >= fixed && steps < self.config.max_substeps {
            self.step(fixed);
            self.accumulator -= fixed;
            steps += 1;
        }

        if self.accumulator >= fixed {
            let dropped = (self.accumulator / fixed).floor();
            log::debug!("Step cap reached, dropping {} steps", dropped);
            self.accumulator %= fixed;
        }

        if self.config.interpolate_remainder && self.accumulator > 0.0 {
            self.step(self.accumulator);
            self.accumulator = 0.0;
            steps += 1;
        }

        steps
    }

    /// Step the physics simulation forward by dt seconds
    ///
    /// This performs:
    /// 1. Force accumulation for awake dynamic bodies
    /// 2. Semi-implicit Euler integration of velocity, position and rotation
    /// 3. Boundary restoring force for boundary-constrained bodies
    /// 4. Pairwise collision detection and resolution
    /// 5. Sleep check
    pub fn step(&mut self, dt: f32) {
        if !(dt > 0.0) {
            return;
        }

        // Phase 1: Forces
        for body in self.bodies.values_mut() {
            forces::accumulate(body, &self.environment, &self.config, &mut self.rng);
        }

        // Phase 2: Integrate and keep on screen
        for body in self.bodies.values_mut() {
            if !body.is_active() {
                continue;
            }

            body.velocity += body.acceleration * dt;
            body.position += body.velocity * dt;
            integrate_rotation(body, dt);

            if body.boundary_constrained {
                if let Some(boundary) = &self.boundary {
                    let state = boundary.check_boundary(body.position);
                    body.velocity = boundary.apply_boundary_force(&state, body.velocity, dt);
                }
            }
        }

        // Phase 3: Collisions
        self.resolve_collisions();

        // Phase 4: Sleep
        if self.config.features.contains(PhysicsFeatures::SLEEPING) {
            self.update_sleep(dt);
        }
    }

    /// Detect and resolve every pair with at least one awake dynamic body
    ///
    /// Each unordered pair is visited once per step.
    fn resolve_collisions(&mut self) {
        let settings = self.config.response_settings();
        let keys: Vec<BodyKey> = self.bodies.keys().collect();

        for (i, &key_a) in keys.iter().enumerate() {
            for &key_b in &keys[i + 1..] {
                let Some([a, b]) = self.bodies.get_disjoint_mut([key_a, key_b]) else {
                    continue;
                };
                if !a.is_active() && !b.is_active() {
                    continue;
                }

                if let Some(contact) = collision::detect(a, b) {
                    log::trace!(
                        "Contact '{}' -> '{}': normal {}, depth {}",
                        a.id,
                        b.id,
                        contact.normal,
                        contact.depth
                    );
                    response::resolve_contact(a, b, &contact, &settings);
                }
            }
        }
    }

    fn update_sleep(&mut self, dt: f32) {
        let threshold = self.config.sleep_threshold;
        for body in self.bodies.values_mut() {
            if !body.is_active() {
                continue;
            }

            let resting = body.velocity.length() < threshold && body.angular_velocity.length() < threshold;
            if !resting {
                body.rest_time = 0.0;
                continue;
            }

            body.rest_time += dt;
            if body.rest_time >= self.config.sleep_delay {
                log::debug!("'{}' fell asleep", body.id);
                body.is_sleeping = true;
                body.velocity = Vec3::ZERO;
                body.angular_velocity = Vec3::ZERO;
                body.acceleration = Vec3::ZERO;
            }
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Advance the orientation by the angular velocity over `dt`
fn integrate_rotation(body: &mut PhysicsObject, dt: f32) {
    if body.angular_velocity == Vec3::ZERO {
        return;
    }
    let half = body.angular_velocity * (dt * 0.5);
    let spin = Quat::from_xyzw(half.x, half.y, half.z, 1.0);
    body.rotation = (spin * body.rotation).normalize();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::BoundaryConfig;

    const DT: f32 = 1.0 / 60.0;

    fn quiet_config() -> PhysicsConfig {
        PhysicsConfig::default().with_features(PhysicsFeatures::FRICTION | PhysicsFeatures::SLEEPING)
    }

    #[test]
    fn test_physics_config_default() {
        let config = PhysicsConfig::default();
        assert_eq!(config.gravity, -9.8);
        assert_eq!(config.max_substeps, 5);
        assert!((config.fixed_timestep - 1.0 / 60.0).abs() < 1e-6);
        assert_eq!(config.features, PhysicsFeatures::all());
    }

    #[test]
    fn test_response_settings_follow_friction_feature() {
        let config = PhysicsConfig::default().with_features(PhysicsFeatures::empty());
        assert!(!config.response_settings().friction);
        assert!(PhysicsConfig::default().response_settings().friction);
    }

    #[test]
    fn test_world_add_and_get() {
        let mut world = PhysicsWorld::new();
        assert_eq!(world.body_count(), 0);

        let key = world
            .add(PhysicsObject::new_sphere("ball", Vec3::new(0.0, 5.0, 0.0), 0.5))
            .expect("valid object");

        let body = world.get("ball").expect("Body should exist");
        assert_eq!(body.position, Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(world.key("ball"), Some(key));
        assert!(world.get_by_key(key).is_some());
        assert_eq!(world.body_count(), 1);
    }

    #[test]
    fn test_world_add_rejects_invalid() {
        let mut world = PhysicsWorld::new();
        let result = world.add(PhysicsObject::new_sphere("ball", Vec3::ZERO, 0.5).with_mass(0.0));
        assert!(matches!(result, Err(PhysicsError::InvalidMass { .. })));
        assert!(!world.contains("ball"));
    }

    #[test]
    fn test_world_add_overwrites_in_place() {
        let mut world = PhysicsWorld::new();
        let first = world.add(PhysicsObject::new_sphere("ball", Vec3::ZERO, 0.5)).expect("valid");
        let second = world
            .add(PhysicsObject::new_sphere("ball", Vec3::ONE, 0.25))
            .expect("valid");

        assert_eq!(first, second);
        assert_eq!(world.body_count(), 1);
        assert_eq!(world.get("ball").map(|b| b.position), Some(Vec3::ONE));
    }

    #[test]
    fn test_world_remove_unknown_is_none() {
        let mut world = PhysicsWorld::new();
        world.add(PhysicsObject::new_sphere("ball", Vec3::ZERO, 0.5)).expect("valid");

        assert!(world.remove("ball").is_some());
        assert!(world.remove("ball").is_none());
        assert!(world.remove("never").is_none());
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn test_world_update() {
        let mut world = PhysicsWorld::new();
        world.add(PhysicsObject::new_sphere("ball", Vec3::ZERO, 0.5)).expect("valid");

        let moved = world.update("ball", &ObjectUpdate::position(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(moved, Ok(true));
        assert_eq!(world.get("ball").map(|b| b.position), Some(Vec3::new(1.0, 2.0, 3.0)));

        assert_eq!(world.update("ghost", &ObjectUpdate::default()), Ok(false));
    }

    #[test]
    fn test_world_update_rejects_invalid_and_keeps_object() {
        let mut world = PhysicsWorld::new();
        world.add(PhysicsObject::new_sphere("ball", Vec3::ZERO, 0.5)).expect("valid");

        let update = ObjectUpdate {
            position: Some(Vec3::ONE),
            mass: Some(-2.0),
            ..Default::default()
        };
        assert!(world.update("ball", &update).is_err());

        let ball = world.get("ball").expect("still registered");
        assert_eq!(ball.position, Vec3::ZERO);
        assert_eq!(ball.mass, 1.0);
    }

    #[test]
    fn test_inputs_on_unknown_ids_are_noops() {
        let mut world = PhysicsWorld::new();
        assert!(!world.apply_force("ghost", Vec3::ONE));
        assert!(!world.apply_impulse("ghost", Vec3::ONE));
        assert!(!world.apply_torque("ghost", Vec3::ONE));
        assert!(!world.wake("ghost"));
    }

    #[test]
    fn test_add_ground_top_face() {
        let mut world = PhysicsWorld::new();
        world.add_ground(-1.0).expect("valid ground");

        let ground = world.get(GROUND_ID).expect("ground exists");
        assert!(ground.is_static);
        assert!((ground.bounding_box().max.y + 1.0).abs() < 0.0001);
        assert!(ground.bounding_box().size().abs_diff_eq(Vec3::new(100.0, 0.1, 100.0), 0.0001));
    }

    #[test]
    fn test_gravity_integration() {
        let mut world = PhysicsWorld::with_config(quiet_config());
        world.add(PhysicsObject::new_sphere("ball", Vec3::new(0.0, 10.0, 0.0), 0.5)).expect("valid");

        world.step(0.1);

        let ball = world.get("ball").expect("exists");
        // v = -9.8 * 0.1, p = 10 + v * 0.1
        assert!((ball.velocity.y + 0.98).abs() < 0.0001);
        assert!((ball.position.y - 9.902).abs() < 0.0001);
    }

    #[test]
    fn test_applied_force_survives_until_next_step() {
        let mut world = PhysicsWorld::with_config(quiet_config());
        world
            .add(PhysicsObject::new_sphere("ball", Vec3::ZERO, 0.5).with_gravity(false).with_mass(2.0))
            .expect("valid");

        assert!(world.apply_force("ball", Vec3::new(4.0, 0.0, 0.0)));
        world.step(0.5);
        assert!((world.get("ball").map(|b| b.velocity.x).unwrap_or_default() - 1.0).abs() < 0.0001);

        // Consumed by the first step
        world.step(0.5);
        assert!((world.get("ball").map(|b| b.velocity.x).unwrap_or_default() - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_rotation_integration() {
        let mut world = PhysicsWorld::with_config(quiet_config());
        world
            .add(
                PhysicsObject::new_sphere("spinner", Vec3::ZERO, 0.5)
                    .with_gravity(false)
                    .with_angular_velocity(Vec3::new(0.0, 1.0, 0.0)),
            )
            .expect("valid");

        for _ in 0..60 {
            world.step(DT);
        }

        let spinner = world.get("spinner").expect("exists");
        assert!(spinner.rotation.is_normalized());
        let (axis, angle) = spinner.rotation.to_axis_angle();
        assert!(axis.y > 0.99);
        assert!((angle - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_tick_first_call_only_records_time() {
        let mut world = PhysicsWorld::new();
        world.start();
        assert_eq!(world.tick(10.0), 0);
        assert_eq!(world.tick(10.0 + 2.0 / 60.0 + 0.001), 2);
    }

    #[test]
    fn test_tick_caps_substeps() {
        let mut world = PhysicsWorld::new();
        world.start();
        world.tick(0.0);

        assert_eq!(world.tick(1.0), 5);
        assert!(world.accumulator < world.config.fixed_timestep);
    }

    #[test]
    fn test_tick_stopped_world_does_nothing() {
        let mut world = PhysicsWorld::new();
        assert!(!world.is_running());
        assert_eq!(world.tick(0.0), 0);
        assert_eq!(world.tick(1.0), 0);

        world.start();
        world.tick(1.0);
        world.stop();
        assert_eq!(world.tick(2.0), 0);
    }

    #[test]
    fn test_tick_negative_delta_is_ignored() {
        let mut world = PhysicsWorld::new();
        world.start();
        world.tick(5.0);
        assert_eq!(world.tick(4.0), 0);
        assert_eq!(world.accumulator, 0.0);
    }

    #[test]
    fn test_tick_interpolates_remainder() {
        let config = PhysicsConfig {
            interpolate_remainder: true,
            ..quiet_config()
        };
        let mut world = PhysicsWorld::with_config(config);
        world.start();
        world.tick(0.0);

        // One whole step plus a partial one
        assert_eq!(world.tick(1.5 / 60.0), 2);
        assert_eq!(world.accumulator, 0.0);
    }

    #[test]
    fn test_restart_does_not_replay_gap() {
        let mut world = PhysicsWorld::new();
        world.start();
        world.tick(0.0);
        world.stop();

        world.start();
        assert_eq!(world.tick(100.0), 0);
        assert_eq!(world.tick(100.0 + 1.5 / 60.0), 1);
    }

    #[test]
    fn test_resting_body_falls_asleep_after_delay() {
        let mut world = PhysicsWorld::with_config(quiet_config());
        world
            .add(PhysicsObject::new_sphere("ball", Vec3::ZERO, 0.5).with_gravity(false))
            .expect("valid");

        for _ in 0..10 {
            world.step(DT);
        }
        assert!(!world.get("ball").map(|b| b.is_sleeping).unwrap_or(true));

        for _ in 0..10 {
            world.step(DT);
        }
        assert!(world.get("ball").map(|b| b.is_sleeping).unwrap_or(false));
    }

    #[test]
    fn test_sleeping_disabled() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::default().with_features(PhysicsFeatures::empty()));
        world
            .add(PhysicsObject::new_sphere("ball", Vec3::ZERO, 0.5).with_gravity(false))
            .expect("valid");

        for _ in 0..120 {
            world.step(DT);
        }
        assert!(!world.get("ball").map(|b| b.is_sleeping).unwrap_or(true));
    }

    #[test]
    fn test_wake_and_impulse_resume_motion() {
        let mut world = PhysicsWorld::with_config(quiet_config());
        world
            .add(PhysicsObject::new_sphere("ball", Vec3::ZERO, 0.5).with_gravity(false))
            .expect("valid");
        for _ in 0..30 {
            world.step(DT);
        }
        assert!(world.get("ball").map(|b| b.is_sleeping).unwrap_or(false));

        assert!(world.apply_impulse("ball", Vec3::new(1.0, 0.0, 0.0)));
        world.step(DT);

        let ball = world.get("ball").expect("exists");
        assert!(!ball.is_sleeping);
        assert!(ball.position.x > 0.0);

        assert!(world.wake("ball"));
    }

    #[test]
    fn test_environment_update() {
        let mut world = PhysicsWorld::new();
        world.update_environment(&EnvironmentUpdate::wind(Vec3::new(0.0, 0.0, -2.0), 3.0));

        assert_eq!(world.environment().wind.direction, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(world.environment().wind.speed, 3.0);
    }

    #[test]
    fn test_wind_moves_wind_affected_body() {
        let config = PhysicsConfig::default().with_features(PhysicsFeatures::WIND);
        let mut world = PhysicsWorld::with_config(config);
        world
            .add(PhysicsObject::new_box("kite", Vec3::ZERO, Vec3::splat(0.5)).with_gravity(false).with_wind(true))
            .expect("valid");
        world.update_environment(&EnvironmentUpdate::wind(Vec3::X, 5.0));

        for _ in 0..30 {
            world.step(DT);
        }
        assert!(world.get("kite").map(|b| b.velocity.x).unwrap_or_default() > 0.0);
    }

    #[test]
    fn test_boundary_pulls_constrained_body() {
        let mut world = PhysicsWorld::with_config(quiet_config());
        world.set_boundary(
            ViewportBoundary::new(BoundaryConfig::default())
                .with_viewport(Viewport::default(), CameraProjection::Orthographic),
        );
        world
            .add(
                PhysicsObject::new_sphere("pet", Vec3::new(5.0, 0.0, 0.0), 0.3)
                    .with_gravity(false)
                    .with_boundary(true),
            )
            .expect("valid");
        world
            .add(PhysicsObject::new_sphere("free", Vec3::new(5.0, 0.0, 3.0), 0.3).with_gravity(false))
            .expect("valid");

        world.step(DT);

        assert!(world.get("pet").map(|b| b.velocity.x).unwrap_or_default() < 0.0);
        assert_eq!(world.get("free").map(|b| b.velocity.x), Some(0.0));
    }

    #[test]
    fn test_sleeping_pair_is_not_tested() {
        let mut world = PhysicsWorld::with_config(quiet_config());
        let mut a = PhysicsObject::new_sphere("a", Vec3::ZERO, 0.5).with_gravity(false);
        let mut b = PhysicsObject::new_sphere("b", Vec3::new(0.5, 0.0, 0.0), 0.5).with_gravity(false);
        a.is_sleeping = true;
        b.is_sleeping = true;
        world.add(a).expect("valid");
        world.add(b).expect("valid");

        world.step(DT);

        assert_eq!(world.get("a").map(|b| b.position), Some(Vec3::ZERO));
        assert!(world.get("b").map(|b| b.is_sleeping).unwrap_or(false));
    }

    #[test]
    fn test_head_on_pair_resolves_in_one_step() {
        let mut world = PhysicsWorld::with_config(PhysicsConfig::default().with_features(PhysicsFeatures::empty()));
        let elastic = PhysicsMaterial::new(0.0, 1.0, 1000.0);
        world
            .add(
                PhysicsObject::new_sphere("a", Vec3::new(-0.45, 0.0, 0.0), 0.5)
                    .with_gravity(false)
                    .with_velocity(Vec3::new(1.0, 0.0, 0.0))
                    .with_material(elastic),
            )
            .expect("valid");
        world
            .add(
                PhysicsObject::new_sphere("b", Vec3::new(0.45, 0.0, 0.0), 0.5)
                    .with_gravity(false)
                    .with_velocity(Vec3::new(-1.0, 0.0, 0.0))
                    .with_material(elastic),
            )
            .expect("valid");

        world.step(DT);

        let a = world.get("a").expect("exists");
        let b = world.get("b").expect("exists");
        assert!((a.velocity.x + 1.0).abs() < 0.0001);
        assert!((b.velocity.x - 1.0).abs() < 0.0001);
        assert!(a.position.distance(b.position) >= 1.0 - 0.0001);
    }

    #[test]
    fn test_moving_body_wakes_sleeper() {
        let mut world = PhysicsWorld::with_config(quiet_config());
        let mut sleeper = PhysicsObject::new_sphere("sleeper", Vec3::new(1.0, 0.0, 0.0), 0.5).with_gravity(false);
        sleeper.is_sleeping = true;
        world.add(sleeper).expect("valid");
        world
            .add(
                PhysicsObject::new_sphere("mover", Vec3::new(0.05, 0.0, 0.0), 0.5)
                    .with_gravity(false)
                    .with_velocity(Vec3::new(3.0, 0.0, 0.0)),
            )
            .expect("valid");

        world.step(DT);

        let sleeper = world.get("sleeper").expect("exists");
        assert!(!sleeper.is_sleeping);
        assert!(sleeper.velocity.x > 0.0);
    }
}
