//! Physics objects simulated by the world

use std::borrow::Borrow;
use std::fmt;

use glam::{Quat, Vec3};
use slotmap::new_key_type;

use crate::error::PhysicsError;
use crate::material::PhysicsMaterial;
use crate::shapes::{Aabb, ColliderShape};

new_key_type! {
    /// Slot of a physics object inside the world's storage
    ///
    /// Generational, so a slot freed by `remove` and reused by a later `add`
    /// never aliases the old object.
    pub struct BodyKey;
}

/// Stable, caller-chosen identifier of a physics object
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ObjectId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A rigid body with position, velocity, orientation and collision shape
#[derive(Clone, Debug)]
pub struct PhysicsObject {
    /// Registry key, unique among live objects
    pub id: ObjectId,
    /// Position in world space (center of the collider)
    pub position: Vec3,
    /// Velocity (units per second)
    pub velocity: Vec3,
    /// Scratch accumulator, rebuilt at the start of every step
    pub acceleration: Vec3,
    /// Orientation
    pub rotation: Quat,
    /// Angular velocity (radians per second)
    pub angular_velocity: Vec3,
    /// Mass; `f32::INFINITY` for static bodies
    pub mass: f32,
    /// Collision shape
    pub shape: ColliderShape,
    /// Surface material
    pub material: PhysicsMaterial,
    /// Static bodies never move but still block others
    pub is_static: bool,
    /// Sleeping bodies skip forces and integration until woken
    pub is_sleeping: bool,
    /// Whether gravity applies
    pub affected_by_gravity: bool,
    /// Whether environment wind pushes this body
    pub wind_affected: bool,
    /// Whether the viewport boundary keeps this body on screen
    pub boundary_constrained: bool,
    /// Carried for thermal effects; the simulation does not read it
    pub temperature: Option<f32>,
    /// External force applied since the last step
    pub(crate) pending_force: Vec3,
    /// Time spent continuously below the sleep threshold
    pub(crate) rest_time: f32,
}

impl PhysicsObject {
    fn with_shape(id: impl Into<ObjectId>, position: Vec3, shape: ColliderShape) -> Self {
        Self {
            id: id.into(),
            position,
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            angular_velocity: Vec3::ZERO,
            mass: 1.0,
            shape,
            material: PhysicsMaterial::default(),
            is_static: false,
            is_sleeping: false,
            affected_by_gravity: true,
            wind_affected: false,
            boundary_constrained: false,
            temperature: None,
            pending_force: Vec3::ZERO,
            rest_time: 0.0,
        }
    }

    /// Create a dynamic body with a sphere collider
    pub fn new_sphere(id: impl Into<ObjectId>, position: Vec3, radius: f32) -> Self {
        Self::with_shape(id, position, ColliderShape::Sphere { radius })
    }

    /// Create a dynamic body with a box collider
    pub fn new_box(id: impl Into<ObjectId>, position: Vec3, half_extents: Vec3) -> Self {
        Self::with_shape(id, position, ColliderShape::Box { half_extents })
    }

    /// Create a static box obstacle
    pub fn new_static_box(id: impl Into<ObjectId>, position: Vec3, half_extents: Vec3) -> Self {
        Self::new_box(id, position, half_extents).with_static(true)
    }

    /// Set the velocity of this body
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the angular velocity of this body
    pub fn with_angular_velocity(mut self, angular_velocity: Vec3) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Set the orientation of this body
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the mass of this body
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Set the surface material
    pub fn with_material(mut self, material: PhysicsMaterial) -> Self {
        self.material = material;
        self
    }

    /// Set whether gravity applies
    pub fn with_gravity(mut self, affected: bool) -> Self {
        self.affected_by_gravity = affected;
        self
    }

    /// Set whether wind applies
    pub fn with_wind(mut self, affected: bool) -> Self {
        self.wind_affected = affected;
        self
    }

    /// Keep this body inside the viewport boundary
    pub fn with_boundary(mut self, constrained: bool) -> Self {
        self.boundary_constrained = constrained;
        self
    }

    /// Attach a temperature reading
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set whether this body is static
    ///
    /// Static bodies get infinite mass and lose all motion.
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.set_static(is_static);
        self
    }

    fn set_static(&mut self, is_static: bool) {
        self.is_static = is_static;
        if is_static {
            self.mass = f32::INFINITY;
            self.affected_by_gravity = false;
            self.is_sleeping = false;
            self.velocity = Vec3::ZERO;
            self.angular_velocity = Vec3::ZERO;
        } else if !self.mass.is_finite() {
            self.mass = 1.0;
            self.affected_by_gravity = true;
        }
    }

    /// Inverse mass, zero for static or infinitely heavy bodies
    pub fn inverse_mass(&self) -> f32 {
        if self.is_static || !self.mass.is_finite() || self.mass <= 0.0 {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// Awake, movable body
    pub fn is_active(&self) -> bool {
        !self.is_static && !self.is_sleeping
    }

    /// World-space bounding box
    pub fn bounding_box(&self) -> Aabb {
        self.shape.bounding_box(self.position)
    }

    /// Kinetic energy of the linear motion
    pub fn kinetic_energy(&self) -> f32 {
        if self.is_static {
            0.0
        } else {
            0.5 * self.mass * self.velocity.length_squared()
        }
    }

    /// Clear the sleeping flag
    pub fn wake(&mut self) {
        self.is_sleeping = false;
        self.rest_time = 0.0;
    }

    /// Queue a force for the next step
    ///
    /// Ignored for static bodies. Wakes the body.
    pub fn apply_force(&mut self, force: Vec3) {
        if self.is_static {
            return;
        }
        self.wake();
        self.pending_force += force;
    }

    /// Change velocity instantly by `impulse / mass`
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        if self.is_static {
            return;
        }
        self.wake();
        self.velocity += impulse * self.inverse_mass();
    }

    /// Change angular velocity instantly by `torque / mass`
    pub fn apply_torque(&mut self, torque: Vec3) {
        if self.is_static {
            return;
        }
        self.wake();
        self.angular_velocity += torque * self.inverse_mass();
    }

    /// Check the registration preconditions
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if self.id.as_str().is_empty() {
            return Err(PhysicsError::MissingId);
        }
        let id = self.id.to_string();
        if !self.is_static && !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(PhysicsError::InvalidMass { id, mass: self.mass });
        }
        if let Err(reason) = self.shape.validate() {
            return Err(PhysicsError::InvalidShape { id, reason });
        }
        let checks = [
            ("position", self.position.is_finite()),
            ("velocity", self.velocity.is_finite()),
            ("angular velocity", self.angular_velocity.is_finite()),
            ("rotation", self.rotation.is_finite()),
        ];
        for (field, finite) in checks {
            if !finite {
                return Err(PhysicsError::NonFiniteState { id, field });
            }
        }
        Ok(())
    }
}

/// Partial field set merged into an existing object by `PhysicsWorld::update`
#[derive(Clone, Debug, Default)]
pub struct ObjectUpdate {
    pub position: Option<Vec3>,
    pub velocity: Option<Vec3>,
    pub rotation: Option<Quat>,
    pub angular_velocity: Option<Vec3>,
    pub mass: Option<f32>,
    pub shape: Option<ColliderShape>,
    pub material: Option<PhysicsMaterial>,
    pub is_static: Option<bool>,
    pub affected_by_gravity: Option<bool>,
    pub wind_affected: Option<bool>,
    pub boundary_constrained: Option<bool>,
    pub temperature: Option<f32>,
}

impl ObjectUpdate {
    /// Update that only moves the object
    pub fn position(position: Vec3) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    /// Merge into `object`
    ///
    /// Toggling `is_static` keeps mass consistent with the flag.
    pub(crate) fn apply_to(&self, object: &mut PhysicsObject) {
        if let Some(position) = self.position {
            object.position = position;
        }
        if let Some(velocity) = self.velocity {
            object.velocity = velocity;
        }
        if let Some(rotation) = self.rotation {
            object.rotation = rotation;
        }
        if let Some(angular_velocity) = self.angular_velocity {
            object.angular_velocity = angular_velocity;
        }
        if let Some(mass) = self.mass {
            object.mass = mass;
        }
        if let Some(shape) = self.shape {
            object.shape = shape;
        }
        if let Some(material) = self.material {
            object.material = material;
        }
        if let Some(is_static) = self.is_static {
            if is_static != object.is_static {
                object.set_static(is_static);
            }
        }
        if let Some(affected) = self.affected_by_gravity {
            object.affected_by_gravity = affected;
        }
        if let Some(affected) = self.wind_affected {
            object.wind_affected = affected;
        }
        if let Some(constrained) = self.boundary_constrained {
            object.boundary_constrained = constrained;
        }
        if let Some(temperature) = self.temperature {
            object.temperature = Some(temperature);
        }
        if object.is_static {
            object.velocity = Vec3::ZERO;
            object.angular_velocity = Vec3::ZERO;
        }
    }
}
