//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for seeding a desk-pet physics world with ground,
//! furniture obstacles and avatars.

use deskpet_physics::{
    EnvironmentUpdate, ObjectId, PhysicsConfig, PhysicsError, PhysicsMaterial, PhysicsObject, PhysicsWorld,
    ViewportBoundary,
};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Kinds of placeable furniture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FurnitureKind {
    Chair,
    Sofa,
    Table,
    Bed,
    #[serde(other)]
    Other,
}

impl FurnitureKind {
    /// Full size of the obstacle box
    pub fn size(&self) -> Vec3 {
        match self {
            FurnitureKind::Chair | FurnitureKind::Sofa => Vec3::new(0.8, 1.0, 0.8),
            FurnitureKind::Table => Vec3::new(1.2, 0.8, 1.2),
            FurnitureKind::Bed => Vec3::new(2.0, 0.5, 1.5),
            FurnitureKind::Other => Vec3::ONE,
        }
    }
}

/// Builder for constructing desk-pet scenes with physics
///
/// # Example
/// ```ignore
/// let world = SceneBuilder::new()
///     .add_ground(0.0)
///     .add_furniture(FurnitureKind::Table, Vec3::new(1.0, 0.0, -0.5))
///     .add_avatar("avatar_0", Vec3::new(0.0, 1.5, 0.0), 0.5, 1.0)
///     .build()?;
/// ```
pub struct SceneBuilder {
    world: PhysicsWorld,
    furniture_count: usize,
    avatars: Vec<ObjectId>,
    first_error: Option<PhysicsError>,
}

impl SceneBuilder {
    /// Create a new scene builder with default physics
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a scene builder with custom physics
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            world: PhysicsWorld::with_config(config),
            furniture_count: 0,
            avatars: Vec::new(),
            first_error: None,
        }
    }

    fn register(&mut self, object: PhysicsObject) -> bool {
        match self.world.add(object) {
            Ok(_) => true,
            Err(err) => {
                log::warn!("Skipping scene object: {}", err);
                self.first_error.get_or_insert(err);
                false
            }
        }
    }

    /// Apply initial environment conditions
    pub fn with_environment(mut self, update: EnvironmentUpdate) -> Self {
        self.world.update_environment(&update);
        self
    }

    /// Keep boundary-constrained bodies inside the viewport
    pub fn with_boundary(mut self, boundary: ViewportBoundary) -> Self {
        self.world.set_boundary(boundary);
        self
    }

    /// Add the ground slab with its top face at `y`
    pub fn add_ground(mut self, y: f32) -> Self {
        if let Err(err) = self.world.add_ground(y) {
            log::warn!("Skipping ground: {}", err);
            self.first_error.get_or_insert(err);
        }
        self
    }

    /// Add a furniture obstacle standing on `position`
    ///
    /// `position` is the center of the footprint; the box extends upward from it.
    /// Furniture is numbered `furniture_0`, `furniture_1`, ... in insertion order.
    pub fn add_furniture(mut self, kind: FurnitureKind, position: Vec3) -> Self {
        let half_extents = kind.size() * 0.5;
        let id = format!("furniture_{}", self.furniture_count);
        self.furniture_count += 1;

        let body = PhysicsObject::new_static_box(id, position + Vec3::new(0.0, half_extents.y, 0.0), half_extents)
            .with_material(PhysicsMaterial::FURNITURE);
        self.register(body);
        self
    }

    /// Add an avatar body
    ///
    /// Avatars are bouncy spheres that feel the wind and stay on screen.
    pub fn add_avatar(mut self, id: &str, position: Vec3, radius: f32, mass: f32) -> Self {
        let body = PhysicsObject::new_sphere(id, position, radius)
            .with_mass(mass)
            .with_material(PhysicsMaterial::CHARACTER)
            .with_wind(true)
            .with_boundary(true);
        if self.register(body) {
            self.avatars.push(ObjectId::from(id));
        }
        self
    }

    /// Add a custom object to the scene
    ///
    /// For objects that don't fit the standard patterns.
    pub fn add_object(mut self, object: PhysicsObject) -> Self {
        self.register(object);
        self
    }

    /// Ids of the avatars added so far
    pub fn avatar_ids(&self) -> &[ObjectId] {
        &self.avatars
    }

    /// Build the scene and return the configured world
    ///
    /// Fails with the first rejected object, if any.
    pub fn build(self) -> Result<PhysicsWorld, PhysicsError> {
        match self.first_error {
            Some(err) => Err(err),
            None => Ok(self.world),
        }
    }

    /// Build the scene, keeping whatever was accepted
    pub fn build_lenient(self) -> (PhysicsWorld, Vec<ObjectId>) {
        (self.world, self.avatars)
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}
