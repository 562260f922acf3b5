//! Rigid-body physics for desk-pet scenes
//!
//! This crate provides:
//! - Sphere and box colliders with sphere/box narrow-phase tests
//! - Impulse-based collision response with restitution and friction
//! - Gravity, air drag and wind from a shared environment
//! - A fixed-timestep world with sleep/wake
//! - A viewport boundary that keeps bodies on screen

pub mod body;
pub mod boundary;
pub mod collision;
pub mod environment;
pub mod error;
pub mod forces;
pub mod material;
pub mod response;
pub mod shapes;
pub mod world;

// Re-export commonly used types
pub use body::{BodyKey, ObjectId, ObjectUpdate, PhysicsObject};
pub use boundary::{
    BoundaryAxes, BoundaryConfig, BoundaryState, BoundaryVisualization, CameraProjection, Viewport,
    ViewportBoundary, ViewportBounds,
};
pub use collision::{aabb_vs_aabb, detect, sphere_vs_aabb, sphere_vs_sphere, Contact};
pub use environment::{Environment, EnvironmentUpdate, Wind};
pub use error::PhysicsError;
pub use material::PhysicsMaterial;
pub use response::{momentum, resolve_contact, ResponseSettings};
pub use shapes::{Aabb, ColliderShape, Sphere};
pub use world::{PhysicsConfig, PhysicsFeatures, PhysicsWorld, GROUND_ID};
