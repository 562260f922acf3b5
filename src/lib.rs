//! Desk-pet companion physics
//!
//! Configuration, scene seeding, pointer interaction and the frame driver
//! around the `deskpet_physics` world.

pub mod config;
pub mod input;
pub mod scene;
pub mod systems;
