//! Application systems
//!
//! Frame-level systems that sit between the UI layer and the physics world.

mod simulation;

pub use simulation::{bounce_scale, AvatarPose, SimulationResult, SimulationSystem};
