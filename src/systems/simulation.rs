//! Simulation system
//!
//! Drives the physics world from wall-clock time and turns avatar bodies
//! into render poses:
//! - Time since the system was created feeds `PhysicsWorld::tick`
//! - Each tracked avatar yields an `AvatarPose` with a bounce scale

use std::time::Instant;

use deskpet_physics::{ObjectId, PhysicsWorld};
use glam::{Quat, Vec3};

/// Scale gained per unit of height above rest
const BOUNCE_SCALE_PER_UNIT: f32 = 0.1;

/// Render transform of an avatar
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarPose {
    pub id: ObjectId,
    pub position: Vec3,
    pub rotation: Quat,
    /// Uniform scale, grows while the avatar is off its rest height
    pub scale: f32,
}

/// Result of a simulation update
pub struct SimulationResult {
    /// Physics steps run this frame
    pub steps: usize,
    /// Poses of every tracked avatar still in the world
    pub poses: Vec<AvatarPose>,
}

/// Steps the physics world and reports avatar poses
pub struct SimulationSystem {
    epoch: Instant,
    /// Tracked avatars and the height they rest at
    avatars: Vec<(ObjectId, f32)>,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            avatars: Vec::new(),
        }
    }

    /// Track an avatar that rests at `rest_height`
    pub fn with_avatar(mut self, id: impl Into<ObjectId>, rest_height: f32) -> Self {
        self.track(id, rest_height);
        self
    }

    pub fn track(&mut self, id: impl Into<ObjectId>, rest_height: f32) {
        self.avatars.push((id.into(), rest_height));
    }

    /// Run one frame at the current wall-clock time
    pub fn update(&mut self, world: &mut PhysicsWorld) -> SimulationResult {
        let now = self.epoch.elapsed().as_secs_f64();
        self.update_at(world, now)
    }

    /// Run one frame at an explicit time in seconds
    pub fn update_at(&mut self, world: &mut PhysicsWorld, now: f64) -> SimulationResult {
        let steps = world.tick(now);
        SimulationResult {
            steps,
            poses: self.poses(world),
        }
    }

    /// Current poses of the tracked avatars
    pub fn poses(&self, world: &PhysicsWorld) -> Vec<AvatarPose> {
        self.avatars
            .iter()
            .filter_map(|(id, rest_height)| {
                let body = world.get(id.as_str())?;
                Some(AvatarPose {
                    id: id.clone(),
                    position: body.position,
                    rotation: body.rotation,
                    scale: bounce_scale(body.position.y, *rest_height),
                })
            })
            .collect()
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// `1 + |height above rest| * 0.1`
pub fn bounce_scale(height: f32, rest_height: f32) -> f32 {
    1.0 + (height - rest_height).abs() * BOUNCE_SCALE_PER_UNIT
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskpet_physics::PhysicsObject;

    #[test]
    fn test_bounce_scale() {
        assert_eq!(bounce_scale(0.5, 0.5), 1.0);
        assert!((bounce_scale(2.5, 0.5) - 1.2).abs() < 0.0001);
        assert!((bounce_scale(0.0, 0.5) - 1.05).abs() < 0.0001);
    }

    #[test]
    fn test_update_at_steps_world() {
        let mut world = PhysicsWorld::new();
        world
            .add(PhysicsObject::new_sphere("avatar_0", Vec3::new(0.0, 2.5, 0.0), 0.5))
            .unwrap();
        world.start();

        let mut sim = SimulationSystem::new().with_avatar("avatar_0", 0.5);
        let first = sim.update_at(&mut world, 0.0);
        assert_eq!(first.steps, 0);
        assert_eq!(first.poses.len(), 1);
        assert!((first.poses[0].scale - 1.2).abs() < 0.0001);

        let second = sim.update_at(&mut world, 2.0 / 60.0 + 0.001);
        assert_eq!(second.steps, 2);
        assert!(second.poses[0].position.y < 2.5);
    }

    #[test]
    fn test_removed_avatar_has_no_pose() {
        let mut world = PhysicsWorld::new();
        world
            .add(PhysicsObject::new_sphere("avatar_0", Vec3::ZERO, 0.5))
            .unwrap();
        let sim = SimulationSystem::new().with_avatar("avatar_0", 0.5);
        assert_eq!(sim.poses(&world).len(), 1);

        world.remove("avatar_0");
        assert!(sim.poses(&world).is_empty());
    }

    #[test]
    fn test_wall_clock_update_runs() {
        let mut world = PhysicsWorld::new();
        world.start();
        let mut sim = SimulationSystem::default();
        let result = sim.update(&mut world);
        assert_eq!(result.steps, 0);
        assert!(result.poses.is_empty());
    }
}
