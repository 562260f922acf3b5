//! Pointer interaction with the physics world
//!
//! Translates taps, drags and drops on avatars into forces, impulses and
//! placements. Application state such as affection is passed in explicitly
//! through `InteractionContext`.

use deskpet_physics::{ObjectUpdate, PhysicsObject, PhysicsWorld};
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Id of the static sphere that follows the pointer
pub const MOUSE_COLLIDER_ID: &str = "mouse_collider";

/// Touchable regions of an avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyPart {
    Head,
    Cheek,
    Chest,
    Hand,
    Belly,
}

impl BodyPart {
    const ALL: [BodyPart; 5] = [
        BodyPart::Head,
        BodyPart::Cheek,
        BodyPart::Chest,
        BodyPart::Hand,
        BodyPart::Belly,
    ];

    /// Base bounce strength of a tap on this part
    pub fn bounce(&self) -> f32 {
        match self {
            BodyPart::Head => 0.8,
            BodyPart::Cheek => 0.3,
            BodyPart::Chest => 0.5,
            BodyPart::Hand => 0.2,
            BodyPart::Belly => 0.6,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BodyPart::Head => "head",
            BodyPart::Cheek => "cheek",
            BodyPart::Chest => "chest",
            BodyPart::Hand => "hand",
            BodyPart::Belly => "belly",
        }
    }

    /// Match a hit mesh name such as `J_Bip_C_Head` to a body part
    pub fn from_mesh_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        Self::ALL.into_iter().find(|part| name.contains(part.as_str()))
    }
}

/// Application state that shapes a reaction
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InteractionContext {
    /// Affection level, 0 to 100
    pub affection: f32,
}

/// Pointer events forwarded from the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Single tap on part of an avatar
    Tap { target: String, part: BodyPart },
    /// Double tap anywhere on an avatar
    DoubleTap { target: String },
    /// Drag in progress, `delta` in world units since the last event
    Drag { target: String, delta: Vec3 },
    /// Drop an object at a world position
    Place { target: String, position: Vec3 },
    /// Pointer moved, in normalized device coordinates
    Move { ndc: Vec2 },
}

/// Interaction tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Impulse per unit of bounce strength
    pub tap_impulse_scale: f32,
    /// Bounce strength of a double tap
    pub double_tap_bounce: f32,
    /// Force per world unit of drag
    pub drag_force_scale: f32,
    /// Random sideways spread of a tap bounce
    pub jitter_x: f32,
    pub jitter_z: f32,
    /// Radius of the pointer collider
    pub mouse_radius: f32,
    /// World units per NDC unit of pointer travel
    pub mouse_reach: f32,
    /// Height of the pointer collider at screen center
    pub mouse_height: f32,
    /// Depth of the pointer collider
    pub mouse_depth: f32,
    /// Seed for the tap jitter
    pub seed: u64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            tap_impulse_scale: 4.0,
            double_tap_bounce: 0.8,
            drag_force_scale: 60.0,
            jitter_x: 0.2,
            jitter_z: 0.1,
            mouse_radius: 0.1,
            mouse_reach: 1.5,
            mouse_height: 1.2,
            mouse_depth: 1.0,
            seed: 0,
        }
    }
}

/// Maps pointer events onto physics calls
pub struct InteractionAdapter {
    pub settings: InteractionSettings,
    rng: StdRng,
}

impl InteractionAdapter {
    pub fn new(settings: InteractionSettings) -> Self {
        let rng = StdRng::seed_from_u64(settings.seed);
        Self { settings, rng }
    }

    /// Static sphere that follows the pointer and shoves avatars aside
    pub fn mouse_collider(&self) -> PhysicsObject {
        PhysicsObject::new_sphere(MOUSE_COLLIDER_ID, self.pointer_to_world(Vec2::ZERO), self.settings.mouse_radius)
            .with_static(true)
    }

    /// World position of the pointer collider for a pointer in NDC
    pub fn pointer_to_world(&self, ndc: Vec2) -> Vec3 {
        let reach = self.settings.mouse_reach;
        Vec3::new(
            ndc.x * reach,
            ndc.y * reach + self.settings.mouse_height,
            self.settings.mouse_depth,
        )
    }

    /// Upward impulse for a tap, scaled by affection and jittered sideways
    pub fn tap_impulse(&mut self, part: BodyPart, context: &InteractionContext) -> Vec3 {
        let strength = part.bounce() * (1.0 + context.affection / 100.0);
        let direction = Vec3::new(
            (self.rng.random::<f32>() - 0.5) * self.settings.jitter_x,
            1.0,
            (self.rng.random::<f32>() - 0.5) * self.settings.jitter_z,
        );
        direction * strength * self.settings.tap_impulse_scale
    }

    /// Apply an event to the world
    ///
    /// Returns `false` when the event names an object the world does not know.
    pub fn handle(&mut self, world: &mut PhysicsWorld, event: &PointerEvent, context: &InteractionContext) -> bool {
        match event {
            PointerEvent::Tap { target, part } => {
                let impulse = self.tap_impulse(*part, context);
                log::debug!("Tap on {} of '{}'", part.as_str(), target);
                world.apply_impulse(target, impulse)
            }
            PointerEvent::DoubleTap { target } => {
                let impulse = Vec3::Y * self.settings.double_tap_bounce * self.settings.tap_impulse_scale;
                world.apply_impulse(target, impulse)
            }
            PointerEvent::Drag { target, delta } => {
                world.apply_force(target, *delta * self.settings.drag_force_scale)
            }
            PointerEvent::Place { target, position } => self.place(world, target, *position),
            PointerEvent::Move { ndc } => self.move_pointer(world, *ndc),
        }
    }

    /// Drop an object at `position`, clamped into the viewport
    fn place(&self, world: &mut PhysicsWorld, target: &str, position: Vec3) -> bool {
        let position = match world.boundary() {
            Some(boundary) => boundary.constrain_position(position),
            None => position,
        };
        let update = ObjectUpdate {
            position: Some(position),
            velocity: Some(Vec3::ZERO),
            angular_velocity: Some(Vec3::ZERO),
            ..Default::default()
        };

        match world.update(target, &update) {
            Ok(found) => {
                world.wake(target);
                found
            }
            Err(err) => {
                log::warn!("Could not place '{}': {}", target, err);
                false
            }
        }
    }

    /// Move the pointer collider and wake anything it now touches
    fn move_pointer(&self, world: &mut PhysicsWorld, ndc: Vec2) -> bool {
        let position = self.pointer_to_world(ndc);
        if !matches!(world.update(MOUSE_COLLIDER_ID, &ObjectUpdate::position(position)), Ok(true)) {
            return false;
        }

        let Some(reach) = world.get(MOUSE_COLLIDER_ID).map(|mouse| mouse.bounding_box()) else {
            return false;
        };
        let touched: Vec<String> = world
            .iter()
            .filter(|body| body.is_sleeping && body.bounding_box().intersects(&reach))
            .map(|body| body.id.to_string())
            .collect();
        for id in touched {
            world.wake(&id);
        }
        true
    }
}

impl Default for InteractionAdapter {
    fn default() -> Self {
        Self::new(InteractionSettings::default())
    }
}
