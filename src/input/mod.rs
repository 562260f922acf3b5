//! Input handling module
//!
//! Maps pointer events from the UI layer onto the physics world.

mod interaction;

pub use interaction::{
    BodyPart, InteractionAdapter, InteractionContext, InteractionSettings, PointerEvent, MOUSE_COLLIDER_ID,
};
