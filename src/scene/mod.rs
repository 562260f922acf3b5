//! Scene construction utilities
//!
//! This module provides a declarative API for building desk-pet scenes.

mod scene_builder;

pub use scene_builder::{FurnitureKind, SceneBuilder};
