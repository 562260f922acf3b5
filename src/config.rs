//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`DESKPET_SECTION__KEY`)

use deskpet_physics::{BoundaryAxes, CameraProjection, EnvironmentUpdate, PhysicsFeatures, Viewport, ViewportBoundary};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::input::InteractionSettings;
use crate::scene::FurnitureKind;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Physics configuration
    #[serde(default)]
    pub physics: PhysicsConfig,
    /// Initial environment
    #[serde(default)]
    pub environment: EnvironmentConfig,
    /// Viewport boundary configuration
    #[serde(default)]
    pub boundary: BoundaryConfig,
    /// Viewport and camera configuration
    #[serde(default)]
    pub viewport: ViewportConfig,
    /// Scene contents
    #[serde(default)]
    pub scene: SceneConfig,
    /// Pointer interaction tuning
    #[serde(default)]
    pub interaction: InteractionSettings,
    /// Headless run configuration
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`DESKPET_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // DESKPET_PHYSICS__GRAVITY=-5 -> physics.gravity = -5
        figment = figment.merge(Env::prefixed("DESKPET_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Physics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Gravity (negative = downward)
    pub gravity: f32,
    /// Fixed simulation step in seconds
    pub fixed_timestep: f32,
    /// Most steps per frame
    pub max_substeps: usize,
    /// Run a partial step for leftover frame time
    pub interpolate_remainder: bool,
    pub air_density: f32,
    pub drag_coefficient: f32,
    pub wind_coefficient: f32,
    pub sleep_threshold: f32,
    /// Seconds at rest before sleeping
    pub sleep_delay: f32,
    pub restitution_velocity_threshold: f32,
    pub fluid_dynamics: bool,
    pub wind: bool,
    pub friction: bool,
    pub sleeping: bool,
    pub turbulence_seed: u64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        let core = deskpet_physics::PhysicsConfig::default();
        Self {
            gravity: core.gravity,
            fixed_timestep: core.fixed_timestep,
            max_substeps: core.max_substeps,
            interpolate_remainder: core.interpolate_remainder,
            air_density: core.air_density,
            drag_coefficient: core.drag_coefficient,
            wind_coefficient: core.wind_coefficient,
            sleep_threshold: core.sleep_threshold,
            sleep_delay: core.sleep_delay,
            restitution_velocity_threshold: core.restitution_velocity_threshold,
            fluid_dynamics: true,
            wind: true,
            friction: true,
            sleeping: true,
            turbulence_seed: core.turbulence_seed,
        }
    }
}

impl PhysicsConfig {
    /// Enabled feature set
    pub fn features(&self) -> PhysicsFeatures {
        let mut features = PhysicsFeatures::empty();
        features.set(PhysicsFeatures::FLUID_DYNAMICS, self.fluid_dynamics);
        features.set(PhysicsFeatures::WIND, self.wind);
        features.set(PhysicsFeatures::FRICTION, self.friction);
        features.set(PhysicsFeatures::SLEEPING, self.sleeping);
        features
    }

    /// Convert to the physics world's configuration
    pub fn to_physics_config(&self) -> deskpet_physics::PhysicsConfig {
        deskpet_physics::PhysicsConfig {
            gravity: self.gravity,
            fixed_timestep: self.fixed_timestep,
            max_substeps: self.max_substeps,
            interpolate_remainder: self.interpolate_remainder,
            air_density: self.air_density,
            drag_coefficient: self.drag_coefficient,
            wind_coefficient: self.wind_coefficient,
            sleep_threshold: self.sleep_threshold,
            sleep_delay: self.sleep_delay,
            restitution_velocity_threshold: self.restitution_velocity_threshold,
            features: self.features(),
            turbulence_seed: self.turbulence_seed,
        }
    }
}

/// Initial environment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    /// Wind direction [x, y, z], normalized on load
    pub wind_direction: [f32; 3],
    pub wind_speed: f32,
    pub turbulence: f32,
    pub temperature: f32,
    pub humidity: f32,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            wind_direction: [1.0, 0.0, 0.0],
            wind_speed: 0.0,
            turbulence: 0.1,
            temperature: 20.0,
            humidity: 50.0,
        }
    }
}

impl EnvironmentConfig {
    /// Update that sets every environment field
    pub fn to_environment_update(&self) -> EnvironmentUpdate {
        EnvironmentUpdate {
            wind_direction: Some(Vec3::from_array(self.wind_direction)),
            wind_speed: Some(self.wind_speed),
            turbulence: Some(self.turbulence),
            temperature: Some(self.temperature),
            humidity: Some(self.humidity),
        }
    }
}

/// Viewport boundary configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    /// Install the boundary at all
    pub enabled: bool,
    pub margin: f32,
    pub enable_x: bool,
    pub enable_y: bool,
    pub enable_z: bool,
    pub bounce_effect: bool,
    pub stiffness: f32,
    pub bounce_gain: f32,
    pub damping: f32,
    pub ortho_half_width: f32,
    pub depth_min: f32,
    pub depth_max: f32,
    pub y_min: f32,
    pub y_max: f32,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        let core = deskpet_physics::BoundaryConfig::default();
        Self {
            enabled: true,
            margin: core.margin,
            enable_x: core.axes.contains(BoundaryAxes::X),
            enable_y: core.axes.contains(BoundaryAxes::Y),
            enable_z: core.axes.contains(BoundaryAxes::Z),
            bounce_effect: core.bounce_effect,
            stiffness: core.stiffness,
            bounce_gain: core.bounce_gain,
            damping: core.damping,
            ortho_half_width: core.ortho_half_width,
            depth_min: core.depth_min,
            depth_max: core.depth_max,
            y_min: core.y_min,
            y_max: core.y_max,
        }
    }
}

impl BoundaryConfig {
    pub fn axes(&self) -> BoundaryAxes {
        let mut axes = BoundaryAxes::empty();
        axes.set(BoundaryAxes::X, self.enable_x);
        axes.set(BoundaryAxes::Y, self.enable_y);
        axes.set(BoundaryAxes::Z, self.enable_z);
        axes
    }

    /// Convert to the physics boundary configuration
    pub fn to_boundary_config(&self) -> deskpet_physics::BoundaryConfig {
        deskpet_physics::BoundaryConfig {
            margin: self.margin,
            axes: self.axes(),
            bounce_effect: self.bounce_effect,
            stiffness: self.stiffness,
            bounce_gain: self.bounce_gain,
            damping: self.damping,
            ortho_half_width: self.ortho_half_width,
            depth_min: self.depth_min,
            depth_max: self.depth_max,
            y_min: self.y_min,
            y_max: self.y_max,
        }
    }
}

/// Camera projection kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
    Perspective,
    Orthographic,
}

/// Viewport and camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Viewport width in pixels
    pub width: f32,
    /// Viewport height in pixels
    pub height: f32,
    pub projection: ProjectionKind,
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Camera distance from the origin along Z
    pub camera_distance: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            projection: ProjectionKind::Perspective,
            fov: 40.0,
            camera_distance: 3.5,
        }
    }
}

impl ViewportConfig {
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn camera(&self) -> CameraProjection {
        match self.projection {
            ProjectionKind::Perspective => CameraProjection::Perspective {
                fov_y_degrees: self.fov,
                distance: self.camera_distance,
            },
            ProjectionKind::Orthographic => CameraProjection::Orthographic,
        }
    }

    /// Boundary for this viewport, `None` when disabled
    pub fn to_boundary(&self, boundary: &BoundaryConfig) -> Option<ViewportBoundary> {
        boundary.enabled.then(|| {
            ViewportBoundary::new(boundary.to_boundary_config()).with_viewport(self.viewport(), self.camera())
        })
    }
}

/// An avatar in the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarConfig {
    pub id: String,
    /// Spawn position [x, y, z]
    pub position: [f32; 3],
    #[serde(default = "default_avatar_radius")]
    pub radius: f32,
    #[serde(default = "default_avatar_mass")]
    pub mass: f32,
}

fn default_avatar_radius() -> f32 {
    0.5
}

fn default_avatar_mass() -> f32 {
    1.0
}

/// A furniture obstacle in the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FurnitureConfig {
    pub kind: FurnitureKind,
    /// Footprint center [x, y, z]
    pub position: [f32; 3],
}

/// Scene contents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Top of the ground slab
    pub ground_y: f32,
    /// Add the pointer collider
    pub mouse_collider: bool,
    pub avatars: Vec<AvatarConfig>,
    pub furniture: Vec<FurnitureConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            ground_y: 0.0,
            mouse_collider: true,
            avatars: vec![AvatarConfig {
                id: "avatar_0".to_string(),
                position: [0.0, 1.5, 0.0],
                radius: default_avatar_radius(),
                mass: default_avatar_mass(),
            }],
            furniture: Vec::new(),
        }
    }
}

/// Headless run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Frames to simulate
    pub frames: u32,
    /// Seconds per frame
    pub frame_time: f64,
    /// Log avatar poses every this many frames
    pub report_interval: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            frames: 300,
            frame_time: 1.0 / 60.0,
            report_interval: 60,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log the boundary region on startup
    pub show_boundary: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            show_boundary: false,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
