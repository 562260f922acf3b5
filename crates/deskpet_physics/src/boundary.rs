//! Viewport boundary that keeps interactive bodies on screen
//!
//! The visible region is recomputed from the current viewport and camera on
//! every call, so nothing here carries state between frames.

use bitflags::bitflags;
use glam::Vec3;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Axes on which the boundary is enforced
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct BoundaryAxes: u8 {
        const X = 1 << 0;
        const Y = 1 << 1;
        const Z = 1 << 2;
    }
}

impl Default for BoundaryAxes {
    fn default() -> Self {
        Self::X | Self::Z
    }
}

/// Boundary tuning
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryConfig {
    /// Inset from the visible edge
    pub margin: f32,
    pub axes: BoundaryAxes,
    /// Whether `apply_boundary_force` changes velocities at all
    pub bounce_effect: bool,
    /// Restoring force per unit of distance outside the region
    pub stiffness: f32,
    /// Multiplier on the restoring force when applied to velocity
    pub bounce_gain: f32,
    /// Velocity multiplier applied while outside
    pub damping: f32,
    /// Half of the visible width under an orthographic camera
    pub ortho_half_width: f32,
    /// Depth range before the margin is applied
    pub depth_min: f32,
    pub depth_max: f32,
    /// Vertical range, used only when `axes` contains `Y`
    pub y_min: f32,
    pub y_max: f32,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            margin: 0.5,
            axes: BoundaryAxes::default(),
            bounce_effect: true,
            stiffness: 0.1,
            bounce_gain: 10.0,
            damping: 0.95,
            ortho_half_width: 2.5,
            depth_min: -2.0,
            depth_max: 3.5,
            y_min: -0.5,
            y_max: 2.0,
        }
    }
}

/// Size of the render surface in pixels
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height, 1.0 for a degenerate viewport
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 && self.width.is_finite() && self.height.is_finite() {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Projection of the active camera
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CameraProjection {
    /// Perspective camera looking at the origin from `distance` along Z
    Perspective { fov_y_degrees: f32, distance: f32 },
    Orthographic,
}

impl Default for CameraProjection {
    fn default() -> Self {
        Self::Perspective {
            fov_y_degrees: 40.0,
            distance: 3.5,
        }
    }
}

/// World-space region bodies are kept inside
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl ViewportBounds {
    pub fn min(&self) -> Vec3 {
        Vec3::new(self.min_x, self.min_y, self.min_z)
    }

    pub fn max(&self) -> Vec3 {
        Vec3::new(self.max_x, self.max_y, self.max_z)
    }

    /// Check if a point lies inside on the given axes (inclusive)
    pub fn contains(&self, point: Vec3, axes: BoundaryAxes) -> bool {
        let inside = |value: f32, min: f32, max: f32| value >= min && value <= max;
        (!axes.contains(BoundaryAxes::X) || inside(point.x, self.min_x, self.max_x))
            && (!axes.contains(BoundaryAxes::Y) || inside(point.y, self.min_y, self.max_y))
            && (!axes.contains(BoundaryAxes::Z) || inside(point.z, self.min_z, self.max_z))
    }
}

/// Result of `ViewportBoundary::check_boundary`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundaryState {
    pub is_out_of_bounds: bool,
    /// Restoring pseudo-force, zero on axes that are inside
    pub boundary_force: Vec3,
}

/// Debug overlay data for the safe region
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundaryVisualization {
    pub bounds: ViewportBounds,
    /// Center on the floor plane (y = 0)
    pub center: Vec3,
    /// Extent as a thin slab
    pub size: Vec3,
}

/// Ordered range, collapsing inverted input to its midpoint
fn ordered(min: f32, max: f32) -> (f32, f32) {
    if min <= max {
        (min, max)
    } else {
        let mid = (min + max) * 0.5;
        (mid, mid)
    }
}

/// Maps the viewport and camera onto a world-space safe region
#[derive(Clone, Debug, Default)]
pub struct ViewportBoundary {
    pub config: BoundaryConfig,
    viewport: Viewport,
    camera: CameraProjection,
}

impl ViewportBoundary {
    pub fn new(config: BoundaryConfig) -> Self {
        Self {
            config,
            viewport: Viewport::default(),
            camera: CameraProjection::default(),
        }
    }

    /// Set the viewport and camera at construction
    pub fn with_viewport(mut self, viewport: Viewport, camera: CameraProjection) -> Self {
        self.set_viewport(viewport, camera);
        self
    }

    /// Refresh the viewport and camera, called whenever either changes
    pub fn set_viewport(&mut self, viewport: Viewport, camera: CameraProjection) {
        self.viewport = viewport;
        self.camera = camera;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn camera(&self) -> CameraProjection {
        self.camera
    }

    /// Safe region for the current viewport and camera
    pub fn bounds(&self) -> ViewportBounds {
        let margin = self.config.margin;
        let half_width = match self.camera {
            CameraProjection::Perspective {
                fov_y_degrees,
                distance,
            } => {
                let visible_height = 2.0 * (fov_y_degrees.to_radians() / 2.0).tan() * distance.abs();
                visible_height * self.viewport.aspect() / 2.0
            }
            CameraProjection::Orthographic => self.config.ortho_half_width,
        };

        let (min_x, max_x) = ordered(-half_width + margin, half_width - margin);
        let (min_y, max_y) = ordered(self.config.y_min, self.config.y_max);
        let (min_z, max_z) = ordered(self.config.depth_min + margin, self.config.depth_max - margin);

        ViewportBounds {
            min_x,
            max_x,
            min_y,
            max_y,
            min_z,
            max_z,
        }
    }

    /// Check a position against the enabled axes
    pub fn check_boundary(&self, position: Vec3) -> BoundaryState {
        let bounds = self.bounds();
        let stiffness = self.config.stiffness;
        let mut state = BoundaryState::default();

        let mut restore = |value: f32, min: f32, max: f32| -> f32 {
            if value < min {
                state.is_out_of_bounds = true;
                (min - value) * stiffness
            } else if value > max {
                state.is_out_of_bounds = true;
                (max - value) * stiffness
            } else {
                0.0
            }
        };

        let axes = self.config.axes;
        let mut force = Vec3::ZERO;
        if axes.contains(BoundaryAxes::X) {
            force.x = restore(position.x, bounds.min_x, bounds.max_x);
        }
        if axes.contains(BoundaryAxes::Y) {
            force.y = restore(position.y, bounds.min_y, bounds.max_y);
        }
        if axes.contains(BoundaryAxes::Z) {
            force.z = restore(position.z, bounds.min_z, bounds.max_z);
        }

        state.boundary_force = force;
        state
    }

    /// Hard-clamp a position into the region on the enabled axes
    pub fn constrain_position(&self, position: Vec3) -> Vec3 {
        let bounds = self.bounds();
        let axes = self.config.axes;
        let mut constrained = position;

        if axes.contains(BoundaryAxes::X) {
            constrained.x = position.x.max(bounds.min_x).min(bounds.max_x);
        }
        if axes.contains(BoundaryAxes::Y) {
            constrained.y = position.y.max(bounds.min_y).min(bounds.max_y);
        }
        if axes.contains(BoundaryAxes::Z) {
            constrained.z = position.z.max(bounds.min_z).min(bounds.max_z);
        }
        constrained
    }

    /// Fold the restoring force into a velocity and damp it
    ///
    /// Returns `velocity` unchanged when inside or when bouncing is off.
    pub fn apply_boundary_force(&self, state: &BoundaryState, velocity: Vec3, dt: f32) -> Vec3 {
        if !self.config.bounce_effect || !state.is_out_of_bounds {
            return velocity;
        }
        (velocity + state.boundary_force * (dt * self.config.bounce_gain)) * self.config.damping
    }

    pub fn visualization(&self) -> BoundaryVisualization {
        let bounds = self.bounds();
        BoundaryVisualization {
            bounds,
            center: Vec3::new(
                (bounds.min_x + bounds.max_x) / 2.0,
                0.0,
                (bounds.min_z + bounds.max_z) / 2.0,
            ),
            size: Vec3::new(bounds.max_x - bounds.min_x, 0.1, bounds.max_z - bounds.min_z),
        }
    }
}
