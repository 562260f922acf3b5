//! Ambient conditions shared by every body in the world

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Wind blowing through the scene
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wind {
    /// Unit direction the wind blows toward
    pub direction: Vec3,
    /// Wind speed (m/s)
    pub speed: f32,
    /// Amplitude of the random gusts added per step
    pub turbulence: f32,
}

impl Default for Wind {
    fn default() -> Self {
        Self {
            direction: Vec3::X,
            speed: 0.0,
            turbulence: 0.1,
        }
    }
}

impl Wind {
    /// Steady wind velocity without turbulence
    pub fn velocity(&self) -> Vec3 {
        self.direction * self.speed
    }
}

/// Environment state
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    pub wind: Wind,
    /// Air temperature in °C
    pub temperature: f32,
    /// Relative humidity in percent
    pub humidity: f32,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            wind: Wind::default(),
            temperature: 20.0,
            humidity: 50.0,
        }
    }
}

impl Environment {
    /// Merge a partial update
    ///
    /// A direction that cannot be normalized is ignored; every other
    /// provided field replaces the current value.
    pub fn apply(&mut self, update: &EnvironmentUpdate) {
        if let Some(direction) = update.wind_direction {
            match direction.try_normalize() {
                Some(unit) => self.wind.direction = unit,
                None => log::debug!("Ignoring degenerate wind direction {}", direction),
            }
        }
        if let Some(speed) = update.wind_speed {
            self.wind.speed = speed.max(0.0);
        }
        if let Some(turbulence) = update.turbulence {
            self.wind.turbulence = turbulence.max(0.0);
        }
        if let Some(temperature) = update.temperature {
            self.temperature = temperature;
        }
        if let Some(humidity) = update.humidity {
            self.humidity = humidity.clamp(0.0, 100.0);
        }
    }
}

/// Partial environment change; `None` fields are left untouched
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentUpdate {
    pub wind_direction: Option<Vec3>,
    pub wind_speed: Option<f32>,
    pub turbulence: Option<f32>,
    pub temperature: Option<f32>,
    pub humidity: Option<f32>,
}

impl EnvironmentUpdate {
    /// Update that sets a steady wind
    pub fn wind(direction: Vec3, speed: f32) -> Self {
        Self {
            wind_direction: Some(direction),
            wind_speed: Some(speed),
            ..Default::default()
        }
    }
}
