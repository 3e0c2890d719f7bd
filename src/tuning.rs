//! Physics tuning values (decoupled from UI)

use bevy::log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::*;

fn default_gravity() -> f32 {
    GRAVITY
}
fn default_friction() -> f32 {
    FRICTION
}
fn default_wall_bounce() -> f32 {
    WALL_BOUNCE
}
fn default_floor_friction() -> f32 {
    FLOOR_FRICTION
}
fn default_rest_threshold() -> f32 {
    REST_THRESHOLD
}
fn default_ball_bounce() -> f32 {
    BALL_BOUNCE
}
fn default_separation_share() -> f32 {
    SEPARATION_SHARE
}
fn default_collision_epsilon_sq() -> f32 {
    COLLISION_EPSILON_SQ
}
fn default_drag_gain() -> f32 {
    DRAG_GAIN
}
fn default_throw_samples() -> usize {
    THROW_SAMPLES
}
fn default_reference_radius() -> f32 {
    REFERENCE_RADIUS
}

/// Path to physics tuning config
pub const PHYSICS_TUNING_FILE: &str = "config/physics_tuning.json";

/// Every constant the ball engine uses. Missing fields in the file fall back
/// to the defaults in `constants.rs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsTuning {
    #[serde(default = "default_gravity")]
    pub gravity: f32,
    #[serde(default = "default_friction")]
    pub friction: f32,
    #[serde(default = "default_wall_bounce")]
    pub wall_bounce: f32,
    #[serde(default = "default_floor_friction")]
    pub floor_friction: f32,
    #[serde(default = "default_rest_threshold")]
    pub rest_threshold: f32,
    #[serde(default = "default_ball_bounce")]
    pub ball_bounce: f32,
    #[serde(default = "default_separation_share")]
    pub separation_share: f32,
    #[serde(default = "default_collision_epsilon_sq")]
    pub collision_epsilon_sq: f32,
    #[serde(default = "default_drag_gain")]
    pub drag_gain: f32,
    /// Number of trailing pointer deltas averaged into a throw (1 = last only)
    #[serde(default = "default_throw_samples")]
    pub throw_samples: usize,
    #[serde(default = "default_reference_radius")]
    pub reference_radius: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: default_gravity(),
            friction: default_friction(),
            wall_bounce: default_wall_bounce(),
            floor_friction: default_floor_friction(),
            rest_threshold: default_rest_threshold(),
            ball_bounce: default_ball_bounce(),
            separation_share: default_separation_share(),
            collision_epsilon_sq: default_collision_epsilon_sq(),
            drag_gain: default_drag_gain(),
            throw_samples: default_throw_samples(),
            reference_radius: default_reference_radius(),
        }
    }
}

impl PhysicsTuning {
    /// Labels for the values exposed in the tweak panel (index order)
    pub const LABELS: [&'static str; 8] = [
        "Gravity",
        "Friction",
        "Wall Bounce",
        "Floor Friction",
        "Rest Threshold",
        "Ball Bounce",
        "Drag Gain",
        "Throw Samples",
    ];

    /// Load tuning from a JSON file
    pub fn from_file(path: &str) -> Result<Self, String> {
        let contents =
            fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
        let tuning: Self = serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse {}: {}", path, e))?;
        Ok(tuning.sanitized())
    }

    /// Load tuning from file, or return defaults if the file is missing or bad
    pub fn load_or_default(path: &str) -> Self {
        if !Path::new(path).exists() {
            info!("No {} found, using default physics tuning", path);
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(tuning) => {
                info!("Loaded physics tuning from {}", path);
                tuning
            }
            Err(e) => {
                warn!("{}, using default physics tuning", e);
                Self::default()
            }
        }
    }

    /// Save tuning as pretty JSON
    pub fn save(&self, path: &str) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json)?;
        info!("Saved physics tuning to {}", path);
        Ok(())
    }

    /// Clamp values into ranges that keep the simulation stable.
    /// Damping factors stay strictly below 1 and radii stay positive.
    pub fn sanitized(mut self) -> Self {
        self.gravity = finite_or(self.gravity, GRAVITY).max(0.0);
        self.friction = finite_or(self.friction, FRICTION).clamp(0.0, 0.999);
        self.wall_bounce = finite_or(self.wall_bounce, WALL_BOUNCE).clamp(0.0, 0.999);
        self.floor_friction = finite_or(self.floor_friction, FLOOR_FRICTION).clamp(0.0, 1.0);
        self.rest_threshold = finite_or(self.rest_threshold, REST_THRESHOLD).max(0.0);
        self.ball_bounce = finite_or(self.ball_bounce, BALL_BOUNCE).clamp(0.0, 1.0);
        self.separation_share = finite_or(self.separation_share, SEPARATION_SHARE).clamp(0.0, 1.0);
        self.collision_epsilon_sq =
            finite_or(self.collision_epsilon_sq, COLLISION_EPSILON_SQ).max(f32::EPSILON);
        self.drag_gain = finite_or(self.drag_gain, DRAG_GAIN).max(0.0);
        self.throw_samples = self.throw_samples.clamp(1, MAX_THROW_SAMPLES);
        self.reference_radius = finite_or(self.reference_radius, REFERENCE_RADIUS).max(1.0);
        self
    }

    pub fn get_value(&self, index: usize) -> f32 {
        match index {
            0 => self.gravity,
            1 => self.friction,
            2 => self.wall_bounce,
            3 => self.floor_friction,
            4 => self.rest_threshold,
            5 => self.ball_bounce,
            6 => self.drag_gain,
            7 => self.throw_samples as f32,
            _ => 0.0,
        }
    }

    pub fn get_default_value(index: usize) -> f32 {
        Self::default().get_value(index)
    }

    /// Set a value by panel index; the result is re-sanitized
    pub fn set_value(&mut self, index: usize, value: f32) {
        match index {
            0 => self.gravity = value,
            1 => self.friction = value,
            2 => self.wall_bounce = value,
            3 => self.floor_friction = value,
            4 => self.rest_threshold = value,
            5 => self.ball_bounce = value,
            6 => self.drag_gain = value,
            7 => self.throw_samples = value.round().max(1.0) as usize,
            _ => {}
        }
        *self = self.clone().sanitized();
    }

    pub fn is_modified(&self, index: usize) -> bool {
        (self.get_value(index) - Self::get_default_value(index)).abs() > 0.0001
    }

    pub fn reset_value(&mut self, index: usize) {
        self.set_value(index, Self::get_default_value(index));
    }

    pub fn reset_all(&mut self) {
        *self = Self::default();
    }

    /// Step size for panel adjustment
    pub fn get_step(index: usize) -> f32 {
        match index {
            // Damping factors near 1 need fine steps
            1 | 3 => 0.005,
            7 => 1.0,
            _ => (Self::get_default_value(index) * 0.1).max(0.01),
        }
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}
