//! Simulated bodies and their size classes

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::skills::Skill;

/// Stable body identity, assigned at creation
pub type BodyId = u32;

/// Size category of a skill ball
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    #[default]
    Large,
    Medium,
    Small,
}

impl SizeClass {
    pub const ALL: [SizeClass; 3] = [SizeClass::Large, SizeClass::Medium, SizeClass::Small];

    pub fn name(&self) -> &'static str {
        match self {
            SizeClass::Large => "large",
            SizeClass::Medium => "medium",
            SizeClass::Small => "small",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "large" => Some(SizeClass::Large),
            "medium" => Some(SizeClass::Medium),
            "small" => Some(SizeClass::Small),
            _ => None,
        }
    }

    fn index(&self) -> usize {
        match self {
            SizeClass::Large => 0,
            SizeClass::Medium => 1,
            SizeClass::Small => 2,
        }
    }

    /// (radius, icon size) for this class on the given viewport
    pub fn dimensions(&self, viewport: ViewportClass) -> (f32, f32) {
        match viewport {
            ViewportClass::Desktop => DESKTOP_SIZES[self.index()],
            ViewportClass::Mobile => MOBILE_SIZES[self.index()],
        }
    }
}

/// Desktop vs. narrow/touch layout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewportClass {
    #[default]
    Desktop,
    Mobile,
}

impl ViewportClass {
    /// Classify a container/window width
    pub fn from_width(width: f32) -> Self {
        if width <= MOBILE_BREAKPOINT {
            ViewportClass::Mobile
        } else {
            ViewportClass::Desktop
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewportClass::Desktop => "desktop",
            ViewportClass::Mobile => "mobile",
        }
    }
}

/// One simulated circular body.
///
/// Position is container-local with the origin at the top-left and y growing
/// down, so the floor is at `y = height`. Velocity is in pixels per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: BodyId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub size: SizeClass,
    /// Display-only icon size for the current viewport
    pub icon_size: f32,
    pub is_dragging: bool,
    /// Display metadata, never read by physics
    pub skill: Skill,
}

impl Body {
    /// Create a body sized for `viewport` with zero velocity
    pub fn new(
        id: BodyId,
        skill: Skill,
        position: Vec2,
        viewport: ViewportClass,
        reference_radius: f32,
    ) -> Self {
        let size = skill.size;
        let mut body = Self {
            id,
            position,
            velocity: Vec2::ZERO,
            radius: 1.0,
            mass: 1.0,
            size,
            icon_size: 0.0,
            is_dragging: false,
            skill,
        };
        body.apply_viewport(viewport, reference_radius);
        body
    }

    /// Create a body with an explicit radius (scenarios and tests)
    pub fn with_radius(
        id: BodyId,
        skill: Skill,
        position: Vec2,
        velocity: Vec2,
        radius: f32,
        reference_radius: f32,
    ) -> Self {
        let radius = radius.max(f32::EPSILON);
        Self {
            id,
            position,
            velocity,
            radius,
            mass: mass_for_radius(radius, reference_radius),
            size: skill.size,
            icon_size: radius * 0.87,
            is_dragging: false,
            skill,
        }
    }

    /// Recompute radius, icon size and mass without touching position/velocity
    pub fn apply_viewport(&mut self, viewport: ViewportClass, reference_radius: f32) {
        let (radius, icon_size) = self.size.dimensions(viewport);
        self.radius = radius;
        self.icon_size = icon_size;
        self.mass = mass_for_radius(radius, reference_radius);
    }

    /// Whether a point lies on this body
    pub fn contains(&self, point: Vec2) -> bool {
        self.position.distance_squared(point) <= self.radius * self.radius
    }

    /// |vx| + |vy|
    pub fn speed_sum(&self) -> f32 {
        self.velocity.x.abs() + self.velocity.y.abs()
    }
}

/// Mass relative to a body of `reference_radius`
pub fn mass_for_radius(radius: f32, reference_radius: f32) -> f32 {
    let ratio = radius / reference_radius.max(f32::EPSILON);
    (ratio * ratio).max(f32::EPSILON)
}
