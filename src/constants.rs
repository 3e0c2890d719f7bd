//! Tunable constants for skillballs
//!
//! Physics defaults live here; `PhysicsTuning` copies them at startup so they
//! can be overridden from config without touching code.

use bevy::prelude::*;

// =============================================================================
// DEFAULT COLORS
// =============================================================================

pub const DEFAULT_BACKGROUND_COLOR: Color = Color::srgb(0.06, 0.06, 0.08);
pub const TEXT_PRIMARY: Color = Color::srgb(0.95, 0.95, 0.95);
pub const TEXT_SECONDARY: Color = Color::srgb(0.65, 0.65, 0.7);

// =============================================================================
// BALL PHYSICS (per simulated frame, not per second)
// =============================================================================

pub const GRAVITY: f32 = 0.4;
pub const FRICTION: f32 = 0.985; // Velocity retained per frame (air resistance)
pub const WALL_BOUNCE: f32 = 0.65; // Restitution against container walls
pub const FLOOR_FRICTION: f32 = 0.92; // Horizontal velocity retained per floor contact
pub const REST_THRESHOLD: f32 = 0.5; // |vy| below this on the floor snaps to zero
pub const BALL_BOUNCE: f32 = 0.75; // Restitution between balls
pub const SEPARATION_SHARE: f32 = 0.5; // Fraction of overlap removed per collision pass
pub const COLLISION_EPSILON_SQ: f32 = 0.01; // Coincident centers are skipped below this
pub const DRAG_GAIN: f32 = 0.3; // Pointer delta -> throw velocity
pub const THROW_SAMPLES: usize = 1; // Pointer deltas averaged into the throw
pub const MAX_THROW_SAMPLES: usize = 64; // Upper bound on the throw averaging window
pub const REFERENCE_RADIUS: f32 = 40.0; // Radius of a body with mass 1.0

// =============================================================================
// SIZING
// =============================================================================

/// Container widths at or below this are treated as narrow/touch
pub const MOBILE_BREAKPOINT: f32 = 768.0;

/// (radius, icon size) per size class on desktop: large, medium, small
pub const DESKTOP_SIZES: [(f32, f32); 3] = [(85.0, 74.0), (55.0, 46.0), (38.0, 30.0)];

/// (radius, icon size) per size class on mobile: large, medium, small
pub const MOBILE_SIZES: [(f32, f32); 3] = [(38.0, 30.0), (32.0, 26.0), (28.0, 22.0)];

// =============================================================================
// SEEDING LAYOUT
// =============================================================================

pub const SEED_COLUMNS_DESKTOP: usize = 4;
pub const SEED_COLUMNS_MOBILE: usize = 3;
pub const SEED_MARGIN_DESKTOP: f32 = 100.0; // Total horizontal margin (split both sides)
pub const SEED_MARGIN_MOBILE: f32 = 40.0;
pub const SEED_JITTER_DESKTOP: f32 = 40.0; // Full width of the horizontal jitter band
pub const SEED_JITTER_MOBILE: f32 = 20.0;
pub const SEED_DROP_HEIGHT: f32 = 50.0; // Gap above the top row
pub const SEED_DROP_SPREAD_DESKTOP: f32 = 100.0;
pub const SEED_DROP_SPREAD_MOBILE: f32 = 60.0;
pub const SEED_MAX_SPEED_X: f32 = 1.5;

// =============================================================================
// HOST
// =============================================================================

/// Physics frames per second in the windowed host
pub const PHYSICS_HZ: f64 = 60.0;

/// Z layers for drawing
pub const BALL_Z: f32 = 1.0;
pub const DRAGGED_BALL_Z: f32 = 100.0;
pub const TOOLTIP_Z: f32 = 200.0;

/// Label font size as a fraction of the icon size
pub const LABEL_SCALE: f32 = 0.28;

/// Viewport presets (width, height, label)
pub const VIEWPORT_PRESETS: &[(f32, f32, &str)] = &[
    (1280.0, 720.0, "1280x720 (desktop)"),
    (1600.0, 900.0, "1600x900 (desktop)"),
    (1920.0, 1080.0, "1920x1080 (1080p)"),
    (420.0, 860.0, "420x860 (phone)"),
    (768.0, 1024.0, "768x1024 (tablet portrait)"),
];

/// Default viewport preset index (1600x900)
pub const DEFAULT_VIEWPORT_INDEX: usize = 1;

/// Skill roster file
pub const SKILLS_FILE: &str = "assets/skills.txt";
