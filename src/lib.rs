//! Skillballs - draggable skill bubbles with simple 2D ball physics, built with Bevy
//!
//! The physics core (`ball::BallEngine`) is plain data and runs without an
//! `App`, so the simulator and the scenario runner drive it directly. The
//! windowed host wires it to rendering, pointer input and debug tooling.

// Core modules
pub mod config_watcher;
pub mod constants;
pub mod settings;
pub mod simulation;
pub mod snapshot;
pub mod testing;
pub mod tuning;

// Engine and host modules
pub mod ball;
pub mod input;
pub mod skills;
pub mod ui;
pub mod world;

// Re-export commonly used types for convenience
pub use ball::{
    BallEngine, Body, BodyId, RenderedGeneration, SizeClass, SkillBall, SkillLabel, ViewportClass,
    WallContact, seed_bodies,
};
pub use config_watcher::ConfigWatcher;
pub use constants::*;
pub use input::{PointerSource, PointerState};
pub use settings::{CurrentSettings, InitSettings, save_settings_system};
pub use skills::{Skill, SkillDatabase};
pub use snapshot::{BodySnapshot, EngineSnapshot, SnapshotConfig};
pub use tuning::{PHYSICS_TUNING_FILE, PhysicsTuning};
pub use ui::{DebugSettings, DebugText, HoverTooltip, TuningPanel, TweakPanel, TweakRow, ViewportScale};
pub use world::{Container, SeedRng};
