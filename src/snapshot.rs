//! Snapshot system - captures engine state to JSON
//!
//! F4 in the host writes the current bodies (plus an optional screenshot) to
//! `snapshots/`. The headless simulator reuses `EngineSnapshot` for
//! `--final-state`.

use bevy::prelude::*;
use bevy::render::view::screenshot::{Screenshot, save_to_disk};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::ball::{BallEngine, Body};

/// Directory where snapshots are saved
pub const SNAPSHOT_DIR: &str = "snapshots";

/// Configuration for manual snapshots
#[derive(Resource)]
pub struct SnapshotConfig {
    /// Also save a screenshot with each snapshot
    pub save_screenshots: bool,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            save_screenshots: true,
        }
    }
}

/// Serializable snapshot of the whole engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Timestamp when snapshot was taken
    pub timestamp: String,
    /// Frames stepped since the last reseed
    pub frame: u64,
    /// What triggered this snapshot
    pub trigger: String,
    pub container: (f32, f32),
    pub viewport: String,
    /// Body currently owned by the pointer
    pub dragged: Option<u32>,
    pub kinetic_sum: f32,
    pub bodies: Vec<BodySnapshot>,
    /// Path to screenshot (if saved)
    pub screenshot_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub id: u32,
    pub skill: String,
    pub size: String,
    pub position: (f32, f32),
    pub velocity: (f32, f32),
    pub radius: f32,
    pub mass: f32,
    pub is_dragging: bool,
}

impl From<&Body> for BodySnapshot {
    fn from(body: &Body) -> Self {
        Self {
            id: body.id,
            skill: body.skill.name.clone(),
            size: body.size.name().to_string(),
            position: (body.position.x, body.position.y),
            velocity: (body.velocity.x, body.velocity.y),
            radius: body.radius,
            mass: body.mass,
            is_dragging: body.is_dragging,
        }
    }
}

impl EngineSnapshot {
    /// Capture the engine's current state
    pub fn capture(engine: &BallEngine, trigger: &str) -> Self {
        let container = engine.container();
        Self {
            timestamp: Local::now().format("%Y%m%d_%H%M%S_%3f").to_string(),
            frame: engine.frame(),
            trigger: trigger.to_string(),
            container: (container.x, container.y),
            viewport: engine.viewport().name().to_string(),
            dragged: engine.dragged(),
            kinetic_sum: engine.kinetic_sum(),
            bodies: engine.bodies().iter().map(BodySnapshot::from).collect(),
            screenshot_path: None,
        }
    }

    /// Base file name (no extension) for this snapshot
    pub fn file_stem(&self) -> String {
        format!("{}_{}", self.timestamp, self.trigger)
    }

    /// Write as pretty JSON into `dir`, returning the file path
    pub fn write_to_dir(&self, dir: &str) -> Result<String, String> {
        fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create snapshot directory {}: {}", dir, e))?;
        let path = Path::new(dir).join(format!("{}.json", self.file_stem()));
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize snapshot: {}", e))?;
        fs::write(&path, json)
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
        Ok(path.to_string_lossy().to_string())
    }
}

/// F4 - save engine state (and a screenshot) to the snapshot directory
pub fn manual_snapshot(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    config: Res<SnapshotConfig>,
    engine: Res<BallEngine>,
) {
    if !keyboard.just_pressed(KeyCode::F4) {
        return;
    }

    let mut snapshot = EngineSnapshot::capture(&engine, "manual");

    let screenshot_filename = format!("{}.png", snapshot.file_stem());
    if config.save_screenshots {
        snapshot.screenshot_path = Some(format!("{}/{}", SNAPSHOT_DIR, screenshot_filename));
    }

    match snapshot.write_to_dir(SNAPSHOT_DIR) {
        Ok(path) => info!("Manual snapshot saved: {}", path),
        Err(e) => {
            error!("{}", e);
            return;
        }
    }

    if config.save_screenshots {
        let path = PathBuf::from(format!("{}/{}", SNAPSHOT_DIR, screenshot_filename));
        commands
            .spawn(Screenshot::primary_window())
            .observe(save_to_disk(path));
        info!("Screenshot queued: {}", screenshot_filename);
    }
}
