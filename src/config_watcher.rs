//! Config file auto-reload system
//!
//! Polls the tuning and skills files every couple of seconds and reloads
//! them when modified.

use bevy::prelude::*;
use std::fs;
use std::time::SystemTime;

use crate::ball::BallEngine;
use crate::constants::SKILLS_FILE;
use crate::skills::SkillDatabase;
use crate::tuning::{PHYSICS_TUNING_FILE, PhysicsTuning};
use crate::world::{Container, SeedRng};

/// How often to check for config changes (seconds)
const CHECK_INTERVAL: f32 = 2.0;

/// Tracks modification times of config files for hot-reload
#[derive(Resource)]
pub struct ConfigWatcher {
    /// Time since last check
    pub timer: f32,
    /// Last known modification times
    pub tuning_mtime: Option<SystemTime>,
    pub skills_mtime: Option<SystemTime>,
}

impl Default for ConfigWatcher {
    fn default() -> Self {
        Self {
            timer: 0.0,
            tuning_mtime: get_mtime(PHYSICS_TUNING_FILE),
            skills_mtime: get_mtime(SKILLS_FILE),
        }
    }
}

/// Get file modification time, or None if file doesn't exist
fn get_mtime(path: &str) -> Option<SystemTime> {
    fs::metadata(path).ok().and_then(|m| m.modified().ok())
}

/// Check for config file changes and reload as needed.
///
/// Tuning changes apply to the running bodies in place; a skills change
/// replaces the roster and reseeds.
pub fn check_config_changes(
    time: Res<Time>,
    mut watcher: ResMut<ConfigWatcher>,
    mut engine: ResMut<BallEngine>,
    mut skill_db: ResMut<SkillDatabase>,
    mut rng: ResMut<SeedRng>,
    container: Res<Container>,
) {
    watcher.timer += time.delta_secs();

    if watcher.timer < CHECK_INTERVAL {
        return;
    }
    watcher.timer = 0.0;

    let new_tuning_mtime = get_mtime(PHYSICS_TUNING_FILE);
    if new_tuning_mtime != watcher.tuning_mtime {
        watcher.tuning_mtime = new_tuning_mtime;
        match PhysicsTuning::from_file(PHYSICS_TUNING_FILE) {
            Ok(tuning) => {
                engine.set_tuning(tuning);
                info!("Auto-reloaded physics tuning from {}", PHYSICS_TUNING_FILE);
            }
            Err(e) => warn!("{}; keeping current tuning", e),
        }
    }

    let new_skills_mtime = get_mtime(SKILLS_FILE);
    if new_skills_mtime != watcher.skills_mtime {
        watcher.skills_mtime = new_skills_mtime;
        *skill_db = SkillDatabase::load_or_create(SKILLS_FILE);
        engine.reseed(&skill_db.skills, container.size, &mut rng.0);
        info!("Auto-reloaded skills from {}", SKILLS_FILE);
    }
}
