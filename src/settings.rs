//! Persistent settings for widget initialization
//!
//! Saves and loads user preferences (viewport size, seed, debug overlay)
//! to/from an init_settings.json file in the config directory.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::{DEFAULT_VIEWPORT_INDEX, VIEWPORT_PRESETS};

/// Path to the settings file
pub const SETTINGS_FILE: &str = "config/init_settings.json";

/// Persistent settings that survive between sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitSettings {
    /// Viewport preset index into VIEWPORT_PRESETS
    pub viewport_index: usize,
    /// Fixed RNG seed for the layout (None = fresh entropy each launch)
    pub seed: Option<u64>,
    /// Throw away and re-lay bodies when the viewport class flips.
    /// When false, bodies keep their motion and are only resized.
    pub reseed_on_viewport_change: bool,
    /// Debug overlay visible at startup
    pub debug_visible: bool,
}

impl Default for InitSettings {
    fn default() -> Self {
        Self {
            viewport_index: DEFAULT_VIEWPORT_INDEX,
            seed: None,
            reseed_on_viewport_change: true,
            debug_visible: false,
        }
    }
}

impl InitSettings {
    /// Load settings from file, or return defaults if file doesn't exist
    pub fn load() -> Self {
        Self::load_from(SETTINGS_FILE)
    }

    pub fn load_from(path: &str) -> Self {
        if !Path::new(path).exists() {
            info!("No {} found, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<InitSettings>(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {}", path);
                    settings.sanitized()
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}, using defaults", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Save settings to file
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(SETTINGS_FILE)
    }

    pub fn save_to(&self, path: &str) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        if let Some(parent) = Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, json)?;
        info!("Saved settings to {}", path);
        Ok(())
    }

    fn sanitized(mut self) -> Self {
        if self.viewport_index >= VIEWPORT_PRESETS.len() {
            warn!(
                "Viewport index {} out of range, using {}",
                self.viewport_index, DEFAULT_VIEWPORT_INDEX
            );
            self.viewport_index = DEFAULT_VIEWPORT_INDEX;
        }
        self
    }
}

/// Resource tracking the current init settings (for change detection)
#[derive(Resource)]
pub struct CurrentSettings {
    pub settings: InitSettings,
    pub dirty: bool,
}

impl Default for CurrentSettings {
    fn default() -> Self {
        Self {
            settings: InitSettings::load(),
            dirty: false,
        }
    }
}

impl CurrentSettings {
    /// Mark settings as changed (will be saved on next update)
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Save if dirty
    pub fn save_if_dirty(&mut self) {
        if self.dirty {
            if let Err(e) = self.settings.save() {
                warn!("Failed to save settings: {}", e);
            }
            self.dirty = false;
        }
    }
}

/// System to save settings when changed
pub fn save_settings_system(mut settings: ResMut<CurrentSettings>) {
    settings.save_if_dirty();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: InitSettings = serde_json::from_str(r#"{ "seed": 42 }"#).unwrap();
        assert_eq!(settings.seed, Some(42));
        assert_eq!(settings.viewport_index, DEFAULT_VIEWPORT_INDEX);
        assert!(settings.reseed_on_viewport_change);
    }

    #[test]
    fn test_out_of_range_viewport_is_reset() {
        let settings = InitSettings {
            viewport_index: 99,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.viewport_index, DEFAULT_VIEWPORT_INDEX);
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("skillballs_settings_{}", std::process::id()));
        let path = dir.join("init_settings.json");
        let path = path.to_string_lossy().to_string();

        let settings = InitSettings {
            viewport_index: 3,
            seed: Some(7),
            reseed_on_viewport_change: false,
            debug_visible: true,
        };
        settings.save_to(&path).unwrap();
        assert_eq!(InitSettings::load_from(&path), settings);

        let _ = fs::remove_dir_all(dir);
    }
}
