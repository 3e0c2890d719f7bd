//! TOML scenario file parsing

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Complete scenario definition from TOML file
#[derive(Debug, Deserialize)]
pub struct TestDefinition {
    pub name: String,
    pub description: Option<String>,
    pub setup: TestSetup,
    #[serde(default)]
    pub input: Vec<FrameInput>,
    pub expect: TestExpectations,
}

/// Container, tuning overrides, and the starting bodies
#[derive(Debug, Deserialize)]
pub struct TestSetup {
    pub width: f32,
    pub height: f32,
    /// Seed for the roster layout
    pub seed: Option<u64>,
    /// Lay out the default skill roster (labelled b0, b1, ...)
    #[serde(default)]
    pub roster: bool,
    #[serde(default)]
    pub tuning: Option<toml::Table>,
    #[serde(default)]
    pub bodies: Vec<BodyDef>,
}

/// Explicit body for a scenario
#[derive(Debug, Clone, Deserialize)]
pub struct BodyDef {
    /// Label used in checks and inputs
    pub id: String,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub vx: f32,
    #[serde(default)]
    pub vy: f32,
    /// Explicit radius; otherwise the size class decides
    pub radius: Option<f32>,
    #[serde(default = "default_size")]
    pub size: String,
}

fn default_size() -> String {
    "large".to_string()
}

/// Pointer or viewport action applied before the given frame is stepped
#[derive(Debug, Clone, Deserialize)]
pub struct FrameInput {
    pub frame: u64,
    /// Pointer timestamp in seconds (default frame / 60)
    pub time: Option<f64>,
    #[serde(flatten)]
    pub action: InputAction,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum InputAction {
    /// Begin a drag on a body; the pointer defaults to its center
    Grab {
        body: String,
        x: Option<f32>,
        y: Option<f32>,
    },
    /// Move the pointer
    Move { x: f32, y: f32 },
    /// End the drag
    Release,
    /// Switch every body to a viewport class ("desktop" / "mobile")
    Resize { viewport: String },
    /// Change the container size from this frame on
    Container { width: f32, height: f32 },
}

/// Expected outcomes
#[derive(Debug, Default, Deserialize)]
pub struct TestExpectations {
    /// Multiple state assertions at different frames (uses [[expect.state]] TOML syntax)
    #[serde(default)]
    pub state: Vec<StateAssertion>,
}

/// State assertion after simulation
#[derive(Debug, Clone, Deserialize)]
pub struct StateAssertion {
    /// Number of frames stepped before the checks run
    pub after_frame: u64,
    #[serde(default)]
    pub checks: Vec<String>,
}

impl FrameInput {
    pub fn timestamp(&self) -> f64 {
        self.time.unwrap_or(self.frame as f64 / 60.0)
    }
}

/// Parse a test file from path
pub fn parse_test_file(path: &Path) -> Result<TestDefinition, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
}
