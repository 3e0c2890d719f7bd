//! Simulation configuration

use serde::{Deserialize, Serialize};

use crate::constants::SKILLS_FILE;
use crate::tuning::PHYSICS_TUNING_FILE;

/// Simulation mode
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum SimMode {
    /// Run one seeded engine
    #[default]
    Single,
    /// Run `count` engines with consecutive seeds
    MultiRun { count: u32 },
}

impl SimMode {
    pub fn run_count(&self) -> u32 {
        match self {
            SimMode::Single => 1,
            SimMode::MultiRun { count } => (*count).max(1),
        }
    }
}

/// Configuration for a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Simulation mode
    pub mode: SimMode,
    /// Frames to step per run
    pub frames: u32,
    /// Container width (viewport class follows from it)
    pub width: f32,
    /// Container height
    pub height: f32,
    /// Base RNG seed for reproducibility (None = random)
    pub seed: Option<u64>,
    /// Grab body 0 early in the run, sweep it, and throw it
    pub throw: bool,
    /// Kinetic sum below which a run counts as settled
    pub settle_threshold: f32,
    /// Skill roster file
    pub skills_file: String,
    /// Physics tuning file (missing = defaults)
    pub tuning_file: String,
    /// Output file path (None = stdout)
    pub output_file: Option<String>,
    /// Write the last run's final engine state as a snapshot to this directory
    pub final_state_dir: Option<String>,
    /// Suppress progress output
    pub quiet: bool,
    /// Number of parallel threads (0 = sequential, N = N threads)
    pub parallel: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            mode: SimMode::Single,
            frames: 900,
            width: 1400.0,
            height: 800.0,
            seed: None,
            throw: false,
            settle_threshold: 1.0,
            skills_file: SKILLS_FILE.to_string(),
            tuning_file: PHYSICS_TUNING_FILE.to_string(),
            output_file: None,
            final_state_dir: None,
            quiet: false,
            parallel: 0,
        }
    }
}

/// Local simulation settings (gitignored, user's custom settings)
pub const SIM_SETTINGS_FILE: &str = "config/simulation_settings.json";

impl SimConfig {
    /// Load configuration from a JSON settings file
    pub fn from_file(path: &str) -> Result<Self, String> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse {}: {}", path, e))
    }

    /// Load configuration from the default settings file, or built-in defaults
    pub fn from_config_files() -> Self {
        Self::from_file(SIM_SETTINGS_FILE).unwrap_or_default()
    }

    /// Parse configuration from command line arguments
    pub fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        if args.iter().any(|a| a == "--help" || a == "-h") {
            print_help();
            std::process::exit(0);
        }
        Self::parse_args(&args[1..])
    }

    /// Settings file (or `--settings <FILE>`) first, then flag overrides
    pub fn parse_args(args: &[String]) -> Self {
        let mut config = Self::from_config_files();

        if let Some(path) = args
            .iter()
            .position(|a| a == "--settings")
            .and_then(|i| args.get(i + 1))
        {
            match Self::from_file(path) {
                Ok(loaded) => config = loaded,
                Err(e) => eprintln!("Warning: {}", e),
            }
        }

        let mut i = 0;
        while i < args.len() {
            let value = args.get(i + 1);
            match args[i].as_str() {
                "--settings" => i += 1,
                "--runs" => {
                    if let Some(count) = value.and_then(|v| v.parse().ok()) {
                        config.mode = SimMode::MultiRun { count };
                        i += 1;
                    }
                }
                "--frames" => {
                    if let Some(v) = value {
                        config.frames = v.parse().unwrap_or(config.frames);
                        i += 1;
                    }
                }
                "--width" => {
                    if let Some(v) = value {
                        config.width = v.parse().unwrap_or(config.width);
                        i += 1;
                    }
                }
                "--height" => {
                    if let Some(v) = value {
                        config.height = v.parse().unwrap_or(config.height);
                        i += 1;
                    }
                }
                "--seed" => {
                    if let Some(v) = value {
                        config.seed = v.parse().ok();
                        i += 1;
                    }
                }
                "--settle-threshold" => {
                    if let Some(v) = value {
                        config.settle_threshold = v.parse().unwrap_or(config.settle_threshold);
                        i += 1;
                    }
                }
                "--skills" => {
                    if let Some(v) = value {
                        config.skills_file = v.clone();
                        i += 1;
                    }
                }
                "--tuning" => {
                    if let Some(v) = value {
                        config.tuning_file = v.clone();
                        i += 1;
                    }
                }
                "--output" => {
                    if let Some(v) = value {
                        config.output_file = Some(v.clone());
                        i += 1;
                    }
                }
                "--final-state" => {
                    if let Some(v) = value {
                        config.final_state_dir = Some(v.clone());
                        i += 1;
                    }
                }
                "--parallel" => {
                    if let Some(v) = value {
                        config.parallel = v.parse().unwrap_or(0);
                        i += 1;
                    }
                }
                "--throw" => config.throw = true,
                "--quiet" | "-q" => config.quiet = true,
                other => eprintln!("Warning: unknown argument '{}'", other),
            }
            i += 1;
        }

        config
    }
}

fn print_help() {
    println!(
        r#"Skill Ball Simulator - headless engine runs for stability checks

USAGE:
    cargo run --bin simulate -- [OPTIONS]

OPTIONS:
    --settings <FILE>          Load settings from JSON file (CLI args override file settings)
    --runs <N>                 Run N engines with consecutive seeds
    --frames <N>               Frames per run (default: 900)
    --width <PX>               Container width (default: 1400; <= 768 is mobile)
    --height <PX>              Container height (default: 800)
    --seed <N>                 Base RNG seed for reproducibility
    --throw                    Grab body 0 at frame 30, sweep it, and throw it
    --settle-threshold <SUM>   Kinetic sum that counts as settled (default: 1.0)
    --skills <FILE>            Skill roster (default: assets/skills.txt)
    --tuning <FILE>            Physics tuning JSON (default: config/physics_tuning.json)
    --output <FILE>            Output JSON to file (default: stdout)
    --final-state <DIR>        Write the last run's final state snapshot to DIR
    --parallel <N>             Run in parallel with N threads
    --quiet, -q                Suppress progress output
    --help, -h                 Show this help

EXAMPLES:
    # 50 mobile runs with a throw, 8 threads
    cargo run --bin simulate -- --runs 50 --width 420 --height 860 --throw --parallel 8

SETTINGS FILE FORMAT (JSON):
    {{
      "frames": 1200,
      "width": 1600.0,
      "height": 900.0,
      "parallel": 8
    }}
"#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_cli_overrides() {
        let config = SimConfig::parse_args(&args(&[
            "--runs", "12", "--frames", "300", "--width", "420", "--seed", "5", "--throw", "-q",
        ]));
        assert_eq!(config.mode, SimMode::MultiRun { count: 12 });
        assert_eq!(config.frames, 300);
        assert_eq!(config.width, 420.0);
        assert_eq!(config.seed, Some(5));
        assert!(config.throw);
        assert!(config.quiet);
    }

    #[test]
    fn test_partial_settings_json() {
        let config: SimConfig = serde_json::from_str(r#"{ "frames": 42, "parallel": 4 }"#).unwrap();
        assert_eq!(config.frames, 42);
        assert_eq!(config.parallel, 4);
        assert_eq!(config.mode, SimMode::Single);
        assert_eq!(config.width, 1400.0);
    }

    #[test]
    fn test_run_count() {
        assert_eq!(SimMode::Single.run_count(), 1);
        assert_eq!(SimMode::MultiRun { count: 0 }.run_count(), 1);
        assert_eq!(SimMode::MultiRun { count: 7 }.run_count(), 7);
    }
}
