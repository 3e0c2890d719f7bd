//! Scenario testing system for deterministic engine testing
//!
//! Runs scripted pointer inputs against a headless engine and checks body
//! state at chosen frames.

pub mod assertions;
pub mod parser;
pub mod runner;

use std::fs;
use std::path::{Path, PathBuf};

pub use assertions::{AssertionError, WorldState, check_state};
pub use parser::{
    BodyDef, FrameInput, InputAction, StateAssertion, TestDefinition, TestExpectations, TestSetup,
    parse_test_file,
};
pub use runner::{TestResult, run_test};

/// Default path for test scenarios
pub const SCENARIOS_DIR: &str = "tests/scenarios";

/// Find every `.toml` scenario under `base`, sorted by path. `filter` keeps
/// only paths (relative to `base`) containing that substring.
pub fn discover_scenarios(base: &Path, filter: Option<&str>) -> Vec<PathBuf> {
    let mut found = Vec::new();
    discover_recursive(base, base, filter, &mut found);
    found.sort();
    found
}

fn discover_recursive(base: &Path, current: &Path, filter: Option<&str>, found: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(current) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            discover_recursive(base, &path, filter, found);
        } else if path.extension().is_some_and(|e| e == "toml") {
            if let Some(f) = filter {
                let rel = path.strip_prefix(base).unwrap_or(&path).to_string_lossy();
                if !rel.contains(f) {
                    continue;
                }
            }
            found.push(path);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_scenarios_pass() {
        let scenarios = discover_scenarios(Path::new(SCENARIOS_DIR), None);
        assert!(!scenarios.is_empty(), "no scenarios under {}", SCENARIOS_DIR);

        for path in scenarios {
            let def = parse_test_file(&path).unwrap();
            match run_test(&def) {
                TestResult::Pass { .. } => {}
                other => panic!("{}: {:?}", path.display(), other),
            }
        }
    }

    #[test]
    fn test_discover_filter() {
        let drag = discover_scenarios(Path::new(SCENARIOS_DIR), Some("drag/"));
        assert!(!drag.is_empty());
        assert!(drag.iter().all(|p| p.to_string_lossy().contains("drag")));
    }
}
