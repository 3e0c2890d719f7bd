//! Scenario runner CLI - replays scripted drags against a headless engine
//!
//! Usage:
//!   cargo run --bin test-scenarios              # Run all scenarios
//!   cargo run --bin test-scenarios -- drag/              # Run category
//!   cargo run --bin test-scenarios -- physics/head_on    # Run single scenario
//!   cargo run --bin test-scenarios -- --verbose # Show expected/actual and final engine state

use std::env;
use std::path::Path;

use skillballs::testing::{SCENARIOS_DIR, TestResult, discover_scenarios, parse_test_file, run_test};

/// Pass/fail counts plus how many passing runs ended with an escaped body
#[derive(Default)]
struct Tally {
    passed: usize,
    failed: usize,
    errors: usize,
    escaped: usize,
}

impl Tally {
    fn record(&mut self, result: &TestResult) {
        match result {
            TestResult::Pass { all_contained, .. } => {
                self.passed += 1;
                if !all_contained {
                    self.escaped += 1;
                }
            }
            TestResult::Fail { .. } => self.failed += 1,
            TestResult::Error { .. } => self.errors += 1,
        }
    }

    fn ok(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let verbose = args[1..].iter().any(|a| a == "--verbose" || a == "-v");
    let filter = args[1..].iter().find(|a| !a.starts_with('-')).cloned();

    let base = Path::new(SCENARIOS_DIR);
    let scenarios = discover_scenarios(base, filter.as_deref());
    if scenarios.is_empty() {
        match &filter {
            Some(f) => println!("No scenarios under {} match '{}'", SCENARIOS_DIR, f),
            None => println!("No scenarios under {}", SCENARIOS_DIR),
        }
        std::process::exit(1);
    }

    println!("Skill ball scenarios ({})", scenarios.len());
    println!("====================\n");

    let mut tally = Tally::default();
    let mut category = String::new();

    for path in &scenarios {
        let rel = path.strip_prefix(base).unwrap_or(path);

        let dir = rel.parent().map(|p| p.to_string_lossy().to_string()).unwrap_or_default();
        if dir != category {
            println!("{}/", dir);
            category = dir;
        }

        let name = rel
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let result = match parse_test_file(path) {
            Ok(def) => {
                if verbose && let Some(description) = &def.description {
                    println!("  # {}", description);
                }
                run_test(&def)
            }
            Err(message) => TestResult::Error { message },
        };

        tally.record(&result);
        print_result(&name, &result, verbose);
    }

    println!("\n====================");
    println!(
        "{} passed, {} failed, {} errors",
        tally.passed, tally.failed, tally.errors
    );
    if tally.escaped > 0 {
        println!("{} passing scenario(s) ended with a body outside the container", tally.escaped);
    }

    if !tally.ok() {
        std::process::exit(1);
    }
}

fn print_result(name: &str, result: &TestResult, verbose: bool) {
    let dots = ".".repeat(36 - name.len().min(35));

    match result {
        TestResult::Pass {
            frames,
            kinetic,
            all_contained,
            dragged,
        } => {
            println!("  {} {} PASS ({} frames)", name, dots, frames);
            if verbose {
                println!(
                    "    kinetic {:.2} | contained: {} | dragging: {}",
                    kinetic,
                    all_contained,
                    dragged.as_deref().unwrap_or("none")
                );
            }
        }
        TestResult::Fail { error } => {
            println!("  {} {} FAIL", name, dots);
            if verbose {
                println!("    {}", error);
            } else {
                println!("    {}", error.message);
            }
        }
        TestResult::Error { message } => {
            println!("  {} {} ERROR", name, dots);
            println!("    {}", message);
        }
    }
}
