//! Skill Ball Simulator - headless engine runs for stability checks
//!
//! Usage:
//!   cargo run --bin simulate -- --help
//!   cargo run --bin simulate -- --runs 20 --seed 1
//!   cargo run --bin simulate -- --runs 50 --width 420 --height 860 --throw --parallel 8

use skillballs::simulation::{SimConfig, run_simulation};

fn main() {
    let config = SimConfig::from_args();
    match run_simulation(config) {
        Ok(summary) if summary.is_healthy() => {}
        Ok(summary) => {
            eprintln!(
                "Unhealthy runs: {} containment violations, non-finite: {}",
                summary.total_containment_violations, summary.any_non_finite
            );
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}
