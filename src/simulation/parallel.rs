//! Parallel simulation execution
//!
//! Uses Rayon to run many seeded engines concurrently. Each run owns its
//! engine; only the roster and tuning are shared read-only.

use rayon::prelude::*;

use crate::skills::Skill;
use crate::tuning::PhysicsTuning;

use super::config::SimConfig;
use super::metrics::RunMetrics;
use super::runner::run_once;

/// Initialize the global Rayon pool with the given thread count.
/// Call this once at startup before running parallel simulations.
pub fn init_parallel(threads: usize) -> Result<(), String> {
    if threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| format!("Failed to initialize Rayon thread pool: {}", e))?;
    }
    // If threads == 0, use Rayon's default (auto-detect)
    Ok(())
}

/// Run one engine per seed in parallel. Results keep the seed order.
pub fn run_batch_parallel(
    config: &SimConfig,
    seeds: &[u64],
    skills: &[Skill],
    tuning: &PhysicsTuning,
) -> Vec<RunMetrics> {
    seeds
        .par_iter()
        .map(|&seed| run_once(config, seed, skills, tuning).0)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::SkillDatabase;

    #[test]
    fn test_parallel_matches_sequential() {
        let skills = SkillDatabase::default_skills().skills;
        let tuning = PhysicsTuning::default();
        let config = SimConfig {
            frames: 120,
            quiet: true,
            ..Default::default()
        };
        let seeds = [1, 2, 3, 4];

        let parallel = run_batch_parallel(&config, &seeds, &skills, &tuning);
        for (result, &seed) in parallel.iter().zip(&seeds) {
            let (sequential, _) = run_once(&config, seed, &skills, &tuning);
            assert_eq!(result.seed, seed);
            assert_eq!(result.final_kinetic_sum, sequential.final_kinetic_sum);
        }
    }
}
