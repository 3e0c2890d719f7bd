//! Headless run loop
//!
//! Drives `BallEngine` directly, one `step` per frame, with no Bevy app.

use bevy::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Write;

use crate::ball::BallEngine;
use crate::skills::{Skill, SkillDatabase};
use crate::snapshot::EngineSnapshot;
use crate::tuning::PhysicsTuning;

use super::config::SimConfig;
use super::metrics::{RunMetrics, SimSummary};
use super::parallel::{init_parallel, run_batch_parallel};

/// Frame at which the scripted throw grabs body 0
pub const THROW_GRAB_FRAME: u32 = 30;
/// Frames the pointer sweeps before releasing
pub const THROW_SWEEP_FRAMES: u32 = 10;
/// Pointer movement per sweep frame
const THROW_SWEEP_STEP: Vec2 = Vec2::new(18.0, -12.0);
/// Seconds per frame for pointer timestamps
const FRAME_SECS: f64 = 1.0 / 60.0;

/// Run one seeded engine to completion. Returns the metrics and the final
/// engine.
pub fn run_once(
    config: &SimConfig,
    seed: u64,
    skills: &[Skill],
    tuning: &PhysicsTuning,
) -> (RunMetrics, BallEngine) {
    let container = Vec2::new(config.width, config.height);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut engine = BallEngine::seeded(tuning.clone(), skills, container, &mut rng);
    let mut metrics = RunMetrics::new(seed, &engine);

    for frame in 0..config.frames {
        if config.throw {
            metrics.thrown |= drive_throw(&mut engine, frame);
        }
        engine.step(container);
        metrics.record_frame(frame, &engine, config.settle_threshold);
    }

    (metrics, engine)
}

/// Scripted pointer: grab body 0, sweep up and to the right, release
fn drive_throw(engine: &mut BallEngine, frame: u32) -> bool {
    let now = frame as f64 * FRAME_SECS;
    let release_frame = THROW_GRAB_FRAME + THROW_SWEEP_FRAMES;

    if frame == THROW_GRAB_FRAME {
        let Some(position) = engine.bodies().first().map(|b| b.position) else {
            return false;
        };
        let id = engine.bodies()[0].id;
        engine.begin_drag(id, position, now);
    } else if frame > THROW_GRAB_FRAME && frame < release_frame {
        if let Some((pointer, _)) = engine.drag_anchor() {
            engine.update_drag(pointer + THROW_SWEEP_STEP, now);
        }
    } else if frame == release_frame {
        return engine.end_drag().is_some();
    }
    false
}

/// Run every configured seed (sequentially or on the rayon pool)
pub fn run_batch(config: &SimConfig, skills: &[Skill], tuning: &PhysicsTuning) -> Vec<RunMetrics> {
    let base_seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen_range(0..u64::MAX));
    let seeds: Vec<u64> = (0..config.mode.run_count())
        .map(|i| base_seed.wrapping_add(i as u64))
        .collect();

    if config.parallel > 0 {
        return run_batch_parallel(config, &seeds, skills, tuning);
    }

    let mut results = Vec::with_capacity(seeds.len());
    for (i, &seed) in seeds.iter().enumerate() {
        if !config.quiet {
            print!("\rRun {}/{}...", i + 1, seeds.len());
            std::io::stdout().flush().ok();
        }
        results.push(run_once(config, seed, skills, tuning).0);
    }
    if !config.quiet {
        println!("\rCompleted {} runs.", seeds.len());
    }
    results
}

/// Entry point for the `simulate` binary
pub fn run_simulation(config: SimConfig) -> Result<SimSummary, String> {
    let skill_db = SkillDatabase::load_or_create(&config.skills_file);
    let tuning = PhysicsTuning::load_or_default(&config.tuning_file);

    if config.parallel > 0 {
        init_parallel(config.parallel)?;
    }

    if !config.quiet {
        println!(
            "Running {} run(s): {} bodies, {:.0}x{:.0}, {} frames{}",
            config.mode.run_count(),
            skill_db.len(),
            config.width,
            config.height,
            config.frames,
            if config.throw { ", scripted throw" } else { "" }
        );
    }

    let results = run_batch(&config, &skill_db.skills, &tuning);

    if let Some(dir) = &config.final_state_dir
        && let Some(last) = results.last()
    {
        // Re-run the last seed to capture its final state
        let (_, engine) = run_once(&config, last.seed, &skill_db.skills, &tuning);
        let path = EngineSnapshot::capture(&engine, "final").write_to_dir(dir)?;
        if !config.quiet {
            println!("Final state written to {}", path);
        }
    }

    let summary = SimSummary::from_runs(results);
    output_summary(&summary, &config)?;
    Ok(summary)
}

fn output_summary(summary: &SimSummary, config: &SimConfig) -> Result<(), String> {
    let json = serde_json::to_string_pretty(summary)
        .map_err(|e| format!("Failed to serialize results: {}", e))?;

    if let Some(output_file) = &config.output_file {
        std::fs::write(output_file, &json)
            .map_err(|e| format!("Failed to write {}: {}", output_file, e))?;
        println!("Results written to {}", output_file);
    } else {
        println!("{}", json);
    }
    Ok(())
}
