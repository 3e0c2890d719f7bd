//! Scenario runner - drives a `BallEngine` frame by frame from a TOML scenario

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;

use super::assertions::{AssertionError, WorldState, check_state};
use super::parser::{BodyDef, InputAction, TestDefinition, TestSetup};
use crate::ball::{BallEngine, Body, BodyId, SizeClass, ViewportClass, is_contained};
use crate::skills::{Skill, SkillDatabase};
use crate::tuning::PhysicsTuning;

/// Scenario outcome. A pass reports the engine's final state.
#[derive(Debug)]
pub enum TestResult {
    Pass {
        frames: u64,
        kinetic: f32,
        all_contained: bool,
        dragged: Option<String>,
    },
    Fail { error: AssertionError },
    Error { message: String },
}

/// Run a single scenario
pub fn run_test(test: &TestDefinition) -> TestResult {
    let (mut engine, labels) = match build_engine(&test.setup) {
        Ok(built) => built,
        Err(message) => return TestResult::Error { message },
    };
    let mut container = Vec2::new(test.setup.width, test.setup.height);

    let max_frame = test
        .expect
        .state
        .iter()
        .map(|s| s.after_frame)
        .chain(test.input.iter().map(|i| i.frame + 1))
        .max()
        .unwrap_or(0);

    // Checks at frame 0 see the initial layout
    if let Err(error) = run_checks(test, 0, &engine, &labels) {
        return TestResult::Fail { error };
    }

    for frame in 0..max_frame {
        for input in test.input.iter().filter(|i| i.frame == frame) {
            let now = input.timestamp();
            match &input.action {
                InputAction::Grab { body, x, y } => {
                    let Some(&id) = labels.get(body) else {
                        return TestResult::Error {
                            message: format!("Input at frame {} grabs unknown body '{}'", frame, body),
                        };
                    };
                    let Some(center) = engine.body(id).map(|b| b.position) else {
                        continue;
                    };
                    let pointer = Vec2::new(x.unwrap_or(center.x), y.unwrap_or(center.y));
                    engine.begin_drag(id, pointer, now);
                }
                InputAction::Move { x, y } => engine.update_drag(Vec2::new(*x, *y), now),
                InputAction::Release => {
                    engine.end_drag();
                }
                InputAction::Resize { viewport } => match parse_viewport(viewport) {
                    Some(viewport) => engine.resize(viewport),
                    None => {
                        return TestResult::Error {
                            message: format!("Unknown viewport '{}'", viewport),
                        };
                    }
                },
                InputAction::Container { width, height } => {
                    container = Vec2::new(*width, *height);
                }
            }
        }

        engine.step(container);

        if let Err(error) = run_checks(test, frame + 1, &engine, &labels) {
            return TestResult::Fail { error };
        }
    }

    let container = engine.container();
    TestResult::Pass {
        frames: max_frame,
        kinetic: engine.kinetic_sum(),
        all_contained: engine.bodies().iter().all(|b| is_contained(b, container)),
        dragged: engine.dragged().map(|id| label_of(&labels, id)),
    }
}

fn label_of(labels: &HashMap<String, BodyId>, id: BodyId) -> String {
    labels
        .iter()
        .find(|(_, v)| **v == id)
        .map(|(k, _)| k.clone())
        .unwrap_or_else(|| id.to_string())
}

fn run_checks(
    test: &TestDefinition,
    frame: u64,
    engine: &BallEngine,
    labels: &HashMap<String, BodyId>,
) -> Result<(), AssertionError> {
    let state = WorldState { engine, labels };
    for assertion in test.expect.state.iter().filter(|s| s.after_frame == frame) {
        check_state(assertion, &state).map_err(|mut e| {
            e.message = format!("[after frame {}] {}", frame, e.message);
            e
        })?;
    }
    Ok(())
}

/// Build the engine and the label -> id map for a scenario
fn build_engine(setup: &TestSetup) -> Result<(BallEngine, HashMap<String, BodyId>), String> {
    let tuning = tuning_with_overrides(setup.tuning.as_ref())?;
    let container = Vec2::new(setup.width, setup.height);
    let viewport = ViewportClass::from_width(setup.width);
    let mut labels = HashMap::new();

    let mut engine = if setup.roster {
        let skills = SkillDatabase::default_skills().skills;
        let mut rng = StdRng::seed_from_u64(setup.seed.unwrap_or(0));
        let engine = BallEngine::seeded(tuning.clone(), &skills, container, &mut rng);
        for body in engine.bodies() {
            labels.insert(format!("b{}", body.id), body.id);
        }
        engine
    } else {
        BallEngine::new(tuning.clone(), container)
    };

    if !setup.bodies.is_empty() {
        let first_id = engine.bodies().len() as BodyId;
        let mut bodies = engine.bodies().to_vec();
        for (offset, def) in setup.bodies.iter().enumerate() {
            let id = first_id + offset as BodyId;
            if labels.insert(def.id.clone(), id).is_some() {
                return Err(format!("Duplicate body id '{}'", def.id));
            }
            bodies.push(body_from_def(def, id, viewport, &tuning)?);
        }
        engine = BallEngine::from_bodies(tuning, bodies, container);
    }

    Ok((engine, labels))
}

fn body_from_def(
    def: &BodyDef,
    id: BodyId,
    viewport: ViewportClass,
    tuning: &PhysicsTuning,
) -> Result<Body, String> {
    let size = SizeClass::from_name(&def.size)
        .ok_or_else(|| format!("Unknown size '{}' for body '{}'", def.size, def.id))?;
    let skill = Skill::new(&def.id, "#ffffff", "#333333", size);
    let position = Vec2::new(def.x, def.y);
    let velocity = Vec2::new(def.vx, def.vy);

    let body = match def.radius {
        Some(radius) => {
            Body::with_radius(id, skill, position, velocity, radius, tuning.reference_radius)
        }
        None => {
            let mut body = Body::new(id, skill, position, viewport, tuning.reference_radius);
            body.velocity = velocity;
            body
        }
    };
    Ok(body)
}

/// Apply `[setup.tuning]` keys on top of the defaults
fn tuning_with_overrides(overrides: Option<&toml::Table>) -> Result<PhysicsTuning, String> {
    let Some(table) = overrides else {
        return Ok(PhysicsTuning::default());
    };
    let tuning: PhysicsTuning = toml::Value::Table(table.clone())
        .try_into()
        .map_err(|e| format!("Invalid tuning overrides: {}", e))?;
    Ok(tuning.sanitized())
}

fn parse_viewport(name: &str) -> Option<ViewportClass> {
    match name.to_lowercase().as_str() {
        "desktop" => Some(ViewportClass::Desktop),
        "mobile" => Some(ViewportClass::Mobile),
        _ => None,
    }
}
