//! Assertion checking for scenario expectations

use std::collections::HashMap;

use super::parser::StateAssertion;
use crate::ball::{BallEngine, BodyId, is_contained, max_overlap};

/// Error when an assertion fails
#[derive(Debug)]
pub struct AssertionError {
    pub message: String,
    pub expected: String,
    pub actual: String,
}

impl std::fmt::Display for AssertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n    Expected: {}\n    Actual: {}", self.message, self.expected, self.actual)
    }
}

/// Engine state plus the scenario's body labels
pub struct WorldState<'a> {
    pub engine: &'a BallEngine,
    pub labels: &'a HashMap<String, BodyId>,
}

impl WorldState<'_> {
    fn label_of(&self, id: BodyId) -> String {
        self.labels
            .iter()
            .find(|(_, v)| **v == id)
            .map(|(k, _)| k.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

/// Parse a check string into (path, operator, value)
fn parse_check(check: &str) -> Option<(&str, &str, &str)> {
    // Try operators in order of specificity (>= before >, etc.)
    for op in &[">=", "<=", "!=", "=", ">", "<"] {
        if let Some(idx) = check.find(op) {
            let path = check[..idx].trim();
            let value = check[idx + op.len()..].trim();
            return Some((path, *op, value));
        }
    }
    None
}

/// Check state assertions against the engine
pub fn check_state(assertion: &StateAssertion, state: &WorldState) -> Result<(), AssertionError> {
    let engine = state.engine;

    for check in &assertion.checks {
        let (path, operator, expected_value) = parse_check(check).ok_or_else(|| AssertionError {
            message: format!("Invalid check syntax: {}", check),
            expected: "format: 'body.property = value' or 'body.property > value'".to_string(),
            actual: check.clone(),
        })?;

        let path_parts: Vec<&str> = path.split('.').collect();

        match path_parts.as_slice() {
            ["kinetic"] => check_float_comparison(path, engine.kinetic_sum(), operator, expected_value)?,
            ["max_overlap"] => {
                check_float_comparison(path, max_overlap(engine.bodies()), operator, expected_value)?
            }
            ["frame"] => check_float_comparison(path, engine.frame() as f32, operator, expected_value)?,
            ["bodies"] => {
                check_float_comparison(path, engine.bodies().len() as f32, operator, expected_value)?
            }
            ["contacts"] => {
                check_float_comparison(path, engine.last_contacts() as f32, operator, expected_value)?
            }
            ["viewport"] => check_text(check, engine.viewport().name(), operator, expected_value)?,
            ["dragged"] => {
                let actual = engine
                    .dragged()
                    .map(|id| state.label_of(id))
                    .unwrap_or_else(|| "none".to_string());
                check_text(check, &actual, operator, expected_value)?
            }
            ["all", "contained"] => {
                let container = engine.container();
                let escaped: Vec<String> = engine
                    .bodies()
                    .iter()
                    .filter(|b| !is_contained(b, container))
                    .map(|b| state.label_of(b.id))
                    .collect();
                let actual = escaped.is_empty();
                if actual != parse_bool(expected_value) {
                    return Err(AssertionError {
                        message: format!("Check failed: {}", check),
                        expected: expected_value.to_string(),
                        actual: format!("{} (escaped: {:?})", actual, escaped),
                    });
                }
            }
            [label, property] => {
                let id = state.labels.get(*label).copied().ok_or_else(|| AssertionError {
                    message: format!("Body '{}' not found", label),
                    expected: format!("body '{}'", label),
                    actual: format!("available: {:?}", state.labels.keys().collect::<Vec<_>>()),
                })?;
                let body = engine.body(id).ok_or_else(|| AssertionError {
                    message: format!("Body '{}' missing from engine", label),
                    expected: format!("body id {}", id),
                    actual: "none".to_string(),
                })?;

                match *property {
                    "x" => check_float_comparison(path, body.position.x, operator, expected_value)?,
                    "y" => check_float_comparison(path, body.position.y, operator, expected_value)?,
                    "vx" => check_float_comparison(path, body.velocity.x, operator, expected_value)?,
                    "vy" => check_float_comparison(path, body.velocity.y, operator, expected_value)?,
                    "speed" => check_float_comparison(path, body.speed_sum(), operator, expected_value)?,
                    "radius" => check_float_comparison(path, body.radius, operator, expected_value)?,
                    "mass" => check_float_comparison(path, body.mass, operator, expected_value)?,
                    "dragging" => check_bool(check, body.is_dragging, expected_value)?,
                    "contained" => {
                        check_bool(check, is_contained(body, engine.container()), expected_value)?
                    }
                    other => {
                        return Err(AssertionError {
                            message: format!("Unknown property '{}' in {}", other, check),
                            expected: "x, y, vx, vy, speed, radius, mass, dragging, contained".to_string(),
                            actual: other.to_string(),
                        });
                    }
                }
            }
            _ => {
                return Err(AssertionError {
                    message: format!("Unknown check path: {}", path),
                    expected: "body.property, all.contained, dragged, kinetic, max_overlap, frame, bodies, contacts, viewport".to_string(),
                    actual: path.to_string(),
                });
            }
        }
    }

    Ok(())
}

fn parse_bool(value: &str) -> bool {
    value.trim_matches('"') == "true"
}

fn check_bool(check: &str, actual: bool, expected_value: &str) -> Result<(), AssertionError> {
    if actual != parse_bool(expected_value) {
        return Err(AssertionError {
            message: format!("Check failed: {}", check),
            expected: expected_value.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

fn check_text(check: &str, actual: &str, operator: &str, expected_value: &str) -> Result<(), AssertionError> {
    let expected = expected_value.trim_matches('"');
    let pass = match operator {
        "!=" => actual != expected,
        _ => actual == expected,
    };
    if !pass {
        return Err(AssertionError {
            message: format!("Check failed: {}", check),
            expected: format!("{} {}", operator, expected),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

/// Check float comparison with operator
fn check_float_comparison(path: &str, actual: f32, operator: &str, expected_str: &str) -> Result<(), AssertionError> {
    let value: f32 = expected_str.trim().parse().map_err(|_| AssertionError {
        message: format!("Invalid value for {}", path),
        expected: "number".to_string(),
        actual: expected_str.to_string(),
    })?;

    let pass = match operator {
        ">=" => actual >= value,
        "<=" => actual <= value,
        ">" => actual > value,
        "<" => actual < value,
        "=" => (actual - value).abs() < 0.01,
        "!=" => (actual - value).abs() >= 0.01,
        _ => false,
    };

    if !pass {
        return Err(AssertionError {
            message: format!("Check failed: {} {} {} (actual: {:.3})", path, operator, expected_str, actual),
            expected: format!("{} {} {}", path, operator, value),
            actual: format!("{:.3}", actual),
        });
    }

    Ok(())
}
