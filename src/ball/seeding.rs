//! Initial body layout

use bevy::prelude::*;
use rand::Rng;

use crate::ball::body::{Body, BodyId, ViewportClass};
use crate::constants::*;
use crate::skills::Skill;

/// Lay bodies out in a jittered grid near the top of the container.
///
/// Columns wrap by roster index, so later skills start in the same columns
/// as earlier ones and fall into place through collisions. Ids are the roster
/// index. Positions may start outside a tiny container; the first `step`
/// clamps them.
pub fn seed_bodies(
    skills: &[Skill],
    container: Vec2,
    viewport: ViewportClass,
    reference_radius: f32,
    rng: &mut impl Rng,
) -> Vec<Body> {
    let (cols, margin, jitter, spread) = match viewport {
        ViewportClass::Desktop => (
            SEED_COLUMNS_DESKTOP,
            SEED_MARGIN_DESKTOP,
            SEED_JITTER_DESKTOP,
            SEED_DROP_SPREAD_DESKTOP,
        ),
        ViewportClass::Mobile => (
            SEED_COLUMNS_MOBILE,
            SEED_MARGIN_MOBILE,
            SEED_JITTER_MOBILE,
            SEED_DROP_SPREAD_MOBILE,
        ),
    };
    let spacing = (container.x - margin) / cols as f32;

    skills
        .iter()
        .enumerate()
        .map(|(index, skill)| {
            let col = index % cols;
            let mut body = Body::new(
                index as BodyId,
                skill.clone(),
                Vec2::ZERO,
                viewport,
                reference_radius,
            );

            let x = margin / 2.0
                + spacing * col as f32
                + spacing / 2.0
                + rng.gen_range(-jitter / 2.0..jitter / 2.0);
            let y = body.radius + SEED_DROP_HEIGHT + rng.gen_range(0.0..spread);

            body.position = Vec2::new(x, y);
            body.velocity = Vec2::new(rng.gen_range(-SEED_MAX_SPEED_X..SEED_MAX_SPEED_X), 0.0);
            body
        })
        .collect()
}
