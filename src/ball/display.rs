//! Ball display - one disc and one label entity per body, synced from the engine

use bevy::prelude::*;

use crate::ball::{BallEngine, Body, BodyId};
use crate::constants::*;
use crate::world::Container;

/// Disc entity for a body. The mesh is a unit circle scaled by the radius.
#[derive(Component)]
pub struct SkillBall {
    pub id: BodyId,
}

/// Label entity drawn over a body's disc
#[derive(Component)]
pub struct SkillLabel {
    pub id: BodyId,
}

/// Engine generation the current entities were spawned for
#[derive(Resource, Default)]
pub struct RenderedGeneration(pub Option<u64>);

/// Respawn disc and label entities whenever the engine lays out a new body set
pub fn sync_ball_entities(
    mut commands: Commands,
    engine: Res<BallEngine>,
    mut rendered: ResMut<RenderedGeneration>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    balls: Query<Entity, With<SkillBall>>,
    labels: Query<Entity, With<SkillLabel>>,
) {
    if rendered.0 == Some(engine.generation()) {
        return;
    }
    rendered.0 = Some(engine.generation());

    for entity in balls.iter().chain(labels.iter()) {
        commands.entity(entity).despawn();
    }

    let disc = meshes.add(Circle::new(1.0));
    for (index, body) in engine.bodies().iter().enumerate() {
        let z = ball_z(body, index);
        commands.spawn((
            Mesh2d(disc.clone()),
            MeshMaterial2d(materials.add(ColorMaterial::from_color(body.skill.background))),
            Transform::from_xyz(0.0, 0.0, z).with_scale(Vec3::splat(body.radius)),
            SkillBall { id: body.id },
        ));
        commands.spawn((
            Text2d::new(body.skill.short_label()),
            TextFont {
                font_size: label_size(body),
                ..default()
            },
            TextLayout::new_with_justify(Justify::Center),
            TextColor(body.skill.color),
            Transform::from_xyz(0.0, 0.0, z + 0.005),
            SkillLabel { id: body.id },
        ));
    }

    debug!("Spawned display entities for {} bodies", engine.bodies().len());
}

/// Copy body positions and radii onto their entities
pub fn update_ball_transforms(
    engine: Res<BallEngine>,
    container: Res<Container>,
    mut balls: Query<(&SkillBall, &mut Transform), Without<SkillLabel>>,
    mut labels: Query<(&SkillLabel, &mut Transform, &mut TextFont), Without<SkillBall>>,
) {
    let bodies = engine.bodies();
    let lookup = |id: BodyId| bodies.iter().enumerate().find(|(_, b)| b.id == id);

    for (ball, mut transform) in &mut balls {
        let Some((index, body)) = lookup(ball.id) else {
            continue;
        };
        let world = container.to_world(body.position);
        transform.translation = world.extend(ball_z(body, index));
        transform.scale = Vec3::splat(body.radius);
    }

    for (label, mut transform, mut font) in &mut labels {
        let Some((index, body)) = lookup(label.id) else {
            continue;
        };
        let world = container.to_world(body.position);
        transform.translation = world.extend(ball_z(body, index) + 0.005);
        let size = label_size(body);
        if font.font_size != size {
            font.font_size = size;
        }
    }
}

/// Later bodies stack above earlier ones; the dragged body is always on top
fn ball_z(body: &Body, index: usize) -> f32 {
    if body.is_dragging {
        DRAGGED_BALL_Z
    } else {
        BALL_Z + index as f32 * 0.01
    }
}

fn label_size(body: &Body) -> f32 {
    (body.icon_size * LABEL_SCALE).max(8.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ball::SizeClass;
    use crate::skills::Skill;

    fn body(dragging: bool) -> Body {
        let mut body = Body::with_radius(
            0,
            Skill::new("Rust", "#dea584", "#000000", SizeClass::Large),
            Vec2::ZERO,
            Vec2::ZERO,
            40.0,
            40.0,
        );
        body.is_dragging = dragging;
        body
    }

    #[test]
    fn test_dragged_body_draws_on_top() {
        assert_eq!(ball_z(&body(true), 3), DRAGGED_BALL_Z);
        assert!(ball_z(&body(false), 15) < DRAGGED_BALL_Z);
        assert!(ball_z(&body(false), 2) > ball_z(&body(false), 1));
    }

    #[test]
    fn test_label_size_has_floor() {
        let mut tiny = body(false);
        tiny.icon_size = 1.0;
        assert_eq!(label_size(&tiny), 8.0);
    }
}
