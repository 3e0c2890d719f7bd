//! Hover tooltip with the skill name

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::ball::BallEngine;
use crate::constants::*;
use crate::world::Container;

/// Tooltip text entity
#[derive(Component)]
pub struct HoverTooltip;

/// Spawn the (hidden) tooltip text
pub fn spawn_tooltip(commands: &mut Commands) {
    commands.spawn((
        Text2d::new(""),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextLayout::new_with_justify(Justify::Center),
        TextColor(TEXT_PRIMARY),
        Transform::from_xyz(0.0, 0.0, TOOLTIP_Z),
        Visibility::Hidden,
        HoverTooltip,
    ));
}

/// Show the hovered body's skill name just above it; hidden while dragging
pub fn update_tooltip(
    window_query: Query<&Window, With<PrimaryWindow>>,
    engine: Res<BallEngine>,
    container: Res<Container>,
    mut tooltip: Query<(&mut Text2d, &mut Transform, &mut Visibility), With<HoverTooltip>>,
) {
    let Ok((mut text, mut transform, mut visibility)) = tooltip.single_mut() else {
        return;
    };

    let hovered = window_query
        .single()
        .ok()
        .and_then(|w| w.cursor_position())
        .filter(|_| engine.dragged().is_none())
        .and_then(|cursor| engine.body_at(cursor))
        .and_then(|id| engine.body(id));

    let Some(body) = hovered else {
        *visibility = Visibility::Hidden;
        return;
    };

    if text.0 != body.skill.name {
        text.0 = body.skill.name.clone();
    }
    let above = body.position - Vec2::new(0.0, body.radius + 14.0);
    transform.translation = container.to_world(above).extend(TOOLTIP_Z);
    *visibility = Visibility::Inherited;
}
