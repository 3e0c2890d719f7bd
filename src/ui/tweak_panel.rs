//! Physics tuning panel UI components and systems

use bevy::prelude::*;

use crate::ball::BallEngine;
use crate::constants::*;
use crate::tuning::{PHYSICS_TUNING_FILE, PhysicsTuning};

/// Panel selection and visibility. Values live in the engine's tuning.
#[derive(Resource, Default)]
pub struct TuningPanel {
    pub selected_index: usize,
    pub panel_visible: bool,
}

/// Tweak panel container component
#[derive(Component)]
pub struct TweakPanel;

/// Tweak row component with index
#[derive(Component)]
pub struct TweakRow(pub usize);

/// Spawn the panel (hidden by default, toggle with F1)
pub fn spawn_tweak_panel(commands: &mut Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(10.0),
                top: Val::Px(10.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(10.0)),
                row_gap: Val::Px(4.0),
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.9)),
            Visibility::Hidden,
            TweakPanel,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Physics Tuning (F1 to close)"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(TEXT_PRIMARY),
            ));
            parent.spawn((
                Text::new("Up/Down: select | Left/Right: adjust"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(TEXT_SECONDARY),
            ));
            parent.spawn((
                Text::new("R: reset selected | Shift+R: reset all | F5: save"),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(TEXT_SECONDARY),
            ));

            for (i, label) in PhysicsTuning::LABELS.iter().enumerate() {
                parent.spawn((
                    Text::new(format!("{}: ---", label)),
                    TextFont {
                        font_size: 13.0,
                        ..default()
                    },
                    TextColor(TEXT_PRIMARY),
                    TweakRow(i),
                ));
            }
        });
}

/// Toggle tuning panel visibility and handle input
pub fn toggle_tweak_panel(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut panel: ResMut<TuningPanel>,
    mut engine: ResMut<BallEngine>,
    mut panel_query: Query<&mut Visibility, With<TweakPanel>>,
) {
    // F1 toggles panel visibility
    if keyboard.just_pressed(KeyCode::F1) {
        panel.panel_visible = !panel.panel_visible;
        if let Ok(mut visibility) = panel_query.single_mut() {
            *visibility = if panel.panel_visible {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }
    }

    // Only process input when panel is visible
    if !panel.panel_visible {
        return;
    }

    let num_params = PhysicsTuning::LABELS.len();

    if keyboard.just_pressed(KeyCode::ArrowUp) {
        panel.selected_index = (panel.selected_index + num_params - 1) % num_params;
    }
    if keyboard.just_pressed(KeyCode::ArrowDown) {
        panel.selected_index = (panel.selected_index + 1) % num_params;
    }

    let idx = panel.selected_index;
    let step = PhysicsTuning::get_step(idx);
    let mut tuning = engine.tuning().clone();

    if keyboard.just_pressed(KeyCode::ArrowLeft) {
        let current = tuning.get_value(idx);
        tuning.set_value(idx, (current - step).max(0.0));
    }
    if keyboard.just_pressed(KeyCode::ArrowRight) {
        let current = tuning.get_value(idx);
        tuning.set_value(idx, current + step);
    }

    if keyboard.just_pressed(KeyCode::KeyR) {
        if keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight) {
            tuning.reset_all();
        } else {
            tuning.reset_value(idx);
        }
    }

    if &tuning != engine.tuning() {
        engine.set_tuning(tuning);
    }

    if keyboard.just_pressed(KeyCode::F5) {
        if let Err(e) = engine.tuning().save(PHYSICS_TUNING_FILE) {
            warn!("Failed to save physics tuning: {}", e);
        }
    }
}

/// Update tuning panel display
pub fn update_tweak_panel(
    panel: Res<TuningPanel>,
    engine: Res<BallEngine>,
    mut row_query: Query<(&mut Text, &mut TextColor, &TweakRow)>,
) {
    if !panel.panel_visible {
        return;
    }

    let tuning = engine.tuning();
    for (mut text, mut color, row) in &mut row_query {
        text.0 = format!("{}: {}", PhysicsTuning::LABELS[row.0], format_value(row.0, tuning));

        // Color priority: selected (yellow) > modified (red) > default (white)
        if row.0 == panel.selected_index {
            color.0 = Color::srgb(1.0, 1.0, 0.0);
        } else if tuning.is_modified(row.0) {
            color.0 = Color::srgb(1.0, 0.4, 0.4);
        } else {
            color.0 = Color::WHITE;
        }
    }
}

fn format_value(index: usize, tuning: &PhysicsTuning) -> String {
    let value = tuning.get_value(index);
    match index {
        1 | 3 => format!("{:.3}", value), // Damping factors
        7 => format!("{:.0}", value),     // Sample count
        _ => format!("{:.2}", value),
    }
}
