//! Debug UI components and systems

use bevy::prelude::*;

use crate::ball::BallEngine;
use crate::constants::VIEWPORT_PRESETS;
use crate::settings::CurrentSettings;
use crate::world::Container;

/// Debug settings resource
#[derive(Resource)]
pub struct DebugSettings {
    pub visible: bool,
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self { visible: false }
    }
}

/// Current viewport scale preset index
#[derive(Resource, Default)]
pub struct ViewportScale {
    pub preset_index: usize,
}

impl ViewportScale {
    /// Get current preset (width, height, label)
    pub fn current(&self) -> (f32, f32, &'static str) {
        VIEWPORT_PRESETS[self.preset_index.min(VIEWPORT_PRESETS.len() - 1)]
    }

    /// Cycle to next preset
    pub fn cycle_next(&mut self) {
        self.preset_index = (self.preset_index + 1) % VIEWPORT_PRESETS.len();
    }
}

/// Debug text component
#[derive(Component)]
pub struct DebugText;

/// Spawn the debug overlay as a UI node in the top-left corner
pub fn spawn_debug_text(commands: &mut Commands, visible: bool) {
    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 13.0,
            ..default()
        },
        TextColor(crate::constants::TEXT_SECONDARY),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(10.0),
            ..default()
        },
        if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        },
        DebugText,
    ));
}

/// Toggle debug UI visibility (Tab)
pub fn toggle_debug(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut settings: ResMut<DebugSettings>,
    mut current_settings: ResMut<CurrentSettings>,
    mut text_query: Query<&mut Visibility, With<DebugText>>,
) {
    if keyboard.just_pressed(KeyCode::Tab) {
        settings.visible = !settings.visible;
        if let Ok(mut visibility) = text_query.single_mut() {
            *visibility = if settings.visible {
                Visibility::Inherited
            } else {
                Visibility::Hidden
            };
        }
        current_settings.settings.debug_visible = settings.visible;
        current_settings.mark_dirty();
    }
}

/// Update debug text display
pub fn update_debug_text(
    debug_settings: Res<DebugSettings>,
    engine: Res<BallEngine>,
    container: Res<Container>,
    mut text_query: Query<&mut Text, With<DebugText>>,
) {
    if !debug_settings.visible {
        return;
    }

    let Ok(mut text) = text_query.single_mut() else {
        return;
    };

    let drag_str = match engine.dragged() {
        Some(id) => {
            let name = engine.body(id).map(|b| b.skill.name.as_str()).unwrap_or("?");
            format!("{} ({})", id, name)
        }
        None => "-".to_string(),
    };

    text.0 = format!(
        "Frame: {} | Bodies: {} | Contacts: {} | Walls: {}\nKinetic: {:.2} | Dragging: {}\nContainer: {:.0}x{:.0} ({})",
        engine.frame(),
        engine.bodies().len(),
        engine.last_contacts(),
        engine.last_wall_contacts(),
        engine.kinetic_sum(),
        drag_str,
        container.size.x,
        container.size.y,
        engine.viewport().name(),
    );
}

/// Cycle through viewport presets (V)
pub fn cycle_viewport(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut viewport_scale: ResMut<ViewportScale>,
    mut current_settings: ResMut<CurrentSettings>,
    mut window_query: Query<&mut Window>,
) {
    if keyboard.just_pressed(KeyCode::KeyV) {
        viewport_scale.cycle_next();
        apply_viewport(&viewport_scale, &mut window_query);
        current_settings.settings.viewport_index = viewport_scale.preset_index;
        current_settings.mark_dirty();
    }
}

/// Apply current viewport preset to the window. The container follows on
/// the next frame.
fn apply_viewport(viewport_scale: &ViewportScale, window_query: &mut Query<&mut Window>) {
    let (width, height, label) = viewport_scale.current();

    // Use scale_factor_override 1.0 for consistent HiDPI behavior
    if let Ok(mut window) = window_query.single_mut() {
        window.resolution = bevy::window::WindowResolution::new(width as u32, height as u32)
            .with_scale_factor_override(1.0);
    }

    info!("Viewport: {} ({}x{})", label, width, height);
}
