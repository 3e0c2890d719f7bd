//! Input module - maps mouse and touch pointers onto engine drag operations

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::ball::BallEngine;

/// Which pointer owns the current drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse,
    Touch(u64),
}

/// Pointer ownership tracked alongside the engine's drag
#[derive(Resource, Default)]
pub struct PointerState {
    pub source: Option<PointerSource>,
}

impl PointerState {
    /// Forget a pointer whose drag the engine already dropped (e.g. reseed)
    fn sync(&mut self, engine: &BallEngine) {
        if engine.dragged().is_none() {
            self.source = None;
        }
    }
}

/// Grab with left button, drag while held, throw on release.
/// Leaving the window ends the drag.
pub fn handle_mouse_drag(
    mouse: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    time: Res<Time<Real>>,
    mut pointer: ResMut<PointerState>,
    mut engine: ResMut<BallEngine>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };
    let now = time.elapsed_secs_f64();
    let cursor = window.cursor_position();
    pointer.sync(&engine);

    if mouse.just_pressed(MouseButton::Left)
        && pointer.source.is_none()
        && let Some(position) = cursor
        && let Some(id) = engine.body_at(position)
        && engine.begin_drag(id, position, now)
    {
        pointer.source = Some(PointerSource::Mouse);
        return;
    }

    if pointer.source != Some(PointerSource::Mouse) {
        return;
    }

    match cursor {
        Some(position) if mouse.pressed(MouseButton::Left) => {
            // Only real movement feeds the throw, like pointer-move events
            let moved = engine
                .drag_anchor()
                .is_none_or(|(last, _)| last != position);
            if moved {
                engine.update_drag(position, now);
            }
        }
        _ => {
            engine.end_drag();
            pointer.source = None;
        }
    }
}

/// Same drag lifecycle for the first touch that lands on a body
pub fn handle_touch_drag(
    touches: Res<Touches>,
    time: Res<Time<Real>>,
    mut pointer: ResMut<PointerState>,
    mut engine: ResMut<BallEngine>,
) {
    let now = time.elapsed_secs_f64();
    pointer.sync(&engine);

    if pointer.source.is_none() {
        for touch in touches.iter_just_pressed() {
            let position = touch.position();
            if let Some(id) = engine.body_at(position)
                && engine.begin_drag(id, position, now)
            {
                pointer.source = Some(PointerSource::Touch(touch.id()));
                return;
            }
        }
    }

    let Some(PointerSource::Touch(touch_id)) = pointer.source else {
        return;
    };

    if touches.just_released(touch_id) || touches.just_canceled(touch_id) {
        engine.end_drag();
        pointer.source = None;
        return;
    }

    if let Some(touch) = touches.get_pressed(touch_id)
        && touch.delta() != Vec2::ZERO
    {
        engine.update_drag(touch.position(), now);
    }
}
